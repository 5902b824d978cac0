//! File input/output.

pub mod snapshot;

/// Little- or big-endian byte order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endianness {
    Little,
    Big,
}
