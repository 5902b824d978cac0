//! Command line runner for the `fieldtrace` library.

#[quit::main]
fn main() {
    fieldtrace::cli::run::run();
}
