//! Reading and writing of field snapshots in the native binary format.
//!
//! A snapshot file holds a header describing the grid, a set of physical
//! constants, an ordered catalogue of variable names, and one value
//! block per variable. The position of a name in the catalogue is a
//! stable index used to locate the corresponding value block.

use crate::{
    field::{ScalarField3, VectorField3},
    geometry::{
        Dim3::{self, X, Y, Z},
        In3D, Vec3,
    },
    grid::RegularGrid3,
    io::Endianness,
};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use ndarray::prelude::*;
use std::{
    fs,
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    mem,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Floating-point precision assumed for snapshot data.
#[allow(non_camel_case_types)]
pub type fsd = f64;

/// Identifying bytes at the start of every native snapshot file.
pub const NATIVE_SNAPSHOT_MAGIC: &[u8; 8] = b"FTSNAP01";

/// Longest accepted variable name, in bytes.
const MAX_VARIABLE_NAME_LEN: usize = 256;

/// Physical constants stored in a snapshot header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Adiabatic index of the simulated plasma.
    pub adiabatic_index: fsd,
    /// Inverse of the vacuum permeability used by the simulation.
    pub inverse_vacuum_permeability: fsd,
    /// Mass of the simulated particle species.
    pub particle_mass: fsd,
}

/// Reader for a single field snapshot file.
#[derive(Debug)]
pub struct SnapshotReader3 {
    file_path: PathBuf,
    endianness: Endianness,
    grid: Arc<RegularGrid3<fsd>>,
    constants: PhysicalConstants,
    variable_names: Vec<String>,
    data_offset: u64,
}

impl SnapshotReader3 {
    /// Opens the snapshot file at the given path and reads its header.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains a new `SnapshotReader3`.
    /// - `Err`: Contains an error encountered while opening or parsing the file.
    pub fn open(file_path: &Path) -> io::Result<Self> {
        let file = fs::File::open(file_path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0; 8];
        reader.read_exact(&mut magic)?;
        if &magic != NATIVE_SNAPSHOT_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Not a native field snapshot file",
            ));
        }
        let endianness = match reader.read_u8()? {
            0 => Endianness::Little,
            1 => Endianness::Big,
            code => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid endianness marker {} in snapshot file", code),
                ))
            }
        };
        match endianness {
            Endianness::Little => {
                Self::read_header::<LittleEndian>(file_path, endianness, reader)
            }
            Endianness::Big => Self::read_header::<BigEndian>(file_path, endianness, reader),
        }
    }

    fn read_header<B: ByteOrder>(
        file_path: &Path,
        endianness: Endianness,
        mut reader: BufReader<fs::File>,
    ) -> io::Result<Self> {
        let mut shape = [0_usize; 3];
        for n_cells in &mut shape {
            let n = reader.read_u64::<B>()?;
            if n < 2 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Snapshot grid must have at least 2 cells in every dimension",
                ));
            }
            *n_cells = n as usize;
        }

        let mut bounds = [0.0; 6];
        for bound in &mut bounds {
            *bound = reader.read_f64::<B>()?;
        }
        for dim in 0..3 {
            if !(bounds[dim + 3] > bounds[dim]) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Invalid grid extent in snapshot file",
                ));
            }
        }

        let constants = PhysicalConstants {
            adiabatic_index: reader.read_f64::<B>()?,
            inverse_vacuum_permeability: reader.read_f64::<B>()?,
            particle_mass: reader.read_f64::<B>()?,
        };

        let n_variables = reader.read_u64::<B>()? as usize;
        let mut variable_names = Vec::with_capacity(n_variables);
        for _ in 0..n_variables {
            let name_len = reader.read_u64::<B>()? as usize;
            if name_len == 0 || name_len > MAX_VARIABLE_NAME_LEN {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid variable name length {} in snapshot file", name_len),
                ));
            }
            let mut name_bytes = vec![0; name_len];
            reader.read_exact(&mut name_bytes)?;
            let name = String::from_utf8(name_bytes).map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid variable name in snapshot file: {}", err),
                )
            })?;
            variable_names.push(name);
        }

        let data_offset = reader.stream_position()?;
        let grid = Arc::new(RegularGrid3::new(
            In3D::new(shape[0], shape[1], shape[2]),
            Vec3::new(bounds[0], bounds[1], bounds[2]),
            Vec3::new(bounds[3], bounds[4], bounds[5]),
        ));

        Ok(Self {
            file_path: file_path.to_path_buf(),
            endianness,
            grid,
            constants,
            variable_names,
            data_offset,
        })
    }

    /// Returns a reference to the grid the snapshot fields are sampled on.
    pub fn grid(&self) -> &RegularGrid3<fsd> {
        &self.grid
    }

    /// Returns the physical constants stored in the snapshot header.
    pub fn physical_constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Returns the ordered catalogue of variable names stored in the snapshot.
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Reads the value block of the named variable and wraps it in a
    /// scalar field.
    pub fn read_scalar_field(&self, variable_name: &str) -> io::Result<ScalarField3<fsd>> {
        let index = self
            .variable_names
            .iter()
            .position(|name| name == variable_name)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Variable {} not present in snapshot file", variable_name),
                )
            })?;
        let values = self.read_variable_values(index)?;
        Ok(ScalarField3::new(
            variable_name.to_string(),
            Arc::clone(&self.grid),
            values,
        ))
    }

    /// Reads the three named component variables and combines them into
    /// a vector field.
    pub fn read_vector_field(&self, component_names: &In3D<String>) -> io::Result<VectorField3<fsd>> {
        let components = In3D::new(
            self.read_scalar_field(&component_names[X])?,
            self.read_scalar_field(&component_names[Y])?,
            self.read_scalar_field(&component_names[Z])?,
        );
        let name = format!(
            "{},{},{}",
            component_names[X], component_names[Y], component_names[Z]
        );
        Ok(VectorField3::from_scalar_components(name, components))
    }

    fn read_variable_values(&self, index: usize) -> io::Result<Array3<fsd>> {
        let shape = self.grid.shape();
        let n_values = shape[X] * shape[Y] * shape[Z];
        let offset = self.data_offset + (index * n_values * mem::size_of::<fsd>()) as u64;

        let file = fs::File::open(&self.file_path)?;
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(offset))?;

        let mut values = vec![0.0; n_values];
        match self.endianness {
            Endianness::Little => reader.read_f64_into::<LittleEndian>(&mut values)?,
            Endianness::Big => reader.read_f64_into::<BigEndian>(&mut values)?,
        }
        Array::from_shape_vec((shape[X], shape[Y], shape[Z]), values)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
    }
}

/// Writes a snapshot with the given grid, physical constants and
/// variables in the native format.
///
/// The variables are stored in the given order, which becomes the
/// catalogue order of the written snapshot.
pub fn write_snapshot(
    file_path: &Path,
    grid: &RegularGrid3<fsd>,
    constants: &PhysicalConstants,
    variables: &[(String, Array3<fsd>)],
    endianness: Endianness,
) -> io::Result<()> {
    let file = fs::File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(NATIVE_SNAPSHOT_MAGIC)?;
    match endianness {
        Endianness::Little => {
            writer.write_u8(0)?;
            write_snapshot_body::<LittleEndian, _>(writer, grid, constants, variables)
        }
        Endianness::Big => {
            writer.write_u8(1)?;
            write_snapshot_body::<BigEndian, _>(writer, grid, constants, variables)
        }
    }
}

fn write_snapshot_body<B: ByteOrder, W: Write>(
    mut writer: W,
    grid: &RegularGrid3<fsd>,
    constants: &PhysicalConstants,
    variables: &[(String, Array3<fsd>)],
) -> io::Result<()> {
    let shape = grid.shape();
    for &dim in &Dim3::slice() {
        writer.write_u64::<B>(shape[dim] as u64)?;
    }
    for &dim in &Dim3::slice() {
        writer.write_f64::<B>(grid.lower_bounds()[dim])?;
    }
    for &dim in &Dim3::slice() {
        writer.write_f64::<B>(grid.upper_bounds()[dim])?;
    }
    writer.write_f64::<B>(constants.adiabatic_index)?;
    writer.write_f64::<B>(constants.inverse_vacuum_permeability)?;
    writer.write_f64::<B>(constants.particle_mass)?;

    writer.write_u64::<B>(variables.len() as u64)?;
    for (name, _) in variables {
        writer.write_u64::<B>(name.len() as u64)?;
        writer.write_all(name.as_bytes())?;
    }
    for (name, values) in variables {
        if values.shape() != [shape[X], shape[Y], shape[Z]] {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Values for variable {} do not match the grid shape", name),
            ));
        }
        for &value in values.iter() {
            writer.write_f64::<B>(value)?;
        }
    }
    Ok(())
}
