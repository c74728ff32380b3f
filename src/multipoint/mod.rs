//! Reading multipoint (solid) sensors.
//!
//! A sensor is described by `MultiPoint_<name>_<n>_info.bin` in a run's output
//! directory, next to a directory of the same name without the `_info.bin`
//! suffix. That directory holds `geom.bin` with the grid cell of every sensor
//! point, `frequencies.bin`, and one sub-directory per recorded field holding a
//! sample file per frequency. Samples are stored sparsely, one value per
//! point; [`MultiPointSensor::read`] scatters them back onto a dense array
//! covering the sensor's bounding box.

mod field;
mod frequencies;
mod geometry;
mod info;

pub use field::{
    combine_complex, decode_samples, FieldDirectories, FieldQuantity, FieldRequest, SensorField,
};
pub use frequencies::Frequencies;
pub use geometry::{DuplicatePoint, IndexDomain, MultiPointGeometry};
pub use info::{FieldMask, MultiPointInfo};

use crate::array::Scalar3D;
use crate::data::GridData;
use crate::grid::Coordinates;
use crate::utils::read_file;
use crate::Error;

use log::{debug, info};
use std::path::{Path, PathBuf};

const INFO_SUFFIX: &str = "_info.bin";
const GEOMETRY_FILE: &str = "geom.bin";
const FREQUENCIES_FILE: &str = "frequencies.bin";

/// the data directory belonging to an info file
fn sensor_directory(info_path: &Path) -> PathBuf {
    let file_name = info_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(INFO_SUFFIX).unwrap_or(&file_name);

    info_path.with_file_name(stem)
}

/// An opened multipoint sensor: its info header and point geometry
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPointSensor {
    info_path: PathBuf,
    directory: PathBuf,
    info: MultiPointInfo,
    geometry: MultiPointGeometry,
}

impl MultiPointSensor {
    /// Open the sensor described by an `*_info.bin` file
    pub fn open<P: AsRef<Path>>(info_path: P) -> Result<Self, Error> {
        let info_path = info_path.as_ref();
        info!("opening multipoint sensor {}", info_path.display());

        let info = MultiPointInfo::decode(&read_file(info_path)?).map_err(|source| {
            Error::Format {
                path: info_path.to_path_buf(),
                source,
            }
        })?;
        debug!("multipoint info: {info:?}");

        let directory = sensor_directory(info_path);
        let geometry_path = directory.join(GEOMETRY_FILE);
        let geometry = MultiPointGeometry::decode(&read_file(&geometry_path)?, info.point_count)?;

        Ok(Self {
            info_path: info_path.to_path_buf(),
            directory,
            info,
            geometry,
        })
    }

    /// Find the sensor called `name` in a run's output directory.
    ///
    /// The first `MultiPoint_<name>*_info.bin` file in lexical order is used.
    pub fn find<P: AsRef<Path>>(output_dir: P, name: &str) -> Result<Self, Error> {
        let output_dir = output_dir.as_ref();
        let prefix = format!("MultiPoint_{name}");

        let io_error = |source| Error::Io {
            path: output_dir.to_path_buf(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(output_dir).map_err(io_error)? {
            let file_name = entry.map_err(io_error)?.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name.starts_with(&prefix) && file_name.ends_with(INFO_SUFFIX) {
                candidates.push(file_name.into_owned());
            }
        }
        candidates.sort();

        match candidates.first() {
            Some(file_name) => Self::open(output_dir.join(file_name)),
            None => Err(Error::MissingFile(
                output_dir.join(format!("{prefix}*{INFO_SUFFIX}")),
            )),
        }
    }

    pub fn info_path(&self) -> &Path {
        &self.info_path
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn info(&self) -> &MultiPointInfo {
        &self.info
    }

    pub fn geometry(&self) -> &MultiPointGeometry {
        &self.geometry
    }

    /// fields recorded by this sensor, as named on disk
    pub fn recorded_fields(&self) -> Vec<String> {
        self.info.fields.directory_names()
    }

    pub fn frequencies(&self) -> Result<Frequencies, Error> {
        let bytes = read_file(&self.directory.join(FREQUENCIES_FILE))?;
        Ok(Frequencies::decode(&bytes))
    }

    /// raw samples of one field directory at the frequency with index `frequency`
    pub fn samples(&self, field_directory: &str, frequency: usize) -> Result<Vec<f32>, Error> {
        let path = self
            .directory
            .join(field_directory)
            .join(format!("{frequency}.bin"));
        info!("loading multipoint samples from {}", path.display());

        let bytes = read_file(&path)?;
        Ok(decode_samples(&bytes, self.geometry.len())?)
    }

    /// Read one field and place it on the sensor's dense domain
    pub fn read(&self, request: FieldRequest, frequency: usize) -> Result<SensorField, Error> {
        match request.directories() {
            FieldDirectories::Complex { real, imaginary } => {
                let real = self.samples(&real, frequency)?;
                let imaginary = self.samples(&imaginary, frequency)?;
                let combined = combine_complex(&real, &imaginary)?;
                Ok(SensorField::Complex(self.geometry.scatter(&combined)?))
            }
            FieldDirectories::Real(directory) => {
                let samples = self.samples(&directory, frequency)?;
                Ok(SensorField::Real(self.geometry.scatter(&samples)?))
            }
        }
    }

    /// Locations of the sensor's dense domain on the simulation grid
    pub fn coordinates(&self, grid: &Coordinates) -> Result<Coordinates, Error> {
        Ok(self.geometry.coordinates(grid)?)
    }

    /// [`read`](Self::read) as a complex field paired with its coordinates, ready
    /// for regridding
    pub fn grid_data(
        &self,
        request: FieldRequest,
        frequency: usize,
        grid: &Coordinates,
    ) -> Result<GridData<num_complex::Complex32>, Error> {
        let coordinates = self.coordinates(grid)?;
        let field: Scalar3D<_> = self.read(request, frequency)?.into_complex();
        Ok(GridData::new(coordinates, field)?)
    }
}
