#![doc = include_str!("../README.md")]

pub mod array;
mod data;
pub mod geometry;
pub mod grid;
pub mod materialize;
pub mod mesh;
pub mod multipoint;
pub mod prelude;
pub mod project;
mod regrid;
mod traits;
mod utils;

pub use traits::SampleValue;

pub use data::GridData;

pub use grid::{Axis, AxisDeltas, Breakpoint, Coordinates, GridDefinition, LengthUnit, YeeComponent};

pub use array::Scalar3D;

pub use geometry::{parse_geometry, read_geometry, Geometry, MaterialId, MaterialTable};
pub use materialize::{materialize, MaterialGrid, Property};
pub use mesh::{decode_mesh, read_mesh, MeshFile};
pub use multipoint::{FieldQuantity, FieldRequest, MultiPointSensor, SensorField};
pub use project::{ProjectLayout, RunId, Simulation, SimulationId};
pub use regrid::{nearest_index, regrid};

pub use utils::Truncated;

pub use ndarray;
pub use num_complex;

use std::path::PathBuf;

/// Two shapes that must agree do not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::Constructor)]
#[error("dimension mismatch in {context}: expected {expected}, found {actual}")]
pub struct DimensionMismatch {
    pub context: &'static str,
    pub expected: String,
    pub actual: String,
}

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("required file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("An io error occured while reading `{}`: `{source}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed binary file `{}`: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: mesh::FormatError,
    },
    #[error("malformed geometry file `{}`: {source}", .path.display())]
    Geometry {
        path: PathBuf,
        #[source]
        source: geometry::GeometryError,
    },
    #[error(transparent)]
    MaterialIndex(#[from] geometry::MaterialIndexError),
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
    #[error(transparent)]
    OverlappingRuns(#[from] materialize::OverlappingRuns),
    #[error(transparent)]
    RunOutOfBounds(#[from] materialize::RunOutOfBounds),
    #[error(transparent)]
    DuplicatePoint(#[from] multipoint::DuplicatePoint),
    #[error(transparent)]
    InvalidId(#[from] project::InvalidId),
}
