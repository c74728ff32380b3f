//! dense container types produced by the decoders

mod scalar_3d;

pub use scalar_3d::{ColumnMajorIter, Scalar3D};
