//! Common traits and types that are useful for working with `xfgrid`
#![allow(unused_imports)]

pub use crate::data::GridData;
pub use crate::grid::{Axis, Coordinates, GridDefinition, YeeComponent};
pub use crate::traits::SampleValue;
pub use crate::{Error, Scalar3D};

pub(crate) use derive_more::{Constructor, Deref, DerefMut, Display, From, Into};

pub(crate) use ndarray::Array3;
