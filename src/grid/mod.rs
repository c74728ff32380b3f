//! Rectilinear grid description shared by every decoder: axes, Yee components,
//! cell spacing and the derived node coordinates.

mod component;
mod coordinates;
mod definition;
mod units;

pub use component::{Axis, YeeComponent};
pub use coordinates::Coordinates;
pub use definition::{AxisDeltas, Breakpoint, GridDefinition, InvalidDeltas};
pub use units::{LengthUnit, UnknownUnit};
