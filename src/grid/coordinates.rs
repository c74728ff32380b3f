use super::{Axis, LengthUnit};
use std::ops::RangeInclusive;

/// Node locations of a non-uniform rectilinear grid, one list per axis.
///
/// The array shape of any data living on this grid is
/// `(x_locations.len(), y_locations.len(), z_locations.len())`.
///
/// # Example
///
/// ```
/// use xfgrid::Coordinates;
///
/// let coords = Coordinates::new(vec![0.0, 0.5], vec![0.0], vec![0.0, 1.0, 3.0]);
/// assert_eq!(coords.shape(), (2, 1, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coordinates {
    pub x_locations: Vec<f64>,
    pub y_locations: Vec<f64>,
    pub z_locations: Vec<f64>,
}

impl Coordinates {
    pub fn new(x_locations: Vec<f64>, y_locations: Vec<f64>, z_locations: Vec<f64>) -> Self {
        Self {
            x_locations,
            y_locations,
            z_locations,
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x_locations
    }

    pub fn y(&self) -> &[f64] {
        &self.y_locations
    }

    pub fn z(&self) -> &[f64] {
        &self.z_locations
    }

    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => self.x(),
            Axis::Y => self.y(),
            Axis::Z => self.z(),
        }
    }

    /// the shape of a dense array sampled at these locations
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.x_locations.len(),
            self.y_locations.len(),
            self.z_locations.len(),
        )
    }

    /// copy of these coordinates expressed in `unit` instead of meters
    pub fn scaled(&self, unit: LengthUnit) -> Coordinates {
        let factor = unit.scale_from_meters();
        let scale = |locations: &[f64]| locations.iter().map(|v| v * factor).collect();

        Coordinates::new(
            scale(&self.x_locations),
            scale(&self.y_locations),
            scale(&self.z_locations),
        )
    }

    /// Restrict the coordinates to inclusive index ranges on every axis.
    ///
    /// Returns `None` if any range reaches past the end of its axis.
    pub fn sub_range(
        &self,
        x: RangeInclusive<usize>,
        y: RangeInclusive<usize>,
        z: RangeInclusive<usize>,
    ) -> Option<Coordinates> {
        Some(Coordinates::new(
            self.x_locations.get(x)?.to_vec(),
            self.y_locations.get(y)?.to_vec(),
            self.z_locations.get(z)?.to_vec(),
        ))
    }
}
