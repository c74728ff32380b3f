use std::fmt;

use num_complex::Complex32;

use crate::array::Scalar3D;
use crate::grid::{Axis, YeeComponent};
use crate::utils::bytes_to_f32s;
use crate::DimensionMismatch;

/// Steady-state quantities recorded as real and imaginary parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldQuantity {
    E,
    H,
    B,
    J,
}

impl FieldQuantity {
    /// total fields carry a `t` suffix; current density has no scattered part
    fn total_suffix(self) -> &'static str {
        match self {
            FieldQuantity::E | FieldQuantity::H | FieldQuantity::B => "t",
            FieldQuantity::J => "",
        }
    }
}

impl fmt::Display for FieldQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            FieldQuantity::E => "E",
            FieldQuantity::H => "H",
            FieldQuantity::B => "B",
            FieldQuantity::J => "J",
        };
        f.write_str(letter)
    }
}

/// One field component to read from a multipoint sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRequest {
    /// complex steady-state field, read from a real and an imaginary directory
    SteadyState { quantity: FieldQuantity, axis: Axis },
    /// real dissipated power density for one E or H component
    DissipatedPower(YeeComponent),
}

/// Where the samples of a [`FieldRequest`] are stored, relative to the sensor
/// directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDirectories {
    Complex { real: String, imaginary: String },
    Real(String),
}

impl FieldRequest {
    pub fn steady_state(quantity: FieldQuantity, axis: Axis) -> Self {
        FieldRequest::SteadyState { quantity, axis }
    }

    pub fn directories(&self) -> FieldDirectories {
        match *self {
            FieldRequest::SteadyState { quantity, axis } => {
                let suffix = quantity.total_suffix();
                FieldDirectories::Complex {
                    real: format!("ss_{quantity}{axis}r{suffix}"),
                    imaginary: format!("ss_{quantity}{axis}i{suffix}"),
                }
            }
            FieldRequest::DissipatedPower(component) => {
                FieldDirectories::Real(format!("ss_Pdd{component}"))
            }
        }
    }
}

/// A reconstructed sensor field on the sensor's dense domain
#[derive(Debug, Clone, PartialEq)]
pub enum SensorField {
    Real(Scalar3D<f32>),
    Complex(Scalar3D<Complex32>),
}

impl SensorField {
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            SensorField::Real(field) => field.dim(),
            SensorField::Complex(field) => field.dim(),
        }
    }

    pub fn into_complex(self) -> Scalar3D<Complex32> {
        match self {
            SensorField::Real(field) => Scalar3D::new(field.mapv(|re| Complex32::new(re, 0.0))),
            SensorField::Complex(field) => field,
        }
    }
}

/// Decode one sample file: exactly `point_count` little-endian `f32` values
pub fn decode_samples(bytes: &[u8], point_count: usize) -> Result<Vec<f32>, DimensionMismatch> {
    if Some(bytes.len()) != point_count.checked_mul(4) {
        return Err(DimensionMismatch::new(
            "multipoint sample file length",
            format!("4 bytes for each of {point_count} points"),
            format!("{} bytes", bytes.len()),
        ));
    }

    Ok(bytes_to_f32s(bytes))
}

/// `real + j·imaginary`, element by element
pub fn combine_complex(real: &[f32], imaginary: &[f32]) -> Result<Vec<Complex32>, DimensionMismatch> {
    if real.len() != imaginary.len() {
        return Err(DimensionMismatch::new(
            "imaginary samples",
            format!("{} values", real.len()),
            format!("{} values", imaginary.len()),
        ));
    }

    Ok(real
        .iter()
        .zip(imaginary)
        .map(|(&re, &im)| Complex32::new(re, im))
        .collect())
}
