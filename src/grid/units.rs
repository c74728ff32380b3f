use std::str::FromStr;

const METERS_PER_INCH: f64 = 0.0254;

/// Length unit used when exporting grid coordinates. All internal coordinates
/// are stored in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Meters,
    Millimeters,
    Centimeters,
    Micrometers,
    Nanometers,
    Inches,
}

impl LengthUnit {
    /// multiply a length in meters by this factor to express it in `self`
    pub fn scale_from_meters(self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Millimeters => 1e3,
            LengthUnit::Centimeters => 1e2,
            LengthUnit::Micrometers => 1e6,
            LengthUnit::Nanometers => 1e9,
            LengthUnit::Inches => 1.0 / METERS_PER_INCH,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Micrometers => "um",
            LengthUnit::Nanometers => "nm",
            LengthUnit::Inches => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown length unit `{0}`, expected one of m, mm, cm, um, nm, in")]
pub struct UnknownUnit(pub String);

impl FromStr for LengthUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m" => Ok(LengthUnit::Meters),
            "mm" => Ok(LengthUnit::Millimeters),
            "cm" => Ok(LengthUnit::Centimeters),
            "um" => Ok(LengthUnit::Micrometers),
            "nm" => Ok(LengthUnit::Nanometers),
            "in" | "inches" => Ok(LengthUnit::Inches),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}
