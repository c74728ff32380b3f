use bitflags::bitflags;

use crate::grid::Axis;
use crate::mesh::FormatError;
use crate::utils::ByteCursor;

bitflags! {
    /// Which outputs a multipoint sensor recorded, as stored in its info file
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMask: u32 {
        const TRANSIENT_SCATTERED_E = 1 << 31;
        const TRANSIENT_TOTAL_E = 1 << 30;
        const TRANSIENT_SCATTERED_H = 1 << 29;
        const TRANSIENT_TOTAL_H = 1 << 28;
        const TRANSIENT_SCATTERED_B = 1 << 27;
        const TRANSIENT_TOTAL_B = 1 << 26;
        const TRANSIENT_J = 1 << 25;
        const STEADY_STATE_TOTAL_E = 1 << 24;
        const STEADY_STATE_TOTAL_H = 1 << 23;
        const STEADY_STATE_J = 1 << 22;
        const STEADY_STATE_TOTAL_B = 1 << 21;
        const STEADY_STATE_DISSIPATED_POWER = 1 << 20;
    }
}

impl FieldMask {
    /// Names of the data directories the solver writes for these flags, in
    /// the order it writes them.
    pub fn directory_names(&self) -> Vec<String> {
        let mut names = Vec::new();

        let transient = [
            (FieldMask::TRANSIENT_SCATTERED_E, "E", "s"),
            (FieldMask::TRANSIENT_TOTAL_E, "E", "t"),
            (FieldMask::TRANSIENT_SCATTERED_H, "H", "s"),
            (FieldMask::TRANSIENT_TOTAL_H, "H", "t"),
            (FieldMask::TRANSIENT_SCATTERED_B, "B", "s"),
            (FieldMask::TRANSIENT_TOTAL_B, "B", "t"),
            (FieldMask::TRANSIENT_J, "J", ""),
        ];
        for (flag, quantity, suffix) in transient {
            if self.contains(flag) {
                for axis in Axis::ALL {
                    names.push(format!("tr_{quantity}{axis}{suffix}"));
                }
            }
        }

        let steady_state = [
            (FieldMask::STEADY_STATE_TOTAL_E, "E", "t"),
            (FieldMask::STEADY_STATE_TOTAL_H, "H", "t"),
            (FieldMask::STEADY_STATE_J, "J", ""),
            (FieldMask::STEADY_STATE_TOTAL_B, "B", "t"),
        ];
        for (flag, quantity, suffix) in steady_state {
            if self.contains(flag) {
                for axis in Axis::ALL {
                    names.push(format!("ss_{quantity}{axis}i{suffix}"));
                    names.push(format!("ss_{quantity}{axis}r{suffix}"));
                }
            }
        }

        if self.contains(FieldMask::STEADY_STATE_DISSIPATED_POWER) {
            for quantity in ["E", "H"] {
                for axis in Axis::ALL {
                    names.push(format!("ss_Pdd{quantity}{axis}"));
                }
            }
        }

        names
    }
}

/// Contents of a `MultiPoint_<name>_info.bin` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPointInfo {
    pub tag: String,
    pub version: u8,
    pub fields: FieldMask,
    pub point_count: u64,
}

impl MultiPointInfo {
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut cursor = ByteCursor::new(bytes);

        let tag = String::from_utf8_lossy(cursor.take(4)?).into_owned();
        let version = cursor.read_u8()?;
        let fields = FieldMask::from_bits_retain(cursor.read_u32()?);
        let point_count = match version {
            0 => u64::from(cursor.read_u32()?),
            _ => cursor.read_u64()?,
        };

        Ok(Self {
            tag,
            version,
            fields,
            point_count,
        })
    }
}
