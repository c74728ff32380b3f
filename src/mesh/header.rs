use super::FormatError;
use crate::grid::YeeComponent;
use crate::utils::ByteCursor;

pub const MAGIC: &[u8; 11] = b"!remcomfdtd";
pub const LITTLE_ENDIAN_MARKER: u8 = b'L';
pub const MESH_DATA_TYPE: u16 = 0;

/// Byte width of the six edge-run counts in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    U32,
    U64,
}

impl CountWidth {
    pub fn bytes(self) -> usize {
        match self {
            CountWidth::U32 => 4,
            CountWidth::U64 => 8,
        }
    }

    fn read(self, cursor: &mut ByteCursor<'_>) -> Result<u64, FormatError> {
        let count = match self {
            CountWidth::U32 => u64::from(cursor.read_u32()?),
            CountWidth::U64 => cursor.read_u64()?,
        };
        Ok(count)
    }
}

/// How the edge-run records following the header are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// `u32 i, u32 j, u32 k, u32 stop, u8 material`, grouped per component
    Indexed,
    /// `u64 flat, u32 stop, u8 material`, one pool for E then one for H
    Flat,
}

impl RecordLayout {
    pub fn record_bytes(self) -> usize {
        match self {
            RecordLayout::Indexed => 17,
            RecordLayout::Flat => 13,
        }
    }
}

/// Supported mesh file versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshVersion {
    V0,
    V1,
    V2,
}

impl MeshVersion {
    pub fn from_raw(version: u16) -> Result<Self, FormatError> {
        match version {
            0 => Ok(MeshVersion::V0),
            1 => Ok(MeshVersion::V1),
            2 => Ok(MeshVersion::V2),
            found => Err(FormatError::UnsupportedVersion { found }),
        }
    }

    pub fn number(self) -> u16 {
        match self {
            MeshVersion::V0 => 0,
            MeshVersion::V1 => 1,
            MeshVersion::V2 => 2,
        }
    }

    pub fn count_width(self) -> CountWidth {
        match self {
            MeshVersion::V0 => CountWidth::U32,
            MeshVersion::V1 | MeshVersion::V2 => CountWidth::U64,
        }
    }

    pub fn record_layout(self) -> RecordLayout {
        match self {
            MeshVersion::V0 | MeshVersion::V1 => RecordLayout::Indexed,
            MeshVersion::V2 => RecordLayout::Flat,
        }
    }
}

/// Fixed-layout header at the start of `mesh.input`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshHeader {
    pub version: MeshVersion,
    /// declared edge-run count per component, indexed by [`YeeComponent::index`]
    pub run_counts: [u64; 6],
    pub electric_averaged_materials: u32,
    pub magnetic_averaged_materials: u32,
    pub electric_averaged_edges: u64,
    pub magnetic_averaged_edges: u64,
    /// grid dimensions, only stored by version 2 files
    pub cells: Option<[u32; 3]>,
}

impl MeshHeader {
    pub fn run_count(&self, component: YeeComponent) -> u64 {
        self.run_counts[component.index()]
    }

    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, FormatError> {
        let magic = cursor.take(MAGIC.len())?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic {
                found: magic.to_vec(),
            });
        }

        let marker = cursor.read_u8()?;
        if marker != LITTLE_ENDIAN_MARKER {
            return Err(FormatError::BadEndianMarker { found: marker });
        }

        let data_type = cursor.read_u16()?;
        if data_type != MESH_DATA_TYPE {
            return Err(FormatError::BadDataType { found: data_type });
        }

        let version = MeshVersion::from_raw(cursor.read_u16()?)?;

        let indicator = cursor.read_u8()?;
        if indicator != 0 {
            return Err(FormatError::BadFormatIndicator { found: indicator });
        }

        let width = version.count_width();
        let mut run_counts = [0; 6];
        for count in run_counts.iter_mut() {
            *count = width.read(cursor)?;
        }

        let electric_averaged_materials = cursor.read_u32()?;
        let magnetic_averaged_materials = cursor.read_u32()?;
        let electric_averaged_edges = cursor.read_u64()?;
        let magnetic_averaged_edges = cursor.read_u64()?;

        let cells = match version.record_layout() {
            RecordLayout::Indexed => None,
            RecordLayout::Flat => Some([
                cursor.read_u32()?,
                cursor.read_u32()?,
                cursor.read_u32()?,
            ]),
        };

        Ok(Self {
            version,
            run_counts,
            electric_averaged_materials,
            magnetic_averaged_materials,
            electric_averaged_edges,
            magnetic_averaged_edges,
            cells,
        })
    }
}
