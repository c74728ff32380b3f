use crate::grid::YeeComponent;
use crate::utils::Truncated;

/// A binary artifact could not be decoded. Decoding is all-or-nothing: no
/// partial result is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected magic tag `!remcomfdtd`, found {found:?}")]
    BadMagic { found: Vec<u8> },
    #[error("expected little-endian marker `L`, found byte {found:#04x}")]
    BadEndianMarker { found: u8 },
    #[error("expected mesh data type 0, found {found}")]
    BadDataType { found: u16 },
    #[error("expected format indicator 0, found {found}")]
    BadFormatIndicator { found: u8 },
    #[error("unsupported format version {found}, expected 0, 1 or 2")]
    UnsupportedVersion { found: u16 },
    #[error("flattened index {flat} selects axis {selector}, expected 0, 1 or 2")]
    InvalidAxisSelector { flat: u64, selector: u64 },
    #[error("cell counts {cells:?} cannot address flattened indices")]
    InvalidCellCounts { cells: [u32; 3] },
    #[error("header declares {declared} {component} edge runs but {found} were decoded")]
    RunCountMismatch {
        component: YeeComponent,
        declared: u64,
        found: u64,
    },
    #[error("header declares more {pool} edge runs than can be counted")]
    RunCountOverflow { pool: &'static str },
    #[error("unexpected end of data: {0}")]
    Truncated(#[from] Truncated),
}
