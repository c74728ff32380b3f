//! Reading `geometry.input`: the grid definition, the cell widths along every
//! axis and the material table of a simulation.
//!
//! The file is a sequence of `begin_<tag> label` / `end_<tag>` blocks holding
//! `key value` lines. Every line is first classified into a token, then a
//! dedicated grammar per block kind consumes the tokens in a fixed order.
//! Blocks this crate has no use for are skipped.

mod error;
mod grammar;
mod lexer;
mod material;

pub use error::{
    DuplicateBlock, GeometryError, InvalidNumber, MissingBlock, UnexpectedToken, UnterminatedBlock,
};
pub use lexer::TokenSummary;
pub use material::{
    Material, MaterialId, MaterialIndexError, MaterialKind, MaterialTable, MaterialTableBuilder,
    ThermalParameters,
};

use crate::grid::GridDefinition;
use crate::Error;
use std::path::Path;

/// Everything decoded from one geometry file
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub grid: GridDefinition,
    pub materials: MaterialTable,
}

/// Decode the text of a geometry file
pub fn parse_geometry(text: &str) -> Result<Geometry, GeometryError> {
    grammar::parse_geometry(text)
}

/// Read and decode a geometry file from disk.
///
/// A missing file is reported as [`Error::MissingFile`]; content errors carry
/// the offending path.
pub fn read_geometry<P: AsRef<Path>>(path: P) -> Result<Geometry, Error> {
    let path = path.as_ref();
    log::info!("reading geometry from {}", path.display());

    let bytes = crate::utils::read_file(path)?;
    let text = String::from_utf8_lossy(&bytes);

    parse_geometry(&text).map_err(|source| Error::Geometry {
        path: path.to_path_buf(),
        source,
    })
}
