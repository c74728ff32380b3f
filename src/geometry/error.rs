use crate::prelude::*;

use super::lexer::TokenSummary;
use crate::grid::InvalidDeltas;

#[derive(Debug, thiserror::Error, From)]
pub enum GeometryError {
    #[error("{0}")]
    MissingBlock(MissingBlock),
    #[error("{0}")]
    DuplicateBlock(DuplicateBlock),
    #[error("{0}")]
    UnexpectedToken(UnexpectedToken),
    #[error("{0}")]
    InvalidNumber(InvalidNumber),
    #[error("{0}")]
    UnterminatedBlock(UnterminatedBlock),
    #[error("{0}")]
    InvalidDeltas(InvalidDeltas),
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "required block `begin_<{tag}>` was not found")]
pub struct MissingBlock {
    pub tag: &'static str,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "block `begin_<{tag}>` appears a second time on line {line}")]
pub struct DuplicateBlock {
    pub tag: &'static str,
    pub line: usize,
}

#[derive(Display, Debug)]
#[display(fmt = "unexpected line in `{block}` block. Expected {expected}, got {actual}")]
pub struct UnexpectedToken {
    pub block: &'static str,
    pub expected: String,
    pub actual: TokenSummary,
}

impl UnexpectedToken {
    pub(crate) fn new<T: Into<String>>(
        block: &'static str,
        expected: T,
        actual: TokenSummary,
    ) -> Self {
        Self {
            block,
            expected: expected.into(),
            actual,
        }
    }
}

#[derive(Display, Debug)]
#[display(fmt = "could not parse `{value}` as a number for `{key}` on line {line}")]
pub struct InvalidNumber {
    pub key: String,
    pub value: String,
    pub line: usize,
}

impl InvalidNumber {
    pub(crate) fn new<K: Into<String>, V: Into<String>>(key: K, value: V, line: usize) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line,
        }
    }
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "block `begin_<{tag}>` opened on line {opened} is never closed")]
pub struct UnterminatedBlock {
    pub tag: &'static str,
    pub opened: usize,
}
