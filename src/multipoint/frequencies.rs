use crate::prelude::*;
use crate::utils::bytes_to_f32s;

/// The solver frequencies of a steady-state sensor (Hz), from `frequencies.bin`.
///
/// Sample files are numbered by their position in this list.
#[derive(Deref, Debug, Clone, PartialEq, Default)]
pub struct Frequencies(Vec<f32>);

impl Frequencies {
    /// every complete `f32` in the buffer; a partial trailing value is dropped
    pub fn decode(bytes: &[u8]) -> Self {
        Self(bytes_to_f32s(bytes))
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}
