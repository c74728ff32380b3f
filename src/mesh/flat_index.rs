use super::FormatError;
use crate::grid::Axis;

/// Conversion between `(axis, [i, j, k])` edge addresses and the single
/// flattened index used by version 2 mesh files:
///
/// ```text
/// flat = d·nx·ny·nz + i·ny·nz + j·nz + k
/// ```
///
/// where `d` is 0, 1 or 2 for runs along x, y or z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatIndexer {
    ny: u64,
    nz: u64,
    volume: u64,
}

impl FlatIndexer {
    /// `None` if a count is zero or the address space would overflow `u64`
    pub fn new(cells: [u32; 3]) -> Option<Self> {
        let [nx, ny, nz] = cells.map(u64::from);
        let volume = nx.checked_mul(ny)?.checked_mul(nz)?;

        // room for all three axis selectors
        volume.checked_mul(3)?;

        if volume == 0 {
            None
        } else {
            Some(Self { ny, nz, volume })
        }
    }

    pub fn flatten(&self, axis: Axis, [i, j, k]: [u64; 3]) -> u64 {
        axis.index() as u64 * self.volume + i * self.ny * self.nz + j * self.nz + k
    }

    pub fn unflatten(&self, flat: u64) -> Result<(Axis, [u64; 3]), FormatError> {
        let selector = flat / self.volume;
        let axis = Axis::from_selector(selector)
            .ok_or(FormatError::InvalidAxisSelector { flat, selector })?;

        let rest = flat - selector * self.volume;
        let plane = self.ny * self.nz;
        let i = rest / plane;
        let j = (rest - i * plane) / self.nz;
        let k = rest - i * plane - j * self.nz;

        Ok((axis, [i, j, k]))
    }
}
