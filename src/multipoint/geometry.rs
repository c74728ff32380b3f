use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::array::Scalar3D;
use crate::grid::{Axis, Coordinates};
use crate::traits::SampleValue;
use crate::{DimensionMismatch, Error};

/// Two sensor points land on the same cell with different samples
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sensor point {point} lands on cell {cell:?} that already holds a different sample")]
pub struct DuplicatePoint {
    pub point: usize,
    pub cell: [usize; 3],
}

/// Inclusive per-axis index bounds of the cells a sensor covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDomain {
    pub min: [usize; 3],
    pub max: [usize; 3],
}

impl IndexDomain {
    pub fn range(&self, axis: Axis) -> RangeInclusive<usize> {
        self.min[axis.index()]..=self.max[axis.index()]
    }

    /// `max - min + 1` along every axis
    pub fn shape(&self) -> (usize, usize, usize) {
        let extent = |n: usize| self.max[n] - self.min[n] + 1;
        (extent(0), extent(1), extent(2))
    }

    /// Number of cells in the domain, if an array of `T` that large can exist
    pub fn checked_len<T>(&self) -> Option<usize> {
        let cells = (0..3).try_fold(1usize, |cells, n| {
            let extent = (self.max[n] - self.min[n]).checked_add(1)?;
            cells.checked_mul(extent)
        })?;
        let bytes = cells.checked_mul(std::mem::size_of::<T>().max(1))?;
        (bytes <= isize::MAX as usize).then_some(cells)
    }
}

/// The grid cells a multipoint sensor samples, read from `geom.bin`.
///
/// Point `n` of every sample file belongs to cell `points()[n]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPointGeometry {
    points: Vec<[usize; 3]>,
    domain: Option<IndexDomain>,
    /// position of every point inside the dense domain array
    offsets: Vec<[usize; 3]>,
    unique: [Vec<usize>; 3],
}

impl MultiPointGeometry {
    /// Decode `point_count` `(u32 i, u32 j, u32 k)` triples. The buffer must
    /// hold exactly that many.
    pub fn decode(bytes: &[u8], point_count: u64) -> Result<Self, DimensionMismatch> {
        let expected = usize::try_from(point_count)
            .ok()
            .and_then(|count| count.checked_mul(12));

        if expected != Some(bytes.len()) {
            return Err(DimensionMismatch::new(
                "multipoint geometry file length",
                format!("12 bytes for each of {point_count} points"),
                format!("{} bytes", bytes.len()),
            ));
        }

        let points = bytes
            .chunks_exact(12)
            .map(|chunk| {
                let index = |n: usize| {
                    let word = [chunk[n], chunk[n + 1], chunk[n + 2], chunk[n + 3]];
                    u32::from_le_bytes(word) as usize
                };
                [index(0), index(4), index(8)]
            })
            .collect();

        Ok(Self::from_points(points))
    }

    pub fn from_points(points: Vec<[usize; 3]>) -> Self {
        let unique: [Vec<usize>; 3] = [0, 1, 2].map(|n| {
            points
                .iter()
                .map(|point| point[n])
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        });

        // unique sets are sorted, so the bounds are the first and last entries
        let bounds = |values: &[usize]| Some((*values.first()?, *values.last()?));
        let domain = match (bounds(&unique[0]), bounds(&unique[1]), bounds(&unique[2])) {
            (Some((x0, x1)), Some((y0, y1)), Some((z0, z1))) => Some(IndexDomain {
                min: [x0, y0, z0],
                max: [x1, y1, z1],
            }),
            _ => None,
        };

        let offsets = match domain {
            Some(domain) => points
                .iter()
                .map(|point| {
                    [
                        point[0] - domain.min[0],
                        point[1] - domain.min[1],
                        point[2] - domain.min[2],
                    ]
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            points,
            domain,
            offsets,
            unique,
        }
    }

    pub fn points(&self) -> &[[usize; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `None` for a sensor without points
    pub fn domain(&self) -> Option<IndexDomain> {
        self.domain
    }

    /// the sorted, distinct indices used along `axis`
    pub fn unique_indices(&self, axis: Axis) -> &[usize] {
        &self.unique[axis.index()]
    }

    /// shape of the dense array built by [`scatter`](Self::scatter)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.domain.map(|domain| domain.shape()).unwrap_or((0, 0, 0))
    }

    /// The grid locations of the sensor's dense array, cut out of the
    /// coordinates of the whole simulation grid
    pub fn coordinates(&self, grid: &Coordinates) -> Result<Coordinates, DimensionMismatch> {
        let Some(domain) = self.domain else {
            return Ok(Coordinates::default());
        };

        grid.sub_range(
            domain.range(Axis::X),
            domain.range(Axis::Y),
            domain.range(Axis::Z),
        )
        .ok_or_else(|| {
            DimensionMismatch::new(
                "multipoint sensor domain",
                format!("indices within a {:?} grid", grid.shape()),
                format!("{:?}..={:?}", domain.min, domain.max),
            )
        })
    }

    /// Place one sample per point into a dense array spanning the sensor's
    /// domain. Cells without a point hold [`SampleValue::missing`].
    pub fn scatter<T: SampleValue>(&self, samples: &[T]) -> Result<Scalar3D<T>, Error> {
        if samples.len() != self.len() {
            return Err(DimensionMismatch::new(
                "multipoint samples",
                format!("{} values", self.len()),
                format!("{} values", samples.len()),
            )
            .into());
        }

        if let Some(domain) = self.domain {
            if domain.checked_len::<T>().is_none() {
                return Err(DimensionMismatch::new(
                    "multipoint sensor extent",
                    "an addressable dense array".to_string(),
                    format!("cells {:?} to {:?}", domain.min, domain.max),
                )
                .into());
            }
        }

        let mut out = Scalar3D::filled(self.shape(), T::missing());
        let mut written = Scalar3D::filled(self.shape(), false);

        for (point, (offset, sample)) in self.offsets.iter().zip(samples).enumerate() {
            let cell = (offset[0], offset[1], offset[2]);

            let (Some(slot), Some(taken)) = (out.get_mut(cell), written.get_mut(cell)) else {
                return Err(DimensionMismatch::new(
                    "multipoint sample offset",
                    format!("a cell inside {:?}", self.shape()),
                    format!("{offset:?}"),
                )
                .into());
            };

            if *taken {
                if !slot.identical(sample) {
                    return Err(DuplicatePoint {
                        point,
                        cell: self.points[point],
                    }
                    .into());
                }
            } else {
                *slot = *sample;
                *taken = true;
            }
        }

        Ok(out)
    }
}
