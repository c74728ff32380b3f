//! Decoding the binary run-length mesh (`mesh.input`).
//!
//! The file starts with a [`MeshHeader`] naming the format version and the
//! number of edge runs per Yee component. Versions 0 and 1 store one record per
//! run with an explicit `(i, j, k)` start cell, grouped by component. Version 2
//! stores a single flattened index per run that also encodes the run axis, in
//! one pool for the electric components followed by one for the magnetic
//! components; see [`FlatIndexer`].
//!
//! The decoder only validates and groups runs. Turning them into dense arrays
//! is the job of [`materialize`](crate::materialize()).

mod edge_run;
mod error;
mod flat_index;
mod header;

pub use edge_run::{EdgeRun, EdgeRuns};
pub use error::FormatError;
pub use flat_index::FlatIndexer;
pub use header::{CountWidth, MeshHeader, MeshVersion, RecordLayout};

use crate::geometry::MaterialId;
use crate::grid::{Axis, YeeComponent};
use crate::utils::{ByteCursor, Truncated};
use crate::Error;

use log::{debug, info};
use std::path::Path;

/// A decoded mesh file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFile {
    pub header: MeshHeader,
    pub runs: EdgeRuns,
}

/// Read and decode `mesh.input` from disk
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<MeshFile, Error> {
    let path = path.as_ref();
    info!("reading mesh from {}", path.display());

    let bytes = crate::utils::read_file(path)?;

    decode_mesh(&bytes).map_err(|source| Error::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a complete mesh file held in memory
pub fn decode_mesh(bytes: &[u8]) -> Result<MeshFile, FormatError> {
    let mut cursor = ByteCursor::new(bytes);
    let header = MeshHeader::decode(&mut cursor)?;
    debug!("mesh header: {header:?}");

    let mut runs = EdgeRuns::default();

    match header.version.record_layout() {
        RecordLayout::Indexed => {
            for component in YeeComponent::ALL {
                read_indexed(&mut cursor, component, header.run_count(component), &mut runs)?;
            }
        }
        RecordLayout::Flat => {
            let cells = header.cells.unwrap_or_default();
            let indexer =
                FlatIndexer::new(cells).ok_or(FormatError::InvalidCellCounts { cells })?;

            for electric in [true, false] {
                let pool = Axis::ALL
                    .iter()
                    .try_fold(0u64, |total, &axis| {
                        total.checked_add(header.run_count(pool_component(electric, axis)))
                    })
                    .ok_or(FormatError::RunCountOverflow {
                        pool: if electric { "electric" } else { "magnetic" },
                    })?;
                read_flat_pool(&mut cursor, &indexer, electric, pool, &mut runs)?;
            }
        }
    }

    for component in YeeComponent::ALL {
        let declared = header.run_count(component);
        let found = runs.component(component).len() as u64;

        if declared != found {
            return Err(FormatError::RunCountMismatch {
                component,
                declared,
                found,
            });
        }

        info!("Edge Runs: {component}: {found}");
    }

    if cursor.remaining() != 0 {
        debug!("{} trailing bytes after the last edge run", cursor.remaining());
    }

    Ok(MeshFile { header, runs })
}

fn pool_component(electric: bool, axis: Axis) -> YeeComponent {
    if electric {
        YeeComponent::electric(axis)
    } else {
        YeeComponent::magnetic(axis)
    }
}

/// Check that `count` records of `layout` fit in the rest of the buffer
/// before allocating anything for them.
fn records_available(
    cursor: &ByteCursor<'_>,
    count: u64,
    layout: RecordLayout,
) -> Result<usize, FormatError> {
    let overflow = Truncated {
        offset: cursor.offset(),
        needed: usize::MAX,
        available: cursor.remaining(),
    };

    let count = usize::try_from(count).map_err(|_| overflow)?;
    let needed = count
        .checked_mul(layout.record_bytes())
        .ok_or(overflow)?;
    cursor.ensure(needed)?;

    Ok(count)
}

fn read_indexed(
    cursor: &mut ByteCursor<'_>,
    component: YeeComponent,
    count: u64,
    runs: &mut EdgeRuns,
) -> Result<(), FormatError> {
    let count = records_available(cursor, count, RecordLayout::Indexed)?;
    runs.reserve(component, count);

    for _ in 0..count {
        let i = cursor.read_u32()? as usize;
        let j = cursor.read_u32()? as usize;
        let k = cursor.read_u32()? as usize;
        let stop = cursor.read_u32()? as usize;
        let material = MaterialId::from(cursor.read_u8()?);

        runs.push(EdgeRun {
            component,
            start: [i, j, k],
            stop,
            material,
        });
    }

    Ok(())
}

fn read_flat_pool(
    cursor: &mut ByteCursor<'_>,
    indexer: &FlatIndexer,
    electric: bool,
    count: u64,
    runs: &mut EdgeRuns,
) -> Result<(), FormatError> {
    let count = records_available(cursor, count, RecordLayout::Flat)?;

    for _ in 0..count {
        let flat = cursor.read_u64()?;
        let stop = cursor.read_u32()? as usize;
        let material = MaterialId::from(cursor.read_u8()?);

        let (axis, [i, j, k]) = indexer.unflatten(flat)?;

        runs.push(EdgeRun {
            component: pool_component(electric, axis),
            start: [i as usize, j as usize, k as usize],
            stop,
            material,
        });
    }

    Ok(())
}
