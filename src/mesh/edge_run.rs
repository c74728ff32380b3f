use crate::geometry::MaterialId;
use crate::grid::{Axis, YeeComponent};

/// A contiguous stretch of cells along one axis that share a material.
///
/// `start` is the full `[i, j, k]` address of the first cell; its entry along
/// the run axis is the first index of the run and the two other entries select
/// the row. `stop` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRun {
    pub component: YeeComponent,
    pub start: [usize; 3],
    pub stop: usize,
    pub material: MaterialId,
}

impl EdgeRun {
    pub fn axis(&self) -> Axis {
        self.component.axis()
    }

    /// first index along the run axis
    pub fn first(&self) -> usize {
        self.start[self.axis().index()]
    }

    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.first())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// address of the cell `offset` steps into the run
    pub fn cell(&self, offset: usize) -> [usize; 3] {
        let mut cell = self.start;
        cell[self.axis().index()] += offset;
        cell
    }
}

/// All edge runs of a mesh file, grouped by component in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeRuns {
    runs: [Vec<EdgeRun>; 6],
}

impl EdgeRuns {
    pub fn component(&self, component: YeeComponent) -> &[EdgeRun] {
        &self.runs[component.index()]
    }

    pub(crate) fn push(&mut self, run: EdgeRun) {
        self.runs[run.component.index()].push(run);
    }

    pub(crate) fn reserve(&mut self, component: YeeComponent, additional: usize) {
        self.runs[component.index()].reserve(additional);
    }

    pub fn total(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeRun> {
        self.runs.iter().flatten()
    }
}

impl FromIterator<EdgeRun> for EdgeRuns {
    fn from_iter<I: IntoIterator<Item = EdgeRun>>(iter: I) -> Self {
        let mut runs = EdgeRuns::default();
        for run in iter {
            runs.push(run);
        }
        runs
    }
}
