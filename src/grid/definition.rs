use super::{Axis, Coordinates};
use derive_more::Constructor;

/// A single `index delta` line of a `DelX`/`DelY`/`DelZ` block: every cell
/// from `index` up to the next breakpoint has width `delta` (meters).
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Breakpoint {
    pub index: usize,
    pub delta: f64,
}

/// The cell spacing along one axis, as a sorted list of breakpoints
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisDeltas(Vec<Breakpoint>);

impl AxisDeltas {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Self {
        Self(breakpoints)
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.0
    }

    /// A uniform spacing starting at cell 0
    pub fn uniform(delta: f64) -> Self {
        Self(vec![Breakpoint::new(0, delta)])
    }

    fn validate(&self, axis: Axis, cells: usize) -> Result<(), InvalidDeltas> {
        let fail = |reason| Err(InvalidDeltas { axis, reason });

        if cells == 0 {
            return fail("the axis has no cells");
        }
        match self.0.first() {
            None => return fail("no breakpoints were given"),
            Some(first) if first.index != 0 => return fail("the first breakpoint must be at index 0"),
            Some(_) => {}
        }
        if self.0.windows(2).any(|pair| pair[0].index >= pair[1].index) {
            return fail("breakpoint indices must be strictly increasing");
        }
        if self.0.iter().any(|bp| bp.index >= cells) {
            return fail("a breakpoint index lies beyond the cell count");
        }
        if self.0.iter().any(|bp| !(bp.delta.is_finite() && bp.delta > 0.0)) {
            return fail("cell widths must be positive and finite");
        }

        Ok(())
    }

    /// cumulative node locations for `cells` cells starting at `origin`
    fn locations(&self, origin: f64, cells: usize) -> Vec<f64> {
        let mut locations = Vec::with_capacity(cells);
        let mut position = origin;

        for (n, breakpoint) in self.0.iter().enumerate() {
            let end = self.0.get(n + 1).map(|next| next.index).unwrap_or(cells);

            for _ in breakpoint.index..end {
                locations.push(position);
                position += breakpoint.delta;
            }
        }

        locations
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid cell widths along {axis}: {reason}")]
pub struct InvalidDeltas {
    pub axis: Axis,
    pub reason: &'static str,
}

/// The non-uniform rectilinear grid a simulation was run on.
///
/// Constructed from the `GridDefinition` and `DelX/DelY/DelZ` blocks of a
/// geometry file, and validated on construction so that
/// [`coordinates`](GridDefinition::coordinates) always yields strictly increasing
/// locations with exactly one entry per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDefinition {
    origin: [f64; 3],
    cells: [usize; 3],
    deltas: [AxisDeltas; 3],
}

impl GridDefinition {
    pub fn new(
        origin: [f64; 3],
        cells: [usize; 3],
        deltas: [AxisDeltas; 3],
    ) -> Result<Self, InvalidDeltas> {
        for axis in Axis::ALL {
            deltas[axis.index()].validate(axis, cells[axis.index()])?;
        }

        Ok(Self {
            origin,
            cells,
            deltas,
        })
    }

    /// origin of the grid in meters
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    pub fn cells(&self) -> [usize; 3] {
        self.cells
    }

    /// `(nx, ny, nz)`, the shape of every materialized array
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.cells[0], self.cells[1], self.cells[2])
    }

    pub fn deltas(&self, axis: Axis) -> &AxisDeltas {
        &self.deltas[axis.index()]
    }

    pub fn axis_locations(&self, axis: Axis) -> Vec<f64> {
        let n = axis.index();
        self.deltas[n].locations(self.origin[n], self.cells[n])
    }

    /// node locations along every axis, in meters
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(
            self.axis_locations(Axis::X),
            self.axis_locations(Axis::Y),
            self.axis_locations(Axis::Z),
        )
    }
}
