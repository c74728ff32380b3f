use crate::prelude::*;
use ndarray::{ArrayView3, IndexLonger};

#[derive(Deref, DerefMut, Into, Clone, PartialEq, Default, Debug)]
/// Dense container for one scalar quantity sampled on a 3D rectilinear grid,
/// such as the conductivity seen by the `Ex` component or one sensor field.
///
/// The first axis holds X information, the second Y and the third Z.
///
/// ## Example
///
/// For a grid with `nx=100`, `ny=200` and `nz=300` cells the array shape is
/// `(100, 200, 300)`, and `arr[(i, j, k)]` is the value at cell `(i, j, k)`.
pub struct Scalar3D<NUM>(Array3<NUM>);

impl<NUM> Scalar3D<NUM> {
    /// Construct a `Scalar3D` from an array.
    pub fn new(arr: Array3<NUM>) -> Self {
        Self(arr)
    }

    /// An array of `shape` with every cell set to `value`
    pub fn filled(shape: (usize, usize, usize), value: NUM) -> Self
    where
        NUM: Clone,
    {
        Self(Array3::from_elem(shape, value))
    }

    /// get the array that this type wraps.
    /// usually this method is not required because `Scalar3D` implements [`DerefMut`](std::ops::DerefMut) and
    /// [`Deref`](std::ops::Deref)
    pub fn inner(self) -> Array3<NUM> {
        self.0
    }

    pub fn shape3(&self) -> (usize, usize, usize) {
        self.0.dim()
    }

    /// Iterate the values with `x` varying fastest, then `y`, then `z`.
    ///
    /// This is the column-major (Fortran / MATLAB) ordering that matrix writers
    /// expect; the default `ndarray` iteration order is row-major.
    pub fn iter_column_major(&self) -> ColumnMajorIter<'_, NUM> {
        ColumnMajorIter::new(self.0.view())
    }
}

/// Borrowing iterator returned by [`Scalar3D::iter_column_major`]
pub struct ColumnMajorIter<'a, NUM> {
    arr: ArrayView3<'a, NUM>,
    x: usize,
    y: usize,
    z: usize,
}

impl<'a, NUM> ColumnMajorIter<'a, NUM> {
    fn new(arr: ArrayView3<'a, NUM>) -> Self {
        Self {
            arr,
            x: 0,
            y: 0,
            z: 0,
        }
    }
}

impl<'a, NUM> Iterator for ColumnMajorIter<'a, NUM> {
    type Item = &'a NUM;

    fn next(&mut self) -> Option<Self::Item> {
        let (nx, ny, nz) = self.arr.dim();

        if self.z == nz || nx == 0 || ny == 0 {
            return None;
        }

        // borrow through the view so the item outlives `self`
        let value = IndexLonger::get(&self.arr, (self.x, self.y, self.z))?;

        self.x += 1;

        if self.x == nx {
            self.x = 0;
            self.y += 1;
        }

        if self.y == ny {
            self.y = 0;
            self.z += 1;
        }

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (nx, ny, nz) = self.arr.dim();

        let remaining = if self.z >= nz || nx == 0 || ny == 0 {
            0
        } else {
            self.arr.len() - (self.z * nx * ny + self.y * nx + self.x)
        };

        (remaining, Some(remaining))
    }
}
