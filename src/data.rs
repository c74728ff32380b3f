use crate::array::Scalar3D;
use crate::grid::Coordinates;
use crate::DimensionMismatch;

#[derive(Debug, Default, Clone, PartialEq)]
/// A dense array together with the grid locations it is sampled on.
///
/// Both the material arrays and reconstructed sensor fields can be wrapped in
/// a `GridData`, which makes them valid input for [`regrid`](GridData::regrid).
/// The array shape always matches the coordinate lengths.
pub struct GridData<T> {
    coordinates: Coordinates,
    data: Scalar3D<T>,
}

impl<T> GridData<T> {
    /// pair `data` with its coordinates, checking that the shapes agree
    pub fn new(coordinates: Coordinates, data: Scalar3D<T>) -> Result<Self, DimensionMismatch> {
        if coordinates.shape() != data.dim() {
            return Err(DimensionMismatch::new(
                "grid data",
                format!("{:?}", coordinates.shape()),
                format!("{:?}", data.dim()),
            ));
        }

        Ok(Self::from_parts(coordinates, data))
    }

    pub(crate) fn from_parts(coordinates: Coordinates, data: Scalar3D<T>) -> Self {
        Self { coordinates, data }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn data(&self) -> &Scalar3D<T> {
        &self.data
    }

    pub fn into_parts(self) -> (Coordinates, Scalar3D<T>) {
        (self.coordinates, self.data)
    }

    /// change the values stored in this container while leaving the
    /// coordinates constant
    pub fn map<U, F>(&self, f: F) -> GridData<U>
    where
        F: FnMut(&T) -> U,
    {
        GridData {
            coordinates: self.coordinates.clone(),
            data: Scalar3D::new(self.data.map(f)),
        }
    }

    /// nearest-neighbour resample onto `target`, see [`regrid`](crate::regrid())
    pub fn regrid(&self, target: &Coordinates) -> Result<GridData<T>, DimensionMismatch>
    where
        T: Clone,
    {
        let data = crate::regrid(&self.coordinates, target, &self.data)?;
        Ok(GridData::from_parts(target.clone(), data))
    }
}
