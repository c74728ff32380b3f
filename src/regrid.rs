//! Nearest-neighbour resampling between rectilinear grids.
//!
//! The scheme works slice by slice: for every target `z` the closest source `z`
//! slice is picked, then each target `(x, y)` takes the value of the closest
//! node of that slice. Downstream consumers compare against results produced
//! this way, so the scheme is kept as is rather than replaced by a full 3-D
//! nearest-neighbour search.

use crate::array::Scalar3D;
use crate::grid::Coordinates;
use crate::DimensionMismatch;

use ndarray::{Array3, ArrayView2, Axis};

/// Index of the location closest to `value`, the lowest index on ties.
///
/// `None` for an empty axis.
pub fn nearest_index(locations: &[f64], value: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (n, location) in locations.iter().enumerate() {
        let distance = (location - value).abs();
        match best {
            Some((_, closest)) if distance >= closest => {}
            // NaN distances never win once a candidate exists
            Some(_) if distance.is_nan() => {}
            _ => best = Some((n, distance)),
        }
    }

    best.map(|(n, _)| n)
}

fn nearest_indices(
    source: &[f64],
    target: &[f64],
    axis: char,
) -> Result<Vec<usize>, DimensionMismatch> {
    target
        .iter()
        .map(|&value| {
            nearest_index(source, value).ok_or_else(|| {
                DimensionMismatch::new(
                    "regrid source axis",
                    format!("at least one {axis} location"),
                    "an empty axis".to_string(),
                )
            })
        })
        .collect()
}

/// Resample `data`, sampled on `source`, onto the `target` locations.
///
/// The element type is carried through untouched, so real and complex arrays
/// are handled alike. `data` must have exactly the shape of `source`; the array
/// is never reshaped to make it fit.
///
/// ## Example
///
/// ```
/// use xfgrid::{regrid, Coordinates};
/// use ndarray::Array3;
///
/// let source = Coordinates::new(vec![0.0, 1.0], vec![0.0], vec![0.0]);
/// let target = Coordinates::new(vec![0.2, 0.4, 0.9], vec![5.0], vec![-1.0]);
/// let data = Array3::from_shape_vec((2, 1, 1), vec![10, 20]).unwrap();
///
/// let out = regrid(&source, &target, &data).unwrap();
/// assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![10, 10, 20]);
/// ```
pub fn regrid<T: Clone>(
    source: &Coordinates,
    target: &Coordinates,
    data: &Array3<T>,
) -> Result<Scalar3D<T>, DimensionMismatch> {
    if data.dim() != source.shape() {
        return Err(DimensionMismatch::new(
            "regrid source array",
            format!("{:?}", source.shape()),
            format!("{:?}", data.dim()),
        ));
    }

    let x_nearest = nearest_indices(source.x(), target.x(), 'x')?;
    let y_nearest = nearest_indices(source.y(), target.y(), 'y')?;
    let z_nearest = nearest_indices(source.z(), target.z(), 'z')?;

    let shape = target.shape();
    let mut planes = Vec::with_capacity(shape.2);

    for &z in &z_nearest {
        let slice = data.index_axis(Axis(2), z);
        planes.push(regrid_plane(slice, &x_nearest, &y_nearest));
    }

    // planes are (nx, ny); lay them out along z
    let out = Array3::from_shape_fn(shape, |(i, j, k)| planes[k][(i, j)].clone());

    Ok(Scalar3D::new(out))
}

/// nearest-neighbour lookup of every target `(x, y)` on a single source slice
fn regrid_plane<T: Clone>(
    slice: ArrayView2<'_, T>,
    x_nearest: &[usize],
    y_nearest: &[usize],
) -> ndarray::Array2<T> {
    ndarray::Array2::from_shape_fn((x_nearest.len(), y_nearest.len()), |(i, j)| {
        slice[(x_nearest[i], y_nearest[j])].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use num_complex::Complex32;

    fn source() -> Coordinates {
        Coordinates::new(
            vec![0.0, 0.1, 0.15, 0.4],
            vec![-1.0, 0.0, 2.0],
            vec![0.0, 0.01, 0.02, 0.5, 0.6],
        )
    }

    #[test]
    fn identity_real() {
        let data = Array3::random(source().shape(), Uniform::new(-1.0, 1.0));
        let out = regrid(&source(), &source(), &data).unwrap();
        assert_eq!(out.inner(), data);
    }

    #[test]
    fn identity_complex() {
        let data = Array3::random(source().shape(), Uniform::new(-1.0f32, 1.0))
            .mapv(|v| Complex32::new(v, -2.0 * v));
        let out = regrid(&source(), &source(), &data).unwrap();
        assert_eq!(out.inner(), data);
    }

    #[test]
    fn shape_mismatch() {
        let data = Array3::<f64>::zeros((4, 3, 4));
        let err = regrid(&source(), &source(), &data).unwrap_err();
        assert_eq!(err.context, "regrid source array");
    }

    #[test]
    fn ties_go_to_lowest_index() {
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 0.5), Some(0));
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 1.5), Some(1));
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 7.0), Some(2));
        assert_eq!(nearest_index(&[], 7.0), None);
    }

    #[test]
    fn slices_are_chosen_per_z() {
        let source = Coordinates::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0]);
        let data = Array3::from_shape_fn((2, 2, 2), |(i, j, k)| 100 * k + 10 * j + i);
        let target = Coordinates::new(vec![0.9], vec![0.2, 0.8], vec![0.3, 0.7, 2.0]);

        let out = regrid(&source, &target, &data).unwrap();

        assert_eq!(out.dim(), (1, 2, 3));
        assert_eq!(out[(0, 0, 0)], 1);
        assert_eq!(out[(0, 1, 0)], 11);
        assert_eq!(out[(0, 0, 1)], 101);
        assert_eq!(out[(0, 1, 2)], 111);
    }

    #[test]
    fn empty_source_axis() {
        let source = Coordinates::new(vec![], vec![0.0], vec![0.0]);
        let target = Coordinates::new(vec![1.0], vec![0.0], vec![0.0]);
        let data = Array3::<f32>::zeros((0, 1, 1));

        assert!(regrid(&source, &target, &data).is_err());
    }

    #[test]
    fn empty_target() {
        let target = Coordinates::new(vec![], vec![0.0], vec![0.0]);
        let data = Array3::<f32>::zeros(source().shape());

        let out = regrid(&source(), &target, &data).unwrap();
        assert_eq!(out.dim(), (0, 1, 1));
    }
}
