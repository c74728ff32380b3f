//! Expanding edge runs into dense per-component material property arrays.

use crate::array::Scalar3D;
use crate::data::GridData;
use crate::geometry::{Material, MaterialKind, MaterialTable};
use crate::grid::{Axis, Coordinates, GridDefinition, YeeComponent};
use crate::mesh::{EdgeRun, MeshFile};
use crate::prelude::*;
use crate::{DimensionMismatch, Error};

use log::info;
use ndarray::{s, Ix1, Ix3, SliceInfo, SliceInfoElem};

/// Two runs of one component claim the same cell
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{component} cell {cell:?} is covered by more than one edge run")]
pub struct OverlappingRuns {
    pub component: YeeComponent,
    pub cell: [usize; 3],
}

/// A run leaves the grid, or is empty
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{component} edge run from {start:?} to {stop} does not fit a {shape:?} grid")]
pub struct RunOutOfBounds {
    pub component: YeeComponent,
    pub start: [usize; 3],
    pub stop: usize,
    pub shape: [usize; 3],
}

/// Material properties of one Yee component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentProperties {
    pub conductivity: Scalar3D<f64>,
    pub permittivity: Scalar3D<f64>,
    pub density: Scalar3D<f64>,
    pub tissue: Scalar3D<bool>,
}

/// Selects one of the floating point arrays of [`ComponentProperties`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Conductivity,
    Permittivity,
    Density,
}

impl ComponentProperties {
    /// Every cell holds the background values: free-space conductivity,
    /// permittivity and tissue flag, and an unset (NaN) density.
    fn background(shape: (usize, usize, usize), free_space: &Material) -> Self {
        Self {
            conductivity: Scalar3D::filled(shape, free_space.conductivity),
            permittivity: Scalar3D::filled(shape, free_space.permittivity),
            density: Scalar3D::filled(shape, f64::NAN),
            tissue: Scalar3D::filled(shape, free_space.tissue),
        }
    }

    pub fn property(&self, property: Property) -> &Scalar3D<f64> {
        match property {
            Property::Conductivity => &self.conductivity,
            Property::Permittivity => &self.permittivity,
            Property::Density => &self.density,
        }
    }

    /// A perfect conductor only zeroes permittivity. Its conductivity, density
    /// and tissue flag stay at the background values.
    fn paint(&mut self, run: &EdgeRun, material: &Material) {
        if material.kind == MaterialKind::PerfectConductor {
            self.permittivity.slice_mut(run_slice(run)).fill(0.0);
            return;
        }

        self.conductivity
            .slice_mut(run_slice(run))
            .fill(material.conductivity);
        self.permittivity
            .slice_mut(run_slice(run))
            .fill(material.permittivity);
        self.density.slice_mut(run_slice(run)).fill(material.density);
        self.tissue.slice_mut(run_slice(run)).fill(material.tissue);
    }
}

/// The dense material description of a simulation, on all six Yee components
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGrid {
    coordinates: Coordinates,
    components: Vec<ComponentProperties>,
}

impl MaterialGrid {
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.coordinates.shape()
    }

    pub fn component(&self, component: YeeComponent) -> &ComponentProperties {
        &self.components[component.index()]
    }

    pub fn conductivity(&self, component: YeeComponent) -> &Scalar3D<f64> {
        &self.component(component).conductivity
    }

    pub fn permittivity(&self, component: YeeComponent) -> &Scalar3D<f64> {
        &self.component(component).permittivity
    }

    pub fn density(&self, component: YeeComponent) -> &Scalar3D<f64> {
        &self.component(component).density
    }

    pub fn tissue(&self, component: YeeComponent) -> &Scalar3D<bool> {
        &self.component(component).tissue
    }

    /// copy one property together with the grid coordinates, ready for
    /// [`GridData::regrid`]
    pub fn grid_data(&self, component: YeeComponent, property: Property) -> GridData<f64> {
        GridData::from_parts(
            self.coordinates.clone(),
            self.component(component).property(property).clone(),
        )
    }
}

/// the cells a run covers, as a 1-D slice of a 3-D array
fn run_slice(run: &EdgeRun) -> SliceInfo<[SliceInfoElem; 3], Ix3, Ix1> {
    let [i, j, k] = run.start;
    let stop = run.stop;

    match run.axis() {
        Axis::X => s![i..stop, j, k],
        Axis::Y => s![i, j..stop, k],
        Axis::Z => s![i, j, k..stop],
    }
}

fn check_bounds(run: &EdgeRun, shape: [usize; 3]) -> Result<(), RunOutOfBounds> {
    let along = run.axis().index();

    let fixed_inside = (0..3)
        .filter(|&n| n != along)
        .all(|n| run.start[n] < shape[n]);
    let run_inside = run.first() < run.stop && run.stop <= shape[along];

    if fixed_inside && run_inside {
        Ok(())
    } else {
        Err(RunOutOfBounds {
            component: run.component,
            start: run.start,
            stop: run.stop,
            shape,
        })
    }
}

fn materialize_component(
    component: YeeComponent,
    shape: (usize, usize, usize),
    materials: &MaterialTable,
    runs: &[EdgeRun],
) -> Result<ComponentProperties, Error> {
    info!("materializing {component} from {} edge runs", runs.len());

    let mut properties = ComponentProperties::background(shape, materials.free_space());
    let mut covered = Array3::from_elem(shape, false);
    let bounds = [shape.0, shape.1, shape.2];

    for run in runs {
        check_bounds(run, bounds)?;
        let material = materials.get(run.material)?;

        let mut mask = covered.slice_mut(run_slice(run));
        if let Some(offset) = mask.iter().position(|&taken| taken) {
            return Err(OverlappingRuns {
                component,
                cell: run.cell(offset),
            }
            .into());
        }
        mask.fill(true);

        properties.paint(run, material);
    }

    Ok(properties)
}

/// Build dense property arrays for all six Yee components.
///
/// Every array has the grid's `(nx, ny, nz)` shape. Cells not covered by an
/// edge run keep the background values described in
/// [`ComponentProperties`]; covered cells take the values of the run's material.
/// A version 2 mesh records its own cell counts, which must agree with the grid.
pub fn materialize(
    grid: &GridDefinition,
    materials: &MaterialTable,
    mesh: &MeshFile,
) -> Result<MaterialGrid, Error> {
    let shape = grid.shape();

    if let Some(cells) = mesh.header.cells {
        let cells = cells.map(|n| n as usize);
        if cells != grid.cells() {
            return Err(DimensionMismatch::new(
                "mesh header cell counts",
                format!("{:?}", grid.cells()),
                format!("{cells:?}"),
            )
            .into());
        }
    }

    let components = YeeComponent::ALL
        .iter()
        .map(|&component| {
            materialize_component(component, shape, materials, mesh.runs.component(component))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MaterialGrid {
        coordinates: grid.coordinates(),
        components,
    })
}
