use crate::prelude::*;
use log::warn;

/// Position of a material in a [`MaterialTable`], as referenced by edge runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{_0}")]
pub struct MaterialId(usize);

impl MaterialId {
    pub const FREE_SPACE: MaterialId = MaterialId(0);
    pub const PERFECT_CONDUCTOR: MaterialId = MaterialId(1);

    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<u8> for MaterialId {
    fn from(raw: u8) -> Self {
        Self(usize::from(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    FreeSpace,
    PerfectConductor,
    NormalElectric,
}

/// Bio-heat parameters of a `normal_electric` material
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct ThermalParameters {
    pub heat_capacity: f64,
    pub thermal_conductivity: f64,
    pub perfusion_rate: f64,
    pub metabolic_heat: f64,
}

/// One entry of the material table.
///
/// `conductivity`, `permittivity`, `density` and `tissue` are the values the
/// materializer writes into every cell covered by this material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    /// the `material_number` written in the geometry file
    pub declared_number: usize,
    /// S/m
    pub conductivity: f64,
    pub uncorrected_conductivity: Option<f64>,
    /// relative permittivity
    pub permittivity: f64,
    /// kg/m^3
    pub density: f64,
    pub water_ratio: Option<f64>,
    pub tissue: bool,
    pub thermal: Option<ThermalParameters>,
}

impl Material {
    pub fn free_space(
        name: impl Into<String>,
        declared_number: usize,
        conductivity: f64,
        permittivity: f64,
        density: f64,
        water_ratio: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::FreeSpace,
            declared_number,
            conductivity,
            uncorrected_conductivity: None,
            permittivity,
            density,
            water_ratio: Some(water_ratio),
            tissue: false,
            thermal: None,
        }
    }

    /// The perfect electric conductor. It has no meaningful conductivity or
    /// density, and a relative permittivity of zero marks PEC cells.
    pub fn perfect_conductor(name: impl Into<String>, declared_number: usize) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::PerfectConductor,
            declared_number,
            conductivity: f64::NAN,
            uncorrected_conductivity: None,
            permittivity: 0.0,
            density: f64::NAN,
            water_ratio: None,
            tissue: false,
            thermal: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("material {id} is referenced but the material table only has {len} entries")]
pub struct MaterialIndexError {
    pub id: MaterialId,
    pub len: usize,
}

/// Ordered, immutable list of the materials of one simulation.
///
/// Id 0 is always free space and id 1 the perfect conductor; every other
/// material follows in the order it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn builder(free_space: Material, perfect_conductor: Material) -> MaterialTableBuilder {
        MaterialTableBuilder {
            materials: vec![free_space, perfect_conductor],
        }
    }

    pub fn get(&self, id: MaterialId) -> Result<&Material, MaterialIndexError> {
        self.materials.get(id.index()).ok_or(MaterialIndexError {
            id,
            len: self.materials.len(),
        })
    }

    pub fn free_space(&self) -> &Material {
        &self.materials[MaterialId::FREE_SPACE.index()]
    }

    pub fn perfect_conductor(&self) -> &Material {
        &self.materials[MaterialId::PERFECT_CONDUCTOR.index()]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(n, material)| (MaterialId::new(n), material))
    }

    pub fn find(&self, name: &str) -> Option<(MaterialId, &Material)> {
        self.iter().find(|(_, material)| material.name == name)
    }
}

/// Collects materials in declaration order, then freezes them into a
/// [`MaterialTable`]
#[derive(Debug, Clone)]
pub struct MaterialTableBuilder {
    materials: Vec<Material>,
}

impl MaterialTableBuilder {
    pub fn push(&mut self, material: Material) -> &mut Self {
        self.materials.push(material);
        self
    }

    pub fn build(self) -> MaterialTable {
        for (position, material) in self.materials.iter().enumerate() {
            if material.declared_number != position {
                warn!(
                    "material `{}` declares material_number {} but is stored at position {}",
                    material.name, material.declared_number, position
                );
            }
        }

        MaterialTable {
            materials: self.materials,
        }
    }
}
