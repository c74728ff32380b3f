//! Locating the files of one simulation run inside an XFdtd project directory:
//!
//! ```text
//! <project>/Simulations/<simulation id>/<run id>/geometry.input
//!                                               /mesh.input
//!                                               /output/
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::geometry::{read_geometry, Geometry};
use crate::materialize::{materialize, MaterialGrid};
use crate::mesh::{read_mesh, MeshFile};
use crate::multipoint::MultiPointSensor;
use crate::Error;

const SIMULATIONS_DIR: &str = "Simulations";
const GEOMETRY_FILE: &str = "geometry.input";
const MESH_FILE: &str = "mesh.input";
const OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} `{value}`")]
pub struct InvalidId {
    pub kind: &'static str,
    pub value: String,
}

/// Number of a simulation in a project, `1..=999999`, written as six digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulationId(u32);

impl SimulationId {
    pub const MAX: u32 = 999_999;

    pub fn new(id: u32) -> Result<Self, InvalidId> {
        if (1..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(InvalidId {
                kind: "simulation id",
                value: id.to_string(),
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl FromStr for SimulationId {
    type Err = InvalidId;

    /// only the six digit directory form is accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidId {
            kind: "simulation directory",
            value: s.to_string(),
        };

        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let id = s.parse().map_err(|_| invalid())?;
        Self::new(id).map_err(|_| invalid())
    }
}

/// Number of a run within a simulation, `1..=9999`, written as `Run0001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u16);

impl RunId {
    pub const MAX: u16 = 9_999;

    pub fn new(id: u16) -> Result<Self, InvalidId> {
        if (1..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(InvalidId {
                kind: "run id",
                value: id.to_string(),
            })
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Run{:04}", self.0)
    }
}

impl FromStr for RunId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidId {
            kind: "run directory",
            value: s.to_string(),
        };

        let digits = s.strip_prefix("Run").ok_or_else(invalid)?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let id = digits.parse().map_err(|_| invalid())?;
        Self::new(id).map_err(|_| invalid())
    }
}

/// File locations of one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    project_dir: PathBuf,
    simulation: SimulationId,
    run: RunId,
}

impl ProjectLayout {
    pub fn new<P: Into<PathBuf>>(project_dir: P, simulation: SimulationId, run: RunId) -> Self {
        Self {
            project_dir: project_dir.into(),
            simulation,
            run,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn simulation(&self) -> SimulationId {
        self.simulation
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn run_dir(&self) -> PathBuf {
        self.project_dir
            .join(SIMULATIONS_DIR)
            .join(self.simulation.to_string())
            .join(self.run.to_string())
    }

    pub fn geometry_input(&self) -> PathBuf {
        self.run_dir().join(GEOMETRY_FILE)
    }

    pub fn mesh_input(&self) -> PathBuf {
        self.run_dir().join(MESH_FILE)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.run_dir().join(OUTPUT_DIR)
    }

    /// open the multipoint sensor called `name` in this run's output
    pub fn multipoint_sensor(&self, name: &str) -> Result<MultiPointSensor, Error> {
        MultiPointSensor::find(self.output_dir(), name)
    }

    /// Every simulation of a project with its runs, both sorted. Directories
    /// that do not follow the naming scheme are ignored.
    pub fn discover<P: AsRef<Path>>(project_dir: P) -> Result<Vec<(SimulationId, Vec<RunId>)>, Error> {
        let simulations_dir = project_dir.as_ref().join(SIMULATIONS_DIR);

        let mut simulations = Vec::new();
        for (simulation, path) in list_dirs::<SimulationId>(&simulations_dir)? {
            let mut runs: Vec<RunId> = list_dirs(&path)?.into_iter().map(|(run, _)| run).collect();
            runs.sort();
            simulations.push((simulation, runs));
        }
        simulations.sort();

        Ok(simulations)
    }
}

/// sub-directories of `dir` whose names parse as `T`
fn list_dirs<T: FromStr>(dir: &Path) -> Result<Vec<(T, PathBuf)>, Error> {
    let io_error = |source: std::io::Error| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::MissingFile(dir.to_path_buf())
        } else {
            Error::Io {
                path: dir.to_path_buf(),
                source,
            }
        }
    };

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().map_err(io_error)?.is_dir() {
            continue;
        }
        if let Ok(id) = entry.file_name().to_string_lossy().parse() {
            found.push((id, entry.path()));
        }
    }

    Ok(found)
}

/// A fully decoded simulation run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub layout: ProjectLayout,
    pub geometry: Geometry,
    pub mesh: MeshFile,
    pub grid: MaterialGrid,
}

impl Simulation {
    /// Decode the geometry and mesh of a run and materialize them
    pub fn load(layout: &ProjectLayout) -> Result<Self, Error> {
        info!(
            "loading simulation {} {} from {}",
            layout.simulation,
            layout.run,
            layout.project_dir.display()
        );

        let geometry = read_geometry(layout.geometry_input())?;
        let mesh = read_mesh(layout.mesh_input())?;
        let grid = materialize(&geometry.grid, &geometry.materials, &mesh)?;

        Ok(Self {
            layout: layout.clone(),
            geometry,
            mesh,
            grid,
        })
    }
}
