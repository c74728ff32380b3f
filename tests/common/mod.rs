//! Writers for small synthetic XFdtd projects used by the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use xfgrid::{ProjectLayout, RunId, SimulationId, YeeComponent};

pub const CELLS: [u32; 3] = [6, 5, 4];
pub const DELTA: f64 = 0.002;
pub const ORIGIN: [f64; 3] = [-0.006, -0.005, -0.004];

/// one edge run, as written by the solver
#[derive(Debug, Clone, Copy)]
pub struct Run {
    pub component: YeeComponent,
    pub start: [u32; 3],
    pub stop: u32,
    pub material: u8,
}

pub fn run(component: YeeComponent, start: [u32; 3], stop: u32, material: u8) -> Run {
    Run {
        component,
        start,
        stop,
        material,
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Free space, PEC, `Muscle` (id 2) and `Fat` (id 3, with effective
/// property lines), on a grid whose x spacing changes halfway.
pub fn geometry_text(cells: [u32; 3]) -> String {
    let [nx, ny, nz] = cells;
    let [ox, oy, oz] = ORIGIN;
    let half = nx / 2;

    format!(
        "begin_<ProjectSettings> Synthetic\n\
         units mm\n\
         end_<ProjectSettings>\n\
         begin_<electricfreespace> ElectricFreeSpace\n\
         material_number 0\n\
         conductivity 0\n\
         permittivity 1\n\
         density 0\n\
         water_ratio 0\n\
         end_<electricfreespace>\n\
         begin_<electricperfectconductor> ElectricPerfectConductor\n\
         material_number 1\n\
         end_<electricperfectconductor>\n\
         begin_<normal_electric> Muscle\n\
         material_number 2\n\
         conductivity 0.72\n\
         uncorrected_conductivity 0.72\n\
         permittivity 58.2\n\
         density 1090\n\
         water_ratio 0.75\n\
         begin_<TemperatureRiseMaterialParameters>\n\
         heat_capacity 3421\n\
         thermal_conductivity 0.49\n\
         perfusion_rate 37\n\
         metabolic_heat 0.96\n\
         tissue 1\n\
         end_<TemperatureRiseMaterialParameters>\n\
         end_<normal_electric>\n\
         begin_<normal_electric> Fat\n\
         material_number 3\n\
         conductivity 0.04\n\
         uncorrected_conductivity 0.04\n\
         permittivity 11.6\n\
         effectiveConductivity 0.05\n\
         effectiveUncorrectedConductivity 0.05\n\
         effectiveRelativePermittivity 11.7\n\
         density 911\n\
         water_ratio 0.2\n\
         begin_<TemperatureRiseMaterialParameters>\n\
         heat_capacity 2348\n\
         thermal_conductivity 0.21\n\
         perfusion_rate 33\n\
         metabolic_heat 0.51\n\
         tissue 1\n\
         end_<TemperatureRiseMaterialParameters>\n\
         end_<normal_electric>\n\
         begin_<GridDefinition>\n\
         GridOriginInMeters {ox} {oy} {oz}\n\
         NumberOfCellsInX {nx}\n\
         NumberOfCellsInY {ny}\n\
         NumberOfCellsInZ {nz}\n\
         end_<GridDefinition>\n\
         begin_<DelX>\n\
         0 {DELTA}\n\
         {half} {double}\n\
         end_<DelX>\n\
         begin_<DelY>\n\
         0 {DELTA}\n\
         end_<DelY>\n\
         begin_<DelZ>\n\
         0 {DELTA}\n\
         end_<DelZ>\n",
        double = 2.0 * DELTA,
    )
}

fn flat_index(cells: [u32; 3], run: &Run) -> u64 {
    let [nx, ny, nz] = cells.map(u64::from);
    let [i, j, k] = run.start.map(u64::from);
    let axis = match run.component {
        YeeComponent::Ex | YeeComponent::Hx => 0,
        YeeComponent::Ey | YeeComponent::Hy => 1,
        YeeComponent::Ez | YeeComponent::Hz => 2,
    };
    axis * nx * ny * nz + i * ny * nz + j * nz + k
}

/// encode `runs` as a mesh file of the given version
pub fn mesh_bytes(version: u16, cells: [u32; 3], runs: &[Run]) -> Vec<u8> {
    let mut bytes = b"!remcomfdtd".to_vec();
    bytes.push(b'L');
    bytes.extend(0u16.to_le_bytes());
    bytes.extend(version.to_le_bytes());
    bytes.push(0);

    for component in YeeComponent::ALL {
        let count = runs.iter().filter(|run| run.component == component).count() as u64;
        if version == 0 {
            bytes.extend((count as u32).to_le_bytes());
        } else {
            bytes.extend(count.to_le_bytes());
        }
    }
    bytes.extend(0u32.to_le_bytes());
    bytes.extend(0u32.to_le_bytes());
    bytes.extend(0u64.to_le_bytes());
    bytes.extend(0u64.to_le_bytes());

    if version == 2 {
        for n in cells {
            bytes.extend(n.to_le_bytes());
        }
        for electric in [true, false] {
            for run in runs.iter().filter(|run| run.component.is_electric() == electric) {
                bytes.extend(flat_index(cells, run).to_le_bytes());
                bytes.extend(run.stop.to_le_bytes());
                bytes.push(run.material);
            }
        }
    } else {
        for component in YeeComponent::ALL {
            for run in runs.iter().filter(|run| run.component == component) {
                for n in run.start {
                    bytes.extend(n.to_le_bytes());
                }
                bytes.extend(run.stop.to_le_bytes());
                bytes.push(run.material);
            }
        }
    }

    bytes
}

/// The edge runs of the synthetic project
pub fn sample_runs() -> Vec<Run> {
    vec![
        run(YeeComponent::Ex, [1, 2, 1], 5, 2),
        run(YeeComponent::Ex, [0, 0, 0], 2, 3),
        run(YeeComponent::Ey, [2, 0, 3], 5, 1),
        run(YeeComponent::Ez, [5, 4, 0], 4, 2),
        run(YeeComponent::Hx, [0, 1, 1], 6, 3),
        run(YeeComponent::Hz, [3, 3, 1], 3, 2),
    ]
}

/// Write `Simulations/000001/Run0001` with geometry and mesh inside `project`
pub fn write_project(project: &Path, mesh_version: u16, runs: &[Run]) -> ProjectLayout {
    let layout = ProjectLayout::new(
        project,
        SimulationId::new(1).unwrap(),
        RunId::new(1).unwrap(),
    );

    std::fs::create_dir_all(layout.output_dir()).unwrap();
    std::fs::write(layout.geometry_input(), geometry_text(CELLS)).unwrap();
    std::fs::write(layout.mesh_input(), mesh_bytes(mesh_version, CELLS, runs)).unwrap();

    layout
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A multipoint sensor to be written into a run's output directory
pub struct SensorFiles<'a> {
    /// file stem, e.g. `MultiPoint_Solid_Sensor1_0`
    pub stem: &'a str,
    pub version: u8,
    pub mask: u32,
    pub points: Vec<[u32; 3]>,
    pub frequencies: Vec<f32>,
    /// field directory name and samples for frequency 0
    pub fields: Vec<(&'a str, Vec<f32>)>,
}

impl SensorFiles<'_> {
    pub fn write(&self, output_dir: &Path) -> PathBuf {
        let mut info = b"Rmpt".to_vec();
        info.push(self.version);
        info.extend(self.mask.to_le_bytes());
        if self.version == 0 {
            info.extend((self.points.len() as u32).to_le_bytes());
        } else {
            info.extend((self.points.len() as u64).to_le_bytes());
        }

        let info_path = output_dir.join(format!("{}_info.bin", self.stem));
        std::fs::write(&info_path, info).unwrap();

        let directory = output_dir.join(self.stem);
        std::fs::create_dir_all(&directory).unwrap();

        let geometry: Vec<u8> = self
            .points
            .iter()
            .flat_map(|point| point.iter().flat_map(|n| n.to_le_bytes()))
            .collect();
        std::fs::write(directory.join("geom.bin"), geometry).unwrap();
        std::fs::write(directory.join("frequencies.bin"), f32_bytes(&self.frequencies)).unwrap();

        for (name, samples) in &self.fields {
            let field_dir = directory.join(name);
            std::fs::create_dir_all(&field_dir).unwrap();
            std::fs::write(field_dir.join("0.bin"), f32_bytes(samples)).unwrap();
        }

        info_path
    }
}
