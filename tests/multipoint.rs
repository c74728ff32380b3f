mod common;

use common::{init_logging, sample_runs, write_project, SensorFiles};
use xfgrid::multipoint::FieldMask;
use xfgrid::num_complex::Complex32;
use xfgrid::{Axis, Error, FieldQuantity, FieldRequest, SensorField, Simulation, YeeComponent};

const MASK: u32 = 0x01f0_0000;

fn sensor(stem: &str) -> SensorFiles<'_> {
    SensorFiles {
        stem,
        version: 2,
        mask: MASK,
        points: vec![[2, 1, 1], [3, 1, 1], [2, 2, 1], [3, 2, 2]],
        frequencies: vec![64.0e6, 128.0e6],
        fields: vec![
            ("ss_Exrt", vec![1.0, 2.0, 3.0, 4.0]),
            ("ss_Exit", vec![10.0, 20.0, 30.0, 40.0]),
            ("ss_PddEx", vec![0.5, 0.6, 0.7, 0.8]),
        ],
    }
}

#[test]
fn find_by_name() {
    init_logging();
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());

    sensor("MultiPoint_Solid_Sensor1_1").write(&layout.output_dir());
    sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let found = layout.multipoint_sensor("Solid_Sensor1").unwrap();
    assert_eq!(
        found.directory(),
        layout.output_dir().join("MultiPoint_Solid_Sensor1_0")
    );
    assert_eq!(found.info().tag, "Rmpt");
    assert_eq!(found.info().point_count, 4);
    assert!(found.info().fields.contains(FieldMask::STEADY_STATE_TOTAL_B));

    let recorded = found.recorded_fields();
    for name in ["ss_Exrt", "ss_Exit", "ss_Bzrt", "ss_Jyi", "ss_PddHz"] {
        assert!(recorded.iter().any(|field| field == name), "{name}");
    }

    assert_eq!(found.frequencies().unwrap().into_inner(), vec![64.0e6, 128.0e6]);
}

#[test]
fn unknown_sensor_name() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());
    sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let err = layout.multipoint_sensor("Coil").unwrap_err();
    assert!(matches!(err, Error::MissingFile(_)), "{err}");
}

#[test]
fn complex_steady_state_field() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());
    let info = sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let sensor = xfgrid::MultiPointSensor::open(info).unwrap();
    let field = sensor
        .read(FieldRequest::steady_state(FieldQuantity::E, Axis::X), 0)
        .unwrap();

    let SensorField::Complex(field) = field else {
        panic!("steady-state fields are complex");
    };
    assert_eq!(field.dim(), (2, 2, 2));
    assert_eq!(field[(0, 0, 0)], Complex32::new(1.0, 10.0));
    assert_eq!(field[(1, 0, 0)], Complex32::new(2.0, 20.0));
    assert_eq!(field[(0, 1, 0)], Complex32::new(3.0, 30.0));
    assert_eq!(field[(1, 1, 1)], Complex32::new(4.0, 40.0));
    assert!(field[(0, 0, 1)].re.is_nan());
    assert!(field[(0, 0, 1)].im.is_nan());
}

#[test]
fn dissipated_power_is_real() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());
    sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let sensor = layout.multipoint_sensor("Solid_Sensor1").unwrap();
    let field = sensor
        .read(FieldRequest::DissipatedPower(YeeComponent::Ex), 0)
        .unwrap();

    match field {
        SensorField::Real(power) => {
            assert_eq!(power[(1, 1, 1)], 0.8);
            assert_eq!(power.iter().filter(|v| v.is_nan()).count(), 4);
        }
        SensorField::Complex(_) => panic!("dissipated power is real"),
    }
}

#[test]
fn missing_frequency_file() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());
    sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let sensor = layout.multipoint_sensor("Solid_Sensor1").unwrap();
    let err = sensor
        .read(FieldRequest::steady_state(FieldQuantity::E, Axis::X), 1)
        .unwrap_err();
    match err {
        Error::MissingFile(path) => assert!(path.ends_with("ss_Exrt/1.bin"), "{path:?}"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn sensor_field_on_simulation_grid() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 2, &sample_runs());
    sensor("MultiPoint_Solid_Sensor1_0").write(&layout.output_dir());

    let simulation = Simulation::load(&layout).unwrap();
    let sensor = layout.multipoint_sensor("Solid_Sensor1").unwrap();

    let data = sensor
        .grid_data(
            FieldRequest::steady_state(FieldQuantity::E, Axis::X),
            0,
            simulation.grid.coordinates(),
        )
        .unwrap();

    let coordinates = data.coordinates();
    assert_eq!(coordinates.shape(), (2, 2, 2));
    assert!((coordinates.x()[0] - -0.002).abs() < 1e-12);
    assert!((coordinates.x()[1] - 0.0).abs() < 1e-12);
    assert!((coordinates.y()[0] - -0.003).abs() < 1e-12);
    assert!((coordinates.z()[1] - 0.0).abs() < 1e-12);

    let resampled = data.regrid(coordinates).unwrap();
    assert_eq!(resampled.data()[(1, 1, 1)], Complex32::new(4.0, 40.0));
    assert_eq!(
        resampled.data().iter().filter(|v| v.re.is_nan()).count(),
        data.data().iter().filter(|v| v.re.is_nan()).count()
    );

    let power = sensor
        .grid_data(
            FieldRequest::DissipatedPower(YeeComponent::Ex),
            0,
            simulation.grid.coordinates(),
        )
        .unwrap();
    assert_eq!(power.data()[(0, 1, 0)], Complex32::new(0.7, 0.0));
}

#[test]
fn repeated_points() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());

    let mut files = sensor("MultiPoint_Twice_0");
    files.points = vec![[0, 0, 0], [1, 0, 0], [0, 0, 0]];
    files.fields = vec![
        ("ss_PddEx", vec![1.0, 2.0, 1.0]),
        ("ss_PddEy", vec![1.0, 2.0, 3.0]),
    ];
    files.write(&layout.output_dir());

    let sensor = layout.multipoint_sensor("Twice").unwrap();
    let agreeing = sensor
        .read(FieldRequest::DissipatedPower(YeeComponent::Ex), 0)
        .unwrap();
    assert_eq!(agreeing.shape(), (2, 1, 1));

    let err = sensor
        .read(FieldRequest::DissipatedPower(YeeComponent::Ey), 0)
        .unwrap_err();
    match err {
        Error::DuplicatePoint(duplicate) => {
            assert_eq!(duplicate.point, 2);
            assert_eq!(duplicate.cell, [0, 0, 0]);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn sample_file_of_wrong_length() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());

    let mut files = sensor("MultiPoint_Short_0");
    files.fields = vec![("ss_PddEz", vec![1.0, 2.0, 3.0])];
    files.write(&layout.output_dir());

    let sensor = layout.multipoint_sensor("Short").unwrap();
    let err = sensor
        .read(FieldRequest::DissipatedPower(YeeComponent::Ez), 0)
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch(_)), "{err}");
}

#[test]
fn geometry_file_of_wrong_length() {
    let project = tempfile::tempdir().unwrap();
    let layout = write_project(project.path(), 1, &sample_runs());
    let info = sensor("MultiPoint_Broken_0").write(&layout.output_dir());

    let geometry = layout.output_dir().join("MultiPoint_Broken_0").join("geom.bin");
    let bytes = std::fs::read(&geometry).unwrap();
    std::fs::write(&geometry, &bytes[..bytes.len() - 12]).unwrap();

    let err = xfgrid::MultiPointSensor::open(info).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch(_)), "{err}");
}
