use std::str::FromStr;

use log::debug;

use super::error::{
    DuplicateBlock, GeometryError, InvalidNumber, MissingBlock, UnexpectedToken, UnterminatedBlock,
};
use super::lexer::{tokenize, Line, Token, TokenSummary};
use super::material::{Material, MaterialKind, MaterialTable, ThermalParameters};
use super::Geometry;
use crate::grid::{Axis, AxisDeltas, Breakpoint, GridDefinition};

const FREE_SPACE: &str = "electricfreespace";
const PERFECT_CONDUCTOR: &str = "electricperfectconductor";
const NORMAL_ELECTRIC: &str = "normal_electric";
const THERMAL: &str = "TemperatureRiseMaterialParameters";
const GRID_DEFINITION: &str = "GridDefinition";
const DELTAS: [&str; 3] = ["DelX", "DelY", "DelZ"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    FreeSpace,
    PerfectConductor,
    NormalElectric,
    GridDefinition,
    Deltas(Axis),
}

impl BlockKind {
    fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            FREE_SPACE => BlockKind::FreeSpace,
            PERFECT_CONDUCTOR => BlockKind::PerfectConductor,
            NORMAL_ELECTRIC => BlockKind::NormalElectric,
            GRID_DEFINITION => BlockKind::GridDefinition,
            "DelX" => BlockKind::Deltas(Axis::X),
            "DelY" => BlockKind::Deltas(Axis::Y),
            "DelZ" => BlockKind::Deltas(Axis::Z),
            _ => return None,
        };
        Some(kind)
    }

    fn tag(self) -> &'static str {
        match self {
            BlockKind::FreeSpace => FREE_SPACE,
            BlockKind::PerfectConductor => PERFECT_CONDUCTOR,
            BlockKind::NormalElectric => NORMAL_ELECTRIC,
            BlockKind::GridDefinition => GRID_DEFINITION,
            BlockKind::Deltas(axis) => DELTAS[axis.index()],
        }
    }
}

/// Sequential access to the lines following a `begin_<tag>` line
struct BlockReader<'t, 'a> {
    lines: &'t [Line<'a>],
    position: usize,
    tag: &'static str,
    opened: usize,
}

impl<'t, 'a> BlockReader<'t, 'a> {
    fn new(lines: &'t [Line<'a>], tag: &'static str, opened: usize) -> Self {
        Self {
            lines,
            position: 0,
            tag,
            opened,
        }
    }

    /// number of lines consumed so far
    fn consumed(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<&Line<'a>> {
        self.lines.get(self.position)
    }

    fn next_line(&mut self) -> Result<Line<'a>, GeometryError> {
        let line = *self
            .lines
            .get(self.position)
            .ok_or_else(|| UnterminatedBlock::new(self.tag, self.opened))?;
        self.position += 1;
        Ok(line)
    }

    fn unexpected(&self, expected: impl Into<String>, line: &Line<'_>) -> GeometryError {
        UnexpectedToken::new(self.tag, expected, TokenSummary::new(line)).into()
    }

    /// consume a `key values` line and return `values`
    fn field(&mut self, key: &str) -> Result<(usize, &'a str), GeometryError> {
        let line = self.next_line()?;
        match line.token {
            Token::Field { key: found, values } if found == key => Ok((line.number, values)),
            _ => Err(self.unexpected(format!("field `{key}`"), &line)),
        }
    }

    fn number<T: FromStr>(&mut self, key: &str) -> Result<T, GeometryError> {
        let (line, values) = self.field(key)?;
        parse_number(key, values, line)
    }

    /// a field that may appear zero or one time at this position
    fn optional_number<T: FromStr>(&mut self, key: &str) -> Result<Option<T>, GeometryError> {
        let present = matches!(
            self.peek(),
            Some(Line {
                token: Token::Field { key: found, .. },
                ..
            }) if *found == key
        );

        if present {
            self.number(key).map(Some)
        } else {
            Ok(None)
        }
    }

    fn open(&mut self, tag: &str) -> Result<&'a str, GeometryError> {
        let line = self.next_line()?;
        match line.token {
            Token::Begin { tag: found, label } if found == tag => Ok(label),
            _ => Err(self.unexpected(format!("`begin_<{tag}>`"), &line)),
        }
    }

    fn close(&mut self, tag: &str) -> Result<(), GeometryError> {
        let line = self.next_line()?;
        match line.token {
            Token::End { tag: found } if found == tag => Ok(()),
            _ => Err(self.unexpected(format!("`end_<{tag}>`"), &line)),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str, line: usize) -> Result<T, GeometryError> {
    value
        .parse()
        .map_err(|_| InvalidNumber::new(key, value, line).into())
}

fn free_space(label: &str, reader: &mut BlockReader<'_, '_>) -> Result<Material, GeometryError> {
    let declared = reader.number("material_number")?;
    let conductivity = reader.number("conductivity")?;
    let permittivity = reader.number("permittivity")?;
    let density = reader.number("density")?;
    let water_ratio = reader.number("water_ratio")?;
    reader.close(FREE_SPACE)?;

    Ok(Material::free_space(
        label,
        declared,
        conductivity,
        permittivity,
        density,
        water_ratio,
    ))
}

fn perfect_conductor(
    label: &str,
    reader: &mut BlockReader<'_, '_>,
) -> Result<Material, GeometryError> {
    let declared = reader.number("material_number")?;
    reader.close(PERFECT_CONDUCTOR)?;

    Ok(Material::perfect_conductor(label, declared))
}

fn normal_electric(
    label: &str,
    reader: &mut BlockReader<'_, '_>,
) -> Result<Material, GeometryError> {
    let declared_number = reader.number("material_number")?;
    let conductivity = reader.number("conductivity")?;
    let uncorrected_conductivity = reader.number("uncorrected_conductivity")?;
    let permittivity = reader.number("permittivity")?;

    // effective properties are written by newer exporters only
    for key in [
        "effectiveConductivity",
        "effectiveUncorrectedConductivity",
        "effectiveRelativePermittivity",
    ] {
        reader.optional_number::<f64>(key)?;
    }

    let density = reader.number("density")?;
    let water_ratio = reader.number("water_ratio")?;

    reader.open(THERMAL)?;
    let thermal = ThermalParameters::new(
        reader.number("heat_capacity")?,
        reader.number("thermal_conductivity")?,
        reader.number("perfusion_rate")?,
        reader.number("metabolic_heat")?,
    );
    let tissue: i64 = reader.number("tissue")?;
    reader.close(THERMAL)?;
    reader.close(NORMAL_ELECTRIC)?;

    Ok(Material {
        name: label.to_string(),
        kind: MaterialKind::NormalElectric,
        declared_number,
        conductivity,
        uncorrected_conductivity: Some(uncorrected_conductivity),
        permittivity,
        density,
        water_ratio: Some(water_ratio),
        tissue: tissue != 0,
        thermal: Some(thermal),
    })
}

struct GridBlock {
    origin: [f64; 3],
    cells: [usize; 3],
}

fn grid_definition(reader: &mut BlockReader<'_, '_>) -> Result<GridBlock, GeometryError> {
    let key = "GridOriginInMeters";
    let (line, values) = reader.field(key)?;
    let parsed = values
        .split_whitespace()
        .map(|value| parse_number::<f64>(key, value, line))
        .collect::<Result<Vec<_>, _>>()?;
    let origin: [f64; 3] = parsed
        .try_into()
        .map_err(|_| InvalidNumber::new(key, values, line))?;

    let cells = [
        reader.number("NumberOfCellsInX")?,
        reader.number("NumberOfCellsInY")?,
        reader.number("NumberOfCellsInZ")?,
    ];
    reader.close(GRID_DEFINITION)?;

    Ok(GridBlock { origin, cells })
}

fn deltas(axis: Axis, reader: &mut BlockReader<'_, '_>) -> Result<AxisDeltas, GeometryError> {
    let tag = DELTAS[axis.index()];
    let mut breakpoints = Vec::new();

    loop {
        let line = reader.next_line()?;
        match line.token {
            Token::End { tag: found } if found == tag => break,
            Token::Field { key, values } => {
                let index = parse_number("cell index", key, line.number)?;
                let delta = parse_number("cell width", values, line.number)?;
                breakpoints.push(Breakpoint::new(index, delta));
            }
            _ => return Err(reader.unexpected(format!("`index delta` or `end_<{tag}>`"), &line)),
        }
    }

    Ok(AxisDeltas::new(breakpoints))
}

/// Blocks found so far while scanning a file
#[derive(Default)]
struct Sections {
    free_space: Option<Material>,
    perfect_conductor: Option<Material>,
    normal_electric: Vec<Material>,
    grid: Option<GridBlock>,
    deltas: [Option<AxisDeltas>; 3],
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    tag: &'static str,
    line: usize,
) -> Result<(), GeometryError> {
    if slot.is_some() {
        return Err(DuplicateBlock::new(tag, line).into());
    }
    *slot = Some(value);
    Ok(())
}

fn required<T>(slot: Option<T>, tag: &'static str) -> Result<T, GeometryError> {
    slot.ok_or_else(|| MissingBlock::new(tag).into())
}

impl Sections {
    fn finish(self) -> Result<Geometry, GeometryError> {
        let free_space = required(self.free_space, FREE_SPACE)?;
        let perfect_conductor = required(self.perfect_conductor, PERFECT_CONDUCTOR)?;
        let grid = required(self.grid, GRID_DEFINITION)?;
        let [dx, dy, dz] = self.deltas;
        let deltas = [
            required(dx, DELTAS[0])?,
            required(dy, DELTAS[1])?,
            required(dz, DELTAS[2])?,
        ];

        let grid = GridDefinition::new(grid.origin, grid.cells, deltas)?;

        let mut builder = MaterialTable::builder(free_space, perfect_conductor);
        for material in self.normal_electric {
            builder.push(material);
        }

        Ok(Geometry {
            grid,
            materials: builder.build(),
        })
    }
}

pub(crate) fn parse_geometry(text: &str) -> Result<Geometry, GeometryError> {
    let lines: Vec<Line<'_>> = tokenize(text).collect();
    let mut sections = Sections::default();
    let mut position = 0;

    while position < lines.len() {
        let line = lines[position];
        position += 1;

        let Token::Begin { tag, label } = line.token else {
            continue;
        };

        let Some(kind) = BlockKind::from_tag(tag) else {
            debug!("skipping block `{tag}` on line {}", line.number);
            continue;
        };

        let mut reader = BlockReader::new(&lines[position..], kind.tag(), line.number);

        match kind {
            BlockKind::FreeSpace => {
                let material = free_space(label, &mut reader)?;
                set_once(&mut sections.free_space, material, FREE_SPACE, line.number)?;
            }
            BlockKind::PerfectConductor => {
                let material = perfect_conductor(label, &mut reader)?;
                set_once(
                    &mut sections.perfect_conductor,
                    material,
                    PERFECT_CONDUCTOR,
                    line.number,
                )?;
            }
            BlockKind::NormalElectric => {
                let material = normal_electric(label, &mut reader)?;
                debug!("material `{}` declared on line {}", material.name, line.number);
                sections.normal_electric.push(material);
            }
            BlockKind::GridDefinition => {
                let grid = grid_definition(&mut reader)?;
                set_once(&mut sections.grid, grid, GRID_DEFINITION, line.number)?;
            }
            BlockKind::Deltas(axis) => {
                let axis_deltas = deltas(axis, &mut reader)?;
                set_once(
                    &mut sections.deltas[axis.index()],
                    axis_deltas,
                    kind.tag(),
                    line.number,
                )?;
            }
        }

        position += reader.consumed();
    }

    sections.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MaterialId;

    const GRID: &str = "\
begin_<GridDefinition>
GridOriginInMeters -0.1 -0.2 0.05
NumberOfCellsInX 4
NumberOfCellsInY 3
NumberOfCellsInZ 2
end_<GridDefinition>
begin_<DelX>
0 0.01
2 0.02
end_<DelX>
begin_<DelY>
0 0.01
end_<DelY>
begin_<DelZ>
0 0.005
end_<DelZ>
";

    const FREE_SPACE_BLOCK: &str = "\
begin_<electricfreespace> ElectricFreeSpace
material_number 0
conductivity 0
permittivity 1
density 0
water_ratio 0
end_<electricfreespace>
begin_<electricperfectconductor> ElectricPerfectConductor
material_number 1
end_<electricperfectconductor>
";

    fn muscle(effective: bool) -> String {
        let effective = if effective {
            "effectiveConductivity 0.75\n\
             effectiveUncorrectedConductivity 0.74\n\
             effectiveRelativePermittivity 60.1\n"
        } else {
            ""
        };

        format!(
            "begin_<normal_electric> Muscle\n\
             material_number 2\n\
             conductivity 0.72\n\
             uncorrected_conductivity 0.71\n\
             permittivity 58.2\n\
             {effective}\
             density 1090\n\
             water_ratio 0.75\n\
             begin_<TemperatureRiseMaterialParameters>\n\
             heat_capacity 3421\n\
             thermal_conductivity 0.49\n\
             perfusion_rate 37\n\
             metabolic_heat 0.96\n\
             tissue 1\n\
             end_<TemperatureRiseMaterialParameters>\n\
             end_<normal_electric>\n"
        )
    }

    #[test]
    fn parse_full_geometry() {
        let text = format!("{FREE_SPACE_BLOCK}{}{GRID}", muscle(false));
        let geometry = parse_geometry(&text).unwrap();

        assert_eq!(geometry.grid.cells(), [4, 3, 2]);
        assert_eq!(geometry.grid.origin(), [-0.1, -0.2, 0.05]);

        let x = geometry.grid.coordinates().x_locations;
        let expected = [-0.1, -0.09, -0.08, -0.06];
        for (actual, expected) in x.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-12);
        }

        assert_eq!(geometry.materials.len(), 3);
        let muscle = geometry.materials.get(MaterialId::new(2)).unwrap();
        assert_eq!(muscle.name, "Muscle");
        assert_eq!(muscle.conductivity, 0.72);
        assert_eq!(muscle.uncorrected_conductivity, Some(0.71));
        assert_eq!(muscle.density, 1090.0);
        assert!(muscle.tissue);
        assert_eq!(muscle.thermal.as_ref().unwrap().perfusion_rate, 37.0);
    }

    #[test]
    fn effective_properties_are_optional() {
        let without = parse_geometry(&format!("{FREE_SPACE_BLOCK}{}{GRID}", muscle(false))).unwrap();
        let with = parse_geometry(&format!("{FREE_SPACE_BLOCK}{}{GRID}", muscle(true))).unwrap();

        let id = MaterialId::new(2);
        assert_eq!(
            without.materials.get(id).unwrap(),
            with.materials.get(id).unwrap()
        );
    }

    #[test]
    fn unknown_blocks_are_skipped() {
        let text = format!(
            "begin_<ProjectInfo> Demo\nversion 7\nend_<ProjectInfo>\n{FREE_SPACE_BLOCK}{GRID}"
        );
        let geometry = parse_geometry(&text).unwrap();
        assert_eq!(geometry.materials.len(), 2);
    }

    #[test]
    fn missing_grid_definition() {
        let err = parse_geometry(FREE_SPACE_BLOCK).unwrap_err();
        assert!(
            matches!(&err, GeometryError::MissingBlock(block) if block.tag == GRID_DEFINITION),
            "{err}"
        );
    }

    #[test]
    fn missing_free_space() {
        let err = parse_geometry(GRID).unwrap_err();
        assert!(matches!(&err, GeometryError::MissingBlock(block) if block.tag == FREE_SPACE));
    }

    #[test]
    fn duplicate_grid_definition() {
        let text = format!("{FREE_SPACE_BLOCK}{GRID}{GRID}");
        let err = parse_geometry(&text).unwrap_err();
        assert!(matches!(err, GeometryError::DuplicateBlock(_)));
    }

    #[test]
    fn fields_out_of_order() {
        let text = muscle(false).replace("density 1090\nwater_ratio 0.75", "water_ratio 0.75\ndensity 1090");
        let err = parse_geometry(&format!("{FREE_SPACE_BLOCK}{text}{GRID}")).unwrap_err();

        match err {
            GeometryError::UnexpectedToken(token) => {
                assert_eq!(token.block, NORMAL_ELECTRIC);
                assert_eq!(token.expected, "field `density`");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn bad_number() {
        let text = GRID.replace("NumberOfCellsInY 3", "NumberOfCellsInY three");
        let err = parse_geometry(&format!("{FREE_SPACE_BLOCK}{text}")).unwrap_err();

        match err {
            GeometryError::InvalidNumber(number) => {
                assert_eq!(number.key, "NumberOfCellsInY");
                assert_eq!(number.value, "three");
                assert_eq!(number.line, 14);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn unterminated_block() {
        let text = format!("{FREE_SPACE_BLOCK}{GRID}begin_<DelZ>\n0 0.1\n");
        let err = parse_geometry(&text).unwrap_err();
        assert!(matches!(err, GeometryError::UnterminatedBlock(_)));
    }

    #[test]
    fn invalid_deltas_surface() {
        let text = GRID.replace("2 0.02", "7 0.02");
        let err = parse_geometry(&format!("{FREE_SPACE_BLOCK}{text}")).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidDeltas(_)));
    }
}
