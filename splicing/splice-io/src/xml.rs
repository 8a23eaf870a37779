//! Process document writer.
//!
//! Writes the `process` → `Step` → `Station` → `Phase` → `Point` tree read
//! by the robot cell. Every station holds an approach phase, one drill phase
//! per hole and a clearance phase that plays the approach path backward.

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use splice_process::ProcessConfig;
use splice_types::math::sign;
use splice_types::{JointPose, Phase, Process, Station, Step, Surface, TrajectoryKind};
use tracing::info;

use crate::error::{IoResult, SpliceIoError};
use crate::library::TrajectoryLibrary;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "BuildProcess.xml";

/// Number of trailing path points the robot must stop exactly on.
const FINE_TAIL: usize = 2;

/// Significant digits kept in number text.
const SIGNIFICANT_DIGITS: usize = 15;

/// Decimal exponents written in positional form.
const POSITIONAL_EXPONENTS: std::ops::RangeInclusive<i32> = -4..=14;

/// Byte order mark opening a saved document.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Formats a number the way the robot cell expects.
///
/// Values are rounded to 15 significant digits. Decimal exponents from -4
/// to 14 are written positionally in shortest form (`4` for 4.0, `823.5`);
/// others use a mantissa and a signed exponent of at least two digits
/// (`1E-06`, `1.5E+16`). Negative zero is written `0`.
///
/// ```
/// use splice_io::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(897.3 + 2.7), "900");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(-1332.25), "-1332.25");
/// assert_eq!(format_number(1e-6), "1E-06");
/// assert_eq!(format_number(1.5e16), "1.5E+16");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scientific = format!("{value:.precision$e}", precision = SIGNIFICANT_DIGITS - 1);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let rounded: f64 = scientific.parse().unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }

    let exponent: i32 = exponent.parse().unwrap_or(0);
    if POSITIONAL_EXPONENTS.contains(&exponent) {
        return rounded.to_string();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

/// Serializes a process into a document string.
///
/// # Errors
///
/// Returns [`SpliceIoError::Xml`] if the document cannot be produced.
pub fn write_process(
    process: &Process,
    library: &TrajectoryLibrary,
    config: &ProcessConfig,
) -> IoResult<String> {
    let mut writer = ProcessWriter {
        writer: Writer::new(Vec::new()),
        library,
        config,
    };
    writer.document(process)?;

    String::from_utf8(writer.writer.into_inner())
        .map_err(|e| SpliceIoError::xml(format!("invalid UTF-8 in generated XML: {e}")))
}

/// Serializes a process and writes it to a file.
///
/// The file starts with a UTF-8 byte order mark.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_process<P: AsRef<Path>>(
    path: P,
    process: &Process,
    library: &TrajectoryLibrary,
    config: &ProcessConfig,
) -> IoResult<()> {
    let path = path.as_ref();
    let document = write_process(process, library, config)?;
    fs::write(path, [UTF8_BOM, document.as_bytes()].concat())?;
    info!(
        path = %path.display(),
        steps = process.steps.len(),
        phases = process.phase_count(),
        "Saved drilling process"
    );
    Ok(())
}

struct ProcessWriter<'a, W: Write> {
    writer: Writer<W>,
    library: &'a TrajectoryLibrary,
    config: &'a ProcessConfig,
}

impl<W: Write> ProcessWriter<'_, W> {
    fn emit(&mut self, event: Event<'_>, what: &str) -> IoResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| SpliceIoError::xml(format!("failed to write {what}: {e}")))
    }

    fn close(&mut self, name: &str) -> IoResult<()> {
        self.emit(Event::End(BytesEnd::new(name)), name)
    }

    /// Writes an empty element closed with ` />`.
    fn empty(&mut self, element: &BytesStart<'_>) -> IoResult<()> {
        let content = String::from_utf8_lossy(element).into_owned();
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        self.emit(
            Event::Empty(BytesStart::from_content(format!("{content} "), name.len())),
            &name,
        )
    }

    fn document(&mut self, process: &Process) -> IoResult<()> {
        self.emit(
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
            "XML declaration",
        )?;
        self.emit(Event::Start(BytesStart::new("process")), "process")?;
        for step in &process.steps {
            self.step(step)?;
        }
        self.close("process")
    }

    fn step(&mut self, step: &Step) -> IoResult<()> {
        let mut element = BytesStart::new("Step");
        element.push_attribute(("id", step.id.to_string().as_str()));
        element.push_attribute(("Type", "position"));
        element.push_attribute(("C", step.category.as_str()));
        element.push_attribute(("Tool", format_number(step.diameter).as_str()));
        self.emit(Event::Start(element), "Step")?;

        for station in &step.stations {
            self.station(station)?;
        }
        self.close("Step")
    }

    fn station(&mut self, station: &Station) -> IoResult<()> {
        let mut element = BytesStart::new("Station");
        element.push_attribute(("id", station.id.to_string().as_str()));
        element.push_attribute(("Type", "position"));
        element.push_attribute(("Rail", station.rail.to_string().as_str()));
        element.push_attribute(("Position", station.position.as_str()));
        element.push_attribute(("Side", station.surface.side_code()));
        element.push_attribute(("Points", station.points().to_string().as_str()));
        self.emit(Event::Start(element), "Station")?;

        let path = StationPath::new(station, self.library);
        self.approach(&path)?;
        for (index, phase) in station.phases.iter().enumerate() {
            self.drill(station, index + 1, phase)?;
        }
        self.clearance(&path, station.points())?;
        self.close("Station")
    }

    fn approach(&mut self, path: &StationPath) -> IoResult<()> {
        self.path_phase("1", "Approach")?;
        for index in 0..path.poses.len() {
            self.joint_point(path, index, index + 1)?;
        }
        self.close("Phase")
    }

    fn clearance(&mut self, path: &StationPath, drilled: usize) -> IoResult<()> {
        self.path_phase(&(drilled + 2).to_string(), "Clearance")?;
        let count = path.poses.len();
        for index in (0..count).rev() {
            self.joint_point(path, index, count - index)?;
        }
        self.close("Phase")
    }

    fn path_phase(&mut self, id: &str, info: &str) -> IoResult<()> {
        let mut element = BytesStart::new("Phase");
        element.push_attribute(("id", id));
        element.push_attribute(("Type", "position"));
        element.push_attribute(("Info", info));
        element.push_attribute(("Mode", "joint"));
        self.emit(Event::Start(element), "Phase")
    }

    fn joint_point(&mut self, path: &StationPath, index: usize, id: usize) -> IoResult<()> {
        let JointPose([j1, j2, j3, j4, j5, j6]) = path.poses[index];
        let approx = if index + FINE_TAIL >= path.poses.len() {
            "fine"
        } else {
            "cnt"
        };

        let mut element = BytesStart::new("Point");
        element.push_attribute(("id", id.to_string().as_str()));
        element.push_attribute(("UF", "1"));
        element.push_attribute(("UT", path.tool_frame.to_string().as_str()));
        for (name, value) in [("X", j1), ("Y", j2), ("Z", j3), ("W", j4), ("P", j5), ("R", j6)] {
            element.push_attribute((name, format_number(value).as_str()));
        }
        element.push_attribute(("E1", format_number(path.e1).as_str()));
        element.push_attribute(("type", "joint"));
        element.push_attribute(("speed", "100"));
        element.push_attribute(("approx", approx));
        element.push_attribute(("cnt", "100"));
        self.empty(&element)
    }

    fn drill(&mut self, station: &Station, number: usize, phase: &Phase) -> IoResult<()> {
        let mut element = BytesStart::new("Phase");
        element.push_attribute(("id", (number + 1).to_string().as_str()));
        element.push_attribute(("Type", "position"));
        element.push_attribute(("Info", "Drill"));
        element.push_attribute(("FastName", phase.fastener.as_str()));
        element.push_attribute(("Mode", "crt"));
        self.emit(Event::Start(element), "Phase")?;

        let target = phase.position + *self.config.world_offset();
        let r = self.drill_rotation(station.surface, number, phase);

        let mut point = BytesStart::new("Point");
        point.push_attribute(("id", "1"));
        point.push_attribute(("UT", phase.tool_frame.to_string().as_str()));
        point.push_attribute(("UF", phase.user_frame.to_string().as_str()));
        for (name, value) in [
            ("X", target.x),
            ("Y", target.y),
            ("Z", target.z),
            ("W", phase.orientation.w),
            ("P", phase.orientation.p),
            ("R", r),
            ("E1", phase.e1),
        ] {
            point.push_attribute((name, format_number(value).as_str()));
        }
        for (name, value) in [
            ("t4", "0"),
            ("t5", "0"),
            ("t6", "0"),
            ("front", "true"),
            ("up", "true"),
            ("left", "false"),
            ("flip", "true"),
            ("type", "linear"),
            ("speed", "100"),
            ("approx", "fine"),
            ("cnt", "100"),
        ] {
            point.push_attribute((name, value));
        }
        self.empty(&point)?;
        self.close("Phase")
    }

    /// Tool roll for the `number`-th hole of a station.
    ///
    /// Flange holes turn the tool a further step per hole, toward +X on the
    /// right side and toward -X on the left.
    // Stations hold a handful of holes.
    #[allow(clippy::cast_precision_loss)]
    fn drill_rotation(&self, surface: Surface, number: usize, phase: &Phase) -> f64 {
        let base = phase.orientation.r;
        match surface {
            Surface::Web => base,
            Surface::Flange(side) => {
                let turns = (number - 1) as f64;
                base + side.sign()
                    * sign(phase.position.x)
                    * self.config.flange_rotation_step()
                    * turns
            }
        }
    }
}

/// The mounted approach path of one station.
struct StationPath {
    poses: Vec<JointPose>,
    tool_frame: u8,
    e1: f64,
}

impl StationPath {
    /// Selects and mirrors the path; frame and axis come from the first hole.
    ///
    /// An empty station falls back to its face's tool frame and `E1 = 0`.
    fn new(station: &Station, library: &TrajectoryLibrary) -> Self {
        let bank = station.rail.bank();
        let kind = TrajectoryKind::select(station.surface, station.position, bank);
        let poses = library
            .get(kind)
            .poses
            .iter()
            .map(|pose| pose.mirrored(bank.joint_sign()))
            .collect();
        let (tool_frame, e1) = station.phases.first().map_or(
            (station.surface.category().tool_frame(), 0.0),
            |phase| (phase.tool_frame, phase.e1),
        );
        Self {
            poses,
            tool_frame,
            e1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use splice_types::{Category, Orientation, Point3, Position, RailIndex, Side};

    /// Two-pose paths: home, then one pose identifying the kind.
    fn small_library() -> TrajectoryLibrary {
        let paths: Vec<String> = TrajectoryKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| format!("\"{}\": [[0, 25, -40, 0, 113, 0], [{i}, 1, 2, 3, 4, 5]]", kind.key()))
            .collect();
        TrajectoryLibrary::from_json(&format!(
            "{{\"version\": 1, \"trajectories\": {{{}}}}}",
            paths.join(", ")
        ))
        .unwrap()
    }

    fn phase(name: &str, x: f64, tool_frame: u8, r: f64, e1: f64) -> Phase {
        Phase {
            fastener: name.into(),
            tool_frame,
            user_frame: 1,
            position: Point3::new(x, 2300.0, 12.0),
            orientation: Orientation::new(90.0, -90.0, r),
            e1,
        }
    }

    fn web_process() -> Process {
        let mut station = Station::new(1, RailIndex::new(1).unwrap(), Position::Front, Surface::Web);
        station.phases.push(phase("asna_1", 150.0, 1, 0.0, 700.0));
        Process {
            steps: vec![Step {
                id: 1,
                category: Category::Web,
                diameter: 4.8,
                stations: vec![station],
            }],
        }
    }

    #[test]
    fn numbers_use_shortest_form() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(4.8), "4.8");
        assert_eq!(format_number(-90.0), "-90");
        assert_eq!(format_number(150.0 + 673.5), "823.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn numbers_outside_positional_range_use_exponent() {
        assert_eq!(format_number(900.000_000_000_000_1 - 900.0), "1.13686837721616E-13");
        assert_eq!(format_number(1e-6), "1E-06");
        assert_eq!(format_number(-0.000_012_5), "-1.25E-05");
        assert_eq!(format_number(1.5e16), "1.5E+16");
        assert_eq!(format_number(1e15), "1E+15");
        assert_eq!(format_number(1e100), "1E+100");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(999_999_999_999_999.0), "999999999999999");
    }

    #[test]
    fn web_station_document() {
        let xml = write_process(&web_process(), &small_library(), &ProcessConfig::default()).unwrap();
        let expected = concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<process>"#,
            r#"<Step id="1" Type="position" C="Web" Tool="4.8">"#,
            r#"<Station id="1" Type="position" Rail="1" Position="Front" Side="" Points="1">"#,
            r#"<Phase id="1" Type="position" Info="Approach" Mode="joint">"#,
            r#"<Point id="1" UF="1" UT="1" X="0" Y="25" Z="-40" W="0" P="113" R="0" E1="700" type="joint" speed="100" approx="fine" cnt="100" />"#,
            r#"<Point id="2" UF="1" UT="1" X="0" Y="1" Z="2" W="3" P="4" R="5" E1="700" type="joint" speed="100" approx="fine" cnt="100" />"#,
            r#"</Phase>"#,
            r#"<Phase id="2" Type="position" Info="Drill" FastName="asna_1" Mode="crt">"#,
            r#"<Point id="1" UT="1" UF="1" X="823.5" Y="968" Z="505.9" W="90" P="-90" R="0" E1="700" t4="0" t5="0" t6="0" front="true" up="true" left="false" flip="true" type="linear" speed="100" approx="fine" cnt="100" />"#,
            r#"</Phase>"#,
            r#"<Phase id="3" Type="position" Info="Clearance" Mode="joint">"#,
            r#"<Point id="1" UF="1" UT="1" X="0" Y="1" Z="2" W="3" P="4" R="5" E1="700" type="joint" speed="100" approx="fine" cnt="100" />"#,
            r#"<Point id="2" UF="1" UT="1" X="0" Y="25" Z="-40" W="0" P="113" R="0" E1="700" type="joint" speed="100" approx="fine" cnt="100" />"#,
            r#"</Phase>"#,
            r#"</Station>"#,
            r#"</Step>"#,
            r#"</process>"#,
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn low_bank_mirrors_path_and_flange_selection() {
        let mut station = Station::new(
            1,
            RailIndex::new(5).unwrap(),
            Position::Back,
            Surface::Flange(Side::Right),
        );
        station.phases.push(phase("en6115_1", 80.0, 2, -90.0, 1246.0));
        let process = Process {
            steps: vec![Step {
                id: 3,
                category: Category::Flange,
                diameter: 4.8,
                stations: vec![station],
            }],
        };

        let xml = write_process(&process, &small_library(), &ProcessConfig::default()).unwrap();
        // Right side on the low bank is exterior; back exterior is index 3.
        assert!(xml.contains(r#"<Point id="2" UF="1" UT="2" X="-3" Y="1" Z="2" W="-3" P="4" R="-5" E1="1246""#));
        assert!(xml.contains(r#"Side="R""#));
    }

    #[test]
    fn flange_holes_turn_progressively() {
        let mut right = Station::new(
            1,
            RailIndex::new(2).unwrap(),
            Position::Back,
            Surface::Flange(Side::Right),
        );
        for (i, x) in [-300.0, -200.0, -100.0].into_iter().enumerate() {
            right.phases.push(phase(&format!("r{i}"), x, 2, -90.0, 0.0));
        }
        let mut left = Station::new(
            2,
            RailIndex::new(2).unwrap(),
            Position::Front,
            Surface::Flange(Side::Left),
        );
        for (i, x) in [300.0, 200.0].into_iter().enumerate() {
            left.phases.push(phase(&format!("l{i}"), x, 2, 90.0, 0.0));
        }
        let process = Process {
            steps: vec![Step {
                id: 3,
                category: Category::Flange,
                diameter: 4.8,
                stations: vec![right, left],
            }],
        };

        let xml = write_process(&process, &small_library(), &ProcessConfig::default()).unwrap();
        let rolls: Vec<&str> = xml
            .split(r#"t4="0""#)
            .filter_map(|chunk| chunk.rsplit(" R=\"").next())
            .filter_map(|tail| tail.split('"').next())
            .take(5)
            .collect();
        // Right, X < 0: -90, -100, -110. Left, X > 0: 90, 80.
        assert_eq!(rolls, ["-90", "-100", "-110", "90", "80"]);
    }

    #[test]
    fn empty_station_keeps_paths() {
        let station = Station::new(
            4,
            RailIndex::new(6).unwrap(),
            Position::Back,
            Surface::Flange(Side::Left),
        );
        let process = Process {
            steps: vec![Step {
                id: 3,
                category: Category::Flange,
                diameter: 4.8,
                stations: vec![station],
            }],
        };

        let xml = write_process(&process, &small_library(), &ProcessConfig::default()).unwrap();
        assert!(xml.contains(r#"Points="0""#));
        assert!(xml.contains(r#"<Phase id="2" Type="position" Info="Clearance" Mode="joint">"#));
        assert!(xml.contains(r#"UT="2""#));
        assert!(xml.contains(r#"E1="0""#));
        assert!(!xml.contains("Drill"));
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_names_the_element() {
        let library = small_library();
        let config = ProcessConfig::default();
        let mut writer = ProcessWriter {
            writer: Writer::new(ClosedSink),
            library: &library,
            config: &config,
        };

        let err = writer.empty(&BytesStart::new("Marker")).unwrap_err();
        assert!(matches!(err, SpliceIoError::Xml { .. }));
        assert!(err.to_string().contains("failed to write Marker"));
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        save_process(&path, &web_process(), &small_library(), &ProcessConfig::default()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        let content = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.ends_with("</process>"));
    }
}
