//! Property-based tests for the process document structure.
//!
//! Run with: cargo test -p splice-io -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use splice_io::{TrajectoryLibrary, write_process};
use splice_process::{ProcessConfig, build_process};
use splice_types::{Point3, RawDescriptor, Vector3};

const RAILS: [f64; 6] = [900.0, 600.0, 300.0, -300.0, -600.0, -900.0];

type Attributes = Vec<(String, String)>;

/// One parsed station: its attributes and its phases in order.
struct StationDoc {
    attributes: Attributes,
    phases: Vec<PhaseDoc>,
}

struct PhaseDoc {
    info: String,
    points: Vec<Attributes>,
}

fn attributes(element: &BytesStart<'_>) -> Attributes {
    element
        .attributes()
        .map(|a| {
            let a = a.unwrap();
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().unwrap().into_owned(),
            )
        })
        .collect()
}

fn attribute<'a>(attributes: &'a Attributes, name: &str) -> &'a str {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap()
}

fn parse_stations(xml: &str) -> Vec<StationDoc> {
    let mut reader = Reader::from_str(xml);
    let mut stations: Vec<StationDoc> = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"Station" => stations.push(StationDoc {
                attributes: attributes(&e),
                phases: Vec::new(),
            }),
            Event::Start(e) if e.name().as_ref() == b"Phase" => {
                let info = attribute(&attributes(&e), "Info").to_string();
                stations
                    .last_mut()
                    .unwrap()
                    .phases
                    .push(PhaseDoc { info, points: Vec::new() });
            }
            Event::Empty(e) if e.name().as_ref() == b"Point" => {
                let station = stations.last_mut().unwrap();
                station.phases.last_mut().unwrap().points.push(attributes(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    stations
}

/// Joint values and shared attributes, without the point id.
fn path_values(point: &Attributes) -> Attributes {
    point.iter().filter(|(key, _)| key != "id" && key != "approx").cloned().collect()
}

fn arb_hole() -> impl Strategy<Value = RawDescriptor> {
    (
        prop::sample::select(vec![-400.0, -150.0, -60.0, 0.0, 50.0, 90.0, 300.0]),
        prop::sample::select(RAILS.to_vec()),
        -40.0..40.0f64,
        prop::bool::ANY,
        prop::sample::select(vec![4.0, 4.2, 4.8]),
    )
        .prop_map(|(x, rail_y, dy, web, diameter)| {
            if web {
                RawDescriptor::new(
                    "asna",
                    Point3::new(x, rail_y - 1.5, 0.0),
                    Vector3::y(),
                    diameter,
                    10.0,
                    3.0,
                )
            } else {
                RawDescriptor::new(
                    "en6115",
                    Point3::new(x, rail_y + dy, 0.0),
                    Vector3::z(),
                    diameter,
                    8.0,
                    3.0,
                )
            }
        })
}

fn assembly(holes: Vec<RawDescriptor>) -> Vec<RawDescriptor> {
    let mut descriptors: Vec<RawDescriptor> = RAILS
        .iter()
        .map(|&y| RawDescriptor::new("marker", Point3::new(-500.0, y, 0.0), Vector3::y(), 4.8, 10.0, 0.0))
        .collect();
    descriptors.extend(holes);
    descriptors
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_station_has_approach_drills_and_clearance(holes in prop::collection::vec(arb_hole(), 0..25)) {
        let config = ProcessConfig::default();
        let build = build_process(&assembly(holes), &config).unwrap();
        let xml = write_process(&build.process, &TrajectoryLibrary::standard().unwrap(), &config).unwrap();

        let stations = parse_stations(&xml);
        prop_assert_eq!(stations.len(), 32);
        for station in &stations {
            let points: usize = attribute(&station.attributes, "Points").parse().unwrap();
            prop_assert_eq!(station.phases.len(), points + 2);
            prop_assert_eq!(station.phases[0].info.as_str(), "Approach");
            prop_assert_eq!(station.phases[points + 1].info.as_str(), "Clearance");
            for drill in &station.phases[1..=points] {
                prop_assert_eq!(drill.info.as_str(), "Drill");
                prop_assert_eq!(drill.points.len(), 1);
            }
        }
    }

    #[test]
    fn clearance_reverses_approach(holes in prop::collection::vec(arb_hole(), 0..25)) {
        let config = ProcessConfig::default();
        let build = build_process(&assembly(holes), &config).unwrap();
        let xml = write_process(&build.process, &TrajectoryLibrary::standard().unwrap(), &config).unwrap();

        for station in parse_stations(&xml) {
            let approach = &station.phases[0].points;
            let clearance = &station.phases[station.phases.len() - 1].points;
            prop_assert_eq!(approach.len(), clearance.len());

            let forward: Vec<Attributes> = approach.iter().map(path_values).collect();
            let mut backward: Vec<Attributes> = clearance.iter().map(path_values).collect();
            backward.reverse();
            prop_assert_eq!(forward, backward);

            for (i, point) in clearance.iter().enumerate() {
                prop_assert_eq!(attribute(point, "id"), (i + 1).to_string());
            }
            let n = approach.len();
            prop_assert_eq!(attribute(&approach[n - 1], "approx"), "fine");
            prop_assert_eq!(attribute(&approach[n - 2], "approx"), "fine");
            prop_assert_eq!(attribute(&approach[n - 3], "approx"), "cnt");
            prop_assert_eq!(attribute(&clearance[0], "approx"), "fine");
        }
    }
}
