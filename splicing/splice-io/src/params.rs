//! Parsing of the ten positional fastener parameters.
//!
//! | slot | meaning      | text form     |
//! |------|--------------|---------------|
//! | 0..3 | X, Y, Z      | `12.5mm`      |
//! | 3..6 | direction    | plain number  |
//! | 6    | unused       | ignored       |
//! | 7    | diameter     | `4.8mm`       |
//! | 8    | length       | `10mm`        |
//! | 9    | depth        | `5.8mm`       |

use nalgebra::{Point3, Vector3};
use splice_types::RawDescriptor;

use crate::error::{IoResult, SpliceIoError};

/// Number of positional parameters per fastener.
pub const PARAMETER_COUNT: usize = 10;

/// Unit suffix carried by length parameters.
const LENGTH_UNIT: &str = "mm";

/// Slot that is always read as zero.
const UNUSED_SLOT: usize = 6;

/// Parses the positional parameters of one fastener.
///
/// # Errors
///
/// Returns [`SpliceIoError::InvalidParameter`] naming the first slot whose
/// text is not a number, or whose length value lacks its `mm` unit.
///
/// # Example
///
/// ```
/// use splice_io::parse_parameters;
///
/// let d = parse_parameters(
///     "asna_1",
///     ["150mm", "897.3mm", "12mm", "0", "1", "0", "", "4.8mm", "10mm", "5.8mm"],
/// )
/// .unwrap();
/// assert_eq!(d.position.y, 897.3);
/// assert_eq!(d.direction.y, 1.0);
/// assert_eq!(d.depth, 5.8);
/// ```
pub fn parse_parameters(name: &str, values: [&str; PARAMETER_COUNT]) -> IoResult<RawDescriptor> {
    let mut parsed = [0.0; PARAMETER_COUNT];
    for (slot, text) in values.iter().enumerate() {
        parsed[slot] = match slot {
            UNUSED_SLOT => 0.0,
            3..=5 => parse_number(name, slot, text, text)?,
            _ => parse_number(name, slot, text, strip_unit(name, slot, text)?)?,
        };
    }

    let [x, y, z, dx, dy, dz, _, diameter, length, depth] = parsed;
    Ok(RawDescriptor::new(
        name,
        Point3::new(x, y, z),
        Vector3::new(dx, dy, dz),
        diameter,
        length,
        depth,
    ))
}

/// Removes the trailing length unit.
fn strip_unit<'a>(name: &str, slot: usize, text: &'a str) -> IoResult<&'a str> {
    text.trim()
        .strip_suffix(LENGTH_UNIT)
        .map(str::trim_end)
        .ok_or_else(|| SpliceIoError::invalid_parameter(name, slot, text, "missing mm unit"))
}

fn parse_number(name: &str, slot: usize, raw: &str, text: &str) -> IoResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| SpliceIoError::invalid_parameter(name, slot, raw, e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const FLANGE: [&str; PARAMETER_COUNT] = [
        "-50mm", "320mm", "-4mm", "0", "0", "-1", "17", "4.2mm", "8mm", "3mm",
    ];

    #[test]
    fn slots_map_to_fields() {
        let d = parse_parameters("en6115_2", FLANGE).unwrap();
        assert_eq!(d.name, "en6115_2");
        assert_eq!(d.position, Point3::new(-50.0, 320.0, -4.0));
        assert_eq!(d.direction, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(d.diameter, 4.2);
        assert_eq!(d.length, 8.0);
        assert_eq!(d.depth, 3.0);
    }

    #[test]
    fn unused_slot_is_never_parsed() {
        let mut values = FLANGE;
        values[6] = "garbage";
        assert!(parse_parameters("en6115_2", values).is_ok());
    }

    #[test]
    fn whitespace_around_unit_is_tolerated() {
        let mut values = FLANGE;
        values[0] = " -50 mm ";
        let d = parse_parameters("en6115_2", values).unwrap();
        assert_eq!(d.position.x, -50.0);
    }

    #[test]
    fn length_slots_require_their_unit() {
        for slot in [0, 1, 2, 7, 8, 9] {
            let mut values = FLANGE;
            values[slot] = "3";
            match parse_parameters("en6115_2", values).unwrap_err() {
                SpliceIoError::InvalidParameter {
                    slot: failed,
                    message,
                    ..
                } => {
                    assert_eq!(failed, slot);
                    assert!(message.contains("mm"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn bad_text_names_its_slot() {
        let mut values = FLANGE;
        values[7] = "4,2mm";
        let err = parse_parameters("en6115_2", values).unwrap_err();
        match err {
            SpliceIoError::InvalidParameter {
                fastener,
                slot,
                value,
                ..
            } => {
                assert_eq!(fastener, "en6115_2");
                assert_eq!(slot, 7);
                assert_eq!(value, "4,2mm");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn direction_slots_do_not_accept_units() {
        let mut values = FLANGE;
        values[4] = "1mm";
        assert!(parse_parameters("en6115_2", values).is_err());
    }
}
