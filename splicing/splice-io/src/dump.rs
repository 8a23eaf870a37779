//! Per-family diagnostic listing of the queried descriptors.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use splice_types::RawDescriptor;
use tracing::debug;

use crate::error::IoResult;

/// File name of the listing for one family.
#[must_use]
pub fn dump_file_name(family: &str) -> String {
    format!("List of points {family}.txt")
}

/// Writes one `key: value` line per field of every descriptor.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_family_dump<P: AsRef<Path>>(
    dir: P,
    family: &str,
    descriptors: &[RawDescriptor],
) -> IoResult<PathBuf> {
    let path = dir.as_ref().join(dump_file_name(family));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_descriptors(&mut writer, descriptors)?;
    writer.flush()?;
    debug!(path = %path.display(), count = descriptors.len(), "Wrote fastener listing");
    Ok(path)
}

fn write_descriptors<W: Write>(writer: &mut W, descriptors: &[RawDescriptor]) -> IoResult<()> {
    for d in descriptors {
        writeln!(writer, "Name: {}", d.name)?;
        writeln!(writer, "Xe: {}", d.position.x)?;
        writeln!(writer, "Ye: {}", d.position.y)?;
        writeln!(writer, "Ze: {}", d.position.z)?;
        writeln!(writer, "XDir: {}", d.direction.x)?;
        writeln!(writer, "YDir: {}", d.direction.y)?;
        writeln!(writer, "ZDir: {}", d.direction.z)?;
        writeln!(writer, "Diameter: {}", d.diameter)?;
        writeln!(writer, "Depth: {}", d.depth)?;
    }
    Ok(())
}
