//! The CAD boundary: sessions that answer fastener family queries.
//!
//! A [`SessionProvider`] either attaches to a running CAD session or
//! launches a new one; [`connect`] tries both in that order. The only
//! provider shipped here reads a plain-text parameter export, one fastener
//! per line:
//!
//! ```text
//! # name;X;Y;Z;XDir;YDir;ZDir;unused;Diameter;Length;Depth
//! asna_1;150mm;897.3mm;12mm;0;1;0;0;4.8mm;10mm;5.8mm
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use splice_types::RawDescriptor;
use tracing::{debug, info, warn};

use crate::error::{IoResult, SpliceIoError};
use crate::params::{PARAMETER_COUNT, parse_parameters};

/// Field separator of the parameter export.
const FIELD_SEPARATOR: char = ';';

/// An open CAD session.
pub trait CadSession {
    /// Returns every fastener whose name starts with `family`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot answer the query.
    fn search(&mut self, family: &str) -> IoResult<Vec<RawDescriptor>>;

    /// Releases the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be closed cleanly.
    fn close(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// A way of obtaining a [`CadSession`].
pub trait SessionProvider {
    /// The session type produced.
    type Session: CadSession;

    /// Attaches to an already running session.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is running.
    fn attach(&self) -> IoResult<Self::Session>;

    /// Starts a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if no session can be started.
    fn launch(&self) -> IoResult<Self::Session>;
}

/// Attaches to a session, falling back to launching one.
///
/// # Errors
///
/// Returns [`SpliceIoError::SessionUnavailable`] carrying both failures if
/// neither attaching nor launching succeeds.
pub fn connect<P: SessionProvider>(provider: &P) -> IoResult<P::Session> {
    let attach = match provider.attach() {
        Ok(session) => {
            info!("Attached to CAD session");
            return Ok(session);
        }
        Err(e) => e,
    };
    warn!(error = %attach, "Could not attach to CAD session, launching one");

    match provider.launch() {
        Ok(session) => {
            info!("Launched CAD session");
            Ok(session)
        }
        Err(launch) => Err(SpliceIoError::SessionUnavailable {
            attach: attach.to_string(),
            launch: launch.to_string(),
        }),
    }
}

/// The descriptors returned for one fastener family.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyQuery {
    /// Name prefix queried.
    pub family: String,
    /// Matching descriptors in session order.
    pub descriptors: Vec<RawDescriptor>,
}

/// Queries every family in order.
///
/// # Errors
///
/// Returns the first query error.
pub fn query_families<S, F>(session: &mut S, families: &[F]) -> IoResult<Vec<FamilyQuery>>
where
    S: CadSession + ?Sized,
    F: AsRef<str>,
{
    families
        .iter()
        .map(|family| {
            let family = family.as_ref();
            let descriptors = session.search(family)?;
            info!(family, count = descriptors.len(), "Queried fastener family");
            Ok(FamilyQuery {
                family: family.to_string(),
                descriptors,
            })
        })
        .collect()
}

/// Queries every family in order and concatenates the results.
///
/// # Errors
///
/// Returns the first query error.
pub fn collect_descriptors<S, F>(session: &mut S, families: &[F]) -> IoResult<Vec<RawDescriptor>>
where
    S: CadSession + ?Sized,
    F: AsRef<str>,
{
    Ok(query_families(session, families)?
        .into_iter()
        .flat_map(|query| query.descriptors)
        .collect())
}

/// A session backed by a parameter export file.
#[derive(Debug, Clone, Default)]
pub struct ExportFileSession {
    records: Vec<RawDescriptor>,
}

impl ExportFileSession {
    /// Loads an export file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpliceIoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let session = Self::parse(&content)?;
        debug!(path = %path.display(), records = session.len(), "Loaded parameter export");
        Ok(session)
    }

    /// Parses export text.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceIoError::MalformedRecord`] for a line without exactly
    /// eleven fields or with an empty name, and
    /// [`SpliceIoError::InvalidParameter`] for a non-numeric parameter.
    pub fn parse(content: &str) -> IoResult<Self> {
        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            records.push(parse_record(index + 1, line)?);
        }
        Ok(Self { records })
    }

    /// Number of fasteners in the export.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the export holds no fastener.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CadSession for ExportFileSession {
    fn search(&mut self, family: &str) -> IoResult<Vec<RawDescriptor>> {
        let prefix = family.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|record| record.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }
}

fn parse_record(line: usize, text: &str) -> IoResult<RawDescriptor> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
    let Some((name, values)) = fields.split_first() else {
        return Err(SpliceIoError::malformed_record(line, "empty record"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(SpliceIoError::malformed_record(line, "missing fastener name"));
    }
    let values: [&str; PARAMETER_COUNT] = values.try_into().map_err(|_| {
        SpliceIoError::malformed_record(
            line,
            format!("expected {PARAMETER_COUNT} parameters, found {}", values.len()),
        )
    })?;
    parse_parameters(name, values)
}

/// Provides sessions over a parameter export file.
///
/// Attaching reads the file; there is no CAD application to launch.
#[derive(Debug, Clone)]
pub struct ExportFileProvider {
    path: PathBuf,
}

impl ExportFileProvider {
    /// Creates a provider for the given export file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The export file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for ExportFileProvider {
    type Session = ExportFileSession;

    fn attach(&self) -> IoResult<ExportFileSession> {
        ExportFileSession::open(&self.path)
    }

    fn launch(&self) -> IoResult<ExportFileSession> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "an export file cannot be launched",
        )
        .into())
    }
}
