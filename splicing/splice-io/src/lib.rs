//! External boundaries of the rail splicing process builder.
//!
//! - **Input**: [`CadSession`]s answering fastener family queries, with the
//!   ten positional parameters of each fastener parsed by
//!   [`parse_parameters`]; [`ExportFileSession`] reads them from a
//!   plain-text export
//! - **Diagnostics**: one listing per family ([`write_family_dump`])
//! - **Trajectories**: the calibrated approach paths ([`TrajectoryLibrary`])
//! - **Output**: the process document ([`write_process`], [`save_process`])
//!
//! # Example
//!
//! ```
//! use splice_io::{ExportFileSession, TrajectoryLibrary, collect_descriptors, write_process};
//! use splice_process::{ProcessConfig, build_process};
//!
//! let export = "\
//! asna_1;-400mm;900mm;0mm;0;1;0;0;4.8mm;10mm;0mm
//! asna_2;-400mm;600mm;0mm;0;1;0;0;4.8mm;10mm;0mm
//! asna_3;-400mm;300mm;0mm;0;1;0;0;4.0mm;10mm;0mm
//! asna_4;-400mm;-300mm;0mm;0;1;0;0;4.0mm;10mm;0mm
//! asna_5;-400mm;-600mm;0mm;0;1;0;0;4.8mm;10mm;0mm
//! asna_6;-400mm;-900mm;0mm;0;1;0;0;4.8mm;10mm;0mm
//! ";
//! let mut session = ExportFileSession::parse(export).unwrap();
//! let descriptors = collect_descriptors(&mut session, &["asna"]).unwrap();
//!
//! let config = ProcessConfig::default();
//! let build = build_process(&descriptors, &config).unwrap();
//! assert_eq!(build.report.routed, 6);
//!
//! let library = TrajectoryLibrary::standard().unwrap();
//! let xml = write_process(&build.process, &library, &config).unwrap();
//! assert!(xml.contains(r#"FastName="asna_3""#));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dump;
mod error;
mod library;
mod params;
mod source;
mod xml;

pub use dump::{dump_file_name, write_family_dump};
pub use error::{IoResult, SpliceIoError};
pub use library::{TRAJECTORY_FORMAT_VERSION, TrajectoryLibrary};
pub use params::{PARAMETER_COUNT, parse_parameters};
pub use source::{
    CadSession, ExportFileProvider, ExportFileSession, FamilyQuery, SessionProvider,
    collect_descriptors, connect, query_families,
};
pub use xml::{DEFAULT_OUTPUT, format_number, save_process, write_process};
