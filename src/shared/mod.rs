//! Geteilte Konfiguration für Core, Host-Anbindung und Builder.

pub mod options;

pub use options::{BuildOptions, LevelSelection, Schedule, SegmentTypeRule};
pub use options::{CONNECTOR_TOLERANCE, PLACEHOLDER_LENGTH_FACTOR};
