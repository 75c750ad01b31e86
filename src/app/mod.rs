//! Application-Layer: Dispatcher, Builder, Connector-Auflösung und Durchlauf.

pub mod builders;
pub mod connectors;
pub mod dispatcher;
pub mod error;
pub mod pass;
pub mod report;

pub use connectors::{index_segment_connectors, resolve_connector, PlaceholderScope};
pub use dispatcher::ElementDispatcher;
pub use error::{BuildError, ErrorKind};
pub use pass::BuildPass;
pub use report::{ElementOutcome, OutcomeStatus, PassReport};
