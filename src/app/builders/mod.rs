//! Typspezifische Element-Builder.
//!
//! - `segment` — Gerade Rohre (PIPE) und Segment-Primitive
//! - `elbow` — Rohrbögen über Connector-Verbindung
//! - `tee` — T-Stücke als platzierte Katalog-Bauteile

mod elbow;
mod segment;
mod tee;

pub use elbow::build_elbow;
pub use segment::build_pipe;
pub use tee::build_tee;

pub(crate) use segment::create_segment;

use crate::app::BuildError;
use crate::core::{EntityId, SymbolicElement};

/// Hinterlegt die Referenz auf das erzeugte Host-Element am Element.
fn record_created(element: &SymbolicElement, entity: EntityId) -> Result<(), BuildError> {
    element
        .record_created_entity(entity)
        .map_err(|rejected| BuildError::UnexpectedFault {
            position: element.position,
            message: format!("Element wurde bereits erzeugt, {rejected} verworfen"),
        })
}
