//! PCF Piping Importer Library.
//! Rekonstruiert Rohre, Bögen und T-Stücke aus PCF-Elementen in einem CAD-Host-Modell.

pub mod app;
pub mod core;
pub mod host;
pub mod shared;

pub use app::{
    BuildError, BuildPass, ElementDispatcher, ElementOutcome, ErrorKind, OutcomeStatus,
    PassReport, PlaceholderScope,
};
pub use core::{
    is_equal, Category, Connector, ConnectorIndex, ConnectorKind, ElementRegistry, ElementType,
    EntityId, FamilyId, LevelId, ParameterKey, PointKeyword, SegmentTypeId, SpacePoint,
    StructuralKind, SymbolicElement, SystemTypeId,
};
pub use host::{FaultPlan, HostError, InMemoryModel, ModelEntity, ModelHost};
pub use shared::{BuildOptions, LevelSelection, Schedule, SegmentTypeRule, CONNECTOR_TOLERANCE};
