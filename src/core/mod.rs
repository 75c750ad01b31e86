//! Core-Domänentypen: Elemente, Raumpunkte, Registry, Connectors, Spatial-Index.

pub mod connector;
pub mod element;
pub mod geometry;
pub mod ids;
pub mod registry;
pub mod space_point;
pub mod spatial;

pub use connector::{Connector, ConnectorKind};
pub use element::{ElementType, SymbolicElement, DEFAULT_PIPELINE_REFERENCE};
pub use geometry::{is_equal, is_equal_within, placeholder_far_point};
pub use ids::{
    Category, EntityId, FamilyId, LevelId, ParameterKey, SegmentTypeId, StructuralKind,
    SystemTypeId,
};
pub use registry::{ElementRegistry, RegistryError};
pub use space_point::{PointKeyword, SpacePoint};
pub use spatial::ConnectorIndex;
