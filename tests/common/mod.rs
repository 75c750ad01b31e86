//! Gemeinsame Test-Helfer: protokollierender Host und Beispielgeometrie.

#![allow(dead_code)]

use glam::DVec3;
use pcf_piping_importer::{
    BuildOptions, Category, Connector, ElementRegistry, EntityId, FamilyId, HostError,
    InMemoryModel, LevelId, ModelHost, ParameterKey, SegmentTypeId, StructuralKind,
    SymbolicElement, SystemTypeId,
};
use std::collections::HashSet;

/// Host-Wrapper, der Segment-Erzeugung, Löschungen und Parameter mitschreibt.
pub struct RecordingHost {
    pub inner: InMemoryModel,
    pub created_segments: Vec<(EntityId, DVec3, DVec3)>,
    pub deleted: Vec<EntityId>,
    pub parameter_writes: Vec<(EntityId, ParameterKey, f64)>,
}

impl RecordingHost {
    pub fn new(inner: InMemoryModel) -> Self {
        Self {
            inner,
            created_segments: Vec::new(),
            deleted: Vec::new(),
            parameter_writes: Vec::new(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(InMemoryModel::seeded(&BuildOptions::default()))
    }

    /// Segmente, die keinem Registry-Element gehören (Platzhalter).
    pub fn placeholder_ids(&self, registry: &ElementRegistry) -> Vec<EntityId> {
        let owned: HashSet<EntityId> = registry.iter().filter_map(|e| e.created_entity()).collect();
        self.created_segments
            .iter()
            .map(|(id, _, _)| *id)
            .filter(|id| !owned.contains(id))
            .collect()
    }

    /// Parameter-Schreibzugriffe auf ein Element.
    pub fn writes_for(&self, entity: EntityId) -> Vec<(ParameterKey, f64)> {
        self.parameter_writes
            .iter()
            .filter(|(id, _, _)| *id == entity)
            .map(|(_, key, value)| (*key, *value))
            .collect()
    }
}

impl ModelHost for RecordingHost {
    fn create_segment(
        &mut self,
        system: SystemTypeId,
        segment_type: SegmentTypeId,
        level: LevelId,
        start: DVec3,
        end: DVec3,
    ) -> Result<EntityId, HostError> {
        let id = self
            .inner
            .create_segment(system, segment_type, level, start, end)?;
        self.created_segments.push((id, start, end));
        Ok(id)
    }

    fn supports_parameter(&self, entity: EntityId, key: ParameterKey) -> bool {
        self.inner.supports_parameter(entity, key)
    }

    fn parameter(&self, entity: EntityId, key: ParameterKey) -> Result<f64, HostError> {
        self.inner.parameter(entity, key)
    }

    fn set_parameter(
        &mut self,
        entity: EntityId,
        key: ParameterKey,
        value: f64,
    ) -> Result<(), HostError> {
        self.inner.set_parameter(entity, key, value)?;
        self.parameter_writes.push((entity, key, value));
        Ok(())
    }

    fn delete_entity(&mut self, entity: EntityId) -> Result<(), HostError> {
        self.inner.delete_entity(entity)?;
        self.deleted.push(entity);
        Ok(())
    }

    fn find_family(&self, category: Category, name: &str) -> Option<FamilyId> {
        self.inner.find_family(category, name)
    }

    fn levels(&self) -> Vec<LevelId> {
        self.inner.levels()
    }

    fn end_connectors(&self, segment: EntityId) -> Result<Vec<Connector>, HostError> {
        self.inner.end_connectors(segment)
    }

    fn create_connected_fitting(
        &mut self,
        first: &Connector,
        second: &Connector,
    ) -> Result<EntityId, HostError> {
        self.inner.create_connected_fitting(first, second)
    }

    fn instantiate_family(
        &mut self,
        family: FamilyId,
        point: DVec3,
        structural: StructuralKind,
    ) -> Result<EntityId, HostError> {
        self.inner.instantiate_family(family, point, structural)
    }

    fn regenerate(&mut self) -> Result<(), HostError> {
        self.inner.regenerate()
    }

    fn report_error(&mut self, message: &str) {
        self.inner.report_error(message)
    }
}

/// Rohr 1 entlang X, Bogen um (11,0,0), Rohr 2 entlang Y.
pub const ELBOW_END_1: DVec3 = DVec3::new(10.0, 0.0, 0.0);
pub const ELBOW_END_2: DVec3 = DVec3::new(11.0, 1.0, 0.0);
pub const ELBOW_CENTRE: DVec3 = DVec3::new(11.0, 0.0, 0.0);

pub fn pipe_into_elbow(position: u32) -> SymbolicElement {
    SymbolicElement::pipe(position, DVec3::ZERO, ELBOW_END_1, 0.1)
}

pub fn pipe_out_of_elbow(position: u32) -> SymbolicElement {
    SymbolicElement::pipe(position, ELBOW_END_2, DVec3::new(11.0, 10.0, 0.0), 0.1)
}

pub fn corner_elbow(position: u32) -> SymbolicElement {
    SymbolicElement::elbow(position, ELBOW_END_1, ELBOW_END_2, ELBOW_CENTRE, 0.1)
}
