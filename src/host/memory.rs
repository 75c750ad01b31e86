//! In-Memory-Host-Modell für Trockenläufe, Benchmarks und Tests.
//!
//! Bildet die Host-Schnittstelle deterministisch nach: Segmente mit zwei
//! stirnseitigen Connectors, verbundene Formteile und frei platzierte
//! Katalog-Bauteile. Fehler lassen sich über [`FaultPlan`] gezielt auslösen.

use glam::DVec3;
use indexmap::IndexMap;
use std::collections::HashMap;

use super::{HostError, ModelHost};
use crate::core::{
    Category, Connector, ConnectorKind, EntityId, FamilyId, LevelId, ParameterKey,
    SegmentTypeId, StructuralKind, SystemTypeId,
};
use crate::shared::BuildOptions;

/// Mindestlänge eines Segments (kürzere Segmente lehnt der Host ab).
const MIN_SEGMENT_LENGTH: f64 = 1.0e-9;

const SEGMENT_SCHEMA: &[ParameterKey] = &[ParameterKey::PipeDiameter];
const FITTING_SCHEMA: &[ParameterKey] = &[ParameterKey::NominalDiameter1];
const INSTANCE_SCHEMA: &[ParameterKey] =
    &[ParameterKey::NominalDiameter1, ParameterKey::NominalDiameter3];

/// Gerades Rohrsegment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEntity {
    /// Rohrsystem
    pub system: SystemTypeId,
    /// Rohrtyp
    pub segment_type: SegmentTypeId,
    /// Geschoss
    pub level: LevelId,
    /// Startpunkt
    pub start: DVec3,
    /// Endpunkt
    pub end: DVec3,
    /// Abzweig-Connectors auf der Mantelfläche
    pub branches: Vec<DVec3>,
}

/// Formteil, das zwei Connectors verbindet
#[derive(Debug, Clone, PartialEq)]
pub struct FittingEntity {
    /// Verbundene Elemente
    pub connected: [EntityId; 2],
    /// Lage der verbundenen Connectors
    pub origins: [DVec3; 2],
}

/// Frei platziertes Katalog-Bauteil
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceEntity {
    /// Katalog-Eintrag
    pub family: FamilyId,
    /// Einfügepunkt
    pub point: DVec3,
    /// Tragwerks-Flag
    pub structural: StructuralKind,
}

/// Ein Element im Host-Modell
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEntity {
    /// Gerades Segment
    Segment(SegmentEntity),
    /// Verbundenes Formteil
    Fitting(FittingEntity),
    /// Platziertes Bauteil
    Instance(InstanceEntity),
}

impl ModelEntity {
    fn schema(&self) -> &'static [ParameterKey] {
        match self {
            ModelEntity::Segment(_) => SEGMENT_SCHEMA,
            ModelEntity::Fitting(_) => FITTING_SCHEMA,
            ModelEntity::Instance(_) => INSTANCE_SCHEMA,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredEntity {
    entity: ModelEntity,
    parameters: HashMap<ParameterKey, f64>,
}

/// Gezielte Fehlerauslösung für Tests.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// `create_segment` schlägt fehl
    pub fail_segment_creation: bool,
    /// `create_connected_fitting` schlägt fehl
    pub fail_connected_fitting: bool,
    /// `instantiate_family` schlägt fehl
    pub fail_instantiation: bool,
    /// `regenerate` schlägt fehl
    pub fail_regenerate: bool,
    /// Der nächste `delete_entity`-Aufruf schlägt fehl (einmalig)
    pub fail_next_delete: bool,
    /// `set_parameter` schlägt für diese Schlüssel fehl
    pub reject_parameters: Vec<ParameterKey>,
}

/// Deterministisches Host-Modell im Speicher.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    entities: IndexMap<EntityId, StoredEntity>,
    families: IndexMap<FamilyId, (Category, String)>,
    levels: Vec<LevelId>,
    next_id: u64,
    mutations: usize,
    regenerations: usize,
    reports: Vec<String>,
    /// Aktive Fehlerauslösung
    pub faults: FaultPlan,
}

impl InMemoryModel {
    /// Erstellt ein leeres Modell ohne Geschosse und Katalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Modell mit einem Geschoss und den Katalog-Einträgen aus den Optionen.
    pub fn seeded(options: &BuildOptions) -> Self {
        let mut model = Self::new();
        model.add_level();
        model.add_family(Category::PipeFitting, &options.elbow_family);
        model.add_family(Category::PipeFitting, &options.tee_family);
        model.add_family(Category::PipeFitting, &options.reducing_tee_family);
        model
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Legt ein neues Geschoss an.
    pub fn add_level(&mut self) -> LevelId {
        let id = LevelId(self.allocate_id());
        self.levels.push(id);
        id
    }

    /// Legt einen Katalog-Eintrag an.
    pub fn add_family(&mut self, category: Category, name: &str) -> FamilyId {
        let id = FamilyId(self.allocate_id());
        self.families.insert(id, (category, name.to_string()));
        id
    }

    /// Ergänzt einen Abzweig-Connector auf einem bestehenden Segment.
    pub fn add_branch_connector(&mut self, segment: EntityId, point: DVec3) -> Result<(), HostError> {
        match self.entities.get_mut(&segment).map(|stored| &mut stored.entity) {
            Some(ModelEntity::Segment(seg)) => {
                seg.branches.push(point);
                Ok(())
            }
            Some(_) => Err(HostError::Fault(format!("{segment} ist kein Segment"))),
            None => Err(HostError::EntityNotFound(segment)),
        }
    }

    /// Element über seine ID
    pub fn entity(&self, id: EntityId) -> Option<&ModelEntity> {
        self.entities.get(&id).map(|stored| &stored.entity)
    }

    /// Alle Elemente in Erzeugungsreihenfolge
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &ModelEntity)> {
        self.entities.iter().map(|(id, stored)| (*id, &stored.entity))
    }

    /// Anzahl aller Elemente
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Anzahl gerader Segmente
    pub fn segment_count(&self) -> usize {
        self.count(|entity| matches!(entity, ModelEntity::Segment(_)))
    }

    /// Anzahl verbundener Formteile
    pub fn fitting_count(&self) -> usize {
        self.count(|entity| matches!(entity, ModelEntity::Fitting(_)))
    }

    /// Anzahl platzierter Bauteile
    pub fn instance_count(&self) -> usize {
        self.count(|entity| matches!(entity, ModelEntity::Instance(_)))
    }

    fn count(&self, predicate: impl Fn(&ModelEntity) -> bool) -> usize {
        self.entities
            .values()
            .filter(|stored| predicate(&stored.entity))
            .count()
    }

    /// Anzahl mutierender Operationen (Erzeugen, Löschen, Parameter setzen)
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    /// Anzahl ausgeführter Regenerierungen
    pub fn regeneration_count(&self) -> usize {
        self.regenerations
    }

    /// Alle gemeldeten Fehlermeldungen
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Alle Connectors eines Segments inklusive Abzweigen.
    pub fn all_connectors(&self, segment: EntityId) -> Result<Vec<Connector>, HostError> {
        let seg = self.segment(segment)?;
        let mut connectors = vec![
            Connector::new(segment, 0, seg.start, ConnectorKind::End),
            Connector::new(segment, 1, seg.end, ConnectorKind::End),
        ];
        connectors.extend(seg.branches.iter().enumerate().map(|(i, point)| {
            Connector::new(segment, 2 + i as u32, *point, ConnectorKind::Branch)
        }));
        Ok(connectors)
    }

    fn segment(&self, id: EntityId) -> Result<&SegmentEntity, HostError> {
        match self.entities.get(&id).map(|stored| &stored.entity) {
            Some(ModelEntity::Segment(seg)) => Ok(seg),
            Some(_) => Err(HostError::Fault(format!("{id} ist kein Segment"))),
            None => Err(HostError::EntityNotFound(id)),
        }
    }

    fn insert(&mut self, entity: ModelEntity) -> EntityId {
        let id = EntityId(self.allocate_id());
        self.entities.insert(
            id,
            StoredEntity {
                entity,
                parameters: HashMap::new(),
            },
        );
        self.mutations += 1;
        id
    }
}

impl ModelHost for InMemoryModel {
    fn create_segment(
        &mut self,
        system: SystemTypeId,
        segment_type: SegmentTypeId,
        level: LevelId,
        start: DVec3,
        end: DVec3,
    ) -> Result<EntityId, HostError> {
        if self.faults.fail_segment_creation {
            return Err(HostError::CreationFailed("Segment abgelehnt".to_string()));
        }
        if !self.levels.contains(&level) {
            return Err(HostError::Fault(format!("Geschoss {level} unbekannt")));
        }
        if start.distance(end) < MIN_SEGMENT_LENGTH {
            return Err(HostError::CreationFailed(format!(
                "Segment zu kurz ({:.3e})",
                start.distance(end)
            )));
        }

        let id = self.insert(ModelEntity::Segment(SegmentEntity {
            system,
            segment_type,
            level,
            start,
            end,
            branches: Vec::new(),
        }));
        log::trace!("Segment {} erzeugt: {:?} → {:?}", id, start, end);
        Ok(id)
    }

    fn supports_parameter(&self, entity: EntityId, key: ParameterKey) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|stored| stored.entity.schema().contains(&key))
    }

    fn parameter(&self, entity: EntityId, key: ParameterKey) -> Result<f64, HostError> {
        let stored = self
            .entities
            .get(&entity)
            .ok_or(HostError::EntityNotFound(entity))?;
        if !stored.entity.schema().contains(&key) {
            return Err(HostError::UnknownParameter { entity, key });
        }
        Ok(stored.parameters.get(&key).copied().unwrap_or(0.0))
    }

    fn set_parameter(
        &mut self,
        entity: EntityId,
        key: ParameterKey,
        value: f64,
    ) -> Result<(), HostError> {
        if self.faults.reject_parameters.contains(&key) {
            return Err(HostError::Fault(format!(
                "Parameter '{}' gesperrt",
                key.display_name()
            )));
        }
        let stored = self
            .entities
            .get_mut(&entity)
            .ok_or(HostError::EntityNotFound(entity))?;
        if !stored.entity.schema().contains(&key) {
            return Err(HostError::UnknownParameter { entity, key });
        }
        stored.parameters.insert(key, value);
        self.mutations += 1;
        Ok(())
    }

    fn delete_entity(&mut self, entity: EntityId) -> Result<(), HostError> {
        if std::mem::take(&mut self.faults.fail_next_delete) {
            return Err(HostError::Fault(format!("{entity} gesperrt")));
        }
        self.entities
            .shift_remove(&entity)
            .ok_or(HostError::EntityNotFound(entity))?;
        self.mutations += 1;
        Ok(())
    }

    fn find_family(&self, category: Category, name: &str) -> Option<FamilyId> {
        self.families
            .iter()
            .find(|(_, (cat, family_name))| *cat == category && family_name == name)
            .map(|(id, _)| *id)
    }

    fn levels(&self) -> Vec<LevelId> {
        self.levels.clone()
    }

    fn end_connectors(&self, segment: EntityId) -> Result<Vec<Connector>, HostError> {
        Ok(self
            .all_connectors(segment)?
            .into_iter()
            .filter(Connector::is_end)
            .collect())
    }

    fn create_connected_fitting(
        &mut self,
        first: &Connector,
        second: &Connector,
    ) -> Result<EntityId, HostError> {
        if self.faults.fail_connected_fitting {
            return Err(HostError::CreationFailed("Formteil abgelehnt".to_string()));
        }
        if first.owner == second.owner {
            return Err(HostError::CreationFailed(format!(
                "Beide Connectors gehören zu {}",
                first.owner
            )));
        }
        self.segment(first.owner)?;
        self.segment(second.owner)?;

        let diameter = self
            .entities
            .get(&first.owner)
            .and_then(|stored| stored.parameters.get(&ParameterKey::PipeDiameter))
            .copied();

        let id = self.insert(ModelEntity::Fitting(FittingEntity {
            connected: [first.owner, second.owner],
            origins: [first.origin, second.origin],
        }));
        if let (Some(diameter), Some(stored)) = (diameter, self.entities.get_mut(&id)) {
            stored
                .parameters
                .insert(ParameterKey::NominalDiameter1, diameter);
        }
        Ok(id)
    }

    fn instantiate_family(
        &mut self,
        family: FamilyId,
        point: DVec3,
        structural: StructuralKind,
    ) -> Result<EntityId, HostError> {
        if !self.families.contains_key(&family) {
            return Err(HostError::Fault(format!("Family {family} unbekannt")));
        }
        if self.faults.fail_instantiation {
            return Err(HostError::CreationFailed("Bauteil abgelehnt".to_string()));
        }
        Ok(self.insert(ModelEntity::Instance(InstanceEntity {
            family,
            point,
            structural,
        })))
    }

    fn regenerate(&mut self) -> Result<(), HostError> {
        if self.faults.fail_regenerate {
            return Err(HostError::Fault("Regenerierung fehlgeschlagen".to_string()));
        }
        self.regenerations += 1;
        Ok(())
    }

    fn report_error(&mut self, message: &str) {
        log::error!("{}", message);
        self.reports.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_segment() -> (InMemoryModel, EntityId) {
        let mut model = InMemoryModel::seeded(&BuildOptions::default());
        let level = model.levels()[0];
        let id = model
            .create_segment(
                SystemTypeId(1),
                SegmentTypeId(2),
                level,
                DVec3::ZERO,
                DVec3::new(5.0, 0.0, 0.0),
            )
            .expect("Segment erwartet");
        (model, id)
    }

    #[test]
    fn end_connectors_exclude_branches() {
        let (mut model, id) = model_with_segment();
        model
            .add_branch_connector(id, DVec3::new(2.5, 0.0, 0.0))
            .expect("Abzweig erwartet");

        assert_eq!(model.all_connectors(id).expect("Segment").len(), 3);
        let ends = model.end_connectors(id).expect("Segment");
        assert_eq!(ends.len(), 2);
        assert!(ends.iter().all(Connector::is_end));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let (mut model, id) = model_with_segment();

        assert!(!model.supports_parameter(id, ParameterKey::NominalDiameter3));
        assert_eq!(
            model.set_checked_parameter(id, ParameterKey::NominalDiameter3, 0.1),
            Err(HostError::UnknownParameter {
                entity: id,
                key: ParameterKey::NominalDiameter3
            })
        );
        model
            .set_checked_parameter(id, ParameterKey::PipeDiameter, 0.1)
            .expect("Durchmesser setzbar");
        assert_eq!(model.parameter(id, ParameterKey::PipeDiameter), Ok(0.1));
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        let mut model = InMemoryModel::seeded(&BuildOptions::default());
        let level = model.levels()[0];
        let result = model.create_segment(SystemTypeId(1), SegmentTypeId(2), level, DVec3::X, DVec3::X);

        assert!(matches!(result, Err(HostError::CreationFailed(_))));
        assert_eq!(model.mutation_count(), 0);
    }

    #[test]
    fn delete_keeps_creation_order_of_remaining() {
        let (mut model, first) = model_with_segment();
        let level = model.levels()[0];
        let second = model
            .create_segment(SystemTypeId(1), SegmentTypeId(2), level, DVec3::Y, DVec3::Z)
            .expect("Segment erwartet");
        let third = model
            .create_segment(SystemTypeId(1), SegmentTypeId(2), level, DVec3::Z, DVec3::X)
            .expect("Segment erwartet");

        model.delete_entity(second).expect("löschbar");
        let ids: Vec<EntityId> = model.entities().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, third]);
        assert_eq!(model.delete_entity(second), Err(HostError::EntityNotFound(second)));
    }

    #[test]
    fn family_lookup_is_exact_and_category_bound() {
        let model = InMemoryModel::seeded(&BuildOptions::default());

        assert!(model
            .find_family(Category::PipeFitting, crate::shared::options::ELBOW_FAMILY)
            .is_some());
        assert!(model
            .find_family(Category::PipeFitting, "EN 10253-2 - Elbow")
            .is_none());
        assert!(model
            .find_family(Category::PipeAccessory, crate::shared::options::ELBOW_FAMILY)
            .is_none());
    }
}
