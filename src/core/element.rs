//! Symbolisches PCF-Element: ein geparster Rohrleitungs-Datensatz.

use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize};
use std::cell::{Cell, OnceCell};
use std::fmt;

use super::{EntityId, PointKeyword, SpacePoint, SystemTypeId};

/// Standard-Pipeline-Referenz vor dem ersten `PIPELINE-REFERENCE`-Eintrag.
pub const DEFAULT_PIPELINE_REFERENCE: &str = "PRE-PIPELINE";

/// Elementtyp (PCF-Schlüsselwort der obersten Ebene)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Gerades Rohr
    Pipe,
    /// Rohrbogen
    Elbow,
    /// T-Stück
    Tee,
    /// Alle übrigen Schlüsselwörter (Tag bleibt für die Diagnose erhalten)
    NotImplemented(String),
}

impl ElementType {
    /// Bildet ein PCF-Schlüsselwort auf den Elementtyp ab.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "PIPE" => ElementType::Pipe,
            "ELBOW" => ElementType::Elbow,
            "TEE" => ElementType::Tee,
            other => ElementType::NotImplemented(other.to_string()),
        }
    }

    /// PCF-Schlüsselwort des Typs
    pub fn tag(&self) -> &str {
        match self {
            ElementType::Pipe => "PIPE",
            ElementType::Elbow => "ELBOW",
            ElementType::Tee => "TEE",
            ElementType::NotImplemented(tag) => tag,
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::from_tag(&tag)
    }
}

impl From<ElementType> for String {
    fn from(element_type: ElementType) -> Self {
        element_type.tag().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn default_pipeline_reference() -> String {
    DEFAULT_PIPELINE_REFERENCE.to_string()
}

/// Ein geparstes Rohrleitungs-Element.
///
/// Während eines Durchlaufs ist die Registry strukturell unveränderlich.
/// Die einzigen erlaubten Änderungen laufen über Zellen, damit Handler nur
/// eine geteilte Referenz benötigen:
/// - `created_entity` wird genau einmal gesetzt und nie gelöscht
/// - `is_reducing` wird vom TEE-Handler des Elements selbst berechnet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolicElement {
    /// Elementtyp
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Position in der Quelldatei (eindeutig innerhalb einer Registry)
    pub position: u32,
    /// Zugehörige Pipeline
    #[serde(default = "default_pipeline_reference")]
    pub pipeline_reference: String,
    /// Rohdaten des Datensatzes, nur zur Diagnose
    #[serde(default)]
    pub source_data: Vec<String>,
    /// Anzahl Zeilen, über die sich der Datensatz in der Datei erstreckt
    #[serde(default)]
    pub definition_length_in_lines: u32,
    /// Rohrsystem-Typ; `None` → Standard aus den Optionen
    #[serde(default)]
    pub piping_system: Option<SystemTypeId>,
    /// Erster Endpunkt
    #[serde(default = "end_point", deserialize_with = "end_point_from")]
    pub end_point1: SpacePoint,
    /// Zweiter Endpunkt
    #[serde(default = "end_point", deserialize_with = "end_point_from")]
    pub end_point2: SpacePoint,
    /// Lagepunkt (z.B. Stützen)
    #[serde(default = "co_ords", deserialize_with = "co_ords_from")]
    pub co_ords: SpacePoint,
    /// Mittelpunkt bei Formteilen
    #[serde(default = "centre_point", deserialize_with = "centre_point_from")]
    pub centre_point: SpacePoint,
    /// Abzweigpunkt bei T-Stücken
    #[serde(default = "branch1_point", deserialize_with = "branch1_point_from")]
    pub branch1_point: SpacePoint,
    /// Material-Kennung
    #[serde(default)]
    pub material_identifier: u32,
    /// Materialbeschreibung
    #[serde(default)]
    pub material_description: String,
    /// Winkel (bei Bögen)
    #[serde(default)]
    pub angle: f64,
    #[serde(skip)]
    is_reducing: Cell<bool>,
    #[serde(skip)]
    created_entity: OnceCell<EntityId>,
}

fn end_point() -> SpacePoint {
    SpacePoint::new(PointKeyword::EndPoint)
}

fn co_ords() -> SpacePoint {
    SpacePoint::new(PointKeyword::CoOrds)
}

fn centre_point() -> SpacePoint {
    SpacePoint::new(PointKeyword::CentrePoint)
}

fn branch1_point() -> SpacePoint {
    SpacePoint::new(PointKeyword::Branch1Point)
}

// Die Rolle eines Punktes ergibt sich aus dem Feld, nicht aus dem JSON
fn point_as<'de, D>(deserializer: D, keyword: PointKeyword) -> Result<SpacePoint, D::Error>
where
    D: Deserializer<'de>,
{
    let mut point = SpacePoint::deserialize(deserializer)?;
    point.keyword = keyword;
    Ok(point)
}

fn end_point_from<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpacePoint, D::Error> {
    point_as(deserializer, PointKeyword::EndPoint)
}

fn co_ords_from<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpacePoint, D::Error> {
    point_as(deserializer, PointKeyword::CoOrds)
}

fn centre_point_from<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpacePoint, D::Error> {
    point_as(deserializer, PointKeyword::CentrePoint)
}

fn branch1_point_from<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SpacePoint, D::Error> {
    point_as(deserializer, PointKeyword::Branch1Point)
}

impl SymbolicElement {
    /// Erstellt ein leeres Element mit Typ und Quellposition.
    pub fn new(element_type: ElementType, position: u32) -> Self {
        Self {
            element_type,
            position,
            pipeline_reference: default_pipeline_reference(),
            source_data: Vec::new(),
            definition_length_in_lines: 0,
            piping_system: None,
            end_point1: end_point(),
            end_point2: end_point(),
            co_ords: co_ords(),
            centre_point: centre_point(),
            branch1_point: branch1_point(),
            material_identifier: 0,
            material_description: String::new(),
            angle: 0.0,
            is_reducing: Cell::new(false),
            created_entity: OnceCell::new(),
        }
    }

    /// Gerades Rohr zwischen zwei Punkten.
    pub fn pipe(position: u32, start: DVec3, end: DVec3, diameter: f64) -> Self {
        let mut element = Self::new(ElementType::Pipe, position);
        element.end_point1 = SpacePoint::at(PointKeyword::EndPoint, start, diameter);
        element.end_point2 = SpacePoint::at(PointKeyword::EndPoint, end, diameter);
        element
    }

    /// Rohrbogen mit zwei Endpunkten und Mittelpunkt.
    pub fn elbow(position: u32, end1: DVec3, end2: DVec3, centre: DVec3, diameter: f64) -> Self {
        let mut element = Self::new(ElementType::Elbow, position);
        element.end_point1 = SpacePoint::at(PointKeyword::EndPoint, end1, diameter);
        element.end_point2 = SpacePoint::at(PointKeyword::EndPoint, end2, diameter);
        element.centre_point = SpacePoint::at(PointKeyword::CentrePoint, centre, diameter);
        element
    }

    /// T-Stück mit Haupt- und Abzweigdurchmesser.
    pub fn tee(
        position: u32,
        ends: [DVec3; 2],
        centre: DVec3,
        branch: DVec3,
        main_diameter: f64,
        branch_diameter: f64,
    ) -> Self {
        let mut element = Self::new(ElementType::Tee, position);
        element.end_point1 = SpacePoint::at(PointKeyword::EndPoint, ends[0], main_diameter);
        element.end_point2 = SpacePoint::at(PointKeyword::EndPoint, ends[1], main_diameter);
        element.centre_point = SpacePoint::at(PointKeyword::CentrePoint, centre, main_diameter);
        element.branch1_point =
            SpacePoint::at(PointKeyword::Branch1Point, branch, branch_diameter);
        element
    }

    /// Vom Host erzeugtes Element, sofern ein Builder erfolgreich war.
    pub fn created_entity(&self) -> Option<EntityId> {
        self.created_entity.get().copied()
    }

    /// Hinterlegt die Referenz auf das erzeugte Host-Element.
    ///
    /// Die Referenz wird genau einmal geschrieben; ein zweiter Versuch
    /// liefert die abgelehnte ID zurück.
    pub fn record_created_entity(&self, entity: EntityId) -> Result<(), EntityId> {
        self.created_entity.set(entity)
    }

    /// `true` bei reduzierendem T-Stück (vom TEE-Handler berechnet).
    pub fn is_reducing(&self) -> bool {
        self.is_reducing.get()
    }

    pub(crate) fn set_reducing(&self, reducing: bool) {
        self.is_reducing.set(reducing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_type_maps_known_tags() {
        assert_eq!(ElementType::from_tag("PIPE"), ElementType::Pipe);
        assert_eq!(ElementType::from_tag(" ELBOW "), ElementType::Elbow);
        assert_eq!(
            ElementType::from_tag("FLANGE"),
            ElementType::NotImplemented("FLANGE".to_string())
        );
        assert_eq!(ElementType::from_tag("FLANGE").tag(), "FLANGE");
    }

    #[test]
    fn created_entity_is_write_once() {
        let element = SymbolicElement::new(ElementType::Pipe, 1);
        assert_eq!(element.created_entity(), None);

        assert!(element.record_created_entity(EntityId(10)).is_ok());
        assert_eq!(element.record_created_entity(EntityId(11)), Err(EntityId(11)));
        assert_eq!(element.created_entity(), Some(EntityId(10)));
    }

    #[test]
    fn deserialize_applies_defaults() {
        let element: SymbolicElement = serde_json::from_str(
            r#"{
                "type": "PIPE",
                "position": 3,
                "end_point1": {"coordinate": [0.0, 0.0, 0.0], "diameter": 0.1, "initialized": true},
                "end_point2": {"coordinate": [1.0, 0.0, 0.0], "diameter": 0.1, "initialized": true}
            }"#,
        )
        .expect("gültiges Element");

        assert_eq!(element.element_type, ElementType::Pipe);
        assert_eq!(element.pipeline_reference, DEFAULT_PIPELINE_REFERENCE);
        assert_eq!(element.centre_point.keyword, PointKeyword::CentrePoint);
        assert!(!element.is_reducing());
        assert_eq!(element.created_entity(), None);
    }

    #[test]
    fn point_keyword_follows_field_role() {
        let element: SymbolicElement = serde_json::from_str(
            r#"{
                "type": "TEE",
                "position": 4,
                "centre_point": {"coordinate": [1.0, 1.0, 0.0], "diameter": 0.1, "initialized": true},
                "branch1_point": {"keyword": "END-POINT", "coordinate": [2.0, 1.0, 0.0], "diameter": 0.05}
            }"#,
        )
        .expect("gültiges Element");

        assert_eq!(element.centre_point.keyword, PointKeyword::CentrePoint);
        assert_eq!(element.branch1_point.keyword, PointKeyword::Branch1Point);
        assert_eq!(element.branch1_point.diameter, 0.05);
        assert_eq!(element.end_point1.keyword, PointKeyword::EndPoint);
    }
}
