//! Toleranzbasierter Punktvergleich für das Connector-Matching.

use glam::DVec3;

use crate::shared::CONNECTOR_TOLERANCE;

/// Prüft, ob zwei Punkte innerhalb der Standard-Toleranz zusammenfallen.
///
/// Reflexiv und symmetrisch; Punkte mit Abstand ≥ Toleranz matchen nie.
pub fn is_equal(a: DVec3, b: DVec3) -> bool {
    is_equal_within(a, b, CONNECTOR_TOLERANCE)
}

/// Wie [`is_equal`], aber mit expliziter Toleranz.
pub fn is_equal_within(a: DVec3, b: DVec3, tolerance: f64) -> bool {
    a.distance(b) < tolerance
}

/// Endpunkt eines Platzhalter-Segments: `endpoint + factor · (endpoint − centre)`.
///
/// Gibt `None` zurück, wenn Endpunkt und Mittelpunkt zusammenfallen
/// (keine Richtung ableitbar).
pub fn placeholder_far_point(endpoint: DVec3, centre: DVec3, factor: f64) -> Option<DVec3> {
    let direction = endpoint - centre;
    if direction.length_squared() <= f64::EPSILON * f64::EPSILON {
        return None;
    }
    Some(endpoint + direction * factor)
}
