//! Ein benannter Raumpunkt eines PCF-Elements (END-POINT, CENTRE-POINT, ...).

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Rolle des Punktes innerhalb des Elements (PCF-Schlüsselwort)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointKeyword {
    /// `END-POINT`
    #[default]
    #[serde(rename = "END-POINT")]
    EndPoint,
    /// `CO-ORDS`
    #[serde(rename = "CO-ORDS")]
    CoOrds,
    /// `CENTRE-POINT`
    #[serde(rename = "CENTRE-POINT")]
    CentrePoint,
    /// `BRANCH1-POINT`
    #[serde(rename = "BRANCH1-POINT")]
    Branch1Point,
}

impl PointKeyword {
    /// PCF-Schlüsselwort als Text
    pub fn as_str(self) -> &'static str {
        match self {
            PointKeyword::EndPoint => "END-POINT",
            PointKeyword::CoOrds => "CO-ORDS",
            PointKeyword::CentrePoint => "CENTRE-POINT",
            PointKeyword::Branch1Point => "BRANCH1-POINT",
        }
    }
}

/// Koordinateninformation, wie sie aus der Datei gelesen wurde
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacePoint {
    /// Schlüsselwort des Punktes
    pub keyword: PointKeyword,
    /// Lage im Modell
    pub coordinate: DVec3,
    /// Durchmesser am Punkt (0.0 solange nicht befüllt)
    pub diameter: f64,
    /// Ungeparster Rest der Zeile, nur zur Diagnose
    pub raw_tail: String,
    /// `true` sobald der Punkt aus der Datei befüllt wurde
    pub initialized: bool,
}

impl SpacePoint {
    /// Leerer, nicht initialisierter Punkt mit gegebener Rolle.
    pub fn new(keyword: PointKeyword) -> Self {
        Self {
            keyword,
            ..Default::default()
        }
    }

    /// Initialisierter Punkt mit Koordinate und Durchmesser.
    pub fn at(keyword: PointKeyword, coordinate: DVec3, diameter: f64) -> Self {
        Self {
            keyword,
            coordinate,
            diameter,
            raw_tail: String::new(),
            initialized: true,
        }
    }
}
