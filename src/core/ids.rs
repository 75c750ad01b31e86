//! Typisierte Handles auf Host-Objekte.
//!
//! Alle Handles sind reine IDs ohne Besitz: Das Host-Modell besitzt die
//! eigentlichen Objekte, der Importer merkt sich nur die Referenz.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

host_id!(
    /// Vom Host erzeugtes geometrisches Element (Segment, Fitting, Bauteil)
    EntityId,
    "E"
);
host_id!(
    /// Katalog-Eintrag (Family + Typ)
    FamilyId,
    "F"
);
host_id!(
    /// Geschoss/Ebene im Host-Modell
    LevelId,
    "L"
);
host_id!(
    /// Rohrtyp für gerade Segmente
    SegmentTypeId,
    "T"
);
host_id!(
    /// Rohrsystem-Typ
    SystemTypeId,
    "S"
);

/// Katalog-Kategorie für die Family-Suche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rohrformteile (Bögen, T-Stücke, Reduzierungen)
    PipeFitting,
    /// Rohrzubehör (Armaturen, Flansche)
    PipeAccessory,
}

/// Tragwerks-Flag beim Platzieren eines Bauteils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructuralKind {
    /// Kein Tragwerksbauteil
    #[default]
    NonStructural,
    /// Tragwerksbauteil
    Structural,
}

/// Typisierte Parameter-Schlüssel anstelle von Namens-Lookups.
///
/// Der Host meldet über `ModelHost::supports_parameter`, welche Schlüssel
/// ein Element kennt. Unbekannte Schlüssel schlagen vor dem Setzen fehl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKey {
    /// Durchmesser eines geraden Rohrsegments
    PipeDiameter,
    /// Nenndurchmesser am Hauptanschluss eines Formteils
    NominalDiameter1,
    /// Nenndurchmesser am Abzweig eines Formteils
    NominalDiameter3,
}

impl ParameterKey {
    /// Anzeigename wie im Host-Katalog.
    pub fn display_name(self) -> &'static str {
        match self {
            ParameterKey::PipeDiameter => "Diameter",
            ParameterKey::NominalDiameter1 => "Nominal Diameter 1",
            ParameterKey::NominalDiameter3 => "Nominal Diameter 3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        assert_eq!(EntityId(42).to_string(), "E#42");
        assert_eq!(FamilyId(7).to_string(), "F#7");
    }

    #[test]
    fn ids_serialize_transparent() {
        let json = serde_json::to_string(&SegmentTypeId(3048519)).expect("serialisierbar");
        assert_eq!(json, "3048519");
    }
}
