//! Ergebnis-Typen der Element-Builder.

use crate::host::HostError;

/// Fehlerart eines fehlgeschlagenen Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Katalog-Eintrag (Family + Typ) fehlt
    FamilyNotFound,
    /// Kein Connector an einem Fitting-Endpunkt auflösbar
    ConnectorUnresolved,
    /// Host konnte ein Element nicht erzeugen
    BackendCreationFailure,
    /// Unerwarteter Host-Fehler
    UnexpectedFault,
}

/// Fehler beim Erzeugen eines einzelnen Elements.
///
/// Jede Variante trägt die Quellposition, damit die Meldung auf den
/// ursprünglichen Datensatz zurückführt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Katalog-Eintrag fehlt
    #[error("Family und Typ '{family}' für {element_type} an Position {position} nicht gefunden")]
    FamilyNotFound {
        /// Quellposition
        position: u32,
        /// PCF-Typ des Elements
        element_type: String,
        /// Gesuchter Katalog-Name
        family: String,
    },
    /// Connector nicht auflösbar
    #[error("Connector an {endpoint} für Element an Position {position} nicht auflösbar: {reason}")]
    ConnectorUnresolved {
        /// Quellposition
        position: u32,
        /// Betroffener Endpunkt (Schlüsselwort)
        endpoint: String,
        /// Ursache
        reason: String,
    },
    /// Host-Erzeugung fehlgeschlagen
    #[error("Erzeugung für Element an Position {position} fehlgeschlagen: {source}")]
    BackendCreationFailure {
        /// Quellposition
        position: u32,
        /// Host-Fehler
        source: HostError,
    },
    /// Unerwarteter Host-Fehler
    #[error("Unerwarteter Fehler bei Element an Position {position}: {message}")]
    UnexpectedFault {
        /// Quellposition
        position: u32,
        /// Beschreibung
        message: String,
    },
}

impl BuildError {
    /// Bildet einen Host-Fehler auf die passende Fehlerart ab.
    pub fn from_host(position: u32, error: HostError) -> Self {
        match error {
            HostError::CreationFailed(_) => BuildError::BackendCreationFailure {
                position,
                source: error,
            },
            other => BuildError::UnexpectedFault {
                position,
                message: other.to_string(),
            },
        }
    }

    /// Fehlerart
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::FamilyNotFound { .. } => ErrorKind::FamilyNotFound,
            BuildError::ConnectorUnresolved { .. } => ErrorKind::ConnectorUnresolved,
            BuildError::BackendCreationFailure { .. } => ErrorKind::BackendCreationFailure,
            BuildError::UnexpectedFault { .. } => ErrorKind::UnexpectedFault,
        }
    }

    /// Quellposition des fehlgeschlagenen Elements
    pub fn position(&self) -> u32 {
        match self {
            BuildError::FamilyNotFound { position, .. }
            | BuildError::ConnectorUnresolved { position, .. }
            | BuildError::BackendCreationFailure { position, .. }
            | BuildError::UnexpectedFault { position, .. } => *position,
        }
    }
}
