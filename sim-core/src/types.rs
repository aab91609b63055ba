//! Wire and domain types shared across pipeline stages.
//!
//! The Spanish JSON keys are the contract with the model prompt and the
//! map script; the serde renames keep the Rust field names readable while
//! preserving that contract byte-for-byte.

use serde::{Deserialize, Serialize};

/// One web-search result, in the compact shape embedded into the model
/// prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "c")]
    pub excerpt: String,
}

/// A single traffic incident as structured by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Free-text severity label. Only the exact value `"Alta"` gets the
    /// alert marker color downstream; everything else is treated alike.
    #[serde(rename = "gravedad")]
    pub severity: String,
}

/// The parsed model output. Both fields are required; a response missing
/// either one fails deserialization and aborts the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    #[serde(rename = "resumen_general")]
    pub summary: String,
    #[serde(rename = "incidentes_lista")]
    pub incidents: Vec<Incident>,
}
