//! API request and response types.

use serde::{Deserialize, Serialize};

/// A trip to advise on.
///
/// Wire field names (`fromm`, `dest`, `vehicule`, `time`) are the contract
/// the frontend already speaks.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TripRequest {
    /// Current location
    #[serde(rename = "fromm")]
    pub origin: String,

    #[serde(rename = "dest")]
    pub destination: String,

    #[serde(rename = "vehicule")]
    pub vehicle_type: String,

    #[serde(rename = "time")]
    pub departure_time: String,
}

/// Response of the tool-loop endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub result: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}
