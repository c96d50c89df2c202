//! Domain types shared across the storage, HTTP, and viewer layers.
//!
//! All types derive Serialize/Deserialize for JSON serialization. Wire field
//! names are camelCase (`orbitalRadius`, `imageSrc`), matching what the
//! single-page client expects.

use serde::{Deserialize, Serialize};

/// Celestial body identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub i64);

impl BodyId {
    pub fn new(value: i64) -> Self {
        BodyId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A celestial body as stored in the catalog and returned by the API.
///
/// `radius` is the visual draw radius, not a physical size. `orbital_radius`
/// and `orbital_speed` drive the client animation: distance from the central
/// body in catalog units, and radians advanced per rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    /// Store-assigned identifier, opaque to clients.
    pub id: BodyId,
    /// Unique display name, surrounding whitespace trimmed on insert.
    pub name: String,
    pub description: String,
    /// Visual draw radius, >= 1.
    pub radius: f64,
    /// Distance from the central body, >= 0. Zero only for the central body.
    pub orbital_radius: f64,
    /// Angular increment per rendered frame, in radians, >= 0.
    pub orbital_speed: f64,
    /// Fallback appearance when no image is available.
    pub color: String,
    /// Optional bitmap path; the client falls back to a filled circle of
    /// `color` when absent or unloadable.
    #[serde(default)]
    pub image_src: Option<String>,
}

impl CelestialBody {
    /// Whether this record is the central, non-orbiting body.
    ///
    /// The catalog holds exactly one record with a zero orbital radius.
    pub fn is_central(&self) -> bool {
        self.orbital_radius == 0.0
    }
}

/// A celestial body awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCelestialBody {
    pub name: String,
    pub description: String,
    pub radius: f64,
    pub orbital_radius: f64,
    pub orbital_speed: f64,
    pub color: String,
    #[serde(default)]
    pub image_src: Option<String>,
}

impl NewCelestialBody {
    /// Attach a store-assigned id, trimming the name as the store requires.
    pub fn into_body(self, id: BodyId) -> CelestialBody {
        CelestialBody {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            radius: self.radius,
            orbital_radius: self.orbital_radius,
            orbital_speed: self.orbital_speed,
            color: self.color,
            image_src: self.image_src,
        }
    }
}

/// Sentinel returned by `/api/podname` when the environment provides no
/// identity. Returned with status 200; an unset identity is not a failure.
pub const POD_NAME_SENTINEL: &str =
    "Not running in Kubernetes or POD_NAME environment variable not set.";

/// Response for the host/pod identity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodNameResponse {
    pub pod_name: String,
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
