//! Shared primitive types used across the dispatch core.

use serde::{Deserialize, Serialize};

/// A stable, unique identifier for a staff member.
pub type StaffId = String;

/// A stable, unique identifier for an assignable item (complaint or task).
pub type ItemId = String;

/// A stable, unique identifier for an assignment link.
pub type AssignmentId = String;

/// A service category identifier (roads, sanitation, noise, ...).
pub type CategoryId = String;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
