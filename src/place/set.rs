//! Proximity-merging collection of locations.

use log::trace;

use super::types::Location;
use crate::geo::{dist_gps_with_radius, EARTH_RADIUS_M};

/// Default distance in meters below which two points are the same place.
pub const DEFAULT_THRESHOLD_M: f64 = 300.0;

/// Ordered set of locations; insertion order is rendering order.
#[derive(Debug, Clone)]
pub struct LocationSet {
    threshold: f64,
    radius: f64,
    locations: Vec<Location>,
}

impl Default for LocationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSet {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_M)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            radius: EARTH_RADIUS_M,
            locations: Vec::new(),
        }
    }

    /// Override the sphere radius used for distances (meters).
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Add a location, or fold its labels into the first stored location
    /// closer than the threshold. Merges are never transitive.
    pub fn add(&mut self, new_loc: Location) {
        let radius = self.radius;
        let threshold = self.threshold;
        let nearby = self.locations.iter_mut().find(|loc| {
            dist_gps_with_radius(loc.lat, loc.lon, new_loc.lat, new_loc.lon, radius) < threshold
        });

        match nearby {
            Some(existing) => {
                trace!(
                    "merging ({}, {}) into ({}, {})",
                    new_loc.lat, new_loc.lon, existing.lat, existing.lon
                );
                existing.labels.extend(new_loc.labels);
            }
            None => self.locations.push(new_loc),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn into_locations(self) -> Vec<Location> {
        self.locations
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
