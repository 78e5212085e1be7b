use serde::{Deserialize, Serialize};

use crate::map::MapSetSync;

/// View of a single map: zoom level and the geographic center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Zoom level.
    pub zoom: f64,
    /// Latitude of the center point in degrees.
    pub latitude: f64,
    /// Longitude of the center point in degrees.
    pub longitude: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl MapView {
    /// Creates a new view.
    pub fn new(zoom: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            zoom,
            latitude,
            longitude,
        }
    }

    /// Returns a copy of the view with the given zoom level.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self { zoom, ..*self }
    }

    /// Returns a copy of the view with the given center.
    pub fn with_center(&self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..*self
        }
    }

    /// Returns a copy of the view with all fields present in the `patch` overwritten.
    pub fn patched(&self, patch: &ViewPatch) -> Self {
        Self {
            zoom: patch.zoom.unwrap_or(self.zoom),
            latitude: patch.latitude.unwrap_or(self.latitude),
            longitude: patch.longitude.unwrap_or(self.longitude),
        }
    }
}

/// Partial view. Used both as a view change request and as the canonical view of a map set, where
/// only the synchronized fields are stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPatch {
    /// Zoom level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Latitude of the center point in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude of the center point in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl ViewPatch {
    /// Patch that changes only the zoom level.
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Default::default()
        }
    }

    /// Patch that changes only the center.
    pub fn center(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    /// Returns true if the patch does not change anything.
    pub fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.latitude.is_none() && self.longitude.is_none()
    }

    /// Returns a patch with the fields of `other` taking precedence over the fields of `self`.
    pub fn merged(&self, other: &ViewPatch) -> Self {
        Self {
            zoom: other.zoom.or(self.zoom),
            latitude: other.latitude.or(self.latitude),
            longitude: other.longitude.or(self.longitude),
        }
    }

    /// Keeps only the fields that are synchronized according to `sync`. `zoom` flag governs the
    /// zoom level, `center` flag governs both latitude and longitude.
    pub fn synced_part(&self, sync: &MapSetSync) -> Self {
        Self {
            zoom: self.zoom.filter(|_| sync.zoom),
            latitude: self.latitude.filter(|_| sync.center),
            longitude: self.longitude.filter(|_| sync.center),
        }
    }
}

impl From<MapView> for ViewPatch {
    fn from(value: MapView) -> Self {
        Self {
            zoom: Some(value.zoom),
            latitude: Some(value.latitude),
            longitude: Some(value.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn patched_overwrites_only_present_fields() {
        let view = MapView::new(2.0, 10.0, 20.0);
        let patched = view.patched(&ViewPatch {
            zoom: Some(5.0),
            longitude: Some(-3.0),
            ..Default::default()
        });

        assert_relative_eq!(patched.zoom, 5.0);
        assert_relative_eq!(patched.latitude, 10.0);
        assert_relative_eq!(patched.longitude, -3.0);
    }

    #[test]
    fn synced_part_follows_flags() {
        let patch = ViewPatch {
            zoom: Some(7.0),
            latitude: Some(10.0),
            longitude: None,
        };

        let zoom_only = patch.synced_part(&MapSetSync {
            zoom: true,
            center: false,
        });
        assert_eq!(zoom_only, ViewPatch::zoom(7.0));

        let center_only = patch.synced_part(&MapSetSync {
            zoom: false,
            center: true,
        });
        assert_eq!(center_only.zoom, None);
        assert_eq!(center_only.latitude, Some(10.0));
        assert!(patch.synced_part(&MapSetSync::default()).is_empty());
    }

    #[test]
    fn merged_prefers_other() {
        let merged = ViewPatch::center(1.0, 2.0).merged(&ViewPatch {
            zoom: Some(3.0),
            latitude: Some(4.0),
            longitude: None,
        });

        assert_eq!(
            merged,
            ViewPatch {
                zoom: Some(3.0),
                latitude: Some(4.0),
                longitude: Some(2.0),
            }
        );
    }
}
