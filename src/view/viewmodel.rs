//! View model types and the pure view composition function.
//!
//! This module derives the renderable representation of the map from the
//! current state: a marker list, an optional info overlay, and the camera.
//! The composer holds no state of its own and is invoked on every state
//! change; the render surface consumes the result as-is.

use crate::domain::{Category, MapPosition, Pin};
use crate::view::icons::MarkerIcon;

/// Default camera center before a device position is known: the fixed world
/// view.
pub const WORLD_VIEW_CENTER: MapPosition = MapPosition::new(20.0, 0.0);

/// Fixed default zoom level; no dynamic zoom-to-fit is in scope.
pub const DEFAULT_ZOOM: u8 = 3;

/// A positioned, iconified point for the render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Marker coordinates.
    pub position: MapPosition,
    /// Glyph drawn at the position.
    pub icon: MarkerIcon,
    /// Store key of the underlying pin; `None` for the user-position marker,
    /// which reports no click events.
    pub pin_id: Option<String>,
}

/// Detail overlay bound to the selected pin, positioned at its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoOverlay {
    /// Overlay anchor: the selected pin's coordinates.
    pub position: MapPosition,
    /// Selected pin's title.
    pub title: String,
    /// Selected pin's description.
    pub description: String,
    /// Selected pin's category.
    pub category: Category,
    /// Display name of the pin's author.
    pub author: String,
}

/// Complete renderable state of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewModel {
    /// Filtered pin markers plus the optional user-position marker.
    pub markers: Vec<Marker>,
    /// Detail overlay for the resolved selection, if any.
    pub info_overlay: Option<InfoOverlay>,
    /// Camera center: the device position if known, the world view otherwise.
    pub center: MapPosition,
    /// Camera zoom level.
    pub zoom: u8,
}

/// Composes the view model from the filtered pin set, the resolved selection,
/// and the device position.
///
/// Pure: equal inputs always produce an equal view model. The selection is
/// expected to be already resolved against the current pin set, so a stale
/// pin can never appear in the overlay.
#[must_use]
pub fn compose(
    pins: &[&Pin],
    selected: Option<&Pin>,
    user_position: Option<MapPosition>,
) -> MapViewModel {
    let mut markers: Vec<Marker> = Vec::with_capacity(pins.len() + 1);

    if let Some(position) = user_position {
        markers.push(Marker {
            position,
            icon: MarkerIcon::User,
            pin_id: None,
        });
    }

    markers.extend(pins.iter().map(|pin| Marker {
        position: pin.position(),
        icon: MarkerIcon::for_category(pin.category),
        pin_id: Some(pin.id.clone()),
    }));

    let info_overlay = selected.map(|pin| InfoOverlay {
        position: pin.position(),
        title: pin.title.clone(),
        description: pin.description.clone(),
        category: pin.category,
        author: pin.user_name.clone(),
    });

    MapViewModel {
        markers,
        info_overlay,
        center: user_position.unwrap_or(WORLD_VIEW_CENTER),
        zoom: DEFAULT_ZOOM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(id: &str, category: Category, lat: f64, lng: f64) -> Pin {
        Pin {
            id: id.to_string(),
            title: format!("title-{id}"),
            description: format!("description-{id}"),
            category,
            lat,
            lng,
            user_id: "anonymous-user".to_string(),
            user_name: "User7".to_string(),
            timestamp: 1000,
        }
    }

    #[test]
    fn markers_carry_category_icons_and_pin_ids() {
        let a = pin("a", Category::Food, 10.0, 20.0);
        let b = pin("b", Category::Landmark, 30.0, 40.0);
        let vm = compose(&[&a, &b], None, None);

        assert_eq!(vm.markers.len(), 2);
        assert_eq!(vm.markers[0].icon, MarkerIcon::Food);
        assert_eq!(vm.markers[0].pin_id.as_deref(), Some("a"));
        assert_eq!(vm.markers[1].icon, MarkerIcon::Landmark);
        assert_eq!(vm.markers[1].position, MapPosition::new(30.0, 40.0));
    }

    #[test]
    fn user_position_adds_a_marker_and_recenters() {
        let here = MapPosition::new(48.0, 11.0);
        let vm = compose(&[], None, Some(here));

        assert_eq!(vm.markers.len(), 1);
        assert_eq!(vm.markers[0].icon, MarkerIcon::User);
        assert!(vm.markers[0].pin_id.is_none());
        assert_eq!(vm.center, here);
    }

    #[test]
    fn default_camera_without_a_position() {
        let vm = compose(&[], None, None);
        assert_eq!(vm.center, WORLD_VIEW_CENTER);
        assert_eq!(vm.zoom, DEFAULT_ZOOM);
        assert!(vm.markers.is_empty());
        assert!(vm.info_overlay.is_none());
    }

    #[test]
    fn overlay_binds_the_selected_pin() {
        let a = pin("a", Category::Hidden, 10.0, 20.0);
        let vm = compose(&[&a], Some(&a), None);

        let overlay = vm.info_overlay.unwrap();
        assert_eq!(overlay.position, MapPosition::new(10.0, 20.0));
        assert_eq!(overlay.title, "title-a");
        assert_eq!(overlay.description, "description-a");
        assert_eq!(overlay.category, Category::Hidden);
        assert_eq!(overlay.author, "User7");
    }
}
