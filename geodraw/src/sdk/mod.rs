//! Boundary between the drawing manager and the map SDK that renders the map and lets the user draw shapes.
//!
//! The SDK owns the overlays (drawn shapes) and exposes them through opaque [`MapSdk::Overlay`] handles. The
//! drawing manager never owns shape geometry, it only reads it through [`NativeShape`] accessors when a change must
//! be emitted.
//!
//! Events flow from the SDK to the manager as [`SdkEvent`]s. An SDK can either push them directly into
//! [`DrawingManager::handle_event`](crate::DrawingManager::handle_event) from its own callbacks, or queue them and
//! hand them out through [`MapSdk::drain_events`].

use std::fmt::Debug;
use std::hash::Hash;

use geodraw_types::geo::impls::GeoPoint2d;
use geodraw_types::ShapeKind;

use crate::drawing_mode::DrawingMode;
use crate::normalize::NativeShape;

mod memory;
mod options;

pub use memory::{MemoryOverlay, MemorySdk, MemorySdkError};
pub use options::{MapOptions, ShapeStyle, ShapeStyles};

/// Handle of an event listener registered in the SDK.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Creates a new listener handle. Handles are only compared with each other, the value has no other meaning.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value of the handle.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Change of a drawn shape the manager can listen to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeEvent {
    /// A path vertex was moved.
    PathSetAt,
    /// A vertex was inserted into the path.
    PathInsertAt,
    /// A vertex was removed from the path.
    PathRemoveAt,
    /// Center of a circle moved.
    CenterChanged,
    /// Radius of a circle changed.
    RadiusChanged,
    /// Bounds of a rectangle changed.
    BoundsChanged,
    /// A marker was moved.
    PositionChanged,
}

impl ShapeEvent {
    /// Events that change the geometry of a shape of the given kind.
    pub fn for_kind(kind: ShapeKind) -> &'static [ShapeEvent] {
        match kind {
            ShapeKind::Line | ShapeKind::Polygon => &[
                ShapeEvent::PathSetAt,
                ShapeEvent::PathInsertAt,
                ShapeEvent::PathRemoveAt,
            ],
            ShapeKind::Circle => &[ShapeEvent::CenterChanged, ShapeEvent::RadiusChanged],
            ShapeKind::Rectangle => &[ShapeEvent::BoundsChanged],
            ShapeKind::Point => &[ShapeEvent::PositionChanged],
        }
    }
}

/// Event reported by the SDK.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkEvent<O> {
    /// The user finished drawing a new overlay.
    OverlayComplete {
        /// Handle of the new overlay.
        overlay: O,
        /// SDK name of the overlay type (`"polygon"`, `"polyline"`, `"circle"`, `"rectangle"`, `"marker"`, ...).
        overlay_type: String,
    },
    /// A listened-to overlay changed.
    ShapeChanged {
        /// Handle of the changed overlay.
        overlay: O,
        /// What changed.
        event: ShapeEvent,
    },
}

/// Map surface with drawing support.
pub trait MapSdk {
    /// Handle of an overlay on the map. Handles are compared by identity of the overlay.
    type Overlay: Clone + Eq + Hash + Debug;

    /// Passes map options (center, zoom, map id, controls) to the map.
    fn apply_map_options(&mut self, options: &MapOptions);

    /// Sets styles of newly drawn shapes.
    fn set_shape_styles(&mut self, styles: &ShapeStyles);

    /// Switches the drawing tool. Switching to [`DrawingMode::Idle`] abandons a shape that is being drawn.
    fn set_drawing_mode(&mut self, mode: DrawingMode);

    /// Accessors of the overlay's current geometry. `None` if the overlay does not exist anymore.
    fn shape(&self, overlay: &Self::Overlay) -> Option<&dyn NativeShape>;

    /// Creates an overlay of the given kind from a path and adds it to the map.
    ///
    /// Only called for kinds with a path (lines and polygons). Returns `None` if the overlay cannot be created.
    fn add_overlay(
        &mut self,
        kind: ShapeKind,
        path: Vec<GeoPoint2d>,
        style: &ShapeStyle,
    ) -> Option<Self::Overlay>;

    /// Removes the overlay from the map.
    fn remove_overlay(&mut self, overlay: &Self::Overlay);

    /// Starts listening to the given change of the overlay.
    fn add_listener(&mut self, overlay: &Self::Overlay, event: ShapeEvent) -> ListenerId;

    /// Stops listening. Removing an unknown listener does nothing.
    fn remove_listener(&mut self, listener: ListenerId);

    /// Unbinds the drawing support from the map. Called once when the drawing manager is torn down.
    fn detach(&mut self);

    /// Takes all events queued since the last call.
    ///
    /// SDKs that push events directly into the manager can use the default implementation.
    fn drain_events(&mut self) -> Vec<SdkEvent<Self::Overlay>> {
        vec![]
    }
}

impl<T: MapSdk + ?Sized> MapSdk for &mut T {
    type Overlay = T::Overlay;

    fn apply_map_options(&mut self, options: &MapOptions) {
        (**self).apply_map_options(options)
    }

    fn set_shape_styles(&mut self, styles: &ShapeStyles) {
        (**self).set_shape_styles(styles)
    }

    fn set_drawing_mode(&mut self, mode: DrawingMode) {
        (**self).set_drawing_mode(mode)
    }

    fn shape(&self, overlay: &Self::Overlay) -> Option<&dyn NativeShape> {
        (**self).shape(overlay)
    }

    fn add_overlay(
        &mut self,
        kind: ShapeKind,
        path: Vec<GeoPoint2d>,
        style: &ShapeStyle,
    ) -> Option<Self::Overlay> {
        (**self).add_overlay(kind, path, style)
    }

    fn remove_overlay(&mut self, overlay: &Self::Overlay) {
        (**self).remove_overlay(overlay)
    }

    fn add_listener(&mut self, overlay: &Self::Overlay, event: ShapeEvent) -> ListenerId {
        (**self).add_listener(overlay, event)
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        (**self).remove_listener(listener)
    }

    fn detach(&mut self) {
        (**self).detach()
    }

    fn drain_events(&mut self) -> Vec<SdkEvent<Self::Overlay>> {
        (**self).drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listened_events_per_kind() {
        assert_eq!(ShapeEvent::for_kind(ShapeKind::Polygon).len(), 3);
        assert_eq!(
            ShapeEvent::for_kind(ShapeKind::Line),
            ShapeEvent::for_kind(ShapeKind::Polygon)
        );
        assert_eq!(
            ShapeEvent::for_kind(ShapeKind::Circle),
            &[ShapeEvent::CenterChanged, ShapeEvent::RadiusChanged]
        );
        assert_eq!(
            ShapeEvent::for_kind(ShapeKind::Rectangle),
            &[ShapeEvent::BoundsChanged]
        );
        assert_eq!(
            ShapeEvent::for_kind(ShapeKind::Point),
            &[ShapeEvent::PositionChanged]
        );
    }
}
