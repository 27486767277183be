//! Headless map SDK keeping overlays in memory.

use std::collections::{BTreeMap, HashMap, VecDeque};

use geodraw_types::geo::impls::GeoPoint2d;
use geodraw_types::geo::LatLngBounds;
use geodraw_types::ShapeKind;
use thiserror::Error;

use super::{ListenerId, MapOptions, MapSdk, SdkEvent, ShapeEvent, ShapeStyle, ShapeStyles};
use crate::drawing_mode::DrawingMode;
use crate::normalize::{NativeShape, ShapeSnapshot};

/// Handle of an overlay in [`MemorySdk`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryOverlay(u64);

/// Error of a simulated user action in [`MemorySdk`].
#[derive(Debug, Error, PartialEq)]
pub enum MemorySdkError {
    /// The current drawing tool cannot draw this kind of shape.
    #[error("drawing mode {mode} cannot draw a {kind} shape")]
    WrongMode {
        /// Active drawing mode.
        mode: DrawingMode,
        /// Kind of the shape that was drawn.
        kind: ShapeKind,
    },
    /// Overlay does not exist.
    #[error("overlay {0:?} does not exist")]
    NoOverlay(MemoryOverlay),
    /// Overlay has no such property.
    #[error("overlay {0:?} has no {1}")]
    WrongShape(MemoryOverlay, &'static str),
    /// Vertex index is out of range.
    #[error("vertex index {0} is out of range")]
    VertexIndex(usize),
    /// Drawing was detached from the map.
    #[error("drawing is detached from the map")]
    Detached,
}

struct OverlayEntry {
    shape: ShapeSnapshot,
    style: ShapeStyle,
}

/// In-memory implementation of [`MapSdk`].
///
/// The SDK has no rendering. It stores overlays, listeners and the drawing state, and provides methods simulating
/// user actions (drawing and editing shapes). Every action queues the same events a real map SDK would fire; they
/// are handed to the drawing manager through [`MapSdk::drain_events`].
///
/// Change events are only queued for overlays with a listener of the matching [`ShapeEvent`], once per listener.
#[derive(Default)]
pub struct MemorySdk {
    overlays: BTreeMap<MemoryOverlay, OverlayEntry>,
    listeners: HashMap<ListenerId, (MemoryOverlay, ShapeEvent)>,
    next_overlay: u64,
    next_listener: u64,
    drawing_mode: DrawingMode,
    map_options: Option<MapOptions>,
    styles: ShapeStyles,
    events: VecDeque<SdkEvent<MemoryOverlay>>,
    detached: bool,
}

impl MemorySdk {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user drawing a shape with the active tool.
    ///
    /// Fails if the active drawing mode is not the mode for the kind of the shape.
    pub fn draw(&mut self, shape: ShapeSnapshot) -> Result<MemoryOverlay, MemorySdkError> {
        let kind = shape.kind();
        if self.drawing_mode != DrawingMode::Drawing(kind) {
            return Err(MemorySdkError::WrongMode {
                mode: self.drawing_mode,
                kind,
            });
        }

        self.complete_overlay(kind.overlay_type(), shape)
    }

    /// Adds an overlay and reports its completion with the given SDK overlay type name, whatever the drawing mode
    /// is.
    pub fn complete_overlay(
        &mut self,
        overlay_type: &str,
        shape: ShapeSnapshot,
    ) -> Result<MemoryOverlay, MemorySdkError> {
        self.check_attached()?;

        let style = *self.styles.get(shape.kind());
        let overlay = self.insert(shape, style);
        self.events.push_back(SdkEvent::OverlayComplete {
            overlay,
            overlay_type: overlay_type.to_string(),
        });

        log::debug!("Overlay {overlay:?} of type {overlay_type} is drawn");
        Ok(overlay)
    }

    /// Moves a path vertex.
    pub fn set_vertex(
        &mut self,
        overlay: MemoryOverlay,
        index: usize,
        point: GeoPoint2d,
    ) -> Result<(), MemorySdkError> {
        let path = self.path_mut(overlay)?;
        let vertex = path
            .get_mut(index)
            .ok_or(MemorySdkError::VertexIndex(index))?;
        *vertex = point;

        self.fire(overlay, ShapeEvent::PathSetAt);
        Ok(())
    }

    /// Inserts a vertex into a path before the given index.
    pub fn insert_vertex(
        &mut self,
        overlay: MemoryOverlay,
        index: usize,
        point: GeoPoint2d,
    ) -> Result<(), MemorySdkError> {
        let path = self.path_mut(overlay)?;
        if index > path.len() {
            return Err(MemorySdkError::VertexIndex(index));
        }
        path.insert(index, point);

        self.fire(overlay, ShapeEvent::PathInsertAt);
        Ok(())
    }

    /// Removes a path vertex.
    pub fn remove_vertex(
        &mut self,
        overlay: MemoryOverlay,
        index: usize,
    ) -> Result<(), MemorySdkError> {
        let path = self.path_mut(overlay)?;
        if index >= path.len() {
            return Err(MemorySdkError::VertexIndex(index));
        }
        path.remove(index);

        self.fire(overlay, ShapeEvent::PathRemoveAt);
        Ok(())
    }

    /// Moves the center of a circle.
    pub fn set_center(
        &mut self,
        overlay: MemoryOverlay,
        point: GeoPoint2d,
    ) -> Result<(), MemorySdkError> {
        match &mut self.entry_mut(overlay)?.shape {
            ShapeSnapshot::Circle { center, .. } => *center = point,
            _ => return Err(MemorySdkError::WrongShape(overlay, "center")),
        }

        self.fire(overlay, ShapeEvent::CenterChanged);
        Ok(())
    }

    /// Changes the radius of a circle.
    pub fn set_radius(&mut self, overlay: MemoryOverlay, value: f64) -> Result<(), MemorySdkError> {
        match &mut self.entry_mut(overlay)?.shape {
            ShapeSnapshot::Circle { radius, .. } => *radius = value,
            _ => return Err(MemorySdkError::WrongShape(overlay, "radius")),
        }

        self.fire(overlay, ShapeEvent::RadiusChanged);
        Ok(())
    }

    /// Changes the bounds of a rectangle.
    pub fn set_bounds(
        &mut self,
        overlay: MemoryOverlay,
        value: LatLngBounds,
    ) -> Result<(), MemorySdkError> {
        match &mut self.entry_mut(overlay)?.shape {
            ShapeSnapshot::Rectangle { bounds } => *bounds = value,
            _ => return Err(MemorySdkError::WrongShape(overlay, "bounds")),
        }

        self.fire(overlay, ShapeEvent::BoundsChanged);
        Ok(())
    }

    /// Moves a marker.
    pub fn set_position(
        &mut self,
        overlay: MemoryOverlay,
        point: GeoPoint2d,
    ) -> Result<(), MemorySdkError> {
        match &mut self.entry_mut(overlay)?.shape {
            ShapeSnapshot::Marker { position } => *position = point,
            _ => return Err(MemorySdkError::WrongShape(overlay, "position")),
        }

        self.fire(overlay, ShapeEvent::PositionChanged);
        Ok(())
    }

    /// Active drawing tool.
    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing_mode
    }

    /// Map options last applied to the map.
    pub fn map_options(&self) -> Option<&MapOptions> {
        self.map_options.as_ref()
    }

    /// Styles new shapes are drawn with.
    pub fn shape_styles(&self) -> &ShapeStyles {
        &self.styles
    }

    /// Handles of all overlays on the map in creation order.
    pub fn overlays(&self) -> impl Iterator<Item = MemoryOverlay> + '_ {
        self.overlays.keys().copied()
    }

    /// Number of overlays on the map.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Current state of the overlay.
    pub fn snapshot(&self, overlay: MemoryOverlay) -> Option<&ShapeSnapshot> {
        self.overlays.get(&overlay).map(|entry| &entry.shape)
    }

    /// Style the overlay is rendered with.
    pub fn style(&self, overlay: MemoryOverlay) -> Option<&ShapeStyle> {
        self.overlays.get(&overlay).map(|entry| &entry.style)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Events listened to on the given overlay, one entry per listener.
    pub fn listened_events(&self, overlay: MemoryOverlay) -> Vec<ShapeEvent> {
        let mut events: Vec<_> = self
            .listeners
            .iter()
            .filter(|(_, (o, _))| *o == overlay)
            .map(|(id, (_, event))| (*id, *event))
            .collect();
        events.sort_by_key(|(id, _)| *id);
        events.into_iter().map(|(_, event)| event).collect()
    }

    /// Returns true if the drawing support was detached from the map.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn check_attached(&self) -> Result<(), MemorySdkError> {
        if self.detached {
            Err(MemorySdkError::Detached)
        } else {
            Ok(())
        }
    }

    fn insert(&mut self, shape: ShapeSnapshot, style: ShapeStyle) -> MemoryOverlay {
        let overlay = MemoryOverlay(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.insert(overlay, OverlayEntry { shape, style });

        overlay
    }

    fn entry_mut(&mut self, overlay: MemoryOverlay) -> Result<&mut OverlayEntry, MemorySdkError> {
        self.check_attached()?;
        self.overlays
            .get_mut(&overlay)
            .ok_or(MemorySdkError::NoOverlay(overlay))
    }

    fn path_mut(&mut self, overlay: MemoryOverlay) -> Result<&mut Vec<GeoPoint2d>, MemorySdkError> {
        match &mut self.entry_mut(overlay)?.shape {
            ShapeSnapshot::Polyline { path } | ShapeSnapshot::Polygon { path } => Ok(path),
            _ => Err(MemorySdkError::WrongShape(overlay, "path")),
        }
    }

    fn fire(&mut self, overlay: MemoryOverlay, event: ShapeEvent) {
        let listener_count = self
            .listeners
            .values()
            .filter(|subscription| **subscription == (overlay, event))
            .count();

        for _ in 0..listener_count {
            self.events
                .push_back(SdkEvent::ShapeChanged { overlay, event });
        }
    }
}

impl MapSdk for MemorySdk {
    type Overlay = MemoryOverlay;

    fn apply_map_options(&mut self, options: &MapOptions) {
        self.map_options = Some(options.clone());
    }

    fn set_shape_styles(&mut self, styles: &ShapeStyles) {
        self.styles = styles.clone();
    }

    fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.drawing_mode = mode;
    }

    fn shape(&self, overlay: &Self::Overlay) -> Option<&dyn NativeShape> {
        self.overlays
            .get(overlay)
            .map(|entry| &entry.shape as &dyn NativeShape)
    }

    fn add_overlay(
        &mut self,
        kind: ShapeKind,
        path: Vec<GeoPoint2d>,
        style: &ShapeStyle,
    ) -> Option<Self::Overlay> {
        let shape = match kind {
            ShapeKind::Line => ShapeSnapshot::Polyline { path },
            ShapeKind::Polygon => ShapeSnapshot::Polygon { path },
            _ => return None,
        };

        Some(self.insert(shape, *style))
    }

    fn remove_overlay(&mut self, overlay: &Self::Overlay) {
        self.overlays.remove(overlay);
    }

    fn add_listener(&mut self, overlay: &Self::Overlay, event: ShapeEvent) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (*overlay, event));

        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn detach(&mut self) {
        self.detached = true;
        self.drawing_mode = DrawingMode::Idle;
        self.events.clear();
    }

    fn drain_events(&mut self) -> Vec<SdkEvent<Self::Overlay>> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::path_from_latlon;
    use assert_matches::assert_matches;
    use geodraw_types::latlon;

    fn polygon() -> ShapeSnapshot {
        ShapeSnapshot::Polygon {
            path: path_from_latlon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
        }
    }

    #[test]
    fn drawing_needs_matching_mode() {
        let mut sdk = MemorySdk::new();
        assert_matches!(
            sdk.draw(polygon()),
            Err(MemorySdkError::WrongMode {
                mode: DrawingMode::Idle,
                kind: ShapeKind::Polygon
            })
        );

        sdk.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Polygon));
        let overlay = sdk.draw(polygon()).expect("polygon tool is active");
        assert_eq!(
            sdk.drain_events(),
            vec![SdkEvent::OverlayComplete {
                overlay,
                overlay_type: "polygon".to_string()
            }]
        );
        assert_eq!(sdk.style(overlay), Some(&ShapeStyles::default().polygon));
    }

    #[test]
    fn edits_fire_only_for_listeners() {
        let mut sdk = MemorySdk::new();
        sdk.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Polygon));
        let overlay = sdk.draw(polygon()).expect("polygon tool is active");
        sdk.drain_events();

        sdk.set_vertex(overlay, 0, latlon!(0.5, 0.5))
            .expect("vertex exists");
        assert!(sdk.drain_events().is_empty());

        let listener = sdk.add_listener(&overlay, ShapeEvent::PathInsertAt);
        sdk.insert_vertex(overlay, 3, latlon!(1.0, 0.0))
            .expect("append is allowed");
        sdk.set_vertex(overlay, 0, latlon!(0.0, 0.0))
            .expect("vertex exists");
        assert_eq!(
            sdk.drain_events(),
            vec![SdkEvent::ShapeChanged {
                overlay,
                event: ShapeEvent::PathInsertAt
            }]
        );

        sdk.remove_listener(listener);
        sdk.insert_vertex(overlay, 0, latlon!(2.0, 2.0))
            .expect("prepend is allowed");
        assert!(sdk.drain_events().is_empty());
        assert_eq!(
            sdk.shape(&overlay).and_then(|s| s.path()).map(|p| p.len()),
            Some(5)
        );
    }

    #[test]
    fn invalid_edits() {
        let mut sdk = MemorySdk::new();
        sdk.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Polygon));
        let overlay = sdk.draw(polygon()).expect("polygon tool is active");

        assert_eq!(
            sdk.remove_vertex(overlay, 3),
            Err(MemorySdkError::VertexIndex(3))
        );
        assert_eq!(
            sdk.set_radius(overlay, 10.0),
            Err(MemorySdkError::WrongShape(overlay, "radius"))
        );

        sdk.remove_overlay(&overlay);
        assert_eq!(
            sdk.set_vertex(overlay, 0, latlon!(0.0, 0.0)),
            Err(MemorySdkError::NoOverlay(overlay))
        );
    }

    #[test]
    fn add_overlay_supports_paths_only() {
        let mut sdk = MemorySdk::new();
        let style = ShapeStyles::default().polyline;
        let path = path_from_latlon(&[(0.0, 0.0), (1.0, 1.0)]);

        assert!(sdk
            .add_overlay(ShapeKind::Line, path.clone(), &style)
            .is_some());
        assert!(sdk
            .add_overlay(ShapeKind::Circle, path.clone(), &style)
            .is_none());
        assert!(sdk
            .add_overlay(ShapeKind::Rectangle, path, &style)
            .is_none());
        assert_eq!(sdk.overlay_count(), 1);
        assert!(sdk.drain_events().is_empty());
    }

    #[test]
    fn detached_sdk_rejects_actions() {
        let mut sdk = MemorySdk::new();
        sdk.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Polygon));
        sdk.detach();

        assert!(sdk.is_detached());
        assert_eq!(sdk.drawing_mode(), DrawingMode::Idle);
        assert_eq!(
            sdk.complete_overlay("polygon", polygon()),
            Err(MemorySdkError::Detached)
        );
    }
}
