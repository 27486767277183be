//! Identity tracking of drawn shapes.

use std::collections::HashMap;
use std::hash::Hash;

use geodraw_types::{FeatureId, FeatureRecord, Geometry, ShapeKind};

use crate::error::GeodrawError;
use crate::id::{IdConfig, IdGenerator};
use crate::sdk::{ListenerId, MapSdk, ShapeEvent, ShapeStyles};

/// Shape registered in an [`IdentityTracker`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedShape<O> {
    overlay: O,
    kind: ShapeKind,
    listeners: Vec<ListenerId>,
}

impl<O> TrackedShape<O> {
    /// Handle of the SDK overlay.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Kind of the shape.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Change listeners registered for the shape.
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}

/// Result of [`IdentityTracker::rehydrate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rehydration<O> {
    /// A new overlay was created on the map and registered under the record id.
    Added(O),
    /// A shape with the record id is already tracked. Nothing was changed.
    AlreadyTracked,
    /// Shapes of the record kind cannot be recreated (circles, rectangles and points).
    UnsupportedKind,
    /// Record geometry does not match its kind.
    InvalidGeometry,
    /// The SDK could not create the overlay.
    Rejected,
}

/// Two-way mapping between feature ids and SDK overlays.
///
/// The id side owns the entries: every entry is created and removed through its id, and the overlay side is only a
/// back reference kept in sync with it. Each tracked overlay has exactly one id and each id maps to exactly one
/// overlay.
#[derive(Debug)]
pub struct IdentityTracker<O> {
    ids: IdGenerator,
    shapes: HashMap<FeatureId, TrackedShape<O>>,
    overlay_ids: HashMap<O, FeatureId>,
}

impl<O> Default for IdentityTracker<O> {
    fn default() -> Self {
        Self::new(IdConfig::default())
    }
}

impl<O> IdentityTracker<O> {
    /// Creates an empty tracker generating ids with the given configuration.
    pub fn new(id_config: IdConfig) -> Self {
        Self {
            ids: IdGenerator::new(id_config),
            shapes: HashMap::new(),
            overlay_ids: HashMap::new(),
        }
    }

    /// Configuration of generated ids.
    pub fn id_config(&self) -> &IdConfig {
        self.ids.config()
    }

    /// Tracked shape with the given id.
    pub fn get(&self, id: &FeatureId) -> Option<&TrackedShape<O>> {
        self.shapes.get(id)
    }

    /// Returns true if a shape with the given id is tracked.
    pub fn contains(&self, id: &FeatureId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Returns true if the id was ever used in this tracker, even if the shape was released since.
    pub fn is_issued(&self, id: &FeatureId) -> bool {
        self.ids.is_issued(id)
    }

    /// Iterates over all tracked shapes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &TrackedShape<O>)> {
        self.shapes.iter()
    }

    /// Number of tracked shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if no shapes are tracked.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl<O: Clone + Eq + Hash> IdentityTracker<O> {
    /// Registers a newly drawn overlay under a fresh id and returns the id.
    ///
    /// If the overlay is already tracked, its existing id is returned.
    pub fn assign_identifier(
        &mut self,
        overlay: O,
        kind: ShapeKind,
    ) -> Result<FeatureId, GeodrawError> {
        if let Some(id) = self.overlay_ids.get(&overlay) {
            return Ok(id.clone());
        }

        let id = self.ids.generate()?;
        self.insert(id.clone(), overlay, kind);

        Ok(id)
    }

    /// Id of the overlay, or `None` if the overlay was never registered.
    pub fn resolve_identifier(&self, overlay: &O) -> Option<&FeatureId> {
        self.overlay_ids.get(overlay)
    }

    /// Registers an overlay under an id given by the caller.
    ///
    /// Returns false and changes nothing if either the id or the overlay is already tracked.
    pub fn register(&mut self, id: FeatureId, overlay: O, kind: ShapeKind) -> bool {
        if self.shapes.contains_key(&id) || self.overlay_ids.contains_key(&overlay) {
            return false;
        }

        self.ids.reserve(&id);
        self.insert(id, overlay, kind);
        true
    }

    /// Recreates a stored shape on the map and registers it under the stored id, with the same change listeners a
    /// drawn shape gets.
    ///
    /// Only lines and polygons can be recreated. Records with an id that is already tracked are skipped, so calling
    /// this repeatedly with the same records is safe.
    pub fn rehydrate<S>(
        &mut self,
        sdk: &mut S,
        record: &FeatureRecord,
        styles: &ShapeStyles,
    ) -> Rehydration<O>
    where
        S: MapSdk<Overlay = O>,
    {
        if self.contains(&record.id) {
            return Rehydration::AlreadyTracked;
        }

        if !record.kind.supports_rehydration() {
            return Rehydration::UnsupportedKind;
        }

        let path = match (record.kind, &record.geometry) {
            (ShapeKind::Line, Geometry::LineString(_))
            | (ShapeKind::Polygon, Geometry::Polygon(_)) => record.geometry.path(),
            _ => None,
        };
        let Some(path) = path else {
            return Rehydration::InvalidGeometry;
        };

        let Some(overlay) = sdk.add_overlay(record.kind, path, styles.get(record.kind)) else {
            return Rehydration::Rejected;
        };

        if !self.register(record.id.clone(), overlay.clone(), record.kind) {
            sdk.remove_overlay(&overlay);
            return Rehydration::Rejected;
        }

        self.attach_listeners(sdk, &record.id);
        Rehydration::Added(overlay)
    }

    /// Registers change listeners for the shape with the given id, according to its kind.
    ///
    /// Listeners are attached at most once per shape. Returns false if the shape is not tracked or already has
    /// listeners.
    pub fn attach_listeners<S>(&mut self, sdk: &mut S, id: &FeatureId) -> bool
    where
        S: MapSdk<Overlay = O>,
    {
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };

        if !shape.listeners.is_empty() {
            return false;
        }

        shape.listeners = ShapeEvent::for_kind(shape.kind)
            .iter()
            .map(|event| sdk.add_listener(&shape.overlay, *event))
            .collect();

        true
    }

    /// Stops tracking the shape and returns its entry. The id is never issued again.
    pub fn release(&mut self, id: &FeatureId) -> Option<TrackedShape<O>> {
        let shape = self.shapes.remove(id)?;
        self.overlay_ids.remove(&shape.overlay);

        Some(shape)
    }

    /// Stops tracking all shapes and returns their entries.
    pub fn release_all(&mut self) -> Vec<(FeatureId, TrackedShape<O>)> {
        self.overlay_ids.clear();
        self.shapes.drain().collect()
    }

    fn insert(&mut self, id: FeatureId, overlay: O, kind: ShapeKind) {
        self.overlay_ids.insert(overlay.clone(), id.clone());
        self.shapes.insert(
            id,
            TrackedShape {
                overlay,
                kind,
                listeners: vec![],
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{MemoryOverlay, MemorySdk};
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    fn assert_in_sync(tracker: &IdentityTracker<MemoryOverlay>) {
        assert_eq!(tracker.shapes.len(), tracker.overlay_ids.len());
        for (id, shape) in tracker.iter() {
            assert_eq!(tracker.resolve_identifier(shape.overlay()), Some(id));
        }
    }

    fn stored_polygon() -> FeatureRecord {
        FeatureRecord::new(
            "abc123X",
            ShapeKind::Polygon,
            Geometry::Polygon(vec![vec![[-118.3, 34.0], [-118.2, 34.1], [-118.1, 34.0]]]),
        )
    }

    fn draw_overlays(sdk: &mut MemorySdk, count: usize) -> Vec<MemoryOverlay> {
        (0..count)
            .filter_map(|_| {
                sdk.add_overlay(
                    ShapeKind::Line,
                    vec![],
                    &ShapeStyles::default().polyline,
                )
            })
            .collect()
    }

    #[test]
    fn assigned_ids_are_unique() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();

        let ids: HashSet<FeatureId> = draw_overlays(&mut sdk, 200)
            .into_iter()
            .map(|overlay| {
                tracker
                    .assign_identifier(overlay, ShapeKind::Line)
                    .expect("id generated")
            })
            .collect();

        assert_eq!(ids.len(), 200);
        assert!(ids
            .iter()
            .all(|id| tracker.id_config().matches(id.as_str())));
        assert_in_sync(&tracker);
    }

    #[test]
    fn assigning_twice_keeps_the_id() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        let overlay = draw_overlays(&mut sdk, 1)[0];

        let first = tracker
            .assign_identifier(overlay, ShapeKind::Line)
            .expect("id generated");
        let second = tracker
            .assign_identifier(overlay, ShapeKind::Line)
            .expect("id generated");

        assert_eq!(first, second);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn unknown_overlay_is_not_resolved() {
        let mut sdk = MemorySdk::new();
        let tracker = IdentityTracker::default();
        let overlay = draw_overlays(&mut sdk, 1)[0];

        assert_eq!(tracker.resolve_identifier(&overlay), None);
    }

    #[test]
    fn rehydrate_under_stored_id() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        let record = stored_polygon();

        let Rehydration::Added(overlay) =
            tracker.rehydrate(&mut sdk, &record, &ShapeStyles::default())
        else {
            panic!("polygon must be rehydrated");
        };

        assert_eq!(
            tracker.resolve_identifier(&overlay),
            Some(&FeatureId::new("abc123X"))
        );
        assert_eq!(
            sdk.listened_events(overlay),
            ShapeEvent::for_kind(ShapeKind::Polygon)
        );
        assert!(tracker.is_issued(&FeatureId::new("abc123X")));

        let path = sdk
            .shape(&overlay)
            .and_then(|shape| shape.path())
            .expect("polygon has path");
        assert_eq!(path, record.geometry.path().expect("polygon has path"));

        assert_eq!(
            tracker.rehydrate(&mut sdk, &record, &ShapeStyles::default()),
            Rehydration::AlreadyTracked
        );
        assert_eq!(tracker.len(), 1);
        assert_eq!(sdk.overlay_count(), 1);
        assert_eq!(sdk.listener_count(), 3);
        assert_in_sync(&tracker);
    }

    #[test]
    fn unsupported_records_are_skipped() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        let styles = ShapeStyles::default();

        let ring = vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]];
        let circle = FeatureRecord::new("circle1", ShapeKind::Circle, Geometry::Polygon(ring.clone()));
        let rectangle = FeatureRecord::new("rect001", ShapeKind::Rectangle, Geometry::Polygon(ring));
        let point = FeatureRecord::new("point01", ShapeKind::Point, Geometry::Point([1.0, 2.0]));
        let mismatched =
            FeatureRecord::new("line001", ShapeKind::Line, Geometry::Point([1.0, 2.0]));

        assert_eq!(
            tracker.rehydrate(&mut sdk, &circle, &styles),
            Rehydration::UnsupportedKind
        );
        assert_eq!(
            tracker.rehydrate(&mut sdk, &rectangle, &styles),
            Rehydration::UnsupportedKind
        );
        assert_eq!(
            tracker.rehydrate(&mut sdk, &point, &styles),
            Rehydration::UnsupportedKind
        );
        assert_eq!(
            tracker.rehydrate(&mut sdk, &mismatched, &styles),
            Rehydration::InvalidGeometry
        );

        assert!(tracker.is_empty());
        assert_eq!(sdk.overlay_count(), 0);
    }

    #[test]
    fn listeners_are_attached_once() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        let overlay = draw_overlays(&mut sdk, 1)[0];
        let id = tracker
            .assign_identifier(overlay, ShapeKind::Line)
            .expect("id generated");

        assert!(tracker.attach_listeners(&mut sdk, &id));
        assert!(!tracker.attach_listeners(&mut sdk, &id));
        assert_eq!(sdk.listener_count(), 3);
        assert_eq!(tracker.get(&id).map(|s| s.listeners().len()), Some(3));

        assert!(!tracker.attach_listeners(&mut sdk, &FeatureId::new("missing")));
    }

    #[test]
    fn released_ids_are_not_reused() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::new(IdConfig::new(1, "ab").expect("valid config"));
        let overlays = draw_overlays(&mut sdk, 3);

        let first = tracker
            .assign_identifier(overlays[0], ShapeKind::Line)
            .expect("id generated");
        let released = tracker.release(&first).expect("shape is tracked");
        assert_eq!(released.overlay(), &overlays[0]);
        assert_eq!(tracker.resolve_identifier(&overlays[0]), None);

        let second = tracker
            .assign_identifier(overlays[1], ShapeKind::Line)
            .expect("one id is left");
        assert_ne!(first, second);

        assert_matches!(
            tracker.assign_identifier(overlays[2], ShapeKind::Line),
            Err(GeodrawError::IdSpaceExhausted(_))
        );
        assert_in_sync(&tracker);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        let overlays = draw_overlays(&mut sdk, 2);

        assert!(tracker.register(FeatureId::new("a"), overlays[0], ShapeKind::Line));
        assert!(!tracker.register(FeatureId::new("a"), overlays[1], ShapeKind::Line));
        assert!(!tracker.register(FeatureId::new("b"), overlays[0], ShapeKind::Line));
        assert_eq!(tracker.len(), 1);
        assert_in_sync(&tracker);
    }

    #[test]
    fn release_all() {
        let mut sdk = MemorySdk::new();
        let mut tracker = IdentityTracker::default();
        for overlay in draw_overlays(&mut sdk, 4) {
            let id = tracker
                .assign_identifier(overlay, ShapeKind::Line)
                .expect("id generated");
            tracker.attach_listeners(&mut sdk, &id);
        }

        let released = tracker.release_all();
        assert_eq!(released.len(), 4);
        assert!(released.iter().all(|(_, shape)| shape.listeners().len() == 3));
        assert!(tracker.is_empty());
        assert_in_sync(&tracker);
    }
}
