//! Emission of feature records for created and edited shapes.

use geodraw_types::{FeatureId, FeatureRecord, ShapeKind};

use crate::error::GeodrawError;
use crate::host::DrawingHost;
use crate::normalize::{normalize, NormalizeOptions};
use crate::sdk::MapSdk;
use crate::tracker::IdentityTracker;

/// Turns SDK shape events into [`FeatureRecord`]s and passes them to the host.
///
/// Geometry of the record is always computed from the current state of the overlay, so every emission carries the
/// full shape rather than a difference from the previous one.
#[derive(Debug, Default, Clone)]
pub struct ChangeEmitter {
    options: NormalizeOptions,
}

impl ChangeEmitter {
    /// Creates a new emitter.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Options shapes are normalized with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Handles completion of a new overlay.
    ///
    /// The overlay gets a fresh id and change listeners, then its record is emitted. Overlays of an unknown type are
    /// ignored.
    pub fn shape_created<S, H>(
        &self,
        sdk: &mut S,
        tracker: &mut IdentityTracker<S::Overlay>,
        overlay: S::Overlay,
        overlay_type: &str,
        host: &H,
    ) -> Result<Option<FeatureRecord>, GeodrawError>
    where
        S: MapSdk,
        H: DrawingHost + ?Sized,
    {
        let Some(kind) = ShapeKind::from_overlay_type(overlay_type) else {
            log::warn!("Overlay {overlay:?} of unknown type `{overlay_type}` is ignored");
            return Ok(None);
        };

        let id = tracker.assign_identifier(overlay.clone(), kind)?;
        tracker.attach_listeners(sdk, &id);
        log::debug!("New {kind} shape {id} is tracked");

        Ok(self.emit(sdk, &id, kind, &overlay, host))
    }

    /// Handles an edit of an overlay. The record is emitted under the id and kind the overlay was registered with.
    ///
    /// Edits of overlays that are not tracked are ignored.
    pub fn shape_changed<S, H>(
        &self,
        sdk: &S,
        tracker: &IdentityTracker<S::Overlay>,
        overlay: &S::Overlay,
        host: &H,
    ) -> Option<FeatureRecord>
    where
        S: MapSdk,
        H: DrawingHost + ?Sized,
    {
        let Some(id) = tracker.resolve_identifier(overlay) else {
            log::warn!("Change of untracked overlay {overlay:?} is ignored");
            return None;
        };

        let kind = tracker.get(id)?.kind();
        self.emit(sdk, id, kind, overlay, host)
    }

    /// Record of the current state of an overlay, without emitting it.
    pub fn record<S: MapSdk>(
        &self,
        sdk: &S,
        id: &FeatureId,
        kind: ShapeKind,
        overlay: &S::Overlay,
    ) -> Option<FeatureRecord> {
        let shape = sdk.shape(overlay)?;
        let geometry = normalize(shape, kind, &self.options)?;

        Some(FeatureRecord::new(id.clone(), kind, geometry))
    }

    fn emit<S, H>(
        &self,
        sdk: &S,
        id: &FeatureId,
        kind: ShapeKind,
        overlay: &S::Overlay,
        host: &H,
    ) -> Option<FeatureRecord>
    where
        S: MapSdk,
        H: DrawingHost + ?Sized,
    {
        let Some(record) = self.record(sdk, id, kind, overlay) else {
            log::warn!("Shape {id} has no {kind} geometry, change is not emitted");
            return None;
        };

        log::debug!("Emitting change of {kind} shape {id}");
        host.on_change(&record);

        Some(record)
    }
}
