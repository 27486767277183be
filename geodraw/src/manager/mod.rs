use geodraw_types::{FeatureId, FeatureRecord};

use crate::drawing_mode::{DrawingMode, DrawingModeState};
use crate::emitter::ChangeEmitter;
use crate::error::GeodrawError;
use crate::host::DrawingHost;
use crate::sdk::{MapOptions, MapSdk, SdkEvent, ShapeStyles};
use crate::tracker::{IdentityTracker, Rehydration};

mod builder;

pub use builder::DrawingManagerBuilder;

/// Drawing session on a map.
///
/// The manager connects a [`MapSdk`] with a [`DrawingHost`]: it passes the drawing mode chosen by the host to the
/// SDK, gives every drawn shape an id, listens to its edits and reports the current state of the shape to the host
/// as a [`FeatureRecord`] after every change. Stored features given to the manager are recreated on the map, so the
/// user can continue editing them.
///
/// The manager is created detached. Until a map SDK is attached with [`DrawingManager::attach`], it only records the
/// drawing mode and stored features. Detaching (explicitly or by dropping the manager) removes every listener the
/// manager registered and unbinds the drawing support from the map.
pub struct DrawingManager<S: MapSdk, H: DrawingHost> {
    host: H,
    sdk: Option<S>,
    tracker: IdentityTracker<S::Overlay>,
    emitter: ChangeEmitter,
    mode: DrawingModeState,
    stored: Vec<FeatureRecord>,
    map_options: MapOptions,
    styles: ShapeStyles,
}

impl<S: MapSdk, H: DrawingHost> DrawingManager<S, H> {
    /// Creates a detached manager with default configuration.
    ///
    /// Use [`DrawingManagerBuilder`] to configure ids, normalization and map options.
    pub fn new(host: H) -> Self {
        DrawingManagerBuilder::new(host).build()
    }

    /// Attaches the manager to a map.
    ///
    /// Map options and shape styles are applied to the map, the current drawing mode is selected, stored features
    /// are recreated, and then the host is notified with [`DrawingHost::on_ready`].
    ///
    /// If the manager was attached to another map, that map is detached first and returned.
    pub fn attach(&mut self, mut sdk: S) -> Option<S> {
        let previous = self.detach();

        sdk.apply_map_options(&self.map_options);
        sdk.set_shape_styles(&self.styles);
        sdk.set_drawing_mode(self.mode.mode());
        self.sdk = Some(sdk);

        self.rehydrate_stored();

        log::debug!(
            "Drawing manager is attached, {} shapes are tracked",
            self.tracker.len()
        );
        self.host.on_ready();

        previous
    }

    /// Detaches the manager from the map and returns the map SDK.
    ///
    /// All listeners registered by the manager are removed, and the tracked overlays are removed from the map.
    /// Current records of the tracked shapes are kept as stored features, so lines and polygons are recreated once
    /// when the manager is attached again, to the same map or another one. Returns `None` if the manager was not
    /// attached.
    pub fn detach(&mut self) -> Option<S> {
        let records = self.current_records()?;
        let mut sdk = self.sdk.take()?;

        for (_, shape) in self.tracker.release_all() {
            for listener in shape.listeners() {
                sdk.remove_listener(*listener);
            }
            sdk.remove_overlay(shape.overlay());
        }
        sdk.detach();

        self.stored = records;
        log::debug!("Drawing manager is detached");

        Some(sdk)
    }

    /// Returns true if the manager is attached to a map.
    pub fn is_attached(&self) -> bool {
        self.sdk.is_some()
    }

    /// Current drawing mode.
    pub fn drawing_mode(&self) -> DrawingMode {
        self.mode.mode()
    }

    /// Selects the drawing tool.
    ///
    /// If the mode changed, the host is notified with [`DrawingHost::on_drawing_mode_change`], whether the manager is
    /// attached or not. The mode is passed to the map if the manager is attached, otherwise it is selected on attach.
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        let Some(transition) = self.mode.set(mode) else {
            return;
        };

        log::debug!("Drawing mode changed: {} -> {}", transition.from, transition.to);
        if let Some(sdk) = &mut self.sdk {
            sdk.set_drawing_mode(mode);
        }
        self.host.on_drawing_mode_change(mode);
    }

    /// Sets stored features to be shown on the map.
    ///
    /// Lines and polygons that are not tracked yet are recreated on the map under their stored ids. Other kinds
    /// cannot be recreated and are skipped. Can be called any number of times with the same features.
    pub fn set_features(&mut self, features: &[FeatureRecord]) {
        self.stored = features.to_vec();
        self.rehydrate_stored();
    }

    /// Map options.
    pub fn map_options(&self) -> &MapOptions {
        &self.map_options
    }

    /// Replaces map options and applies them to the map if the manager is attached.
    pub fn set_map_options(&mut self, options: MapOptions) {
        self.map_options = options;
        if let Some(sdk) = &mut self.sdk {
            sdk.apply_map_options(&self.map_options);
        }
    }

    /// Styles of new shapes.
    pub fn shape_styles(&self) -> &ShapeStyles {
        &self.styles
    }

    /// Replaces styles of new shapes and passes them to the map if the manager is attached.
    pub fn set_shape_styles(&mut self, styles: ShapeStyles) {
        self.styles = styles;
        if let Some(sdk) = &mut self.sdk {
            sdk.set_shape_styles(&self.styles);
        }
    }

    /// Handles an event of the map SDK.
    ///
    /// Completion of a shape emits its record and then resets the drawing mode to [`DrawingMode::Idle`], whatever
    /// kind of shape was drawn. Edits emit the current record of the edited shape. Events are ignored if the manager
    /// is not attached.
    pub fn handle_event(&mut self, event: SdkEvent<S::Overlay>) -> Result<(), GeodrawError> {
        let Some(sdk) = &mut self.sdk else {
            log::warn!("Drawing manager is not attached, event {event:?} is ignored");
            return Ok(());
        };

        match event {
            SdkEvent::OverlayComplete {
                overlay,
                overlay_type,
            } => {
                let created = self.emitter.shape_created(
                    sdk,
                    &mut self.tracker,
                    overlay,
                    &overlay_type,
                    &self.host,
                );

                if self.mode.complete_shape().is_some() {
                    log::debug!("Shape is completed, drawing mode is reset");
                    sdk.set_drawing_mode(DrawingMode::Idle);
                    self.host.on_drawing_mode_change(DrawingMode::Idle);
                }

                created?;
            }
            SdkEvent::ShapeChanged { overlay, event } => {
                log::trace!("Overlay {overlay:?} changed: {event:?}");
                self.emitter
                    .shape_changed(sdk, &self.tracker, &overlay, &self.host);
            }
        }

        Ok(())
    }

    /// Handles all events queued in the map SDK and returns their number.
    ///
    /// A failed event does not stop the processing: every queued event is handled, and the error of the first
    /// failed one is returned afterwards.
    pub fn process_events(&mut self) -> Result<usize, GeodrawError> {
        let events = self
            .sdk
            .as_mut()
            .ok_or(GeodrawError::NotAttached)?
            .drain_events();
        let count = events.len();

        let mut first_error = None;
        for event in events {
            if let Err(err) = self.handle_event(event) {
                log::warn!("Failed to handle map event: {err}");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Removes a shape from the map and stops tracking it. Its id is never given to another shape.
    pub fn remove_feature(&mut self, id: &FeatureId) -> Result<(), GeodrawError> {
        let sdk = self.sdk.as_mut().ok_or(GeodrawError::NotAttached)?;
        let shape = self
            .tracker
            .release(id)
            .ok_or_else(|| GeodrawError::UnknownFeature(id.clone()))?;

        for listener in shape.listeners() {
            sdk.remove_listener(*listener);
        }
        sdk.remove_overlay(shape.overlay());
        self.stored.retain(|record| &record.id != id);

        log::debug!("Shape {id} is removed");
        Ok(())
    }

    /// Current records of all shapes, ordered by id.
    ///
    /// When the manager is detached, these are the stored features it will recreate on attaching.
    pub fn features(&self) -> Vec<FeatureRecord> {
        let mut records = self
            .current_records()
            .unwrap_or_else(|| self.stored.clone());
        records.sort_by(|a, b| a.id.cmp(&b.id));

        records
    }

    /// Current record of the shape with the given id.
    pub fn feature(&self, id: &FeatureId) -> Option<FeatureRecord> {
        let Some(sdk) = &self.sdk else {
            return self.stored.iter().find(|record| &record.id == id).cloned();
        };

        let shape = self.tracker.get(id)?;
        self.emitter.record(sdk, id, shape.kind(), shape.overlay())
    }

    /// Host receiving notifications.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Attached map SDK.
    pub fn sdk(&self) -> Option<&S> {
        self.sdk.as_ref()
    }

    /// Attached map SDK.
    pub fn sdk_mut(&mut self) -> Option<&mut S> {
        self.sdk.as_mut()
    }

    /// Tracking table of the drawn shapes.
    pub fn tracker(&self) -> &IdentityTracker<S::Overlay> {
        &self.tracker
    }

    fn current_records(&self) -> Option<Vec<FeatureRecord>> {
        let sdk = self.sdk.as_ref()?;

        Some(
            self.tracker
                .iter()
                .filter_map(|(id, shape)| {
                    self.emitter
                        .record(sdk, id, shape.kind(), shape.overlay())
                })
                .collect(),
        )
    }

    fn rehydrate_stored(&mut self) {
        let Some(sdk) = &mut self.sdk else {
            return;
        };

        for record in &self.stored {
            match self.tracker.rehydrate(sdk, record, &self.styles) {
                Rehydration::Added(overlay) => {
                    log::debug!("Stored {} shape {} is added as {overlay:?}", record.kind, record.id)
                }
                Rehydration::AlreadyTracked => {
                    log::trace!("Stored shape {} is already tracked", record.id)
                }
                Rehydration::UnsupportedKind => {
                    log::debug!("Stored {} shape {} cannot be recreated", record.kind, record.id)
                }
                Rehydration::InvalidGeometry => log::warn!(
                    "Stored shape {} has geometry {} not matching kind {}",
                    record.id,
                    record.geometry.type_name(),
                    record.kind
                ),
                Rehydration::Rejected => {
                    log::warn!("Map rejected stored shape {}", record.id)
                }
            }
        }
    }
}

impl<S: MapSdk, H: DrawingHost> Drop for DrawingManager<S, H> {
    fn drop(&mut self) {
        self.detach();
    }
}
