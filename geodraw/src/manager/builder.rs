use geodraw_types::geo::impls::GeoPoint2d;
use geodraw_types::geo::{GeoPoint, NewGeoPoint};
use geodraw_types::FeatureRecord;

use super::DrawingManager;
use crate::drawing_mode::{DrawingMode, DrawingModeState};
use crate::emitter::ChangeEmitter;
use crate::host::DrawingHost;
use crate::id::IdConfig;
use crate::normalize::NormalizeOptions;
use crate::sdk::{MapOptions, MapSdk, ShapeStyles};
use crate::tracker::IdentityTracker;

/// Convenience type to initialize a [`DrawingManager`].
///
/// ```
/// use geodraw::{DrawingManagerBuilder, DrawingMode, DummyHost, MemorySdk};
/// use geodraw::geodraw_types::ShapeKind;
///
/// let mut manager = DrawingManagerBuilder::new(DummyHost)
///     .with_latlon(55.0, 37.0)
///     .with_zoom(12.0)
///     .with_circle_steps(32)
///     .with_drawing_mode(DrawingMode::Drawing(ShapeKind::Polygon))
///     .build::<MemorySdk>();
///
/// manager.attach(MemorySdk::new());
/// ```
pub struct DrawingManagerBuilder<H> {
    host: H,
    id_config: IdConfig,
    normalize: NormalizeOptions,
    map_options: MapOptions,
    styles: ShapeStyles,
    drawing_mode: DrawingMode,
    features: Vec<FeatureRecord>,
}

impl<H: DrawingHost> DrawingManagerBuilder<H> {
    /// Creates a builder with default configuration, sending notifications to the given host.
    pub fn new(host: H) -> Self {
        Self {
            host,
            id_config: IdConfig::default(),
            normalize: NormalizeOptions::default(),
            map_options: MapOptions::default(),
            styles: ShapeStyles::default(),
            drawing_mode: DrawingMode::Idle,
            features: vec![],
        }
    }

    /// Sets length and alphabet of generated feature ids.
    ///
    /// Defaults to 7 characters from `[0-9A-Za-z]`.
    pub fn with_id_config(mut self, config: IdConfig) -> Self {
        self.id_config = config;
        self
    }

    /// Sets the number of segments circles are approximated with.
    ///
    /// Defaults to 64.
    pub fn with_circle_steps(mut self, steps: u32) -> Self {
        self.normalize.circle_steps = steps;
        self
    }

    /// If set to true, polygon rings are emitted with the first vertex repeated at the end.
    ///
    /// Defaults to false.
    pub fn with_closed_polygon_rings(mut self, close: bool) -> Self {
        self.normalize.close_polygon_rings = close;
        self
    }

    /// Replaces all map options.
    ///
    /// Replaces the values set by the [`DrawingManagerBuilder::with_position()`],
    /// [`DrawingManagerBuilder::with_latlon()`] and [`DrawingManagerBuilder::with_zoom()`] methods.
    pub fn with_map_options(mut self, options: MapOptions) -> Self {
        self.map_options = options;
        self
    }

    /// Sets the center point of the map to the given geographical point.
    pub fn with_position(mut self, position: impl GeoPoint<Num = f64>) -> Self {
        self.map_options.center = GeoPoint2d::from(&position);
        self
    }

    /// Sets the center point of the map to the given geographical coordinates.
    pub fn with_latlon(mut self, lat: f64, lon: f64) -> Self {
        self.map_options.center = GeoPoint2d::latlon(lat, lon);
        self
    }

    /// Sets the initial zoom level of the map.
    ///
    /// Defaults to 10.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.map_options.zoom = zoom;
        self
    }

    /// Sets the identifier of the map style in the SDK.
    pub fn with_map_id(mut self, map_id: impl Into<String>) -> Self {
        self.map_options.map_id = Some(map_id.into());
        self
    }

    /// Sets styles of drawn shapes.
    pub fn with_shape_styles(mut self, styles: ShapeStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the drawing mode selected when the manager is attached.
    ///
    /// Defaults to [`DrawingMode::Idle`].
    pub fn with_drawing_mode(mut self, mode: DrawingMode) -> Self {
        self.drawing_mode = mode;
        self
    }

    /// Adds stored features to be recreated on the map when the manager is attached.
    pub fn with_features(mut self, features: impl IntoIterator<Item = FeatureRecord>) -> Self {
        self.features.extend(features);
        self
    }

    /// Consumes the builder and creates a detached [`DrawingManager`].
    pub fn build<S: MapSdk>(self) -> DrawingManager<S, H> {
        DrawingManager {
            host: self.host,
            sdk: None,
            tracker: IdentityTracker::new(self.id_config),
            emitter: ChangeEmitter::new(self.normalize),
            mode: DrawingModeState::new(self.drawing_mode),
            stored: self.features,
            map_options: self.map_options,
            styles: self.styles,
        }
    }
}
