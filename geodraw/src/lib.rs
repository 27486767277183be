//! Geodraw lets users draw and edit shapes (points, lines, polygons, circles and rectangles) on an interactive map
//! and reports every drawn shape as a normalized geographic feature record.
//!
//! # Quick start
//!
//! ```
//! use geodraw::{DrawingHost, DrawingManager, DrawingMode, MemorySdk};
//! use geodraw::geodraw_types::{FeatureRecord, ShapeKind};
//! use geodraw::normalize::{path_from_latlon, ShapeSnapshot};
//!
//! struct PrintHost;
//!
//! impl DrawingHost for PrintHost {
//!     fn on_change(&self, record: &FeatureRecord) {
//!         println!("{} changed: {:?}", record.id, record.geometry);
//!     }
//! }
//!
//! let mut manager = DrawingManager::new(PrintHost);
//! manager.attach(MemorySdk::new());
//! manager.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Line));
//!
//! let sdk = manager.sdk_mut().expect("manager is attached");
//! sdk.draw(ShapeSnapshot::Polyline {
//!     path: path_from_latlon(&[(34.05, -118.25), (34.06, -118.24)]),
//! }).expect("line tool is active");
//!
//! manager.process_events().expect("manager is attached");
//! ```
//!
//! # Main components
//!
//! * [`MapSdk`] is the map surface: it renders the map, lets the user draw and edit overlays and reports these
//!   actions as [`SdkEvent`](sdk::SdkEvent)s. [`MemorySdk`] is a headless implementation of it.
//! * [`normalize`](normalize::normalize) converts the current state of an overlay into a
//!   [`Geometry`](geodraw_types::Geometry) with `[longitude, latitude]` coordinates. Circles are approximated by
//!   a polygon.
//! * [`IdentityTracker`](tracker::IdentityTracker) keeps a random id for every overlay, and recreates stored
//!   features on the map under their ids.
//! * [`ChangeEmitter`](emitter::ChangeEmitter) builds a [`FeatureRecord`](geodraw_types::FeatureRecord) after every
//!   change of a shape.
//! * [`DrawingManager`] ties them together and sends notifications to a [`DrawingHost`].

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod drawing_mode;
pub mod emitter;
pub mod error;
mod host;
pub mod id;
mod manager;
pub mod normalize;
pub mod sdk;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use drawing_mode::DrawingMode;
pub use error::GeodrawError;
pub use host::{DrawingHost, DummyHost};
pub use id::IdConfig;
pub use manager::{DrawingManager, DrawingManagerBuilder};
pub use sdk::{MapOptions, MapSdk, MemorySdk, ShapeStyle, ShapeStyles};

// Reexport geodraw_types
pub use geodraw_types;
