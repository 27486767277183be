use geodraw_types::FeatureRecord;

use crate::drawing_mode::DrawingMode;

/// Receiver of the notifications of a [`DrawingManager`](crate::DrawingManager).
///
/// All methods are called synchronously from the manager, one at a time.
pub trait DrawingHost {
    /// The manager was attached to a map and is ready to draw.
    fn on_ready(&self) {}

    /// The drawing mode changed, either by the host request or automatically after a shape was completed.
    fn on_drawing_mode_change(&self, _mode: DrawingMode) {}

    /// A shape was created or edited. The record contains the full current geometry of the shape.
    fn on_change(&self, _record: &FeatureRecord) {}
}

/// Host that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyHost;

impl DrawingHost for DummyHost {}
