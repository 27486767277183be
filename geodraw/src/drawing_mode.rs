//! Drawing mode shared between the host UI and the map SDK.

use std::fmt::{Display, Formatter};

use geodraw_types::error::GeodrawTypesError;
use geodraw_types::ShapeKind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Currently active shape creation tool.
///
/// Serializes as the SDK tool name (`"rectangle"`, `"circle"`, `"polygon"`, `"polyline"`, `"marker"`) or `null` for
/// [`DrawingMode::Idle`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Option<String>", into = "Option<String>")
)]
pub enum DrawingMode {
    /// No tool is selected. The map can be panned and shapes can be selected and edited.
    #[default]
    Idle,
    /// A shape of the given kind is being drawn.
    Drawing(ShapeKind),
}

impl DrawingMode {
    /// Name of the SDK drawing tool, `None` for the idle mode.
    pub fn tool_name(&self) -> Option<&'static str> {
        match self {
            DrawingMode::Idle => None,
            DrawingMode::Drawing(kind) => Some(kind.overlay_type()),
        }
    }

    /// Parses an SDK drawing tool name. `None` stands for the idle mode.
    pub fn from_tool_name(name: Option<&str>) -> Result<Self, GeodrawTypesError> {
        match name {
            None => Ok(DrawingMode::Idle),
            Some(name) => ShapeKind::from_overlay_type(name)
                .map(DrawingMode::Drawing)
                .ok_or_else(|| GeodrawTypesError::UnknownShapeKind(name.to_string())),
        }
    }

    /// Returns true if no tool is selected.
    pub fn is_idle(&self) -> bool {
        matches!(self, DrawingMode::Idle)
    }
}

impl Display for DrawingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name().unwrap_or("idle"))
    }
}

impl TryFrom<Option<String>> for DrawingMode {
    type Error = GeodrawTypesError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        Self::from_tool_name(value.as_deref())
    }
}

impl From<DrawingMode> for Option<String> {
    fn from(value: DrawingMode) -> Self {
        value.tool_name().map(str::to_string)
    }
}

/// Change of the drawing mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeTransition {
    /// Mode before the change.
    pub from: DrawingMode,
    /// Mode after the change.
    pub to: DrawingMode,
}

/// Drawing mode state machine.
///
/// The host moves it from `Idle` to `Drawing(kind)` by selecting a tool. Completion of a shape moves it back to
/// `Idle` whatever kind was drawn. Setting the mode that is already active is not a transition.
#[derive(Debug, Default, Clone)]
pub struct DrawingModeState {
    mode: DrawingMode,
}

impl DrawingModeState {
    /// Creates a state starting in the given mode.
    pub fn new(mode: DrawingMode) -> Self {
        Self { mode }
    }

    /// Current mode.
    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Sets the mode requested by the host. Returns the transition if the mode changed.
    #[must_use = "a changed mode must be reported to the host"]
    pub fn set(&mut self, mode: DrawingMode) -> Option<ModeTransition> {
        if mode == self.mode {
            return None;
        }

        let transition = ModeTransition {
            from: self.mode,
            to: mode,
        };
        self.mode = mode;

        Some(transition)
    }

    /// Resets the mode to `Idle` after a shape was completed.
    #[must_use = "a changed mode must be reported to the host"]
    pub fn complete_shape(&mut self) -> Option<ModeTransition> {
        self.set(DrawingMode::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn tool_names() {
        assert_eq!(
            DrawingMode::from_tool_name(Some("polyline")).expect("known tool"),
            DrawingMode::Drawing(ShapeKind::Line)
        );
        assert_eq!(
            DrawingMode::from_tool_name(None).expect("idle"),
            DrawingMode::Idle
        );
        assert_matches!(
            DrawingMode::from_tool_name(Some("lasso")),
            Err(GeodrawTypesError::UnknownShapeKind(_))
        );
        assert_eq!(
            DrawingMode::Drawing(ShapeKind::Rectangle).tool_name(),
            Some("rectangle")
        );
    }

    #[test]
    fn draw_then_complete() {
        let mut state = DrawingModeState::default();
        assert!(state.mode().is_idle());

        let polygon = DrawingMode::Drawing(ShapeKind::Polygon);
        assert_eq!(
            state.set(polygon),
            Some(ModeTransition {
                from: DrawingMode::Idle,
                to: polygon
            })
        );
        assert_eq!(state.set(polygon), None);

        assert_eq!(
            state.complete_shape(),
            Some(ModeTransition {
                from: polygon,
                to: DrawingMode::Idle
            })
        );
        assert_eq!(state.complete_shape(), None);
    }

    #[test]
    fn switching_tools() {
        let mut state = DrawingModeState::new(DrawingMode::Drawing(ShapeKind::Circle));
        let transition = state
            .set(DrawingMode::Drawing(ShapeKind::Rectangle))
            .expect("mode changed");
        assert_eq!(transition.from, DrawingMode::Drawing(ShapeKind::Circle));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialization() {
        let json = serde_json::to_string(&DrawingMode::Drawing(ShapeKind::Circle))
            .expect("serialization");
        assert_eq!(json, "\"circle\"");
        assert_eq!(
            serde_json::to_string(&DrawingMode::Idle).expect("serialization"),
            "null"
        );

        let mode: DrawingMode = serde_json::from_str("\"polygon\"").expect("valid mode");
        assert_eq!(mode, DrawingMode::Drawing(ShapeKind::Polygon));
        let mode: DrawingMode = serde_json::from_str("null").expect("valid mode");
        assert_eq!(mode, DrawingMode::Idle);
        assert!(serde_json::from_str::<DrawingMode>("\"hexagon\"").is_err());
    }
}
