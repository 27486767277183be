//! This example runs a scripted drawing session on the headless map: a stored polygon is restored, the user draws a
//! circle and a line, edits them and removes the polygon. Every record reported to the host is printed as JSON.

use geodraw::geodraw_types::geo::LatLngBounds;
use geodraw::geodraw_types::{latlon, FeatureRecord, Geometry, ShapeKind};
use geodraw::normalize::{path_from_latlon, ShapeSnapshot};
use geodraw::{DrawingHost, DrawingManagerBuilder, DrawingMode, MemorySdk};

struct PrintHost;

impl DrawingHost for PrintHost {
    fn on_ready(&self) {
        log::info!("Map is ready");
    }

    fn on_drawing_mode_change(&self, mode: DrawingMode) {
        log::info!("Drawing mode: {mode}");
    }

    fn on_change(&self, record: &FeatureRecord) {
        match serde_json::to_string(record) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to serialize feature {}: {err}", record.id),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stored = FeatureRecord::new(
        "abc123X",
        ShapeKind::Polygon,
        Geometry::Polygon(vec![vec![
            [-118.30, 34.00],
            [-118.20, 34.10],
            [-118.10, 34.00],
        ]]),
    );

    let mut manager = DrawingManagerBuilder::new(PrintHost)
        .with_latlon(34.052235, -118.243683)
        .with_zoom(12.0)
        .with_circle_steps(16)
        .with_features([stored.clone()])
        .build();
    manager.attach(MemorySdk::new());

    manager.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Circle));
    let circle = sdk(&mut manager)?.draw(ShapeSnapshot::Circle {
        center: latlon!(34.05, -118.25),
        radius: 1000.0,
    })?;
    manager.process_events()?;

    sdk(&mut manager)?.set_radius(circle, 1500.0)?;
    manager.process_events()?;

    manager.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Line));
    let line = sdk(&mut manager)?.draw(ShapeSnapshot::Polyline {
        path: path_from_latlon(&[(34.00, -118.40), (34.02, -118.35)]),
    })?;
    manager.process_events()?;

    sdk(&mut manager)?.insert_vertex(line, 2, latlon!(34.04, -118.30))?;
    manager.process_events()?;

    manager.set_drawing_mode(DrawingMode::Drawing(ShapeKind::Rectangle));
    sdk(&mut manager)?.draw(ShapeSnapshot::Rectangle {
        bounds: LatLngBounds::new(latlon!(34.0, -118.3), latlon!(34.1, -118.2)),
    })?;
    manager.process_events()?;

    manager.remove_feature(&stored.id)?;

    let features = manager.features();
    log::info!("Session finished with {} features", features.len());
    println!("{}", serde_json::to_string_pretty(&features)?);

    Ok(())
}

fn sdk(
    manager: &mut geodraw::DrawingManager<MemorySdk, PrintHost>,
) -> anyhow::Result<&mut MemorySdk> {
    manager
        .sdk_mut()
        .ok_or_else(|| anyhow::anyhow!("drawing manager is not attached"))
}
