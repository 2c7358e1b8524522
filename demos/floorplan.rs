//! Draws a small floorplan through the interaction controller and logs the
//! resulting walls.
//!
//! Usage:
//! ```text
//! cargo run --example floorplan
//! RUST_LOG=wallgraph=trace cargo run --example floorplan
//! ```

use tracing::info;
use wallgraph::config::EngineConfig;
use wallgraph::math::{Point2, Vector2};
use wallgraph::tools::{InteractionController, PointerEvent};
use wallgraph::topology::{FloorplanStore, WallEnd, WallKind};

fn draw(
    ctl: &mut InteractionController,
    store: &mut FloorplanStore,
    kind: WallKind,
    from: Point2,
    to: Point2,
) -> wallgraph::Result<()> {
    ctl.begin_build(store, kind)?;
    ctl.pointer_down(store, &PointerEvent::new(from))?;
    ctl.pointer_move(store, &PointerEvent::new(to))?;
    ctl.pointer_up(store, &PointerEvent::new(to))?;
    Ok(())
}

fn main() -> wallgraph::Result<()> {
    // Default: WARN for everything, DEBUG for wallgraph.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("wallgraph=debug".parse().unwrap_or_default())
        .add_directive("floorplan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut store = FloorplanStore::new();
    let mut ctl = InteractionController::new(config);

    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(300.0, 0.0),
        Point2::new(300.0, 200.0),
        Point2::new(0.0, 200.0),
    ];
    for i in 0..corners.len() {
        draw(&mut ctl, &mut store, WallKind::Wall, corners[i], corners[(i + 1) % corners.len()])?;
    }
    // An interior divider splits the top and bottom walls.
    draw(
        &mut ctl,
        &mut store,
        WallKind::Divider,
        Point2::new(150.0, 0.0),
        Point2::new(150.0, 200.0),
    )?;

    // Drag the right end of the first wall we find back onto the corner.
    let first_wall = store
        .walls()
        .find(|(_, w)| w.kind == WallKind::Wall)
        .map(|(id, _)| id);
    if let Some(id) = first_wall {
        ctl.grab_handle(&mut store, id, WallEnd::End)?;
        let end = store.wall(id)?.end();
        ctl.pointer_move(&mut store, &PointerEvent::new(end + Vector2::new(3.0, 2.0)))?;
        ctl.pointer_up(&mut store, &PointerEvent::new(end))?;
    }

    for (id, w) in store.walls() {
        info!(
            ?id,
            kind = ?w.kind,
            start = ?(w.start().x, w.start().y),
            end = ?(w.end().x, w.end().y),
            "wall"
        );
    }
    info!(transactions = store.journal().committed().len(), "done");
    Ok(())
}
