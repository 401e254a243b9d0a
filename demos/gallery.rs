use anyhow::{anyhow, Result};
use aoer_curves_rs::prelude::*;
use geo_types::Point;
use std::path::Path;

/// Draw one of each curve and write them all out as SVGs in images/.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let out = Path::new("images");
    std::fs::create_dir_all(out)?;

    // The classic: a rainbow hypotrochoid, 200 arm and 70 pen.
    let mut turtle = Turtle::new();
    turtle.run(TrochoidConfig::default().sample(Point::new(0.0, 0.0), 1)?);
    save(&turtle, &out.join("trochoid.svg"))?;

    // A spread of spirographs side by side, both kinds.
    let mut turtle = Turtle::new();
    for (i, pen_radius) in [30.0, 50.0, 90.0].into_iter().enumerate() {
        let hypo = TrochoidConfig::new(120.0, pen_radius, TrochoidKind::Hypotrochoid)?;
        let epi = hypo.with_kind(TrochoidKind::Epitrochoid)?;
        let x = i as f64 * 500.0;
        turtle.run(hypo.sample(Point::new(x, 0.0), 2)?);
        turtle.run(epi.sample(Point::new(x, -600.0), 2)?);
    }
    save(&turtle, &out.join("trochoids.svg"))?;

    // Flakes on a triangle up to a hexagon, each with its depth picked so
    // the smallest segment is about a pixel.
    let mut turtle = Turtle::new();
    for (i, side_count) in (3..=6).enumerate() {
        let perimeter = 900.0;
        let config = FlakeConfig::with_pixel_depth(side_count, perimeter / side_count as f64)?;
        tracing::info!(side_count, depth = config.depth(), "drawing flake");
        turtle.run([
            DrawCommand::PenUp,
            DrawCommand::move_to(i as f64 * 500.0, 0.0),
            DrawCommand::PenDown,
        ]);
        turtle.run(PolyFlake::from_perimeter(config, 0.0, perimeter, 1)?);
    }
    save(&turtle, &out.join("flakes.svg"))?;

    let mut turtle = Turtle::new();
    turtle.run(HilbertCurve::new(500.0, 5)?.try_commands(90.0)?);
    save(&turtle, &out.join("hilbert.svg"))?;

    // String art and friends.
    let mut turtle = Turtle::new();
    let set = LineSet::default();
    turtle.run(set.chords(20));
    turtle.run(set.with_center(Point::new(500.0, 0.0))?.oid(1));
    turtle.run(Shapes::new().circles_on_path(150.0, 60.0, 24, Point::new(1000.0, 0.0), true)?);
    let mut walk = ComplexWalk::new(100.0)?;
    turtle.run([DrawCommand::SetColor(Rgb::new(1.0, 0.3, 0.3, 1.0))]);
    for i in 0..6 {
        turtle.run(walk.circle(1 << (i + 2))?);
    }
    save(&turtle, &out.join("string_art.svg"))?;

    Ok(())
}

fn save(turtle: &Turtle, path: &Path) -> Result<()> {
    let document = turtle
        .to_svg(1.0)
        .ok_or_else(|| anyhow!("nothing was drawn for {}", path.display()))?;
    svg::save(path, &document)?;
    tracing::info!(path = %path.display(), segments = turtle.segment_count(), "saved");
    Ok(())
}
