use std::f64::consts::PI;

use aoer_curves_rs::prelude::*;
use geo_types::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn forwards<I: IntoIterator<Item = DrawCommand>>(commands: I) -> Vec<f64> {
    commands
        .into_iter()
        .filter_map(|c| match c {
            DrawCommand::Forward(d) => Some(d),
            _ => None,
        })
        .collect()
}

#[test]
fn flake_leaf_count_and_length() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let side_count = rng.gen_range(3..9);
        let depth = rng.gen_range(0..4);
        let edge_length = rng.gen_range(10.0..500.0);
        let config = FlakeConfig::new(side_count, depth).unwrap();
        let flake = PolyFlake::new(config.clone(), 0.0, edge_length, 1).unwrap();
        let lengths = forwards(flake);
        let expected = side_count * (side_count + 1).pow(depth);
        assert_eq!(lengths.len(), expected, "n={} depth={}", side_count, depth);
        assert_eq!(config.predicted_segment_count(), Some(expected as u64));
        let leaf = edge_length / 3f64.powi(depth as i32);
        assert!(lengths.iter().all(|d| (d - leaf).abs() < 1e-9));
    }
}

#[test]
fn flake_closes_on_itself() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..10 {
        let config = FlakeConfig::new(rng.gen_range(3..8), rng.gen_range(0..3)).unwrap();
        let direction = rng.gen_range(-180.0..180.0);
        let mut turtle = Turtle::new();
        turtle.run(PolyFlake::from_perimeter(config, direction, 600.0, 0).unwrap());
        assert!(turtle.position().distance(&Point::new(0.0, 0.0)) < 1e-6);
    }
}

#[test]
fn triangle_without_subdivision() {
    let config = FlakeConfig::new(3, 0).unwrap();
    let lengths = forwards(PolyFlake::from_perimeter(config, 0.0, 300.0, 0).unwrap());
    assert_eq!(lengths.len(), 3);
    assert!(lengths.iter().all(|d| (d - 100.0).abs() < 1e-12));
}

#[test]
fn too_few_sides_is_rejected() {
    assert_eq!(FlakeConfig::new(2, 1), Err(GeneratorError::InvalidSideCount(2)));
    assert!(matches!(
        FlakeConfig::new(3, 65),
        Err(GeneratorError::DepthTooLarge { depth: 65, .. })
    ));
}

#[test]
fn hilbert_leaf_count_and_length() {
    for depth in 0..6 {
        let curve = HilbertCurve::new(300.0, depth).unwrap();
        let lengths = forwards(curve.commands(90.0));
        assert_eq!(lengths.len() as u64, 4u64.pow(depth + 1) - 1);
        let expected = 300.0 / (2f64.powi(depth as i32 + 1) - 1.0);
        assert!(lengths.iter().all(|d| (d - expected).abs() < 1e-9));
    }
}

#[test]
fn hilbert_fills_its_square() {
    let curve = HilbertCurve::new(310.0, 4).unwrap();
    let mut turtle = Turtle::new();
    turtle.run(curve.commands(90.0));
    let bounds = turtle.bounds().unwrap();
    assert!((bounds.width() - 310.0).abs() < 1e-6);
    assert!((bounds.height() - 310.0).abs() < 1e-6);
}

#[test]
fn trochoid_sweeps_whole_turns() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..50 {
        let arm = rng.gen_range(1..300) as f64;
        let pen = rng.gen_range(1..300) as f64;
        let kind = if rng.gen_bool(0.5) {
            TrochoidKind::Epitrochoid
        } else {
            TrochoidKind::Hypotrochoid
        };
        let config = TrochoidConfig::new(arm, pen, kind).unwrap();
        let swept = config.steps() as f64 * config.angle_delta();
        let target = config.turns() as f64 * 2.0 * PI;
        assert!(swept >= target - 1e-9);
        // Each turn's step count is rounded up on its own, so the sweep can
        // overshoot by just under one step per turn.
        assert!(swept - target <= config.turns() as f64 * config.angle_delta());
    }
}

#[test]
fn equal_radii_close_in_one_turn() {
    let config = TrochoidConfig::new(70.0, 70.0, TrochoidKind::Hypotrochoid).unwrap();
    assert_eq!(config.turns(), 1);
    let mut turtle = Turtle::new();
    turtle.run(config.sample(Point::new(0.0, 0.0), 0).unwrap());
    // Rolling radius is zero, so the pen just circles the origin.
    let bounds = turtle.bounds().unwrap();
    assert!((bounds.width() - 140.0).abs() < 1.0);
}

#[test]
fn trochoid_reconfigure_never_goes_stale() {
    let config = TrochoidConfig::default();
    let changed = config.reconfigure(150.0, 45.0).unwrap();
    assert_eq!(changed, TrochoidConfig::new(150.0, 45.0, TrochoidKind::Hypotrochoid).unwrap());
    assert_eq!(changed.turns(), 3);
    assert_eq!(config.turns(), 7);
    assert!(config.reconfigure(150.0, 0.0).is_err());
}

#[test]
fn color_wheel_wraps() {
    let mut rng = SmallRng::seed_from_u64(99);
    for _ in 0..20 {
        let period = rng.gen_range(1..500);
        let mut wheel = ColorWheel::new(period);
        let first = wheel.next_color();
        for _ in 1..period {
            wheel.next_color();
        }
        assert_eq!(wheel.next_color(), first);
    }
}

#[test]
fn color_wheel_period_four() {
    let colors: Vec<[u8; 4]> = ColorWheel::new(4).take(5).map(|c| c.to_rgba8()).collect();
    assert_eq!(colors[0], [255, 0, 0, 255]);
    assert_eq!(colors[2], [0, 255, 255, 255]);
    assert_eq!(colors[4], colors[0]);
    assert_ne!(colors[1], colors[3]);
}

#[test]
fn scene_file_renders_to_svg() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("aoer-curves-scene-{}.ron", std::process::id()));
    std::fs::write(
        &path,
        r#"Scene(curves: [
            (curve: PolyFlake(side_count: 4, depth: Some(2), perimeter: 400.0, rainbow: 1)),
            (
                start: Some((-300.0, 0.0)),
                curve: CirclesOnPath(
                    path_radius: 100.0,
                    circle_radius: 20.0,
                    steps: 8,
                    rainbow: true,
                ),
            ),
        ])"#,
    )?;
    let scene = Scene::load(&path)?;
    std::fs::remove_file(&path)?;

    let mut turtle = Turtle::new();
    scene.render(&mut turtle)?;
    assert!(turtle.segment_count() > 4 * 25);
    let svg = turtle
        .to_svg(0.5)
        .ok_or_else(|| anyhow::anyhow!("empty drawing"))?
        .to_string();
    assert!(svg.contains("<path"));
    Ok(())
}
