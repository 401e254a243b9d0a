//! A scene is a list of curves described in RON, each built into its
//! generator and chained into one command stream.
//!
//! ```
//! use aoer_curves_rs::scene::Scene;
//! use aoer_curves_rs::turtle::{RenderContext, Turtle};
//!
//! let scene = Scene::from_ron(r#"
//!     Scene(curves: [
//!         (curve: PolyFlake(side_count: 3, depth: Some(1), perimeter: 300.0)),
//!         (start: Some((200.0, 0.0)), curve: Hilbert(edge_length: 70.0, depth: 2)),
//!     ])
//! "#).unwrap();
//! let mut turtle = Turtle::new();
//! scene.render(&mut turtle).unwrap();
//! assert_eq!(turtle.segment_count(), 12 + 63);
//! ```
use std::path::Path;

use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::complex_walk::ComplexWalk;
use crate::errors::{GeneratorError, SceneError};
use crate::flake::{FlakeConfig, PolyFlake};
use crate::hilbert::HilbertCurve;
use crate::linesets::LineSet;
use crate::shapes::Shapes;
use crate::trochoid::TrochoidConfig;
use crate::turtle::{DrawCommand, RenderContext};

fn right_angle() -> f64 {
    90.0
}

fn one() -> u32 {
    1
}

/// One curve and the parameters needed to build it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum CurveSpec {
    /// A polygon flake. Without a depth, the depth is picked so the smallest
    /// segment is about a pixel.
    PolyFlake {
        side_count: usize,
        #[serde(default)]
        depth: Option<u32>,
        perimeter: f64,
        #[serde(default)]
        direction: f64,
        #[serde(default)]
        rainbow: u32,
    },
    Hilbert {
        edge_length: f64,
        depth: u32,
        #[serde(default = "right_angle")]
        direction: f64,
    },
    Trochoid {
        config: TrochoidConfig,
        #[serde(default)]
        center: (f64, f64),
        #[serde(default = "one")]
        rainbow_count: u32,
    },
    Chords {
        #[serde(default)]
        center: (f64, f64),
        radius: f64,
        point_count: usize,
        #[serde(default)]
        skip: usize,
    },
    CirclesOnPath {
        #[serde(default)]
        center: (f64, f64),
        path_radius: f64,
        circle_radius: f64,
        steps: usize,
        #[serde(default)]
        rainbow: bool,
    },
    ComplexCircle {
        pixels_per_unit: f64,
        divisions: usize,
    },
}

impl CurveSpec {
    /// Build the generator and hand back its command stream. All validation
    /// happens here, before anything is drawn.
    pub fn commands(&self) -> Result<Box<dyn Iterator<Item = DrawCommand>>, GeneratorError> {
        Ok(match self {
            CurveSpec::PolyFlake {
                side_count,
                depth,
                perimeter,
                direction,
                rainbow,
            } => {
                let config = match depth {
                    Some(depth) => FlakeConfig::new(*side_count, *depth)?,
                    None => {
                        let edge_length = perimeter / *side_count as f64;
                        FlakeConfig::with_pixel_depth(*side_count, edge_length)?
                    }
                };
                Box::new(PolyFlake::from_perimeter(config, *direction, *perimeter, *rainbow)?)
            }
            CurveSpec::Hilbert {
                edge_length,
                depth,
                direction,
            } => Box::new(HilbertCurve::new(*edge_length, *depth)?.try_commands(*direction)?),
            CurveSpec::Trochoid {
                config,
                center,
                rainbow_count,
            } => Box::new(config.sample(Point::from(*center), *rainbow_count)?),
            CurveSpec::Chords {
                center,
                radius,
                point_count,
                skip,
            } => {
                let set = LineSet::new(Point::from(*center), *radius, *point_count)?;
                Box::new(set.chords(*skip).collect::<Vec<_>>().into_iter())
            }
            CurveSpec::CirclesOnPath {
                center,
                path_radius,
                circle_radius,
                steps,
                rainbow,
            } => Box::new(
                Shapes::new()
                    .circles_on_path(
                        *path_radius,
                        *circle_radius,
                        *steps,
                        Point::from(*center),
                        *rainbow,
                    )?
                    .into_iter(),
            ),
            CurveSpec::ComplexCircle {
                pixels_per_unit,
                divisions,
            } => {
                let mut walk = ComplexWalk::new(*pixels_per_unit)?;
                let commands: Vec<DrawCommand> = walk.circle(*divisions)?.collect();
                Box::new(commands.into_iter())
            }
        })
    }
}

/// A curve plus, optionally, where to start it. Without a start the curve
/// picks up wherever the previous one left off.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneCurve {
    #[serde(default)]
    pub start: Option<(f64, f64)>,
    pub curve: CurveSpec,
}

impl From<CurveSpec> for SceneCurve {
    fn from(curve: CurveSpec) -> Self {
        SceneCurve { start: None, curve }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub curves: Vec<SceneCurve>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene { curves: Vec::new() }
    }

    pub fn add(&mut self, curve: impl Into<SceneCurve>) {
        self.curves.push(curve.into());
    }

    pub fn from_ron(data: &str) -> Result<Scene, SceneError> {
        let scene: Scene = ron::from_str(data)?;
        tracing::info!(curves = scene.curves.len(), "loaded scene");
        Ok(scene)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "reading scene");
        Scene::from_ron(&data)
    }

    pub fn to_ron(&self) -> Result<String, SceneError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Every curve's commands, one after another. Fails on the first curve
    /// that does not validate, without producing anything.
    pub fn commands(&self) -> Result<impl Iterator<Item = DrawCommand>, SceneError> {
        let mut streams = Vec::with_capacity(self.curves.len());
        for entry in &self.curves {
            let jump: Vec<DrawCommand> = match entry.start {
                Some((x, y)) => vec![
                    DrawCommand::PenUp,
                    DrawCommand::move_to(x, y),
                    DrawCommand::PenDown,
                ],
                None => vec![],
            };
            streams.push(jump.into_iter().chain(entry.curve.commands()?));
        }
        Ok(streams.into_iter().flatten())
    }

    /// Draw the whole scene, returning how many commands ran.
    pub fn render<R: RenderContext>(&self, context: &mut R) -> Result<usize, SceneError> {
        let count = context.run(self.commands()?);
        tracing::info!(commands = count, "rendered scene");
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trochoid::TrochoidKind;
    use crate::turtle::Turtle;

    #[test]
    fn test_parse_and_render() {
        let scene = Scene::from_ron(
            r#"Scene(curves: [
                (curve: Trochoid(config: (arm_radius: 200.0, pen_radius: 70.0))),
                (start: Some((500.0, 0.0)), curve: Chords(radius: 100.0, point_count: 12, skip: 1)),
            ])"#,
        )
        .unwrap();
        assert_eq!(scene.curves.len(), 2);
        match &scene.curves[0].curve {
            CurveSpec::Trochoid {
                config, rainbow_count, ..
            } => {
                assert_eq!(config.kind(), TrochoidKind::Hypotrochoid);
                assert_eq!(config.turns(), 7);
                assert_eq!(*rainbow_count, 1);
            }
            other => panic!("unexpected curve {:?}", other),
        }
        let mut turtle = Turtle::new();
        scene.render(&mut turtle).unwrap();
        // The first sample sits on the start point, so it draws nothing.
        assert_eq!(turtle.segment_count(), 4402 + 12);
    }

    #[test]
    fn test_invalid_curve_is_rejected() {
        let scene = Scene::from_ron(
            "Scene(curves: [(curve: PolyFlake(side_count: 2, depth: Some(1), perimeter: 10.0))])",
        )
        .unwrap();
        assert!(matches!(
            scene.commands().err(),
            Some(SceneError::Generator(GeneratorError::InvalidSideCount(2)))
        ));
        // Validation of the trochoid happens while parsing.
        let bad = Scene::from_ron(
            "Scene(curves: [(curve: Trochoid(config: (arm_radius: 0.0, pen_radius: 70.0)))])",
        );
        assert!(matches!(bad, Err(SceneError::Parse(_))));
        assert!(matches!(Scene::from_ron("Scene(curves: ["), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_ron_round_trip() {
        let mut scene = Scene::new();
        scene.add(CurveSpec::Hilbert {
            edge_length: 70.0,
            depth: 2,
            direction: 90.0,
        });
        scene.add(SceneCurve {
            start: Some((10.0, 20.0)),
            curve: CurveSpec::ComplexCircle {
                pixels_per_unit: 100.0,
                divisions: 16,
            },
        });
        let text = scene.to_ron().unwrap();
        assert_eq!(Scene::from_ron(&text).unwrap(), scene);
    }

    #[test]
    fn test_flake_depth_from_pixels() {
        let scene = Scene {
            curves: vec![CurveSpec::PolyFlake {
                side_count: 3,
                depth: None,
                perimeter: 81.0,
                direction: 0.0,
                rainbow: 0,
            }
            .into()],
        };
        let mut turtle = Turtle::new();
        scene.render(&mut turtle).unwrap();
        // Edges of 27 reach a one pixel segment at depth 3.
        assert_eq!(turtle.segment_count(), 3 * 4usize.pow(3));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scene::load("/definitely/not/a/scene.ron"),
            Err(SceneError::Io(_))
        ));
    }
}
