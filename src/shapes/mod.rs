//! Simple shapes drawn as command lists: smooth circles, squares with
//! optional missing sides, and rainbow rings of either.
use std::f64::consts::PI;

use geo_types::Point;
use num_traits::FromPrimitive;

use crate::color_wheel::ColorWheel;
use crate::errors::GeneratorError;
use crate::trochoid::DEFAULT_MINIMUM_ARC;
use crate::turtle::DrawCommand;
use crate::util::{heading_between, smooth_angle_delta};

/// Points evenly spaced around a circle of `radius` centered on the origin.
///
/// With no explicit step count, enough points are used that neighbours are
/// about [`DEFAULT_MINIMUM_ARC`] apart, so big circles stay smooth.
pub fn circle_points(radius: f64, steps: Option<usize>) -> Result<Vec<Point<f64>>, GeneratorError> {
    GeneratorError::require_positive("radius", radius)?;
    let (steps, angle_delta) = match steps {
        Some(0) => {
            return Err(GeneratorError::NonPositive {
                name: "steps",
                value: 0.0,
            })
        }
        Some(steps) => (steps, 2.0 * PI / steps as f64),
        None => {
            let angle_delta = smooth_angle_delta(radius, DEFAULT_MINIMUM_ARC);
            let steps = usize::from_f64((2.0 * PI / angle_delta).ceil()).unwrap_or(usize::MAX);
            (steps, angle_delta)
        }
    };
    Ok((0..steps)
        .map(|i| {
            let theta = i as f64 * angle_delta;
            Point::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect())
}

/// Just a regular polygon with its first vertex at `rotation` degrees.
pub fn regular_polygon(
    sides: usize,
    center: Point<f64>,
    radius: f64,
    rotation: f64,
) -> Result<Vec<DrawCommand>, GeneratorError> {
    if sides < 3 {
        return Err(GeneratorError::InvalidSideCount(sides));
    }
    GeneratorError::require_positive("radius", radius)?;
    let vertices: Vec<Point<f64>> = (0..=sides)
        .map(|i| {
            let angle = rotation.to_radians() + (i as f64 / sides as f64) * (2.0 * PI);
            center + Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect();
    Ok(trace(&vertices))
}

/// Pen up to the first point, pen down, then visit the rest, pointing the
/// turtle along each move.
fn trace(points: &[Point<f64>]) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(points.len() * 2 + 2);
    let Some(first) = points.first() else {
        return commands;
    };
    commands.extend([DrawCommand::PenUp, DrawCommand::MoveTo(*first), DrawCommand::PenDown]);
    let mut last = *first;
    for point in &points[1..] {
        if let Some(heading) = heading_between(last, *point) {
            commands.push(DrawCommand::SetHeading(heading));
        }
        commands.push(DrawCommand::MoveTo(*point));
        last = *point;
    }
    commands
}

/// # Shapes
///
/// Draws simple shapes, keeping one color wheel for the rainbow variants.
#[derive(Debug, Clone)]
pub struct Shapes {
    color_wheel: ColorWheel,
}

impl Default for Shapes {
    fn default() -> Self {
        Shapes::new()
    }
}

impl Shapes {
    pub fn new() -> Shapes {
        Shapes {
            color_wheel: ColorWheel::new(256),
        }
    }

    pub fn color_wheel(&self) -> &ColorWheel {
        &self.color_wheel
    }

    /// A square drawn from the current position, turning left at each corner.
    pub fn square(&self, size: f64) -> Vec<DrawCommand> {
        self.partial_square(size, [true; 4])
    }

    /// A square where only the sides flagged `true` are inked. The pen is
    /// left down afterwards.
    pub fn partial_square(&self, size: f64, segments: [bool; 4]) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(13);
        for drawn in segments {
            commands.push(if drawn { DrawCommand::PenDown } else { DrawCommand::PenUp });
            commands.push(DrawCommand::Forward(size));
            commands.push(DrawCommand::left(90.0));
        }
        commands.push(DrawCommand::PenDown);
        commands
    }

    /// `count` partial squares rotated evenly about the starting point, one
    /// hue per square.
    pub fn partial_squares(
        &mut self,
        size: f64,
        count: usize,
        segments: [bool; 4],
    ) -> Result<Vec<DrawCommand>, GeneratorError> {
        if count == 0 {
            return Err(GeneratorError::NonPositive {
                name: "count",
                value: 0.0,
            });
        }
        self.color_wheel.set_period(count);
        let angle_delta = 360.0 / count as f64;
        let mut commands = Vec::with_capacity(count * 15);
        for _ in 0..count {
            commands.extend(self.partial_square(size, segments));
            commands.push(DrawCommand::left(angle_delta));
            commands.push(DrawCommand::SetColor(self.color_wheel.next_color()));
        }
        Ok(commands)
    }

    /// A closed, smooth circle around `center`.
    pub fn circle(
        &self,
        radius: f64,
        center: Point<f64>,
    ) -> Result<Vec<DrawCommand>, GeneratorError> {
        let mut points: Vec<Point<f64>> = circle_points(radius, None)?
            .into_iter()
            .map(|p| p + center)
            .collect();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Ok(trace(&points))
    }

    /// Circles of `circle_radius` centered on `steps` points around a larger
    /// circle of `path_radius`. With `use_rainbow` each circle gets its own hue.
    pub fn circles_on_path(
        &mut self,
        path_radius: f64,
        circle_radius: f64,
        steps: usize,
        path_center: Point<f64>,
        use_rainbow: bool,
    ) -> Result<Vec<DrawCommand>, GeneratorError> {
        let centers = circle_points(path_radius, Some(steps))?;
        if use_rainbow {
            self.color_wheel.set_period(steps);
        }
        let mut commands = vec![];
        for p in centers {
            if use_rainbow {
                commands.push(DrawCommand::SetColor(self.color_wheel.next_color()));
            }
            commands.extend(self.circle(circle_radius, p + path_center)?);
        }
        Ok(commands)
    }
}
