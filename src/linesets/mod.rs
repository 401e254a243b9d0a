//! String-art style patterns: straight chords between points spread evenly
//! around a circle.
use std::f64::consts::PI;

use geo_types::Point;

use crate::errors::GeneratorError;
use crate::turtle::DrawCommand;

/// # LineSet
///
/// `point_count` points evenly spread around a circle. The chord drawing
/// methods join them up in different orders.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::linesets::LineSet;
/// use aoer_curves_rs::turtle::{RenderContext, Turtle};
/// use geo_types::Point;
///
/// let set = LineSet::new(Point::new(0.0, 0.0), 200.0, 180).unwrap();
/// let mut turtle = Turtle::new();
/// turtle.run(set.chords(10));
/// assert_eq!(turtle.segment_count(), 180);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineSet {
    center: Point<f64>,
    radius: f64,
    point_count: usize,
    points: Vec<Point<f64>>,
}

impl Default for LineSet {
    fn default() -> Self {
        LineSet {
            center: Point::new(0.0, 0.0),
            radius: 200.0,
            point_count: 180,
            points: LineSet::create_points(Point::new(0.0, 0.0), 200.0, 180),
        }
    }
}

impl LineSet {
    pub fn new(
        center: Point<f64>,
        radius: f64,
        point_count: usize,
    ) -> Result<LineSet, GeneratorError> {
        GeneratorError::require_finite("center.x", center.x())?;
        GeneratorError::require_finite("center.y", center.y())?;
        GeneratorError::require_positive("radius", radius)?;
        if point_count == 0 {
            return Err(GeneratorError::NonPositive {
                name: "point_count",
                value: 0.0,
            });
        }
        Ok(LineSet {
            center,
            radius,
            point_count,
            points: LineSet::create_points(center, radius, point_count),
        })
    }

    fn create_points(center: Point<f64>, radius: f64, point_count: usize) -> Vec<Point<f64>> {
        let angle_delta = 2.0 * PI / point_count as f64;
        (0..point_count)
            .map(|q| {
                let theta = q as f64 * angle_delta;
                center + Point::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect()
    }

    pub fn with_center(&self, center: Point<f64>) -> Result<LineSet, GeneratorError> {
        LineSet::new(center, self.radius, self.point_count)
    }

    pub fn with_radius(&self, radius: f64) -> Result<LineSet, GeneratorError> {
        LineSet::new(self.center, radius, self.point_count)
    }

    pub fn with_point_count(&self, point_count: usize) -> Result<LineSet, GeneratorError> {
        LineSet::new(self.center, self.radius, point_count)
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    fn chord(from: Point<f64>, to: Point<f64>) -> [DrawCommand; 4] {
        [
            DrawCommand::PenUp,
            DrawCommand::MoveTo(from),
            DrawCommand::PenDown,
            DrawCommand::MoveTo(to),
        ]
    }

    fn joined<'a, F>(&'a self, target: F) -> impl Iterator<Item = DrawCommand> + 'a
    where
        F: Fn(usize) -> usize,
        F: 'a,
    {
        self.points.iter().enumerate().flat_map(move |(index, point)| {
            LineSet::chord(*point, self.points[target(index) % self.point_count])
        })
    }

    /// Join every point to the one just past the opposite side of the circle,
    /// `skip + 1` points beyond half way round.
    pub fn chords(&self, skip: usize) -> impl Iterator<Item = DrawCommand> + '_ {
        let half = self.point_count / 2;
        self.joined(move |index| index + half + skip + 1)
    }

    /// Join point `i` to point `i + 2 + i * skip`, which makes cardioid-like
    /// envelopes for small skips.
    pub fn oid(&self, skip: usize) -> impl Iterator<Item = DrawCommand> + '_ {
        self.joined(move |index| index + 2 + index * skip)
    }

    /// A dot at every point: a zero length stroke.
    pub fn dots(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        std::iter::once(DrawCommand::SetHeading(90.0)).chain(self.points.iter().flat_map(|point| {
            [
                DrawCommand::PenUp,
                DrawCommand::MoveTo(*point),
                DrawCommand::PenDown,
                DrawCommand::Forward(0.0),
            ]
        }))
    }
}
