use crate::color_wheel::Rgb;
use crate::util::COINCIDENT_EPSILON;
use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiLineString, Point, Rect};
use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;

pub mod command;
pub use command::DrawCommand;

/// # RenderContext
///
/// The boundary between the generators and whatever actually paints. A
/// context is an explicit object owned by the caller and handed to every
/// drawing call; the generators themselves only ever produce [`DrawCommand`]s.
///
/// Angles are in degrees, 0 is the +x axis and angles increase
/// counterclockwise.
pub trait RenderContext {
    fn turn_left(&mut self, degrees: f64);

    fn turn_right(&mut self, degrees: f64) {
        self.turn_left(-degrees);
    }

    fn set_heading(&mut self, degrees: f64);

    /// Move along the current heading, drawing if the pen is down.
    fn forward(&mut self, distance: f64);

    fn pen_up(&mut self);

    fn pen_down(&mut self);

    /// Jump straight to a point, drawing if the pen is down.
    fn move_to(&mut self, point: Point<f64>);

    fn set_color(&mut self, color: &Rgb);

    /// Execute a single command.
    fn apply(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Turn(degrees) => self.turn_left(*degrees),
            DrawCommand::Forward(distance) => self.forward(*distance),
            DrawCommand::PenUp => self.pen_up(),
            DrawCommand::PenDown => self.pen_down(),
            DrawCommand::SetColor(color) => self.set_color(color),
            DrawCommand::SetHeading(degrees) => self.set_heading(*degrees),
            DrawCommand::MoveTo(point) => self.move_to(*point),
        }
    }

    /// Drain a command stream into this context, returning how many commands ran.
    fn run<I>(&mut self, commands: I) -> usize
    where
        I: IntoIterator<Item = DrawCommand>,
        Self: Sized,
    {
        let mut count = 0;
        for command in commands {
            self.apply(&command);
            count += 1;
        }
        count
    }
}

/// A run of connected segments drawn in one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub line: LineString<f64>,
}

/// # Turtle
///
/// A logo-style turtle which records everything it draws instead of painting
/// it. Starts at the origin, facing +x, pen down, drawing in white.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::turtle::{DrawCommand, RenderContext, Turtle};
///
/// let mut t = Turtle::new();
/// t.run((0..4).flat_map(|_| [DrawCommand::Forward(100.0), DrawCommand::left(90.0)]));
/// assert_eq!(t.segment_count(), 4);
/// assert!(t.position().x().abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Turtle {
    strokes: Vec<Stroke>,
    position: Point<f64>,
    heading: f64,
    pen: bool,
    color: Rgb,
    segments: usize,
}

impl Default for Turtle {
    fn default() -> Self {
        Turtle::new()
    }
}

impl Turtle {
    pub fn new() -> Turtle {
        Turtle {
            strokes: vec![],
            position: Point::new(0.0, 0.0),
            heading: 0.0,
            pen: true,
            color: Rgb::new(1.0, 1.0, 1.0, 1.0),
            segments: 0,
        }
    }

    /// Start somewhere other than the origin, without drawing to get there.
    pub fn at(x: f64, y: f64) -> Turtle {
        Turtle {
            position: Point::new(x, y),
            ..Turtle::new()
        }
    }

    pub fn position(&self) -> Point<f64> {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_down(&self) -> bool {
        self.pen
    }

    pub fn color(&self) -> &Rgb {
        &self.color
    }

    /// Number of non-empty segments drawn so far.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    fn draw_to(&mut self, target: Point<f64>) {
        if self.pen {
            let extend = match self.strokes.last() {
                Some(stroke) => {
                    stroke.color == self.color
                        && stroke
                            .line
                            .0
                            .last()
                            .map(|c| Point::from(*c) == self.position)
                            .unwrap_or(false)
                }
                None => false,
            };
            if !extend {
                self.strokes.push(Stroke {
                    color: self.color.clone(),
                    line: LineString::new(vec![Coord::from(self.position)]),
                });
            }
            if let Some(stroke) = self.strokes.last_mut() {
                stroke.line.0.push(Coord::from(target));
            }
            let delta = target - self.position;
            if delta.x().hypot(delta.y()) > COINCIDENT_EPSILON {
                self.segments += 1;
            }
        }
        self.position = target;
    }

    /// Everything drawn so far, ignoring color.
    pub fn to_multiline(&self) -> MultiLineString<f64> {
        self.strokes.iter().map(|s| s.line.clone()).collect()
    }

    /// Bounding box of everything drawn so far, or None if nothing was drawn.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.to_multiline().bounding_rect()
    }

    /// Build an SVG document with one path per stroke. Turtle space is y-up,
    /// so the y axis is flipped on the way out.
    pub fn to_svg(&self, stroke_width: f64) -> Option<Document> {
        let bounds = self.bounds()?;
        let margin = stroke_width.max(1.0);
        let mut document = Document::new().set(
            "viewBox",
            (
                bounds.min().x - margin,
                -bounds.max().y - margin,
                bounds.width() + 2.0 * margin,
                bounds.height() + 2.0 * margin,
            ),
        );
        for stroke in &self.strokes {
            let mut data = Data::new();
            for (i, coord) in stroke.line.coords().enumerate() {
                data = if i == 0 {
                    data.move_to((coord.x, -coord.y))
                } else {
                    data.line_to((coord.x, -coord.y))
                };
            }
            let [r, g, b, _] = stroke.color.to_rgba8();
            let path = Path::new()
                .set("fill", "none")
                .set("stroke", format!("#{:02x}{:02x}{:02x}", r, g, b))
                .set("stroke-width", stroke_width)
                .set("stroke-linecap", "round")
                .set("d", data);
            document = document.add(path);
        }
        Some(document)
    }
}

impl RenderContext for Turtle {
    fn turn_left(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }

    fn forward(&mut self, distance: f64) {
        let radians = self.heading.to_radians();
        let target = self.position + Point::new(distance * radians.cos(), distance * radians.sin());
        self.draw_to(target);
    }

    fn pen_up(&mut self) {
        self.pen = false;
    }

    fn pen_down(&mut self) {
        self.pen = true;
    }

    fn move_to(&mut self, point: Point<f64>) {
        self.draw_to(point);
    }

    fn set_color(&mut self, color: &Rgb) {
        self.color = color.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RenderContext, Turtle};
    use crate::util::PointDistance;
    use geo_types::Point;

    #[test]
    fn test_simple_box() {
        let mut t = Turtle::new();
        for _ in 0..4 {
            t.forward(100.0);
            t.turn_right(90.0);
        }
        let lines = t.to_multiline();
        assert_eq!(lines.0.len(), 1);
        let line = &lines.0[0];
        let expected = [(0.0, 0.0), (100.0, 0.0), (100.0, -100.0), (0.0, -100.0), (0.0, 0.0)];
        for (coord, (x, y)) in line.coords().zip(expected) {
            assert!(Point::from(*coord).distance(&Point::new(x, y)) < 0.0001f64);
        }
        assert_eq!(t.segment_count(), 4);
    }

    #[test]
    fn test_pen_up_moves_without_drawing() {
        let mut t = Turtle::new();
        t.pen_up();
        t.forward(10.0);
        t.move_to(Point::new(5.0, 5.0));
        assert!(t.strokes().is_empty());
        assert_eq!(t.position(), Point::new(5.0, 5.0));
        t.pen_down();
        t.forward(1.0);
        assert_eq!(t.segment_count(), 1);
    }

    #[test]
    fn test_color_change_starts_new_stroke() {
        let mut t = Turtle::new();
        t.forward(1.0);
        t.set_color(&crate::color_wheel::Rgb::new(1.0, 0.0, 0.0, 1.0));
        t.forward(1.0);
        t.forward(1.0);
        assert_eq!(t.strokes().len(), 2);
        assert_eq!(t.strokes()[1].line.0.len(), 3);
    }

    #[test]
    fn test_run_counts_commands() {
        let mut t = Turtle::new();
        let n = t.run(vec![
            DrawCommand::SetHeading(90.0),
            DrawCommand::Forward(2.0),
            DrawCommand::left(90.0),
            DrawCommand::Forward(2.0),
        ]);
        assert_eq!(n, 4);
        assert!(t.position().distance(&Point::new(-2.0, 2.0)) < 1e-9);
        assert!((t.heading() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_svg_and_bounds() {
        let mut t = Turtle::new();
        assert!(t.to_svg(1.0).is_none());
        t.forward(10.0);
        let bounds = t.bounds().unwrap();
        assert!((bounds.width() - 10.0).abs() < 1e-9);
        let svg = t.to_svg(1.0).unwrap().to_string();
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn test_starts_elsewhere() {
        let mut t = Turtle::at(5.0, -3.0);
        assert_eq!(t.position(), Point::new(5.0, -3.0));
        assert!(t.strokes().is_empty());
        t.set_heading(90.0);
        t.forward(2.0);
        let bounds = t.bounds().unwrap();
        assert!((bounds.min().y + 3.0).abs() < 1e-9);
        assert!((bounds.max().y + 1.0).abs() < 1e-9);
    }
}
