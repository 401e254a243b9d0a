use crate::color_wheel::Rgb;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// One drawing primitive, as consumed by a [`super::RenderContext`].
///
/// Angles are degrees. Headings are absolute (0 = +x, counterclockwise);
/// `Turn` is relative, with positive values turning left.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Turn(f64),
    Forward(f64),
    PenUp,
    PenDown,
    SetColor(Rgb),
    SetHeading(f64),
    MoveTo(Point<f64>),
}

impl DrawCommand {
    /// Turn right by `degrees`, expressed as a (negative) left turn.
    pub fn right(degrees: f64) -> DrawCommand {
        DrawCommand::Turn(-degrees)
    }

    pub fn left(degrees: f64) -> DrawCommand {
        DrawCommand::Turn(degrees)
    }

    pub fn move_to(x: f64, y: f64) -> DrawCommand {
        DrawCommand::MoveTo(Point::new(x, y))
    }

    /// True for commands that can leave ink on the page.
    pub fn is_motion(&self) -> bool {
        matches!(self, DrawCommand::Forward(_) | DrawCommand::MoveTo(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_turn_helpers() {
        assert_eq!(DrawCommand::left(30.0), DrawCommand::Turn(30.0));
        assert_eq!(DrawCommand::right(30.0), DrawCommand::Turn(-30.0));
    }

    #[test]
    fn test_motion() {
        assert!(DrawCommand::Forward(1.0).is_motion());
        assert!(DrawCommand::move_to(1.0, 2.0).is_motion());
        assert!(!DrawCommand::PenUp.is_motion());
        assert!(!DrawCommand::SetHeading(90.0).is_motion());
        assert!(!DrawCommand::left(90.0).is_motion());
    }
}
