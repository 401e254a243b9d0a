//! Turtle-drawn Hilbert curves, colored leaf by leaf so the whole curve spans
//! one trip around the color wheel.
use crate::color_wheel::{ColorWheel, MAX_PALETTE_SIZE};
use crate::errors::GeneratorError;
use crate::turtle::DrawCommand;

/// Deepest curve whose segment count still fits a u64.
pub const MAX_HILBERT_DEPTH: u32 = 30;

/// # HilbertCurve
///
/// Shape of a Hilbert curve filling a square of side `edge_length`. Use
/// [`HilbertCurve::commands`] to get the lazy command stream.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::hilbert::HilbertCurve;
/// use aoer_curves_rs::turtle::{RenderContext, Turtle};
///
/// let curve = HilbertCurve::new(70.0, 2).unwrap();
/// let mut turtle = Turtle::new();
/// turtle.run(curve.commands(90.0));
/// assert_eq!(turtle.segment_count(), 63);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HilbertCurve {
    edge_length: f64,
    depth: u32,
    segment_length: f64,
    segment_count: u64,
}

impl HilbertCurve {
    pub fn new(edge_length: f64, depth: u32) -> Result<HilbertCurve, GeneratorError> {
        GeneratorError::require_positive("edge_length", edge_length)?;
        if depth > MAX_HILBERT_DEPTH {
            return Err(GeneratorError::DepthTooLarge {
                depth,
                limit: MAX_HILBERT_DEPTH,
            });
        }
        let cells = 1u64 << (depth + 1);
        Ok(HilbertCurve {
            edge_length,
            depth,
            segment_length: edge_length / (cells - 1) as f64,
            segment_count: cells * cells - 1,
        })
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `edge_length / (2^(depth+1) - 1)`
    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    /// `4^(depth+1) - 1`
    pub fn segment_count(&self) -> u64 {
        self.segment_count
    }

    /// Lazily walk the curve. `direction` is the turn angle used at every
    /// corner (90 gives the usual curve; its sign picks the handedness).
    ///
    /// Curves with more than [`MAX_PALETTE_SIZE`] segments reuse hues.
    pub fn commands(&self, direction: f64) -> HilbertCommands {
        HilbertCommands {
            segment_length: self.segment_length,
            color_wheel: ColorWheel::new(self.palette_size()),
            stack: vec![Step::Call {
                direction,
                depth: self.depth as i32,
            }],
        }
    }

    /// Like [`HilbertCurve::commands`], refusing curves too large to color.
    pub fn try_commands(&self, direction: f64) -> Result<HilbertCommands, GeneratorError> {
        GeneratorError::require_finite("direction", direction)?;
        if self.segment_count > MAX_PALETTE_SIZE {
            return Err(GeneratorError::TooManySegments {
                predicted: Some(self.segment_count),
                limit: MAX_PALETTE_SIZE,
            });
        }
        tracing::debug!(
            depth = self.depth,
            segments = self.segment_count,
            segment_length = self.segment_length,
            "walking hilbert curve"
        );
        Ok(self.commands(direction))
    }

    fn palette_size(&self) -> usize {
        self.segment_count.min(MAX_PALETTE_SIZE) as usize
    }
}

/// One entry on the explicit recursion stack.
#[derive(Debug, Clone, Copy)]
enum Step {
    Call { direction: f64, depth: i32 },
    Turn(f64),
    Leaf,
    Forward,
}

/// Lazy command stream for a [`HilbertCurve`]. Each leaf segment yields a
/// `SetColor` followed by a `Forward`; corners yield `Turn`s.
#[derive(Debug, Clone)]
pub struct HilbertCommands {
    segment_length: f64,
    color_wheel: ColorWheel,
    stack: Vec<Step>,
}

impl HilbertCommands {
    fn expand(&mut self, direction: f64, depth: i32) {
        if depth < 0 {
            return;
        }
        let inner = depth - 1;
        // left, recurse flipped, leaf, right, recurse, leaf, recurse,
        // right, leaf, recurse flipped, right by the flipped angle.
        let steps = [
            Step::Turn(direction),
            Step::Call {
                direction: -direction,
                depth: inner,
            },
            Step::Leaf,
            Step::Turn(-direction),
            Step::Call {
                direction,
                depth: inner,
            },
            Step::Leaf,
            Step::Call {
                direction,
                depth: inner,
            },
            Step::Turn(-direction),
            Step::Leaf,
            Step::Call {
                direction: -direction,
                depth: inner,
            },
            Step::Turn(direction),
        ];
        self.stack.extend(steps.iter().rev());
    }
}

impl Iterator for HilbertCommands {
    type Item = DrawCommand;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Step::Call { direction, depth } => self.expand(direction, depth),
                Step::Turn(degrees) => return Some(DrawCommand::Turn(degrees)),
                Step::Leaf => {
                    self.stack.push(Step::Forward);
                    return Some(DrawCommand::SetColor(self.color_wheel.next_color()));
                }
                Step::Forward => return Some(DrawCommand::Forward(self.segment_length)),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::turtle::{RenderContext, Turtle};
    use std::collections::HashSet;

    #[test]
    fn test_segment_math() {
        let curve = HilbertCurve::new(70.0, 2).unwrap();
        assert_eq!(curve.segment_count(), 63);
        assert!((curve.segment_length() - 10.0).abs() < 1e-12);
        let curve = HilbertCurve::new(1.0, 0).unwrap();
        assert_eq!(curve.segment_count(), 3);
        assert!((curve.segment_length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(HilbertCurve::new(0.0, 2).is_err());
        assert!(HilbertCurve::new(10.0, MAX_HILBERT_DEPTH + 1).is_err());
        let huge = HilbertCurve::new(10.0, 12).unwrap();
        assert!(huge.try_commands(90.0).is_err());
    }

    #[test]
    fn test_leaf_counts_and_lengths() {
        for depth in 0..6 {
            let curve = HilbertCurve::new(100.0, depth).unwrap();
            let forwards: Vec<f64> = curve
                .try_commands(90.0)
                .unwrap()
                .filter_map(|c| match c {
                    DrawCommand::Forward(d) => Some(d),
                    _ => None,
                })
                .collect();
            assert_eq!(forwards.len() as u64, 4u64.pow(depth + 1) - 1);
            assert!(forwards.iter().all(|d| (d - curve.segment_length()).abs() < 1e-12));
        }
    }

    #[test]
    fn test_visits_every_cell_once() {
        let depth = 3;
        let curve = HilbertCurve::new(15.0, depth).unwrap();
        let mut turtle = Turtle::new();
        turtle.pen_up();
        let mut seen = HashSet::new();
        seen.insert((0i64, 0i64));
        for command in curve.commands(90.0) {
            turtle.apply(&command);
            if let DrawCommand::Forward(_) = command {
                let p = turtle.position();
                assert!(seen.insert((p.x().round() as i64, p.y().round() as i64)));
            }
        }
        assert_eq!(seen.len(), 256);
        for (x, y) in seen {
            assert!((0..16).contains(&x) && (0..16).contains(&y));
        }
    }

    #[test]
    fn test_every_leaf_gets_its_own_hue() {
        let curve = HilbertCurve::new(100.0, 1).unwrap();
        let colors: Vec<[u8; 4]> = curve
            .commands(90.0)
            .filter_map(|c| match c {
                DrawCommand::SetColor(color) => Some(color.to_rgba8()),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 15);
        let unique: HashSet<[u8; 4]> = colors.iter().cloned().collect();
        assert_eq!(unique.len(), 15);
    }
}
