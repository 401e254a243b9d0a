//! Recursive polygon flakes: a generalization of the Koch snowflake to any
//! regular polygon. Every edge is replaced by a notched copy of itself one
//! third the size, over and over, until the requested depth is reached.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::color_wheel::{ColorWheel, MAX_PALETTE_SIZE};
use crate::errors::GeneratorError;
use crate::turtle::DrawCommand;

/// Hard ceiling on recursion depth, whatever the caller asks for.
pub const MAX_RECURSION_DEPTH: u32 = 64;

/// Most sides a flake polygon may have. The turn sequence holds one entry per
/// side, and past this the polygon is a circle at any plotting scale anyway.
pub const MAX_SIDE_COUNT: usize = 1 << 16;

/// # FlakeConfig
///
/// Side count, recursion depth and the turn sequence derived from the side
/// count. Immutable; a different side count means a different config.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "FlakeParams", into = "FlakeParams")]
pub struct FlakeConfig {
    side_count: usize,
    depth: u32,
    turns: Vec<f64>,
}

/// The serialized form of a [`FlakeConfig`]: just the inputs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FlakeParams {
    pub side_count: usize,
    pub depth: u32,
}

impl TryFrom<FlakeParams> for FlakeConfig {
    type Error = GeneratorError;

    fn try_from(params: FlakeParams) -> Result<Self, Self::Error> {
        FlakeConfig::new(params.side_count, params.depth)
    }
}

impl From<FlakeConfig> for FlakeParams {
    fn from(config: FlakeConfig) -> Self {
        FlakeParams {
            side_count: config.side_count,
            depth: config.depth,
        }
    }
}

impl FlakeConfig {
    pub fn new(side_count: usize, depth: u32) -> Result<FlakeConfig, GeneratorError> {
        if !(3..=MAX_SIDE_COUNT).contains(&side_count) {
            return Err(GeneratorError::InvalidSideCount(side_count));
        }
        if depth > MAX_RECURSION_DEPTH {
            return Err(GeneratorError::DepthTooLarge {
                depth,
                limit: MAX_RECURSION_DEPTH,
            });
        }
        let exterior = 360.0 / side_count as f64;
        let interior = 180.0 - exterior;
        let mut turns = Vec::with_capacity(side_count + 1);
        turns.push(0.0);
        turns.push(-interior);
        turns.extend(std::iter::repeat(exterior).take(side_count - 2));
        turns.push(-interior);
        Ok(FlakeConfig {
            side_count,
            depth,
            turns,
        })
    }

    /// Config whose smallest segment comes out at about one pixel for this edge.
    pub fn with_pixel_depth(
        side_count: usize,
        edge_length: f64,
    ) -> Result<FlakeConfig, GeneratorError> {
        FlakeConfig::new(side_count, FlakeConfig::pixel_depth(edge_length))
    }

    /// `ceil(log3(edge_length))`, clamped to `[0, MAX_RECURSION_DEPTH]`.
    ///
    /// Edges shorter than a pixel are not subdivided at all.
    pub fn pixel_depth(edge_length: f64) -> u32 {
        if !(edge_length > 1.0) {
            return 0;
        }
        if !edge_length.is_finite() {
            return MAX_RECURSION_DEPTH;
        }
        // Shave off float noise so exact powers of three don't round up a level.
        let depth = (edge_length.ln() / 3f64.ln() - 1e-9).ceil();
        (depth.max(0.0) as u32).min(MAX_RECURSION_DEPTH)
    }

    pub fn side_count(&self) -> usize {
        self.side_count
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn exterior_angle(&self) -> f64 {
        360.0 / self.side_count as f64
    }

    pub fn interior_angle(&self) -> f64 {
        180.0 - self.exterior_angle()
    }

    /// Relative heading changes applied, in order, before each child segment.
    pub fn turns(&self) -> &[f64] {
        &self.turns
    }

    /// Leaf segments in a full polygon: `n * (n + 1)^depth`, or None on overflow.
    pub fn predicted_segment_count(&self) -> Option<u64> {
        let n = self.side_count as u64;
        n.checked_add(1)?.checked_pow(self.depth)?.checked_mul(n)
    }

    /// Leaf segments produced by one edge: `(n + 1)^depth`, or None on overflow.
    pub fn segments_per_edge(&self) -> Option<u64> {
        (self.side_count as u64).checked_add(1)?.checked_pow(self.depth)
    }

    pub fn smallest_segment(&self, edge_length: f64) -> f64 {
        edge_length / 3f64.powi(self.depth as i32)
    }
}

/// A pending unit of work: expand one segment at the given level.
#[derive(Debug, Clone, Copy)]
struct Frame {
    direction: f64,
    length: f64,
    depth: u32,
}

/// # PolyFlake
///
/// Lazily draws a whole flake: every outer edge of the polygon, each one
/// expanded down to the configured depth. Each leaf segment yields
/// `SetHeading`, an optional `SetColor` and `Forward`.
///
/// The recursion runs on an explicit stack, so memory is bounded by
/// `depth * (side_count + 1)` frames no matter how many segments come out.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::flake::{FlakeConfig, PolyFlake};
/// use aoer_curves_rs::turtle::{RenderContext, Turtle};
///
/// let config = FlakeConfig::new(3, 2).unwrap();
/// let flake = PolyFlake::new(config, 0.0, 270.0, 0).unwrap();
/// let mut turtle = Turtle::new();
/// turtle.run(flake);
/// assert_eq!(turtle.segment_count(), 3 * 4 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct PolyFlake {
    config: FlakeConfig,
    edge_length: f64,
    /// Cumulative heading offset of each child relative to its parent.
    offsets: Vec<f64>,
    color_wheel: Option<ColorWheel>,
    stack: Vec<Frame>,
    pending: VecDeque<DrawCommand>,
    segment_count: u64,
}

impl PolyFlake {
    /// `rainbow` > 0 colors the flake so the hue wraps `rainbow` times over
    /// the whole polygon; 0 leaves the pen color alone.
    pub fn new(
        config: FlakeConfig,
        direction: f64,
        edge_length: f64,
        rainbow: u32,
    ) -> Result<PolyFlake, GeneratorError> {
        GeneratorError::require_finite("direction", direction)?;
        GeneratorError::require_positive("edge_length", edge_length)?;

        let predicted = config.predicted_segment_count();
        let color_wheel = if rainbow > 0 {
            match predicted {
                Some(count) if count / rainbow as u64 <= MAX_PALETTE_SIZE => {
                    Some(ColorWheel::for_ratio(count, rainbow as u64))
                }
                _ => {
                    return Err(GeneratorError::TooManySegments {
                        predicted,
                        limit: MAX_PALETTE_SIZE,
                    })
                }
            }
        } else {
            None
        };
        tracing::debug!(
            side_count = config.side_count,
            depth = config.depth,
            ?predicted,
            edge_length,
            rainbow,
            "building poly flake"
        );

        let offsets = config
            .turns
            .iter()
            .scan(0.0, |acc, turn| {
                *acc += turn;
                Some(*acc)
            })
            .collect();

        let exterior = config.exterior_angle();
        // Edges come off the stack last-pushed first, so push them in reverse.
        let stack = (1..=config.side_count)
            .rev()
            .map(|i| Frame {
                direction: direction + exterior * i as f64,
                length: edge_length,
                depth: 0,
            })
            .collect();

        Ok(PolyFlake {
            config,
            edge_length,
            offsets,
            color_wheel,
            stack,
            pending: VecDeque::with_capacity(3),
            segment_count: 0,
        })
    }

    /// Flake with edges sized so the outer polygon has the given perimeter.
    pub fn from_perimeter(
        config: FlakeConfig,
        direction: f64,
        perimeter: f64,
        rainbow: u32,
    ) -> Result<PolyFlake, GeneratorError> {
        GeneratorError::require_positive("perimeter", perimeter)?;
        let edge_length = perimeter / config.side_count as f64;
        PolyFlake::new(config, direction, edge_length, rainbow)
    }

    pub fn config(&self) -> &FlakeConfig {
        &self.config
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Length of every leaf segment this flake emits.
    pub fn segment_length(&self) -> f64 {
        self.config.smallest_segment(self.edge_length)
    }

    /// Leaf segments emitted so far.
    pub fn segment_count(&self) -> u64 {
        self.segment_count
    }

    fn expand(&mut self, frame: Frame) {
        if frame.depth < self.config.depth {
            let length = frame.length / 3.0;
            for offset in self.offsets.iter().rev() {
                self.stack.push(Frame {
                    direction: frame.direction + offset,
                    length,
                    depth: frame.depth + 1,
                });
            }
        } else {
            self.pending.push_back(DrawCommand::SetHeading(frame.direction));
            if let Some(wheel) = self.color_wheel.as_mut() {
                self.pending.push_back(DrawCommand::SetColor(wheel.next_color()));
            }
            self.pending.push_back(DrawCommand::Forward(frame.length));
            self.segment_count += 1;
        }
    }
}

impl Iterator for PolyFlake {
    type Item = DrawCommand;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(command) = self.pending.pop_front() {
                return Some(command);
            }
            let frame = self.stack.pop()?;
            self.expand(frame);
        }
    }
}
