//! A walker that lives on the complex plane. Multiplying its value by a
//! complex number rotates and scales it about the origin, and the walker
//! draws a straight line to wherever that lands.
use std::f64::consts::PI;

use num::complex::Complex64;
use num::Zero;

use crate::errors::GeneratorError;
use crate::turtle::DrawCommand;

/// Moves shorter than this many pixels are not worth drawing.
pub const MINIMUM_VISIBLE_MOVE: f64 = 0.5;

/// # ComplexWalk
///
/// Holds a complex `value` and the on-screen position it was last drawn at.
/// The screen position is `value * pixels_per_unit`, except that moves too
/// small to see are deferred until they add up.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::complex_walk::ComplexWalk;
/// use aoer_curves_rs::turtle::{RenderContext, Turtle};
///
/// let mut walk = ComplexWalk::new(100.0).unwrap();
/// let mut turtle = Turtle::new();
/// turtle.run(walk.circle(16).unwrap());
/// assert_eq!(turtle.segment_count(), 32);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexWalk {
    pixels_per_unit: f64,
    value: Complex64,
    position: Complex64,
}

impl ComplexWalk {
    pub fn new(pixels_per_unit: f64) -> Result<ComplexWalk, GeneratorError> {
        GeneratorError::require_positive("pixels_per_unit", pixels_per_unit)?;
        Ok(ComplexWalk {
            pixels_per_unit,
            value: Complex64::zero(),
            position: Complex64::zero(),
        })
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn value(&self) -> Complex64 {
        self.value
    }

    /// Where the walker was last drawn, in pixels.
    pub fn position(&self) -> Complex64 {
        self.position
    }

    /// Jump to `value` without drawing.
    pub fn assign(&mut self, value: Complex64) -> Vec<DrawCommand> {
        self.value = value;
        self.position = value * self.pixels_per_unit;
        vec![
            DrawCommand::PenUp,
            DrawCommand::move_to(self.position.re, self.position.im),
            DrawCommand::PenDown,
        ]
    }

    pub fn multiply(&mut self, factor: Complex64) -> Vec<DrawCommand> {
        self.value *= factor;
        self.catch_up()
    }

    pub fn divide(&mut self, divisor: Complex64) -> Result<Vec<DrawCommand>, GeneratorError> {
        if divisor.is_zero() {
            return Err(GeneratorError::DivisionByZero);
        }
        self.value /= divisor;
        Ok(self.catch_up())
    }

    fn catch_up(&mut self) -> Vec<DrawCommand> {
        let delta = self.value * self.pixels_per_unit - self.position;
        let distance = delta.norm();
        if distance > MINIMUM_VISIBLE_MOVE {
            self.position += delta;
            vec![
                DrawCommand::SetHeading(delta.arg().to_degrees()),
                DrawCommand::Forward(distance),
            ]
        } else {
            vec![]
        }
    }

    /// Start at 1 and multiply by `1 + i*pi/divisions` `count` times. Each
    /// step turns by about `180/divisions` degrees and grows the radius a
    /// little, so the walk spirals outwards.
    pub fn rotation(
        &mut self,
        divisions: usize,
        count: usize,
    ) -> Result<impl Iterator<Item = DrawCommand> + '_, GeneratorError> {
        if divisions == 0 {
            return Err(GeneratorError::NonPositive {
                name: "divisions",
                value: 0.0,
            });
        }
        let step = Complex64::new(1.0, PI / divisions as f64);
        let start = self.assign(Complex64::new(1.0, 0.0));
        tracing::debug!(divisions, count, "complex rotation");
        Ok(start
            .into_iter()
            .chain((0..count).flat_map(move |_| self.multiply(step))))
    }

    /// One trip round the origin: `2 * divisions` rotation steps.
    pub fn circle(
        &mut self,
        divisions: usize,
    ) -> Result<impl Iterator<Item = DrawCommand> + '_, GeneratorError> {
        self.rotation(divisions, divisions.saturating_mul(2))
    }
}
