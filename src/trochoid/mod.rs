//! Spirograph curves: a pen on a circle rolling around (epitrochoid) or inside
//! (hypotrochoid) a fixed circle, sampled finely enough to look smooth at any
//! size and long enough to close the pattern.
use std::f64::consts::PI;

use geo_types::Point;
use num::integer::gcd;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::color_wheel::{ColorWheel, MAX_PALETTE_SIZE};
use crate::errors::GeneratorError;
use crate::turtle::DrawCommand;
use crate::util::{heading_between, smooth_angle_delta};

/// Default spacing between samples at the outermost radius, in pixels.
pub const DEFAULT_MINIMUM_ARC: f64 = 2.0;

/// Radii further than this from a whole number get a warning: the gcd uses
/// the rounded value, so the pattern will not close exactly.
const RADIUS_ROUNDING_TOLERANCE: f64 = 1e-9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrochoidKind {
    /// Rolling outside the fixed circle.
    Epitrochoid,
    /// Rolling inside the fixed circle.
    #[default]
    Hypotrochoid,
}

impl TrochoidKind {
    /// +1 for epitrochoids, -1 for hypotrochoids.
    pub fn sign(&self) -> f64 {
        match self {
            TrochoidKind::Epitrochoid => 1.0,
            TrochoidKind::Hypotrochoid => -1.0,
        }
    }
}

/// The inputs of a [`TrochoidConfig`], which is what gets serialized.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrochoidParams {
    pub arm_radius: f64,
    pub pen_radius: f64,
    #[serde(default)]
    pub kind: TrochoidKind,
    #[serde(default = "default_minimum_arc")]
    pub minimum_arc: f64,
}

fn default_minimum_arc() -> f64 {
    DEFAULT_MINIMUM_ARC
}

/// # TrochoidConfig
///
/// Radii, kind, and everything derived from them. All derived values are
/// computed together in one place, and the config is immutable; the `with_*`
/// and [`TrochoidConfig::reconfigure`] methods hand back a fresh config.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::trochoid::{TrochoidConfig, TrochoidKind};
///
/// let config = TrochoidConfig::new(200.0, 70.0, TrochoidKind::Hypotrochoid).unwrap();
/// assert_eq!(config.turns(), 7);
/// let epi = config.with_kind(TrochoidKind::Epitrochoid).unwrap();
/// assert_eq!(epi.rolling_radius(), 270.0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "TrochoidParams", into = "TrochoidParams")]
pub struct TrochoidConfig {
    arm_radius: f64,
    pen_radius: f64,
    kind: TrochoidKind,
    minimum_arc: f64,
    rolling_radius: f64,
    arm_rate: f64,
    pen_rate: f64,
    turns: u64,
    angle_delta: f64,
    steps_per_turn: u64,
    steps: u64,
}

impl Default for TrochoidConfig {
    fn default() -> Self {
        TrochoidConfig {
            arm_radius: 200.0,
            pen_radius: 70.0,
            kind: TrochoidKind::Hypotrochoid,
            minimum_arc: DEFAULT_MINIMUM_ARC,
            rolling_radius: 130.0,
            arm_rate: 1.0,
            pen_rate: -200.0 / 70.0,
            turns: 7,
            angle_delta: (DEFAULT_MINIMUM_ARC / 200.0).atan(),
            steps_per_turn: 629,
            steps: 4403,
        }
    }
}

impl TryFrom<TrochoidParams> for TrochoidConfig {
    type Error = GeneratorError;

    fn try_from(params: TrochoidParams) -> Result<Self, Self::Error> {
        TrochoidConfig::with_minimum_arc(
            params.arm_radius,
            params.pen_radius,
            params.kind,
            params.minimum_arc,
        )
    }
}

impl From<TrochoidConfig> for TrochoidParams {
    fn from(config: TrochoidConfig) -> Self {
        config.params()
    }
}

fn whole_radius(name: &'static str, radius: f64) -> Result<i64, GeneratorError> {
    let rounded = radius.round();
    if (radius - rounded).abs() > RADIUS_ROUNDING_TOLERANCE {
        tracing::warn!(
            name,
            radius,
            rounded,
            "fractional radius rounded for closure; the pattern will not close exactly"
        );
    }
    if rounded < 1.0 {
        return Err(GeneratorError::RoundsToZero {
            name,
            value: radius,
        });
    }
    Ok(rounded as i64)
}

impl TrochoidConfig {
    pub fn new(
        arm_radius: f64,
        pen_radius: f64,
        kind: TrochoidKind,
    ) -> Result<TrochoidConfig, GeneratorError> {
        TrochoidConfig::with_minimum_arc(arm_radius, pen_radius, kind, DEFAULT_MINIMUM_ARC)
    }

    /// Derive everything from the radii, the kind, and the smoothness threshold.
    pub fn with_minimum_arc(
        arm_radius: f64,
        pen_radius: f64,
        kind: TrochoidKind,
        minimum_arc: f64,
    ) -> Result<TrochoidConfig, GeneratorError> {
        GeneratorError::require_positive("arm_radius", arm_radius)?;
        GeneratorError::require_positive("pen_radius", pen_radius)?;
        GeneratorError::require_positive("minimum_arc", minimum_arc)?;

        let rolling_radius = arm_radius + kind.sign() * pen_radius;
        let arm_rate = 1.0;
        let pen_rate = kind.sign() * arm_rate * arm_radius / pen_radius;

        let whole_arm = whole_radius("arm_radius", arm_radius)?;
        let whole_pen = whole_radius("pen_radius", pen_radius)?;
        let divisor = gcd(whole_arm, whole_pen);
        if divisor == 0 {
            return Err(GeneratorError::DivisionByZero);
        }
        let turns = (whole_pen / divisor) as u64;

        // Step size that keeps samples about minimum_arc apart at the outermost radius.
        let angle_delta = smooth_angle_delta(rolling_radius + pen_radius, minimum_arc);
        let too_many = GeneratorError::TooManySegments {
            predicted: None,
            limit: u64::MAX,
        };
        let steps_per_turn =
            u64::from_f64((2.0 * PI / angle_delta).ceil()).ok_or_else(|| too_many.clone())?;
        let steps = turns.checked_mul(steps_per_turn).ok_or(too_many)?;

        tracing::debug!(
            arm_radius,
            pen_radius,
            ?kind,
            turns,
            steps_per_turn,
            steps,
            "derived trochoid"
        );

        Ok(TrochoidConfig {
            arm_radius,
            pen_radius,
            kind,
            minimum_arc,
            rolling_radius,
            arm_rate,
            pen_rate,
            turns,
            angle_delta,
            steps_per_turn,
            steps,
        })
    }

    /// A new config with both radii replaced.
    pub fn reconfigure(
        &self,
        arm_radius: f64,
        pen_radius: f64,
    ) -> Result<TrochoidConfig, GeneratorError> {
        TrochoidConfig::with_minimum_arc(arm_radius, pen_radius, self.kind, self.minimum_arc)
    }

    pub fn with_arm_radius(&self, arm_radius: f64) -> Result<TrochoidConfig, GeneratorError> {
        self.reconfigure(arm_radius, self.pen_radius)
    }

    pub fn with_pen_radius(&self, pen_radius: f64) -> Result<TrochoidConfig, GeneratorError> {
        self.reconfigure(self.arm_radius, pen_radius)
    }

    pub fn with_kind(&self, kind: TrochoidKind) -> Result<TrochoidConfig, GeneratorError> {
        TrochoidConfig::with_minimum_arc(self.arm_radius, self.pen_radius, kind, self.minimum_arc)
    }

    pub fn params(&self) -> TrochoidParams {
        TrochoidParams {
            arm_radius: self.arm_radius,
            pen_radius: self.pen_radius,
            kind: self.kind,
            minimum_arc: self.minimum_arc,
        }
    }

    pub fn arm_radius(&self) -> f64 {
        self.arm_radius
    }

    pub fn pen_radius(&self) -> f64 {
        self.pen_radius
    }

    pub fn kind(&self) -> TrochoidKind {
        self.kind
    }

    pub fn is_epitrochoid(&self) -> bool {
        self.kind == TrochoidKind::Epitrochoid
    }

    pub fn is_hypotrochoid(&self) -> bool {
        self.kind == TrochoidKind::Hypotrochoid
    }

    pub fn minimum_arc(&self) -> f64 {
        self.minimum_arc
    }

    pub fn rolling_radius(&self) -> f64 {
        self.rolling_radius
    }

    pub fn arm_rate(&self) -> f64 {
        self.arm_rate
    }

    pub fn pen_rate(&self) -> f64 {
        self.pen_rate
    }

    /// Full turns of the arm needed before the pattern repeats.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Angular step between samples, in radians.
    pub fn angle_delta(&self) -> f64 {
        self.angle_delta
    }

    pub fn steps_per_turn(&self) -> u64 {
        self.steps_per_turn
    }

    /// Total number of samples in the closed pattern.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Longest possible move between two consecutive samples. The pen's
    /// speed is at most `|rolling_radius| * arm_rate + pen_radius * |pen_rate|`
    /// per radian, which exceeds the outermost radius whenever the pen spins
    /// faster than the arm, so this can be larger than `minimum_arc`.
    pub fn max_step_length(&self) -> f64 {
        let speed =
            self.rolling_radius.abs() * self.arm_rate.abs() + self.pen_radius * self.pen_rate.abs();
        speed * self.angle_delta
    }

    fn orthogonal(&self, trig: fn(f64) -> f64, angle: f64) -> f64 {
        self.rolling_radius * trig(self.arm_rate * angle)
            + self.pen_radius * trig(self.pen_rate * angle)
    }

    /// Position of the pen at parametric angle `angle` (radians), relative to
    /// the center of the fixed circle.
    pub fn position(&self, angle: f64) -> Point<f64> {
        Point::new(self.orthogonal(f64::cos, angle), self.orthogonal(f64::sin, angle))
    }

    /// Lazily sample the whole pattern around `center`. The hue goes round
    /// the wheel `rainbow_count` times; 0 emits no color commands.
    pub fn sample(
        &self,
        center: Point<f64>,
        rainbow_count: u32,
    ) -> Result<TrochoidSampler, GeneratorError> {
        GeneratorError::require_finite("center.x", center.x())?;
        GeneratorError::require_finite("center.y", center.y())?;
        let color_wheel = if rainbow_count > 0 {
            let period = self.steps / rainbow_count as u64;
            if period > MAX_PALETTE_SIZE {
                return Err(GeneratorError::TooManySegments {
                    predicted: Some(self.steps),
                    limit: MAX_PALETTE_SIZE,
                });
            }
            Some(ColorWheel::for_ratio(self.steps, rainbow_count as u64))
        } else {
            None
        };
        let start = center + self.position(0.0);
        let mut pending = Vec::with_capacity(3);
        pending.extend([DrawCommand::PenDown, DrawCommand::MoveTo(start), DrawCommand::PenUp]);
        Ok(TrochoidSampler {
            config: self.clone(),
            center,
            color_wheel,
            last_point: start,
            index: 0,
            pending,
        })
    }
}

/// Lazy command stream over one closed trochoid. Per sample it yields
/// `SetHeading` (omitted when the pen did not move), `MoveTo`, and `SetColor`
/// when coloring is on.
#[derive(Debug, Clone)]
pub struct TrochoidSampler {
    config: TrochoidConfig,
    center: Point<f64>,
    color_wheel: Option<ColorWheel>,
    last_point: Point<f64>,
    index: u64,
    /// Commands still to hand out, in reverse order.
    pending: Vec<DrawCommand>,
}

impl TrochoidSampler {
    pub fn config(&self) -> &TrochoidConfig {
        &self.config
    }

    /// Samples taken so far.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl Iterator for TrochoidSampler {
    type Item = DrawCommand;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(command) = self.pending.pop() {
            return Some(command);
        }
        if self.index >= self.config.steps {
            return None;
        }
        let angle = self.index as f64 * self.config.angle_delta;
        let current = self.center + self.config.position(angle);
        self.index += 1;

        if let Some(wheel) = self.color_wheel.as_mut() {
            self.pending.push(DrawCommand::SetColor(wheel.next_color()));
        }
        self.pending.push(DrawCommand::MoveTo(current));
        let heading = heading_between(self.last_point, current);
        self.last_point = current;
        match heading {
            Some(degrees) => Some(DrawCommand::SetHeading(degrees)),
            None => self.pending.pop(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.config.steps - self.index).unwrap_or(usize::MAX);
        let per_step: usize = if self.color_wheel.is_some() { 3 } else { 2 };
        let lower = remaining
            .saturating_mul(per_step - 1)
            .saturating_add(self.pending.len());
        let upper = remaining
            .checked_mul(per_step)
            .and_then(|n| n.checked_add(self.pending.len()));
        (lower, upper)
    }
}
