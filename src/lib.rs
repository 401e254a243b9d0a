//! ArmyOfEvilRobots turtle-curve generators
//!
//! Procedural curve generators for pen-plotter style line art: spirograph
//! trochoids, generalized Koch flakes on any regular polygon, and Hilbert
//! curves, with a rainbow [`color_wheel::ColorWheel`] to paint them.
//!
//! None of the generators draw anything themselves. Each one produces a lazy
//! stream of [`turtle::DrawCommand`]s, which the caller drains into whatever
//! [`turtle::RenderContext`] it likes. The in-memory [`turtle::Turtle`]
//! records strokes and can turn them into an SVG document.
//!
//! ```
//! use aoer_curves_rs::prelude::*;
//!
//! let config = FlakeConfig::new(4, 2).unwrap();
//! let flake = PolyFlake::from_perimeter(config, 0.0, 400.0, 1).unwrap();
//! let mut turtle = Turtle::new();
//! turtle.run(flake);
//! assert_eq!(turtle.segment_count(), 4 * 25);
//! ```

/// Errors for invalid generator parameters and scene loading
pub mod errors;

/// Small geometry helpers shared by the generators
pub mod util;

/// Evenly spaced rainbow palettes
pub mod color_wheel;

/// Drawing commands and the render context they drive
pub mod turtle;

/// Epitrochoid and hypotrochoid sampling
pub mod trochoid;

/// Recursive polygon flakes
pub mod flake;

/// Hilbert space-filling curves
pub mod hilbert;

/// Circles, squares and friends
pub mod shapes;

/// Chord patterns between points on a circle
pub mod linesets;

/// Drawing with complex multiplication
pub mod complex_walk;

/// RON-described collections of curves
pub mod scene;

/// Import prelude::* for the commonly used types in one go.
pub mod prelude {
    pub use crate::color_wheel::{ColorWheel, Rgb};
    pub use crate::complex_walk::ComplexWalk;
    pub use crate::errors::{GeneratorError, SceneError};
    pub use crate::flake::{FlakeConfig, PolyFlake};
    pub use crate::hilbert::HilbertCurve;
    pub use crate::linesets::LineSet;
    pub use crate::scene::{CurveSpec, Scene};
    pub use crate::shapes::Shapes;
    pub use crate::trochoid::{TrochoidConfig, TrochoidKind};
    pub use crate::turtle::{DrawCommand, RenderContext, Turtle};
    pub use crate::util::PointDistance;
}
