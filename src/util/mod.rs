use geo_types::{CoordNum, Point};
use num_traits::real::Real;

/// Tolerance below which two sample points count as the same position.
pub const COINCIDENT_EPSILON: f64 = 1e-12;

/// Trait that implements a distance function between two [`geo_types::Point`] structs.
/// Also includes a length function which returns the length of a [`geo_types::Point`]
/// as if it were a Vector.
pub trait PointDistance<T: CoordNum> {
    /// Return the scalar distance between two [`geo_types::Point`]s.
    fn distance(&self, other: &Point<T>) -> T;

    /// Treat a [`geo_types::Point`] as a Vector and return its scalar length.
    fn length(&self) -> T;
}

impl<T> PointDistance<T> for Point<T>
where
    T: CoordNum,
    T: Real,
{
    fn distance(&self, other: &Point<T>) -> T {
        let p = *self - *other;
        p.length()
    }

    fn length(&self) -> T {
        (self.x().powi(2) + self.y().powi(2)).sqrt()
    }
}

/// Heading in degrees (0 = +x, counterclockwise) of the move from `from` to `to`.
///
/// Returns `None` when the points coincide, since the heading is undefined there.
pub fn heading_between(from: Point<f64>, to: Point<f64>) -> Option<f64> {
    let delta = to - from;
    if delta.length() <= COINCIDENT_EPSILON {
        None
    } else {
        Some(delta.y().atan2(delta.x()).to_degrees())
    }
}

/// The angular increment (radians) which moves a point at `radius` along an arc
/// of roughly `minimum_arc` pixels. Larger radii get a finer increment.
pub fn smooth_angle_delta(radius: f64, minimum_arc: f64) -> f64 {
    (minimum_arc / radius).atan().abs()
}
