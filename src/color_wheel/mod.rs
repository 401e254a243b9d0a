//! A cyclic rainbow palette. Every generator in this crate pulls its colors from
//! a [`ColorWheel`] sized to match the number of segments it will draw, so hue
//! advances in lockstep with the geometry.
pub use csscolorparser::Color as Rgb;

/// Largest palette any generator will ask for. Palettes are materialized up
/// front, so anything bigger is refused before drawing starts.
pub const MAX_PALETTE_SIZE: u64 = 1 << 24;

/// # ColorWheel
///
/// A fixed length ring of fully saturated colors, evenly spaced around the hue
/// circle, handed out one at a time and wrapping forever.
///
/// # Example
///
/// ```
/// use aoer_curves_rs::color_wheel::ColorWheel;
///
/// let mut wheel = ColorWheel::new(4);
/// let first = wheel.next_color();
/// for _ in 0..3 {
///     wheel.next_color();
/// }
/// assert_eq!(wheel.next_color(), first);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorWheel {
    period: usize,
    saturation: f64,
    cos_power: f64,
    colors: Vec<Rgb>,
    cursor: usize,
}

impl Default for ColorWheel {
    fn default() -> Self {
        ColorWheel::new(360)
    }
}

impl ColorWheel {
    pub fn new(period: usize) -> ColorWheel {
        let mut wheel = ColorWheel {
            period: 1,
            saturation: 1.0,
            cos_power: 1.0,
            colors: vec![],
            cursor: 0,
        };
        wheel.configure(period, 1.0);
        wheel
    }

    /// Size a wheel as `total / divisor` (integer division), never smaller than one
    /// color. A zero divisor is treated as one.
    pub fn for_ratio(total: u64, divisor: u64) -> ColorWheel {
        let period = total / divisor.max(1);
        ColorWheel::new(usize::try_from(period).unwrap_or(usize::MAX))
    }

    /// Set period and saturation together, regenerate the palette and rewind.
    pub fn configure(&mut self, period: usize, saturation: f64) {
        self.store_period(period);
        self.store_saturation(saturation);
        self.reset();
    }

    pub fn set_period(&mut self, period: usize) {
        self.store_period(period);
        self.reset();
    }

    /// Saturation is stored for compatibility but has no effect on the palette,
    /// which is always generated at full saturation and value.
    pub fn set_saturation(&mut self, saturation: f64) {
        self.store_saturation(saturation);
        self.reset();
    }

    fn store_period(&mut self, period: usize) {
        self.period = period.max(1);
    }

    fn store_saturation(&mut self, saturation: f64) {
        self.saturation = saturation.max(0.0);
        self.cos_power = saturation;
    }

    /// Regenerate the palette and put the cursor back at the first color.
    pub fn reset(&mut self) {
        let delta = 1.0 / self.period as f64;
        self.colors = (0..self.period)
            .map(|i| Rgb::from_hsva((i as f64 * delta * 360.0) as f32, 1.0, 1.0, 1.0))
            .collect();
        self.cursor = 0;
    }

    /// Hand out the next color, wrapping back to the start after the last one.
    pub fn next_color(&mut self) -> Rgb {
        let color = self.colors[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.period;
        color
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Unclamped copy of the last requested saturation. Unused by the palette.
    pub fn cos_power(&self) -> f64 {
        self.cos_power
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Iterator for ColorWheel {
    type Item = Rgb;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_color())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: &Rgb, b: (f32, f32, f32)) -> bool {
        (a.r - b.0).abs() < 1e-3 && (a.g - b.1).abs() < 1e-3 && (a.b - b.2).abs() < 1e-3
    }

    #[test]
    fn test_period_four_sequence() {
        let mut wheel = ColorWheel::new(4);
        let seen: Vec<Rgb> = (0..5).map(|_| wheel.next_color()).collect();
        assert!(close(&seen[0], (1.0, 0.0, 0.0)));
        assert!(close(&seen[1], (0.5, 1.0, 0.0)));
        assert!(close(&seen[2], (0.0, 1.0, 1.0)));
        assert!(close(&seen[3], (0.5, 0.0, 1.0)));
        assert_eq!(seen[4], seen[0]);
    }

    #[test]
    fn test_wrap_for_many_periods() {
        for period in 1..50 {
            let mut wheel = ColorWheel::new(period);
            let first = wheel.next_color();
            for _ in 1..period {
                wheel.next_color();
            }
            assert_eq!(wheel.cursor(), 0);
            assert_eq!(wheel.next_color(), first);
        }
    }

    #[test]
    fn test_distinct_hues() {
        let wheel = ColorWheel::new(12);
        let colors = wheel.colors();
        assert_eq!(colors.len(), 12);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a.to_rgba8(), b.to_rgba8());
            }
        }
    }

    #[test]
    fn test_zero_period_is_coerced() {
        let mut wheel = ColorWheel::new(0);
        assert_eq!(wheel.period(), 1);
        let red = wheel.next_color();
        assert_eq!(wheel.next_color(), red);
        assert!(close(&red, (1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_reconfigure_is_idempotent() {
        let mut wheel = ColorWheel::new(7);
        wheel.next_color();
        wheel.next_color();
        wheel.configure(9, 0.5);
        let first = wheel.clone();
        wheel.next_color();
        wheel.configure(9, 0.5);
        assert_eq!(wheel, first);
        assert_eq!(wheel.cursor(), 0);
    }

    #[test]
    fn test_saturation_is_clamped_but_unused() {
        let mut wheel = ColorWheel::new(6);
        let palette = wheel.colors().to_vec();
        wheel.set_saturation(-3.0);
        assert_eq!(wheel.saturation(), 0.0);
        assert_eq!(wheel.cos_power(), -3.0);
        assert_eq!(wheel.colors(), palette.as_slice());
    }

    #[test]
    fn test_for_ratio() {
        assert_eq!(ColorWheel::for_ratio(3072, 1).period(), 3072);
        assert_eq!(ColorWheel::for_ratio(3072, 2).period(), 1536);
        assert_eq!(ColorWheel::for_ratio(3, 10).period(), 1);
        assert_eq!(ColorWheel::for_ratio(3, 0).period(), 3);
    }

    #[test]
    fn test_iterator() {
        let wheel = ColorWheel::new(3);
        let colors: Vec<Rgb> = wheel.take(6).collect();
        assert_eq!(colors[0], colors[3]);
        assert_eq!(colors[2], colors[5]);
    }
}
