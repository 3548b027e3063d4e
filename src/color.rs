use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Colour for the highlighted galaxy in the radius/mass plot.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(230, 60, 60);

/// Colour for the unhighlighted series.
pub const BASE: Color32 = Color32::LIGHT_BLUE;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color ramp: numeric value → Color32
// ---------------------------------------------------------------------------

/// Maps a numeric range onto a blue → red hue sweep, binned so each bin can
/// be drawn as one plot series.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    min: f64,
    max: f64,
    colors: Vec<Color32>,
}

impl ColorRamp {
    /// Build a ramp with `bins` colours spanning the finite values given.
    pub fn new(values: impl IntoIterator<Item = f64>, bins: usize) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let bins = bins.max(1);
        let colors = (0..bins)
            .map(|i| {
                let t = if bins == 1 { 0.0 } else { i as f32 / (bins - 1) as f32 };
                hsl_to_color32(Hsl::new(240.0 * (1.0 - t), 0.75, 0.55))
            })
            .collect();
        Self { min, max, colors }
    }

    pub fn bins(&self) -> usize {
        self.colors.len()
    }

    /// Bin index for `value`; out-of-range values clamp to the ends.
    pub fn bin_for(&self, value: f64) -> usize {
        let range = self.max - self.min;
        if !range.is_finite() || range <= f64::EPSILON || !value.is_finite() {
            return 0;
        }
        let t = ((value - self.min) / range).clamp(0.0, 1.0);
        ((t * (self.bins() - 1) as f64).round() as usize).min(self.bins() - 1)
    }

    pub fn color(&self, bin: usize) -> Color32 {
        self.colors.get(bin).copied().unwrap_or(Color32::GRAY)
    }

    /// Value range covered by the ramp, for the legend.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}
