use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Hue step between consecutive series (golden angle), so the first colours
/// stay the same when more series are added.
const HUE_STEP: f32 = 137.508;

/// Colour of the `index`-th plotted series.
pub fn series_color(index: usize) -> Color32 {
    let hue = (index as f32 * HUE_STEP) % 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Colours for `n` series.
pub fn series_palette(n: usize) -> Vec<Color32> {
    (0..n).map(series_color).collect()
}
