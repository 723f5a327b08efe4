//! Color helpers for the scenes.

use ratatui::style::Color;

/// Map a load value (0.0-1.0) to a color from cool blue to warm red.
pub fn load_to_color(load: f32) -> Color {
    let load = load.clamp(0.0, 1.0);

    // Hue: 220 (blue) -> 0 (red); brighter as load rises
    let hue = 220.0 - load * 220.0;
    let lightness = 0.35 + load * 0.2;

    hsl_to_rgb(hue, 0.75, lightness)
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..1) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    let channel = |t: f32| (hue_to_rgb(p, q, t) * 255.0).round() as u8;
    Color::Rgb(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
