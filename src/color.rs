//! Color conversions and palette ramps used by the diagram renderers.
//!
//! Everything here is pure. Malformed hex input never panics: parsers return `None`
//! and ramp generators fall back to repeating the input string.

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Parses `#rrggbb`, `rrggbb` or `#rgb`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Formats as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta.abs() < f64::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if (max - r).abs() < f64::EPSILON {
        ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    Hsl { h: h * 60.0, s, l }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

fn to_channel(unit: f64) -> u8 {
    // Clamped to [0, 255] before the cast.
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear blend of two colors in RGB space; `t = 0` gives `a`, `t = 1` gives `b`.
pub fn mix(a: &str, b: &str, t: f64) -> Option<String> {
    let a = hex_to_rgb(a)?;
    let b = hex_to_rgb(b)?;
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| {
        let x = f64::from(x);
        let y = f64::from(y);
        to_channel((x + (y - x) * t) / 255.0)
    };
    Some(rgb_to_hex(Rgb {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
    }))
}

/// Blends toward white by `amount` (0..1). Malformed input is returned unchanged.
pub fn lighten(hex: &str, amount: f64) -> String {
    mix(hex, "#ffffff", amount).unwrap_or_else(|| hex.to_string())
}

/// Blends toward black by `amount` (0..1). Malformed input is returned unchanged.
pub fn darken(hex: &str, amount: f64) -> String {
    mix(hex, "#000000", amount).unwrap_or_else(|| hex.to_string())
}

/// WCAG relative luminance in `[0, 1]`.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    let rgb = hex_to_rgb(hex)?;
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Some(0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b))
}

/// White text on dark backgrounds, dark gray text on light ones.
pub fn contrast_text_color(background: &str) -> &'static str {
    match relative_luminance(background) {
        Some(l) if l < 0.45 => "#ffffff",
        _ => "#333333",
    }
}

/// Position of step `i` in a sequence of `n`, in `[0, 1]`.
/// The denominator is floored at 1 so `n = 1` maps to 0.
fn ratio(i: usize, n: usize) -> f64 {
    // Counts are small; the casts cannot lose meaningful precision.
    i as f64 / n.saturating_sub(1).max(1) as f64
}

/// `n` colors starting at `base` and lightening linearly up to `max_lighten` at the last step.
pub fn generate_tints(base: &str, n: usize, max_lighten: f64) -> Vec<String> {
    (0..n)
        .map(|i| lighten(base, max_lighten * ratio(i, n)))
        .collect()
}

/// `n` colors interpolated from `from` to `to`.
pub fn generate_gradient(from: &str, to: &str, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| mix(from, to, ratio(i, n)).unwrap_or_else(|| from.to_string()))
        .collect()
}

/// `n` colors spaced evenly around the hue wheel, keeping the base saturation and lightness.
pub fn generate_hue_steps(base: &str, n: usize) -> Vec<String> {
    let Some(rgb) = hex_to_rgb(base) else {
        return vec![base.to_string(); n];
    };
    let hsl = rgb_to_hsl(rgb);
    let step = 360.0 / n.max(1) as f64;
    (0..n)
        .map(|i| {
            rgb_to_hex(hsl_to_rgb(Hsl {
                h: hsl.h + step * i as f64,
                ..hsl
            }))
        })
        .collect()
}

/// Process steps: base color first, fading to a 50% tint.
pub fn process_colors(base: &str, n: usize) -> Vec<String> {
    generate_tints(base, n, 0.5)
}

/// Pyramid levels, top to bottom: darkest at the apex, 60% tint at the base.
pub fn pyramid_colors(base: &str, n: usize) -> Vec<String> {
    generate_tints(base, n, 0.6)
}

/// Step-up bars, left to right: lightest first, ending on the base color.
pub fn step_up_colors(base: &str, n: usize) -> Vec<String> {
    let mut colors = generate_tints(base, n, 0.6);
    colors.reverse();
    colors
}

/// Timeline cards: a gentle 40% fade along the axis.
pub fn timeline_colors(base: &str, n: usize) -> Vec<String> {
    generate_tints(base, n, 0.4)
}

/// Cycle nodes: hue rotation so adjacent nodes stay distinguishable.
pub fn cycle_colors(base: &str, n: usize) -> Vec<String> {
    generate_hue_steps(base, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_is_case_insensitive() {
        for hex in ["#4285F4", "#000000", "#ffffff", "#1a2B3c", "#EA4335"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(rgb), hex.to_lowercase());
        }
    }

    #[test]
    fn short_and_bare_hex_parse() {
        assert_eq!(hex_to_rgb("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(hex_to_rgb("336699"), Some(Rgb { r: 0x33, g: 0x66, b: 0x99 }));
    }

    #[test]
    fn malformed_hex_returns_none() {
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(lighten("not-a-color", 0.5), "not-a-color");
    }

    #[test]
    fn hsl_round_trip_stays_close() {
        let rgb = Rgb { r: 66, g: 133, b: 244 };
        let back = hsl_to_rgb(rgb_to_hsl(rgb));
        assert!((i16::from(back.r) - i16::from(rgb.r)).abs() <= 1);
        assert!((i16::from(back.g) - i16::from(rgb.g)).abs() <= 1);
        assert!((i16::from(back.b) - i16::from(rgb.b)).abs() <= 1);
    }

    #[test]
    fn single_step_ramp_is_the_base() {
        assert_eq!(generate_tints("#4285f4", 1, 0.6), vec!["#4285f4".to_string()]);
        assert_eq!(process_colors("#4285f4", 1), vec!["#4285f4".to_string()]);
        assert_eq!(step_up_colors("#4285f4", 1), vec!["#4285f4".to_string()]);
        assert!(generate_tints("#4285f4", 0, 0.6).is_empty());
    }

    #[test]
    fn tints_lighten_monotonically() {
        let colors = pyramid_colors("#4285f4", 6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], "#4285f4");
        let lum: Vec<f64> = colors
            .iter()
            .map(|c| relative_luminance(c).unwrap())
            .collect();
        assert!(lum.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn step_up_ends_on_base() {
        let colors = step_up_colors("#34a853", 4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[3], "#34a853");
    }

    #[test]
    fn hue_steps_keep_count() {
        let colors = cycle_colors("#4285f4", 5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], "#4285f4");
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(contrast_text_color("#1a237e"), "#ffffff");
        assert_eq!(contrast_text_color("#fafafa"), "#333333");
    }
}
