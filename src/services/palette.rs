// src/services/palette.rs
use crate::models::Palette;
use log::debug;

/// Derive a four colour palette from a brand colour.
///
/// `secondary` is the RGB complement, `accent` keeps the hue with boosted
/// saturation and lowered value, `background` is a pale tint of the hue.
/// Unparseable input yields a fixed fallback palette instead of an error.
pub fn derive_palette(brand_color: &str) -> Palette {
    let hex = brand_color.trim_start_matches('#');

    let Some((r, g, b)) = parse_hex(hex) else {
        debug!("Brand color {:?} is not valid hex, using fallback palette", brand_color);
        return fallback_palette(hex);
    };

    let secondary = to_hex(255 - r, 255 - g, 255 - b);

    let (h, s, v) = rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let accent = hsv_to_hex(h, (s * 1.5).min(1.0), (v * 0.8).min(1.0));
    let background = hsv_to_hex(h, 0.1, 0.95);

    Palette {
        primary: format!("#{}", hex.to_lowercase()),
        secondary,
        accent,
        background,
    }
}

fn fallback_palette(hex: &str) -> Palette {
    let primary = if hex.is_empty() {
        "#000000".to_string()
    } else {
        format!("#{}", hex)
    };
    Palette {
        primary,
        secondary: "#ffffff".to_string(),
        accent: "#4a90e2".to_string(),
        background: "#f5f5f5".to_string(),
    }
}

/// Parse exactly six hex digits into RGB channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn hsv_to_hex(h: f64, s: f64, v: f64) -> String {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    // Truncating casts, matching integer conversion of the unit channels.
    to_hex((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Unit RGB to (hue, saturation, value), hue in [0, 1).
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return (0.0, 0.0, v);
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_palette() {
        let palette = derive_palette("#ff0000");
        assert_eq!(palette.primary, "#ff0000");
        assert_eq!(palette.secondary, "#00ffff");
        assert_eq!(palette.accent, "#cc0000");
        assert_eq!(palette.background, "#f2dada");
    }

    #[test]
    fn black_palette() {
        let palette = derive_palette("#000000");
        assert_eq!(palette.primary, "#000000");
        assert_eq!(palette.secondary, "#ffffff");
        assert_eq!(palette.accent, "#000000");
        // Hue of black is 0, so the tint is reddish.
        assert_eq!(palette.background, "#f2dada");
    }

    #[test]
    fn input_is_normalized() {
        let palette = derive_palette("00FF00");
        assert_eq!(palette.primary, "#00ff00");
        assert_eq!(palette.secondary, "#ff00ff");
        assert_eq!(palette.accent, "#00cc00");
    }

    #[test]
    fn invalid_input_falls_back() {
        let palette = derive_palette("invalid");
        assert_eq!(palette.primary, "#invalid");
        assert_eq!(palette.secondary, "#ffffff");
        assert_eq!(palette.accent, "#4a90e2");
        assert_eq!(palette.background, "#f5f5f5");

        assert_eq!(derive_palette("").primary, "#000000");
        assert_eq!(derive_palette("#").primary, "#000000");
        assert_eq!(derive_palette("#fff").secondary, "#ffffff");
    }

    #[test]
    fn hsv_round_trip_on_primaries() {
        let (h, s, v) = rgb_to_hsv(0.0, 0.0, 1.0);
        assert!((h - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!((s, v), (1.0, 1.0));
        let (r, g, b) = hsv_to_rgb(h, s, v);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
    }
}
