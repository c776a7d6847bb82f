//! Per-particle color schemes.
//!
//! Colors are written into the cloud's vertex color buffer. The renderer
//! multiplies them by a global material tint, so the `single` scheme writes
//! white and lets the tint carry the picked color. Every other scheme resets
//! the tint to white to avoid tinting twice.

use crate::error::ColorError;
use crate::sampling::unit;
use crate::shape::Shape;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Yellow used for tornado debris (`#ffdd00`).
pub const DEBRIS_YELLOW: Vec3 = Vec3::new(1.0, 221.0 / 255.0, 0.0);

/// Share of tornado particles painted as debris by [`ColorScheme::TornadoSpecial`].
pub const DEBRIS_CHANCE: f64 = 0.05;

/// How particle colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// White vertices; the material tint supplies the color.
    #[default]
    Single,
    /// Hue follows particle index.
    Rainbow,
    /// Hue follows height, mapping y in `[-2, 2]` onto the full wheel.
    GradientY,
    /// Cyan-green body with yellow debris. Selected automatically for the tornado.
    TornadoSpecial,
}

impl ColorScheme {
    pub fn id(&self) -> &'static str {
        match self {
            ColorScheme::Single => "single",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::GradientY => "gradient-y",
            ColorScheme::TornadoSpecial => "tornado-special",
        }
    }

    /// Scheme to use after switching to `shape`.
    ///
    /// The tornado always gets its own palette. Leaving the tornado while
    /// that palette is active drops back to `Single`; any scheme the user
    /// picked is kept otherwise.
    pub fn for_shape(self, shape: Shape) -> Self {
        match (shape, self) {
            (Shape::Tornado, _) => ColorScheme::TornadoSpecial,
            (_, ColorScheme::TornadoSpecial) => ColorScheme::Single,
            (_, scheme) => scheme,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ColorScheme::Single),
            "rainbow" => Ok(ColorScheme::Rainbow),
            "gradient-y" => Ok(ColorScheme::GradientY),
            "tornado-special" => Ok(ColorScheme::TornadoSpecial),
            other => Err(ColorError::UnknownScheme(other.to_string())),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Color for particle `index` of `count` at `position`.
pub fn assign<R: Rng + ?Sized>(
    index: usize,
    count: usize,
    position: Vec3,
    scheme: ColorScheme,
    rng: &mut R,
) -> Vec3 {
    match scheme {
        ColorScheme::Single => Vec3::ONE,
        ColorScheme::Rainbow => hsl_to_rgb(index as f32 / count.max(1) as f32, 1.0, 0.5),
        ColorScheme::GradientY => hsl_to_rgb((position.y + 2.0) / 4.0, 1.0, 0.5),
        ColorScheme::TornadoSpecial => {
            if rng.gen_bool(DEBRIS_CHANCE) {
                DEBRIS_YELLOW
            } else {
                Vec3::new(0.0, 0.6 + unit(rng) * 0.4, 0.5 + unit(rng) * 0.5)
            }
        }
    }
}

/// Recolor a whole buffer in place from matching positions.
pub fn fill<R: Rng + ?Sized>(
    colors: &mut [Vec3],
    positions: &[Vec3],
    scheme: ColorScheme,
    rng: &mut R,
) {
    let count = colors.len();
    for (i, (color, position)) in colors.iter_mut().zip(positions).enumerate() {
        *color = assign(i, count, *position, scheme, rng);
    }
}

/// Material tint to pair with `scheme`.
pub fn material_tint(scheme: ColorScheme, base: Vec3) -> Vec3 {
    match scheme {
        ColorScheme::Single => base,
        _ => Vec3::ONE,
    }
}

/// Convert HSL to RGB.
///
/// * `hue` - wraps, so 1.25 is the same as 0.25
/// * `saturation`, `lightness` - 0.0 to 1.0
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let low = 2.0 * l - high;

    Vec3::new(
        hue_channel(low, high, h + 1.0 / 3.0),
        hue_channel(low, high, h),
        hue_channel(low, high, h - 1.0 / 3.0),
    )
}

fn hue_channel(low: f32, high: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        low + (high - low) * 6.0 * t
    } else if t < 0.5 {
        high
    } else if t < 2.0 / 3.0 {
        low + (high - low) * 6.0 * (2.0 / 3.0 - t)
    } else {
        low
    }
}

/// Parse a `#rrggbb` string into RGB in `[0, 1]`.
pub fn parse_hex(hex: &str) -> Result<Vec3, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 0.001
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
        assert!(close(hsl_to_rgb(0.5, 0.0, 0.3), Vec3::splat(0.3)));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert!(close(hsl_to_rgb(1.25, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5)));
    }

    #[test]
    fn test_assign_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for scheme in [
            ColorScheme::Single,
            ColorScheme::Rainbow,
            ColorScheme::GradientY,
            ColorScheme::TornadoSpecial,
        ] {
            for i in 0..500 {
                let pos = Vec3::new(0.0, i as f32 / 100.0 - 2.5, 0.0);
                let c = assign(i, 500, pos, scheme, &mut rng);
                assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_single_is_white() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(assign(3, 10, Vec3::ZERO, ColorScheme::Single, &mut rng), Vec3::ONE);
    }

    #[test]
    fn test_rainbow_starts_red() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = assign(0, 100, Vec3::ZERO, ColorScheme::Rainbow, &mut rng);
        assert!(close(c, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_gradient_y_spans_hue() {
        let mut rng = StdRng::seed_from_u64(1);
        let at = |y: f32, rng: &mut StdRng| {
            assign(0, 1, Vec3::new(0.0, y, 0.0), ColorScheme::GradientY, rng)
        };
        assert!(close(at(-2.0, &mut rng), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(at(-1.0, &mut rng), Vec3::new(0.5, 1.0, 0.0)));
        assert!(close(at(0.0, &mut rng), Vec3::new(0.0, 1.0, 1.0)));
        assert!(close(at(2.0, &mut rng), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_tornado_special_mix() {
        let mut rng = StdRng::seed_from_u64(9);
        let n = 10_000;
        let debris = (0..n)
            .map(|i| assign(i, n, Vec3::ZERO, ColorScheme::TornadoSpecial, &mut rng))
            .filter(|c| *c == DEBRIS_YELLOW)
            .count();
        let ratio = debris as f32 / n as f32;
        assert!((ratio - 0.05).abs() < 0.015, "debris ratio {ratio}");
    }

    #[test]
    fn test_material_tint() {
        let cyan = Vec3::new(0.0, 1.0, 1.0);
        assert_eq!(material_tint(ColorScheme::Single, cyan), cyan);
        assert_eq!(material_tint(ColorScheme::Rainbow, cyan), Vec3::ONE);
        assert_eq!(material_tint(ColorScheme::TornadoSpecial, cyan), Vec3::ONE);
    }

    #[test]
    fn test_scheme_follows_tornado() {
        assert_eq!(ColorScheme::Rainbow.for_shape(Shape::Tornado), ColorScheme::TornadoSpecial);
        assert_eq!(ColorScheme::TornadoSpecial.for_shape(Shape::Heart), ColorScheme::Single);
        assert_eq!(ColorScheme::GradientY.for_shape(Shape::Heart), ColorScheme::GradientY);
    }

    #[test]
    fn test_parse_hex() {
        assert!(close(parse_hex("#00ffff").unwrap(), Vec3::new(0.0, 1.0, 1.0)));
        assert!(close(parse_hex("ff8000").unwrap(), Vec3::new(1.0, 128.0 / 255.0, 0.0)));
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
        assert!(parse_hex("#+f+f+f").is_err());
    }

    #[test]
    fn test_scheme_ids() {
        for scheme in [
            ColorScheme::Single,
            ColorScheme::Rainbow,
            ColorScheme::GradientY,
            ColorScheme::TornadoSpecial,
        ] {
            assert_eq!(scheme.id().parse::<ColorScheme>().unwrap(), scheme);
        }
        assert!("plaid".parse::<ColorScheme>().is_err());
    }
}
