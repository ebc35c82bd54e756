//! Random color generation for the `random` color keyword.
//!
//! Colors are drawn in HSV space with saturation and value kept in the upper
//! half of their range, so the lamp never ends up black, white or gray.

use rand::Rng;

/// Lower bound for generated saturation and value.
const MIN_SATURATION: f64 = 0.5;
const MIN_VALUE: f64 = 0.5;

/// Generate a random vivid color as `#rrggbb`.
pub fn random_color() -> String {
    random_color_with(&mut rand::thread_rng())
}

/// Generate a random vivid color using the provided RNG.
pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let h = rng.gen::<f64>();
    let s = rng.gen_range(MIN_SATURATION..1.0);
    let v = rng.gen_range(MIN_VALUE..1.0);
    hsv_to_hex(h, s, v)
}

/// Convert an HSV triple (each in `[0, 1]`) to RGB channels.
///
/// Uses the six-sector piecewise formula. Channels are mapped to bytes by
/// truncating `c * 256`, clamped to 255. A hue of `1.0` wraps to red.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [channel(r), channel(g), channel(b)]
}

/// Convert an HSV triple to a `#rrggbb` string.
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> String {
    let [r, g, b] = hsv_to_rgb(h, s, v);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn channel(c: f64) -> u8 {
    (c * 256.0).floor().clamp(0.0, 255.0) as u8
}
