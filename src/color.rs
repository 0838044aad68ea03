//! RGB pixel types and the hexadecimal triplets used by the host
//! (e.g. `"1b9e77"`).

use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};
use crate::error::{Error, Result};

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Parse a six digit hexadecimal triplet, with or without a
    /// leading `#`.  The color is opaque.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use map_brewery::RGBColor;
    /// let c = RGB8::from_hex("1b9e77").unwrap();
    /// assert_eq!(c, RGB8::new(0x1b, 0x9e, 0x77));
    /// ```
    fn from_hex(s: &str) -> Result<Self> {
        let [r, g, b] = parse_hex(s)?;
        Ok(Self::from_rgba(RGBA { r: r as f64, g: g as f64, b: b as f64,
                                  a: 255. }))
    }

    /// Return the color as a lowercase six digit hexadecimal triplet
    /// without `#`.  Components are rounded and clamped to \[0, 255\].
    fn to_hex(&self) -> String {
        let RGBA { r, g, b, .. } = self.to_rgba();
        format!("{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA { r, g, b, a } = self.to_rgba();
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA { r: x, g: x, b: x, a })
    }
}

#[inline]
fn channel(x: f64) -> u8 { x.round().clamp(0., 255.) as u8 }

fn parse_hex(s: &str) -> Result<[u8; 3]> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::invalid("color", s,
                                  "expected six hexadecimal digits"));
    }
    let mut rgb = [0; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        *c = u8::from_str_radix(&digits[2 * i .. 2 * i + 2], 16)
            .map_err(|e| Error::invalid("color", s, e.to_string()))?;
    }
    Ok(rgb)
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: channel(c.r), g: channel(c.g), b: channel(c.b) }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: c.r.round() as u16, g: c.g.round() as u16,
                b: c.b.round() as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.r as f64, g: self.g as f64, b: self.b as f64,
               a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: channel(c.r), g: channel(c.g), b: channel(c.b),
                a: channel(c.a) }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.r as f64, g: self.g as f64, b: self.b as f64,
               a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: c.r.round() as u16, g: c.g.round() as u16,
                 b: c.b.round() as u16, a: c.a.round() as u16 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_hash_prefix() {
        let c = RGB8::from_hex("#ff7f00").unwrap();
        assert_eq!(c, RGB8::new(255, 127, 0));
        assert_eq!(c.to_hex(), "ff7f00");
    }

    #[test]
    fn hex_rejects_malformed() {
        for s in ["", "fff", "1b9e7", "1b9e777", "gg0000", "#12345"] {
            assert!(matches!(RGB8::from_hex(s),
                             Err(Error::InvalidArgument { name: "color", .. })),
                    "{s:?} accepted");
        }
    }

    #[test]
    fn hex_is_zero_padded() {
        // Small components must keep two digits each.
        assert_eq!(RGB8::new(1, 10, 0).to_hex(), "010a00");
    }

    #[test]
    fn hex_rounds_and_clamps() {
        let c = RGBA { r: 254.6, g: -3., b: 300., a: 255. };
        assert_eq!(c.to_hex(), "ff00ff");
    }

    #[test]
    fn gray_keeps_alpha() {
        let g = RGBA8::new(255, 0, 0, 12).to_gray();
        assert_eq!((g.r, g.g, g.b, g.a), (76, 76, 76, 12));
    }
}
