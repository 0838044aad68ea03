//! Continuous color ranges built from discrete ramps.
//!
//! The host draws a palette by interpolating linearly between the
//! ramp colors in sRGB, which is what [`Interpolation::Linear`] does.
//! [`Interpolation::Lch`] interpolates in CIE L\*C\*h\* instead and
//! gives perceptually smoother bars.

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::RGBA;
use crate::color::RGBColor;

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].  Values
    /// outside this interval are clamped.
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (both included) together with their
    /// colors.  The color at `a` is the one at `t = 0`.  It is not
    /// required that `a <= b`.
    fn range(self, a: f64, b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        Range { range: self, color: PhantomData, a, b, n, front: 0, back: n }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64,
    b: f64,
    n: usize,
    front: usize, // next position from the front
    back: usize, // one past the next position from the back
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    fn at(&self, k: usize) -> (f64, Color) {
        if self.n == 1 || k == 0 {
            return (self.a, self.range.rgb(0.))
        }
        let last = (self.n - 1) as f64;
        if k == self.n - 1 {
            return (self.b, self.range.rgb(1.))
        }
        let t = k as f64 / last;
        ((1. - t) * self.a + t * self.b, self.range.rgb(t))
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        let item = self.at(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        self.back -= 1;
        Some(self.at(self.back))
    }
}

/// How colors are blended between two consecutive ramp colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Component-wise in sRGB, as the host renders palettes.
    #[default]
    Linear,
    /// In CIE L\*C\*h\* (D50), following the shortest hue arc.
    Lch,
}

/// A gradient through a sequence of colors.
///
/// Created by [`crate::Ramp::gradient`] or [`Gradient::new`].  See
/// the [`ColorRange`] trait for methods.
#[derive(Clone)]
pub struct Gradient<Color> {
    stops: Vec<RGBA<f64>>, // Invariant: non-empty
    lch: Vec<Lch>, // empty unless `Interpolation::Lch`
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Gradient<Color> {
    /// Return a gradient going through `colors` in order, or `None`
    /// if `colors` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use map_brewery::{ColorRange, Gradient, Interpolation};
    /// let g: Gradient<RGB8> = Gradient::new(
    ///     &[RGB8::new(0, 0, 0), RGB8::new(255, 255, 255)],
    ///     Interpolation::Linear).unwrap();
    /// assert_eq!(g.rgb(0.5), RGB8::new(128, 128, 128));
    /// ```
    pub fn new<C: RGBColor>(colors: &[C], mode: Interpolation)
                            -> Option<Self> {
        if colors.is_empty() { return None }
        let stops: Vec<_> = colors.iter().map(|c| c.to_rgba()).collect();
        let lch = match mode {
            Interpolation::Linear => vec![],
            Interpolation::Lch => stops.iter().map(|&c| Lch::from_rgb(c))
                .collect(),
        };
        Some(Gradient { stops, lch, color: PhantomData })
    }

    /// The interpolation used between stops.
    pub fn interpolation(&self) -> Interpolation {
        if self.lch.is_empty() { Interpolation::Linear }
        else { Interpolation::Lch }
    }
}

impl<Color: RGBColor> ColorRange<Color> for Gradient<Color> {
    fn rgb(&self, t: f64) -> Color {
        let segments = self.stops.len() - 1;
        if segments == 0 {
            return Color::from_rgba(self.stops[0])
        }
        let tn = t.clamp(0., 1.) * segments as f64;
        let i = (tn.trunc() as usize).min(segments - 1);
        let s = tn - i as f64;
        let rgba = if self.lch.is_empty() {
            let (c0, c1) = (self.stops[i], self.stops[i + 1]);
            RGBA { r: c0.r + s * (c1.r - c0.r),
                   g: c0.g + s * (c1.g - c0.g),
                   b: c0.b + s * (c1.b - c0.b),
                   a: c0.a + s * (c1.a - c0.a) }
        } else {
            self.lch[i].mix(&self.lch[i + 1], s).to_rgb()
        };
        Color::from_rgba(rgba)
    }
}


/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point and an alpha component.  This color space is
/// CIE L*a*b* with polar coordinates.
#[derive(Clone, Copy, Debug)]
struct Lch {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
    /// Alpha component in \[0, 255\].
    a: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;
const TWO_PI: f64 = 2. * PI;

// sRGB companding, components in [0, 1].
fn to_linear(x: f64) -> f64 {
    if x <= 0.04045 { x / 12.92 } else { ((x + 0.055) / 1.055).powf(2.4) }
}

fn from_linear(x: f64) -> f64 {
    if x <= 0.0031308 { 12.92 * x } else { 1.055 * x.powf(1. / 2.4) - 0.055 }
}

impl Lch {
    fn from_rgb(c: RGBA<f64>) -> Lch {
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let r = to_linear(c.r / 255.);
        let g = to_linear(c.g / 255.);
        let b = to_linear(c.b / 255.);
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let f = |v: f64| if v > EPS { v.powf(C0) } else { C1 * v + C2 };
        let (fx, fy, fz) = (f(xr), f(yr), f(zr));
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = b.atan2(a);
        Lch { l: 116. * fy - 16.,
              c: a.hypot(b),
              h: if h < 0. { h + TWO_PI } else { h },
              a: c.a }
    }

    fn to_rgb(&self) -> RGBA<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let f = |v: f64| if v > EPS0 { v * v * v } else { C0 * (v - C1) };
        let (x, y, z) = (f(fx), f(fy), f(fz));
        let r = 3.0215932 * x - 1.6168777 * y - 0.4047152 * z;
        let g = -0.9437222 * x + 1.9161365 * y + 0.0275856 * z;
        let b = 0.0693906 * x - 0.2290271 * y + 1.1596365 * z;
        let srgb = |v: f64| 255. * from_linear(v.clamp(0., 1.));
        RGBA { r: srgb(r), g: srgb(g), b: srgb(b), a: self.a }
    }

    /// Interpolate towards `other`, turning along the shortest hue arc.
    fn mix(&self, other: &Lch, s: f64) -> Lch {
        let mut dh = other.h - self.h;
        if dh > PI { dh -= TWO_PI } else if dh < -PI { dh += TWO_PI }
        Lch { l: self.l + s * (other.l - self.l),
              c: self.c + s * (other.c - self.c),
              h: self.h + s * dh,
              a: self.a + s * (other.a - self.a) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn bw(mode: Interpolation) -> Gradient<RGB8> {
        Gradient::new(&[RGB8::new(0, 0, 0), RGB8::new(255, 255, 255)], mode)
            .unwrap()
    }

    #[test]
    fn empty_gradient() {
        assert!(Gradient::<RGB8>::new::<RGB8>(&[], Interpolation::Linear)
                .is_none());
    }

    #[test]
    fn single_stop_is_constant() {
        let c = RGB8::new(1, 2, 3);
        let g: Gradient<RGB8> = Gradient::new(&[c], Interpolation::Lch)
            .unwrap();
        assert_eq!(g.rgb(0.), c);
        assert_eq!(g.rgb(0.7), c);
    }

    #[test]
    fn endpoints_are_stops() {
        for mode in [Interpolation::Linear, Interpolation::Lch] {
            let g = bw(mode);
            assert_eq!(g.rgb(0.), RGB8::new(0, 0, 0));
            assert_eq!(g.rgb(1.), RGB8::new(255, 255, 255));
            assert_eq!(g.rgb(-4.), RGB8::new(0, 0, 0));
            assert_eq!(g.rgb(9.), RGB8::new(255, 255, 255));
        }
    }

    #[test]
    fn lch_round_trip() {
        for c in [RGB8::new(27, 158, 119), RGB8::new(217, 95, 2),
                  RGB8::new(117, 112, 179)] {
            let g: Gradient<RGB8> = Gradient::new(&[c, c],
                                                  Interpolation::Lch)
                .unwrap();
            let d = g.rgb(0.5);
            assert!((d.r as i32 - c.r as i32).abs() <= 1
                    && (d.g as i32 - c.g as i32).abs() <= 1
                    && (d.b as i32 - c.b as i32).abs() <= 1,
                    "{c:?} ≉ {d:?}");
        }
    }

    #[test]
    fn piecewise_stops() {
        let g: Gradient<RGB8> = Gradient::new(
            &[RGB8::new(0, 0, 0), RGB8::new(200, 0, 0), RGB8::new(200, 100, 0)],
            Interpolation::Linear).unwrap();
        assert_eq!(g.rgb(0.5), RGB8::new(200, 0, 0));
        assert_eq!(g.rgb(0.25), RGB8::new(100, 0, 0));
        assert_eq!(g.rgb(0.75), RGB8::new(200, 50, 0));
    }

    #[test]
    fn range_bounds_and_reverse() {
        let r: Vec<_> = bw(Interpolation::Linear).range(10., 0., 11)
            .collect();
        assert_eq!(r.len(), 11);
        for (i, (x, _)) in r.iter().enumerate() {
            assert!((x - (10. - i as f64)).abs() <= 1e-12,
                    "{} ≉ {}", x, 10. - i as f64);
        }
        assert_eq!(r[0].1, RGB8::new(0, 0, 0));
        assert_eq!(r[10].1, RGB8::new(255, 255, 255));
        let back: Vec<_> = bw(Interpolation::Linear).range(10., 0., 11)
            .rev().map(|(x, _)| x).collect();
        assert_eq!(back.first(), Some(&0.));
        assert_eq!(back.last(), Some(&10.));
    }

    #[test]
    fn range_degenerate() {
        assert_eq!(bw(Interpolation::Linear).range(0., 1., 0).count(), 0);
        let one: Vec<_> = bw(Interpolation::Linear).range(3., 5., 1)
            .collect();
        assert_eq!(one, vec![(3., RGB8::new(0, 0, 0))]);
    }
}
