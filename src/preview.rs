//! Side by side preview of every palette, with a color picker.
//!
//! Each palette is shown as a vertical strip labelled with its name and
//! its maximum number of colors.  Positions are normalized: `x` runs
//! across the strips, `y` from the bottom (first color) to the top
//! (last color) of a strip.

use rgb::RGB8;
use tracing::debug;
use crate::{
    catalog::{Catalog, Palette, Ramp},
    color::RGBColor,
    error::Result,
    gradient::{ColorRange, Gradient, Interpolation},
};

/// Number of colors previewed when none is requested.
pub const DEFAULT_LENGTH: usize = 3;

/// One palette of the preview.
#[derive(Clone)]
pub struct Strip {
    palette: Palette,
    ramp: Ramp,
    gradient: Gradient<RGB8>,
}

impl std::fmt::Debug for Strip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strip")
            .field("name", &self.name())
            .field("max_len", &self.max_len())
            .field("ramp", &self.ramp)
            .finish()
    }
}

impl Strip {
    fn new(palette: Palette, len: usize) -> Result<Self> {
        let ramp = palette.get(len);
        let gradient = ramp.gradient(Interpolation::Linear)?;
        Ok(Strip { palette, ramp, gradient })
    }

    pub fn name(&self) -> &'static str { self.palette.name() }

    /// The maximum number of colors of the palette, shown under its
    /// name.
    pub fn max_len(&self) -> usize { self.palette.max_len() }

    /// The ramp drawn in the strip.
    pub fn ramp(&self) -> Ramp { self.ramp }

    /// The color at height `y` ∈ \[0, 1\] (clamped), as a six digit
    /// hexadecimal triplet.
    pub fn pick(&self, y: f64) -> String {
        self.gradient.rgb(y).to_hex()
    }
}

/// Preview of all palettes of a catalog.
#[derive(Clone, Debug)]
pub struct Preview {
    strips: Vec<Strip>,
}

impl Preview {
    /// Preview every palette of `catalog` with `length` colors
    /// (default [`DEFAULT_LENGTH`]).  Palettes that do not define
    /// `length` follow the fallback policy of
    /// [`Palette::resolve_len`].
    ///
    /// # Example
    ///
    /// ```
    /// use map_brewery::{Catalog, Preview};
    /// let p = Preview::new(Catalog::global(), Some(12)).unwrap();
    /// let s = &p.strips()[0];
    /// assert_eq!((s.name(), s.ramp().len()), ("YlGn", 9));
    /// assert_eq!(s.pick(1.), "004529");
    /// ```
    pub fn new(catalog: &Catalog, length: Option<usize>) -> Result<Self> {
        let len = length.unwrap_or(DEFAULT_LENGTH);
        let strips = catalog.palettes().map(|p| Strip::new(p, len))
            .collect::<Result<Vec<_>>>()?;
        debug!(strips = strips.len(), len, "palette preview");
        Ok(Preview { strips })
    }

    /// The strips, in catalog order from left to right.
    pub fn strips(&self) -> &[Strip] { &self.strips }

    /// The strip under the horizontal position `x` ∈ \[0, 1\].
    pub fn strip_at(&self, x: f64) -> Option<&Strip> {
        if !(0. ..= 1.).contains(&x) || self.strips.is_empty() {
            return None
        }
        let n = self.strips.len();
        let i = ((x * n as f64) as usize).min(n - 1);
        Some(&self.strips[i])
    }

    /// The color under `(x, y)`, or `None` outside of the preview.
    pub fn pick(&self, x: f64, y: f64) -> Option<String> {
        if !(0. ..= 1.).contains(&y) { return None }
        let s = self.strip_at(x)?;
        let c = s.pick(y);
        debug!(palette = s.name(), x, y, color = %c, "picked color");
        Some(c)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn preview(len: Option<usize>) -> Preview {
        Preview::new(Catalog::global(), len).unwrap()
    }

    #[test]
    fn one_strip_per_palette() {
        let p = preview(None);
        assert_eq!(p.strips().len(), 35);
        assert!(p.strips().iter().all(|s| s.ramp().len() == 3));
        let names: Vec<_> = p.strips().iter().map(|s| s.name()).collect();
        assert_eq!(names, Catalog::global().names());
    }

    #[test]
    fn long_request_uses_fallback() {
        let p = preview(Some(12));
        let len = |name: &str| p.strips().iter().find(|s| s.name() == name)
            .map(|s| (s.ramp().len(), s.max_len()));
        assert_eq!(len("Paired"), Some((12, 12)));
        assert_eq!(len("Set3"), Some((12, 12)));
        assert_eq!(len("YlGn"), Some((9, 9)));
        assert_eq!(len("RdBu"), Some((11, 11)));
    }

    #[test]
    fn pick_ends_of_strip() {
        let p = preview(Some(3));
        let dark2 = p.strips().iter().find(|s| s.name() == "Dark2").unwrap();
        assert_eq!(dark2.pick(0.), "1b9e77");
        assert_eq!(dark2.pick(0.5), "d95f02");
        assert_eq!(dark2.pick(1.), "7570b3");
        assert_eq!(dark2.pick(7.), "7570b3");
    }

    #[test]
    fn pick_locates_strip() {
        let p = preview(None);
        assert_eq!(p.pick(0., 0.).as_deref(), Some("f7fcb9"));
        // Rightmost strip is Set3.
        assert_eq!(p.pick(1., 1.).as_deref(), Some("bebada"));
        assert_eq!(p.strip_at(0.999).map(|s| s.name()), Some("Set3"));
    }

    #[test]
    fn pick_outside() {
        let p = preview(None);
        assert_eq!(p.pick(-0.1, 0.5), None);
        assert_eq!(p.pick(0.5, 1.5), None);
        assert_eq!(p.pick(f64::NAN, 0.5), None);
    }
}
