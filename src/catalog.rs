//! The read-only catalog of named palettes.
//!
//! Every palette holds one ramp per supported number of colors.
//! Lookups that ask for a length the palette does not define go
//! through a fallback policy, see [`Palette::resolve_len`].

use std::collections::HashMap;
use std::ops::Deref;
use lazy_static::lazy_static;
use tracing::{debug, trace};
use crate::{
    color::RGBColor,
    error::{Error, Result},
    gradient::{Gradient, Interpolation},
    palettes::{ALL_PALETTES, ty::PaletteData},
    PaletteType,
};

lazy_static! {
    static ref CATALOG: Catalog = Catalog::new(ALL_PALETTES);
}

/// Immutable mapping from palette names to their ramps.
pub struct Catalog {
    palettes: &'static [PaletteData],
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    fn new(palettes: &'static [PaletteData]) -> Self {
        let index: HashMap<_, _> = palettes.iter().enumerate()
            .map(|(i, p)| (p.name, i))
            .collect();
        debug!(palettes = palettes.len(), "palette catalog initialized");
        Catalog { palettes, index }
    }

    /// The catalog of Brewer palettes embedded in the crate.  It is
    /// built on first use.
    pub fn global() -> &'static Catalog { &CATALOG }

    /// Number of palettes.
    pub fn len(&self) -> usize { self.palettes.len() }

    /// Whether the catalog holds no palette.
    pub fn is_empty(&self) -> bool { self.palettes.is_empty() }

    /// All palette names, in the order they were authored.
    pub fn names(&self) -> Vec<&'static str> {
        self.palettes.iter().map(|p| p.name).collect()
    }

    /// All palettes, in the order they were authored.
    pub fn palettes(&self) -> impl ExactSizeIterator<Item = Palette> + '_ {
        self.palettes.iter().map(Palette::new)
    }

    /// The palette called `name` (case sensitive, e.g. `"YlGn"`).
    pub fn palette(&self, name: &str) -> Result<Palette> {
        match self.index.get(name) {
            Some(&i) => Ok(Palette::new(&self.palettes[i])),
            None => Err(Error::unknown_palette(name)),
        }
    }

    /// The ramp lengths defined for `name`, in increasing order.
    pub fn lengths(&self, name: &str) -> Result<Vec<usize>> {
        Ok(self.palette(name)?.lengths().collect())
    }

    /// Return the colors of palette `name` with `length` colors.  If
    /// the palette does not define this length, the ramp chosen by
    /// [`Palette::resolve_len`] is returned; check its length.
    ///
    /// # Example
    ///
    /// ```
    /// use map_brewery::Catalog;
    /// let ramp = Catalog::global().get("YlGn", 10).unwrap();
    /// assert_eq!(ramp.len(), 9);
    /// assert_eq!(ramp.last(), Some(&"004529"));
    /// ```
    pub fn get(&self, name: &str, length: usize) -> Result<Ramp> {
        Ok(self.palette(name)?.get(length))
    }

    /// Same as [`Catalog::get`] without the fallback policy: an
    /// undefined length is an error.
    pub fn get_exact(&self, name: &str, length: usize) -> Result<Ramp> {
        let p = self.palette(name)?;
        p.ramp(length).ok_or_else(|| Error::NotFound {
            what: format!("{length} colors for palette “{name}” \
                           (defined: {}..={})", p.min_len(), p.max_len()),
        })
    }

    /// Find palettes with at least `len` colors.  Use the methods of
    /// [`PaletteFind`] to narrow the search.
    pub fn find(&self, len: usize) -> PaletteFind<'_> {
        PaletteFind { catalog: self, len, typ: vec![] }
    }
}

/// A palette of the catalog.
#[derive(Clone, Copy)]
pub struct Palette {
    palette: &'static PaletteData,
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("name", &self.name())
            .field("typ", &self.typ())
            .field("lengths", &self.lengths())
            .finish()
    }
}

impl Palette {
    fn new(palette: &'static PaletteData) -> Self { Palette { palette } }

    /// The name of the palette.
    pub fn name(&self) -> &'static str { self.palette.name }

    /// Says whether the palette is `Seq`uential, `Div`ergent or
    /// `Qual`itative.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// The smallest number of colors of the palette.
    pub fn min_len(&self) -> usize { self.first().len() }

    /// The largest number of colors of the palette.
    pub fn max_len(&self) -> usize { self.min_len() + self.palette.ramps.len() - 1 }

    /// Range of defined ramp lengths.
    pub fn lengths(&self) -> std::ops::RangeInclusive<usize> {
        self.min_len() ..= self.max_len()
    }

    fn first(&self) -> Ramp { Ramp { hex: self.palette.ramps[0] } }

    /// The ramp with exactly `len` colors, if defined.
    pub fn ramp(&self, len: usize) -> Option<Ramp> {
        let i = len.checked_sub(self.min_len())?;
        self.palette.ramps.get(i).map(|&hex| Ramp { hex })
    }

    /// All ramps, shortest first.
    pub fn ramps(&self) -> impl DoubleEndedIterator<Item = Ramp> + ExactSizeIterator {
        self.palette.ramps.iter().map(|&hex| Ramp { hex })
    }

    /// Length fallback policy: `len` itself if defined, otherwise the
    /// nearest defined length above `len`, otherwise the largest
    /// defined length.  Ramps longer than requested are preferred so
    /// that no class is left without a color; past the end the
    /// longest ramp is used, as the palette preview always did.
    pub fn resolve_len(&self, len: usize) -> usize {
        len.clamp(self.min_len(), self.max_len())
    }

    /// The ramp for `len` colors, following [`Palette::resolve_len`].
    pub fn get(&self, len: usize) -> Ramp {
        let resolved = self.resolve_len(len);
        if resolved != len {
            debug!(palette = self.name(), requested = len, resolved,
                   "ramp length not defined, using fallback");
        }
        let i = resolved - self.min_len();
        Ramp { hex: self.palette.ramps[i] }
    }
}

/// An ordered sequence of colors, as hexadecimal triplets such as
/// `"1b9e77"`.  Dereferences to the slice of triplets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ramp {
    hex: &'static [&'static str],
}

impl Deref for Ramp {
    type Target = [&'static str];

    fn deref(&self) -> &Self::Target { self.hex }
}

impl Ramp {
    /// The colors as hexadecimal triplets.
    pub fn hex(&self) -> &'static [&'static str] { self.hex }

    /// Returns the colors of the ramp in the encoding `C`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use map_brewery::Catalog;
    /// let dark2 = Catalog::global().get("Dark2", 3).unwrap();
    /// let c: Vec<RGB8> = dark2.colors().unwrap();
    /// assert_eq!(c[0], RGB8::new(0x1b, 0x9e, 0x77));
    /// ```
    pub fn colors<C: RGBColor>(&self) -> Result<Vec<C>> {
        self.hex.iter().map(|h| C::from_hex(h)).collect()
    }

    /// A gradient going through the colors of the ramp.  It only
    /// makes sense for sequential and diverging palettes.
    pub fn gradient<C: RGBColor>(&self, mode: Interpolation)
                                 -> Result<Gradient<C>> {
        let colors: Vec<rgb::RGBA<f64>> = self.colors()?;
        trace!(len = colors.len(), ?mode, "ramp gradient");
        Gradient::new(&colors, mode)
            .ok_or_else(|| Error::invalid("ramp", "[]", "no colors"))
    }
}

/// Set criteria to find matching palettes.
///
/// Created by [`Catalog::find`].
#[derive(Clone)]
pub struct PaletteFind<'a> {
    catalog: &'a Catalog,
    len: usize,
    typ: Vec<PaletteType>,
}

impl<'a> PaletteFind<'a> {
    /// Find [`Palette`]s with this type.  Use several times to
    /// specify more than one [`PaletteType`].
    pub fn typ(mut self, t: PaletteType) -> Self {
        self.typ.push(t);
        self
    }

    /// Return the palettes with at least the requested number of
    /// colors (and satisfying the criteria set with other methods),
    /// in catalog order.
    pub fn find(self) -> impl Iterator<Item = Palette> + 'a {
        let PaletteFind { catalog, len, typ } = self;
        catalog.palettes().filter(move |p| {
            p.max_len() >= len && (typ.is_empty() || typ.contains(&p.typ()))
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    #[test]
    fn ramp_sizes_match_keys() {
        for p in Catalog::global().palettes() {
            for len in p.lengths() {
                let r = Catalog::global().get_exact(p.name(), len).unwrap();
                assert_eq!(r.len(), len, "{} at {len}", p.name());
            }
            assert_eq!(p.min_len(), 3, "{}", p.name());
        }
    }

    #[test]
    fn every_color_parses() {
        for p in Catalog::global().palettes() {
            for r in p.ramps() {
                let c: Vec<RGB8> = r.colors().unwrap();
                for (c, h) in c.iter().zip(r.iter()) {
                    assert_eq!(c.to_hex(), *h);
                }
            }
        }
    }

    #[test]
    fn names_are_unique_and_stable() {
        let c = Catalog::global();
        let names = c.names();
        assert_eq!(names.len(), 35);
        assert_eq!(c.index.len(), names.len());
        assert_eq!(names, c.names());
        assert_eq!(names[0], "YlGn");
        assert_eq!(names[34], "Set3");
    }

    #[test]
    fn unknown_name() {
        let c = Catalog::global();
        assert!(matches!(c.get("Viridis", 3), Err(Error::NotFound { .. })));
        assert!(matches!(c.lengths("ylgn"), Err(Error::NotFound { .. })));
        assert!(c.palette("").is_err());
    }

    #[test]
    fn fallback_above_max() {
        let r = Catalog::global().get("YlGn", 10).unwrap();
        assert_eq!(r.len(), 9);
        assert_eq!(r[8], "004529");
    }

    #[test]
    fn fallback_below_min() {
        let c = Catalog::global();
        for len in 0 .. 3 {
            assert_eq!(c.get("Set1", len).unwrap(),
                       c.get_exact("Set1", 3).unwrap());
        }
    }

    #[test]
    fn exact_is_strict() {
        let c = Catalog::global();
        assert!(matches!(c.get_exact("YlGn", 10),
                         Err(Error::NotFound { .. })));
        assert!(c.get_exact("Paired", 12).is_ok());
        assert!(c.get_exact("Dark2", 2).is_err());
    }

    #[test]
    fn lengths_are_contiguous() {
        let c = Catalog::global();
        assert_eq!(c.lengths("YlGn").unwrap(), (3 ..= 9).collect::<Vec<_>>());
        assert_eq!(c.lengths("RdBu").unwrap(), (3 ..= 11).collect::<Vec<_>>());
        assert_eq!(c.lengths("Accent").unwrap(), (3 ..= 8).collect::<Vec<_>>());
        assert_eq!(c.lengths("Set3").unwrap(), (3 ..= 12).collect::<Vec<_>>());
    }

    #[test]
    fn palette_types() {
        use PaletteType::*;
        let c = Catalog::global();
        let count = |t: PaletteType| c.palettes().filter(|p| p.typ() == t).count();
        assert_eq!((count(Seq), count(Div), count(Qual)), (18, 9, 8));
        assert_eq!(c.palette("Spectral").unwrap().typ(), Div);
    }

    #[test]
    fn find_by_length_and_type() {
        let c = Catalog::global();
        let names: Vec<_> = c.find(12).find().map(|p| p.name()).collect();
        assert_eq!(names, ["Paired", "Set3"]);
        let div = c.find(10).typ(PaletteType::Div).find().count();
        assert_eq!(div, 9);
        let n = c.find(9).typ(PaletteType::Seq).typ(PaletteType::Qual)
            .find().count();
        assert_eq!(n, 18 + 4);
    }

    #[test]
    fn ramp_gradient_ends() {
        let r = Catalog::global().get("Blues", 9).unwrap();
        let g = r.gradient::<RGB8>(Interpolation::Linear).unwrap();
        use crate::ColorRange;
        assert_eq!(g.rgb(0.).to_hex(), "f7fbff");
        assert_eq!(g.rgb(1.).to_hex(), "08306b");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fallback_is_nearest_at_or_above(idx in 0usize .. 35,
                                               len in 0usize .. 40) {
                let c = Catalog::global();
                let name = c.names()[idx];
                let got = c.get(name, len).unwrap().len();
                let keys = c.lengths(name).unwrap();
                let expected = keys.iter().copied().find(|&k| k >= len)
                    .unwrap_or(*keys.last().unwrap());
                prop_assert_eq!(got, expected);
            }
        }
    }
}
