/// A named family of ramps, one per supported number of colors.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str,
    pub(crate) typ: PaletteType,
    // Invariant: `ramps[i].len() == ramps[0].len() + i`, starting at 3.
    pub(crate) ramps: &'static [&'static [&'static str]],
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaletteType {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high. Lightness steps dominate the look of these
    /// schemes, with light colors for low data values to dark colors
    /// for high data values.
    Seq,
    /// Divergent color scheme.  They put equal emphasis on mid-range
    /// critical values and extremes at both ends of the data
    /// range.  The critical class or break in the middle of the legend
    /// is emphasized with light colors and low and high extremes are
    /// emphasized with dark colors that have contrasting hues.
    Div,
    /// Qualitative color scheme.  They do not imply magnitude
    /// differences between legend classes, and hues are used to
    /// create the primary visual differences between classes.
    /// Qualitative schemes are best suited to representing nominal or
    /// categorical data.
    Qual
}
