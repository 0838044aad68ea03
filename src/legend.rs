//! Legend descriptions.
//!
//! A legend is returned as plain data; the UI layer builds the
//! widgets and, when [`GradientLegend::attach`] (resp.
//! [`DiscreteLegend::attach`]) is set, adds them to its current view.

use std::fmt;
use std::str::FromStr;
use rgb::RGB8;
use tracing::debug;
use crate::{
    color::RGBColor,
    error::{Error, Result},
    gradient::{ColorRange, Gradient, Interpolation},
};

/// Number of samples of a gradient legend bar.
pub const DEFAULT_STEPS: usize = 100;

/// Anchor of a widget on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Position {
    /// `"top-left"`.
    TopLeft,
    /// `"top-center"`.
    TopCenter,
    /// `"top-right"`.
    TopRight,
    /// `"middle-left"`.
    MiddleLeft,
    /// `"middle-right"`.
    MiddleRight,
    /// `"bottom-left"`, the default.
    #[default]
    BottomLeft,
    /// `"bottom-center"`.
    BottomCenter,
    /// `"bottom-right"`.
    BottomRight,
}

impl Position {
    /// All anchors, top to bottom and left to right.
    pub const ALL: [Position; 8] = [
        Position::TopLeft, Position::TopCenter, Position::TopRight,
        Position::MiddleLeft, Position::MiddleRight,
        Position::BottomLeft, Position::BottomCenter, Position::BottomRight,
    ];

    /// The name used by the host, e.g. `"bottom-left"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::MiddleLeft => "middle-left",
            Position::MiddleRight => "middle-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Position::ALL.into_iter().find(|p| p.as_str() == s)
            .ok_or_else(|| Error::invalid("position", s, "unknown anchor"))
    }
}

/// Visualization parameters: a value range drawn with a palette.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisParams {
    pub min: f64,
    pub max: f64,
    /// Hexadecimal triplets, with or without `#`.
    pub palette: Vec<String>,
    /// Bands the parameters apply to.  Legends ignore them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bands: Vec<String>,
}

impl VisParams {
    pub fn new(min: f64, max: f64, palette: &[&str]) -> Self {
        VisParams { min, max,
                    palette: palette.iter().map(|s| s.to_string()).collect(),
                    bands: vec![] }
    }
}

/// A continuous legend: the max label on top, a color bar, and the
/// min label at the bottom.
///
/// With the `serde` feature, the legend serializes with its labels
/// and [`bar`](Self::bar) spelled out.  Deserializing only needs the
/// fields of [`VisParams`] (the rest is optional) and recomputes the
/// bar.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde",
           serde(into = "GradientData", try_from = "GradientData"))]
pub struct GradientLegend {
    title: String,
    position: Position,
    attach: bool,
    min: f64,
    max: f64,
    steps: usize,
    palette: Vec<String>,
    gradient: Gradient<RGB8>,
}

impl fmt::Debug for GradientLegend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientLegend")
            .field("title", &self.title)
            .field("position", &self.position)
            .field("attach", &self.attach)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("steps", &self.steps)
            .field("palette", &self.palette)
            .finish()
    }
}

impl GradientLegend {
    /// Create a legend for `vis`.  Fails if the palette is empty or
    /// holds a malformed color, or if a bound is not finite.
    pub fn new(vis: &VisParams) -> Result<Self> {
        for (name, v) in [("min", vis.min), ("max", vis.max)] {
            if !v.is_finite() {
                return Err(Error::invalid(name, v, "must be finite"))
            }
        }
        let colors = vis.palette.iter().map(|c| RGB8::from_hex(c))
            .collect::<Result<Vec<_>>>()?;
        let gradient = Gradient::new(&colors, Interpolation::Linear)
            .ok_or_else(|| Error::invalid("palette", "[]", "no colors"))?;
        if !vis.bands.is_empty() {
            debug!(bands = ?vis.bands, "bands ignored by gradient legend");
        }
        Ok(GradientLegend { title: String::new(), position: Position::default(),
                            attach: true, min: vis.min, max: vis.max,
                            steps: DEFAULT_STEPS,
                            palette: colors.iter().map(|c| c.to_hex()).collect(),
                            gradient })
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Whether the UI layer should add the legend to its view (the
    /// default) or only hand it back.
    pub fn attach(mut self, attach: bool) -> Self {
        self.attach = attach;
        self
    }

    /// Number of samples of the color bar (at least 2).
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps.max(2);
        self
    }

    pub fn get_title(&self) -> &str { &self.title }
    pub fn get_position(&self) -> Position { self.position }
    pub fn is_attached(&self) -> bool { self.attach }

    /// The label drawn above the bar.
    pub fn max_label(&self) -> String { self.max.to_string() }

    /// The label drawn below the bar.
    pub fn min_label(&self) -> String { self.min.to_string() }

    /// The color bar, from top (`max`) to bottom (`min`): values and
    /// their colors as hexadecimal triplets.
    pub fn bar(&self) -> Vec<(f64, String)> {
        self.gradient.clone().range(self.min, self.max, self.steps).rev()
            .map(|(x, c)| (x, c.to_hex()))
            .collect()
    }
}

#[cfg(feature = "serde")]
fn default_attach() -> bool { true }

#[cfg(feature = "serde")]
fn default_steps() -> usize { DEFAULT_STEPS }

/// Serialized form of a [`GradientLegend`].
#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct GradientData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    position: Position,
    #[serde(default = "default_attach")]
    attach: bool,
    min: f64,
    max: f64,
    #[serde(default = "default_steps")]
    steps: usize,
    palette: Vec<String>,
    #[serde(default)]
    max_label: String,
    #[serde(default)]
    min_label: String,
    #[serde(default)]
    bar: Vec<(f64, String)>,
}

#[cfg(feature = "serde")]
impl From<GradientLegend> for GradientData {
    fn from(l: GradientLegend) -> Self {
        GradientData { max_label: l.max_label(), min_label: l.min_label(),
                       bar: l.bar(),
                       title: l.title, position: l.position, attach: l.attach,
                       min: l.min, max: l.max, steps: l.steps,
                       palette: l.palette }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GradientData> for GradientLegend {
    type Error = Error;

    fn try_from(d: GradientData) -> Result<Self> {
        let vis = VisParams { min: d.min, max: d.max, palette: d.palette,
                              bands: vec![] };
        Ok(GradientLegend::new(&vis)?.title(d.title).position(d.position)
           .attach(d.attach).steps(d.steps))
    }
}

/// A legend of named classes, one colored box per class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteLegend {
    title: String,
    position: Position,
    attach: bool,
    rows: Vec<(String, String)>,
}

impl DiscreteLegend {
    /// Pair `names[i]` with `colors[i]`.  Both lists must have the
    /// same length and colors must be hexadecimal triplets.
    ///
    /// # Example
    ///
    /// ```
    /// use map_brewery::DiscreteLegend;
    /// let l = DiscreteLegend::new(&["water", "forest"],
    ///                             &["#0000ff", "228B22"]).unwrap();
    /// assert_eq!(l.rows()[1], ("forest".to_string(), "228b22".to_string()));
    /// ```
    pub fn new<N, C>(names: &[N], colors: &[C]) -> Result<Self>
    where N: AsRef<str>, C: AsRef<str> {
        if names.len() != colors.len() {
            return Err(Error::invalid(
                "colors", colors.len(),
                format!("expected one color per name ({})", names.len())))
        }
        let rows = names.iter().zip(colors)
            .map(|(n, c)| Ok((n.as_ref().to_string(),
                              RGB8::from_hex(c.as_ref())?.to_hex())))
            .collect::<Result<Vec<_>>>()?;
        Ok(DiscreteLegend { title: String::new(),
                            position: Position::default(),
                            attach: true, rows })
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Whether the UI layer should add the legend to its view (the
    /// default) or only hand it back.
    pub fn attach(mut self, attach: bool) -> Self {
        self.attach = attach;
        self
    }

    pub fn get_title(&self) -> &str { &self.title }
    pub fn get_position(&self) -> Position { self.position }
    pub fn is_attached(&self) -> bool { self.attach }

    /// The `(name, color)` rows, top to bottom.
    pub fn rows(&self) -> &[(String, String)] { &self.rows }
}

/// Any legend.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Legend {
    Gradient(GradientLegend),
    Discrete(DiscreteLegend),
}

impl From<GradientLegend> for Legend {
    fn from(l: GradientLegend) -> Self { Legend::Gradient(l) }
}

impl From<DiscreteLegend> for Legend {
    fn from(l: DiscreteLegend) -> Self { Legend::Discrete(l) }
}

/// Legends shown side by side in one horizontal panel at the
/// bottom left of the view.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendGroup {
    pub legends: Vec<Legend>,
    pub position: Position,
}

impl LegendGroup {
    pub fn new<I, L>(legends: I) -> Self
    where I: IntoIterator<Item = L>, L: Into<Legend> {
        LegendGroup { legends: legends.into_iter().map(Into::into).collect(),
                      position: Position::BottomLeft }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse() {
        for p in Position::ALL {
            assert_eq!(p.to_string().parse::<Position>().unwrap(), p);
        }
        assert_eq!(Position::default(), Position::BottomLeft);
        for s in ["middle-center", "Bottom-Left", "left", ""] {
            assert!(matches!(s.parse::<Position>(),
                             Err(Error::InvalidArgument { name: "position", .. })));
        }
    }

    #[test]
    fn gradient_bar_top_to_bottom() {
        let vis = VisParams::new(0., 1., &["000000", "ffffff"]);
        let l = GradientLegend::new(&vis).unwrap().steps(3).title("NDVI");
        assert_eq!(l.bar(), [(1., "ffffff".to_string()),
                             (0.5, "808080".to_string()),
                             (0., "000000".to_string())]);
        assert_eq!((l.max_label(), l.min_label()), ("1".into(), "0".into()));
        assert_eq!(l.get_title(), "NDVI");
        assert!(l.is_attached());
    }

    #[test]
    fn gradient_default_steps() {
        let vis = VisParams::new(-1., 1., &["d7191c", "ffffbf", "2c7bb6"]);
        let bar = GradientLegend::new(&vis).unwrap().bar();
        assert_eq!(bar.len(), DEFAULT_STEPS);
        assert_eq!(bar[0], (1., "2c7bb6".to_string()));
        assert_eq!(bar[DEFAULT_STEPS - 1], (-1., "d7191c".to_string()));
    }

    #[test]
    fn gradient_ignores_bands() {
        let mut vis = VisParams::new(0., 10., &["ff0000"]);
        vis.bands = vec!["B4".into(), "B3".into(), "B2".into()];
        let l = GradientLegend::new(&vis).unwrap().attach(false);
        assert!(!l.is_attached());
        assert!(l.bar().iter().all(|(_, c)| c == "ff0000"));
    }

    #[test]
    fn gradient_rejects_bad_input() {
        assert!(GradientLegend::new(&VisParams::new(0., 1., &[])).is_err());
        assert!(GradientLegend::new(&VisParams::new(0., f64::NAN, &["fff000"]))
                .is_err());
        assert!(GradientLegend::new(&VisParams::new(0., 1., &["red"]))
                .is_err());
    }

    #[test]
    fn discrete_rows() {
        let l = DiscreteLegend::new(&["a", "b"], &["1b9e77", "#D95F02"])
            .unwrap().position(Position::TopRight);
        assert_eq!(l.rows(), [("a".to_string(), "1b9e77".to_string()),
                              ("b".to_string(), "d95f02".to_string())]);
        assert_eq!(l.get_position(), Position::TopRight);
    }

    #[test]
    fn discrete_length_mismatch() {
        let e = DiscreteLegend::new(&["a", "b", "c"], &["1b9e77"]);
        assert!(matches!(e, Err(Error::InvalidArgument { name: "colors", .. })));
    }

    #[test]
    fn group_keeps_order() {
        let d = DiscreteLegend::new(&["x"], &["000000"]).unwrap();
        let g = GradientLegend::new(&VisParams::new(0., 1., &["000000"]))
            .unwrap();
        let group = LegendGroup::new([Legend::from(d), Legend::from(g)]);
        assert!(matches!(group.legends[..],
                         [Legend::Discrete(_), Legend::Gradient(_)]));
        assert_eq!(group.position, Position::BottomLeft);
    }
}
