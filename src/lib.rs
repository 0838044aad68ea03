//! Palettes and layouts for map visualizations.
//!
//! - [`Catalog`]: all [schemes by Cynthia Brewer](https://colorbrewer2.org/),
//!   looked up by name and number of colors.
//! - [`Grid`]: arrangement of linked map panels.
//! - [`GradientLegend`], [`DiscreteLegend`]: legend descriptions.
//! - [`Preview`]: all palettes side by side, with a color picker.
//! - [`Series`]: the image of a clicked date.
//!
//! Nothing here draws: the types describe what a UI layer should
//! build.
//!
//! ```
//! use map_brewery::Catalog;
//! let catalog = Catalog::global();
//! assert_eq!(catalog.lengths("Dark2").unwrap(), [3, 4, 5, 6, 7, 8]);
//! assert_eq!(catalog.get("Dark2", 3).unwrap()[0], "1b9e77");
//! ```

mod palettes;
pub use palettes::ty::PaletteType;

mod error;
pub use error::{Error, Result};

mod color;
pub use color::RGBColor;

mod gradient;
pub use gradient::{ColorRange, Gradient, Interpolation, Range};

mod catalog;
pub use catalog::{Catalog, Palette, PaletteFind, Ramp};

pub mod layout;
pub use layout::{Flow, Grid, LayoutPlan, Slot};

pub mod legend;
pub use legend::{DiscreteLegend, GradientLegend, Legend, LegendGroup,
                 Position, VisParams};

pub mod preview;
pub use preview::{Preview, Strip};

pub mod series;
pub use series::Series;


#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn plan_serializes() {
        let plan = Grid::new(3).plan();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["groups"], serde_json::json!([[0, 1], [2]]));
        assert_eq!(json["slots"], serde_json::json!([0, 1, 2]));
        let back: LayoutPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn plan_keeps_empty_groups() {
        let plan = Grid::new(3).nrow(3).ncol(3).plan();
        let mut json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["groups"], serde_json::json!([[0, 1, 2], [], []]));
        assert_eq!(serde_json::from_value::<LayoutPlan>(json.clone()).unwrap(),
                   plan);
        json["groups"] = serde_json::json!([[0, 1, 2]]);
        assert!(serde_json::from_value::<LayoutPlan>(json).is_err());
    }

    #[test]
    fn vis_params_deserialize() {
        let vis: VisParams = serde_json::from_str(
            r#"{"min": 0, "max": 0.8, "palette": ["ffffcc", "006837"]}"#)
            .unwrap();
        assert_eq!(vis, VisParams::new(0., 0.8, &["ffffcc", "006837"]));
        let pos: Position = serde_json::from_str("\"bottom-right\"").unwrap();
        assert_eq!(pos, Position::BottomRight);
        assert_eq!(serde_json::to_string(&PaletteType::Qual).unwrap(),
                   "\"qual\"");
    }

    #[test]
    fn gradient_legend_serializes() {
        let vis = VisParams::new(0., 1., &["#000000", "FFFFFF"]);
        let l = GradientLegend::new(&vis).unwrap().title("NDVI").steps(3)
            .position(Position::TopRight).attach(false);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["title"], "NDVI");
        assert_eq!(json["position"], "top-right");
        assert_eq!(json["attach"], false);
        assert_eq!(json["palette"], serde_json::json!(["000000", "ffffff"]));
        assert_eq!((&json["max_label"], &json["min_label"]),
                   (&serde_json::json!("1"), &serde_json::json!("0")));
        assert_eq!(json["bar"], serde_json::json!(
            [[1.0, "ffffff"], [0.5, "808080"], [0.0, "000000"]]));
        let back: GradientLegend = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), json);
    }

    #[test]
    fn gradient_legend_from_vis_fields() {
        let l: GradientLegend = serde_json::from_str(
            r#"{"min": -1, "max": 1, "palette": ["d7191c", "2c7bb6"]}"#)
            .unwrap();
        assert!(l.is_attached());
        assert_eq!(l.get_position(), Position::BottomLeft);
        assert_eq!(l.bar().len(), legend::DEFAULT_STEPS);
        assert!(serde_json::from_str::<GradientLegend>(
            r#"{"min": 0, "max": 1, "palette": []}"#).is_err());
    }

    #[test]
    fn legend_group_round_trip() {
        let d = DiscreteLegend::new(&["water"], &["0000ff"]).unwrap();
        let g = GradientLegend::new(&VisParams::new(0., 2., &["ffffcc"]))
            .unwrap().steps(2);
        let group = LegendGroup::new([Legend::from(d.clone()), Legend::from(g)]);
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["position"], "bottom-left");
        assert_eq!(json["legends"][0]["discrete"]["rows"],
                   serde_json::json!([["water", "0000ff"]]));
        assert_eq!(json["legends"][1]["gradient"]["bar"],
                   serde_json::json!([[2.0, "ffffcc"], [0.0, "ffffcc"]]));
        let back: LegendGroup = serde_json::from_value(json.clone()).unwrap();
        assert!(matches!(&back.legends[0], Legend::Discrete(l) if *l == d));
        assert_eq!(serde_json::to_value(&back).unwrap(), json);
    }
}
