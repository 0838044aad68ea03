//! Write `preview.html` showing every palette with the number of
//! colors given on the command line (default 3), then its
//! interpolated versions.
//!
//!     cargo run --example preview -- 7

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use map_brewery::{Catalog, ColorRange, Grid, Interpolation, Preview,
                  RGBColor, Ramp};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: #{}\"></td>", c.to_hex())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: #{}\"></td>", c.to_gray().to_hex())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn interpolated(fh: &mut impl Write, ramp: Ramp, mode: Interpolation,
                comment: &str) -> Result<(), Err> {
    let g = ramp.gradient::<RGB8>(mode)?;
    let colors: Vec<_> = g.range(0., 1., 128).map(|(_, c)| c).collect();
    table_of_colors(fh, &colors, 1, comment)
}

fn main() -> Result<(), Err> {
    let len = match env::args().nth(1) {
        Some(n) => Some(n.parse::<usize>()?),
        None => None,
    };
    let preview = Preview::new(Catalog::global(), len)?;
    let mut fh = BufWriter::new(File::create("preview.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>map_brewery: palettes</title>\n\
                  </head>\n\
                  <body>")?;

    writeln!(fh, "<h3>Palettes</h3>")?;
    for s in preview.strips() {
        let c = format!("{} ({} of max {} colors)",
                        s.name(), s.ramp().len(), s.max_len());
        table_of_colors(&mut fh, &s.ramp().colors::<RGB8>()?, 40, &c)?;
        interpolated(&mut fh, s.ramp(), Interpolation::Linear,
                     "linear")?;
        interpolated(&mut fh, s.ramp(), Interpolation::Lch, "LCh")?;
    }

    writeln!(fh, "<h3>Four linked maps, by column</h3>")?;
    let plan = Grid::new(4).by_row(false).plan();
    writeln!(fh, "<table border=\"1\">")?;
    for row in 0 .. plan.nrow() {
        write!(fh, "<tr>")?;
        for col in 0 .. plan.ncol() {
            let slot = plan.slots().iter()
                .find(|&&s| plan.cell(s) == Some((row, col)));
            match slot {
                Some(s) => write!(fh, "<td>map {}</td>", s.index())?,
                None => write!(fh, "<td></td>")?,
            }
        }
        writeln!(fh, "</tr>")?;
    }
    writeln!(fh, "</table>")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
