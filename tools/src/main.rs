// Regenerate `../src/palettes.rs` from `palettes.hjson`:
//
//     cd tools && cargo run
//
// `palettes.hjson` maps each palette name to its `type` (seq, div or
// qual) and to one ramp per number of colors.  Palettes are written
// in the order of the file (serde-hjson preserves it).

use std::{env,
          fs::File,
          io::{BufWriter, prelude::*},
          error::Error};
use serde_hjson::Value;

#[derive(Debug)]
struct Palette {
    name: String,
    typ: &'static str,
    ramps: Vec<Vec<String>>, // by increasing length
}

/// Check that `s` is a six digit hexadecimal triplet.
fn parse_color(name: &str, s: &str) -> String {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        panic!("map-brewery-tools: {name}: not a color “{s}”")
    }
    s.to_ascii_lowercase()
}

fn palette_type(name: &str, t: Option<&Value>) -> &'static str {
    match t {
        Some(Value::String(t)) if t == "seq" => "Seq",
        Some(Value::String(t)) if t == "div" => "Div",
        Some(Value::String(t)) if t == "qual" => "Qual",
        _ => panic!("map-brewery-tools: {name}: bad type {t:?}"),
    }
}

fn palettes_from_json(json: Value) -> Vec<Palette> {
    let Value::Object(m) = json else {
        panic!("map-brewery-tools: expected an object of palettes")
    };
    let mut palettes = vec![];
    for (name, p) in m.into_iter() {
        let Value::Object(p) = p else {
            panic!("map-brewery-tools: {name}: expected an object")
        };
        let typ = palette_type(&name, p.get("type"));
        let mut ramps: Vec<(usize, Vec<String>)> = p.iter()
            .filter(|(k, _)| k.as_str() != "type")
            .map(|(k, rgb)| {
                let len = str::parse::<usize>(k).unwrap_or_else(|_| {
                    panic!("map-brewery-tools: {name}: bad length “{k}”")
                });
                let rgb = match rgb {
                    Value::Array(a) => a,
                    _ => panic!("map-brewery-tools: {name}.{k}") };
                let rgb: Vec<_> = rgb.iter()
                    .map(|v| match v {
                        Value::String(c) => parse_color(&name, c),
                        _ => panic!("map-brewery-tools: {name}.{k}") })
                    .collect();
                assert_eq!(rgb.len(), len, "{name}.{k}");
                (len, rgb)
            })
            .collect();
        ramps.sort_by_key(|(len, _)| *len);
        for (i, (len, _)) in ramps.iter().enumerate() {
            assert_eq!(ramps[0].0 + i, *len, "{name}: lengths not contiguous");
        }
        assert!(!ramps.is_empty(), "{name}: no ramp");
        palettes.push(Palette { name, typ,
                                ramps: ramps.into_iter().map(|(_, r)| r)
                                    .collect() });
    }
    palettes
}

fn main() -> Result<(), Box<dyn Error>> {
    let fh = File::open("palettes.hjson")?;
    let json: Value = serde_hjson::from_reader(fh)?;
    let palettes = palettes_from_json(json);

    let mut fh = BufWriter::new(File::create("../src/palettes.rs")?);
    let prog = env::args().next().unwrap_or_else(|| "map-brewery-tools".into());
    writeln!(fh, "// Written by {prog} from tools/palettes.hjson\n\n\
                  pub(crate) mod ty;\n\
                  use ty::*;\n")?;
    writeln!(fh, "// Number of palettes: {}\n\
                  pub(crate) static ALL_PALETTES: &[PaletteData] = &[",
             palettes.len())?;
    for p in &palettes {
        writeln!(fh, "  PaletteData {{\n    \
                      name: \"{}\",\n    \
                      typ: PaletteType::{},\n    \
                      ramps: &[", p.name, p.typ)?;
        for r in &p.ramps {
            let colors: Vec<_> = r.iter().map(|c| format!("\"{c}\"")).collect();
            writeln!(fh, "      &[{}],", colors.join(", "))?;
        }
        writeln!(fh, "    ],\n  }},")?;
    }
    writeln!(fh, "];")?;
    Ok(())
}
