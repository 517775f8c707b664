// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line parsing.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "\
Render a generated floor plan layout.

Usage:
  plan-lite <layout.json> [options]

Options:
  --floor N            Render only floor N (default: every floor)
  --mode 2d|3d         SVG blueprint or OBJ model (default: 2d)
  --zoom Z             2D zoom factor (env PLAN_ZOOM)
  --scale S            2D pixels per foot (env PLAN_SCALE)
  --floor-height FT    3D storey height in feet (env PLAN_FLOOR_HEIGHT)
  --output PATH        Output file, or directory when every floor is
                       rendered to SVG (default: PLAN_OUTPUT_DIR)
  --debug              Add wall ownership markers to 3D output
  -h, --help           Show this message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plan2d,
    Model3d,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "2d" | "svg" => Ok(Mode::Plan2d),
            "3d" | "obj" => Ok(Mode::Model3d),
            other => bail!("unknown mode '{other}', expected 2d or 3d"),
        }
    }
}

/// Fully resolved invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub floor: Option<u32>,
    pub mode: Mode,
    pub zoom: f64,
    pub scale: f64,
    pub floor_height: f64,
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub debug: bool,
}

/// Parse arguments (without the program name) on top of `config`
///
/// Returns `Ok(None)` when help was requested.
pub fn parse(args: &[String], config: &Config) -> Result<Option<Args>> {
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(None);
    }

    let mut input = None;
    let mut parsed = Args {
        input: PathBuf::new(),
        floor: None,
        mode: Mode::Plan2d,
        zoom: config.zoom,
        scale: config.scale,
        floor_height: config.floor_height,
        output: None,
        output_dir: config.output_dir.clone(),
        debug: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{name} needs a value"))
        };

        match arg.as_str() {
            "--floor" => parsed.floor = Some(number(&value("--floor")?, "--floor")?),
            "--mode" => parsed.mode = value("--mode")?.parse()?,
            "--zoom" => parsed.zoom = positive(&value("--zoom")?, "--zoom")?,
            "--scale" => parsed.scale = positive(&value("--scale")?, "--scale")?,
            "--floor-height" => {
                parsed.floor_height = positive(&value("--floor-height")?, "--floor-height")?
            }
            "--output" => parsed.output = Some(PathBuf::from(value("--output")?)),
            "--debug" => parsed.debug = true,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    bail!("more than one input file given");
                }
            }
        }
    }

    parsed.input = input.context("missing input layout file")?;
    Ok(Some(parsed))
}

fn number<T: FromStr>(raw: &str, name: &str) -> Result<T> {
    raw.parse()
        .ok()
        .with_context(|| format!("invalid value for {name}: '{raw}'"))
}

fn positive(raw: &str, name: &str) -> Result<f64> {
    let value: f64 = number(raw, name)?;
    if !(value.is_finite() && value > 0.0) {
        bail!("{name} must be a positive number, got {raw}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_come_from_config() {
        let parsed = parse(&args(&["plan.json"]), &config()).unwrap().unwrap();
        assert_eq!(parsed.input, PathBuf::from("plan.json"));
        assert_eq!(parsed.mode, Mode::Plan2d);
        assert_eq!(parsed.floor, None);
        assert_eq!(parsed.scale, 20.0);
        assert_eq!(parsed.floor_height, 10.0);
        assert!(!parsed.debug);
    }

    #[test]
    fn test_flags_override_config() {
        let parsed = parse(
            &args(&[
                "--mode", "3d", "plan.json", "--floor", "2", "--zoom", "1.5", "--floor-height", "9",
                "--output", "out.obj", "--debug",
            ]),
            &config(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(parsed.mode, Mode::Model3d);
        assert_eq!(parsed.floor, Some(2));
        assert_eq!(parsed.zoom, 1.5);
        assert_eq!(parsed.floor_height, 9.0);
        assert_eq!(parsed.output, Some(PathBuf::from("out.obj")));
        assert!(parsed.debug);
    }

    #[test]
    fn test_help() {
        assert!(parse(&args(&[]), &config()).unwrap().is_none());
        assert!(parse(&args(&["plan.json", "-h"]), &config()).unwrap().is_none());
    }

    #[test]
    fn test_errors() {
        assert!(parse(&args(&["--floor", "2"]), &config()).is_err());
        assert!(parse(&args(&["plan.json", "--floor"]), &config()).is_err());
        assert!(parse(&args(&["plan.json", "--floor", "two"]), &config()).is_err());
        assert!(parse(&args(&["plan.json", "--zoom", "0"]), &config()).is_err());
        assert!(parse(&args(&["plan.json", "--mode", "4d"]), &config()).is_err());
        assert!(parse(&args(&["plan.json", "--verbose"]), &config()).is_err());
        assert!(parse(&args(&["a.json", "b.json"]), &config()).is_err());
    }
}
