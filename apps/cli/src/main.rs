// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! plan-lite - render generated floor plan layouts
//!
//! Reads a layout JSON file and writes either one SVG blueprint per floor or
//! a Y-up OBJ model with its MTL material library.
//!
//! Usage:
//!   plan-lite house.json
//!   plan-lite house.json --floor 2 --zoom 1.5 --output upstairs.svg
//!   plan-lite house.json --mode 3d --debug

mod args;
mod config;
mod obj;

use anyhow::{bail, Context, Result};
use args::{Args, Mode};
use config::Config;
use plan_lite_core::{segment_room, GeneratedLayout};
use plan_lite_geometry::{build_building, build_floor_scene, FloorScene, RenderMode, SceneOptions};
use plan_lite_svg::{render_floor_svg, PlanStyle};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,plan_lite_svg=debug,plan_lite_geometry=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = args::parse(&raw, &config)? else {
        println!("{}", args::USAGE);
        return Ok(());
    };

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read layout '{}'", args.input.display()))?;
    let layout = GeneratedLayout::from_json(&json)
        .with_context(|| format!("invalid layout '{}'", args.input.display()))?;

    let floors = match args.floor {
        Some(floor) if !layout.floors().contains(&floor) => {
            bail!("floor {floor} has no rooms (floors present: {:?})", layout.floors())
        }
        Some(floor) => vec![floor],
        None => layout.floors(),
    };
    if floors.is_empty() {
        bail!("layout '{}' contains no rooms", args.input.display());
    }

    log_summary(&layout, &floors);

    match args.mode {
        Mode::Plan2d => write_plans(&layout, &floors, &args),
        Mode::Model3d => write_model(&layout, &args),
    }
}

fn log_summary(layout: &GeneratedLayout, floors: &[u32]) {
    for &floor in floors {
        let rooms = layout.rooms_on_floor(floor);
        let shared_walls: usize = rooms
            .iter()
            .flat_map(|room| segment_room(room, &rooms))
            .map(|wall| wall.shared_segment_count())
            .sum();

        tracing::info!(
            floor,
            rooms = rooms.len(),
            // every shared run is seen from both sides
            shared_walls = shared_walls / 2,
            "floor loaded"
        );
    }
}

fn write_plans(layout: &GeneratedLayout, floors: &[u32], args: &Args) -> Result<()> {
    let style = PlanStyle {
        scale: args.scale,
        zoom: args.zoom,
        wall_thickness: layout.effective_wall_thickness(),
    };

    for &floor in floors {
        let svg = render_floor_svg(layout, floor, &style)?;
        let path = match (&args.output, args.floor) {
            (Some(path), Some(_)) => path.clone(),
            (Some(dir), None) => dir.join(format!("floor-{floor}.svg")),
            (None, _) => args.output_dir.join(format!("floor-{floor}.svg")),
        };

        create_parent(&path)?;
        fs::write(&path, svg).with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::info!(floor, path = %path.display(), "plan written");
    }
    Ok(())
}

fn write_model(layout: &GeneratedLayout, args: &Args) -> Result<()> {
    let options = SceneOptions {
        floor_height: args.floor_height,
        wall_thickness: layout.effective_wall_thickness(),
        render_mode: if args.debug {
            RenderMode::Debug
        } else {
            RenderMode::Normal
        },
    };

    let (scenes, default_name): (Vec<FloorScene>, String) = match args.floor {
        Some(floor) => (
            vec![build_floor_scene(layout, floor, &options)?],
            format!("floor-{floor}.obj"),
        ),
        None => {
            let building = build_building(layout, &options)?;
            tracing::info!(
                floors = building.floors.len(),
                total_height = building.total_height,
                "building stacked"
            );
            (building.floors, "building.obj".into())
        }
    };

    let obj_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.output_dir.join(default_name));
    let mtl_path = obj_path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    create_parent(&obj_path)?;
    write_file(&obj_path, |out| obj::write_obj(out, &scenes, mtl_name.as_deref()))?;
    write_file(&mtl_path, |out| obj::write_mtl(out, &scenes))?;

    let triangles: usize = scenes.iter().map(FloorScene::triangle_count).sum();
    tracing::info!(
        triangles,
        obj = %obj_path.display(),
        mtl = %mtl_path.display(),
        "model written"
    );
    Ok(())
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<fs::File>) -> std::io::Result<()>,
) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("cannot write '{}'", path.display()))
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => fs::create_dir_all(dir)
            .with_context(|| format!("cannot create directory '{}'", dir.display())),
        None => Ok(()),
    }
}
