mod cli;
mod logger;

use std::{error::Error, f32::consts::TAU, process::ExitCode};

use clap::Parser;
use glam::Vec3;
use log::{error, info};

use cli::{Args, Command};
use logger::init_logger;
use raybounce::{
    camera::Camera,
    config::SceneConfig,
    frame::FrameDriver,
    renderer::{SegmentHandle, SegmentLog},
    vector::ProjectionDiagram,
};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    match args.command {
        Command::Run { frames, pointer, json } => {
            let pointer = pointer.map(|p| (p[0], p[1]));
            run_frames(&config, frames, pointer, json)
        },
        Command::Dot { a, b, json } => dot(Vec3::from_slice(&a), Vec3::from_slice(&b), json),
    }
}

/// Pointer position for frame `i`: a figure-eight across the viewport.
fn sweep_pointer(camera: &Camera, i: u32, frames: u32) -> (f32, f32) {
    let phase = i as f32 / frames.max(1) as f32 * TAU;
    let x = camera.viewport_w * (0.5 + 0.45 * phase.sin());
    let y = camera.viewport_h * (0.5 + 0.45 * (2.0 * phase).sin());
    return (x, y);
}

fn run_frames(config: &SceneConfig, frames: u32, pointer: Option<(f32, f32)>, json: bool) -> Result<(), Box<dyn Error>> {
    let camera = config.camera();
    let mut driver: FrameDriver<SegmentHandle> = config.build_driver()?;
    let mut renderer = SegmentLog::new();

    info!("running {} frames over {} surfaces", frames, driver.scene().len());

    let mut hits = 0;
    let mut skipped = 0;
    for i in 0..frames {
        let (x, y) = pointer.unwrap_or_else(|| sweep_pointer(&camera, i, frames));
        let report = driver.tick_pointer(&camera, x, y, &mut renderer);

        if report.hit.is_some() {
            hits += 1;
        }
        if report.skipped {
            skipped += 1;
        }

        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            match (report.hit, report.bounce) {
                (Some(hit), Some(bounce)) => info!(
                    "frame {:>4} pointer ({:.0}, {:.0}) hit {} -> bounce end {} [{:?}]",
                    report.frame,
                    x,
                    y,
                    fmt_vec(hit.pos),
                    fmt_vec(bounce.end),
                    report.indicator
                ),
                (Some(hit), None) => info!(
                    "frame {:>4} pointer ({:.0}, {:.0}) hit {}, bounce skipped [{:?}]",
                    report.frame,
                    x,
                    y,
                    fmt_vec(hit.pos),
                    report.indicator
                ),
                _ => info!("frame {:>4} pointer ({:.0}, {:.0}) no hit [{:?}]", report.frame, x, y, report.indicator),
            }
        }
    }

    driver.clear(&mut renderer);
    info!(
        "done: {} frames, {} hits, {} skipped, segments created {} released {}",
        frames, hits, skipped, renderer.created, renderer.released
    );
    return Ok(());
}

/// `Vec3`'s `Display` ignores precision flags, so round each component.
fn fmt_vec(v: Vec3) -> String {
    return format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z);
}

fn dot(a: Vec3, b: Vec3, json: bool) -> Result<(), Box<dyn Error>> {
    let diagram = ProjectionDiagram::new(a, b)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
        return Ok(());
    }

    println!("a                      = {}", fmt_vec(diagram.a));
    println!("b                      = {}", fmt_vec(diagram.b));
    println!("a . b                  = {}", diagram.dot);
    println!("|a|                    = {}", diagram.a_length);
    println!("a normalized           = {}", fmt_vec(diagram.a_normalized));
    println!("scalar projection b->a = {}", diagram.scalar_projection);
    println!("b projected on a       = {}", fmt_vec(diagram.projected));
    println!("projection -> b        = {}", fmt_vec(diagram.rejection()));
    println!("angle (degrees)        = {}", diagram.angle.to_degrees());
    return Ok(());
}
