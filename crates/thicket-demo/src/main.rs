//! Headless demo: scatter a vegetation field, orbit a camera over it and run
//! the instanced LOD selection, logging what would be drawn.

mod field;
mod variants;

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use thicket_config::{CliArgs, Config};
use thicket_lod::InstancedLod;
use thicket_math::Camera;
use tracing::{info, warn};

use crate::field::generate_field;
use crate::variants::build_variants;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thicket")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    thicket_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        tracing::error!("demo aborted: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), thicket_lod::LodError> {
    let variants = build_variants();
    info!(
        "Built {} mesh variants: {:?}",
        variants.len(),
        variants.iter().map(|v| v.material.name).collect::<Vec<_>>()
    );

    let points = generate_field(&config.field);
    info!(
        "Generated field of {} points (seed {}, extent {})",
        config.field.point_count, config.field.seed, config.field.extent
    );

    let mut lod = InstancedLod::new(variants, points, config.lod.to_settings())?;
    if !lod.has_index() {
        warn!("Field could not be indexed; nothing will be drawn");
    }

    let demo = &config.demo;
    let interval = demo.update_interval.max(1);
    let mut camera = Camera::default();
    let mut updates = 0u32;
    let mut total_active = 0usize;

    for frame in 0..demo.frames {
        let angle = frame as f32 * demo.orbit_speed;
        let eye = Vec3::new(
            angle.cos() * demo.orbit_radius,
            demo.camera_height,
            angle.sin() * demo.orbit_radius,
        );
        camera.position = eye;
        // Look tangentially along the orbit, slightly down at the field.
        let ahead = Vec3::new(-angle.sin(), -0.15, angle.cos());
        camera.look_at(eye + ahead, Vec3::Y);

        if frame % interval != 0 {
            continue;
        }

        let active = lod.update_from_camera(&camera);
        let stats = lod.last_stats();
        updates += 1;
        total_active += active;

        info!(
            frame,
            active,
            candidates = stats.candidates,
            visited_nodes = stats.visited_nodes,
            culled_nodes = stats.culled_nodes,
            budget_exhausted = stats.budget_exhausted,
            "LOD update"
        );

        for batch in lod.batches_mut() {
            // A renderer would upload `batch.as_bytes()` here.
            tracing::trace!(
                variant = batch.variant().material.name,
                bytes = batch.as_bytes().len(),
                "instance upload"
            );
            batch.mark_uploaded();
        }
    }

    let average = if updates > 0 {
        total_active as f32 / updates as f32
    } else {
        0.0
    };
    info!(
        "Ran {} frames, {} LOD updates, {:.1} instances per update on average (budget {})",
        demo.frames,
        updates,
        average,
        lod.settings().max_count
    );
    Ok(())
}
