//! Headless driver: generates a world, meshes it on the worker pool, digs a
//! few voxels and re-meshes whatever the edits dirtied.
#![forbid(unsafe_code)]

mod config;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use delve_chunk::{ChunkData, VoxelData, generate_world};
use delve_mesh_cpu::{MeshContext, RebuildOutcome};
use delve_runtime::{RebuildDone, RebuildRuntime};
use delve_voxels::VoxelLibrary;
use delve_world::{World, load_world_config};

use crate::config::{AppConfig, load_app_config};

#[derive(Parser, Debug)]
#[command(name = "delve", about = "Generate, mesh and dig a voxel world without a window")]
struct Args {
    /// Driver settings (`[world]`, `[mesh]`, `[runtime]`).
    #[arg(long, default_value = "assets/delve.toml")]
    config: PathBuf,
    /// Voxel types and atlas layout.
    #[arg(long, default_value = "assets/voxels/voxels.toml")]
    voxels: PathBuf,
    /// World-only TOML (top-level `[world]` fields) replacing the section in `--config`.
    #[arg(long)]
    world_config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<i32>,
    /// Chunks along X and Z.
    #[arg(long)]
    chunks: Option<usize>,
    #[arg(long)]
    chunks_y: Option<usize>,
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long)]
    max_viewing_level: Option<i32>,
    /// Columns to dig after the first full rebuild.
    #[arg(long, default_value_t = 4)]
    digs: usize,
    /// Seconds to wait for each rebuild pass.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[derive(Debug, Default)]
struct PassSummary {
    built: usize,
    busy: usize,
    missing: usize,
    vertices: usize,
    indices: usize,
    slowest_ms: u32,
}

impl PassSummary {
    fn from_results(results: &[RebuildDone]) -> Self {
        let mut s = PassSummary::default();
        for done in results {
            match done.outcome {
                RebuildOutcome::Built { vertices, indices } => {
                    s.built += 1;
                    s.vertices += vertices;
                    s.indices += indices;
                }
                RebuildOutcome::Busy => s.busy += 1,
                RebuildOutcome::NoChunk => s.missing += 1,
            }
            s.slowest_ms = s.slowest_ms.max(done.t_mesh_ms);
        }
        s
    }
}

fn resolve_config(args: &Args) -> Result<AppConfig, Box<dyn Error>> {
    let mut cfg = if args.config.exists() {
        load_app_config(&args.config)?
    } else {
        log::warn!("{} not found, using defaults", args.config.display());
        AppConfig::default()
    };
    if let Some(path) = &args.world_config {
        cfg.world = load_world_config(path)?;
    }
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(n) = args.chunks {
        cfg.world.chunks[0] = n;
        cfg.world.chunks[2] = n;
    }
    if let Some(n) = args.chunks_y {
        cfg.world.chunks[1] = n;
    }
    if let Some(w) = args.workers {
        cfg.runtime.workers = w;
    }
    if let Some(level) = args.max_viewing_level {
        cfg.world.max_viewing_level = Some(level);
    }
    Ok(cfg)
}

/// Schedules every dirty chunk, waits, and hands fresh meshes to the "renderer".
fn rebuild_pass(rt: &RebuildRuntime, data: &ChunkData, timeout: Duration) -> PassSummary {
    let scheduled = rt.schedule_dirty();
    if !rt.wait_idle(timeout) {
        let (queued, running) = rt.queue_counts();
        log::warn!("rebuild pass timed out: {queued} queued, {running} running");
    }
    let results = rt.drain_results();
    let mut uploaded = 0usize;
    for done in &results {
        if let Some(chunk) = data.chunk(done.coord) {
            if chunk.primitive.take_new().is_some() {
                uploaded += 1;
            }
        }
    }
    log::debug!("{scheduled} scheduled, {uploaded} meshes taken");
    PassSummary::from_results(&results)
}

/// Removes the topmost solid voxel of the column, if any.
fn dig_column(data: &ChunkData, world: &World, wx: i32, wz: i32) -> Option<i32> {
    let top = world.world_size_y() as i32 - 1;
    let wy = (0..=top).rev().find(|&y| {
        data.get_non_null_voxel_at_world_location(wx, y, wz)
            .is_some_and(|v| !v.is_empty())
    })?;
    data.set_voxel_world(wx, wy, wz, VoxelData::EMPTY.explored())
        .then_some(wy)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let cfg = resolve_config(args)?;
    let library = Arc::new(VoxelLibrary::load_from_path(Path::new(&args.voxels))?);
    log::info!("loaded {} voxel types", library.len());

    let world = World::from_config(&cfg.world);
    let data = Arc::new(ChunkData::for_world(&world, Arc::clone(&library)));
    let t0 = Instant::now();
    generate_world(&world, &data);
    if let Some(level) = cfg.world.max_viewing_level {
        data.set_max_viewing_level(level);
    }
    log::info!("worldgen took {} ms", t0.elapsed().as_millis());

    let ctx = Arc::new(MeshContext::new(Arc::clone(&library), cfg.mesh.clone()));
    let rt = RebuildRuntime::new(Arc::clone(&data), ctx, &cfg.runtime)?;
    let timeout = Duration::from_secs(args.timeout);

    let t0 = Instant::now();
    let first = rebuild_pass(&rt, &data, timeout);
    println!(
        "initial: {} chunks, {} vertices, {} triangles in {} ms (slowest chunk {} ms)",
        first.built,
        first.vertices,
        first.indices / 3,
        t0.elapsed().as_millis(),
        first.slowest_ms
    );

    let (wx0, wz0) = (
        world.world_size_x() as i32 / 2,
        world.world_size_z() as i32 / 2,
    );
    for i in 0..args.digs as i32 {
        let (wx, wz) = (wx0 + i, wz0);
        let Some(wy) = dig_column(&data, &world, wx, wz) else {
            log::warn!("nothing to dig at ({wx}, {wz})");
            continue;
        };
        let pass = rebuild_pass(&rt, &data, timeout);
        println!(
            "dig ({wx}, {wy}, {wz}): rebuilt {} chunks ({} busy, {} missing)",
            pass.built, pass.busy, pass.missing
        );
    }
    // Anything skipped as busy was re-marked dirty.
    if data.dirty_len() > 0 {
        let last = rebuild_pass(&rt, &data, timeout);
        println!("catch-up: rebuilt {} chunks", last.built);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
