//! Worker pool that rebuilds dirty chunk meshes off the simulation thread.
#![forbid(unsafe_code)]

mod primitive_map;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use delve_chunk::ChunkData;
use delve_mesh_cpu::{MeshContext, RebuildOutcome};
use delve_world::ChunkCoord;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use serde::Deserialize;

pub use primitive_map::{PrimitiveMap, PrimitiveMapStats};

/// `[runtime]` section.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Worker threads; `0` picks the available parallelism.
    #[serde(default)]
    pub workers: usize,
}

impl RuntimeConfig {
    pub fn resolved_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildDone {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub outcome: RebuildOutcome,
    pub t_mesh_ms: u32,
}

fn process_rebuild_job(
    job: RebuildJob,
    world: &ChunkData,
    ctx: &MeshContext,
    primitives: &PrimitiveMap,
    tx: &Sender<RebuildDone>,
) {
    let t0 = Instant::now();
    let chunk = world.chunk(job.coord);
    let outcome = match chunk.as_deref() {
        Some(c) => primitives.get_or_create(job.coord).rebuild(Some(c), world, ctx),
        None => {
            primitives.remove(job.coord);
            RebuildOutcome::NoChunk
        }
    };
    if outcome == RebuildOutcome::Busy {
        // The running rebuild may have read the grid before this change.
        world.mark_dirty(job.coord);
    }
    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    let _ = tx.send(RebuildDone {
        coord: job.coord,
        job_id: job.job_id,
        outcome,
        t_mesh_ms,
    });
}

pub struct RebuildRuntime {
    job_tx: Sender<RebuildJob>,
    res_rx: Receiver<RebuildDone>,
    _pool: Arc<ThreadPool>,
    world: Arc<ChunkData>,
    primitives: Arc<PrimitiveMap>,
    q_jobs: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    next_job_id: AtomicU64,
    pub workers: usize,
}

impl RebuildRuntime {
    pub fn new(
        world: Arc<ChunkData>,
        ctx: Arc<MeshContext>,
        cfg: &RuntimeConfig,
    ) -> Result<Self, ThreadPoolBuildError> {
        let (job_tx, job_rx) = unbounded::<RebuildJob>();
        let (res_tx, res_rx) = unbounded::<RebuildDone>();
        let workers = cfg.resolved_workers();
        let primitives = Arc::new(PrimitiveMap::new());
        let q_jobs = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("delve-mesh-{i}"))
                .build()?,
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let world = Arc::clone(&world);
            let ctx = Arc::clone(&ctx);
            let primitives = Arc::clone(&primitives);
            let q_jobs = Arc::clone(&q_jobs);
            let inflight = Arc::clone(&inflight);
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    inflight.fetch_add(1, Ordering::AcqRel);
                    q_jobs.fetch_sub(1, Ordering::AcqRel);
                    process_rebuild_job(job, &world, &ctx, &primitives, &tx);
                    inflight.fetch_sub(1, Ordering::AcqRel);
                }
            });
        }
        log::info!("rebuild runtime started with {} workers", workers);

        Ok(Self {
            job_tx,
            res_rx,
            _pool: pool,
            world,
            primitives,
            q_jobs,
            inflight,
            next_job_id: AtomicU64::new(1),
            workers,
        })
    }

    /// Queues a rebuild of `coord`. Returns the job id.
    pub fn submit(&self, coord: ChunkCoord) -> u64 {
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed);
        self.q_jobs.fetch_add(1, Ordering::AcqRel);
        if self.job_tx.send(RebuildJob { coord, job_id }).is_err() {
            self.q_jobs.fetch_sub(1, Ordering::AcqRel);
        }
        job_id
    }

    /// Drains the world's dirty set and queues each chunk. Returns how many.
    pub fn schedule_dirty(&self) -> usize {
        let dirty = self.world.take_dirty();
        for &coord in &dirty {
            self.submit(coord);
        }
        if !dirty.is_empty() {
            log::debug!("scheduled {} dirty chunks", dirty.len());
        }
        dirty.len()
    }

    pub fn drain_results(&self) -> Vec<RebuildDone> {
        self.res_rx.try_iter().collect()
    }

    /// Blocks until nothing is queued or running, or `timeout` passes.
    /// Returns whether the runtime went idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            let (queued, running) = self.queue_counts();
            if queued == 0 && running == 0 {
                return true;
            }
            if start.elapsed() >= timeout {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// `(queued, in flight)`
    pub fn queue_counts(&self) -> (usize, usize) {
        // Workers raise `inflight` before lowering the queue count.
        let queued = self.q_jobs.load(Ordering::Acquire);
        let running = self.inflight.load(Ordering::Acquire);
        (queued, running)
    }

    pub fn primitives(&self) -> Arc<PrimitiveMap> {
        Arc::clone(&self.primitives)
    }

    pub fn world(&self) -> &Arc<ChunkData> {
        &self.world
    }
}
