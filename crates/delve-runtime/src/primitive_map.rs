use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use delve_mesh_cpu::VoxelListPrimitive;
use delve_world::ChunkCoord;
use hashbrown::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrimitiveMapStats {
    pub reused: u64,
    pub created: u64,
    pub dropped: u64,
    pub entries: usize,
}

/// One long-lived mesher per chunk, so scratch buffers and the rebuild guard
/// persist across rebuilds of the same coordinate.
#[derive(Default)]
pub struct PrimitiveMap {
    entries: RwLock<HashMap<ChunkCoord, Arc<VoxelListPrimitive>>>,
    reused: AtomicU64,
    created: AtomicU64,
    dropped: AtomicU64,
}

impl PrimitiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, coord: ChunkCoord) -> Arc<VoxelListPrimitive> {
        if let Some(p) = self.get(coord) {
            self.reused.fetch_add(1, Ordering::Relaxed);
            return p;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another worker may have raced us between the read and the write.
        if let Some(p) = entries.get(&coord) {
            self.reused.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(p);
        }
        let p = Arc::new(VoxelListPrimitive::new());
        entries.insert(coord, Arc::clone(&p));
        self.created.fetch_add(1, Ordering::Relaxed);
        p
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<Arc<VoxelListPrimitive>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&coord)
            .cloned()
    }

    pub fn remove(&self, coord: ChunkCoord) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&coord)
            .is_some();
        if removed {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> PrimitiveMapStats {
        PrimitiveMapStats {
            reused: self.reused.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
