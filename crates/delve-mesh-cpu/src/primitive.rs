use std::sync::{Arc, Mutex, PoisonError};

use delve_chunk::{ChunkData, VoxelChunk, VoxelGrid, is_face_visible};
use delve_geom::{ExtendedVertex, PrimitiveMesh, Vec3};
use delve_lighting::calculate_vertex_light;
use delve_voxels::{BoxFace, BoxTextureCoords, should_ramp};

use crate::buffer::GrowBuffer;
use crate::context::MeshContext;
use crate::guard::RebuildGuard;
use crate::lightmap::generate_lightmap;

const MAX_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// No chunk was supplied.
    NoChunk,
    /// Another rebuild of this primitive is in progress; nothing was done.
    Busy,
    Built { vertices: usize, indices: usize },
}

#[derive(Default)]
struct Scratch {
    vertices: GrowBuffer<ExtendedVertex>,
    indices: GrowBuffer<u16>,
}

/// Per-chunk mesher. Scratch buffers survive across rebuilds; every
/// successful rebuild publishes a fresh snapshot into the chunk's slot.
pub struct VoxelListPrimitive {
    guard: RebuildGuard,
    // Only locked while holding a guard ticket.
    scratch: Mutex<Scratch>,
}

impl Default for VoxelListPrimitive {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelListPrimitive {
    pub fn new() -> Self {
        Self {
            guard: RebuildGuard::new(),
            scratch: Mutex::new(Scratch::default()),
        }
    }

    #[inline]
    pub fn guard(&self) -> &RebuildGuard {
        &self.guard
    }

    /// Current `(vertex, index)` scratch capacities.
    pub fn capacities(&self) -> (usize, usize) {
        let s = self.scratch.lock().unwrap_or_else(PoisonError::into_inner);
        (s.vertices.capacity(), s.indices.capacity())
    }

    pub fn rebuild(
        &self,
        chunk: Option<&VoxelChunk>,
        world: &ChunkData,
        ctx: &MeshContext,
    ) -> RebuildOutcome {
        let Some(chunk) = chunk else {
            return RebuildOutcome::NoChunk;
        };
        let Some(_ticket) = self.guard.try_begin() else {
            log::trace!("rebuild of {:?} skipped: already running", chunk.coord);
            return RebuildOutcome::Busy;
        };
        let mut scratch = self.scratch.lock().unwrap_or_else(PoisonError::into_inner);
        let scratch = &mut *scratch;
        scratch.vertices.ensure_allocated(ctx.config.initial_vertices);
        scratch.indices.ensure_allocated(ctx.config.initial_indices);
        scratch.vertices.clear();
        scratch.indices.clear();

        let dropped = {
            let grid = chunk.read_grid();
            emit_chunk(&grid, chunk, world, ctx, scratch)
        };
        if dropped > 0 {
            log::warn!(
                "chunk {:?}: {} faces dropped past the 16-bit index range",
                chunk.coord,
                dropped
            );
        }

        let lightmap = generate_lightmap(scratch.vertices.as_mut_slice(), world.tilemap_bounds());
        let mesh = PrimitiveMesh {
            vertices: scratch.vertices.to_vec(),
            indices: scratch.indices.to_vec(),
            lightmap,
        };
        let (vertices, indices) = (mesh.max_vertex(), mesh.max_index());
        chunk.primitive.publish(Arc::new(mesh));
        log::debug!(
            "rebuilt chunk {:?}: {} vertices, {} indices",
            chunk.coord,
            vertices,
            indices
        );
        RebuildOutcome::Built { vertices, indices }
    }
}

/// Appends every visible face of `grid` into `out`; returns faces dropped for
/// overflowing the 16-bit index range.
fn emit_chunk(
    grid: &VoxelGrid,
    chunk: &VoxelChunk,
    world: &ChunkData,
    ctx: &MeshContext,
    out: &mut Scratch,
) -> usize {
    let library = &*ctx.library;
    let tables = &ctx.tables;
    let origin = chunk.origin;
    let max_view = world.max_viewing_level();
    let top = (i64::from(max_view) + 1 - i64::from(origin.1)).clamp(0, grid.sy as i64) as i32;
    let bedrock = library.bedrock();
    let mut dropped = 0usize;

    let mut handle = chunk.make_handle(grid, 0, 0, 0);
    for y in 0..top {
        for x in 0..grid.sx as i32 {
            for z in 0..grid.sz as i32 {
                handle.set_grid_position(x, y, z);
                let v = handle.voxel();
                if (v.is_explored() && v.is_empty()) || !v.is_visible() {
                    continue;
                }
                // Unexplored voxels borrow bedrock's box so hidden caves stay hidden.
                // Ramps and tint still follow the voxel's own type, matching culling.
                let draw_id = if v.is_explored() { v.type_id } else { bedrock };
                let (Some(primitive), Some(voxel_type)) =
                    (library.get_primitive(draw_id), library.get_type(v.type_id))
                else {
                    continue;
                };

                let mut uvs: &BoxTextureCoords = &primitive.uvs;
                if v.is_explored() && voxel_type.has_transition_textures() {
                    let value = chunk.compute_transition_value(grid, world, x, y, z);
                    if let Some(t) = voxel_type.transition_texture(value) {
                        uvs = t;
                    }
                }

                let base_pos = Vec3::from_grid(origin.0 + x, origin.1 + y, origin.2 + z);
                for face in BoxFace::ALL {
                    let (dx, dy, dz) = tables.face_delta(face);
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    let neighbor = grid.get_i(nx, ny, nz).or_else(|| {
                        world.get_non_null_voxel_at_world_location(
                            origin.0 + nx,
                            origin.1 + ny,
                            origin.2 + nz,
                        )
                    });
                    let draw = match neighbor {
                        None => true,
                        Some(n) => is_face_visible(library, v, n, face, origin.1 + ny, max_view),
                    };
                    if !draw {
                        continue;
                    }

                    let range = primitive.face(face);
                    if out.vertices.len() + range.vertex_count > MAX_VERTICES {
                        dropped += 1;
                        continue;
                    }
                    let base = out.vertices.len();
                    let mut ambient = [0u32; 4];
                    for i in 0..range.vertex_count {
                        let vi = range.vertex_start + i;
                        let gv = primitive.vertices[vi];
                        let light = calculate_vertex_light(&handle, gv.corner, origin, world, tables);
                        if let Some(a) = ambient.get_mut(i) {
                            *a = light.ambient as u32;
                        }
                        let mut pos = base_pos + gv.position;
                        let noise = ctx.noise.offset(pos);
                        if voxel_type.can_ramp && should_ramp(gv.corner, v.ramp) {
                            pos.y -= voxel_type.ramp_size;
                        }
                        pos += noise;
                        out.vertices.push(ExtendedVertex::new(
                            pos,
                            light.as_color(),
                            voxel_type.tint,
                            uvs.uv(vi),
                            uvs.face_bounds(face),
                        ));
                    }

                    let flipped = ambient[0] + ambient[2] > ambient[1] + ambient[3];
                    for &idx in primitive.face_indices(face, flipped) {
                        let local = idx as usize - range.vertex_start;
                        out.indices.push((base + local) as u16);
                    }
                }
            }
        }
    }
    dropped
}
