use delve_geom::{ExtendedVertex, Lightmap, Rect, Vec2};

// Texel inside a quad's 2x2 cell for each of its four corners.
const CORNER_TEXEL: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 1), (1, 0)];

/// Packs one 2x2 texel cell per quad into a square-ish atlas inside `bounds`
/// and points each vertex's `lightmap_uv` at its texel center.
///
/// `vertices` must hold whole quads of four.
pub fn generate_lightmap(vertices: &mut [ExtendedVertex], bounds: Rect) -> Lightmap {
    let quads = vertices.len() / 4;
    if quads == 0 {
        return Lightmap {
            bounds,
            ..Lightmap::default()
        };
    }
    let cols = (quads as f64).sqrt().ceil() as usize;
    let rows = quads.div_ceil(cols);
    let width = cols * 2;
    let height = rows * 2;
    let mut texels = vec![[0u8; 4]; width * height];

    for (q, quad) in vertices.chunks_exact_mut(4).enumerate() {
        let cx = (q % cols) * 2;
        let cy = (q / cols) * 2;
        for (v, &(ox, oy)) in quad.iter_mut().zip(CORNER_TEXEL.iter()) {
            let tx = cx + ox;
            let ty = cy + oy;
            texels[ty * width + tx] = v.color;
            v.lightmap_uv = bounds.lerp(Vec2::new(
                (tx as f32 + 0.5) / width as f32,
                (ty as f32 + 0.5) / height as f32,
            ));
        }
    }

    Lightmap {
        width,
        height,
        texels,
        bounds,
    }
}
