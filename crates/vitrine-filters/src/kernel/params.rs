use bytemuck::{Pod, Zeroable};

use super::DispatchPlan;

pub const MAX_VECTORS: usize = 4;

/// Uniform block at `@binding(2)`. Matches the WGSL layout:
/// four `vec2` fields, then `array<vec4<f32>, 4>` at offset 32.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct KernelParams {
    pub dest_origin: [i32; 2],
    pub source_origin: [i32; 2],
    pub extent: [u32; 2],
    pub source_size: [u32; 2],
    pub vectors: [[f32; 4]; MAX_VECTORS],
}

impl KernelParams {
    /// Vectors beyond `vectors.len()` are zero; `w` is always 1.
    pub fn new(plan: &DispatchPlan, vectors: &[[f32; 3]]) -> Self {
        let mut packed = [[0.0; 4]; MAX_VECTORS];
        for (slot, v) in packed.iter_mut().zip(vectors) {
            *slot = [v[0], v[1], v[2], 1.0];
        }

        Self {
            dest_origin: [plan.dest.x, plan.dest.y],
            source_origin: [plan.source.x, plan.source.y],
            extent: [plan.dest.width, plan.dest.height],
            source_size: [plan.source.width, plan.source.height],
            vectors: packed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_engine::coords::PixelRect;

    #[test]
    fn layout_matches_the_uniform_block() {
        assert_eq!(std::mem::size_of::<KernelParams>(), 96);
        assert_eq!(std::mem::offset_of!(KernelParams, vectors), 32);
    }

    #[test]
    fn vectors_are_padded_with_unit_w() {
        let plan = DispatchPlan {
            dest: PixelRect::from_size(4, 2),
            source: PixelRect::new(1, 0, 3, 2),
            workgroups: [1, 1],
        };
        let p = KernelParams::new(&plan, &[[1.1, 0.1, 0.1]]);
        assert_eq!(p.vectors[0], [1.1, 0.1, 0.1, 1.0]);
        assert_eq!(p.vectors[1], [0.0; 4]);
        assert_eq!(p.source_origin, [1, 0]);
        assert_eq!(p.extent, [4, 2]);
    }
}
