use demist_gpu::prelude::*;

/// Propagates already-converged tiles unchanged into this iteration's write
/// buffer; together with the filter pass this keeps the whole output surface
/// defined without a full-resolution clear.
///
/// Dispatched indirectly - one workgroup per tile on the copy list.
#[spirv(compute(threads(8, 8)))]
pub fn main(
    #[spirv(workgroup_id)] workgroup_id: UVec3,
    #[spirv(local_invocation_id)] local_id: UVec3,
    #[spirv(descriptor_set = 0, binding = 0, uniform)] camera: &Camera,
    #[spirv(descriptor_set = 0, binding = 1)] input: TexRgba16,
    #[spirv(descriptor_set = 0, binding = 2)] output: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 0, storage_buffer)]
    copy_tiles: &[UVec2],
) {
    let tile = copy_tiles[workgroup_id.x as usize];
    let screen_pos = tile * TILE_SIZE + local_id.xy();

    if !camera.contains(screen_pos.as_ivec2()) {
        return;
    }

    unsafe {
        output.write(screen_pos, input.read(screen_pos));
    }
}
