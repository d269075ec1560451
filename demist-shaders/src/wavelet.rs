use demist_gpu::prelude::*;

/// One iteration of the edge-avoiding à-trous filter.
///
/// Dispatched indirectly - one workgroup per tile on the filter list; the
/// sample spacing (`params.step_size`) doubles every iteration while the
/// kernel footprint stays fixed.
#[spirv(compute(threads(8, 8)))]
#[allow(clippy::too_many_arguments)]
pub fn main(
    #[spirv(workgroup_id)] workgroup_id: UVec3,
    #[spirv(local_invocation_id)] local_id: UVec3,
    #[spirv(push_constant)] params: &WaveletFilterPassParams,
    #[spirv(descriptor_set = 0, binding = 0, uniform)] camera: &Camera,
    #[spirv(descriptor_set = 0, binding = 1)] surface_map: TexRgba32,
    #[spirv(descriptor_set = 1, binding = 0)] input: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 1)] output: TexRgba16,
    #[spirv(descriptor_set = 2, binding = 0, storage_buffer)]
    filter_tiles: &[UVec2],
) {
    let tile = filter_tiles[workgroup_id.x as usize];
    let screen_pos = tile * TILE_SIZE + local_id.xy();
    let surface_map = SurfaceMap::new(surface_map);

    if !camera.contains(screen_pos.as_ivec2()) {
        return;
    }

    // -------------------------------------------------------------------------

    let center = input.read(screen_pos);
    let center_color = center.xyz();
    let center_var = center.w;
    let center_surface = surface_map.get(screen_pos);

    if center_surface.is_sky() {
        unsafe {
            output.write(screen_pos, center);
        }

        return;
    }

    let depth_gradient =
        surface_map.depth_gradient(screen_pos, camera.screen_size());

    // The center tap always contributes; the normalization below can never
    // divide by zero
    let mut sum_color = center_color;
    let mut sum_var = center_var;
    let mut sum_weights = 1.0;

    let mut offset = ivec2(-params.radius, -params.radius);

    loop {
        if offset != ivec2(0, 0) {
            let sample_pos =
                screen_pos.as_ivec2() + offset * params.step_size;

            if camera.contains(sample_pos) {
                let sample_pos = sample_pos.as_uvec2();
                let sample_surface = surface_map.get(sample_pos);

                if !sample_surface.is_sky() {
                    let sample = input.read(sample_pos);

                    let weight = kernel_weight(offset)
                        * eval_sample_weight(
                            center_color,
                            center_surface,
                            sample.xyz(),
                            sample_surface,
                            depth_gradient,
                            (offset * params.step_size).as_vec2().length(),
                            params.phi_color,
                            params.phi_normal,
                            params.sigma_depth,
                        );

                    sum_color += weight * sample.xyz();
                    sum_var += variance_weight(weight) * sample.w;
                    sum_weights += weight;
                }
            }
        }

        // ---

        offset.x += 1;

        if offset.x > params.radius {
            offset.x = -params.radius;
            offset.y += 1;

            if offset.y > params.radius {
                break;
            }
        }
    }

    let out_color = sum_color / sum_weights;
    let out_var = sum_var / (sum_weights * sum_weights);

    unsafe {
        output.write(screen_pos, out_color.extend(out_var));
    }
}
