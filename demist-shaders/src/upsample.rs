use demist_gpu::prelude::*;

/// Reconstructs a full-resolution result from the low-resolution filtered
/// color, using the full-resolution surface map as an edge-stopping guide;
/// only runs when the denoiser operates below display resolution.
#[spirv(compute(threads(8, 8)))]
#[allow(clippy::too_many_arguments)]
pub fn main(
    #[spirv(global_invocation_id)] global_id: UVec3,
    #[spirv(push_constant)] params: &UpsamplePassParams,
    #[spirv(descriptor_set = 0, binding = 0)] surface_map: TexRgba32,
    #[spirv(descriptor_set = 0, binding = 1)] low_surface_map: TexRgba32,
    #[spirv(descriptor_set = 1, binding = 0)] input: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 1)] output: TexRgba16,
) {
    let full_pos = global_id.xy();
    let surface_map = SurfaceMap::new(surface_map);
    let low_surface_map = SurfaceMap::new(low_surface_map);

    if full_pos.x >= params.full_width || full_pos.y >= params.full_height {
        return;
    }

    // -------------------------------------------------------------------------

    let guide = surface_map.get(full_pos);

    let (base, frac) =
        upsample_footprint(full_pos.as_vec2(), params.divisor as f32);

    let low_max = ivec2(
        params.low_width as i32 - 1,
        params.low_height as i32 - 1,
    );

    let mut taps = [UpsampleTap::default(); 4];
    let mut tap_idx = 0;

    while tap_idx < 4 {
        let offset = ivec2((tap_idx as i32) & 1, (tap_idx as i32) >> 1);

        let tap_pos = (base.as_ivec2() + offset)
            .clamp(IVec2::ZERO, low_max)
            .as_uvec2();

        taps[tap_idx] = UpsampleTap {
            color: input.read(tap_pos),
            surface: low_surface_map.get(tap_pos),
        };

        tap_idx += 1;
    }

    let value = filter_taps(guide, &taps, bilinear_weights(frac));

    unsafe {
        output.write(full_pos, value);
    }
}
