use demist_gpu::prelude::*;
use spirv_std::arch::{
    atomic_i_add, atomic_or, workgroup_memory_barrier_with_group_sync,
};
use spirv_std::memory::{Scope, Semantics};

const DEVICE: u32 = Scope::Device as u32;
const WORKGROUP: u32 = Scope::Workgroup as u32;
const RELAXED: u32 = Semantics::NONE.bits();

/// Blends the current noisy sample with reprojected history, derives the
/// per-pixel variance estimate and classifies each 8x8 tile as either
/// still-noisy (filter list) or converged (copy list).
#[spirv(compute(threads(8, 8)))]
#[allow(clippy::too_many_arguments)]
pub fn main(
    #[spirv(global_invocation_id)] global_id: UVec3,
    #[spirv(workgroup_id)] workgroup_id: UVec3,
    #[spirv(local_invocation_index)] local_idx: u32,
    #[spirv(workgroup)] tile_vote: &mut u32,
    #[spirv(push_constant)] params: &TemporalAccumulationPassParams,
    #[spirv(descriptor_set = 0, binding = 0, uniform)] camera: &Camera,
    #[spirv(descriptor_set = 0, binding = 1)] surface_map: TexRgba32,
    #[spirv(descriptor_set = 0, binding = 2)] prev_surface_map: TexRgba32,
    #[spirv(descriptor_set = 0, binding = 3)] velocity_map: TexRgba32,
    #[spirv(descriptor_set = 1, binding = 0)] samples: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 1)] prev_colors: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 2)] prev_moments: TexRgba32,
    #[spirv(descriptor_set = 1, binding = 3)] colors: TexRgba16,
    #[spirv(descriptor_set = 1, binding = 4)] moments: TexRgba32,
    #[spirv(descriptor_set = 2, binding = 0, storage_buffer)]
    filter_tiles: &mut [UVec2],
    #[spirv(descriptor_set = 2, binding = 1, storage_buffer)]
    filter_args: &mut [u32],
    #[spirv(descriptor_set = 2, binding = 2, storage_buffer)]
    copy_tiles: &mut [UVec2],
    #[spirv(descriptor_set = 2, binding = 3, storage_buffer)]
    copy_args: &mut [u32],
) {
    let screen_pos = global_id.xy();
    let surface_map = SurfaceMap::new(surface_map);
    let prev_surface_map = SurfaceMap::new(prev_surface_map);

    if local_idx == 0 {
        *tile_vote = 0;
    }

    unsafe {
        workgroup_memory_barrier_with_group_sync();
    }

    if camera.contains(screen_pos.as_ivec2()) {
        let surface = surface_map.get(screen_pos);
        let sample = samples.read(screen_pos);

        if surface.is_sky() {
            unsafe {
                colors.write(screen_pos, sample.xyz().extend(0.0));
                moments.write(
                    screen_pos,
                    Moments::reset(sample.xyz().luma()).serialize(),
                );
            }
        } else {
            let sample_luma = sample.xyz().luma();

            let reprojection = reproject(
                camera,
                &prev_surface_map,
                velocity_map,
                screen_pos,
                surface,
                params,
            );

            let color;
            let moment;
            let rejected;

            if reprojection.is_some() {
                let prev_color =
                    BilinearFilter::reproject(reprojection, move |pos| {
                        (prev_colors.read(pos), 1.0)
                    });

                let prev_moment =
                    BilinearFilter::reproject(reprojection, move |pos| {
                        (prev_moments.read(pos), 1.0)
                    });

                let next_moments = Moments::deserialize(prev_moment)
                    .accumulate(sample_luma, params.moments_alpha);

                let alpha = params.alpha.max(1.0 / next_moments.history_len);

                color = lerp(prev_color.xyz(), sample.xyz(), alpha);
                moment = next_moments;
                rejected = false;
            } else {
                // Disocclusion - the history shows a different surface (or
                // nothing at all), so accumulation restarts from this sample
                color = sample.xyz();
                moment = Moments::reset(sample_luma);
                rejected = true;
            }

            let variance = moment.variance();

            unsafe {
                colors.write(screen_pos, color.extend(variance));
                moments.write(screen_pos, moment.serialize());
            }

            if tile_needs_filtering(
                variance,
                rejected,
                params.variance_threshold,
            ) {
                unsafe {
                    atomic_or::<_, WORKGROUP, RELAXED>(tile_vote, 1);
                }
            }
        }
    }

    unsafe {
        workgroup_memory_barrier_with_group_sync();
    }

    // One thread per tile publishes the verdict; a tile lands on exactly one
    // of the two lists
    if local_idx == 0 {
        let tile = workgroup_id.xy();

        unsafe {
            if *tile_vote != 0 {
                let idx = atomic_i_add::<_, DEVICE, RELAXED>(
                    &mut filter_args[0],
                    1,
                );

                filter_tiles[idx as usize] = tile;
            } else {
                let idx =
                    atomic_i_add::<_, DEVICE, RELAXED>(&mut copy_args[0], 1);

                copy_tiles[idx as usize] = tile;
            }
        }
    }
}

/// Finds this pixel on the previous frame's screen and validates each of the
/// four bilinear history taps against the previous surface map; a tap that
/// shows a different surface is masked out, and a pixel with no surviving
/// taps counts as disoccluded.
fn reproject(
    camera: &Camera,
    prev_surface_map: &SurfaceMap,
    velocity_map: TexRgba32,
    screen_pos: UVec2,
    surface: Surface,
    params: &TemporalAccumulationPassParams,
) -> Reprojection {
    let velocity = velocity_map.read(screen_pos).xy();
    let prev_pos = screen_pos.as_vec2() - velocity;

    if !camera.contains(prev_pos.round().as_ivec2()) {
        return Reprojection::invalid();
    }

    let taps = BilinearFilter::taps(prev_pos.x, prev_pos.y);
    let mut tap_mask = 0;
    let mut tap_idx = 0;

    while tap_idx < 4 {
        let tap = taps[tap_idx];

        if camera.contains(tap) {
            let prev_surface = prev_surface_map.get(tap.as_uvec2());

            if surface.is_consistent_with(
                &prev_surface,
                params.depth_tolerance,
                params.normal_tolerance,
            ) {
                tap_mask |= 1 << tap_idx;
            }
        }

        tap_idx += 1;
    }

    Reprojection {
        prev_x: prev_pos.x,
        prev_y: prev_pos.y,
        tap_mask,
    }
}
