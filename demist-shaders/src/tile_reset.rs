use demist_gpu::prelude::*;

/// Zeroes both tile counters and rearms the indirect-dispatch arguments
/// before the temporal pass appends this frame's tiles; skipping this reset
/// would let the apparent tile count grow across frames.
#[spirv(compute(threads(1)))]
pub fn main(
    #[spirv(descriptor_set = 0, binding = 0, storage_buffer)]
    filter_args: &mut [u32],
    #[spirv(descriptor_set = 0, binding = 1, storage_buffer)]
    copy_args: &mut [u32],
) {
    filter_args[0] = DispatchArgs::RESET.groups_x;
    filter_args[1] = DispatchArgs::RESET.groups_y;
    filter_args[2] = DispatchArgs::RESET.groups_z;

    copy_args[0] = DispatchArgs::RESET.groups_x;
    copy_args[1] = DispatchArgs::RESET.groups_y;
    copy_args[2] = DispatchArgs::RESET.groups_z;
}
