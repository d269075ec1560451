use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct TemporalAccumulationPassParams {
    pub alpha: f32,
    pub moments_alpha: f32,
    pub variance_threshold: f32,
    pub depth_tolerance: f32,
    pub normal_tolerance: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct WaveletFilterPassParams {
    pub step_size: i32,
    pub radius: i32,
    pub phi_color: f32,
    pub phi_normal: f32,
    pub sigma_depth: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct UpsamplePassParams {
    pub divisor: u32,
    pub low_width: u32,
    pub low_height: u32,
    pub full_width: u32,
    pub full_height: u32,
}
