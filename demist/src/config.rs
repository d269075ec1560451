use anyhow::{ensure, Result};
use glam::UVec2;

/// Resolution the ray tracer (and hence the denoiser) runs at, relative to
/// the display resolution; anything below `Full` engages the guided
/// upsampler as the pipeline's last stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolutionScale {
    #[default]
    Full,
    Half,
    Quarter,
}

impl ResolutionScale {
    pub fn divisor(self) -> u32 {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Quarter => 4,
        }
    }

    pub fn scale_size(self, size: UVec2) -> UVec2 {
        let divisor = self.divisor();

        ((size + divisor - 1) / divisor).max(UVec2::ONE)
    }
}

/// Which stage's result [`crate::Denoiser::output()`] exposes; anything but
/// the last stage is a debugging aid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    RayTrace,
    TemporalAccumulation,
    Wavelet,
    #[default]
    Upsample,
}

/// Per-instance tunables; read-only during a frame.
///
/// The reprojection-rejection tolerances and the per-tile variance threshold
/// have no principled derivation - they are exposed here instead of being
/// hard-coded so callers can tune them per scene.
#[derive(Clone, Debug)]
pub struct DenoiserConfig {
    /// Temporal blending factor of the color history; lower values keep more
    /// history.
    pub alpha: f32,

    /// Temporal blending factor of the moments history.
    pub moments_alpha: f32,

    /// Per-axis reach of the à-trous kernel, in taps.
    pub filter_radius: i32,

    /// Number of à-trous iterations; the sample spacing doubles with each.
    pub filter_iterations: u32,

    /// Iteration whose intermediate result feeds next frame's history when
    /// [`Self::blur_as_input`] is set; feeding an early iteration back
    /// trades a bit of residual noise for less temporal lag than the fully
    /// filtered result would cause.
    pub feedback_iteration: u32,

    /// Use the (mildly) filtered result instead of the raw accumulation as
    /// next frame's color history.
    pub blur_as_input: bool,

    /// Color edge-stopping threshold of the à-trous filter.
    pub phi_color: f32,

    /// Normal edge-stopping exponent of the à-trous filter.
    pub phi_normal: f32,

    /// Depth edge-stopping scale of the à-trous filter.
    pub sigma_depth: f32,

    /// Relative depth difference above which a reprojected history tap is
    /// rejected.
    pub depth_tolerance: f32,

    /// Minimum normal cosine below which a reprojected history tap is
    /// rejected.
    pub normal_tolerance: f32,

    /// Accumulated variance above which a tile is still scheduled for
    /// spatial filtering.
    pub variance_threshold: f32,

    pub scale: ResolutionScale,
}

impl DenoiserConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.alpha > 0.0 && self.alpha <= 1.0, "invalid alpha");

        ensure!(
            self.moments_alpha > 0.0 && self.moments_alpha <= 1.0,
            "invalid moments_alpha"
        );

        ensure!(self.filter_radius >= 1, "invalid filter_radius");

        ensure!(
            self.filter_iterations >= 1 && self.filter_iterations <= 8,
            "invalid filter_iterations"
        );

        // Otherwise the history surface would never get written and the
        // temporal pass would keep blending towards its cleared contents
        ensure!(
            !self.blur_as_input
                || self.feedback_iteration < self.filter_iterations,
            "feedback_iteration must be below filter_iterations \
             when blur_as_input is set"
        );

        Ok(())
    }
}

impl Default for DenoiserConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            moments_alpha: 0.2,
            filter_radius: 1,
            filter_iterations: 4,
            feedback_iteration: 1,
            blur_as_input: true,
            phi_color: 10.0,
            phi_normal: 32.0,
            sigma_depth: 1.0,
            depth_tolerance: 0.1,
            normal_tolerance: 0.9,
            variance_threshold: 0.005,
            scale: ResolutionScale::Full,
        }
    }
}

/// Surface [`crate::Denoiser::output()`] resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputSurface {
    Samples,
    Accumulation,
    Wavelet(usize),
    Upsample,
}

/// With denoising disabled the noisy input goes out untouched regardless of
/// the requested mode, and at full scale the upsampler never runs, so asking
/// for its output degrades to the final à-trous buffer.
pub(crate) fn resolve_output(
    enabled: bool,
    mode: OutputMode,
    scale: ResolutionScale,
    filter_iterations: u32,
) -> OutputSurface {
    if !enabled {
        return OutputSurface::Samples;
    }

    let wavelet = OutputSurface::Wavelet((filter_iterations % 2) as usize);

    match mode {
        OutputMode::RayTrace => OutputSurface::Samples,
        OutputMode::TemporalAccumulation => OutputSurface::Accumulation,
        OutputMode::Wavelet => wavelet,
        OutputMode::Upsample => {
            if scale == ResolutionScale::Full {
                wavelet
            } else {
                OutputSurface::Upsample
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn scale_size() {
        assert_eq!(
            uvec2(640, 480),
            ResolutionScale::Full.scale_size(uvec2(640, 480)),
        );

        assert_eq!(
            uvec2(320, 240),
            ResolutionScale::Half.scale_size(uvec2(640, 480)),
        );

        assert_eq!(
            uvec2(161, 120),
            ResolutionScale::Quarter.scale_size(uvec2(641, 480)),
        );
    }

    #[test]
    fn default_config_is_valid() {
        DenoiserConfig::default().validate().unwrap();
    }

    #[test]
    fn disabled_denoiser_outputs_the_raw_samples() {
        for mode in [
            OutputMode::RayTrace,
            OutputMode::TemporalAccumulation,
            OutputMode::Wavelet,
            OutputMode::Upsample,
        ] {
            assert_eq!(
                OutputSurface::Samples,
                resolve_output(false, mode, ResolutionScale::Half, 4),
            );
        }
    }

    #[test]
    fn full_scale_bypasses_the_upsampler() {
        assert_eq!(
            OutputSurface::Wavelet(1),
            resolve_output(
                true,
                OutputMode::Upsample,
                ResolutionScale::Full,
                3,
            ),
        );

        assert_eq!(
            OutputSurface::Upsample,
            resolve_output(
                true,
                OutputMode::Upsample,
                ResolutionScale::Half,
                3,
            ),
        );
    }

    #[test]
    fn wavelet_output_follows_the_ping_pong_parity() {
        for (iterations, idx) in [(1, 1), (2, 0), (3, 1), (4, 0)] {
            assert_eq!(
                OutputSurface::Wavelet(idx),
                resolve_output(
                    true,
                    OutputMode::Wavelet,
                    ResolutionScale::Full,
                    iterations,
                ),
            );
        }
    }
}
