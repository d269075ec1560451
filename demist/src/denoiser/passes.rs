use log::debug;

use crate::{DenoiserBuffers, DenoiserConfig, Engine, GBuffer};

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct DenoiserPasses {
            $( pub $name: $class, )*
        }

        impl DenoiserPasses {
            pub fn new(
                engine: &Engine,
                device: &wgpu::Device,
                config: &DenoiserConfig,
                gbuffer: &GBuffer,
                buffers: &DenoiserBuffers,
            ) -> Self {
                debug!("Initializing denoiser passes");

                Self {
                    $(
                        $name: $class::new(
                            engine, device, config, gbuffer, buffers,
                        ),
                    )*
                }
            }
        }
    };
}

passes!([
    temporal_accumulation => TemporalAccumulationPass,
    tile_copy => TileCopyPass,
    tile_reset => TileResetPass,
    upsample => UpsamplePass,
    wavelet => WaveletPass,
]);
