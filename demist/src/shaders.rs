macro_rules! shaders {
    ([ $( $name:ident, )* ]) => {
        pub struct Shaders {
            $( pub $name: (wgpu::ShaderModule, &'static str), )*
        }

        impl Shaders {
            pub fn new(device: &wgpu::Device) -> Self {
                $(
                    let $name = {
                        let module = device.create_shader_module(
                            wgpu::include_spirv!(env!(concat!(
                                "demist_shaders::",
                                stringify!($name),
                                ".path"
                            )))
                        );

                        let entry_point = env!(concat!(
                            "demist_shaders::",
                            stringify!($name),
                            ".entry_point"
                        ));

                        (module, entry_point)
                    };
                )*

                Self {
                    $( $name, )*
                }
            }
        }
    };
}

shaders!([
    temporal_accumulation,
    tile_copy,
    tile_reset,
    upsample,
    wavelet,
]);
