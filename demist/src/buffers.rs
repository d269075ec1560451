mod bind_group;
mod bindable;
mod double_buffered;
mod mapped_uniform_buffer;
mod texture;
mod unmapped_storage_buffer;

pub use self::bind_group::*;
pub use self::bindable::*;
pub use self::double_buffered::*;
pub use self::mapped_uniform_buffer::*;
pub use self::texture::*;
pub use self::unmapped_storage_buffer::*;

fn pad_size(size: usize) -> usize {
    (size + 31) & !31
}
