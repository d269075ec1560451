use bytemuck::{Pod, Zeroable};
use glam::UVec2;

/// Edge length of the square screen tiles the spatial filter is scheduled
/// over; equal to the compute workgroup size, so one workgroup handles
/// exactly one tile.
pub const TILE_SIZE: u32 = 8;

/// Arguments consumed by the GPU's indirect-dispatch mechanism.
///
/// Word 0 doubles as the tile counter the temporal pass bumps atomically, so
/// a frame's dispatch covers exactly the tiles appended that frame. The
/// buffer must be re-initialized to [`Self::RESET`] before any append;
/// leftovers from the previous frame would grow the apparent tile count
/// without bound.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct DispatchArgs {
    pub groups_x: u32,
    pub groups_y: u32,
    pub groups_z: u32,
}

impl DispatchArgs {
    pub const RESET: Self = Self::for_tile_count(0);

    /// A zero count is a legal indirect dispatch that performs no work.
    pub const fn for_tile_count(count: u32) -> Self {
        Self {
            groups_x: count,
            groups_y: 1,
            groups_z: 1,
        }
    }
}

/// Tile grid dimensions covering the given screen.
pub fn tile_grid(screen_size: UVec2) -> UVec2 {
    (screen_size + TILE_SIZE - 1) / TILE_SIZE
}

/// Upper bound for the per-frame tile lists; sizes the coordinate buffers.
pub fn tile_count(screen_size: UVec2) -> u32 {
    let grid = tile_grid(screen_size);

    grid.x * grid.y
}

/// The per-tile scheduling predicate: a tile goes onto the filter list when
/// any of its pixels still carries visible noise or just lost its history;
/// otherwise it goes onto the copy list, which only propagates the already
/// converged value.
pub fn tile_needs_filtering(
    variance: f32,
    rejected: bool,
    variance_threshold: f32,
) -> bool {
    rejected || variance > variance_threshold
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn grid_covers_screen() {
        for size in [uvec2(1, 1), uvec2(8, 8), uvec2(9, 8), uvec2(641, 479)] {
            let grid = tile_grid(size);

            assert!(grid.x * TILE_SIZE >= size.x);
            assert!(grid.y * TILE_SIZE >= size.y);
            assert!((grid.x - 1) * TILE_SIZE < size.x);
            assert!((grid.y - 1) * TILE_SIZE < size.y);
        }
    }

    #[test]
    fn reset_is_an_empty_dispatch() {
        assert_eq!(
            DispatchArgs {
                groups_x: 0,
                groups_y: 1,
                groups_z: 1,
            },
            DispatchArgs::RESET,
        );
    }

    #[test]
    fn every_tile_lands_on_exactly_one_list() {
        let cases = [
            (0.0, false),
            (0.0, true),
            (0.5, false),
            (0.5, true),
        ];

        for (variance, rejected) in cases {
            let filtered = tile_needs_filtering(variance, rejected, 0.005);
            let copied = !tile_needs_filtering(variance, rejected, 0.005);

            assert_ne!(filtered, copied);
        }
    }

    #[test]
    fn rejection_forces_filtering_even_without_variance() {
        assert!(tile_needs_filtering(0.0, true, 0.005));
        assert!(!tile_needs_filtering(0.0, false, 0.005));
    }
}
