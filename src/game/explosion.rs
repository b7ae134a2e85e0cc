//! Explosion sprite sheet - a 4x4 grid of 64px frames played backwards.
//!
//! The sheet is laid out with the final frame in the top-left corner, so the
//! animation counts down from frame 15 to frame 0.

use bevy::prelude::*;

/// Number of frames in the explosion sheet.
pub const EXPLOSION_FRAMES: usize = 16;

/// Frames per row (and rows) in the sheet.
pub const EXPLOSION_COLUMNS: u32 = 4;

/// Size of one frame in pixels.
pub const EXPLOSION_CELL_SIZE: u32 = 64;

/// Atlas layout for the explosion sheet.
pub fn explosion_layout() -> TextureAtlasLayout {
    TextureAtlasLayout::from_grid(
        UVec2::splat(EXPLOSION_CELL_SIZE),
        EXPLOSION_COLUMNS,
        EXPLOSION_COLUMNS,
        None,
        None,
    )
}

/// Frame to show after `elapsed` seconds, or `None` once the animation is over.
///
/// The animation lasts exactly `EXPLOSION_FRAMES * interval` seconds.
pub fn frame_index(elapsed: f32, interval: f32) -> Option<usize> {
    let step = (elapsed / interval).floor().max(0.0);
    if step >= EXPLOSION_FRAMES as f32 {
        return None;
    }
    Some(EXPLOSION_FRAMES - 1 - step as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_count_down() {
        let interval = 0.25;
        assert_eq!(frame_index(0.0, interval), Some(15));
        assert_eq!(frame_index(0.24, interval), Some(15));
        assert_eq!(frame_index(0.25, interval), Some(14));
        assert_eq!(frame_index(3.75, interval), Some(0));
        assert_eq!(frame_index(3.99, interval), Some(0));
        assert_eq!(frame_index(4.0, interval), None);
        assert_eq!(frame_index(10.0, interval), None);
    }

    #[test]
    fn test_layout_cells_are_row_major() {
        let layout = explosion_layout();
        assert_eq!(layout.len(), EXPLOSION_FRAMES);
        assert_eq!(layout.textures[0].min, UVec2::new(0, 0));
        assert_eq!(layout.textures[3].min, UVec2::new(192, 0));
        assert_eq!(layout.textures[5].min, UVec2::new(64, 64));
        assert_eq!(layout.textures[15].min, UVec2::new(192, 192));
        assert_eq!(layout.textures[15].max, UVec2::new(256, 256));
    }
}
