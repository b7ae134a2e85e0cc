//! Texture loading.
//!
//! Textures are read synchronously at startup: the file is decoded, its
//! pixels unpacked into a flat RGBA8 buffer and uploaded as a Bevy [`Image`].
//! A missing or corrupt file fails the startup system, which aborts the game.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ::image::{DynamicImage, GenericImageView, ImageFormat};
use bevy::{
    asset::RenderAssetUsages,
    image::ImageSampler,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use thiserror::Error;

use super::{bubble::BubbleColor, explosion};
use crate::config::BubbleConfig;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, load_bubble_assets);
}

/// Background image, drawn behind everything.
pub const BACKGROUND_FILE: &str = "moon.png";

/// The 4x4 explosion sprite sheet.
pub const EXPLOSION_FILE: &str = "explosion.png";

/// Why a texture could not be loaded.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },
}

/// A texture handle together with its pixel size.
#[derive(Debug, Clone, Default)]
pub struct LoadedTexture {
    pub handle: Handle<Image>,
    pub size: UVec2,
}

/// Holds every texture the game draws.
#[derive(Resource, Debug, Clone)]
pub struct BubbleAssets {
    pub background: LoadedTexture,
    /// One texture per [`BubbleColor`], in [`BubbleColor::ALL`] order.
    pub bubbles: Vec<LoadedTexture>,
    pub explosion: LoadedTexture,
    pub explosion_layout: Handle<TextureAtlasLayout>,
}

impl BubbleAssets {
    /// Texture for the given bubble color.
    pub fn bubble_texture(&self, color: BubbleColor) -> &LoadedTexture {
        &self.bubbles[color.index()]
    }

    /// Assets with default handles, for logic that never touches the GPU.
    #[cfg(test)]
    pub fn placeholder(bubble_size: UVec2) -> Self {
        let texture = LoadedTexture {
            handle: Handle::default(),
            size: bubble_size,
        };
        Self {
            background: LoadedTexture::default(),
            bubbles: vec![texture; BubbleColor::ALL.len()],
            explosion: LoadedTexture::default(),
            explosion_layout: Handle::default(),
        }
    }
}

/// Copy every pixel of `decoded` into a row-major RGBA8 buffer.
pub fn unpack_rgba(decoded: &DynamicImage) -> Vec<u8> {
    let (width, height) = decoded.dimensions();
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for (_x, _y, pixel) in decoded.pixels() {
        let [r, g, b, a] = pixel.0;
        pixels.extend_from_slice(&[r, g, b, a]);
    }
    pixels
}

/// Read and decode a PNG into an engine texture.
pub fn read_texture(path: &Path) -> Result<Image, AssetLoadError> {
    let bytes = fs::read(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = ::image::load_from_memory_with_format(&bytes, ImageFormat::Png).map_err(
        |source| AssetLoadError::Decode {
            path: path.to_path_buf(),
            source,
        },
    )?;

    let (width, height) = decoded.dimensions();
    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        unpack_rgba(&decoded),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = ImageSampler::nearest();
    Ok(image)
}

/// Read a texture and add it to the image assets.
fn add_texture(images: &mut Assets<Image>, path: &Path) -> Result<LoadedTexture, AssetLoadError> {
    let image = read_texture(path)?;
    let size = image.size();
    debug!("Loaded {:?} ({}x{})", path, size.x, size.y);
    Ok(LoadedTexture {
        handle: images.add(image),
        size,
    })
}

/// Load every texture into [`BubbleAssets`].
pub fn load_bubble_assets(
    mut commands: Commands,
    config: Res<BubbleConfig>,
    mut images: ResMut<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) -> Result {
    let dir = &config.asset_dir;

    let explosion = add_texture(&mut images, &dir.join(EXPLOSION_FILE))?;
    let bubbles = BubbleColor::ALL
        .iter()
        .map(|color| add_texture(&mut images, &dir.join(color.file_name())))
        .collect::<Result<Vec<_>, _>>()?;
    let background = add_texture(&mut images, &dir.join(BACKGROUND_FILE))?;

    commands.insert_resource(BubbleAssets {
        background,
        bubbles,
        explosion,
        explosion_layout: layouts.add(explosion::explosion_layout()),
    });

    info!("Loaded textures from {:?}", dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bubble-pop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_unpack_is_row_major_rgba() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        img.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        img.put_pixel(0, 1, Rgba([9, 10, 11, 12]));
        img.put_pixel(1, 1, Rgba([13, 14, 15, 16]));

        let pixels = unpack_rgba(&DynamicImage::ImageRgba8(img));
        assert_eq!(pixels, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_read_texture_from_png() {
        let path = temp_path("ok.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([255, 128, 0, 200]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();

        let texture = read_texture(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(texture.size(), UVec2::new(3, 2));
        assert_eq!(texture.texture_descriptor.format, TextureFormat::Rgba8UnormSrgb);
        let data = texture.data.as_ref().unwrap();
        assert_eq!(data.len(), 3 * 2 * 4);
        assert_eq!(&data[20..24], &[255, 128, 0, 200]);
    }

    #[test]
    fn test_bundled_assets_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");

        let explosion = read_texture(&dir.join(EXPLOSION_FILE)).unwrap();
        assert_eq!(explosion.size(), UVec2::splat(256));

        for color in BubbleColor::ALL {
            let texture = read_texture(&dir.join(color.file_name())).unwrap();
            assert_eq!(texture.size(), UVec2::splat(64), "{:?}", color);
        }

        assert!(read_texture(&dir.join(BACKGROUND_FILE)).is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_texture(&temp_path("missing.png")).unwrap_err();
        assert!(matches!(err, AssetLoadError::Io { .. }));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let path = temp_path("corrupt.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = read_texture(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, AssetLoadError::Decode { .. }));
    }
}
