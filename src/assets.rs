use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Failure while loading an asset from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Loads a texture image from disk and converts it to RGBA8.
pub fn load_texture(path: &Path) -> Result<RgbaImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Built-in stand-in used when no texture file is available: a small
/// two-tone checker so the cube's orientation stays readable.
pub fn placeholder_texture() -> RgbaImage {
    const SIZE: u32 = 64;
    const CELL: u32 = 8;
    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        if ((x / CELL) + (y / CELL)) % 2 == 0 {
            Rgba([224, 224, 224, 255])
        } else {
            Rgba([96, 96, 96, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_reports_the_path() {
        let err = load_texture(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.jpg"));
    }

    #[test]
    fn placeholder_is_a_checker() {
        let image = placeholder_texture();
        assert_eq!(image.dimensions(), (64, 64));
        assert_ne!(image.get_pixel(0, 0), image.get_pixel(8, 0));
        assert_eq!(image.get_pixel(0, 0), image.get_pixel(16, 0));
    }
}
