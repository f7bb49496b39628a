use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::codecs::jpeg::JpegDecoder;
use image::codecs::png::PngDecoder;
use image::{DynamicImage, GenericImageView, ImageResult};
use log::debug;

use super::grid::PixelGrid;
use crate::AnsiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AnsiError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Self::from_extension(&extension)
            .ok_or_else(|| AnsiError::UnsupportedFormat { path: path.to_path_buf(), extension })
    }
}

/// Decode the PNG or JPEG file at `path` into a [`PixelGrid`].
///
/// The format is chosen from the file extension before the file is opened,
/// so unsupported inputs are rejected without touching the filesystem.
pub fn load_image(path: &Path) -> Result<PixelGrid, AnsiError> {
    let kind = ImageKind::from_path(path)?;

    let file =
        File::open(path).map_err(|source| AnsiError::Open { path: path.to_path_buf(), source })?;
    let image = decode(BufReader::new(file), kind)
        .map_err(|source| AnsiError::Decode { path: path.to_path_buf(), source })?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AnsiError::EmptyImage { width, height });
    }

    debug!("decoded {:?} image {}x{} from {}", kind, width, height, path.display());
    Ok(PixelGrid::from_image(image))
}

pub fn decode<R: Read>(reader: R, kind: ImageKind) -> ImageResult<DynamicImage> {
    match kind {
        ImageKind::Png => DynamicImage::from_decoder(PngDecoder::new(reader)?),
        ImageKind::Jpeg => DynamicImage::from_decoder(JpegDecoder::new(reader)?),
    }
}
