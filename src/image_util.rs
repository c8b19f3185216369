use std::{borrow::Cow, fs, path::Path};

use image::{
    codecs::png::{self, CompressionType},
    DynamicImage, ImageEncoder,
};

/// oxipng preset used for lossless re-compression, same as the oxipng CLI default.
const OXIPNG_PRESET: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ImgUtilError {
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("png optimization error: {0}")]
    OptimizeError(#[from] oxipng::PngError),
}

type ImgUtilResult<T> = std::result::Result<T, ImgUtilError>;

pub fn load_image_from_file(path: &Path) -> ImgUtilResult<DynamicImage> {
    let image = image::open(path)?;
    trace!(
        "decoded {}: {}x{}px, {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

pub trait ImageExt {
    /// Encodes the image as PNG and writes it to `path`, replacing any existing file.
    /// Returns the number of bytes written.
    fn save_png(
        &self,
        path: impl AsRef<Path>,
        compression: CompressionType,
        optimize: bool,
    ) -> ImgUtilResult<u64>;
}

impl ImageExt for DynamicImage {
    fn save_png(
        &self,
        path: impl AsRef<Path>,
        compression: CompressionType,
        optimize: bool,
    ) -> ImgUtilResult<u64> {
        // png has no float color types
        let image = match self {
            Self::ImageRgb32F(_) | Self::ImageRgba32F(_) => {
                Cow::Owned(Self::ImageRgba16(self.to_rgba16()))
            }
            _ => Cow::Borrowed(self),
        };

        let mut data = Vec::new();
        png::PngEncoder::new_with_quality(&mut data, compression, png::FilterType::default())
            .write_image(
                image.as_bytes(),
                image.width(),
                image.height(),
                image.color().into(),
            )?;

        if optimize {
            let orig_size = data.len();
            data = oxipng::optimize_from_memory(
                &data,
                &oxipng::Options::from_preset(OXIPNG_PRESET),
            )?;
            trace!("optimized png from {orig_size} to {} bytes", data.len());
        }

        fs::write(path, &data)?;

        Ok(data.len() as u64)
    }
}

pub fn human_readable_bytes(bytes: u64) -> String {
    static UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

    if bytes < 1000 {
        return format!("{bytes}{}", UNITS[0]);
    }

    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }

    format!("{:.2}{}", size, UNITS[unit])
}
