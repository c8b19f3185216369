use std::path::{Path, PathBuf};

use clap::{builder::PossibleValue, Args, ValueEnum};
use image::{codecs::png::CompressionType, DynamicImage};
use strum::{EnumIter, VariantArray};

use super::CommandError;
use crate::image_util::{self, ImageExt as _, ImgUtilError};

/// Edge length of a single skybox face in pixels
pub const TILE_SIZE: u32 = 1024;

/// Number of faces a skybox source has to consist of
pub const FACE_COUNT: u32 = 6;

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("unable to load {}: {source}", .path.display())]
    Decode { path: PathBuf, source: ImgUtilError },

    #[error("Image dimensions must be a multiple of 1024x1024! (source is {width}x{height}px)")]
    Dimensions { width: u32, height: u32 },

    #[error("The image does not represent a 6-face skybox! (found a {cols}x{rows} grid)")]
    Layout { rows: u32, cols: u32 },

    #[error("unable to save face {index} to {}: {source}", .path.display())]
    Write {
        index: u32,
        path: PathBuf,
        source: ImgUtilError,
    },
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Skybox image made up of six 1024x1024 faces.
    pub source: PathBuf,

    /// Output folder. It has to exist already, existing faces in it are overwritten.
    pub output: PathBuf,

    /// PNG compression level used for the faces.
    #[clap(short, long, default_value_t = Compression::Default)]
    pub compression: Compression,

    /// Losslessly recompress the faces with oxipng.
    /// Slower, but the resulting files are usually noticeably smaller.
    #[clap(short, long, action, verbatim_doc_comment)]
    pub optimize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, VariantArray)]
pub enum Compression {
    Fast,
    #[default]
    Default,
    Best,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Default => write!(f, "default"),
            Self::Best => write!(f, "best"),
        }
    }
}

impl From<Compression> for CompressionType {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Fast => Self::Fast,
            Compression::Default => Self::Default,
            Compression::Best => Self::Best,
        }
    }
}

impl ValueEnum for Compression {
    fn value_variants<'a>() -> &'a [Self] {
        Self::VARIANTS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(match self {
            Self::Fast => "fast",
            Self::Default => "default",
            Self::Best => "best",
        }))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub compression: Compression,
    pub optimize: bool,
}

impl SplitArgs {
    const fn options(&self) -> SplitOptions {
        SplitOptions {
            compression: self.compression,
            optimize: self.optimize,
        }
    }
}

/// Arrangement of the faces inside a skybox source.
///
/// Any grid with exactly [`FACE_COUNT`] tiles is accepted, so a horizontal strip (`6x1`)
/// is as valid as the usual `3x2` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGrid {
    pub rows: u32,
    pub cols: u32,
}

impl FaceGrid {
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, SplitError> {
        if width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
            return Err(SplitError::Dimensions { width, height });
        }

        let rows = height / TILE_SIZE;
        let cols = width / TILE_SIZE;

        if rows.checked_mul(cols) != Some(FACE_COUNT) {
            return Err(SplitError::Layout { rows, cols });
        }

        Ok(Self { rows, cols })
    }

    /// Faces in row-major order, top left first.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Face {
                index: row * self.cols + col + 1,
                row,
                col,
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// 1-based face number, used in the output file name
    pub index: u32,
    pub row: u32,
    pub col: u32,
}

impl Face {
    /// Crop rectangle of this face as `(x, y, width, height)`.
    pub const fn bounds(self) -> (u32, u32, u32, u32) {
        (self.col * TILE_SIZE, self.row * TILE_SIZE, TILE_SIZE, TILE_SIZE)
    }

    pub fn path(self, output_dir: impl AsRef<Path>) -> PathBuf {
        face_path(output_dir, self.index)
    }
}

pub fn face_path(output_dir: impl AsRef<Path>, index: u32) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("skybox_face_{index}.png"))
}

pub fn split(args: &SplitArgs) -> Result<(), CommandError> {
    extract_faces(&args.source, &args.output, args.options())?;
    Ok(())
}

/// Loads the skybox at `image_path` and writes its faces into `output_dir`.
///
/// Returns the paths of the written faces in face order.
pub fn extract_faces(
    image_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: SplitOptions,
) -> Result<Vec<PathBuf>, SplitError> {
    let image_path = image_path.as_ref();
    let image = image_util::load_image_from_file(image_path).map_err(|source| {
        SplitError::Decode {
            path: image_path.to_path_buf(),
            source,
        }
    })?;

    split_image(&image, output_dir, options)
}

/// Writes the faces of an already loaded skybox into `output_dir`.
///
/// Nothing is written unless the grid is valid. A failed save stops the split,
/// faces saved before it stay on disk.
pub fn split_image(
    image: &DynamicImage,
    output_dir: impl AsRef<Path>,
    options: SplitOptions,
) -> Result<Vec<PathBuf>, SplitError> {
    let output_dir = output_dir.as_ref();
    let (width, height) = (image.width(), image.height());

    let grid = FaceGrid::from_dimensions(width, height)?;
    debug!(
        "source is {width}x{height}px, {}x{} face grid",
        grid.cols, grid.rows
    );

    let mut written = Vec::with_capacity(FACE_COUNT as usize);

    for face in grid.faces() {
        let (x, y, w, h) = face.bounds();
        trace!("face {}: cropping {w}x{h}px at ({x}, {y})", face.index);

        let path = face.path(output_dir);
        let size = image
            .crop_imm(x, y, w, h)
            .save_png(&path, options.compression.into(), options.optimize)
            .map_err(|source| SplitError::Write {
                index: face.index,
                path: path.clone(),
                source,
            })?;

        info!(
            "saved {} ({})",
            path.display(),
            image_util::human_readable_bytes(size)
        );
        written.push(path);
    }

    info!("skybox split complete, {} faces written", written.len());

    Ok(written)
}
