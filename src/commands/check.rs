use std::path::{Path, PathBuf};

use clap::Args;

use super::{CommandError, FaceGrid, SplitError};
use crate::image_util;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Skybox image to validate.
    pub source: PathBuf,
}

pub fn check(args: &CheckArgs) -> Result<(), CommandError> {
    let grid = inspect(&args.source)?;

    info!(
        "{} is a valid skybox, {}x{} face grid",
        args.source.display(),
        grid.cols,
        grid.rows
    );

    for face in grid.faces() {
        let (x, y, w, h) = face.bounds();
        info!(
            "skybox_face_{}.png <- {w}x{h}px at ({x}, {y})",
            face.index
        );
    }

    Ok(())
}

/// Fully decodes the image at `path` and validates its face grid.
pub fn inspect(path: impl AsRef<Path>) -> Result<FaceGrid, SplitError> {
    let path = path.as_ref();
    let image = image_util::load_image_from_file(path).map_err(|source| SplitError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    FaceGrid::from_dimensions(image.width(), image.height())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::RgbImage;

    use super::*;

    #[test]
    fn inspect_valid_skybox() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skybox.png");
        RgbImage::new(3072, 2048).save(&path).unwrap();

        assert_eq!(inspect(&path).unwrap(), FaceGrid { rows: 2, cols: 3 });

        // only the source itself
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn inspect_reports_each_failure_kind() {
        let dir = tempfile::tempdir().unwrap();

        let unaligned = dir.path().join("unaligned.png");
        RgbImage::new(1000, 1024).save(&unaligned).unwrap();
        assert!(matches!(
            inspect(&unaligned),
            Err(SplitError::Dimensions { .. })
        ));

        let single = dir.path().join("single.png");
        RgbImage::new(1024, 1024).save(&single).unwrap();
        assert!(matches!(inspect(&single), Err(SplitError::Layout { .. })));

        let garbage = dir.path().join("garbage.jpg");
        fs::write(&garbage, b"not a jpeg at all").unwrap();
        assert!(matches!(inspect(&garbage), Err(SplitError::Decode { .. })));

        assert!(matches!(
            inspect(dir.path().join("missing.png")),
            Err(SplitError::Decode { .. })
        ));
    }

    #[test]
    fn check_command_maps_errors() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            source: dir.path().join("missing.png"),
        };

        assert!(matches!(
            check(&args),
            Err(CommandError::SplitError(SplitError::Decode { .. }))
        ));
    }
}
