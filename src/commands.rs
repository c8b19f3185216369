mod check;
mod split;

pub use check::*;
pub use split::*;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum SkyboxCommand {
    /// Split a skybox image into its six faces.
    ///
    /// The source has to be a grid of 1024x1024 tiles with exactly six tiles in total.
    /// Faces are numbered row by row, starting at the top left, and saved as `skybox_face_<n>.png`.
    Split {
        // args
        #[clap(flatten)]
        args: SplitArgs,
    },

    /// Validate a skybox image without writing anything.
    ///
    /// Reports the detected face grid and where each face would be cropped from.
    Check {
        // args
        #[clap(flatten)]
        args: CheckArgs,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    SplitError(#[from] SplitError),
}
