use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("TA dataset folder not found under repo root {}", repo_root.display())]
    DatasetRootNotFound { repo_root: PathBuf },

    #[error("Invalid TA split structure at {}", path.display())]
    InvalidSplit { path: PathBuf },

    #[error("Missing mask for {} -> {}", image.display(), mask.display())]
    MissingMask { image: PathBuf, mask: PathBuf },

    #[error("Image error ({}): {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read image directory entry: {0}")]
    Walk(#[from] jwalk::Error),

    #[error("Failed to serialize dataset descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
