use image::{DynamicImage, GrayImage};
use jwalk::WalkDir;
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::{OutputDirs, HEALTHY, IMAGE_EXTENSION};
use crate::utils::{ensure_output_directory, ensure_parent_dir};

/// Name of the dataset folder expected directly under the repository root.
pub const DATASET_DIR: &str = "TA";
pub const IMAGES_DIR: &str = "Images";
pub const MASKS_DIR: &str = "Masks";

/// Locate the TA dataset root under `repo_root`.
///
/// Only `<repo_root>/TA` is considered, and it must contain `Healthy/Images`
/// and `Healthy/Masks` as directories.
pub fn find_dataset_root(repo_root: &Path) -> Result<PathBuf> {
    let candidate = repo_root.join(DATASET_DIR);
    let healthy = candidate.join(HEALTHY.name);
    if healthy.join(IMAGES_DIR).is_dir() && healthy.join(MASKS_DIR).is_dir() {
        return Ok(candidate);
    }
    Err(ConvertError::DatasetRootNotFound {
        repo_root: repo_root.to_path_buf(),
    })
}

/// Set up the nnU-Net raw dataset folders under `root`
pub fn setup_output_directories(root: &Path) -> Result<OutputDirs> {
    Ok(OutputDirs {
        root: root.to_path_buf(),
        images_tr: ensure_output_directory(&root.join("imagesTr"))?,
        labels_tr: ensure_output_directory(&root.join("labelsTr"))?,
        images_ts: ensure_output_directory(&root.join("imagesTs"))?,
    })
}

/// List `*.png` files directly inside `dir`, sorted by path. File names do
/// not need to be valid UTF-8.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .skip_hidden(false)
    {
        let path = entry?.path();
        if path.extension() == Some(OsStr::new(IMAGE_EXTENSION)) && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    debug!("Found {} images in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| ConvertError::image(path, e))
}

/// Encode a grayscale image, creating the parent directory first. An
/// existing file at `path` is overwritten.
pub fn save_gray(image: &GrayImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|e| ConvertError::image(path, e))
}
