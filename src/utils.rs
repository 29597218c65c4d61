use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::{CASE_ID_TAG, CHANNEL_SUFFIX, IMAGE_EXTENSION};

/// Build the dataset-wide case id, e.g. `TAH_anon_1001_1`.
pub fn case_id(prefix: &str, stem: &OsStr) -> OsString {
    let mut id = OsString::from(format!("{}{}_", CASE_ID_TAG, prefix));
    id.push(stem);
    id
}

/// File name of the converted input image, `<case id>_0000.png`.
pub fn image_file_name(case_id: &OsStr) -> OsString {
    let mut name = case_id.to_os_string();
    name.push(format!("{}.{}", CHANNEL_SUFFIX, IMAGE_EXTENSION));
    name
}

/// File name of the converted label, `<case id>.png`.
pub fn label_file_name(case_id: &OsStr) -> OsString {
    let mut name = case_id.to_os_string();
    name.push(format!(".{}", IMAGE_EXTENSION));
    name
}

/// File name without its extension, kept as raw OS text.
pub fn file_stem(path: &Path) -> OsString {
    path.file_stem().map(OsStr::to_os_string).unwrap_or_default()
}

/// Create a progress bar with the given label. Its length is set once the
/// split's images have been listed.
pub fn create_progress_bar(label: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create an output directory if needed and return its path. Existing
/// directories and their contents are left in place.
pub fn ensure_output_directory(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        debug!("Directory {:?} already exists, reusing it.", path);
    } else {
        fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    }
    Ok(path.to_path_buf())
}

/// Make sure the parent directory of an output file exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))
        }
        _ => Ok(()),
    }
}
