use clap::Parser;
use std::path::PathBuf;

/// Environment variable nnU-Net uses for its raw dataset base directory.
pub const RAW_BASE_ENV: &str = "nnUNet_raw";

/// Base directory used when neither `--raw_base` nor `nnUNet_raw` is given.
pub const DEFAULT_RAW_BASE: &str = "/mnt/e/nnUNet/nnUNet_raw";

/// nnU-Net dataset identifier, also the name of the output folder.
pub const DATASET_NAME: &str = "Dataset501_TA";

/// Command-line arguments for converting the TA dataset to nnU-Net format.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Repository root containing the `TA` dataset folder
    #[arg(short = 'r', long = "repo_root", default_value = ".")]
    pub repo_root: PathBuf,

    /// nnU-Net raw dataset base directory
    #[arg(long = "raw_base", env = RAW_BASE_ENV, default_value = DEFAULT_RAW_BASE)]
    pub raw_base: PathBuf,

    /// Hide the per-split progress bars
    #[arg(long = "no_progress")]
    pub no_progress: bool,
}

impl Args {
    pub fn to_conversion_config(&self) -> ConversionConfig {
        ConversionConfig {
            repo_root: self.repo_root.clone(),
            raw_base: self.raw_base.clone(),
            show_progress: !self.no_progress,
        }
    }
}

/// Everything a conversion run needs, passed explicitly into
/// [`crate::process_dataset`].
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub repo_root: PathBuf,
    pub raw_base: PathBuf,
    pub show_progress: bool,
}

impl ConversionConfig {
    pub fn new(repo_root: impl Into<PathBuf>, raw_base: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            raw_base: raw_base.into(),
            show_progress: false,
        }
    }

    /// `<raw_base>/Dataset501_TA`
    pub fn output_root(&self) -> PathBuf {
        self.raw_base.join(DATASET_NAME)
    }
}
