use log::info;
use std::path::PathBuf;

/// Extension shared by source images, masks and every converted output.
pub const IMAGE_EXTENSION: &str = "png";

/// Tag every case id starts with.
pub const CASE_ID_TAG: &str = "TA";

/// nnU-Net channel suffix for the single input channel.
pub const CHANNEL_SUFFIX: &str = "_0000";

// A named dataset partition with its own `Images` and `Masks` folders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub name: &'static str,
    pub prefix: &'static str,
}

pub const HEALTHY: Split = Split {
    name: "Healthy",
    prefix: "H",
};

pub const PATHOLOGICAL: Split = Split {
    name: "Pathological",
    prefix: "P",
};

/// Splits in conversion order.
pub const SPLITS: [Split; 2] = [HEALTHY, PATHOLOGICAL];

// Paths to the nnU-Net raw dataset folders
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub root: PathBuf,
    pub images_tr: PathBuf,
    pub labels_tr: PathBuf,
    pub images_ts: PathBuf,
}

/// Per-split case counts for one run.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub output_root: PathBuf,
    pub split_counts: Vec<(Split, usize)>,
}

impl ConversionSummary {
    pub fn new(output_root: PathBuf) -> Self {
        Self {
            output_root,
            split_counts: Vec::with_capacity(SPLITS.len()),
        }
    }

    pub fn record(&mut self, split: Split, cases: usize) {
        self.split_counts.push((split, cases));
    }

    pub fn total(&self) -> usize {
        self.split_counts.iter().map(|(_, n)| n).sum()
    }

    pub fn count_for(&self, split: Split) -> Option<usize> {
        self.split_counts
            .iter()
            .find(|(s, _)| *s == split)
            .map(|(_, n)| *n)
    }

    pub fn print_summary(&self) {
        info!("=== Conversion Summary ===");
        for (split, cases) in &self.split_counts {
            info!("{} ({}): {} cases", split.name, split.prefix, cases);
        }
        info!("Total training cases: {}", self.total());
    }
}
