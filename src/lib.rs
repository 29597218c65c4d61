//! TA to nnU-Net dataset converter
//!
//! This library converts the TA Healthy/Pathological PNG dataset into the
//! nnU-Net v2 raw dataset layout (`imagesTr`, `labelsTr`, `imagesTs` and
//! `dataset.json`).

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod descriptor;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, ConversionConfig};
pub use conversion::{binarize_mask, convert_split, to_grayscale};
pub use dataset::process_dataset;
pub use descriptor::{DatasetDescriptor, DescriptorWriter, NnUnetJsonWriter};
pub use error::{ConvertError, Result};
pub use io::{find_dataset_root, setup_output_directories};
pub use types::{ConversionSummary, OutputDirs, Split, SPLITS};
