//! nnU-Net `dataset.json` descriptor
//!
//! The descriptor is produced by a [`DescriptorWriter`], which the
//! orchestrator receives as a parameter. [`NnUnetJsonWriter`] writes the file
//! the way nnU-Net v2's own `generate_dataset_json` does: fixed key order,
//! stringified channel keys and a four-space indent.

use log::info;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::DATASET_NAME;
use crate::error::{ConvertError, Result};
use crate::types::IMAGE_EXTENSION;

pub const DESCRIPTOR_FILE_NAME: &str = "dataset.json";
pub const DATASET_DESCRIPTION: &str = "TA 2D grayscale PNG with binary masks";
pub const IMAGE_READER_WRITER: &str = "NaturalImage2DIO";

/// Label name to integer value, serialized as a JSON object in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap(Vec<(String, u8)>);

impl LabelMap {
    pub fn new(entries: &[(&str, u8)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Contents of `dataset.json`. Field order is the on-disk key order.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetDescriptor {
    pub channel_names: BTreeMap<u32, String>,
    pub labels: LabelMap,
    #[serde(rename = "numTraining")]
    pub num_training: usize,
    pub file_ending: String,
    pub name: String,
    pub description: String,
    pub overwrite_image_reader_writer: String,
}

impl DatasetDescriptor {
    /// Descriptor for the TA dataset with `num_training` training cases.
    pub fn for_training_cases(num_training: usize) -> Self {
        Self {
            channel_names: BTreeMap::from([(0, "image".to_string())]),
            labels: LabelMap::new(&[("background", 0), ("target", 1)]),
            num_training,
            file_ending: format!(".{}", IMAGE_EXTENSION),
            name: DATASET_NAME.to_string(),
            description: DATASET_DESCRIPTION.to_string(),
            overwrite_image_reader_writer: IMAGE_READER_WRITER.to_string(),
        }
    }
}

/// Something that persists a [`DatasetDescriptor`] into a dataset folder.
pub trait DescriptorWriter {
    /// Write the descriptor into `output_folder`, returning the file written.
    fn write_descriptor(
        &self,
        output_folder: &Path,
        descriptor: &DatasetDescriptor,
    ) -> Result<PathBuf>;
}

/// Writes `dataset.json` in nnU-Net v2 format.
#[derive(Debug, Default, Clone, Copy)]
pub struct NnUnetJsonWriter;

impl NnUnetJsonWriter {
    /// Render the descriptor exactly as it is written to disk
    pub fn render(descriptor: &DatasetDescriptor) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        descriptor.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl DescriptorWriter for NnUnetJsonWriter {
    fn write_descriptor(
        &self,
        output_folder: &Path,
        descriptor: &DatasetDescriptor,
    ) -> Result<PathBuf> {
        let path = output_folder.join(DESCRIPTOR_FILE_NAME);
        let content = Self::render(descriptor)?;
        let file = File::create(&path).map_err(|e| ConvertError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&content)
            .and_then(|_| writer.flush())
            .map_err(|e| ConvertError::io(&path, e))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
