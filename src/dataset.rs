use log::info;

use crate::config::ConversionConfig;
use crate::conversion::convert_split_with_progress;
use crate::descriptor::{DatasetDescriptor, DescriptorWriter};
use crate::error::Result;
use crate::io::{find_dataset_root, setup_output_directories};
use crate::types::{ConversionSummary, SPLITS};
use crate::utils::create_progress_bar;

/// Main conversion pipeline.
///
/// Converts the Healthy split, then the Pathological one, and hands the
/// total to `writer` once every case is on disk. The first error aborts the
/// run; whatever was already written stays in place.
pub fn process_dataset(
    config: &ConversionConfig,
    writer: &dyn DescriptorWriter,
) -> Result<ConversionSummary> {
    let dataset_root = find_dataset_root(&config.repo_root)?;
    info!("Found TA dataset at {}", dataset_root.display());

    let output_dirs = setup_output_directories(&config.output_root())?;
    info!("Writing nnU-Net dataset to {}", output_dirs.root.display());

    let mut summary = ConversionSummary::new(output_dirs.root.clone());
    for split in SPLITS {
        let pb = create_progress_bar(split.name, config.show_progress);
        let cases = convert_split_with_progress(
            &dataset_root.join(split.name),
            &output_dirs.images_tr,
            &output_dirs.labels_tr,
            split.prefix,
            &pb,
        )?;
        pb.finish_with_message(format!("{} processing complete", split.name));
        info!("Converted {} {} cases.", cases, split.name);
        summary.record(split, cases);
    }

    info!("Creating dataset.json file...");
    let descriptor = DatasetDescriptor::for_training_cases(summary.total());
    writer.write_descriptor(&output_dirs.root, &descriptor)?;

    summary.print_summary();
    Ok(summary)
}
