use image::{DynamicImage, GrayImage, ImageBuffer, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use std::ffi::OsStr;
use std::fs;

use ta2nnunet::conversion::{clip_to_u8, luma_601, mask_path_for};
use ta2nnunet::descriptor::NnUnetJsonWriter;
use ta2nnunet::types::{HEALTHY, PATHOLOGICAL};
use ta2nnunet::utils::{case_id, ensure_output_directory, image_file_name, label_file_name};
use ta2nnunet::{
    binarize_mask, find_dataset_root, setup_output_directories, to_grayscale, ConversionConfig,
    ConvertError, DatasetDescriptor, DescriptorWriter,
};

#[test]
fn test_case_id_differs_between_splits() {
    let stem = OsStr::new("anon_1001_1");
    let healthy = case_id(HEALTHY.prefix, stem);
    let pathological = case_id(PATHOLOGICAL.prefix, stem);

    assert_eq!(healthy, "TAH_anon_1001_1");
    assert_eq!(pathological, "TAP_anon_1001_1");
    assert_ne!(healthy, pathological);
}

#[test]
fn test_output_file_names() {
    assert_eq!(image_file_name(OsStr::new("TAH_a")), "TAH_a_0000.png");
    assert_eq!(label_file_name(OsStr::new("TAH_a")), "TAH_a.png");
    assert!(!label_file_name(OsStr::new("TAP_anon_7"))
        .to_string_lossy()
        .contains("_0000"));
}

#[test]
fn test_mask_path_for() {
    let mask = mask_path_for("TA/Healthy/Images/anon_1.png".as_ref(), "TA/Healthy/Masks".as_ref());
    assert_eq!(mask, std::path::PathBuf::from("TA/Healthy/Masks/anon_1.png"));
}

#[test]
fn test_binarize_mask() {
    let mut mask = GrayImage::from_raw(4, 1, vec![0, 1, 128, 255]).unwrap();
    binarize_mask(&mut mask);
    assert_eq!(mask.as_raw(), &vec![0, 1, 1, 1]);

    // already binary stays the same
    let mut again = mask.clone();
    binarize_mask(&mut again);
    assert_eq!(again, mask);
}

#[test]
fn test_grayscale_passthrough() {
    let gray = GrayImage::from_raw(3, 1, vec![0, 128, 255]).unwrap();
    let out = to_grayscale(DynamicImage::ImageLuma8(gray.clone()));
    assert_eq!(out, gray);
}

#[test]
fn test_grayscale_from_rgb() {
    let rgb: RgbImage = ImageBuffer::from_fn(4, 1, |x, _| match x {
        0 => Rgb([255, 0, 0]),
        1 => Rgb([0, 255, 0]),
        2 => Rgb([0, 0, 255]),
        _ => Rgb([200, 200, 200]),
    });
    let out = to_grayscale(DynamicImage::ImageRgb8(rgb));
    assert_eq!(out.as_raw(), &vec![76, 150, 29, 200]);
}

#[test]
fn test_grayscale_ignores_alpha() {
    let rgba: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([10, 10, 10, 0]));
    let out = to_grayscale(DynamicImage::ImageRgba8(rgba));
    assert!(out.pixels().all(|p| p.0[0] == 10));

    let la = ImageBuffer::from_pixel(2, 1, LumaA([42u8, 7]));
    let out = to_grayscale(DynamicImage::ImageLumaA8(la));
    assert_eq!(out.as_raw(), &vec![42, 42]);
}

#[test]
fn test_grayscale_clips_16_bit() {
    let gray16: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(5, 1, vec![0, 1, 2, 255, 300]).unwrap();
    let out = to_grayscale(DynamicImage::ImageLuma16(gray16));
    assert_eq!(out.as_raw(), &vec![0, 1, 2, 255, 255]);

    let la16 = ImageBuffer::from_pixel(1, 1, LumaA([7u16, 65535]));
    let out = to_grayscale(DynamicImage::ImageLumaA16(la16));
    assert_eq!(out.as_raw(), &vec![7]);

    assert_eq!(clip_to_u8(65535), 255);
}

#[test]
fn test_luma_601_bounds() {
    assert_eq!(luma_601(0, 0, 0), 0);
    assert_eq!(luma_601(255, 255, 255), 255);
}

#[test]
fn test_render_descriptor() {
    let descriptor = DatasetDescriptor::for_training_cases(1);
    let rendered = String::from_utf8(NnUnetJsonWriter::render(&descriptor).unwrap()).unwrap();

    let expected = r#"{
    "channel_names": {
        "0": "image"
    },
    "labels": {
        "background": 0,
        "target": 1
    },
    "numTraining": 1,
    "file_ending": ".png",
    "name": "Dataset501_TA",
    "description": "TA 2D grayscale PNG with binary masks",
    "overwrite_image_reader_writer": "NaturalImage2DIO"
}"#;
    assert_eq!(rendered, expected);
    assert_eq!(descriptor.labels.get("background"), Some(0));
    assert_eq!(descriptor.labels.get("target"), Some(1));
    assert_eq!(descriptor.labels.get("lesion"), None);
}

#[test]
fn test_write_descriptor() {
    let temp_dir = tempfile::tempdir().unwrap();
    let descriptor = DatasetDescriptor::for_training_cases(12);

    let path = NnUnetJsonWriter
        .write_descriptor(temp_dir.path(), &descriptor)
        .unwrap();

    assert_eq!(path, temp_dir.path().join("dataset.json"));
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["numTraining"], 12);
    assert_eq!(value["labels"]["target"], 1);
    assert_eq!(value["channel_names"]["0"], "image");
}

#[test]
fn test_find_dataset_root() {
    let temp_dir = tempfile::tempdir().unwrap();
    let repo_root = temp_dir.path();

    let err = find_dataset_root(repo_root).unwrap_err();
    assert!(matches!(err, ConvertError::DatasetRootNotFound { .. }));

    // Images alone is not enough
    fs::create_dir_all(repo_root.join("TA/Healthy/Images")).unwrap();
    assert!(find_dataset_root(repo_root).is_err());

    fs::create_dir_all(repo_root.join("TA/Healthy/Masks")).unwrap();
    assert_eq!(find_dataset_root(repo_root).unwrap(), repo_root.join("TA"));
}

#[test]
fn test_find_dataset_root_rejects_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let healthy = temp_dir.path().join("TA/Healthy");
    fs::create_dir_all(healthy.join("Images")).unwrap();
    fs::write(healthy.join("Masks"), b"not a directory").unwrap();

    assert!(find_dataset_root(temp_dir.path()).is_err());
}

#[test]
fn test_setup_output_directories_keeps_existing_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = ConversionConfig::new(temp_dir.path(), temp_dir.path().join("raw"));
    let root = config.output_root();
    assert!(root.ends_with("Dataset501_TA"));

    let dirs = setup_output_directories(&root).unwrap();
    let kept = dirs.images_tr.join("TAH_old_0000.png");
    fs::write(&kept, b"old").unwrap();

    let dirs = setup_output_directories(&root).unwrap();
    assert!(kept.is_file());
    assert!(dirs.labels_tr.is_dir());
    assert!(dirs.images_ts.is_dir());
    assert_eq!(dirs.images_ts, root.join("imagesTs"));
}

#[test]
fn test_ensure_output_directory_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("a/b/c");
    assert_eq!(ensure_output_directory(&path).unwrap(), path);
    assert_eq!(ensure_output_directory(&path).unwrap(), path);
    assert!(path.is_dir());
}
