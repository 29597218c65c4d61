use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use indicatif::ProgressBar;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::io::{list_images, load_image, save_gray, IMAGES_DIR, MASKS_DIR};
use crate::types::IMAGE_EXTENSION;
use crate::utils::{case_id, file_stem, image_file_name, label_file_name};

/// ITU-R 601-2 luma in 16.16 fixed point, rounded.
#[inline]
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Clip a 16-bit sample to the 8-bit range.
#[inline]
pub fn clip_to_u8(v: u16) -> u8 {
    v.min(u8::MAX as u16) as u8
}

/// Reduce any decoded image to a single 8-bit channel.
///
/// 8-bit grayscale passes through untouched and 16-bit grayscale is clipped
/// at 255, never rescaled. An alpha channel is dropped and colour is folded
/// with [`luma_601`]. Colour at other sample depths is brought to 8-bit RGB
/// by the `image` crate first.
pub fn to_grayscale(image: DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray,
        DynamicImage::ImageLumaA8(gray_alpha) => first_channel(&gray_alpha, |v| v),
        DynamicImage::ImageLuma16(gray) => first_channel(&gray, clip_to_u8),
        DynamicImage::ImageLumaA16(gray_alpha) => first_channel(&gray_alpha, clip_to_u8),
        DynamicImage::ImageRgba8(rgba) => GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, _] = rgba.get_pixel(x, y).0;
            Luma([luma_601(r, g, b)])
        }),
        other => {
            let rgb = other.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([luma_601(r, g, b)])
            })
        }
    }
}

fn first_channel<P, F>(image: &ImageBuffer<P, Vec<P::Subpixel>>, map: F) -> GrayImage
where
    P: Pixel,
    P::Subpixel: Primitive,
    F: Fn(P::Subpixel) -> u8,
{
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([map(image.get_pixel(x, y).channels()[0])])
    })
}

/// Map every non-zero pixel to 1, leaving zeros alone.
pub fn binarize_mask(mask: &mut GrayImage) {
    for pixel in mask.pixels_mut() {
        pixel.apply(|v| u8::from(v > 0));
    }
}

/// Mask path paired with `image_path`: same stem, inside `masks_dir`.
pub fn mask_path_for(image_path: &Path, masks_dir: &Path) -> PathBuf {
    let mut name = file_stem(image_path);
    name.push(format!(".{}", IMAGE_EXTENSION));
    masks_dir.join(name)
}

/// Convert one image/mask pair and return its case id.
///
/// The mask is checked before anything is written, so a missing mask leaves
/// no output behind for this case.
pub fn convert_case(
    image_path: &Path,
    masks_dir: &Path,
    images_out: &Path,
    labels_out: &Path,
    prefix: &str,
) -> Result<OsString> {
    let mask_path = mask_path_for(image_path, masks_dir);
    if !mask_path.is_file() {
        return Err(ConvertError::MissingMask {
            image: image_path.to_path_buf(),
            mask: mask_path,
        });
    }

    let case_id = case_id(prefix, &file_stem(image_path));

    let image = to_grayscale(load_image(image_path)?);
    save_gray(&image, &images_out.join(image_file_name(&case_id)))?;

    let mut mask = to_grayscale(load_image(&mask_path)?);
    binarize_mask(&mut mask);
    save_gray(&mask, &labels_out.join(label_file_name(&case_id)))?;

    debug!("{} -> {}", image_path.display(), case_id.to_string_lossy());
    Ok(case_id)
}

/// Convert every pair in `split_root` and return how many were converted.
pub fn convert_split(
    split_root: &Path,
    images_out: &Path,
    labels_out: &Path,
    prefix: &str,
) -> Result<usize> {
    convert_split_with_progress(
        split_root,
        images_out,
        labels_out,
        prefix,
        &ProgressBar::hidden(),
    )
}

/// Same as [`convert_split`], advancing `pb` once per case.
pub fn convert_split_with_progress(
    split_root: &Path,
    images_out: &Path,
    labels_out: &Path,
    prefix: &str,
    pb: &ProgressBar,
) -> Result<usize> {
    let images_dir = split_root.join(IMAGES_DIR);
    let masks_dir = split_root.join(MASKS_DIR);
    if !images_dir.is_dir() || !masks_dir.is_dir() {
        return Err(ConvertError::InvalidSplit {
            path: split_root.to_path_buf(),
        });
    }

    let images = list_images(&images_dir)?;
    pb.set_length(images.len() as u64);

    let mut converted = 0;
    for image_path in &images {
        convert_case(image_path, &masks_dir, images_out, labels_out, prefix)?;
        converted += 1;
        pb.inc(1);
    }
    Ok(converted)
}
