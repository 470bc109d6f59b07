// src/services/image_processor.rs
use crate::errors::HoloBrandError;
use crate::models::ImageFeatures;
use crate::services::palette::to_hex;
use image::io::{Limits, Reader};
use image::{DynamicImage, ImageError, imageops::FilterType};
use std::io::Cursor;

/// Produces aggregate image statistics for the personalization layer.
pub trait FeatureExtractor: Send + Sync {
    fn extract_features(&self, data: &[u8]) -> Result<ImageFeatures, HoloBrandError>;
}

const ANALYSIS_SIZE: u32 = 512;
const MAX_DIMENSION: u32 = 4096;
const DOMINANT_COLORS: usize = 3;

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Decode once, refusing images over the size cap before their pixels
    /// are allocated.
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage, HoloBrandError> {
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_DIMENSION);
        limits.max_image_height = Some(MAX_DIMENSION);

        let mut reader = Reader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| HoloBrandError::ImageProcessing(format!("Failed to read image: {}", e)))?;
        reader.limits(limits);

        reader.decode().map_err(|e| match e {
            ImageError::Limits(_) => HoloBrandError::ImageProcessing(format!(
                "Image dimensions exceed {}x{}",
                MAX_DIMENSION, MAX_DIMENSION
            )),
            other => HoloBrandError::ImageProcessing(format!("Invalid image format: {}", other)),
        })
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for ImageProcessor {
    fn extract_features(&self, data: &[u8]) -> Result<ImageFeatures, HoloBrandError> {
        let img = self.decode(data)?;
        let rgb = img
            .resize_exact(ANALYSIS_SIZE, ANALYSIS_SIZE, FilterType::Triangle)
            .to_rgb8();

        let samples = rgb.as_raw();
        let count = samples.len() as f64;
        let brightness = samples.iter().map(|&s| s as f64).sum::<f64>() / count;
        let variance = samples
            .iter()
            .map(|&s| {
                let d = s as f64 - brightness;
                d * d
            })
            .sum::<f64>()
            / count;

        Ok(ImageFeatures {
            dominant_colors: dominant_colors(rgb.pixels().map(|p| p.0), DOMINANT_COLORS),
            brightness,
            contrast: variance.sqrt(),
            dimensions: vec![ANALYSIS_SIZE, ANALYSIS_SIZE, 3],
        })
    }
}

/// Most populated colour buckets (3 bits per channel), each reported as the
/// mean colour of its members, most populated first.
fn dominant_colors(pixels: impl Iterator<Item = [u8; 3]>, limit: usize) -> Vec<String> {
    #[derive(Default, Clone, Copy)]
    struct Bucket {
        count: u64,
        sums: [u64; 3],
    }

    let mut buckets = vec![Bucket::default(); 512];
    for [r, g, b] in pixels {
        let index = ((r >> 5) as usize) << 6 | ((g >> 5) as usize) << 3 | (b >> 5) as usize;
        let bucket = &mut buckets[index];
        bucket.count += 1;
        bucket.sums[0] += r as u64;
        bucket.sums[1] += g as u64;
        bucket.sums[2] += b as u64;
    }

    let mut populated: Vec<Bucket> = buckets.into_iter().filter(|b| b.count > 0).collect();
    populated.sort_by(|a, b| b.count.cmp(&a.count));

    populated
        .into_iter()
        .take(limit)
        .map(|b| {
            let mean = |i: usize| (b.sums[i] / b.count) as u8;
            to_hex(mean(0), mean(1), mean(2))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn encode(img: RgbImage) -> Vec<u8> {
        let mut output = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .unwrap();
        output
    }

    #[test]
    fn solid_image_statistics() {
        let data = encode(RgbImage::from_pixel(64, 64, Rgb([255, 0, 0])));
        let features = ImageProcessor::new().extract_features(&data).unwrap();

        assert_eq!(features.dominant_colors, vec!["#ff0000"]);
        assert!((features.brightness - 85.0).abs() < 0.5);
        assert!((features.contrast - 120.2).abs() < 0.5);
        assert_eq!(features.dimensions, vec![512, 512, 3]);
    }

    #[test]
    fn dominant_colors_are_ordered_by_population() {
        let pixels = std::iter::repeat([0, 0, 255])
            .take(10)
            .chain(std::iter::repeat([250, 250, 250]).take(30))
            .chain(std::iter::repeat([10, 200, 10]).take(20))
            .chain(std::iter::once([128, 128, 0]));
        assert_eq!(
            dominant_colors(pixels, 3),
            vec!["#fafafa", "#0ac80a", "#0000ff"]
        );
    }

    #[test]
    fn oversized_images_are_refused() {
        let data = encode(RgbImage::new(4097, 1));
        let err = ImageProcessor::new().extract_features(&data).unwrap_err();
        assert!(err.to_string().contains("exceed 4096x4096"), "{err}");

        let edge = encode(RgbImage::from_pixel(4096, 1, Rgb([0, 0, 255])));
        let features = ImageProcessor::new().extract_features(&edge).unwrap();
        assert_eq!(features.dominant_colors, vec!["#0000ff"]);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = ImageProcessor::new()
            .extract_features(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, HoloBrandError::ImageProcessing(_)));
    }
}
