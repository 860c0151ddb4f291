//! Video frame types and processing

use crate::PerceptionError;
use image::imageops::{self, FilterType};
use image::GrayImage;

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, PerceptionError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(PerceptionError::InvalidFrame(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Convert to a single-channel grayscale frame
    pub fn to_grayscale(&self) -> GrayFrame {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for pixel in self.data.chunks(3) {
            // Luminance formula: 0.299*R + 0.587*G + 0.114*B
            let y = (pixel[0] as f32 * 0.299
                + pixel[1] as f32 * 0.587
                + pixel[2] as f32 * 0.114) as u8;
            gray.push(y);
        }
        GrayFrame {
            data: gray,
            width: self.width,
            height: self.height,
        }
    }
}

/// Single-channel grayscale frame, input to optical flow
#[derive(Debug, Clone)]
pub struct GrayFrame {
    /// Luma pixel data (width * height)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

impl GrayFrame {
    /// Downscale so the larger dimension is at most `max_dim`.
    ///
    /// Returns a clone when the frame is already small enough.
    pub fn downscale(&self, max_dim: u32) -> Result<GrayFrame, PerceptionError> {
        let largest = self.width.max(self.height);
        if largest <= max_dim {
            return Ok(self.clone());
        }
        let scale = max_dim as f64 / largest as f64;
        let new_w = ((self.width as f64 * scale) as u32).max(1);
        let new_h = ((self.height as f64 * scale) as u32).max(1);

        let img = GrayImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(
            || PerceptionError::InvalidFrame("grayscale buffer shorter than dimensions".into()),
        )?;
        let resized = imageops::resize(&img, new_w, new_h, FilterType::Triangle);

        Ok(GrayFrame {
            data: resized.into_raw(),
            width: new_w,
            height: new_h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> VideoFrame {
        let data: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
        VideoFrame::new(data, width, height).unwrap()
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert!(VideoFrame::new(vec![0; 10], 4, 4).is_err());
    }

    #[test]
    fn test_get_pixel() {
        let frame = solid_frame(4, 4, [10, 20, 30]);
        assert_eq!(frame.get_pixel(2, 3), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(4, 0), None);
    }

    #[test]
    fn test_grayscale_luminance() {
        let frame = solid_frame(2, 2, [255, 255, 255]);
        let gray = frame.to_grayscale();
        assert_eq!(gray.data.len(), 4);
        assert!(gray.data.iter().all(|&y| y >= 254));
    }

    #[test]
    fn test_downscale_caps_largest_dimension() {
        let frame = solid_frame(960, 240, [128, 128, 128]);
        let gray = frame.to_grayscale().downscale(480).unwrap();
        assert_eq!(gray.width, 480);
        assert_eq!(gray.height, 120);
    }

    #[test]
    fn test_downscale_noop_when_small() {
        let frame = solid_frame(320, 240, [0, 0, 0]);
        let gray = frame.to_grayscale().downscale(480).unwrap();
        assert_eq!((gray.width, gray.height), (320, 240));
    }
}
