//! Detection Routes
//!
//! One POST endpoint per category. Each accepts a multipart `frame`
//! field with an encoded image and an explicit `color` query parameter
//! naming the channel order of the upload (no inference heuristics).

use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::Deserialize;

use detect::{DetectionResult, Detector};
use perception::VideoFrame;

use crate::{ApiError, AppState};

/// Channel order of the uploaded frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Rgb,
    Bgr,
}

/// Query parameters shared by the detection endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DetectQuery {
    #[serde(default)]
    pub color: ColorFormat,
}

/// Pull the `frame` field out of the multipart payload
async fn frame_bytes(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() == Some("frame") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::MissingFrame)
}

/// Decode an uploaded image into an RGB frame
pub fn decode_frame(bytes: &[u8], color: ColorFormat) -> Result<VideoFrame, ApiError> {
    let image = image::load_from_memory(bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
    let mut rgb = image.to_rgb8();
    if color == ColorFormat::Bgr {
        for pixel in rgb.pixels_mut() {
            pixel.0.swap(0, 2);
        }
    }
    let (width, height) = rgb.dimensions();
    VideoFrame::new(rgb.into_raw(), width, height)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn run_detector<D: Detector>(
    detector: &tokio::sync::Mutex<D>,
    params: DetectQuery,
    mut multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    let bytes = frame_bytes(&mut multipart).await?;
    let frame = decode_frame(&bytes, params.color)?;
    let result = detector.lock().await.detect(&frame)?;
    Ok(Json(result))
}

/// Unauthorized access detection
pub async fn access(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetectQuery>,
    multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    run_detector(&state.access, params, multipart).await
}

/// Behavior anomaly detection
pub async fn behavior(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetectQuery>,
    multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    run_detector(&state.behavior, params, multipart).await
}

/// Drowsiness detection
pub async fn drowsiness(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetectQuery>,
    multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    run_detector(&state.drowsiness, params, multipart).await
}

/// Fight detection
pub async fn fight(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetectQuery>,
    multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    run_detector(&state.fight, params, multipart).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn encoded_frame(r: u8, g: u8, b: u8) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(4, 4, Rgb([r, g, b]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_rgb_frame() {
        let frame = decode_frame(&encoded_frame(10, 20, 30), ColorFormat::Rgb).unwrap();
        assert_eq!((frame.width, frame.height), (4, 4));
        assert_eq!(frame.get_pixel(0, 0), Some([10, 20, 30]));
    }

    #[test]
    fn test_decode_bgr_swaps_channels() {
        let frame = decode_frame(&encoded_frame(10, 20, 30), ColorFormat::Bgr).unwrap();
        assert_eq!(frame.get_pixel(0, 0), Some([30, 20, 10]));
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        assert!(matches!(
            decode_frame(b"not an image", ColorFormat::Rgb),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_color_defaults_to_rgb() {
        let query: DetectQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.color, ColorFormat::Rgb);
        let query: DetectQuery = serde_json::from_str("{\"color\":\"bgr\"}").unwrap();
        assert_eq!(query.color, ColorFormat::Bgr);
    }
}
