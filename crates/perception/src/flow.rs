//! Frame-to-frame motion estimation

use crate::{GrayFrame, PerceptionError};

/// Dense-ish optical flow magnitude between two grayscale frames.
///
/// Implementations report the mean per-pixel displacement magnitude.
/// Two identical frames must yield 0.0.
pub trait FlowEstimator: Send {
    fn mean_magnitude(&self, prev: &GrayFrame, curr: &GrayFrame) -> Result<f64, PerceptionError>;
}

/// Coarse block-matching flow estimator.
///
/// Searches a small displacement neighborhood per block and averages the
/// best-match displacement magnitudes. A denser estimator can be swapped
/// in behind the trait for deployments that need one.
pub struct BlockMatchFlow {
    /// Side length of a matched block, pixels
    block: u32,
    /// Grid stride between sampled blocks, pixels
    stride: u32,
    /// Search radius, pixels
    radius: i32,
    /// Search step within the radius, pixels
    step: i32,
}

impl BlockMatchFlow {
    pub fn new() -> Self {
        Self {
            block: 16,
            stride: 32,
            radius: 6,
            step: 2,
        }
    }

    fn sad(
        prev: &GrayFrame,
        curr: &GrayFrame,
        bx: u32,
        by: u32,
        dx: i32,
        dy: i32,
        block: u32,
    ) -> Option<u64> {
        let cx = bx as i64 + dx as i64;
        let cy = by as i64 + dy as i64;
        if cx < 0
            || cy < 0
            || cx + block as i64 > curr.width as i64
            || cy + block as i64 > curr.height as i64
        {
            return None;
        }
        let (cx, cy) = (cx as u32, cy as u32);

        let mut total = 0u64;
        for row in 0..block {
            let p_off = ((by + row) * prev.width + bx) as usize;
            let c_off = ((cy + row) * curr.width + cx) as usize;
            let p_row = &prev.data[p_off..p_off + block as usize];
            let c_row = &curr.data[c_off..c_off + block as usize];
            for (p, c) in p_row.iter().zip(c_row) {
                total += (*p as i16 - *c as i16).unsigned_abs() as u64;
            }
        }
        Some(total)
    }
}

impl Default for BlockMatchFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEstimator for BlockMatchFlow {
    fn mean_magnitude(&self, prev: &GrayFrame, curr: &GrayFrame) -> Result<f64, PerceptionError> {
        if prev.width != curr.width || prev.height != curr.height {
            return Err(PerceptionError::FrameMismatch {
                prev_width: prev.width,
                prev_height: prev.height,
                curr_width: curr.width,
                curr_height: curr.height,
            });
        }
        if prev.width < self.block || prev.height < self.block {
            return Ok(0.0);
        }

        let mut magnitude_sum = 0.0f64;
        let mut blocks = 0usize;

        let mut by = 0;
        while by + self.block <= prev.height {
            let mut bx = 0;
            while bx + self.block <= prev.width {
                // Zero displacement is the baseline; replaced only on a
                // strictly better match so static frames report no motion.
                let mut best_sad =
                    Self::sad(prev, curr, bx, by, 0, 0, self.block).unwrap_or(u64::MAX);
                let mut best = (0i32, 0i32);

                let mut dy = -self.radius;
                while dy <= self.radius {
                    let mut dx = -self.radius;
                    while dx <= self.radius {
                        if (dx, dy) != (0, 0) {
                            if let Some(sad) =
                                Self::sad(prev, curr, bx, by, dx, dy, self.block)
                            {
                                if sad < best_sad {
                                    best_sad = sad;
                                    best = (dx, dy);
                                }
                            }
                        }
                        dx += self.step;
                    }
                    dy += self.step;
                }

                let (dx, dy) = (best.0 as f64, best.1 as f64);
                magnitude_sum += (dx * dx + dy * dy).sqrt();
                blocks += 1;

                bx += self.stride;
            }
            by += self.stride;
        }

        if blocks == 0 {
            return Ok(0.0);
        }
        Ok(magnitude_sum / blocks as f64)
    }
}
