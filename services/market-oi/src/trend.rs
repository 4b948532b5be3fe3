//! Trend line smoothing over daily net OI

use crate::error::{OiError, Result};
use std::collections::VecDeque;

/// Default trailing window
pub const TREND_WINDOW: usize = 2;

/// Trailing moving average using VecDeque for efficient FIFO operations
///
/// Emits the raw value until the window fills, then the window mean.
#[derive(Debug, Clone)]
pub struct TrendSmoother {
    window: VecDeque<f64>,
    capacity: usize,
}

impl TrendSmoother {
    /// Create smoother with a fixed window
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(OiError::InvalidWindow(capacity));
        }
        Ok(Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Add value and return the smoothed output for it
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) -> f64 {
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(value);

        if self.window.len() < self.capacity {
            value
        } else {
            self.window.iter().sum::<f64>() / self.capacity as f64
        }
    }

    /// Window size
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values currently in the window, oldest first
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.window.iter().copied().collect()
    }

    /// Clear the window
    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// Smooth daily net OI with the default 2-point trailing average
#[must_use]
pub fn calculate_trend_line(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i < 1 { v } else { (v + values[i - 1]) / 2.0 })
        .collect()
}

/// Smooth daily net OI with an arbitrary trailing window
pub fn calculate_trend_line_with_window(values: &[f64], window: usize) -> Result<Vec<f64>> {
    let mut smoother = TrendSmoother::new(window)?;
    Ok(values.iter().map(|&v| smoother.push(v)).collect())
}
