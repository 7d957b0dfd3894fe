// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised before a tile is drawn.

use thiserror::Error;

/// Why a watermark could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatermarkError {
    /// Neither text content nor an image URL was supplied.
    #[error("missing content source: supply non-empty text or an image URL")]
    MissingContent,
    /// The options are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// Measurement produced extents the geometry cannot use.
    #[error("text measurement produced non-finite or negative extents")]
    InvalidExtents,
}

/// A specific out-of-range option.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// `name` is empty; layer ids are derived from it.
    #[error("name must not be empty")]
    EmptyName,
    /// `padding` is below zero.
    #[error("padding must be non-negative, got {0}")]
    NegativePadding(f64),
    /// `padding` is NaN or infinite.
    #[error("padding must be finite, got {0}")]
    NonFinitePadding(f64),
    /// `margin` is below zero.
    #[error("margin must be non-negative, got {0}")]
    NegativeMargin(f64),
    /// `margin` is NaN or infinite.
    #[error("margin must be finite, got {0}")]
    NonFiniteMargin(f64),
    /// `rotation_degrees` is NaN or infinite.
    #[error("rotation must be finite, got {0}")]
    NonFiniteRotation(f64),
    /// `opacity` is outside `[0, 1]`.
    #[error("opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f64),
    /// The font size is not a positive finite number.
    #[error("font size must be positive and finite, got {0}")]
    InvalidFontSize(f64),
    /// The tuning layer was requested outside cover mode.
    #[error("tuning is only supported in cover mode")]
    TuningRequiresCover,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = WatermarkError::from(ConfigError::NegativePadding(-2.0));
        assert_eq!(
            err.to_string(),
            "invalid configuration: padding must be non-negative, got -2"
        );
        assert!(WatermarkError::MissingContent.to_string().contains("image URL"));
    }
}
