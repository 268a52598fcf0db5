//! Dimension limits for packing and readback.
//!
//! [`PackLimits`] defines caps on frame size. [`LimitExceeded`] is returned
//! when a check fails. Checks run before any pixel work, so a rejected call
//! never touches the caller's buffers.

use core::fmt;

/// Dimension limits for pack and readback operations.
///
/// All fields are optional; `None` means no limit for that dimension.
///
/// # Example
///
/// ```
/// use argbpack::PackLimits;
///
/// let limits = PackLimits::none()
///     .with_max_width(1920)
///     .with_max_height(1080);
/// assert!(limits.check_dimensions(1280, 720).is_ok());
/// assert!(limits.check_dimensions(3840, 2160).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct PackLimits {
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum frame width in pixels.
    pub max_width: Option<u32>,
    /// Maximum frame height in pixels.
    pub max_height: Option<u32>,
}

impl PackLimits {
    /// No limits (all fields `None`).
    pub const fn none() -> Self {
        Self {
            max_pixels: None,
            max_width: None,
            max_height: None,
        }
    }

    /// Set maximum total pixels.
    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    /// Set maximum frame width in pixels.
    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set maximum frame height in pixels.
    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Whether any limits are set.
    pub fn has_any(&self) -> bool {
        self.max_pixels.is_some() || self.max_width.is_some() || self.max_height.is_some()
    }

    /// Check frame dimensions against `max_width`, `max_height`, and `max_pixels`.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_width
            && width > max
        {
            return Err(LimitExceeded::Width { actual: width, max });
        }
        if let Some(max) = self.max_height
            && height > max
        {
            return Err(LimitExceeded::Height {
                actual: height,
                max,
            });
        }
        if let Some(max) = self.max_pixels {
            let pixels = width as u64 * height as u64;
            if pixels > max {
                return Err(LimitExceeded::Pixels {
                    actual: pixels,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// A configured limit was exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LimitExceeded {
    /// Frame width exceeds `max_width`.
    Width { actual: u32, max: u32 },
    /// Frame height exceeds `max_height`.
    Height { actual: u32, max: u32 },
    /// Pixel count exceeds `max_pixels`.
    Pixels { actual: u64, max: u64 },
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width { actual, max } => write!(f, "width {actual} exceeds limit {max}"),
            Self::Height { actual, max } => write!(f, "height {actual} exceeds limit {max}"),
            Self::Pixels { actual, max } => {
                write!(f, "pixel count {actual} exceeds limit {max}")
            }
        }
    }
}

impl core::error::Error for LimitExceeded {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn default_has_no_limits() {
        let limits = PackLimits::none();
        assert!(!limits.has_any());
        assert_eq!(limits, PackLimits::default());
    }

    #[test]
    fn builder_sets_limits() {
        let limits = PackLimits::none()
            .with_max_pixels(1_000_000)
            .with_max_width(4096);
        assert!(limits.has_any());
        assert_eq!(limits.max_pixels, Some(1_000_000));
        assert_eq!(limits.max_width, Some(4096));
        assert!(limits.max_height.is_none());
    }

    #[test]
    fn check_dimensions_pass() {
        let limits = PackLimits::none()
            .with_max_width(1920)
            .with_max_height(1080)
            .with_max_pixels(2_073_600);
        assert!(limits.check_dimensions(1920, 1080).is_ok());
        assert!(limits.check_dimensions(0, 0).is_ok());
    }

    #[test]
    fn check_dimensions_width() {
        let limits = PackLimits::none().with_max_width(640);
        assert_eq!(
            limits.check_dimensions(641, 1),
            Err(LimitExceeded::Width {
                actual: 641,
                max: 640
            })
        );
    }

    #[test]
    fn check_dimensions_height() {
        let limits = PackLimits::none().with_max_height(480);
        assert_eq!(
            limits.check_dimensions(1, 481),
            Err(LimitExceeded::Height {
                actual: 481,
                max: 480
            })
        );
    }

    #[test]
    fn check_dimensions_pixels() {
        let limits = PackLimits::none().with_max_pixels(100);
        assert!(limits.check_dimensions(10, 10).is_ok());
        assert_eq!(
            limits.check_dimensions(11, 10),
            Err(LimitExceeded::Pixels {
                actual: 110,
                max: 100
            })
        );
    }

    #[test]
    fn pixel_check_does_not_overflow() {
        let limits = PackLimits::none().with_max_pixels(u64::MAX);
        assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn display_messages() {
        let err = LimitExceeded::Pixels { actual: 5, max: 4 };
        assert_eq!(err.to_string(), "pixel count 5 exceeds limit 4");
    }
}
