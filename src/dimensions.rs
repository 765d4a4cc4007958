//! Aspect-ratio-constrained dimension calculations.
//!
//! Two clamps are used by the editor integration:
//!
//! - [`fit_width`] sizes previews and thumbnails against a single width bound.
//! - [`fit_box`] sizes gallery images against a width and height bound.
//!
//! Both are total: zero inputs pass through unchanged and results are
//! truncated toward zero.

use serde::{Deserialize, Serialize};

/// A pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when neither side is known.
    pub const fn is_unknown(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Scale `natural` down so its width does not exceed `bound_width`.
///
/// Never upscales. A zero natural width or zero bound means no scaling is
/// possible and `natural` is returned as is.
///
/// # Examples
///
/// ```
/// use mediabridge::dimensions::{fit_width, Dimensions};
///
/// let preview = fit_width(Dimensions::new(4000, 3000), 800);
/// assert_eq!(preview, Dimensions::new(800, 600));
///
/// let small = fit_width(Dimensions::new(640, 480), 800);
/// assert_eq!(small, Dimensions::new(640, 480));
/// ```
pub fn fit_width(natural: Dimensions, bound_width: u32) -> Dimensions {
    if natural.width == 0 || bound_width == 0 || natural.width <= bound_width {
        return natural;
    }

    // Integer arithmetic keeps the truncation exact (4000x3000 -> 800x600).
    let height = u64::from(natural.height) * u64::from(bound_width) / u64::from(natural.width);
    Dimensions {
        width: bound_width,
        height: height as u32,
    }
}

/// Fit `natural` inside a `max_width` x `max_height` box using the gallery's
/// two-pass correction.
///
/// The correction factor is the box's own ratio (the smaller of `w/h` and
/// `h/w`), not the image's. The width pass runs first; the height pass runs
/// on its output and recomputes the width from the unclamped height, so a very
/// tall image can come out wider than `max_width`. Layouts built on this
/// output depend on that behavior.
///
/// # Examples
///
/// ```
/// use mediabridge::dimensions::{fit_box, Dimensions};
///
/// let fitted = fit_box(Dimensions::new(3840, 2160), 1920, 1080);
/// assert_eq!(fitted, Dimensions::new(1920, 1080));
/// ```
pub fn fit_box(natural: Dimensions, max_width: u32, max_height: u32) -> Dimensions {
    if max_width == 0 || max_height == 0 {
        return natural;
    }

    let (max_w, max_h) = (f64::from(max_width), f64::from(max_height));
    let ratio = (max_w / max_h).min(max_h / max_w);

    let mut width = f64::from(natural.width);
    let mut height = f64::from(natural.height);

    if width > max_w {
        width = max_w;
        height = width * ratio;
    }

    if height > max_h {
        width = height * ratio;
        height = max_h;
    }

    Dimensions {
        width: width as u32,
        height: height as u32,
    }
}
