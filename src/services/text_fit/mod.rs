//! Binary-search font sizing.
//!
//! Finds the largest integer font size at which every element of a set fits
//! the usable width of its container, then applies that single size to all
//! of them.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_FONT_SIZE: u32 = 1;
pub const DEFAULT_MAX_FONT_SIZE: u32 = 200;
pub const DEFAULT_CONTAINER_PADDING: f32 = 32.0;

/// A piece of text whose rendered width depends on its font size.
///
/// Measuring may change the element's rendered size (the same way a DOM
/// probe does), so the fitter always re-applies the winning size at the end.
pub trait FitElement {
    /// Renders the element at `font_size_px` and returns its width.
    fn measured_width(&mut self, font_size_px: u32) -> f32;

    fn apply_font_size(&mut self, font_size_px: u32);
}

/// Bounds of the search domain and the container padding to discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub min_size: u32,
    pub max_size: u32,
    pub padding: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_FONT_SIZE,
            max_size: DEFAULT_MAX_FONT_SIZE,
            padding: DEFAULT_CONTAINER_PADDING,
        }
    }
}

impl FitOptions {
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_range(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }
}

/// Returns the largest size in `[min_size, max_size]` at which every element
/// fits `container_width - padding`, and applies it to all elements.
///
/// Degenerate inputs (no elements, no usable width) return `min_size`. When
/// not even `min_size` fits, `min_size` is still returned.
pub fn fit_text<E: FitElement>(
    container_width: f32,
    elements: &mut [E],
    options: &FitOptions,
) -> u32 {
    let usable_width = container_width - options.padding;
    if elements.is_empty() || usable_width <= 0.0 {
        log::debug!(
            "Text fit skipped (elements={}, usable_width={}); using min size {}",
            elements.len(),
            usable_width,
            options.min_size
        );
        return options.min_size;
    }

    let size = elements
        .iter_mut()
        .map(|element| largest_fitting_size(element, usable_width, options))
        .min()
        .unwrap_or(options.min_size);

    // Probes leave each element at whatever size was measured last.
    for element in elements.iter_mut() {
        element.apply_font_size(size);
    }

    log::debug!(
        "Fitted {} element(s) into {:.1}px at {}px",
        elements.len(),
        usable_width,
        size
    );
    size
}

fn largest_fitting_size<E: FitElement>(element: &mut E, usable_width: f32, options: &FitOptions) -> u32 {
    let mut min = i64::from(options.min_size);
    let mut max = i64::from(options.max_size);
    let mut optimal = options.min_size;

    while min <= max {
        let mid = (min + max) / 2;
        // mid stays within [min_size, max_size], so it always fits in a u32.
        let probe = mid as u32;
        if element.measured_width(probe) <= usable_width {
            optimal = probe;
            min = mid + 1;
        } else {
            max = mid - 1;
        }
    }

    optimal
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Width grows linearly with the font size; records every probe.
    struct LinearText {
        px_per_size: f32,
        probes: Vec<u32>,
        applied: Option<u32>,
    }

    impl LinearText {
        fn new(px_per_size: f32) -> Self {
            Self {
                px_per_size,
                probes: Vec::new(),
                applied: None,
            }
        }
    }

    impl FitElement for LinearText {
        fn measured_width(&mut self, font_size_px: u32) -> f32 {
            self.probes.push(font_size_px);
            self.applied = Some(font_size_px);
            font_size_px as f32 * self.px_per_size
        }

        fn apply_font_size(&mut self, font_size_px: u32) {
            self.applied = Some(font_size_px);
        }
    }

    fn no_padding(min: u32, max: u32) -> FitOptions {
        FitOptions::default().with_range(min, max).with_padding(0.0)
    }

    #[test]
    fn test_smallest_per_element_optimum_wins() {
        let mut elements = vec![LinearText::new(10.0), LinearText::new(6.0)];
        let size = fit_text(100.0, &mut elements, &no_padding(1, 50));
        assert_eq!(size, 10);
    }

    #[test]
    fn test_winning_size_is_reapplied_after_probing() {
        let mut elements = vec![LinearText::new(10.0), LinearText::new(6.0)];
        let size = fit_text(100.0, &mut elements, &no_padding(1, 50));

        // The wide element's last probe is not the optimum.
        assert_ne!(elements[1].probes.last().copied(), Some(size));
        assert!(elements.iter().all(|element| element.applied == Some(size)));
    }

    #[test]
    fn test_padding_is_subtracted_from_container() {
        let mut elements = vec![LinearText::new(1.0)];
        let size = fit_text(132.0, &mut elements, &FitOptions::default());
        assert_eq!(size, 100);
    }

    #[test]
    fn test_empty_elements_return_min_size() {
        let mut elements: Vec<LinearText> = Vec::new();
        assert_eq!(fit_text(500.0, &mut elements, &no_padding(4, 50)), 4);
    }

    #[test]
    fn test_non_positive_usable_width_returns_min_size() {
        let mut elements = vec![LinearText::new(1.0)];
        assert_eq!(fit_text(20.0, &mut elements, &FitOptions::default()), 1);
        assert!(elements[0].probes.is_empty());
    }

    #[test]
    fn test_nothing_fits_returns_min_size() {
        let mut elements = vec![LinearText::new(1000.0)];
        assert_eq!(fit_text(100.0, &mut elements, &no_padding(3, 50)), 3);
        assert_eq!(elements[0].applied, Some(3));
    }

    #[test]
    fn test_everything_fits_returns_max_size() {
        let mut elements = vec![LinearText::new(0.5)];
        assert_eq!(fit_text(1000.0, &mut elements, &no_padding(1, 200)), 200);
    }

    #[test]
    fn test_search_is_logarithmic() {
        let mut elements = vec![LinearText::new(3.0)];
        fit_text(400.0, &mut elements, &no_padding(1, 200));
        // ceil(log2(200)) + 1
        assert!(elements[0].probes.len() <= 9, "probes: {:?}", elements[0].probes);
    }

    #[test]
    fn test_inverted_range_returns_min_without_probing() {
        let mut elements = vec![LinearText::new(1.0)];
        assert_eq!(fit_text(100.0, &mut elements, &no_padding(10, 5)), 10);
        assert!(elements[0].probes.is_empty());
    }
}
