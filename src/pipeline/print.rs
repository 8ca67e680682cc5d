//! Print-to-PDF parameters.
//!
//! Paper is US Letter in inches, the unit the DevTools `Page.printToPDF`
//! command expects. Backgrounds are always printed so coloured table cells
//! and banner images survive. Margins stay at the browser default.

use headless_chrome::types::PrintToPdfOptions;

/// Paper width in inches.
pub const PAPER_WIDTH_IN: f64 = 8.5;

/// Paper height in inches.
pub const PAPER_HEIGHT_IN: f64 = 11.0;

/// The options passed to every print call.
pub fn print_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(PAPER_WIDTH_IN),
        paper_height: Some(PAPER_HEIGHT_IN),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_with_backgrounds() {
        let opts = print_options();
        assert_eq!(opts.print_background, Some(true));
        assert_eq!(opts.paper_width, Some(8.5));
        assert_eq!(opts.paper_height, Some(11.0));
    }

    #[test]
    fn layout_is_left_to_the_browser() {
        let opts = print_options();
        assert!(opts.landscape.is_none());
        assert!(opts.scale.is_none());
        assert!(opts.margin_top.is_none());
        assert!(opts.margin_bottom.is_none());
        assert!(opts.page_ranges.is_none());
    }
}
