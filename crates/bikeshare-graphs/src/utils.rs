//! Graph utility functions and helpers.

use bikeshare_common::{parse_hex_color, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Headroom added above the tallest value on the y axis.
const Y_PADDING: f64 = 1.1;

/// Width of the marker drawn before each legend label.
const LEGEND_MARK_WIDTH: i32 = 20;
/// Gap between a legend marker and its label.
const LEGEND_GAP: i32 = 8;
/// Gap between two legend entries.
const LEGEND_SPACING: i32 = 28;

/// Marker drawn before a legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMark {
    /// Filled square, for bar series
    Swatch,
    /// Short stroke, for line series
    Line,
}

/// Utility functions for graph generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Parses `#RRGGBB`, falling back to black.
    pub fn parse_color(color: &str) -> RGBColor {
        Self::parse_color_or(color, RGBColor(0, 0, 0))
    }

    /// Parses `#RRGGBB`, falling back to `fallback`.
    pub fn parse_color_or(color: &str, fallback: RGBColor) -> RGBColor {
        parse_hex_color(color).map_or(fallback, |(r, g, b)| RGBColor(r, g, b))
    }

    /// Upper y bound for a chart whose largest value is `max`.
    ///
    /// Empty, zero or non-finite maxima still give a drawable `0..1` axis.
    pub fn y_upper_bound(max: f64) -> f64 {
        if max.is_finite() && max > 0.0 {
            max * Y_PADDING
        } else {
            1.0
        }
    }

    /// Last index of a categorical axis holding `len` entries.
    ///
    /// Integer coordinates are inclusive, so `0..=last` has `last + 1` slots;
    /// at least two slots are kept so the axis never collapses.
    pub fn category_axis_end(len: usize) -> usize {
        len.max(2) - 1
    }

    /// Splits `root` into the chart area and a legend strip of `height` pixels below it.
    pub fn split_legend_strip<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        height: u32,
    ) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
        let (_, total) = root.dim_in_pixel();
        root.split_vertically(total.saturating_sub(height))
    }

    /// Estimated pixel width of one legend entry, marker included.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn legend_entry_width(label: &str, font_size: u32) -> i32 {
        let text = label.chars().count() as i32 * (font_size as i32 * 3 / 5);
        LEGEND_MARK_WIDTH + LEGEND_GAP + text
    }

    /// Draws `entries` in one row, centred in `strip`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn draw_legend<DB>(
        strip: &DrawingArea<DB, Shift>,
        entries: &[(&str, RGBColor)],
        mark: LegendMark,
        font: (&str, u32),
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (width, height) = strip.dim_in_pixel();
        let widths: Vec<i32> = entries
            .iter()
            .map(|(label, _)| Self::legend_entry_width(label, font.1))
            .collect();
        let gaps = LEGEND_SPACING * (widths.len() as i32 - 1).max(0);
        let row_width = widths.iter().sum::<i32>() + gaps;

        let mut x = (width as i32 - row_width).max(0) / 2;
        let y = height as i32 / 2;
        let text_style = TextStyle::from(font).pos(Pos::new(HPos::Left, VPos::Center));
        for ((label, color), entry_width) in entries.iter().zip(widths) {
            match mark {
                LegendMark::Swatch => strip.draw(&Rectangle::new(
                    [(x, y - 6), (x + LEGEND_MARK_WIDTH, y + 6)],
                    color.filled(),
                ))?,
                LegendMark::Line => strip.draw(&PathElement::new(
                    vec![(x, y), (x + LEGEND_MARK_WIDTH, y)],
                    color.stroke_width(3),
                ))?,
            }
            strip.draw(&Text::new(
                *label,
                (x + LEGEND_MARK_WIDTH + LEGEND_GAP, y),
                text_style.clone(),
            ))?;
            x += entry_width + LEGEND_SPACING;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Baseline `y` of the SVG text element holding exactly `label`.
    pub(crate) fn text_y(svg: &str, label: &str) -> Option<i32> {
        let end = svg.find(&format!(">{label}</text>"))?;
        let start = svg[..end].rfind("<text")?;
        let y = svg[start..end].split(" y=\"").nth(1)?;
        y.split('"').next()?.parse().ok()
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(GraphUtils::parse_color("#E66F4E"), RGBColor(230, 111, 78));
        assert_eq!(GraphUtils::parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(
            GraphUtils::parse_color_or("#12", RGBColor(1, 2, 3)),
            RGBColor(1, 2, 3)
        );
    }

    #[test]
    fn test_y_upper_bound() {
        assert!((GraphUtils::y_upper_bound(100.0) - 110.0).abs() < 1e-9);
        assert!((GraphUtils::y_upper_bound(0.0) - 1.0).abs() < f64::EPSILON);
        assert!((GraphUtils::y_upper_bound(f64::NAN) - 1.0).abs() < f64::EPSILON);
        assert!((GraphUtils::y_upper_bound(f64::NEG_INFINITY) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_axis_end() {
        assert_eq!(GraphUtils::category_axis_end(0), 1);
        assert_eq!(GraphUtils::category_axis_end(1), 1);
        assert_eq!(GraphUtils::category_axis_end(7), 6);
        assert_eq!(GraphUtils::category_axis_end(12), 11);
    }

    #[test]
    fn test_legend_strip_sits_below_chart() {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (400, 300)).into_drawing_area();
            let (chart, strip) = GraphUtils::split_legend_strip(&root, 40);
            assert_eq!(chart.dim_in_pixel(), (400, 260));
            assert_eq!(strip.dim_in_pixel(), (400, 40));

            GraphUtils::draw_legend(
                &strip,
                &[("Casual", RED), ("Registered", BLUE)],
                LegendMark::Swatch,
                ("sans-serif", 14),
            )
            .unwrap();
            root.present().unwrap();
        }
        assert!(text_y(&svg, "Casual").is_some_and(|y| y > 260));
        assert!(text_y(&svg, "Registered").is_some_and(|y| y > 260));
    }

    #[test]
    fn test_legend_entry_width_grows_with_label() {
        let short = GraphUtils::legend_entry_width("Casual", 14);
        let long = GraphUtils::legend_entry_width("Registered", 14);
        assert!(long > short);
        assert_eq!(GraphUtils::legend_entry_width("", 14), LEGEND_MARK_WIDTH + LEGEND_GAP);
    }
}
