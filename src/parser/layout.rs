//! Glyph-level text assembly for the tuned extraction mode.
//!
//! `pdf-extract` reports every glyph it draws together with its text matrix.
//! [`GlyphCollector`] records those glyphs in top-left page coordinates, and
//! [`assemble_text`] clusters them into lines (by `top`, within the y
//! tolerance) and words (by horizontal gap, within the x tolerance).

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

use crate::config::TextSettings;

/// A glyph positioned on the page, with `top` measured down from the top edge
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
}

/// [`OutputDev`] that records every glyph of a single page
#[derive(Debug, Default)]
pub struct GlyphCollector {
    page_height: f64,
    glyphs: Vec<Glyph>,
}

impl GlyphCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the recorded glyphs. `None` when the page drew no glyphs.
    pub fn into_text(self, settings: &TextSettings) -> Option<String> {
        if self.glyphs.is_empty() {
            return None;
        }
        Some(assemble_text(&self.glyphs, settings))
    }
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page_height = media_box.ury - media_box.lly;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        // Side of the square with the same area as the transformed font box
        let sx = font_size * trm.m11 + font_size * trm.m21;
        let sy = font_size * trm.m12 + font_size * trm.m22;
        let size = (sx * sy).abs().sqrt();

        let x0 = trm.m31;
        let baseline = self.page_height - trm.m32;

        self.glyphs.push(Glyph {
            text: char.to_string(),
            x0,
            x1: x0 + width * size,
            top: baseline - size,
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Merge glyphs into text: words joined by single spaces, lines by newlines.
pub fn assemble_text(glyphs: &[Glyph], settings: &TextSettings) -> String {
    let kept: Vec<&Glyph> = glyphs
        .iter()
        .filter(|g| settings.keep_blank_chars || !g.text.chars().all(char::is_whitespace))
        .collect();

    cluster_lines(kept, settings.y_tolerance)
        .into_iter()
        .map(|line| line_words(&line, settings.x_tolerance).join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group glyphs whose `top` values chain together within `tolerance`.
fn cluster_lines(mut glyphs: Vec<&Glyph>, tolerance: f64) -> Vec<Vec<&Glyph>> {
    glyphs.sort_by(|a, b| a.top.total_cmp(&b.top));

    let mut lines: Vec<Vec<&Glyph>> = Vec::new();
    let mut last_top = 0.0;
    for glyph in glyphs {
        if lines.is_empty() || !(glyph.top - last_top <= tolerance) {
            lines.push(Vec::new());
        }
        if let Some(line) = lines.last_mut() {
            line.push(glyph);
        }
        last_top = glyph.top;
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    }
    lines
}

/// Split a left-to-right sorted line into words.
fn line_words(line: &[&Glyph], tolerance: f64) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<&Glyph> = None;

    for &glyph in line {
        if let Some(p) = prev {
            if glyph.x0 > p.x1 + tolerance || glyph.x0 < p.x0 {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push_str(expand_ligature(&glyph.text));
        prev = Some(glyph);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn expand_ligature(text: &str) -> &str {
    match text {
        "\u{fb00}" => "ff",
        "\u{fb01}" => "fi",
        "\u{fb02}" => "fl",
        "\u{fb03}" => "ffi",
        "\u{fb04}" => "ffl",
        "\u{fb05}" | "\u{fb06}" => "st",
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lay out `text` as 6-unit-wide glyphs starting at `x`
    fn run_of(text: &str, x: f64, top: f64) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let x0 = x + i as f64 * 6.0;
                Glyph {
                    text: c.to_string(),
                    x0,
                    x1: x0 + 6.0,
                    top,
                }
            })
            .collect()
    }

    #[test]
    fn test_adjacent_glyphs_form_one_word() {
        let glyphs = run_of("Hello", 72.0, 100.0);
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "Hello");
    }

    #[test]
    fn test_blank_glyphs_become_word_breaks() {
        let glyphs = run_of("Hello World", 72.0, 100.0);
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "Hello World");
    }

    #[test]
    fn test_keep_blank_chars() {
        let glyphs = run_of("a  b", 0.0, 0.0);
        let settings = TextSettings {
            keep_blank_chars: true,
            ..TextSettings::tuned()
        };
        assert_eq!(assemble_text(&glyphs, &settings), "a  b");
    }

    #[test]
    fn test_gap_within_tolerance_is_merged() {
        let mut glyphs = run_of("ab", 0.0, 0.0);
        glyphs[1].x0 += 2.0;
        glyphs[1].x1 += 2.0;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "ab");

        glyphs[1].x0 += 0.1;
        glyphs[1].x1 += 0.1;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "a b");
    }

    #[test]
    fn test_two_unit_word_gap_boundary() {
        // `a` spans [0, 6]; `b` starts 1.5 units later, then 2.5 units later
        let mut glyphs = run_of("ab", 0.0, 0.0);
        glyphs[1].x0 = 7.5;
        glyphs[1].x1 = 13.5;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "ab");

        glyphs[1].x0 = 8.5;
        glyphs[1].x1 = 14.5;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "a b");
    }

    #[test]
    fn test_baseline_shift_past_tolerance_starts_new_line() {
        let mut glyphs = run_of("ab", 0.0, 50.0);
        glyphs[1].top += 1.5;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "ab");

        glyphs[1].top += 1.0;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "a\nb");
    }

    #[test]
    fn test_lines_ordered_top_to_bottom() {
        let mut glyphs = run_of("second", 72.0, 130.0);
        glyphs.extend(run_of("first", 72.0, 100.0));
        assert_eq!(
            assemble_text(&glyphs, &TextSettings::tuned()),
            "first\nsecond"
        );
    }

    #[test]
    fn test_small_baseline_jitter_stays_on_line() {
        let mut glyphs = run_of("abc", 0.0, 50.0);
        glyphs[1].top += 1.8;
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "abc");
    }

    #[test]
    fn test_out_of_order_glyphs_sorted_by_x() {
        let mut glyphs = run_of("abc", 0.0, 0.0);
        glyphs.reverse();
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "abc");
    }

    #[test]
    fn test_ligatures_expanded() {
        let glyphs = run_of("\u{fb01}ne", 0.0, 0.0);
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "fine");
    }

    #[test]
    fn test_whitespace_only_page() {
        let glyphs = run_of("   ", 0.0, 0.0);
        assert_eq!(assemble_text(&glyphs, &TextSettings::tuned()), "");
    }

    #[test]
    fn test_empty_collector_yields_none() {
        assert_eq!(GlyphCollector::new().into_text(&TextSettings::tuned()), None);
    }
}
