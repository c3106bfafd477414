use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use catalyseed_core::AppError;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Measures and draws text onto a canvas.
///
/// The renderer only talks to this trait, so layout logic can be tested
/// with a fixed-advance stub instead of a real font file.
pub trait TextPainter: Send + Sync {
    /// Width in pixels of `text` at the given size.
    fn text_width(&self, size: f32, text: &str) -> u32;

    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        color: Rgba<u8>,
        x: i32,
        y: i32,
        size: f32,
        text: &str,
    );
}

/// [`TextPainter`] backed by a real TTF/OTF font.
pub struct FontPainter {
    font: FontVec,
}

impl FontPainter {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AppError> {
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| AppError::ImageRender(format!("invalid font data: {e}")))?;
        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::ImageRender(format!("cannot read font {}: {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }
}

impl TextPainter for FontPainter {
    fn text_width(&self, size: f32, text: &str) -> u32 {
        let (width, _) = text_size(PxScale::from(size), &self.font, text);
        width
    }

    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        color: Rgba<u8>,
        x: i32,
        y: i32,
        size: f32,
        text: &str,
    ) {
        draw_text_mut(canvas, color, x, y, PxScale::from(size), &self.font, text);
    }
}

/// Greedy word wrap bounded by pixel width and a hard line cap.
///
/// Lines past the cap are dropped, matching the fixed card layout where
/// the title gets two lines and the description three. A single word
/// wider than `max_width` still occupies its own line rather than being
/// split.
pub fn wrap_text(
    painter: &dyn TextPainter,
    text: &str,
    size: f32,
    max_width: u32,
    max_lines: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || painter.text_width(size, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            if lines.len() == max_lines {
                return lines;
            }
        }
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    lines
}

/// First `max_words` words of `text`, with an ellipsis when truncated.
pub fn word_excerpt(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        words.join(" ")
    } else {
        format!("{}...", words[..max_words].join(" "))
    }
}
