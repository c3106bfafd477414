use std::io::Cursor;
use std::sync::Arc;

use catalyseed_core::constants::{SHARE_CANVAS_HEIGHT, SHARE_CANVAS_WIDTH};
use catalyseed_core::constants::{BRAND_NAME, BRAND_TAGLINE, FOOTER_LINE, FOOTER_SITE_LINE};
use catalyseed_core::AppError;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::resolver::AssetResolver;
use crate::target::ShareTarget;
use crate::text::{word_excerpt, wrap_text, TextPainter};

const CONTENT_PADDING: u32 = 60;
const THUMB_SIZE: u32 = 200;
const THUMB_CORNER_RADIUS: u32 = 15;
const TITLE_SIZE: f32 = 36.0;
const TITLE_LINE_HEIGHT: i32 = 45;
const TITLE_MAX_LINES: usize = 2;
const BODY_SIZE: f32 = 20.0;
const BODY_LINE_HEIGHT: i32 = 25;
const BODY_MAX_LINES: usize = 3;
const EXCERPT_WORDS: usize = 25;

const GRADIENT_STOPS: [(f32, Rgba<u8>); 3] = [
    (0.0, Rgba([0x7c, 0x3a, 0xed, 0xff])),
    (0.5, Rgba([0xa8, 0x55, 0xf7, 0xff])),
    (1.0, Rgba([0xec, 0x48, 0x99, 0xff])),
];
const ACCENT: Rgba<u8> = Rgba([0x7c, 0x3a, 0xed, 0xff]);
const INK: Rgba<u8> = Rgba([0x1f, 0x29, 0x37, 0xff]);
const MUTED: Rgba<u8> = Rgba([0x6b, 0x72, 0x80, 0xff]);

/// A finished share card: encoded PNG plus the suggested download name.
pub struct RenderedShareImage {
    pub file_name: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Renders 1200x630 share cards.
///
/// Assets are resolved asynchronously up front; everything after that is
/// a synchronous drawing pass over an RGBA buffer. A thumbnail that
/// fails to fetch or decode degrades to the branded placeholder instead
/// of failing the render.
pub struct ShareImageRenderer {
    painter: Arc<dyn TextPainter>,
    resolver: Arc<dyn AssetResolver>,
}

impl ShareImageRenderer {
    pub fn new(painter: Arc<dyn TextPainter>, resolver: Arc<dyn AssetResolver>) -> Self {
        Self { painter, resolver }
    }

    pub async fn render(&self, target: &ShareTarget) -> Result<RenderedShareImage, AppError> {
        let thumbnail = self.resolve_thumbnail(target).await;
        let canvas = self.draw(target, thumbnail);

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| AppError::ImageRender(format!("png encode failed: {e}")))?;

        debug!(slug = %target.slug, bytes = png.len(), "rendered share card");
        Ok(RenderedShareImage {
            file_name: target.image_file_name(),
            png,
            width: SHARE_CANVAS_WIDTH,
            height: SHARE_CANVAS_HEIGHT,
        })
    }

    async fn resolve_thumbnail(&self, target: &ShareTarget) -> Option<RgbaImage> {
        let url = target.thumbnail_url.as_deref()?;
        let bytes = match self.resolver.fetch(url).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%url, %error, "thumbnail fetch failed, using placeholder");
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => Some(
                img.resize_to_fill(THUMB_SIZE, THUMB_SIZE, FilterType::CatmullRom)
                    .to_rgba8(),
            ),
            Err(error) => {
                warn!(%url, %error, "thumbnail decode failed, using placeholder");
                None
            }
        }
    }

    fn draw(&self, target: &ShareTarget, thumbnail: Option<RgbaImage>) -> RgbaImage {
        let width = SHARE_CANVAS_WIDTH;
        let height = SHARE_CANVAS_HEIGHT;
        let mut canvas = RgbaImage::new(width, height);

        fill_diagonal_gradient(&mut canvas);
        draw_pattern_overlay(&mut canvas);

        // White content card inset by 40px all round.
        blend_rect(
            &mut canvas,
            40,
            40,
            width - 80,
            height - 80,
            Rgba([0xff, 0xff, 0xff, 0xf2]),
        );

        let painter = self.painter.as_ref();
        let x = CONTENT_PADDING as i32 + 40;
        let mut y = CONTENT_PADDING as i32 + 40;

        // Brand header.
        painter.draw_text(&mut canvas, ACCENT, x, y, 28.0, BRAND_NAME);
        painter.draw_text(&mut canvas, MUTED, x, y + 34, 16.0, BRAND_TAGLINE);
        y += 80;

        // Thumbnail or placeholder, then the text column next to it.
        let thumb_x = x;
        let thumb_y = y;
        match thumbnail {
            Some(thumb) => paste_rounded(&mut canvas, &thumb, thumb_x, thumb_y),
            None => draw_placeholder(&mut canvas, painter, thumb_x, thumb_y),
        }

        let text_x = thumb_x + THUMB_SIZE as i32 + 40;
        let text_width = width as i32 - text_x - (CONTENT_PADDING as i32 + 40);

        let mut line_y = y;
        for line in wrap_text(
            painter,
            &target.title,
            TITLE_SIZE,
            text_width as u32,
            TITLE_MAX_LINES,
        ) {
            painter.draw_text(&mut canvas, INK, text_x, line_y, TITLE_SIZE, &line);
            line_y += TITLE_LINE_HEIGHT;
        }

        painter.draw_text(
            &mut canvas,
            MUTED,
            text_x,
            y + TITLE_MAX_LINES as i32 * TITLE_LINE_HEIGHT + 10,
            18.0,
            &target.subtitle,
        );

        // Description excerpt below both columns.
        y += THUMB_SIZE as i32 + 40;
        let excerpt = word_excerpt(&target.description, EXCERPT_WORDS);
        for line in wrap_text(
            painter,
            &excerpt,
            BODY_SIZE,
            width - 2 * (CONTENT_PADDING + 40),
            BODY_MAX_LINES,
        ) {
            painter.draw_text(&mut canvas, INK, x, y, BODY_SIZE, &line);
            y += BODY_LINE_HEIGHT;
        }
        y += 20;

        // Stats in a two-column grid.
        let col_width = (width as i32 - 2 * x) / 2;
        for (i, stat) in target.stats.iter().enumerate() {
            let col = (i % 2) as i32;
            let row = (i / 2) as i32;
            let sx = x + col * col_width;
            let sy = y + row * BODY_LINE_HEIGHT;
            painter.draw_text(
                &mut canvas,
                MUTED,
                sx,
                sy,
                16.0,
                &format!("{}: {}", stat.label, stat.value),
            );
        }

        // Footer.
        draw_centered(&mut canvas, painter, ACCENT, height as i32 - 80, 18.0, FOOTER_LINE);
        draw_centered(
            &mut canvas,
            painter,
            MUTED,
            height as i32 - 55,
            16.0,
            FOOTER_SITE_LINE,
        );

        // Corner box standing in for a scan code.
        let qr_x = (width - CONTENT_PADDING - 80) as i32;
        let qr_y = (height - 120) as i32;
        blend_rect(&mut canvas, qr_x, qr_y, 80, 80, Rgba([0xf3, 0xf4, 0xf6, 0xff]));
        painter.draw_text(&mut canvas, MUTED, qr_x + 14, qr_y + 24, 12.0, "Scan to");
        painter.draw_text(&mut canvas, MUTED, qr_x + 22, qr_y + 40, 12.0, "View");

        canvas
    }
}

fn gradient_color(t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let (mut lo, mut hi) = (GRADIENT_STOPS[0], GRADIENT_STOPS[1]);
    if t > 0.5 {
        lo = GRADIENT_STOPS[1];
        hi = GRADIENT_STOPS[2];
    }
    let span = hi.0 - lo.0;
    let f = if span == 0.0 { 0.0 } else { (t - lo.0) / span };
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
    Rgba([
        mix(lo.1[0], hi.1[0]),
        mix(lo.1[1], hi.1[1]),
        mix(lo.1[2], hi.1[2]),
        0xff,
    ])
}

fn fill_diagonal_gradient(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let span = (w + h - 2) as f32;
    for y in 0..h {
        for x in 0..w {
            let t = (x + y) as f32 / span;
            canvas.put_pixel(x, y, gradient_color(t));
        }
    }
}

/// Translucent 50px squares on a 100px grid, matching the brand motif.
fn draw_pattern_overlay(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let square = Rgba([0xff, 0xff, 0xff, 0x1a]);
    let mut y = 0;
    while y < h {
        let mut x = 0;
        while x < w {
            blend_rect(canvas, x as i32, y as i32, 50, 50, square);
            x += 100;
        }
        y += 100;
    }
}

/// Source-over blend of a solid color over one pixel.
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let alpha = color[3] as f32 / 255.0;
    let base = canvas.get_pixel(x, y);
    let mix = |c: u8, b: u8| (c as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
    canvas.put_pixel(
        x,
        y,
        Rgba([
            mix(color[0], base[0]),
            mix(color[1], base[1]),
            mix(color[2], base[2]),
            0xff,
        ]),
    );
}

fn blend_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
    let (cw, ch) = canvas.dimensions();
    for dy in 0..height {
        for dx in 0..width {
            let px = x + dx as i32;
            let py = y + dy as i32;
            if px >= 0 && py >= 0 && (px as u32) < cw && (py as u32) < ch {
                blend_pixel(canvas, px as u32, py as u32, color);
            }
        }
    }
}

fn rounded_rect_contains(size: u32, radius: u32, px: u32, py: u32) -> bool {
    let r = radius as i64;
    let max = size as i64 - 1;
    let (x, y) = (px as i64, py as i64);
    // Corner circle centers.
    let cx = if x < r {
        r
    } else if x > max - r {
        max - r
    } else {
        return true;
    };
    let cy = if y < r {
        r
    } else if y > max - r {
        max - r
    } else {
        return true;
    };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Pastes a square thumbnail with rounded corners and an accent border.
fn paste_rounded(canvas: &mut RgbaImage, thumb: &RgbaImage, x: i32, y: i32) {
    let (cw, ch) = canvas.dimensions();
    for py in 0..THUMB_SIZE {
        for px in 0..THUMB_SIZE {
            if !rounded_rect_contains(THUMB_SIZE, THUMB_CORNER_RADIUS, px, py) {
                continue;
            }
            let cx = x + px as i32;
            let cy = y + py as i32;
            if cx < 0 || cy < 0 || cx as u32 >= cw || cy as u32 >= ch {
                continue;
            }
            let on_border = !rounded_rect_contains(
                THUMB_SIZE,
                THUMB_CORNER_RADIUS,
                px.saturating_sub(3).max(3),
                py.saturating_sub(3).max(3),
            ) || px < 3
                || py < 3
                || px >= THUMB_SIZE - 3
                || py >= THUMB_SIZE - 3;
            let color = if on_border {
                ACCENT
            } else {
                *thumb.get_pixel(px.min(thumb.width() - 1), py.min(thumb.height() - 1))
            };
            canvas.put_pixel(cx as u32, cy as u32, color);
        }
    }
}

/// Soft two-tone placeholder with the brand initial, used when no
/// thumbnail is available or it failed to resolve.
fn draw_placeholder(canvas: &mut RgbaImage, painter: &dyn TextPainter, x: i32, y: i32) {
    let top = Rgba([0xf3, 0xe8, 0xff, 0xff]);
    let bottom = Rgba([0xfc, 0xe7, 0xf3, 0xff]);
    let (cw, ch) = canvas.dimensions();
    for py in 0..THUMB_SIZE {
        let f = py as f32 / (THUMB_SIZE - 1) as f32;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
        let row = Rgba([
            mix(top[0], bottom[0]),
            mix(top[1], bottom[1]),
            mix(top[2], bottom[2]),
            0xff,
        ]);
        for px in 0..THUMB_SIZE {
            if !rounded_rect_contains(THUMB_SIZE, THUMB_CORNER_RADIUS, px, py) {
                continue;
            }
            let cx = x + px as i32;
            let cy = y + py as i32;
            if cx >= 0 && cy >= 0 && (cx as u32) < cw && (cy as u32) < ch {
                canvas.put_pixel(cx as u32, cy as u32, row);
            }
        }
    }
    let glyph_width = painter.text_width(96.0, "C") as i32;
    painter.draw_text(
        canvas,
        ACCENT,
        x + (THUMB_SIZE as i32 - glyph_width) / 2,
        y + 50,
        96.0,
        "C",
    );
}

fn draw_centered(
    canvas: &mut RgbaImage,
    painter: &dyn TextPainter,
    color: Rgba<u8>,
    y: i32,
    size: f32,
    text: &str,
) {
    let width = painter.text_width(size, text) as i32;
    let x = (canvas.width() as i32 - width) / 2;
    painter.draw_text(canvas, color, x, y, size, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticAssetResolver;
    use crate::target::fixtures::story;
    use crate::target::Shareable;
    use crate::text::stub::StubPainter;

    fn renderer(resolver: StaticAssetResolver) -> ShareImageRenderer {
        ShareImageRenderer::new(Arc::new(StubPainter { advance: 8 }), Arc::new(resolver))
    }

    fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, color);
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[tokio::test]
    async fn renders_fixed_canvas_size() {
        let target = story().share_target();
        let rendered = renderer(StaticAssetResolver::new())
            .render(&target)
            .await
            .unwrap();
        assert_eq!(rendered.width, 1200);
        assert_eq!(rendered.height, 630);
        assert_eq!(rendered.file_name, "catalyseed-story-greencell-energy.png");

        let decoded = image::load_from_memory(&rendered.png).unwrap();
        assert_eq!(decoded.width(), 1200);
        assert_eq!(decoded.height(), 630);
    }

    #[tokio::test]
    async fn gradient_runs_purple_to_pink() {
        let target = story().share_target();
        let rendered = renderer(StaticAssetResolver::new())
            .render(&target)
            .await
            .unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        let top_left = img.get_pixel(0, 0);
        let bottom_right = img.get_pixel(1199, 629);
        // Pattern squares lighten the corners slightly; hue still holds.
        assert!(top_left[2] > top_left[1], "top-left should lean violet");
        assert!(bottom_right[0] > bottom_right[2], "bottom-right should lean pink");
    }

    #[tokio::test]
    async fn thumbnail_bytes_land_on_canvas() {
        let mut s = story();
        s.product_service_pictures = vec!["https://img.example/p.png".to_string()];
        let target = s.share_target();
        let green = Rgba([0, 200, 0, 255]);
        let resolver =
            StaticAssetResolver::new().insert("https://img.example/p.png", png_bytes(64, 64, green));
        let rendered = renderer(resolver).render(&target).await.unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        // Center of the 200px thumbnail region.
        let px = img.get_pixel(200, 280);
        assert_eq!(px, &green);
    }

    #[tokio::test]
    async fn failed_fetch_degrades_to_placeholder() {
        let mut s = story();
        s.product_service_pictures = vec!["https://img.example/missing.png".to_string()];
        let target = s.share_target();
        let rendered = renderer(StaticAssetResolver::new())
            .render(&target)
            .await
            .unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        // Placeholder top rows are the light lavender tone.
        let px = img.get_pixel(200, 190);
        assert!(px[0] > 0xe0 && px[2] > 0xe0, "expected placeholder tone, got {px:?}");
    }

    #[tokio::test]
    async fn corrupt_thumbnail_bytes_degrade_to_placeholder() {
        let mut s = story();
        s.product_service_pictures = vec!["https://img.example/bad.png".to_string()];
        let target = s.share_target();
        let resolver = StaticAssetResolver::new()
            .insert("https://img.example/bad.png", b"not a png".to_vec());
        let rendered = renderer(resolver).render(&target).await.unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        let px = img.get_pixel(200, 190);
        assert!(px[0] > 0xe0 && px[2] > 0xe0);
    }
}
