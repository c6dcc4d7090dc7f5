//! Compositing resolved words onto a square canvas.
//!
//! Words are painted in descending frequency: the sequence is sorted by
//! ascending count and then reversed, so the largest blocks go down first
//! and rarer words paint over them. Blocks may overlap; pixels falling off
//! the canvas are dropped.

use image::{Rgba, RgbaImage};
use tracing::trace;

use crate::config::RenderConfig;
use crate::error::ValidationError;
use crate::resolve::ResolvedWord;

/// Paint order: stable ascending sort by count, then reversed.
///
/// Within equal counts this yields the reverse of the input order.
#[must_use]
pub fn paint_order(words: &[ResolvedWord]) -> Vec<&ResolvedWord> {
    let mut order: Vec<&ResolvedWord> = words.iter().collect();
    order.sort_by_key(|w| w.word.count);
    order.reverse();
    order
}

/// Pixel square covered by one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Jittered center, horizontal.
    pub x: i64,
    /// Jittered center, vertical.
    pub y: i64,
    /// Half the side length.
    pub half_extent: i64,
}

impl Block {
    /// Returns true if the block covers no pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.half_extent == 0
    }
}

/// Renders resolved words.
#[derive(Debug, Clone)]
pub struct Compositor {
    config: RenderConfig,
}

/// Counters from one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Blocks painted, empty ones included.
    pub blocks: usize,
    /// Blocks with zero extent.
    pub empty_blocks: usize,
}

impl Compositor {
    /// Creates a compositor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a zero resolution or divisor.
    pub fn new(config: RenderConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Canvas side length.
    #[must_use]
    pub const fn resolution(&self) -> u32 {
        self.config.resolution
    }

    /// Where and how large `word`'s block is.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn block(&self, word: &ResolvedWord) -> Block {
        let half_extent = i64::from(word.word.count / self.config.block_divisor);
        let (x, y) = word.coordinate.to_pixel(self.config.resolution);
        let jitter = (word.word.position_signal as f64).sqrt() as i64;
        Block {
            x: x.saturating_add(jitter),
            y: y.saturating_add(jitter),
            half_extent,
        }
    }

    /// Paints every word onto a fresh, fully transparent canvas.
    #[must_use]
    pub fn render(&self, words: &[ResolvedWord]) -> (RgbaImage, PaintStats) {
        let dim = self.config.resolution;
        let mut canvas = RgbaImage::new(dim, dim);
        let mut stats = PaintStats::default();

        for word in paint_order(words) {
            let block = self.block(word);
            stats.blocks += 1;
            if block.is_empty() {
                stats.empty_blocks += 1;
                continue;
            }
            trace!(
                word = %word.word.word,
                x = block.x,
                y = block.y,
                half_extent = block.half_extent,
                "painting block"
            );
            fill(&mut canvas, block, Rgba(word.color.rgba()));
        }

        (canvas, stats)
    }
}

// Covers [x - h, x + h) on both axes, clipped to the canvas.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill(canvas: &mut RgbaImage, block: Block, color: Rgba<u8>) {
    let dim = i64::from(canvas.width());
    let clip = |lo: i64, hi: i64| (lo.clamp(0, dim), hi.clamp(0, dim));
    let h = block.half_extent;
    let (x0, x1) = clip(block.x.saturating_sub(h), block.x.saturating_add(h));
    let (y0, y1) = clip(block.y.saturating_sub(h), block.y.saturating_add(h));

    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}
