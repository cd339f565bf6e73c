//! Share preview rendering.
//!
//! A pure mapping from a stored verdict to a fixed 1200×630 composition for
//! link unfurling: title, emoji, a two-stop background gradient, and the
//! confidence to one decimal place. No model call, no side effects.

use crate::model::Analysis;

pub const PREVIEW_WIDTH: u32 = 1200;
pub const PREVIEW_HEIGHT: u32 = 630;

/// The deterministic composition of one share preview.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePreview {
    pub title: &'static str,
    pub emoji: &'static str,
    /// Gradient stops, top-left to bottom-right
    pub background: (&'static str, &'static str),
    pub confidence_label: String,
}

impl SharePreview {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let (title, emoji, background) = if analysis.is_hot_dog {
            ("HOT DOG", "🌭", ("#16a34a", "#15803d"))
        } else {
            ("NOT HOT DOG", "❌", ("#dc2626", "#b91c1c"))
        };

        SharePreview {
            title,
            emoji,
            background,
            confidence_label: format!("{:.1}% confident", analysis.confidence),
        }
    }

    /// Renders the composition as an SVG document.
    pub fn render_svg(&self) -> String {
        let (from, to) = self.background;
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{from}"/>
      <stop offset="100%" stop-color="{to}"/>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#bg)"/>
  <text x="600" y="280" font-size="180" text-anchor="middle">{emoji}</text>
  <text x="600" y="430" font-family="sans-serif" font-size="96" font-weight="bold" fill="#ffffff" text-anchor="middle">{title}</text>
  <text x="600" y="510" font-family="sans-serif" font-size="48" fill="#ffffff" fill-opacity="0.9" text-anchor="middle">{confidence}</text>
  <text x="600" y="600" font-family="sans-serif" font-size="32" font-weight="600" fill="#ffffff" fill-opacity="0.8" text-anchor="middle">Hot Dog or Not</text>
</svg>
"##,
            w = PREVIEW_WIDTH,
            h = PREVIEW_HEIGHT,
            from = from,
            to = to,
            emoji = self.emoji,
            title = self.title,
            confidence = self.confidence_label,
        )
    }
}
