//! Scrollbar rendering
//!
//! One-character-wide scrollbar with a filled track and solid thumb, drawn
//! straight into the buffer. Callers gate it behind the fade state; the
//! track area must still be cleared every frame so no stale glyphs remain
//! after the bar fades out.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Render a vertical scrollbar into `area` (expected width 1).
///
/// `offset`/`total`/`visible` are in rows. The area is always cleared
/// first: without that, old thumb cells linger when the bar disappears.
pub fn render_scrollbar(
    buf: &mut Buffer,
    area: Rect,
    offset: usize,
    total: usize,
    visible: usize,
    thumb_color: Color,
    track_color: Color,
) {
    for y in 0..area.height {
        if let Some(cell) = buf.cell_mut((area.x, area.y + y)) {
            cell.set_char(' ');
            cell.set_fg(Color::Reset);
        }
    }

    // No track or thumb when everything fits
    if total <= visible || area.height == 0 {
        return;
    }

    let height = area.height as usize;

    // Thumb size proportional to the visible share, minimum 2 for visibility
    let thumb_size = ((visible as f32 / total as f32) * height as f32)
        .max(2.0)
        .min(height as f32)
        .round() as usize;

    let max_offset = total.saturating_sub(visible);
    let thumb_pos = if max_offset > 0 {
        ((offset as f32 / max_offset as f32) * height.saturating_sub(thumb_size) as f32).round()
            as usize
    } else {
        0
    };

    for y in 0..height {
        let is_thumb = y >= thumb_pos && y < thumb_pos + thumb_size;
        let (ch, color) = if is_thumb {
            ('█', thumb_color)
        } else {
            ('░', track_color)
        };
        if let Some(cell) = buf.cell_mut((area.x, area.y + y as u16)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}
