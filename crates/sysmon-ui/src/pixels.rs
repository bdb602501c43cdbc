use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::raster::Pixmap;

/// Minimum alpha value (0–255) for a pixel to be considered opaque.
///
/// Pixels below this threshold are skipped, leaving the cell untouched.
const ALPHA_THRESHOLD: u8 = 128;

/// Blit a pixmap into a terminal rect using Unicode half-block characters.
///
/// Each terminal cell represents two vertically stacked pixels via the upper
/// half-block character (`▀`). The pixmap is scaled to fill `area` using
/// nearest-neighbour sampling.
pub fn render_pixmap(buf: &mut Buffer, area: Rect, pixmap: &Pixmap) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (src_width, src_height) = (pixmap.width(), pixmap.height());
    if src_width == 0 || src_height == 0 {
        return;
    }

    let cell_w = area.width as u32;
    let cell_h = area.height as u32;
    let pixel_h = cell_h * 2; // two vertical pixels per cell

    for cy in 0..cell_h {
        for cx in 0..cell_w {
            let top_py = (cy * 2 * src_height) / pixel_h;
            let bot_py = ((cy * 2 + 1) * src_height) / pixel_h;
            let px = (cx * src_width) / cell_w;

            let Some(top) = sample_pixel(pixmap.data(), src_width, px, top_py) else {
                continue;
            };
            let Some(bot) = sample_pixel(pixmap.data(), src_width, px, bot_py) else {
                continue;
            };

            let top_opaque = top.3 >= ALPHA_THRESHOLD;
            let bot_opaque = bot.3 >= ALPHA_THRESHOLD;
            if !top_opaque && !bot_opaque {
                continue;
            }

            let x = area.x + cx as u16;
            let y = area.y + cy as u16;
            if let Some(cell) = buf.cell_mut((x, y)) {
                if top_opaque && bot_opaque {
                    cell.set_char('▀');
                    cell.set_fg(Color::Rgb(top.0, top.1, top.2));
                    cell.set_bg(Color::Rgb(bot.0, bot.1, bot.2));
                } else if top_opaque {
                    cell.set_char('▀');
                    cell.set_fg(Color::Rgb(top.0, top.1, top.2));
                    cell.set_bg(Color::Reset);
                } else {
                    cell.set_char('▄');
                    cell.set_fg(Color::Rgb(bot.0, bot.1, bot.2));
                    cell.set_bg(Color::Reset);
                }
            }
        }
    }
}

/// Read an RGBA pixel from row-major data.
///
/// Returns `None` if the computed index overflows or falls outside `data`.
fn sample_pixel(data: &[u8], width: u32, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
    let idx = (y as usize)
        .checked_mul(width as usize)?
        .checked_add(x as usize)?
        .checked_mul(4)?;
    let r = *data.get(idx)?;
    let g = *data.get(idx + 1)?;
    let b = *data.get(idx + 2)?;
    let a = *data.get(idx + 3)?;
    Some((r, g, b, a))
}
