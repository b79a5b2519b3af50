// src/app/gfx.rs
use eframe::egui::{self as eg, ColorImage, TextureHandle};
use image::imageops::FilterType;

use super::types::{DecodedPoster, PosterView};

pub const POSTER_FADE_SECS: f32 = 0.3;

const CARD_BG: eg::Color32 = eg::Color32::from_rgb(0x37, 0x41, 0x51);
const CARD_FG: eg::Color32 = eg::Color32::from_rgb(0x9C, 0xA3, 0xAF);

/// Upload an RGBA image to a GPU texture. (UI thread only)
pub fn upload_rgba(ctx: &eg::Context, poster: &DecodedPoster, name: &str) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied(
        [poster.width as usize, poster.height as usize],
        &poster.rgba,
    );
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}

/// Decode downloaded bytes and shrink to `max_w` wide, keeping aspect.
pub fn decode_poster(bytes: &[u8], max_w: u32) -> Result<DecodedPoster, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode: {e}"))?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(format!("empty image {w}x{h}"));
    }
    let img = if w > max_w {
        let new_h = ((h as f32) * (max_w as f32 / w as f32)).round().max(1.0) as u32;
        img.resize_exact(max_w, new_h, FilterType::CatmullRom)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    Ok(DecodedPoster {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub fn paint_placeholder(p: &eg::Painter, rect: eg::Rect, label: &str) {
    p.rect_filled(rect, 6.0, CARD_BG);
    if !label.is_empty() {
        p.text(
            rect.center(),
            eg::Align2::CENTER_CENTER,
            label,
            eg::FontId::proportional(12.0),
            CARD_FG,
        );
    }
}

/// Paint a poster into `rect`, fading it in the first time it becomes ready.
pub fn paint_poster(
    ui: &eg::Ui,
    rect: eg::Rect,
    view: &PosterView,
    fade_id: eg::Id,
    missing: &str,
) {
    let ctx = ui.ctx();
    let painter = ui.painter();
    match view {
        PosterView::Ready(tex) => {
            let t = ctx.animate_bool_with_time(fade_id, true, POSTER_FADE_SECS);
            paint_placeholder(painter, rect, "");
            painter.image(
                tex.id(),
                rect,
                eg::Rect::from_min_max(eg::pos2(0.0, 0.0), eg::pos2(1.0, 1.0)),
                eg::Color32::WHITE.gamma_multiply(t),
            );
        }
        PosterView::Loading => {
            ctx.animate_bool_with_time(fade_id, false, POSTER_FADE_SECS);
            paint_placeholder(painter, rect, "");
        }
        PosterView::Missing => paint_placeholder(painter, rect, missing),
    }
}
