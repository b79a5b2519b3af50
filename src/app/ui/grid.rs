// src/app/ui/grid.rs
use eframe::egui as eg;

use crate::app::GridLayout;

pub const H_SPACING: f32 = 16.0;
pub const V_SPACING: f32 = 20.0;
const TEXT_H: f32 = 44.0;
const MIN_CARD_W: f32 = 110.0;
const MAX_CARD_W: f32 = 200.0;

impl crate::app::CatalogApp {
    pub(crate) fn ui_render_grid(&mut self, ui: &mut eg::Ui) {
        let rows = match self.catalog.layout() {
            GridLayout::Placeholder => {
                self.ui_render_no_results(ui);
                return;
            }
            GridLayout::Rows(rows) => rows.clone(),
        };

        let per_row = crate::app::catalog::MOVIES_PER_ROW as f32;
        let avail = ui.available_width();
        let card_w =
            ((avail - H_SPACING * (per_row - 1.0)) / per_row).clamp(MIN_CARD_W, MAX_CARD_W);
        let card_h = card_w * 1.5 + TEXT_H;
        let used = per_row * card_w + (per_row - 1.0) * H_SPACING;
        let left_pad = ((avail - used) * 0.5).max(0.0);

        let mut clicked: Option<String> = None;

        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for row in &rows {
                    ui.add_space(V_SPACING * 0.5);
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);
                        ui.add_space(left_pad);
                        for &idx in row {
                            if self.ui_movie_card(ui, idx, card_w, card_h) {
                                clicked = self.catalog.movie(idx).map(|m| m.title.clone());
                            }
                        }
                    });
                }
                ui.add_space(V_SPACING);
            });

        if let Some(title) = clicked {
            self.select_by_title(&title);
        }
    }

    /// Paint one card; returns true when clicked.
    fn ui_movie_card(&mut self, ui: &mut eg::Ui, idx: usize, card_w: f32, card_h: f32) -> bool {
        let Some(movie) = self.catalog.movie(idx).cloned() else {
            return false;
        };
        let (rect, resp) = ui.allocate_exact_size(eg::vec2(card_w, card_h), eg::Sense::click());
        if !ui.is_rect_visible(rect) {
            return resp.clicked();
        }

        let poster_rect = eg::Rect::from_min_size(rect.min, eg::vec2(card_w, card_w * 1.5));
        let text_rect =
            eg::Rect::from_min_max(eg::pos2(rect.min.x, poster_rect.max.y + 6.0), rect.max);

        let hovered = resp.hovered();
        let poster_rect = if hovered {
            poster_rect.expand(card_w * 0.025)
        } else {
            poster_rect
        };

        let view = self.poster_view(&movie.poster_url);
        crate::app::gfx::paint_poster(
            ui,
            poster_rect,
            &view,
            eg::Id::new(("poster_fade", idx)),
            "Image not found",
        );
        if hovered {
            ui.painter().rect_stroke(
                poster_rect,
                6.0,
                eg::Stroke::new(1.5, ui.visuals().strong_text_color()),
            );
        }

        let painter = ui.painter_at(text_rect);
        painter.text(
            text_rect.left_top(),
            eg::Align2::LEFT_TOP,
            &movie.title,
            eg::FontId::proportional(14.0),
            ui.visuals().strong_text_color(),
        );
        painter.text(
            text_rect.left_top() + eg::vec2(0.0, 20.0),
            eg::Align2::LEFT_TOP,
            movie.meta_line(),
            eg::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );

        resp.on_hover_cursor(eg::CursorIcon::PointingHand)
            .on_hover_text(movie.title.as_str())
            .clicked()
    }
}
