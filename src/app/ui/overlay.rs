// src/app/ui/overlay.rs
use eframe::egui as eg;

use crate::app::types::OverlayState;
use crate::app::utils;

const POSTER_W: f32 = 220.0;
const WINDOW_W: f32 = 640.0;
const CARD_H: f32 = POSTER_W * 1.5 + 80.0;

/// Slot text for the overlay, derived from the pipeline state.
struct Slots<'a> {
    title: &'a str,
    overview: String,
    release: String,
    rating: String,
    genres: String,
    poster: PosterSlot<'a>,
}

enum PosterSlot<'a> {
    Url(&'a str),
    Label(&'static str),
}

fn overlay_slots(state: &OverlayState) -> Option<Slots<'_>> {
    match state {
        OverlayState::Hidden => None,
        OverlayState::Loading { .. } => Some(Slots {
            title: "Loading...",
            overview: "Fetching movie details...".into(),
            release: String::new(),
            rating: String::new(),
            genres: String::new(),
            poster: PosterSlot::Label("Loading..."),
        }),
        OverlayState::Loaded(rec) => Some(Slots {
            title: &rec.title,
            overview: rec.overview.clone(),
            release: rec.release_date.clone(),
            rating: rec.rating_text(),
            genres: rec.genres_text(),
            poster: if utils::is_placeholder_poster(&rec.poster_url) {
                PosterSlot::Label("No Poster Available")
            } else {
                PosterSlot::Url(&rec.poster_url)
            },
        }),
        OverlayState::Errored(msg) => Some(Slots {
            title: "Error Loading Movie",
            overview: format!("Sorry, we couldn't load the movie details. {msg}"),
            release: String::new(),
            rating: String::new(),
            genres: String::new(),
            poster: PosterSlot::Label("Error Loading"),
        }),
    }
}

impl crate::app::CatalogApp {
    pub(crate) fn ui_render_overlay(&mut self, ctx: &eg::Context) {
        let state = self.detail.state().clone();
        let Some(slots) = overlay_slots(&state) else {
            return;
        };

        let poster = match slots.poster {
            PosterSlot::Url(url) => Ok(self.poster_view(url)),
            PosterSlot::Label(label) => Err(label),
        };

        let screen = ctx.screen_rect();
        let card = eg::Rect::from_center_size(
            screen.center(),
            eg::vec2(
                WINDOW_W.min(screen.width() - 32.0),
                CARD_H.min(screen.height() - 32.0),
            ),
        );
        let mut close = false;

        eg::Area::new(eg::Id::new("detail_overlay"))
            .order(eg::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                // Later widgets win hit-tests: backdrop, then the card blocker, then content.
                let backdrop =
                    ui.interact(screen, eg::Id::new("detail_backdrop"), eg::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, eg::Color32::from_black_alpha(170));
                ui.interact(card, eg::Id::new("detail_card"), eg::Sense::click());
                if backdrop.clicked() {
                    close = true;
                }

                ui.allocate_ui_at_rect(card, |ui| {
                    eg::Frame::window(ui.style()).show(ui, |ui| {
                        ui.set_min_size(card.size() - eg::vec2(24.0, 24.0));
                        ui.horizontal(|ui| {
                            ui.heading(slots.title);
                            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                                if ui.button("✕").on_hover_text("Close (Esc)").clicked() {
                                    close = true;
                                }
                            });
                        });
                        ui.separator();

                        ui.horizontal_top(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                eg::vec2(POSTER_W, POSTER_W * 1.5),
                                eg::Sense::hover(),
                            );
                            match &poster {
                                Ok(view) => crate::app::gfx::paint_poster(
                                    ui,
                                    rect,
                                    view,
                                    eg::Id::new("detail_poster_fade"),
                                    "Poster Not Found",
                                ),
                                Err(label) => {
                                    crate::app::gfx::paint_placeholder(ui.painter(), rect, label)
                                }
                            }

                            ui.vertical(|ui| {
                                field(ui, "Release Date", &slots.release);
                                field(ui, "Rating", &slots.rating);
                                field(ui, "Genres", &slots.genres);
                                ui.add_space(8.0);
                                ui.label(eg::RichText::new("Overview").strong());
                                eg::ScrollArea::vertical()
                                    .id_source("detail_overview")
                                    .max_height(POSTER_W * 1.5 - 90.0)
                                    .show(ui, |ui| {
                                        ui.add(eg::Label::new(slots.overview.as_str()).wrap());
                                    });
                            });
                        });
                    });
                });
            });

        if close {
            self.detail.close();
        }
    }
}

fn field(ui: &mut eg::Ui, name: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(eg::RichText::new(format!("{name}:")).strong());
        ui.label(value);
    });
}
