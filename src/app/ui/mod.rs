// src/app/ui/mod.rs
pub mod grid;
pub mod overlay;
pub mod topbar;

use eframe::egui as eg;

pub(crate) const HERO_SEARCH_ID: &str = "hero_search";

impl crate::app::CatalogApp {
    /// Single-line search bound to the shared query. Typing filters live; Enter re-runs.
    pub(crate) fn ui_search_field(
        &mut self,
        ui: &mut eg::Ui,
        id: eg::Id,
        width: f32,
        hint: &str,
    ) -> eg::Response {
        let resp = ui.add(
            eg::TextEdit::singleline(&mut self.search_query)
                .id(id)
                .hint_text(hint)
                .desired_width(width),
        );
        let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(eg::Key::Enter));
        if resp.changed() || submitted {
            self.run_search();
        }
        resp
    }

    pub(crate) fn ui_render_hero_search(&mut self, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.heading("Find a movie");
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let field_w = (ui.available_width() * 0.5).clamp(240.0, 560.0);
                let lead = ((ui.available_width() - field_w - 80.0) * 0.5).max(0.0);
                ui.add_space(lead);

                let resp = self.ui_search_field(
                    ui,
                    eg::Id::new(HERO_SEARCH_ID),
                    field_w,
                    "Search by title or year…  ( / )",
                );
                if self.focus_search {
                    resp.request_focus();
                    self.focus_search = false;
                }
                if ui.button("Search").clicked() {
                    self.run_search();
                }
            });
        });
    }

    pub(crate) fn ui_render_no_results(&self, ui: &mut eg::Ui) {
        let muted = eg::Color32::from_rgb(156, 163, 175);
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(eg::RichText::new("No movies found").heading().color(muted));
            ui.label(
                eg::RichText::new("Try searching for a different title or year.").color(muted),
            );
        });
    }
}
