// src/app/ui/topbar.rs
use eframe::egui as eg;

impl crate::app::CatalogApp {
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            ui.strong("cinegrid");
            ui.separator();

            self.ui_search_field(ui, eg::Id::new("topbar_search"), 180.0, "Search…");
            if !self.search_query.is_empty() && ui.small_button("Clear").clicked() {
                self.search_query.clear();
                self.run_search();
            }

            ui.separator();
            ui.label(eg::RichText::new(&self.status).weak());

            if self.api_key_missing {
                ui.separator();
                ui.label(
                    eg::RichText::new("No TMDB API key: details unavailable")
                        .color(eg::Color32::from_rgb(230, 170, 90)),
                )
                .on_hover_text(format!(
                    "Set tmdb_api_key in {} or the {} environment variable.",
                    crate::config::CONFIG_FILE,
                    crate::config::API_KEY_ENV
                ));
            }
        });
    }
}
