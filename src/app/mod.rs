// src/app/mod.rs: catalog grid + TMDB detail overlay

use std::sync::Arc;
use std::time::Duration;

use eframe::egui as eg;
use tracing::{info, warn};

pub mod catalog;
pub mod data;
pub mod detail;
pub mod filters;
pub mod gfx;
pub mod posters;
pub mod tmdb;
pub mod types;
pub mod ui;
pub mod utils;

pub use catalog::{Catalog, GridLayout};
pub use data::Movie;
pub use detail::DetailPipeline;
pub use types::{DetailRecord, OverlayState};

use crate::config::AppConfig;
use posters::PosterStore;
use tmdb::{MetadataService, TmdbClient, Unavailable};

const IN_FLIGHT_REPAINT_MS: u64 = 100;

pub struct CatalogApp {
    catalog: Catalog,
    detail: DetailPipeline,
    posters: Option<PosterStore>,

    // search inputs (top bar + hero share one string)
    search_query: String,
    focus_search: bool,

    api_key_missing: bool,
    status: String,
}

impl CatalogApp {
    pub fn new(cfg: &AppConfig) -> Self {
        let service: Arc<dyn MetadataService> = match TmdbClient::new(cfg) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("{e}; detail lookups will fail");
                Arc::new(Unavailable(e))
            }
        };
        Self::with_service(cfg, service)
    }

    pub fn with_service(cfg: &AppConfig, service: Arc<dyn MetadataService>) -> Self {
        let posters = match PosterStore::start(
            cfg.poster_workers,
            Duration::from_secs(cfg.request_timeout_secs),
        ) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("{e}; posters disabled");
                None
            }
        };
        if !cfg.has_api_key() {
            warn!(
                "No TMDB API key (set tmdb_api_key in {} or {}); details will show an error",
                crate::config::CONFIG_FILE,
                crate::config::API_KEY_ENV
            );
        }

        let catalog = Catalog::initialize(data::builtin_movies());
        info!("catalog ready with {} movies", catalog.all().len());

        let mut app = Self {
            catalog,
            detail: DetailPipeline::new(service, cfg.tmdb_image_base.clone()),
            posters,
            search_query: String::new(),
            focus_search: false,
            api_key_missing: !cfg.has_api_key(),
            status: String::new(),
        };
        app.run_search();
        app
    }

    pub(crate) fn run_search(&mut self) {
        self.catalog.search(&self.search_query);
        let shown = self.catalog.filtered_indices().len();
        let total = self.catalog.all().len();
        self.status = if shown == total {
            format!("{total} movies")
        } else {
            format!("{shown} of {total} movies")
        };
    }

    /// Hand a title to the detail overlay. Any string is accepted.
    pub fn select_by_title(&mut self, title: &str) {
        self.detail.open(title);
    }

    fn poster_view(&mut self, url: &str) -> types::PosterView {
        match self.posters.as_mut() {
            Some(store) => store.view(url),
            None => types::PosterView::Missing,
        }
    }

    /// `/` jumps to the search field; Escape leaves a text field and closes the overlay.
    fn handle_shortcuts(&mut self, ctx: &eg::Context) {
        let editing = ctx.wants_keyboard_input();
        let (slash, escape) = ctx.input_mut(|i| {
            let slash = !editing && i.consume_key(eg::Modifiers::NONE, eg::Key::Slash);
            if slash {
                i.events
                    .retain(|e| !matches!(e, eg::Event::Text(t) if t.as_str() == "/"));
            }
            (slash, i.key_pressed(eg::Key::Escape))
        });

        if slash {
            self.focus_search = true;
        }
        if escape {
            if editing {
                ctx.memory_mut(|m| {
                    if let Some(id) = m.focused() {
                        m.surrender_focus(id);
                    }
                });
            }
            self.detail.close();
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        if self.detail.poll() {
            ctx.request_repaint();
        }
        if let Some(store) = self.posters.as_mut() {
            store.poll(ctx);
        }

        self.handle_shortcuts(ctx);

        eg::TopBottomPanel::top("topbar").show(ctx, |ui| {
            self.ui_render_topbar(ui);
        });

        eg::CentralPanel::default().show(ctx, |ui| {
            self.ui_render_hero_search(ui);
            ui.add_space(8.0);
            ui.separator();
            self.ui_render_grid(ui);
        });

        self.ui_render_overlay(ctx);

        // Workers don't wake the UI on their own.
        let posters_busy = self.posters.as_ref().is_some_and(|p| p.has_in_flight());
        if self.detail.has_in_flight() || posters_busy {
            ctx.request_repaint_after(Duration::from_millis(IN_FLIGHT_REPAINT_MS));
        }
    }
}
