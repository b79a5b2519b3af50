// src/main.rs
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = cinegrid::config::load_config();
    let renderer = cfg.renderer.to_eframe();
    info!("renderer={renderer:?} tmdb_api_base={}", cfg.tmdb_api_base);

    let options = eframe::NativeOptions {
        renderer,
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "cinegrid",
        options,
        Box::new(move |_cc| Ok(Box::new(cinegrid::app::CatalogApp::new(&cfg)))),
    ) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try CINEGRID_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
