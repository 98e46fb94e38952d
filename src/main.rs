mod app;
mod atelier;
mod catalog;
mod config;
mod error;
mod event;
mod guide;
mod logging;
mod session;
mod theme;
mod ui;

use app::KioskApp;
use config::KioskConfig;
use error::KioskError;
use eframe::egui;
use guide::GuideClient;
use session::store::SessionStore;
use std::sync::mpsc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_path = KioskConfig::default_path();
    let mut config = KioskConfig::load_or_default(&config_path);
    config.merge_with_env();
    tracing::info!(
        path = %config_path.display(),
        model = %config.guide.model,
        guide_configured = config.has_api_key(),
        fullscreen = config.window.fullscreen,
        "configuration loaded"
    );

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("eclat-runtime")
        .build()
        .map_err(KioskError::from)?;

    let guide = GuideClient::new(config.guide.clone(), tx, runtime.handle().clone())
        .map_err(KioskError::from)?;
    let store = SessionStore::new(config.session.max_history_turns);
    let app = KioskApp::new(rx, guide, store);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([1024.0, 640.0])
            .with_fullscreen(config.window.fullscreen),
        ..Default::default()
    };

    eframe::run_native(
        "Éclat",
        native_options,
        Box::new(move |creation_context| {
            app.install(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
