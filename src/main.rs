use eframe::NativeOptions;
use locgenai::ai::GeminiClient;
use locgenai::core::Responder;
use locgenai::services::SeedStore;
use locgenai::ui::ChatApp;
use locgenai::{logger, Config};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logger::init();
    log::info!("🚀 LocGenAI starting");

    // egui callbacks spawn onto this runtime
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let config = Config::from_env();
    log::info!("📁 Configuration loaded");

    let seeds = SeedStore::load_or_empty(&config.resolve_seed_path());
    let backend = GeminiClient::new(&config)?;
    if backend.is_configured() {
        log::info!("🤖 Remote models: {} then {}", config.primary_model, config.backup_model);
    } else {
        log::warn!("⚠️ GEMINI_API_KEY not set, answering from seeds and fallbacks only");
    }
    let responder = Arc::new(Responder::from_config(&config, seeds, Arc::new(backend)));

    let app_name = config.app_name.clone();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&app_name)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ChatApp::new(config, responder)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
