use anyhow::{Context, Result, anyhow};
use eframe::egui;

use school_dash::app::SchoolDashApp;
use school_dash::state::AppState;
use school_dash::ui::fonts;
use school_dash::{AppConfig, load_datasets};

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load().context("loading configuration")?;

    // Both tables are required before anything can be shown.
    let datasets = match load_datasets(&config) {
        Ok(datasets) => datasets,
        Err(e) => {
            log::error!("Failed to load datasets: {e}");
            return Err(e).context("loading school statistics");
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "学校に関するデータ",
        options,
        Box::new(move |cc| {
            fonts::install_cjk_font(&cc.egui_ctx, config.font_path.as_deref());
            Ok(Box::new(SchoolDashApp::new(AppState::new(config, datasets))))
        }),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}
