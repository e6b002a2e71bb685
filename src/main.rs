mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::NutriPlotApp;
use config::PipelineConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let (data_path, config) = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: nutriplot [data-file] [--preset direct|triangle] [--config <file.json>]");
            std::process::exit(2);
        }
    };

    let mut state = AppState::new(config);
    if let Some(path) = data_path {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NutriPlot – Macronutrient Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(NutriPlotApp::new(state)))),
    )
}

fn parse_args() -> Result<(Option<PathBuf>, PipelineConfig), String> {
    let mut data_path = None;
    let mut config = PipelineConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preset" => {
                let name = args
                    .next()
                    .ok_or_else(|| "--preset needs a name".to_string())?;
                config = match name.as_str() {
                    "direct" => PipelineConfig::direct_compare(),
                    "triangle" => PipelineConfig::macro_triangle(),
                    other => {
                        return Err(format!(
                            "unknown preset '{other}' (expected 'direct' or 'triangle')"
                        ))
                    }
                };
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config needs a file argument".to_string())?;
                config = PipelineConfig::from_json_file(Path::new(&path))
                    .map_err(|e| format!("{e:#}"))?;
            }
            other if data_path.is_none() && !other.starts_with('-') => {
                data_path = Some(PathBuf::from(other));
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    Ok((data_path, config))
}
