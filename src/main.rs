mod app;
mod ui;

use anyhow::Result;
use app::SheetViewApp;
use clap::Parser;
use eframe::egui;
use sheetview::cli::{self, Cli, Commands};
use sheetview::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(Commands::Export(args)) = cli.command {
        let path = cli::run_export(args)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut state = AppState::new(cli.export_dir);
    state.load(cli::source_for(cli.file).as_ref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sheetview",
        options,
        Box::new(|_cc| Ok(Box::new(SheetViewApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
