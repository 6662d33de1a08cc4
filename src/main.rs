mod app;
mod dataset;
mod util;

use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding dataset documents: repos_graph.json plus one
    /// <scope>.json per repository.
    #[arg(long, default_value = "./graphs")]
    graphs_dir: String,

    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let _ = TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "repo-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::AtlasApp::new(cc, args.graphs_dir.clone())))),
    )
}
