use anyhow::Result;
use log::LevelFilter;
use std::path::PathBuf;

use iris_cli::cli::build_cli;
use iris_cli::config::PipelineConfig;
use iris_cli::pipeline::run_pipeline;
use iris_cli::report::render_report;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("IRIS_LOG", "error,iris=info"))
        .init();

    let matches = build_cli().get_matches();

    let config_path: Option<&PathBuf> = matches.get_one("config");
    let config = PipelineConfig::from_arguments(config_path, &matches)?;

    if matches.get_flag("print_config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    match config_path {
        Some(path) => log::info!("[Iris] Using config: {:?}", path),
        None => {
            let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
            eprintln!("[Iris] No config file provided; effective config:\n{}", default_json);
        }
    }

    match run_pipeline(&config) {
        Ok(report) => {
            print!("{}", render_report(&report));
            Ok(())
        }
        Err(e) => {
            log::error!("Pipeline failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
