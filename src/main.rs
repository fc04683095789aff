use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modalstack::app::App;
use modalstack::cli::{Args, Command};
use modalstack::{config, replay, theme};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("starting modalstack");

    let args = Args::parse();
    let config = config::load()?;

    match args.command() {
        Command::Demo => {
            let theme_name = args.theme.as_deref().unwrap_or(&config.theme.name);
            let theme = theme::theme_from_name(theme_name);
            App::new(&config, theme).run().await?;
        }
        Command::Replay { script, json } => {
            let script = replay::load_script(&script)?;
            let reports = replay::run_script(&script, config.modal.default_shape());
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print!("{}", replay::format_reports(&reports));
            }
        }
    }

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("modalstack").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "modalstack.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
