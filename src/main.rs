use anyhow::Result;
use clap::Parser;
use mvvm_playground::app::App;
use mvvm_playground::cli::{Cli, CliHandler};
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level();

    // Logging comes up before the config is read so loading is traced too.
    if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();
    } else {
        // Log to a file so output does not interfere with the TUI
        let log_dir = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("mvvm-playground");
        std::fs::create_dir_all(&log_dir)?;
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("mvvm-playground.log"))?;

        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .with_max_level(log_level)
            .init();
    }

    let config = cli.load_config()?;
    let config_path = cli.config_path()?;

    // View-model fetches are spawned on the local task set.
    let local = LocalSet::new();

    if let Some(command) = cli.command {
        let handler = CliHandler::new(config, config_path);
        return local.run_until(handler.handle_command(command)).await;
    }

    let mut app = App::new(config);
    local.run_until(app.run()).await
}
