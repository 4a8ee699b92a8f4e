use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use crate::config::AppConfig;
use crate::error::PlaygroundError;
use crate::keyboard::KeyboardManager;
use crate::mvvm::{InputCommand, OutputBatch, OutputCommand, PagedViewModel, ViewModel};

/// mvvm-playground - unidirectional MVVM demo in the terminal
#[derive(Parser)]
#[command(name = "mvvm-playground")]
#[command(about = "A terminal page view driven by a unidirectional view-model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Simulated fetch delay in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Seed for the color picker (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive the view-model without a terminal and print every output batch as JSON
    Replay(ReplayArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),

    /// List keyboard shortcuts
    Keys,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Actions to send, in order
    #[arg(value_enum, required = true)]
    pub actions: Vec<ReplayAction>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration to the config path
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file when initializing
    #[arg(long)]
    pub force: bool,

    /// Show configuration file location
    #[arg(long)]
    pub path: bool,
}

/// Button taps available to a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplayAction {
    Refresh,
    More,
    Color,
}

impl ReplayAction {
    pub fn input(self) -> InputCommand {
        match self {
            ReplayAction::Refresh => InputCommand::Request(true),
            ReplayAction::More => InputCommand::Request(false),
            ReplayAction::Color => InputCommand::RequestColorChange,
        }
    }
}

impl Cli {
    /// Log level selected by `--debug`
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Path of the configuration file in effect
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(AppConfig::default_path()?),
        }
    }

    /// Load the config file and apply command line overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_or_default(self.config_path()?)?;

        if let Some(delay_ms) = self.delay_ms {
            config.view_model.fetch_delay_ms = delay_ms;
        }
        if let Some(seed) = self.seed {
            config.view_model.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

pub struct CliHandler {
    config: AppConfig,
    config_path: PathBuf,
}

impl CliHandler {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Handle a subcommand. Must run inside a [`tokio::task::LocalSet`].
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Replay(args) => self.handle_replay(args).await,
            Commands::Config(args) => self.handle_config(args),
            Commands::Keys => {
                let manager = KeyboardManager::with_config(self.config.keyboard.clone());
                print!("{}", manager.get_help_text());
                Ok(())
            }
        }
    }

    async fn handle_replay(&self, args: ReplayArgs) -> Result<()> {
        let view_model = PagedViewModel::from_config(&self.config.view_model);
        let wait = self.config.view_model.fetch_delay() + Duration::from_secs(5);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        replay(&view_model, &args.actions, wait, &mut out).await?;
        Ok(())
    }

    fn handle_config(&self, args: ConfigArgs) -> Result<()> {
        if args.path {
            println!("{}", self.config_path.display());
            return Ok(());
        }

        if args.init {
            if self.config_path.exists() && !args.force {
                return Err(anyhow!(
                    "{} already exists (use --force to overwrite)",
                    self.config_path.display()
                ));
            }
            AppConfig::default().save_to_file(&self.config_path)?;
            println!("Wrote default configuration to {}", self.config_path.display());
            return Ok(());
        }

        print!("{}", toml::to_string_pretty(&self.config)?);
        Ok(())
    }
}

/// Send `actions` to `view_model` one at a time, writing each output batch as a JSON line.
///
/// A request is only followed by the next action once its completion batch
/// arrived, so the output order is deterministic. Returns every batch seen.
pub async fn replay<V, W>(
    view_model: &V,
    actions: &[ReplayAction],
    wait: Duration,
    out: &mut W,
) -> Result<Vec<OutputBatch>>
where
    V: ViewModel<Input = InputCommand, Output = OutputBatch>,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    view_model.set_output(Some(std::rc::Rc::new(move |batch: OutputBatch| {
        let _ = tx.send(batch);
    })));

    let mut seen = Vec::new();
    for action in actions {
        tracing::debug!("Replaying {:?}", action);
        view_model.input(action.input());

        loop {
            let batch = timeout(wait, rx.recv())
                .await
                .map_err(|_| anyhow!("Timed out waiting for output after {:?}", action))?
                .ok_or_else(|| anyhow!("View-model output closed"))?;

            serde_json::to_writer(&mut *out, &batch).map_err(PlaygroundError::from)?;
            writeln!(out)?;

            let started_fetch = matches!(batch.first(), Some(OutputCommand::Loading(_)));
            seen.push(batch);
            if !started_fetch {
                break;
            }
        }
    }

    view_model.set_output(None);
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvvm::{Model, SimulatedFetcher};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::task::LocalSet;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from(["mvvm-playground", "--seed", "4", "replay", "refresh", "more", "color"]);
        assert_eq!(cli.seed, Some(4));
        match cli.command {
            Some(Commands::Replay(args)) => assert_eq!(
                args.actions,
                vec![ReplayAction::Refresh, ReplayAction::More, ReplayAction::Color]
            ),
            _ => panic!("expected replay"),
        }
    }

    #[test]
    fn test_replay_requires_actions() {
        assert!(Cli::try_parse_from(["mvvm-playground", "replay"]).is_err());
    }

    #[test]
    fn test_log_level_follows_debug_flag() {
        assert_eq!(Cli::parse_from(["mvvm-playground"]).log_level(), tracing::Level::INFO);
        assert_eq!(
            Cli::parse_from(["mvvm-playground", "keys", "--debug"]).log_level(),
            tracing::Level::DEBUG
        );
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cli = Cli::parse_from([
            "mvvm-playground",
            "--config",
            path.to_str().unwrap(),
            "--delay-ms",
            "10",
            "--seed",
            "8",
        ]);

        let config = cli.load_config().unwrap();
        assert_eq!(config.view_model.fetch_delay_ms, 10);
        assert_eq!(config.view_model.seed, Some(8));
    }

    #[tokio::test]
    async fn test_replay_writes_json_lines() {
        LocalSet::new()
            .run_until(async {
                let vm = PagedViewModel::new(
                    SimulatedFetcher::new(Duration::from_millis(5)),
                    StdRng::seed_from_u64(0),
                );
                let mut out = Vec::new();

                let batches = replay(
                    &vm,
                    &[ReplayAction::Refresh, ReplayAction::More, ReplayAction::Color],
                    Duration::from_secs(2),
                    &mut out,
                )
                .await
                .unwrap();

                assert_eq!(batches.len(), 5);
                assert_eq!(batches[3][1], OutputCommand::Reload(Model::new("数据 页数:2")));
                assert!(matches!(batches[4][0], OutputCommand::ColorChanged(_)));

                let text = String::from_utf8(out).unwrap();
                let lines: Vec<&str> = text.lines().collect();
                assert_eq!(lines.len(), 5);
                assert_eq!(lines[0], r#"[{"kind":"loading","value":"正在刷新"}]"#);
                assert_eq!(
                    lines[1],
                    r#"[{"kind":"loaded","value":"已完成"},{"kind":"reload","value":{"title":"数据 页数:1"}}]"#
                );
                assert!(vm.output().is_none());
            })
            .await;
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_replay_reports_write_failure() {
        LocalSet::new()
            .run_until(async {
                let vm = PagedViewModel::new(
                    SimulatedFetcher::new(Duration::from_millis(5)),
                    StdRng::seed_from_u64(0),
                );

                let err = replay(&vm, &[ReplayAction::Color], Duration::from_secs(2), &mut BrokenPipe)
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<PlaygroundError>(),
                    Some(PlaygroundError::Json(_))
                ));
            })
            .await;
    }
}
