use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_eras::{
    cli,
    config::{self, Settings},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with Spotify in the browser
    Auth,

    /// Forget the stored login
    Logout,

    /// Chart a playlist's tracks by release year and decade
    Analyze(AnalyzeArgs),

    /// Serve the client-credentials playlist proxy
    Proxy,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Playlist id, open.spotify.com link or spotify:playlist: URI
    pub playlist: String,

    /// Fetch through a running proxy instead of logging in (e.g. http://127.0.0.1:3000)
    #[clap(long)]
    pub proxy: Option<String>,

    /// Also write an HTML report to this path
    #[clap(long)]
    pub html: Option<PathBuf>,

    /// Also write the track table as CSV to this path
    #[clap(long)]
    pub csv: Option<PathBuf>,

    /// Number of entries in the top genres and top artists charts
    #[clap(long, default_value_t = 15)]
    pub top: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let (tx, rx) = config::settings_channel();
    tokio::spawn(async move {
        if let Err(e) = config::load_env().await {
            warning!("Cannot load environment: {}", e);
        }
        let _ = tx.send(Some(Settings::from_env()));
    });

    let settings = match config::await_settings(rx, config::READY_TIMEOUT).await {
        Some(settings) => settings,
        None => {
            warning!("Configuration was not ready in time, using defaults.");
            Settings::default()
        }
    };

    match cli.command {
        Command::Auth => cli::auth(&settings).await,
        Command::Logout => cli::logout().await,
        Command::Analyze(args) => {
            cli::analyze(
                &settings,
                cli::AnalyzeOptions {
                    playlist: args.playlist,
                    proxy: args.proxy,
                    html: args.html,
                    csv: args.csv,
                    top: args.top,
                },
            )
            .await
        }
        Command::Proxy => cli::proxy(&settings).await,
        Command::Completions(_) => {}
    }
}
