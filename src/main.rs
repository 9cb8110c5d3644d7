use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spot::{Res, cli, config, error};

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
    /// Follow the frequent artists of a music directory on Spotify
    Import(ImportOptions),

    /// List the frequent artists of a music directory
    Scan(ScanOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Directory to scan
    #[clap(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Number of tracks an artist needs before it is followed
    #[clap(short, long, default_value_t = 5)]
    pub threshold: usize,

    /// Search on Spotify but don't follow anyone
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanOptions {
    /// Directory to scan
    #[clap(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Only list artists with at least this many tracks
    #[clap(short, long, default_value_t = 1)]
    pub threshold: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Import(opt) => import(opt).await,
        Command::Scan(opt) => cli::list_artists(&opt.dir, opt.threshold),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}

async fn import(opt: ImportOptions) -> Res<()> {
    // credentials first: no scanning or network traffic without them
    let credentials = config::load_credentials().await.map_err(|e| {
        format!(
            "Cannot load Spotify credentials. Put {} and {} into ~/.spot/config.yaml. Err: {}",
            config::CLIENT_ID_FIELD,
            config::CLIENT_SECRET_FIELD,
            e
        )
    })?;

    cli::import(&credentials, &opt.dir, opt.threshold, opt.dry_run).await
}
