use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use netify::{cli, config, error, types::PendingLogin};
use tokio::sync::Mutex;

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
    /// Authorize with Spotify API
    Auth,

    /// Clear the stored session
    Logout,

    /// Resolve a source playlist and show its preview
    Preview(PreviewOptions),

    #[clap(about = "Transfer a NetEase playlist to Spotify")]
    Transfer(TransferOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewOptions {
    /// NetEase playlist share link
    url: String,

    /// List every enumerated track instead of the first few
    #[clap(long)]
    all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TransferOptions {
    /// NetEase playlist share link
    url: String,

    /// Custom name for the destination playlist
    #[clap(long)]
    name: Option<String>,

    /// Cover image URL for the destination playlist
    #[clap(long)]
    cover_url: Option<String>,

    /// Local JPEG to upload as cover image (wins over --cover-url)
    #[clap(long)]
    cover_file: Option<PathBuf>,

    /// Hard ceiling for the transfer round trip, in minutes
    #[clap(long)]
    timeout_minutes: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PendingLogin>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Preview(opt) => cli::preview(opt.url, opt.all).await,
        Command::Transfer(opt) => {
            cli::transfer(
                opt.url,
                opt.name,
                opt.cover_url,
                opt.cover_file,
                opt.timeout_minutes,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
