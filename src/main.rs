use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use apodctl::{cli, config, error};

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
    /// List all stored APODs
    List,

    /// Show details of a stored APOD (YYYY-MM-DD or `today`)
    Details(DateOption),

    /// Fetch a single APOD unless it is already stored (YYYY-MM-DD or `today`)
    #[clap(alias = "fetch-single")]
    Fetch(OptionalDateOption),

    /// Fetch and store every APOD in a date range
    FetchRange(RangeOptions),

    /// Fetch and store `count` random APODs, max 100
    FetchRandom(RandomOptions),

    /// Save the image of a stored APOD
    SaveMedia(DateOption),

    /// Use the saved image of an APOD as desktop background
    SetBg(DateOption),

    /// Generate the default configuration file
    MakeConfiguration,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DateOption {
    date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct OptionalDateOption {
    date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RangeOptions {
    start_date: String,
    end_date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RandomOptions {
    count: u32,
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
        Command::MakeConfiguration => cli::make_configuration().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        command => {
            let config = match config::Config::load().await {
                Ok(config) => config,
                Err(e) => error!("Cannot load configuration. Err: {}", e),
            };
            if let Err(e) = config.prepare().await {
                error!("Cannot prepare archive directories. Err: {}", e);
            }

            run(command, &config).await
        }
    }
}

async fn run(command: Command, config: &config::Config) {
    match command {
        Command::List => cli::list(config).await,
        Command::Details(opt) => cli::details(config, opt.date).await,
        Command::Fetch(opt) => cli::fetch_single(config, opt.date).await,
        Command::FetchRange(opt) => cli::fetch_range(config, opt.start_date, opt.end_date).await,
        Command::FetchRandom(opt) => cli::fetch_random(config, opt.count).await,
        Command::SaveMedia(opt) => cli::save_media(config, opt.date).await,
        Command::SetBg(opt) => cli::set_background(config, opt.date).await,
        Command::MakeConfiguration | Command::Completions(_) => {}
    }
}
