use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use mediadex::{
    catalog::{Collection, parse_collection},
    cli, config, error,
    navigation::{ListFilter, SortKey},
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
    /// Decode a catalog URL into its view
    Route(UrlOption),

    /// Show the page behind a catalog URL
    Show(UrlOption),

    /// List a collection
    List(ListArgs),

    /// Open a catalog URL in the web UI
    Open(UrlOption),

    /// Create an entry from a JSON file
    Create(CreateArgs),

    /// Replace an entry with the contents of a JSON file
    Update(UpdateArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Browse the catalog interactively
    Browse(BrowseArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct UrlOption {
    /// Path such as /movie/ABC-123, or a full web UI URL
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[clap(value_parser = parse_collection)]
    collection: Collection,

    /// Case-insensitive search on code, title, cast or name
    #[clap(long)]
    search: Option<String>,

    /// Sort key: date, title or code
    #[clap(long, value_parser = cli::parse_sort_key)]
    sort: Option<SortKey>,

    /// Sort descending
    #[clap(long)]
    desc: bool,

    #[clap(long, default_value_t = 1)]
    page: u32,

    /// Items per page, 0 shows everything
    #[clap(long, default_value_t = 24)]
    per_page: u32,

    /// Movie filter as <type>=<value>, e.g. studio=S1
    #[clap(long, value_parser = cli::parse_filter)]
    filter: Option<ListFilter>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    #[clap(value_parser = parse_collection)]
    collection: Collection,
    file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    #[clap(value_parser = parse_collection)]
    collection: Collection,
    id: String,
    file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    #[clap(value_parser = parse_collection)]
    collection: Collection,
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct BrowseArgs {
    /// URL to start from (defaults to /movies)
    url: Option<String>,
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
        Command::Route(opt) => cli::route(opt.url),
        Command::Show(opt) => cli::show(opt.url).await,
        Command::List(opt) => {
            cli::list(
                opt.collection,
                cli::ListOptions {
                    search: opt.search,
                    sort: opt.sort,
                    desc: opt.desc,
                    page: opt.page,
                    per_page: opt.per_page,
                    filter: opt.filter,
                },
            )
            .await
        }
        Command::Open(opt) => cli::open(opt.url),
        Command::Create(opt) => cli::create(opt.collection, opt.file).await,
        Command::Update(opt) => cli::update(opt.collection, opt.id, opt.file).await,
        Command::Delete(opt) => cli::delete(opt.collection, opt.id).await,
        Command::Browse(opt) => cli::browse(opt.url).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
