use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use world_ranks::api::DEFAULT_BASE_URL;
use world_ranks::render::{describe_options, render_table};
use world_ranks::{Client, Completion, DataSource, Region, SortKey, ViewOptions, ViewSession};
use world_ranks::{build_view, storage};

#[derive(Parser, Debug)]
#[command(
    name = "world-ranks",
    version,
    about = "Rank countries by population or area, filtered by region and status"
)]
struct Cli {
    /// Base URL of the REST Countries API.
    #[arg(long, global = true, env = "WORLD_RANKS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Total request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once, print the ranked table (and optionally save it).
    List(ListArgs),
    /// Interactive mode: change filters and re-rank until `quit`.
    Browse(ViewArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug, Clone)]
struct ViewArgs {
    /// Region: all, americas, antarctic, africa, asia, europe, oceania
    #[arg(short, long, default_value = "all")]
    region: Region,
    /// Only independent countries.
    #[arg(long, default_value_t = false)]
    independent: bool,
    /// Only members of the United Nations.
    #[arg(long, default_value_t = false)]
    un_member: bool,
    /// Sort key (population or area), always descending.
    #[arg(short, long, default_value = "population")]
    sort: SortKey,
    /// Case-insensitive substring of the country name.
    #[arg(short = 'q', long, default_value = "")]
    search: String,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Table width in characters.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

impl ViewArgs {
    fn options(&self) -> ViewOptions {
        ViewOptions {
            region: self.region,
            show_independent_only: self.independent,
            show_un_member_only: self.un_member,
            sort_key: self.sort,
            search_text: self.search.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    view: ViewArgs,
    /// Print only the first N rows.
    #[arg(long)]
    limit: Option<usize>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::with_timeout(&cli.base_url, Duration::from_secs(cli.timeout));
    match cli.cmd {
        Command::List(args) => cmd_list(&client, args),
        Command::Browse(args) => cmd_browse(Arc::new(client), args),
    }
}

fn cmd_list(client: &Client, args: ListArgs) -> Result<()> {
    let options = args.view.options();
    let view = build_view(client, &options, &args.view.locale)?;

    let shown = match args.limit {
        Some(n) => &view[..n.min(view.len())],
        None => &view[..],
    };
    eprintln!("{}", describe_options(&options));
    print!("{}", render_table(shown, args.view.width));
    if shown.len() < view.len() {
        println!("… {} more", view.len() - shown.len());
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&view, path),
            "json" => storage::save_json(&view, path),
            other => anyhow::bail!("unsupported format: {}", other),
        }
        .with_context(|| format!("write {}", path.display()))?;
        eprintln!("Saved {} rows to {}", view.len(), path.display());
    }

    Ok(())
}

const BROWSE_HELP: &str = "\
commands:
  region <all|americas|antarctic|africa|asia|europe|oceania>
  sort <population|area>
  search <text>        (no text clears the search)
  independent          toggle independent-only
  un                   toggle UN-members-only
  show                 print the current list again
  help
  quit";

fn cmd_browse(source: Arc<dyn DataSource>, args: ViewArgs) -> Result<()> {
    let mut session = ViewSession::with_locale(args.options(), args.locale.clone());
    let initial = session.options().clone();
    refresh(&mut session, &source, initial, args.width);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else { break };
        let line = line.context("read stdin")?;
        let (cmd, rest) = match line.trim().split_once(' ') {
            Some((c, r)) => (c.to_string(), r.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        let current = session.options().clone();
        let next = match cmd.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            "show" => {
                print_view(&session, args.width);
                continue;
            }
            "region" => match rest.parse::<Region>() {
                Ok(r) => current.with_region(r),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            "sort" => match rest.parse::<SortKey>() {
                Ok(k) => current.with_sort_key(k),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            "search" => current.with_search(rest),
            "independent" => current.with_independent_only(!current.show_independent_only),
            "un" => current.with_un_member_only(!current.show_un_member_only),
            other => {
                println!("unknown command '{}', try 'help'", other);
                continue;
            }
        };
        refresh(&mut session, &source, next, args.width);
    }
    Ok(())
}

fn refresh(
    session: &mut ViewSession,
    source: &Arc<dyn DataSource>,
    options: ViewOptions,
    width: usize,
) {
    session.request(Arc::clone(source), options);
    match session.wait() {
        Some(Completion::Applied(_)) => print_view(session, width),
        Some(Completion::Failed(e)) => {
            println!("{}", e);
            println!("(showing previous list)");
        }
        Some(Completion::Stale) | None => {}
    }
}

fn print_view(session: &ViewSession, width: usize) {
    println!("{}", describe_options(session.options()));
    print!("{}", render_table(session.countries(), width));
}
