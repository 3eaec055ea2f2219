use clap::{Parser, Subcommand};
use pokedex_browser::browser_interface::{
    detail_display, legend_display, list_display, parse_browse_command, types_display,
    BrowseCommand,
};
use pokedex_browser::logging::init_logging;
use pokedex_browser::{BrowserConfig, DetailSession, HttpCatalogSource, ListSession, RecordId};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(version, about = "Browse the Tyradex Pokémon index")]
struct Cli {
    /// RON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the API, overriding config and environment
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Pokémon, optionally filtered by type and name
    List {
        #[arg(short = 't', long = "type", default_value = "")]
        type_label: String,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// List the distinct types present in the index
    Types,
    /// Show one Pokémon in detail
    Show { id: RecordId },
    /// Show one Pokémon, then move with n(ext) / p(revious) / q(uit)
    Browse { id: RecordId },
    /// Print the effectiveness color legend
    Legend,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match BrowserConfig::load(cli.config.as_deref(), cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let source = match HttpCatalogSource::new(config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::List { type_label, search } => {
            let mut session = ListSession::new();
            session.set_type_filter(type_label);
            session.set_search(search);
            session.load(&source).await;
            println!("{}", list_display(&session));
        }
        Commands::Types => {
            let mut session = ListSession::new();
            session.load(&source).await;
            print!("{}", types_display(&session));
        }
        Commands::Show { id } => {
            let mut session = DetailSession::new(id);
            session.load(&source, id).await;
            println!("{}", detail_display(&session));
        }
        Commands::Browse { id } => {
            if let Err(e) = browse(&source, id).await {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Legend => print!("{}", legend_display()),
    }

    ExitCode::SUCCESS
}

async fn browse(source: &HttpCatalogSource, id: RecordId) -> std::io::Result<()> {
    let mut session = DetailSession::new(id);
    session.load(source, id).await;
    println!("{}", detail_display(&session));

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        print!("[n]ext / [p]revious / [q]uit > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_browse_command(&line) {
            Ok(BrowseCommand::Quit) => break,
            Ok(BrowseCommand::Move(direction)) => {
                session.step(source, direction).await;
                println!("{}", detail_display(&session));
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
