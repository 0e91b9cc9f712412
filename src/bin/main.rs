use clap::{Parser, Subcommand};
use hirogeru::config::WorkspaceSettings;
use hirogeru::document::parse_document;
use hirogeru::error::{ExpandError, ExpandResult};
use hirogeru::language::{FiletypeResolver, LanguageRegistry, ParserFactory};
use hirogeru::lsp::{build_service, load_settings};
use hirogeru::selection::expand;
use hirogeru::text::{TextDocument, from_positions, to_positions};
use std::path::{Path, PathBuf};
use tokio::io::{stdin, stdout};
use tower_lsp_server::Server;
use tower_lsp_server::ls_types::{Position, Range};

/// A language server that grows a selection one syntactic step at a time
#[derive(Parser)]
#[command(name = "hirogeru")]
#[command(version)]
#[command(about = "A language server that grows a selection one syntactic step at a time")]
struct Cli {
    /// Read this file instead of the user config (~/.config/hirogeru/hirogeru.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the successive expansions of a selection in a file
    Expand {
        /// The source file to parse
        file: PathBuf,

        /// Selection start as LINE:COLUMN (0-based, UTF-16 columns)
        start: String,

        /// Selection end as LINE:COLUMN; defaults to the start (a caret)
        end: Option<String>,

        /// Stop after this many expansions
        #[arg(long, default_value_t = usize::MAX)]
        steps: usize,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Expand {
            file,
            start,
            end,
            steps,
        }) => {
            let result = parse_position(&start).and_then(|start| {
                let end = match end {
                    Some(end) => parse_position(&end)?,
                    None => start,
                };
                run_expand(
                    cli.config.as_deref(),
                    &file,
                    Range::new(start, end),
                    steps,
                )
            });

            match result {
                Ok(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            let stdin = stdin();
            let stdout = stdout();

            let (service, socket) = build_service(cli.config);
            Server::new(stdin, stdout, socket).serve(service).await;
        }
    }
}

/// Parse `LINE:COLUMN`
fn parse_position(text: &str) -> ExpandResult<Position> {
    let invalid = || ExpandError::out_of_range(format!("expected LINE:COLUMN, got '{}'", text));
    let (line, column) = text.split_once(':').ok_or_else(invalid)?;
    let line = line.trim().parse::<u32>().map_err(|_| invalid())?;
    let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(Position::new(line, column))
}

/// Expand `range` in `file` up to `steps` times, formatting each result as
/// `line:col-line:col`.
fn run_expand(
    user_config: Option<&Path>,
    file: &Path,
    range: Range,
    steps: usize,
) -> ExpandResult<Vec<String>> {
    let root = std::env::current_dir().ok();
    let outcome = load_settings(user_config, root.as_deref(), None);
    for event in &outcome.events {
        log::info!(target: "hirogeru::config", "{}", event.message);
    }
    let settings: WorkspaceSettings = outcome.settings;

    let filetypes = FiletypeResolver::new();
    filetypes.build_from_settings(&settings);
    let language = filetypes
        .resolve(&file.to_string_lossy(), None)
        .ok_or_else(|| {
            ExpandError::unparseable(format!("no language configured for {}", file.display()))
        })?;

    let text = std::fs::read_to_string(file)?;
    let document = TextDocument::new(text, 0);
    let factory = ParserFactory::new(LanguageRegistry::with_bundled());
    let parsed = parse_document(
        &factory,
        &language,
        &settings.kind_map(&language),
        &document,
        None,
    )?;
    if parsed.syntax.has_error() && !settings.allow_error_trees {
        return Err(ExpandError::unparseable(format!(
            "{} contains parse errors",
            file.display()
        )));
    }

    let mut current = from_positions(&document, range)?;
    let mut lines = Vec::new();
    while lines.len() < steps {
        let Some(next) = expand(&parsed.syntax, current, &settings.sibling_groups)? else {
            break;
        };
        let range = to_positions(next, &document)?;
        lines.push(format!(
            "{}:{}-{}:{}",
            range.start.line, range.start.column, range.end.line, range.end.column
        ));
        current = next;
    }
    Ok(lines)
}
