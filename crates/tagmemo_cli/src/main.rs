//! Command-line front end for the Tagmemo core.
//!
//! # Responsibility
//! - Parse user intents and route them through `MemoStore`.
//! - Render filtered day groups and tag vocabularies as text or JSON.
//!
//! # Invariants
//! - Every edit goes through store operations; the CLI never writes blobs.

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tagmemo_core::db::{open_db, DbError};
use tagmemo_core::{
    all_tags, default_log_level, group_by_day, init_logging, suggest, BlankContentPolicy,
    BlobError, DayGroup, LoggingError, MemoFilter, MemoId, MemoStore, SaveFailureKind,
    SqliteBlobRepository, StoreEvent, StoreOptions,
};

const DEFAULT_DB_FILE_NAME: &str = "tagmemo.sqlite3";

#[derive(Parser)]
#[command(name = "tagmemo")]
#[command(about = "Tagged memos with day-grouped filtering")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Path to the SQLite database file")]
    db: Option<PathBuf>,

    #[arg(long, global = true, help = "Absolute directory for rolling log files")]
    log_dir: Option<String>,

    #[arg(long, global = true, help = "trace|debug|info|warn|error")]
    log_level: Option<String>,

    #[arg(long, global = true, help = "Refuse to add empty or whitespace-only memos")]
    reject_blank: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture a new memo.
    Add { content: String },
    /// Show memos grouped by day, newest day first.
    List(ListArgs),
    /// Show every tag in use.
    Tags,
    /// Suggest existing tags matching a fragment.
    Suggest {
        query: String,
        #[arg(long, help = "Skip tags already on this memo")]
        memo: Option<MemoId>,
    },
    /// Edit one memo.
    Edit(EditArgs),
    /// Delete one memo.
    Delete { id: MemoId },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long = "tag", help = "Require this tag (repeatable)")]
    include: Vec<String>,
    #[arg(long = "exclude", help = "Hide memos with this tag (repeatable)")]
    exclude: Vec<String>,
    #[arg(long, help = "Include secret memos")]
    secret: bool,
    #[arg(long, help = "Hide completed tasks")]
    hide_completed: bool,
    #[arg(long, help = "Print JSON")]
    json: bool,
}

#[derive(Args)]
struct EditArgs {
    id: MemoId,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    secret: Option<bool>,
    #[arg(long)]
    task: Option<bool>,
    #[arg(long)]
    done: Option<bool>,
    #[arg(long = "add-tag")]
    add_tags: Vec<String>,
    #[arg(long = "remove-tag")]
    remove_tags: Vec<String>,
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Blob(BlobError),
    Json(serde_json::Error),
    MemoNotFound(MemoId),
    NotSaved {
        kind: SaveFailureKind,
        reason: String,
    },
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Blob(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::MemoNotFound(id) => write!(f, "memo not found: {id}"),
            Self::NotSaved { kind, reason } => {
                write!(f, "change was not saved ({kind} failed): {reason}")
            }
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Blob(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MemoNotFound(_) | Self::NotSaved { .. } => None,
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<BlobError> for CliError {
    fn from(value: BlobError) -> Self {
        Self::Blob(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

type CliResult<T> = Result<T, CliError>;

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path)?;
    let repo = SqliteBlobRepository::try_new(&conn)?;
    let options = StoreOptions {
        blank_content: if cli.reject_blank {
            BlankContentPolicy::Reject
        } else {
            BlankContentPolicy::Accept
        },
        ..StoreOptions::default()
    };
    let mut store = MemoStore::open(repo, options);

    let failures = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&failures);
    store.subscribe(move |event| {
        if let StoreEvent::SaveFailed { kind, reason } = event {
            sink.borrow_mut().push((*kind, reason.clone()));
        }
    });

    execute(cli.command, &mut store)?;

    let failures = failures.borrow();
    match failures.first() {
        Some((kind, reason)) => Err(CliError::NotSaved {
            kind: *kind,
            reason: reason.clone(),
        }),
        None => Ok(()),
    }
}

fn execute(command: Command, store: &mut MemoStore<SqliteBlobRepository<'_>>) -> CliResult<()> {
    match command {
        Command::Add { content } => match store.add(content) {
            Some(id) => println!("{id}"),
            None => println!("skipped: memo is empty"),
        },
        Command::List(args) => {
            let filter = build_filter(&args);
            let groups = group_by_day(store.memos(), &filter);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print_groups(&groups);
            }
        }
        Command::Tags => {
            for tag in all_tags(store.memos()) {
                println!("{tag}");
            }
        }
        Command::Suggest { query, memo } => {
            let excluding = match memo {
                Some(id) => store
                    .get(id)
                    .map(|memo| memo.tags.clone())
                    .ok_or(CliError::MemoNotFound(id))?,
                None => Vec::new(),
            };
            for tag in suggest(&query, &excluding, &all_tags(store.memos())) {
                println!("{tag}");
            }
        }
        Command::Edit(args) => edit(store, args)?,
        Command::Delete { id } => {
            if !store.delete_by_id(id) {
                return Err(CliError::MemoNotFound(id));
            }
        }
    }
    Ok(())
}

/// Later flags win: `--exclude x` after `--tag x` leaves `x` excluded only.
fn build_filter(args: &ListArgs) -> MemoFilter {
    let mut filter = MemoFilter {
        show_secret: args.secret,
        show_completed_tasks: !args.hide_completed,
        ..MemoFilter::default()
    };
    for raw in &args.include {
        filter.include_typed(raw);
    }
    for raw in &args.exclude {
        filter.exclude_typed(raw);
    }
    filter
}

fn edit(store: &mut MemoStore<SqliteBlobRepository<'_>>, args: EditArgs) -> CliResult<()> {
    let mut draft = store
        .get(args.id)
        .cloned()
        .ok_or(CliError::MemoNotFound(args.id))?;

    if let Some(content) = args.content {
        draft.content = content;
    }
    if let Some(is_secret) = args.secret {
        draft.is_secret = is_secret;
    }
    if let Some(is_task) = args.task {
        draft.is_task = is_task;
    }
    if let Some(is_completed) = args.done {
        draft.is_completed = is_completed;
    }
    for tag in &args.remove_tags {
        draft.remove_tag(tag);
    }
    for tag in &args.add_tags {
        draft.add_tag(tag);
    }

    store.update(draft);
    Ok(())
}

fn print_groups(groups: &[DayGroup<'_>]) {
    for group in groups {
        println!("{}", group.day.format("%Y-%m-%d"));
        for memo in &group.memos {
            let mut markers = String::new();
            if memo.is_secret {
                markers.push_str("[secret] ");
            }
            if memo.is_task {
                markers.push_str(if memo.is_completed { "[x] " } else { "[ ] " });
            }
            let tags: Vec<String> = memo.tags.iter().map(|tag| format!("#{tag}")).collect();
            println!(
                "  {} {}{} {}",
                memo.id,
                markers,
                memo.content.replace('\n', " "),
                tags.join(" ")
            );
        }
    }
}
