//! Notes CLI
//!
//! Command-line host for the notes controllers:
//! - List, create, edit and delete notes
//! - Create share links
//! - View a shared note from its link

use clap::{Parser, Subcommand};
use notes_client::api::{HttpNotesApi, NoteChanges, NoteId, NotesApi};
use notes_client::config::{generate_default_config, Config, LoggingConfig};
use notes_client::controllers::{
    render_note_item, ActionOutcome, NotesListController, SharedNoteElements,
    SharedNoteViewController, ViewOutcome, DELETE_CLASS, LOAD_ERROR_ITEM, SHARE_CLASS,
};
use notes_client::escape::unescape_html;
use notes_client::ui::{ClickTarget, MemoryContainer, MemoryElement, MemoryForm, TerminalNotifier};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "notes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage and share notes from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes
    List,

    /// Create a note
    Create {
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Note content
        #[arg(short, long)]
        content: String,
    },

    /// Show a single note
    Show {
        /// Note id
        id: NoteId,
    },

    /// Update a note's title and/or content
    Edit {
        /// Note id
        id: NoteId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: NoteId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Create a share link for a note
    Share {
        /// Note id
        id: NoteId,
    },

    /// View a shared note from its link or path (e.g. /shared/<token>)
    View {
        link: String,
    },

    /// Check that the API is reachable
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let api: Arc<dyn NotesApi> = Arc::new(HttpNotesApi::new(config.api.client_config())?);
    let dates = config.display.date_format();

    let list = MemoryContainer::default();
    let list_controller = |assume_yes: bool| {
        NotesListController::new(
            Arc::clone(&api),
            Arc::new(TerminalNotifier::new(assume_yes)),
            Box::new(list.clone()),
            dates.clone(),
        )
    };

    let code = match cli.command {
        Commands::List => {
            list_controller(false).init().await;
            print!("{}", list.markup());
            if list.markup() == LOAD_ERROR_ITEM {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }

        Commands::Create { title, content } => {
            let controller =
                list_controller(false).with_form(Box::new(MemoryForm::new(&title, &content)));
            let outcome = controller.submit().await;
            report(outcome, &list)
        }

        Commands::Show { id } => match api.get_note(id).await {
            Ok(note) => {
                print!("{}", render_note_item(&note, &dates));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error loading note: {}", e);
                ExitCode::FAILURE
            }
        },

        Commands::Edit { id, title, content } => {
            let outcome = list_controller(false)
                .update_note(id, NoteChanges { title, content })
                .await;
            report(outcome, &list)
        }

        Commands::Delete { id, yes } => {
            let target = ClickTarget::new()
                .class(DELETE_CLASS)
                .data("id", id.to_string());
            let outcome = list_controller(yes).handle_click(&target).await;
            report(outcome, &list)
        }

        Commands::Share { id } => {
            let target = ClickTarget::new()
                .class(SHARE_CLASS)
                .data("id", id.to_string());
            match list_controller(false).handle_click(&target).await {
                ActionOutcome::Completed => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            }
        }

        Commands::View { link } => {
            // Accept a full share URL or a bare path
            let path = reqwest::Url::parse(&link)
                .map(|url| url.path().to_string())
                .unwrap_or(link);

            let title = MemoryElement::default();
            let content = MemoryElement::default();
            let shared_at = MemoryElement::default();

            let controller = SharedNoteViewController::new(
                Arc::clone(&api),
                &path,
                SharedNoteElements {
                    title: Some(Box::new(title.clone())),
                    content: Some(Box::new(content.clone())),
                    shared_at: Some(Box::new(shared_at.clone())),
                },
                dates.clone(),
            );
            let outcome = controller.load().await;

            // Elements hold escaped markup
            println!("{}", unescape_html(&title.content()));
            println!();
            println!("{}", unescape_html(&content.content()));
            let label = unescape_html(&shared_at.content());
            if !label.is_empty() {
                println!();
                println!("{}", label);
            }

            if outcome == ViewOutcome::Loaded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }

        Commands::Status => match api.welcome().await {
            Ok(welcome) => {
                println!("Notes client v{}", env!("CARGO_PKG_VERSION"));
                println!("API: {}", config.api.base_url);
                println!("{}", welcome.message);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Cannot reach Notes API at {}", config.api.base_url);
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },

        Commands::Config { .. } => ExitCode::SUCCESS,
    };

    Ok(code)
}

/// Print the refreshed list after a successful action
fn report(outcome: ActionOutcome, list: &MemoryContainer) -> ExitCode {
    match outcome {
        ActionOutcome::Completed => {
            print!("{}", list.markup());
            ExitCode::SUCCESS
        }
        ActionOutcome::Cancelled => ExitCode::SUCCESS,
        ActionOutcome::Rejected | ActionOutcome::Failed | ActionOutcome::Ignored => {
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    // Logs go to stderr; stdout carries rendered output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "notes_client={level},notes={level}",
            level = config.level
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
