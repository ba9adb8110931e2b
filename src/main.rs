//! # Brief Assistant CLI (`brief`)
//!
//! Command-line front end for the Brief Assistant API. Every view the web
//! client offered is reachable through `brief open <path>`; the remaining
//! commands expose each API operation directly.
//!
//! ## Usage
//!
//! ```bash
//! brief --config ./config/brief.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `brief open <path>` | Render the view for an app path (`/`, `/brief/new`, `/brief/<id>`) |
//! | `brief dashboard` | List briefs grouped by status |
//! | `brief new --title <T>` | Create a brief |
//! | `brief show <id>` | Show a brief with its sections and documents |
//! | `brief update <id>` | Change title, event type or status |
//! | `brief delete <id>` | Delete a brief |
//! | `brief versions <id>` | List (or `--create`) version snapshots |
//! | `brief export <id>` | Save a PDF/Word export as `brief_<id>.<format>` |
//! | `brief section ...` | Get, create, update, delete sections |
//! | `brief document ...` | List, get, upload, analyze, delete documents |
//! | `brief ai ...` | Generate content, field suggestions, auto-populate |
//! | `brief config` | Print the resolved configuration |
//! | `brief health` | Check the backend is reachable |
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`).

use brief_assistant::commands::{self, parse_key_val};
use brief_assistant::config;
use brief_assistant::http::ApiClient;
use brief_assistant::models::{BriefChanges, BriefStatus};
use brief_assistant::store::BriefStore;
use brief_assistant::views;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brief Assistant CLI: manage event input briefs from the terminal.
#[derive(Parser)]
#[command(
    name = "brief",
    about = "Brief Assistant: manage event input briefs, sections and documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). A missing file means defaults.
    #[arg(long, global = true, default_value = "./config/brief.toml")]
    config: PathBuf,

    /// Hostname the backend URL is derived from when no URL is configured.
    #[arg(long, global = true, default_value = "localhost")]
    host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the view for an application path.
    ///
    /// `/` is the dashboard, `/brief/new` the new-brief view and
    /// `/brief/<id>` the brief editor.
    Open {
        /// Application path.
        path: String,
    },

    /// List briefs grouped by status.
    Dashboard {
        /// Only list briefs with this status (draft, in_progress, completed, archived).
        #[arg(long)]
        status: Option<BriefStatus>,
    },

    /// Create a new brief.
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        event_type: Option<String>,

        /// Metadata as `key=value` pairs.
        #[arg(long = "meta", value_parser = parse_key_val)]
        meta: Vec<(String, String)>,
    },

    /// Show a brief with its sections and documents.
    Show { id: String },

    /// Update a brief's title, event type or status.
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        event_type: Option<String>,

        #[arg(long)]
        status: Option<BriefStatus>,
    },

    /// Delete a brief.
    Delete { id: String },

    /// List version snapshots of a brief.
    Versions {
        id: String,

        /// Snapshot the current state as a new version instead of listing.
        #[arg(long)]
        create: bool,
    },

    /// Export a brief and save it to disk.
    Export {
        id: String,

        /// Export format understood by the backend (`pdf`, `word`).
        #[arg(long)]
        format: Option<String>,

        /// Directory to save the file in.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Manage sections.
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// Manage documents attached to briefs.
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// AI-assisted content.
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },

    /// Print the resolved configuration.
    Config,

    /// Check that the backend answers.
    Health,
}

#[derive(Subcommand)]
enum SectionAction {
    /// Print a section as JSON.
    Get { id: String },
    /// Add a section to a brief.
    Create {
        #[arg(long)]
        brief: String,
        #[arg(long)]
        number: i64,
        #[arg(long)]
        name: String,
        /// Field values as `key=value` pairs.
        #[arg(long = "set", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    /// Set field values on a section.
    Update {
        id: String,
        /// Field values as `key=value` pairs.
        #[arg(long = "set", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    /// Delete a section.
    Delete { id: String },
}

#[derive(Subcommand)]
enum DocumentAction {
    /// List documents attached to a brief.
    List { brief: String },
    /// Print a document as JSON.
    Get { id: String },
    /// Upload a file to a brief.
    Upload {
        #[arg(long)]
        brief: String,
        file: PathBuf,
    },
    /// Analyze a document for one section.
    Analyze {
        id: String,
        #[arg(long)]
        section: String,
    },
    /// Delete a document.
    Delete { id: String },
}

#[derive(Subcommand)]
enum AiAction {
    /// Generate content for a section.
    Generate {
        section: String,
        /// Context as `key=value` pairs.
        #[arg(long = "context", value_parser = parse_key_val)]
        context: Vec<(String, String)>,
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Suggestions for a single field.
    Suggest {
        field: String,
        /// Context as `key=value` pairs.
        #[arg(long = "context", value_parser = parse_key_val)]
        context: Vec<(String, String)>,
    },
    /// Fill a section from the brief's documents.
    AutoPopulate {
        section: String,
        #[arg(long)]
        brief: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    // Commands that don't talk to the backend
    if let Commands::Config = cli.command {
        return commands::run_config(&cfg, &cli.host);
    }

    let api = ApiClient::from_config(&cfg, &cli.host)?;
    let store = BriefStore::new(api.clone());

    match cli.command {
        Commands::Open { path } => views::run_open(&store, &path).await?,
        Commands::Dashboard { status } => commands::run_dashboard(&store, status).await?,
        Commands::New {
            title,
            event_type,
            meta,
        } => commands::run_new(&store, title, event_type, meta).await?,
        Commands::Show { id } => views::run_open(&store, &format!("/brief/{}", id)).await?,
        Commands::Update {
            id,
            title,
            event_type,
            status,
        } => {
            let changes = BriefChanges {
                title,
                event_type,
                status,
                metadata: None,
            };
            commands::run_update(&store, &id, changes).await?
        }
        Commands::Delete { id } => commands::run_delete(&store, &id).await?,
        Commands::Versions { id, create } => commands::run_versions(&api, &id, create).await?,
        Commands::Export { id, format, out } => {
            commands::run_export(&store, &id, format.as_deref(), &out).await?
        }
        Commands::Section { action } => match action {
            SectionAction::Get { id } => commands::run_section_get(&api, &id).await?,
            SectionAction::Create {
                brief,
                number,
                name,
                fields,
            } => commands::run_section_create(&api, &brief, number, name, fields).await?,
            SectionAction::Update { id, fields } => {
                commands::run_section_update(&store, &id, fields).await?
            }
            SectionAction::Delete { id } => commands::run_section_delete(&api, &id).await?,
        },
        Commands::Document { action } => match action {
            DocumentAction::List { brief } => commands::run_document_list(&store, &brief).await?,
            DocumentAction::Get { id } => commands::run_document_get(&api, &id).await?,
            DocumentAction::Upload { brief, file } => {
                commands::run_document_upload(&store, &brief, &file).await?
            }
            DocumentAction::Analyze { id, section } => {
                commands::run_document_analyze(&api, &id, &section).await?
            }
            DocumentAction::Delete { id } => commands::run_document_delete(&store, &id).await?,
        },
        Commands::Ai { action } => match action {
            AiAction::Generate {
                section,
                context,
                prompt,
            } => commands::run_ai_generate(&api, &section, context, prompt).await?,
            AiAction::Suggest { field, context } => {
                commands::run_ai_suggest(&api, &field, context).await?
            }
            AiAction::AutoPopulate { section, brief } => {
                commands::run_ai_auto_populate(&api, &section, &brief).await?
            }
        },
        Commands::Config => {
            // Handled above (before building the client)
            unreachable!()
        }
        Commands::Health => commands::run_health(&api).await?,
    }

    Ok(())
}
