// pinetools - command palette and file brain from the terminal
//
// Parses CLI args, loads settings, and dispatches to handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinetools_lib::{
    filebrain::{
        format_file_size, format_time_ago, grouped_actions, FileFilter, FileType, UploadedFile,
    },
    pages::{Page, DASHBOARD_STATS, RECENT_ACTIVITY},
    palette::{
        changed_steps, detect_intent, generate_suggestions, CommandBar, DetectedIntent, StepStatus,
        WorkflowStep, QUICK_ACTIONS,
    },
    FileBrain, Settings,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinetools")]
#[command(author, version, about = "PineTools - chain tools from a single sentence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to <config_dir>/pinetools/config.json)
    #[arg(long, global = true, env = "PINETOOLS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the intent behind a command
    Intent {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Show command bar suggestions (featured examples when empty)
    Suggest {
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Detect a workflow and simulate running it
    Run {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// List files in the file brain
    Files {
        /// Match against names and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only this type (pdf, image, csv, doc, link, video, audio, archive, unknown)
        #[arg(short = 't', long = "type", default_value = "all")]
        file_type: String,
    },

    /// Simulate uploading files (only name and size are used)
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the actions offered for a file type
    Actions { file_type: String },

    /// List the app's pages
    Pages,

    /// List the command bar quick actions
    QuickActions,

    /// Show the dashboard cards
    Stats,

    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load settings")?;

    init_logging(&settings, cli.verbose)?;

    let json = cli.json;
    match cli.command {
        Commands::Intent { query } => handle_intent(&query.join(" "), json),
        Commands::Suggest { query } => handle_suggest(&query.join(" "), json),
        Commands::Run { query } => handle_run(&query.join(" "), &settings, json).await,
        Commands::Files { search, file_type } => handle_files(search, &file_type, &settings, json),
        Commands::Upload { paths } => handle_upload(paths, &settings, json).await,
        Commands::Actions { file_type } => handle_actions(&file_type, json),
        Commands::Pages => handle_pages(json),
        Commands::QuickActions => handle_quick_actions(json),
        Commands::Stats => handle_stats(json),
        Commands::Version => {
            println!("{}", version_line());
            Ok(())
        }
    }
}

fn init_logging(settings: &Settings, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("pinetools=debug,pinetools_lib=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.logging.level))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn version_line() -> String {
    format!("pinetools v{}", env!("CARGO_PKG_VERSION"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

fn rule() -> String {
    "=".repeat(60)
}

#[derive(Serialize)]
struct IntentReport<'a> {
    #[serde(flatten)]
    intent: &'a DetectedIntent,
    estimated_seconds: u32,
}

fn handle_intent(query: &str, json: bool) -> Result<()> {
    let intent = detect_intent(query);

    if json {
        let report = intent.as_ref().map(|intent| IntentReport {
            intent,
            estimated_seconds: intent.estimated_seconds(),
        });
        return print_json(&report);
    }

    match intent {
        None => println!("Type at least 3 characters to detect an intent."),
        Some(intent) => {
            println!("\n{} (confidence: {}%)", intent.description, intent.confidence);
            if intent.has_tools() {
                println!("~{}s estimated", intent.estimated_seconds());
            }
            println!("{}", rule());
            if intent.suggested_workflow.is_empty() {
                println!("No matching tools.");
            }
            for step in &intent.suggested_workflow {
                println!(
                    "{:3}. {} [{}] {}",
                    step.order,
                    step.tool.name,
                    step.tool.category,
                    step.tool.estimated_time.unwrap_or("")
                );
            }
            println!("{}", rule());
        }
    }

    Ok(())
}

fn handle_suggest(query: &str, json: bool) -> Result<()> {
    let suggestions = generate_suggestions(query);

    if json {
        return print_json(&suggestions);
    }

    if suggestions.is_empty() {
        println!("No matching commands");
        return Ok(());
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        let marker = if suggestion.is_featured { "*" } else { " " };
        println!("{:3}. {} {}", i + 1, marker, suggestion.text);
    }

    Ok(())
}

async fn handle_run(query: &str, settings: &Settings, json: bool) -> Result<()> {
    let mut bar = CommandBar::new(&settings.workflow);
    bar.set_query(query);

    let intent = match runnable_intent(&bar) {
        Some(intent) => intent,
        None => {
            if json {
                return print_json(&Vec::<WorkflowStep>::new());
            }
            println!("Nothing to run for '{}'", query);
            return Ok(());
        }
    };

    if !json {
        println!("\n{} (~{}s estimated)", intent.description, intent.estimated_seconds());
        println!("{}", rule());
    }

    let mut updates = bar.watch_steps();
    let finished = bar.execute_workflow(intent.suggested_workflow).finished();
    tokio::pin!(finished);

    let mut shown: Vec<WorkflowStep> = Vec::new();
    let steps = loop {
        if !json {
            let snapshot = updates.borrow_and_update().clone();
            print_transitions(&shown, &snapshot);
            shown = snapshot;
        }

        tokio::select! {
            biased;
            Ok(()) = updates.changed() => {}
            result = &mut finished => break result.context("workflow run failed")?,
        }
    };

    if json {
        return print_json(&steps);
    }

    print_transitions(&shown, &steps);
    println!("{}", rule());

    Ok(())
}

/// The bar's intent, if it matched at least one tool
fn runnable_intent(bar: &CommandBar) -> Option<DetectedIntent> {
    bar.detected_intent().filter(DetectedIntent::has_tools)
}

fn print_transitions(previous: &[WorkflowStep], current: &[WorkflowStep]) {
    for step in changed_steps(previous, current) {
        let marker = match step.status {
            StepStatus::Completed => "✓",
            StepStatus::Processing => "▸",
            StepStatus::Error => "✗",
            _ => " ",
        };
        println!("{:3}. {} {} ({})", step.order, marker, step.tool.name, step.status);
    }
}

fn handle_files(search: Option<String>, file_type: &str, settings: &Settings, json: bool) -> Result<()> {
    let brain = FileBrain::new(&settings.file_brain);
    if let Some(search) = search {
        brain.set_search_query(search);
    }
    brain.set_filter(file_type.parse::<FileFilter>()?);

    let files = brain.files();

    if json {
        return print_json(&files);
    }

    if files.is_empty() {
        println!("No files found");
        return Ok(());
    }

    let now = chrono::Utc::now();
    println!("\nFile Brain ({} files)", files.len());
    println!("{}", rule());
    for file in &files {
        println!(
            "{:>4}  {:<8} {:<36} {:>9}  used {}x, {}",
            file.id.chars().take(4).collect::<String>(),
            file.file_type,
            file.name,
            format_file_size(file.size),
            file.usage_count,
            format_time_ago(file.last_used_at, now)
        );
    }
    println!("{}", rule());

    Ok(())
}

async fn handle_upload(paths: Vec<PathBuf>, settings: &Settings, json: bool) -> Result<()> {
    let brain = FileBrain::new(&settings.file_brain);

    let uploads = paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            // metadata only; contents are never read
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            UploadedFile::new(name, size)
        })
        .collect();

    let added = brain.upload_files(uploads).await?;

    if json {
        return print_json(&added);
    }

    println!("✓ Added {} file(s):", added.len());
    for file in &added {
        println!("  - {} ({}, {})", file.name, file.file_type, format_file_size(file.size));
    }

    Ok(())
}

fn handle_actions(file_type: &str, json: bool) -> Result<()> {
    let file_type: FileType = file_type.parse()?;
    let groups = grouped_actions(file_type);

    if json {
        return print_json(&groups);
    }

    println!("\nActions for {}", file_type.label());
    for (category, actions) in &groups {
        println!("\n  {}", category.label());
        for action in actions {
            println!("    {:<18} {}", action.label, action.description);
        }
    }

    Ok(())
}

fn handle_pages(json: bool) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct PageRow {
            page: Page,
            path: &'static str,
            title: &'static str,
            coming_soon: bool,
        }

        let rows: Vec<PageRow> = Page::ALL
            .into_iter()
            .map(|page| PageRow {
                page,
                path: page.path(),
                title: page.title(),
                coming_soon: page.is_coming_soon(),
            })
            .collect();
        return print_json(&rows);
    }

    for page in Page::ALL {
        let note = if page.is_coming_soon() { " (coming soon)" } else { "" };
        println!("{:<16} {}{}", page.path(), page.title(), note);
    }

    Ok(())
}

fn handle_quick_actions(json: bool) -> Result<()> {
    if json {
        return print_json(QUICK_ACTIONS);
    }

    for action in QUICK_ACTIONS {
        println!("{:<12} {}", action.label, action.command);
    }

    Ok(())
}

fn handle_stats(json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "stats": DASHBOARD_STATS,
            "recent_activity": RECENT_ACTIVITY,
        }));
    }

    println!("\n{}", rule());
    for stat in DASHBOARD_STATS {
        println!("  {:<16} {}", stat.title, stat.value);
    }
    println!("{}", rule());
    println!("\nRecent Activity:");
    for activity in RECENT_ACTIVITY {
        println!("  {:<22} {:<26} {}", activity.title, activity.description, activity.time);
    }

    Ok(())
}
