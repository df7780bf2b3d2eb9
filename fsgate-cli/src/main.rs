use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fsgate_core::file::access::{FileAccessManager, ReadRequest};
use fsgate_core::settings::SettingsManager;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fsgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sandboxed file reads for agent tooling")]
struct Args {
    /// Directories to allow in addition to the configured ones
    #[arg(long, value_delimiter = ',', global = true)]
    allow: Vec<String>,

    /// Load settings from this file instead of ~/.fsgate/settings.toml
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Load settings from a specific profile
    #[arg(long, value_name = "NAME", global = true, conflicts_with = "settings")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read lines from a file; a negative offset reads from the end
    Read {
        path: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        #[arg(long)]
        length: Option<usize>,
        /// Print the content without the status line
        #[arg(long)]
        raw: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print lines with their original line endings
    Exact {
        path: String,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        length: Option<usize>,
    },
    /// Check a path against the allow-list and print where it resolves
    Validate { path: String },
    /// Print size, kind, timestamps and line count as JSON
    Info { path: String },
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        "CLI startup: profile={:?}, settings={:?}, extra_allowed={}",
        args.profile,
        args.settings,
        args.allow.len()
    );

    let settings = match &args.settings {
        Some(path) => SettingsManager::from_path(path.clone())?,
        None => SettingsManager::new(args.profile.as_deref())?,
    };
    for dir in &args.allow {
        settings.allow_directory(dir.as_str());
    }

    let manager = FileAccessManager::new(settings);

    match args.command {
        Command::Read {
            path,
            offset,
            length,
            raw,
            json,
        } => {
            let mut request = ReadRequest::new(path).offset(offset);
            if let Some(length) = length {
                request = request.length(length);
            }
            if raw {
                request = request.raw();
            }
            let result = manager.read_file(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.content);
            }
        }
        Command::Exact {
            path,
            offset,
            length,
        } => {
            let text = manager.read_file_exact(&path, offset, length).await?;
            print!("{text}");
        }
        Command::Validate { path } => {
            let validated = manager.validate(&path).await?;
            let state = if validated.exists() {
                "existing"
            } else {
                "new"
            };
            println!("{} ({state})", validated.path().display());
        }
        Command::Info { path } => {
            let info = manager.get_file_info(&path).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    let trace_dir = home.join(".fsgate").join("trace");
    fs::create_dir_all(&trace_dir)
        .with_context(|| format!("Failed to create trace directory {trace_dir:?}"))?;

    let log_file = trace_dir.join("fsgate.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
