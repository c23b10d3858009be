use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prettytable::{Cell, Row, Table, row};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mandala_mind::clients::GeminiClient;
use mandala_mind::config::{self, Config, RuntimeConfig};
use mandala_mind::dashboard::compose_dashboard;
use mandala_mind::export::{self, DocxEncoder};
use mandala_mind::grid::map_to_grid;
use mandala_mind::models::MandalaResult;
use mandala_mind::session::{ChecklistState, Session};

#[derive(Parser)]
#[command(name = "mandala")]
#[command(about = "Mandala 9x9 idea grid generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Mandala breakdown for a topic
    Generate {
        topic: String,
        /// Save the result as JSON for later render/export/checklist runs
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "report")]
        view: View,
    },
    /// Render a saved result in one of the views
    Render {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "dashboard")]
        view: View,
        /// Grid view only: show this dimension's sub-grid instead of the main grid
        #[arg(long)]
        dimension: Option<String>,
        /// Print SVG source instead of a text table
        #[arg(long)]
        svg: bool,
    },
    /// Export a saved result as plain text or a Word document
    Export {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: ExportFormat,
    },
    /// Generate a task checklist for one dimension of a saved result
    Checklist {
        file: PathBuf,
        #[arg(long)]
        dimension: String,
        /// 1-based task numbers to mark completed before exporting
        #[arg(long, value_delimiter = ',')]
        done: Vec<usize>,
        #[arg(long)]
        csv: bool,
        #[arg(long)]
        docx: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    Dashboard,
    Grid,
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Text,
    Docx,
}

/// Topic and result as written by `generate --out`
#[derive(Serialize, Deserialize)]
struct Snapshot {
    topic: String,
    result: MandalaResult,
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a saved Mandala result", path.display()))?;
    Ok(snapshot)
}

fn print_grid(slots: &[String; 9]) {
    let mut table = Table::new();
    for chunk in slots.chunks(3) {
        table.add_row(Row::new(chunk.iter().map(|s| Cell::new(s)).collect()));
    }
    table.printstd();
}

fn render(snapshot: &Snapshot, view: View, dimension: Option<&str>, svg: bool) -> Result<()> {
    let Snapshot { topic, result } = snapshot;
    match view {
        View::Dashboard => {
            let dashboard = compose_dashboard(topic, result);
            if svg {
                println!("{}", export::dashboard_svg(&dashboard));
                return Ok(());
            }
            let mut table = Table::new();
            for line in dashboard.matrix() {
                table.add_row(Row::new(line.iter().map(|s| Cell::new(s)).collect()));
            }
            table.printstd();
        }
        View::Grid => {
            let (slots, is_main) = match dimension {
                Some(dim) => {
                    let grid = result
                        .dimension_grid(dim)
                        .with_context(|| format!("'{}' is not a dimension of this result", dim))?;
                    (map_to_grid(&grid.title, &grid.items), false)
                }
                None => (map_to_grid(topic, &result.main_dimensions), true),
            };
            if svg {
                println!("{}", export::grid_svg(&slots, is_main));
            } else {
                print_grid(&slots);
            }
        }
        View::Report => print!("{}", export::plain_text(topic, result)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging first so config loading can report through it
    config::load_env_file();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(RuntimeConfig::load_from_env().log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Generate { topic, out, view } => {
            let client = GeminiClient::from_config(&config)?;
            let mut session = Session::new();
            session
                .generate(&client, &topic)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let result = session
                .result()
                .cloned()
                .context("generation finished without a result")?;
            let snapshot = Snapshot {
                topic: session.topic().to_string(),
                result,
            };
            if let Some(path) = out {
                std::fs::write(&path, serde_json::to_string_pretty(&snapshot)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("saved result to {}", path.display());
            }
            render(&snapshot, view, None, false)?;
        }
        Commands::Render {
            file,
            view,
            dimension,
            svg,
        } => {
            let snapshot = read_snapshot(&file)?;
            render(&snapshot, view, dimension.as_deref(), svg)?;
        }
        Commands::Export { file, format } => {
            let snapshot = read_snapshot(&file)?;
            match format {
                ExportFormat::Text => {
                    print!("{}", export::plain_text(&snapshot.topic, &snapshot.result))
                }
                ExportFormat::Docx => {
                    let path = export::save_report_document(
                        &config.export.output_dir,
                        &DocxEncoder::new(),
                        &snapshot.topic,
                        &snapshot.result,
                    )
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                    println!("{}", path.display());
                }
            }
        }
        Commands::Checklist {
            file,
            dimension,
            done,
            csv,
            docx,
        } => {
            let snapshot = read_snapshot(&file)?;
            let client = GeminiClient::from_config(&config)?;
            let mut session = Session::with_result(&snapshot.topic, snapshot.result);
            session.load_checklist(&client, &dimension).await?;
            if let Some(message) = session.error() {
                eprintln!("{}", message);
            }
            for n in done {
                if n == 0 || session.toggle_completed(n - 1).is_none() {
                    eprintln!("No task #{} to mark completed", n);
                }
            }

            let items = session.checklist_items();
            if matches!(session.checklist(), ChecklistState::Loaded { .. }) && items.is_empty() {
                println!("(no tasks returned)");
            } else {
                let mut table = Table::new();
                table.add_row(row!["#", "任務", "重要性", "狀態", "說明"]);
                for (i, item) in items.iter().enumerate() {
                    table.add_row(row![
                        i + 1,
                        item.task,
                        item.star_rating(),
                        export::checklist_csv::status_label(item.completed()),
                        item.description
                    ]);
                }
                table.printstd();
            }

            let dir = &config.export.output_dir;
            if csv {
                let path = export::save_checklist_csv(dir, &dimension, &items)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", path.display());
            }
            if docx {
                let path = export::save_checklist_document(
                    dir,
                    &DocxEncoder::new(),
                    session.topic(),
                    &dimension,
                    &items,
                )
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
