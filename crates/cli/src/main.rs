//! examplan CLI - study planner for the mathematics exam.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use examplan_core::quiz::{grade, select_questions};
use examplan_core::validation::validate_quiz_score;
use examplan_core::{Time, UserConfig, UserConfigInput, QuizSheet, WeekId, week_title};
use examplan_export::{render_certificate, text_report, weeks_to_csv, StatisticsSnapshot};
use examplan_progress::Dashboard;
use examplan_storage::{JsonFileStore, KeyValueStore, StoreManager, STORAGE_BUDGET_BYTES};

#[derive(Parser, Debug)]
#[command(name = "examplan")]
#[command(about = "Ten-week study planner for the mathematics exam", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct CliConfig {
    /// Directory holding the stored records
    #[arg(long, env = "EXAMPLAN_DATA_DIR", default_value = ".examplan", global = true)]
    data_dir: PathBuf,

    /// Storage quota in bytes
    #[arg(long, env = "EXAMPLAN_QUOTA_BYTES", default_value_t = STORAGE_BUDGET_BYTES, global = true)]
    quota_bytes: u64,

    /// Use this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

impl CliConfig {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure name, exam year and level
    Init {
        /// Display name
        #[arg(long)]
        name: String,
        /// Exam year
        #[arg(long)]
        year: String,
        /// Exam level (pp/basic or pr/extended)
        #[arg(long)]
        level: String,
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
    /// Show the stored configuration
    ShowConfig,
    /// Show the progress dashboard
    Status,
    /// Mark the theory of a week as read
    Read {
        /// Week number (1-10)
        week: WeekId,
    },
    /// Record a quiz result
    Quiz {
        /// Week number (1-10)
        week: WeekId,
        /// Score in percent
        #[arg(long, conflicts_with = "sheet", required_unless_present = "sheet")]
        score: Option<String>,
        /// Ids of the questions answered incorrectly
        #[arg(long, value_delimiter = ',', requires = "score")]
        incorrect: Vec<String>,
        /// JSON file with questions and answers to grade
        #[arg(long)]
        sheet: Option<PathBuf>,
        /// Only grade the questions remembered as incorrect
        #[arg(long, requires = "sheet")]
        retry: bool,
    },
    /// List recommendations
    Recommend,
    /// List weeks that need more work
    WeakAreas,
    /// Estimate when the plan will be finished
    Predict,
    /// Write the text progress report
    Report {
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export data
    Export {
        /// What to export
        format: ExportFormat,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import a backup
    Import {
        /// Backup file
        file: PathBuf,
    },
    /// Write the completion certificate
    Certificate {
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete every stored record
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    /// Per-week CSV
    Csv,
    /// Statistics snapshot as JSON
    Stats,
    /// Full backup as JSON
    Backup,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);

    let store = JsonFileStore::new(&cli.config.data_dir)
        .await
        .with_context(|| format!("opening {}", cli.config.data_dir.display()))?
        .with_quota(cli.config.quota_bytes);
    let mut storage = StoreManager::new(store);
    if !storage.is_available().await {
        bail!("storage at {} is not writable", cli.config.data_dir.display());
    }

    let today = cli.config.today();
    debug!(%today, data_dir = %storage.store().root().display(), "Starting");

    let output = run(cli.command, &mut storage, today, Utc::now()).await?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}

async fn run<S: KeyValueStore>(
    command: Commands,
    storage: &mut StoreManager<S>,
    today: NaiveDate,
    now: Time,
) -> Result<String> {
    match command {
        Commands::Init { name, year, level, force } => {
            if !force {
                if let Some(existing) = storage.get_user_config().await.filter(|c| c.config_complete) {
                    bail!(
                        "already configured for {}, pass --force to overwrite",
                        existing.name
                    );
                }
            }

            let input = UserConfigInput {
                name,
                exam_year: year,
                level,
            };
            let config = UserConfig::create(&input, today, now).map_err(|errors| {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|(field, error)| format!("  {}: {}", field.as_str(), error))
                    .collect();
                anyhow!("invalid configuration:\n{}", lines.join("\n"))
            })?;

            if !storage.save_user_config(&config).await
                || !storage.save_selected_level(config.level).await
            {
                bail!("failed to save the configuration");
            }
            info!(name = %config.name, year = config.exam_year, "Saved configuration");

            let dashboard = Dashboard::build(Some(&config), &storage.get_progress().await, today);
            let days = dashboard.time.map_or(0, |t| t.days_until_exam);
            Ok(format!(
                "Configured {} for the {} level exam on {} ({} days left)",
                config.name,
                config.level.label(),
                config.exam_date.format("%Y-%m-%d"),
                days
            ))
        }

        Commands::ShowConfig => {
            let config = require_config(storage).await?;
            Ok(format!(
                "Name:      {}\nLevel:     {} ({})\nExam year: {}\nExam date: {}\nCreated:   {}",
                config.name,
                config.level.label(),
                config.level.code(),
                config.exam_year,
                config.exam_date.format("%Y-%m-%d"),
                config.created_at.format("%Y-%m-%d %H:%M")
            ))
        }

        Commands::Status => {
            let config = storage.get_user_config().await;
            let dashboard = Dashboard::build(config.as_ref(), &storage.get_progress().await, today);
            let usage = storage.usage_percentage().await;
            Ok(format!("{}\n\nStorage used: {}%", format_status(config.as_ref(), &dashboard), usage))
        }

        Commands::Read { week } => {
            let mut record = storage.get_week_progress(week).await;
            if !record.mark_theory_read() {
                return Ok(format!("Week {}: theory already read", week));
            }
            if !storage.save_week_progress(week, record).await {
                bail!("failed to save progress of week {}", week);
            }
            Ok(format!("Week {}: theory marked as read", week))
        }

        Commands::Quiz { week, score, incorrect, sheet, retry } => {
            let mut record = storage.get_week_progress(week).await;

            let message = match (score, sheet) {
                (Some(score), _) => {
                    let score = validate_quiz_score(&score).map_err(|e| anyhow!("score: {}", e))?;
                    record.set_quiz_score(score, incorrect);
                    format!("Week {}: quiz score {}% recorded", week, score)
                }
                (None, Some(path)) => {
                    let sheet: QuizSheet = serde_json::from_str(&read_file(&path).await?)
                        .with_context(|| format!("parsing quiz sheet {}", path.display()))?;

                    let retry_set = retry.then(|| record.incorrect_questions.clone());
                    let questions = select_questions(&sheet.questions, retry_set.as_ref());
                    if retry && questions.is_empty() {
                        bail!("no incorrect questions to retry in week {}", week);
                    }

                    let outcome = grade(&questions, &sheet.answers, &record.incorrect_questions);
                    record.apply_quiz(&outcome);
                    format!(
                        "Week {}: {}/{} correct ({}%), {} to retry",
                        week,
                        outcome.correct,
                        outcome.total,
                        outcome.score,
                        outcome.incorrect_questions.len()
                    )
                }
                (None, None) => bail!("pass either --score or --sheet"),
            };

            if !storage.save_week_progress(week, record).await {
                bail!("failed to save progress of week {}", week);
            }
            Ok(message)
        }

        Commands::Recommend => {
            let dashboard = load_dashboard(storage, today).await;
            if dashboard.recommendations.is_empty() {
                return Ok("No recommendations right now.".to_string());
            }
            let lines: Vec<String> = dashboard
                .recommendations
                .iter()
                .map(|r| {
                    let action = r
                        .action_label
                        .as_deref()
                        .map(|label| format!(" [{}]", label))
                        .unwrap_or_default();
                    format!("[{:?}] {}: {}{}", r.priority, r.title, r.message, action)
                })
                .collect();
            Ok(lines.join("\n"))
        }

        Commands::WeakAreas => {
            let dashboard = load_dashboard(storage, today).await;
            if dashboard.weak_areas.is_empty() {
                return Ok("No weak areas.".to_string());
            }
            let lines: Vec<String> = dashboard
                .weak_areas
                .iter()
                .map(|w| {
                    format!(
                        "Week {}: {} - {}% ({})",
                        w.week_number, w.topic, w.progress, w.suggestion
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }

        Commands::Predict => {
            let dashboard = load_dashboard(storage, today).await;
            Ok(match dashboard.prediction {
                Some(prediction) => prediction.message,
                None => "Not enough data to predict a completion date yet.".to_string(),
            })
        }

        Commands::Report { output } => {
            let config = storage.get_user_config().await;
            let dashboard = Dashboard::build(config.as_ref(), &storage.get_progress().await, today);
            let report = text_report(
                config.as_ref(),
                &dashboard.overall,
                dashboard.time.as_ref(),
                dashboard.delta.as_ref(),
                now,
            );
            deliver(report, output).await
        }

        Commands::Export { format, output } => {
            let content = match format {
                ExportFormat::Csv => {
                    let dashboard = load_dashboard(storage, today).await;
                    weeks_to_csv(&dashboard.overall.per_week)
                }
                ExportFormat::Stats => {
                    let config = storage.get_user_config().await;
                    let dashboard =
                        Dashboard::build(config.as_ref(), &storage.get_progress().await, today);
                    StatisticsSnapshot::from_dashboard(&dashboard, config.as_ref(), now).to_json()?
                }
                ExportFormat::Backup => storage
                    .export_data(now)
                    .await
                    .ok_or_else(|| anyhow!("failed to export data"))?,
            };
            deliver(content, output).await
        }

        Commands::Import { file } => {
            let json = read_file(&file).await?;
            if !storage.import_data(&json).await {
                bail!("failed to import {}", file.display());
            }
            Ok(format!("Imported {}", file.display()))
        }

        Commands::Certificate { output } => {
            let config = storage.get_user_config().await;
            let overall = examplan_progress::overall_progress(&storage.get_progress().await);
            let html = render_certificate(config.as_ref(), &overall, today)?;
            deliver(html, output).await
        }

        Commands::Reset { yes } => {
            if !yes {
                bail!("this deletes all stored data, pass --yes to confirm");
            }
            if !storage.clear_all().await {
                bail!("failed to clear stored data");
            }
            Ok("All data cleared.".to_string())
        }
    }
}

async fn require_config<S: KeyValueStore>(storage: &mut StoreManager<S>) -> Result<UserConfig> {
    storage
        .get_user_config()
        .await
        .ok_or_else(|| anyhow!("not configured yet, run `examplan init` first"))
}

async fn load_dashboard<S: KeyValueStore>(storage: &mut StoreManager<S>, today: NaiveDate) -> Dashboard {
    let config = storage.get_user_config().await;
    let progress = storage.get_progress().await;
    Dashboard::build(config.as_ref(), &progress, today)
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/// Write to `output`, or hand the content back for stdout.
async fn deliver(content: String, output: Option<PathBuf>) -> Result<String> {
    match output {
        Some(path) => {
            tokio::fs::write(&path, content)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            Ok(format!("Wrote {}", path.display()))
        }
        None => Ok(content),
    }
}

fn format_status(config: Option<&UserConfig>, dashboard: &Dashboard) -> String {
    let mut lines = Vec::new();

    match config {
        Some(config) => lines.push(format!(
            "{} - {} level, exam on {}",
            config.name,
            config.level.label(),
            config.exam_date.format("%Y-%m-%d")
        )),
        None => lines.push("Not configured yet, run `examplan init`.".to_string()),
    }

    if let Some(time) = &dashboard.time {
        lines.push(format!(
            "Days until exam: {}   Current week: {}/{}   Expected: {}%",
            time.days_until_exam, time.current_week, examplan_core::WEEKS_TOTAL, time.expected_progress
        ));
    }

    let overall = &dashboard.overall;
    lines.push(format!(
        "Progress: {}% ({}, {})   Weeks with progress: {}/{}   Completed: {}/{}",
        overall.average_progress,
        dashboard.band.css_class(),
        dashboard.band.color(),
        dashboard.weeks_with_progress,
        overall.total_weeks,
        overall.completed_weeks,
        overall.total_weeks
    ));
    lines.push(format!(
        "Theory read: {}/{}   Quizzes: {}/{}   Average quiz score: {}%",
        overall.theory_read_count,
        overall.total_weeks,
        overall.quizzes_completed_count,
        overall.total_weeks,
        overall.average_quiz_score
    ));

    if let Some(delta) = &dashboard.delta {
        lines.push(format!("{} ({:+}%)", delta.message, delta.delta));
    }

    lines.push(String::new());
    let level = config.map(|c| c.level);
    for week in &overall.per_week {
        let quiz = week
            .quiz_score
            .map(|s| format!("quiz {}%", s))
            .unwrap_or_else(|| "no quiz".to_string());
        let theory = if week.theory_read { "theory read" } else { "theory unread" };
        lines.push(format!(
            "{:>3}%  {}  ({}, {})",
            week.progress,
            week_title(week.week_number, level),
            theory,
            quiz
        ));
    }

    lines.join("\n")
}
