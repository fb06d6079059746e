use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use quill::comments::{ReviewAction, Submitter};
use quill::config::Config;
use quill::db::{self, queries};
use quill::moderation::{self, Decision};
use quill::output::{markdown, terminal};
use quill::pipeline;

/// Quill: rule-based comment moderation for a blog.
///
/// Scores comments for toxicity, sentiment and spam, decides whether they
/// are shown, held for review or rejected, and keeps the reasons for audit.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Score text without storing anything
    Check {
        /// The text to check
        text: Option<String>,

        /// Check every non-empty line of this file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a comment on a post (scored and stored)
    Submit {
        /// Post the comment belongs to
        #[arg(long)]
        post: i64,

        /// Reply to this comment id (ignored if it isn't on the same post)
        #[arg(long)]
        parent: Option<i64>,

        /// Display name shown next to the comment
        #[arg(long, default_value = "")]
        author: String,

        /// Username of the logged-in author
        #[arg(long)]
        user: Option<String>,

        /// Author is a superuser (skips automatic moderation)
        #[arg(long)]
        superuser: bool,

        /// The comment text
        text: String,
    },

    /// List the comments readers see on a post
    Comments {
        #[arg(long)]
        post: i64,
    },

    /// List comments by decision (default: the pending review queue)
    Queue {
        /// approved, pending or rejected
        #[arg(long, default_value = "pending")]
        decision: String,

        /// Maximum number of comments to list
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Approve or reject a stored comment
    Review {
        /// Comment id
        id: i64,

        #[arg(value_enum)]
        action: ReviewChoice,

        /// Why it was rejected (kept for audit)
        #[arg(long)]
        reason: Option<String>,

        /// Who is reviewing
        #[arg(long, default_value = "staff")]
        reviewer: String,
    },

    /// Re-run the scorer over automatically moderated comments
    Rescore,

    /// Write a markdown audit report of pending and rejected comments
    Report {
        /// Output path (default: QUILL_REPORT_PATH or output/quill-report.md)
        #[arg(long)]
        output: Option<String>,
    },

    /// Show system status (thresholds, DB stats, latest comments)
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReviewChoice {
    Approve,
    Reject,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Quill database...");
            let conn = db::initialize(&config.db_path)?;
            let table_count = db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nQuill is ready. Try: quill check \"harika bir yazı, teşekkürler\"");
        }

        Commands::Check { text, file, json } => {
            let texts: Vec<String> = match (text, file) {
                (Some(text), _) => vec![text],
                (None, Some(path)) => {
                    let contents = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    contents
                        .lines()
                        .filter(|line| !line.trim().is_empty())
                        .map(str::to_string)
                        .collect()
                }
                (None, None) => anyhow::bail!("Give some text to check, or --file <path>"),
            };

            let results: Vec<(String, moderation::ModerationVerdict)> = texts
                .into_iter()
                .map(|t| {
                    let verdict = moderation::evaluate_with(&t, &config.thresholds);
                    (t, verdict)
                })
                .collect();

            if json {
                let verdicts: Vec<&moderation::ModerationVerdict> =
                    results.iter().map(|(_, v)| v).collect();
                let out = if verdicts.len() == 1 {
                    serde_json::to_string_pretty(verdicts[0])?
                } else {
                    serde_json::to_string_pretty(&verdicts)?
                };
                println!("{out}");
            } else if let [(text, verdict)] = results.as_slice() {
                terminal::display_verdict(text, verdict);
            } else {
                terminal::display_batch(&results);
            }
        }

        Commands::Submit {
            post,
            parent,
            author,
            user,
            superuser,
            text,
        } => {
            let conn = db::open(&config.db_path)?;
            let submitter = Submitter {
                username: user,
                is_superuser: superuser,
            };
            let comment = pipeline::submit::run(
                &conn,
                post,
                parent,
                &author,
                &text,
                &submitter,
                &config.thresholds,
            )?;

            match comment.parent_id {
                Some(parent_id) => println!(
                    "Stored comment #{} on post {} (reply to #{parent_id})",
                    comment.id, comment.post_id
                ),
                None => println!("Stored comment #{} on post {}", comment.id, comment.post_id),
            }
            match comment.decision {
                Decision::Approved => println!("  {} ({})", "Visible".green(), comment.reason),
                Decision::Pending => println!(
                    "  {} ({})",
                    "Held for review".yellow(),
                    comment.reason
                ),
                Decision::Rejected => println!("  {} ({})", "Rejected".red(), comment.reason),
            }
        }

        Commands::Comments { post } => {
            let conn = db::open(&config.db_path)?;
            let threads = queries::list_visible_for_post(&conn, post)?;
            terminal::display_threads(&format!("Post {post}"), &threads);
        }

        Commands::Queue { decision, limit } => {
            let Some(decision) = Decision::parse(&decision) else {
                anyhow::bail!("Unknown decision {decision:?}. Use approved, pending or rejected.");
            };
            let conn = db::open(&config.db_path)?;
            let comments = queries::list_by_decision(&conn, decision, limit)?;
            terminal::display_comment_list(&format!("{decision} comments"), &comments);

            if decision == Decision::Pending && !comments.is_empty() {
                println!(
                    "{}",
                    "Review with: quill review <id> approve|reject [--reason ...]".dimmed()
                );
            }
        }

        Commands::Review {
            id,
            action,
            reason,
            reviewer,
        } => {
            let conn = db::open(&config.db_path)?;
            let action = match action {
                ReviewChoice::Approve => ReviewAction::Approve,
                ReviewChoice::Reject => ReviewAction::Reject { reason },
            };
            let comment = pipeline::review::run(&conn, id, &action, &reviewer)?;
            println!(
                "Comment #{} is now {} ({})",
                comment.id, comment.decision, comment.reason
            );
        }

        Commands::Rescore => {
            let conn = db::open(&config.db_path)?;
            println!("Rescoring automatically moderated comments...");
            let summary = pipeline::rescore::run(&conn, &config.thresholds, true)?;

            println!("\n{}", "Rescore complete.".bold());
            println!("  Comments examined: {}", summary.examined);
            println!("  Decisions changed: {}", summary.changed);
        }

        Commands::Report { output } => {
            let conn = db::open(&config.db_path)?;
            let counts = queries::decision_counts(&conn)?;
            let limit = markdown::REPORT_ROW_LIMIT;
            let pending = queries::list_by_decision(&conn, Decision::Pending, limit)?;
            let rejected = queries::list_by_decision(&conn, Decision::Rejected, limit)?;

            terminal::display_decision_summary(&counts);

            let path = output.unwrap_or_else(|| config.report_path.clone());
            let report_path = markdown::generate_report(&counts, &pending, &rejected, &path)?;
            println!(
                "\n{}",
                format!("Markdown report saved to: {report_path}").bold()
            );
        }

        Commands::Status => {
            quill::status::show(&config.db_path, &config.thresholds)?;
        }
    }

    Ok(())
}
