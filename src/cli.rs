use clap::{Args, Parser, Subcommand, ValueEnum};
use seoscore::types::report::SectionKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seoscore",
    version,
    about = "Rule-based SEO scoring for blog posts"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Project root holding seoscore.toml
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one post with the basic or advanced engine
    Analyze(AnalyzeCommand),
    /// Build the unified report for one post
    Report(ReportCommand),
    /// Show recorded unified reports for one post
    History(HistoryCommand),
    /// Build unified reports for every post in the content directory
    Audit(AuditCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Engine {
    Basic,
    Advanced,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub id: String,
    #[arg(long)]
    pub content_dir: Option<PathBuf>,
    /// Focus keyword; defaults to the post's own
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long, value_enum, default_value = "basic")]
    pub engine: Engine,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ReportCommand {
    pub id: String,
    #[arg(long)]
    pub content_dir: Option<PathBuf>,
    #[arg(long)]
    pub keyword: Option<String>,
    /// Only include these sections (repeatable)
    #[arg(long = "section", value_parser = parse_section)]
    pub sections: Vec<SectionKind>,
    /// Recompute even when a cached report exists
    #[arg(long)]
    pub force_refresh: bool,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct HistoryCommand {
    pub id: String,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct AuditCommand {
    #[arg(long)]
    pub content_dir: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

fn parse_section(value: &str) -> Result<SectionKind, String> {
    SectionKind::parse(value).ok_or_else(|| {
        let known = SectionKind::ALL.map(SectionKind::as_str).join(", ");
        format!("unknown section '{value}' (expected one of: {known})")
    })
}
