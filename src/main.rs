mod cli;

use clap::Parser;
use seoscore::analyze;
use seoscore::config;
use seoscore::content::AnalyzableContent;
use seoscore::error::SeoError;
use seoscore::report::{self, OutputFormat};
use seoscore::store::{ContentProvider, DirectoryContentProvider, FileCache, FileHistory};
use seoscore::types::config::SeoConfig;
use seoscore::types::scoring::Status;
use seoscore::unified::{ReportComposer, ReportOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const POOR: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

type FileComposer = ReportComposer<DirectoryContentProvider, FileCache, FileHistory>;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, _) => "debug",
        })
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_for(status: Status) -> i32 {
    match status {
        Status::Good => exit_code::SUCCESS,
        Status::Ok => exit_code::WARNINGS,
        Status::Poor => exit_code::POOR,
    }
}

fn output_format(format: cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn content_dir(root: &Path, cfg: &SeoConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| resolve(root, cfg.content_dir()))
}

fn file_composer(root: &Path, cfg: &SeoConfig, content_dir: PathBuf) -> FileComposer {
    let settings = cfg.report_settings();
    let state_dir = resolve(root, cfg.state_dir());
    let history = FileHistory::new(state_dir.join("history"), settings.history_retention);
    ReportComposer::new(
        DirectoryContentProvider::new(content_dir),
        FileCache::new(state_dir.join("cache")),
        history,
        settings,
        cfg.weight_table(),
    )
}

fn run() -> Result<i32, SeoError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if !cli.root.exists() {
        return Err(SeoError::PathNotFound(cli.root.display().to_string()));
    }
    let loaded = config::load_config(&cli.root)?;
    if loaded.is_none() {
        tracing::info!(root = %cli.root.display(), "no seoscore.toml found; using defaults");
    }
    let cfg = loaded.unwrap_or_default();

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let provider = DirectoryContentProvider::new(content_dir(&cli.root, &cfg, cmd.content_dir));
            let mut record = provider.fetch(&cmd.id)?;
            if cmd.keyword.is_some() {
                record.focus_keyword = cmd.keyword;
            }
            let content = AnalyzableContent::from_record(&record);
            let keyword = content.focus_keyword.as_deref();
            let format = output_format(cmd.format);

            let (rendered, status) = match cmd.engine {
                cli::Engine::Basic => {
                    let result = analyze::analyze(&content, keyword, &cfg.weight_table());
                    (report::render_analysis(&cmd.id, &result, format)?, result.status)
                }
                cli::Engine::Advanced => {
                    let result = analyze::analyze_comprehensive(&content, keyword);
                    (report::render_analysis(&cmd.id, &result, format)?, result.status)
                }
            };
            println!("{rendered}");
            Ok(exit_for(status))
        }
        cli::Commands::Report(cmd) => {
            let dir = content_dir(&cli.root, &cfg, cmd.content_dir);
            let mut composer = file_composer(&cli.root, &cfg, dir);
            let options = ReportOptions {
                force_refresh: cmd.force_refresh,
                keyword: cmd.keyword,
                sections: (!cmd.sections.is_empty()).then_some(cmd.sections),
            };
            let unified = composer.generate_unified_report(&cmd.id, &options)?;
            println!("{}", report::render_unified(&unified, output_format(cmd.format))?);
            Ok(exit_for(unified.status))
        }
        cli::Commands::History(cmd) => {
            let dir = content_dir(&cli.root, &cfg, None);
            let composer = file_composer(&cli.root, &cfg, dir);
            let snapshots = composer.get_report_history(&cmd.id, cmd.limit)?;
            println!(
                "{}",
                report::render_history(&cmd.id, &snapshots, output_format(cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Audit(cmd) => {
            let dir = content_dir(&cli.root, &cfg, cmd.content_dir);
            let mut composer = file_composer(&cli.root, &cfg, dir);
            let ids = composer.provider().list_ids()?;
            let reports = ids
                .iter()
                .map(|id| composer.generate_unified_report(id, &ReportOptions::default()))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", report::render_audit(&reports, output_format(cmd.format))?);

            let worst = reports
                .iter()
                .map(|unified| exit_for(unified.status))
                .max()
                .unwrap_or(exit_code::SUCCESS);
            Ok(worst)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
