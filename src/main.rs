mod cli;

use cli::{Args, RunOptions};
use reqs_sweep::adapters::outbound::console::StderrProgressReporter;
use reqs_sweep::adapters::outbound::filesystem::{
    EncodingNormalizingReader, WalkdirDirectoryWalker,
};
use reqs_sweep::adapters::outbound::process::PipreqsTool;
use reqs_sweep::application::dto::ScanRequest;
use reqs_sweep::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use reqs_sweep::application::use_cases::ConsolidateRequirementsUseCase;
use reqs_sweep::config::{discover_config, load_config_from_path};
use reqs_sweep::shared::error::{ExitCode, SweepError};
use reqs_sweep::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for diagnostic logging.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, falling
/// back to warnings only. Logs go to stderr so `--stdout` output stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("reqs_sweep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reqs_sweep=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    // clap exits with status 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);
    tracing::debug!("reqs-sweep starting with args: {:?}", args);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    validate_root_path(&args.root)?;

    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&args.root)?,
    };
    let options = RunOptions::resolve(args, config)?;
    tracing::debug!(?options, "resolved run options");

    // Create adapters (Dependency Injection)
    let walker = WalkdirDirectoryWalker::new();
    let tool = PipreqsTool::new(options.pipreqs.clone(), options.pin_mode)?;
    let reader = EncodingNormalizingReader::new();
    let progress_reporter = StderrProgressReporter::new();
    tracing::debug!(executable = %tool.executable().display(), "pipreqs resolved");

    let use_case = ConsolidateRequirementsUseCase::new(walker, tool, reader, progress_reporter);

    let request = ScanRequest::new(options.root.clone())
        .with_exclude_patterns(options.exclude_patterns.clone())
        .with_merge_policy(options.merge_policy)
        .with_dry_run(options.dry_run);

    let response = use_case.execute(request)?;
    if response.dry_run {
        return Ok(());
    }

    eprintln!("{}", FormatterFactory::progress_message(options.format));
    let formatted_output = FormatterFactory::create(options.format).format(&response)?;

    let presenter = PresenterFactory::create(match options.output {
        Some(path) => PresenterType::File(path),
        None => PresenterType::Stdout,
    });
    presenter.present(&formatted_output)?;

    if response.requirements.is_empty() {
        eprintln!(
            "{}",
            FormatterFactory::empty_result_warning(options.format, &presenter.destination())
        );
    }
    eprintln!("✅ Output complete: {}", presenter.destination());

    Ok(())
}

fn validate_root_path(path: &Path) -> Result<()> {
    let invalid = |reason: String| SweepError::InvalidRootPath {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }

    // Security check: Reject symbolic links for the scan root
    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Failed to read path metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Root path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        )
        .into());
    }

    if !metadata.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }

    Ok(())
}
