use clap::Parser;
use std::path::{Path, PathBuf};

use reqs_sweep::adapters::outbound::process::PinMode;
use reqs_sweep::application::dto::OutputFormat;
use reqs_sweep::config::ConfigFile;
use reqs_sweep::consolidation::policies::MergePolicy;
use reqs_sweep::shared::Result;
use std::str::FromStr;

/// Default artifact name, created inside the scan root
pub const DEFAULT_OUTPUT_FILENAME: &str = "requirements.txt";

/// Consolidate pipreqs output for every Python project folder into one requirements file
#[derive(Parser, Debug)]
#[command(name = "reqs-sweep")]
#[command(version)]
#[command(
    about = "Consolidate pipreqs output for every Python project folder into one requirements file",
    long_about = None
)]
pub struct Args {
    /// Folder to scan (defaults to the current directory)
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output file path (defaults to requirements.txt inside ROOT)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Skip folders matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "build" -e "tmp-*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Conflict resolution: highest or last
    #[arg(long, value_name = "POLICY")]
    pub merge_policy: Option<MergePolicy>,

    /// pipreqs pin mode: compat, gt or no-pin
    #[arg(long, value_name = "MODE")]
    pub mode: Option<PinMode>,

    /// Path to the pipreqs executable
    #[arg(long, value_name = "PATH")]
    pub pipreqs: Option<PathBuf>,

    /// Path to config file (defaults to reqs-sweep.config.yml inside ROOT)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the result to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// List the folders that would be scanned without running pipreqs
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Effective settings for one run after merging CLI, config file and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub root: PathBuf,
    /// `None` prints to stdout
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub exclude_patterns: Vec<String>,
    pub merge_policy: MergePolicy,
    pub pin_mode: Option<PinMode>,
    pub pipreqs: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunOptions {
    /// CLI values win over config values, which win over defaults.
    /// Exclude patterns from both sources are combined.
    pub fn resolve(args: Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(value)) => OutputFormat::from_str(value).map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::default(),
        };
        let merge_policy = match (args.merge_policy, config.merge_policy.as_deref()) {
            (Some(policy), _) => policy,
            (None, Some(value)) => MergePolicy::from_str(value).map_err(anyhow::Error::msg)?,
            (None, None) => MergePolicy::default(),
        };
        let pin_mode = match (args.mode, config.mode.as_deref()) {
            (Some(mode), _) => Some(mode),
            (None, Some(value)) => Some(PinMode::from_str(value).map_err(anyhow::Error::msg)?),
            (None, None) => None,
        };

        let output = if args.stdout {
            None
        } else {
            Some(
                args.output
                    .or_else(|| config.output.map(|path| relative_to(&args.root, path)))
                    .unwrap_or_else(|| args.root.join(DEFAULT_OUTPUT_FILENAME)),
            )
        };

        let mut exclude_patterns = config.exclude_dirs.unwrap_or_default();
        for pattern in args.exclude {
            if !exclude_patterns.contains(&pattern) {
                exclude_patterns.push(pattern);
            }
        }

        Ok(Self {
            root: args.root,
            output,
            format,
            exclude_patterns,
            merge_policy,
            pin_mode,
            pipreqs: args.pipreqs.or(config.pipreqs),
            dry_run: args.dry_run,
        })
    }
}

/// Config paths are relative to the scan root, not the working directory
fn relative_to(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
