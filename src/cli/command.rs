use crate::config::StripConfig;
use crate::logging;
use crate::strip::{self, StripOptions};
use anyhow::Context;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "debug-strip",
    about = "Remove debug-only print blocks from a source file, in place"
)]
pub struct CommandStrip {
    #[structopt(name = "file", parse(from_os_str))]
    file: PathBuf,

    /// Debug flag guarding the blocks to remove [default: kDebugMode]
    #[structopt(short, long)]
    trigger: Option<String>,

    /// Diagnostic call marking a block removable, repeatable [default: print]
    #[structopt(short = "p", long = "call", number_of_values = 1)]
    calls: Vec<String>,

    /// JSON profile; `debug-strip.json` in the working directory is used if present
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(short = "n", long)]
    dry_run: bool,

    /// Print the report as JSON instead of a status line
    #[structopt(long)]
    json: bool,

    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

#[derive(StructOpt, Debug)]
#[structopt(
    name = "clean-prints",
    about = "Remove debug-only print blocks from the project's default target"
)]
pub struct CommandCleanPrints {}

pub fn strip(cmd: CommandStrip) -> ! {
    exit_with(run_strip(cmd))
}

pub fn clean_prints(_cmd: CommandCleanPrints) -> ! {
    exit_with(run_clean_prints())
}

fn run_strip(cmd: CommandStrip) -> anyhow::Result<String> {
    logging::init_logging(cmd.verbose)?;
    execute_strip(cmd, &working_dir()?)
}

fn run_clean_prints() -> anyhow::Result<String> {
    logging::init_logging(0)?;
    execute_clean_prints(&working_dir()?)
}

fn exit_with(result: anyhow::Result<String>) -> ! {
    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0)
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn working_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().context("cannot determine working directory")
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<StripConfig> {
    let config = match explicit {
        Some(path) => StripConfig::load(path)?,
        None => StripConfig::discover(cwd)?,
    };
    Ok(config)
}

/// Strip `cmd.file` and return what should be printed: the status line, or
/// the JSON report with `--json`. The profile is looked up in `cwd` unless
/// `--config` names one.
pub fn execute_strip(cmd: CommandStrip, cwd: &Path) -> anyhow::Result<String> {
    let config = load_config(cmd.config.as_deref(), cwd)?.with_overrides(cmd.trigger, cmd.calls);
    let trigger = config.trigger()?;

    let report = strip::strip_file(
        &cmd.file,
        &trigger,
        StripOptions {
            dry_run: cmd.dry_run,
        },
    )?;

    if cmd.json {
        Ok(report.to_json()?)
    } else {
        Ok(report.to_string())
    }
}

/// Strip the profile's default target, resolved against `dir`.
pub fn execute_clean_prints(dir: &Path) -> anyhow::Result<String> {
    let config = load_config(None, dir)?;
    let trigger = config.trigger()?;
    let target = dir.join(config.target());

    let report = strip::strip_file(&target, &trigger, StripOptions::default())
        .with_context(|| format!("cleaning {}", target.display()))?;
    Ok(report.to_string())
}
