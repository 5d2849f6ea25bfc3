//! fmd command-line entry point
//!
//! ```bash
//! # Every markdown file below the current directory
//! fmd
//!
//! # Tagged "work" or "urgent", titled like "meeting", in notes/
//! fmd -t work -t urgent -T meeting notes
//!
//! # Dated in Q1 2025, NUL-separated for xargs
//! fmd --date-after 2025-01-01 --date-before 2025-03-31 -0 | xargs -0 ls -l
//! ```
//!
//! Exit status: 0 when the run finished, whether or not anything matched,
//! and 2 on a usage or configuration error.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::CommandFactory;
use colored::Colorize;
use tracing::{debug, info};

use fmd::{
    FmdError,
    cli::Cli,
    config::FmdConfig,
    discovery::{FileDiscovery, Walker},
    output::{self, Delimiter},
    query::Query,
    runner::Runner,
};

const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    fmd::logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Reader went away (`fmd | head`)
        Err(FmdError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> Result<(), FmdError> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "fmd", &mut io::stdout());
        return Ok(());
    }

    let mut config = FmdConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    debug!(?config, "effective configuration");

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Filters are validated before any directory is touched
    let query = Query::new(config.head_lines, config.full_text, &cli.filter_specs())?;

    let walker = Walker::new(&config.glob)?
        .max_depth(config.max_depth)
        .include_hidden(config.hidden)
        .respect_ignore_files(config.respect_ignore_files)
        .exclude_dirs(config.exclude_dirs.clone());
    let candidates = walker.discover(&cli.dirs)?;

    let report = Runner::new(&query)
        .order(config.order)
        .threads(config.threads)
        .run(candidates)?;

    if !report.warnings.is_empty() {
        info!(skipped = report.warnings.len(), "some files could not be read");
    }
    if report.matches.is_empty() {
        debug!(examined = report.examined, "no file matched");
    }

    let mut out = BufWriter::new(io::stdout().lock());
    output::write_paths(&mut out, &report.matches, config.path_format, Delimiter::from_nul(config.nul))?;

    Ok(())
}
