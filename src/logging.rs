//! Logging setup for hashdupe.
//!
//! Everything goes through the `log` facade into an `env_logger` writing to
//! stderr, so stdout only ever carries the report. `RUST_LOG` wins over the
//! `-v` / `-q` flags when it is set.
//!
//! The line layout depends on the run: while the progress bar is drawn the
//! bar already shows elapsed time, so lines drop the timestamp and stay
//! short. `-v` adds the module path of the emitting code.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Which fields each log line carries besides level and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineLayout {
    timestamp: bool,
    module_path: bool,
}

impl LineLayout {
    fn for_run(verbose: u8, progress: bool) -> Self {
        Self {
            timestamp: !progress,
            module_path: verbose >= 1,
        }
    }
}

/// Install the global logger for one run.
///
/// `verbose` counts `-v` flags (1 = debug, 2+ = trace), `quiet` limits output
/// to errors and `progress` says whether a progress bar shares stderr.
///
/// Only the first call in a process installs a logger; later calls return
/// `false` and leave it in place.
///
/// ```rust,no_run
/// use hashdupe::logging::init_logging;
///
/// init_logging(1, false, true);
/// log::debug!("scanning");
/// ```
pub fn init_logging(verbose: u8, quiet: bool, progress: bool) -> bool {
    let from_env = env::var("RUST_LOG").ok();

    let mut builder = Builder::new();
    match &from_env {
        Some(_) => {
            builder.parse_default_env();
        }
        None => {
            builder.filter_level(determine_level(verbose, quiet));
        }
    }
    configure_format(&mut builder, LineLayout::for_run(verbose, progress));
    builder.target(env_logger::Target::Stderr);

    if builder.try_init().is_err() {
        return false;
    }

    match from_env {
        Some(filter) => log::debug!("Log filter taken from RUST_LOG={filter}"),
        None => log::debug!("Log level {:?}", determine_level(verbose, quiet)),
    }
    true
}

/// Level implied by the CLI flags; `quiet` beats any `-v`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn configure_format(builder: &mut Builder, layout: LineLayout) {
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);

        if layout.timestamp {
            let timestamp = buf.timestamp_millis();
            write!(buf, "{timestamp} ")?;
        }
        write!(buf, "{style}{level:<5}{style:#} ")?;
        if layout.module_path {
            write!(buf, "[{}] ", record.module_path().unwrap_or("hashdupe"))?;
        }
        writeln!(buf, "{}", record.args())
    });
}
