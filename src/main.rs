/*!
 * Command-line interface for dumpctx
 */

use std::io;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use dumpctx::config::{Args, Config};
use dumpctx::error::Result;
use dumpctx::report::{ReportFormat, Reporter, ScanReport};
use dumpctx::{SnapshotWriter, TreeCollector};

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        generate(shell, &mut cmd, "dumpctx", &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);

    let config = Config::from_args(args);
    let exit_code = match run(config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };

    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg:.dim.white} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let start_time = Instant::now();

    let collector = TreeCollector::new(config.clone(), Arc::new(progress.clone()));
    let collected = collector.collect();
    progress.finish_and_clear();

    let Some(snapshot) = collected? else {
        println!("No matching files found");
        return Ok(());
    };

    let writer = SnapshotWriter::new(config);
    let output_path = writer.write(&snapshot)?;
    let duration = start_time.elapsed();

    println!("Output file created at: {}", output_path.display());

    let report = ScanReport::new(output_path.display().to_string(), duration, &snapshot);
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
