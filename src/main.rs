use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use wallsync::cli::Args;
use wallsync::orchestrator::Orchestrator;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("wallsync: {e:#}");
        return ExitCode::FAILURE;
    }

    let report = Orchestrator::new(args.family.targets())
        .with_color_count(usize::from(args.colors))
        .with_keyboard(args.keyboard())
        .run(&args.image);

    if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
