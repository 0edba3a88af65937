use clap::Parser;
use std::process::ExitCode;

use definiens::batch::run_score;
use definiens::logging::init_logging;

mod cli;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Score {
            input,
            output,
            scoring,
        } => {
            let report = scoring
                .resolve()
                .and_then(|config| run_score(&input, &output, config));
            match report {
                Ok(report) if report.is_success() => {
                    eprintln!(
                        "✅ Scored {} documents │ {} relations │ {}",
                        report.written.len(),
                        report.relations,
                        output.display()
                    );
                    ExitCode::SUCCESS
                }
                Ok(report) => {
                    eprintln!(
                        "⚠️  Scored {} documents, {} failed",
                        report.written.len(),
                        report.failed.len()
                    );
                    for (path, reason) in &report.failed {
                        eprintln!("   {}: {}", path.display(), reason);
                    }
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("❌ {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Inspect {
            file,
            limit,
            scoring,
        } => {
            let result = scoring
                .resolve()
                .and_then(|config| cli::inspect::inspect_document(&file, config, limit));
            if let Err(e) = result {
                eprintln!("❌ {}: {}", file.display(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
