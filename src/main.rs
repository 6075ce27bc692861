/*!
 * Command-line interface for codedigest
 */

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;
use tracing::{info, warn};

use codedigest::config::{Args, Config, ReportFormat};
use codedigest::error::{CodeDigestError, Result};
use codedigest::interrupt::Interrupt;
use codedigest::logging::{self, Verbosity};
use codedigest::prompt::Prompter;
use codedigest::report::{Reporter, ScanReport};
use codedigest::scanner::Scanner;
use codedigest::writer::MarkdownWriter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codedigest", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CodeDigestError::Interrupted) => {
            eprintln!("\n❌ Analysis interrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Create and validate configuration
    let mut config = Config::from_args(&args);
    config.validate()?;

    let interrupt = Interrupt::install()?;

    // Fill in whatever the command line left open; questions go to stderr
    // so stdout holds only the banner and report
    let mut prompter = Prompter::new(io::stdin().lock(), io::stderr());
    if args.needs_menu() {
        config.options = prompter.run_menu(config.options)?;
    } else if args.comment_choice().is_none() {
        config.options.remove_comments = prompter.ask_yes_no(
            "Remove comments/documentation from code?",
            config.options.remove_comments,
        )?;
    }

    // Stdout carries only the JSON object in that mode
    if config.report == ReportFormat::Table {
        print_banner(&config, &mut io::stdout())?;
    }

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        warn!("Failed to set thread pool size: {}", e);
    }

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Processing");

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let writer = MarkdownWriter::new(config.clone());

    // Time both scan and write
    let start_time = Instant::now();
    let scanned = scanner.scan();
    progress.finish_and_clear();
    let digest = scanned?;

    writer.write(&digest, &interrupt)?;
    let duration = start_time.elapsed();
    info!("Wrote {} files in {:?}", digest.files().count(), duration);

    let report = ScanReport::new(
        &digest,
        config.output_file.display().to_string(),
        duration,
        config.options,
        config.profile,
    );
    Reporter::new(config.report).print_report(&report)?;

    Ok(())
}

fn print_banner<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let options = &config.options;
    let on_off = |flag: bool| if flag { "Yes" } else { "No" };

    writeln!(out, "🚀 Code Structure Analyzer")?;
    writeln!(out, "📂 Target: {}", config.target_dir.display())?;
    writeln!(out, "📄 Output: {}", config.output_file.display())?;
    writeln!(out, "🧹 Remove comments: {}", on_off(options.remove_comments))?;
    writeln!(out, "📝 Markdown: {}", options.markdown_mode.describe())?;
    writeln!(out, "🟨 JavaScript/JSX: {}", on_off(options.include_js))?;
    out.flush()?;
    Ok(())
}
