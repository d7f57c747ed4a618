//! sku-args - print sku group categories
//!
//! A small command-line tool whose flags are declared with argschema.

use argschema::cli::output::{print_output, SkuReport};
use argschema::cli::SkuArguments;
use argschema::{Arguments, ArgumentsError};
use log::LevelFilter;

fn main() {
    // Initialize logging before parsing so settings and schema messages show
    let from_env = init_logging();

    // Parse CLI arguments; exits with a usage message on bad input
    let args = SkuArguments::parse();

    // Set log level based on verbose flag; RUST_LOG still wins
    if args.verbose() && !from_env {
        log::set_max_level(LevelFilter::Debug);
    }

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Returns whether RUST_LOG configured the filter
///
/// Without RUST_LOG the logger passes debug records and the max level
/// starts at warn, so the verbose flag can raise it after parsing.
fn init_logging() -> bool {
    let from_env = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    if !from_env {
        log::set_max_level(LevelFilter::Warn);
    }
    from_env
}

fn run(args: &SkuArguments) -> Result<(), ArgumentsError> {
    log::debug!("Parsed arguments: {:?}", args);

    if let Some(shell) = args.completions() {
        return <SkuArguments as Arguments>::completions(shell, &mut std::io::stdout());
    }

    let report = SkuReport::from(args);
    print_output(&report, args.format())?;

    Ok(())
}
