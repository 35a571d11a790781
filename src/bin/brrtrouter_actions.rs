use brrtrouter_actions::{cli::run_cli, logging};

fn main() {
    if let Err(err) = logging::init_logging(
        &std::env::var("BRRTR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
    ) {
        eprintln!("warning: {err:#}");
    }

    match run_cli() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}
