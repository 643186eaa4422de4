// src/main.rs

use simple_supervisor::cli::{self, CliArgs};
use simple_supervisor::config::{self, Config};
use simple_supervisor::errors::SupervisorError;
use simple_supervisor::exec::SystemRunner;
use simple_supervisor::logging::{self, LoggingConfig, LoggingOptions};
use simple_supervisor::run;

fn main() {
    let args = cli::parse();

    // Missing config files are a usage problem, reported like clap's own.
    if let Err(err) = config::raise_for_missing(&args.config) {
        cli::usage_error::<CliArgs>(err);
    }

    if let Err(err) = run_main(&args) {
        if let Some(usage) = err
            .downcast_ref::<SupervisorError>()
            .filter(|e| e.is_usage_error())
        {
            cli::usage_error::<CliArgs>(usage);
        }
        eprintln!("simple_supervisor error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main(args: &CliArgs) -> anyhow::Result<()> {
    let cfg: Config = config::load_paths(&args.config)?;
    logging::init_logging(LoggingOptions {
        cli_level: args.log_level,
        file_config: LoggingConfig::from_config(&cfg)?,
    })?;
    run(args, &cfg, &mut SystemRunner::new())
}
