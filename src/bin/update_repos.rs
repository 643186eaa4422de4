// src/bin/update_repos.rs

use simple_supervisor::cli::{self, UpdateReposArgs};
use simple_supervisor::config;
use simple_supervisor::exec::SystemRunner;
use simple_supervisor::logging::{self, LoggingConfig, LoggingOptions};
use simple_supervisor::run_update_repos;

fn main() {
    let args = cli::parse_update_repos();

    if let Err(err) = config::raise_for_missing(&args.mode.args().config) {
        cli::usage_error::<UpdateReposArgs>(err);
    }

    if let Err(err) = run_main(&args) {
        eprintln!("update_repos error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main(args: &UpdateReposArgs) -> anyhow::Result<()> {
    let cfg = config::load_paths(&args.mode.args().config)?;
    logging::init_logging(LoggingOptions {
        cli_level: args.log_level,
        file_config: LoggingConfig::from_config(&cfg)?,
    })?;
    run_update_repos(args, &cfg, SystemRunner::new())
}
