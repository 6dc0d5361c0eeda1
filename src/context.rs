use std::time::Duration;

use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let cfg = Configuration {
            data_dir: cli.data_dir.clone(),
            api_listen: cli.api_listen,
            storage_timeout: Duration::from_secs(cli.storage_timeout_secs),
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        };
        Self { config: cfg }
    }
}
