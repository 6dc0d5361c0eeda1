use clap::Parser;
use std::env;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "REST API for managing volunteers and institutions",
    long_about = "A small HTTP service exposing CRUD routes over the voluntarios and instituicaos collections of the Voluntariado database."
)]
pub struct Cli {
    #[arg(
        long,
        env = "VOLUNTARIADO_DATA_DIR",
        default_value = ".voluntariado/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "api-listen",
        env = "VOLUNTARIADO_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "storage-timeout-secs",
        env = "VOLUNTARIADO_STORAGE_TIMEOUT_SECS",
        default_value_t = 10,
        value_name = "SECS",
        help = "Seconds allowed for a database operation before the request answers 503"
    )]
    pub storage_timeout_secs: u64,

    #[arg(
        long = "log-file",
        env = "VOLUNTARIADO_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
