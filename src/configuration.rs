use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone)]
pub struct Configuration {
    pub data_dir: String,
    pub api_listen: SocketAddr,
    pub storage_timeout: Duration,
    pub log_file: Option<String>,
    pub reset: bool,
}
