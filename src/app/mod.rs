mod wiring;

use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<Self> {
        let cli = cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.config.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting voluntariado");
        log::info!("🌐 REST API: http://{}", ctx.config.api_listen);
        log::info!("📂 Data dir: {}", ctx.config.data_dir);
        log::info!(
            "⏱️ Storage timeout: {}s",
            ctx.config.storage_timeout.as_secs()
        );
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path);
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok(Self { ctx, storage })
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.config.api_listen;
    let storage_timeout = app.ctx.config.storage_timeout;
    let rest_storage = app.storage.clone();
    let rest_shutdown = shutdown.clone();

    let mut rest_handle = tokio::spawn(rest::serve(
        api_addr,
        rest_storage,
        storage_timeout,
        rest_shutdown,
    ));

    let rest_result = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            shutdown.cancel();
            (&mut rest_handle).await
        }
        res = &mut rest_handle => res,
    };

    match rest_result {
        Ok(result) => result?,
        Err(join_err) => return Err(anyhow::anyhow!("REST server task failed: {join_err}")),
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let app = App::from_cli()?;
    run_daemon(app).await
}
