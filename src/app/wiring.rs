use crate::{context, storage};
use anyhow::{Context, Result};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    let data_dir = std::path::PathBuf::from(&ctx.config.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    let data_dir = std::path::PathBuf::from(&ctx.config.data_dir);
    let db_path = data_dir
        .join("voluntariado.sqlite")
        .to_string_lossy()
        .into_owned();
    let sqlite = storage::SqliteStorage::new(&db_path);
    if ctx.config.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}
