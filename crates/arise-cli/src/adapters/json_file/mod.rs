//! JSON file implementations of the storage ports

mod content_cache;
mod profile_repository;

pub use content_cache::JsonFileContentCache;
pub use profile_repository::JsonFileProfileRepository;

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

/// Write `bytes` next to `path` and rename over it, so readers never see a
/// half-written record.
pub(crate) async fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("record");
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    fs::write(&tmp, bytes).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

/// Remove `path`, treating an already missing file as success
pub(crate) async fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
