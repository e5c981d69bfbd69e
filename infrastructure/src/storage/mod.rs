//! File-backed persistence adapters.
//!
//! - [`JsonWorkbookSource`] implements the
//!   [`CorpusSource`](guidance_application::CorpusSource) port over a JSON
//!   workbook of named partitions.
//! - [`JsonUnreadStore`] implements the
//!   [`UnreadStore`](guidance_application::UnreadStore) port over a flat
//!   JSON object.
//! - [`JsonSessionStore`] implements the
//!   [`SessionStore`](guidance_application::SessionStore) port for one
//!   session carried between runs.
//!
//! All three rewrite their file through a sibling `.tmp` file and a rename, so
//! a crash mid-write leaves the previous contents intact.

mod json_session_store;
mod json_unread_store;
mod json_workbook;

pub use json_session_store::JsonSessionStore;
pub use json_unread_store::JsonUnreadStore;
pub use json_workbook::{JsonWorkbookSource, WorkbookError};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Durably replace `path` with `contents`.
///
/// The data goes to a sibling `.tmp` file and is synced before the rename,
/// so the rename can never land ahead of the bytes it points at. On Unix
/// the parent directory is synced afterwards to make the rename itself
/// durable.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut file = File::create(temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)?;
    sync_dir(parent.unwrap_or_else(|| Path::new(".")))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
