//! Replays migration files against a live connection.
//!
//! Every matching file is executed on every run; nothing records what has
//! already been applied.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use strata_core::driver::MigrationKind;
use strata_core::error::{Result, StrataError};

use crate::db::Connection;

/// Runs every migration in a directory against one connection.
pub struct MigrationRunner<'c> {
    conn: &'c mut Connection,
}

impl<'c> MigrationRunner<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    /// Execute every file in `dir` whose extension matches the connection.
    ///
    /// Files run in directory-listing order, which is not sorted. Each file
    /// is read and executed before the next is read. The first failure stops
    /// the run; files already executed stay applied.
    pub async fn run(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        let kind = self.conn.migration_kind();
        let paths = list_migrations(dir, kind)?;

        let mut applied = Vec::with_capacity(paths.len());
        for path in paths {
            info!("Applying migration: {}", path.display());

            let script = std::fs::read_to_string(&path).map_err(|source| {
                StrataError::ReadMigration {
                    path: path.clone(),
                    source,
                }
            })?;

            self.conn
                .execute_script(&script)
                .await
                .map_err(|e| StrataError::Execute {
                    path: path.clone(),
                    message: e.to_string(),
                })?;

            info!("Migration applied: {}", path.display());
            applied.push(path);
        }

        debug!("Applied {} migrations from {}", applied.len(), dir.display());
        Ok(applied)
    }
}

/// List the files in `dir` that a run would execute, in execution order.
pub fn list_migrations(dir: &Path, kind: MigrationKind) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(StrataError::MigrationsDirNotFound(dir.to_path_buf()));
    }

    let list_err = |source| StrataError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();

        if entry.file_type().map_err(list_err)?.is_dir() {
            debug!("Skipping directory {}", path.display());
            continue;
        }

        if path.extension().is_some_and(|ext| ext == kind.extension()) {
            paths.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    Ok(paths)
}
