//! Removal of files left behind by earlier runs

use crate::core::config::DriverConfig;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Remove the intermediate artifact and all plan files named by `config`
///
/// Returns the paths that were actually removed. Missing files are skipped.
pub fn cleanup_temporary_files(config: &DriverConfig) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    if remove_if_exists(&config.sas_file)? {
        removed.push(config.sas_file.clone());
    }
    if remove_if_exists(&config.plan_file)? {
        removed.push(config.plan_file.clone());
    }

    // Anytime searches number their plans plan.1, plan.2, ...
    for index in 1.. {
        let numbered = numbered_plan(&config.plan_file, index);
        if !remove_if_exists(&numbered)? {
            break;
        }
        removed.push(numbered);
    }

    info!("Removed {} temporary file(s)", removed.len());
    Ok(removed)
}

fn numbered_plan(plan_file: &Path, index: usize) -> PathBuf {
    let mut name = plan_file.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
