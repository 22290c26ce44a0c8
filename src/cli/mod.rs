pub mod entries;
pub mod prompt;
pub mod search;

use anyhow::Result;
use std::path::Path;

use crate::config::ReverieConfig;
use crate::journal::Journal;
use crate::server::Services;
use crate::storage::PathPicker;

/// One CLI invocation's view of the journal.
///
/// Every invocation starts on the fallback store; `--dir` selects a directory
/// for this run only.
pub struct Session {
    pub services: Services,
    pub journal: Journal,
}

impl Session {
    pub async fn open(config: &ReverieConfig, dir: Option<&Path>) -> Result<Self> {
        let services = Services::from_config(config)?;
        let mut journal = services.open_journal().await;

        if let Some(dir) = dir {
            let picker = PathPicker::new(dir);
            if !journal.select_directory(&picker).await {
                eprintln!(
                    "warning: could not use {} as a journal directory. \
                     Entries will be saved in fallback storage ({}).",
                    dir.display(),
                    config.resolved_fallback_path().display()
                );
            }
        }

        Ok(Self { services, journal })
    }
}
