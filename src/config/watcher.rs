//! Configuration file watcher for hot reload.
//!
//! Watches the file's parent directory rather than the file itself: editors
//! that save by writing a temp file and renaming it over the original would
//! otherwise detach the watch after the first save.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServiceConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: ServiceConfig,
    update_tx: mpsc::UnboundedSender<ServiceConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, whose contents are currently `current`.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(
        path: &Path,
        current: &ServiceConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ServiceConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            current: current.clone(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for updates to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            current,
            update_tx,
        } = self;

        let dir = watch_dir(&path);
        let file_name = path.file_name().map(OsString::from);
        let mut last_sent = current;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = ?e, "Config watch error");
                        return;
                    }
                };
                if !(event.kind.is_modify() || event.kind.is_create())
                    || !touches_file(&event, file_name.as_deref())
                {
                    return;
                }

                match load_config(&watched) {
                    Ok(new_config) if new_config == last_sent => {
                        tracing::debug!(path = ?watched, "Config file touched, contents unchanged");
                    }
                    Ok(new_config) => {
                        tracing::info!(path = ?watched, "Config file changed, reloading");
                        last_sent = new_config.clone();
                        let _ = update_tx.send(new_config);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches_file(event: &Event, file_name: Option<&OsStr>) -> bool {
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some() && p.file_name() == file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind};

    #[test]
    fn bare_file_name_watches_current_dir() {
        assert_eq!(watch_dir(Path::new("service.toml")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/etc/pdf/service.toml")),
            PathBuf::from("/etc/pdf")
        );
    }

    #[test]
    fn only_events_for_the_config_file_count() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/pdf/service.toml"));
        assert!(touches_file(&event, Some(OsStr::new("service.toml"))));
        assert!(!touches_file(&event, Some(OsStr::new("other.toml"))));

        let unrelated = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/pdf/.service.toml.swp"));
        assert!(!touches_file(&unrelated, Some(OsStr::new("service.toml"))));
    }
}
