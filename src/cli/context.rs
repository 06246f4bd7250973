use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::Dragofactu;
use crate::store::{self, PreferencesStore, PREFERENCES_FILE};

/// Everything a command needs, built once per invocation
pub struct Context {
    pub config: &'static AppConfig,
    pub app: Dragofactu,
    pub prefs: PreferencesStore,
    pub format: OutputFormat,
}

impl Context {
    pub fn load(config: &'static AppConfig, format: OutputFormat) -> anyhow::Result<Self> {
        let dir = store::config_dir(&config.storage)?;
        debug!("Using config directory {}", dir.display());

        Ok(Self {
            config,
            app: Dragofactu::from_config(config)?,
            prefs: PreferencesStore::hydrate(dir.join(PREFERENCES_FILE))?,
            format,
        })
    }
}
