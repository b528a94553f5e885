///! Entity loading collaborators
///!
///! Satellites are loaded once at startup. A failure here is fatal to the
///! session, so every source reports errors with enough context to diagnose.
use async_trait::async_trait;
use orbit_common::Satellite;

use crate::config::SourceConfig;

mod czml;
pub use czml::parse_czml;

mod file;
pub use file::FileSource;

mod ion;
pub use ion::{IonSource, DEFAULT_ION_BASE_URL};

#[async_trait]
pub trait SatelliteSource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    async fn load_all(&self) -> anyhow::Result<Vec<Satellite>>;
}

/// Build the source selected in the configuration
pub fn from_config(config: &SourceConfig) -> Box<dyn SatelliteSource> {
    match config {
        SourceConfig::File { path } => Box::new(FileSource::new(path)),
        SourceConfig::Ion { base_url, access_token } => {
            Box::new(IonSource::new(base_url.clone(), access_token.clone()))
        }
    }
}
