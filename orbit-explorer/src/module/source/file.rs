///! Local CZML file source
use super::{czml::parse_czml, SatelliteSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use orbit_common::Satellite;
use std::path::{Path, PathBuf};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SatelliteSource for FileSource {
    fn describe(&self) -> String {
        format!("file {:?}", self.path)
    }

    async fn load_all(&self) -> Result<Vec<Satellite>> {
        tracing::info!("Loading satellites from {:?}", self.path);

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read CZML file: {:?}", self.path))?;

        parse_czml(&content).context(format!("Failed to parse CZML file: {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("orbit-explorer-{}.czml", uuid::Uuid::now_v7()));
        tokio::fs::write(
            &path,
            r#"[{"id": "document"}, {"id": "25544", "name": "ISS", "properties": {"orbit_class": "LEO"}}]"#,
        )
        .await
        .unwrap();

        let sats = FileSource::new(&path).load_all().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(sats.len(), 1);
        assert_eq!(sats[0].id, "25544");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = FileSource::new("definitely/not/here.czml");
        let err = source.load_all().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read CZML file"));
    }
}
