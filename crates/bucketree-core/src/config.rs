//! Bucket credentials and persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Credentials and bucket coordinates for the object store.
///
/// Persisted as TOML in the user's config directory. Stored in the clear;
/// the file is only as private as the directory holding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    /// AWS access key id.
    pub access_key_id: String,

    /// AWS secret access key.
    pub secret_access_key: String,

    /// Bucket region.
    pub region: String,

    /// Bucket to browse.
    pub bucket_name: String,

    /// Custom S3-compatible endpoint. None means the default AWS endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

/// Per-field validation messages for the configuration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigErrors {
    pub access_key_id: Option<&'static str>,
    pub secret_access_key: Option<&'static str>,
    pub region: Option<&'static str>,
    pub bucket_name: Option<&'static str>,
}

impl ConfigErrors {
    /// Check that no field has a pending message.
    pub fn is_empty(&self) -> bool {
        self.access_key_id.is_none()
            && self.secret_access_key.is_none()
            && self.region.is_none()
            && self.bucket_name.is_none()
    }
}

impl BucketConfig {
    /// Check required fields, producing one message per missing field.
    pub fn validate(&self) -> ConfigErrors {
        ConfigErrors {
            access_key_id: self
                .access_key_id
                .is_empty()
                .then_some("AWS Access Key is required"),
            secret_access_key: self
                .secret_access_key
                .is_empty()
                .then_some("AWS Secret Key is required"),
            region: self.region.is_empty().then_some("AWS Region is required"),
            bucket_name: self
                .bucket_name
                .is_empty()
                .then_some("S3 Bucket Name is required"),
        }
    }

    /// Check that every required field is filled.
    pub fn is_complete(&self) -> bool {
        self.validate().is_empty()
    }

    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bucketree").join("config.toml"))
    }

    /// Load a configuration from a specific file. Missing or unparseable
    /// files read as absent.
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Load the saved configuration, if one exists.
    pub fn load() -> Option<Self> {
        Self::config_path().and_then(|path| Self::load_from(&path))
    }

    /// Save to a specific file, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Save to the default location.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> BucketConfig {
        BucketConfig {
            access_key_id: "AKIA123".to_string(),
            secret_access_key: "secret".to_string(),
            region: "us-east-1".to_string(),
            bucket_name: "my-bucket".to_string(),
            endpoint_url: None,
        }
    }

    #[test]
    fn test_validate_empty_config() {
        let errors = BucketConfig::default().validate();
        assert_eq!(errors.access_key_id, Some("AWS Access Key is required"));
        assert_eq!(errors.secret_access_key, Some("AWS Secret Key is required"));
        assert_eq!(errors.region, Some("AWS Region is required"));
        assert_eq!(errors.bucket_name, Some("S3 Bucket Name is required"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validate_partial_config() {
        let config = BucketConfig {
            access_key_id: "AKIA123".to_string(),
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors.access_key_id, None);
        assert_eq!(errors.region, Some("AWS Region is required"));
        assert!(!config.is_complete());
    }

    #[test]
    fn test_complete_config_has_no_errors() {
        let config = complete_config();
        assert!(config.validate().is_empty());
        assert!(config.is_complete());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = complete_config();
        config.save_to(&path).unwrap();

        let loaded = BucketConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BucketConfig::load_from(&dir.path().join("nope.toml")).is_none());
    }

    #[test]
    fn test_load_garbage_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(BucketConfig::load_from(&path).is_none());
    }

    #[test]
    fn test_endpoint_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = complete_config();
        config.endpoint_url = Some("http://localhost:9000".to_string());
        config.save_to(&path).unwrap();

        let loaded = BucketConfig::load_from(&path).unwrap();
        assert_eq!(
            loaded.endpoint_url.as_deref(),
            Some("http://localhost:9000")
        );
    }
}
