//! The `palu` config file: `<config dir>/palu/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_REGION: &str = "eu-west-3";

type Migration = fn(&mut Map<String, Value>);

/// `MIGRATIONS[n]` upgrades a version `n` document to version `n + 1`.
const MIGRATIONS: [Migration; CURRENT_VERSION as usize] = [add_bucket];

fn add_bucket(doc: &mut Map<String, Value>) {
    doc.entry("bucket").or_insert(Value::Null);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaluConfig {
    /// 0 when absent: written before versioning.
    #[serde(default)]
    pub config_version: u32,
    pub region: String,
    /// Without a bucket, sessions only live for the duration of a command.
    #[serde(default)]
    pub bucket: Option<String>,
    pub credentials: CredentialSource,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

impl CredentialSource {
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialSource::Inline {
                session_token: Some(_),
                ..
            } => "temporary",
            CredentialSource::Inline { .. } => "inline",
            CredentialSource::Profile { .. } => "profile",
            CredentialSource::DefaultChain => "default_chain",
        }
    }
}

/// Values read from `PALU_BUCKET` and `AWS_REGION`.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub bucket: Option<String>,
    pub region: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            bucket: read("PALU_BUCKET"),
            region: read("AWS_REGION"),
        }
    }
}

impl PaluConfig {
    pub fn new(
        region: impl Into<String>,
        bucket: Option<String>,
        credentials: CredentialSource,
    ) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            region: region.into(),
            bucket,
            credentials,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if let Some(bucket) = &overrides.bucket {
            self.bucket = Some(bucket.clone());
        }
        if let Some(region) = &overrides.region {
            self.region = region.clone();
        }
        self
    }

    /// Read a config file, upgrading older versions in memory.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("cannot read config {}: {e}", path.display()))?;
        let doc = upgrade(serde_json::from_str(&text)?)?;
        Ok(serde_json::from_value(doc)?)
    }

    /// The config file if there is one, defaults otherwise, then the
    /// environment on top.
    pub fn load_effective() -> eyre::Result<Self> {
        let config = match config_file()? {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(&EnvOverrides::from_env()))
    }

    /// Replace the file at `path` in one rename, readable by the owner only.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
        fs::create_dir_all(dir)?;

        let stamped = Self {
            config_version: CURRENT_VERSION,
            ..self.clone()
        };
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(&stamped)?)?;
        owner_only(&staging)?;
        fs::rename(&staging, path)?;

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }
}

impl Default for PaluConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION, None, CredentialSource::DefaultChain)
    }
}

fn upgrade(mut doc: Value) -> eyre::Result<Value> {
    let fields = doc
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
    let version = fields
        .get("config_version")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    if version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {version} is newer than this build supports ({CURRENT_VERSION}); upgrade palu"
        ));
    }

    for (from, migration) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        migration(fields);
        tracing::info!(from, to = from + 1, "config migrated");
    }
    fields.insert("config_version".to_string(), CURRENT_VERSION.into());
    Ok(doc)
}

#[cfg(unix)]
fn owner_only(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn owner_only(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

pub fn config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("palu").join("config.json"))
}

/// Path of the config file, if one has been written.
pub fn config_file() -> eyre::Result<Option<PathBuf>> {
    let path = config_path()?;
    Ok(path.exists().then_some(path))
}

/// Printable view of a config. Secrets never appear in it.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub region: String,
    pub bucket: Option<String>,
    pub created_at: String,
    pub credential_type: &'static str,
    pub profile_name: Option<String>,
    pub access_key_hint: Option<String>,
}

impl From<&PaluConfig> for ConfigInfo {
    fn from(config: &PaluConfig) -> Self {
        let (profile_name, access_key_hint) = match &config.credentials {
            CredentialSource::Inline { access_key_id, .. } => (None, Some(mask(access_key_id))),
            CredentialSource::Profile { profile_name } => (Some(profile_name.clone()), None),
            CredentialSource::DefaultChain => (None, None),
        };
        Self {
            region: config.region.clone(),
            bucket: config.bucket.clone(),
            created_at: config.created_at.to_string(),
            credential_type: config.credentials.kind(),
            profile_name,
            access_key_hint,
        }
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
