use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "URANIA_CONFIG";

/// Env var overriding `engine.ephemeris_path`.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Relative locations tried when no explicit path is given, matching how the
/// binaries are launched from the workspace root or from a crate directory.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

/// Which ephemeris implementation computes positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Analytic,
    Swiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub backend: BackendKind,
    pub ephemeris_path: Option<PathBuf>,
    /// House-system code, validated by the engine when the ephemeris handle is built.
    pub house_system: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Analytic,
            ephemeris_path: None,
            house_system: default_house_system(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineToml {
    #[serde(default)]
    backend: BackendKind,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default = "default_house_system")]
    house_system: String,
}

fn default_house_system() -> String {
    "placidus".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineToml>,
}

/// Parse settings from TOML text. A missing `[engine]` table yields defaults.
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse [engine] settings: {e}"))?;
    Ok(root
        .engine
        .map(|cfg| EngineSettings {
            backend: cfg.backend,
            ephemeris_path: cfg.ephemeris_path,
            house_system: cfg.house_system,
        })
        .unwrap_or_default())
}

/// Read and parse one config file.
pub fn load_engine_settings_from(path: &Path) -> anyhow::Result<EngineSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_engine_settings(&text).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

/// Resolve settings from an explicit path, then `URANIA_CONFIG`, then the
/// default relative paths, then built-in defaults. `SWISS_EPHEMERIS_PATH`
/// overrides the ephemeris path from any source.
pub fn load_engine_settings(explicit: Option<&Path>) -> anyhow::Result<EngineSettings> {
    resolve_engine_settings(explicit, |key| env::var(key).ok())
}

/// [`load_engine_settings`] with an injectable environment lookup.
pub fn resolve_engine_settings(
    explicit: Option<&Path>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<EngineSettings> {
    let from_env = env_lookup(CONFIG_PATH_ENV).map(PathBuf::from);
    let mut settings = match explicit.map(Path::to_path_buf).or(from_env) {
        // a named file must exist
        Some(path) => load_engine_settings_from(&path)?,
        None => DEFAULT_CONFIG_PATHS
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .map(load_engine_settings_from)
            .transpose()?
            .unwrap_or_default(),
    };

    if let Some(path) = env_lookup(EPHEMERIS_PATH_ENV).filter(|p| !p.is_empty()) {
        settings.ephemeris_path = Some(PathBuf::from(path));
    }
    Ok(settings)
}
