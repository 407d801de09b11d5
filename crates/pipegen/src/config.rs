//! Optional tool settings read from `<PIPEGEN_HOME>/config.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub logging: Option<LoggingCfg>,
    pub output: Option<OutputCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputCfg {
    /// Merge pipelines per (provider, model) before output.
    pub merge: Option<bool>,
    /// `none`, `json`, `yaml` or `csv`.
    pub export_format: Option<String>,
    pub path: Option<String>,
}

pub fn load_settings(home: &Path) -> anyhow::Result<Option<Settings>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)?;
    let cfg: Settings = toml::from_str(&s)?;
    Ok(Some(cfg))
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// `$PIPEGEN_HOME` if set, else `$HOME/.pipegen`, else `./.pipegen`.
pub fn resolve_home(explicit: &str) -> PathBuf {
    if !explicit.is_empty() {
        return expand_home(explicit);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".pipegen");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".pipegen")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(dir.path()).unwrap().is_none());
    }

    #[test]
    fn reads_logging_and_output_sections() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[logging]\nlevel = \"debug\"\njson = true\n\n[output]\nmerge = true\nexport_format = \"yaml\"\n",
        )
        .unwrap();
        let cfg = load_settings(dir.path()).unwrap().expect("settings present");
        let logging = cfg.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.json, Some(true));
        let output = cfg.output.unwrap();
        assert_eq!(output.merge, Some(true));
        assert_eq!(output.export_format.as_deref(), Some("yaml"));
        assert!(output.path.is_none());
    }

    #[test]
    fn explicit_home_wins() {
        assert_eq!(resolve_home("/opt/pipegen"), PathBuf::from("/opt/pipegen"));
    }
}
