use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{formatter::DrawMode, history::HistoryFormat, provider::Units};

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// units = "metric"
/// lang = "en"
/// datetime_fmt = "%H:%M"
/// draw_mode = "FULLCOLOR"
/// history = "json"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,
    pub units: Units,
    /// Language of the provider's description texts.
    pub lang: String,
    /// strftime pattern for sunrise and sunset.
    pub datetime_fmt: String,
    pub draw_mode: DrawMode,
    pub history: HistoryFormat,
    /// Overrides the default history file location.
    pub history_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::Metric,
            lang: "en".to_string(),
            datetime_fmt: "%H:%M".to_string(),
            draw_mode: DrawMode::FullColor,
            history: HistoryFormat::None,
            history_path: None,
        }
    }
}

impl Config {
    /// Returns the API key or explains how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `weather-tint configure` or set OPW_APIKEY in a .env file."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-tint", "weather-tint")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where history records go: `history_path` if set, else the platform
    /// data directory.
    pub fn history_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.history_path {
            return Ok(path.clone());
        }

        let file = match self.history {
            HistoryFormat::Json => "history.jsonl",
            HistoryFormat::Plain | HistoryFormat::None => "history.txt",
        };
        Ok(Self::project_dirs()?.data_dir().join(file))
    }

    /// Overlay values from a dotenv file. A missing file is not an error.
    pub fn apply_env_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            debug!(path = %path.display(), "no env file");
            return Ok(());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read env file: {}", path.display()))?;
        let vars = parse_env(&contents)
            .with_context(|| format!("Failed to parse env file: {}", path.display()))?;

        self.apply_env(&vars)
    }

    /// Recognised keys: OPW_APIKEY, OPW_DEF_UNITS, OPW_DEF_LANG, DATETIME_FMT,
    /// DRAW_MODE. Others are ignored.
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(key) = vars.get("OPW_APIKEY") {
            self.api_key = Some(key.clone());
        }
        if let Some(units) = vars.get("OPW_DEF_UNITS") {
            self.units = Units::try_from(units.as_str())?;
        }
        if let Some(lang) = vars.get("OPW_DEF_LANG") {
            self.lang = lang.clone();
        }
        if let Some(fmt) = vars.get("DATETIME_FMT") {
            self.datetime_fmt = fmt.clone();
        }
        if let Some(mode) = vars.get("DRAW_MODE") {
            self.draw_mode = mode.parse()?;
        }

        Ok(())
    }
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped; values
/// lose surrounding quotes.
pub fn parse_env(contents: &str) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();

    for (line_num, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            bail!("Error on line {}: invalid format, missing '='", line_num + 1);
        };

        let key = key.trim();
        if key.is_empty() {
            bail!("Error on line {}: empty key", line_num + 1);
        }

        let value = value.trim().trim_matches('"').trim_matches('\'');
        vars.insert(key.to_string(), value.to_string());
    }

    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        assert!(err.to_string().contains("No OpenWeather API key configured"));
        assert!(err.to_string().contains("Hint: run `weather-tint configure`"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());
        assert!(cfg.require_api_key().is_err());

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.require_api_key().unwrap(), "KEY");
    }

    #[test]
    fn parse_env_skips_comments_and_trims_quotes() {
        let vars = parse_env(
            "# weather settings\n\nOPW_APIKEY = \"abc123\"\nDATETIME_FMT='%d.%m %H:%M'\n",
        )
        .unwrap();

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["OPW_APIKEY"], "abc123");
        assert_eq!(vars["DATETIME_FMT"], "%d.%m %H:%M");
    }

    #[test]
    fn parse_env_reports_line_number() {
        let err = parse_env("A=1\nbroken\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_env("=1\n").unwrap_err();
        assert!(err.to_string().contains("empty key"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config { lang: "ru".into(), ..Config::default() };
        let vars = parse_env(
            "OPW_APIKEY=KEY\nOPW_DEF_UNITS=imperial\nOPW_DEF_LANG=de\nDRAW_MODE=nocolor\nOTHER=x\n",
        )
        .unwrap();

        cfg.apply_env(&vars).unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.lang, "de");
        assert_eq!(cfg.draw_mode, DrawMode::NoColor);
        assert_eq!(cfg.datetime_fmt, "%H:%M");
    }

    #[test]
    fn env_with_bad_units_is_rejected() {
        let mut cfg = Config::default();
        let vars = parse_env("OPW_DEF_UNITS=kelvin\n").unwrap();
        assert!(cfg.apply_env(&vars).is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            units: Units::Imperial,
            draw_mode: DrawMode::NoColor,
            history: HistoryFormat::Json,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("draw_mode = \"NOCOLOR\""));
        assert!(text.contains("units = \"imperial\""));

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "lang = \"ru\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.lang, "ru");
        assert_eq!(cfg.datetime_fmt, "%H:%M");
        assert_eq!(cfg.draw_mode, DrawMode::FullColor);
    }

    #[test]
    fn explicit_history_path_wins() {
        let cfg = Config { history_path: Some("/tmp/w.txt".into()), ..Config::default() };
        assert_eq!(cfg.history_file_path().unwrap(), PathBuf::from("/tmp/w.txt"));
    }
}
