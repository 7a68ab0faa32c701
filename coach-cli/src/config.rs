use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// `$COACH_HOME`, or `~/.coach` when unset.
pub fn coach_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("COACH_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".coach"))
}

pub fn ensure_coach_home() -> Result<PathBuf> {
    let dir = coach_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone used to read the clock.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_morning_person")]
    pub morning_person: bool,
    #[serde(default)]
    pub window: WindowSection,
}

/// Daily work window as "HH:MM" times of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSection {
    pub start: String,
    pub end: String,
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_morning_person() -> bool {
    true
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            morning_person: default_morning_person(),
            window: WindowSection::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(coach_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_coach_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = load_config_from(Path::new("/nonexistent/coach/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.window.start, "09:00");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("morning_person = false\n").unwrap();
        assert!(!cfg.morning_person);
        assert_eq!(cfg.timezone, "America/Chicago");
        assert_eq!(cfg.window.end, "17:00");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.window.start = "07:30".to_string();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert!(s.contains("[window]"));
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }
}
