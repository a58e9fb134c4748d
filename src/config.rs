use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::constants::{DEFAULT_LOG_LEVEL, MARQUEE_REPEAT_LIMIT, TICKER_DELAY_MS};
use crate::indication::TickerConfig;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    /// marquee timing
    pub ticker: Option<TickerSettings>,
    /// host capabilities the daemon pretends to have
    pub host: Option<HostSettings>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct TickerSettings {
    pub delay_ms: Option<u64>,
    pub marquee_repeat_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct HostSettings {
    pub always_on: Option<bool>,
    pub wake_trigger: Option<bool>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn ticker_config(&self) -> TickerConfig {
        let ticker = self.ticker.clone().unwrap_or_default();
        TickerConfig {
            delay: Duration::from_millis(ticker.delay_ms.unwrap_or(TICKER_DELAY_MS)),
            marquee_repeat_limit: ticker.marquee_repeat_limit.unwrap_or(MARQUEE_REPEAT_LIMIT),
        }
    }

    pub fn always_on(&self) -> bool {
        self.host.as_ref().and_then(|h| h.always_on).unwrap_or(false)
    }

    pub fn wake_trigger(&self) -> bool {
        self.host.as_ref().and_then(|h| h.wake_trigger).unwrap_or(true)
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "ambient-indication", about = "Ambient track indication engine", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// delay before the marquee starts, in ms
    #[arg(long)]
    pub ticker_delay_ms: Option<u64>,
    #[arg(long)]
    pub marquee_repeat_limit: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub always_on: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub wake_trigger: Option<bool>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer defaults, YAML and `cli` into an effective config.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        log::debug!("Using config file {}", p.display());
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/ambient-indication/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/ambient-indication/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/ambient-indication.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["ambient-indication.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    from_yaml_str(&s)
}

pub fn from_yaml_str(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.ticker, src.ticker) {
        (None, Some(t)) => dst.ticker = Some(t),
        (Some(d), Some(s)) => {
            if s.delay_ms.is_some()             { d.delay_ms = s.delay_ms; }
            if s.marquee_repeat_limit.is_some() { d.marquee_repeat_limit = s.marquee_repeat_limit; }
        }
        _ => {}
    }
    match (&mut dst.host, src.host) {
        (None, Some(h)) => dst.host = Some(h),
        (Some(d), Some(s)) => {
            if s.always_on.is_some()    { d.always_on = s.always_on; }
            if s.wake_trigger.is_some() { d.wake_trigger = s.wake_trigger; }
        }
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    if cli.ticker_delay_ms.is_some() || cli.marquee_repeat_limit.is_some() {
        let ticker = cfg.ticker.get_or_insert_with(TickerSettings::default);
        if cli.ticker_delay_ms.is_some()      { ticker.delay_ms = cli.ticker_delay_ms; }
        if cli.marquee_repeat_limit.is_some() { ticker.marquee_repeat_limit = cli.marquee_repeat_limit; }
    }

    if cli.always_on.is_some() || cli.wake_trigger.is_some() {
        let host = cfg.host.get_or_insert_with(HostSettings::default);
        if cli.always_on.is_some()    { host.always_on = cli.always_on; }
        if cli.wake_trigger.is_some() { host.wake_trigger = cli.wake_trigger; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(ticker) = cfg.ticker.as_ref() {
        if ticker.delay_ms == Some(0) {
            return Err(ConfigError::Validation("ticker delay_ms must be > 0".into()));
        }
        if ticker.marquee_repeat_limit == Some(0) {
            return Err(ConfigError::Validation("ticker marquee_repeat_limit must be > 0".into()));
        }
    }
    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(ConfigError::Validation(format!("unknown log_level: {level}"))),
        }
    }
    Ok(())
}
