use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::dribble::{DribbleColumn, DribbleOptions};

pub const DEFAULT_DEMO_MATCHES: u64 = 3;
pub const DEFAULT_DEMO_EVENTS: usize = 1800;

/// Settings for the `pitch_events` report. Flags win over environment
/// variables, which win over defaults.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub event_paths: Vec<PathBuf>,
    pub demo: bool,
    pub dribble: DribbleOptions,
    pub window_player: Option<String>,
    pub window_event_type: String,
    pub xlsx_path: Option<PathBuf>,
    pub load_parallelism: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            event_paths: Vec::new(),
            demo: false,
            dribble: DribbleOptions::default(),
            window_player: None,
            window_event_type: "Dribble".to_string(),
            xlsx_path: None,
            load_parallelism: 6,
        }
    }
}

impl ReportConfig {
    pub fn from_env_and_args() -> Result<Self> {
        let args = env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(&args, |key| env::var(key).ok())
    }

    /// `lookup` stands in for the process environment so tests can feed it.
    pub fn from_sources(
        args: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut cfg = ReportConfig::default();

        if let Some(raw) = non_empty(lookup("PITCH_EVENTS_PATH")) {
            cfg.event_paths.extend(
                raw.split([',', ';'])
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            );
        }
        if let Some(raw) = non_empty(lookup("PITCH_EVENTS_XLSX")) {
            cfg.xlsx_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = non_empty(lookup("PITCH_EVENTS_SORT_BY")) {
            cfg.dribble.sort_by = raw
                .parse::<DribbleColumn>()
                .context("PITCH_EVENTS_SORT_BY")?;
        }
        if let Some(n) = lookup("LOAD_PARALLELISM").and_then(|v| v.trim().parse::<usize>().ok()) {
            cfg.load_parallelism = n.clamp(1, 32);
        }

        let cli_paths = flag_values(args, "--events");
        if !cli_paths.is_empty() {
            cfg.event_paths = cli_paths.into_iter().map(PathBuf::from).collect();
        }
        if let Some(raw) = flag_value(args, "--sort-by") {
            cfg.dribble.sort_by = raw.parse::<DribbleColumn>()?;
        }
        if let Some(raw) = flag_value(args, "--xlsx") {
            cfg.xlsx_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = flag_value(args, "--player") {
            cfg.window_player = Some(raw);
        }
        if let Some(raw) = flag_value(args, "--event-type") {
            cfg.window_event_type = raw;
        }
        cfg.dribble.ascending = has_flag(args, "--ascending");
        cfg.demo = has_flag(args, "--demo");

        if cfg.event_paths.is_empty() && !cfg.demo {
            return Err(anyhow!(
                "no event source: pass --events <file|dir>, set PITCH_EVENTS_PATH, or use --demo"
            ));
        }
        Ok(cfg)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// First value of `--name value` or `--name=value`.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    flag_values(args, name).into_iter().next()
}

pub fn flag_values(args: &[String], name: &str) -> Vec<String> {
    let prefix = format!("{name}=");
    let mut out = Vec::new();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            if !value.trim().is_empty() {
                out.push(value.trim().to_string());
            }
            continue;
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.starts_with("--")
            && !next.trim().is_empty()
        {
            out.push(next.trim().to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_in_both_forms() {
        let a = args(&["--events", "a.json", "--events=b", "--sort-by=Success rate"]);
        assert_eq!(flag_values(&a, "--events"), vec!["a.json", "b"]);
        assert_eq!(flag_value(&a, "--sort-by").as_deref(), Some("Success rate"));
        assert_eq!(flag_value(&a, "--xlsx"), None);
    }

    #[test]
    fn cli_overrides_env() {
        let env = |key: &str| match key {
            "PITCH_EVENTS_PATH" => Some("from_env.json".to_string()),
            "PITCH_EVENTS_SORT_BY" => Some("total".to_string()),
            "LOAD_PARALLELISM" => Some("99".to_string()),
            _ => None,
        };
        let cfg =
            ReportConfig::from_sources(&args(&["--events", "cli.json", "--ascending"]), env)
                .unwrap();
        assert_eq!(cfg.event_paths, vec![PathBuf::from("cli.json")]);
        assert_eq!(cfg.dribble.sort_by, DribbleColumn::Total);
        assert!(cfg.dribble.ascending);
        assert_eq!(cfg.load_parallelism, 32);
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(ReportConfig::from_sources(&[], |_| None).is_err());
        let cfg = ReportConfig::from_sources(&args(&["--demo"]), |_| None).unwrap();
        assert!(cfg.demo);
        assert_eq!(cfg.window_event_type, "Dribble");
    }

    #[test]
    fn bad_sort_column_is_reported() {
        let err = ReportConfig::from_sources(&args(&["--demo", "--sort-by", "xg"]), |_| None)
            .unwrap_err();
        assert!(err.to_string().contains("xg"));
    }
}
