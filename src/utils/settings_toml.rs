//! Load `.loganalyzer.toml` from a directory (CLI only). The lib takes everything through `BatchOpts`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;
use crate::{Opts, Status};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SettingsToml {
    #[serde(default)]
    settings: AnalyzeSection,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeSection {
    output: Option<String>,
    status: Option<Status>,
    workers: Option<usize>,
    seed: Option<u64>,
    verbose: Option<bool>,
}

/// Load the settings file from `dir` if present. Missing or unreadable → None; malformed → warn and None.
pub(crate) fn load_settings_toml(dir: &Path) -> Option<SettingsToml> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_settings(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub(crate) fn parse_settings(s: &str) -> Result<SettingsToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = Some(v);
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before applying CLI flags.
pub(crate) fn apply_file_to_opts(file: &SettingsToml, opts: &mut Opts) {
    let section = &file.settings;
    if let Some(ref p) = section.output {
        opts.output = Some(PathBuf::from(p));
    }
    if let Some(status) = section.status {
        opts.status_filter = Some(status);
    }
    apply_file_opt!(section, opts, workers);
    apply_file_opt!(section, opts, seed);
    if let Some(v) = section.verbose {
        opts.verbose = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_fill_opts() {
        let file = parse_settings(
            r#"
[settings]
output = "reports/out.json"
status = "FAILED"
workers = 8
seed = 7
verbose = true
"#,
        )
        .unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.output, Some(PathBuf::from("reports/out.json")));
        assert_eq!(opts.status_filter, Some(Status::Failed));
        assert_eq!(opts.workers, Some(8));
        assert_eq!(opts.seed, Some(7));
        assert!(opts.verbose);
    }

    #[test]
    fn absent_fields_leave_opts_untouched() {
        let file = parse_settings("[settings]\nworkers = 2\n").unwrap();
        let mut opts = Opts {
            seed: Some(1),
            ..Default::default()
        };
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.seed, Some(1));
        assert_eq!(opts.workers, Some(2));
        assert_eq!(opts.output, None);
    }

    #[test]
    fn loads_package_named_file_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings_toml(dir.path()).is_none());
        assert_eq!(PackagePaths::get().settings_filename(), ".loganalyzer.toml");
        std::fs::write(dir.path().join(".loganalyzer.toml"), "[settings]\nseed = 3\n").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&load_settings_toml(dir.path()).unwrap(), &mut opts);
        assert_eq!(opts.seed, Some(3));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_settings("[settings]\nstatus = \"MAYBE\"\n").is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings_toml(dir.path()).is_none());
    }
}
