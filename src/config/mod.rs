use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    #[serde(alias = "data")]
    pub dataset: Option<String>,
    pub dictionary: Option<String>,
    #[serde(alias = "recommend_endpoint")]
    pub endpoint: Option<String>,
    pub timeout: Option<usize>,
    pub proxy: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".factorsphere").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents)
}

fn default_config_yaml() -> String {
    r#"# factorsphere config
#
# Location (default):
#   ~/.factorsphere/config.yml

# Dataset: a local path or an http(s) URL
dataset: ./src/data/factorsphere_data.json
dictionary: ./src/data/dictionary.csv

# Recommendation service
endpoint: http://127.0.0.1:5000/recommend

# HTTP
timeout: 10
# proxy: http://127.0.0.1:8080

# Search defaults
limit: 20
sort: none

# Output (optional)
# output: ./results.json
# output_format: json

no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_yaml_parses() {
        let cfg = parse_config(&default_config_yaml()).unwrap();
        assert_eq!(cfg.limit, Some(20));
        assert_eq!(cfg.sort.as_deref(), Some("none"));
        assert_eq!(cfg.endpoint.as_deref(), Some("http://127.0.0.1:5000/recommend"));
        assert!(cfg.proxy.is_none());
    }

    #[test]
    fn aliases_are_accepted() {
        let cfg = parse_config("data: ./x.json\nrecommend_endpoint: http://h/r\n").unwrap();
        assert_eq!(cfg.dataset.as_deref(), Some("./x.json"));
        assert_eq!(cfg.endpoint.as_deref(), Some("http://h/r"));
    }

    #[test]
    fn missing_file_is_allowed_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yml");
        assert!(load_config(&path, true).is_ok());
        assert!(load_config(&path, false)
            .unwrap_err()
            .contains("config file not found"));
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yml");
        ensure_default_config_file(&path).unwrap();
        std::fs::write(&path, "limit: 5\n").unwrap();
        ensure_default_config_file(&path).unwrap();
        assert_eq!(load_config(&path, false).unwrap().limit, Some(5));
    }
}
