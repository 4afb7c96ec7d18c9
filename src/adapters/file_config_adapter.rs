//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_store_config() {
        let content = r#"
[store]
backend = json
path = trades.json

[server]
listen = 127.0.0.1:8000
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_string("store", "backend"), Some("json".to_string()));
        assert_eq!(adapter.get_string("store", "path"), Some("trades.json".to_string()));
        assert_eq!(
            adapter.get_string("server", "listen"),
            Some("127.0.0.1:8000".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[store]\nbackend = json\n").unwrap();
        assert_eq!(adapter.get_string("store", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[sqlite]\npool_size = 8\n").unwrap();
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 8);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[sqlite]\n").unwrap();
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 4);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[sqlite]\npool_size = lots\n").unwrap();
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 4);
    }

    #[test]
    fn get_bool_recognizes_truthy_and_falsy_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[server]\na = true\nb = yes\nc = 0\n").unwrap();
        assert!(adapter.get_bool("server", "a", false));
        assert!(adapter.get_bool("server", "b", false));
        assert!(!adapter.get_bool("server", "c", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[server]\n").unwrap();
        assert!(adapter.get_bool("server", "missing", true));
        assert!(!adapter.get_bool("server", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[store]\npath = /var/lib/blotter/trades.json\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("store", "path"),
            Some("/var/lib/blotter/trades.json".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/path/config.ini").is_err());
    }
}
