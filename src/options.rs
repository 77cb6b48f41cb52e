use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BackendError;

/// Backend construction options, e.g. `input_mode=2,threads=4`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsDict {
    values: BTreeMap<String, Value>,
}

impl OptionsDict {
    pub fn new() -> Self { Self::default() }

    /// Parses comma separated `key=value` pairs. Numbers and booleans are
    /// typed; anything else is kept as a string.
    pub fn parse(spec: &str) -> Result<Self, BackendError> {
        let mut out = Self::new();
        for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, raw) = item
                .split_once('=')
                .ok_or_else(|| BackendError::MalformedOptions(format!("expected key=value in '{item}'")))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(BackendError::MalformedOptions(format!("empty key in '{item}'")));
            }
            out.values.insert(key.to_string(), infer_value(raw.trim()));
        }
        Ok(out)
    }

    pub fn from_json(json: &str) -> Result<Self, BackendError> {
        let values: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| BackendError::MalformedOptions(e.to_string()))?;
        Ok(Self { values })
    }

    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BackendError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| BackendError::InvalidOption { key: key.to_string(), reason: e.to_string() }),
        }
    }

    pub fn get_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, BackendError> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

fn infer_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() { return Value::from(i); }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) { return Value::Number(n); }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.trim_matches('"').to_string()),
    }
}

/// Raw network weights as read from disk. Backends decode what they need.
#[derive(Clone, Debug)]
pub struct WeightsFile {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl WeightsFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("read weights file: {}", path.display()))?;
        log::info!("Loaded weights {} ({} bytes)", path.display(), data.len());
        Ok(Self { path: path.to_path_buf(), data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_infers_types() {
        let o = OptionsDict::parse("input_mode=2, scale=0.5,verbose=true,name=\"trivial\"").unwrap();
        assert_eq!(o.get::<i64>("input_mode").unwrap(), Some(2));
        assert_eq!(o.get::<f64>("scale").unwrap(), Some(0.5));
        assert_eq!(o.get::<bool>("verbose").unwrap(), Some(true));
        assert_eq!(o.get::<String>("name").unwrap().as_deref(), Some("trivial"));
        assert_eq!(o.get_or_default::<i64>("missing", 7).unwrap(), 7);
    }

    #[test]
    fn wrong_type_is_an_error() {
        let o = OptionsDict::parse("input_mode=classic").unwrap();
        assert!(matches!(o.get::<i64>("input_mode"), Err(BackendError::InvalidOption { .. })));
        assert!(OptionsDict::parse("input_mode").is_err());
        assert!(OptionsDict::parse("").unwrap().is_empty());
    }

    #[test]
    fn json_options() {
        let o = OptionsDict::from_json(r#"{"input_mode": 1}"#).unwrap();
        assert_eq!(o.get_or_default::<i64>("input_mode", 0).unwrap(), 1);
        assert!(OptionsDict::from_json("[1, 2]").is_err());
    }
}
