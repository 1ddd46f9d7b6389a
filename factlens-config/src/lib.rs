//! Loader for workspace configuration with YAML + environment overlays.
//!
//! The typed schema lives in `factlens-common` ([`FactlensConfig`]); this
//! crate only owns the merge pipeline: YAML file (optional) →
//! `FACTLENS_`-prefixed environment variables → recursive `${VAR}` expansion
//! → strongly typed config. Everything is resolved once at process start;
//! nothing reads the environment afterwards.
use config::{Config, ConfigError, Environment, File};
use factlens_common::FactlensConfig;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct FactlensConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FactlensConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FactlensConfigLoader {
    /// Start with sensible defaults: YAML file + `FACTLENS_` env overrides.
    ///
    /// ```
    /// use factlens_config::FactlensConfigLoader;
    ///
    /// let config = FactlensConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.server.listen, "127.0.0.1:3000");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("FACTLENS").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`Self::with_file`], but a missing file is fine. Headless
    /// deployments can rely purely on environment variables and defaults.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use factlens_config::FactlensConfigLoader;
    ///
    /// std::env::set_var("DOCTEST_GROQ_KEY", "injected-from-env");
    ///
    /// let config = FactlensConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// completion:
    ///   model: "llama-3.1-70b-versatile"
    ///   api_key: "${DOCTEST_GROQ_KEY}"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.completion.api_key.as_deref(), Some("injected-from-env"));
    /// assert_eq!(config.completion.endpoint, "https://api.groq.com/openai/v1");
    ///
    /// std::env::remove_var("DOCTEST_GROQ_KEY");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    ///
    /// The loader combines YAML snippets with `FACTLENS_`-prefixed
    /// environment variables and expands `${VAR}` placeholders before
    /// materialising [`FactlensConfig`]. Unknown variables are left as-is;
    /// `factlens_common::credential` treats such leftovers as absent keys.
    pub fn load(self) -> Result<FactlensConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        // Deserialize into the strongly-typed config
        let typed: FactlensConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
