use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub static DEFAULT_CONFIG_FILE: &str = "config.json";
pub static ENV_PREFIX: &str = "SXURL";

/// Everything one run needs to know; passed explicitly into the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub target_lang: String,
    pub source_lang: String,
    /// Stop once this many rows are ready for translation
    pub max_urls: usize,
    pub articles: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_lang: "yo".to_string(),
            source_lang: "en".to_string(),
            max_urls: 15,
            articles: vec![],
        }
    }
}

impl GeneratorConfig {
    /// Reads the JSON config file (if present) and `SXURL_*` environment
    /// variables, in that order of precedence from lowest to highest.
    /// A missing file is only an error if its path was given explicitly.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };
        if required && !Path::new(path).exists() {
            return Err(anyhow!("Can not open config file at {path}"));
        }
        let settings = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Json).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator("|")
                    .with_list_parse_key("articles"),
            )
            .build()
            .with_context(|| format!("Can not read configuration from {path}"))?;
        let ret: Self = settings
            .try_deserialize()
            .context("Can not parse configuration")?;
        Ok(ret)
    }

    /// Applies `key=value` pairs from the command line on top of `self`.
    pub fn apply_pairs(&mut self, pairs: &HashMap<String, String>) -> Result<()> {
        for (key, value) in pairs {
            match key.as_str() {
                "target_lang" => self.target_lang = value.trim().to_string(),
                "source_lang" => self.source_lang = value.trim().to_string(),
                "max_urls" => {
                    self.max_urls = value
                        .trim()
                        .parse::<usize>()
                        .map_err(|e| anyhow!("Bad max_urls '{value}': {e}"))?;
                }
                "articles" => self.articles = Self::split_articles(value),
                "config" => {} // Consumed before loading
                other => tracing::warn!("Ignoring unknown parameter '{other}'"),
            }
        }
        Ok(())
    }

    /// Splits a list of titles on `|` or newlines. Neither can occur in a
    /// MediaWiki title.
    pub fn split_articles(s: &str) -> Vec<String> {
        s.split(['|', '\n'])
            .map(|t| t.to_string())
            .collect()
    }

    /// Checks language codes and drops blank article titles.
    pub fn validated(mut self) -> Result<Self> {
        lazy_static! {
            static ref RE_LANG: Regex =
                Regex::new(r"^[a-z][a-z0-9-]{0,19}$").expect("RE_LANG does not parse");
        }
        self.target_lang = self.target_lang.trim().to_lowercase();
        self.source_lang = self.source_lang.trim().to_lowercase();
        for (name, lang) in [
            ("target_lang", &self.target_lang),
            ("source_lang", &self.source_lang),
        ] {
            if !RE_LANG.is_match(lang) {
                return Err(anyhow!("Invalid language code for {name}: '{lang}'"));
            }
        }
        self.articles = self
            .articles
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();
        Ok(self)
    }

    pub fn output_file_name(&self) -> String {
        format!("sx_urls_{}_to_{}.wiki", self.source_lang, self.target_lang)
    }
}
