use crate::generator::Generator;
use crate::generator_config::GeneratorConfig;
use crate::render_wikitext::RenderSummary;
use crate::wiki_api::HttpWikiApi;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::form_urlencoded;

pub async fn command_line_usage() -> Result<()> {
    let config = config_from_args(std::env::args().skip(1))?;
    let api = HttpWikiApi::new().context("Can not create HTTP client")?;
    if config.articles.is_empty() {
        tracing::warn!("No articles configured, the table will be empty");
    }
    tracing::info!(
        "Checking {} articles from {} to {}, up to {} ready",
        config.articles.len(),
        config.source_lang,
        config.target_lang,
        config.max_urls
    );

    let (table, rows) = Generator::new(&api, &config).generate_table().await;
    tracing::info!("{}", RenderSummary::new_from_rows(&rows));

    println!("=== GENERATED WIKI TABLE ===\n{table}");
    let path = write_output(Path::new("."), &config, &table).await?;
    println!("Saved to: {}", path.display());
    Ok(())
}

/// Builds the configuration from the command line arguments (without the
/// program name). The first argument, if any, is a form-urlencoded string
/// such as `target_lang=ha&max_urls=5&articles=A|B`.
pub fn config_from_args<I: Iterator<Item = String>>(mut args: I) -> Result<GeneratorConfig> {
    let pairs: HashMap<String, String> = match args.next() {
        Some(argument) => form_urlencoded::parse(argument.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => HashMap::new(),
    };
    let mut config = GeneratorConfig::load(pairs.get("config").map(|s| s.as_str()))?;
    config.apply_pairs(&pairs)?;
    config.validated()
}

/// Writes the table into `dir`, named after the language pair.
pub async fn write_output(dir: &Path, config: &GeneratorConfig, table: &str) -> Result<PathBuf> {
    let path = dir.join(config.output_file_name());
    tokio::fs::write(&path, table)
        .await
        .with_context(|| format!("Can not write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> std::vec::IntoIter<String> {
        v.iter()
            .map(|s| s.to_string())
            .collect::<Vec<String>>()
            .into_iter()
    }

    #[test]
    fn test_config_from_args() {
        let c = config_from_args(args(&[
            "target_lang=ha&source_lang=en&max_urls=5&articles=Kano|Abuja+%28birni%29",
        ]))
        .unwrap();
        assert_eq!(c.target_lang, "ha");
        assert_eq!(c.max_urls, 5);
        assert_eq!(c.articles, vec!["Kano", "Abuja (birni)"]);
    }

    #[test]
    fn test_config_from_args_invalid_lang() {
        assert!(config_from_args(args(&["target_lang=../x"])).is_err());
    }

    #[test]
    fn test_config_from_args_missing_config_file() {
        assert!(config_from_args(args(&["config=/nonexistent/sx.json"])).is_err());
    }

    #[tokio::test]
    async fn test_write_output() {
        let dir = std::env::temp_dir().join(format!("sx_url_test_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let config = GeneratorConfig {
            target_lang: "ig".to_string(),
            ..Default::default()
        };
        let path = write_output(&dir, &config, "{|\n|}").await.unwrap();
        assert_eq!(path.file_name().unwrap(), "sx_urls_en_to_ig.wiki");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "{|\n|}");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
