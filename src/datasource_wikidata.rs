use crate::lookup::Lookup;
use crate::wiki_api::{WikiApi, WIKIDATA_API_URL};
use serde_json::Value;
use std::collections::HashMap;
use std::time;

/// Maximum number of titles `wbgetentities` accepts per request
pub static WIKIDATA_BATCH_SIZE: usize = 50;
pub static WIKIDATA_BATCH_DELAY_MS: u64 = 1000;
/// The English-equivalent title always comes from this sitelink
pub static PIVOT_SITE: &str = "enwiki";

/// Target-language input title -> English-equivalent title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReferenceMap {
    titles: HashMap<String, String>,
}

impl CrossReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target_title: &str) -> Option<&str> {
        self.titles.get(target_title).map(|s| s.as_str())
    }

    pub fn insert(&mut self, target_title: String, english_title: String) {
        self.titles.insert(target_title, english_title);
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Normalizes a title the way MediaWiki stores it in sitelinks.
pub fn normalize_title(title: &str) -> String {
    let title = title
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves target-language titles to English titles through Wikidata sitelinks.
#[derive(Clone, Copy)]
pub struct SourceWikidata<'a> {
    api: &'a dyn WikiApi,
    target_lang: &'a str,
}

impl std::fmt::Debug for SourceWikidata<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWikidata")
            .field("target_lang", &self.target_lang)
            .finish()
    }
}

impl<'a> SourceWikidata<'a> {
    pub fn new(api: &'a dyn WikiApi, target_lang: &'a str) -> Self {
        Self { api, target_lang }
    }

    /// Wikidata site id of the target wiki; `zh-min-nan` becomes `zh_min_nanwiki`.
    pub fn target_site(&self) -> String {
        self.target_lang.replace('-', "_") + "wiki"
    }

    /// Looks up one batch of at most `WIKIDATA_BATCH_SIZE` titles.
    pub async fn lookup_batch(&self, titles: &[String]) -> Lookup<CrossReferenceMap> {
        if titles.is_empty() {
            return Lookup::Found(CrossReferenceMap::new());
        }
        let site = self.target_site();
        let joined = titles.join("|");
        let params = [
            ("action", "wbgetentities"),
            ("sites", site.as_str()),
            ("titles", joined.as_str()),
            ("props", "sitelinks"),
            ("format", "json"),
        ];
        tracing::debug!("Wikidata lookup for {} titles on {site}", titles.len());
        let v = match self.api.get_json(WIKIDATA_API_URL, &params).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Wikidata lookup failed for {} titles: {e}", titles.len());
                return Lookup::Unavailable;
            }
        };
        match self.parse_entities(&v, titles) {
            Some(map) => Lookup::Found(map),
            None => {
                tracing::warn!("Wikidata response has no 'entities'");
                Lookup::Unavailable
            }
        }
    }

    pub async fn pause_between_batches() {
        tokio::time::sleep(time::Duration::from_millis(WIKIDATA_BATCH_DELAY_MS)).await;
    }

    fn parse_entities(&self, v: &Value, titles: &[String]) -> Option<CrossReferenceMap> {
        let entities = v.get("entities")?.as_object()?;
        let site = self.target_site();

        let mut inputs: HashMap<String, Vec<&String>> = HashMap::new();
        for title in titles {
            inputs.entry(normalize_title(title)).or_default().push(title);
        }

        let mut ret = CrossReferenceMap::new();
        for entity in entities.values() {
            let target_title = match entity["sitelinks"][&site]["title"].as_str() {
                Some(t) => t,
                None => continue, // Missing item, or not linked to this wiki
            };
            let english_title = match entity["sitelinks"][PIVOT_SITE]["title"].as_str() {
                Some(t) => t,
                None => continue,
            };
            if let Some(originals) = inputs.get(&normalize_title(target_title)) {
                for original in originals {
                    ret.insert(original.to_string(), english_title.to_string());
                }
            }
        }
        Some(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki_api::mock::MockWikiApi;
    use anyhow::anyhow;
    use serde_json::json;

    fn titles(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    /// Answers as if every title whose name starts with "R" has an item with
    /// an `enwiki` sitelink of "<title> (en)".
    fn resolving_api() -> MockWikiApi {
        MockWikiApi::new(|_url, params| {
            let site = params["sites"].clone();
            let mut entities = serde_json::Map::new();
            for (num, title) in params["titles"].split('|').enumerate() {
                if title.starts_with('R') {
                    entities.insert(
                        format!("Q{}", num + 1),
                        json!({"sitelinks":{
                            site.as_str(): {"site": site, "title": title},
                            "enwiki": {"site":"enwiki","title": format!("{title} (en)")}
                        }}),
                    );
                } else {
                    entities.insert(
                        format!("-{}", num + 1),
                        json!({"site": site, "title": title, "missing": ""}),
                    );
                }
            }
            Ok(json!({ "entities": entities, "success": 1 }))
        })
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("foo_bar"), "Foo bar");
        assert_eq!(normalize_title("  Foo   bar "), "Foo bar");
        assert_eq!(normalize_title("ìjàmbá"), "Ìjàmbá");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_cross_reference_map() {
        let mut map = CrossReferenceMap::new();
        assert!(map.is_empty());
        map.insert("A".into(), "Alpha".into());
        map.insert("B".into(), "Beta".into());
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("A"), Some("Alpha"));
        assert_eq!(map.get("B"), Some("Beta"));
        assert_eq!(map.get("C"), None);
    }

    #[test]
    fn test_target_site() {
        let api = resolving_api();
        assert_eq!(SourceWikidata::new(&api, "yo").target_site(), "yowiki");
        assert_eq!(
            SourceWikidata::new(&api, "zh-min-nan").target_site(),
            "zh_min_nanwiki"
        );
        assert_eq!(
            SourceWikidata::new(&api, "be-tarask").target_site(),
            "be_taraskwiki"
        );
    }

    #[tokio::test]
    async fn test_lookup_batch_hyphenated_language() {
        let config = crate::generator_config::GeneratorConfig {
            target_lang: "zh-min-nan".to_string(),
            ..Default::default()
        }
        .validated()
        .unwrap();
        let api = resolving_api();
        let wd = SourceWikidata::new(&api, &config.target_lang);
        let map = wd
            .lookup_batch(&titles(&["Ra"]))
            .await
            .found()
            .unwrap();
        assert_eq!(map.get("Ra"), Some("Ra (en)"));
        let calls = api.calls_to(WIKIDATA_API_URL);
        assert_eq!(calls[0]["sites"], "zh_min_nanwiki");
    }

    #[tokio::test]
    async fn test_lookup_batch_request_params() {
        let api = resolving_api();
        let wd = SourceWikidata::new(&api, "yo");
        let _ = wd.lookup_batch(&titles(&["Ra", "Rb"])).await;
        let calls = api.calls_to(WIKIDATA_API_URL);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["action"], "wbgetentities");
        assert_eq!(calls[0]["sites"], "yowiki");
        assert_eq!(calls[0]["titles"], "Ra|Rb");
        assert_eq!(calls[0]["props"], "sitelinks");
        assert_eq!(calls[0]["format"], "json");
    }

    #[tokio::test]
    async fn test_lookup_batch_missing_entities_are_absent() {
        let api = resolving_api();
        let wd = SourceWikidata::new(&api, "yo");
        let map = wd
            .lookup_batch(&titles(&["Ra", "Xb", "Rc"]))
            .await
            .found()
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Ra"), Some("Ra (en)"));
        assert_eq!(map.get("Rc"), Some("Rc (en)"));
        assert_eq!(map.get("Xb"), None);
    }

    #[tokio::test]
    async fn test_lookup_batch_requires_english_sitelink() {
        let api = MockWikiApi::new(|_, _| {
            Ok(json!({"entities":{
                "Q1":{"sitelinks":{"yowiki":{"title":"A"},"enwiki":{"title":"Alpha"}}},
                "Q2":{"sitelinks":{"yowiki":{"title":"B"},"frwiki":{"title":"Bêta"}}}
            }}))
        });
        let wd = SourceWikidata::new(&api, "yo");
        let map = wd.lookup_batch(&titles(&["A", "B"])).await.found().unwrap();
        assert_eq!(map.get("A"), Some("Alpha"));
        assert_eq!(map.get("B"), None);
    }

    #[tokio::test]
    async fn test_lookup_batch_keys_by_input_text() {
        let api = MockWikiApi::new(|_, _| {
            Ok(json!({"entities":{
                "Q1":{"sitelinks":{"yowiki":{"title":"Ìlú Èkó"},"enwiki":{"title":"Lagos"}}}
            }}))
        });
        let wd = SourceWikidata::new(&api, "yo");
        let map = wd
            .lookup_batch(&titles(&["ìlú_Èkó"]))
            .await
            .found()
            .unwrap();
        assert_eq!(map.get("ìlú_Èkó"), Some("Lagos"));
    }

    #[tokio::test]
    async fn test_lookup_batch_failure_is_unavailable() {
        let api = MockWikiApi::new(|_, _| Err(anyhow!("HTTP 503")));
        let wd = SourceWikidata::new(&api, "yo");
        assert!(wd.lookup_batch(&titles(&["A"])).await.is_unavailable());
    }

    #[tokio::test]
    async fn test_lookup_batch_without_entities_is_unavailable() {
        let api = MockWikiApi::new(|_, _| Ok(json!({"success": 1})));
        let wd = SourceWikidata::new(&api, "yo");
        assert!(wd.lookup_batch(&titles(&["A"])).await.is_unavailable());
    }

    #[tokio::test]
    async fn test_lookup_batch_empty_input_makes_no_call() {
        let api = resolving_api();
        let wd = SourceWikidata::new(&api, "yo");
        let map = wd.lookup_batch(&[]).await.found().unwrap();
        assert!(map.is_empty());
        assert!(api.calls().is_empty());
    }
}
