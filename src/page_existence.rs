use crate::lookup::Lookup;
use crate::wiki_api::{wikipedia_api_url, WikiApi};
use serde_json::Value;

/// Checks whether an article exists on one language's Wikipedia.
///
/// Called once per candidate, never batched and never delayed. Anything other
/// than a clear positive answer counts as "does not exist".
#[derive(Clone, Copy)]
pub struct PageExistence<'a> {
    api: &'a dyn WikiApi,
}

impl std::fmt::Debug for PageExistence<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageExistence").finish()
    }
}

impl<'a> PageExistence<'a> {
    pub fn new(api: &'a dyn WikiApi) -> Self {
        Self { api }
    }

    /// Returns the title of the first existing page, if any.
    pub async fn check(&self, title: &str, lang: &str) -> Lookup<String> {
        let params = [("action", "query"), ("titles", title), ("format", "json")];
        let api_url = wikipedia_api_url(lang);
        match self.api.get_json(&api_url, &params).await {
            Ok(v) => Self::first_existing_page(&v).into(),
            Err(e) => {
                tracing::warn!("Existence check for '{title}' on {lang} failed: {e}");
                Lookup::Unavailable
            }
        }
    }

    pub async fn exists(&self, title: &str, lang: &str) -> bool {
        self.check(title, lang).await.is_found()
    }

    fn first_existing_page(v: &Value) -> Option<String> {
        v["query"]["pages"]
            .as_object()?
            .values()
            .filter(|page| page.get("missing").is_none() && page.get("invalid").is_none())
            .find_map(|page| page["title"].as_str().map(|s| s.to_string()))
    }
}
