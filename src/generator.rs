use crate::article_row::{ArticleQuery, ArticleRow, RowStatus};
use crate::datasource_wikidata::{CrossReferenceMap, SourceWikidata, WIKIDATA_BATCH_SIZE};
use crate::generator_config::GeneratorConfig;
use crate::page_existence::PageExistence;
use crate::render_wikitext::RenderWiki;
use crate::translation_link::section_translation_url;
use crate::wiki_api::WikiApi;

/// Runs the lookup/classify/render pipeline for one configuration.
pub struct Generator<'a> {
    api: &'a dyn WikiApi,
    config: &'a GeneratorConfig,
}

impl std::fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> Generator<'a> {
    pub fn new(api: &'a dyn WikiApi, config: &'a GeneratorConfig) -> Self {
        Self { api, config }
    }

    /// Classifies the configured articles in order until `max_urls` rows are
    /// ready. Titles after that point are never looked at.
    ///
    /// Wikidata is asked one batch at a time, and only when the loop reaches
    /// the first title of a batch, so stopping early also saves requests.
    pub async fn classify(&self) -> Vec<ArticleRow> {
        let queries = ArticleQuery::from_titles(&self.config.articles);
        let wikidata = SourceWikidata::new(self.api, &self.config.target_lang);
        let existence = PageExistence::new(self.api);
        let mut rows = vec![];
        let mut ready = 0;

        for (batch_num, batch) in queries.chunks(WIKIDATA_BATCH_SIZE).enumerate() {
            if ready >= self.config.max_urls {
                break;
            }
            if batch_num > 0 {
                SourceWikidata::pause_between_batches().await;
            }
            let titles: Vec<String> = batch.iter().map(|q| q.title().to_string()).collect();
            let lookup = wikidata.lookup_batch(&titles).await;
            if lookup.is_unavailable() {
                tracing::warn!(
                    "Wikidata batch {} unavailable, {} titles get no equivalent",
                    batch_num + 1,
                    titles.len()
                );
            }
            let cross_references = lookup.found().unwrap_or_default();

            for query in batch {
                if ready >= self.config.max_urls {
                    break;
                }
                let row = self.classify_one(query, &cross_references, &existence).await;
                if row.status() == RowStatus::Ready {
                    ready += 1;
                }
                rows.push(row);
            }
        }
        tracing::debug!("Classified {} of {} articles", rows.len(), queries.len());
        rows
    }

    async fn classify_one(
        &self,
        query: &ArticleQuery,
        cross_references: &CrossReferenceMap,
        existence: &PageExistence<'_>,
    ) -> ArticleRow {
        let source_title = match cross_references.get(query.title()) {
            Some(title) => title,
            None => return ArticleRow::no_equivalent(query),
        };
        if existence.exists(source_title, &self.config.source_lang).await {
            let url = section_translation_url(
                source_title,
                &self.config.source_lang,
                &self.config.target_lang,
            );
            ArticleRow::ready(query, source_title, url)
        } else {
            ArticleRow::no_source(query, source_title)
        }
    }

    /// Classifies and renders the wiki table in one go.
    pub async fn generate_table(&self) -> (String, Vec<ArticleRow>) {
        let rows = self.classify().await;
        let renderer = RenderWiki::new(&self.config.source_lang, &self.config.target_lang);
        (renderer.render(&rows), rows)
    }
}
