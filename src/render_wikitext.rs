use crate::article_row::{ArticleRow, RowStatus};
use std::fmt;

static SOURCE_NOT_FOUND: &str = "''Not found on Wikidata''";
static LINK_MISSING: &str = "<span style=\"color: #ccc;\">Source missing</span>";

/// Renders classified rows as a sortable wikitable
#[derive(Debug, Clone)]
pub struct RenderWiki {
    source_lang: String,
    target_lang: String,
}

impl RenderWiki {
    pub fn new(source_lang: &str, target_lang: &str) -> Self {
        Self {
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        }
    }

    pub fn render(&self, entries: &[ArticleRow]) -> String {
        let mut rows: Vec<String> = vec![];
        rows.push("{| class=\"wikitable sortable\"".to_string());
        rows.push(format!(
            "|+ Section Translation Articles (from {} to {})",
            self.source_lang, self.target_lang
        ));
        rows.push("|-".to_string());
        let header = ["#", "Target Article", "Source Article", "SX Link", "Status"];
        rows.push("! ".to_string() + &header.join(" !! "));

        for entry in entries {
            rows.push("|-".to_string());
            let row = self.row_from_entry(entry);
            rows.push("| ".to_string() + &row.join(" || "));
        }

        rows.push("|}".to_string());
        rows.join("\n")
    }

    fn row_from_entry(&self, entry: &ArticleRow) -> Vec<String> {
        vec![
            entry.number().to_string(),
            Self::render_interwiki(&self.target_lang, entry.target_title()),
            self.render_cell_source(entry),
            Self::render_cell_translation(entry),
            entry.status().label(&self.source_lang),
        ]
    }

    fn render_interwiki(lang: &str, title: &str) -> String {
        format!("[[:{lang}:{title}|{title}]]")
    }

    fn render_cell_source(&self, entry: &ArticleRow) -> String {
        match entry.source_title() {
            Some(title) => Self::render_interwiki(&self.source_lang, title),
            None => SOURCE_NOT_FOUND.to_string(),
        }
    }

    fn render_cell_translation(entry: &ArticleRow) -> String {
        match entry.translation_url() {
            Some(url) => format!("[{url} Start Translation]"),
            None => LINK_MISSING.to_string(),
        }
    }
}

/// Row counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub ready: usize,
    pub no_equivalent: usize,
    pub no_source: usize,
}

impl RenderSummary {
    pub fn new_from_rows(rows: &[ArticleRow]) -> Self {
        let mut ret = Self::default();
        for row in rows {
            match row.status() {
                RowStatus::Ready => ret.ready += 1,
                RowStatus::NoTargetEquivalent => ret.no_equivalent += 1,
                RowStatus::NoSourceArticle => ret.no_source += 1,
            }
        }
        ret
    }

    pub const fn total(&self) -> usize {
        self.ready + self.no_equivalent + self.no_source
    }
}

impl fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} ready, {} without equivalent, {} without source",
            self.total(),
            self.ready,
            self.no_equivalent,
            self.no_source
        )
    }
}
