use std::fmt;

/// One input title and its 1-based position in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    position: usize,
    title: String,
}

impl ArticleQuery {
    pub fn new(position: usize, title: &str) -> Self {
        Self {
            position,
            title: title.to_string(),
        }
    }

    /// Numbers `titles` in order, starting at 1.
    pub fn from_titles(titles: &[String]) -> Vec<Self> {
        titles
            .iter()
            .enumerate()
            .map(|(num, title)| Self::new(num + 1, title))
            .collect()
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Ready,
    NoTargetEquivalent,
    NoSourceArticle,
}

impl RowStatus {
    /// Status cell text; `source_lang` names the missing equivalent.
    pub fn label(&self, source_lang: &str) -> String {
        match self {
            RowStatus::Ready => "✅ Ready".to_string(),
            RowStatus::NoTargetEquivalent => format!("❌ No {source_lang} equivalent"),
            RowStatus::NoSourceArticle => "❌ No source".to_string(),
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RowStatus::Ready => "ready",
            RowStatus::NoTargetEquivalent => "no target-language equivalent",
            RowStatus::NoSourceArticle => "no source-language article",
        };
        write!(f, "{s}")
    }
}

/// Classification of one input title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    number: usize,
    target_title: String,
    source_title: Option<String>,
    status: RowStatus,
    translation_url: Option<String>,
}

impl ArticleRow {
    pub fn no_equivalent(query: &ArticleQuery) -> Self {
        Self {
            number: query.position(),
            target_title: query.title().to_string(),
            source_title: None,
            status: RowStatus::NoTargetEquivalent,
            translation_url: None,
        }
    }

    pub fn no_source(query: &ArticleQuery, source_title: &str) -> Self {
        Self {
            number: query.position(),
            target_title: query.title().to_string(),
            source_title: Some(source_title.to_string()),
            status: RowStatus::NoSourceArticle,
            translation_url: None,
        }
    }

    pub fn ready(query: &ArticleQuery, source_title: &str, translation_url: String) -> Self {
        Self {
            number: query.position(),
            target_title: query.title().to_string(),
            source_title: Some(source_title.to_string()),
            status: RowStatus::Ready,
            translation_url: Some(translation_url),
        }
    }

    pub const fn number(&self) -> usize {
        self.number
    }

    pub fn target_title(&self) -> &str {
        &self.target_title
    }

    pub fn source_title(&self) -> Option<&str> {
        self.source_title.as_deref()
    }

    pub const fn status(&self) -> RowStatus {
        self.status
    }

    pub fn translation_url(&self) -> Option<&str> {
        self.translation_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_titles_numbers_from_one() {
        let queries = ArticleQuery::from_titles(&["A".to_string(), "B".to_string()]);
        assert_eq!(queries[0], ArticleQuery::new(1, "A"));
        assert_eq!(queries[1].position(), 2);
        assert_eq!(queries[1].title(), "B");
    }

    #[test]
    fn test_row_constructors() {
        let q = ArticleQuery::new(3, "A");
        let row = ArticleRow::no_equivalent(&q);
        assert_eq!(row.number(), 3);
        assert_eq!(row.source_title(), None);
        assert_eq!(row.translation_url(), None);
        assert_eq!(row.status(), RowStatus::NoTargetEquivalent);

        let row = ArticleRow::no_source(&q, "Alpha");
        assert_eq!(row.source_title(), Some("Alpha"));
        assert_eq!(row.translation_url(), None);

        let row = ArticleRow::ready(&q, "Alpha", "https://x".to_string());
        assert_eq!(row.status(), RowStatus::Ready);
        assert_eq!(row.translation_url(), Some("https://x"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RowStatus::Ready.label("en"), "✅ Ready");
        assert_eq!(RowStatus::NoTargetEquivalent.label("en"), "❌ No en equivalent");
        assert_eq!(RowStatus::NoSourceArticle.label("fr"), "❌ No source");
        assert_eq!(
            RowStatus::NoTargetEquivalent.to_string(),
            "no target-language equivalent"
        );
    }
}
