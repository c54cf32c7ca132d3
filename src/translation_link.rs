use url::Url;

pub static CONTENT_TRANSLATION_PAGE: &str = "Special:ContentTranslation";
pub static SECTION_SELECTOR_FRAGMENT: &str = "/sx/section-selector";

/// Builds the Section Translation deep link for `title` on the source wiki.
///
/// Query values are form-urlencoded: spaces become `+`, everything outside
/// the unreserved set is percent-encoded as UTF-8.
pub fn section_translation_url(title: &str, source_lang: &str, target_lang: &str) -> String {
    let base = format!("https://{source_lang}.wikipedia.org/w/index.php");
    let params = [
        ("title", CONTENT_TRANSLATION_PAGE),
        ("filter-type", "automatic"),
        ("filter-id", "previous-edits"),
        ("from", source_lang),
        ("to", target_lang),
        ("active-list", "suggestions"),
        ("page", title),
    ];
    match Url::parse_with_params(&base, &params) {
        Ok(mut url) => {
            url.set_fragment(Some(SECTION_SELECTOR_FRAGMENT));
            url.to_string()
        }
        Err(_) => {
            // Only reachable with a language code that is not a valid host label
            let query: String = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            format!("{base}?{query}#{SECTION_SELECTOR_FRAGMENT}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(
            section_translation_url("Alpha", "en", "yo"),
            "https://en.wikipedia.org/w/index.php?title=Special%3AContentTranslation&filter-type=automatic&filter-id=previous-edits&from=en&to=yo&active-list=suggestions&page=Alpha#/sx/section-selector"
        );
    }

    #[test]
    fn test_title_encoding() {
        let url = section_translation_url("2020 Beirut explosion & aftermath", "en", "yo");
        assert!(url.contains("&page=2020+Beirut+explosion+%26+aftermath#"));
    }

    #[test]
    fn test_non_ascii_title() {
        let url = section_translation_url("Zürich", "de", "yo");
        assert!(url.starts_with("https://de.wikipedia.org/w/index.php?"));
        assert!(url.contains("&from=de&to=yo&"));
        assert!(url.contains("&page=Z%C3%BCrich#"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            section_translation_url("C++", "en", "ha"),
            section_translation_url("C++", "en", "ha")
        );
        assert!(section_translation_url("C++", "en", "ha").contains("page=C%2B%2B#"));
    }
}
