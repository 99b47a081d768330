use np_core::RawArticle;

/// Articles mentioning any of these are dropped outright.
pub const EXCLUDE_KEYWORDS: [&str; 9] = [
    "politics",
    "political",
    "war",
    "military",
    "defense",
    "conflict",
    "election",
    "government",
    "policy",
];

/// Drop articles missing required fields or touching excluded topics.
/// Keeps the input order.
pub fn filter_articles(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    articles
        .into_iter()
        .filter(|article| {
            if !article.has_required_fields() {
                return false;
            }
            let haystack = article.haystack();
            !EXCLUDE_KEYWORDS
                .iter()
                .any(|keyword| haystack.contains(keyword))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_core::RawSource;

    fn raw(title: &str, description: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(format!("https://example.com/{}", title.replace(' ', "-"))),
            url_to_image: Some("https://example.com/cover.jpg".to_string()),
            source: RawSource {
                id: Some("example".to_string()),
                name: Some("Example".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn drops_articles_missing_required_fields() {
        let mut no_image = raw("New chip ships", "Silicon news");
        no_image.url_to_image = None;
        let mut no_source = raw("Another launch", "Rocket cargo");
        no_source.source.name = None;
        let mut no_url = raw("Quiet release", "Editor update");
        no_url.url = None;

        let kept = filter_articles(vec![no_image, no_source, no_url]);
        assert!(kept.is_empty());
    }

    #[test]
    fn drops_articles_with_excluded_keywords() {
        let kept = filter_articles(vec![
            raw("Chipmaker doubles output", "New fab opens in Arizona"),
            raw("Senate election heats up", "Campaign news"),
            raw("Robot vacuum review", "It cleans Military Road"),
        ]);
        // The keyword match is case-insensitive and applies to every
        // text field, so the third article falls too.
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("Chipmaker doubles output"));
    }

    #[test]
    fn keeps_clean_articles_in_order() {
        let kept = filter_articles(vec![
            raw("First story", "about chips"),
            raw("Second story", "about startups"),
            raw("Third story", "about funding"),
        ]);
        let titles: Vec<_> = kept.iter().filter_map(|a| a.title.as_deref()).collect();
        assert_eq!(titles, vec!["First story", "Second story", "Third story"]);
    }
}
