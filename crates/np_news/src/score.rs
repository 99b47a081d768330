use chrono::{DateTime, Duration, Utc};

use np_core::RawArticle;

/// Sources whose articles get a quality bonus.
pub const HIGH_QUALITY_SOURCES: [&str; 5] = [
    "techcrunch",
    "wired",
    "the-verge",
    "ars-technica",
    "venturebeat",
];

/// How many articles survive selection.
pub const MAX_SELECTED: usize = 15;

/// Additive quality heuristic. Deterministic for a fixed `now`.
pub fn quality_score(article: &RawArticle, now: DateTime<Utc>) -> i32 {
    let mut score = 0;

    if article.content.as_deref().map_or(false, |c| c.len() > 500) {
        score += 10;
    }

    if article
        .url_to_image
        .as_deref()
        .map_or(false, |u| u.contains("http"))
    {
        score += 5;
    }

    if article.author.as_deref().map_or(false, |a| !a.is_empty()) {
        score += 3;
    }

    if article
        .published_at
        .map_or(false, |published| now - published <= Duration::days(30))
    {
        score += 5;
    }

    let source_id = article
        .source
        .id
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if HIGH_QUALITY_SOURCES
        .iter()
        .any(|source| source_id.contains(source))
    {
        score += 8;
    }

    score
}

/// Rank articles by quality score and keep the best. The sort is
/// stable, so tied articles keep their input order.
pub fn select_best(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    select_best_at(articles, Utc::now())
}

pub fn select_best_at(articles: Vec<RawArticle>, now: DateTime<Utc>) -> Vec<RawArticle> {
    let mut scored: Vec<(RawArticle, i32)> = articles
        .into_iter()
        .map(|article| {
            let score = quality_score(&article, now);
            (article, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_SELECTED)
        .map(|(article, _)| article)
        .collect()
}
