use np_core::{Category, RawArticle};

const AI_KEYWORDS: [&str; 8] = [
    "ai",
    "artificial intelligence",
    "machine learning",
    "neural network",
    "deep learning",
    "gpt",
    "chatbot",
    "automation",
];

const ML_KEYWORDS: [&str; 6] = [
    "machine learning",
    "ml model",
    "algorithm",
    "data science",
    "predictive",
    "training model",
];

const FUNDING_KEYWORDS: [&str; 10] = [
    "funding",
    "investment",
    "series a",
    "series b",
    "series c",
    "venture capital",
    "raised",
    "valuation",
    "ipo",
    "acquisition",
];

const STARTUP_KEYWORDS: [&str; 8] = [
    "startup",
    "unicorn",
    "founder",
    "co-founder",
    "launch",
    "new company",
    "entrepreneur",
    "incubator",
];

const DEFAULT_LOGO: &str =
    "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=100&h=100&fit=crop";

/// Keyword-based categorization over the article's text, first match
/// wins, `Technology` as the catch-all.
pub fn categorize_article(article: &RawArticle) -> Category {
    let text = article.haystack();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| text.contains(keyword));

    if matches(&AI_KEYWORDS) {
        Category::Ai
    } else if matches(&ML_KEYWORDS) {
        Category::MachineLearning
    } else if matches(&FUNDING_KEYWORDS) {
        Category::Funding
    } else if matches(&STARTUP_KEYWORDS) {
        Category::Startups
    } else {
        Category::Technology
    }
}

/// Logo URL for a publisher. Every publisher currently shares the same
/// placeholder asset; the lookup stays so real logos can slot in later.
pub fn publisher_logo(source_name: &str) -> String {
    match source_name {
        "TechCrunch" | "WIRED" | "The Verge" | "Ars Technica" | "VentureBeat" | "Engadget"
        | "Mashable" | "Recode" | "Fast Company" | "MIT Technology Review" => {
            DEFAULT_LOGO.to_string()
        }
        _ => DEFAULT_LOGO.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, description: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn funding_stories_are_categorized() {
        let article = raw("Drone startup closes Series B", "Round led by venture capital");
        // "ai" appears nowhere, funding keywords do.
        assert_eq!(categorize_article(&article), Category::Funding);
    }

    #[test]
    fn model_stories_go_to_ai() {
        let article = raw("New chatbot beats benchmarks", "Built on a neural network");
        assert_eq!(categorize_article(&article), Category::Ai);
    }

    #[test]
    fn everything_else_is_technology() {
        let article = raw("Monitor review", "Bright screen, thin bezels");
        assert_eq!(categorize_article(&article), Category::Technology);
    }
}
