//! Title, meta description, slug and technical presence checks.

use super::{
    META_DESCRIPTION_MAX_CHARS, META_DESCRIPTION_MIN_CHARS, SLUG_MAX_CHARS, SLUG_MAX_WORDS,
    TITLE_IDEAL_MAX_CHARS, TITLE_IDEAL_MIN_CHARS, TITLE_MIN_CHARS,
};
use crate::content::AnalyzableContent;
use crate::text::{contains_phrase, STOP_WORDS};
use crate::types::scoring::{MetricResult, Scale, Status};

const POWER_WORDS: &[&str] = &[
    "amazing", "best", "complete", "definitive", "easy", "essential", "expert", "fast", "free",
    "guide", "proven", "quick", "simple", "step-by-step", "ultimate", "ways", "why", "how",
];

pub fn title_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let chars = content.effective_title().chars().count();
    let result = if chars == 0 {
        MetricResult::poor(0, "The post has no title.")
    } else if (TITLE_IDEAL_MIN_CHARS..=TITLE_IDEAL_MAX_CHARS).contains(&chars) {
        MetricResult::good(format!("The title is {chars} characters."))
    } else if chars < TITLE_MIN_CHARS {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("The title is only {chars} characters; aim for {TITLE_IDEAL_MIN_CHARS}-{TITLE_IDEAL_MAX_CHARS}."),
        )
    } else if chars < TITLE_IDEAL_MIN_CHARS {
        MetricResult::fraction(
            0.7,
            Status::Ok,
            format!("The title is {chars} characters; aim for {TITLE_IDEAL_MIN_CHARS}-{TITLE_IDEAL_MAX_CHARS}."),
        )
    } else {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("The title is {chars} characters and may be truncated in search results."),
        )
    };
    result.with_detail("length", chars)
}

pub fn title_has_number<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content
        .effective_title()
        .chars()
        .any(|c| c.is_ascii_digit())
    {
        MetricResult::good("The title contains a number.")
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            "Titles with a number tend to earn more clicks.",
        )
    }
}

pub fn title_power_words<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let title = content.effective_title();
    let found = POWER_WORDS
        .iter()
        .filter(|word| contains_phrase(title, word))
        .count();
    if found > 0 {
        MetricResult::good("The title uses a power word.")
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            "Add a power word such as \"ultimate\" or \"proven\" to the title.",
        )
    }
}

/// Presence, length and keyword use of the meta description in one check.
pub fn meta_description<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(description) = content.meta.meta_description.as_deref() else {
        return MetricResult::poor(0, "No meta description set.");
    };
    let chars = description.chars().count();
    let result = if chars < META_DESCRIPTION_MIN_CHARS {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("The meta description is {chars} characters; aim for {META_DESCRIPTION_MIN_CHARS}-{META_DESCRIPTION_MAX_CHARS}."),
        )
    } else if chars > META_DESCRIPTION_MAX_CHARS {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("The meta description is {chars} characters and will be truncated."),
        )
    } else {
        match keyword.map(str::trim).filter(|keyword| !keyword.is_empty()) {
            Some(keyword) if !contains_phrase(description, keyword) => MetricResult::fraction(
                0.7,
                Status::Ok,
                "The meta description does not include the focus keyword.",
            ),
            _ => MetricResult::good("The meta description is well formed."),
        }
    };
    result.with_detail("length", chars)
}

pub fn meta_description_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let Some(description) = content.meta.meta_description.as_deref() else {
        return MetricResult::poor(0, "No meta description set.");
    };
    let chars = description.chars().count();
    let result = if (META_DESCRIPTION_MIN_CHARS..=META_DESCRIPTION_MAX_CHARS).contains(&chars) {
        MetricResult::good(format!("The meta description is {chars} characters."))
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!("The meta description is {chars} characters; aim for {META_DESCRIPTION_MIN_CHARS}-{META_DESCRIPTION_MAX_CHARS}."),
        )
    };
    result.with_detail("length", chars)
}

fn slug_words(slug: &str) -> Vec<&str> {
    slug.split(['-', '_', '/'])
        .filter(|part| !part.is_empty())
        .collect()
}

pub fn slug_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let slug = content.meta.slug.trim_matches('/');
    if slug.is_empty() {
        return MetricResult::poor(0, "The post has no slug.");
    }
    let chars = slug.chars().count();
    let words = slug_words(slug).len();
    let result = if chars <= SLUG_MAX_CHARS && words <= SLUG_MAX_WORDS {
        MetricResult::good(format!("The slug is {chars} characters."))
    } else {
        MetricResult::fraction(
            0.4,
            Status::Ok,
            format!("The slug is {chars} characters / {words} words; shorten it."),
        )
    };
    result
        .with_detail("length", chars)
        .with_detail("words", words)
}

/// Lowercase, hyphen-separated, ASCII.
pub fn slug_format<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let slug = content.meta.slug.trim_matches('/');
    if slug.is_empty() {
        return MetricResult::poor(0, "The post has no slug.");
    }
    let mut problems = Vec::new();
    if slug.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("uppercase letters");
    }
    if slug.contains('_') {
        problems.push("underscores");
    }
    if slug
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/'))
    {
        problems.push("special characters");
    }
    if slug.contains("--") {
        problems.push("repeated hyphens");
    }
    if slug_words(slug)
        .iter()
        .all(|word| word.chars().all(|c| c.is_ascii_digit()))
    {
        problems.push("no descriptive words");
    }

    if problems.is_empty() {
        MetricResult::good("The slug is lowercase and hyphenated.")
    } else {
        let score = 1.0 - 0.25 * problems.len() as f64;
        let status = if problems.len() > 1 {
            Status::Poor
        } else {
            Status::Ok
        };
        MetricResult::fraction(
            score,
            status,
            format!("The slug contains {}.", problems.join(", ")),
        )
    }
}

pub fn slug_stop_words<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let slug = content.meta.slug.to_lowercase();
    let words = slug_words(&slug);
    if words.is_empty() {
        return MetricResult::poor(0, "The post has no slug.");
    }
    let stop_words = words
        .iter()
        .filter(|word| STOP_WORDS.contains(word))
        .copied()
        .collect::<Vec<_>>();
    if stop_words.is_empty() {
        MetricResult::good("The slug contains no stop words.")
    } else {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("Remove stop words from the slug: {}.", stop_words.join(", ")),
        )
        .with_detail("stop_words", stop_words.len())
    }
}

pub fn canonical_url<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    match content.meta.canonical_url.as_deref() {
        Some(url) => MetricResult::good(format!("Canonical URL is set to {url}.")),
        None => MetricResult::poor(0, "No canonical URL set."),
    }
}

pub fn robots_indexable<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.meta.noindex {
        MetricResult::poor(0, "The post is set to noindex and will not appear in search results.")
    } else {
        MetricResult::good("The post can be indexed by search engines.")
    }
}

pub fn schema_markup<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    match content.meta.schema_type.as_deref() {
        Some(schema) => MetricResult::good(format!("{schema} schema markup is present.")),
        None => MetricResult::poor(0, "No schema markup; add structured data such as Article."),
    }
}
