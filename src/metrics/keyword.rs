//! Focus keyword placement and frequency.
//!
//! All checks here return the neutral half-credit result when no focus
//! keyword is set.

use super::{
    KEYWORD_DENSITY_MAX, KEYWORD_DENSITY_MIN, KEYWORD_STUFFING_DENSITY, NO_CONTENT, NO_KEYWORD,
};
use crate::content::AnalyzableContent;
use crate::text::{self, contains_phrase, phrase_occurrences, tokenize};
use crate::types::scoring::{MetricResult, Scale, Status};

fn focus(keyword: Option<&str>) -> Option<&str> {
    keyword.map(str::trim).filter(|keyword| !keyword.is_empty())
}

pub fn keyword_density<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    let words = content.word_count();
    let occurrences = phrase_occurrences(&content.words, keyword);
    let Some(density) = text::percentage(occurrences, words) else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let density = (density * 100.0).round() / 100.0;

    let result = if density < KEYWORD_DENSITY_MIN {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!(
                "Keyword density is too low ({density}%). Aim for {KEYWORD_DENSITY_MIN}-{KEYWORD_DENSITY_MAX}%."
            ),
        )
    } else if density <= KEYWORD_DENSITY_MAX {
        MetricResult::good(format!("Keyword density is optimal ({density}%)."))
    } else if density <= KEYWORD_STUFFING_DENSITY {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!(
                "Keyword density is too high ({density}%). Aim for {KEYWORD_DENSITY_MIN}-{KEYWORD_DENSITY_MAX}%."
            ),
        )
    } else {
        MetricResult::fraction(
            0.2,
            Status::Poor,
            format!("Keyword density of {density}% looks like keyword stuffing."),
        )
    };
    result
        .with_detail("occurrences", occurrences)
        .with_detail("word_count", words)
        .with_detail("density", density)
}

pub fn keyword_in_title<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    let title = content.effective_title();
    if title.is_empty() {
        return MetricResult::poor(0, "The post has no title.");
    }
    if contains_phrase(title, keyword) {
        MetricResult::good("The focus keyword appears in the title.")
    } else {
        MetricResult::poor(0, "Add the focus keyword to the title.")
    }
}

/// Keyword should open the title, or at least sit in its first half.
pub fn keyword_at_title_start<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    let title = tokenize(content.effective_title());
    let needle = tokenize(keyword);
    let position = title
        .windows(needle.len().max(1))
        .position(|window| window == needle.as_slice());
    match position {
        Some(0) => MetricResult::good("The title starts with the focus keyword."),
        Some(index) if index * 2 < title.len() => MetricResult::fraction(
            0.8,
            Status::Good,
            "The focus keyword is in the first half of the title.",
        ),
        Some(_) => MetricResult::fraction(
            0.5,
            Status::Ok,
            "Move the focus keyword closer to the beginning of the title.",
        ),
        None => MetricResult::poor(0, "The focus keyword is not in the title."),
    }
}

pub fn keyword_in_headings<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    let subheadings = content.subheadings().collect::<Vec<_>>();
    if subheadings.is_empty() {
        return MetricResult::poor(0, "No subheadings found; add H2/H3 headings that use the focus keyword.");
    }
    let matching = subheadings
        .iter()
        .filter(|heading| contains_phrase(&heading.text, keyword))
        .count();
    let result = if matching > 0 {
        MetricResult::good(format!(
            "The focus keyword appears in {matching} of {} subheadings.",
            subheadings.len()
        ))
    } else {
        MetricResult::fraction(0.2, Status::Poor, "Use the focus keyword in at least one subheading.")
    };
    result
        .with_detail("matching", matching)
        .with_detail("subheadings", subheadings.len())
}

pub fn keyword_in_intro<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    match content.first_paragraph() {
        None => MetricResult::poor(0, NO_CONTENT),
        Some(intro) if contains_phrase(intro, keyword) => {
            MetricResult::good("The focus keyword appears in the first paragraph.")
        }
        Some(_) => MetricResult::poor(0, "Use the focus keyword in the first paragraph."),
    }
}

pub fn keyword_in_meta_description<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    match content.meta.meta_description.as_deref() {
        None => MetricResult::poor(0, "No meta description set."),
        Some(description) if contains_phrase(description, keyword) => {
            MetricResult::good("The focus keyword appears in the meta description.")
        }
        Some(_) => MetricResult::poor(0, "Add the focus keyword to the meta description."),
    }
}

pub fn keyword_in_slug<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    let slug = content.meta.slug.replace(['-', '_', '/'], " ");
    if slug.trim().is_empty() {
        return MetricResult::poor(0, "The post has no slug.");
    }
    if contains_phrase(&slug, keyword) {
        MetricResult::good("The focus keyword appears in the URL slug.")
    } else {
        MetricResult::poor(0, "Add the focus keyword to the URL slug.")
    }
}

pub fn keyword_in_image_alt<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    if content.images.is_empty() {
        return MetricResult::neutral("No images found; keyword in alt text not evaluated.");
    }
    let matching = content
        .images
        .iter()
        .filter_map(|image| image.alt.as_deref())
        .filter(|alt| contains_phrase(alt, keyword))
        .count();
    if matching > 0 {
        MetricResult::good("At least one image alt attribute contains the focus keyword.")
    } else {
        MetricResult::fraction(
            0.2,
            Status::Poor,
            "No image alt attribute contains the focus keyword.",
        )
    }
}

pub fn keyword_in_conclusion<S: Scale>(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricResult<S> {
    let Some(keyword) = focus(keyword) else {
        return MetricResult::neutral(NO_KEYWORD);
    };
    match content.last_paragraph() {
        None => MetricResult::poor(0, NO_CONTENT),
        Some(last) if contains_phrase(last, keyword) => {
            MetricResult::good("The focus keyword appears in the closing paragraph.")
        }
        Some(_) => MetricResult::fraction(
            0.4,
            Status::Ok,
            "Mention the focus keyword again in the closing paragraph.",
        ),
    }
}
