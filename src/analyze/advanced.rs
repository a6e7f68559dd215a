//! Check table for the unweighted 10-point engine.

use super::Check;
use crate::metrics::{keyword, meta, readability, structure};
use crate::types::scoring::Advanced;

pub const CHECKS: &[(&str, Check<Advanced>)] = &[
    // keyword placement
    ("keyword_density", Check::Keyword(keyword::keyword_density)),
    ("keyword_in_title", Check::Keyword(keyword::keyword_in_title)),
    ("keyword_at_title_start", Check::Keyword(keyword::keyword_at_title_start)),
    ("keyword_in_headings", Check::Keyword(keyword::keyword_in_headings)),
    ("keyword_in_intro", Check::Keyword(keyword::keyword_in_intro)),
    ("keyword_in_meta_description", Check::Keyword(keyword::keyword_in_meta_description)),
    ("keyword_in_slug", Check::Keyword(keyword::keyword_in_slug)),
    ("keyword_in_image_alt", Check::Keyword(keyword::keyword_in_image_alt)),
    ("keyword_in_conclusion", Check::Keyword(keyword::keyword_in_conclusion)),
    // title and meta
    ("title_length", Check::Content(meta::title_length)),
    ("title_has_number", Check::Content(meta::title_has_number)),
    ("title_power_words", Check::Content(meta::title_power_words)),
    ("meta_description_length", Check::Content(meta::meta_description_length)),
    ("slug_length", Check::Content(meta::slug_length)),
    ("slug_format", Check::Content(meta::slug_format)),
    ("slug_stop_words", Check::Content(meta::slug_stop_words)),
    // readability
    ("flesch_reading_ease", Check::Content(readability::flesch_reading_ease)),
    ("sentence_length", Check::Content(readability::sentence_length)),
    ("paragraph_length", Check::Content(readability::paragraph_length)),
    ("passive_voice", Check::Content(readability::passive_voice)),
    ("transition_words", Check::Content(readability::transition_words)),
    ("subheading_distribution", Check::Content(readability::subheading_distribution)),
    ("consecutive_sentences", Check::Content(readability::consecutive_sentences)),
    ("word_complexity", Check::Content(readability::word_complexity)),
    ("lexical_diversity", Check::Content(readability::lexical_diversity)),
    // structure, links and media
    ("content_length", Check::Content(structure::content_length)),
    ("heading_structure", Check::Content(structure::heading_structure)),
    ("heading_uniqueness", Check::Content(structure::heading_uniqueness)),
    ("intro_length", Check::Content(structure::intro_length)),
    ("list_usage", Check::Content(structure::list_usage)),
    ("emphasis_usage", Check::Content(structure::emphasis_usage)),
    ("internal_links", Check::Content(structure::internal_links)),
    ("external_links", Check::Content(structure::external_links)),
    ("anchor_text", Check::Content(structure::anchor_text)),
    ("image_alt", Check::Content(structure::image_alt_coverage)),
    ("media_richness", Check::Content(structure::media_richness)),
    // technical
    ("canonical_url", Check::Content(meta::canonical_url)),
    ("robots_indexable", Check::Content(meta::robots_indexable)),
    ("schema_markup", Check::Content(meta::schema_markup)),
    ("page_speed", Check::Pending("Page speed requires a live render and is not measured.")),
    ("mobile_friendly", Check::Pending("Mobile friendliness requires a live render and is not measured.")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn factor_names_are_unique() {
        let names = CHECKS.iter().map(|(name, _)| *name).collect::<HashSet<_>>();
        assert_eq!(names.len(), CHECKS.len());
        assert_eq!(CHECKS.len(), 41);
    }
}
