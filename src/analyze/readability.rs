use super::Check;
use crate::metrics::readability;
use crate::types::scoring::Basic;

pub const CHECKS: &[(&str, Check<Basic>)] = &[
    ("flesch_reading_ease", Check::Content(readability::flesch_reading_ease)),
    ("sentence_length", Check::Content(readability::sentence_length)),
    ("paragraph_length", Check::Content(readability::paragraph_length)),
    ("passive_voice", Check::Content(readability::passive_voice)),
    ("transition_words", Check::Content(readability::transition_words)),
    ("subheading_distribution", Check::Content(readability::subheading_distribution)),
];
