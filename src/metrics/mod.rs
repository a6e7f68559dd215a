//! Leaf metric functions.
//!
//! Every function is pure: it reads an [`AnalyzableContent`] (and the focus
//! keyword where relevant) and returns a [`MetricResult`] on whatever scale
//! the calling engine asks for. Scores are expressed as fractions of the
//! scale, so `0.6` is 60/100 for the basic engine and 6/10 for the
//! comprehensive one.
//!
//! [`AnalyzableContent`]: crate::content::AnalyzableContent
//! [`MetricResult`]: crate::types::scoring::MetricResult

pub mod keyword;
pub mod meta;
pub mod readability;
pub mod structure;

/// Keyword density band (percent) that earns full credit.
pub const KEYWORD_DENSITY_MIN: f64 = 0.5;
pub const KEYWORD_DENSITY_MAX: f64 = 2.5;
/// Above this density the keyword is considered stuffed.
pub const KEYWORD_STUFFING_DENSITY: f64 = 5.0;

/// Content length tiers in words.
pub const CONTENT_LENGTH_OK: usize = 300;
pub const CONTENT_LENGTH_GOOD: usize = 600;
pub const CONTENT_LENGTH_EXCELLENT: usize = 1000;

/// Passive voice share of sentences (percent).
pub const PASSIVE_VOICE_GOOD_BELOW: f64 = 10.0;
pub const PASSIVE_VOICE_OK_BELOW: f64 = 20.0;

/// Share of sentences containing a transition word (percent).
pub const TRANSITION_WORDS_GOOD: f64 = 30.0;
pub const TRANSITION_WORDS_OK: f64 = 20.0;

/// Sentences above this many words are long.
pub const LONG_SENTENCE_WORDS: usize = 20;
/// Long-sentence ratio below which the penalty is a flat step.
pub const LONG_SENTENCE_STEP_RATIO: f64 = 0.25;

/// Paragraphs above this many words are long.
pub const LONG_PARAGRAPH_WORDS: usize = 150;
pub const LONG_PARAGRAPH_STEP_RATIO: f64 = 0.30;

/// Score (fraction of the scale) for a small but non-zero share of long
/// sentences or paragraphs.
pub const LENGTH_STEP_SCORE: f64 = 0.8;

/// Image alt coverage below this ratio is poor.
pub const ALT_COVERAGE_OK_RATIO: f64 = 0.5;
/// Multiplier applied to coverage below [`ALT_COVERAGE_OK_RATIO`].
pub const ALT_COVERAGE_POOR_FACTOR: f64 = 0.7;

/// Flesch reading ease tiers.
pub const READING_EASE_GOOD: f64 = 60.0;
pub const READING_EASE_OK: f64 = 30.0;

/// Maximum words between two subheadings.
pub const SUBHEADING_MAX_WORDS: usize = 300;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_IDEAL_MIN_CHARS: usize = 50;
pub const TITLE_IDEAL_MAX_CHARS: usize = 60;

pub const META_DESCRIPTION_MIN_CHARS: usize = 120;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

pub const SLUG_MAX_CHARS: usize = 75;
pub const SLUG_MAX_WORDS: usize = 8;

/// Internal links wanted per post.
pub const INTERNAL_LINKS_TARGET: usize = 2;

/// Share of words with three or more syllables (percent).
pub const COMPLEX_WORDS_GOOD_BELOW: f64 = 10.0;
pub const COMPLEX_WORDS_OK_BELOW: f64 = 20.0;

/// Consecutive sentences starting with the same word that count as repetitive.
pub const REPEATED_OPENER_RUN: usize = 3;

pub(crate) const NO_CONTENT: &str = "No content to analyze.";
pub(crate) const NO_KEYWORD: &str = "No focus keyword set; this check was not evaluated.";
