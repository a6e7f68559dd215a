use super::{
    COMPLEX_WORDS_GOOD_BELOW, COMPLEX_WORDS_OK_BELOW, LENGTH_STEP_SCORE, LONG_PARAGRAPH_STEP_RATIO,
    LONG_PARAGRAPH_WORDS, LONG_SENTENCE_STEP_RATIO, LONG_SENTENCE_WORDS, NO_CONTENT,
    PASSIVE_VOICE_GOOD_BELOW, PASSIVE_VOICE_OK_BELOW, READING_EASE_GOOD, READING_EASE_OK,
    REPEATED_OPENER_RUN, SUBHEADING_MAX_WORDS, TRANSITION_WORDS_GOOD, TRANSITION_WORDS_OK,
};
use crate::content::AnalyzableContent;
use crate::text::{self, round1};
use crate::types::scoring::{MetricResult, Scale, Status};
use std::collections::HashSet;

pub fn flesch_reading_ease<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let syllables = text::total_syllables(&content.words);
    let Some(ease) =
        text::flesch_reading_ease(content.word_count(), content.sentences.len(), syllables)
    else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let ease = round1(ease);
    let result = if ease >= READING_EASE_GOOD {
        MetricResult::good(format!("Flesch reading ease is {ease}; the text is easy to read."))
    } else if ease >= READING_EASE_OK {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("Flesch reading ease is {ease}; the text is fairly difficult to read."),
        )
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("Flesch reading ease is {ease}; use shorter sentences and simpler words."),
        )
    };
    result.with_detail("reading_ease", ease)
}

/// Shared shape of the sentence and paragraph length checks: no long units
/// earns full credit, a small share earns a flat step, anything more falls
/// off linearly with the ratio.
fn long_unit_score<S: Scale>(
    long: usize,
    total: usize,
    step_ratio: f64,
    unit: &str,
    limit: usize,
) -> MetricResult<S> {
    if total == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let ratio = long as f64 / total as f64;
    let percent = round1(ratio * 100.0);
    let result = if long == 0 {
        MetricResult::good(format!("No {unit}s are longer than {limit} words."))
    } else if ratio < step_ratio {
        MetricResult::fraction(
            LENGTH_STEP_SCORE,
            Status::Good,
            format!("{percent}% of {unit}s are longer than {limit} words."),
        )
    } else {
        let fraction = (1.0 - ratio).max(0.0);
        let status = Status::from_score((fraction * 100.0).round() as u32);
        MetricResult::fraction(
            fraction,
            status,
            format!("{percent}% of {unit}s are longer than {limit} words; shorten them."),
        )
    };
    result
        .with_detail("long", long)
        .with_detail("total", total)
        .with_detail("percent", percent)
}

pub fn sentence_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let long = content
        .sentences
        .iter()
        .filter(|sentence| text::word_count(sentence) > LONG_SENTENCE_WORDS)
        .count();
    long_unit_score(
        long,
        content.sentences.len(),
        LONG_SENTENCE_STEP_RATIO,
        "sentence",
        LONG_SENTENCE_WORDS,
    )
}

pub fn paragraph_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let long = content
        .paragraphs
        .iter()
        .filter(|paragraph| text::word_count(paragraph) > LONG_PARAGRAPH_WORDS)
        .count();
    long_unit_score(
        long,
        content.paragraphs.len(),
        LONG_PARAGRAPH_STEP_RATIO,
        "paragraph",
        LONG_PARAGRAPH_WORDS,
    )
}

pub fn passive_voice<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let passive = content
        .sentences
        .iter()
        .filter(|sentence| text::is_passive(sentence))
        .count();
    let Some(percent) = text::percentage(passive, content.sentences.len()) else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let percent = round1(percent);
    let result = if percent < PASSIVE_VOICE_GOOD_BELOW {
        MetricResult::good(format!("{percent}% of sentences use the passive voice."))
    } else if percent < PASSIVE_VOICE_OK_BELOW {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("{percent}% of sentences use the passive voice; keep it under {PASSIVE_VOICE_GOOD_BELOW}%."),
        )
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("{percent}% of sentences use the passive voice; rewrite some in the active voice."),
        )
    };
    result
        .with_detail("passive", passive)
        .with_detail("percent", percent)
}

pub fn transition_words<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let with_transition = content
        .sentences
        .iter()
        .filter(|sentence| text::has_transition(sentence))
        .count();
    let Some(percent) = text::percentage(with_transition, content.sentences.len()) else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let percent = round1(percent);
    let result = if percent >= TRANSITION_WORDS_GOOD {
        MetricResult::good(format!("{percent}% of sentences contain transition words."))
    } else if percent >= TRANSITION_WORDS_OK {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("{percent}% of sentences contain transition words; aim for {TRANSITION_WORDS_GOOD}%."),
        )
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("Only {percent}% of sentences contain transition words; use more of them."),
        )
    };
    result
        .with_detail("with_transition", with_transition)
        .with_detail("percent", percent)
}

/// Words between subheadings, measured on the plain text lines. A line that
/// matches a heading text starts a new section.
pub fn subheading_distribution<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let words = content.word_count();
    if words == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let headings = content
        .subheadings()
        .map(|heading| heading.text.as_str())
        .collect::<HashSet<_>>();
    if headings.is_empty() {
        return if words <= SUBHEADING_MAX_WORDS {
            MetricResult::good("The text is short enough not to need subheadings.")
        } else {
            MetricResult::fraction(
                0.2,
                Status::Poor,
                format!("{words} words without a single subheading; break the text up."),
            )
        };
    }

    let mut sections = vec![0usize];
    for line in content.plain_text.lines() {
        if headings.contains(line.trim()) {
            sections.push(0);
        } else if let Some(current) = sections.last_mut() {
            *current += text::word_count(line);
        }
    }
    let oversized = sections
        .iter()
        .filter(|&&count| count > SUBHEADING_MAX_WORDS)
        .count();
    let result = if oversized == 0 {
        MetricResult::good("Subheadings are well distributed.")
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!("{oversized} section(s) run longer than {SUBHEADING_MAX_WORDS} words without a subheading."),
        )
    };
    result.with_detail("oversized_sections", oversized)
}

/// Runs of sentences that open with the same word.
pub fn consecutive_sentences<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.sentences.is_empty() {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let openers = content
        .sentences
        .iter()
        .map(|sentence| text::tokenize(sentence).into_iter().next().unwrap_or_default())
        .collect::<Vec<_>>();

    let mut runs = 0;
    let mut streak = 1;
    for pair in openers.windows(2) {
        if !pair[0].is_empty() && pair[0] == pair[1] {
            streak += 1;
            if streak == REPEATED_OPENER_RUN {
                runs += 1;
            }
        } else {
            streak = 1;
        }
    }
    let result = if runs == 0 {
        MetricResult::good("Sentence openings are varied.")
    } else {
        MetricResult::fraction(
            0.4,
            Status::Ok,
            format!("{runs} run(s) of {REPEATED_OPENER_RUN}+ sentences start with the same word."),
        )
    };
    result.with_detail("runs", runs)
}

/// Share of words with three or more syllables.
pub fn word_complexity<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let complex = content
        .words
        .iter()
        .filter(|word| text::count_syllables(word) >= 3)
        .count();
    let Some(percent) = text::percentage(complex, content.word_count()) else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let percent = round1(percent);
    let result = if percent < COMPLEX_WORDS_GOOD_BELOW {
        MetricResult::good(format!("{percent}% of words are complex."))
    } else if percent < COMPLEX_WORDS_OK_BELOW {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("{percent}% of words are complex; prefer simpler alternatives."),
        )
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("{percent}% of words are complex; the text is hard to follow."),
        )
    };
    result.with_detail("percent", percent)
}

/// Unique words over total words.
pub fn lexical_diversity<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let total = content.word_count();
    let unique = content.words.iter().collect::<HashSet<_>>().len();
    let Some(percent) = text::percentage(unique, total) else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let percent = round1(percent);
    let result = if percent >= 40.0 {
        MetricResult::good(format!("Vocabulary is varied ({percent}% unique words)."))
    } else if percent >= 25.0 {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("Vocabulary is somewhat repetitive ({percent}% unique words)."),
        )
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("Vocabulary is repetitive ({percent}% unique words)."),
        )
    };
    result.with_detail("percent", percent)
}
