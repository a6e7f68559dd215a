//! Plain-text heuristics shared by the metric functions.
//!
//! Everything here is deterministic and allocation-light; callers pass in
//! text that has already had its markup removed.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)|\n+").expect("sentence regex is valid"));

static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    let irregular = [
        "been", "born", "bought", "brought", "built", "caught", "chosen", "done", "drawn",
        "driven", "eaten", "fallen", "felt", "forgotten", "found", "given", "gone", "grown",
        "heard", "held", "hidden", "kept", "known", "laid", "led", "left", "lost", "made",
        "meant", "met", "paid", "put", "read", "said", "seen", "sent", "set", "shown", "shut",
        "sold", "spent", "spoken", "stolen", "taken", "taught", "thought", "told", "understood",
        "won", "worn", "written",
    ];
    Regex::new(&format!(
        r"(?i)\b(?:am|is|are|was|were|be|been|being|get|gets|got|gotten)\s+(?:\w+ed|{})\b",
        irregular.join("|")
    ))
    .expect("passive voice regex is valid")
});

/// Single words and phrases that signal a transition between ideas.
pub const TRANSITION_WORDS: &[&str] = &[
    "accordingly",
    "additionally",
    "afterward",
    "also",
    "although",
    "as a result",
    "because",
    "besides",
    "consequently",
    "conversely",
    "finally",
    "first",
    "for example",
    "for instance",
    "furthermore",
    "hence",
    "however",
    "in addition",
    "in conclusion",
    "in contrast",
    "in fact",
    "in other words",
    "in short",
    "indeed",
    "instead",
    "likewise",
    "meanwhile",
    "moreover",
    "nevertheless",
    "next",
    "nonetheless",
    "on the other hand",
    "otherwise",
    "second",
    "similarly",
    "since",
    "so that",
    "specifically",
    "subsequently",
    "then",
    "therefore",
    "thus",
    "to summarize",
    "ultimately",
    "whereas",
];

static TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = TRANSITION_WORDS
        .iter()
        .map(|phrase| regex::escape(phrase).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("transition regex is valid")
});

/// Words that add length to a slug without adding meaning.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "how", "in", "is",
    "it", "of", "on", "or", "that", "the", "this", "to", "was", "what", "when", "where", "which",
    "who", "why", "will", "with",
];

/// Lowercased word tokens with surrounding punctuation removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|raw| raw.chars().any(char::is_alphanumeric))
        .count()
}

/// Sentences split on terminal punctuation and line breaks. Fragments with
/// no alphanumeric content are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|sentence| sentence.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

/// Vowel-group syllable estimate, never below one for a non-empty word.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let letters = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect::<Vec<_>>();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let len = letters.len();
    if groups > 1 && letters[len - 1] == 'e' && !(len >= 2 && letters[len - 2] == 'l') {
        groups -= 1;
    }
    groups.max(1)
}

pub fn total_syllables(words: &[String]) -> usize {
    words.iter().map(|word| count_syllables(word)).sum()
}

/// Flesch reading ease; `None` when there are no words or sentences.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> Option<f64> {
    if words == 0 || sentences == 0 {
        return None;
    }
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    Some(206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word)
}

pub fn is_passive(sentence: &str) -> bool {
    PASSIVE_RE.is_match(sentence)
}

pub fn has_transition(sentence: &str) -> bool {
    TRANSITION_RE.is_match(sentence)
}

/// Whole-word, case-insensitive occurrences of `phrase` in a token stream.
pub fn phrase_occurrences(tokens: &[String], phrase: &str) -> usize {
    let needle = tokenize(phrase);
    if needle.is_empty() || needle.len() > tokens.len() {
        return 0;
    }
    tokens
        .windows(needle.len())
        .filter(|window| *window == needle.as_slice())
        .count()
}

pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    phrase_occurrences(&tokenize(text), phrase) > 0
}

/// `part / total * 100`, or `None` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}

/// Rounds to one decimal place for reporting.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
