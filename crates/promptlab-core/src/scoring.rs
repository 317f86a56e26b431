//! Heuristic quality scoring for prompt/response pairs.
//!
//! Every metric is a deterministic text statistic; there is no model
//! in the loop, so scoring the same pair twice always yields identical
//! numbers. Rounding happens here, at metric creation, so stored and
//! displayed values agree.

use std::collections::HashSet;

use crate::domain::QualityMetrics;

// Ranking weights are frozen. Stored experiments stay comparable
// across versions only while these never change.
const WEIGHT_LENGTH_EFFICIENCY: f64 = 0.25;
const WEIGHT_RICHNESS: f64 = 0.20;
const WEIGHT_COVERAGE: f64 = 0.25;
const WEIGHT_STRUCTURE: f64 = 0.15;
const WEIGHT_CLARITY: f64 = 0.15;

/// Length target floor in characters. Short prompts still expect a
/// substantive answer.
const MIN_TARGET_CHARS: f64 = 350.0;

/// Prompt-to-target multiplier: long prompts raise the expected
/// response length a little.
const TARGET_PROMPT_FACTOR: f64 = 1.1;

/// Prompt tokens strictly longer than this count as coverage keywords.
const KEYWORD_MIN_CHARS: usize = 4;

/// Break count at which the structure metric saturates.
const STRUCTURE_SATURATION: f64 = 6.0;

/// Divisor normalizing raw sentence-length variance into `[0, 1]`.
const VARIANCE_SCALE: f64 = 50.0;

/// Normalized variance assumed for responses with at most one
/// sentence, so degenerate output is not rewarded with perfect
/// clarity.
const SINGLE_SENTENCE_VARIANCE: f64 = 0.2;

/// Reading speed assumed for `reading_time_seconds`.
const WORDS_PER_MINUTE: f64 = 180.0;

/// Compute the full metric set for one prompt/response pair.
pub fn evaluate(prompt: &str, response: &str) -> QualityMetrics {
    let prompt_keywords: Vec<String> = tokenize(prompt)
        .into_iter()
        .filter(|token| token.len() > KEYWORD_MIN_CHARS)
        .collect();
    let response_tokens = tokenize(response);
    let unique_tokens: HashSet<&str> = response_tokens.iter().map(String::as_str).collect();

    // An empty response still counts as one word so the ratios below
    // stay defined.
    let words = response_tokens.len().max(1);

    let char_count = response.chars().count() as f64;
    let target =
        (prompt.chars().count() as f64 * TARGET_PROMPT_FACTOR).max(MIN_TARGET_CHARS);
    let length_efficiency = round3(char_count.min(target) / target);

    let richness = round3(unique_tokens.len() as f64 / words as f64);

    // Keywords keep duplicates: a term the prompt repeats weighs more.
    let overlap_hits = prompt_keywords
        .iter()
        .filter(|keyword| unique_tokens.contains(keyword.as_str()))
        .count();
    let coverage = round3(overlap_hits as f64 / prompt_keywords.len().max(1) as f64);

    let bullet_breaks = response.matches("\n-").count();
    let paragraph_breaks = response.matches("\n\n").count();
    let structure =
        round3(((bullet_breaks + paragraph_breaks) as f64 / STRUCTURE_SATURATION).min(1.0));

    let clarity = round3(1.0 - sentence_length_variance(response).min(1.0));

    let overall = round3(
        length_efficiency * WEIGHT_LENGTH_EFFICIENCY
            + richness * WEIGHT_RICHNESS
            + coverage * WEIGHT_COVERAGE
            + structure * WEIGHT_STRUCTURE
            + clarity * WEIGHT_CLARITY,
    );

    let reading_time_seconds = round1(words as f64 / WORDS_PER_MINUTE * 60.0);

    QualityMetrics {
        length_efficiency,
        richness,
        coverage,
        structure,
        clarity,
        overall,
        reading_time_seconds,
    }
}

/// Lowercase, map every character outside ASCII alphanumerics and
/// whitespace to a space, then split on whitespace. `don't` tokenizes
/// as `don` and `t`.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Normalized sentence-length variance: population variance of the
/// per-sentence word counts, scaled by `1 / VARIANCE_SCALE` and capped
/// at 1. Responses with at most one sentence report
/// [`SINGLE_SENTENCE_VARIANCE`].
fn sentence_length_variance(text: &str) -> f64 {
    let sentences = split_sentences(text);
    if sentences.len() <= 1 {
        return SINGLE_SENTENCE_VARIANCE;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|sentence| sentence.split_whitespace().count() as f64)
        .collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let variance = lengths
        .iter()
        .map(|length| (length - mean).powi(2))
        .sum::<f64>()
        / lengths.len() as f64;

    (variance / VARIANCE_SCALE).min(1.0)
}

/// Split after each `.`, `!` or `?`, keeping the trailing unpunctuated
/// segment and dropping whitespace-only ones.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = idx + c.len_utf8();
            let segment = text[start..end].trim();
            if !segment.is_empty() {
                sentences.push(segment);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
