//! Descriptive statistics over a batch of sampled responses.
//!
//! These are plain aggregations (averages, spreads, distinct-outcome
//! counts), not statistical tests. Each analysis needs at least two
//! responses.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::patterns::{
    contains_any, tokens, word_count, EXTENDED_METAPHOR_MARKERS, METAPHOR_MARKERS, TONE_MARKERS,
    WORDPLAY_MARKERS,
};

/// Fewest responses an analysis accepts.
pub const MIN_RESPONSES: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Need at least {needed} responses to analyze {subject}")]
    InsufficientData {
        subject: &'static str,
        needed: usize,
        got: usize,
    },
}

fn require_responses(responses: &[String], subject: &'static str) -> Result<(), AnalysisError> {
    if responses.len() < MIN_RESPONSES {
        return Err(AnalysisError::InsufficientData {
            subject,
            needed: MIN_RESPONSES,
            got: responses.len(),
        });
    }
    Ok(())
}

/// Rounded mean word count and max-minus-min spread.
fn length_stats(responses: &[String]) -> (usize, usize) {
    let counts: Vec<usize> = responses.iter().map(|r| word_count(r)).collect();
    let total: usize = counts.iter().sum();
    let average = (total as f64 / counts.len() as f64).round() as usize;
    let max = counts.iter().copied().max().unwrap_or(0);
    let min = counts.iter().copied().min().unwrap_or(0);
    (average, max - min)
}

fn summary(count: usize, average: usize) -> String {
    format!("Analyzed {count} responses with average length {average} words")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureImpact {
    pub response_count: usize,
    pub average_length: usize,
    pub length_variation: usize,

    /// Distinct outcomes (1 or 2) of the "has metaphor marker" test.
    pub metaphor_diversity: usize,

    /// Distinct outcomes (1 or 2) of the "has tone marker" test.
    pub tone_consistency: usize,

    pub summary: String,
}

/// Summarize how a temperature sweep affected the responses.
pub fn analyze_temperature_impact(responses: &[String]) -> Result<TemperatureImpact, AnalysisError> {
    require_responses(responses, "temperature impact")?;

    let (average_length, length_variation) = length_stats(responses);
    let metaphor: HashSet<bool> = responses
        .iter()
        .map(|r| contains_any(r, METAPHOR_MARKERS))
        .collect();
    let tone: HashSet<bool> = responses
        .iter()
        .map(|r| contains_any(r, TONE_MARKERS))
        .collect();

    Ok(TemperatureImpact {
        response_count: responses.len(),
        average_length,
        length_variation,
        metaphor_diversity: metaphor.len(),
        tone_consistency: tone.len(),
        summary: summary(responses.len(), average_length),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPImpact {
    pub response_count: usize,
    pub average_length: usize,
    pub length_variation: usize,

    /// Unique lowercased tokens across all responses.
    pub vocabulary_diversity: usize,

    /// Distinct outcomes (1 or 2) of the "metaphor or wordplay" test.
    pub creativity_indicators: usize,

    pub metaphor_count: usize,
    pub wordplay_count: usize,

    /// Percentage of responses with a metaphor or wordplay marker, each
    /// counted separately, so it can exceed 100.
    pub quality_score: i64,

    /// Unique tokens relative to total (average-based) token volume.
    pub diversity_score: i64,

    pub summary: String,
}

/// Summarize how a top-p sweep affected the responses.
pub fn analyze_top_p_impact(responses: &[String]) -> Result<TopPImpact, AnalysisError> {
    require_responses(responses, "Top P impact")?;

    let (average_length, length_variation) = length_stats(responses);

    let mut vocabulary: HashSet<String> = HashSet::new();
    let mut creativity: HashSet<bool> = HashSet::new();
    let mut metaphor_count = 0;
    let mut wordplay_count = 0;

    for response in responses {
        vocabulary.extend(tokens(response).into_iter().map(str::to_lowercase));

        let has_metaphor = contains_any(response, EXTENDED_METAPHOR_MARKERS);
        let has_wordplay = contains_any(response, WORDPLAY_MARKERS);
        if has_metaphor {
            metaphor_count += 1;
        }
        if has_wordplay {
            wordplay_count += 1;
        }
        creativity.insert(has_metaphor || has_wordplay);
    }

    let n = responses.len() as f64;
    let quality_score = ((metaphor_count + wordplay_count) as f64 / n * 100.0).round() as i64;
    let diversity_score =
        (vocabulary.len() as f64 / (average_length as f64 * n) * 100.0).round() as i64;

    Ok(TopPImpact {
        response_count: responses.len(),
        average_length,
        length_variation,
        vocabulary_diversity: vocabulary.len(),
        creativity_indicators: creativity.len(),
        metaphor_count,
        wordplay_count,
        quality_score,
        diversity_score,
        summary: summary(responses.len(), average_length),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingComparison {
    pub top_p: TopPImpact,
    pub temperature: TopPImpact,
    pub top_p_advantage: String,
    pub temperature_advantage: String,
    pub recommendation: String,
}

/// Compare a top-p sweep against a temperature sweep.
///
/// Both batches go through the top-p analysis so their quality scores are
/// comparable; top-p is recommended only when its score is strictly higher.
pub fn compare_top_p_vs_temperature(
    top_p_responses: &[String],
    temperature_responses: &[String],
) -> Result<SamplingComparison, AnalysisError> {
    let top_p = analyze_top_p_impact(top_p_responses)?;
    let temperature = analyze_top_p_impact(temperature_responses)?;

    let recommendation = if top_p.quality_score > temperature.quality_score {
        "Top P better for quality-focused tasks"
    } else {
        "Temperature better for creative variety"
    };

    Ok(SamplingComparison {
        top_p,
        temperature,
        top_p_advantage: "More controlled diversity, maintains quality".to_string(),
        temperature_advantage: "More random creativity, varied outputs".to_string(),
        recommendation: recommendation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_requires_two_responses() {
        let err = analyze_temperature_impact(&batch(&["only one"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Need at least 2 responses to analyze temperature impact"
        );

        let err = analyze_top_p_impact(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Need at least 2 responses to analyze Top P impact");
    }

    #[test]
    fn test_temperature_stats() {
        let responses = batch(&[
            "Your code runs like a sloth",
            "A witty bug",
            "Plain text here now ok",
        ]);
        let impact = analyze_temperature_impact(&responses).unwrap();
        assert_eq!(impact.response_count, 3);
        // 6 + 3 + 5 = 14 / 3 = 4.67
        assert_eq!(impact.average_length, 5);
        assert_eq!(impact.length_variation, 3);
        // "like" in first; "ok"/"here" have no "as"/"like"
        assert_eq!(impact.metaphor_diversity, 2);
        assert_eq!(impact.tone_consistency, 2);
        assert_eq!(impact.summary, "Analyzed 3 responses with average length 5 words");
    }

    #[test]
    fn test_uniform_batch_has_single_outcome() {
        let responses = batch(&["just words", "more words"]);
        let impact = analyze_temperature_impact(&responses).unwrap();
        assert_eq!(impact.metaphor_diversity, 1);
        assert_eq!(impact.tone_consistency, 1);
        assert_eq!(impact.length_variation, 0);
    }

    #[test]
    fn test_top_p_stats() {
        let responses = batch(&["Life is a pun", "Dull dull dull dull"]);
        let impact = analyze_top_p_impact(&responses).unwrap();
        assert_eq!(impact.average_length, 4);
        assert_eq!(impact.metaphor_count, 1);
        assert_eq!(impact.wordplay_count, 1);
        assert_eq!(impact.creativity_indicators, 2);
        // life, is, a, pun, dull
        assert_eq!(impact.vocabulary_diversity, 5);
        assert_eq!(impact.quality_score, 100);
        // 5 / (4 * 2) = 62.5 -> 63
        assert_eq!(impact.diversity_score, 63);
    }

    #[test]
    fn test_comparison_recommendation() {
        let creative = batch(&["Life is a pun", "Sly as a fox"]);
        let dull = batch(&["Dull text", "Boring text"]);

        let cmp = compare_top_p_vs_temperature(&creative, &dull).unwrap();
        assert_eq!(cmp.recommendation, "Top P better for quality-focused tasks");

        let cmp = compare_top_p_vs_temperature(&dull, &dull).unwrap();
        assert_eq!(cmp.recommendation, "Temperature better for creative variety");
    }

    #[test]
    fn test_comparison_propagates_insufficient_data() {
        let ok = batch(&["a b", "c d"]);
        assert!(compare_top_p_vs_temperature(&ok, &batch(&["x"])).is_err());
    }
}
