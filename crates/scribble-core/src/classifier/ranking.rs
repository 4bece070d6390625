//! Prediction ranking
//!
//! Orders class probabilities into the (label, confidence) list the result
//! display consumes: top prediction first, then the runners-up.

use std::cmp::Ordering;

use super::GlyphMode;

/// One labeled prediction with its confidence in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: char,
    pub confidence: f32,
}

/// Pair probabilities with their labels and sort by confidence descending.
///
/// `Vec::sort_by` is stable, so equal confidences keep label-alphabet order.
pub fn rank_predictions(probabilities: &[f32], mode: GlyphMode) -> Vec<Prediction> {
    let mut ranked: Vec<Prediction> = probabilities
        .iter()
        .enumerate()
        .map(|(class, &confidence)| Prediction {
            label: mode.label(class),
            confidence,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
