//! Fusion and decision policies
//!
//! Deterministic rules combining per-category scores into a final
//! decision and confidence, plus the learned-classifier alternative.

use classifier::Classifier;
use signal_stats::clamp01;
use std::fmt;

/// Scoring mode, fixed at construction.
///
/// Never re-checked per call and never a silent fallback: a classifier
/// failure in `Learned` mode propagates to the caller.
pub enum Scoring {
    /// Fixed rule-based fusion
    Rules,
    /// A pretrained classifier owns the decision; rule scores stay as
    /// diagnostics
    Learned(Box<dyn Classifier>),
}

impl Scoring {
    pub fn is_learned(&self) -> bool {
        matches!(self, Scoring::Learned(_))
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Scoring::Rules => "rules",
            Scoring::Learned(_) => "learned",
        }
    }
}

impl fmt::Debug for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode_name())
    }
}

/// Fused decision and confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub detected: bool,
    pub confidence: f64,
}

/// Access fusion: weighted tailgating + time-of-day, with a flat bonus
/// for multiple people.
///
/// The confidence is deliberately left unclamped; the +0.2 bonus can
/// push it slightly past 1.0, matching the documented contract.
pub fn access_rule_fusion(person_count: u32, tailgating: f64, time: f64) -> Decision {
    let mut combined = 0.5 * tailgating + 0.3 * time;
    if person_count > 1 {
        combined += 0.2;
    }
    Decision {
        detected: combined > 0.6 || tailgating > 0.7,
        confidence: combined,
    }
}

/// Behavior fusion: strongest single signal wins
pub fn behavior_rule_fusion(loitering: f64, swaying: f64) -> Decision {
    let combined = loitering.max(swaying);
    Decision {
        detected: combined > 0.6,
        confidence: combined,
    }
}

/// Drowsiness fusion over eye closure, inactivity, and nodding.
///
/// Any single saturated signal (closed eyes, >5s inactivity) forces the
/// decision even when the weighted confidence stays low.
pub fn drowsiness_rule_fusion(ear: f64, nodding: bool, inactivity_secs: f64) -> Decision {
    let ear_factor = if ear < 0.2 {
        (1.0 - ear / 0.2).max(0.0)
    } else {
        0.0
    };
    let inactivity_factor = clamp01(inactivity_secs / 5.0);
    let nod_factor = if nodding { 0.7 } else { 0.0 };

    let confidence = 0.5 * ear_factor + 0.3 * inactivity_factor + 0.2 * nod_factor;
    Decision {
        detected: confidence > 0.6 || ear < 0.2 || inactivity_secs > 5.0,
        confidence,
    }
}

/// Fight fusion: motion intensity alone decides; confidence is boosted
/// past the raw score once the threshold is crossed.
pub fn fight_rule_fusion(motion: f64) -> Decision {
    if motion > 0.4 {
        Decision {
            detected: true,
            confidence: clamp01(motion * 1.5),
        }
    } else {
        Decision {
            detected: false,
            confidence: motion,
        }
    }
}

/// Decision from classifier outputs: the first output is the confidence
pub fn learned_decision(outputs: &[f64]) -> Decision {
    let confidence = outputs.first().copied().unwrap_or(0.0);
    Decision {
        detected: confidence > 0.6,
        confidence,
    }
}

/// Index of the largest value, `None` for an empty slice
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_fusion_weighted_sum() {
        let d = access_rule_fusion(1, 0.4, 0.8);
        assert!((d.confidence - 0.44).abs() < 1e-9);
        assert!(!d.detected);
    }

    #[test]
    fn test_access_fusion_multi_person_bonus() {
        let d = access_rule_fusion(2, 0.4, 0.8);
        assert!((d.confidence - 0.64).abs() < 1e-9);
        assert!(d.detected);
    }

    #[test]
    fn test_access_fusion_tailgating_overrides() {
        // weighted sum below 0.6 but tailgating alone forces the decision
        let d = access_rule_fusion(1, 0.75, 0.1);
        assert!(d.confidence < 0.6);
        assert!(d.detected);
    }

    #[test]
    fn test_access_confidence_can_exceed_one() {
        let d = access_rule_fusion(2, 1.0, 0.8);
        assert!(d.confidence > 1.0);
    }

    #[test]
    fn test_behavior_fusion_takes_max() {
        let d = behavior_rule_fusion(0.3, 0.65);
        assert!(d.detected);
        assert_eq!(d.confidence, 0.65);

        let d = behavior_rule_fusion(0.5, 0.2);
        assert!(!d.detected);
        assert_eq!(d.confidence, 0.5);
    }

    #[test]
    fn test_drowsiness_closed_eyes_forces_decision() {
        let d = drowsiness_rule_fusion(0.1, false, 0.0);
        assert!(d.detected);
        // ear_factor 0.5 weighted at 0.5
        assert!((d.confidence - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_drowsiness_open_and_active_is_negative() {
        let d = drowsiness_rule_fusion(0.3, false, 0.1);
        assert!(!d.detected);
        assert!(d.confidence < 0.1);
    }

    #[test]
    fn test_drowsiness_inactivity_forces_decision() {
        let d = drowsiness_rule_fusion(0.3, false, 6.0);
        assert!(d.detected);
    }

    #[test]
    fn test_drowsiness_all_factors() {
        let d = drowsiness_rule_fusion(0.0, true, 10.0);
        // 0.5*1.0 + 0.3*1.0 + 0.2*0.7
        assert!((d.confidence - 0.94).abs() < 1e-9);
        assert!(d.detected);
    }

    #[test]
    fn test_fight_fusion_boosts_above_threshold() {
        let d = fight_rule_fusion(0.5);
        assert!(d.detected);
        assert!((d.confidence - 0.75).abs() < 1e-9);

        let d = fight_rule_fusion(0.8);
        assert_eq!(d.confidence, 1.0);
    }

    #[test]
    fn test_fight_fusion_below_threshold_keeps_raw_score() {
        let d = fight_rule_fusion(0.3);
        assert!(!d.detected);
        assert_eq!(d.confidence, 0.3);
    }

    #[test]
    fn test_learned_decision_threshold() {
        assert!(learned_decision(&[0.61]).detected);
        assert!(!learned_decision(&[0.6]).detected);
        assert!(!learned_decision(&[]).detected);
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.8, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
        // first wins on ties
        assert_eq!(argmax(&[0.4, 0.4]), Some(0));
    }
}
