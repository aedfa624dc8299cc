use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EclipseError, Result};
use crate::stage::StageLabel;

/// A directional stage change that marks a named astronomical event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub from: StageLabel,
    pub to: StageLabel,
    pub event_name: String,
}

impl TransitionRule {
    pub fn new(from: StageLabel, to: StageLabel, event_name: impl Into<String>) -> Self {
        Self {
            from,
            to,
            event_name: event_name.into(),
        }
    }
}

/// The six contacts of a partial, total or annular solar eclipse.
pub fn standard_rules() -> Vec<TransitionRule> {
    use StageLabel::*;
    vec![
        TransitionRule::new(Sun, PartialSolarEclipse, "onset of partial eclipse"),
        TransitionRule::new(PartialSolarEclipse, Sun, "end of partial eclipse"),
        TransitionRule::new(PartialSolarEclipse, TotalSolarEclipse, "onset of totality"),
        TransitionRule::new(TotalSolarEclipse, PartialSolarEclipse, "end of totality"),
        TransitionRule::new(PartialSolarEclipse, AnnularSolarEclipse, "onset of annularity"),
        TransitionRule::new(AnnularSolarEclipse, PartialSolarEclipse, "end of annularity"),
    ]
}

/// Validated lookup table keyed by the ordered pair `(from, to)`.
///
/// `(A, B)` and `(B, A)` are independent entries. Rules keep their declaration
/// order for display.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: Vec<TransitionRule>,
    index: HashMap<(StageLabel, StageLabel), usize>,
}

impl RuleTable {
    /// Build a table, rejecting duplicate pairs, self-transitions and blank
    /// event names.
    pub fn new(rules: Vec<TransitionRule>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if rule.event_name.trim().is_empty() {
                return Err(EclipseError::RuleTable(format!(
                    "rule {} -> {} has an empty event name",
                    rule.from, rule.to
                )));
            }
            if rule.from == rule.to {
                return Err(EclipseError::RuleTable(format!(
                    "rule '{}' maps {} onto itself",
                    rule.event_name, rule.from
                )));
            }
            let key = (rule.from.clone(), rule.to.clone());
            if let Some(&prev) = index.get(&key) {
                let existing: &TransitionRule = &rules[prev];
                return Err(EclipseError::RuleTable(format!(
                    "duplicate rule for {} -> {} ('{}' and '{}')",
                    rule.from, rule.to, existing.event_name, rule.event_name
                )));
            }
            index.insert(key, i);
        }
        Ok(Self { rules, index })
    }

    pub fn standard() -> Self {
        // The built-in table has no duplicates.
        let rules = standard_rules();
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.from.clone(), r.to.clone()), i))
            .collect();
        Self { rules, index }
    }

    pub fn lookup(&self, from: &StageLabel, to: &StageLabel) -> Option<&TransitionRule> {
        self.index
            .get(&(from.clone(), to.clone()))
            .map(|&i| &self.rules[i])
    }

    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
