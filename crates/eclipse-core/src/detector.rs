use tracing::debug;

use crate::rules::RuleTable;
use crate::sampler::SamplePoint;
use crate::stage::StageLabel;

/// A sampled frame together with the classifier's verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub frame_index: usize,
    pub elapsed_seconds: u64,
    /// `None` when the classifier found nothing.
    pub label: Option<StageLabel>,
}

impl Sample {
    pub fn new(point: SamplePoint, label: Option<StageLabel>) -> Self {
        Self {
            frame_index: point.frame_index,
            elapsed_seconds: point.elapsed_seconds,
            label,
        }
    }
}

/// A recognised stage change, before it is stamped and recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub frame_index: usize,
    pub from: StageLabel,
    pub to: StageLabel,
    pub event_name: String,
}

/// Last recognised stage. `None` until the first labelled sample.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectorState {
    pub previous_label: Option<StageLabel>,
}

impl DetectorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition function: consume one sample, return the next state
    /// and the transition it completes, if any.
    ///
    /// Unlabelled samples leave the state untouched. Every labelled sample
    /// becomes the new previous label, whether or not the pair was in the
    /// table.
    pub fn advance(
        &self,
        sample: &Sample,
        rules: &RuleTable,
    ) -> (DetectorState, Option<Transition>) {
        let Some(label) = sample.label.as_ref() else {
            return (self.clone(), None);
        };

        let next = DetectorState {
            previous_label: Some(label.clone()),
        };

        match self.previous_label.as_ref() {
            None => (next, None),
            Some(prev) if prev == label => (self.clone(), None),
            Some(prev) => {
                let transition = rules.lookup(prev, label).map(|rule| Transition {
                    frame_index: sample.frame_index,
                    from: prev.clone(),
                    to: label.clone(),
                    event_name: rule.event_name.clone(),
                });
                (next, transition)
            }
        }
    }
}

/// Single-pass transition detector over a fixed rule table.
pub struct TransitionDetector<'a> {
    rules: &'a RuleTable,
    state: DetectorState,
}

impl<'a> TransitionDetector<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            rules,
            state: DetectorState::new(),
        }
    }

    pub fn observe(&mut self, sample: &Sample) -> Option<Transition> {
        let (next, transition) = self.state.advance(sample, self.rules);
        match (&transition, &sample.label) {
            (Some(t), _) => debug!(
                frame = t.frame_index,
                from = %t.from,
                to = %t.to,
                event = %t.event_name,
                "Stage transition"
            ),
            (None, Some(label)) if next.previous_label != self.state.previous_label => debug!(
                frame = sample.frame_index,
                label = %label,
                "Tracking new stage"
            ),
            _ => {}
        }
        self.state = next;
        transition
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = DetectorState::new();
    }
}
