//! Observation of element updates.

use crate::element::ElementKind;
use crate::tank::TankState;
use cl_components::FlowState;
use cl_core::ElementId;

/// One element update within one step.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceSample {
    pub step: usize,
    pub element: ElementId,
    pub name: String,
    pub kind: ElementKind,
    pub inlet: FlowState,
    pub outlet: FlowState,
    /// Stored state after the update, for tanks
    pub tank: Option<TankState>,
}

/// Receives the samples of every completed step.
///
/// Samples of a step that fails are never delivered.
pub trait TraceSink {
    fn record(&mut self, sample: TraceSample);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _sample: TraceSample) {}
}

/// Keeps all samples in memory, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    samples: Vec<TraceSample>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<TraceSample> {
        self.samples
    }

    /// Samples of one element, in step order.
    pub fn for_element(&self, element: ElementId) -> impl Iterator<Item = &TraceSample> {
        self.samples.iter().filter(move |s| s.element == element)
    }
}

impl TraceSink for TraceRecorder {
    fn record(&mut self, sample: TraceSample) {
        self.samples.push(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(step: usize, index: usize) -> TraceSample {
        let flow = FlowState::from_si(0.1, 5e6, 280.0, 0.0);
        TraceSample {
            step,
            element: ElementId::from_index(index).unwrap(),
            name: format!("e{index}"),
            kind: ElementKind::Pipe,
            inlet: flow,
            outlet: flow,
            tank: None,
        }
    }

    #[test]
    fn recorder_filters_by_element() {
        let mut rec = TraceRecorder::new();
        for step in 0..3 {
            rec.record(sample(step, 0));
            rec.record(sample(step, 1));
        }
        let steps: Vec<usize> = rec
            .for_element(ElementId::from_index(1).unwrap())
            .map(|s| s.step)
            .collect();
        assert_eq!(steps, vec![0, 1, 2]);
        assert_eq!(rec.samples().len(), 6);
    }
}
