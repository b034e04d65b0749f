use crate::core::particle::DIM;

/// Kinds of boundary interventions worth reporting.
///
/// Reflections are routine and not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEventKind {
    /// Particle left the viewport and was re-seeded inside the spawn region.
    Reset,
    /// Particle exceeded the position limits; its position update was withheld.
    Clamped,
}

impl BoundaryEventKind {
    pub fn name(self) -> &'static str {
        match self {
            BoundaryEventKind::Reset => "reset",
            BoundaryEventKind::Clamped => "clamped",
        }
    }
}

/// A boundary intervention on one particle during one step.
///
/// - `step`: step counter value of the step that produced the event (1-based).
/// - `index`: particle index at the time of the step.
/// - `position`: the offending integrated position, before any correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEvent {
    pub step: u64,
    pub index: usize,
    pub kind: BoundaryEventKind,
    pub position: [f64; DIM],
}

impl BoundaryEvent {
    pub fn new(step: u64, index: usize, kind: BoundaryEventKind, position: [f64; DIM]) -> Self {
        Self {
            step,
            index,
            kind,
            position,
        }
    }

    /// Stamp the event with its step and particle index.
    #[inline]
    pub fn at(mut self, step: u64, index: usize) -> Self {
        self.step = step;
        self.index = index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_overrides_step_and_index() {
        let ev = BoundaryEvent::new(0, 0, BoundaryEventKind::Reset, [-1.0, 2.0]).at(7, 3);
        assert_eq!(ev.step, 7);
        assert_eq!(ev.index, 3);
        assert_eq!(ev.kind, BoundaryEventKind::Reset);
        assert_eq!(ev.position, [-1.0, 2.0]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(BoundaryEventKind::Reset.name(), "reset");
        assert_eq!(BoundaryEventKind::Clamped.name(), "clamped");
    }
}
