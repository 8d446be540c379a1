use crate::core::models::assignment::Assignment;
use std::collections::BTreeSet;

/// Scratch record handed to the memory hook every iteration.
///
/// The search owns it and passes it by mutable reference, but never reads it
/// back; whatever a hook stores here cannot steer the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMemory {
    /// Valences at which a hook has detected a plateau.
    pub plateaus: Vec<f64>,
    /// Variables a hook has marked as not worth flipping.
    pub blacklist: BTreeSet<usize>,
}

/// Observer invoked once per iteration, after the assignment has changed.
pub trait MemoryHook {
    fn observe(&self, memory: &mut SearchMemory, assignment: &Assignment, valence: f64);
}

impl<F> MemoryHook for F
where
    F: Fn(&mut SearchMemory, &Assignment, f64),
{
    fn observe(&self, memory: &mut SearchMemory, assignment: &Assignment, valence: f64) {
        self(memory, assignment, valence)
    }
}

/// The default hook; records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMemory;

impl MemoryHook for NoopMemory {
    #[inline]
    fn observe(&self, _memory: &mut SearchMemory, _assignment: &Assignment, _valence: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_hook_leaves_memory_untouched() {
        let mut memory = SearchMemory::default();
        NoopMemory.observe(&mut memory, &Assignment::all_false(3), 0.4);
        assert_eq!(memory, SearchMemory::default());
    }

    #[test]
    fn closure_hooks_can_record_plateaus() {
        let hook = |memory: &mut SearchMemory, _: &Assignment, valence: f64| {
            if memory.plateaus.last() != Some(&valence) {
                memory.plateaus.push(valence);
            }
        };
        let mut memory = SearchMemory::default();
        let assignment = Assignment::all_false(2);
        for valence in [0.5, 0.5, 0.75] {
            hook.observe(&mut memory, &assignment, valence);
        }
        assert_eq!(memory.plateaus, vec![0.5, 0.75]);
    }
}
