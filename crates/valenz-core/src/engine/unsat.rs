use crate::core::models::assignment::Assignment;
use crate::core::models::formula::Formula;
use rand::Rng;

const ABSENT: usize = usize::MAX;

/// The set of clause indices the current assignment leaves unsatisfied.
///
/// Backed by a dense member list plus a position table, so membership tests,
/// insertion, removal and uniform sampling are all O(1). Member order depends
/// only on the sequence of operations applied, which keeps seeded searches
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsatisfiedSet {
    members: Vec<usize>,
    positions: Vec<usize>,
}

impl UnsatisfiedSet {
    pub fn with_capacity(num_clauses: usize) -> Self {
        Self {
            members: Vec::new(),
            positions: vec![ABSENT; num_clauses],
        }
    }

    /// Evaluates every clause from scratch.
    pub fn from_assignment(formula: &Formula, assignment: &Assignment) -> Self {
        let mut set = Self::with_capacity(formula.num_clauses());
        for clause_idx in formula.unsatisfied_clauses(assignment) {
            set.insert(clause_idx);
        }
        set
    }

    #[inline]
    pub fn contains(&self, clause_idx: usize) -> bool {
        self.positions[clause_idx] != ABSENT
    }

    /// Returns `true` if the clause was not already present.
    pub fn insert(&mut self, clause_idx: usize) -> bool {
        if self.contains(clause_idx) {
            return false;
        }
        self.positions[clause_idx] = self.members.len();
        self.members.push(clause_idx);
        true
    }

    /// Returns `true` if the clause was present.
    pub fn remove(&mut self, clause_idx: usize) -> bool {
        let pos = self.positions[clause_idx];
        if pos == ABSENT {
            return false;
        }
        self.members.swap_remove(pos);
        if let Some(&moved) = self.members.get(pos) {
            self.positions[moved] = pos;
        }
        self.positions[clause_idx] = ABSENT;
        true
    }

    /// Re-evaluates one clause and brings its membership up to date.
    #[inline]
    pub fn refresh(&mut self, formula: &Formula, assignment: &Assignment, clause_idx: usize) {
        if formula.clause(clause_idx).is_satisfied_by(assignment) {
            self.remove(clause_idx);
        } else {
            self.insert(clause_idx);
        }
    }

    /// Draws one member uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.gen_range(0..self.members.len())])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    /// Members in ascending clause order.
    pub fn to_sorted_vec(&self) -> Vec<usize> {
        let mut sorted = self.members.clone();
        sorted.sort_unstable();
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn insert_and_remove_keep_positions_consistent() {
        let mut set = UnsatisfiedSet::with_capacity(6);
        assert!(set.insert(4));
        assert!(set.insert(1));
        assert!(set.insert(5));
        assert!(!set.insert(1));

        assert!(set.remove(4));
        assert!(!set.remove(4));
        assert!(set.contains(1));
        assert!(set.contains(5));
        assert!(set.remove(5));
        assert!(set.remove(1));
        assert!(set.is_empty());
    }

    #[test]
    fn from_assignment_matches_full_evaluation() {
        let formula = Formula::from_pairs([
            vec![(0, true)],
            vec![(1, true)],
            vec![(0, false), (1, true)],
        ]);
        let assignment = Assignment::from(vec![true, false]);
        let set = UnsatisfiedSet::from_assignment(&formula, &assignment);
        assert_eq!(set.to_sorted_vec(), vec![1, 2]);
    }

    #[test]
    fn refresh_tracks_a_flip() {
        let formula = Formula::from_pairs([vec![(0, true)], vec![(0, false)]]);
        let mut assignment = Assignment::from(vec![true]);
        let mut set = UnsatisfiedSet::from_assignment(&formula, &assignment);
        assert_eq!(set.to_sorted_vec(), vec![1]);

        assignment.flip(0);
        set.refresh(&formula, &assignment, 0);
        set.refresh(&formula, &assignment, 1);
        assert_eq!(set.to_sorted_vec(), vec![0]);
    }

    #[test]
    fn choose_only_returns_members() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut set = UnsatisfiedSet::with_capacity(10);
        assert_eq!(set.choose(&mut rng), None);

        set.insert(3);
        set.insert(7);
        for _ in 0..50 {
            let picked = set.choose(&mut rng).unwrap();
            assert!(picked == 3 || picked == 7);
        }
    }
}
