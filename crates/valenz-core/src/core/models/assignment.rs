use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A total truth assignment, one boolean per variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment of `num_vars` variables, all `false`.
    pub fn all_false(num_vars: usize) -> Self {
        Self {
            values: vec![false; num_vars],
        }
    }

    /// Draws every variable as an independent fair coin flip.
    pub fn random<R: Rng + ?Sized>(num_vars: usize, rng: &mut R) -> Self {
        Self {
            values: (0..num_vars).map(|_| rng.r#gen::<bool>()).collect(),
        }
    }

    #[inline]
    pub fn value(&self, var: usize) -> bool {
        self.values[var]
    }

    #[inline]
    pub fn flip(&mut self, var: usize) {
        self.values[var] = !self.values[var];
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices at which `self` and `other` disagree.
    pub fn differing_vars(&self, other: &Assignment) -> Vec<usize> {
        self.values
            .iter()
            .zip(other.values.iter())
            .enumerate()
            .filter_map(|(idx, (a, b))| (a != b).then_some(idx))
            .collect()
    }
}

impl From<Vec<bool>> for Assignment {
    fn from(values: Vec<bool>) -> Self {
        Self { values }
    }
}

impl Index<usize> for Assignment {
    type Output = bool;

    fn index(&self, var: usize) -> &bool {
        &self.values[var]
    }
}
