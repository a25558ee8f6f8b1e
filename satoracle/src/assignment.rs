use satoracle_formula::{Lit, Var};

/// Current partial assignment of the search.
///
/// Indexed by [`Var::number`], slot 0 is never used. Every assignment is recorded on a trail so
/// that all assignments made after a checkpoint can be undone when a branch fails.
pub struct Assignment {
    assignment: Vec<Option<bool>>,
    trail: Vec<Var>,
}

impl Assignment {
    /// All variables `1..=var_count` unassigned.
    pub fn new(var_count: usize) -> Assignment {
        Assignment {
            assignment: vec![None; var_count + 1],
            trail: vec![],
        }
    }

    /// Current partial assignment as slice, including the unused slot 0.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.assignment[var.number()]
    }

    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var().number()].map(|value| value == lit.is_positive())
    }

    /// Make `lit` true. The variable has to be unassigned.
    pub fn assign_lit(&mut self, lit: Lit) {
        debug_assert!(self.var_value(lit.var()).is_none());
        self.assignment[lit.var().number()] = Some(lit.is_positive());
        self.trail.push(lit.var());
    }

    /// Number of assignments made so far, usable with [`backtrack`](Assignment::backtrack).
    pub fn checkpoint(&self) -> usize {
        self.trail.len()
    }

    /// Undo all assignments made after the given checkpoint.
    pub fn backtrack(&mut self, checkpoint: usize) {
        for &var in &self.trail[checkpoint..] {
            self.assignment[var.number()] = None;
        }
        self.trail.truncate(checkpoint);
    }
}
