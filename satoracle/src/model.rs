//! Satisfying assignments.
use satoracle_formula::{CnfFormula, Lit, Var};

/// A full assignment of the variables `1..=var_count`.
///
/// Variables left unassigned by the search are false.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Model {
    /// Indexed by [`Var::number`], slot 0 is unused and always false.
    values: Vec<bool>,
}

impl Model {
    pub(crate) fn from_partial(assignment: &[Option<bool>]) -> Model {
        let mut values: Vec<bool> = assignment
            .iter()
            .map(|value| value.unwrap_or(false))
            .collect();
        if values.is_empty() {
            values.push(false);
        }
        values[0] = false;
        Model { values }
    }

    /// Number of variables covered by this model.
    pub fn var_count(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Value of a variable, false for variables beyond [`var_count`](Model::var_count).
    pub fn value(&self, var: Var) -> bool {
        self.values.get(var.number()).cloned().unwrap_or(false)
    }

    pub fn lit_is_true(&self, lit: Lit) -> bool {
        self.value(lit.var()) == lit.is_positive()
    }

    /// Values of the variables `1..=var_count` in order.
    pub fn values(&self) -> &[bool] {
        &self.values[1..]
    }

    /// The true literal of each variable, ordered by variable.
    pub fn lits<'a>(&'a self) -> impl Iterator<Item = Lit> + 'a {
        self.values()
            .iter()
            .enumerate()
            .map(|(offset, &value)| Var::from_number(offset + 1).lit(value))
    }

    /// Whether every clause of the formula contains a true literal.
    pub fn satisfies(&self, formula: &CnfFormula) -> bool {
        formula
            .iter()
            .all(|clause| clause.iter().any(|&lit| self.lit_is_true(lit)))
    }
}
