//! Comparing satisfiability of two formulas.
use satoracle_formula::CnfFormula;

use crate::solver::decide_satisfiability;

/// Whether both formulas are satisfiable or both are unsatisfiable.
///
/// Each formula is solved on its own and only the two outcomes are compared. This is much weaker
/// than logical equivalence: any two satisfiable formulas are equisatisfiable, even when they have
/// no model in common or are over different variables.
pub fn equisatisfiable(a: &CnfFormula, b: &CnfFormula) -> bool {
    decide_satisfiability(a).is_sat() == decide_satisfiability(b).is_sat()
}
