//! Unit propagation.

use satoracle_formula::{CnfFormula, Lit};

use crate::assignment::Assignment;
use crate::simplify::simplify;

/// The current partial assignment falsifies a clause.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Conflict;

/// Assign unit clauses until none are left.
///
/// Each round assigns the literal of the first unit clause, simplifies the whole formula and scans
/// again from the start, as simplification can create new unit clauses. Returns `Err` if the
/// resulting formula contains an empty clause.
pub fn unit_propagate(
    formula: &mut CnfFormula,
    assignment: &mut Assignment,
) -> Result<(), Conflict> {
    while let Some(lit) = first_unit(formula) {
        assignment.assign_lit(lit);
        *formula = simplify(formula, assignment);
    }

    if formula.has_empty_clause() {
        Err(Conflict)
    } else {
        Ok(())
    }
}

fn first_unit(formula: &CnfFormula) -> Option<Lit> {
    formula.iter().find_map(|clause| match *clause {
        [lit] => Some(lit),
        _ => None,
    })
}
