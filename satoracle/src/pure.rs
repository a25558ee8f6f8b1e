//! Pure literal elimination.

use satoracle_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::simplify::simplify;

const POSITIVE: u8 = 1;
const NEGATIVE: u8 = 2;

/// Assign one pure literal and simplify.
///
/// A variable occurring only positively is set to true, one occurring only negatively is set to
/// false; this satisfies every clause containing it and falsifies none. Returns `false` and leaves
/// everything unchanged when there is no pure literal.
pub fn eliminate_pure_literal(formula: &mut CnfFormula, assignment: &mut Assignment) -> bool {
    match find_pure_literal(formula) {
        Some(lit) => {
            assignment.assign_lit(lit);
            *formula = simplify(formula, assignment);
            true
        }
        None => false,
    }
}

/// The positive pure literal of the smallest variable, or failing that the negative pure literal
/// of the smallest variable.
fn find_pure_literal(formula: &CnfFormula) -> Option<Lit> {
    let mut occurrences = vec![0u8; formula.var_count() + 1];

    for clause in formula.iter() {
        for &lit in clause {
            occurrences[lit.var().number()] |= if lit.is_positive() {
                POSITIVE
            } else {
                NEGATIVE
            };
        }
    }

    let only = |polarity: u8| {
        occurrences
            .iter()
            .position(|&found| found == polarity)
            .map(Var::from_number)
    };

    if let Some(var) = only(POSITIVE) {
        Some(var.positive())
    } else {
        only(NEGATIVE).map(Var::negative)
    }
}
