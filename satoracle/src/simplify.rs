//! Simplification under a partial assignment.

use satoracle_formula::CnfFormula;

use crate::assignment::Assignment;

/// Remove satisfied clauses and false literals.
///
/// Returns a new formula, counting variables only up to the largest one left in it. Literals of
/// unassigned variables are kept in their original order. A clause whose literals are all false
/// becomes empty, which signals a conflict to the caller. The assignment is only read.
pub fn simplify(formula: &CnfFormula, assignment: &Assignment) -> CnfFormula {
    let mut simplified = CnfFormula::new();

    let mut new_lits = vec![];

    'clauses: for clause in formula.iter() {
        new_lits.clear();
        for &lit in clause {
            match assignment.lit_value(lit) {
                None => new_lits.push(lit),
                Some(true) => continue 'clauses,
                Some(false) => (),
            }
        }
        simplified.add_clause(&new_lits);
    }

    simplified
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::{collection, prelude::*};

    use satoracle_formula::{cnf::strategy::cnf_formula, cnf_formula, lit, Var};

    #[test]
    fn drops_satisfied_clauses_and_false_lits() {
        let formula = cnf_formula![
            1, 2, 3;
            -1, 2, 4;
            -1, -4;
            3;
        ];

        let mut assignment = Assignment::new(4);
        assignment.assign_lit(lit!(1));
        assignment.assign_lit(lit!(-3));

        let expected = cnf_formula![
            2, 4;
            -4;
            ;
        ];

        assert_eq!(simplify(&formula, &assignment), expected);
    }

    #[test]
    fn empty_assignment_changes_nothing() {
        let formula = cnf_formula![
            1, -2;
            ;
            2;
        ];
        assert_eq!(simplify(&formula, &Assignment::new(2)), formula);
    }

    proptest! {
        #[test]
        fn idempotent(
            formula in cnf_formula(1..20usize, 0..60, 0..6),
            values in collection::vec(proptest::option::of(any::<bool>()), 20)
        ) {
            let mut assignment = Assignment::new(formula.var_count());
            for (offset, value) in values.iter().take(formula.var_count()).enumerate() {
                if let Some(polarity) = *value {
                    assignment.assign_lit(Var::from_number(offset + 1).lit(polarity));
                }
            }

            let once = simplify(&formula, &assignment);
            let twice = simplify(&once, &assignment);

            for clause in once.iter() {
                prop_assert!(clause.iter().all(|&lit| assignment.lit_value(lit).is_none()));
            }
            prop_assert_eq!(once, twice);
        }
    }
}
