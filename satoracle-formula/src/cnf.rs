//! CNF formulas.
use std::cmp::max;
use std::fmt;
use std::iter::Extend;
use std::ops::Range;

use crate::lit::Lit;

/// A formula in conjunctive normal form (CNF).
///
/// Clauses are kept in insertion order in a single literal buffer, each clause being a range of
/// that buffer.
#[derive(Default, Clone, Eq)]
pub struct CnfFormula {
    var_count: usize,
    literals: Vec<Lit>,
    clause_ranges: Vec<Range<usize>>,
}

impl CnfFormula {
    /// Create an empty CNF formula.
    pub fn new() -> CnfFormula {
        CnfFormula::default()
    }

    /// Number of variables in the formula.
    ///
    /// This is the largest variable number occurring in any clause added since the formula was
    /// created or cleared. Variables that never occur but have a smaller number than one that does
    /// are counted too. A vector of length `var_count() + 1` can be indexed with
    /// [`Var::number`](crate::lit::Var::number).
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Number of clauses in the formula.
    pub fn len(&self) -> usize {
        self.clause_ranges.len()
    }

    /// Whether the formula has no clauses, i.e. is vacuously true.
    pub fn is_empty(&self) -> bool {
        self.clause_ranges.is_empty()
    }

    /// Appends a clause to the formula.
    ///
    /// `literals` can be an `IntoIterator<Item = Lit>` or `IntoIterator<Item = &Lit>`.
    pub fn add_clause<L>(&mut self, literals: impl IntoIterator<Item = L>)
    where
        Vec<Lit>: Extend<L>,
    {
        let begin = self.literals.len();
        self.literals.extend(literals);
        let end = self.literals.len();

        for &lit in self.literals[begin..end].iter() {
            self.var_count = max(lit.var().number(), self.var_count);
        }

        self.clause_ranges.push(begin..end);
    }

    /// Removes all clauses and resets the variable count.
    pub fn clear(&mut self) {
        self.var_count = 0;
        self.literals.clear();
        self.clause_ranges.clear();
    }

    /// Iterator over all clauses.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        let literals = &self.literals;
        self.clause_ranges
            .iter()
            .map(move |range| &literals[range.clone()])
    }

    /// Whether the formula contains an empty clause and thus is unsatisfiable.
    pub fn has_empty_clause(&self) -> bool {
        self.clause_ranges.iter().any(|range| range.is_empty())
    }

    /// Whether every clause has exactly three literals.
    ///
    /// Vacuously true for the empty formula.
    pub fn is_3cnf(&self) -> bool {
        self.clause_ranges.iter().all(|range| range.len() == 3)
    }
}

/// Convert any iterable of [`Lit`] iterables into a CnfFormula
impl<F, I, L> From<F> for CnfFormula
where
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = L>,
    Vec<Lit>: Extend<L>,
{
    fn from(formula: F) -> CnfFormula {
        let mut cnf_formula = CnfFormula::new();
        for clause in formula {
            cnf_formula.add_clause(clause);
        }
        cnf_formula
    }
}

impl fmt::Debug for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.var_count(), f)?;
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the formula as `(x1 OR NOT x2) AND (x3)`.
///
/// An empty clause is rendered as `()` and the empty formula as the empty string.
impl fmt::Display for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (clause_index, clause) in self.iter().enumerate() {
            if clause_index > 0 {
                f.write_str(" AND ")?;
            }
            f.write_str("(")?;
            for (lit_index, lit) in clause.iter().enumerate() {
                if lit_index > 0 {
                    f.write_str(" OR ")?;
                }
                if lit.is_negative() {
                    f.write_str("NOT ")?;
                }
                write!(f, "x{}", lit.var())?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl PartialEq for CnfFormula {
    fn eq(&self, other: &CnfFormula) -> bool {
        self.var_count() == other.var_count()
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    use crate::lit::strategy::lit;

    /// Formulas as nested vectors over variables `1..=vars`.
    pub fn vec_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = Vec<Vec<Lit>>> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        // Not using ind_flat_map makes shrinking too expensive
        vars.prop_ind_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(1..=vars), clause_len.clone()),
                clauses.clone(),
            )
        })
    }

    /// Formulas over variables `1..=vars`.
    pub fn cnf_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = CnfFormula> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        vars.prop_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(1..=vars), clause_len.clone()),
                clauses.clone(),
            )
            .prop_map(CnfFormula::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{strategy::*, *};

    use proptest::*;

    #[test]
    fn clauses_keep_order_and_var_count() {
        let input = cnf![
            1, 2, 3;
            -1, -2;
            7, 2;
            ;
            4, 5;
        ];

        let formula = CnfFormula::from(input.iter().cloned());

        for (clause, &ref_clause) in formula.iter().zip(input.iter()) {
            assert_eq!(clause, ref_clause);
        }

        assert_eq!(formula.len(), 5);
        assert_eq!(formula.var_count(), 7);
        assert!(formula.has_empty_clause());
        assert!(!formula.is_3cnf());
    }

    #[test]
    fn clear_resets_everything() {
        let mut formula = cnf_formula![
            1, -9, 3;
        ];
        formula.clear();

        assert!(formula.is_empty());
        assert_eq!(formula.var_count(), 0);
        assert_eq!(formula, CnfFormula::new());
    }

    #[test]
    fn var_count_only_grows_with_clauses() {
        let mut formula = cnf_formula![
            1, 5;
        ];
        formula.add_clause(&[Lit::try_from_dimacs(-3).unwrap()]);
        assert_eq!(formula.var_count(), 5);
        formula.add_clause(Vec::<Lit>::new());
        assert_eq!(formula.var_count(), 5);
        formula.add_clause(&[Lit::try_from_dimacs(8).unwrap()]);
        assert_eq!(formula.var_count(), 8);
    }

    #[test]
    fn three_cnf_check() {
        assert!(CnfFormula::new().is_3cnf());
        assert!(cnf_formula![
            1, 2, 3;
            -1, 2, -3;
        ]
        .is_3cnf());
        assert!(!cnf_formula![
            1, 2, 3;
            -1, 2;
        ]
        .is_3cnf());
    }

    #[test]
    fn display() {
        let formula = cnf_formula![
            1, -2;
            3;
        ];
        assert_eq!(formula.to_string(), "(x1 OR NOT x2) AND (x3)");

        let with_empty = cnf_formula![
            -4;
            ;
        ];
        assert_eq!(with_empty.to_string(), "(NOT x4) AND ()");

        assert_eq!(CnfFormula::new().to_string(), "");
    }

    proptest! {
        #[test]
        fn var_count_is_max_magnitude(input in vec_formula(1..200usize, 0..300, 0..10)) {
            let formula = CnfFormula::from(input.iter().map(|clause| clause.iter().cloned()));

            for (clause, ref_clause) in formula.iter().zip(input.iter()) {
                prop_assert_eq!(clause, &ref_clause[..]);
            }

            let var_count = input
                .iter()
                .flat_map(|clause| clause.iter().map(|lit| lit.var().number()))
                .max()
                .unwrap_or(0);

            prop_assert_eq!(formula.var_count(), var_count);
        }

        #[test]
        fn clone_is_equal(input in cnf_formula(1..100usize, 0..300, 0..10)) {
            let copy = input.clone();
            prop_assert_eq!(copy.var_count(), input.var_count());
            prop_assert_eq!(copy, input);
        }
    }
}
