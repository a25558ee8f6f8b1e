//! Branching variable selection.

use satoracle_formula::{CnfFormula, Var};

/// The smallest variable occurring in the formula.
///
/// Returns `None` if no clause has any literal left.
pub fn choose_variable(formula: &CnfFormula) -> Option<Var> {
    formula.iter().flatten().map(|lit| lit.var()).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    use satoracle_formula::{cnf_formula, var, Lit};

    #[test]
    fn smallest_variable_in_any_polarity() {
        let formula = cnf_formula![
            7, -5;
            -3, 9;
        ];
        assert_eq!(choose_variable(&formula), Some(var!(3)));
    }

    #[test]
    fn nothing_to_choose() {
        assert_eq!(choose_variable(&CnfFormula::new()), None);

        let mut only_empty_clause = CnfFormula::new();
        only_empty_clause.add_clause(Vec::<Lit>::new());
        assert_eq!(choose_variable(&only_empty_clause), None);
    }
}
