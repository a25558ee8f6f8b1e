//! Recursive DPLL search.

use std::cmp::max;

use log::{debug, trace};

use satoracle_formula::CnfFormula;

use crate::assignment::Assignment;
use crate::config::SolverConfig;
use crate::decision::choose_variable;
use crate::model::Model;
use crate::prop::unit_propagate;
use crate::pure::eliminate_pure_literal;
use crate::simplify::simplify;

/// Counters collected during a single search.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct SearchStats {
    /// Branching variables chosen.
    pub decisions: u64,
    /// Literals assigned by unit propagation.
    pub propagations: u64,
    /// Literals assigned by pure literal elimination.
    pub pure_literals: u64,
    /// Branches refuted by an empty clause.
    pub conflicts: u64,
    /// Deepest nesting of decisions.
    pub max_depth: usize,
}

/// Search for a model of `formula`.
///
/// Each branch works on its own simplified copy of the formula. The assignment is shared and
/// assignments made below a refuted branch are undone before the other polarity is tried.
pub fn search(formula: &CnfFormula, config: &SolverConfig) -> (Option<Model>, SearchStats) {
    let mut search = Search {
        config,
        assignment: Assignment::new(formula.var_count()),
        stats: SearchStats::default(),
    };

    let sat = search.dpll(formula.clone(), 0);

    debug!(
        "search finished: {}, {} decisions, {} propagations, {} pure literals, {} conflicts, depth {}",
        if sat { "sat" } else { "unsat" },
        search.stats.decisions,
        search.stats.propagations,
        search.stats.pure_literals,
        search.stats.conflicts,
        search.stats.max_depth,
    );

    let model = if sat {
        Some(Model::from_partial(search.assignment.assignment()))
    } else {
        None
    };

    (model, search.stats)
}

struct Search<'a> {
    config: &'a SolverConfig,
    assignment: Assignment,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Returns whether the formula is satisfiable under the current assignment.
    ///
    /// On success the assignment contains the values of the satisfying branch.
    fn dpll(&mut self, mut formula: CnfFormula, depth: usize) -> bool {
        self.stats.max_depth = max(self.stats.max_depth, depth);

        if formula.is_empty() {
            return true;
        }

        if formula.has_empty_clause() {
            self.stats.conflicts += 1;
            return false;
        }

        let before_propagation = self.assignment.checkpoint();
        let propagated = unit_propagate(&mut formula, &mut self.assignment);
        self.stats.propagations += (self.assignment.checkpoint() - before_propagation) as u64;

        if propagated.is_err() {
            self.stats.conflicts += 1;
            return false;
        }

        if self.config.pure_literal_elimination {
            while eliminate_pure_literal(&mut formula, &mut self.assignment) {
                self.stats.pure_literals += 1;
            }
        }

        if formula.is_empty() {
            return true;
        }

        let var = match choose_variable(&formula) {
            Some(var) => var,
            None => return true,
        };

        self.stats.decisions += 1;

        let checkpoint = self.assignment.checkpoint();

        for &polarity in [self.config.branch_polarity, !self.config.branch_polarity].iter() {
            let decision = var.lit(polarity);
            trace!("depth {}: deciding {}", depth, decision);

            self.assignment.assign_lit(decision);
            let branch = simplify(&formula, &self.assignment);

            if self.dpll(branch, depth + 1) {
                return true;
            }

            self.assignment.backtrack(checkpoint);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use satoracle_formula::{cnf::strategy::cnf_formula, cnf_formula, lit, var};

    use crate::test::{brute_force_sat, pigeon_hole_formula, planted_formula};

    fn default_search(formula: &CnfFormula) -> (Option<Model>, SearchStats) {
        search(formula, &SolverConfig::default())
    }

    #[test]
    fn empty_formula() {
        let (model, stats) = default_search(&CnfFormula::new());
        assert!(model.is_some());
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn empty_clause() {
        let formula = cnf_formula![
            1, 2;
            ;
        ];
        assert!(default_search(&formula).0.is_none());
    }

    #[test]
    fn unit_clauses() {
        let formula = cnf_formula![
            1;
            -2;
        ];
        let model = default_search(&formula).0.unwrap();
        assert!(model.value(var!(1)));
        assert!(!model.value(var!(2)));
    }

    #[test]
    fn opposite_units() {
        let formula = cnf_formula![
            1;
            -1;
        ];
        let (model, stats) = default_search(&formula);
        assert!(model.is_none());
        assert_eq!(stats.conflicts, 1);
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn pure_literal() {
        let formula = cnf_formula![
            1, 2;
            1, 3;
        ];
        let (model, stats) = default_search(&formula);
        assert!(model.unwrap().value(var!(1)));
        assert_eq!(stats.pure_literals, 1);
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn all_polarity_combinations() {
        let formula = cnf_formula![
            1, 2;
            -1, 2;
            1, -2;
            -1, -2;
        ];
        let (model, stats) = default_search(&formula);
        assert!(model.is_none());
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.conflicts, 2);
    }

    #[test]
    fn refuted_branch_is_undone() {
        // Deciding 1 propagates 3 and 2, which conflicts. Under -1 the clause [1, -3] needs 3 to
        // be unassigned again.
        let formula = cnf_formula![
            -1, 3;
            -1, -3, 2;
            -1, -3, -2;
            1, -3;
        ];
        let (model, stats) = default_search(&formula);
        let model = model.unwrap();

        assert!(!model.value(var!(1)));
        assert!(!model.value(var!(3)));
        assert!(model.satisfies(&formula));
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.conflicts, 1);
    }

    #[test]
    fn branch_polarity_config() {
        let formula = cnf_formula![
            1, 2;
            -1, -2;
        ];
        let config = SolverConfig {
            pure_literal_elimination: false,
            branch_polarity: false,
        };
        let model = search(&formula, &config).0.unwrap();
        assert!(!model.value(var!(1)));
        assert!(model.value(var!(2)));

        let model = default_search(&formula).0.unwrap();
        assert!(model.lit_is_true(lit!(1)));
        assert!(model.lit_is_true(lit!(-2)));
    }

    proptest! {
        #[test]
        fn agrees_with_brute_force(formula in cnf_formula(1..9usize, 0..40, 0..5)) {
            let expected = brute_force_sat(&formula);

            for &pure_literal_elimination in [true, false].iter() {
                for &branch_polarity in [true, false].iter() {
                    let config = SolverConfig { pure_literal_elimination, branch_polarity };
                    let (model, _) = search(&formula, &config);

                    prop_assert_eq!(model.is_some(), expected);
                    if let Some(model) = model {
                        prop_assert!(model.satisfies(&formula));
                    }
                }
            }
        }

        #[test]
        fn pigeon_hole_unsat(formula in pigeon_hole_formula(1..4usize)) {
            prop_assert!(default_search(&formula).0.is_none());
        }

        #[test]
        fn planted_sat(formula in planted_formula(4..20usize, 10..100usize, 2..5usize)) {
            let model = default_search(&formula).0;
            prop_assert!(model.is_some());
            prop_assert!(model.unwrap().satisfies(&formula));
        }
    }
}
