//! Boolean satisfiability solver.
use std::io;

use anyhow::Error;
use log::info;
use thiserror::Error;

use satoracle_formula::{CnfFormula, Lit, LiteralError};

use crate::config::{SolverConfig, SolverConfigUpdate};
use crate::dimacs::DimacsParser;
use crate::dpll::{search, SearchStats};
use crate::model::Model;

/// Possible errors when adding clauses or checking models.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Invalid literal in clause {:?}: {}", clause, source)]
    InvalidLiteral {
        clause: Vec<isize>,
        source: LiteralError,
    },
    #[error("Model does not satisfy the clause {:?}", clause)]
    ModelCheckFailed { clause: Vec<Lit> },
    #[error("No model available")]
    NoModel,
}

/// Result of a satisfiability query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The formula is satisfiable, the model assigns every variable of the formula.
    Sat(Model),
    Unsat,
}

impl Outcome {
    pub fn is_sat(&self) -> bool {
        match self {
            Outcome::Sat(_) => true,
            Outcome::Unsat => false,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Outcome::Sat(model) => Some(model),
            Outcome::Unsat => None,
        }
    }
}

/// Decide whether a formula is satisfiable using the default configuration.
pub fn decide_satisfiability(formula: &CnfFormula) -> Outcome {
    match search(formula, &SolverConfig::default()).0 {
        Some(model) => Outcome::Sat(model),
        None => Outcome::Unsat,
    }
}

/// A boolean satisfiability solver.
///
/// Stores a formula and the model found by the last query. Every change to the formula or the
/// configuration discards the model.
#[derive(Default)]
pub struct Solver {
    formula: CnfFormula,
    config: SolverConfig,
    model: Option<Model>,
    stats: SearchStats,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Change the solver configuration.
    pub fn config(&mut self, config_update: &SolverConfigUpdate) {
        self.config.apply(config_update);
        self.model = None;
    }

    /// Add a clause to the solver.
    pub fn add_clause(&mut self, clause: &[Lit]) {
        self.formula.add_clause(clause);
        self.model = None;
    }

    /// Add a clause given as DIMACS literals.
    ///
    /// A literal 0 or a literal out of range is rejected and the clause is not added.
    pub fn add_dimacs_clause(&mut self, clause: &[isize]) -> Result<(), SolverError> {
        let lits = clause
            .iter()
            .map(|&number| Lit::try_from_dimacs(number))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SolverError::InvalidLiteral {
                clause: clause.to_vec(),
                source,
            })?;
        self.add_clause(&lits);
        Ok(())
    }

    /// Add a formula to the solver.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        for clause in formula.iter() {
            self.formula.add_clause(clause);
        }
        self.model = None;
    }

    /// Reads and adds a formula in DIMACS CNF format.
    ///
    /// Nothing is added if the input is malformed. The header's variable count only bounds the
    /// variables used, it doesn't add any.
    pub fn add_dimacs_cnf(&mut self, input: impl io::Read) -> Result<(), Error> {
        let formula = DimacsParser::parse(input)?;

        self.add_formula(&formula);

        info!(
            "Parsed formula with {} variables and {} clauses",
            formula.var_count(),
            formula.len()
        );

        Ok(())
    }

    /// Remove all clauses and variables.
    pub fn clear(&mut self) {
        self.formula.clear();
        self.model = None;
        self.stats = SearchStats::default();
    }

    /// Number of variables, the largest variable number in any clause added.
    pub fn var_count(&self) -> usize {
        self.formula.var_count()
    }

    pub fn clause_count(&self) -> usize {
        self.formula.len()
    }

    /// Whether every clause has exactly three literals.
    pub fn is_3cnf(&self) -> bool {
        self.formula.is_3cnf()
    }

    /// The formula added so far.
    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }

    /// Check the satisfiability of the current formula.
    pub fn solve(&mut self) -> bool {
        let (model, stats) = search(&self.formula, &self.config);
        self.model = model;
        self.stats = stats;
        self.model.is_some()
    }

    /// Model found by the last call to [`solve`](Solver::solve).
    ///
    /// Returns `None` when the formula is unsatisfiable, when it wasn't solved yet or when it
    /// changed since.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// A model of the current formula, solving it unless a model is known already.
    pub fn satisfying_assignment(&mut self) -> Option<&Model> {
        if self.model.is_none() {
            self.solve();
        }
        self.model.as_ref()
    }

    /// Verify that the current model satisfies every clause.
    pub fn check_model(&self) -> Result<(), SolverError> {
        let model = self.model.as_ref().ok_or(SolverError::NoModel)?;

        for clause in self.formula.iter() {
            if !clause.iter().any(|&lit| model.lit_is_true(lit)) {
                return Err(SolverError::ModelCheckFailed {
                    clause: clause.to_vec(),
                });
            }
        }

        Ok(())
    }

    /// Statistics of the last search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
