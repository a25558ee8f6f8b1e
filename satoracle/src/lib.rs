//! Satoracle is a [DPLL][dpll] based SAT solver written in rust. Given a boolean formula in
//! [conjunctive normal form][cnf], it decides whether some variable assignment makes the formula
//! true and, if so, produces such an assignment.
//!
//! The search combines unit propagation, pure literal elimination and chronological two-way
//! branching. There is no clause learning, so runtime is exponential in the worst case.
//!
//! ```
//! use satoracle::solver::Solver;
//!
//! let mut solver = Solver::new();
//! solver.add_dimacs_clause(&[1, -2]).unwrap();
//! solver.add_dimacs_clause(&[-1]).unwrap();
//!
//! assert!(solver.solve());
//! let model = solver.model().unwrap();
//! assert_eq!(model.lits().map(|lit| lit.to_dimacs()).collect::<Vec<_>>(), vec![-1, -2]);
//! ```
//!
//! [dpll]: https://en.wikipedia.org/wiki/DPLL_algorithm
//! [cnf]: https://en.wikipedia.org/wiki/Conjunctive_normal_form

pub mod config;
pub mod equisat;
pub mod model;
pub mod solver;

mod assignment;
mod decision;
mod dpll;
mod prop;
mod pure;
mod simplify;


pub use dpll::SearchStats;
pub use equisat::equisatisfiable;
pub use model::Model;
pub use solver::{decide_satisfiability, Outcome, Solver, SolverError};
pub use satoracle_formula::{cnf, lit, random, CnfFormula, Lit, Var};

pub mod dimacs {
    //! DIMACS CNF parser and writer.
    pub use satoracle_dimacs::*;
}
