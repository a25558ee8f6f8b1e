//! Random k-CNF formulas.
//!
//! The generator never uses a global random source. Callers pass the generator, so seeding it
//! makes the produced formulas reproducible.
use rand::seq::index;
use rand::Rng;
use thiserror::Error;

use crate::cnf::CnfFormula;
use crate::lit::Var;

/// Invalid parameters for [`RandomCnf`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum GeneratorError {
    #[error("cannot generate literals without variables")]
    NoVariables,
    #[error("clauses of {clause_len} distinct variables need at least that many variables, got {var_count}")]
    NotEnoughVariables { var_count: usize, clause_len: usize },
    #[error("{var_count} variables exceed the supported maximum")]
    TooManyVariables { var_count: usize },
}

/// Parameters of a random k-CNF formula.
#[derive(Copy, Clone, Debug)]
pub struct RandomCnf {
    /// Variables are drawn from `1..=var_count`.
    pub var_count: usize,
    pub clause_count: usize,
    /// Literals per clause.
    pub clause_len: usize,
    /// Use distinct variables within each clause instead of drawing every literal independently.
    pub distinct_vars: bool,
}

impl RandomCnf {
    /// Independent 3-literal clauses.
    pub fn three_cnf(var_count: usize, clause_count: usize) -> RandomCnf {
        RandomCnf {
            var_count,
            clause_count,
            clause_len: 3,
            distinct_vars: false,
        }
    }

    /// Generate a formula.
    ///
    /// Like every formula, the result counts variables up to the largest one actually drawn, which
    /// can be less than `var_count`.
    pub fn generate(&self, rng: &mut impl Rng) -> Result<CnfFormula, GeneratorError> {
        if self.var_count > Var::max_count() {
            return Err(GeneratorError::TooManyVariables {
                var_count: self.var_count,
            });
        }
        if self.clause_count > 0 && self.clause_len > 0 {
            if self.var_count == 0 {
                return Err(GeneratorError::NoVariables);
            }
            if self.distinct_vars && self.clause_len > self.var_count {
                return Err(GeneratorError::NotEnoughVariables {
                    var_count: self.var_count,
                    clause_len: self.clause_len,
                });
            }
        }

        let mut formula = CnfFormula::new();

        let mut clause = Vec::with_capacity(self.clause_len);

        for _ in 0..self.clause_count {
            clause.clear();
            if self.distinct_vars {
                for offset in index::sample(&mut *rng, self.var_count, self.clause_len).into_iter() {
                    let polarity = rng.gen::<bool>();
                    clause.push(Var::from_number(offset + 1).lit(polarity));
                }
            } else {
                for _ in 0..self.clause_len {
                    let var = Var::from_number(rng.gen_range(1, self.var_count + 1));
                    clause.push(var.lit(rng.gen::<bool>()));
                }
            }
            formula.add_clause(&clause);
        }

        Ok(formula)
    }
}

/// Generate `clause_count` clauses of three independently drawn literals over `1..=var_count`.
pub fn random_3cnf(
    rng: &mut impl Rng,
    var_count: usize,
    clause_count: usize,
) -> Result<CnfFormula, GeneratorError> {
    RandomCnf::three_cnf(var_count, clause_count).generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::lit::Lit;

    #[test]
    fn shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let formula = random_3cnf(&mut rng, 5, 40).unwrap();

        assert_eq!(formula.len(), 40);
        assert!(formula.var_count() <= 5);
        assert!(formula.is_3cnf());
        for clause in formula.iter() {
            for lit in clause {
                assert!((1..=5).contains(&lit.var().number()));
            }
        }
    }

    #[test]
    fn same_seed_same_formula() {
        let params = RandomCnf::three_cnf(20, 80);
        let a = params.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = params.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_vars() {
        let params = RandomCnf {
            var_count: 4,
            clause_count: 100,
            clause_len: 4,
            distinct_vars: true,
        };
        let formula = params.generate(&mut StdRng::seed_from_u64(3)).unwrap();

        for clause in formula.iter() {
            let mut vars: Vec<_> = clause.iter().map(|lit| lit.var()).collect();
            vars.sort();
            vars.dedup();
            assert_eq!(vars.len(), 4);
        }
    }

    #[test]
    fn both_polarities_occur() {
        let formula = random_3cnf(&mut StdRng::seed_from_u64(11), 3, 200).unwrap();
        let lits = formula.iter().flat_map(|clause| clause.iter().cloned());
        let (positive, negative): (Vec<Lit>, Vec<Lit>) =
            lits.partition(|lit| lit.is_positive());
        assert!(!positive.is_empty());
        assert!(!negative.is_empty());
    }

    #[test]
    fn invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            random_3cnf(&mut rng, 0, 1),
            Err(GeneratorError::NoVariables)
        );
        assert_eq!(random_3cnf(&mut rng, 0, 0), Ok(CnfFormula::new()));

        let params = RandomCnf {
            var_count: 2,
            clause_count: 1,
            clause_len: 3,
            distinct_vars: true,
        };
        assert_eq!(
            params.generate(&mut rng),
            Err(GeneratorError::NotEnoughVariables {
                var_count: 2,
                clause_len: 3
            })
        );
    }
}
