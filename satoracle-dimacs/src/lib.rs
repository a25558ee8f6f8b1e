//! DIMACS CNF parser and writer for the satoracle DPLL solver.

use std::{borrow::Borrow, cmp::max, io, mem::replace};

use satoracle_formula::{CnfFormula, Lit, LiteralError, Var};

use anyhow::Error;
use thiserror::Error;

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {}: Unexpected input in DIMACS CNF: '{}'", line, token)]
    UnexpectedInput { line: usize, token: String },
    #[error("line {}: Literal is too large: {}", line, literal)]
    LiteralTooLarge { line: usize, literal: String },
    #[error("line {}: Invalid header syntax: {}", line, header)]
    InvalidHeader { line: usize, header: String },
    #[error("line {}: Header already given", line)]
    DuplicateHeader { line: usize },
    #[error("line {}: Unterminated clause", line)]
    UnterminatedClause { line: usize },
    #[error(
        "Formula has {} variables while the header specifies {} variables",
        var_count,
        header_var_count
    )]
    VarCount {
        var_count: usize,
        header_var_count: usize,
    },
    #[error(
        "Formula has {} clauses while the header specifies {} clauses",
        clause_count,
        header_clause_count
    )]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
}

/// Variable and clause count present in a DIMACS CNF header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Line based parser for DIMACS CNF input.
///
/// Lines starting with `c` are comments. A single `p cnf <vars> <clauses>` header is allowed.
/// Clauses are whitespace separated literals terminated by `0` and may span multiple lines. A line
/// starting with `%` ends the formula, everything after it is ignored (as found at the end of the
/// SATLIB benchmark files).
#[derive(Default)]
pub struct DimacsParser {
    formula: CnfFormula,
    partial_clause: Vec<Lit>,
    header: Option<DimacsHeader>,
    line_number: usize,
    var_count: usize,
    clause_count: usize,
    finished: bool,
}

impl DimacsParser {
    /// Create a new DIMACS CNF parser.
    pub fn new() -> DimacsParser {
        DimacsParser::default()
    }

    /// Parse the given input and check the header if present.
    pub fn parse(input: impl io::Read) -> Result<CnfFormula, Error> {
        use io::BufRead;

        let mut parser = Self::new();

        for line in io::BufReader::new(input).lines() {
            parser.parse_line(&line?)?;
        }
        parser.eof()?;
        parser.check_header()?;

        Ok(parser.take_formula())
    }

    /// Parse a single line of input, without the line terminator.
    pub fn parse_line(&mut self, line: &str) -> Result<(), ParserError> {
        self.line_number += 1;

        if self.finished {
            return Ok(());
        }

        let line = line.trim();

        if line.starts_with('c') {
            return Ok(());
        } else if line.starts_with('%') {
            self.finished = true;
            return Ok(());
        } else if line.starts_with('p') {
            return self.parse_header_line(line);
        }

        for token in line.split_whitespace() {
            let number = self.parse_literal(token)?;
            match Lit::try_from_dimacs(number) {
                Ok(lit) => {
                    self.var_count = max(self.var_count, lit.var().number());
                    self.partial_clause.push(lit);
                }
                Err(LiteralError::Zero) => {
                    self.formula.add_clause(&self.partial_clause);
                    self.partial_clause.clear();
                    self.clause_count += 1;
                }
                Err(LiteralError::TooLarge { .. }) => {
                    return Err(ParserError::LiteralTooLarge {
                        line: self.line_number,
                        literal: token.to_owned(),
                    })
                }
            }
        }

        Ok(())
    }

    /// Finish parsing the input.
    ///
    /// This does not check whether the header information was correct, call
    /// [`check_header`](DimacsParser::check_header) for this.
    pub fn eof(&mut self) -> Result<(), ParserError> {
        if !self.partial_clause.is_empty() {
            return Err(ParserError::UnterminatedClause {
                line: self.line_number,
            });
        }
        Ok(())
    }

    /// Verifies the header information when present.
    ///
    /// The header's variable count is an upper bound, the clause count must match exactly. Does
    /// nothing when the input doesn't contain a header.
    pub fn check_header(&self) -> Result<(), ParserError> {
        if let Some(header) = self.header {
            let var_count = self.var_count;
            if var_count > header.var_count {
                return Err(ParserError::VarCount {
                    var_count,
                    header_var_count: header.var_count,
                });
            }

            if self.clause_count != header.clause_count {
                return Err(ParserError::ClauseCount {
                    clause_count: self.clause_count,
                    header_clause_count: header.clause_count,
                });
            }
        }

        Ok(())
    }

    /// Returns the clauses parsed since the last call to this method.
    ///
    /// The variable count of the returned formula only covers the returned clauses.
    pub fn take_formula(&mut self) -> CnfFormula {
        replace(&mut self.formula, CnfFormula::new())
    }

    /// Return the DIMACS CNF header data if present.
    pub fn header(&self) -> Option<DimacsHeader> {
        self.header
    }

    /// Number of clauses parsed.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Largest variable occurring in any clause parsed so far.
    ///
    /// Unlike the variable count of a taken formula this includes earlier calls to
    /// [`take_formula`](DimacsParser::take_formula). A header does not change it.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    fn parse_literal(&self, token: &str) -> Result<isize, ParserError> {
        let digits = token.strip_prefix('-').unwrap_or(token);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ParserError::UnexpectedInput {
                line: self.line_number,
                token: token.to_owned(),
            });
        }
        token
            .parse()
            .map_err(|_| ParserError::LiteralTooLarge {
                line: self.line_number,
                literal: token.to_owned(),
            })
    }

    fn parse_header_line(&mut self, line: &str) -> Result<(), ParserError> {
        if self.header.is_some() {
            return Err(ParserError::DuplicateHeader {
                line: self.line_number,
            });
        }

        let mut header_values = line.split_whitespace();

        let counts = match (
            header_values.next(),
            header_values.next(),
            header_values.next().and_then(|value| value.parse::<usize>().ok()),
            header_values.next().and_then(|value| value.parse::<usize>().ok()),
            header_values.next(),
        ) {
            (Some("p"), Some("cnf"), Some(var_count), Some(clause_count), None) => {
                Some((var_count, clause_count))
            }
            _ => None,
        };

        let (var_count, clause_count) = match counts {
            Some(counts) => counts,
            None => {
                return Err(ParserError::InvalidHeader {
                    line: self.line_number,
                    header: line.to_owned(),
                })
            }
        };

        if var_count > Var::max_count() {
            return Err(ParserError::LiteralTooLarge {
                line: self.line_number,
                literal: var_count.to_string(),
            });
        }

        self.header = Some(DimacsHeader {
            var_count,
            clause_count,
        });

        Ok(())
    }
}

/// Write a DIMACS CNF header.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    writeln!(
        target,
        "p cnf {var_count} {clause_count}",
        var_count = header.var_count,
        clause_count = header.clause_count
    )
}

/// Write clauses as headerless DIMACS CNF, one clause per line.
pub fn write_dimacs_clauses(
    target: &mut impl io::Write,
    clauses: impl IntoIterator<Item = impl IntoIterator<Item = impl Borrow<Lit>>>,
) -> io::Result<()> {
    for clause in clauses.into_iter() {
        for lit in clause.into_iter() {
            itoa::write(&mut *target, lit.borrow().to_dimacs())?;
            target.write_all(b" ")?;
        }
        target.write_all(b"0\n")?;
    }
    Ok(())
}

/// Write a formula as DIMACS CNF.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    write_dimacs_header(
        &mut *target,
        DimacsHeader {
            var_count: formula.var_count(),
            clause_count: formula.len(),
        },
    )?;
    write_dimacs_clauses(&mut *target, formula.iter())
}
