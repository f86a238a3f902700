//! Catalyst expressions in disjunctive normal form.
//!
//! A catalyst expression uses `,` for OR, `&` for AND and parentheses for
//! grouping, e.g. `(A,B)&(C,D)`. `&` binds tighter than `,`. The
//! normalized form is a sorted set of conjunction terms, each a sorted,
//! deduplicated, `&`-joined list of molecule names:
//!
//! ```rust
//! use raf_model::normalize_catalysts;
//!
//! let dnf = normalize_catalysts("(A,B)&(C,D)").unwrap();
//! let terms: Vec<&str> = dnf.iter().map(|s| s.as_str()).collect();
//! assert_eq!(terms, vec!["A&C", "A&D", "B&C", "B&D"]);
//! ```

use std::fmt;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::MoleculeType;
use crate::CONJUNCTION_SEPARATOR;

const OR: char = ',';
const AND: char = CONJUNCTION_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalystError {
    UnmatchedOpen(usize),       // '(' at this position was never closed
    UnmatchedClose(usize),      // ')' at this position has no matching '('
    EmptyOperand(usize),        // an operator or group without operand
    InvalidToken(char, usize),  // unexpected character and position
}

impl fmt::Display for CatalystError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalystError::UnmatchedOpen(i) => {
                write!(f, "Unmatched '(' at position {}", i)
            }
            CatalystError::UnmatchedClose(i) => {
                write!(f, "Unmatched ')' at position {}", i)
            }
            CatalystError::EmptyOperand(i) => {
                write!(f, "Missing operand at position {}", i)
            }
            CatalystError::InvalidToken(c, i) => {
                write!(f, "Invalid '{}' in catalyst expression at position {}", c, i)
            }
        }
    }
}

impl std::error::Error for CatalystError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Or,
    And,
    Name(String),
}

fn tokenize(expr: &str) -> Result<Vec<(Token, usize)>, CatalystError> {
    let mut tokens = Vec::new();
    let mut depth: Vec<usize> = Vec::new();
    let mut name = String::new();
    let mut name_start = 0;

    for (i, c) in expr.chars().enumerate() {
        let is_name_char = !(c.is_whitespace() || c == '(' || c == ')' || c == OR || c == AND);
        if is_name_char {
            if name.is_empty() {
                name_start = i;
            }
            name.push(c);
            continue;
        }
        if !name.is_empty() {
            tokens.push((Token::Name(std::mem::take(&mut name)), name_start));
        }
        match c {
            '(' => {
                depth.push(i);
                tokens.push((Token::Open, i));
            }
            ')' => {
                if depth.pop().is_none() {
                    return Err(CatalystError::UnmatchedClose(i));
                }
                tokens.push((Token::Close, i));
            }
            OR => tokens.push((Token::Or, i)),
            AND => tokens.push((Token::And, i)),
            _ => {} // whitespace
        }
    }
    if !name.is_empty() {
        tokens.push((Token::Name(name), name_start));
    }
    if let Some(&open) = depth.first() {
        return Err(CatalystError::UnmatchedOpen(open));
    }
    Ok(tokens)
}

type Terms = BTreeSet<BTreeSet<String>>;

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|&(_, i)| i).unwrap_or(self.end)
    }

    /// expr := conj (',' conj)*
    fn disjunction(&mut self) -> Result<Terms, CatalystError> {
        let mut terms = self.conjunction()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            terms.extend(self.conjunction()?);
        }
        Ok(terms)
    }

    /// conj := atom ('&' atom)*
    fn conjunction(&mut self) -> Result<Terms, CatalystError> {
        let mut terms = self.atom()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.atom()?;
            terms = cross(&terms, &right);
        }
        Ok(terms)
    }

    /// atom := name | '(' expr ')'
    fn atom(&mut self) -> Result<Terms, CatalystError> {
        let at = self.position();
        match self.tokens.get(self.pos).cloned() {
            Some((Token::Name(name), _)) => {
                self.pos += 1;
                Ok(BTreeSet::from([BTreeSet::from([name])]))
            }
            Some((Token::Open, _)) => {
                self.pos += 1;
                let inner = self.disjunction()?;
                match self.peek() {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    // tokenize() guarantees balance, so anything else here
                    // is an operand in the wrong place.
                    _ => Err(self.unexpected()),
                }
            }
            _ => Err(CatalystError::EmptyOperand(at)),
        }
    }

    fn unexpected(&self) -> CatalystError {
        match self.tokens.get(self.pos) {
            Some((Token::Name(name), i)) => {
                CatalystError::InvalidToken(name.chars().next().unwrap_or(' '), *i)
            }
            Some((Token::Open, i)) => CatalystError::InvalidToken('(', *i),
            Some((_, i)) => CatalystError::EmptyOperand(*i),
            None => CatalystError::EmptyOperand(self.end),
        }
    }
}

/// AND of two DNFs: every left term joined with every right term.
/// Identical elements collapse, so `A&A` is just `A`.
fn cross(left: &Terms, right: &Terms) -> Terms {
    let mut result = Terms::new();
    for l in left {
        for r in right {
            result.insert(l.union(r).cloned().collect());
        }
    }
    result
}

/// Parses a catalyst expression into its canonical DNF terms.
///
/// An empty (or all-whitespace) expression yields the empty set, which
/// denotes a spontaneous reaction.
pub fn normalize_catalysts(expr: &str) -> Result<BTreeSet<String>, CatalystError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Ok(BTreeSet::new());
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: expr.chars().count(),
    };
    let terms = parser.disjunction()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.unexpected());
    }
    Ok(terms
        .into_iter()
        .map(|t| t.into_iter().collect::<Vec<_>>().join(&AND.to_string()))
        .collect())
}

/// One AND-term of a catalyst expression.
///
/// The `molecule` is the synthetic conjunction molecule (`A&B`), or the
/// single catalyst itself for a one-element term. `elements` holds the
/// individual molecules in canonical order.
#[derive(Debug, Clone)]
pub struct Conjunction {
    molecule: MoleculeType,
    elements: Vec<MoleculeType>,
}

impl Conjunction {
    pub fn new(term: &str) -> Self {
        let molecule = MoleculeType::new(term);
        let mut elements = molecule.conjunction_parts();
        elements.sort();
        elements.dedup();
        Self { molecule, elements }
    }

    pub fn molecule(&self) -> &MoleculeType {
        &self.molecule
    }

    pub fn elements(&self) -> &[MoleculeType] {
        &self.elements
    }

    /// All elements are present in `molecules`.
    pub fn is_satisfied_by(&self, molecules: &BTreeSet<MoleculeType>) -> bool {
        self.elements.iter().all(|m| molecules.contains(m))
    }
}

impl PartialEq for Conjunction {
    fn eq(&self, other: &Self) -> bool {
        self.molecule == other.molecule
    }
}

impl Eq for Conjunction {}

impl PartialOrd for Conjunction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Conjunction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.molecule.cmp(&other.molecule)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.molecule)
    }
}

/// Normalizes `expr` and interns each term as a [`Conjunction`].
pub fn parse_catalysts(expr: &str) -> Result<BTreeSet<Conjunction>, CatalystError> {
    Ok(normalize_catalysts(expr)?
        .iter()
        .map(|t| Conjunction::new(t))
        .collect())
}
