//! Implements a parser for element trees and module files in a compact text notation.
//!
//! The module provides the parser by implementing [`FromStr`] for [`Element`] and [`Module`].
//! An atom is written as a quoted string and a list as its operator followed by its children
//! in parentheses:
//!
//! **Example**:
//! ```rust
//! use qedeq_logic::element::Element;
//!
//! let formula: Element = r#"FORALL(VAR("x"), PREDVAR("\\phi", VAR("x")))"#.parse().unwrap();
//!
//! assert_eq!(2, formula.as_list().unwrap().len());
//! assert_eq!(r#"FORALL(VAR("x"), PREDVAR("\\phi", VAR("x")))"#, formula.to_string());
//! ```
//!
//! A [`Module`] declares constants and lists the formulae and terms to check, each item
//! terminated by `;`:
//! ```rust
//! use qedeq_logic::module::Module;
//!
//! let module: Module = r#"
//!    // equality and class terms are available:
//!    equality equal;
//!    class;
//!    function empty 0;
//!    formula [reflexivity] FORALL(VAR("x"), PREDCON("equal", VAR("x"), VAR("x")));
//!    term CLASS(VAR("x"), NOT(PREDCON("equal", VAR("x"), VAR("x"))));
//! "#.parse().unwrap();
//!
//! assert_eq!(2, module.entries().count());
//! ```
//!
//! [`Element`]: crate::element::Element
//! [`Module`]: crate::module::Module
//! [`FromStr`]: std::str::FromStr
use crate::{
    element::{Atom, Element},
    module::Module,
};
use lalrpop_util::ParseError;
use std::{fmt, str::FromStr};
use thiserror::Error;

lalrpop_mod!(pub grammar); // synthesized by LALRPOP

#[derive(PartialEq, Debug)]
pub enum TokenType {
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Predicate,
    Function,
    Equality,
    Class,
    Formula,
    Term,
    Number,
    Ident,
    String,
    Unknown,
}

impl<S: AsRef<str>> From<S> for TokenType {
    fn from(s: S) -> Self {
        match s.as_ref() {
            "_COMMA_" => Self::Comma,
            "_SEMICOLON_" => Self::Semicolon,
            "_LPAREN_" => Self::LParen,
            "_RPAREN_" => Self::RParen,
            "_LBRACKET_" => Self::LBracket,
            "_RBRACKET_" => Self::RBracket,
            "_PREDICATE_" => Self::Predicate,
            "_FUNCTION_" => Self::Function,
            "_EQUALITY_" => Self::Equality,
            "_CLASS_" => Self::Class,
            "_FORMULA_" => Self::Formula,
            "_TERM_" => Self::Term,
            "_NUMBER_" => Self::Number,
            "_IDENT_" => Self::Ident,
            "_STRING_" => Self::String,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Comma => "`,`",
            Self::Semicolon => "`;`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::LBracket => "`[`",
            Self::RBracket => "`]`",
            Self::Predicate => "`predicate`",
            Self::Function => "`function`",
            Self::Equality => "`equality`",
            Self::Class => "`class`",
            Self::Formula => "`formula`",
            Self::Term => "`term`",
            Self::Number => "`number`",
            Self::Ident => "`identifier`",
            Self::String => "`string`",
            Self::Unknown => "`unknown token`",
        };
        write!(f, "{}", s)
    }
}

/// Is the type of errors returned by the parser.
#[derive(Error, PartialEq, Debug)]
pub enum Error {
    #[error("found `{found}` at {position}; expecting {}",
            Error::pretty_expected_tokens(&*.expected),
    )]
    UnrecognizedToken {
        position: Position,
        expected: Vec<TokenType>,
        found: String,
    },
    #[error("invalid token at {position}")]
    InvalidToken { position: Position },
    #[error("unexpected end of input at {position}; expecting {}",
            Error::pretty_expected_tokens(&*.expected)
    )]
    UnrecognizedEOF {
        position: Position,
        expected: Vec<TokenType>,
    },
    #[error("unexpected token `{found}` at {position}")]
    ExtraToken { position: Position, found: String },
    #[error("invalid escape sequence in string at {position}")]
    InvalidEscape { position: Position },
    #[error("invalid number at {position}")]
    InvalidNumber { position: Position },
    #[error("{}", .source.to_string())]
    Module {
        #[from]
        source: crate::module::Error,
    },
}

impl Error {
    fn pretty_expected_tokens(items: &[TokenType]) -> String {
        let strs = items.iter().map(ToString::to_string).collect::<Vec<_>>();
        match items.len() {
            0 => "".into(),
            1 => strs[0].to_string(),
            2 => format!("{} or {}", strs[0], strs[1]),
            n => format!("{}, or {}", strs[0..n - 1].join(", "), strs[n - 1]),
        }
    }

    /// Returns the position in the source where a syntax error was found.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::UnrecognizedToken { position, .. }
            | Self::InvalidToken { position }
            | Self::UnrecognizedEOF { position, .. }
            | Self::ExtraToken { position, .. }
            | Self::InvalidEscape { position }
            | Self::InvalidNumber { position } => Some(position),
            Self::Module { .. } => None,
        }
    }
}

/// Is a line and column in the parsed source, both starting at 1.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Is the lexical error found by a grammar action at a byte offset of the source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Lexical {
    InvalidEscape(usize),
    InvalidNumber(usize),
}

/// Returns the text of a string literal without its escapes, or `None` if it contains an
/// unknown escape sequence.
pub(crate) fn unescape(literal: &str) -> Option<String> {
    let mut result = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                '\\' => result.push('\\'),
                '"' => result.push('"'),
                'n' => result.push('\n'),
                't' => result.push('\t'),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

const KEYWORDS: [&str; 6] = ["predicate", "function", "equality", "class", "formula", "term"];

/// Returns `name` as it is written in a module file: bare if it is an identifier, quoted
/// otherwise.
pub(crate) fn name(name: &str) -> String {
    let mut chars = name.chars();
    let ident = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ident && !KEYWORDS.contains(&name) {
        name.to_string()
    } else {
        Atom::from(name).to_string()
    }
}

// Stores source information to retrieve token positions in the source.
struct SourceInfo<'s> {
    lines: Vec<usize>,
    source: &'s str,
}

impl<'s> SourceInfo<'s> {
    fn new(source: &'s str) -> Self {
        let lines = source
            .bytes()
            .enumerate()
            .filter(|&(_, ch)| ch == b'\n')
            .map(|(i, _)| i + 1);
        Self {
            lines: std::iter::once(0).chain(lines).collect(),
            source,
        }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.lines.iter().take_while(|&&start| start <= offset).count();
        let start = self.lines[line - 1];
        let column = self.source[start..offset].chars().count() + 1;
        Position { line, column }
    }

    fn convert_error<T: fmt::Display>(&self, error: ParseError<usize, T, Lexical>) -> Error {
        match error {
            ParseError::InvalidToken { location } => Error::InvalidToken {
                position: self.position(location),
            },
            ParseError::UnrecognizedEOF { location, expected } => Error::UnrecognizedEOF {
                position: self.position(location),
                expected: expected.into_iter().map(From::from).collect(),
            },
            ParseError::UnrecognizedToken { token, expected } => Error::UnrecognizedToken {
                position: self.position(token.0),
                expected: expected.into_iter().map(From::from).collect(),
                found: token.1.to_string(),
            },
            ParseError::ExtraToken { token } => Error::ExtraToken {
                position: self.position(token.0),
                found: token.1.to_string(),
            },
            ParseError::User {
                error: Lexical::InvalidEscape(offset),
            } => Error::InvalidEscape {
                position: self.position(offset),
            },
            ParseError::User {
                error: Lexical::InvalidNumber(offset),
            } => Error::InvalidNumber {
                position: self.position(offset),
            },
        }
    }
}

impl FromStr for Element {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let info = SourceInfo::new(s);
        grammar::ElementParser::new()
            .parse(s)
            .map_err(|e| info.convert_error(e))
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let info = SourceInfo::new(s);
        let items = grammar::ModuleParser::new()
            .parse(s)
            .map_err(|e| info.convert_error(e))?;
        Ok(Module::new(items)?)
    }
}
