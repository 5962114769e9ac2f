/*! Provides a checker that decides whether formulae and terms of QEDEQ modules are well-formed
expressions of first-order logic with class terms, predicate and function variables and
declared predicate and function constants.

The crate consumes formulae as [element trees], checks them against the operator catalogue,
computes the scope of subject variables and consults an [existence oracle] for declared
constants. A [text notation] for element trees and module files makes the checker usable
without the XML reader of the surrounding toolchain.

[element trees]: crate::element::Element
[existence oracle]: crate::oracle::Oracle
[text notation]: crate::parser
*/
#[macro_use]
extern crate lalrpop_util;
#[macro_use]
extern crate tracing;

pub mod check;
pub mod element;
pub mod location;
pub mod module;
pub mod operator;
pub mod oracle;
pub mod parser;
#[cfg(test)]
mod test_prelude;
pub mod trace;
