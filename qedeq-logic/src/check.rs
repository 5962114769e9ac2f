/*! Implements the checker for formulae and terms given as [element trees].

The checker descends depth-first and from left to right into an element, keeping the lists it
is inside of on an explicit stack. At every list it checks the structure of the element, the
operator and the number of its arguments, descends into the children, asks the [oracle] about
constants, and finally combines the free and bound subject variables of the children. The first violation found is returned as a [`Diagnostic`].

**Example**:
```rust
use qedeq_logic::{check, element::Element, location::Context, oracle::Signature};

// ∀ x. (x = x)
let formula: Element = r#"FORALL(VAR("x"), PREDCON("equal", VAR("x"), VAR("x")))"#
    .parse()
    .unwrap();
let context = Context::new("axiom 1");

// without an oracle, constants are not looked up:
assert!(check::check_formula(&formula, &context, None).is_ok());

// `equal` is not declared by an empty signature:
let signature = Signature::new();
let diagnostic = check::check_formula(&formula, &context, Some(&signature)).unwrap_err();
assert_eq!(30590, diagnostic.code());
assert_eq!("axiom 1[1]", diagnostic.location().to_string());
```

[element trees]: crate::element::Element
[oracle]: crate::oracle::Oracle
[`Diagnostic`]: crate::check::Diagnostic
*/
mod diagnostic;
mod grammar;
mod scope;
mod structure;

pub use diagnostic::{codes, Diagnostic, Error};
pub use scope::{Occurrence, ScopeSummary};

use crate::{
    element::{Element, List},
    location::{Context, Path},
    operator::Operator,
    oracle::Oracle,
    trace,
};
use scope::Binders;
use std::{fmt, mem};
use structure::Shape;

/// Is the default limit on the nesting depth of checked elements.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Distinguishes the two positions an element can be checked in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Formula,
    Term,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Term => write!(f, "term"),
        }
    }
}

/// Configures a [`Checker`].
///
/// [`Checker`]: crate::check::Checker
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CheckerOptions {
    /// Is the deepest nesting of elements that is checked before giving up.
    pub max_depth: usize,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Checks formulae and terms, optionally against an [`Oracle`].
///
/// [`Oracle`]: crate::oracle::Oracle
#[derive(Clone, Default)]
pub struct Checker<'o> {
    oracle: Option<&'o dyn Oracle>,
    options: CheckerOptions,
}

impl<'o> Checker<'o> {
    /// Creates a checker that does not look up constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checker that looks up constants in `oracle`.
    pub fn with_oracle(oracle: &'o dyn Oracle) -> Self {
        Self {
            oracle: Some(oracle),
            options: CheckerOptions::default(),
        }
    }

    /// Replaces the options of the receiver.
    pub fn with_options(self, options: CheckerOptions) -> Self {
        Self { options, ..self }
    }

    /// Returns the options of the receiver.
    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Checks that `element` is a well-formed formula.
    pub fn check_formula(&self, element: &Element, context: &Context) -> Result<(), Diagnostic> {
        self.analyze_formula(element, context).map(|_| ())
    }

    /// Checks that `element` is a well-formed term.
    pub fn check_term(&self, element: &Element, context: &Context) -> Result<(), Diagnostic> {
        self.analyze_term(element, context).map(|_| ())
    }

    /// Checks that `element` is a well-formed formula and returns its free and bound subject
    /// variables.
    pub fn analyze_formula(
        &self,
        element: &Element,
        context: &Context,
    ) -> Result<ScopeSummary, Diagnostic> {
        self.run(Kind::Formula, element, context)
    }

    /// Checks that `element` is a well-formed term and returns its free and bound subject
    /// variables.
    pub fn analyze_term(
        &self,
        element: &Element,
        context: &Context,
    ) -> Result<ScopeSummary, Diagnostic> {
        self.run(Kind::Term, element, context)
    }

    /// Checks `element` in the position given by `kind`.
    pub fn analyze(
        &self,
        kind: Kind,
        element: &Element,
        context: &Context,
    ) -> Result<ScopeSummary, Diagnostic> {
        self.run(kind, element, context)
    }

    fn run(
        &self,
        kind: Kind,
        element: &Element,
        context: &Context,
    ) -> Result<ScopeSummary, Diagnostic> {
        let span = span!(
            tracing::Level::TRACE,
            trace::CHECK,
            context = context.origin()
        );
        let _enter = span.enter();

        let walk = Walk {
            oracle: self.oracle,
            max_depth: self.options.max_depth,
            context,
            path: Path::root(),
            binders: Binders::default(),
        };
        let result = walk.run(kind, element);

        match &result {
            Ok(_) => info!(
                event = trace::ACCEPT,
                context = context.origin(),
                kind = %kind,
                element = %element,
            ),
            Err(diagnostic) => {
                let reference = diagnostic
                    .reference()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                info!(
                    event = trace::REJECT,
                    context = context.origin(),
                    kind = %kind,
                    element = %element,
                    code = diagnostic.code(),
                    location = %diagnostic.location(),
                    reference = reference.as_str(),
                    message = %diagnostic.error(),
                )
            }
        }
        result
    }
}

/// Checks that `element` is a well-formed formula, looking up constants in `oracle` if given.
pub fn check_formula(
    element: &Element,
    context: &Context,
    oracle: Option<&dyn Oracle>,
) -> Result<(), Diagnostic> {
    checker(oracle).check_formula(element, context)
}

/// Checks that `element` is a well-formed term, looking up constants in `oracle` if given.
pub fn check_term(
    element: &Element,
    context: &Context,
    oracle: Option<&dyn Oracle>,
) -> Result<(), Diagnostic> {
    checker(oracle).check_term(element, context)
}

fn checker(oracle: Option<&dyn Oracle>) -> Checker {
    match oracle {
        Some(oracle) => Checker::with_oracle(oracle),
        None => Checker::new(),
    }
}

// a list whose children are being checked
struct Frame<'e> {
    op: Operator,
    list: &'e List,
    next: usize,
    // the name of an applied constant
    constant: Option<&'e str>,
    // the subject variable of a binder
    bound: Option<&'e str>,
    children: Vec<ScopeSummary>,
}

impl<'e> Frame<'e> {
    fn new(op: Operator, list: &'e List, first: usize) -> Self {
        Self {
            op,
            list,
            next: first,
            constant: None,
            bound: None,
            children: Vec::with_capacity(list.len().saturating_sub(first)),
        }
    }

    fn next_child(&mut self) -> Option<(usize, &'e Element)> {
        let index = self.next;
        let child = self.list.get(index)?;
        self.next += 1;
        Some((index, child))
    }
}

enum Step<'e> {
    Done(ScopeSummary),
    Descend(Frame<'e>),
}

// the state of a single top-level check
struct Walk<'c, 'e> {
    oracle: Option<&'c dyn Oracle>,
    max_depth: usize,
    context: &'c Context,
    path: Path,
    binders: Binders<'e>,
}

impl<'c, 'e> Walk<'c, 'e> {
    // checks the element depth-first on an explicit stack of lists, so that the nesting depth
    // is bounded by `max_depth` alone and not by the stack of the calling thread
    fn run(mut self, kind: Kind, element: &'e Element) -> Result<ScopeSummary, Diagnostic> {
        let mut frame = match self.enter(kind, element)? {
            Step::Done(summary) => return Ok(summary),
            Step::Descend(frame) => frame,
        };
        let mut outer = Vec::new();
        loop {
            if let Some((index, child)) = frame.next_child() {
                self.path.push(index);
                match self.enter_child(frame.op, child)? {
                    Step::Done(summary) => {
                        self.path.pop();
                        frame.children.push(summary);
                    }
                    Step::Descend(inner) => outer.push(mem::replace(&mut frame, inner)),
                }
                continue;
            }

            let summary = self.leave(frame)?;
            match outer.pop() {
                Some(parent) => {
                    self.path.pop();
                    frame = parent;
                    frame.children.push(summary);
                }
                None => return Ok(summary),
            }
        }
    }

    fn at(&self, error: Error) -> Diagnostic {
        Diagnostic::new(error, self.context.locate(&self.path))
    }

    fn guard(&self) -> Result<(), Diagnostic> {
        if self.path.depth() > self.max_depth {
            return Err(self.at(Error::NestingTooDeep {
                limit: self.max_depth,
            }));
        }
        Ok(())
    }

    fn shape(&self, element: &'e Element) -> Result<Shape<'e>, Diagnostic> {
        structure::shape(element).map_err(|e| self.at(e))
    }

    // runs `check` on the child at `index` of the current element
    fn within<T, F>(&mut self, index: usize, check: F) -> Result<T, Diagnostic>
    where
        F: FnOnce(&mut Self) -> Result<T, Diagnostic>,
    {
        self.path.push(index);
        let result = check(self);
        self.path.pop();
        result
    }

    // checks the element at the current path up to its children
    fn enter(&mut self, kind: Kind, element: &'e Element) -> Result<Step<'e>, Diagnostic> {
        self.guard()?;
        let list = match self.shape(element)? {
            Shape::List(list) => list,
            Shape::Atom(_) => {
                let operator = element.to_string();
                return Err(self.at(match kind {
                    Kind::Formula => Error::UnknownLogicalOperator { operator },
                    Kind::Term => Error::UnknownTermOperator { operator },
                }));
            }
        };
        let op = match kind {
            Kind::Formula => grammar::formula_operator(list),
            Kind::Term => grammar::term_operator(list),
        }
        .map_err(|e| self.at(e))?;

        if op == Operator::Var {
            let name = self.variable(list)?;
            return Ok(Step::Done(ScopeSummary::variable(
                name,
                self.context.locate(&self.path),
            )));
        }
        if op.is_binder() {
            grammar::check_arity(op, list).map_err(|e| self.at(e))?;
            let name = self.within(0, |walk| walk.subject_variable(&list.elements()[0]))?;
            self.binders.push(name);
            let mut frame = Frame::new(op, list, 1);
            frame.bound = Some(name);
            return Ok(Step::Descend(frame));
        }
        if op.is_named() {
            let name = self.name(op, list)?;
            grammar::check_arity(op, list).map_err(|e| self.at(e))?;
            let mut frame = Frame::new(op, list, 1);
            if op.is_constant() {
                frame.constant = Some(name);
            }
            return Ok(Step::Descend(frame));
        }
        grammar::check_arity(op, list).map_err(|e| self.at(e))?;
        Ok(Step::Descend(Frame::new(op, list, 0)))
    }

    // checks a child of a list headed by `parent`: the arguments of applications are terms,
    // everything else is a formula
    fn enter_child(&mut self, parent: Operator, child: &'e Element) -> Result<Step<'e>, Diagnostic> {
        if !parent.is_named() {
            return self.enter(Kind::Formula, child);
        }
        if let Shape::Atom(_) = self.shape(child)? {
            return Err(self.at(Error::NameRepeated {
                operator: parent.to_string(),
            }));
        }
        self.enter(Kind::Term, child)
    }

    // finishes a list whose children are checked
    fn leave(&mut self, frame: Frame<'e>) -> Result<ScopeSummary, Diagnostic> {
        if frame.bound.is_some() {
            self.binders.pop();
        }

        if let Some(oracle) = self.oracle {
            let arity = frame.children.len();
            match (frame.op, frame.constant) {
                (Operator::Class, _) if !oracle.class_operator_exists() => {
                    return Err(self.at(Error::ClassOperatorUnknown));
                }
                (Operator::PredCon, Some(name)) if !oracle.predicate_exists(name, arity) => {
                    return Err(self.at(Error::UnknownPredicateConstant {
                        name: name.to_string(),
                        arity,
                    }));
                }
                (Operator::FunCon, Some(name)) if !oracle.function_exists(name, arity) => {
                    return Err(self.at(Error::UnknownFunctionConstant {
                        name: name.to_string(),
                        arity,
                    }));
                }
                _ => {}
            }
        }

        let mut summary = scope::combine(frame.children)?;
        if let Some(name) = frame.bound {
            self.path.push(0);
            summary.bind(name, self.context.locate(&self.path));
            self.path.pop();
        }
        Ok(summary)
    }

    // returns the name of a named operator
    fn name(&mut self, op: Operator, list: &'e List) -> Result<&'e str, Diagnostic> {
        let first = list.get(0).ok_or_else(|| {
            self.at(Error::NameExpected {
                operator: op.to_string(),
            })
        })?;
        self.within(0, |walk| match walk.shape(first)? {
            Shape::Atom(name) => Ok(name),
            Shape::List(_) => Err(walk.at(Error::NameMustBeAnAtom {
                operator: op.to_string(),
            })),
        })
    }

    // returns the name of a `VAR` list
    fn variable(&mut self, list: &'e List) -> Result<&'e str, Diagnostic> {
        let name = self.name(Operator::Var, list)?;
        grammar::check_arity(Operator::Var, list).map_err(|e| self.at(e))?;
        Ok(name)
    }

    // returns the name of the subject variable at the head of a binder
    fn subject_variable(&mut self, element: &'e Element) -> Result<&'e str, Diagnostic> {
        let name = match self.shape(element)? {
            Shape::List(list) if list.operator() == Operator::Var.as_str() => {
                self.variable(list)?
            }
            _ => return Err(self.at(Error::SubjectVariableExpected)),
        };
        if self.binders.contains(name) {
            debug!(event = trace::REBIND, name = name, location = %self.context.locate(&self.path));
            return Err(self.at(Error::SubjectVariableAlreadyBound {
                name: name.to_string(),
            }));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{element::Malformation, location::Location, test_prelude::*};

    fn at(path: Vec<usize>) -> Location {
        Location::new("test", path)
    }

    fn formula_error(element: &Element) -> Diagnostic {
        Checker::new()
            .check_formula(element, &context())
            .unwrap_err()
    }

    fn term_error(element: &Element) -> Diagnostic {
        Checker::new().check_term(element, &context()).unwrap_err()
    }

    #[test]
    fn test_well_formed_formulae() {
        let checker = Checker::new();
        let formulae = vec![
            a(),
            not(a()),
            and(vec![a(), b()]),
            or(vec![a(), b(), not(a())]),
            impl_(a(), b()),
            equi(vec![a(), b()]),
            forall("x", phi(var("x"))),
            exists("x", phi(var("x"))),
            existsu("x", phi(var("x"))),
            Element::list("FORALL", vec![var("x"), phi(var("x")), psi(var("x"))]),
            equal(var("x"), var("x")),
            and(vec![equal(var("x"), var("x")), equal(var("x"), var("x"))]),
            and(vec![forall("x", phi(var("x"))), forall("x", psi(var("x")))]),
            equal(var("y"), class("x", phi(var("x")))),
            predvar("\\phi", vec![funvar("f", vec![var("x")]), funcon("empty", vec![])]),
            forall(
                "x",
                exists("y", equal(var("y"), funcon("union", vec![var("x"), var("y")]))),
            ),
        ];
        for formula in formulae {
            assert_eq!(Ok(()), checker.check_formula(&formula, &context()), "{}", formula);
        }
    }

    #[test]
    fn test_well_formed_terms() {
        let checker = Checker::new();
        let terms = vec![
            var("x"),
            funcon("empty", vec![]),
            funvar("f", vec![var("x"), var("y")]),
            class("x", phi(var("x"))),
            class("x", forall("y", equal(var("x"), var("y")))),
        ];
        for term in terms {
            assert_eq!(Ok(()), checker.check_term(&term, &context()), "{}", term);
        }
    }

    #[test]
    fn test_structural_errors() {
        let cases = vec![
            (Malformation::Missing, 30400),
            (Malformation::AtomUnavailable, 30410),
            (Malformation::ListUnavailable, 30420),
            (Malformation::AtomWithoutText, 30430),
            (Malformation::ListWithoutOperator, 30450),
            (Malformation::Shapeless, 30470),
        ];
        for (kind, code) in cases {
            let element = Element::malformed(kind);
            assert_eq!(code, formula_error(&element).code());
            assert_eq!(code, term_error(&element).code());

            let diagnostic = formula_error(&and(vec![a(), not(Element::malformed(kind))]));
            assert_eq!(code, diagnostic.code());
            assert_eq!(&at(vec![1, 0]), diagnostic.location());

            let diagnostic = formula_error(&predvar("A", vec![Element::malformed(kind)]));
            assert_eq!(code, diagnostic.code());
            assert_eq!(&at(vec![1]), diagnostic.location());
        }

        assert_eq!(30440, formula_error(&predvar("", vec![])).code());
        assert_eq!(30440, term_error(&var("")).code());
        assert_eq!(30460, formula_error(&Element::list("", vec![a()])).code());
        assert_eq!(
            30460,
            formula_error(&equal(var("x"), Element::list("", vec![]))).code()
        );
    }

    #[test]
    fn test_unknown_operators() {
        let diagnostic = formula_error(&Element::list("UIMPL", vec![a(), b()]));
        assert_eq!(30530, diagnostic.code());
        assert_eq!(&at(vec![]), diagnostic.location());
        assert_eq!("unknown logical operator `UIMPL`", diagnostic.message());

        assert_eq!(30530, formula_error(&var("x")).code());
        assert_eq!(30530, formula_error(&funcon("empty", vec![])).code());
        assert_eq!(30530, formula_error(&funvar("f", vec![var("x")])).code());
        assert_eq!(30530, formula_error(&class("x", a())).code());
        assert_eq!(30530, formula_error(&Element::atom("A")).code());
        assert_eq!(30530, formula_error(&not(Element::atom("A"))).code());

        assert_eq!(30620, term_error(&a()).code());
        assert_eq!(30620, term_error(&Element::atom("x")).code());
        assert_eq!(30620, term_error(&Element::list("SET", vec![])).code());
        let diagnostic = formula_error(&equal(var("x"), and(vec![a(), b()])));
        assert_eq!(30620, diagnostic.code());
        assert_eq!(&at(vec![2]), diagnostic.location());
    }

    #[test]
    fn test_names() {
        let diagnostic = formula_error(&predvar_raw(vec![]));
        assert_eq!(30720, diagnostic.code());
        assert_eq!(&at(vec![]), diagnostic.location());
        assert_eq!(30720, formula_error(&Element::list("PREDCON", vec![])).code());
        assert_eq!(30720, term_error(&Element::list("FUNCON", vec![])).code());
        assert_eq!(30720, term_error(&Element::list("FUNVAR", vec![])).code());
        assert_eq!(30720, term_error(&Element::list("VAR", vec![])).code());

        let diagnostic = formula_error(&predvar_raw(vec![var("x")]));
        assert_eq!(30730, diagnostic.code());
        assert_eq!(&at(vec![0]), diagnostic.location());
        assert_eq!(
            30730,
            term_error(&Element::list("VAR", vec![var("x")])).code()
        );
        assert_eq!(
            30730,
            term_error(&Element::list("FUNCON", vec![funcon("c", vec![])])).code()
        );
    }

    #[test]
    fn test_arities() {
        assert_eq!(30740, formula_error(&Element::list("IMPL", vec![a()])).code());
        assert_eq!(
            30760,
            formula_error(&Element::list("IMPL", vec![a(), b(), a()])).code()
        );
        assert_eq!(30740, formula_error(&Element::list("NOT", vec![])).code());
        assert_eq!(30760, formula_error(&Element::list("NOT", vec![a(), b()])).code());
        assert_eq!(30740, formula_error(&Element::list("AND", vec![a()])).code());
        assert_eq!(30740, formula_error(&Element::list("OR", vec![])).code());
        assert_eq!(30740, formula_error(&Element::list("EQUI", vec![b()])).code());
        assert_eq!(
            30740,
            formula_error(&Element::list("FORALL", vec![var("x")])).code()
        );
        assert_eq!(
            30760,
            formula_error(&Element::list(
                "EXISTS",
                vec![var("x"), a(), b(), a()]
            ))
            .code()
        );
        assert_eq!(30740, term_error(&funvar("f", vec![])).code());
        assert_eq!(
            30740,
            term_error(&Element::list("CLASS", vec![var("x")])).code()
        );
        assert_eq!(
            30760,
            term_error(&Element::list("CLASS", vec![var("x"), a(), b()])).code()
        );
        assert_eq!(
            30760,
            term_error(&Element::list(
                "VAR",
                vec![Element::atom("x"), Element::atom("y")]
            ))
            .code()
        );

        let diagnostic = formula_error(&Element::list(
            "PREDVAR",
            vec![Element::atom("A"), var("x"), Element::atom("B")],
        ));
        assert_eq!(30760, diagnostic.code());
        assert_eq!(&at(vec![2]), diagnostic.location());
    }

    #[test]
    fn test_subject_variable_expected() {
        let diagnostic = formula_error(&Element::list("FORALL", vec![a(), b()]));
        assert_eq!(30540, diagnostic.code());
        assert_eq!(&at(vec![0]), diagnostic.location());
        assert_eq!(
            30540,
            formula_error(&Element::list("EXISTSU", vec![Element::atom("x"), a()])).code()
        );
        assert_eq!(
            30540,
            term_error(&Element::list("CLASS", vec![funcon("c", vec![]), a()])).code()
        );
        assert_eq!(
            30440,
            formula_error(&Element::list("FORALL", vec![Element::atom(""), a()])).code()
        );
        assert_eq!(
            30730,
            formula_error(&Element::list(
                "FORALL",
                vec![Element::list("VAR", vec![var("x")]), a()]
            ))
            .code()
        );
    }

    #[test]
    fn test_already_bound() {
        // ∀ x ∀ x φ(x)
        let diagnostic = formula_error(&forall("x", forall("x", phi(var("x")))));
        assert_eq!(30550, diagnostic.code());
        assert_eq!(&at(vec![1, 0]), diagnostic.location());
        assert_eq!(None, diagnostic.reference());

        // ∀ x (φ(x) ∧ ∀ x φ(x))
        let diagnostic = formula_error(&forall(
            "x",
            and(vec![phi(var("x")), forall("x", phi(var("x")))]),
        ));
        assert_eq!(30550, diagnostic.code());
        assert_eq!(&at(vec![1, 1, 0]), diagnostic.location());

        // ∃ x ψ(x, {x | φ(x)})
        let diagnostic = formula_error(&exists(
            "x",
            psi2(var("x"), class("x", phi(var("x")))),
        ));
        assert_eq!(30550, diagnostic.code());
        assert_eq!(&at(vec![1, 2, 0]), diagnostic.location());

        // {x | ∃ x φ(x)}
        let diagnostic = term_error(&class("x", exists("x", phi(var("x")))));
        assert_eq!(30550, diagnostic.code());
        assert_eq!(&at(vec![1, 0]), diagnostic.location());

        // ∀ x with a restriction rebinding x
        let diagnostic = formula_error(&Element::list(
            "FORALL",
            vec![var("x"), exists("x", phi(var("x"))), a()],
        ));
        assert_eq!(30550, diagnostic.code());
        assert_eq!(&at(vec![1, 0]), diagnostic.location());
    }

    #[test]
    fn test_capture_order() {
        // (x = x) ∧ (y = {x | φ(x)})
        let formula = and(vec![
            equal(var("x"), var("x")),
            equal(var("y"), class("x", phi(var("x")))),
        ]);
        let diagnostic = formula_error(&formula);
        assert_eq!(30770, diagnostic.code());
        assert_eq!(&at(vec![0, 1]), diagnostic.location());
        assert_eq!(Some(&at(vec![1, 2, 0])), diagnostic.reference());

        // (y = {x | φ(x)}) ∧ (x = x)
        let formula = and(vec![
            equal(var("y"), class("x", phi(var("x")))),
            equal(var("x"), var("x")),
        ]);
        let diagnostic = formula_error(&formula);
        assert_eq!(30780, diagnostic.code());
        assert_eq!(&at(vec![1, 1]), diagnostic.location());
        assert_eq!(Some(&at(vec![0, 2, 0])), diagnostic.reference());
    }

    #[test]
    fn test_capture_positions() {
        // x = {x | φ(x)}
        let diagnostic = formula_error(&equal(var("x"), class("x", phi(var("x")))));
        assert_eq!(30770, diagnostic.code());
        assert_eq!(&at(vec![1]), diagnostic.location());
        assert_eq!(Some(&at(vec![2, 0])), diagnostic.reference());

        // ∀ x φ(x) → ψ(x)
        let diagnostic = formula_error(&impl_(forall("x", phi(var("x"))), psi(var("x"))));
        assert_eq!(30780, diagnostic.code());
        assert_eq!(&at(vec![1, 1]), diagnostic.location());
        assert_eq!(Some(&at(vec![0, 0])), diagnostic.reference());

        // ∀ y with restriction φ(x) and body ∃ x ψ(x)
        let diagnostic = formula_error(&Element::list(
            "FORALL",
            vec![var("y"), phi(var("x")), exists("x", psi(var("x")))],
        ));
        assert_eq!(30770, diagnostic.code());
        assert_eq!(&at(vec![1, 1]), diagnostic.location());
        assert_eq!(Some(&at(vec![2, 0])), diagnostic.reference());

        // f(x, {x | φ(x)})
        let diagnostic = term_error(&funvar("f", vec![var("x"), class("x", phi(var("x")))]));
        assert_eq!(30770, diagnostic.code());

        // φ(∀ bound in a sibling deeper down)
        let diagnostic = formula_error(&or(vec![
            not(exists("z", phi(var("z")))),
            a(),
            not(psi(funvar("g", vec![var("z")]))),
        ]));
        assert_eq!(30780, diagnostic.code());
        assert_eq!(&at(vec![2, 0, 1, 1]), diagnostic.location());
        assert_eq!(Some(&at(vec![0, 0, 0])), diagnostic.reference());
    }

    #[test]
    fn test_free_variables_may_repeat() {
        let checker = Checker::new();
        let formula = and(vec![equal(var("x"), var("x")), equal(var("x"), var("x"))]);
        let summary = checker.analyze_formula(&formula, &context()).unwrap();
        assert_eq!(vec!["x"], summary.free_names());
        assert!(summary.bound_names().is_empty());
        assert_eq!(&at(vec![0, 1]), summary.free()[0].location());
    }

    #[test]
    fn test_analyze() {
        let checker = Checker::new();
        // ∀ x (x = y) ∧ ∃ z φ(z, w)
        let formula = and(vec![
            forall("x", equal(var("x"), var("y"))),
            exists("z", psi2(var("z"), var("w"))),
        ]);
        let summary = checker.analyze_formula(&formula, &context()).unwrap();
        assert_eq!(vec!["y", "w"], summary.free_names());
        assert_eq!(vec!["x", "z"], summary.bound_names());
        assert_eq!(&at(vec![0, 0]), summary.bound()[0].location());
        assert_eq!(&at(vec![1, 1, 2]), summary.free()[1].location());

        let summary = checker
            .analyze_term(&class("x", equal(var("x"), var("y"))), &context())
            .unwrap();
        assert_eq!(vec!["y"], summary.free_names());
        assert_eq!(vec!["x"], summary.bound_names());
        assert_eq!(
            summary,
            checker
                .analyze(Kind::Term, &class("x", equal(var("x"), var("y"))), &context())
                .unwrap()
        );
    }

    #[test]
    fn test_oracle_gating() {
        let formula = predcon("F", vec![]);
        assert_eq!(Ok(()), check_formula(&formula, &context(), None));

        let signature = signature();
        let diagnostic = check_formula(&formula, &context(), Some(&signature)).unwrap_err();
        assert_eq!(30590, diagnostic.code());
        assert_eq!(&at(vec![]), diagnostic.location());

        let formula = equal(var("x"), var("y"));
        assert_eq!(Ok(()), check_formula(&formula, &context(), Some(&signature)));
        let formula = predcon("equal", vec![var("x")]);
        assert_eq!(
            30590,
            check_formula(&formula, &context(), Some(&signature))
                .unwrap_err()
                .code()
        );

        // predicate and function variables are never looked up
        let formula = predvar("F", vec![funvar("f", vec![var("x")])]);
        assert_eq!(Ok(()), check_formula(&formula, &context(), Some(&signature)));

        let term = funcon("empty", vec![]);
        assert_eq!(Ok(()), check_term(&term, &context(), Some(&signature)));
        let term = funcon("empty", vec![var("x")]);
        let diagnostic = check_term(&term, &context(), Some(&signature)).unwrap_err();
        assert_eq!(30690, diagnostic.code());
        assert_eq!(
            "unknown function constant `empty` with 1 argument(s)",
            diagnostic.message()
        );
        let diagnostic =
            check_formula(&equal(var("x"), funcon("g", vec![])), &context(), Some(&signature))
                .unwrap_err();
        assert_eq!(30690, diagnostic.code());
        assert_eq!(&at(vec![2]), diagnostic.location());
    }

    #[test]
    fn test_class_operator_gating() {
        let formula = equal(var("y"), class("x", equal(var("x"), var("x"))));
        let with_class = signature();
        assert_eq!(Ok(()), check_formula(&formula, &context(), Some(&with_class)));

        let without_class = signature_without_class();
        let diagnostic = check_formula(&formula, &context(), Some(&without_class)).unwrap_err();
        assert_eq!(30680, diagnostic.code());
        assert_eq!(&at(vec![2]), diagnostic.location());
        assert_eq!(Ok(()), check_formula(&formula, &context(), None));
    }

    #[test]
    fn test_first_violation_wins() {
        // both arguments are faulty: the left one is reported
        let formula = and(vec![
            Element::list("IMPL", vec![a()]),
            Element::list("UIMPL", vec![a(), b()]),
        ]);
        let diagnostic = formula_error(&formula);
        assert_eq!(30740, diagnostic.code());
        assert_eq!(&at(vec![0]), diagnostic.location());

        // a faulty child is found before the constant is looked up
        let signature = signature();
        let formula = predcon("F", vec![Element::list("VAR", vec![])]);
        let diagnostic = check_formula(&formula, &context(), Some(&signature)).unwrap_err();
        assert_eq!(30720, diagnostic.code());

        // rebinding is found before the capture of the enclosing conjunction
        let formula = forall(
            "x",
            and(vec![phi(var("x")), exists("x", psi(var("x")))]),
        );
        assert_eq!(30550, formula_error(&formula).code());
    }

    #[test]
    fn test_determinism_and_no_mutation() {
        let formula = and(vec![
            equal(var("y"), class("x", phi(var("x")))),
            equal(var("x"), var("x")),
        ]);
        let copy = formula.clone();
        let first = formula_error(&formula);
        let second = formula_error(&formula);
        assert_eq!(first, second);
        assert_eq!(copy, formula);
    }

    fn nots(depth: usize) -> Element {
        let mut formula = a();
        for _ in 0..depth {
            formula = not(formula);
        }
        formula
    }

    // runs `check` on a thread with the default stack size of spawned threads
    fn spawned<T, F>(check: F) -> T
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(check)
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn test_nesting_limit() {
        let formula = nots(20);
        let shallow = Checker::new().with_options(CheckerOptions { max_depth: 10 });
        let diagnostic = shallow.check_formula(&formula, &context()).unwrap_err();
        assert_eq!(30480, diagnostic.code());
        assert_eq!(11, diagnostic.location().path().len());
        assert_eq!(Ok(()), Checker::new().check_formula(&formula, &context()));
        assert_eq!(DEFAULT_MAX_DEPTH, Checker::new().options().max_depth);
    }

    #[test]
    fn test_default_nesting_limit() {
        let (inside, at_limit, outside) = spawned(|| {
            let checker = Checker::new();
            (
                checker.check_formula(&nots(DEFAULT_MAX_DEPTH - 1), &context()),
                checker.check_formula(&nots(DEFAULT_MAX_DEPTH), &context()),
                checker.check_formula(&nots(DEFAULT_MAX_DEPTH + 1), &context()),
            )
        });
        assert_eq!(Ok(()), inside);
        assert_eq!(Ok(()), at_limit);
        let diagnostic = outside.unwrap_err();
        assert_eq!(30480, diagnostic.code());
        assert_eq!(DEFAULT_MAX_DEPTH + 1, diagnostic.location().path().len());
    }

    #[test]
    fn test_deep_quantifiers() {
        let summary = spawned(|| {
            let mut formula = phi(var("x0"));
            for i in 0..300 {
                formula = forall(&format!("x{}", i), formula);
            }
            Checker::new().analyze_formula(&formula, &context())
        })
        .unwrap();
        assert!(summary.free_names().is_empty());
        assert_eq!(300, summary.bound().len());
        assert_eq!("x299", summary.bound()[0].name());
        assert_eq!(&at(vec![0]), summary.bound()[0].location());

        let diagnostic = spawned(|| {
            let mut term = var("y");
            for _ in 0..DEFAULT_MAX_DEPTH {
                term = funvar("f", vec![term]);
            }
            Checker::new().check_formula(&phi(term), &context())
        })
        .unwrap_err();
        assert_eq!(30480, diagnostic.code());
        assert_eq!(DEFAULT_MAX_DEPTH + 1, diagnostic.location().path().len());
    }

    #[test]
    fn test_concurrent_checks() {
        let signature = signature();
        let formulae = vec![
            forall("x", exists("y", equal(var("y"), funcon("union", vec![var("x"), var("y")])))),
            and(vec![
                equal(var("x"), var("x")),
                equal(var("y"), class("x", phi(var("x")))),
            ]),
            equal(var("x"), funcon("g", vec![])),
            forall("x", forall("x", phi(var("x")))),
        ];
        let expected: Vec<_> = formulae
            .iter()
            .map(|formula| check_formula(formula, &context(), Some(&signature)))
            .collect();
        assert_eq!(Ok(()), expected[0]);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let checker = Checker::with_oracle(&signature);
                        formulae
                            .iter()
                            .map(|formula| checker.check_formula(formula, &context()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(expected, handle.join().unwrap());
            }
        });
    }

    #[test]
    fn test_locations_use_context() {
        let diagnostic = Checker::new()
            .check_formula(&not(var("x")), &Context::new("axiom 7"))
            .unwrap_err();
        assert_eq!("axiom 7[0]", diagnostic.location().to_string());
        assert_eq!(
            "30530: unknown logical operator `VAR` (at axiom 7[0])",
            diagnostic.to_string()
        );
    }
}
