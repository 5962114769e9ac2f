use crate::{element::Element, location::Context, oracle::Signature};

pub fn context() -> Context {
    Context::new("test")
}

// Terms
pub fn var(name: &str) -> Element {
    Element::list("VAR", vec![Element::atom(name)])
}

pub fn funvar(name: &str, args: Vec<Element>) -> Element {
    named("FUNVAR", name, args)
}

pub fn funcon(name: &str, args: Vec<Element>) -> Element {
    named("FUNCON", name, args)
}

pub fn class(name: &str, body: Element) -> Element {
    Element::list("CLASS", vec![var(name), body])
}

// Atomic formulae
pub fn predvar(name: &str, args: Vec<Element>) -> Element {
    named("PREDVAR", name, args)
}

pub fn predvar_raw(children: Vec<Element>) -> Element {
    Element::list("PREDVAR", children)
}

pub fn predcon(name: &str, args: Vec<Element>) -> Element {
    named("PREDCON", name, args)
}

pub fn equal(left: Element, right: Element) -> Element {
    predcon("equal", vec![left, right])
}

pub fn a() -> Element {
    predvar("A", vec![])
}

pub fn b() -> Element {
    predvar("B", vec![])
}

pub fn phi(arg: Element) -> Element {
    predvar("\\phi", vec![arg])
}

pub fn psi(arg: Element) -> Element {
    predvar("\\psi", vec![arg])
}

pub fn psi2(first: Element, second: Element) -> Element {
    predvar("\\psi", vec![first, second])
}

// Compound formulae
pub fn not(formula: Element) -> Element {
    Element::list("NOT", vec![formula])
}

pub fn and(formulae: Vec<Element>) -> Element {
    Element::list("AND", formulae)
}

pub fn or(formulae: Vec<Element>) -> Element {
    Element::list("OR", formulae)
}

pub fn impl_(premise: Element, consequence: Element) -> Element {
    Element::list("IMPL", vec![premise, consequence])
}

pub fn equi(formulae: Vec<Element>) -> Element {
    Element::list("EQUI", formulae)
}

pub fn forall(name: &str, body: Element) -> Element {
    Element::list("FORALL", vec![var(name), body])
}

pub fn exists(name: &str, body: Element) -> Element {
    Element::list("EXISTS", vec![var(name), body])
}

pub fn existsu(name: &str, body: Element) -> Element {
    Element::list("EXISTSU", vec![var(name), body])
}

fn named(operator: &str, name: &str, args: Vec<Element>) -> Element {
    let mut children = vec![Element::atom(name)];
    children.extend(args);
    Element::list(operator, children)
}

// Signatures
pub fn signature() -> Signature {
    let mut signature = signature_without_class();
    signature.enable_class_operator();
    signature
}

pub fn signature_without_class() -> Signature {
    let mut signature = Signature::new();
    signature.set_equality("equal");
    signature.add_predicate("in", 2);
    signature.add_function("empty", 0);
    signature.add_function("union", 2);
    signature
}
