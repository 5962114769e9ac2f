//! Checks that an element honors the atom-or-list contract before it is interpreted.
use super::Error;
use crate::element::{Element, List, Malformation};

/// Is a structurally valid element: an atom with non-empty text or a list with a non-empty
/// operator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Shape<'e> {
    Atom(&'e str),
    List(&'e List),
}

/// Returns the shape of `element`, or the structural error it exhibits.
pub(crate) fn shape(element: &Element) -> Result<Shape, Error> {
    match element {
        Element::Atom(atom) if atom.text().is_empty() => Err(Error::AtomContentEmpty),
        Element::Atom(atom) => Ok(Shape::Atom(atom.text())),
        Element::List(list) if list.operator().is_empty() => Err(Error::OperatorEmpty),
        Element::List(list) => Ok(Shape::List(list)),
        Element::Malformed(kind) => Err(match kind {
            Malformation::Missing => Error::ElementMissing,
            Malformation::AtomUnavailable => Error::AtomMissing,
            Malformation::ListUnavailable => Error::ListMissing,
            Malformation::AtomWithoutText => Error::AtomContentMissing,
            Malformation::ListWithoutOperator => Error::OperatorMissing,
            Malformation::Shapeless => Error::AtomOrListExpected,
        }),
    }
}
