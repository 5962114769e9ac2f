/*! Defines the element tree that formulae and terms of QEDEQ modules are written in.

An [`Element`] is either an [`Atom`], carrying a text, or a [`List`], carrying an operator and
an ordered sequence of child elements. The XML reader of a module may also hand over elements
that break this contract; such inputs are represented by [`Element::Malformed`] so that the
checker can report them instead of assuming them away.

[`Element`]: crate::element::Element
[`Atom`]: crate::element::Atom
[`List`]: crate::element::List
[`Element::Malformed`]: crate::element::Element::Malformed
*/
use itertools::Itertools;
use std::fmt;

/// Is a leaf of the element tree, wrapping a text.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    text: String,
}

impl Atom {
    /// Returns the text of the receiver.
    #[inline(always)]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<S: Into<String>> From<S> for Atom {
    fn from(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "\"")?;
        for ch in self.text.chars() {
            match ch {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                _ => write!(f, "{}", ch)?,
            }
        }
        write!(f, "\"")
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Is an interior node of the element tree: an operator applied on a list of elements.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct List {
    operator: String,
    elements: Vec<Element>,
}

impl List {
    /// Creates a new list with the given `operator` and child `elements`.
    pub fn new<S: Into<String>>(operator: S, elements: Vec<Element>) -> Self {
        Self {
            operator: operator.into(),
            elements,
        }
    }

    /// Returns the operator of the receiver.
    #[inline(always)]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Returns the child elements of the receiver.
    #[inline(always)]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the number of child elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the receiver has no child elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the child at position `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}({})", self.operator, self.elements.iter().join(", "))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Enumerates the ways an element handed over by a reader can break the atom-or-list contract.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Malformation {
    /// There is no element at all.
    Missing,

    /// The element claims to be an atom but yields none.
    AtomUnavailable,

    /// The element claims to be a list but yields none.
    ListUnavailable,

    /// The element is an atom without text.
    AtomWithoutText,

    /// The element is a list without operator.
    ListWithoutOperator,

    /// The element is neither an atom nor a list.
    Shapeless,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Missing => "<missing>",
            Self::AtomUnavailable => "<no atom>",
            Self::ListUnavailable => "<no list>",
            Self::AtomWithoutText => "<atom without text>",
            Self::ListWithoutOperator => "<list without operator>",
            Self::Shapeless => "<shapeless>",
        };
        write!(f, "{}", s)
    }
}

/// Is a node of the element tree.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    /// Is a leaf, carrying a text.
    Atom(Atom),

    /// Is an operator applied on child elements.
    List(List),

    /// Is an element that violates the atom-or-list contract.
    Malformed(Malformation),
}

impl Element {
    /// Creates an atom element with the given `text`.
    pub fn atom<S: Into<String>>(text: S) -> Self {
        Self::Atom(Atom::from(text))
    }

    /// Creates a list element with the given `operator` and child `elements`.
    pub fn list<S: Into<String>>(operator: S, elements: Vec<Element>) -> Self {
        Self::List(List::new(operator, elements))
    }

    /// Creates an element that breaks the atom-or-list contract in the way described by `kind`.
    pub fn malformed(kind: Malformation) -> Self {
        Self::Malformed(kind)
    }

    /// Returns the atom of the receiver if it is an atom element.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Returns the list of the receiver if it is a list element.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the number of elements in the tree rooted at the receiver.
    pub fn size(&self) -> usize {
        match self {
            Self::List(list) => 1 + list.elements.iter().map(Element::size).sum::<usize>(),
            _ => 1,
        }
    }
}

impl From<Atom> for Element {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<List> for Element {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Atom(atom) => write!(f, "{}", atom),
            Self::List(list) => write!(f, "{}", list),
            Self::Malformed(kind) => write!(f, "{}", kind),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
