/*! Defines locations of elements inside a top-level formula or term.

A [`Context`] names where a top-level element comes from in its module. While the checker
descends into the element, it pushes and pops child positions on a single [`Path`]; the path is
only turned into a [`Location`] when a diagnostic (or a scope occurrence) needs one.

[`Context`]: crate::location::Context
[`Location`]: crate::location::Location
[`Path`]: crate::location::Path
*/
use std::fmt;

/// Names the origin of a top-level element inside its module, e.g. `axiom 3`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Context {
    origin: String,
}

impl Context {
    /// Creates a new context for an element originating from `origin`.
    pub fn new<S: Into<String>>(origin: S) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Returns the origin of the receiver.
    #[inline(always)]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the location of the element at `path`, relative to the receiver.
    pub fn locate(&self, path: &Path) -> Location {
        Location {
            origin: self.origin.clone(),
            path: path.indices().to_vec(),
        }
    }
}

/// Is the location of an element: its context's origin and the child positions leading to it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    origin: String,
    path: Vec<usize>,
}

impl Location {
    /// Creates a location from an `origin` and a sequence of child positions.
    pub fn new<S: Into<String>>(origin: S, path: Vec<usize>) -> Self {
        Self {
            origin: origin.into(),
            path,
        }
    }

    /// Returns the origin of the receiver.
    #[inline(always)]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the child positions, from the top-level element down.
    #[inline(always)]
    pub fn path(&self) -> &[usize] {
        &self.path
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.origin.is_empty() {
            write!(f, "element")?;
        } else {
            write!(f, "{}", self.origin)?;
        }
        for i in &self.path {
            write!(f, "[{}]", i)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Is the position of an element below the top-level element, as the stack of child positions
/// leading to it.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Path {
    indices: Vec<usize>,
}

impl Path {
    /// Returns the path of the top-level element.
    pub fn root() -> Self {
        Self::default()
    }

    /// Descends from the receiver into the child at `index`.
    #[inline(always)]
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Ascends from the receiver to its parent and returns the position it ascended from.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<usize> {
        self.indices.pop()
    }

    /// Returns the number of steps from the top-level element.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Returns the child positions of the receiver, from the top-level element down.
    #[inline(always)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
