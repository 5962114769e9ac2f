//! Paints the output of the command line tool on the standard output.
use term::{
    color::{self, Color},
    Attr,
};

/// Is the role of a piece of output, which decides how it is painted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Tone {
    Logo,
    Info,
    Module,
    Accept,
    Reject,
    Detail,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Self::Logo | Self::Info => 59,
            Self::Module | Self::Detail => 252,
            Self::Accept => color::GREEN,
            Self::Reject => color::RED,
        }
    }

    fn attr(self) -> Option<Attr> {
        match self {
            Self::Logo => Some(Attr::Dim),
            Self::Info | Self::Accept | Self::Reject => Some(Attr::Bold),
            Self::Module | Self::Detail => None,
        }
    }
}

/// Switches the standard output between tones. A palette without color, or a standard output
/// that is not a terminal, prints plain text.
pub(crate) struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    pub fn paint(&self, tone: Tone) {
        if !self.color {
            return;
        }
        if let Some(mut term) = term::stdout() {
            let _ = term.reset();
            let _ = term.fg(tone.color());
            if let Some(attr) = tone.attr() {
                let _ = term.attr(attr);
            }
        }
    }

    pub fn reset(&self) {
        if !self.color {
            return;
        }
        if let Some(mut term) = term::stdout() {
            let _ = term.reset();
        }
    }
}

impl Drop for Palette {
    fn drop(&mut self) {
        self.reset();
    }
}
