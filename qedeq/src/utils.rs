use crate::terminal::{Palette, Tone};
use anyhow::{Context, Error};
use itertools::Itertools;
use qedeq_logic::{
    check::Diagnostic,
    module::{Module, Report},
};
use std::{
    fs,
    io::{stdin, Read},
    path::Path,
};

pub(crate) fn read_module_from_file(path: &Path) -> Result<Module, Error> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read the input file `{}`", path.display()))?;

    contents
        .parse()
        .context("failed to parse the input module")
}

pub(crate) fn read_module_from_stdin() -> Result<Module, Error> {
    let mut buf: Vec<u8> = Vec::new();
    stdin()
        .read_to_end(&mut buf)
        .context("failed to read the standard input")?;
    let s = String::from_utf8(buf)?;
    let module: Module = s.parse().context("failed to parse the input module")?;
    Ok(module)
}

pub(crate) fn print_report(report: &Report, palette: &Palette, scope: bool) {
    match report.result() {
        Ok(summary) => {
            palette.paint(Tone::Accept);
            println!("✓ {} {}", report.entry().kind(), report.context().origin());
            if scope {
                palette.paint(Tone::Detail);
                println!(
                    "    free: {}",
                    summary.free().iter().map(|o| o.name()).join(", ")
                );
                println!(
                    "    bound: {}",
                    summary.bound().iter().map(|o| o.name()).join(", ")
                );
            }
        }
        Err(diagnostic) => {
            palette.paint(Tone::Reject);
            println!("✗ {} {}", report.entry().kind(), report.context().origin());
            palette.paint(Tone::Detail);
            println!("    {}", diagnostic);
            println!("    {}", report.entry().element());
            if let Some(element) = located(report, diagnostic) {
                println!("    at: {}", element);
            }
        }
    }
}

// returns the rendering of the element the diagnostic points at
fn located(report: &Report, diagnostic: &Diagnostic) -> Option<String> {
    let mut element = report.entry().element();
    for &i in diagnostic.location().path() {
        element = element.as_list()?.get(i)?;
    }
    Some(element.to_string())
}
