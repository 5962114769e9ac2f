//! Command line front end: reads a QEDEQ module and reports the check of every entry.
mod command;
mod constants;
mod terminal;
mod utils;

use anyhow::Error;
use structopt::StructOpt;

fn main() -> Result<(), Error> {
    command::Command::from_args().run()
}
