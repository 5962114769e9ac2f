use crate::{
    constants::*,
    terminal::{Palette, Tone},
    utils::*,
};
use anyhow::{anyhow, Context, Error};
use qedeq_logic::{
    check::{Checker, CheckerOptions},
    oracle::Signature,
    trace::{subscriber::JsonLogger, DEFAULT_JSON_LOG_FILE},
};
use std::{fs, path::PathBuf};
use structopt::StructOpt;

#[derive(StructOpt)]
enum ProcessCommand {
    #[structopt(name = "check", about = "Check the formulae and terms of the input module")]
    Check {
        #[structopt(
            short = "i",
            long = "input",
            parse(from_os_str),
            help = "Path to the input module file"
        )]
        input: Option<PathBuf>,
        #[structopt(
            long = "no-oracle",
            help = "Skip the look-up of constants, equality and class terms."
        )]
        no_oracle: bool,
        #[structopt(
            long = "max-depth",
            help = "Deepest nesting of elements to check.",
            default_value = "1024"
        )]
        max_depth: usize,
        #[structopt(
            short = "s",
            long = "scope",
            help = "Show the free and bound subject variables of accepted entries."
        )]
        scope: bool,
    },
}

impl ProcessCommand {
    fn run(self, palette: &Palette) -> Result<(), Error> {
        match self {
            ProcessCommand::Check {
                input,
                no_oracle,
                max_depth,
                scope,
            } => {
                let module = if let Some(input) = input {
                    read_module_from_file(&input)?
                } else {
                    read_module_from_stdin()?
                };

                palette.paint(Tone::Info);
                println!("Checking module:");

                palette.paint(Tone::Module);
                println!("{}", module);
                println!();

                let signature: Signature = module.signature();
                let options = CheckerOptions { max_depth };
                let checker = if no_oracle {
                    Checker::new()
                } else {
                    Checker::with_oracle(&signature)
                }
                .with_options(options);

                let reports = module.check(&checker);
                reports
                    .iter()
                    .for_each(|report| print_report(report, palette, scope));

                let rejected = reports.iter().filter(|r| !r.is_ok()).count();
                println!();
                palette.paint(Tone::Info);
                println!(
                    "{} accepted and {} rejected entries.",
                    reports.len() - rejected,
                    rejected
                );
                println!();

                if rejected > 0 {
                    Err(anyhow!(
                        "{} of {} entries were rejected",
                        rejected,
                        reports.len()
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[derive(StructOpt)]
#[structopt(
    name = "qedeq",
    about = "A tool for checking the formulae and terms of QEDEQ modules"
)]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
pub(super) struct Command {
    #[structopt(subcommand)]
    command: ProcessCommand,
    #[structopt(long = "no-color", help = "Disable colored output.")]
    no_color: bool,
    #[structopt(
        short = "l",
        long = "log",
        parse(from_os_str),
        help = "Path to the log file."
    )]
    log: Option<PathBuf>,
}

impl Command {
    pub fn run(self) -> Result<(), Error> {
        let process = self.command;
        let palette = Palette::new(!self.no_color);

        if palette.is_colored() {
            palette.paint(Tone::Logo);
            println!("{}", ASCII_ART);
        }

        let run = || process.run(&palette);

        if let Some(log) = self.log {
            let log = if log.as_os_str().is_empty() {
                PathBuf::from(DEFAULT_JSON_LOG_FILE)
            } else {
                log
            };
            let file = fs::File::create(&log)
                .with_context(|| format!("cannot create the log file `{}`", log.display()))?;
            let logger = JsonLogger::new(file);
            tracing::subscriber::with_default(logger, run)
        } else {
            run()
        }
    }
}
