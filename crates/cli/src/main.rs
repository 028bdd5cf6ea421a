mod commands;
mod condition;
mod config;
mod help;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use pwm_argparse::{OptionRegistry, PositionalOptions, ValueSpec};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Settings;
use crate::help::HelpDetails;
use crate::output::{Output, TARGETS};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let settings = Settings::from_env()?;
    let mut top = top_level()?;

    if args.is_empty() {
        print!("{}", help::listing(&top, settings.help));
        return Ok(());
    }

    let rest = top.parse_with(args, false)?;
    if help::show(&top, settings.help, &top_level_details())? {
        return Ok(());
    }
    top.validate()?;

    let output = Output::from_registry(&top)?;
    let command = top.positional()?;
    if !command.is_present() {
        bail!("no command given (expected get, ins, upd or del)");
    }
    let command: String = command.value_as()?;

    if let Some(request) = commands::run(&command, &args[rest..], settings.help)? {
        output.write(&request)?;
    }
    Ok(())
}

fn top_level() -> Result<OptionRegistry> {
    let target = ValueSpec::<String>::new()
        .with_label("type")
        .with_default(["stdout"])
        .with_constraint(|t: &String| TARGETS.contains(&t.as_str()))?;
    help::with_help(OptionRegistry::builder())
        .long_value("target", target, "Output target: stdout or file")
        .short_value(
            "o",
            ValueSpec::<String>::new().with_label("out"),
            "Output file; implies --target file",
        )
        .positional_with(
            ValueSpec::<String>::new().with_label("command"),
            "Command to run: get, ins, upd, del",
            PositionalOptions::default().pause(),
        )
        .build()
        .context("invalid top-level option declarations")
}

fn top_level_details() -> HelpDetails {
    let mut details = HelpDetails::new();
    details.insert("help", "--help\n  Show the option listing.\n--help=<option>\n  Show detailed help for <option>.");
    details.insert(
        "target",
        "--target <type>\n  Where to write the request: `stdout` (default) or `file`.\n  `file` needs -o <out>.",
    );
    details.insert("o", "-o <out>\n  Write the request to <out> instead of stdout.");
    details.insert(
        "command",
        "<command>\n  get  show records matching a condition\n  ins  add a record\n  upd  change records matching a condition\n  del  remove records matching a condition\n  Run `pwm <command> --help` for command options.",
    );
    details
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwm_argparse::HelpLayout;

    #[test]
    fn top_level_hands_off_after_command() {
        let mut top = top_level().unwrap();
        let args = ["-o", "req.json", "get", "--col", "srv"];
        let rest = top.parse(&args).unwrap();
        assert_eq!(&args[rest..], ["--col", "srv"]);
        assert_eq!(
            Output::from_registry(&top).unwrap(),
            Output::File("req.json".into())
        );
    }

    #[test]
    fn target_file_without_path_fails() {
        let mut top = top_level().unwrap();
        top.parse(&["--target=file", "get"]).unwrap();
        assert!(Output::from_registry(&top).is_err());
    }

    #[test]
    fn listing_uses_layout() {
        let text = help::listing(&top_level().unwrap(), HelpLayout::new(25, 2));
        assert!(text.contains("--target[ |=]<type>(=stdout)"), "{text}");
        assert!(text.contains("-o <out>"), "{text}");
        assert!(text.contains("<command>"), "{text}");
    }
}
