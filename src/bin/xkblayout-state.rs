use std::{io::Write, process::ExitCode};

use anyhow::Result;
use clap::{CommandFactory, Parser};

use xkblayout_state::{backend::X11, format, keyboard::Keyboard, logger};

const DIRECTIVES: &str = "\
Format directives:
  %c  current layout number
  %n  current layout name
  %s  current layout symbol
  %v  current layout variant
  %e  current layout variant (equals to %s if %v is empty)
  %C  layout count
  %N  layout names (one per line)
  %S  layout symbols (one per line)
  %V  layout variants (one per line)
  %E  layout variants (one per line; layout symbol is used if variant is empty)
  %%  a literal '%'

Examples:
  xkblayout-state print \"Current layout: %s(%e)\"
  xkblayout-state set 1
  xkblayout-state set +1";

#[derive(Debug, Parser)]
#[command(version, about, after_help = DIRECTIVES)]
struct Cli {
    /// Log level.
    #[arg(short, long, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,

    /// X display to connect to. Defaults to $DISPLAY.
    #[arg(short, long)]
    display: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, clap::Subcommand)]
enum Cmd {
    /// Print the format string with directives substituted.
    Print {
        #[arg(allow_hyphen_values = true)]
        format: String,
    },

    /// Set the current layout, by number starting from 0. Relative (+1, -1)
    /// when preceded with a plus or minus sign.
    Set {
        #[arg(allow_hyphen_values = true)]
        group: String,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            eprintln!("\n{}", Cli::command().render_help());
            return ExitCode::FAILURE;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
    };
    if let Err(err) = logger::init(cli.log_level) {
        eprintln!("Failed to initialize logger: {:?}", err);
        return ExitCode::FAILURE;
    }
    tracing::debug!("cli: {:#?}", &cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let x11 = X11::init(cli.display.as_deref())?;
    let mut keyboard = Keyboard::new(x11)?;
    match &cli.cmd {
        Cmd::Print { format: template } => {
            let out = format::render(keyboard.state(), template)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            stdout.flush()?;
        }
        Cmd::Set { group } => keyboard.set_group(group)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Parser};

    use super::{Cli, Cmd};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(
            std::iter::once("xkblayout-state").chain(args.iter().copied()),
        )
    }

    #[test]
    fn print_takes_any_template() {
        for template in ["%s(%e)", "-%s-", "-", "%%", ""] {
            match parse(&["print", template]).unwrap().cmd {
                Cmd::Print { format } => assert_eq!(template, format),
                cmd => panic!("unexpected command: {:?}", cmd),
            }
        }
    }

    #[test]
    fn set_takes_signed_group() {
        for group in ["1", "+1", "-1"] {
            match parse(&["set", group]).unwrap().cmd {
                Cmd::Set { group: g } => assert_eq!(group, g),
                cmd => panic!("unexpected command: {:?}", cmd),
            }
        }
    }

    #[test]
    fn options_before_command() {
        let cli =
            parse(&["--display", ":1", "-l", "debug", "print", "%s"]).unwrap();
        assert_eq!(Some(":1"), cli.display.as_deref());
        assert_eq!(tracing::Level::DEBUG, cli.log_level);
    }

    #[test]
    fn other_shapes_are_usage_errors() {
        for args in [
            &[][..],
            &["print"][..],
            &["set"][..],
            &["print", "%s", "extra"][..],
            &["set", "1", "2"][..],
            &["toggle", "1"][..],
        ] {
            let err = parse(args).unwrap_err();
            assert!(err.use_stderr(), "{:?}", args);
            assert_ne!(ErrorKind::DisplayHelp, err.kind(), "{:?}", args);
        }
    }
}
