use kyatto::{Ass, AssTimestamp, SubtitleFormat};

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Inspect and do arithmetic on ASS subtitle timestamps")]
struct Cli {
    #[arg(short, long, global = true, help = "Log what is being parsed and computed.")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print a timestamp in canonical H:MM:SS.CC form")]
    Format {
        #[arg(value_name = "TIMESTAMP")]
        timestamp: String,
    },
    #[command(about = "Print the number of centiseconds in a timestamp")]
    Duration {
        #[arg(value_name = "TIMESTAMP")]
        timestamp: String,
    },
    #[command(about = "Print the timestamp for a number of centiseconds")]
    FromDuration {
        #[arg(value_name = "CENTISECONDS")]
        centiseconds: u64,
    },
    #[command(about = "Add two timestamps")]
    Add {
        #[arg(value_name = "TIMESTAMP")]
        lhs: String,
        #[arg(value_name = "TIMESTAMP")]
        rhs: String,
    },
    #[command(about = "Subtract the second timestamp from the first")]
    Sub {
        #[arg(value_name = "TIMESTAMP")]
        lhs: String,
        #[arg(value_name = "TIMESTAMP")]
        rhs: String,
    },
    #[command(about = "Divide a timestamp by another timestamp or by a number")]
    Div {
        #[arg(value_name = "TIMESTAMP")]
        lhs: String,
        #[arg(
            value_name = "DIVISOR",
            help = "A timestamp if it contains ':' or '.', otherwise a plain number."
        )]
        divisor: String,
    },
    #[command(about = "Describe the supported subtitle format")]
    Info,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn timestamp(input: &str) -> Result<AssTimestamp> {
    AssTimestamp::from_string(input).context(format!("Failed to parse timestamp: '{}'", input))
}

fn run(command: Command) -> Result<String> {
    let output = match command {
        Command::Format { timestamp: input } => {
            let ts = timestamp(&input)?;
            AssTimestamp::from_duration(ts.duration()).formatted_string()
        }
        Command::Duration { timestamp: input } => timestamp(&input)?.duration().to_string(),
        Command::FromDuration { centiseconds } => {
            AssTimestamp::from_duration(centiseconds).formatted_string()
        }
        Command::Add { lhs, rhs } => {
            let mut ts = timestamp(&lhs)?;
            ts.add_timestamp(timestamp(&rhs)?)
                .context(format!("Failed to add '{}' to '{}'", rhs, lhs))?;
            ts.formatted_string()
        }
        Command::Sub { lhs, rhs } => {
            let mut ts = timestamp(&lhs)?;
            ts.subtract_timestamp(timestamp(&rhs)?)
                .context(format!("Failed to subtract '{}' from '{}'", rhs, lhs))?;
            ts.formatted_string()
        }
        Command::Div { lhs, divisor } => {
            let mut ts = timestamp(&lhs)?;
            let divided = if divisor.contains(|c: char| c == ':' || c == '.') {
                debug!("Dividing '{}' by timestamp '{}'", lhs, divisor);
                ts.divide_by_timestamp(timestamp(&divisor)?)
            } else {
                debug!("Dividing '{}' by number '{}'", lhs, divisor);
                let value: u64 = divisor
                    .parse()
                    .context(format!("Failed to parse divisor: '{}'", divisor))?;
                ts.divide_by_number(value)
            };
            divided.context(format!("Failed to divide '{}' by '{}'", lhs, divisor))?;
            ts.formatted_string()
        }
        Command::Info => {
            let format = Ass;
            format!(
                "{} ({}), extension .{}",
                format.name(),
                format.version(),
                format.extension()
            )
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args.iter().copied()).expect("Failed to parse arguments");
        run(cli.command)
    }

    macro_rules! test_run {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (args, expected): (&[&str], &str) = $value;

                assert_eq!(run_args(args).unwrap(), expected);
            }
        )*
        }
    }

    test_run! {
        test_run_format: (&["kyatto", "format", "0:75:00.150"], "1:15:01.50"),
        test_run_duration: (&["kyatto", "duration", "1:30:00.00"], "540000"),
        test_run_from_duration: (&["kyatto", "from-duration", "810000"], "2:15:00.00"),
        test_run_add: (&["kyatto", "add", "1:30:00.00", "0:45:00.00"], "2:15:00.00"),
        test_run_sub: (&["kyatto", "sub", "1:00:00.00", "0:00:00.01"], "0:59:59.99"),
        test_run_div_number: (&["kyatto", "div", "1:00:00.00", "4"], "0:15:00.00"),
        test_run_div_timestamp: (&["kyatto", "div", "1:00:00.00", "0:00:01.00"], "0:00:36.00"),
        test_run_info: (&["kyatto", "info"], "Advanced SubStation Alpha (v4.00+), extension .ass"),
        test_run_verbose: (&["kyatto", "-v", "duration", "0:00:01.00"], "100"),
    }

    #[test]
    fn test_run_reports_bad_timestamp() {
        let err = run_args(&["kyatto", "duration", "1:2:3"]).unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse timestamp: '1:2:3'");
        assert!(err.chain().nth(1).unwrap().to_string().contains("found 3"));
    }

    #[test]
    fn test_run_reports_oversized_timestamp() {
        let err = run_args(&["kyatto", "duration", "60000000000000:00:00.00"]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to parse timestamp: '60000000000000:00:00.00'"
        );
        assert!(err
            .chain()
            .nth(1)
            .unwrap()
            .to_string()
            .contains("too long to count"));
    }

    #[test]
    fn test_run_reports_underflow() {
        let err = run_args(&["kyatto", "sub", "0:00:01.00", "0:00:02.00"]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to subtract"));
    }

    #[test]
    fn test_run_reports_division_by_zero() {
        let err = run_args(&["kyatto", "div", "0:00:01.00", "0"]).unwrap_err();
        assert_eq!(
            err.chain().nth(1).unwrap().to_string(),
            "Attempted to divide by zero"
        );
    }

    #[test]
    fn test_run_reports_bad_divisor() {
        let err = run_args(&["kyatto", "div", "0:00:01.00", "two"]).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse divisor: 'two'");
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["kyatto"]).is_err());
    }
}
