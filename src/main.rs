use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};

use usacloud_update::{Config, Driver, Error, Language, Mode};

fn main() {
    env_logger::init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("usacloud-update: {err}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    input: String,
    output: String,
    config: Config,
}

fn run(cli: CliConfig) -> Result<i32, Error> {
    let mut input: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&cli.input).map_err(Error::Input)?))
    };
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(&cli.output).map_err(Error::Output)?))
    };
    let mut stats_out = io::stderr();

    let mut driver = Driver::new(cli.config);
    let code = driver.drive(&mut input, &mut output, &mut stats_out)?;
    output.flush().map_err(Error::Output)?;
    Ok(code)
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input = "-".to_string();
    let mut output = "-".to_string();
    let mut config = config_from_env();
    let mut validate_only = false;
    let mut strict = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("usacloud-update {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--in" => {
                input = args.next().ok_or_else(|| "error: --in expects a value".to_string())?;
            }
            "--out" => {
                output = args.next().ok_or_else(|| "error: --out expects a value".to_string())?;
            }
            "--stats" => config.stats = true,
            "--no-stats" => config.stats = false,
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--validate-only" => validate_only = true,
            "--strict-validation" => strict = true,
            "--performance" => config.performance = true,
            "--language" => {
                let value =
                    args.next().ok_or_else(|| "error: --language expects a value".to_string())?;
                config.language = parse_language(&value)?;
            }
            _ if arg.starts_with("--in=") => {
                input = arg.trim_start_matches("--in=").to_string();
            }
            _ if arg.starts_with("--out=") => {
                output = arg.trim_start_matches("--out=").to_string();
            }
            _ if arg.starts_with("--language=") => {
                config.language = parse_language(arg.trim_start_matches("--language="))?;
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    config.mode = if validate_only {
        Mode::ValidateOnly
    } else if strict || config.mode == Mode::Strict {
        Mode::Strict
    } else {
        Mode::Transform
    };

    Ok(CliConfig { input, output, config })
}

/// Defaults, then environment overrides. CLI flags are applied on top by
/// `parse_args`.
fn config_from_env() -> Config {
    let mut config = Config { color: io::stderr().is_terminal(), ..Config::default() };

    if let Ok(value) = std::env::var("USACLOUD_UPDATE_COLOR") {
        config.color = truthy(&value);
    }
    if let Ok(value) = std::env::var("USACLOUD_UPDATE_LANGUAGE") {
        if let Ok(lang) = value.parse::<Language>() {
            config.language = lang;
        }
    }
    if let Ok(value) = std::env::var("USACLOUD_UPDATE_STRICT_MODE") {
        if truthy(&value) {
            config.mode = Mode::Strict;
        }
    }

    config
}

fn truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse::<Language>().map_err(|err| format!("error: {err}"))
}

fn help_text() -> String {
    format!(
        "usacloud-update {version}

Rewrites scripts using usacloud v0/v1.0 syntax so they run against v1.1,
and validates every invocation against the known command set.

Usage:
  usacloud-update [OPTIONS]
  usacloud-update --in script.sh --out script-v1.sh

Options:
  --in <path>            Input file, or '-' for stdin (default).
  --out <path>           Output file, or '-' for stdout (default).
  --stats / --no-stats   Emit change rows and findings to stderr (default on).
  --validate-only        Report findings without rewriting anything.
  --strict-validation    Stop at the first line with a validation error.
  --performance          Cache results for repeated identical lines.
  --color / --no-color   ANSI color in findings (default: on for terminals).
  --language <ja|en>     Message language (default ja).
  -h, --help             Show this help message.
  -V, --version          Print version information.

Environment:
  USACLOUD_UPDATE_COLOR        Override color (1/0).
  USACLOUD_UPDATE_LANGUAGE     Override language (ja/en).
  USACLOUD_UPDATE_STRICT_MODE  Enable strict validation (1/0).

Exit codes:
  0  Success.
  1  Validation errors (strict or validate-only), or an I/O error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
