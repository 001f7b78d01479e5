use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mockgen::{MockConfig, MockStyle, MockgenError};
use rustc_hash::FxHashSet;

/// Generate Google Mock classes from a C++ header.
#[derive(Debug, Parser)]
#[command(name = "mockgen", version, about)]
struct Cli {
    /// Header file to read
    header: PathBuf,

    /// Classes to mock; every class defined in the header when omitted
    class_names: Vec<String>,

    /// Mock macro family to emit
    #[arg(long, value_enum, default_value_t = MockStyle::Legacy)]
    style: MockStyle,

    /// Also print the parse problems that were recovered from
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    match run(&cli) {
        Ok(code) => code,
        Err(MockgenError::Parse {
            path,
            errors,
            contents,
        }) => {
            eprintln!("unable to parse {}", path.display());
            for error in errors.errors() {
                eprintln!("{}", error.display_with_source(&contents));
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, MockgenError> {
    let config = match MockConfig::new(cli.style).with_indent_from_env() {
        Ok(config) => config,
        Err((config, err)) => {
            eprintln!("{}", err);
            config
        }
    };

    let desired: Option<FxHashSet<String>> =
        (!cli.class_names.is_empty()).then(|| cli.class_names.iter().cloned().collect());

    let (source, generated) = mockgen::generate_file(&cli.header, desired.as_ref(), &config)?;

    if cli.verbose {
        for diagnostic in &generated.diagnostics {
            eprintln!("{}", diagnostic.display_with_source(&source));
        }
    }
    for warning in generated.output.warnings(&cli.header.display().to_string()) {
        eprintln!("{}", warning);
    }

    let text = generated.output.render();
    if !text.is_empty() {
        print!("{}", text);
    }

    let nothing_requested_found = desired.is_some() && generated.output.emitted == 0;
    Ok(if nothing_requested_found {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
