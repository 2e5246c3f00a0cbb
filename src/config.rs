//! Command-line and environment configuration.

use std::path::PathBuf;

use crate::address_space::parse_address;
use crate::error::{HexitchError, Result};
use crate::view_mode::ModeKind;

/// Environment variable naming the log file. Logging is off without it.
pub const LOG_ENV: &str = "HEXITCH_LOG";

pub const USAGE: &str = "\
usage: hexitch [options] FILE

options:
  -c, --code         start in code (disassembly) view
  -s, --start ADDR   initial cursor address (hex; #N for decimal)
  -b, --bits N       decoder bitness: 16, 32 or 64 (default 64)
  -h, --help         show this message
  -V, --version      show the version

environment:
  HEXITCH_LOG=PATH   append logs to PATH (filter with RUST_LOG)";

const DEFAULT_BITNESS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub mode: ModeKind,
    pub start: u64,
    pub bitness: u32,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    View(Config),
    Help,
    Version,
}

/// Parses `args`, program name included.
pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: Iterator<Item = String>,
{
    let mut path = None;
    let mut mode = ModeKind::Hex;
    let mut start = 0;
    let mut bitness = DEFAULT_BITNESS;

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-V" | "--version" => return Ok(Invocation::Version),
            "-c" | "--code" => mode = ModeKind::Code,
            "-s" | "--start" => {
                let value = value_for(&arg, args.next())?;
                start = parse_address(&value)?;
            }
            "-b" | "--bits" => {
                let value = value_for(&arg, args.next())?;
                bitness = match value.parse::<u32>() {
                    Ok(bits @ (16 | 32 | 64)) => bits,
                    Ok(bits) => return Err(HexitchError::UnsupportedBitness(bits)),
                    Err(_) => {
                        return Err(HexitchError::Usage(format!(
                            "{} expects a number, got {:?}",
                            arg, value
                        )))
                    }
                };
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(HexitchError::Usage(format!("unknown option {}", flag)));
            }
            _ if path.is_some() => {
                return Err(HexitchError::Usage(format!("unexpected argument {}", arg)));
            }
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let path = path.ok_or_else(|| HexitchError::Usage("missing FILE".to_string()))?;
    Ok(Invocation::View(Config {
        path,
        mode,
        start,
        bitness,
    }))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| HexitchError::Usage(format!("{} needs a value", flag)))
}

/// Log file requested through [`LOG_ENV`], if any.
pub fn log_path() -> Option<PathBuf> {
    std::env::var_os(LOG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation> {
        let args: Vec<String> = std::iter::once("hexitch")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    fn config(args: &[&str]) -> Config {
        match parse(args).unwrap() {
            Invocation::View(config) => config,
            other => panic!("expected a view, got {:?}", other),
        }
    }

    #[test]
    fn defaults() {
        let parsed = config(&["a.bin"]);
        assert_eq!(parsed.path, PathBuf::from("a.bin"));
        assert_eq!(parsed.mode, ModeKind::Hex);
        assert_eq!(parsed.start, 0);
        assert_eq!(parsed.bitness, 64);
    }

    #[test]
    fn all_options() {
        let parsed = config(&["--code", "-s", "0x400", "--bits", "32", "fw.img"]);
        assert_eq!(parsed.mode, ModeKind::Code);
        assert_eq!(parsed.start, 0x400);
        assert_eq!(parsed.bitness, 32);
        assert_eq!(parsed.path, PathBuf::from("fw.img"));

        assert_eq!(config(&["x", "--start", "#100"]).start, 100);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Invocation::Help);
        assert_eq!(parse(&["a.bin", "-V"]).unwrap(), Invocation::Version);
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse(&[]), Err(HexitchError::Usage(_))));
        assert!(matches!(parse(&["a", "b"]), Err(HexitchError::Usage(_))));
        assert!(matches!(parse(&["--frob", "a"]), Err(HexitchError::Usage(_))));
        assert!(matches!(parse(&["a", "--start"]), Err(HexitchError::Usage(_))));
        assert!(matches!(
            parse(&["a", "--start", "xyz"]),
            Err(HexitchError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse(&["a", "-b", "8"]),
            Err(HexitchError::UnsupportedBitness(8))
        ));
        assert!(matches!(parse(&["a", "-b", "lots"]), Err(HexitchError::Usage(_))));
    }

    #[test]
    fn dash_alone_is_a_path() {
        assert_eq!(config(&["-"]).path, PathBuf::from("-"));
    }
}
