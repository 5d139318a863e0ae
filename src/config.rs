use crate::runtime::environment::InitPolicy;
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
usage: barebones [options] [initializers...] program-file
options:
  -u            report uninitialized variables
  -O            optimize
  -h, --help    show this message
initializers:
  var=value     e.g. X=37";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized option `{0}`")]
    UnknownOption(String),
    #[error("only one program may be specified (got `{first}` and `{second}`)")]
    MultiplePrograms { first: String, second: String },
    #[error("no program file given")]
    MissingProgram,
    #[error("`{0}` is not a valid variable name")]
    InvalidName(String),
    #[error("can't interpret `{value}` as an integer for `{name}`")]
    InvalidInteger { name: String, value: String },
    #[error("negative values are not permitted (`{name}={value}`)")]
    NegativeValue { name: String, value: String },
}

/// A `NAME=VALUE` pre-seed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Initializer {
    pub name: String,
    pub value: u64,
}

impl Initializer {
    pub fn parse(arg: &str) -> Result<Self, ConfigError> {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidName(arg.to_string()))?;
        if !is_identifier(name) {
            return Err(ConfigError::InvalidName(name.to_string()));
        }
        let value = parse_unsigned(value).map_err(|kind| match kind {
            IntegerError::Negative => ConfigError::NegativeValue {
                name: name.to_string(),
                value: value.to_string(),
            },
            IntegerError::Malformed => ConfigError::InvalidInteger {
                name: name.to_string(),
                value: value.to_string(),
            },
        })?;
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub program: PathBuf,
    pub policy: InitPolicy,
    pub optimize: bool,
    pub initializers: Vec<Initializer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(RunConfig),
    Help,
}

impl Command {
    /// Reads the arguments after the program name. Every argument is
    /// examined before anything runs, so option order does not matter.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = InitPolicy::EagerZero;
        let mut optimize = false;
        let mut initializers = Vec::new();
        let mut program: Option<String> = None;

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => return Ok(Command::Help),
                "-u" => policy = InitPolicy::RequireExplicitInit,
                "-O" => optimize = true,
                _ if arg.starts_with('-') => {
                    return Err(ConfigError::UnknownOption(arg.to_string()));
                }
                _ if arg.contains('=') => initializers.push(Initializer::parse(arg)?),
                _ => {
                    if let Some(first) = program.take() {
                        return Err(ConfigError::MultiplePrograms {
                            first,
                            second: arg.to_string(),
                        });
                    }
                    program = Some(arg.to_string());
                }
            }
        }

        let program = program.ok_or(ConfigError::MissingProgram)?;
        Ok(Command::Run(RunConfig {
            program: PathBuf::from(program),
            policy,
            optimize,
            initializers,
        }))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum IntegerError {
    Negative,
    Malformed,
}

/// Integer literal in C `%i` form: optional sign, then decimal, `0x` hex,
/// or leading-zero octal. The whole string must be consumed.
fn parse_unsigned(text: &str) -> Result<u64, IntegerError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return Err(IntegerError::Malformed);
    }
    let value = u64::from_str_radix(digits, radix).map_err(|_| IntegerError::Malformed)?;
    if negative && value != 0 {
        return Err(IntegerError::Negative);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_config(args: &[&str]) -> RunConfig {
        match Command::from_args(args).expect("arguments should be accepted") {
            Command::Run(config) => config,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults() {
        let config = run_config(&["prog.bb"]);
        assert_eq!(
            config,
            RunConfig {
                program: PathBuf::from("prog.bb"),
                policy: InitPolicy::EagerZero,
                optimize: false,
                initializers: Vec::new(),
            }
        );
    }

    #[test]
    fn flags_and_initializers_in_any_order() {
        let config = run_config(&["X=5", "prog.bb", "-O", "y=0x10", "-u"]);
        assert_eq!(config.policy, InitPolicy::RequireExplicitInit);
        assert!(config.optimize);
        assert_eq!(
            config.initializers,
            vec![
                Initializer {
                    name: "X".into(),
                    value: 5,
                },
                Initializer {
                    name: "y".into(),
                    value: 16,
                },
            ]
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(Command::from_args(["-u", "--help"]), Ok(Command::Help));
        assert_eq!(Command::from_args(["-h"]), Ok(Command::Help));
    }

    #[test]
    fn rejects_unknown_options() {
        assert_eq!(
            Command::from_args(["-x", "prog.bb"]),
            Err(ConfigError::UnknownOption("-x".into()))
        );
    }

    #[test]
    fn requires_exactly_one_program() {
        assert_eq!(
            Command::from_args(["X=1"]),
            Err(ConfigError::MissingProgram)
        );
        assert_eq!(
            Command::from_args(["a.bb", "b.bb"]),
            Err(ConfigError::MultiplePrograms {
                first: "a.bb".into(),
                second: "b.bb".into(),
            })
        );
    }

    #[test]
    fn integer_forms() {
        assert_eq!(parse_unsigned("37"), Ok(37));
        assert_eq!(parse_unsigned("+37"), Ok(37));
        assert_eq!(parse_unsigned("0"), Ok(0));
        assert_eq!(parse_unsigned("-0"), Ok(0));
        assert_eq!(parse_unsigned("0x1F"), Ok(31));
        assert_eq!(parse_unsigned("0X1f"), Ok(31));
        assert_eq!(parse_unsigned("017"), Ok(15));
        assert_eq!(parse_unsigned("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn malformed_integers() {
        for text in ["", "-", "abc", "12abc", "0x", "09", "1.5", " 3", "18446744073709551616"] {
            assert_eq!(parse_unsigned(text), Err(IntegerError::Malformed), "{text:?}");
        }
    }

    #[test]
    fn negative_initializer_is_rejected() {
        assert_eq!(
            Initializer::parse("X=-3"),
            Err(ConfigError::NegativeValue {
                name: "X".into(),
                value: "-3".into(),
            })
        );
    }

    #[test]
    fn initializer_name_must_be_an_identifier() {
        assert_eq!(
            Initializer::parse("=4"),
            Err(ConfigError::InvalidName(String::new()))
        );
        assert_eq!(
            Initializer::parse("9lives=4"),
            Err(ConfigError::InvalidName("9lives".into()))
        );
    }

    #[test]
    fn initializer_value_must_be_an_integer() {
        assert_eq!(
            Initializer::parse("X=ten"),
            Err(ConfigError::InvalidInteger {
                name: "X".into(),
                value: "ten".into(),
            })
        );
    }
}
