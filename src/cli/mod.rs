mod report;

use std::path::PathBuf;

use clap_verbosity_flag::ErrorLevel;
use clap_verbosity_flag::Verbosity;

use crate::cli::report::Report;

pub trait Executable {
  async fn execute(self) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, clap::Parser)]
#[command(version, about, author)]
pub struct Cli {
  /// phpIPAM installation directory
  #[arg(
    default_value_os_t = std::env::current_dir().unwrap_or(PathBuf::from(".")),
    value_parser = parse_root,
  )]
  root: PathBuf,
  /// Application config file, relative to ROOT
  #[arg(short, long, env = "PREFLIGHT_CONFIG", default_value = "config.php")]
  config: PathBuf,
  #[command(flatten)]
  verbosity: Verbosity<ErrorLevel>,
}

impl Cli {
  pub(crate) fn verbosity(&self) -> Verbosity<ErrorLevel> {
    self.verbosity
  }
}

impl Executable for Cli {
  async fn execute(self) -> anyhow::Result<()> {
    Report::new(self.root, self.config).execute().await
  }
}

fn parse_root(arg: &str) -> Result<PathBuf, std::io::Error> {
  PathBuf::from(arg).canonicalize().and_then(|root| {
    if !root.is_dir() {
      return Err(std::io::Error::from(std::io::ErrorKind::NotADirectory));
    }
    Ok(root)
  })
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::Parser;
  use clap_verbosity_flag::Verbosity;
  use clap_verbosity_flag::VerbosityFilter;
  use proptest::prelude::*;
  use rstest::rstest;

  use crate::cli::Cli;
  use crate::cli::parse_root;

  proptest! {
    #[test]
    fn test_verbosity(root: PathBuf, config: PathBuf, verbose in 0..=4u8, quiet in 0..=1u8) {
      let cli = Cli { root, config, verbosity: Verbosity::new(verbose, quiet) };

      let expected = match (verbose as i16) - (quiet as i16) {
        -1 => VerbosityFilter::Off,
        0 => VerbosityFilter::Error,
        1 => VerbosityFilter::Warn,
        2 => VerbosityFilter::Info,
        3 => VerbosityFilter::Debug,
        4 => VerbosityFilter::Trace,
        _ => unreachable!(),
      };
      prop_assert_eq!(cli.verbosity().filter(), expected);
    }
  }

  #[test]
  fn test_defaults() {
    let cli = Cli::try_parse_from(["preflight"]).unwrap();
    assert_eq!(cli.root, std::env::current_dir().unwrap().canonicalize().unwrap());
    assert_eq!(cli.config, PathBuf::from("config.php"));
    assert_eq!(cli.verbosity().filter(), VerbosityFilter::Error);
  }

  #[test]
  fn test_arguments() {
    let cli = Cli::try_parse_from(["preflight", "tests/fixtures", "--config", "phpipam.php", "-vv"]).unwrap();
    assert!(cli.root.ends_with("tests/fixtures"));
    assert_eq!(cli.config, PathBuf::from("phpipam.php"));
    assert_eq!(cli.verbosity().filter(), VerbosityFilter::Info);
  }

  #[rstest]
  #[case::not_found("./tests/foo", false)]
  #[case::not_a_directory("./tests/fixtures/config.php", false)]
  #[case::directory("tests/fixtures", true)]
  fn test_parse_root(#[case] arg: &str, #[case] ok: bool) {
    assert_eq!(parse_root(arg).is_ok(), ok);
  }
}
