use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use nu_ansi_term::Color;
use preflight_php::config::ConfigTable;
use preflight_php::config::DatabaseSettings;
use preflight_php::error::ConfigError;
use preflight_php::version::VersionProbe;
use tracing::debug;
use tracing::error;

use crate::check::database;
use crate::check::git::GitCheck;
use crate::check::system::SystemInfo;
use crate::cli::Executable;

const RULE: &str = "-------------------";

/// Binaries whose `--version` is reported, with the environment variable overriding each path.
const PROBES: [(&str, &str, &str); 2] = [("PHP", "php", "PHP"), ("MySQL", "mysql", "MYSQL")];

/// One diagnostic run over a phpIPAM installation.
///
/// Every section prints what it could determine and logs what it couldn't; a failing section
/// never stops the ones after it.
pub struct Report {
  root: PathBuf,
  config: PathBuf,
}

impl Report {
  pub fn new(root: PathBuf, config: PathBuf) -> Self {
    Self { root, config }
  }

  pub async fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
    writeln!(
      out,
      "{}\n{RULE}",
      Color::Cyan.bold().paint(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
    )?;
    self.git(out)?;
    Self::system(out)?;
    Self::binaries(out)?;
    self.database(out).await?;
    writeln!(out, "{RULE}\nCheck finished.")
  }

  fn git<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
    debug!("Current folder: {}", self.root.display());
    let git = match GitCheck::open(&self.root) {
      Ok(git) => git,
      Err(err) => {
        debug!("{err}");
        return writeln!(out, "Not git tracked folder");
      }
    };

    match git.status() {
      Ok(status) => {
        debug!(sha = status.sha(), "Git HEAD");
        writeln!(
          out,
          "Git branch: {}, short-sha: {}, is dirty: {}",
          status.branch().unwrap_or("detached"),
          status.short_sha(),
          status.is_dirty()
        )?;
      }
      Err(err) => error!("{err}"),
    }
    match git.submodules() {
      Ok(modules) => {
        debug!(?modules, "Git modules");
        writeln!(out, "Git modules installed fine.")?;
      }
      Err(err) => error!("Git modules error. {err}"),
    }

    Ok(())
  }

  fn system<W: Write>(out: &mut W) -> std::io::Result<()> {
    let info = SystemInfo::collect();
    writeln!(out, "OS: {}, version: {}, kernel: {}", info.name(), info.version(), info.kernel())?;
    writeln!(out, "System arch: {}", info.arch())
  }

  fn binaries<W: Write>(out: &mut W) -> std::io::Result<()> {
    for (label, name, env_name) in PROBES {
      match VersionProbe::locate(name, env_name).and_then(|probe| probe.run()) {
        Ok(version) => writeln!(out, "{label}: {version}")?,
        Err(err) => {
          error!("{err}");
          writeln!(out, "{label}: unavailable")?;
        }
      }
    }

    Ok(())
  }

  async fn database<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
    let path = self.root.join(&self.config);
    if !path.is_file() {
      // Without a config there are no credentials to try.
      error!("No config file {}", self.config.display());
      return Ok(());
    }
    writeln!(out, "Config file {} exist", self.config.display())?;

    let settings = match Self::settings(&path) {
      Ok(settings) => settings,
      Err(err) => {
        error!("{err}");
        return Ok(());
      }
    };
    debug!(?settings);

    match database::schema_version(&settings).await {
      Ok(schema) => writeln!(out, "DB Version: {}, Schema version: {}", schema.version(), schema.dbversion()),
      Err(err) => {
        error!("{err}");
        Ok(())
      }
    }
  }

  fn settings(path: &Path) -> Result<DatabaseSettings, ConfigError> {
    DatabaseSettings::from_table(&ConfigTable::parse(path)?)
  }
}

impl Executable for Report {
  async fn execute(self) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    self.write_to(&mut handle).await?;

    Ok(())
  }
}
