use sysinfo::System;

/// Operating system and CPU architecture of the host.
#[derive(Clone, Debug)]
pub(crate) struct SystemInfo {
  name: Option<String>,
  version: Option<String>,
  kernel: Option<String>,
  arch: String,
}

impl SystemInfo {
  pub(crate) fn collect() -> Self {
    Self {
      name: System::name(),
      version: System::os_version(),
      kernel: System::kernel_version(),
      arch: System::cpu_arch(),
    }
  }

  pub(crate) fn name(&self) -> &str {
    self.name.as_deref().unwrap_or("unknown")
  }

  pub(crate) fn version(&self) -> &str {
    self.version.as_deref().unwrap_or("unknown")
  }

  pub(crate) fn kernel(&self) -> &str {
    self.kernel.as_deref().unwrap_or("unknown")
  }

  pub(crate) fn arch(&self) -> &str {
    &self.arch
  }
}
