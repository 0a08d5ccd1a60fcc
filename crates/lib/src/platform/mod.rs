pub mod arch;
pub mod os;
pub mod tag;

use arch::Arch;
use os::Os;
use std::fmt;

use crate::consts::DEFAULT_MACOS_TARGET;

pub use tag::{has_plat_name, inject_plat_name, normalize_tag, resolve_platform_tag};

/// Platform combining architecture and OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  pub fn current() -> Self {
    Self {
      arch: Arch::current(),
      os: Os::current(),
    }
  }

  /// Machine name as reported by the host OS (e.g. `x86_64`, `arm64`, `AMD64`)
  pub fn machine(&self) -> &'static str {
    self.arch.machine(self.os)
  }

  /// Packaging platform identifier, e.g. `linux-x86_64`,
  /// `macosx-10.9-x86_64`, `win-amd64` or `freebsd-riscv64`.
  ///
  /// `macos_target` is the deployment target embedded in macOS identifiers.
  pub fn identifier(&self, macos_target: &str) -> String {
    match self.os {
      Os::Linux | Os::Other(_) => format!("{}-{}", self.os, self.machine()),
      Os::MacOs => format!("{}-{}-{}", self.os, macos_target, self.machine()),
      Os::Windows => match self.arch {
        Arch::X86 => "win32".to_string(),
        Arch::X86_64 => "win-amd64".to_string(),
        Arch::Aarch64 => "win-arm64".to_string(),
        Arch::Arm => "win-arm32".to_string(),
        Arch::Other(name) => format!("win-{}", name),
      },
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.arch, self.os)
  }
}

/// The host as seen by wheel tagging: raw platform identifier plus machine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
  pub identifier: String,
  pub machine: String,
}

impl HostPlatform {
  pub fn new(identifier: impl Into<String>, machine: impl Into<String>) -> Self {
    Self {
      identifier: identifier.into(),
      machine: machine.into(),
    }
  }

  /// Detect the host platform, honouring `MACOSX_DEPLOYMENT_TARGET`.
  pub fn detect() -> Self {
    let platform = Platform::current();
    let macos_target =
      std::env::var("MACOSX_DEPLOYMENT_TARGET").unwrap_or_else(|_| DEFAULT_MACOS_TARGET.to_string());
    Self {
      identifier: platform.identifier(&macos_target),
      machine: platform.machine().to_string(),
    }
  }

  /// Wheel platform tag for this host.
  pub fn wheel_tag(&self) -> String {
    resolve_platform_tag(&self.identifier, &self.machine)
  }
}
