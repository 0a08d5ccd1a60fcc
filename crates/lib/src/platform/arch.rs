use std::fmt;

use super::os::Os;

/// CPU architecture of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  X86,
  Arm,
  /// Any other architecture, carrying the runtime's name for it (`riscv64`,
  /// `powerpc64`, `s390x`, ...).
  Other(&'static str),
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Self {
    Self::from_name(std::env::consts::ARCH)
  }

  /// Map a runtime architecture name onto a variant.
  pub fn from_name(name: &'static str) -> Self {
    match name {
      "x86_64" => Self::X86_64,
      "aarch64" => Self::Aarch64,
      "x86" => Self::X86,
      "arm" => Self::Arm,
      other => Self::Other(other),
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::X86 => "x86",
      Self::Arm => "arm",
      Self::Other(name) => *name,
    }
  }

  /// Machine name as the host OS reports it (`uname -m` on Unix, the processor
  /// architecture on Windows). This is what wheel tags are built from.
  pub fn machine(&self, os: Os) -> &'static str {
    match (os, self) {
      (Os::MacOs, Self::Aarch64) => "arm64",
      (Os::Windows, Self::X86_64) => "AMD64",
      (Os::Windows, Self::Aarch64) => "ARM64",
      (_, Self::X86) => "i686",
      (_, Self::Arm) => "armv7l",
      (_, Self::Other("powerpc64")) if cfg!(target_endian = "little") => "ppc64le",
      (_, Self::Other("powerpc64")) => "ppc64",
      (_, Self::Other("powerpc")) => "ppc",
      (_, arch) => arch.as_str(),
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
