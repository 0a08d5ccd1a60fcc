/// Application name, used in log targets and user-facing messages.
pub const APP_NAME: &str = "tcgpack";

/// Project configuration file, looked up at the project root.
pub const CONFIG_FILE: &str = "tcgpack.toml";

/// Environment variable selecting the project root when `--project` is not given.
pub const PROJECT_ENV: &str = "TCGPACK_PROJECT";

/// Value forced onto every build-control flag by the environment overlay.
pub const FLAG_ENABLED: &str = "1";

/// Compatibility baseline for Linux wheels.
pub const MANYLINUX_PREFIX: &str = "manylinux1_";

/// Backend flag carrying an explicit wheel platform tag.
pub const PLAT_NAME_FLAG: &str = "--plat-name";

/// macOS deployment target assumed when `MACOSX_DEPLOYMENT_TARGET` is unset.
pub const DEFAULT_MACOS_TARGET: &str = "10.9";
