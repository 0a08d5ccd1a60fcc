use std::path::Path;

use anyhow::{Context, Result};

use tcgpack_lib::config::ProjectConfig;
use tcgpack_lib::consts::{APP_NAME, CONFIG_FILE};
use tcgpack_lib::lifecycle::Capabilities;
use tcgpack_lib::platform::HostPlatform;

use crate::output::{print_info, print_stat, print_warning};

pub fn cmd_info(root: &Path) -> Result<()> {
  let config = ProjectConfig::load(root).context("Failed to load project configuration")?;
  let capabilities = Capabilities::detect(&config);

  print_info(&format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")));
  print_stat("Project", &config.root.display().to_string());
  let config_state = if config.root.join(CONFIG_FILE).is_file() {
    CONFIG_FILE
  } else {
    "defaults"
  };
  print_stat("Config", config_state);
  print_stat("Native", &config.native_root().display().to_string());

  let host = HostPlatform::detect();
  print_stat("Platform", &host.identifier);
  print_stat("Machine", &host.machine);
  print_stat("Wheel tag", &host.wheel_tag());

  let hooks: Vec<_> = capabilities.hooks().iter().map(|hook| hook.as_str()).collect();
  print_stat("Hooks", &hooks.join(", "));
  if !capabilities.develop {
    print_warning("Proper 'develop' support unavailable.");
  }

  Ok(())
}
