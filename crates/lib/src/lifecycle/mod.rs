//! Packaging lifecycle hooks.
//!
//! Each hook runs a fixed, ordered sequence of [`Stage`]s and then delegates to the
//! standard packaging behaviour ([`PackagingBackend`]). The first failing stage
//! aborts the hook; the backend is only reached when every stage succeeded.
//!
//! | Hook          | Runs first          | Stages                          |
//! |---------------|---------------------|---------------------------------|
//! | `build`       |                     | native build, binding generation |
//! | `develop`     |                     | native build, binding generation |
//! | `sdist`       |                     | artifact cleanup, source curation |
//! | `bdist_egg`   | `build` (in full)   |                                 |
//! | `bdist_wheel` | `build` (in full)   | (adds `--plat-name` when absent) |
//! | `install`     | `build` (in full)   |                                 |
//!
//! `develop` depends on an optional backend extension point; see [`Capabilities`].

mod backend;

pub use backend::{BackendError, CommandBackend, PackagingBackend};

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ProjectConfig;
use crate::execute::ExecuteError;
use crate::platform::{HostPlatform, has_plat_name, inject_plat_name};
use crate::stages::{
  BindingGenerator, CurateError, GenerateError, Stage, build_native, clean_artifacts, curate_sources,
  generate_bindings,
};

/// A packaging command the orchestrator extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
  Build,
  Develop,
  Install,
  Sdist,
  BdistEgg,
  BdistWheel,
}

impl Hook {
  pub const ALL: [Hook; 6] = [
    Hook::Build,
    Hook::Develop,
    Hook::Install,
    Hook::Sdist,
    Hook::BdistEgg,
    Hook::BdistWheel,
  ];

  /// Command name understood by the packaging backend.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Build => "build",
      Self::Develop => "develop",
      Self::Install => "install",
      Self::Sdist => "sdist",
      Self::BdistEgg => "bdist_egg",
      Self::BdistWheel => "bdist_wheel",
    }
  }

  /// Stages this hook runs itself, in order.
  pub fn stages(&self) -> &'static [Stage] {
    match self {
      Self::Build | Self::Develop => &[Stage::NativeBuild, Stage::GenerateBindings],
      Self::Sdist => &[Stage::CleanArtifacts, Stage::CurateSources],
      Self::Install | Self::BdistEgg | Self::BdistWheel => &[],
    }
  }

  /// Hook that must run in full (stages and backend) before this one.
  pub fn prerequisite(&self) -> Option<Hook> {
    match self {
      Self::Install | Self::BdistEgg | Self::BdistWheel => Some(Self::Build),
      Self::Build | Self::Develop | Self::Sdist => None,
    }
  }
}

impl fmt::Display for Hook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Optional extension points detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
  /// The backend supports developer installs.
  pub develop: bool,
}

impl Capabilities {
  pub fn detect(config: &ProjectConfig) -> Self {
    Self {
      develop: config.file.backend.develop,
    }
  }

  pub fn supports(&self, hook: Hook) -> bool {
    match hook {
      Hook::Develop => self.develop,
      _ => true,
    }
  }

  /// Every hook these capabilities allow, in [`Hook::ALL`] order.
  pub fn hooks(&self) -> Vec<Hook> {
    Hook::ALL.into_iter().filter(|hook| self.supports(*hook)).collect()
  }
}

impl Default for Capabilities {
  fn default() -> Self {
    Self { develop: true }
  }
}

/// Errors that abort a lifecycle hook.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Execute(#[from] ExecuteError),

  #[error("binding generation failed: {0}")]
  GenerationFailed(#[from] GenerateError),

  #[error(transparent)]
  Curate(#[from] CurateError),

  #[error("packaging backend failed: {0}")]
  Backend(#[from] BackendError),

  #[error("'{0}' is unavailable: the packaging backend has no developer-install support")]
  HookUnavailable(Hook),

  #[error("unsupported host platform, pass --plat-name explicitly")]
  UnknownPlatform,
}

/// What a successful hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookReport {
  pub hook: Hook,
  /// Stages run, including those of a prerequisite hook.
  pub stages: Vec<Stage>,
  /// Backend invocations in order, with the arguments each received.
  pub delegated: Vec<(Hook, Vec<String>)>,
  pub elapsed: Duration,
}

/// Binds stages and the packaging backend into runnable hooks.
pub struct Lifecycle<G, B> {
  config: ProjectConfig,
  generator: G,
  backend: B,
  capabilities: Capabilities,
  host: Option<HostPlatform>,
}

impl<G: BindingGenerator, B: PackagingBackend> Lifecycle<G, B> {
  /// Create a lifecycle for `config`. Emits a warning when developer installs
  /// are unavailable; the other hooks are unaffected.
  pub fn new(config: ProjectConfig, generator: G, backend: B, capabilities: Capabilities) -> Self {
    if !capabilities.develop {
      warn!("proper 'develop' support unavailable");
    }
    Self {
      config,
      generator,
      backend,
      capabilities,
      host: Some(HostPlatform::detect()),
    }
  }

  /// Override the detected host platform.
  pub fn with_host(mut self, host: HostPlatform) -> Self {
    self.host = Some(host);
    self
  }

  pub fn config(&self) -> &ProjectConfig {
    &self.config
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  /// Hooks this lifecycle offers, given its capabilities.
  pub fn hooks(&self) -> Vec<Hook> {
    self.capabilities.hooks()
  }

  /// Run `hook` with pass-through backend arguments.
  pub async fn run(&self, hook: Hook, args: &[String]) -> Result<HookReport, PipelineError> {
    if !self.capabilities.supports(hook) {
      return Err(PipelineError::HookUnavailable(hook));
    }

    let start = Instant::now();
    let mut report = HookReport {
      hook,
      stages: Vec::new(),
      delegated: Vec::new(),
      elapsed: Duration::ZERO,
    };

    let mut args = args.to_vec();
    if hook == Hook::BdistWheel && !has_plat_name(&args) {
      let host = self.host.as_ref().ok_or(PipelineError::UnknownPlatform)?;
      if inject_plat_name(&mut args, &host.identifier, &host.machine) {
        info!(tag = %args[args.len() - 1], "resolved wheel platform tag");
      }
    }

    if let Some(prerequisite) = hook.prerequisite() {
      self.run_own(prerequisite, &[], &mut report).await?;
    }
    self.run_own(hook, &args, &mut report).await?;

    report.elapsed = start.elapsed();
    Ok(report)
  }

  /// Run the hook's own stages, then its backend command.
  async fn run_own(&self, hook: Hook, args: &[String], report: &mut HookReport) -> Result<(), PipelineError> {
    for stage in hook.stages() {
      info!(hook = %hook, stage = %stage, "{}", stage.message());
      self.run_stage(*stage).await?;
      report.stages.push(*stage);
    }

    self.backend.run(hook, args).await?;
    report.delegated.push((hook, args.to_vec()));
    Ok(())
  }

  async fn run_stage(&self, stage: Stage) -> Result<(), PipelineError> {
    match stage {
      Stage::NativeBuild => build_native(&self.config).await?,
      Stage::GenerateBindings => generate_bindings(&self.generator).await?,
      Stage::CleanArtifacts => clean_artifacts(&self.config),
      Stage::CurateSources => {
        curate_sources(&self.config)?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ConfigFile;
  use crate::execute::CommandSpec;
  use std::cell::RefCell;
  use std::fs;
  use tempfile::TempDir;
  use tracing_test::traced_test;

  #[derive(Default)]
  struct FakeGenerator {
    fail_with: Option<&'static str>,
    calls: RefCell<usize>,
  }

  impl BindingGenerator for FakeGenerator {
    async fn generate(&self) -> Result<(), GenerateError> {
      *self.calls.borrow_mut() += 1;
      match self.fail_with {
        Some(msg) => Err(GenerateError::Failed(msg.to_string())),
        None => Ok(()),
      }
    }
  }

  #[derive(Default)]
  struct RecordingBackend {
    calls: RefCell<Vec<(Hook, Vec<String>)>>,
  }

  impl PackagingBackend for RecordingBackend {
    async fn run(&self, hook: Hook, args: &[String]) -> Result<(), BackendError> {
      self.calls.borrow_mut().push((hook, args.to_vec()));
      Ok(())
    }
  }

  /// A project whose native build always succeeds without touching anything.
  fn project() -> (TempDir, ProjectConfig) {
    let temp = TempDir::new().unwrap();
    let mut file = ConfigFile::default();
    file.native.build_commands = vec![succeed()];
    let config = ProjectConfig::new(temp.path(), file);
    fs::create_dir_all(config.native_root()).unwrap();
    (temp, config)
  }

  #[cfg(unix)]
  fn succeed() -> CommandSpec {
    CommandSpec::new("/bin/sh").args(["-c", "true"])
  }

  #[cfg(windows)]
  fn succeed() -> CommandSpec {
    CommandSpec::new("cmd.exe").args(["/C", "exit 0"])
  }

  fn lifecycle(
    config: ProjectConfig,
    generator: FakeGenerator,
    capabilities: Capabilities,
  ) -> Lifecycle<FakeGenerator, RecordingBackend> {
    Lifecycle::new(config, generator, RecordingBackend::default(), capabilities)
      .with_host(HostPlatform::new("linux-x86_64", "x86_64"))
  }

  #[test]
  fn hook_stage_sequences() {
    assert_eq!(Hook::Build.stages(), &[Stage::NativeBuild, Stage::GenerateBindings]);
    assert_eq!(Hook::Develop.stages(), &[Stage::NativeBuild, Stage::GenerateBindings]);
    assert_eq!(Hook::Sdist.stages(), &[Stage::CleanArtifacts, Stage::CurateSources]);
    assert_eq!(Hook::BdistEgg.prerequisite(), Some(Hook::Build));
    assert!(Hook::BdistEgg.stages().is_empty());
  }

  #[tokio::test]
  async fn build_runs_stages_then_backend() {
    let (_temp, config) = project();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());

    let report = lifecycle.run(Hook::Build, &["--force".to_string()]).await.unwrap();

    assert_eq!(report.stages, vec![Stage::NativeBuild, Stage::GenerateBindings]);
    assert_eq!(*lifecycle.generator.calls.borrow(), 1);
    assert_eq!(
      *lifecycle.backend().calls.borrow(),
      vec![(Hook::Build, vec!["--force".to_string()])]
    );
  }

  #[tokio::test]
  async fn generation_failure_stops_before_backend() {
    let (_temp, config) = project();
    let generator = FakeGenerator {
      fail_with: Some("boom"),
      ..Default::default()
    };
    let lifecycle = lifecycle(config, generator, Capabilities::default());

    let err = lifecycle.run(Hook::Build, &[]).await.unwrap_err();

    assert!(matches!(&err, PipelineError::GenerationFailed(GenerateError::Failed(msg)) if msg == "boom"));
    assert!(err.to_string().contains("boom"));
    assert!(lifecycle.backend().calls.borrow().is_empty());
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn native_failure_skips_generation() {
    let (_temp, mut config) = project();
    config.file.native.build_commands = vec![CommandSpec::new("/bin/sh").args(["-c", "exit 1"])];
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());

    let err = lifecycle.run(Hook::Develop, &[]).await.unwrap_err();

    assert!(matches!(err, PipelineError::Execute(ExecuteError::ToolFailed { .. })));
    assert_eq!(*lifecycle.generator.calls.borrow(), 0);
    assert!(lifecycle.backend().calls.borrow().is_empty());
  }

  #[tokio::test]
  async fn sdist_cleans_and_curates() {
    let (temp, config) = project();
    fs::create_dir_all(config.lib_dir()).unwrap();
    fs::create_dir_all(config.native_root().join("pub")).unwrap();
    fs::write(config.native_root().join("pub").join("libvex.h"), "h").unwrap();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());

    let report = lifecycle.run(Hook::Sdist, &[]).await.unwrap();

    assert_eq!(report.stages, vec![Stage::CleanArtifacts, Stage::CurateSources]);
    assert!(!lifecycle.config().lib_dir().exists());
    assert!(temp.path().join("vex").join("pub").join("libvex.h").exists());
    assert_eq!(*lifecycle.generator.calls.borrow(), 0);
    assert_eq!(lifecycle.backend().calls.borrow()[0].0, Hook::Sdist);
  }

  #[tokio::test]
  async fn bdist_egg_runs_full_build_first() {
    let (_temp, config) = project();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());

    let report = lifecycle.run(Hook::BdistEgg, &[]).await.unwrap();

    assert_eq!(report.stages, vec![Stage::NativeBuild, Stage::GenerateBindings]);
    assert_eq!(
      *lifecycle.backend().calls.borrow(),
      vec![(Hook::Build, Vec::<String>::new()), (Hook::BdistEgg, Vec::<String>::new())]
    );
  }

  #[tokio::test]
  async fn bdist_wheel_gets_platform_tag() {
    let (_temp, config) = project();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());

    let report = lifecycle.run(Hook::BdistWheel, &[]).await.unwrap();

    assert_eq!(
      report.delegated,
      vec![
        (Hook::Build, Vec::<String>::new()),
        (
          Hook::BdistWheel,
          vec!["--plat-name".to_string(), "manylinux1_x86_64".to_string()]
        ),
      ]
    );
  }

  #[tokio::test]
  async fn bdist_wheel_keeps_explicit_platform_tag() {
    let (_temp, config) = project();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default())
      .with_host(HostPlatform::new("macosx-10.9-x86_64", "x86_64"));
    let args = vec!["--plat-name".to_string(), "any".to_string()];

    let report = lifecycle.run(Hook::BdistWheel, &args).await.unwrap();

    assert_eq!(report.delegated[1], (Hook::BdistWheel, args));
  }

  #[tokio::test]
  async fn explicit_platform_tag_needs_no_host() {
    let (_temp, config) = project();
    let mut lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());
    lifecycle.host = None;
    let args = vec!["--plat-name".to_string(), "any".to_string()];

    let report = lifecycle.run(Hook::BdistWheel, &args).await.unwrap();

    assert_eq!(report.delegated[1], (Hook::BdistWheel, args));
  }

  #[tokio::test]
  async fn unknown_host_without_tag_fails_before_building() {
    let (_temp, config) = project();
    let mut lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities::default());
    lifecycle.host = None;

    let err = lifecycle.run(Hook::BdistWheel, &[]).await.unwrap_err();

    assert!(matches!(err, PipelineError::UnknownPlatform));
    assert_eq!(*lifecycle.generator.calls.borrow(), 0);
    assert!(lifecycle.backend().calls.borrow().is_empty());
  }

  #[test]
  fn capabilities_list_supported_hooks() {
    assert_eq!(Capabilities::default().hooks(), Hook::ALL.to_vec());
    assert_eq!(
      Capabilities { develop: false }.hooks(),
      vec![Hook::Build, Hook::Install, Hook::Sdist, Hook::BdistEgg, Hook::BdistWheel]
    );
  }

  #[tokio::test]
  #[traced_test]
  async fn missing_develop_support_degrades() {
    let (_temp, config) = project();
    let lifecycle = lifecycle(config, FakeGenerator::default(), Capabilities { develop: false });

    assert!(logs_contain("proper 'develop' support unavailable"));
    assert!(!lifecycle.hooks().contains(&Hook::Develop));
    assert!(lifecycle.hooks().contains(&Hook::Build));

    let err = lifecycle.run(Hook::Develop, &[]).await.unwrap_err();
    assert!(matches!(err, PipelineError::HookUnavailable(Hook::Develop)));

    lifecycle.run(Hook::Build, &[]).await.unwrap();
  }
}
