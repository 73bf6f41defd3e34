//! Rebuild decisions against a recording toolchain.

use std::cell::RefCell;
use std::fs;

use overwatch_build::{
    BuildCache, BuildOutcome, BuildStep, Error, InterfaceHook, PrePackageHook, Result, Toolchain,
    maybe_build,
};
use overwatch_fs::{ProjectLayout, ToolConfig};
use overwatch_test_utils::TestProject;
use pretty_assertions::assert_eq;

const ARTIFACT: &str = "data/index.html.gz";
const FINGERPRINT: &str = "interface/.build_hash";

/// Records calls; a successful build writes the bundle like the real one.
struct FakeToolchain {
    project_root: std::path::PathBuf,
    installed: bool,
    fail_build: Option<i32>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeToolchain {
    fn new(project: &TestProject) -> Self {
        Self {
            project_root: project.root().to_path_buf(),
            installed: true,
            fail_build: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl Toolchain for FakeToolchain {
    fn dependencies_installed(&self) -> bool {
        self.installed
    }

    fn install_deps(&self) -> Result<()> {
        self.calls.borrow_mut().push("install");
        Ok(())
    }

    fn run_build(&self) -> Result<()> {
        self.calls.borrow_mut().push("build");
        if let Some(code) = self.fail_build {
            return Err(Error::BuildFailed {
                step: BuildStep::Bundle,
                command: "npm run build".into(),
                code: Some(code),
            });
        }
        let artifact = self.project_root.join(ARTIFACT);
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(artifact, b"bundle").unwrap();
        Ok(())
    }
}

fn cache_for(project: &TestProject) -> BuildCache {
    BuildCache::from_layout(&ProjectLayout::new(project.root(), ToolConfig::default()))
}

#[test]
fn first_build_runs_and_persists_fingerprint() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    let toolchain = FakeToolchain::new(&project);

    let digest = match maybe_build(&cache, &toolchain, false).unwrap() {
        BuildOutcome::Built(digest) => digest,
        other => panic!("expected a build, got {other:?}"),
    };
    assert_eq!(toolchain.calls(), vec!["build"]);
    assert_eq!(project.read(FINGERPRINT), digest.as_str());
    project.assert_file_exists(ARTIFACT);
}

#[test]
fn unchanged_sources_with_artifact_skip() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();

    let toolchain = FakeToolchain::new(&project);
    let outcome = maybe_build(&cache, &toolchain, false).unwrap();

    assert!(matches!(outcome, BuildOutcome::Skipped(_)));
    assert!(toolchain.calls().is_empty());
}

#[test]
fn missing_artifact_forces_rebuild() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();
    fs::remove_file(project.path(ARTIFACT)).unwrap();

    let toolchain = FakeToolchain::new(&project);
    let outcome = maybe_build(&cache, &toolchain, false).unwrap();

    assert!(matches!(outcome, BuildOutcome::Built(_)));
    assert_eq!(toolchain.calls(), vec!["build"]);
}

#[test]
fn changed_source_triggers_rebuild_and_updates_fingerprint() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();
    let before = project.read(FINGERPRINT);

    project.write("interface/src/App.tsx", "export const App = () => 1;\n");
    let outcome = maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();

    assert!(matches!(outcome, BuildOutcome::Built(_)));
    assert_ne!(project.read(FINGERPRINT), before);
}

#[test]
fn changed_manifest_triggers_rebuild() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();

    project.write("interface/vite.config.ts", "export default {};\n");
    let outcome = maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();

    assert!(matches!(outcome, BuildOutcome::Built(_)));
}

#[test]
fn missing_dependency_cache_installs_first() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    let mut toolchain = FakeToolchain::new(&project);
    toolchain.installed = false;

    maybe_build(&cache, &toolchain, false).unwrap();

    assert_eq!(toolchain.calls(), vec!["install", "build"]);
}

#[test]
fn force_builds_even_when_unchanged() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();

    let toolchain = FakeToolchain::new(&project);
    let outcome = maybe_build(&cache, &toolchain, true).unwrap();

    assert!(matches!(outcome, BuildOutcome::Built(_)));
    assert_eq!(toolchain.calls(), vec!["build"]);
}

#[test]
fn failed_build_keeps_previous_fingerprint() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    maybe_build(&cache, &FakeToolchain::new(&project), false).unwrap();
    let before = project.read(FINGERPRINT);

    project.write("interface/src/App.tsx", "broken(");
    let mut toolchain = FakeToolchain::new(&project);
    toolchain.fail_build = Some(2);
    let err = maybe_build(&cache, &toolchain, false).unwrap_err();

    assert!(matches!(err, Error::BuildFailed { code: Some(2), .. }), "got {err:?}");
    assert_eq!(project.read(FINGERPRINT), before);
}

#[test]
fn failed_first_build_writes_no_fingerprint() {
    let project = TestProject::with_interface();
    let cache = cache_for(&project);
    let mut toolchain = FakeToolchain::new(&project);
    toolchain.fail_build = Some(1);

    assert!(maybe_build(&cache, &toolchain, false).is_err());
    project.assert_file_not_exists(FINGERPRINT);
}

#[test]
fn interface_hook_propagates_build_failure() {
    let project = TestProject::with_interface();
    let mut toolchain = FakeToolchain::new(&project);
    toolchain.fail_build = Some(1);
    let hook = InterfaceHook::new(cache_for(&project), toolchain);

    let err = hook.before_package().unwrap_err();

    assert!(matches!(err, Error::BuildFailed { .. }));
}

#[test]
fn closures_act_as_hooks() {
    let ran = RefCell::new(false);
    let hook = || -> Result<()> {
        *ran.borrow_mut() = true;
        Ok(())
    };

    hook.before_package().unwrap();

    assert!(*ran.borrow());
}

#[cfg(unix)]
mod npm_toolchain {
    use super::*;
    use pretty_assertions::assert_eq;
    use overwatch_build::NpmToolchain;

    fn toolchain(project: &TestProject, script: &str) -> NpmToolchain {
        let mut config = ToolConfig::default();
        config.interface.npm = "sh".into();
        config.interface.install_args = vec!["-c".into(), "mkdir node_modules".into()];
        config.interface.build_args = vec!["-c".into(), script.into()];
        NpmToolchain::from_layout(&ProjectLayout::new(project.root(), config))
    }

    #[test]
    fn runs_install_then_build_in_interface_dir() {
        let project = TestProject::with_interface();
        let npm = toolchain(
            &project,
            "mkdir -p ../data && test -d node_modules && printf bundle > ../data/index.html.gz",
        );

        let outcome = maybe_build(&cache_for(&project), &npm, false).unwrap();

        assert!(matches!(outcome, BuildOutcome::Built(_)));
        project.assert_file_exists("interface/node_modules");
        assert_eq!(project.read(ARTIFACT), "bundle");
    }

    #[test]
    fn non_zero_exit_is_build_failed() {
        let project = TestProject::with_interface();
        project.mkdir("interface/node_modules");
        let npm = toolchain(&project, "exit 7");

        let err = maybe_build(&cache_for(&project), &npm, false).unwrap_err();

        match err {
            Error::BuildFailed { step, code, command } => {
                assert_eq!(step, BuildStep::Bundle);
                assert_eq!(code, Some(7));
                assert_eq!(command, "sh -c exit 7");
            }
            other => panic!("expected BuildFailed, got {other:?}"),
        }
        project.assert_file_not_exists(FINGERPRINT);
    }
}
