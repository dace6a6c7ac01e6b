//! Full pipeline runs.

use std::fs::File;

use trubuild_lib::config::{BuildConfig, BuildOptions};
use trubuild_lib::pipeline::{self, Stage, StageOutcome};
use trubuild_lib::platform::Platform;
use trubuild_lib::preflight::PreflightError;
use trubuild_lib::process::ToolError;
use trubuild_lib::BuildError;

use super::common::Project;

async fn archive_server() -> (mockito::ServerGuard, mockito::Mock, Vec<String>) {
  let mut server = mockito::Server::new_async().await;
  let mock = server
    .mock("GET", "/sip/sip-4.19.1.tar.gz/download")
    .with_status(200)
    .with_body("sip sources")
    .expect(1)
    .create_async()
    .await;
  let packages = vec![format!("{}/sip/sip-4.19.1.tar.gz/download", server.url())];
  (server, mock, packages)
}

#[tokio::test]
async fn full_build_runs_every_stage_in_order() {
  let project = Project::new();
  let (_server, mock, packages) = archive_server().await;

  let report = pipeline::run(&project.config(packages)).await.unwrap();

  mock.assert_async().await;
  let ran: Vec<Stage> = report.ran().collect();
  assert_eq!(&ran[..6], &Stage::ALL[..6]);
  assert!(project.exists("root/src/sip-4.19.1.tar.gz"));

  let dist = project.path("dist").display().to_string();
  let sysroot = project.path("root").display().to_string();
  assert_eq!(
    project.calls(),
    vec![
      "sysroot build-sysroot.py --build python pyqt5 sip --enable-dynamic-loading --sysroot=root".to_string(),
      "target -m ensurepip".to_string(),
      "target -m pip install --target modules fonttools==3.9.1".to_string(),
      "target -m pip install --target modules pyclipper==1.0.6".to_string(),
      format!("deploy --verbose --output dist --project TruFont.pdy build SYSROOT={sysroot}"),
      format!("qmake {dist}"),
      format!("make {dist}"),
    ]
  );
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn linux_build_bundles_binary_and_extension() {
  let project = Project::new();
  let (_server, _mock, packages) = archive_server().await;

  let report = pipeline::run(&project.config(packages)).await.unwrap();

  assert_eq!(report.outcome(Stage::Package), Some(StageOutcome::Ran));
  let archive = report.archive.unwrap();
  assert_eq!(archive, project.path("TruFont.zip"));
  let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
  let mut names: Vec<&str> = zip.file_names().collect();
  names.sort();
  assert_eq!(names, vec!["TruFont.run", "pyclipper.so"]);
}

#[tokio::test]
async fn preflight_failure_touches_nothing() {
  let project = Project::with_qt("Using Qt version 5.9.1 in /opt/qt/lib");
  let mut server = mockito::Server::new_async().await;
  let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create_async().await;
  let packages = vec![format!("{}/sip-4.19.1.tar.gz", server.url())];

  let err = pipeline::run(&project.config(packages)).await.unwrap_err();

  assert!(matches!(
    err,
    BuildError::Preflight(PreflightError::WrongQtVersion { .. })
  ));
  mock.assert_async().await;
  assert!(!project.exists("root"));
  assert!(!project.exists("modules"));
  assert!(project.calls().is_empty());
}

#[tokio::test]
async fn failing_deploy_aborts_remaining_stages() {
  let project = Project::new();
  project.tool("pyqtdeploycli", "exit 1");
  let (_server, _mock, packages) = archive_server().await;

  let err = pipeline::run(&project.config(packages)).await.unwrap_err();

  assert!(matches!(err, BuildError::Tool(ToolError::Failed { code: Some(1), .. })));
  assert!(!project.calls().iter().any(|call| call.starts_with("qmake") || call.starts_with("make")));
  assert!(!project.exists("TruFont.zip"));
  // Earlier stages keep their output for a resumed run.
  assert!(project.exists("root/bin/python"));
  assert!(project.exists("modules"));
}

#[tokio::test]
async fn failing_sysroot_build_is_fatal() {
  let project = Project::new();
  project.tool(
    "python3",
    r#"case "$2" in
  *calcsize*) printf '64\n3.6.1\n'; exit 0 ;;
  "import pyqtdeploy") exit 0 ;;
esac
exit 4"#,
  );
  let (_server, _mock, packages) = archive_server().await;

  let err = pipeline::run(&project.config(packages)).await.unwrap_err();

  assert!(matches!(err, BuildError::Tool(ToolError::Failed { code: Some(4), .. })));
  assert!(!project.exists("modules"));
  assert!(!project.exists("dist"));
}

#[tokio::test]
async fn rerun_with_flags_off_resumes_from_existing_output() {
  let project = Project::new();
  let (_server, mock, packages) = archive_server().await;
  let mut config = project.config(packages);
  pipeline::run(&config).await.unwrap();
  let first_run = project.calls().len();

  config.options = BuildOptions {
    refresh_sources: false,
    rebuild_sysroot: false,
    reinstall_modules: false,
  };
  let report = pipeline::run(&config).await.unwrap();

  // Still exactly one download across both runs.
  mock.assert_async().await;
  assert_eq!(report.outcome(Stage::FetchSources), Some(StageOutcome::Skipped));
  assert_eq!(report.outcome(Stage::BuildSysroot), Some(StageOutcome::Skipped));
  assert_eq!(report.outcome(Stage::InstallModules), Some(StageOutcome::Skipped));
  assert_eq!(report.outcome(Stage::Deploy), Some(StageOutcome::Ran));

  let second_run: Vec<String> = project.calls().into_iter().skip(first_run).collect();
  assert_eq!(second_run.len(), 3);
  assert!(second_run[0].starts_with("deploy "));
  assert!(project.exists("root/src/sip-4.19.1.tar.gz"));
}

#[tokio::test]
async fn relative_tool_paths_from_config_resolve_in_every_stage() {
  let project = Project::new();
  let (_server, _mock, packages) = archive_server().await;
  project.write(
    "trubuild.toml",
    &format!(
      r#"packages = ["{}"]

[tools]
python = "tools/python3"
deploy = "tools/pyqtdeploycli"
qmake = "tools/qmake"
make = "tools/make"
"#,
      packages[0]
    ),
  );

  let config = BuildConfig::load(&project.dir, Platform::current(), None).unwrap();
  assert_eq!(config.toolchain.qmake, project.path("tools/qmake"));

  let report = pipeline::run(&config).await.unwrap();

  assert_eq!(report.outcome(Stage::NativeBuild), Some(StageOutcome::Ran));
  let dist = project.path("dist").display().to_string();
  let calls = project.calls();
  assert_eq!(&calls[calls.len() - 2..], &[format!("qmake {dist}"), format!("make {dist}")]);
}
