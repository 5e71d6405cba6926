//! Runs the handler end to end against a temporary file share.

use artifact_cli::Cli;
use artifact_cli::handler::{execute, exit_code};
use clap::Parser;
use tempfile::TempDir;
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;

const PROJECT_ID: &str = "00000000-0000-0000-0000-000000000001";

fn publish(share: &TempDir, build: u32, files: &[&str]) {
    let artifact = share
        .path()
        .join(PROJECT_ID)
        .join(build.to_string())
        .join("drop");
    for file in files {
        let path = artifact.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"payload").unwrap();
    }
}

fn current_build_cli(share: &TempDir, out: &TempDir, extra: &[&str]) -> Cli {
    let share = share.path().display().to_string();
    let download = format!("downloadPath={}", out.path().display());
    let mut args = vec![
        "download-pipeline-artifact",
        "--fileshare-root",
        &share,
        "--input",
        "buildType=current",
        "--input",
        "artifactName=drop",
        "--input",
        &download,
        "--input",
        "itemPattern=",
        "--variable",
        "system.hostType=build",
        "--variable",
    ];
    let project = format!("system.teamProjectId={PROJECT_ID}");
    args.push(&project);
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

#[tokio::test]
async fn current_build_is_copied_to_download_path() {
    let share = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    publish(&share, 42, &["app.dll", "logs/build.log"]);

    let cli = current_build_cli(&share, &out, &["--variable", "build.buildId=42"]);
    let outcome = assert_ok!(execute(&cli, CancellationToken::new()).await);

    assert_eq!(outcome.build.build_id.get(), 42);
    assert_eq!(outcome.summary.files_downloaded, 2);
    assert!(out.path().join("logs/build.log").is_file());
}

#[tokio::test]
async fn invalid_build_id_exits_with_validation_code() {
    let share = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let cli = current_build_cli(&share, &out, &["--variable", "build.buildId=0"]);
    let err = execute(&cli, CancellationToken::new()).await.unwrap_err();

    assert_eq!(exit_code(&err), 2);
    assert!(err.to_string().contains("build.buildId"));
}

#[tokio::test]
async fn missing_artifact_exits_with_io_code() {
    let share = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let cli = current_build_cli(&share, &out, &["--variable", "build.buildId=7"]);
    let err = execute(&cli, CancellationToken::new()).await.unwrap_err();

    assert_eq!(exit_code(&err), 74);
    assert_eq!(err.to_string(), "Artifact 'drop' not found for build 7");
}

#[tokio::test]
async fn cancelled_run_exits_with_130() {
    let share = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    publish(&share, 42, &["app.dll"]);

    let token = CancellationToken::new();
    token.cancel();
    let cli = current_build_cli(&share, &out, &["--variable", "build.buildId=42"]);
    let err = execute(&cli, token).await.unwrap_err();

    assert_eq!(exit_code(&err), 130);
}
