//! End-to-end tests for the `heisenberg` binary.
//!
//! Signal sources point at a closed local port, so every check fails fast with
//! a transport error and the tests never touch the network.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn heisenberg(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heisenberg"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("GITHUB_TOKEN")
        .output()
        .expect("should run heisenberg binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Address on which nothing listens.
fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Config whose sources all point at a closed port.
fn offline_config(dir: &TempDir) -> PathBuf {
    let base = closed_base_url();
    let path = dir.path().join("heisenberg.toml");
    let content = format!(
        r#"
[general]
log_level = "warn"

[check]
max_workers = 2
pause_every = 0
timeout_secs = 10

[sources]
deps_dev_url = "{base}"
npm_registry_url = "{base}"
pypi_url = "{base}"
github_api_url = "{base}"
request_timeout_secs = 2
"#
    );
    fs::write(&path, content).expect("should write config");
    path
}

#[test]
fn test_config_validate_valid_file() {
    // Given: A valid config file
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);

    // When: Validating it
    let output = heisenberg(&config, &["config", "validate"]);

    // Then: Exit 0 with a VALID verdict
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("VALID"));
}

#[test]
fn test_config_validate_invalid_value_exits_2() {
    // Given: A config with an out-of-range worker count
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[check]\nmax_workers = 0\n").expect("should write config");

    // When: Validating it
    let output = heisenberg(&config, &["config", "validate"]);

    // Then: Configuration exit code and the offending field in the report
    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("INVALID"));
    assert!(out.contains("check.max_workers"));
}

#[test]
fn test_config_show_section_as_json() {
    // Given: No config file at all (defaults apply)
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("missing.toml");

    // When: Showing the check section as JSON
    let output = heisenberg(&config, &["config", "show", "--section", "check", "--output", "json"]);

    // Then: The report names the section
    assert!(output.status.success(), "{:?}", output);
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["section"].as_str(), Some("check"));
}

#[test]
fn test_analyze_single_sbom_to_stdout() {
    // Given: A tabular SBOM with differently cased and duplicated rows
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);
    let sbom = fixture_path("web-frontend_sbom.csv");

    // When: Searching case-insensitively with output to stdout
    let output = heisenberg(
        &config,
        &[
            "analyze",
            "--sbom",
            sbom.to_str().expect("utf-8 path"),
            "--pkg",
            "event-stream",
            "-o",
            "-",
        ],
    );

    // Then: Only the CSV is printed, duplicates removed in first-seen order
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        stdout(&output),
        "package,version,language,license\n\
         Event-Stream,3.3.6,npm,MIT\n\
         event-stream,3.3.6,npm,MIT\n"
    );
}

#[test]
fn test_analyze_case_sensitive() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);
    let sbom = fixture_path("web-frontend_sbom.csv");

    let output = heisenberg(
        &config,
        &[
            "analyze",
            "--sbom",
            sbom.to_str().expect("utf-8 path"),
            "--pkg",
            "event-stream",
            "--case-sensitive",
            "-o",
            "-",
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout(&output).lines().count(), 2);
}

#[test]
fn test_analyze_repositories_to_file() {
    // Given: An SBOM directory with one of two selected repositories present
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);
    let sbom_dir = dir.path().join("sbom");
    fs::create_dir(&sbom_dir).expect("should create sbom dir");
    fs::copy(
        fixture_path("web-frontend_sbom.csv"),
        sbom_dir.join("web-frontend_sbom.csv"),
    )
    .expect("should copy sbom");
    let names = dir.path().join("names.txt");
    fs::write(&names, "# npm incident\nleft-pad\n").expect("should write names");
    let out = dir.path().join("matches.csv");

    // When: Analyzing both repositories
    let output = heisenberg(
        &config,
        &[
            "analyze",
            "--repos",
            "web-frontend,ghost",
            "--sbom-dir",
            sbom_dir.to_str().expect("utf-8 path"),
            "--file",
            names.to_str().expect("utf-8 path"),
            "-o",
            out.to_str().expect("utf-8 path"),
        ],
    );

    // Then: The missing repository is skipped and rows carry repo_name
    assert!(output.status.success(), "{:?}", output);
    let content = fs::read_to_string(&out).expect("match file should exist");
    assert_eq!(
        content,
        "repo_name,package,version,language,license\n\
         web-frontend,left-pad,1.3.0,npm,WTFPL\n"
    );
}

#[test]
fn test_vendor_writes_error_rows_when_sources_unreachable() {
    // Given: A CycloneDX vendor SBOM with one unsupported ecosystem
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);
    let out = dir.path().join("vendor.csv");
    let sbom = fixture_path("acme.cdx.json");

    // When: Running the vendor assessment
    let output = heisenberg(
        &config,
        &[
            "vendor",
            "--sbom-file",
            sbom.to_str().expect("utf-8 path"),
            "-o",
            out.to_str().expect("utf-8 path"),
        ],
    );

    // Then: One row per checkable package, named after the file stem
    assert!(output.status.success(), "{:?}", output);
    let content = fs::read_to_string(&out).expect("report should exist");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "{content}");
    assert!(lines[0].starts_with("repo_name,package,version,language,license,health_score"));
    assert!(lines[1].starts_with("acme.cdx,left-pad,1.3.0,npm,WTFPL,"));
    assert!(lines[2].starts_with("acme.cdx,requests,2.31.0,pypi,N/A,"));
    for line in &lines[1..] {
        assert!(line.contains("Error: deps.dev request failed"), "{line}");
        assert!(line.contains("https://socket.dev/"), "{line}");
    }
    assert!(stdout(&output).contains("1 skipped"));
}

#[test]
fn test_vendor_missing_file_exits_10() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);

    let output = heisenberg(&config, &["vendor", "--sbom-file", "/nonexistent/vendor.cdx.json"]);

    assert_eq!(output.status.code(), Some(10));
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/vendor.cdx.json"));
}

#[test]
fn test_bulk_combines_repositories_into_one_report() {
    // Given: Two repositories, one SBOM missing
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);
    let sbom_dir = dir.path().join("sbom");
    fs::create_dir(&sbom_dir).expect("should create sbom dir");
    fs::copy(
        fixture_path("web-frontend_sbom.csv"),
        sbom_dir.join("web-frontend_sbom.csv"),
    )
    .expect("should copy sbom");
    let repos = dir.path().join("repos.txt");
    fs::write(&repos, "ghost\nweb-frontend\n").expect("should write repos");
    let out = dir.path().join("bulk.csv");

    // When: Running bulk over every listed repository
    let output = heisenberg(
        &config,
        &[
            "bulk",
            "--all",
            "--repos-file",
            repos.to_str().expect("utf-8 path"),
            "--sbom-dir",
            sbom_dir.to_str().expect("utf-8 path"),
            "-o",
            out.to_str().expect("utf-8 path"),
            "--output",
            "json",
        ],
    );

    // Then: Every checkable row of the present SBOM is reported in order
    assert!(output.status.success(), "{:?}", output);
    let summary: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(summary["sources"], serde_json::json!(["web-frontend"]));
    assert_eq!(summary["skipped"].as_u64(), Some(1));
    assert_eq!(summary["stats"]["total"].as_u64(), Some(5));
    assert_eq!(summary["stats"]["failed"].as_u64(), Some(5));

    let content = fs::read_to_string(&out).expect("report should exist");
    let packages: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap_or_default())
        .collect();
    assert_eq!(
        packages,
        vec![
            "left-pad",
            "Event-Stream",
            "github.com/pkg/errors",
            "event-stream",
            "Event-Stream"
        ]
    );
    assert!(content.contains(",go,"), "golang is normalized to go");
}

#[test]
fn test_check_unsupported_ecosystem_exits_1() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);

    let output = heisenberg(
        &config,
        &["check", "--ecosystem", "cargo", "--package", "serde", "--version", "1.0.0"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported ecosystem"));
}

#[test]
fn test_check_renders_error_report_and_fails() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = offline_config(&dir);

    let output = heisenberg(
        &config,
        &[
            "check", "--ecosystem", "npm", "--package", "left-pad", "--version", "1.3.0",
            "--output", "json",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["name"].as_str(), Some("left-pad"));
    let health = json["health_score"].as_str().unwrap_or_default();
    assert!(health.starts_with("Error: deps.dev request failed"), "{health}");
}
