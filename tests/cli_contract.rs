use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn test_root(name: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir().join(format!("site-explorer-cli-{name}-{nonce}"))
}

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_siteexplorer"))
}

fn write_index(root: &Path, body: &str) -> PathBuf {
    fs::create_dir_all(root).expect("create root");
    let index = root.join("search-index.json");
    fs::write(&index, body).expect("write index");
    index
}

fn sample_index(root: &Path) -> PathBuf {
    write_index(
        root,
        r#"{
            "pages": [
                {"title": "Intro", "url": "/content/guide/intro.html", "path": "/content/guide/intro.html", "body": "First steps"},
                {"title": "Readme", "url": "/other/readme.html", "path": "/other/readme.txt"}
            ],
            "files": [
                {"name": "logo.png", "url": "/content/assets/logo.png", "path": "/content/assets/logo.png"}
            ]
        }"#,
    )
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .arg("--cli")
        .args(args)
        .output()
        .expect("run cli")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}

#[test]
fn cli_lists_content_root_by_default() {
    let root = test_root("root-listing");
    let index = sample_index(&root);

    let output = run(&["--index", index.to_string_lossy().as_ref()]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["/content", "[dir]  assets/", "[dir]  guide/"]
    );
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_lists_folder_with_base_prefixed_locators() {
    let root = test_root("folder-listing");
    let index = sample_index(&root);

    let output = run(&[
        "--index",
        index.to_string_lossy().as_ref(),
        "--folder",
        "/content/guide/",
        "--base",
        "/docs",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["/content/guide", "[page] Intro\t/docs/content/guide/intro.html"]
    );
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_reports_missing_folder_without_failing() {
    let root = test_root("missing-folder");
    let index = sample_index(&root);

    let output = run(&[
        "--index",
        index.to_string_lossy().as_ref(),
        "--folder",
        "/content/nowhere",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["/content/nowhere", "<not found: /content/nowhere>"]
    );
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_search_excludes_items_outside_content_root() {
    let root = test_root("search");
    let index = sample_index(&root);

    let output = run(&["--index", index.to_string_lossy().as_ref(), "readme"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/search: readme", "<no matches>"]);

    let output = run(&["--index", index.to_string_lossy().as_ref(), " INTRO "]);
    assert_eq!(
        stdout_lines(&output),
        vec!["/search: intro", "[page] Intro\t/content/guide/intro.html"]
    );
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_search_outputs_at_most_limit_results() {
    let root = test_root("limit");
    let files: Vec<String> = (0..30)
        .map(|i| format!(r#"{{"name": "f{i}.txt", "url": "/content/f/f{i}.txt", "path": "/content/f/f{i}.txt"}}"#))
        .collect();
    let index = write_index(&root, &format!(r#"{{"files": [{}]}}"#, files.join(",")));

    let output = run(&["--index", index.to_string_lossy().as_ref(), "--limit", "5", "txt"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "[file] f0.txt\t/content/f/f0.txt");

    let output = run(&["--index", index.to_string_lossy().as_ref(), "txt"]);
    assert_eq!(stdout_lines(&output).len(), 21);
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_returns_non_zero_when_index_does_not_exist() {
    let missing = test_root("missing").join("search-index.json");
    let output = run(&["--index", missing.to_string_lossy().as_ref()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read index"));
}

#[test]
fn cli_returns_non_zero_when_index_is_malformed() {
    let root = test_root("malformed");
    let index = write_index(&root, "{\"pages\": [");

    let output = run(&["--index", index.to_string_lossy().as_ref()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse index"));
    let _ = fs::remove_dir_all(&root);
}
