//! End-to-end runs of CLI commands against a temporary knowledge base

use clap::Parser;
use mdide::{Cli, run};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn setup_kb() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("notes")).unwrap();
    fs::write(
        root.join("index.md"),
        "# Home\n\n- [Alpha](notes/alpha.md)\n- [Beta](notes/beta.md)\n",
    )
    .unwrap();
    fs::write(
        root.join("notes/alpha.md"),
        "# Alpha\n\nup: [Home](../index.md)\nsee [Beta](beta.md)\n",
    )
    .unwrap();
    fs::write(
        root.join("notes/beta.md"),
        "# Beta\n\nup: [Home](../index.md)\nback: [Alpha](alpha.md)\n",
    )
    .unwrap();
    temp_dir
}

async fn run_args(kb: &TempDir, args: &[&str]) -> anyhow::Result<Value> {
    let root = kb.path().to_str().unwrap();
    let mut argv = vec!["mdide", "--workspace", root];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv)?).await
}

#[tokio::test]
async fn test_complete_links() {
    let kb = setup_kb();
    fs::write(kb.path().join("notes/gamma.md"), "# Gamma\n\nsee [").unwrap();

    let result = run_args(&kb, &["complete", "notes/gamma.md", "2", "5"]).await.unwrap();
    let labels: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Home](../index.md)",
            "Alpha](alpha.md)",
            "Beta](beta.md)",
            "Gamma](gamma.md)"
        ]
    );
}

#[tokio::test]
async fn test_complete_on_missing_line() {
    let kb = setup_kb();
    let result = run_args(&kb, &["complete", "index.md", "40", "0"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_follow_bracket_first() {
    let kb = setup_kb();
    let result = run_args(&kb, &["follow", "notes/alpha.md", "3", "6"]).await.unwrap();
    assert_eq!(result["outcome"], "navigate");
    assert_eq!(
        result["selection"],
        json!({"start": {"line": 3, "column": 6}, "end": {"line": 3, "column": 6}})
    );
}

#[tokio::test]
async fn test_follow_no_link() {
    let kb = setup_kb();
    let result = run_args(&kb, &["follow", "index.md", "0", "2"]).await.unwrap();
    assert_eq!(result, json!({"outcome": "no_link_found"}));

    let result = run_args(&kb, &["follow", "index.md", "0", "2", "--paren"]).await.unwrap();
    assert_eq!(result, json!({"outcome": "nothing"}));
}

#[tokio::test]
async fn test_rename_moves_file_and_updates_links() {
    let kb = setup_kb();
    let result = run_args(&kb, &["rename", "notes/beta.md", "archive/beta.md"])
        .await
        .unwrap();
    assert_eq!(result["applied"], true);
    assert_eq!(result["edits"].as_array().unwrap().len(), 2);

    let root = kb.path();
    assert!(root.join("archive/beta.md").exists());
    assert!(!root.join("notes/beta.md").exists());
    assert_eq!(
        fs::read_to_string(root.join("index.md")).unwrap(),
        "# Home\n\n- [Alpha](notes/alpha.md)\n- [Beta](archive/beta.md)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("notes/alpha.md")).unwrap(),
        "# Alpha\n\nup: [Home](../index.md)\nsee [Beta](../archive/beta.md)\n"
    );
}

#[tokio::test]
async fn test_rename_onto_existing_file_changes_nothing() {
    let kb = setup_kb();
    let result = run_args(&kb, &["rename", "notes/beta.md", "notes/alpha.md"]).await;
    assert!(result.is_err());

    let root = kb.path();
    assert_eq!(
        fs::read_to_string(root.join("notes/beta.md")).unwrap(),
        "# Beta\n\nup: [Home](../index.md)\nback: [Alpha](alpha.md)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("index.md")).unwrap(),
        "# Home\n\n- [Alpha](notes/alpha.md)\n- [Beta](notes/beta.md)\n"
    );
}

#[tokio::test]
async fn test_failed_delete_restores_files() {
    let kb = setup_kb();
    let result = run_args(&kb, &["delete", "notes/alpha.md", "notes/missing.md"]).await;
    assert!(result.is_err());

    let root = kb.path();
    assert_eq!(
        fs::read_to_string(root.join("notes/alpha.md")).unwrap(),
        "# Alpha\n\nup: [Home](../index.md)\nsee [Beta](beta.md)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("index.md")).unwrap(),
        "# Home\n\n- [Alpha](notes/alpha.md)\n- [Beta](notes/beta.md)\n"
    );
}

#[tokio::test]
async fn test_delete_dry_run_leaves_files_alone() {
    let kb = setup_kb();
    let result = run_args(&kb, &["delete", "notes/alpha.md", "--dry-run"])
        .await
        .unwrap();
    assert_eq!(result["applied"], false);
    assert_eq!(result["operations"][0]["op"], "delete");
    let edits = result["edits"].as_array().unwrap();
    assert_eq!(edits.len(), 2);
    assert_eq!(
        edits[0]["new_text"],
        "# Home\n\n- \n- [Beta](notes/beta.md)\n"
    );
    assert_eq!(
        edits[1]["new_text"],
        "# Beta\n\nup: [Home](../index.md)\nback: \n"
    );
    assert!(kb.path().join("notes/alpha.md").exists());
    assert_eq!(
        fs::read_to_string(kb.path().join("index.md")).unwrap(),
        "# Home\n\n- [Alpha](notes/alpha.md)\n- [Beta](notes/beta.md)\n"
    );
}

#[tokio::test]
async fn test_delete_applies() {
    let kb = setup_kb();
    run_args(&kb, &["delete", "notes/alpha.md"]).await.unwrap();
    assert!(!kb.path().join("notes/alpha.md").exists());
    assert_eq!(
        fs::read_to_string(kb.path().join("index.md")).unwrap(),
        "# Home\n\n- \n- [Beta](notes/beta.md)\n"
    );
}

#[tokio::test]
async fn test_retitle() {
    let kb = setup_kb();
    run_args(&kb, &["retitle", "index.md", "Start"]).await.unwrap();
    let root = kb.path();
    assert!(fs::read_to_string(root.join("index.md")).unwrap().starts_with("# Start\n"));
    assert_eq!(
        fs::read_to_string(root.join("notes/beta.md")).unwrap(),
        "# Beta\n\nup: [Start](../index.md)\nback: [Alpha](alpha.md)\n"
    );
}

#[tokio::test]
async fn test_headings() {
    let kb = setup_kb();
    let result = run_args(&kb, &["headings"]).await.unwrap();
    assert_eq!(result, json!(["# Alpha", "# Beta", "# Home"]));
}

#[tokio::test]
async fn test_lint() {
    let kb = setup_kb();
    let output = kb.path().join("lint.json");
    fs::write(
        &output,
        r#"[{"file": "index.md", "line": 2, "start": 2, "end": 27, "text": "dead link"}]"#,
    )
    .unwrap();

    let result = run_args(&kb, &["lint", output.to_str().unwrap()]).await.unwrap();
    let files = result.as_object().unwrap();
    assert_eq!(files.len(), 1);
    let (path, diagnostics) = files.iter().next().unwrap();
    assert!(path.ends_with("index.md"));
    let diagnostics = diagnostics.as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], "dead link");
    assert_eq!(diagnostics[0]["severity"], "error");
}

#[tokio::test]
async fn test_missing_workspace() {
    let result = run(Cli::try_parse_from(["mdide", "-w", "/definitely/not/here", "headings"]).unwrap()).await;
    assert!(result.is_err());
}
