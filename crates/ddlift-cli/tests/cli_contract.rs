use std::path::Path;
use std::process::{Command, Output};

const GRAMMAR: &str = r#"{
  "productions": [
    { "id": 0, "alternatives": [[ { "production": 1 } ]] },
    {
      "id": 1,
      "alternatives": [[
        { "interval": { "from": { "symbolic": { "app": { "name": "off" } } }, "to": { "constant": 7 } } }
      ]],
      "assertions": [
        { "cmp": ["u_lt", { "app": { "name": "off" } }, { "app": { "name": "len" } }] }
      ]
    }
  ]
}"#;

fn ddlift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ddlift"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to execute ddlift")
}

fn write_grammar(dir: &Path) -> String {
    let path = dir.join("grammar.json");
    std::fs::write(&path, GRAMMAR).unwrap();
    path.display().to_string()
}

#[test]
fn help_lists_output_and_config_flags() {
    let output = ddlift(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--config"));
}

#[test]
fn writes_document_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path());
    let out = dir.path().join("grammar.ddl");
    let output = ddlift(&[&grammar, "-o", &out.display().to_string()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("def Select (N : uint 64) =\n"));
    assert!(text.contains("def Main = \n  block\n    let len = Len\n    { L1; }\n"));
    assert!(text.contains("    let ii1 = off\n"));
    assert!(text.contains("    ((ii1 < len)) is true\n"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dumped!"), "stderr: {stderr}");
}

#[test]
fn dash_output_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path());
    let output = ddlift(&[&grammar, "-o", "-"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "only the grammar file should exist");
}

#[test]
fn config_renames_entry_and_rules() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path());
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{ "entry_name": "Record", "rule_prefix": "R", "index_var_prefix": "k" }"#,
    )
    .unwrap();
    let out = dir.path().join("record.ddl");
    let output = ddlift(&[
        &grammar,
        "--output",
        &out.display().to_string(),
        "--config",
        &config.display().to_string(),
    ]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("def Record = \n"));
    assert!(text.contains("def R1 = \n"));
    assert!(text.contains("    let k1 = off\n"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path());
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "rule_prefix": "" }"#).unwrap();
    let output = ddlift(&[&grammar, "--config", &config.display().to_string()]);
    assert!(!output.status.success());
}

#[test]
fn malformed_grammar_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("bad.json");
    std::fs::write(
        &grammar,
        r#"{"productions": [{"id": 0, "alternatives": [[{"terminal": "x"}]]}]}"#,
    )
    .unwrap();
    let out = dir.path().join("bad.ddl");
    let output = ddlift(&[
        &grammar.display().to_string(),
        "-o",
        &out.display().to_string(),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn missing_bound_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("unbounded.json");
    std::fs::write(
        &grammar,
        r#"{"productions": [{"id": 0, "alternatives": [[{"interval": {"from": {"constant": 0}, "to": null}}]]}]}"#,
    )
    .unwrap();
    let out = dir.path().join("unbounded.ddl");
    let output = ddlift(&[
        &grammar.display().to_string(),
        "-o",
        &out.display().to_string(),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no 'to' bound"), "stderr: {stderr}");
}

#[test]
fn unopenable_output_is_reported_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path());
    let out = dir.path().join("missing").join("grammar.ddl");
    let output = ddlift(&[&grammar, "-o", &out.display().to_string()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stderr.contains("Cannot open the file"), "stderr: {stderr}");
    assert!(!stderr.contains("failed to lower"), "stderr: {stderr}");
    assert!(!out.exists());
}
