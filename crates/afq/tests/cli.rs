//! Tests that drive the `afq` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Runs afq with its config pointed at `config`.
fn afq(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_afq"))
        .args(args)
        .env("AFQ_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run afq")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn stderr_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stderr).expect("stderr is JSON")
}

fn no_config() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

fn gene_config() -> (TempDir, std::path::PathBuf) {
    let (dir, path) = no_config();
    fs::write(
        &path,
        r#"
dialect = "aql"

[resources.gene]
fields = ["name", "organism", "created_at"]

[resources.gene.columns]
name = "gene_name"
"#,
    )
    .unwrap();
    (dir, path)
}

#[test]
fn test_compile_postgres_with_binds() {
    let (_dir, config) = no_config();
    let output = afq(
        &config,
        &[
            "--json",
            "compile",
            "name==bob;age>30",
            "--dialect",
            "postgres",
            "--column",
            "name=full_name",
            "--allow",
            "age",
        ],
    );

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["fragment"], "WHERE full_name = $1 AND age > $2");
    assert_eq!(json["binds"], serde_json::json!(["bob", "30"]));
    assert_eq!(json["mode"], "placeholder");
}

#[test]
fn test_compile_text_output() {
    let (_dir, config) = no_config();
    let output = afq(
        &config,
        &["compile", "status=@active", "-d", "aql", "-a", "status"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "FILTER status =~ '.*active.*'\n");
}

#[test]
fn test_compile_uses_config_resource_and_dialect() {
    let (_dir, config) = gene_config();
    let output = afq(
        &config,
        &["--json", "compile", "name~cyc;created_at$>=2018", "-r", "gene"],
    );

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["dialect"], "aql");
    assert_eq!(
        json["fragment"],
        "FILTER gene_name =~ '.*cyc.*' AND created_at >= DATE_ISO8601('2018')"
    );
}

#[test]
fn test_compile_disallowed_field_reports_code() {
    let (_dir, config) = gene_config();
    let output = afq(
        &config,
        &["--json", "compile", "organsim==x", "--resource", "gene"],
    );

    assert_eq!(output.status.code(), Some(1));
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "DISALLOWED_FIELD");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Did you mean 'organism'?"));
}

#[test]
fn test_compile_denied_operator() {
    let (_dir, config) = no_config();
    let output = afq(
        &config,
        &["--json", "compile", "name~x", "-a", "name", "--deny", "~"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_json(&output)["error"]["code"], "UNSUPPORTED_OPERATOR");
}

#[test]
fn test_compile_unknown_resource_is_config_error() {
    let (_dir, config) = gene_config();
    let output = afq(&config, &["--json", "compile", "a==1", "-r", "strain"]);

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_json(&output)["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn test_parse_reports_malformed_position() {
    let (_dir, config) = no_config();
    let output = afq(&config, &["--json", "parse", "name=="]);

    assert_eq!(output.status.code(), Some(1));
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "MALFORMED_FILTER_SYNTAX");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("position 6"));
}

#[test]
fn test_parse_json_clauses() {
    let (_dir, config) = no_config();
    let output = afq(&config, &["--json", "parse", "a==1,b$<2020-02-29"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["dialect"], "postgres");
    let clauses = json["clauses"].as_array().unwrap();
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0]["logic"], "or");
    assert_eq!(clauses[1]["operator"], "$<");
    assert_eq!(clauses[1]["value"], "2020-02-29");
}

#[test]
fn test_operators_lists_dialect_tokens() {
    let (_dir, config) = no_config();
    let output = afq(&config, &["operators", "--dialect", "postgres"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("SIMILAR TO"));
    assert!(stdout.lines().any(|l| l.starts_with("$>=")));
}

#[test]
fn test_config_init_then_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("afq").join("config.toml");

    let output = afq(&config, &["--json", "config", "init"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["created"], true);
    assert!(config.exists());

    let output = afq(&config, &["config", "path"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn test_check_validates_without_compiling() {
    let (_dir, config) = gene_config();

    // An impossible date is only caught at compile time.
    let output = afq(
        &config,
        &["--json", "check", "name==a;created_at$>2020-13", "-r", "gene"],
    );
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["fields"], serde_json::json!(["name", "created_at"]));

    let output = afq(&config, &["check", "secret==a", "-r", "gene"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("filter field 'secret' is not allowed"));
}
