#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const BIN: &str = "terraform-provider-capella";

/// 認証情報を持たないコマンド (外部の CBC_* 環境変数を無効化)
fn command() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env_remove("CBC_ACCESS_KEY")
        .env_remove("CBC_SECRET_KEY")
        // 万が一リクエストが飛んでも到達しないアドレス
        .env("CBC_API_URL", "http://127.0.0.1:9");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Couchbase Capella"))
        .stdout(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("delete"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    command()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("terraform-provider-capella"));
}

/// スキーマが JSON で出力されることを確認
#[test]
fn test_schema_output() {
    let output = command().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let resources = schema["resource_schemas"].as_object().unwrap();
    assert!(resources.contains_key("couchbasecapella_project"));
    assert!(resources.contains_key("couchbasecapella_database_user"));
    assert!(resources.contains_key("couchbasecapella_bucket"));

    let provider = &schema["provider"]["attributes"];
    assert_eq!(provider["secret_key"]["sensitive"], serde_json::json!(true));
    assert_eq!(provider["access_key"]["env_default"], serde_json::json!("CBC_ACCESS_KEY"));
}

/// 認証情報がない場合はネットワークアクセス前に失敗することを確認
#[test]
fn test_create_without_credentials_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("project.json");
    fs::write(&config, r#"{ "name": "analytics" }"#).unwrap();

    command()
        .arg("create")
        .arg("couchbasecapella_project")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("access_key"))
        .stderr(predicate::str::contains("CBC_ACCESS_KEY"))
        .stderr(predicate::str::contains("HTTP request failed").not());
}

/// 秘密鍵がエラー出力に含まれないことを確認
#[test]
fn test_secret_not_echoed() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("project.json");
    fs::write(&config, r#"{ "name": "analytics" }"#).unwrap();

    command()
        .env("CBC_SECRET_KEY", "sk-cli-do-not-print")
        .arg("create")
        .arg("couchbasecapella_project")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("access_key"))
        .stderr(predicate::str::contains("sk-cli-do-not-print").not())
        .stdout(predicate::str::contains("sk-cli-do-not-print").not());
}

#[test]
fn test_provider_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let provider_config = dir.path().join("provider.json");
    fs::write(
        &provider_config,
        r#"{ "access_key": "ak", "secret_key": "sk", "region": "eu" }"#,
    )
    .unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, r#"{ "id": "p-1", "name": "analytics" }"#).unwrap();

    // Unknown provider attributes are rejected before any call
    command()
        .arg("--provider-config")
        .arg(&provider_config)
        .arg("read")
        .arg("couchbasecapella_project")
        .arg("--state")
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported argument"))
        .stderr(predicate::str::contains("region"));
}

#[test]
fn test_unknown_resource_type() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cluster.json");
    fs::write(&config, "{}").unwrap();

    command()
        .env("CBC_ACCESS_KEY", "ak")
        .env("CBC_SECRET_KEY", "sk")
        .arg("create")
        .arg("couchbasecapella_cluster")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("couchbasecapella_cluster"))
        .stderr(predicate::str::contains("couchbasecapella_project"));
}

/// force-new 属性の変更が置き換えとして表示されることを確認
#[test]
fn test_plan_reports_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let config = dir.path().join("bucket.json");
    fs::write(
        &state,
        r#"{ "id": "b-1", "cluster_id": "c-1", "name": "travel", "memory_quota": 256, "conflict_resolution": "seqno" }"#,
    )
    .unwrap();
    fs::write(
        &config,
        r#"{ "cluster_id": "c-1", "name": "travel", "memory_quota": 512 }"#,
    )
    .unwrap();

    let output = command()
        .arg("plan")
        .arg("couchbasecapella_bucket")
        .arg("--state")
        .arg(&state)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["action"], "replace");
    assert_eq!(plan["requires_replace"], serde_json::json!(["memory_quota"]));
}

#[test]
fn test_plan_no_change() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let config = dir.path().join("project.json");
    fs::write(&state, r#"{ "id": "p-1", "name": "analytics" }"#).unwrap();
    fs::write(&config, r#"{ "name": "analytics" }"#).unwrap();

    command()
        .arg("plan")
        .arg("couchbasecapella_project")
        .arg("--state")
        .arg(&state)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("no-op"));
}
