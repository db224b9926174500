use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;

use jdksync_core::{FileRegistry, JdkName, JdkRegistry};
use jdksync_daemon::WatchConfig;
use tempfile::TempDir;

fn jdksync_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jdksync"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1");
    cmd
}

fn write_table(base: &Path, entries: &[(&str, &str)]) {
    let idea = base.join(".idea");
    fs::create_dir_all(&idea).expect("mkdir .idea");
    let mut xml = String::from(r#"<application><component name="ProjectJdkTable">"#);
    for (name, home) in entries {
        xml.push_str(&format!(
            r#"<jdk version="2"><name value="{name}"/><type value="JavaSDK"/><homePath value="{home}"/></jdk>"#
        ));
    }
    xml.push_str("</component></application>");
    fs::write(idea.join("jdk.table.xml"), xml).expect("write table");
}

#[test]
fn registry_add_list_remove() {
    let home = TempDir::new().expect("home");

    jdksync_cmd(home.path())
        .args(["registry", "add", "corretto-17", "/opt/jdk-17", "--version", "17.0.9"])
        .assert()
        .success()
        .stdout(contains("registered JDK 'corretto-17'"));
    jdksync_cmd(home.path())
        .args(["registry", "add", "corretto-17", "/opt/jdk-17b"])
        .assert()
        .success()
        .stdout(contains("replaced JDK 'corretto-17'"));

    let registry = FileRegistry::at(home.path());
    let entries = registry.entries().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].home_path, "/opt/jdk-17b");
    assert_eq!(entries[0].version, None);

    jdksync_cmd(home.path())
        .args(["registry", "list"])
        .assert()
        .success()
        .stdout(contains("corretto-17"))
        .stdout(contains("/opt/jdk-17b"));

    let output = jdksync_cmd(home.path())
        .args(["registry", "list", "--json"])
        .output()
        .expect("run list --json");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json[0]["name"], "corretto-17");
    assert_eq!(json[0]["type_tag"], "JavaSDK");

    jdksync_cmd(home.path())
        .args(["registry", "remove", "corretto-17"])
        .assert()
        .success();
    jdksync_cmd(home.path())
        .args(["registry", "remove", "corretto-17"])
        .assert()
        .failure()
        .stderr(contains("is not registered"));
}

#[test]
fn check_then_reconcile_project() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    write_table(workspace.path(), &[("21", "$PROJECT_DIR$/.jdks/21")]);
    let project = workspace.path().to_str().expect("utf-8 path");

    jdksync_cmd(home.path())
        .args(["check", project])
        .assert()
        .success()
        .stdout(contains("MISSING"))
        .stdout(contains("registry differs"));

    jdksync_cmd(home.path())
        .args(["reconcile", project])
        .assert()
        .success()
        .stdout(contains("1 added"));

    let base = fs::canonicalize(workspace.path()).expect("canonicalize");
    let registered = FileRegistry::at(home.path())
        .find(&JdkName::from("21"))
        .expect("find")
        .expect("registered");
    assert_eq!(
        registered.home_path,
        format!("{}/.jdks/21", base.to_string_lossy())
    );
    assert!(workspace
        .path()
        .join(".idea/jdk.table.xml.updated.txt")
        .exists());

    // Declared home does not exist on disk, but the registry now matches it.
    jdksync_cmd(home.path())
        .args(["reconcile", project])
        .assert()
        .success()
        .stdout(contains("nothing to do"));
    jdksync_cmd(home.path())
        .args(["reconcile", project, "--force"])
        .assert()
        .success()
        .stdout(contains("1 replaced"));
}

#[test]
fn check_json_reports_statuses() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    let jdk_home = TempDir::new().expect("jdk home");
    let jdk_home = jdk_home.path().to_string_lossy().into_owned();
    write_table(workspace.path(), &[("11", "/declared/11"), ("17", "/declared/17")]);

    jdksync_cmd(home.path())
        .args(["registry", "add", "11", &jdk_home])
        .assert()
        .success();

    let output = jdksync_cmd(home.path())
        .args(["check", "--json"])
        .arg(workspace.path())
        .output()
        .expect("run check --json");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["present"], true);
    assert_eq!(json["diverged"], true);
    assert_eq!(json["entries"][0]["status"], "path_differs");
    assert_eq!(json["entries"][0]["registered"], jdk_home.as_str());
    assert_eq!(json["entries"][1]["status"], "missing");
    assert_eq!(json["digest"].as_str().map(str::len), Some(64));
}

#[test]
fn reconcile_without_table_fails() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");

    jdksync_cmd(home.path())
        .arg("reconcile")
        .arg(workspace.path())
        .assert()
        .failure()
        .stderr(contains("no JDK table file"));
}

#[test]
fn project_add_list_remove() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    let base = fs::canonicalize(workspace.path()).expect("canonicalize");

    jdksync_cmd(home.path())
        .args(["project", "add"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(contains("added project"));
    jdksync_cmd(home.path())
        .args(["project", "add"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(contains("already configured"));

    let config = WatchConfig::load_at(home.path()).expect("load config");
    assert_eq!(config.projects, vec![base.clone()]);

    jdksync_cmd(home.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains(base.to_string_lossy().as_ref()))
        .stdout(contains("no table"));

    jdksync_cmd(home.path())
        .args(["project", "remove"])
        .arg(workspace.path())
        .assert()
        .success();
    assert!(WatchConfig::load_at(home.path())
        .expect("load config")
        .projects
        .is_empty());
}

#[test]
fn watch_without_projects_fails() {
    let home = TempDir::new().expect("home");

    jdksync_cmd(home.path())
        .arg("watch")
        .assert()
        .failure()
        .stderr(contains("no projects"));
}
