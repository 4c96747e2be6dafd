use assert_cmd::Command;
use assert_cmd::cargo;
use depot::install::SHORTCUT_EXTENSION;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Create a project folder with a `project.json` and a compiled artifact at
/// `outputs/<project>.jar`.
fn write_project(dir: &Path, descriptor: &str, project: &str) {
    fs::write(dir.join("project.json"), descriptor).unwrap();
    let outputs = dir.join("outputs");
    fs::create_dir_all(&outputs).unwrap();
    fs::write(outputs.join(format!("{project}.jar")), b"fake jar bytes").unwrap();
}

fn depot_cmd(project_dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("depot"));
    cmd.arg(project_dir)
        .arg("--home")
        .arg(home)
        .env_remove("DEPOT_HOME")
        .env_remove("DEPOT_PIPELINE")
        .env_remove("RUST_LOG");
    cmd
}

const COMPLETE_DESCRIPTOR: &str = r#"{
    "project": "fake-project",
    "publisher": "fake-publisher",
    "version": "fake-version"
}"#;

#[test]
fn test_fresh_install_publishes_descriptor_and_artifact() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    depot_cmd(project_dir.path(), home.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Installing..."))
        .stdout(predicates::str::contains("Done ("));

    let version_dir = home
        .path()
        .join("fake-publisher/fake-project/fake-version");
    assert!(version_dir.is_dir());
    assert_eq!(
        fs::read_to_string(version_dir.join("project.json")).unwrap(),
        COMPLETE_DESCRIPTOR
    );
    assert_eq!(
        fs::read(version_dir.join("fake-project.jar")).unwrap(),
        b"fake jar bytes"
    );

    // No main class declared: nothing but the publisher tree in the depot.
    let entries: Vec<_> = fs::read_dir(home.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_second_install_of_same_version_fails_and_modifies_nothing() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    depot_cmd(project_dir.path(), home.path()).assert().success();

    let version_dir = home
        .path()
        .join("fake-publisher/fake-project/fake-version");
    let published_jar = fs::read(version_dir.join("fake-project.jar")).unwrap();

    // Change the local artifact; the second attempt must not touch the
    // published copy.
    fs::write(
        project_dir.path().join("outputs/fake-project.jar"),
        b"rebuilt bytes",
    )
    .unwrap();

    depot_cmd(project_dir.path(), home.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "fake-publisher/fake-project:fake-version",
        ))
        .stderr(predicates::str::contains("already exists"));

    assert_eq!(
        fs::read(version_dir.join("fake-project.jar")).unwrap(),
        published_jar
    );
}

#[test]
fn test_missing_publisher_creates_nothing_under_home() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(
        project_dir.path(),
        r#"{"project": "fake-project", "version": "fake-version"}"#,
        "fake-project",
    );

    depot_cmd(project_dir.path(), home.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "A publisher property must be specified",
        ));

    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_artifact_is_reported_with_its_expected_path() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    fs::write(project_dir.path().join("project.json"), COMPLETE_DESCRIPTOR).unwrap();

    depot_cmd(project_dir.path(), home.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "Couldn't find a compiled project jar file at",
        ))
        .stderr(predicates::str::contains("fake-project.jar"));

    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_descriptor_is_a_parse_error() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();

    depot_cmd(project_dir.path(), home.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("ERROR: Failed to parse"))
        .stderr(predicates::str::contains("project.json"));
}

#[test]
fn test_executable_package_gets_a_shortcut() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(
        project_dir.path(),
        r#"{
            "project": "fake-project",
            "publisher": "fake-publisher",
            "version": "fake-version",
            "java": {
                "mainClass": "fake.Main",
                "dependencies": [
                    {"publisher": "pub-a", "project": "alpha", "version": "1"},
                    {"publisher": "pub-b", "project": "beta", "version": "2"}
                ]
            }
        }"#,
        "fake-project",
    );

    depot_cmd(project_dir.path(), home.path()).assert().success();

    let shortcut = home
        .path()
        .join(format!("fake-project.{SHORTCUT_EXTENSION}"));
    assert!(shortcut.is_file());

    let script = fs::read_to_string(&shortcut).unwrap();
    assert!(script.contains("fake.Main"));
    let primary = script
        .find("fake-publisher/fake-project/fake-version/fake-project.jar")
        .unwrap();
    let alpha = script.find("pub-a/alpha/1/alpha").unwrap();
    let beta = script.find("pub-b/beta/2/beta").unwrap();
    assert!(primary < alpha && alpha < beta);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&shortcut).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn test_declared_shortcut_name_wins_and_newest_install_takes_it() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(
        project_dir.path(),
        r#"{
            "project": "fake-project",
            "publisher": "fake-publisher",
            "version": "1",
            "java": {"mainClass": "fake.Main", "shortcutName": "fake"}
        }"#,
        "fake-project",
    );

    depot_cmd(project_dir.path(), home.path()).assert().success();

    let shortcut = home.path().join(format!("fake.{SHORTCUT_EXTENSION}"));
    assert!(fs::read_to_string(&shortcut)
        .unwrap()
        .contains("fake-publisher/fake-project/1/fake-project.jar"));

    // Version 2 of the same package takes over the shortcut name.
    write_project(
        project_dir.path(),
        r#"{
            "project": "fake-project",
            "publisher": "fake-publisher",
            "version": "2",
            "java": {"mainClass": "fake.Main", "shortcutName": "fake"}
        }"#,
        "fake-project",
    );

    depot_cmd(project_dir.path(), home.path()).assert().success();
    assert!(fs::read_to_string(&shortcut)
        .unwrap()
        .contains("fake-publisher/fake-project/2/fake-project.jar"));
}

#[test]
fn test_verbose_logs_copy_notices() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    depot_cmd(project_dir.path(), home.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicates::str::contains("Copying"));
}

#[cfg(unix)]
#[test]
fn test_failing_pipeline_skips_install() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    depot_cmd(project_dir.path(), home.path())
        .env("DEPOT_PIPELINE", "false")
        .assert()
        .failure()
        .stderr(predicates::str::contains("build/test pipeline failed"));

    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_passing_pipeline_proceeds() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    depot_cmd(project_dir.path(), home.path())
        .env("DEPOT_PIPELINE", "true")
        .assert()
        .success();

    assert!(home
        .path()
        .join("fake-publisher/fake-project/fake-version/fake-project.jar")
        .is_file());
}

#[test]
fn test_folder_flag_wins_over_positional() {
    let real_project = tempdir().unwrap();
    let decoy = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(real_project.path(), COMPLETE_DESCRIPTOR, "fake-project");

    let mut cmd = Command::new(cargo::cargo_bin!("depot"));
    cmd.arg(decoy.path())
        .arg("--folder")
        .arg(real_project.path())
        .arg("--home")
        .arg(home.path())
        .env_remove("DEPOT_HOME")
        .env_remove("DEPOT_PIPELINE")
        .env_remove("RUST_LOG");

    cmd.assert().success();
    assert!(home
        .path()
        .join("fake-publisher/fake-project/fake-version")
        .is_dir());
}

#[test]
fn test_home_env_variable_is_honored() {
    let project_dir = tempdir().unwrap();
    let home = tempdir().unwrap();
    write_project(project_dir.path(), COMPLETE_DESCRIPTOR, "fake-project");

    let mut cmd = Command::new(cargo::cargo_bin!("depot"));
    cmd.arg(project_dir.path())
        .env("DEPOT_HOME", home.path())
        .env_remove("DEPOT_PIPELINE")
        .env_remove("RUST_LOG");

    cmd.assert().success();
    assert!(home
        .path()
        .join("fake-publisher/fake-project/fake-version")
        .is_dir());
}

#[test]
fn test_unknown_flag_prints_usage_and_installs_nothing() {
    let home = tempdir().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("depot"));
    cmd.arg("--frobnicate")
        .arg("--home")
        .arg(home.path())
        .env_remove("DEPOT_HOME");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Usage"));
    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}
