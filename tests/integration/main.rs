//! Integration tests for chathead

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn chathead() -> Command {
        cargo_bin_cmd!("chathead")
    }

    #[test]
    fn help_displays() {
        chathead()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("player head avatars"));
    }

    #[test]
    fn version_displays() {
        chathead()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("chathead"));
    }

    #[test]
    fn render_help() {
        chathead()
            .args(["render", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Render a player head"));
    }

    #[test]
    fn render_zero_size_fails_fast() {
        chathead()
            .args(["render", "notch", "--size", "0", "--no-cache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid avatar size"));
    }

    #[test]
    fn render_unsafe_identifier_fails_fast() {
        chathead()
            .args(["render", "../escape", "--no-cache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid avatar identifier"));
    }

    #[test]
    fn config_path() {
        chathead()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        chathead()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[provider]"));
    }

    #[test]
    fn config_show_respects_override_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[display]\npage_width = 40\n").unwrap();

        chathead()
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("page_width = 40"));
    }
}
