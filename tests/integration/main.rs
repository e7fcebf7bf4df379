//! Integration tests for Kiln

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn kiln() -> Command {
        cargo_bin_cmd!("kiln")
    }

    /// Isolated config, caches and SDK root under a temp directory
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();
            let config = format!(
                "[paths]\nartifact_cache = {:?}\nbuild_cache = {:?}\n",
                root.join("cache/artifacts.json").display().to_string(),
                root.join("cache/builds.json").display().to_string(),
            );
            fs::write(root.join("config.toml"), config).unwrap();
            Self { dir }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn sdk_root(&self) -> PathBuf {
            self.path().join("sdks")
        }

        fn cmd(&self) -> Command {
            let mut cmd = kiln();
            cmd.env("KILN_CONFIG", self.path().join("config.toml"))
                .env("KILN_SDK_ROOT", self.sdk_root())
                .env("KILN_NO_PROGRESS", "1")
                .env_remove("RUST_LOG");
            cmd
        }

        /// Source tree plus an output file for build checks
        fn project(&self) -> (PathBuf, PathBuf) {
            let src = self.path().join("app/src");
            fs::create_dir_all(&src).unwrap();
            fs::write(src.join("main.rs"), "fn main() {}\n").unwrap();
            let out = self.path().join("app/out.bin");
            fs::write(&out, "binary").unwrap();
            (src, out)
        }

        fn build(&self, action: &str, src: &Path, out: &Path) -> Command {
            let mut cmd = self.cmd();
            cmd.args(["build", action, "--project", "app", "--platform", "linux"])
                .arg("--source")
                .arg(src)
                .arg("--output")
                .arg(out);
            cmd
        }
    }

    #[test]
    fn help_displays() {
        kiln()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("idempotent SDK installs"));
    }

    #[test]
    fn version_displays() {
        kiln()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("kiln"));
    }

    #[test]
    fn config_path_honours_env() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("effective sdk_root"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let sb = Sandbox::new();
        fs::write(sb.path().join("config.toml"), "[paths\n").unwrap();
        sb.cmd()
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn resolve_sdk_prefix() {
        let sb = Sandbox::new();
        let expected = sb.sdk_root().join("android-ndk");
        sb.cmd()
            .args(["resolve", "sdks/android-ndk"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_absolute_unchanged() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["resolve", "/opt/tools/go"])
            .assert()
            .success()
            .stdout("/opt/tools/go\n");
    }

    #[test]
    fn hash_is_stable() {
        let sb = Sandbox::new();
        let (src, _) = sb.project();

        let first = sb.cmd().arg("hash").arg(&src).assert().success();
        let first = String::from_utf8(first.get_output().stdout.clone()).unwrap();
        assert_eq!(first.trim().len(), 64);

        sb.cmd()
            .arg("hash")
            .arg(&src)
            .assert()
            .success()
            .stdout(first);
    }

    #[test]
    fn hash_missing_dir_fails() {
        let sb = Sandbox::new();
        sb.cmd()
            .arg("hash")
            .arg(sb.path().join("nope"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn build_check_then_record() {
        let sb = Sandbox::new();
        let (src, out) = sb.project();

        sb.build("check", &src, &out)
            .assert()
            .success()
            .stdout(predicate::str::contains("rebuild: no previous build"));

        sb.build("record", &src, &out).assert().success();

        sb.build("check", &src, &out)
            .assert()
            .success()
            .stdout("up to date\n");
    }

    #[test]
    fn build_source_change_detected() {
        let sb = Sandbox::new();
        let (src, out) = sb.project();
        sb.build("record", &src, &out).assert().success();

        fs::write(src.join("lib.rs"), "pub fn added() {}\n").unwrap();

        sb.build("check", &src, &out)
            .assert()
            .success()
            .stdout(predicate::str::contains("rebuild: source files changed"));
    }

    #[test]
    fn build_failed_record_forces_rebuild() {
        let sb = Sandbox::new();
        let (src, out) = sb.project();
        sb.build("record", &src, &out).arg("--failed").assert().success();

        sb.build("check", &src, &out)
            .arg("--exit-code")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("rebuild: previous build failed"));
    }

    #[test]
    fn build_list_and_forget() {
        let sb = Sandbox::new();
        let (src, out) = sb.project();
        sb.build("record", &src, &out).assert().success();

        sb.cmd()
            .args(["build", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("app:linux\n");

        sb.cmd()
            .args(["build", "forget", "--project", "app", "--platform", "linux"])
            .assert()
            .success();

        sb.build("check", &src, &out)
            .assert()
            .success()
            .stdout(predicate::str::contains("no previous build"));
    }

    #[test]
    fn cache_list_empty() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached artifacts"));
    }

    #[test]
    fn cache_path_lists_files() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("artifacts.json"))
            .stdout(predicate::str::contains("builds.json"));
    }

    #[test]
    fn manual_install_missing_fails_without_side_effects() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["install", "--name", "xcode", "--version", "15.4"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Manual installation required for xcode"));

        assert!(!sb.sdk_root().join("xcode").exists());
        assert!(!sb.path().join("cache/artifacts.json").exists());
    }

    #[test]
    fn manual_install_adopts_existing_dir() {
        let sb = Sandbox::new();
        fs::create_dir_all(sb.sdk_root().join("xcode")).unwrap();

        sb.cmd()
            .args(["install", "--name", "xcode", "--version", "15.4"])
            .assert()
            .success();

        sb.cmd()
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("xcode\n");

        sb.cmd()
            .args(["cache", "list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"installPath\": \"sdks/xcode\""));
    }

    #[test]
    fn install_from_manifest() {
        let sb = Sandbox::new();
        fs::create_dir_all(sb.sdk_root().join("jdk")).unwrap();
        let manifest = sb.path().join("kiln.toml");
        fs::write(
            &manifest,
            "[[sdk]]\nname = \"openjdk\"\nversion = \"21\"\ninstall_path = \"sdks/jdk\"\n",
        )
        .unwrap();

        sb.cmd()
            .args(["install", "-f"])
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains("JAVA_HOME"));

        // Second run is served from the cache
        sb.cmd()
            .args(["install", "-f"])
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains("cached"));
    }

    #[test]
    fn install_rejects_bad_checksum() {
        let sb = Sandbox::new();
        sb.cmd()
            .args([
                "install",
                "--name",
                "tool",
                "--version",
                "1",
                "--url",
                "https://example.invalid/tool.zip",
                "--checksum",
                "md5:abcdef",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid checksum"));
    }

    #[test]
    fn install_refuses_sdk_root_and_foreign_dirs() {
        let sb = Sandbox::new();
        let ndk = sb.sdk_root().join("ndk");
        fs::create_dir_all(&ndk).unwrap();
        fs::write(ndk.join("source.properties"), "Pkg.Revision = 26\n").unwrap();
        let download = [
            "--name",
            "tool",
            "--version",
            "1",
            "--url",
            "https://example.invalid/tool.zip",
        ];

        sb.cmd()
            .arg("install")
            .args(download)
            .args(["--path", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("resolves to the SDK root"));

        sb.cmd()
            .arg("install")
            .args(download)
            .args(["--path", "sdks/ndk"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already holds files kiln did not install"));

        assert!(ndk.join("source.properties").is_file());
    }

    #[test]
    fn cache_remove_and_clear() {
        let sb = Sandbox::new();
        fs::create_dir_all(sb.sdk_root().join("a")).unwrap();
        fs::create_dir_all(sb.sdk_root().join("b")).unwrap();
        for name in ["a", "b"] {
            sb.cmd()
                .args(["install", "--name", name, "--version", "1"])
                .assert()
                .success();
        }

        sb.cmd().args(["cache", "remove", "a"]).assert().success();
        sb.cmd()
            .args(["cache", "remove", "a"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cached artifact named 'a'"));

        sb.cmd().args(["cache", "clear", "--yes"]).assert().success();
        sb.cmd()
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("");
        assert!(sb.sdk_root().join("b").exists());
    }
}
