use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mods")).unwrap();
        fs::create_dir_all(dir.path().join("Balatro")).unwrap();
        fs::write(
            dir.path().join("deckpatch.toml"),
            format!(
                "mods_dir = '{}'\n[locator]\nsteam_roots = []\n[patch]\narchiver_candidates = ['deckpatch_no_such_archiver']\n",
                dir.path().join("mods").display()
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_deckpatch"))
            .arg("--config")
            .arg(self.path().join("deckpatch.toml"))
            .args(args)
            .current_dir(self.path())
            .env("DECKPATCH_LOG", "off")
            .output()
            .unwrap()
    }

    fn game_arg(&self) -> String {
        self.path().join("Balatro").display().to_string()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn info_prints_digest() {
    let env = Env::new();
    fs::write(env.path().join("mods/hearts.zip"), b"hello world").unwrap();

    let output = env.run(&["info", "hearts"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"));
}

#[test]
fn mods_lists_bundled_archives() {
    let env = Env::new();
    fs::write(env.path().join("mods/hearts.zip"), b"h").unwrap();
    fs::write(env.path().join("mods/spades.zip"), b"s").unwrap();

    let output = env.run(&["mods"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("hearts.zip"));
    assert!(out.contains("spades.zip"));
}

#[test]
fn install_without_binary_fails_cleanly() {
    let env = Env::new();
    fs::write(env.path().join("mods/hearts.zip"), b"h").unwrap();
    let game = env.game_arg();

    let output = env.run(&["install", "hearts", "--game", &game]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("target binary not found"));
    assert!(!env.path().join("Balatro/Balatro.exe.bak").exists());
}

#[test]
fn install_without_archiver_leaves_binary_untouched() {
    let env = Env::new();
    fs::write(env.path().join("mods/hearts.zip"), b"h").unwrap();
    fs::write(env.path().join("Balatro/Balatro.exe"), b"MZ").unwrap();
    let game = env.game_arg();

    let output = env.run(&["install", "hearts", "--game", &game]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no archiver found"));
    assert!(!env.path().join("Balatro/Balatro.exe.bak").exists());
}

#[test]
fn restore_with_no_backup_is_a_noop() {
    let env = Env::new();
    fs::write(env.path().join("Balatro/Balatro.exe"), b"MZ").unwrap();
    let game = env.game_arg();

    let output = env.run(&["restore", "--game", &game]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Nothing to restore"));
    assert_eq!(fs::read(env.path().join("Balatro/Balatro.exe")).unwrap(), b"MZ");
}

#[test]
fn missing_game_dir_is_reported() {
    let env = Env::new();
    let output = env.run(&["restore"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--game"));
}
