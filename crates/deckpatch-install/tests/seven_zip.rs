#![cfg(unix)]

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use deckpatch_archive::StageOptions;
use deckpatch_install::{GameConfig, GameInstallation, InstallError, Installer, PatchConfig, PatchError, SevenZip};
use zip::write::SimpleFileOptions;

/// A stand-in archiver: logs its working directory, arguments and the staged
/// files, then runs `tail`.
fn fake_archiver(dir: &Path, log: &Path, tail: &str) -> PathBuf {
    let script = dir.join("fake7z");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n{{ pwd; for a in \"$@\"; do echo \"$a\"; done; ls resources/textures/2x; }} > '{}'\n{tail}\n",
            log.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn setup(tail: &str, timeout: Option<Duration>) -> (tempfile::TempDir, GameInstallation, PathBuf, PathBuf, Installer<SevenZip>) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Balatro");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("Balatro.exe"), b"MZ original").unwrap();
    let game = GameInstallation::open(&root, &GameConfig::default()).unwrap();

    let archive = dir.path().join("deck.zip");
    let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
    zip.start_file("resources/textures/2x/8BitDeck.png", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"deck").unwrap();
    zip.finish().unwrap();

    let log = dir.path().join("archiver.log");
    let script = fake_archiver(dir.path(), &log, tail);
    let updater = SevenZip::new(vec![script.display().to_string()], timeout);
    let installer = Installer::new(updater, &PatchConfig::default())
        .stage_options(StageOptions::default().staging_parent(dir.path()));

    (dir, game, archive, log, installer)
}

#[test]
fn invokes_update_verb_from_staging_dir() {
    let (_dir, game, archive, log, installer) = setup("exit 0", None);

    let outcome = installer.install(&game, &archive).unwrap();
    assert!(outcome.result.success);

    let logged = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = logged.lines().collect();
    assert!(lines[0].contains("deckpatch-mod-"));
    assert_eq!(lines[1], "u");
    assert_eq!(lines[2], "-y");
    assert_eq!(Path::new(lines[3]), game.executable());
    assert_eq!(lines[4], "resources/textures/2x/*");
    assert_eq!(lines[5], "8BitDeck.png");
}

#[test]
fn nonzero_exit_is_external_tool_error() {
    let (_dir, game, archive, _log, installer) = setup("echo 'cannot open output file' >&2; exit 2", None);

    let err = installer.install(&game, &archive).unwrap_err();

    match err {
        InstallError::Patch(PatchError::ExternalTool { code, stderr, .. }) => {
            assert_eq!(code, Some(2));
            assert!(stderr.contains("cannot open output file"));
        }
        other => panic!("expected ExternalTool, got {other:?}"),
    }
    assert_eq!(fs::read(game.root().join("Balatro.exe.bak")).unwrap(), b"MZ original");
}

#[test]
fn hung_archiver_is_killed() {
    let (_dir, game, archive, _log, installer) = setup("sleep 30", Some(Duration::from_millis(300)));

    let err = installer.install(&game, &archive).unwrap_err();

    assert!(matches!(err, InstallError::Patch(PatchError::TimedOut { .. })));
    assert!(game.root().join("Balatro.exe.bak").exists());
}
