//! End-to-end playback flows against a scripted stand-in player.
//!
//! The "player" is a tiny shell script that records its arguments and prints
//! whatever status output each scenario needs, so the whole
//! launch-parse-persist cycle runs without mpv installed.
#![cfg(unix)]

use chrono::Utc;
use mpv_recall::player::Launcher;
use mpv_recall::{Orchestrator, Outcome, Session, SessionError, SessionStore};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_fake_player(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-mpv");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn orchestrator(dir: &Path, player: &Path) -> Orchestrator {
    Orchestrator::new(
        SessionStore::new(dir.join("sessions.json")),
        Launcher::new(player.to_string_lossy().into_owned()),
        vec!["mp4".to_string(), "mkv".to_string()],
    )
}

#[test]
fn playing_a_file_saves_the_exit_position() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    let player = write_fake_player(
        dir.path(),
        &format!("echo '[mpvRecall]PATH:{}#POS:00:05:10'", media.display()),
    );
    let orch = orchestrator(dir.path(), &player);

    let outcome = orch.play_new(&media).unwrap();
    assert!(matches!(outcome, Outcome::Saved { .. }));

    let saved = orch.store().get(media.to_str().unwrap()).unwrap();
    assert_eq!(saved.last_played_position, 310.0);
    assert_eq!(saved.last_played_file, media.to_str().unwrap());
    assert!(!saved.is_folder);
}

#[test]
fn nonzero_player_exit_is_still_parsed() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    // mpv exits non-zero on user-initiated quit; the status still counts
    let player = write_fake_player(
        dir.path(),
        &format!(
            "echo '[mpvRecall]PATH:{}#POS:00:01:00'\nexit 3",
            media.display()
        ),
    );
    let orch = orchestrator(dir.path(), &player);

    let outcome = orch.play_new(&media).unwrap();
    assert!(matches!(outcome, Outcome::Saved { .. }));
}

#[test]
fn marker_line_on_stderr_is_captured() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    // mpv's terminal status can land on stderr depending on configuration
    let player = write_fake_player(
        dir.path(),
        &format!(
            "echo '[mpvRecall]PATH:{}#POS:00:07:00' >&2",
            media.display()
        ),
    );
    let orch = orchestrator(dir.path(), &player);

    let outcome = orch.play_new(&media).unwrap();
    assert!(matches!(outcome, Outcome::Saved { .. }));

    let saved = orch.store().get(media.to_str().unwrap()).unwrap();
    assert_eq!(saved.last_played_position, 420.0);
}

#[test]
fn stderr_marker_wins_over_earlier_stdout_marker() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    // stderr is scanned after stdout, so its marker is the later one
    let player = write_fake_player(
        dir.path(),
        &format!(
            "echo '[mpvRecall]PATH:{0}#POS:00:01:00'\n\
             echo '[mpvRecall]PATH:{0}#POS:00:09:30' >&2",
            media.display()
        ),
    );
    let orch = orchestrator(dir.path(), &player);

    let outcome = orch.play_new(&media).unwrap();
    assert!(matches!(outcome, Outcome::Saved { .. }));

    let saved = orch.store().get(media.to_str().unwrap()).unwrap();
    assert_eq!(saved.last_played_position, 570.0);
}

#[test]
fn silent_player_run_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    let player = write_fake_player(dir.path(), "true");
    let orch = orchestrator(dir.path(), &player);

    let outcome = orch.play_new(&media).unwrap();
    assert!(matches!(outcome, Outcome::NothingToSave { .. }));
    assert!(orch.store().load_all().is_empty());
}

#[test]
fn playing_a_folder_without_media_is_rejected_before_launch() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();

    // player would fail loudly if invoked; rejection must happen first
    let player = write_fake_player(dir.path(), "exit 99");
    let orch = orchestrator(dir.path(), &player);

    let result = orch.play_new(&empty);
    assert!(matches!(result, Err(SessionError::NoMedia { .. })));
}

#[test]
fn playing_a_missing_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let player = write_fake_player(dir.path(), "true");
    let orch = orchestrator(dir.path(), &player);

    let result = orch.play_new(Path::new("/no/such/file.mp4"));
    assert!(matches!(result, Err(SessionError::PathMissing { .. })));
}

#[test]
fn folder_resume_anchors_to_the_recorded_file() {
    let dir = TempDir::new().unwrap();
    let show = dir.path().join("show");
    fs::create_dir(&show).unwrap();
    for name in ["e01.mp4", "e02.mp4", "e03.mp4"] {
        fs::write(show.join(name), b"").unwrap();
    }

    let args_log = dir.path().join("args.log");
    let next_file = show.join("e03.mp4");
    let player = write_fake_player(
        dir.path(),
        &format!(
            "printf '%s\\n' \"$@\" > {}\necho '[mpvRecall]PATH:{}#POS:00:10:00'",
            args_log.display(),
            next_file.display()
        ),
    );
    let orch = orchestrator(dir.path(), &player);

    let anchor = show.join("e02.mp4");
    orch.store()
        .upsert(Session {
            original_path: show.to_string_lossy().into_owned(),
            is_folder: true,
            last_played_file: anchor.to_string_lossy().into_owned(),
            last_played_position: 100.0,
            last_played_timestamp: Utc::now(),
        })
        .unwrap();

    let outcome = orch.resume(show.to_str().unwrap()).unwrap();
    assert!(!outcome.was_reset());

    let args = fs::read_to_string(&args_log).unwrap();
    assert!(args.lines().any(|a| a == "--playlist-start=1"));
    let script_arg = args
        .lines()
        .find(|a| a.starts_with("--script="))
        .expect("folder resume should install the seek hook");
    // no plain --start flag when the hook carries the offset
    assert!(!args.lines().any(|a| a.starts_with("--start=")));

    // the temporary hook script is cleaned up after the player exits
    let script_path = script_arg.trim_start_matches("--script=");
    assert!(!Path::new(script_path).exists());

    // exit status folded back into the same keyed entry
    let updated = orch.store().get(show.to_str().unwrap()).unwrap();
    assert_eq!(updated.last_played_file, next_file.to_str().unwrap());
    assert_eq!(updated.last_played_position, 600.0);
    assert!(updated.is_folder);
}

#[test]
fn folder_resume_with_vanished_anchor_restarts_from_the_top() {
    let dir = TempDir::new().unwrap();
    let show = dir.path().join("show");
    fs::create_dir(&show).unwrap();
    fs::write(show.join("e01.mp4"), b"").unwrap();

    let args_log = dir.path().join("args.log");
    let player = write_fake_player(
        dir.path(),
        &format!("printf '%s\\n' \"$@\" > {}", args_log.display()),
    );
    let orch = orchestrator(dir.path(), &player);

    orch.store()
        .upsert(Session {
            original_path: show.to_string_lossy().into_owned(),
            is_folder: true,
            last_played_file: show.join("deleted.mp4").to_string_lossy().into_owned(),
            last_played_position: 500.0,
            last_played_timestamp: Utc::now(),
        })
        .unwrap();

    let outcome = orch.resume(show.to_str().unwrap()).unwrap();
    assert!(outcome.was_reset());
    assert!(matches!(outcome, Outcome::NothingToSave { .. }));

    let args = fs::read_to_string(&args_log).unwrap();
    assert!(!args.lines().any(|a| a.starts_with("--start=")));
    assert!(!args.lines().any(|a| a.starts_with("--playlist-start=")));
    assert!(!args.lines().any(|a| a.starts_with("--script=")));

    // the stale entry survives untouched until a new position is captured
    let kept = orch.store().get(show.to_str().unwrap()).unwrap();
    assert_eq!(kept.last_played_position, 500.0);
}

#[test]
fn file_resume_passes_the_stored_offset() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    let args_log = dir.path().join("args.log");
    let player = write_fake_player(
        dir.path(),
        &format!("printf '%s\\n' \"$@\" > {}", args_log.display()),
    );
    let orch = orchestrator(dir.path(), &player);

    orch.store()
        .upsert(Session {
            original_path: media.to_string_lossy().into_owned(),
            is_folder: false,
            last_played_file: media.to_string_lossy().into_owned(),
            last_played_position: 310.0,
            last_played_timestamp: Utc::now(),
        })
        .unwrap();

    orch.resume(media.to_str().unwrap()).unwrap();

    let args = fs::read_to_string(&args_log).unwrap();
    assert!(args.lines().any(|a| a == "--start=310"));
    assert!(!args.lines().any(|a| a.starts_with("--playlist-start=")));
}

#[test]
fn resuming_a_vanished_selection_fails_and_keeps_the_entry() {
    let dir = TempDir::new().unwrap();
    let player = write_fake_player(dir.path(), "true");
    let orch = orchestrator(dir.path(), &player);

    orch.store()
        .upsert(Session {
            original_path: "/gone/movie.mp4".to_string(),
            is_folder: false,
            last_played_file: "/gone/movie.mp4".to_string(),
            last_played_position: 42.0,
            last_played_timestamp: Utc::now(),
        })
        .unwrap();

    let result = orch.resume("/gone/movie.mp4");
    assert!(matches!(result, Err(SessionError::PathMissing { .. })));
    // deletion is the caller's decision, not ours
    assert!(orch.store().get("/gone/movie.mp4").is_some());
}

#[test]
fn resuming_an_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let player = write_fake_player(dir.path(), "true");
    let orch = orchestrator(dir.path(), &player);

    let result = orch.resume("/never/played.mp4");
    assert!(matches!(result, Err(SessionError::UnknownSession { .. })));
}

#[test]
fn insignificant_exit_position_keeps_the_prior_value() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    let player = write_fake_player(
        dir.path(),
        &format!("echo '[mpvRecall]PATH:{}#POS:00:00:01'", media.display()),
    );
    let orch = orchestrator(dir.path(), &player);

    orch.store()
        .upsert(Session {
            original_path: media.to_string_lossy().into_owned(),
            is_folder: false,
            last_played_file: media.to_string_lossy().into_owned(),
            last_played_position: 310.0,
            last_played_timestamp: Utc::now(),
        })
        .unwrap();

    let outcome = orch.resume(media.to_str().unwrap()).unwrap();
    assert!(matches!(outcome, Outcome::NothingToSave { .. }));

    let kept = orch.store().get(media.to_str().unwrap()).unwrap();
    assert_eq!(kept.last_played_position, 310.0);
}

#[test]
fn missing_player_reports_engine_missing() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("a.mp4");
    fs::write(&media, b"").unwrap();

    let orch = Orchestrator::new(
        SessionStore::new(dir.path().join("sessions.json")),
        Launcher::new("definitely-not-mpv"),
        vec!["mp4".to_string()],
    );

    let result = orch.play_new(&media);
    assert!(matches!(
        result,
        Err(SessionError::Player(
            mpv_recall::PlayerError::NotFound { .. }
        ))
    ));
    assert!(orch.store().load_all().is_empty());
}
