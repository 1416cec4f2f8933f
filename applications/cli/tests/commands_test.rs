//! CLI command tests
//!
//! Every `run` restores a new player from the state file, the same way
//! separate `songbox` invocations do.

mod common;

use common::TestLibrary;
use songbox_cli::CliError;
use songbox_core::{RepeatMode, SongId};
use songbox_playback::Notice;
use std::fs;

#[test]
fn test_added_song_is_listed_after_restart() {
    let lib = TestLibrary::new();

    let report = lib
        .run(&[
            "add",
            "--title",
            "  Morning ",
            "--artist",
            "Ana",
            "--url",
            "https://example.com/morning.mp3",
            "--duration",
            "3:05",
        ])
        .unwrap();

    assert_eq!(report.notices, vec![Notice::Added]);
    let id = report.lines[0].clone();

    let saved = lib.saved().unwrap();
    assert_eq!(saved.songs.len(), 1);
    assert_eq!(saved.songs[0].id, SongId::new(id.as_str()));
    assert_eq!(saved.songs[0].title, "Morning");
    assert_eq!(saved.songs[0].duration_sec, Some(185.0));

    let listing = lib.lines(&["list"]);
    assert_eq!(listing.len(), 1);
    assert!(listing[0].contains("Morning - Ana"));
    assert!(listing[0].contains("3:05"));
}

#[test]
fn test_add_rejects_bad_input() {
    let lib = TestLibrary::new();

    let err = lib
        .run(&["add", "--title", "x", "--url", "https://e/x.mp3", "--duration", "3:75"])
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));

    let err = lib.run(&["add", "--title", "x", "--url", "  "]).unwrap_err();
    assert!(matches!(err, CliError::Core(_)));

    assert!(lib.saved().is_none());
}

#[test]
fn test_add_and_play_starts_song() {
    let lib = TestLibrary::new();

    let report = lib
        .run(&["add", "--url", "https://example.com/a.mp3", "--play"])
        .unwrap();

    assert!(report.notices.contains(&Notice::Added));
    assert!(report.notices.contains(&Notice::Playing));

    let saved = lib.saved().unwrap();
    assert_eq!(saved.songs[0].title, "Untitled");
    assert_eq!(saved.now_playing_id.as_ref(), Some(&saved.songs[0].id));
    assert_eq!(saved.queue_ids, vec![saved.songs[0].id.clone()]);
}

#[test]
fn test_temporary_song_does_not_survive_restart() {
    let lib = TestLibrary::new();

    let report = lib
        .run(&["add", "--title", "Local", "--url", "blob:local", "--temporary", "--play"])
        .unwrap();
    assert!(report.notices.contains(&Notice::AddedTemporary));

    assert!(lib.lines(&["list"]).is_empty());
    let saved = lib.saved().unwrap();
    assert!(saved.songs.is_empty());
    assert!(saved.queue_ids.is_empty());
    assert!(saved.now_playing_id.is_none());
}

#[test]
fn test_edit_updates_fields() {
    let lib = TestLibrary::new();
    let id = lib.add("Draft");

    let report = lib
        .run(&["edit", id.as_str(), "--title", "Final", "--duration", "1:00"])
        .unwrap();
    assert_eq!(report.notices, vec![Notice::Saved]);

    let song = lib.saved().unwrap().songs.remove(0);
    assert_eq!(song.title, "Final");
    assert_eq!(song.duration_sec, Some(60.0));

    lib.run(&["edit", id.as_str(), "--duration", ""]).unwrap();
    assert_eq!(lib.saved().unwrap().songs[0].duration_sec, None);
}

#[test]
fn test_song_reference_accepts_unique_prefix() {
    let lib = TestLibrary::new();
    let import = lib.path("import.json");
    fs::write(
        &import,
        r#"[
            {"id":"abc-1","title":"One","audioUrl":"https://example.com/1.mp3"},
            {"id":"abc-2","title":"Two","audioUrl":"https://example.com/2.mp3"},
            {"id":"xyz","title":"Three","audioUrl":"https://example.com/3.mp3"}
        ]"#,
    )
    .unwrap();
    lib.run(&["import", import.to_str().unwrap()]).unwrap();

    lib.run(&["enqueue", "xy"]).unwrap();
    lib.run(&["enqueue", "abc-2"]).unwrap();
    assert_eq!(
        lib.saved().unwrap().queue_ids,
        vec![SongId::new("xyz"), SongId::new("abc-2")]
    );

    assert!(matches!(
        lib.run(&["enqueue", "abc"]).unwrap_err(),
        CliError::AmbiguousSong(_)
    ));
    assert!(matches!(
        lib.run(&["enqueue", "nope"]).unwrap_err(),
        CliError::UnknownSong(_)
    ));
}

#[test]
fn test_queue_commands_use_one_based_positions() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    let b = lib.add("B");
    let c = lib.add("C");
    for id in [a.as_str(), b.as_str(), c.as_str()] {
        lib.run(&["enqueue", id]).unwrap();
    }

    lib.run(&["move", "3", "1"]).unwrap();
    lib.run(&["down", "2"]).unwrap();
    let queue = lib.lines(&["queue"]);
    assert_eq!(queue, vec!["   1. C", "   2. B", "   3. A"]);

    lib.run(&["up", "1"]).unwrap();
    lib.run(&["dequeue", "2"]).unwrap();
    assert_eq!(lib.lines(&["queue"]), vec!["   1. C", "   2. A"]);

    let err = lib.run(&["dequeue", "0"]).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
    let err = lib.run(&["up", "3"]).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
}

#[test]
fn test_play_next_and_previous_walk_the_queue() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    let b = lib.add("B");
    lib.run(&["enqueue", a.as_str()]).unwrap();
    lib.run(&["enqueue", b.as_str()]).unwrap();

    lib.run(&["play", a.as_str()]).unwrap();
    lib.run(&["next"]).unwrap();
    assert_eq!(lib.saved().unwrap().now_playing_id, Some(SongId::new(b.as_str())));

    let report = lib.run(&["next"]).unwrap();
    assert_eq!(report.notices, vec![Notice::EndOfQueue]);
    assert_eq!(lib.saved().unwrap().now_playing_id, Some(SongId::new(b.as_str())));

    lib.run(&["prev"]).unwrap();
    assert_eq!(lib.saved().unwrap().now_playing_id, Some(SongId::new(a.as_str())));

    let report = lib.run(&["prev"]).unwrap();
    assert_eq!(report.notices, vec![Notice::NoPreviousTrack]);
}

#[test]
fn test_ended_wraps_with_repeat_all() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    let b = lib.add("B");
    lib.run(&["enqueue", a.as_str()]).unwrap();
    lib.run(&["play", b.as_str()]).unwrap();

    let report = lib.run(&["repeat", "all"]).unwrap();
    assert_eq!(report.notices, vec![Notice::Repeat(RepeatMode::All)]);

    lib.run(&["ended"]).unwrap();
    assert_eq!(lib.saved().unwrap().now_playing_id, Some(SongId::new(a.as_str())));
}

#[test]
fn test_toggle_starts_newest_song_when_idle() {
    let lib = TestLibrary::new();
    assert_eq!(
        lib.run(&["toggle"]).unwrap().notices,
        vec![Notice::AddSongFirst]
    );

    lib.run(&["seed"]).unwrap();
    let report = lib.run(&["toggle"]).unwrap();
    assert!(report.notices.contains(&Notice::Playing));

    let saved = lib.saved().unwrap();
    assert!(saved.now_playing_id.is_some());
    assert_eq!(saved.queue_ids.len(), 1);
}

#[test]
fn test_toggle_restarts_current_song_in_a_new_invocation() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    let b = lib.add("B");
    lib.run(&["enqueue", a.as_str()]).unwrap();
    lib.run(&["play", b.as_str()]).unwrap();

    let report = lib.run(&["toggle"]).unwrap();

    assert!(report.notices.contains(&Notice::Playing));
    let saved = lib.saved().unwrap();
    assert_eq!(saved.now_playing_id, Some(SongId::new(b.as_str())));
    assert_eq!(saved.queue_ids.len(), 2);
}

#[test]
fn test_modes_cycle_and_show_in_status() {
    let lib = TestLibrary::new();

    lib.run(&["shuffle"]).unwrap();
    lib.run(&["repeat"]).unwrap();
    lib.run(&["repeat"]).unwrap();

    let status = lib.lines(&["status"]);
    assert_eq!(status[0], "Now playing: nothing");
    assert!(status[1].contains("Shuffle: on"));
    assert!(status[1].contains("Repeat: one"));

    lib.run(&["shuffle", "off"]).unwrap();
    assert!(!lib.saved().unwrap().shuffle);
}

#[test]
fn test_removing_now_playing_goes_idle() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    lib.run(&["play", a.as_str()]).unwrap();

    let report = lib.run(&["rm", a.as_str()]).unwrap();
    assert_eq!(report.lines, vec!["Removed A"]);
    assert!(report.notices.contains(&Notice::Deleted));

    let saved = lib.saved().unwrap();
    assert!(saved.songs.is_empty());
    assert!(saved.queue_ids.is_empty());
    assert!(saved.now_playing_id.is_none());
}

#[test]
fn test_clear_queue_stops_playback() {
    let lib = TestLibrary::new();
    let a = lib.add("A");
    lib.run(&["play", a.as_str()]).unwrap();

    let report = lib.run(&["clear"]).unwrap();
    assert!(report.notices.contains(&Notice::QueueCleared));

    let saved = lib.saved().unwrap();
    assert_eq!(saved.songs.len(), 1);
    assert!(saved.now_playing_id.is_none());
}

#[test]
fn test_export_then_import_into_another_library() {
    let source = TestLibrary::new();
    source.add("Keep");
    source
        .run(&["add", "--title", "Session", "--url", "blob:x", "--temporary"])
        .unwrap();

    let out = source.path("export.json");
    source.run(&["export", out.to_str().unwrap()]).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["songs"].as_array().unwrap().len(), 1);

    let target = TestLibrary::new();
    let report = target.run(&["import", out.to_str().unwrap()]).unwrap();
    assert_eq!(report.lines, vec!["Imported 1 songs"]);
    assert_eq!(report.notices, vec![Notice::Imported]);
    assert_eq!(target.saved().unwrap().songs[0].title, "Keep");
}

#[test]
fn test_import_without_songs_is_rejected() {
    let lib = TestLibrary::new();
    let file = lib.path("empty.json");
    fs::write(&file, r#"{"songs": []}"#).unwrap();

    let err = lib.run(&["import", file.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, CliError::Storage(_)));
}

#[test]
fn test_export_to_stdout() {
    let lib = TestLibrary::new();
    lib.add("A");

    let lines = lib.lines(&["export"]);
    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(json["songs"][0]["title"], "A");
}

#[test]
fn test_list_search_and_sort() {
    let lib = TestLibrary::new();
    lib.add("Beta");
    lib.add("alpha");
    lib.add("Gamma");

    let lines = lib.lines(&["list", "--sort", "title", "--asc"]);
    let titles: Vec<_> = lines
        .iter()
        .map(|line| line.split_whitespace().nth(2).unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["alpha", "Beta", "Gamma"]);

    assert_eq!(lib.lines(&["list", "--search", "GAM"]).len(), 1);
}

#[test]
fn test_reset_clears_everything() {
    let lib = TestLibrary::new();
    lib.run(&["seed"]).unwrap();
    lib.run(&["repeat", "one"]).unwrap();

    let report = lib.run(&["reset"]).unwrap();
    assert!(report.notices.contains(&Notice::Reset));

    let saved = lib.saved().unwrap();
    assert!(saved.songs.is_empty());
    assert_eq!(saved.repeat, RepeatMode::Off);
}

#[test]
fn test_dry_run_leaves_state_file_untouched() {
    let lib = TestLibrary::new();
    lib.add("A");
    let before = lib.saved();

    let report = lib.dry_run(&["seed"]).unwrap();
    assert_eq!(report.notices, vec![Notice::SamplesAdded]);

    assert_eq!(lib.saved(), before);
    assert_eq!(lib.lines(&["list"]).len(), 1);
}

#[test]
fn test_unwritable_state_reports_save_failure() {
    let mut lib = TestLibrary::new();
    let blocker = lib.path("blocker");
    fs::write(&blocker, "file").unwrap();
    lib.settings.storage.state_path = blocker.join("state.json");

    let report = lib.run(&["seed"]).unwrap();

    assert!(report
        .notices
        .iter()
        .any(|notice| matches!(notice, Notice::SaveFailed(_))));
}
