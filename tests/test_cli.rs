mod helpers;

use anyhow::Result;
use clap::Parser;
use helpers::{sample_notes, TestNotesRoot};
use notedir::cli::args::{Args, Command, PrefsAction};
use notedir::run_with_io;
use std::path::PathBuf;

/// Run the CLI against a notes root and capture stdout
fn run_cli(notes: &TestNotesRoot, argv: &[&str], stdin: &str) -> Result<String> {
    let root = notes.root.to_string_lossy().into_owned();
    let mut full = vec!["notedir", "--root", root.as_str()];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full)?;

    let mut input = stdin.as_bytes();
    let mut out = Vec::new();
    run_with_io(args, &mut input, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["notedir", "notes/a.md"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_serve_command_with_overrides_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["notedir", "serve", "--host", "0.0.0.0", "--port", "8080"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Serve { host, port } => {
            assert_eq!(host.as_deref(), Some("0.0.0.0"));
            assert_eq!(port, Some(8080));
        }
        _ => panic!("Expected Serve command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.root, None);
}

#[test]
fn given_invalid_port_when_parsing_then_fails() {
    let result = Args::try_parse_from(vec!["notedir", "serve", "--port", "99999"]);

    assert!(result.is_err());
}

#[test]
fn given_global_root_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec!["notedir", "read", "-r", "/srv/notes", "a/b.txt"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Read { note } => assert_eq!(note, "a/b.txt"),
        _ => panic!("Expected Read command"),
    }
    assert_eq!(parsed.root, Some(PathBuf::from("/srv/notes")));
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    let parsed = Args::try_parse_from(vec!["notedir", "-vv", "list"]).unwrap();

    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_write_without_content_when_parsing_then_content_is_none() {
    let parsed = Args::try_parse_from(vec!["notedir", "write", "x.md"]).unwrap();

    match parsed.command {
        Command::Write { note, content } => {
            assert_eq!(note, "x.md");
            assert_eq!(content, None);
        }
        _ => panic!("Expected Write command"),
    }
}

#[test]
fn given_prefs_set_backend_when_parsing_then_succeeds() {
    let parsed =
        Args::try_parse_from(vec!["notedir", "prefs", "set-backend", "http://h:1"]).unwrap();

    match parsed.command {
        Command::Prefs { file, action } => {
            assert_eq!(file, None);
            assert_eq!(
                action,
                PrefsAction::SetBackend {
                    url: "http://h:1".to_string()
                }
            );
        }
        _ => panic!("Expected Prefs command"),
    }
}

#[test]
fn given_sample_notes_when_listing_then_prints_indented_tree() -> Result<()> {
    let notes = TestNotesRoot::new()?;
    notes.add_file("a/b.txt", "hello")?;
    notes.add_dir("c")?;

    let output = run_cli(&notes, &["list"], "")?;

    assert_eq!(output, "a/\n  b.txt\nc/\n");
    Ok(())
}

#[test]
fn given_sample_notes_when_listing_json_then_prints_tree_json() -> Result<()> {
    let notes = TestNotesRoot::with_sample_notes()?;

    let output = run_cli(&notes, &["list", "--json"], "")?;

    let value: serde_json::Value = serde_json::from_str(&output)?;
    let ids: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["id"].as_str())
        .collect();
    assert!(ids.contains(&"journal"));
    assert!(ids.contains(&sample_notes::README));
    Ok(())
}

#[test]
fn given_sample_notes_when_listing_ids_then_prints_one_note_per_line() -> Result<()> {
    let notes = TestNotesRoot::new()?;
    notes.add_file("a/b.txt", "hello")?;
    notes.add_file("top.md", "")?;
    notes.add_dir("c")?;

    let output = run_cli(&notes, &["list", "--ids"], "")?;

    let mut lines: Vec<&str> = output.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["a/b.txt", "top.md"]);
    Ok(())
}

#[test]
fn given_json_and_ids_flags_when_parsing_then_fails() {
    let result = Args::try_parse_from(vec!["notedir", "list", "--json", "--ids"]);

    assert!(result.is_err());
}

#[test]
fn given_content_flag_when_writing_then_read_prints_it() -> Result<()> {
    let notes = TestNotesRoot::new()?;

    let written = run_cli(&notes, &["write", "x/y/z.txt", "--content", "hi"], "")?;
    let read = run_cli(&notes, &["read", "x/y/z.txt"], "")?;

    assert_eq!(written, "Wrote x/y/z.txt\n");
    assert_eq!(read, "hi");
    Ok(())
}

#[test]
fn given_stdin_when_writing_without_content_then_stores_stdin() -> Result<()> {
    let notes = TestNotesRoot::new()?;

    run_cli(&notes, &["write", "piped.md"], "from stdin\n")?;

    assert_eq!(std::fs::read_to_string(notes.path_of("piped.md"))?, "from stdin\n");
    Ok(())
}

#[test]
fn given_existing_note_when_deleting_then_removes_file() -> Result<()> {
    let notes = TestNotesRoot::with_sample_notes()?;

    let output = run_cli(&notes, &["delete", sample_notes::HELLO], "")?;

    assert_eq!(output, "Deleted a/b.txt\n");
    assert!(!notes.path_of(sample_notes::HELLO).exists());
    Ok(())
}

#[test]
fn given_missing_note_when_reading_then_returns_error() -> Result<()> {
    let notes = TestNotesRoot::new()?;

    let result = run_cli(&notes, &["read", sample_notes::NONEXISTENT], "");

    assert!(result.is_err());
    Ok(())
}

#[test]
fn given_missing_root_when_listing_then_returns_error() -> Result<()> {
    let notes = TestNotesRoot::new()?;
    std::fs::remove_dir(&notes.root)?;

    let result = run_cli(&notes, &["list"], "");

    assert!(result.is_err());
    Ok(())
}

#[test]
fn given_missing_root_when_writing_then_creates_root() -> Result<()> {
    let notes = TestNotesRoot::new()?;
    std::fs::remove_dir(&notes.root)?;

    run_cli(&notes, &["write", "first.md", "--content", "1"], "")?;

    assert!(notes.path_of("first.md").exists());
    Ok(())
}

#[test]
fn given_prefs_file_when_toggling_theme_then_persists_between_runs() -> Result<()> {
    let notes = TestNotesRoot::new()?;
    let prefs = notes.outside().join("prefs.json");
    let prefs = prefs.to_string_lossy().into_owned();

    let first = run_cli(&notes, &["prefs", "--file", prefs.as_str(), "toggle-theme"], "")?;
    run_cli(&notes, &["prefs", "--file", prefs.as_str(), "set-backend", "https://notes.example/"], "")?;
    let shown = run_cli(&notes, &["prefs", "--file", prefs.as_str(), "show"], "")?;

    assert_eq!(first, "theme: dark\n");
    assert_eq!(shown, "theme: dark\nbackend_url: https://notes.example\n");
    Ok(())
}
