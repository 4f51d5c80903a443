use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Lays out `pages` as 40px lines of 20px chars. A trailing '\n' marks the
/// end of a paragraph.
fn document(pages: &[&[&str]]) -> Value {
    let mut read_length = 0;
    let pages: Vec<Value> = pages
        .iter()
        .enumerate()
        .map(|(index, lines)| {
            let chapter = json!({ "title": "Opening", "read_length": read_length });
            let lines: Vec<Value> = lines
                .iter()
                .enumerate()
                .map(|(row, text)| {
                    let top = row as f32 * 40.0;
                    let chars: Vec<Value> = text
                        .trim_end_matches('\n')
                        .chars()
                        .enumerate()
                        .map(|(col, c)| {
                            json!({
                                "char_data": c.to_string(),
                                "start": col as f32 * 20.0,
                                "end": (col + 1) as f32 * 20.0,
                            })
                        })
                        .collect();
                    read_length += chars.len();
                    json!({
                        "text": text,
                        "chars": chars,
                        "top": top,
                        "base": top + 30.0,
                        "bottom": top + 40.0,
                    })
                })
                .collect();
            let height = lines.len() as f32 * 40.0;
            json!({
                "lines": lines,
                "height": height,
                "chapter_index": 0,
                "index": index,
                "chapter": chapter,
            })
        })
        .collect();
    json!({ "book": { "name": "Sample", "author": "Anon" }, "pages": pages })
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(document: &Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = json!({
            "Setting": {
                "viewport_width": 400,
                "viewport_height": 600,
                "padding_left": 0,
                "padding_right": 0
            }
        });
        fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
        fs::write(dir.path().join("book.json"), document.to_string()).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").unwrap();
        cmd.arg("-c").arg(self.path("config.json"));
        cmd.env("XDG_CONFIG_HOME", self.dir.path());
        cmd
    }
}

#[test]
fn test_tap_and_drag_prints_selection() {
    let fixture = Fixture::new(&document(&[&["hello\n", "world"]]));
    fixture
        .command()
        .args(["--tap", "45,5", "--end", "65,45"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("llo\nworl\n");
}

#[test]
fn test_start_handle_moves_back() {
    let fixture = Fixture::new(&document(&[&["hello\n", "world"]]));
    fixture
        .command()
        .args(["--tap", "65,45", "--start", "5,5"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("hello\nworl\n");
}

#[test]
fn test_find_selects_first_match() {
    let fixture = Fixture::new(&document(&[&["the quick ", "brown fox"]]));
    fixture
        .command()
        .args(["--find", "qu\\w+ br"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("quick br\n");
}

#[test]
fn test_continuous_scroll_then_select() {
    let fixture = Fixture::new(&document(&[&["one\n", "two "], &["three\n"], &["four"]]));
    fixture
        .command()
        .args(["--scroll", "--scroll-by", "-90", "--tap", "5,5", "--end", "85,5"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("three\n");
}

#[test]
fn test_selection_across_pages() {
    let fixture = Fixture::new(&document(&[&["one\n", "two "], &["three\n"], &["four"]]));
    fixture
        .command()
        .args(["--scroll", "--tap", "5,45", "--end", "45,85"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("two thr\n");
}

#[test]
fn test_bookmark_json() {
    let fixture = Fixture::new(&document(&[&["abc\n", "defg"]]));
    let output = fixture
        .command()
        .args(["--tap", "25,45", "--end", "65,45", "--bookmark"])
        .arg(fixture.path("book.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let bookmark: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bookmark["book_name"], "Sample");
    assert_eq!(bookmark["chapter_pos"], 4);
    assert_eq!(bookmark["chapter_name"], "Opening");
    assert_eq!(bookmark["book_text"], "efg");
    assert_eq!(bookmark["id"].as_str().map(str::len), Some(10));
}

#[test]
fn test_nothing_selected_prints_empty_line() {
    let fixture = Fixture::new(&document(&[&["abc"]]));
    fixture
        .command()
        .args(["--tap", "300,300"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_debug_logs_to_stderr() {
    let fixture = Fixture::new(&document(&[&["abc"]]));
    fixture
        .command()
        .args(["--debug", "--tap", "5,5"])
        .arg(fixture.path("book.json"))
        .assert()
        .success()
        .stdout("a\n")
        .stderr(predicate::str::contains("[debug] selection started at"));
}

#[test]
fn test_missing_document_fails() {
    let fixture = Fixture::new(&document(&[&["abc"]]));
    fixture
        .command()
        .arg(fixture.path("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read"));
}

#[test]
fn test_document_without_pages_fails() {
    let fixture = Fixture::new(&json!({ "pages": [] }));
    fixture
        .command()
        .arg(fixture.path("book.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("holds no pages"));
}

#[test]
fn test_bad_point_is_rejected() {
    let fixture = Fixture::new(&document(&[&["abc"]]));
    fixture
        .command()
        .args(["--tap", "12"])
        .arg(fixture.path("book.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}
