use folio::models::{BookInfo, ChapterMeta, PARAGRAPH_BREAK, TextChar, TextLine, TextPage};
use folio::position::{Position, Slot};
use folio::settings::Settings;
use folio::source::VecPageSource;
use folio::surface::{ReadingSurface, SelectionHost};

#[derive(Default)]
struct Host {
    continuous: bool,
    searching: bool,
    starts: Vec<(f32, f32, f32)>,
    ends: Vec<(f32, f32)>,
    cancels: usize,
}

impl SelectionHost for Host {
    fn update_selected_start(&mut self, x: f32, y: f32, top: f32) {
        self.starts.push((x, y, top));
    }
    fn update_selected_end(&mut self, x: f32, y: f32) {
        self.ends.push((x, y));
    }
    fn on_cancel_select(&mut self) {
        self.cancels += 1;
    }
    fn show_image(&mut self, _chapter_index: usize, _src: &str) {}
    fn header_height(&self) -> f32 {
        0.0
    }
    fn is_continuous_scroll(&self) -> bool {
        self.continuous
    }
    fn is_selecting_search_result(&self) -> bool {
        self.searching
    }
    fn set_selecting_search_result(&mut self, selecting: bool) {
        self.searching = selecting;
    }
}

/// 40px lines of 20px chars.
fn page(index: usize, lines: &[&str]) -> TextPage {
    let lines: Vec<TextLine> = lines
        .iter()
        .enumerate()
        .map(|(row, text)| TextLine {
            text: text.to_string(),
            chars: text
                .trim_end_matches(PARAGRAPH_BREAK)
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    TextChar::new(c.to_string(), col as f32 * 20.0, (col + 1) as f32 * 20.0)
                })
                .collect(),
            top: row as f32 * 40.0,
            base: row as f32 * 40.0 + 30.0,
            bottom: row as f32 * 40.0 + 40.0,
            ..TextLine::default()
        })
        .collect();
    TextPage {
        height: lines.len() as f32 * 40.0,
        lines,
        chapter_index: 0,
        index,
        chapter: Some(ChapterMeta {
            title: "Opening".to_string(),
            read_length: 0,
        }),
    }
}

fn settings() -> Settings {
    Settings {
        viewport_width: 400.0,
        viewport_height: 600.0,
        padding_left: 0.0,
        padding_right: 0.0,
        ..Settings::default()
    }
}

fn surface(pages: Vec<TextPage>, continuous: bool) -> ReadingSurface<VecPageSource, Host> {
    let host = Host {
        continuous,
        ..Host::default()
    };
    ReadingSurface::new(VecPageSource::new(pages), host, &settings())
}

fn all_chars(page: &TextPage) -> impl Iterator<Item = &TextChar> {
    page.lines.iter().flat_map(|line| line.chars.iter())
}

#[test]
fn test_selection_across_three_slots() {
    let mut s = surface(
        vec![
            page(0, &["It was a ", "dark night\n"]),
            page(1, &["and the rain ", "fell\n"]),
            page(2, &["in torrents"]),
        ],
        true,
    );
    // "dark" on page 0, then through to "in" on page 2 (page 2 starts at y=160)
    s.select_text(5.0, 45.0).unwrap();
    assert!(s.select_end_move(25.0, 165.0));

    assert_eq!(s.selection().start(), Position::new(Slot::Current, 1, 0));
    assert_eq!(s.selection().end(), Position::new(Slot::NextPlus, 0, 1));
    assert_eq!(s.selected_text(), "dark night\nand the rain fell\nin");

    let next = s.window().page(Slot::Next).unwrap();
    assert!(all_chars(next).all(|c| c.selected));
    let next_plus = s.window().page(Slot::NextPlus).unwrap();
    let flags: Vec<bool> = all_chars(next_plus).map(|c| c.selected).collect();
    assert_eq!(&flags[..3], &[true, true, false]);
}

#[test]
fn test_paged_mode_ignores_lookahead_pages() {
    let mut s = surface(vec![page(0, &["short\n"]), page(1, &["hidden"])], false);
    s.select_text(5.0, 5.0).unwrap();
    // y=45 would land on the next page in continuous mode
    assert!(!s.select_end_move(25.0, 45.0));
    assert_eq!(s.selected_text(), "s");
}

#[test]
fn test_no_selection_yields_empty_text_and_no_flags() {
    let s = surface(vec![page(0, &["nothing here"])], false);
    assert_eq!(s.selected_text(), "");
    assert!(all_chars(s.window().current_page()).all(|c| !c.selected));
}

#[test]
fn test_miss_past_line_end_does_not_fall_through() {
    let mut s = surface(
        vec![page(0, &["a long first line\n", "ab\n", "another long line"])],
        false,
    );
    // y is inside line 1, x is past its two chars but over line 2's chars
    assert!(s.select_text(100.0, 45.0).is_none());
    assert!(!s.selection().is_started());
    assert!(s.host().starts.is_empty());
}

#[test]
fn test_cancel_keeps_stale_positions_extractable() {
    let mut s = surface(vec![page(0, &["keep\n", "this"]), page(1, &["too"])], true);
    s.select_text(5.0, 5.0).unwrap();
    assert!(s.select_end_move(5.0, 85.0));
    assert_eq!(s.selected_text(), "keep\nthist");
    let (start, end) = (s.selection().start(), s.selection().end());

    s.cancel_select();
    assert_eq!(s.host().cancels, 1);
    for slot in [Slot::Current, Slot::Next] {
        let page = s.window().page(slot).unwrap();
        assert!(all_chars(page).all(|c| !c.selected && !c.is_search_result));
    }
    assert_eq!(s.extract(start, end), "keep\nthist");
}

#[test]
fn test_whole_page_round_trip() {
    let lines = ["Call me Ishmael. ", "Some years ago\n", "never mind\n", "how long"];
    let p = page(0, &lines);
    let expected = p.text();
    let mut s = surface(vec![p], false);
    s.select_start_move_index(Slot::Current, 0, 0);
    s.select_end_move_index(Slot::Current, 3, 7);
    assert_eq!(s.selected_text(), expected);
}

#[test]
fn test_drag_sequence_keeps_range_ordered() {
    let mut s = surface(vec![page(0, &["abcdefghij\n", "klmnopqrst"])], false);
    s.select_text(105.0, 5.0).unwrap();
    let drags = [
        (true, 5.0, 45.0),
        (false, 25.0, 5.0),
        (false, 185.0, 45.0),
        (true, 195.0, 45.0),
        (true, 45.0, 5.0),
        (false, 5.0, 5.0),
    ];
    for (is_start, x, y) in drags {
        if is_start {
            s.select_start_move(x, y);
        } else {
            s.select_end_move(x, y);
        }
        assert!(s.selection().start() <= s.selection().end());
    }
    assert_eq!(s.selected_text(), "cdefghij\nklmnopqrst");
}

#[test]
fn test_handles_follow_character_geometry() {
    let mut s = surface(vec![page(0, &["ab", "cd"])], false);
    s.select_text(25.0, 45.0).unwrap();
    assert_eq!(s.host().starts, vec![(20.0, 80.0, 40.0)]);
    assert_eq!(s.host().ends, vec![(40.0, 80.0)]);
}

#[test]
fn test_search_result_tints_only_the_match() {
    let mut s = surface(vec![page(0, &["needle in a haystack"])], false);
    s.select_search_result(
        Position::new(Slot::Current, 0, 12),
        Position::new(Slot::Current, 0, 19),
    );
    assert_eq!(s.selected_text(), "haystack");
    let tinted = all_chars(s.window().current_page())
        .filter(|c| c.is_search_result)
        .count();
    assert_eq!(tinted, 8);
}

#[test]
fn test_bookmark_for_selection() {
    let mut p = page(0, &["abc\n", "defg"]);
    p.chapter = Some(ChapterMeta {
        title: "Two".to_string(),
        read_length: 1000,
    });
    let mut s = surface(vec![p], false).with_book(BookInfo {
        name: "Sample".to_string(),
        author: "Anon".to_string(),
    });
    s.select_text(25.0, 45.0).unwrap();
    let bookmark = s.create_bookmark().unwrap();
    assert_eq!(bookmark.chapter_pos, 1004);
    assert_eq!(bookmark.chapter_name, "Two");
    assert_eq!(bookmark.book_text, "e");
    assert_eq!(bookmark.id.len(), 10);
}
