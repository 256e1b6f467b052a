use feldspar::{
    command::*, config::*, dispatch::*, editor::*, event::*, io::*, mode::*, row::*, st,
    utils::*,
};
use std::path::Path;

fn editor(lines: &[&str]) -> Editor {
    session(MemoryStorage::new(), lines)
}

fn session(storage: MemoryStorage, lines: &[&str]) -> Editor {
    let mut ed = Editor::with_storage(Config::default(), (80, 24), Box::new(storage));
    ed.doc_mut().set_rows(lines.iter().map(Row::new).collect());
    ed
}

fn press(ed: &mut Editor, keys: &str) -> Outcome {
    let mut outcome = Outcome::Continue;
    for byte in keys.bytes() {
        outcome = ed.handle(Key::Char(byte));
    }
    outcome
}

fn rows(ed: &Editor) -> Vec<String> {
    ed.doc().rows.iter().map(Row::render_raw).collect()
}

fn warning(ed: &Editor) -> Option<String> {
    ed.message()
        .filter(|m| m.severity == Severity::Warning)
        .map(|m| m.text.clone())
}

#[test]
fn test_keys() {
    assert_eq!(Key::from_ascii(b'a'), Some(Key::Char(b'a')));
    assert_eq!(Key::from_ascii(0x1B), Some(Key::Escape));
    assert_eq!(Key::from_ascii(0x03), Some(Key::Interrupt));
    assert_eq!(Key::from_ascii(0x7F), Some(Key::Backspace));
    assert_eq!(Key::from_ascii(b'\r'), Some(Key::Enter));
    assert_eq!(Key::from_ascii(b'\t'), Some(Key::Tab));
    assert_eq!(Key::from_ascii(0x01), None);
    assert!(Key::Escape.is_cancel());
    assert!(Key::Interrupt.is_cancel());
    assert!(!Key::Enter.is_cancel());
    assert_eq!(Prefix::from_key(Key::Char(b'd')), Some(Prefix::Delete));
    assert_eq!(Prefix::from_key(Key::Char(b'x')), None);
    assert_eq!(Mode::default(), Mode::Normal);
    assert_eq!(Mode::Insert.as_str(), "INSERT");
    assert!(Mode::Replace.is_prompt());
    assert!(!Mode::Visual.is_prompt());
}

#[test]
fn test_delete_and_yank_lines() {
    let mut ed = editor(&["a", "b", "c"]);
    ed.doc_mut().goto((0, 1)).unwrap();
    press(&mut ed, "dd");
    assert_eq!(rows(&ed), vec![st!("a"), st!("c")]);
    assert_eq!(ed.doc().loc().y, 0);
    assert_eq!(ed.clipboard, vec![Row::new("b")]);
    assert_eq!(ed.pending, None);
    // Deleting the last line lands on the new last line
    let mut ed = editor(&["a", "b", "c"]);
    ed.doc_mut().goto((0, 2)).unwrap();
    press(&mut ed, "dd");
    assert_eq!(rows(&ed), vec![st!("a"), st!("b")]);
    assert_eq!(ed.doc().loc().y, 1);
    // Yank and paste below then above
    let mut ed = editor(&["one", "two"]);
    press(&mut ed, "yyp");
    assert_eq!(rows(&ed), vec![st!("one"), st!("one"), st!("two")]);
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 1 });
    press(&mut ed, "jddkP");
    assert_eq!(rows(&ed), vec![st!("two"), st!("one"), st!("one")]);
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 0 });
    assert!(ed.doc().modified);
}

#[test]
fn test_paste_with_empty_clipboard() {
    let mut ed = editor(&["x"]);
    press(&mut ed, "p");
    assert_eq!(warning(&ed), Some(st!("Nothing to paste")));
    assert_eq!(rows(&ed), vec![st!("x")]);
    // The message only lasts one key
    press(&mut ed, "l");
    assert_eq!(ed.message(), None);
}

#[test]
fn test_prefixes() {
    let mut ed = editor(&["abc", "def", "ghi"]);
    press(&mut ed, "G");
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 2 });
    press(&mut ed, "g");
    assert_eq!(ed.pending, Some(Prefix::Go));
    press(&mut ed, "g");
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 0 });
    assert_eq!(ed.pending, None);
    // A key that doesn't complete the prefix is dropped along with it
    press(&mut ed, "dx");
    assert_eq!(rows(&ed), vec![st!("abc"), st!("def"), st!("ghi")]);
    assert_eq!(ed.pending, None);
    press(&mut ed, "x");
    assert_eq!(rows(&ed), vec![st!("bc"), st!("def"), st!("ghi")]);
    // Delete word
    let mut ed = editor(&["foo bar"]);
    press(&mut ed, "dw");
    assert_eq!(rows(&ed), vec![st!("bar")]);
    // Prefixes don't start from other modes
    let mut ed = editor(&["foo"]);
    press(&mut ed, "idd");
    assert_eq!(rows(&ed), vec![st!("ddfoo")]);
    assert_eq!(ed.pending, None);
}

#[test]
fn test_normal_editing() {
    let mut ed = editor(&["hello world", "next"]);
    press(&mut ed, "w~");
    assert_eq!(rows(&ed)[0], "hello WORLD");
    press(&mut ed, "u");
    assert_eq!(rows(&ed)[0], "hello world");
    press(&mut ed, "U");
    assert_eq!(rows(&ed)[0], "hello WORLD");
    press(&mut ed, ">");
    assert_eq!(rows(&ed)[0], "    hello WORLD");
    press(&mut ed, "<");
    assert_eq!(rows(&ed)[0], "hello WORLD");
    press(&mut ed, "0t");
    assert_eq!(rows(&ed)[0], "ehllo WORLD");
    press(&mut ed, "J");
    assert_eq!(rows(&ed), vec![st!("ehllo WORLDnext")]);
    assert_eq!(ed.doc().loc().x, 11);
}

#[test]
fn test_insert_mode() {
    let mut ed = editor(&["abc"]);
    press(&mut ed, "ihi");
    assert_eq!(ed.mode, Mode::Insert);
    assert_eq!(rows(&ed), vec![st!("hiabc")]);
    assert_eq!(ed.doc().loc().x, 2);
    ed.handle(Key::Escape);
    assert_eq!(ed.mode, Mode::Normal);
    assert_eq!(ed.previous_mode, Mode::Insert);
    assert_eq!(ed.doc().loc().x, 1);
    // Escaping at the start of a line stays there
    press(&mut ed, "0i");
    ed.handle(Key::Interrupt);
    assert_eq!(ed.doc().loc().x, 0);
    // Append and backspace
    press(&mut ed, "A");
    assert_eq!(ed.doc().loc().x, 5);
    ed.handle(Key::Backspace);
    assert_eq!(rows(&ed), vec![st!("hiab")]);
    ed.handle(Key::Tab);
    assert_eq!(rows(&ed), vec![st!("hiab\t")]);
    ed.handle(Key::Home);
    ed.handle(Key::Delete);
    assert_eq!(rows(&ed), vec![st!("iab\t")]);
    // `a` moves past the cursor first
    let mut ed = editor(&["ac"]);
    press(&mut ed, "ab");
    assert_eq!(rows(&ed), vec![st!("abc")]);
    // `I` goes to the first non-whitespace column
    let mut ed = editor(&["  x"]);
    press(&mut ed, "$Iy");
    assert_eq!(rows(&ed), vec![st!("  yx")]);
}

#[test]
fn test_insert_line_breaks() {
    let mut ed = editor(&["    if x {"]);
    press(&mut ed, "A");
    ed.handle(Key::Enter);
    assert_eq!(rows(&ed), vec![st!("    if x {"), st!("        ")]);
    assert_eq!(ed.doc().loc(), Loc { x: 8, y: 1 });
    // Backspace at the start of a line joins it to the one above
    let mut ed = editor(&["ab", "cd"]);
    ed.doc_mut().goto((0, 1)).unwrap();
    press(&mut ed, "i");
    ed.handle(Key::Backspace);
    assert_eq!(rows(&ed), vec![st!("abcd")]);
    assert_eq!(ed.doc().loc(), Loc { x: 2, y: 0 });
    ed.handle(Key::Home);
    ed.handle(Key::Backspace);
    assert_eq!(rows(&ed), vec![st!("abcd")]);
    // Delete at the end of a line joins the one below
    let mut ed = editor(&["ab", "cd"]);
    press(&mut ed, "A");
    ed.handle(Key::Delete);
    assert_eq!(rows(&ed), vec![st!("abcd")]);
    // Open lines above and below
    let mut ed = editor(&["  a {"]);
    press(&mut ed, "o");
    assert_eq!(ed.mode, Mode::Insert);
    assert_eq!(rows(&ed), vec![st!("  a {"), st!("      ")]);
    ed.handle(Key::Escape);
    press(&mut ed, "ggO");
    assert_eq!(rows(&ed), vec![st!("  "), st!("  a {"), st!("      ")]);
    assert_eq!(ed.doc().loc(), Loc { x: 2, y: 0 });
    // Without auto-indent new lines start empty
    let mut ed = editor(&["  a {"]);
    ed.toggle_auto_indent();
    press(&mut ed, "o");
    assert_eq!(rows(&ed), vec![st!("  a {"), st!("")]);
}

#[test]
fn test_typed_line_breaks() {
    let mut ed = editor(&["ab"]);
    press(&mut ed, "ix");
    ed.handle(Key::Char(b'\n'));
    press(&mut ed, "y");
    ed.handle(Key::Char(b'\r'));
    assert_eq!(rows(&ed), vec![st!("x"), st!("y"), st!("ab")]);
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 2 });
    ed.handle(Key::Escape);
    ed.save_as("typed.txt").unwrap();
    assert_eq!(
        ed.storage().read_lines(Path::new("typed.txt")).unwrap().len(),
        ed.doc().rows.len()
    );
    // Prompts commit on a raw newline too
    press(&mut ed, "/ab");
    ed.handle(Key::Char(b'\n'));
    assert_eq!(ed.mode, Mode::Normal);
    assert_eq!(ed.last_search, b"ab".to_vec());
}

#[test]
fn test_prompts() {
    let mut ed = editor(&["x"]);
    press(&mut ed, ":w");
    assert_eq!(ed.mode, Mode::Command);
    assert_eq!(ed.prompt, b"w".to_vec());
    ed.handle(Key::Backspace);
    assert_eq!(ed.mode, Mode::Command);
    assert!(ed.prompt.is_empty());
    // Backspace on an empty prompt leaves it
    ed.handle(Key::Backspace);
    assert_eq!(ed.mode, Mode::Normal);
    // Cancelling doesn't run anything
    press(&mut ed, ":q");
    assert_eq!(ed.handle(Key::Escape), Outcome::Continue);
    assert_eq!(ed.mode, Mode::Normal);
    // Entering a prompt starts it empty
    press(&mut ed, ":abc");
    ed.handle(Key::Escape);
    press(&mut ed, ":");
    assert!(ed.prompt.is_empty());
    ed.handle(Key::Escape);
    // Quitting an unmodified session
    press(&mut ed, ":q");
    assert_eq!(ed.handle(Key::Enter), Outcome::Quit);
}

#[test]
fn test_quit_guard() {
    let mut ed = editor(&["x"]);
    press(&mut ed, "x:q");
    assert_eq!(ed.handle(Key::Enter), Outcome::Continue);
    assert_eq!(ed.mode, Mode::Normal);
    assert_eq!(
        warning(&ed),
        Some(st!("No write since last change (force to override)"))
    );
    press(&mut ed, ":q!");
    assert_eq!(ed.handle(Key::Enter), Outcome::Quit);
}

#[test]
fn test_search_prompt() {
    let mut ed = editor(&["alpha", "beta", "alpha beta"]);
    press(&mut ed, "/beta");
    assert_eq!(ed.mode, Mode::Search);
    ed.handle(Key::Enter);
    assert_eq!(ed.mode, Mode::Normal);
    assert_eq!(ed.last_search, b"beta".to_vec());
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 1 });
    press(&mut ed, "n");
    assert_eq!(ed.doc().loc(), Loc { x: 6, y: 2 });
    press(&mut ed, "n");
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 1 });
    press(&mut ed, "N");
    assert_eq!(ed.doc().loc(), Loc { x: 6, y: 2 });
    // An empty search repeats the last one
    press(&mut ed, "/");
    ed.handle(Key::Enter);
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 1 });
    // Failed searches leave the cursor where it was
    press(&mut ed, "/zzz");
    ed.handle(Key::Enter);
    assert_eq!(warning(&ed), Some(st!("Pattern not found: zzz")));
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 1 });
    assert_eq!(ed.last_search, b"zzz".to_vec());
}

#[test]
fn test_repeat_without_search() {
    let mut ed = editor(&["abc"]);
    press(&mut ed, "n");
    assert_eq!(warning(&ed), Some(st!("No previous search")));
    press(&mut ed, "N");
    assert_eq!(warning(&ed), Some(st!("No previous search")));
    press(&mut ed, "/");
    ed.handle(Key::Enter);
    assert_eq!(warning(&ed), Some(st!("No previous search")));
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 0 });
}

#[test]
fn test_replace_prompt() {
    let mut ed = editor(&["foo foo"]);
    press(&mut ed, "Rfoo/bar");
    assert_eq!(ed.mode, Mode::Replace);
    ed.handle(Key::Enter);
    assert_eq!(rows(&ed), vec![st!("bar foo")]);
    assert_eq!(
        ed.message(),
        Some(&Message::new(Severity::Success, "Replaced 1 occurrence"))
    );
    press(&mut ed, "Rnope");
    ed.handle(Key::Enter);
    assert_eq!(warning(&ed), Some(st!("Usage: find/replace")));
    press(&mut ed, "R/x");
    ed.handle(Key::Enter);
    assert_eq!(warning(&ed), Some(st!("Usage: find/replace")));
    press(&mut ed, "Rfoo/");
    ed.handle(Key::Enter);
    assert_eq!(rows(&ed), vec![st!("bar ")]);
}

#[test]
fn test_visual_mode_not_yet_specified() {
    let mut ed = editor(&["abc", "def"]);
    press(&mut ed, "v");
    assert_eq!(ed.mode, Mode::Visual);
    press(&mut ed, "ddxjp");
    assert_eq!(rows(&ed), vec![st!("abc"), st!("def")]);
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 0 });
    ed.handle(Key::Escape);
    assert_eq!(ed.mode, Mode::Normal);
}

#[test]
fn test_cursor_is_clamped() {
    let mut ed = editor(&["abc", "de"]);
    ed.doc_mut().cursor = Loc { x: 50, y: 50 };
    press(&mut ed, "z");
    assert_eq!(ed.doc().loc(), Loc { x: 2, y: 1 });
}

#[test]
fn test_parse_command() {
    assert_eq!(parse_command("w"), Command::Write);
    assert_eq!(parse_command(" w out.txt "), Command::WriteAs(st!("out.txt")));
    assert_eq!(parse_command("wq"), Command::WriteQuit);
    assert_eq!(parse_command("x"), Command::WriteQuit);
    assert_eq!(parse_command("e src/main.rs"), Command::Edit(st!("src/main.rs")));
    assert_eq!(parse_command("q"), Command::Quit { force: false });
    assert_eq!(parse_command("q!"), Command::Quit { force: true });
    assert_eq!(parse_command("close!"), Command::Close { force: true });
    assert_eq!(parse_command("bn"), Command::NextDocument);
    assert_eq!(parse_command("set nu"), Command::ToggleLineNumbers);
    assert_eq!(parse_command("set autoindent"), Command::ToggleAutoIndent);
    assert_eq!(parse_command("recent 2"), Command::Recent(2));
    assert_eq!(parse_command("recent two"), Command::Unknown(st!("recent two")));
    assert_eq!(
        parse_command("%s/a/b"),
        Command::ReplaceAll(st!("a"), st!("b"))
    );
    assert_eq!(
        parse_command("%s/a//"),
        Command::ReplaceAll(st!("a"), st!(""))
    );
    assert_eq!(parse_command("%s//b"), Command::Unknown(st!("%s//b")));
    assert_eq!(
        parse_command("%s/a/b/g"),
        Command::ReplaceAll(st!("a"), st!("b"))
    );
    assert_eq!(parse_command("%s/a/b/c"), Command::Unknown(st!("%s/a/b/c")));
    assert_eq!(parse_command("%s/a"), Command::Unknown(st!("%s/a")));
    assert_eq!(parse_command("42"), Command::Goto(42));
    assert_eq!(parse_command("frobnicate"), Command::Unknown(st!("frobnicate")));
}

#[test]
fn test_run_command() {
    let mut ed = editor(&["aaa", "b", "c"]);
    assert_eq!(ed.run_command("%s/a/bb").unwrap(), Outcome::Continue);
    assert_eq!(rows(&ed), vec![st!("bbbbbb"), st!("b"), st!("c")]);
    assert_eq!(
        ed.message(),
        Some(&Message::new(Severity::Success, "Replaced 3 occurrences"))
    );
    ed.run_command("%s/zz/y").unwrap();
    assert_eq!(warning(&ed), Some(st!("Replaced 0 occurrences")));
    ed.run_command("3").unwrap();
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 2 });
    ed.run_command("100").unwrap();
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 2 });
    ed.run_command("0").unwrap();
    assert_eq!(ed.doc().loc(), Loc { x: 0, y: 0 });
    assert!(matches!(
        ed.run_command("nonsense"),
        Err(Error::UnknownCommand(c)) if c == "nonsense"
    ));
    // Through the prompt the error becomes a message
    press(&mut ed, ":nonsense");
    ed.handle(Key::Enter);
    assert_eq!(warning(&ed), Some(st!("Unknown command: nonsense")));
}

#[test]
fn test_toggles() {
    let mut ed = editor(&["a", "b", "c"]);
    assert_eq!(ed.gutter_width(), 2);
    ed.doc_mut().goto((1, 0)).unwrap();
    assert_eq!(ed.cursor_screen(), Loc { x: 3, y: 0 });
    assert!(!ed.toggle_line_numbers());
    assert_eq!(ed.message(), Some(&Message::new(Severity::Info, "Line numbers off")));
    assert_eq!(ed.gutter_width(), 0);
    assert_eq!(ed.cursor_screen(), Loc { x: 1, y: 0 });
    ed.run_command("set number").unwrap();
    assert!(ed.config.line_numbers);
    ed.run_command("set hl").unwrap();
    assert!(!ed.config.highlighting);
    ed.run_command("set ai").unwrap();
    assert!(!ed.config.auto_indent);
    // The document viewport excludes the gutter
    ed.handle(Key::Char(b'l'));
    assert_eq!(ed.doc().size, Size { w: 78, h: 24 });
}

#[test]
fn test_documents() {
    let mut storage = MemoryStorage::new();
    storage.insert("a.txt", "first\nsecond\n");
    let mut ed = session(storage, &[]);
    assert_eq!(ed.docs.len(), 1);
    ed.open("a.txt").unwrap();
    assert_eq!(ed.docs.len(), 2);
    assert_eq!(ed.active, 1);
    assert_eq!(rows(&ed), vec![st!("first"), st!("second")]);
    assert_eq!(ed.recent, vec![st!("a.txt")]);
    // Missing files open empty with their name
    ed.run_command("e b.txt").unwrap();
    assert_eq!(ed.active, 2);
    assert_eq!(rows(&ed), vec![st!("")]);
    assert_eq!(ed.doc().info.file, Some(st!("b.txt")));
    assert_eq!(ed.recent, vec![st!("b.txt"), st!("a.txt")]);
    // Opening an open file switches to it
    ed.open("a.txt").unwrap();
    assert_eq!(ed.docs.len(), 3);
    assert_eq!(ed.active, 1);
    assert_eq!(ed.recent, vec![st!("a.txt"), st!("b.txt")]);
    ed.open_recent(1).unwrap();
    assert_eq!(ed.active, 2);
    assert!(matches!(ed.open_recent(5), Err(Error::InvalidRecent(5))));
    // Cycling wraps around
    ed.next_document();
    assert_eq!(ed.active, 0);
    ed.prev_document();
    assert_eq!(ed.active, 2);
    ed.run_command("bp").unwrap();
    assert_eq!(ed.active, 1);
    ed.run_command("new").unwrap();
    assert_eq!(ed.docs.len(), 4);
    assert_eq!(ed.active, 3);
    assert_eq!(ed.doc().info.file, None);
}

#[test]
fn test_recent_limit() {
    let mut ed = editor(&[]);
    ed.config.recent_limit = 2;
    for path in ["1.txt", "2.txt", "3.txt"] {
        ed.open(path).unwrap();
    }
    assert_eq!(ed.recent, vec![st!("3.txt"), st!("2.txt")]);
}

#[test]
fn test_saving() {
    let mut storage = MemoryStorage::new();
    storage.insert("a.txt", "first\n");
    let mut ed = session(storage, &[]);
    ed.open("a.txt").unwrap();
    press(&mut ed, "x:w");
    ed.handle(Key::Enter);
    assert!(!ed.doc().modified);
    assert_eq!(
        ed.message(),
        Some(&Message::new(Severity::Success, "Saved a.txt (1 lines)"))
    );
    assert_eq!(
        ed.storage().read_lines(Path::new("a.txt")).unwrap(),
        vec![b"irst".to_vec()]
    );
    ed.save_as("c.txt").unwrap();
    assert_eq!(ed.doc().info.file, Some(st!("c.txt")));
    assert_eq!(ed.recent[0], "c.txt");
    assert_eq!(
        ed.storage().read_lines(Path::new("c.txt")).unwrap(),
        vec![b"irst".to_vec()]
    );
    // Unnamed documents need a name
    ed.new_document();
    assert!(matches!(ed.save(), Err(Error::NoFileName)));
    press(&mut ed, "ix");
    ed.handle(Key::Escape);
    assert_eq!(ed.run_command("wq").ok(), None);
    assert_eq!(ed.run_command("w d.txt").unwrap(), Outcome::Continue);
    assert_eq!(ed.run_command("wq").unwrap(), Outcome::Quit);
}

#[test]
fn test_closing() {
    let mut ed = editor(&["x"]);
    assert!(matches!(ed.close(false), Err(Error::LastDocument)));
    ed.new_document();
    press(&mut ed, "ix");
    assert!(matches!(ed.close(false), Err(Error::UnsavedChanges)));
    assert!(matches!(ed.quit(false), Err(Error::UnsavedChanges)));
    assert!(ed.quit(true).is_ok());
    ed.close(true).unwrap();
    assert_eq!(ed.docs.len(), 1);
    assert_eq!(ed.active, 0);
    assert_eq!(rows(&ed), vec![st!("x")]);
    // Force closing the last document leaves an empty one
    ed.run_command("close!").unwrap();
    assert_eq!(ed.docs.len(), 1);
    assert_eq!(rows(&ed), vec![st!("")]);
    assert!(!ed.doc().modified);
}

#[test]
fn test_config() {
    let config = Config::from_toml("tab_width = 2\nline_numbers = false").unwrap();
    assert_eq!(config.tab_width, 2);
    assert!(!config.line_numbers);
    assert!(config.auto_indent);
    assert_eq!(config.indent_width, 4);
    assert_eq!(config.scroll_margin, 10);
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
    assert!(matches!(
        Config::from_toml("tab_width = 'x'"),
        Err(Error::Config(_))
    ));
    // Files
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feldspar.toml");
    assert_eq!(Config::load(&path).unwrap(), Config::default());
    std::fs::write(&path, "indent_width = 2\nrecent_limit = 3\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.indent_width, 2);
    assert_eq!(config.recent_limit, 3);
    // Sessions pass settings down to their documents
    let ed = Editor::with_storage(config, (80, 24), Box::new(MemoryStorage::new()));
    assert_eq!(ed.doc().indent_width, 2);
}
