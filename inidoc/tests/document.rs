//! Library-level tests for the document contract: ordering, uniqueness,
//! lenient parsing and lossless round-trips through text and disk.

use inidoc::test_support::{TestDir, document, section};
use inidoc::{IniDocument, IniError, IniSection, IniValue, TextEncoding};

/// Compare two documents by section name, key and trimmed value.
fn assert_same_content(left: &IniDocument, right: &IniDocument) {
    let left_names: Vec<&String> = left.names().collect();
    let right_names: Vec<&String> = right.names().collect();
    assert_eq!(left_names, right_names);
    for section in left {
        let other = &right[section.name()];
        let pairs: Vec<(&str, &str)> = section
            .iter()
            .map(|(k, v)| (k.as_str(), v.trimmed()))
            .collect();
        let other_pairs: Vec<(&str, &str)> = other
            .iter()
            .map(|(k, v)| (k.as_str(), v.trimmed()))
            .collect();
        assert_eq!(pairs, other_pairs, "section {}", section.name());
    }
}

#[test]
fn parse_mutate_serialize_round_trip() {
    let mut doc = IniDocument::parse(
        "; deployment settings\n\
         [server]\n\
         host = example.org \n\
         port=8080\n\
         \n\
         [database]\n\
         url=postgres://u@h/db?sslmode=require\n\
         pool=\n",
    )
    .expect("parse");

    doc.section_mut("server")
        .expect("server")
        .set("port", IniValue::from(9090i64))
        .expect("set port");
    doc.add(section("cache", &[("ttl", "60")])).expect("add cache");
    doc.remove("database");

    let text = doc.to_string();
    assert_eq!(
        text,
        "[cache]\nttl=60\n\n[server]\nhost=example.org\nport=9090\n\n"
    );
    let reparsed = IniDocument::parse(&text).expect("reparse");
    assert_same_content(&doc, &reparsed);
    assert_eq!(reparsed["server"]["port"].to_u64().expect("port"), 9090);
}

#[test]
fn round_trip_through_disk_preserves_content() {
    let dir = TestDir::new().expect("dir");
    let store = dir.store();
    let mut doc = document(&[
        ("zeta", &[("k", "last")]),
        ("Alpha", &[("b", " 2 "), ("a", "x=y=z"), ("empty", "")]),
        ("mid", &[]),
    ]);

    for encoding in [
        TextEncoding::Utf8,
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Be,
        TextEncoding::Latin1,
    ] {
        doc.set_encoding(encoding);
        store.save_as(&mut doc, "round.ini").expect("save");
        let loaded = store
            .load_or_create_with("round.ini", encoding)
            .expect("load");
        assert_same_content(&doc, &loaded);
    }
}

#[test]
fn ordering_ignores_insertion_order() {
    let doc = IniDocument::from_sections([
        section("b", &[("z", "1"), ("a", "2")]),
        section("a", &[]),
        section("B", &[]),
    ])
    .expect("doc");
    let names: Vec<&str> = doc.iter().map(IniSection::name).collect();
    assert_eq!(names, vec!["B", "a", "b"]);
    let keys: Vec<&str> = doc["b"].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "z"]);
}

#[test]
fn duplicate_section_leaves_original() {
    let mut doc = document(&[("a", &[("k", "v")])]);
    let err = doc.add(section("a", &[])).expect_err("duplicate");
    assert!(matches!(err, IniError::DuplicateSection { .. }));
    assert_eq!(doc["a"].len(), 1);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let doc = IniDocument::parse("; comment\n\n[A]\nk=v\n").expect("parse");
    assert_eq!(doc, document(&[("A", &[("k", "v")])]));
}

#[test]
fn unanchored_pair_is_rejected() {
    let err = IniDocument::parse("k=v\n[A]\n").expect_err("unanchored");
    assert!(matches!(err, IniError::UnanchoredKeyValue { line: 1 }));
}

#[test]
fn value_keeps_everything_after_first_equals() {
    let doc = IniDocument::parse("[A]\nk=a=b=c\n").expect("parse");
    assert_eq!(doc["A"]["k"].as_str(), "a=b=c");
}

#[test]
fn empty_value_is_stored() {
    let doc = IniDocument::parse("[A]\nk=\n").expect("parse");
    assert!(doc["A"]["k"].is_empty());
    assert_eq!(doc.to_string(), "[A]\nk=\n\n");
}

#[test]
fn document_moves_between_threads_behind_a_mutex() {
    use std::sync::{Arc, Mutex};

    let shared = Arc::new(Mutex::new(IniDocument::new()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                let section = section(&format!("worker{i}"), &[("id", &i.to_string())]);
                shared.lock().expect("lock").add(section).expect("add");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }
    assert_eq!(shared.lock().expect("lock").len(), 4);
}
