#![expect(missing_docs)]
#![cfg(feature = "serde")]

use printable_binary::CODE_TABLE;

#[test]
fn snapshot_table_entries_as_json() {
    let picked: Vec<_> = CODE_TABLE
        .entries()
        .filter(|entry| matches!(entry.byte, 0x00 | 0x41 | 0x98 | 0xFF))
        .collect();
    let json = serde_json::to_string_pretty(&picked).unwrap();
    insta::assert_snapshot!(json, @r#"
    [
      {
        "byte": 0,
        "glyph": "∅",
        "code_point": "U+2205",
        "utf8": "e28885"
      },
      {
        "byte": 65,
        "glyph": "A",
        "code_point": "U+0041",
        "utf8": "41"
      },
      {
        "byte": 152,
        "glyph": "Ō",
        "code_point": "U+014C",
        "utf8": "c58c"
      },
      {
        "byte": 255,
        "glyph": "Ŀ",
        "code_point": "U+013F",
        "utf8": "c4bf"
      }
    ]
    "#);
}

#[test]
fn every_entry_serializes() {
    let rows: Vec<serde_json::Value> = CODE_TABLE
        .entries()
        .map(|entry| serde_json::to_value(entry).unwrap())
        .collect();
    assert_eq!(rows.len(), 256);
    assert!(rows.iter().all(|row| row.as_object().is_some_and(|o| o.len() == 4)));
}
