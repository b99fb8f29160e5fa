//! Integration tests for the Cachette document store.

use std::collections::BTreeMap;
use std::fs;

use cachette::crypto::{decrypt, encrypt};
use cachette::errors::CachetteError;
use cachette::vault::{Cachette, Document, Entry, WriteMode};
use regex::Regex;
use tempfile::TempDir;

/// Helper: a cache file path inside a fresh temp dir.
fn cache_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.cache");
    (dir, path)
}

/// The key set used by most tests, including absent values and comments.
fn sample() -> Document {
    [
        ("key0", None, None),
        ("key1", Some("value1"), None),
        ("key2", None, Some("comment 2")),
        ("key2a", Some("value2a"), Some("comment 2a")),
        ("key3", Some("value3"), Some("comment 3")),
        ("_key4", Some("value4"), Some("comment 4")),
        ("!key5", Some("value5"), Some("comment 5")),
        ("Key6", Some("value6"), Some("comment 6")),
    ]
    .into_iter()
    .map(|(k, v, c)| (k.to_string(), Entry::new(v, c)))
    .collect()
}

/// Helper: a store pre-filled with `sample()`.
fn filled_store() -> (TempDir, Cachette) {
    let (dir, path) = cache_path();
    let store = Cachette::open(&path, b"my_secret_key").unwrap();
    for (key, entry) in sample() {
        store
            .update(&key, entry.value.as_deref(), entry.comment.as_deref())
            .unwrap();
    }
    (dir, store)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn open_initializes_missing_file_with_empty_document() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"secret").unwrap();

    assert!(path.exists());
    assert!(store.list_all().unwrap().is_empty());

    let raw = fs::read(&path).unwrap();
    assert_eq!(decrypt(&raw, b"secret").unwrap(), b"{}");
}

#[test]
fn open_initializes_near_empty_file() {
    let (_dir, path) = cache_path();
    fs::write(&path, "x").unwrap();

    let store = Cachette::open(&path, b"secret").unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn open_leaves_existing_file_untouched() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"secret").unwrap();
    store.update("alpha", Some("1"), None).unwrap();
    let before = fs::read(&path).unwrap();

    // A wrong password is not noticed at construction time.
    Cachette::open(&path, b"wrong").unwrap();
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn open_in_missing_directory_is_io_error() {
    let (dir, _) = cache_path();
    let path = dir.path().join("no-such-dir").join("test.cache");
    assert!(matches!(
        Cachette::open(&path, b"secret"),
        Err(CachetteError::Io(_))
    ));
}

#[test]
fn reads_files_written_by_other_implementations() {
    let (_dir, path) = cache_path();
    let legacy = r#"{"k": ["v", null], "n": [null, "only a comment"]}"#;
    fs::write(&path, encrypt(legacy.as_bytes(), b"old")).unwrap();

    let store = Cachette::open(&path, b"old").unwrap();
    assert_eq!(store.retrieve("k", true).unwrap(), Entry::new(Some("v"), None));
    assert_eq!(
        store.retrieve("n", true).unwrap(),
        Entry::new(None, Some("only a comment"))
    );
}

// ---------------------------------------------------------------------------
// Update and list
// ---------------------------------------------------------------------------

#[test]
fn update_then_list_returns_everything() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"my_secret_key").unwrap();
    assert!(store.list_all().unwrap().is_empty());

    for (key, entry) in sample() {
        store
            .update(&key, entry.value.as_deref(), entry.comment.as_deref())
            .unwrap();
        assert_eq!(store.retrieve(&key, true).unwrap(), entry);
    }

    assert_eq!(store.list_all().unwrap(), sample());
}

#[test]
fn last_write_wins_per_key() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"pw").unwrap();

    let writes = [
        ("a", "1", None),
        ("b", "2", Some("x")),
        ("a", "3", Some("y")),
        ("c", "4", None),
        ("b", "5", None),
    ];
    let mut expected = BTreeMap::new();
    for (key, value, comment) in writes {
        store.update(key, Some(value), comment).unwrap();
        expected.insert(key.to_string(), Entry::new(Some(value), comment));
    }

    assert_eq!(store.list_all().unwrap(), expected);
}

#[test]
fn empty_strings_stay_distinct_from_absent() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"pw").unwrap();
    store.update("empty", Some(""), Some("")).unwrap();
    store.update("absent", None, None).unwrap();

    let doc = Cachette::open(&path, b"pw").unwrap().list_all().unwrap();
    assert_eq!(doc["empty"], Entry::new(Some(""), Some("")));
    assert_eq!(doc["absent"], Entry::new(None, None));
}

#[test]
fn unicode_keys_and_values_roundtrip() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, "pässwörd".as_bytes()).unwrap();
    store.update("clé", Some("valeur ✓"), Some("注释")).unwrap();

    assert_eq!(
        store.retrieve("clé", true).unwrap(),
        Entry::new(Some("valeur ✓"), Some("注释"))
    );
    assert_eq!(
        store.retrieve("cé", false).unwrap().value.as_deref(),
        Some("valeur ✓")
    );
}

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

#[test]
fn fuzzy_retrieve_returns_smallest_matching_key() {
    let (_dir, store) = filled_store();
    let by_key = |k: &str| store.retrieve(k, true).unwrap();

    assert_eq!(store.retrieve("k", false).unwrap(), by_key("!key5"));
    assert_eq!(store.retrieve("ky", false).unwrap(), by_key("!key5"));
    assert_eq!(store.retrieve("k1", false).unwrap(), by_key("key1"));
    assert_eq!(store.retrieve("ky1", false).unwrap(), by_key("key1"));
    assert_eq!(store.retrieve("k2", false).unwrap(), by_key("key2"));
    assert_eq!(store.retrieve("ky2", false).unwrap(), by_key("key2"));
    assert_eq!(store.retrieve("K", false).unwrap(), by_key("Key6"));
}

#[test]
fn fuzzy_retrieve_reports_fuzzy_identifier() {
    let (_dir, store) = filled_store();
    match store.retrieve("K1", false) {
        Err(CachetteError::KeyNotFound(id)) => assert_eq!(id, "K1(fuzzy)"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn exact_retrieve_does_not_fall_back_to_fuzzy() {
    let (_dir, store) = filled_store();
    match store.retrieve("k1", true) {
        Err(CachetteError::KeyNotFound(id)) => assert_eq!(id, "k1"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn exact_retrieve_on_empty_document() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"pw").unwrap();
    match store.retrieve("zzz_missing", true) {
        Err(CachetteError::KeyNotFound(id)) => assert_eq!(id, "zzz_missing"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn fuzzy_query_characters_keep_regex_meaning() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"pw").unwrap();
    store.update("key1", Some("one"), None).unwrap();

    // "k." becomes k.*. which any key starting with k satisfies.
    assert_eq!(
        store.retrieve("k.", false).unwrap().value.as_deref(),
        Some("one")
    );
    let keys: Vec<String> = store.retrieve_all("k.").unwrap().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["key1".to_string()]);

    store.update("!b", Some("wildcard"), None).unwrap();
    store.update("a.b", Some("literal"), None).unwrap();
    // "!b" sorts first and "." matches its "!".
    assert_eq!(
        store.retrieve(".b", false).unwrap().value.as_deref(),
        Some("wildcard")
    );
}

#[test]
fn uncompilable_fuzzy_query_is_invalid_pattern() {
    let (_dir, store) = filled_store();
    let before = fs::read(store.path()).unwrap();

    assert!(matches!(
        store.retrieve("+", false),
        Err(CachetteError::InvalidPattern(_))
    ));
    assert!(matches!(
        store.retrieve_all("key("),
        Err(CachetteError::InvalidPattern(_))
    ));
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn retrieve_all_yields_every_match_in_order() {
    let (_dir, store) = filled_store();

    let all_k: Vec<(String, Entry)> = store.retrieve_all("k").unwrap().collect();
    let expected: Vec<(String, Entry)> = sample()
        .into_iter()
        .filter(|(k, _)| k.contains('k'))
        .collect();
    assert_eq!(all_k, expected);

    let keys: Vec<String> = all_k.into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        ["!key5", "_key4", "key0", "key1", "key2", "key2a", "key3"]
    );
}

#[test]
fn retrieve_all_matches_fuzzy_subsequences() {
    let (_dir, store) = filled_store();
    let keys: Vec<String> = store.retrieve_all("k2").unwrap().map(|(k, _)| k).collect();
    assert_eq!(keys, ["key2", "key2a"]);
}

#[test]
fn retrieve_all_without_match_is_empty() {
    let (_dir, store) = filled_store();
    assert_eq!(store.retrieve_all("zzz").unwrap().count(), 0);
}

#[test]
fn retrieve_all_is_a_snapshot() {
    let (_dir, store) = filled_store();
    let mut matches = store.retrieve_all("key").unwrap();
    let first = matches.next().unwrap();

    // Mutations after the call do not affect the running iterator.
    store.delete_matching(".").unwrap();
    assert_eq!(first.0, "!key5");
    assert_eq!(matches.count(), 6);
    assert!(store.list_all().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_one_key_at_a_time() {
    let (_dir, store) = filled_store();

    let mut remaining = sample();
    for key in sample().keys() {
        store.delete(key).unwrap();
        remaining.remove(key);
        assert_eq!(store.list_all().unwrap(), remaining);
    }

    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn delete_missing_key_fails_and_keeps_file() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"pw").unwrap();
    store.update("alpha", Some("1"), None).unwrap();
    let before = fs::read(&path).unwrap();

    match store.delete("beta") {
        Err(CachetteError::KeyNotFound(id)) => assert_eq!(id, "beta"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn delete_matching_removes_exactly_the_matches() {
    let (_dir, store) = filled_store();
    let key_re = "key.";

    let removed = store.delete_matching(key_re).unwrap();

    let re = Regex::new(key_re).unwrap();
    let expected: Document = sample()
        .into_iter()
        .filter(|(k, _)| !re.is_match(k))
        .collect();
    assert_eq!(removed, sample().len() - expected.len());
    assert_eq!(store.list_all().unwrap(), expected);
    assert_eq!(expected.keys().collect::<Vec<_>>(), ["Key6"]);

    match store.delete_matching(key_re) {
        Err(CachetteError::KeyNotFound(id)) => assert_eq!(id, "key.(regex)"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn delete_matching_uses_raw_regex_not_fuzzy() {
    let (_dir, store) = filled_store();
    // As a fuzzy query "k2" would hit key2 and key2a; as a regex it hits nothing.
    assert!(matches!(
        store.delete_matching("k2"),
        Err(CachetteError::KeyNotFound(_))
    ));
    assert_eq!(store.delete_matching("^key2").unwrap(), 2);
}

#[test]
fn delete_matching_rejects_invalid_regex() {
    let (_dir, store) = filled_store();
    assert!(matches!(
        store.delete_matching("key("),
        Err(CachetteError::InvalidPattern(_))
    ));
    assert_eq!(store.list_all().unwrap(), sample());
}

// ---------------------------------------------------------------------------
// Wrong password and corruption
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_is_decode_failure() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"secret").unwrap();
    store.update("alpha", Some("1"), None).unwrap();

    let intruder = Cachette::open(&path, b"not-the-secret").unwrap();
    assert!(matches!(
        intruder.list_all(),
        Err(CachetteError::DecodeFailure)
    ));
}

#[test]
fn failed_mutation_with_wrong_password_keeps_file() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"secret").unwrap();
    store.update("alpha", Some("1"), None).unwrap();
    let before = fs::read(&path).unwrap();

    let intruder = Cachette::open(&path, b"wrong").unwrap();
    assert!(matches!(
        intruder.update("beta", Some("2"), None),
        Err(CachetteError::DecodeFailure)
    ));
    assert!(intruder.delete("alpha").is_err());
    assert!(intruder.delete_matching(".").is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn corrupted_file_is_decode_failure() {
    let (_dir, path) = cache_path();
    Cachette::open(&path, b"secret").unwrap();
    fs::write(&path, "this is not base64 at all!").unwrap();

    let store = Cachette::open(&path, b"secret").unwrap();
    assert!(matches!(
        store.list_all(),
        Err(CachetteError::DecodeFailure)
    ));
}

#[test]
fn valid_ciphertext_of_non_document_is_decode_failure() {
    let (_dir, path) = cache_path();
    fs::write(&path, encrypt(b"[1, 2, 3]", b"secret")).unwrap();

    let store = Cachette::open(&path, b"secret").unwrap();
    assert!(matches!(
        store.retrieve("a", false),
        Err(CachetteError::DecodeFailure)
    ));
}

// ---------------------------------------------------------------------------
// Write modes
// ---------------------------------------------------------------------------

#[test]
fn atomic_mode_behaves_like_in_place() {
    let (dir, path) = cache_path();
    let store = Cachette::open_with(&path, b"pw", WriteMode::Atomic).unwrap();
    store.update("alpha", Some("1"), Some("first")).unwrap();
    store.update("beta", Some("2"), None).unwrap();
    store.delete("alpha").unwrap();

    let reopened = Cachette::open(&path, b"pw").unwrap();
    let doc = reopened.list_all().unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc["beta"], Entry::new(Some("2"), None));
    assert!(!dir.path().join(".test.cache.tmp").exists());
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn documented_scenario() {
    let (_dir, path) = cache_path();
    let store = Cachette::open(&path, b"secret").unwrap();
    assert!(store.list_all().unwrap().is_empty());

    store.update("alpha", Some("1"), Some("first")).unwrap();
    store.update("beta", Some("2"), None).unwrap();

    let doc = store.list_all().unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc["alpha"], Entry::new(Some("1"), Some("first")));
    assert_eq!(doc["beta"], Entry::new(Some("2"), None));

    assert_eq!(
        store.retrieve("ba", false).unwrap(),
        Entry::new(Some("2"), None)
    );

    store.delete("alpha").unwrap();
    let doc = store.list_all().unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc["beta"], Entry::new(Some("2"), None));

    let wrong = Cachette::open(&path, b"wrong").unwrap();
    assert!(matches!(wrong.list_all(), Err(CachetteError::DecodeFailure)));
}
