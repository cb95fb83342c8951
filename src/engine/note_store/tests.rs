use super::*;
use crate::backend::SqliteStore;
use chrono::Duration;
use pretty_assertions::assert_eq;

fn store() -> NoteStore<SqliteStore> {
    NoteStore::open(SqliteStore::open_in_memory().unwrap(), "keep").unwrap()
}

fn tag(name: &str) -> Tag {
    Tag::new(name).unwrap()
}

fn ids(raw: &[u64]) -> Vec<NoteId> {
    raw.iter().copied().map(NoteId::new).collect()
}

fn groceries() -> Note {
    Note::builder()
        .title("groceries")
        .tags(vec![tag("home"), tag("errand")])
        .open(vec!["milk".to_string(), "eggs".to_string()])
        .closed(vec!["bread".to_string()])
        .body("from the corner shop")
        .build()
}

// ===========================================
// Save
// ===========================================

#[test]
fn open_initializes_counter() {
    let mut store = store();
    assert_eq!(
        store.backend_mut().get("keep:id-counter").unwrap(),
        Some("0".to_string())
    );
}

#[test]
fn first_save_allocates_id_one() {
    let mut store = store();
    let mut note = groceries();

    let saved = store.save(&mut note).unwrap();

    assert_eq!(saved.id(), NoteId::new(1));
    assert_eq!(note.id(), &DraftId::Assigned(NoteId::new(1)));
    assert!(note.created().is_some());
    assert_eq!(note.created(), Some(saved.created()));
    assert!(saved.created() <= saved.updated());
}

#[test]
fn save_writes_every_field() {
    let mut store = store();
    let saved = store.save(&mut groceries()).unwrap();
    let id = saved.id();
    let layout = store.layout().clone();
    let b = store.backend_mut();

    assert_eq!(b.get(&layout.title(id)).unwrap(), Some("groceries".to_string()));
    assert_eq!(
        b.get(&layout.body(id)).unwrap(),
        Some("from the corner shop".to_string())
    );
    assert_eq!(
        b.get(&layout.created(id)).unwrap(),
        Some(saved.created().timestamp().to_string())
    );
    assert_eq!(b.lrange_all(&layout.open(id)).unwrap(), vec!["milk", "eggs"]);
    assert_eq!(b.lrange_all(&layout.closed(id)).unwrap(), vec!["bread"]);
}

#[test]
fn resave_keeps_id_and_created() {
    let mut store = store();
    let mut note = groceries();
    let first = store.save(&mut note).unwrap();

    let second = store.save(&mut note).unwrap();

    assert_eq!(second.id(), first.id());
    assert_eq!(second.created(), first.created());
    assert!(second.updated() >= first.updated());
    assert_eq!(store.backend_mut().get("keep:id-counter").unwrap(), Some("1".to_string()));
}

#[test]
fn stored_created_survives_blanked_timestamp() {
    let mut store = store();
    let first = store.save(&mut groceries()).unwrap();

    let mut edited = Note::builder()
        .id(first.id())
        .title("groceries")
        .created(None)
        .build();
    let second = store.save(&mut edited).unwrap();

    assert_eq!(second.created(), first.created());
}

#[test]
fn supplied_created_is_used_for_new_notes() {
    let mut store = store();
    let past = DateTime::from_timestamp(1_000_000, 0).unwrap();
    let mut note = Note::builder().title("old").created(Some(past)).build();

    let saved = store.save(&mut note).unwrap();

    assert_eq!(saved.created(), past);
    assert!(saved.updated() > past);
}

#[test]
fn future_created_raises_updated() {
    let mut store = store();
    let future = Utc::now().trunc_subsecs(0) + Duration::days(30);
    let mut note = Note::builder().title("later").created(Some(future)).build();

    let saved = store.save(&mut note).unwrap();

    assert_eq!(saved.created(), future);
    assert_eq!(saved.updated(), future);
}

#[test]
fn explicit_id_is_kept() {
    let mut store = store();
    let mut note = Note::builder().id(NoteId::new(40)).title("imported").build();

    let saved = store.save(&mut note).unwrap();

    assert_eq!(saved.id(), NoteId::new(40));
    assert!(store.contains(NoteId::new(40)).unwrap());
}

#[test]
fn largest_id_survives_an_edit_cycle() {
    use crate::infra::{decode_document, encode_document};

    let mut store = store();
    let mut note = Note::builder().id(NoteId::new(u64::MAX)).title("far").build();
    store.save(&mut note).unwrap();

    let loaded: Vec<Note> = store
        .load(&[NoteId::new(u64::MAX)])
        .unwrap()
        .into_iter()
        .map(Note::from)
        .collect();
    let mut edited = decode_document(&encode_document(&loaded).unwrap()).unwrap();
    let report = store.save_all(&mut edited).unwrap();

    assert!(report.is_clean(), "{:?}", report.rejected);
    assert_eq!(report.saved[0].id(), NoteId::new(u64::MAX));
}

#[test]
fn corrupt_id_is_rejected_without_writes() {
    let mut store = store();
    let mut note = Note::builder()
        .id(DraftId::Corrupt("abc".to_string()))
        .title("bad")
        .tag(tag("home"))
        .build();

    let err = store.save(&mut note).unwrap_err();

    assert!(matches!(
        err,
        NoteError::Validation(ValidationError::CorruptId(ref raw)) if raw == "abc"
    ));
    assert_eq!(note.id(), &DraftId::Corrupt("abc".to_string()));
    assert!(store.backend_mut().keys_with_prefix("keep:note:").unwrap().is_empty());
    assert!(store.list_tags().unwrap().is_empty());
    assert_eq!(store.backend_mut().get("keep:id-counter").unwrap(), Some("0".to_string()));
}

#[test]
fn empty_lists_leave_no_keys() {
    let mut store = store();
    let mut note = groceries();
    let saved = store.save(&mut note).unwrap();

    let mut cleared = Note::builder().id(saved.id()).title("done").build();
    store.save(&mut cleared).unwrap();

    let layout = store.layout().clone();
    let keys = store
        .backend_mut()
        .keys_with_prefix(&layout.note_prefix(saved.id()))
        .unwrap();
    assert_eq!(
        keys,
        vec![
            layout.body(saved.id()),
            layout.created(saved.id()),
            layout.title(saved.id()),
            layout.updated(saved.id()),
        ]
    );
}

// ===========================================
// Tag index consistency
// ===========================================

#[test]
fn groceries_scenario() {
    let mut store = store();
    let mut note = Note::builder()
        .title("groceries")
        .tags(vec![tag("home"), tag("errand")])
        .build();

    let saved = store.save(&mut note).unwrap();
    assert_eq!(saved.id(), NoteId::new(1));
    assert_eq!(
        store.resolve(&["home"], QueryStrategy::Intersection).unwrap(),
        ids(&[1])
    );

    let mut edited = Note::builder()
        .id(saved.id())
        .title("groceries")
        .tag(tag("errand"))
        .build();
    store.save(&mut edited).unwrap();

    assert!(store
        .resolve(&["home"], QueryStrategy::Intersection)
        .unwrap()
        .is_empty());
    assert_eq!(
        store.resolve(&["errand"], QueryStrategy::Intersection).unwrap(),
        ids(&[1])
    );
}

#[test]
fn index_matches_every_note() {
    let mut store = store();
    let mut notes = vec![
        Note::builder().title("a").tags(vec![tag("x"), tag("y")]).build(),
        Note::builder().title("b").tags(vec![tag("y")]).build(),
        Note::builder().title("c").build(),
    ];
    store.save_all(&mut notes).unwrap();

    let tags = store.list_tags().unwrap();
    for t in &tags {
        let members = store.resolve(&[t.as_str()], QueryStrategy::Intersection).unwrap();
        for note in store.load(&members).unwrap() {
            assert!(note.tags().contains(t), "{note} should carry {t}");
        }
    }
    for note in &notes {
        let id = note.id().assigned().unwrap();
        for t in note.tags() {
            let members = store.resolve(&[t.as_str()], QueryStrategy::Intersection).unwrap();
            assert!(members.contains(&id));
        }
    }
}

#[test]
fn tag_counts_follow_saves() {
    let mut store = store();
    store.save(&mut groceries()).unwrap();
    store
        .save(&mut Note::builder().title("chores").tag(tag("home")).build())
        .unwrap();

    let counts: Vec<_> = store
        .tag_counts()
        .unwrap()
        .into_iter()
        .map(|(t, n)| (t.to_string(), n))
        .collect();

    assert_eq!(
        counts,
        vec![("errand".to_string(), 1), ("home".to_string(), 2)]
    );
}

// ===========================================
// Batch save
// ===========================================

#[test]
fn save_all_skips_blank_and_collects_rejections() {
    let mut store = store();
    let mut notes = vec![
        Note::builder().title("first").build(),
        Note::new(),
        Note::builder()
            .id(DraftId::Corrupt("x1".to_string()))
            .title("bad")
            .build(),
        Note::builder().title("second").build(),
    ];

    let report = store.save_all(&mut notes).unwrap();

    let saved: Vec<_> = report.saved.iter().map(|n| n.id()).collect();
    assert_eq!(saved, ids(&[1, 2]));
    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.rejected,
        vec![(2, ValidationError::CorruptId("x1".to_string()))]
    );
    assert!(!report.is_clean());
    assert!(notes[1].id().assigned().is_none());
}

// ===========================================
// Load
// ===========================================

#[test]
fn load_round_trips_saved_note() {
    let mut store = store();
    let mut note = groceries();
    let saved = store.save(&mut note).unwrap();

    let loaded = store.load(&[saved.id()]).unwrap();

    assert_eq!(loaded, vec![saved]);
    assert_eq!(loaded[0].note(), &note);
}

#[test]
fn load_keeps_requested_order() {
    let mut store = store();
    let a = store.save(&mut Note::builder().title("a").build()).unwrap();
    let b = store.save(&mut Note::builder().title("b").build()).unwrap();

    let titles: Vec<_> = store
        .load(&[b.id(), a.id()])
        .unwrap()
        .iter()
        .map(|n| n.title().to_string())
        .collect();

    assert_eq!(titles, vec!["b", "a"]);
}

#[test]
fn load_missing_id_is_not_found() {
    let mut store = store();
    store.save(&mut groceries()).unwrap();

    let err = store.load(&ids(&[1, 99])).unwrap_err();

    assert!(matches!(err, NoteError::NotFound { id } if id == NoteId::new(99)));
}

#[test]
fn load_lenient_fills_missing_notes() {
    let mut store = store();

    let notes = store.load_lenient(&ids(&[5])).unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id().assigned(), Some(NoteId::new(5)));
    assert_eq!(notes[0].title(), "");
    assert_eq!(notes[0].created(), None);
    assert!(notes[0].tags().is_empty());
}

#[test]
fn load_rejects_corrupt_timestamp() {
    let mut store = store();
    store.backend_mut().set("keep:note:3:created", "soon").unwrap();

    let err = store.load(&ids(&[3])).unwrap_err();

    assert!(matches!(
        err,
        NoteError::StoreUnavailable(StoreError::InvalidValue { .. })
    ));
}

// ===========================================
// Delete
// ===========================================

#[test]
fn delete_removes_every_trace() {
    let mut store = store();
    let saved = store.save(&mut groceries()).unwrap();
    let other = store
        .save(&mut Note::builder().title("keep me").tag(tag("home")).build())
        .unwrap();
    let layout = store.layout().clone();

    let deleted = store.delete(&[saved.id()]).unwrap();

    assert_eq!(deleted, 1);
    assert!(store
        .backend_mut()
        .keys_with_prefix(&layout.note_prefix(saved.id()))
        .unwrap()
        .is_empty());
    assert_eq!(
        store.resolve(&["home"], QueryStrategy::Intersection).unwrap(),
        vec![other.id()]
    );
    assert!(store
        .resolve(&["errand"], QueryStrategy::Intersection)
        .unwrap()
        .is_empty());
    assert!(!store.contains(saved.id()).unwrap());
}

#[test]
fn delete_sweeps_stray_note_keys() {
    let mut store = store();
    let saved = store.save(&mut groceries()).unwrap();
    let layout = store.layout().clone();
    let stray = format!("{}attachment", layout.note_prefix(saved.id()));
    store.backend_mut().set(&stray, "x").unwrap();

    store.delete(&[saved.id()]).unwrap();

    assert!(!store.backend_mut().exists(&stray).unwrap());
}

#[test]
fn delete_unknown_id_counts_nothing() {
    let mut store = store();
    assert_eq!(store.delete(&ids(&[12])).unwrap(), 0);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut store = store();
    let first = store.save(&mut groceries()).unwrap();
    store.delete(&[first.id()]).unwrap();

    let second = store.save(&mut groceries()).unwrap();

    assert_eq!(second.id(), NoteId::new(2));
}
