use std::collections::HashSet;
use tagnote_core::{
    Dimension, MemoryStore, NewNote, NoteService, NoteServiceError, NotePatch, NoteValidationError,
};
use uuid::Uuid;

fn open_service() -> NoteService<MemoryStore> {
    NoteService::open(MemoryStore::new()).unwrap()
}

fn mcp_ideas() -> NewNote {
    NewNote::new(
        "MCP Ideas",
        "Some thoughts on tool servers",
        "learning",
        "project",
        "active",
    )
    .with_topics(["mcp", "coding"])
}

#[test]
fn create_assigns_unique_ids_and_equal_timestamps() {
    let mut service = open_service();
    let mut ids = HashSet::new();
    for idx in 0..20 {
        let note = service
            .create_note(NewNote::new(
                format!("note {idx}"),
                "body",
                "work",
                "note",
                "someday",
            ))
            .unwrap();
        assert_eq!(note.created, note.updated);
        assert!(ids.insert(note.id));
    }
    assert_eq!(service.list_notes().len(), 20);
}

#[test]
fn create_persists_before_returning() {
    let mut service = open_service();
    let saves_after_open = service.store().save_count();
    let note = service.create_note(mcp_ideas()).unwrap();

    assert_eq!(service.store().save_count(), saves_after_open + 1);
    let persisted = service.store().contents().unwrap();
    assert!(persisted.contains(&note.id.to_string()));
}

#[test]
fn create_without_topics_stores_empty_list() {
    let mut service = open_service();
    let note = service
        .create_note(NewNote::new("plain", "text", "personal", "todo", "soon"))
        .unwrap();
    assert!(note.tags.topics.is_empty());
}

#[test]
fn create_rejects_missing_and_empty_fields() {
    let mut service = open_service();

    let missing_priority = NewNote {
        priority: None,
        ..mcp_ideas()
    };
    let err = service.create_note(missing_priority).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::MissingField("priority"))
    ));

    let empty_title = NewNote {
        title: Some(String::new()),
        ..mcp_ideas()
    };
    let err = service.create_note(empty_title).unwrap_err();
    assert_eq!(err.kind(), "validation_error");

    let empty_content = NewNote {
        content: Some(String::new()),
        ..mcp_ideas()
    };
    assert!(service.create_note(empty_content).is_err());
    assert!(service.list_notes().is_empty());
}

#[test]
fn whitespace_only_text_is_non_empty() {
    let mut service = open_service();
    let note = service
        .create_note(NewNote::new(" ", "\t", "work", "idea", "soon"))
        .unwrap();
    assert_eq!(note.title, " ");
    assert_eq!(note.content, "\t");

    let updated = service
        .update_note(
            note.id,
            NotePatch {
                title: Some("  ".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "  ");
}

#[test]
fn create_with_unknown_tag_leaves_repository_unchanged() {
    let mut service = open_service();
    service.create_note(mcp_ideas()).unwrap();
    let saves_before = service.store().save_count();
    let before = service.list_notes().to_vec();

    let bad_topic = mcp_ideas().with_topics(["mcp", "gardening"]);
    let err = service.create_note(bad_topic).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::UnknownTag { .. })
    ));

    let bad_category = NewNote {
        category: Some("hobby".to_string()),
        ..mcp_ideas()
    };
    assert!(service.create_note(bad_category).is_err());

    assert_eq!(service.list_notes(), before.as_slice());
    assert_eq!(service.store().save_count(), saves_before);
}

#[test]
fn duplicate_topics_are_collapsed_on_write() {
    let mut service = open_service();
    let note = service
        .create_note(mcp_ideas().with_topics(["mcp", "ai", "mcp"]))
        .unwrap();
    assert_eq!(note.tags.topics, vec!["mcp", "ai"]);
}

#[test]
fn update_changes_only_provided_fields() {
    let mut service = open_service();
    let original = service.create_note(mcp_ideas()).unwrap();

    let updated = service
        .update_note(
            original.id,
            NotePatch {
                priority: Some("someday".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.content, original.content);
    assert_eq!(updated.tags.category, original.tags.category);
    assert_eq!(updated.tags.kind, original.tags.kind);
    assert_eq!(updated.tags.topics, original.tags.topics);
    assert_eq!(updated.tags.priority, "someday");
    assert_eq!(updated.created, original.created);
    assert!(updated.updated >= original.updated);
}

#[test]
fn update_topics_replace_prior_set() {
    let mut service = open_service();
    let original = service.create_note(mcp_ideas()).unwrap();

    let updated = service
        .update_note(
            original.id,
            NotePatch {
                topics: Some(vec!["design".to_string()]),
                ..NotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.tags.topics, vec!["design"]);

    let cleared = service
        .update_note(
            original.id,
            NotePatch {
                topics: Some(Vec::new()),
                ..NotePatch::default()
            },
        )
        .unwrap();
    assert!(cleared.tags.topics.is_empty());
}

#[test]
fn update_with_invalid_tag_is_all_or_nothing() {
    let mut service = open_service();
    let original = service.create_note(mcp_ideas()).unwrap();
    let saves_before = service.store().save_count();

    let err = service
        .update_note(
            original.id,
            NotePatch {
                title: Some("Renamed".to_string()),
                kind: Some("essay".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), "validation_error");

    assert_eq!(service.read_note(original.id).unwrap(), original);
    assert_eq!(service.store().save_count(), saves_before);
}

#[test]
fn update_and_delete_unknown_id_are_not_found() {
    let mut service = open_service();
    let missing = Uuid::new_v4();

    let err = service
        .update_note(missing, NotePatch::default())
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == missing));

    let err = service.delete_note(missing).unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn delete_then_read_is_not_found() {
    let mut service = open_service();
    let keep = service
        .create_note(NewNote::new("keep", "k", "work", "idea", "maybe"))
        .unwrap();
    let note = service.create_note(mcp_ideas()).unwrap();

    service.delete_note(note.id).unwrap();

    let err = service.read_note(note.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == note.id));
    assert_eq!(service.list_notes().len(), 1);
    assert_eq!(service.list_notes()[0].id, keep.id);
}

#[test]
fn list_preserves_insertion_order_across_updates() {
    let mut service = open_service();
    let first = service
        .create_note(NewNote::new("first", "1", "work", "idea", "soon"))
        .unwrap();
    let second = service
        .create_note(NewNote::new("second", "2", "work", "idea", "soon"))
        .unwrap();
    service
        .update_note(
            first.id,
            NotePatch {
                content: Some("edited".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    let ids: Vec<_> = service.list_notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn read_only_operations_do_not_flush() {
    let mut service = open_service();
    let note = service.create_note(mcp_ideas()).unwrap();
    let saves = service.store().save_count();

    service.read_note(note.id).unwrap();
    service.list_tags();
    service.get_schema();
    service.find_notes(&Default::default());

    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn tag_usage_counts_each_topic_occurrence() {
    let mut service = open_service();
    service
        .create_note(
            NewNote::new("a", "a", "work", "idea", "active").with_topics(["ai", "mcp", "coding"]),
        )
        .unwrap();
    service
        .create_note(NewNote::new("b", "b", "work", "todo", "active").with_topics(["ai"]))
        .unwrap();

    let usage = service.list_tags();
    let get = |dimension: Dimension, value: &str| {
        usage
            .get(&dimension)
            .and_then(|counts| counts.get(value))
            .copied()
    };
    assert_eq!(get(Dimension::Category, "work"), Some(2));
    assert_eq!(get(Dimension::Type, "idea"), Some(1));
    assert_eq!(get(Dimension::Type, "todo"), Some(1));
    assert_eq!(get(Dimension::Priority, "active"), Some(2));
    assert_eq!(get(Dimension::Topics, "ai"), Some(2));
    assert_eq!(get(Dimension::Topics, "coding"), Some(1));
    assert_eq!(get(Dimension::Topics, "design"), None);
    assert_eq!(get(Dimension::Category, "personal"), None);
}
