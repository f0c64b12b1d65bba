use tagnote_core::{MemoryStore, NewNote, NoteService, NoteServiceError, TagSchema};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn fresh_document_has_default_schema() {
    let service = NoteService::open(MemoryStore::new()).unwrap();
    assert_eq!(service.get_schema(), &TagSchema::default_vocabulary());
    assert_eq!(service.store().save_count(), 1);
}

#[test]
fn extend_adds_value_once_and_is_idempotent() {
    let mut service = NoteService::open(MemoryStore::new()).unwrap();

    let schema = service
        .add_tags_to_schema("priority", &strings(&["urgent", "urgent"]))
        .unwrap();
    let urgent = schema
        .priority
        .iter()
        .filter(|value| value.as_str() == "urgent")
        .count();
    assert_eq!(urgent, 1);
    assert_eq!(schema.priority.last().map(String::as_str), Some("urgent"));
    let saves = service.store().save_count();

    let again = service
        .add_tags_to_schema("priority", &strings(&["urgent"]))
        .unwrap();
    assert_eq!(again, schema);
    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn extend_is_case_sensitive() {
    let mut service = NoteService::open(MemoryStore::new()).unwrap();
    let schema = service
        .add_tags_to_schema("topics", &strings(&["AI"]))
        .unwrap();
    assert!(schema.topics.contains(&"ai".to_string()));
    assert!(schema.topics.contains(&"AI".to_string()));
}

#[test]
fn extend_unknown_dimension_fails() {
    let mut service = NoteService::open(MemoryStore::new()).unwrap();
    let before = service.get_schema().clone();

    let err = service
        .add_tags_to_schema("status", &strings(&["open"]))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidDimension(ref name) if name == "status"));
    assert_eq!(err.kind(), "invalid_dimension");
    assert!(err.to_string().contains("category, type, priority, topics"));
    assert_eq!(service.get_schema(), &before);
}

#[test]
fn extended_values_become_valid_for_notes() {
    let mut service = NoteService::open(MemoryStore::new()).unwrap();
    let draft = NewNote::new("garden", "beds", "personal", "todo", "soon").with_topics(["gardening"]);
    assert!(service.create_note(draft.clone()).is_err());

    service
        .add_tags_to_schema("topics", &strings(&["gardening"]))
        .unwrap();
    assert!(service.validate_tag("topics", "gardening"));
    let note = service.create_note(draft).unwrap();
    assert_eq!(note.tags.topics, vec!["gardening"]);
}

#[test]
fn validate_rejects_unknown_dimensions_and_values() {
    let service = NoteService::open(MemoryStore::new()).unwrap();
    assert!(service.validate_tag("type", "todo"));
    assert!(!service.validate_tag("type", "task"));
    assert!(!service.validate_tag("kind", "todo"));
}
