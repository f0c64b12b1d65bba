//! Tool-call surface for an external assistant host.
//!
//! # Responsibility
//! - Decode JSON argument records for the eight note tools.
//! - Dispatch them onto `NoteService` and encode JSON results.
//! - Describe the tools (name, description, input schema) for hosts that
//!   enumerate them.
//!
//! # Invariants
//! - Never panics; every failure becomes a `ToolError { kind, message }`.
//! - Argument decoding failures are `validation_error`, never `io_error`.
//! - Read-only tools never flush the document.

use crate::model::note::{NewNote, NoteId, NotePatch, NoteValidationError};
use crate::search::filter::{parse_time_bound, NoteFilter};
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::store::DocumentStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const TOOL_GET_TAG_SCHEMA: &str = "get_tag_schema";
pub const TOOL_CREATE_NOTE: &str = "create_note";
pub const TOOL_UPDATE_NOTE: &str = "update_note";
pub const TOOL_DELETE_NOTE: &str = "delete_note";
pub const TOOL_READ_NOTE: &str = "read_note";
pub const TOOL_FIND_NOTES_BY_TAGS: &str = "find_notes_by_tags";
pub const TOOL_LIST_TAGS: &str = "list_tags";
pub const TOOL_ADD_TAGS_TO_SCHEMA: &str = "add_tags_to_schema";

const TOOL_NAMES: &[&str] = &[
    TOOL_GET_TAG_SCHEMA,
    TOOL_CREATE_NOTE,
    TOOL_UPDATE_NOTE,
    TOOL_DELETE_NOTE,
    TOOL_READ_NOTE,
    TOOL_FIND_NOTES_BY_TAGS,
    TOOL_LIST_TAGS,
    TOOL_ADD_TAGS_TO_SCHEMA,
];

/// Names of all supported tools, in descriptor order.
pub fn tool_names() -> &'static [&'static str] {
    TOOL_NAMES
}

/// Structured tool failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    /// `validation_error|not_found|invalid_dimension|io_error|unknown_tool`.
    pub kind: &'static str,
    pub message: String,
}

impl ToolError {
    fn unknown_tool(name: &str) -> Self {
        Self {
            kind: "unknown_tool",
            message: format!(
                "unknown tool `{name}`; expected one of: {}",
                TOOL_NAMES.join(", ")
            ),
        }
    }

    fn not_found(raw_id: &str) -> Self {
        Self {
            kind: "not_found",
            message: format!("note with id '{raw_id}' not found"),
        }
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for ToolError {}

impl From<NoteServiceError> for ToolError {
    fn from(value: NoteServiceError) -> Self {
        Self {
            kind: value.kind(),
            message: value.to_string(),
        }
    }
}

impl From<NoteValidationError> for ToolError {
    fn from(value: NoteValidationError) -> Self {
        NoteServiceError::Validation(value).into()
    }
}

/// Tool metadata for host enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema of the argument record.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
struct CreateNoteArgs {
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
    topics: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteArgs {
    id: String,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
    topics: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct NoteIdArgs {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct FindNotesArgs {
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
    topics: Option<Vec<String>>,
    title_contains: Option<String>,
    created_after: Option<String>,
    created_before: Option<String>,
    updated_after: Option<String>,
    updated_before: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddTagsArgs {
    dimension: String,
    tags: Vec<String>,
}

impl FindNotesArgs {
    fn into_filter(self) -> Result<NoteFilter, NoteValidationError> {
        let bound = |field: &'static str, value: Option<String>| {
            value
                .map(|value| parse_time_bound(field, &value))
                .transpose()
        };
        Ok(NoteFilter {
            category: self.category,
            kind: self.kind,
            priority: self.priority,
            topics: self.topics,
            title_contains: self.title_contains,
            created_after: bound("created_after", self.created_after)?,
            created_before: bound("created_before", self.created_before)?,
            updated_after: bound("updated_after", self.updated_after)?,
            updated_before: bound("updated_before", self.updated_before)?,
        })
    }
}

/// Executes one tool call and returns its JSON result.
///
/// `arguments` may be `null` for tools without required arguments.
pub fn call_tool<S: DocumentStore>(
    service: &mut NoteService<S>,
    name: &str,
    arguments: Value,
) -> Result<Value, ToolError> {
    match name {
        TOOL_GET_TAG_SCHEMA => to_json(service.get_schema()),
        TOOL_CREATE_NOTE => {
            let args: CreateNoteArgs = decode_args(arguments)?;
            let note = service.create_note(NewNote {
                title: args.title,
                content: args.content,
                category: args.category,
                kind: args.kind,
                priority: args.priority,
                topics: args.topics,
            })?;
            to_json(&note)
        }
        TOOL_UPDATE_NOTE => {
            let args: UpdateNoteArgs = decode_args(arguments)?;
            let id = parse_note_id(&args.id)?;
            let note = service.update_note(
                id,
                NotePatch {
                    title: args.title,
                    content: args.content,
                    category: args.category,
                    kind: args.kind,
                    priority: args.priority,
                    topics: args.topics,
                },
            )?;
            to_json(&note)
        }
        TOOL_DELETE_NOTE => {
            let args: NoteIdArgs = decode_args(arguments)?;
            let id = parse_note_id(&args.id)?;
            service.delete_note(id)?;
            Ok(json!({ "deleted": true, "id": id }))
        }
        TOOL_READ_NOTE => {
            let args: NoteIdArgs = decode_args(arguments)?;
            let id = parse_note_id(&args.id)?;
            to_json(&service.read_note(id)?)
        }
        TOOL_FIND_NOTES_BY_TAGS => {
            let args: FindNotesArgs = decode_args(arguments)?;
            let filter = args.into_filter()?;
            let notes = service.find_notes(&filter);
            Ok(json!({ "count": notes.len(), "notes": notes }))
        }
        TOOL_LIST_TAGS => to_json(&service.list_tags()),
        TOOL_ADD_TAGS_TO_SCHEMA => {
            let args: AddTagsArgs = decode_args(arguments)?;
            let schema = service.add_tags_to_schema(&args.dimension, &args.tags)?;
            to_json(&schema)
        }
        other => Err(ToolError::unknown_tool(other)),
    }
}

/// Descriptors for every tool, including JSON input schemas.
pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    let topics = json!({
        "type": "array",
        "items": { "type": "string" },
    });
    let id = json!({ "type": "string", "description": "Note UUID" });

    vec![
        ToolDescriptor {
            name: TOOL_GET_TAG_SCHEMA,
            description: "Get the tag schema: all valid categories, types, priorities and topics",
            input_schema: json!({ "type": "object", "properties": {}, "required": [] }),
        },
        ToolDescriptor {
            name: TOOL_CREATE_NOTE,
            description: "Create a note with title, markdown content and structured tags",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "content": { "type": "string", "description": "Markdown content" },
                    "category": { "type": "string", "description": "Must be in schema" },
                    "type": { "type": "string", "description": "Must be in schema" },
                    "priority": { "type": "string", "description": "Must be in schema" },
                    "topics": topics,
                },
                "required": ["title", "content", "category", "type", "priority"],
            }),
        },
        ToolDescriptor {
            name: TOOL_UPDATE_NOTE,
            description: "Update an existing note; omitted fields are kept, topics are replaced",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": id,
                    "title": { "type": "string" },
                    "content": { "type": "string" },
                    "category": { "type": "string" },
                    "type": { "type": "string" },
                    "priority": { "type": "string" },
                    "topics": topics,
                },
                "required": ["id"],
            }),
        },
        ToolDescriptor {
            name: TOOL_DELETE_NOTE,
            description: "Delete a note by id",
            input_schema: json!({
                "type": "object",
                "properties": { "id": id },
                "required": ["id"],
            }),
        },
        ToolDescriptor {
            name: TOOL_READ_NOTE,
            description: "Read one note by id",
            input_schema: json!({
                "type": "object",
                "properties": { "id": id },
                "required": ["id"],
            }),
        },
        ToolDescriptor {
            name: TOOL_FIND_NOTES_BY_TAGS,
            description: "Find notes by tags, title substring and date bounds (AND across fields, OR within topics)",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string" },
                    "type": { "type": "string" },
                    "priority": { "type": "string" },
                    "topics": topics,
                    "title_contains": { "type": "string", "description": "Case-insensitive" },
                    "created_after": { "type": "string", "description": "ISO-8601, exclusive" },
                    "created_before": { "type": "string", "description": "ISO-8601, exclusive" },
                    "updated_after": { "type": "string", "description": "ISO-8601, exclusive" },
                    "updated_before": { "type": "string", "description": "ISO-8601, exclusive" },
                },
                "required": [],
            }),
        },
        ToolDescriptor {
            name: TOOL_LIST_TAGS,
            description: "Count tag values in use across all notes",
            input_schema: json!({ "type": "object", "properties": {}, "required": [] }),
        },
        ToolDescriptor {
            name: TOOL_ADD_TAGS_TO_SCHEMA,
            description: "Add values to a schema dimension (category, type, priority or topics)",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "dimension": {
                        "type": "string",
                        "enum": ["category", "type", "priority", "topics"],
                    },
                    "tags": topics,
                },
                "required": ["dimension", "tags"],
            }),
        },
    ]
}

fn decode_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|err| NoteValidationError::InvalidArguments(err.to_string()).into())
}

/// Non-UUID ids cannot name any note, so they are reported as not found.
fn parse_note_id(raw: &str) -> Result<NoteId, ToolError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ToolError::not_found(raw))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|err| ToolError {
        kind: "io_error",
        message: format!("failed to encode result: {err}"),
    })
}
