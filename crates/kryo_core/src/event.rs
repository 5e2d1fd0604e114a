//! Events and logic bindings attached to components.
//!
//! The original C model threads these as singly-linked, push-front lists
//! through a `next` pointer. Here they are plain `Vec`s where index 0 is
//! the most-recently-added entry, preserving the same "last handler wins"
//! lookup order without hand-rolled links.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EventType {
    Click,
    Hover,
    Focus,
    Blur,
    Key,
    Scroll,
    Timer,
    Custom,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SourceLanguage {
    Lua,
    C,
    Wasm,
    Native,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ClosureVariable {
    pub name: String,
    pub value: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct HandlerSource {
    pub language: SourceLanguage,
    pub code: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub closure_variables: Vec<ClosureVariable>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Event {
    pub event_type: Option<EventType>,
    pub event_name: Option<String>,
    pub logic_id: Option<crate::ids::LogicId>,
    pub handler_data: Option<String>,
    pub handler_source: Option<HandlerSource>,
    pub bytecode_function_id: Option<u32>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Self { event_type: Some(event_type), ..Default::default() }
    }
}

/// Find the most recently attached handler for `event_type`.
///
/// Mirrors the spec's "event lookup returns the most recently added
/// handler matching a type": callers push new events to the front via
/// [`push_front`], so the first match walking forward is the newest.
pub fn find_handler(events: &[Event], event_type: EventType) -> Option<&Event> {
    events.iter().find(|e| e.event_type == Some(event_type))
}

/// Insert `event` at the front of `events`, matching push-front semantics.
pub fn push_front(events: &mut Vec<Event>, event: Event) {
    events.insert(0, event);
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Logic {
    pub id: crate::ids::LogicId,
    pub source_type: SourceLanguage,
    pub source_code: String,
}

impl Logic {
    pub fn new(id: crate::ids::LogicId, source_type: SourceLanguage, source_code: impl Into<String>) -> Self {
        Self { id, source_type, source_code: source_code.into() }
    }
}
