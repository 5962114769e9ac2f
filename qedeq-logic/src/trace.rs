//! Names the spans, events and fields that the checker reports through `tracing`.
pub mod subscriber;

pub const DEFAULT_JSON_LOG_FILE: &str = "log.json";

// check log record fields:
pub const EVENT_FIELD: &str = "event";
pub const CONTEXT_FIELD: &str = "context";
pub const KIND_FIELD: &str = "kind";
pub const ELEMENT_FIELD: &str = "element";
pub const CODE_FIELD: &str = "code";
pub const LOCATION_FIELD: &str = "location";
pub const REFERENCE_FIELD: &str = "reference";
pub const MESSAGE_FIELD: &str = "message";

// scope conflict log fields:
pub const NAME_FIELD: &str = "name";
pub const FREE_FIELD: &str = "free";
pub const BOUND_FIELD: &str = "bound";

// log span types:
/// Inside the check of a top-level formula or term.
pub const CHECK: &str = "@check";

// log event types:
/// The element is well-formed.
pub const ACCEPT: &str = "@accept";

/// The element is rejected with a diagnostic.
pub const REJECT: &str = "@reject";

/// A subject variable occurs free in one sibling and bound in another.
pub const CONFLICT: &str = "@conflict";

/// A binder binds a subject variable that an enclosing binder binds already.
pub const REBIND: &str = "@rebind";
