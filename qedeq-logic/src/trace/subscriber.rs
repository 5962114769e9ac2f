use serde_derive::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::Write,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    thread::{self, ThreadId},
};
use tracing::*;

/// Thread safe json logger that writes a `CheckRecord` for every checked formula or term into a
/// given log file. Events are collected into the record of the `@check` span they occur in, so
/// checks running on different threads do not mix.
pub struct JsonLogger {
    log_file: Mutex<File>,
    check_records: Mutex<HashMap<u64, CheckRecord>>,
    entered: Mutex<HashMap<ThreadId, Vec<u64>>>,
    next_id: AtomicU64,
}

impl JsonLogger {
    pub fn new(log_file: File) -> Self {
        Self {
            log_file: Mutex::new(log_file),
            check_records: Mutex::new(HashMap::new()),
            entered: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn write(&self, record: &CheckRecord) {
        if let (Ok(json), Ok(mut file)) = (serde_json::to_string_pretty(record), self.log_file.lock())
        {
            let _ = file
                .write_all(json.as_bytes())
                .and_then(|_| file.write_all(b"\n"));
        }
    }

    // the span of `event`: its explicit parent or the innermost span entered on this thread
    fn span_of(&self, event: &Event) -> Option<u64> {
        if let Some(parent) = event.parent() {
            return Some(parent.into_u64());
        }
        let entered = self.entered.lock().ok()?;
        entered
            .get(&thread::current().id())
            .and_then(|spans| spans.last().copied())
    }

    fn update<F: FnOnce(&mut CheckRecord)>(&self, event: &Event, update: F) {
        if let Some(span) = self.span_of(event) {
            if let Ok(mut records) = self.check_records.lock() {
                update(records.entry(span).or_insert_with(CheckRecord::new));
            }
        }
    }
}

impl subscriber::Subscriber for JsonLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes) -> Id {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut records) = self.check_records.lock() {
            records.insert(id, CheckRecord::new());
        }
        Id::from_u64(id)
    }

    fn record(&self, _span: &Id, _values: &span::Record) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event) {
        let mut recorder = Recorder::new();
        event.record(&mut recorder);

        if let Some(event_type) = recorder.event.clone() {
            match event_type.as_str() {
                super::ACCEPT | super::REJECT => self.update(event, |record| {
                    record.set_result(ResultRecord::try_from(recorder).ok())
                }),
                super::CONFLICT | super::REBIND => self.update(event, |record| {
                    record.add_conflict(ConflictRecord::try_from(recorder).ok())
                }),
                _ => (),
            }
        }
    }

    fn enter(&self, span: &Id) {
        if let Ok(mut entered) = self.entered.lock() {
            entered
                .entry(thread::current().id())
                .or_insert_with(Vec::new)
                .push(span.into_u64());
        }
    }

    fn exit(&self, span: &Id) {
        let id = span.into_u64();
        if let Ok(mut entered) = self.entered.lock() {
            let thread = thread::current().id();
            if let Some(spans) = entered.get_mut(&thread) {
                if let Some(position) = spans.iter().rposition(|s| *s == id) {
                    spans.remove(position);
                }
                if spans.is_empty() {
                    entered.remove(&thread);
                }
            }
        }

        let record = match self.check_records.lock() {
            Ok(mut records) => records.remove(&id),
            Err(_) => return,
        };
        if let Some(record) = record.filter(|r| r.result_record.is_some()) {
            self.write(&record);
        }
    }
}

/// Log information associated to the check of a top-level element: its outcome and the scope
/// conflicts found on the way.
#[derive(Serialize)]
struct CheckRecord {
    #[serde(rename = "result")]
    result_record: Option<ResultRecord>,
    #[serde(rename = "conflicts", skip_serializing_if = "Vec::is_empty")]
    conflict_records: Vec<ConflictRecord>,
}

impl CheckRecord {
    fn new() -> Self {
        Self {
            result_record: None,
            conflict_records: Vec::new(),
        }
    }

    /// Set the `ResultRecord` of the check, triggered by ACCEPT and REJECT events.
    fn set_result(&mut self, result_record: Option<ResultRecord>) {
        self.result_record = result_record;
    }

    /// Add a `ConflictRecord`, triggered by CONFLICT and REBIND events.
    fn add_conflict(&mut self, conflict_record: Option<ConflictRecord>) {
        if let Some(conflict_record) = conflict_record {
            self.conflict_records.push(conflict_record);
        }
    }
}

/// A record, containing the outcome of checking a formula or a term.
#[derive(Serialize, Deserialize)]
struct ResultRecord {
    event: String,
    context: String,
    kind: String,
    element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ResultRecord {
    fn try_from(value: Recorder) -> Result<Self, ()> {
        match (value.event, value.context, value.kind, value.element) {
            (Some(event), Some(context), Some(kind), Some(element)) => Ok(ResultRecord {
                event,
                context,
                kind,
                element,
                code: value.code,
                location: value.location,
                reference: value.reference,
                message: value.message,
            }),
            _ => Err(()),
        }
    }
}

/// A record, containing a subject variable that is used inconsistently.
#[derive(Serialize, Deserialize)]
struct ConflictRecord {
    event: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    free: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl ConflictRecord {
    fn try_from(value: Recorder) -> Result<Self, ()> {
        match (value.event, value.name) {
            (Some(event), Some(name)) => Ok(ConflictRecord {
                event,
                name,
                free: value.free,
                bound: value.bound,
                location: value.location,
            }),
            _ => Err(()),
        }
    }
}

/// Generic trace visitor to collect as many fields as it can. Based on the triggering event,
/// `Recorder` will be converted to its corresponding log record.
#[derive(Default)]
struct Recorder {
    event: Option<String>,
    context: Option<String>,
    kind: Option<String>,
    element: Option<String>,
    code: Option<u64>,
    location: Option<String>,
    reference: Option<String>,
    message: Option<String>,
    name: Option<String>,
    free: Option<String>,
    bound: Option<String>,
}

impl Recorder {
    fn new() -> Recorder {
        Recorder::default()
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            super::EVENT_FIELD => self.event = Some(value),
            super::CONTEXT_FIELD => self.context = Some(value),
            super::KIND_FIELD => self.kind = Some(value),
            super::ELEMENT_FIELD => self.element = Some(value),
            super::LOCATION_FIELD => self.location = Some(value),
            super::REFERENCE_FIELD if !value.is_empty() => self.reference = Some(value),
            super::MESSAGE_FIELD => self.message = Some(value),
            super::NAME_FIELD => self.name = Some(value),
            super::FREE_FIELD => self.free = Some(value),
            super::BOUND_FIELD => self.bound = Some(value),
            _ => (),
        }
    }
}

impl field::Visit for Recorder {
    fn record_u64(&mut self, field: &field::Field, value: u64) {
        if field.name() == super::CODE_FIELD {
            self.code = Some(value);
        }
    }

    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.set(field.name(), value.to_owned());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        self.set(field.name(), format!("{:?}", value));
    }
}
