use uuid::Uuid;

/// Opaque identifier shared by every entity in the store.
pub type Id = String;

/// Random (v4) UUID rendered as a hyphenated string. No coordination needed
/// between processes, so restarts and concurrent writers never collide.
pub fn new_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}
