//! Identifier generation for newly created events.

use uuid::Uuid;

/// Produces a fresh unique id per created event. Uniqueness across the
/// process lifetime is sufficient; ids are opaque strings everywhere else.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs, the production generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids ("1", "2", ...) for deterministic tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }
}
