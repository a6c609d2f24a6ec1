//! End-to-end scenario: a toy in-memory order table that raises and consumes
//! `StructuredError`. The table is a test collaborator, not part of the
//! crate - it stands in for whatever business logic produces the failures.

use std::collections::HashMap;

use errtrail::{StructuredError, frame};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order {0} does not exist")]
struct MissingOrder(u32);

struct OrderTable {
    statuses: HashMap<u32, &'static str>,
}

impl OrderTable {
    fn new() -> Self {
        Self {
            statuses: HashMap::from([(1, "pending"), (11, "pending")]),
        }
    }

    fn update(&mut self, id: u32, status: &'static str) -> Result<(), StructuredError<MissingOrder>> {
        let _frame = frame!();
        match self.statuses.get_mut(&id) {
            Some(slot) => {
                *slot = status;
                Ok(())
            }
            None => Err(errtrail::raise!("update error: ", MissingOrder(id))),
        }
    }
}

fn handle_update(table: &mut OrderTable, id: u32) -> Result<(), StructuredError<MissingOrder>> {
    let _frame = frame!();
    table.update(id, "shipped")
}

fn process_request(table: &mut OrderTable, id: u32) -> Result<(), StructuredError<MissingOrder>> {
    let _frame = frame!();
    handle_update(table, id)
}

// ============================================================================
// Lookup hit and miss
// ============================================================================

#[test]
fn update_existing_order_succeeds() {
    let mut table = OrderTable::new();
    assert!(process_request(&mut table, 11).is_ok());
    assert_eq!(table.statuses[&11], "shipped");
}

#[test]
fn update_missing_order_raises() {
    let mut table = OrderTable::new();
    let err = process_request(&mut table, 10).unwrap_err();

    assert_eq!(err.message(), "update error: ");
    assert_eq!(*err.payload(), MissingOrder(10));
    assert!(err.origin().file().ends_with("order_lookup.rs"));
    assert!(err.origin().function().ends_with("update"));
}

#[test]
fn handler_recovers_the_typed_payload() {
    let mut table = OrderTable::new();
    let err = process_request(&mut table, 99).unwrap_err();

    // Exact type identity is preserved through propagation.
    let MissingOrder(id) = err.into_payload();
    assert_eq!(id, 99);
}

#[test]
fn payload_error_impl_composes() {
    let mut table = OrderTable::new();
    let err = process_request(&mut table, 10).unwrap_err();
    assert_eq!(err.payload().to_string(), "order 10 does not exist");
}

// ============================================================================
// Hybrid trace through the three-level chain
// ============================================================================

#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
#[test]
fn miss_captures_the_instrumented_chain() {
    let mut table = OrderTable::new();
    let err = process_request(&mut table, 10).unwrap_err();

    let frames = err.trace().frames();
    assert_eq!(frames.len(), 3, "one frame per instrumented level");
    assert!(frames[0].function().ends_with("process_request"));
    assert!(frames[1].function().ends_with("handle_update"));
    assert!(frames[2].function().ends_with("update"));
}

#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
#[test]
fn successful_updates_leave_no_frames_behind() {
    let mut table = OrderTable::new();
    process_request(&mut table, 1).unwrap();
    errtrail::with_thread_log(|log| assert!(log.is_empty()));
}
