//! Property-based testing utilities using proptest.

use eventease_core::Money;
use proptest::prelude::*;

/// One step against a single event's seat counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerOp {
    /// Try to take a seat
    Reserve,
    /// Give a seat back
    Release,
}

/// Seat counts small enough to exhaust within a test case
pub fn seat_count() -> impl Strategy<Value = u32> {
    0u32..50
}

/// Ticket prices up to $1,000
pub fn ticket_price() -> impl Strategy<Value = Money> {
    (0u64..=100_000).prop_map(Money::from_cents)
}

/// Random reserve/release sequences, weighted toward reserves
pub fn ledger_ops(max_len: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
    prop::collection::vec(
        prop_oneof![3 => Just(LedgerOp::Reserve), 1 => Just(LedgerOp::Release)],
        0..max_len,
    )
}
