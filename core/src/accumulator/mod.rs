//! Per-actor rolling damage totals
//!
//! ```text
//!   Update Protocol ──upsert──▶ ┌──────────────────────────────┐
//!                               │ AccumulatorStore             │
//!   Removal Protocol ─remove──▶ │ ActorId → { total, expires } │
//!                               └──────────────────────────────┘
//!   Sweep Protocol ─for_each_expired──┘
//! ```
//!
//! The store is single-owner. Callers only ever see `AccumulatorEntry`
//! copies, never references that outlive the call.

mod entry;
mod store;

pub use entry::AccumulatorEntry;
pub use store::{AccumulatorStore, MAX_PRESIZE, Upsert};
