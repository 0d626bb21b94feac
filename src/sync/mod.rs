//! Turn synchronization between two clients sharing one game record.
//!
//! There is no push channel: each client polls the store while the other
//! side is to move. `Clash::refresh` performs one delayed read and reports
//! `NoChange` or `RecordDeleted`; `Session` runs the polling loop and
//! owns the current `Clash` for a presentation layer.
//!
//! ## Races
//!
//! The polling task and caller-issued operations both replace the current
//! `Clash`. The last writer wins; in practice the task only runs while the
//! local player cannot act.

mod session;

pub use session::Session;
