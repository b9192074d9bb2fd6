//! Operation journal for obs-toolkit
//!
//! Every backup, restore, delete and applied rename pass is appended to an
//! audit log so there is a record of what changed the OBS config folder and
//! when, including failures.
//!
//! - `AuditEntry`: timestamp, operation, target and outcome
//! - `AuditLogger`: appends entries as JSON lines and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::AuditLogger;
