//! Repository layer: entity-scoped database operations.
//!
//! One sub-module per table, free functions over a borrowed connection.
//! Every call is a single SQL round trip; absence comes back as
//! `Ok(None)` or `false`, never as an error. All public functions are
//! re-exported here so callers address the layer as `db::repository`.

mod lab_result;
mod medical_record;
mod medication;
mod note;
mod patient;
mod session;
mod user;

pub use lab_result::*;
pub use medical_record::*;
pub use medication::*;
pub use note::*;
pub use patient::*;
pub use session::*;
pub use user::*;
