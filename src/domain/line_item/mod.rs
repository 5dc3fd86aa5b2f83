//! Line items - the declarative fields a goal collects.
//!
//! - `schema` - the [`LineItem`] description loaded from the agent roster
//! - `validator` - lazy schema validation reporting every violation
//! - `value` - typed values and answer coercion

mod schema;
mod validator;
mod value;

pub use schema::{FieldType, LineItem};
pub use validator::{Violation, ViolationList};
pub use value::{FieldValue, ValueRejection};
