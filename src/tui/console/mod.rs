//! Interactive console for browsing and editing CRM records
//!
//! One component family serves every collection: the tabs share a single
//! query controller (search, sort, filter, pagination) and differ only in
//! their resource descriptor and forms.

mod confirm;
mod forms;
pub mod model;
pub mod view;

pub use confirm::ConfirmState;
pub use forms::{FieldKind, FormField, FormKind, FormState};
pub use model::{
    ConsoleAction, ConsoleState, MutationRequest, compute_shortcuts, key_to_action,
    reduce_console_state,
};
pub use view::{Console, ConsoleProps};
