mod account_type;
mod event;
mod property;
mod session;

pub use account_type::{is_internal_account, AccountType};
pub use event::{event_names, EventEnvelope, EventStatus, LeaveReason};
pub use property::{properties_from_json, Properties, PropertyValue};
pub use session::{ActivePageview, Session};
