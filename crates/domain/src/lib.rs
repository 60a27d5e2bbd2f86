mod dispatch_event;
mod due_check;
mod notification;
mod reminder_record;
mod shared;

pub use dispatch_event::{DispatchEvent, DispatchStatus};
pub use due_check::{evaluate, is_due, DueCheck, NotDueReason, SkipReason};
pub use notification::{DeliveryReport, Notification};
pub use reminder_record::{
    InvalidReminderTimeError, NewReminderRecord, RawReminderRecord, RecordValidationError,
    ReminderRecord, ReminderTime,
};
pub use shared::entity::{Entity, ID};
