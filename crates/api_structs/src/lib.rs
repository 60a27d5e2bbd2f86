mod dispatch_event;
mod reminder_record;
mod status;
mod voice;

pub mod dtos {
    pub use crate::dispatch_event::dtos::*;
    pub use crate::reminder_record::dtos::*;
}

pub use crate::dispatch_event::api::*;
pub use crate::reminder_record::api::*;
pub use crate::status::api::*;
pub use crate::voice::api::*;
