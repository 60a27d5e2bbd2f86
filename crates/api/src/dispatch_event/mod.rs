mod get_dispatch_events;
mod receive_call_status;
mod send_reminder;

use actix_web::web;
use get_dispatch_events::get_dispatch_events_controller;
use receive_call_status::receive_call_status_controller;
pub use send_reminder::{DispatchOutcome, Dispatcher};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/dispatch-events",
        web::get().to(get_dispatch_events_controller),
    );
    cfg.route(
        "/webhooks/call-status",
        web::post().to(receive_call_status_controller),
    );
}
