mod create_reminder_record;
mod delete_reminder_record;
mod get_reminder_records;
mod send_reminder_now;

use actix_web::web;
use create_reminder_record::create_reminder_record_controller;
use delete_reminder_record::delete_reminder_record_controller;
use get_reminder_records::get_reminder_records_controller;
use send_reminder_now::send_reminder_now_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/patients", web::get().to(get_reminder_records_controller));
    cfg.route("/patients", web::post().to(create_reminder_record_controller));
    cfg.route(
        "/patients/{record_id}",
        web::delete().to(delete_reminder_record_controller),
    );
    cfg.route(
        "/patients/{record_id}/remind",
        web::post().to(send_reminder_now_controller),
    );
}
