use actix_web::{http::header, web, HttpResponse};
use med_reminder_api_structs::get_voice_response::QueryParams;

const DEFAULT_MESSAGE: &str = "Hello. This is a reminder to take your medicine now.";

/// Escapes text for use as XML character data
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn voice_document(message: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?><Response><Say>{}</Say></Response>",
        escape_xml(message)
    )
}

/// Voice script for telephony providers calling back for a reminder call
async fn get_voice_response_controller(query: web::Query<QueryParams>) -> HttpResponse {
    let message = query.message.as_deref().unwrap_or(DEFAULT_MESSAGE);

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/xml"))
        .body(voice_document(message))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/voice", web::get().to(get_voice_response_controller));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_escapes_markup() {
        assert_eq!(
            escape_xml(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#x27;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_xml("plain text"), "plain text");
    }

    #[test]
    fn it_wraps_the_message() {
        assert_eq!(
            voice_document(DEFAULT_MESSAGE),
            "<?xml version='1.0' encoding='UTF-8'?><Response><Say>Hello. This is a reminder to take your medicine now.</Say></Response>"
        );
    }
}
