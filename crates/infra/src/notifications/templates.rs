//! Email subject and body rendering

use coachbook_domain::utils::timezone::format_slot_with_zone;
use coachbook_domain::{AppointmentNotice, NoticeKind};

/// Subject line for a notice.
pub fn subject(notice: &AppointmentNotice) -> String {
    let session = notice.session_type.label();
    match notice.kind {
        NoticeKind::Booked => format!("New booking: {session} on {}", notice.date),
        NoticeKind::Confirmed => format!("Confirmed: {session} on {}", notice.date),
        NoticeKind::Updated => format!("Updated: {session} on {}", notice.date),
    }
}

/// HTML body for a notice.
pub fn html_body(notice: &AppointmentNotice) -> String {
    let when = format_slot_with_zone(&notice.time, notice.date, &notice.timezone)
        .unwrap_or_else(|_| notice.time.clone());

    let mut lines = vec![
        format!("<p>Hi {},</p>", notice.recipient.name),
        match notice.kind {
            NoticeKind::Booked => format!(
                "<p>{} requested a {} session with {} on {} at {}.</p>",
                notice.talent_name,
                notice.session_type.label(),
                notice.coach_name,
                notice.date,
                when
            ),
            NoticeKind::Confirmed => format!(
                "<p>Your {} session between {} and {} on {} at {} is confirmed.</p>",
                notice.session_type.label(),
                notice.coach_name,
                notice.talent_name,
                notice.date,
                when
            ),
            NoticeKind::Updated => format!(
                "<p>Your {} session between {} and {} on {} at {} was updated.</p>",
                notice.session_type.label(),
                notice.coach_name,
                notice.talent_name,
                notice.date,
                when
            ),
        },
    ];

    if let Some(ref meet_link) = notice.meet_link {
        lines.push(format!("<p>Join here: <a href=\"{meet_link}\">{meet_link}</a></p>"));
    }
    if let Some(ref calendar_link) = notice.calendar_link {
        lines.push(format!("<p><a href=\"{calendar_link}\">View in your calendar</a></p>"));
    }
    lines.push("<p>— CoachBook</p>".to_string());

    lines.join("\n")
}
