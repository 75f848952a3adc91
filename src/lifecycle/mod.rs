//! Membership notice planning
//!
//! Pure same-day planner: given the validated roster, the action
//! templates, and a date, produce the notices due that day as fresh queue
//! items. JOIN fires on the join date, EXPIRE on the expiry date, RENEW
//! and REMIND at expiry plus the template's day offset (reminders use a
//! negative offset). Members without an email address cannot receive
//! notices and are skipped.

use chrono::{Duration, NaiveDate};

use crate::field::FieldResult;
use crate::outbox::QueuedEmail;
use crate::roster::{ActionSpec, ActionType, BootstrapRow};

/// Notices due on `today`, in roster order then action order.
pub fn plan_notices(
    members: &[BootstrapRow],
    actions: &[ActionSpec],
    today: NaiveDate,
) -> FieldResult<Vec<QueuedEmail>> {
    let mut queued = Vec::new();

    for member in members {
        if member.email.is_empty() {
            continue;
        }
        for action in actions {
            if !due_today(member, action, today) {
                continue;
            }
            let subject = render(&action.subject, member);
            let body = render(&action.body, member);
            queued.push(QueuedEmail::new(member.email.clone(), subject, body)?);
        }
    }

    Ok(queued)
}

/// Whether this action fires for this member on `today`.
fn due_today(member: &BootstrapRow, action: &ActionSpec, today: NaiveDate) -> bool {
    match action.action_type {
        ActionType::Join => member.joined_on.map(|t| t.date_naive()) == Some(today),
        ActionType::Expire => member.expires_on.map(|t| t.date_naive()) == Some(today),
        ActionType::Renew | ActionType::Remind => {
            // Round to whole days; truncation would shift a 14.9-day
            // offset a full day early.
            let offset = Duration::days(action.offset_days.unwrap_or(0.0).round() as i64);
            member.expires_on.map(|t| t.date_naive() + offset) == Some(today)
        }
    }
}

/// Substitutes `{Field}` placeholders from the member's fields. Unknown
/// placeholders pass through untouched.
pub fn render(template: &str, member: &BootstrapRow) -> String {
    let date = |ts: Option<chrono::DateTime<chrono::Utc>>| {
        ts.map(|t| t.date_naive().to_string()).unwrap_or_default()
    };

    template
        .replace("{MemberId}", &member.member_id)
        .replace("{Email}", &member.email)
        .replace("{FirstName}", &member.first_name)
        .replace("{LastName}", &member.last_name)
        .replace("{JoinedOn}", &date(member.joined_on))
        .replace("{ExpiresOn}", &date(member.expires_on))
}
