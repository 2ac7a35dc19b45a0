//! Reminder scheduling: pure date arithmetic that turns a transaction's
//! due date and lead time into a one-shot notification request.
//!
//! Nothing here talks to a platform or tracks pending notifications. The
//! caller decides what to do with the returned [ScheduleRequest].

use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    notification::ScheduleRequest,
    transaction::{Kind, ReminderLeadTime, Transaction},
};

/// The point in time a reminder with the given lead time should fire.
///
/// Lead times are whole calendar days: the trigger lands on an earlier
/// date with the due date's time of day, rather than a multiple of 24
/// hours before the due instant.
///
/// Returns `None` only when the due date is so close to the edge of the
/// representable calendar range that there is no earlier date.
pub fn compute_trigger_instant(
    due_date: OffsetDateTime,
    lead_time: ReminderLeadTime,
) -> Option<OffsetDateTime> {
    let days_before = match lead_time {
        ReminderLeadTime::SameDay => return Some(due_date),
        ReminderLeadTime::OneDayBefore => 1,
        ReminderLeadTime::ThreeDaysBefore => 3,
    };

    let trigger_date = due_date.date().checked_sub(Duration::days(days_before))?;

    Some(due_date.replace_date(trigger_date))
}

/// Build the notification request for `record`, if one should be issued.
///
/// Returns `None` when the record has reminders switched off, or when the
/// computed trigger instant is not strictly after `now`. A reminder whose
/// moment has already passed is dropped: it is never fired immediately
/// and never backdated.
pub fn schedule(record: &Transaction, now: OffsetDateTime) -> Option<ScheduleRequest> {
    if !record.reminder_enabled {
        return None;
    }

    let trigger_at = compute_trigger_instant(record.due_date, record.reminder_lead_time)?;

    if trigger_at <= now {
        return None;
    }

    Some(ScheduleRequest {
        trigger_at,
        title: title(record.kind),
        body: body(record),
        correlation_id: record.id.clone(),
    })
}

fn title(kind: Kind) -> String {
    match kind {
        Kind::Loan => "Loan reminder".to_string(),
        Kind::Borrow => "Borrow reminder".to_string(),
    }
}

const DUE_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

fn body(record: &Transaction) -> String {
    let due = record
        .due_date
        .format(DUE_DATE_FORMAT)
        .unwrap_or_else(|_| record.due_date.date().to_string());

    format!(
        "{} – {} – due {}",
        record.counterparty, record.amount_or_item, due
    )
}

#[cfg(test)]
mod trigger_tests {
    use time::macros::{datetime, offset};

    use crate::transaction::ReminderLeadTime;

    use super::compute_trigger_instant;

    #[test]
    fn same_day_leaves_the_instant_unchanged() {
        let due = datetime!(2025-03-15 09:00 UTC);

        let trigger = compute_trigger_instant(due, ReminderLeadTime::SameDay);

        assert_eq!(trigger, Some(due));
    }

    #[test]
    fn one_day_before_keeps_the_time_of_day() {
        let due = datetime!(2025-03-15 09:00 UTC);

        let trigger = compute_trigger_instant(due, ReminderLeadTime::OneDayBefore);

        assert_eq!(trigger, Some(datetime!(2025-03-14 09:00 UTC)));
    }

    #[test]
    fn three_days_before_crosses_a_month_boundary() {
        let due = datetime!(2025-03-01 09:00 UTC);

        let trigger = compute_trigger_instant(due, ReminderLeadTime::ThreeDaysBefore);

        assert_eq!(trigger, Some(datetime!(2025-02-26 09:00 UTC)));
    }

    #[test]
    fn the_due_date_offset_is_preserved() {
        let due = datetime!(2025-03-15 09:00 +02:00);

        let trigger = compute_trigger_instant(due, ReminderLeadTime::OneDayBefore).unwrap();

        assert_eq!(trigger, datetime!(2025-03-14 09:00 +02:00));
        assert_eq!(trigger.offset(), offset!(+2));
    }
}
