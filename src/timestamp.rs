use std::sync::atomic::{AtomicU64, Ordering};
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const CLOCK_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute]:[second] [period case:upper]");

const DATE_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period case:upper]"
);

const NAIVE_ISO_FORMAT: &[FormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

static LAST_MESSAGE_ID: AtomicU64 = AtomicU64::new(0);

pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Shift into the local offset. When the offset can't be determined the time
/// stays in UTC, which is always the case in multi-threaded native processes
/// such as the desktop runtime.
fn to_local(datetime: OffsetDateTime) -> OffsetDateTime {
    match UtcOffset::current_local_offset() {
        Ok(offset) => datetime.to_offset(offset),
        Err(_) => datetime,
    }
}

/// Millisecond timestamp, bumped so ids never repeat within a process.
pub fn next_message_id() -> u64 {
    let now = (current_time().unix_timestamp_nanos() / 1_000_000).max(0) as u64;
    let mut last = LAST_MESSAGE_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_MESSAGE_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// Wall-clock time for a chat bubble, e.g. `3:04:05 PM`.
pub fn format_clock_time(datetime: OffsetDateTime) -> String {
    to_local(datetime)
        .format(CLOCK_FORMAT)
        .unwrap_or_default()
}

/// Display form of a history row's `created_at`.
///
/// Offset-less timestamps are shown as written. Anything unparseable is
/// returned verbatim.
pub fn format_history_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(datetime) = OffsetDateTime::parse(raw, &Rfc3339)
        && let Ok(formatted) = to_local(datetime).format(DATE_TIME_FORMAT)
    {
        return formatted;
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(raw, NAIVE_ISO_FORMAT)
        && let Ok(formatted) = datetime.format(DATE_TIME_FORMAT)
    {
        return formatted;
    }
    raw.to_string()
}
