//! Tells the local time and/or date

use chrono::{Datelike, Local, NaiveDateTime};

use crate::command::dispatcher::{Handler, HandlerCall, HandlerError, SideChannel};

/// Answers with the current time, date, or both, depending on which of the
/// words `time` / `date` the prompt contains.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    now: fn() -> NaiveDateTime,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            now: || Local::now().naive_local(),
        }
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock reading from a fixed source, for tests
    pub fn with_source(now: fn() -> NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Handler for Clock {
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        Ok(describe((self.now)(), call.mentions("time"), call.mentions("date")))
    }
}

/// Printed and spoken forms of a clock reading
pub fn describe(now: NaiveDateTime, time: bool, date: bool) -> SideChannel {
    // "3:05 PM" reads as "3 05 PM"
    let clock = now.format("%-I:%M %p").to_string();
    let spoken_clock = clock.replace(':', " ");
    let day = format!(
        "the {}{} of {}",
        now.day(),
        ordinal_suffix(now.day()),
        now.format("%B %Y")
    );

    match (time, date) {
        (true, true) => SideChannel::new(
            format!("\nToday's date and time is {day}, {clock}"),
            format!("\nToday's date and time is {day}, {spoken_clock}"),
        ),
        (true, false) => SideChannel::new(
            format!("\nThe time is {clock}"),
            format!("\nThe time is {spoken_clock}"),
        ),
        (false, true) => SideChannel::both(format!("\nToday's date is {day}")),
        (false, false) => SideChannel::default(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
