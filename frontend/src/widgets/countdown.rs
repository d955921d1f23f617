use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use log::{info, warn};
use web_sys::Element;

use crate::config;
use crate::dom::{self, UiElement};
use crate::error::TargetParseError;
use crate::schedule::{BrowserScheduler, Clock, RepeatingTask, Scheduler, SystemClock};

const TICK: &str = "tick";
const ENDED: &str = "countdown-ended";

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Time left until the target, split into display units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn from_millis(diff: i64) -> Self {
        Self {
            days: diff / MS_PER_DAY,
            hours: (diff % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    fn units(self) -> [i64; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
    }
}

/// Parses a `data-countdown` value into epoch milliseconds.
///
/// Accepts RFC 3339, a date-time without offset (read as local time) and a
/// bare date (read as UTC midnight).
pub fn parse_target(raw: &str) -> Result<i64, TargetParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TargetParseError::Empty);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Ok(moment.timestamp_millis());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|moment| moment.timestamp_millis())
                .ok_or_else(|| TargetParseError::NonexistentLocalTime(raw.to_string()));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .ok_or_else(|| TargetParseError::Unrecognized(raw.to_string()))
}

/// The numeric sub-fields of a countdown widget plus its optional message.
pub struct CountdownFields<E> {
    pub days: Option<E>,
    pub hours: Option<E>,
    pub minutes: Option<E>,
    pub seconds: Option<E>,
    pub message: Option<E>,
}

pub struct Countdown<E: UiElement, S: Scheduler, C: Clock> {
    this: Weak<RefCell<Self>>,
    root: E,
    fields: [Option<E>; 4],
    message: Option<E>,
    target: Option<i64>,
    last: [Option<i64>; 4],
    pulses: [Option<S::Handle>; 4],
    scheduler: S,
    clock: C,
    timer: RepeatingTask<S>,
    ended: bool,
}

impl<E: UiElement, S: Scheduler, C: Clock> Countdown<E, S, C> {
    /// A `None` target counts as already elapsed.
    pub fn new(
        root: E,
        fields: CountdownFields<E>,
        target: Option<i64>,
        scheduler: S,
        clock: C,
    ) -> Rc<RefCell<Self>> {
        let CountdownFields {
            days,
            hours,
            minutes,
            seconds,
            message,
        } = fields;
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                root,
                fields: [days, hours, minutes, seconds],
                message,
                target,
                last: [None; 4],
                pulses: Default::default(),
                timer: RepeatingTask::new(scheduler.clone(), config::COUNTDOWN_PERIOD_MS),
                scheduler,
                clock,
                ended: false,
            })
        })
    }

    pub fn start(&mut self) {
        self.tick();
        if self.ended {
            return;
        }
        let this = self.this.clone();
        self.timer.arm(move || {
            if let Some(countdown) = this.upgrade() {
                countdown.borrow_mut().tick();
            }
        });
    }

    pub fn tick(&mut self) {
        if self.ended {
            return;
        }
        let diff = match self.target {
            Some(target) => target - self.clock.now_ms(),
            None => 0,
        };
        if diff <= 0 {
            self.finish();
            return;
        }
        for (slot, value) in Remaining::from_millis(diff).units().into_iter().enumerate() {
            if self.last[slot] != Some(value) {
                self.write_unit(slot, value);
            }
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.ended = true;
        for slot in 0..self.fields.len() {
            self.write_unit(slot, 0);
        }
        self.root.toggle_class(ENDED, true);
        if let Some(message) = &self.message {
            message.set_text(config::COUNTDOWN_ENDED_MESSAGE);
        }
        info!("Countdown reached its target");
    }

    fn write_unit(&mut self, slot: usize, value: i64) {
        let Some(element) = self.fields[slot].clone() else {
            return;
        };
        element.set_text(&format!("{:02}", value));
        if self.last[slot] != Some(value) {
            element.toggle_class(TICK, true);
            let pulsing = element.clone();
            self.pulses[slot] = Some(self.scheduler.after(
                config::PULSE_MS,
                Box::new(move || pulsing.toggle_class(TICK, false)),
            ));
        }
        self.last[slot] = Some(value);
    }

    #[cfg(test)]
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

pub struct CountdownBinding {
    _countdown: Rc<RefCell<Countdown<Element, BrowserScheduler, SystemClock>>>,
}

/// Starts ticking one `[data-countdown]` element.
pub fn bind(root: Element) -> CountdownBinding {
    let raw = root.get_attribute("data-countdown").unwrap_or_default();
    let target = match parse_target(&raw) {
        Ok(target) => Some(target),
        Err(err) => {
            warn!("Countdown treated as finished: {}", err);
            None
        }
    };
    let fields = CountdownFields {
        days: dom::query_in(&root, "[data-days]"),
        hours: dom::query_in(&root, "[data-hours]"),
        minutes: dom::query_in(&root, "[data-minutes]"),
        seconds: dom::query_in(&root, "[data-seconds]"),
        message: dom::query_in(&root, "[data-countdown-msg]"),
    };
    let countdown = Countdown::new(root, fields, target, BrowserScheduler, SystemClock);
    countdown.borrow_mut().start();
    CountdownBinding {
        _countdown: countdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakeScheduler};
    use chrono::Utc;

    const NOW: i64 = 1_700_000_000_000;

    struct Widget {
        root: FakeElement,
        units: Vec<FakeElement>,
        message: FakeElement,
        countdown: Rc<RefCell<Countdown<FakeElement, FakeScheduler, FakeScheduler>>>,
    }

    fn widget(scheduler: &FakeScheduler, target: Option<i64>) -> Widget {
        let root = FakeElement::new();
        let units = FakeElement::many(4);
        let message = FakeElement::new();
        let fields = CountdownFields {
            days: Some(units[0].clone()),
            hours: Some(units[1].clone()),
            minutes: Some(units[2].clone()),
            seconds: Some(units[3].clone()),
            message: Some(message.clone()),
        };
        let countdown = Countdown::new(
            root.clone(),
            fields,
            target,
            scheduler.clone(),
            scheduler.clone(),
        );
        Widget {
            root,
            units,
            message,
            countdown,
        }
    }

    fn texts(units: &[FakeElement]) -> Vec<String> {
        units.iter().map(|u| u.text().unwrap_or_default()).collect()
    }

    fn writes(units: &[FakeElement]) -> Vec<usize> {
        units.iter().map(FakeElement::text_writes).collect()
    }

    #[test]
    fn decomposes_by_descending_units() {
        assert_eq!(
            Remaining::from_millis(90_061_000),
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(
            Remaining::from_millis(3 * MS_PER_DAY + 23 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59_999),
            Remaining {
                days: 3,
                hours: 23,
                minutes: 59,
                seconds: 59
            }
        );
    }

    #[test]
    fn first_tick_renders_immediately() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, Some(NOW + 90_061_000));
        w.countdown.borrow_mut().start();

        assert_eq!(texts(&w.units), vec!["01", "01", "01", "01"]);
        assert!(!w.root.has_class(ENDED));
        assert_eq!(scheduler.active_repeating(), 1);
    }

    #[test]
    fn only_changed_fields_are_written() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, Some(NOW + 90_061_000));
        w.countdown.borrow_mut().start();
        assert_eq!(writes(&w.units), vec![1, 1, 1, 1]);

        scheduler.advance(1_000);
        assert_eq!(texts(&w.units), vec!["01", "01", "01", "00"]);
        assert_eq!(writes(&w.units), vec![1, 1, 1, 2]);

        scheduler.advance(1_000);
        assert_eq!(texts(&w.units), vec!["01", "01", "00", "59"]);
        assert_eq!(writes(&w.units), vec![1, 1, 2, 3]);
    }

    #[test]
    fn updated_field_pulses_briefly() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, Some(NOW + 90_061_000));
        w.countdown.borrow_mut().start();
        assert!(w.units[3].has_class(TICK));

        scheduler.advance(299);
        assert!(w.units[3].has_class(TICK));
        scheduler.advance(1);
        assert!(w.units.iter().all(|u| !u.has_class(TICK)));
    }

    #[test]
    fn past_target_is_terminal_at_once() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, Some(NOW - 5_000));
        w.countdown.borrow_mut().start();

        assert!(w.countdown.borrow().is_ended());
        assert_eq!(texts(&w.units), vec!["00", "00", "00", "00"]);
        assert!(w.root.has_class(ENDED));
        assert_eq!(w.message.text().as_deref(), Some(config::COUNTDOWN_ENDED_MESSAGE));
        assert_eq!(scheduler.active_repeating(), 0);

        scheduler.advance(10_000);
        w.countdown.borrow_mut().tick();
        assert_eq!(writes(&w.units), vec![1, 1, 1, 1]);
    }

    #[test]
    fn missing_target_counts_as_elapsed() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, None);
        w.countdown.borrow_mut().start();
        assert!(w.countdown.borrow().is_ended());
        assert!(w.root.has_class(ENDED));
    }

    #[test]
    fn running_out_cancels_the_timer() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let w = widget(&scheduler, Some(NOW + 2_500));
        w.countdown.borrow_mut().start();
        assert_eq!(texts(&w.units), vec!["00", "00", "00", "02"]);

        scheduler.advance(2_000);
        assert_eq!(texts(&w.units), vec!["00", "00", "00", "00"]);
        assert!(!w.countdown.borrow().is_ended());

        scheduler.advance(1_000);
        assert!(w.countdown.borrow().is_ended());
        assert_eq!(scheduler.active_repeating(), 0);
        let settled = writes(&w.units);

        scheduler.advance(5_000);
        assert_eq!(writes(&w.units), settled);
    }

    #[test]
    fn absent_sub_fields_are_skipped() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let root = FakeElement::new();
        let seconds = FakeElement::new();
        let fields = CountdownFields {
            days: None,
            hours: None,
            minutes: None,
            seconds: Some(seconds.clone()),
            message: None,
        };
        let countdown = Countdown::new(
            root,
            fields,
            Some(NOW + 42_000),
            scheduler.clone(),
            scheduler.clone(),
        );
        countdown.borrow_mut().start();
        assert_eq!(seconds.text().as_deref(), Some("42"));
    }

    #[test]
    fn instances_do_not_share_state() {
        let scheduler = FakeScheduler::starting_at(NOW);
        let short = widget(&scheduler, Some(NOW + 1_500));
        let long = widget(&scheduler, Some(NOW + 90_061_000));
        short.countdown.borrow_mut().start();
        long.countdown.borrow_mut().start();

        scheduler.advance(2_000);
        assert!(short.countdown.borrow().is_ended());
        assert!(!long.countdown.borrow().is_ended());
        assert_eq!(scheduler.active_repeating(), 1);
        assert_eq!(texts(&long.units), vec!["01", "01", "00", "59"]);
    }

    #[test]
    fn parses_supported_target_formats() {
        assert_eq!(
            parse_target("2025-03-15T17:00:00Z"),
            Ok(Utc.with_ymd_and_hms(2025, 3, 15, 17, 0, 0).unwrap().timestamp_millis())
        );
        assert_eq!(
            parse_target("2025-03-15T17:00:00+03:00"),
            Ok(Utc.with_ymd_and_hms(2025, 3, 15, 14, 0, 0).unwrap().timestamp_millis())
        );
        assert_eq!(
            parse_target("2025-03-15"),
            Ok(Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap().timestamp_millis())
        );
        let local = Local
            .with_ymd_and_hms(2025, 3, 15, 17, 0, 0)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(parse_target("2025-03-15T17:00"), Ok(local));
        assert_eq!(parse_target(" 2025-03-15 17:00:00 "), Ok(local));
    }

    #[test]
    fn rejects_garbage_targets() {
        assert_eq!(parse_target(""), Err(TargetParseError::Empty));
        assert_eq!(
            parse_target("next wednesday"),
            Err(TargetParseError::Unrecognized("next wednesday".to_string()))
        );
    }
}
