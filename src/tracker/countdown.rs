use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};

use super::outcome::{Effect, Outcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        deadline: DateTime<Utc>,
    },
    /// Remaining time is frozen, the wall clock doesn't affect it.
    Paused {
        remaining: Duration,
    },
    Complete,
}

/// Deadline based countdown. Remaining time is always recomputed from the deadline, so a late
/// or skipped [CountdownTimer::tick] never makes the timer drift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    state: TimerState,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Starts a fresh countdown. Minutes and seconds have to be below 60 and the total has to
    /// be positive. Does nothing while the timer is already running.
    pub fn start(
        &mut self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        now: DateTime<Utc>,
    ) -> TrackerResult<Outcome<Duration>> {
        if self.is_running() {
            return Ok(Outcome::unchanged(self.remaining(now)));
        }
        let duration = countdown_duration(hours, minutes, seconds)?;
        let deadline = now
            .checked_add_signed(duration)
            .ok_or_else(|| TrackerError::out_of_range("countdown", "duration is too long"))?;
        info!("Starting countdown for {duration}");
        self.state = TimerState::Running { deadline };
        Ok(Outcome::unchanged(duration))
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Outcome<Duration> {
        let TimerState::Running { .. } = self.state else {
            return Outcome::unchanged(self.remaining(now));
        };
        let remaining = self.remaining(now);
        debug!("Pausing countdown with {remaining} left");
        self.state = TimerState::Paused { remaining };
        Outcome::unchanged(remaining)
    }

    /// Continues a paused countdown from the frozen remaining time.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Outcome<Duration> {
        let TimerState::Paused { remaining } = self.state else {
            return Outcome::unchanged(self.remaining(now));
        };
        debug!("Resuming countdown with {remaining} left");
        self.state = TimerState::Running {
            deadline: now
                .checked_add_signed(remaining)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        Outcome::unchanged(remaining)
    }

    pub fn reset(&mut self) -> Outcome {
        self.state = TimerState::Idle;
        Outcome::unchanged(())
    }

    /// Recomputes remaining time. The tick that reaches zero moves the timer to
    /// [TimerState::Complete] and is the only one carrying [Effect::TimerFinished].
    pub fn tick(&mut self, now: DateTime<Utc>) -> Outcome<Duration> {
        let TimerState::Running { .. } = self.state else {
            return Outcome::unchanged(self.remaining(now));
        };
        let remaining = self.remaining(now);
        if remaining > Duration::zero() {
            return Outcome::unchanged(remaining);
        }
        info!("Countdown finished");
        self.state = TimerState::Complete;
        Outcome::unchanged(remaining)
            .with_effect(Effect::TimerFinished)
            .with_effect(Effect::Message("The countdown has finished!".into()))
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            TimerState::Running { deadline } => (deadline - now).max(Duration::zero()),
            TimerState::Paused { remaining } => remaining,
            TimerState::Idle | TimerState::Complete => Duration::zero(),
        }
    }
}

fn countdown_duration(hours: i64, minutes: i64, seconds: i64) -> TrackerResult<Duration> {
    if hours < 0 || minutes < 0 || seconds < 0 {
        return Err(TrackerError::out_of_range(
            "countdown",
            "negative values are not allowed",
        ));
    }
    if minutes >= 60 || seconds >= 60 {
        return Err(TrackerError::out_of_range(
            "countdown",
            "minutes and seconds must be below 60",
        ));
    }
    let total = hours
        .checked_mul(3600)
        .and_then(|v| v.checked_add(minutes * 60 + seconds))
        .and_then(Duration::try_seconds)
        .ok_or_else(|| TrackerError::out_of_range("countdown", "duration is too long"))?;
    if total <= Duration::zero() {
        return Err(TrackerError::out_of_range(
            "countdown",
            "time must be greater than 0",
        ));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::{error::TrackerError, tracker::outcome::Effect};

    use super::{CountdownTimer, TimerState};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn seconds(v: i64) -> Duration {
        Duration::seconds(v)
    }

    #[test]
    fn completes_exactly_once() {
        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 0, 5, now()).unwrap();
        assert!(timer.is_running());

        let tick = timer.tick(now() + seconds(3));
        assert_eq!(tick.value, seconds(2));
        assert!(tick.effects.is_empty());

        let tick = timer.tick(now() + seconds(5));
        assert_eq!(tick.effects.iter().filter(|v| **v == Effect::TimerFinished).count(), 1);
        assert_eq!(timer.state(), TimerState::Complete);

        for later in [6, 7, 100] {
            let tick = timer.tick(now() + seconds(later));
            assert!(tick.effects.is_empty());
            assert_eq!(tick.value, Duration::zero());
        }
    }

    #[test]
    fn late_tick_does_not_drift() {
        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 1, 0, now()).unwrap();
        assert_eq!(timer.tick(now() + seconds(45)).value, seconds(15));
        let finished = timer.tick(now() + seconds(90));
        assert_eq!(finished.value, Duration::zero());
        assert!(finished.effects.contains(&Effect::TimerFinished));
    }

    #[test]
    fn pause_freezes_remaining() {
        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 0, 10, now()).unwrap();
        let paused = timer.pause(now() + seconds(4));
        assert_eq!(paused.value, seconds(6));

        for later in [5, 60, 3600] {
            assert_eq!(timer.remaining(now() + seconds(later)), seconds(6));
            assert!(timer.tick(now() + seconds(later)).effects.is_empty());
        }

        let resume_at = now() + seconds(3600);
        let _ = timer.resume(resume_at);
        assert!(timer.is_running());
        assert_eq!(timer.remaining(resume_at + seconds(1)), seconds(5));
        assert!(timer
            .tick(resume_at + seconds(6))
            .effects
            .contains(&Effect::TimerFinished));
    }

    #[test]
    fn reset_from_any_state() {
        let mut timer = CountdownTimer::new();
        let _ = timer.start(1, 0, 0, now()).unwrap();
        let _ = timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining(now()), Duration::zero());

        let _ = timer.start(0, 0, 1, now()).unwrap();
        let _ = timer.pause(now());
        let _ = timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);

        let _ = timer.start(0, 0, 1, now()).unwrap();
        let _ = timer.tick(now() + seconds(2));
        let _ = timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn start_validation() {
        let mut timer = CountdownTimer::new();
        for (h, m, s) in [(-1, 0, 0), (0, 60, 0), (0, 0, 60), (0, 0, 0), (0, -5, 10)] {
            assert!(matches!(
                timer.start(h, m, s, now()),
                Err(TrackerError::OutOfRange { .. })
            ));
        }
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.start(2, 59, 59, now()).unwrap().value, seconds(2 * 3600 + 59 * 60 + 59));
    }

    #[test]
    fn deadline_past_calendar_end_is_rejected() {
        let mut timer = CountdownTimer::new();
        assert!(matches!(
            timer.start(1_000_000_000_000, 0, 0, now()),
            Err(TrackerError::OutOfRange { .. })
        ));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 0, 30, now()).unwrap();
        let again = timer.start(0, 0, 5, now() + seconds(10)).unwrap();
        assert_eq!(again.value, seconds(20));
        assert_eq!(timer.remaining(now() + seconds(10)), seconds(20));
    }

    #[test]
    fn pause_and_resume_outside_their_states_do_nothing() {
        let mut timer = CountdownTimer::new();
        let _ = timer.pause(now());
        assert_eq!(timer.state(), TimerState::Idle);
        let _ = timer.resume(now());
        assert_eq!(timer.state(), TimerState::Idle);
    }
}
