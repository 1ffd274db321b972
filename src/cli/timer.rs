use std::{io::Write, time::Duration};

use ansi_term::Colour;
use anyhow::Result;
use clap::Parser;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    tracker::{
        countdown::CountdownTimer,
        outcome::{Effect, Outcome},
    },
    utils::{clock::Clock, time::format_clock},
};

use super::Context;

const TICK_FREQUENCY: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
pub struct TimerCommand {
    #[arg(short = 'H', long, default_value_t = 0, allow_negative_numbers = true)]
    hours: i64,
    #[arg(short = 'M', long, default_value_t = 0, allow_negative_numbers = true)]
    minutes: i64,
    #[arg(short = 'S', long, default_value_t = 0, allow_negative_numbers = true)]
    seconds: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunEnd {
    Finished,
    /// Interrupted by the user. The countdown was paused with this much time left.
    Interrupted { remaining: chrono::Duration },
}

/// Drives a [CountdownTimer] in the foreground, ticking with `tick_frequency` until the
/// countdown completes or `shutdown` is cancelled.
pub struct CountdownRunner<'a> {
    timer: CountdownTimer,
    clock: &'a dyn Clock,
    shutdown: CancellationToken,
    tick_frequency: Duration,
}

impl<'a> CountdownRunner<'a> {
    pub fn new(
        timer: CountdownTimer,
        clock: &'a dyn Clock,
        shutdown: CancellationToken,
        tick_frequency: Duration,
    ) -> Self {
        Self {
            timer,
            clock,
            shutdown,
            tick_frequency,
        }
    }

    pub async fn run(mut self, mut on_tick: impl FnMut(&Outcome<chrono::Duration>)) -> RunEnd {
        loop {
            let outcome = self.timer.tick(self.clock.time());
            on_tick(&outcome);
            if outcome.effects.contains(&Effect::TimerFinished) {
                return RunEnd::Finished;
            }

            select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    let remaining = self.timer.pause(self.clock.time()).value;
                    debug!("Countdown interrupted with {remaining} left");
                    return RunEnd::Interrupted { remaining };
                }
                _ = self.clock.sleep(self.tick_frequency) => ()
            }
        }
    }
}

/// Cancels `cancelation` on Ctrl-C.
pub async fn detect_interrupt(cancelation: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        cancelation.cancel();
    }
}

pub async fn process_timer_command(
    TimerCommand {
        hours,
        minutes,
        seconds,
    }: TimerCommand,
    context: &Context,
) -> Result<()> {
    let mut timer = CountdownTimer::new();
    let started = timer.start(hours, minutes, seconds, context.clock.time())?;
    info!("Countdown of {} started", format_clock(started.value));

    let notifications = context.settings().await?.notifications;
    let shutdown = CancellationToken::new();
    let interrupt = tokio::spawn(detect_interrupt(shutdown.clone()));

    let runner = CountdownRunner::new(timer, context.clock.as_ref(), shutdown, TICK_FREQUENCY);
    let end = runner
        .run(|outcome| {
            print!("\r{}", format_clock(outcome.value));
            let _ = std::io::stdout().flush();
        })
        .await;
    interrupt.abort();
    println!();

    match end {
        RunEnd::Finished => {
            let bell = if notifications { "\x07" } else { "" };
            println!("{bell}{}", Colour::Red.paint("The countdown has finished!"));
        }
        RunEnd::Interrupted { remaining } => {
            println!("Paused with {} left", format_clock(remaining));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicI64, Ordering},
        time::Duration,
    };

    use chrono::{DateTime, TimeZone, Utc};
    use tokio_util::sync::CancellationToken;

    use crate::{
        tracker::{countdown::CountdownTimer, outcome::Effect},
        utils::{clock::MockClock, logging::TEST_LOGGING},
    };

    use super::{CountdownRunner, RunEnd};

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    /// Clock that moves one second forward every time it is read.
    fn stepping_clock() -> MockClock {
        let mut clock = MockClock::new();
        let step = AtomicI64::new(0);
        clock.expect_time().returning(move || {
            start_time() + chrono::Duration::seconds(step.fetch_add(1, Ordering::SeqCst) + 1)
        });
        clock
    }

    #[tokio::test]
    async fn runs_until_finished() {
        *TEST_LOGGING;
        let mut clock = stepping_clock();
        clock.expect_sleep().times(2).returning(|_| ());

        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 0, 3, start_time()).unwrap();

        let mut ticks = vec![];
        let mut finished = 0;
        let end = CountdownRunner::new(timer, &clock, CancellationToken::new(), Duration::from_secs(1))
            .run(|outcome| {
                ticks.push(outcome.value.num_seconds());
                finished += outcome
                    .effects
                    .iter()
                    .filter(|v| **v == Effect::TimerFinished)
                    .count();
            })
            .await;

        assert_eq!(end, RunEnd::Finished);
        assert_eq!(ticks, [2, 1, 0]);
        assert_eq!(finished, 1);
    }

    #[tokio::test]
    async fn interruption_pauses() {
        let mut clock = stepping_clock();
        clock.expect_sleep().returning(|_| ());

        let mut timer = CountdownTimer::new();
        let _ = timer.start(0, 0, 10, start_time()).unwrap();

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let end = CountdownRunner::new(timer, &clock, shutdown, Duration::from_secs(1))
            .run(|_| ())
            .await;

        assert_eq!(
            end,
            RunEnd::Interrupted {
                remaining: chrono::Duration::seconds(8)
            }
        );
    }
}
