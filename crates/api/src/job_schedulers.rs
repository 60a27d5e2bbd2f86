use crate::dispatch_event::Dispatcher;
use actix_web::rt::{spawn, task::JoinHandle};
use futures::future::join_all;
use med_reminder_domain::{evaluate, DueCheck, ReminderRecord};
use med_reminder_infra::ReminderContext;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, info_span, warn};
use tracing_futures::Instrument;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Counts describing what a single tick did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub evaluated: usize,
    pub due: usize,
    pub skipped: usize,
    pub dispatched: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Scans the roster once and dispatches a reminder for every record that is
/// due at the current local minute.
///
/// Due records are dispatched concurrently and each attempt records its own
/// `DispatchEvent` as soon as it completes.
pub async fn run_tick(ctx: &ReminderContext, dispatcher: &Dispatcher) -> TickReport {
    let now = ctx.sys.get_local_datetime();
    let records = ctx.repos.reminder_records.list_all().await;

    let mut report = TickReport {
        evaluated: records.len(),
        ..Default::default()
    };
    let mut due: Vec<ReminderRecord> = Vec::new();
    for record in records {
        match evaluate(&record, &now) {
            DueCheck::Due => due.push(record),
            DueCheck::Skipped(reason) => {
                report.skipped += 1;
                info!("Skipping reminder for id={}: {:?}", record.id, reason);
            }
            DueCheck::NotDue(reason) => {
                debug!("Reminder for id={} not due: {:?}", record.id, reason);
            }
        }
    }
    report.due = due.len();

    let outcomes = join_all(due.into_iter().map(|record| dispatcher.dispatch(record, ctx))).await;
    for outcome in outcomes {
        match outcome {
            Ok(outcome) => {
                report.dispatched += 1;
                if outcome.report.ok {
                    report.sent += 1;
                } else {
                    report.failed += 1;
                }
            }
            Err(e) => error!("Reminder dispatch was not attempted: {:?}", e),
        }
    }

    report
}

/// Clears the in progress flag when the tick holding it finishes
struct TickGuard(Arc<AtomicBool>);

impl TickGuard {
    fn try_acquire(in_progress: &Arc<AtomicBool>) -> Option<Self> {
        in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(in_progress.clone()))
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
struct TickRunner {
    ctx: ReminderContext,
    dispatcher: Dispatcher,
    in_progress: Arc<AtomicBool>,
}

impl TickRunner {
    /// Spawns a tick unless the previous one is still running
    fn trigger(&self) -> Option<JoinHandle<TickReport>> {
        let guard = match TickGuard::try_acquire(&self.in_progress) {
            Some(guard) => guard,
            None => {
                warn!("Previous reminder tick is still running, skipping this tick");
                return None;
            }
        };

        let runner = self.clone();
        let handle = spawn(
            async move {
                let _guard = guard;
                let report = run_tick(&runner.ctx, &runner.dispatcher).await;
                info!("Reminder tick finished: {:?}", report);
                report
            }
            .instrument(info_span!("Reminder tick")),
        );
        Some(handle)
    }
}

/// Owns the single periodic reminder task of the process
pub struct ReminderScheduler {
    runner: TickRunner,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(ctx: ReminderContext, dispatcher: Dispatcher) -> Self {
        Self {
            runner: TickRunner {
                ctx,
                dispatcher,
                in_progress: Arc::new(AtomicBool::new(false)),
            },
            task: Mutex::new(None),
        }
    }

    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Starts the periodic task. Returns `false` without doing anything if it
    /// is already running.
    pub fn start(&self) -> bool {
        let mut task = self.task();
        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                return false;
            }
        }

        let runner = self.runner.clone();
        *task = Some(spawn(async move {
            let now = runner.ctx.sys.get_timestamp_millis();
            let secs_to_next_run = get_start_delay(now as usize, 0);
            sleep(Duration::from_secs(secs_to_next_run as u64)).await;

            let mut ticks = interval(runner.ctx.config.tick_interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                runner.trigger();
            }
        }));
        info!(
            "Reminder scheduler started with tick interval: {:?}",
            self.runner.ctx.config.tick_interval
        );
        true
    }

    /// Stops the periodic task. A tick that already started is left to finish.
    pub fn stop(&self) {
        if let Some(handle) = self.task().take() {
            handle.abort();
            info!("Reminder scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}
