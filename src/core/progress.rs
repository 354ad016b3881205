//! Cosmetic progress for the loading modal.
//!
//! The bar is driven by a timer, not by the backend: it creeps forward in random
//! steps and stops at the cap until the real request finishes. Finishing always
//! wins over the timer.

use crate::domain::ports::ReportView;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const PHASES: [&str; 5] = [
    "Validating domain...",
    "Collecting WHOIS data...",
    "Extracting information...",
    "Analyzing with AI...",
    "Generating report...",
];

const PHASE_WIDTH: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSettings {
    pub tick: Duration,
    pub max_increment: f64,
    pub cap: f64,
    pub reset_delay: Duration,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(800),
            max_increment: 20.0,
            cap: 90.0,
            reset_delay: Duration::from_millis(500),
        }
    }
}

/// One update of the progress modal. `label` is `None` when the text should
/// stay as it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressFrame {
    pub percent: f64,
    pub label: Option<&'static str>,
}

/// Adds `increment` to `progress`, never going past `cap`.
pub fn advance(progress: f64, increment: f64, cap: f64) -> f64 {
    (progress + increment.max(0.0)).min(cap)
}

/// Phase label for a given percentage, `None` once past the last phase.
pub fn phase_label(percent: f64) -> Option<&'static str> {
    let index = (percent / PHASE_WIDTH).floor();
    if index < 0.0 {
        return PHASES.first().copied();
    }
    PHASES.get(index as usize).copied()
}

pub struct ProgressSimulator {
    settings: ProgressSettings,
}

const MIN_TICK: Duration = Duration::from_millis(1);

impl ProgressSimulator {
    /// Out-of-range settings are clamped: a zero tick would panic the
    /// interval, and a negative or NaN increment would panic the sampler.
    pub fn new(settings: ProgressSettings) -> Self {
        let max_increment = if settings.max_increment.is_finite() {
            settings.max_increment.max(0.0)
        } else {
            0.0
        };
        let cap = if settings.cap.is_finite() {
            settings.cap.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            settings: ProgressSettings {
                tick: settings.tick.max(MIN_TICK),
                max_increment,
                cap,
                reset_delay: settings.reset_delay,
            },
        }
    }

    pub fn settings(&self) -> ProgressSettings {
        self.settings
    }

    /// Shows the modal at 0% and starts ticking on a background task.
    pub fn start<V: ReportView + 'static>(&self, view: Arc<V>) -> ProgressHandle<V> {
        let stopped = Arc::new(Mutex::new(false));
        let settings = self.settings;

        view.show_progress(ProgressFrame {
            percent: 0.0,
            label: phase_label(0.0),
        });

        let task = {
            let view = Arc::clone(&view);
            let stopped = Arc::clone(&stopped);
            tokio::spawn(async move {
                let mut progress = 0.0;
                let mut ticker = tokio::time::interval(settings.tick);
                // interval 的第一次 tick 會立即完成
                ticker.tick().await;

                loop {
                    ticker.tick().await;
                    let increment = rand::rng().random_range(0.0..=settings.max_increment);
                    progress = advance(progress, increment, settings.cap);

                    // 與 finish 共用同一把鎖，停止後不會再送出任何畫面更新
                    let Ok(guard) = stopped.lock() else { break };
                    if *guard {
                        break;
                    }
                    view.show_progress(ProgressFrame {
                        percent: progress,
                        label: phase_label(progress),
                    });
                }
            })
        };

        ProgressHandle {
            view,
            stopped,
            task,
            reset_delay: settings.reset_delay,
            finished: false,
        }
    }
}

/// A running progress simulation. Dropping it without calling [`finish`]
/// stops the ticker and hides the modal right away.
///
/// [`finish`]: ProgressHandle::finish
pub struct ProgressHandle<V: ReportView + 'static> {
    view: Arc<V>,
    stopped: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
    reset_delay: Duration,
    finished: bool,
}

impl<V: ReportView + 'static> ProgressHandle<V> {
    fn stop(&self) {
        match self.stopped.lock() {
            Ok(mut stopped) => *stopped = true,
            Err(poisoned) => *poisoned.into_inner() = true,
        }
        self.task.abort();
    }

    /// Stops the ticker, snaps the bar to 100% and hides the modal after the
    /// reset delay. The returned handle resolves once the modal is hidden.
    pub fn finish(mut self) -> JoinHandle<()> {
        self.stop();
        self.finished = true;

        self.view.show_progress(ProgressFrame {
            percent: 100.0,
            label: None,
        });

        let view = Arc::clone(&self.view);
        let reset_delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(reset_delay).await;
            view.hide_progress();
        })
    }
}

impl<V: ReportView + 'static> Drop for ProgressHandle<V> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        // 請求被放棄：不顯示 100%，直接收起
        self.stop();
        self.view.hide_progress();
    }
}
