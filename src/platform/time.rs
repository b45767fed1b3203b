//! Tick scheduling
//!
//! The simulation never reads a clock. It owns a scheduler handle and tells
//! it when to start, restart, or stop the periodic tick. At most one schedule
//! is ever active.

/// Periodic tick source owned by the simulation loop
pub trait TickScheduler {
    /// Begin ticking every `interval_ms`, replacing any active schedule
    fn schedule(&mut self, interval_ms: u32);
    /// Stop ticking. Calling this with nothing scheduled is a no-op.
    fn cancel(&mut self);
    /// Interval of the active schedule, if any
    fn active_interval(&self) -> Option<u32>;
}

/// Scheduler for hosts that drive `tick()` themselves (native runner, tests).
///
/// It only records what the loop asked for; the host reads
/// `active_interval` to decide when and whether to tick.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: Option<u32>,
    /// Number of times a schedule was started
    pub starts: u32,
    /// Number of times an active schedule was cancelled
    pub cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, interval_ms: u32) {
        self.cancel();
        self.active = Some(interval_ms);
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancels += 1;
        }
    }

    fn active_interval(&self) -> Option<u32> {
        self.active
    }
}

/// `window.setInterval` backed scheduler for the browser
#[cfg(target_arch = "wasm32")]
pub struct IntervalScheduler {
    callback: wasm_bindgen::closure::Closure<dyn FnMut()>,
    handle: Option<(i32, u32)>,
}

#[cfg(target_arch = "wasm32")]
impl IntervalScheduler {
    pub fn new(callback: wasm_bindgen::closure::Closure<dyn FnMut()>) -> Self {
        Self {
            callback,
            handle: None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl TickScheduler for IntervalScheduler {
    fn schedule(&mut self, interval_ms: u32) {
        use wasm_bindgen::JsCast;

        self.cancel();
        let Some(window) = web_sys::window() else {
            log::error!("No window, cannot schedule ticks");
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        ) {
            Ok(handle) => self.handle = Some((handle, interval_ms)),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some((handle, _)) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    fn active_interval(&self) -> Option<u32> {
        self.handle.map(|(_, interval)| interval)
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_replaces_schedule() {
        let mut sched = ManualScheduler::new();
        assert_eq!(sched.active_interval(), None);

        sched.schedule(100);
        assert_eq!(sched.active_interval(), Some(100));
        assert_eq!((sched.starts, sched.cancels), (1, 0));

        // Rescheduling cancels the old one first
        sched.schedule(90);
        assert_eq!(sched.active_interval(), Some(90));
        assert_eq!((sched.starts, sched.cancels), (2, 1));

        sched.cancel();
        sched.cancel();
        assert_eq!(sched.active_interval(), None);
        assert_eq!(sched.cancels, 2);
    }
}
