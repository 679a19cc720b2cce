use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::parser::ast::Meta;
use crate::runner::ds::error::{JErrorType, JsError};
use crate::runner::ds::object::JsObjectType;

/// Deadline shared between the evaluating thread and any stop handles.
///
/// Stored as nanoseconds since `epoch`; `0` means "stopped". A single word
/// with release/acquire ordering is all the cross-thread traffic there is.
pub struct ExecutionDeadline {
    epoch: Instant,
    deadline_nanos: AtomicU64,
}

const STOPPED: u64 = 0;

impl ExecutionDeadline {
    pub fn new() -> Self {
        ExecutionDeadline {
            epoch: Instant::now(),
            deadline_nanos: AtomicU64::new(u64::MAX),
        }
    }

    fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// Sets the deadline to now + `timeout`.
    pub fn reset(&self, timeout: Duration) {
        let timeout = u64::try_from(timeout.as_nanos()).unwrap_or(u64::MAX);
        let deadline = self.elapsed_nanos().saturating_add(timeout).max(1);
        self.deadline_nanos.store(deadline, Ordering::Release);
    }

    pub fn stop(&self) {
        self.deadline_nanos.store(STOPPED, Ordering::Release);
    }

    pub fn check(&self) -> Result<(), JErrorType> {
        let deadline = self.deadline_nanos.load(Ordering::Acquire);
        if deadline == STOPPED {
            return Err(JErrorType::TimeoutError("Interrupted".to_string()));
        }
        if self.elapsed_nanos() > deadline {
            return Err(JErrorType::TimeoutError("Execution timed-out".to_string()));
        }
        Ok(())
    }
}

impl Default for ExecutionDeadline {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle that can abort a running evaluation from any thread.
#[derive(Clone)]
pub struct StopHandle {
    deadline: Arc<ExecutionDeadline>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.deadline.stop();
    }
}

/// State threaded through every evaluation call: the global object, the
/// deadline and the call depth.
pub struct EvalContext {
    pub root: JsObjectType,
    deadline: Arc<ExecutionDeadline>,
    call_depth: usize,
    max_call_depth: usize,
}

impl EvalContext {
    pub fn new(root: JsObjectType, max_call_depth: usize) -> Self {
        EvalContext {
            root,
            deadline: Arc::new(ExecutionDeadline::new()),
            call_depth: 0,
            max_call_depth,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            deadline: self.deadline.clone(),
        }
    }

    pub fn reset_deadline(&mut self, timeout: Duration) {
        self.call_depth = 0;
        self.deadline.reset(timeout);
    }

    pub fn stop(&self) {
        self.deadline.stop();
    }

    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    pub fn check_timeout(&self, meta: &Meta) -> Result<(), JsError> {
        self.deadline.check().map_err(|e| {
            warn!(reason = e.message(), "evaluation aborted");
            e.at(meta)
        })
    }

    pub fn enter_call(&mut self, meta: &Meta) -> Result<(), JsError> {
        if self.call_depth >= self.max_call_depth {
            return Err(
                JErrorType::RangeError("Maximum call stack size exceeded".to_string()).at(meta),
            );
        }
        self.call_depth += 1;
        Ok(())
    }

    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fresh_deadline_does_not_fire() {
        let d = ExecutionDeadline::new();
        d.reset(Duration::from_secs(60));
        assert_eq!(d.check(), Ok(()));
    }

    #[test]
    fn expired_deadline_reports_time_out() {
        let d = ExecutionDeadline::new();
        d.reset(Duration::from_millis(0));
        thread::sleep(Duration::from_millis(2));
        assert_eq!(
            d.check(),
            Err(JErrorType::TimeoutError("Execution timed-out".to_string()))
        );
    }

    #[test]
    fn stop_from_another_thread_reports_interrupted() {
        let d = Arc::new(ExecutionDeadline::new());
        d.reset(Duration::from_secs(60));
        let handle = StopHandle { deadline: d.clone() };
        thread::spawn(move || handle.stop()).join().unwrap();
        assert_eq!(
            d.check(),
            Err(JErrorType::TimeoutError("Interrupted".to_string()))
        );
    }
}
