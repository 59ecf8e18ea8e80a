//! Frame scheduler: drives fixed-duration tasks from host frame timestamps.
//!
//! A task starts at the timestamp of the first frame it sees, the same way
//! a `requestAnimationFrame` loop captures its start time. Every frame calls
//! `on_progress(progress, out)` with progress in [0, 1]; the frame that
//! reaches 1 also calls `on_complete(out)` and retires the task. Tasks cannot
//! be cancelled.

use std::fmt;

use crate::easing::progress;
use crate::ids::{IdAllocator, TaskId};
use crate::outputs::Outputs;

pub type ProgressFn = Box<dyn FnMut(f64, &mut Outputs)>;
pub type CompleteFn = Box<dyn FnOnce(&mut Outputs)>;

struct FrameTask {
    id: TaskId,
    duration_ms: f64,
    started_at: Option<f64>,
    on_progress: ProgressFn,
    on_complete: Option<CompleteFn>,
}

#[derive(Default)]
pub struct FrameScheduler {
    ids: IdAllocator,
    tasks: Vec<FrameTask>,
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("tasks", &self.tasks.iter().map(|t| t.id).collect::<Vec<_>>())
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task and ask the host for a frame.
    pub fn schedule(
        &mut self,
        duration_ms: f64,
        on_progress: ProgressFn,
        on_complete: CompleteFn,
        out: &mut Outputs,
    ) -> TaskId {
        let id = self.ids.alloc_task();
        self.tasks.push(FrameTask {
            id,
            duration_ms,
            started_at: None,
            on_progress,
            on_complete: Some(on_complete),
        });
        out.request_frame();
        id
    }

    /// Advance every live task to `timestamp_ms`, in scheduling order.
    /// Returns true (and requests another frame) while tasks remain.
    pub fn tick(&mut self, timestamp_ms: f64, out: &mut Outputs) -> bool {
        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            let start = *task.started_at.get_or_insert(timestamp_ms);
            let p = progress(timestamp_ms - start, task.duration_ms);
            (task.on_progress)(p, out);
            if p >= 1.0 {
                let mut done = self.tasks.remove(i);
                if let Some(complete) = done.on_complete.take() {
                    complete(out);
                }
            } else {
                i += 1;
            }
        }

        let live = !self.tasks.is_empty();
        if live {
            out.request_frame();
        }
        live
    }

    pub fn is_running(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
