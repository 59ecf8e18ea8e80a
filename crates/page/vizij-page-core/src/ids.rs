//! Identifiers and simple allocators for host elements and frame tasks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle for a host element. Allocated by the [`crate::Document`]
/// implementation and stable for its lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Handle for a task owned by the [`crate::FrameScheduler`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// Monotonic allocator for ElementId and TaskId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_element: u32,
    next_task: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element = self.next_element.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_task(&mut self) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task = self.next_task.wrapping_add(1);
        id
    }
}
