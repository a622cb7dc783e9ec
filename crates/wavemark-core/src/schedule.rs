//! Deferred task queue
//!
//! Plugins sometimes need to let layout settle before measuring geometry
//! (one tick for attach decisions, a short delay for label stacking). The
//! queue keeps a virtual millisecond clock driven by [`TaskQueue::advance`];
//! tasks are plain values, so a plugin decides at drain time whether the
//! entity a task refers to is still alive.

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TaskHandle,
    due_ms: u64,
    task: T,
}

/// Timer queue over a virtual clock
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    now_ms: u64,
    next_seq: u64,
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to become due after `delay_ms`
    ///
    /// A zero delay means "next tick": the task runs on the next `advance`,
    /// never synchronously.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_seq);
        self.next_seq += 1;
        self.entries.push(Scheduled {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            task,
        });
        handle
    }

    /// Cancel a pending task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel every pending task matching the predicate; returns how many
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.task));
        before - self.entries.len()
    }

    /// Move the clock forward and take every task now due
    ///
    /// Tasks come out ordered by due time, ties broken by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due_ms <= now);
        self.entries = pending;
        due.sort_by_key(|e| (e.due_ms, e.handle.0));
        due.into_iter().map(|e| e.task).collect()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_waits_for_tick() {
        let mut queue = TaskQueue::new();
        queue.schedule(0, "attach");
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.advance(0), vec!["attach"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_due_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(10, "overlap");
        queue.schedule(0, "attach-a");
        queue.schedule(0, "attach-b");

        assert_eq!(queue.advance(5), vec!["attach-a", "attach-b"]);
        assert!(queue.advance(4).is_empty());
        assert_eq!(queue.advance(1), vec!["overlap"]);
        assert_eq!(queue.now_ms(), 10);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TaskQueue::new();
        let a = queue.schedule(0, 1u32);
        queue.schedule(0, 2u32);
        queue.schedule(0, 2u32);

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert_eq!(queue.cancel_where(|&t| t == 2), 2);
        assert!(queue.advance(100).is_empty());
    }
}
