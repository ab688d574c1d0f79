//! Same-thread queue for work that must run after the current event.

use std::collections::VecDeque;

/// FIFO of tasks posted from inside an event handler and run on the next
/// drain.
///
/// A drain runs only the tasks queued when it started; anything posted after
/// that waits for the following drain.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn post(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Removes the tasks queued so far and hands them to `run` in order.
    /// Returns the number of tasks run.
    pub fn drain_with<F>(&mut self, mut run: F) -> usize
    where
        F: FnMut(T),
    {
        let batch = std::mem::take(&mut self.tasks);
        let count = batch.len();
        for task in batch {
            run(task);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task: &T) -> bool
    where
        T: PartialEq,
    {
        self.tasks.contains(task)
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_post_order() {
        let mut queue = DeferredQueue::new();
        queue.post(1);
        queue.post(2);
        queue.post(3);
        let mut seen = Vec::new();
        assert_eq!(queue.drain_with(|task| seen.push(task)), 3);
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_without_running() {
        let mut queue = DeferredQueue::new();
        queue.post("refresh");
        assert!(queue.contains(&"refresh"));
        queue.clear();
        assert_eq!(queue.drain_with(|_| panic!("cleared task ran")), 0);
    }
}
