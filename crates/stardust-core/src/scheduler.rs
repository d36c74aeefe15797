//! Scheduled-task queue with cancellation handles.
//!
//! Timer and interval callbacks live here instead of in ad-hoc closures:
//! controllers keep the handles they own and cancel them at teardown.

/// Handle to a scheduled task; cancelling an already-fired task is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[cfg(test)]
    pub(crate) fn test_only(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone)]
struct Task<C> {
    id: u64,
    due: f64,
    every: Option<f64>,
    until: Option<f64>,
    payload: C,
}

#[derive(Debug)]
pub struct Scheduler<C> {
    next_id: u64,
    tasks: Vec<Task<C>>,
}

impl<C: Clone> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// One-shot task firing at `due`.
    pub fn once(&mut self, due: f64, payload: C) -> TaskHandle {
        self.push(due, None, None, payload)
    }

    /// Repeating task firing every `every` seconds, starting at `first`.
    pub fn repeating(&mut self, first: f64, every: f64, payload: C) -> TaskHandle {
        self.push(first, Some(every), None, payload)
    }

    /// Repeating task that drops itself once its next due time passes `until`.
    pub fn repeating_until(&mut self, first: f64, every: f64, until: f64, payload: C) -> TaskHandle {
        self.push(first, Some(every), Some(until), payload)
    }

    fn push(&mut self, due: f64, every: Option<f64>, until: Option<f64>, payload: C) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due,
            every,
            until,
            payload,
        });
        TaskHandle(id)
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        self.tasks.len() != before
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fires every task due at `now`, earliest first, yielding `(due, payload)`
    /// so callers can apply each task at the time it was meant to run.
    /// Repeating tasks re-arm; one-shots and expired repeats drop out.
    pub fn drain_due(&mut self, now: f64) -> Vec<(f64, C)> {
        let mut fired = Vec::new();
        loop {
            let due_idx = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= now)
                .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due))
                .map(|(i, _)| i);
            let Some(idx) = due_idx else {
                break;
            };
            fired.push((self.tasks[idx].due, self.tasks[idx].payload.clone()));
            match self.tasks[idx].every {
                Some(every) => {
                    self.tasks[idx].due += every.max(1e-3);
                    let expired = self.tasks[idx]
                        .until
                        .is_some_and(|until| self.tasks[idx].due > until);
                    if expired {
                        self.tasks.remove(idx);
                    }
                }
                None => {
                    self.tasks.remove(idx);
                }
            }
        }
        fired
    }
}

impl<C: Clone> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_exactly_once() {
        let mut s = Scheduler::new();
        s.once(1.0, "a");
        assert!(s.drain_due(0.5).is_empty());
        assert_eq!(s.drain_due(1.0), vec![(1.0, "a")]);
        assert!(s.drain_due(2.0).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn due_tasks_fire_earliest_first() {
        let mut s = Scheduler::new();
        s.once(2.0, "late");
        s.once(1.0, "early");
        assert_eq!(s.drain_due(3.0), vec![(1.0, "early"), (2.0, "late")]);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut s = Scheduler::new();
        let handle = s.once(1.0, "a");
        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));
        assert!(s.drain_due(5.0).is_empty());
    }

    #[test]
    fn repeating_tasks_catch_up() {
        let mut s = Scheduler::new();
        s.repeating(0.1, 0.1, "tick");
        assert_eq!(s.drain_due(0.35).len(), 3);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn repeating_until_expires() {
        let mut s = Scheduler::new();
        s.repeating_until(0.1, 0.1, 0.3, "tick");
        let fired = s.drain_due(1.0);
        assert_eq!(fired.len(), 3);
        assert!(s.is_empty());
    }
}
