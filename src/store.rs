use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::models::Submission;
use crate::submission::fields::ContactForm;

/// Process-local, newest-first collection of contact submissions.
///
/// Every operation takes the lock for a single short critical section and
/// never holds it across an `.await`. Nothing survives a restart.
#[derive(Default)]
pub struct MessageStore {
    messages: RwLock<VecDeque<Submission>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the form with an id and timestamp and store it at the front.
    ///
    /// Stamping happens under the write lock, so list order always matches
    /// timestamp order.
    pub fn insert(&self, form: ContactForm) -> Submission {
        let mut messages = self.write();
        let submission = Submission::new(form);
        messages.push_front(submission.clone());
        submission
    }

    /// Snapshot of every stored submission, newest first.
    pub fn list(&self) -> Vec<Submission> {
        self.read().iter().cloned().collect()
    }

    /// Remove the submission with the given id, returning it if it existed.
    pub fn remove(&self, id: Uuid) -> Option<Submission> {
        let mut messages = self.write();
        let index = messages.iter().position(|s| s.id == id)?;
        messages.remove(index)
    }

    /// Empty the collection. Returns how many submissions were dropped.
    pub fn clear(&self) -> usize {
        let mut messages = self.write();
        let count = messages.len();
        messages.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Submission>> {
        self.messages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Submission>> {
        self.messages.write().unwrap_or_else(PoisonError::into_inner)
    }
}
