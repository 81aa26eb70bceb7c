//! `RequestQueue`: the pending-request backlog.
//!
//! Requests stay in the queue from intake until delivery, including while a
//! vehicle carries them; their `status` says which.  This keeps the
//! viewer's "pending" list complete and lets the dispatcher see claimed
//! requests at the head (which block allocation, see `df-dispatch`).

use df_core::RequestId;

use crate::{Request, RequestStatus};

/// Priority-ordered sequence of requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestQueue {
    inner: Vec<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request at the tail.  Intake never reorders.
    pub fn push(&mut self, request: Request) {
        self.inner.push(request);
    }

    /// Stable sort by descending priority.  Equal priorities keep their
    /// relative arrival order.
    pub fn sort_by_priority(&mut self) {
        self.inner.sort_by_key(|r| std::cmp::Reverse(r.priority.rank()));
    }

    /// `true` when no request is followed by one of strictly higher priority.
    pub fn is_sorted_by_priority(&self) -> bool {
        self.inner
            .windows(2)
            .all(|w| w[0].priority.rank() >= w[1].priority.rank())
    }

    pub fn head(&self) -> Option<&Request> {
        self.inner.first()
    }

    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.inner.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RequestId) -> Option<&mut Request> {
        self.inner.iter_mut().find(|r| r.id == id)
    }

    pub fn position(&self, id: RequestId) -> Option<usize> {
        self.inner.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.position(id).is_some()
    }

    /// Set the status of `id`.  Returns `false` if it is not queued.
    pub fn set_status(&mut self, id: RequestId, status: RequestStatus) -> bool {
        match self.get_mut(id) {
            Some(r) => {
                r.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove `id`, preserving the order of everything else.
    pub fn remove(&mut self, id: RequestId) -> Option<Request> {
        let idx = self.position(id)?;
        Some(self.inner.remove(idx))
    }

    /// Requests in queue order.
    pub fn as_slice(&self) -> &[Request] {
        &self.inner
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Request> {
        self.inner.iter()
    }

    /// Number of requests not yet claimed by a vehicle.
    pub fn waiting_count(&self) -> usize {
        self.inner
            .iter()
            .filter(|r| r.status == RequestStatus::Waiting)
            .count()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<'a> IntoIterator for &'a RequestQueue {
    type Item = &'a Request;
    type IntoIter = std::slice::Iter<'a, Request>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
