//! Admin view cache with optimistic lead updates.
//!
//! The dashboard keeps fetched list pages keyed by their [`LeadQuery`]. A
//! write goes through [`LeadViewCache::update_status`] or
//! [`LeadViewCache::update_lead`]:
//!
//! 1. every cached page that still shows the lead after the change is
//!    patched in place (status filter still matches, search still matches,
//!    the sort key is not affected);
//! 2. the write is sent through the [`LeadsClient`];
//! 3. on failure exactly those patches are reverted before the error is
//!    returned, on success every cached page is dropped so the next
//!    [`LeadViewCache::fetch`] reloads it.
//!
//! A second write for a lead whose previous write has not settled is
//! rejected with [`LeadsError::CommandInFlight`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use intake_query::{Page, matches_search};
use parking_lot::Mutex;

use crate::api::LeadsClient;
use crate::errors::LeadsError;
use crate::models::{Lead, LeadPatch, LeadQuery, LeadStatus, LeadSubmission};

/// One patched row: which view, which slot, and what was there before.
#[derive(Debug)]
struct Applied {
    query: LeadQuery,
    index: usize,
    previous: Lead,
}

/// Removes the lead id from the in-flight set when the command settles,
/// including when the future is dropped mid-flight.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    id: String,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(in_flight: &'a Mutex<HashSet<String>>, id: &str) -> Result<Self, LeadsError> {
        if !in_flight.lock().insert(id.to_owned()) {
            return Err(LeadsError::command_in_flight(id));
        }
        Ok(Self {
            in_flight,
            id: id.to_owned(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.id);
    }
}

pub struct LeadViewCache<C: ?Sized> {
    client: Arc<C>,
    views: Mutex<HashMap<LeadQuery, Page<Lead>>>,
    in_flight: Mutex<HashSet<String>>,
}

impl<C> LeadViewCache<C>
where
    C: LeadsClient + ?Sized,
{
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            views: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Serve the page from cache, loading it through the client on a miss.
    ///
    /// # Errors
    /// Propagates the client's error; nothing is cached in that case.
    pub async fn fetch(&self, query: &LeadQuery) -> Result<Page<Lead>, LeadsError> {
        if let Some(page) = self.cached(query) {
            return Ok(page);
        }
        let page = self.client.list_leads(query).await?;
        self.views.lock().insert(query.clone(), page.clone());
        Ok(page)
    }

    #[must_use]
    pub fn cached(&self, query: &LeadQuery) -> Option<Page<Lead>> {
        self.views.lock().get(query).cloned()
    }

    pub fn invalidate_all(&self) {
        let mut views = self.views.lock();
        tracing::debug!(views = views.len(), "Invalidating cached lead views");
        views.clear();
    }

    #[must_use]
    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.lock().contains(id)
    }

    /// Optimistically move a lead to `status`.
    ///
    /// # Errors
    /// [`LeadsError::CommandInFlight`] when a write for `id` is pending,
    /// otherwise whatever the client returned, after the optimistic change
    /// has been reverted.
    pub async fn update_status(&self, id: &str, status: LeadStatus) -> Result<Lead, LeadsError> {
        self.run(id, LeadPatch::status(status), LeadSubmission::status_only(status))
            .await
    }

    /// Optimistically apply the non-blank fields of `submission`.
    ///
    /// # Errors
    /// Same as [`LeadViewCache::update_status`].
    pub async fn update_lead(&self, id: &str, submission: LeadSubmission) -> Result<Lead, LeadsError> {
        self.run(id, LeadPatch::from_submission(&submission), submission)
            .await
    }

    async fn run(&self, id: &str, patch: LeadPatch, submission: LeadSubmission) -> Result<Lead, LeadsError> {
        let _guard = InFlightGuard::acquire(&self.in_flight, id)?;

        let applied = self.apply(id, &patch);
        tracing::debug!(lead_id = %id, patched_views = applied.len(), "Applied optimistic lead patch");

        match self.client.update_lead(id, submission).await {
            Ok(lead) => {
                self.invalidate_all();
                Ok(lead)
            }
            Err(err) => {
                tracing::warn!(lead_id = %id, error = %err, "Lead update failed, reverting optimistic patch");
                self.revert(applied);
                Err(err)
            }
        }
    }

    fn apply(&self, id: &str, patch: &LeadPatch) -> Vec<Applied> {
        let mut views = self.views.lock();
        let mut applied = Vec::new();

        for (query, page) in views.iter_mut() {
            let Some(index) = page.items.iter().position(|lead| lead.id == id) else {
                continue;
            };
            let mut patched = page.items[index].clone();
            patch.apply_to(&mut patched);

            if !still_visible(query, &patched, patch) {
                continue;
            }
            let previous = std::mem::replace(&mut page.items[index], patched);
            applied.push(Applied {
                query: query.clone(),
                index,
                previous,
            });
        }
        applied
    }

    fn revert(&self, applied: Vec<Applied>) {
        let mut views = self.views.lock();
        for Applied {
            query,
            index,
            previous,
        } in applied
        {
            let slot = views
                .get_mut(&query)
                .and_then(|page| page.items.get_mut(index))
                .filter(|lead| lead.id == previous.id);
            if let Some(slot) = slot {
                *slot = previous;
            }
        }
    }
}

/// A patched lead may stay in a cached page only if the page would still
/// contain it at the same position.
fn still_visible(query: &LeadQuery, patched: &Lead, patch: &LeadPatch) -> bool {
    query.status.matches(patched.status.as_str())
        && matches_search(patched, &query.search)
        && !patch.touches(query.sort_field)
}
