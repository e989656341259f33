use parking_lot::Mutex;

use leads_sdk::Lead;

use crate::domain::repo::LeadsRepository;

struct Inner {
    leads: Vec<Lead>,
    next_id: u64,
}

/// Insertion-ordered lead collection guarded by a single mutex.
pub struct InMemoryLeadStore {
    inner: Mutex<Inner>,
}

impl InMemoryLeadStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                leads: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadsRepository for InMemoryLeadStore {
    fn add(&self, lead: Lead) {
        let mut inner = self.inner.lock();
        // Keep the counter ahead of externally supplied numeric ids.
        if let Ok(n) = lead.id.parse::<u64>()
            && n >= inner.next_id
        {
            inner.next_id = n + 1;
        }
        inner.leads.push(lead);
    }

    fn get_by_id(&self, id: &str) -> Option<Lead> {
        self.inner.lock().leads.iter().find(|l| l.id == id).cloned()
    }

    fn find_index(&self, id: &str) -> Option<usize> {
        self.inner.lock().leads.iter().position(|l| l.id == id)
    }

    fn update(&self, index: usize, lead: Lead) {
        if let Some(slot) = self.inner.lock().leads.get_mut(index) {
            *slot = lead;
        } else {
            tracing::warn!(index, "Ignoring update past the end of the lead store");
        }
    }

    fn next_id(&self) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        id
    }

    fn all(&self) -> Vec<Lead> {
        self.inner.lock().leads.clone()
    }

    fn len(&self) -> usize {
        self.inner.lock().leads.len()
    }
}
