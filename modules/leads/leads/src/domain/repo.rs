use leads_sdk::Lead;

/// Port for the domain layer: persistence operations the domain needs.
///
/// The lead collection keeps insertion order and never deletes. None of
/// these operations fail; a durable implementation would surface its
/// failures through the service instead.
pub trait LeadsRepository: Send + Sync {
    /// Append a lead at the end of the collection.
    fn add(&self, lead: Lead);

    fn get_by_id(&self, id: &str) -> Option<Lead>;

    /// Position of the lead in insertion order.
    fn find_index(&self, id: &str) -> Option<usize>;

    /// Replace the lead at `index`. An out-of-range index is a no-op.
    fn update(&self, index: usize, lead: Lead);

    /// Fresh id: unique, strictly increasing, never reused.
    fn next_id(&self) -> u64;

    /// Snapshot of every lead in insertion order.
    fn all(&self) -> Vec<Lead>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
