use std::cmp::Ordering;

use time::OffsetDateTime;

use crate::{Page, PageInfo, PageRequest, SortDir};

/// Sentinel accepted by [`StatusFilter::from_param`] that disables filtering.
pub const ALL_STATUSES: &str = "ALL";

/// Records that carry a textual status.
pub trait HasStatus {
    fn status(&self) -> &str;
}

/// Records that can be scanned by free-text search.
pub trait Searchable {
    type Field: Copy + 'static;

    /// Fields scanned by [`Query::search`], in order.
    const SEARCH_FIELDS: &'static [Self::Field];

    fn text(&self, field: Self::Field) -> Option<&str>;
}

/// Records that can be ordered by a single field.
pub trait Sortable {
    type SortField: Copy;

    fn sort_key(&self, field: Self::SortField) -> SortKey<'_>;
}

/// A comparable projection of one record field.
///
/// Text compares case-insensitively and instants compare chronologically.
/// Keys of different kinds order as `Missing < Text < Instant` so the
/// comparator is always total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    Missing,
    Text(&'a str),
    Instant(OffsetDateTime),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Text(_) => 1,
            SortKey::Instant(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// `None`, empty and `ALL` disable the filter; anything else must match exactly.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("" | ALL_STATUSES) => StatusFilter::All,
            Some(status) => StatusFilter::Only(status.to_owned()),
        }
    }

    #[must_use]
    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }

    #[must_use]
    pub fn as_param(&self) -> &str {
        match self {
            StatusFilter::All => ALL_STATUSES,
            StatusFilter::Only(status) => status,
        }
    }
}

/// Whether a single record would survive [`Query::search`] for `term`.
#[must_use]
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    term.trim().is_empty() || contains_lowercase(item, &term.to_lowercase(), T::SEARCH_FIELDS)
}

fn contains_lowercase<T: Searchable>(item: &T, needle: &str, fields: &[T::Field]) -> bool {
    fields.iter().any(|&field| {
        item.text(field)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

/// Owned, composable read pipeline.
///
/// Each stage consumes the query and returns the narrowed one, so the stages
/// can be chained in any order, though the canonical order is
/// filter -> search -> sort -> paginate.
#[derive(Debug, Clone)]
#[must_use]
pub struct Query<T> {
    items: Vec<T>,
}

impl<T> Query<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn filter_by_status(mut self, filter: &StatusFilter) -> Self
    where
        T: HasStatus,
    {
        if let StatusFilter::Only(_) = filter {
            self.items.retain(|item| filter.matches(item.status()));
        }
        self
    }

    /// Search across the record's default field set.
    pub fn search(self, term: &str) -> Self
    where
        T: Searchable,
    {
        self.search_in(term, T::SEARCH_FIELDS)
    }

    /// Case-insensitive substring search; a record matches when any of
    /// `fields` contains the lowercased term. Blank terms match everything.
    pub fn search_in(mut self, term: &str, fields: &[T::Field]) -> Self
    where
        T: Searchable,
    {
        if term.trim().is_empty() {
            return self;
        }
        let needle = term.to_lowercase();
        self.items.retain(|item| contains_lowercase(item, &needle, fields));
        self
    }

    /// Stable sort: records with equal keys keep their current relative order.
    pub fn sort(mut self, field: T::SortField, dir: SortDir) -> Self
    where
        T: Sortable,
    {
        self.items.sort_by(|a, b| {
            let ordering = a.sort_key(field).compare(&b.sort_key(field));
            match dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
        self
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Slice out one page. `total` is counted before slicing and a page past
    /// the end yields no items rather than an error.
    #[must_use]
    pub fn paginate(self, request: PageRequest) -> Page<T> {
        let total = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);

        let items = self.items.into_iter().skip(offset).take(limit).collect();
        Page::new(items, PageInfo::new(request, total))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: u32,
        title: String,
        owner: Option<String>,
        state: &'static str,
        opened: OffsetDateTime,
    }

    #[derive(Debug, Clone, Copy)]
    enum TicketField {
        Title,
        Owner,
    }

    #[derive(Debug, Clone, Copy)]
    enum TicketSort {
        Title,
        Owner,
        Opened,
    }

    impl HasStatus for Ticket {
        fn status(&self) -> &str {
            self.state
        }
    }

    impl Searchable for Ticket {
        type Field = TicketField;
        const SEARCH_FIELDS: &'static [TicketField] = &[TicketField::Title, TicketField::Owner];

        fn text(&self, field: TicketField) -> Option<&str> {
            match field {
                TicketField::Title => Some(&self.title),
                TicketField::Owner => self.owner.as_deref(),
            }
        }
    }

    impl Sortable for Ticket {
        type SortField = TicketSort;

        fn sort_key(&self, field: TicketSort) -> SortKey<'_> {
            match field {
                TicketSort::Title => SortKey::Text(&self.title),
                TicketSort::Owner => self.owner.as_deref().map_or(SortKey::Missing, SortKey::Text),
                TicketSort::Opened => SortKey::Instant(self.opened),
            }
        }
    }

    fn ticket(id: u32, title: &str, owner: Option<&str>, state: &'static str, opened: OffsetDateTime) -> Ticket {
        Ticket {
            id,
            title: title.to_owned(),
            owner: owner.map(str::to_owned),
            state,
            opened,
        }
    }

    fn fixtures() -> Vec<Ticket> {
        vec![
            ticket(1, "Broken build", Some("alice"), "OPEN", datetime!(2024-01-01 0:00 UTC)),
            ticket(2, "add docs", None, "CLOSED", datetime!(2024-03-01 0:00 UTC)),
            ticket(3, "Crash on start", Some("Bob"), "OPEN", datetime!(2024-02-01 0:00 UTC)),
            ticket(4, "bump deps", Some("alice"), "OPEN", datetime!(2023-12-01 0:00 UTC)),
        ]
    }

    fn ids(items: &[Ticket]) -> Vec<u32> {
        items.iter().map(|t| t.id).collect()
    }

    #[test]
    fn status_filter_all_is_identity() {
        let all = Query::new(fixtures()).filter_by_status(&StatusFilter::from_param(Some("ALL")));
        let none = Query::new(fixtures()).filter_by_status(&StatusFilter::from_param(None));
        let empty = Query::new(fixtures()).filter_by_status(&StatusFilter::from_param(Some("")));
        assert_eq!(all.count(), 4);
        assert_eq!(none.count(), 4);
        assert_eq!(empty.count(), 4);
    }

    #[test]
    fn status_filter_is_exact_and_case_sensitive() {
        let open = Query::new(fixtures()).filter_by_status(&StatusFilter::from_param(Some("OPEN")));
        assert_eq!(ids(&open.into_items()), vec![1, 3, 4]);

        let lower = Query::new(fixtures()).filter_by_status(&StatusFilter::from_param(Some("open")));
        assert_eq!(lower.count(), 0);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let hits = Query::new(fixtures()).search("ALICE").into_items();
        assert_eq!(ids(&hits), vec![1, 4]);

        let hits = Query::new(fixtures()).search("crash").into_items();
        assert_eq!(ids(&hits), vec![3]);
    }

    #[test]
    fn blank_search_matches_everything() {
        assert_eq!(Query::new(fixtures()).search("").count(), 4);
        assert_eq!(Query::new(fixtures()).search("   ").count(), 4);
    }

    #[test]
    fn search_skips_missing_values() {
        let hits = Query::new(fixtures()).search_in("docs", &[TicketField::Owner]).into_items();
        assert!(hits.is_empty());
    }

    #[test]
    fn matches_search_agrees_with_pipeline() {
        let items = fixtures();
        assert!(matches_search(&items[0], "BROKEN"));
        assert!(matches_search(&items[1], " "));
        assert!(!matches_search(&items[1], "alice"));
    }

    #[test]
    fn sort_text_ignores_case() {
        let sorted = Query::new(fixtures()).sort(TicketSort::Title, SortDir::Asc).into_items();
        assert_eq!(ids(&sorted), vec![2, 1, 4, 3]);
    }

    #[test]
    fn sort_instants_chronologically() {
        let sorted = Query::new(fixtures()).sort(TicketSort::Opened, SortDir::Desc).into_items();
        assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let sorted = Query::new(fixtures()).sort(TicketSort::Owner, SortDir::Asc).into_items();
        // missing owner first, then alice (1 before 4, insertion order), then Bob
        assert_eq!(ids(&sorted), vec![2, 1, 4, 3]);

        let sorted = Query::new(fixtures()).sort(TicketSort::Owner, SortDir::Desc).into_items();
        assert_eq!(ids(&sorted), vec![3, 1, 4, 2]);
    }

    #[test]
    fn paginate_counts_before_slicing() {
        let page = Query::new(fixtures())
            .filter_by_status(&StatusFilter::Only("OPEN".to_owned()))
            .paginate(PageRequest::new(2, 2).unwrap());
        assert_eq!(page.page_info.total, 3);
        assert_eq!(page.page_info.total_pages, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn paginate_past_end_is_empty() {
        let page = Query::new(fixtures()).paginate(PageRequest::new(5, 2).unwrap());
        assert!(page.is_empty());
        assert_eq!(page.page_info.total, 4);
        assert_eq!(page.page_info.total_pages, 2);
    }

    #[test]
    fn full_pipeline_respects_limit() {
        for limit in 1..=5 {
            for page_no in 1..=5 {
                let page = Query::new(fixtures())
                    .search("a")
                    .sort(TicketSort::Opened, SortDir::Asc)
                    .paginate(PageRequest::new(page_no, limit).unwrap());
                assert!(page.items.len() as u64 <= limit);
                if page.page_info.total_pages > 0 && page_no > page.page_info.total_pages {
                    assert!(page.is_empty());
                }
            }
        }
    }
}
