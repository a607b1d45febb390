//! Comparator selection for the roster ordering.

use std::{cell::RefCell, cmp::Ordering};

use feruca::Collator;

use crate::domain::{SortMode, StudentRecord};

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode collation with the CLDR root order: accents and case only break ties
/// between otherwise equal strings (`"apple" < "Apple" < "Émile" < "banana"`).
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

pub fn compare(mode: SortMode, a: &StudentRecord, b: &StudentRecord) -> Ordering {
    match mode {
        SortMode::Name => collate(&a.name, &b.name),
        SortMode::Age => a.age.cmp(&b.age),
        SortMode::Email => collate(&a.email, &b.email),
    }
}

/// Stable in-place sort; records that compare equal keep their relative order.
pub fn sort_records(records: &mut [StudentRecord], mode: SortMode) {
    records.sort_by(|a, b| compare(mode, a, b));
}

pub fn is_sorted(records: &[StudentRecord], mode: SortMode) -> bool {
    records
        .windows(2)
        .all(|pair| compare(mode, &pair[0], &pair[1]) != Ordering::Greater)
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
