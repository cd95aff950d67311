//! Page planning for the assignee list of a task letter.
//!
//! # Responsibility
//! - Split people across the first printed page and the continuation page.
//! - Decide which page carries the closing paragraph and signature block.
//!
//! # Invariants
//! - Capacities are layout constants: 3 for list layout, 10 for table layout.
//! - `first_page_people ++ second_page_people == people` in original order.
//! - The continuation page never repeats the letterhead.
//! - Planning is total; an empty slice plans a single empty page.

use crate::model::person::Person;
use serde::{Deserialize, Serialize};

/// People that fit on one page in list layout.
pub const LIST_CAPACITY: usize = 3;
/// People that fit on one page in table layout.
pub const TABLE_CAPACITY: usize = 10;

/// Visual layout of the assignee block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeopleLayout {
    /// Stacked name/NIP/rank/position rows per person.
    List,
    /// Bordered table with one row per person.
    Table,
}

impl PeopleLayout {
    pub fn from_table_flag(use_table_format: bool) -> Self {
        if use_table_format {
            Self::Table
        } else {
            Self::List
        }
    }

    pub fn capacity(self) -> usize {
        match self {
            Self::List => LIST_CAPACITY,
            Self::Table => TABLE_CAPACITY,
        }
    }
}

/// Headcount window in which a table is split early so the closing block
/// does not collide with the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceSplit {
    /// Smallest headcount that triggers the split; also the first-page size.
    pub min_people: usize,
    /// Largest headcount that triggers the split.
    pub max_people: usize,
}

impl ForceSplit {
    /// Early splits only happen inside the table capacity and never leave
    /// the first page empty.
    fn applies_to(&self, count: usize) -> bool {
        self.min_people >= 1
            && count <= TABLE_CAPACITY
            && self.min_people <= count
            && count <= self.max_people
    }
}

/// Pagination policy. Only the early-split window is configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationPolicy {
    #[serde(default)]
    pub force_split: Option<ForceSplit>,
}

impl PaginationPolicy {
    /// Policy that splits tables of `min..=max` people after `min` rows.
    pub fn with_force_split(min_people: usize, max_people: usize) -> Self {
        Self {
            force_split: Some(ForceSplit {
                min_people,
                max_people,
            }),
        }
    }
}

/// Which printed page a block lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSlot {
    First,
    Second,
}

/// Result of planning one letter's people across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePlan<'a> {
    pub layout: PeopleLayout,
    pub needs_pagination: bool,
    pub first_page_people: &'a [Person],
    pub second_page_people: &'a [Person],
    /// Page that carries the purpose field, closing paragraph and signature.
    pub closing_page: PageSlot,
}

impl PagePlan<'_> {
    /// Number of printed pages.
    pub fn page_count(&self) -> usize {
        match self.closing_page {
            PageSlot::First => 1,
            PageSlot::Second => 2,
        }
    }

    /// 1-based number of the first person on the continuation page.
    pub fn second_page_start_index(&self) -> usize {
        self.first_page_people.len() + 1
    }
}

/// Plans how `people` spill across printed pages.
pub fn plan_pages<'a>(
    people: &'a [Person],
    layout: PeopleLayout,
    policy: &PaginationPolicy,
) -> PagePlan<'a> {
    let count = people.len();

    let forced = match (layout, policy.force_split) {
        (PeopleLayout::Table, Some(window)) if window.applies_to(count) => {
            Some(window.min_people.min(TABLE_CAPACITY))
        }
        _ => None,
    };

    let split_at = match forced {
        Some(first_page_size) => Some(first_page_size),
        None if count > layout.capacity() => Some(layout.capacity()),
        None => None,
    };

    match split_at {
        Some(at) => {
            let at = at.min(count);
            PagePlan {
                layout,
                needs_pagination: true,
                first_page_people: &people[..at],
                second_page_people: &people[at..],
                closing_page: PageSlot::Second,
            }
        }
        None => PagePlan {
            layout,
            needs_pagination: false,
            first_page_people: people,
            second_page_people: &[],
            closing_page: PageSlot::First,
        },
    }
}

/// Same as [`plan_pages`] for callers holding an optional list.
pub fn plan_optional_pages<'a>(
    people: Option<&'a [Person]>,
    layout: PeopleLayout,
    policy: &PaginationPolicy,
) -> PagePlan<'a> {
    plan_pages(people.unwrap_or(&[]), layout, policy)
}
