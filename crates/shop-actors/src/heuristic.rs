//! Which category an assistant pulls from the delivery box next.

use shop_core::{Category, PerCategory, PickReason};

/// Choose the next category to take from the delivery box.
///
/// Only categories with items in the box are eligible.  Among those, the one
/// with the most waiting customers wins; if nobody eligible is waiting, the
/// one with the largest backlog wins.  Ties go to the category that comes
/// first in [`Category::ALL`].
///
/// Returns `None` when the box holds nothing.
pub fn pick_category(
    box_counts: &PerCategory<usize>,
    waiting:    &PerCategory<usize>,
) -> Option<(Category, PickReason)> {
    let eligible = || box_counts.iter().filter(|(_, n)| **n > 0).map(|(c, _)| c);

    if let Some(category) = first_max(eligible().map(|c| (c, waiting[c]))) {
        return Some((category, PickReason::WaitingCustomers));
    }
    first_max(eligible().map(|c| (c, box_counts[c])))
        .map(|category| (category, PickReason::LargestBacklog))
}

/// The first category with the largest strictly positive score.
fn first_max(scores: impl Iterator<Item = (Category, usize)>) -> Option<Category> {
    let mut best: Option<(Category, usize)> = None;
    for (category, score) in scores {
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((category, score));
        }
    }
    best.map(|(category, _)| category)
}
