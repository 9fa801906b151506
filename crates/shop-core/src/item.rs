//! The unit of stock.

use crate::Category;

/// An item in the store.
///
/// Items carry a category and nothing else; two items of the same category
/// are interchangeable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Item {
    category: Category,
}

impl Item {
    #[inline]
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    #[inline]
    pub fn category(self) -> Category {
        self.category
    }
}
