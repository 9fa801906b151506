//! Item categories and the per-category array used throughout the store.
//!
//! The category set is closed and ordered.  The declaration order is the
//! tie-break order for the assistant's selection heuristic: when two
//! categories are equally attractive, the one with the lower index wins.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;

/// One kind of item sold by the store.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Category {
    Electronics,
    Clothing,
    Furniture,
    Toys,
    SportingGoods,
    Books,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 6;

    /// Every category, in tie-break order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Electronics,
        Category::Clothing,
        Category::Furniture,
        Category::Toys,
        Category::SportingGoods,
        Category::Books,
    ];

    /// Position in [`Category::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// A uniformly random category.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Category {
        Self::ALL[rng.gen_range(0..Self::COUNT)]
    }

    /// Upper-case name, as used in logs and CSV output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Electronics   => "ELECTRONICS",
            Category::Clothing      => "CLOTHING",
            Category::Furniture     => "FURNITURE",
            Category::Toys          => "TOYS",
            Category::SportingGoods => "SPORTING_GOODS",
            Category::Books         => "BOOKS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── PerCategory ───────────────────────────────────────────────────────────────

/// A fixed-size array with one slot per [`Category`], indexed by category.
///
/// Replaces a `HashMap<Category, T>`: no hashing, no missing keys, and
/// iteration always follows tie-break order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PerCategory<T>([T; Category::COUNT]);

impl<T> PerCategory<T> {
    /// Build each slot from its category.
    pub fn from_fn<F: FnMut(Category) -> T>(mut f: F) -> Self {
        PerCategory(std::array::from_fn(|i| f(Category::ALL[i])))
    }

    /// `(category, &value)` pairs in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Apply `f` to every slot, producing a new array.
    pub fn map<U, F: FnMut(Category, &T) -> U>(&self, mut f: F) -> PerCategory<U> {
        PerCategory::from_fn(|c| f(c, &self.0[c.index()]))
    }
}

impl PerCategory<usize> {
    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl<T: Default> Default for PerCategory<T> {
    fn default() -> Self {
        PerCategory::from_fn(|_| T::default())
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;
    #[inline]
    fn index(&self, category: Category) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    #[inline]
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }
}

impl<T> From<[T; Category::COUNT]> for PerCategory<T> {
    fn from(values: [T; Category::COUNT]) -> Self {
        PerCategory(values)
    }
}
