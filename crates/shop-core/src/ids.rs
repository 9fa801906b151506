//! Strongly typed actor identifiers.
//!
//! Assistants and customers are numbered from zero within their own
//! population.  [`ActorId`] tags an event with whoever produced it.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $label, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an assistant in the store's assistant population.
    pub struct AssistantId(u32) => "assistant";
}

typed_id! {
    /// Index of a customer in the store's customer population.
    pub struct CustomerId(u32) => "customer";
}

/// Who produced an event (and whose RNG stream is being seeded).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActorId {
    /// The store itself: its clock driver and delivery intake.
    Store,
    Assistant(AssistantId),
    Customer(CustomerId),
}

impl ActorId {
    /// A dense, collision-free stream number used for RNG seeding.
    ///
    /// `Store` is 0; assistants take the odd numbers and customers the even
    /// ones, so growing either population never shifts the other's seeds.
    pub fn stream(self) -> u64 {
        match self {
            ActorId::Store        => 0,
            ActorId::Assistant(a) => 2 * a.0 as u64 + 1,
            ActorId::Customer(c)  => 2 * c.0 as u64 + 2,
        }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Store        => f.write_str("store"),
            ActorId::Assistant(a) => write!(f, "{a}"),
            ActorId::Customer(c)  => write!(f, "{c}"),
        }
    }
}

impl From<AssistantId> for ActorId {
    fn from(id: AssistantId) -> Self {
        ActorId::Assistant(id)
    }
}

impl From<CustomerId> for ActorId {
    fn from(id: CustomerId) -> Self {
        ActorId::Customer(id)
    }
}
