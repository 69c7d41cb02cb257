#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-empty list of externally supplied alternatives for one node field.
///
/// The tree builder fills these in from game data; the planner core never chooses among
/// alternatives beyond reading `primary` when a node is flattened into a step. Choosing a
/// different alternative (minimal tool, minimal fuel) is done on plain names by the
/// selection helpers, not on this type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variants<T> {
    values: Vec<T>,
}

impl<T> Variants<T> {
    /// Build from a list of alternatives; `None` when the list is empty.
    pub fn new(values: Vec<T>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    /// A field with exactly one alternative.
    pub fn single(value: T) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// The first alternative. This is the value used when a node is flattened.
    pub fn primary(&self) -> &T {
        &self.values[0]
    }

    pub fn alternatives(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Empty only when the value bypassed `new` (e.g. hand-written serde input).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_rejected() {
        assert!(Variants::<String>::new(vec![]).is_none());
    }

    #[test]
    fn primary_is_the_first_alternative() {
        let v = Variants::new(vec!["oak_log", "birch_log"]).unwrap();
        assert_eq!(*v.primary(), "oak_log");
        assert_eq!(v.len(), 2);
    }
}
