use std::cmp::Ordering;

/// Sort direction, a sign multiplier over raw comparison results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    /// Multiplies `ord` by the direction sign.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}
