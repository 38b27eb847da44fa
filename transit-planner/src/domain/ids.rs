//! Compact integer ids assigned when the timetable index is built.
//!
//! Every per-query table is a plain `Vec` indexed by one of these, so they are
//! only meaningful for the index that issued them.

use std::fmt;

/// Index of a stop within a timetable index.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopIdx;
///
/// let idx = StopIdx(3);
/// assert_eq!(idx.0, 3);
/// assert_eq!(usize::from(idx), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIdx(pub usize);

/// Index of a trip within a timetable index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripIdx(pub usize);

/// Position of a connection in the scan-ordered connection array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionIdx(pub usize);

/// Index of a footpath within a timetable index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FootpathIdx(pub usize);

macro_rules! index_conversions {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<usize> for $ty {
                fn from(value: usize) -> Self {
                    $ty(value)
                }
            }

            impl From<$ty> for usize {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }
        )*
    };
}

index_conversions!(StopIdx, TripIdx, ConnectionIdx, FootpathIdx);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_inner_value() {
        assert_eq!(StopIdx(7).to_string(), "7");
        assert_eq!(TripIdx(0).to_string(), "0");
        assert_eq!(ConnectionIdx(12).to_string(), "12");
        assert_eq!(FootpathIdx(4).to_string(), "4");
    }

    #[test]
    fn ordering_follows_inner_value() {
        assert!(TripIdx(1) < TripIdx(2));
        assert!(ConnectionIdx(10) > ConnectionIdx(9));
    }
}
