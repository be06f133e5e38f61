#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Strand of a node or a hit. FASTG marks the reverse complement of
/// a node with a trailing `'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Orientation {
    Forward,
    Backward,
}

impl Orientation {
    /// Parse the reversal marker that may trail a FASTG name; an
    /// empty marker is Forward, `'` is Backward
    #[inline]
    pub fn from_fastg_marker<T: AsRef<[u8]>>(bs: T) -> Option<Self> {
        match bs.as_ref() {
            b"" => Some(Orientation::Forward),
            b"'" => Some(Orientation::Backward),
            _ => None,
        }
    }

    #[inline]
    pub fn write_fastg_marker(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Forward => Ok(()),
            Self::Backward => write!(f, "'"),
        }
    }

    #[inline]
    pub fn write_plus_minus(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let sym = match self {
            Self::Forward => '+',
            Self::Backward => '-',
        };
        write!(f, "{}", sym)
    }

    /// The strand a hit lies on, given its reported subject
    /// coordinates; only strictly increasing coordinates are forward
    #[inline]
    pub fn from_subject_span(start: i64, end: i64) -> Self {
        if end > start {
            Orientation::Forward
        } else {
            Orientation::Backward
        }
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        !bool::from(*self)
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Default orientation is forward
impl Default for Orientation {
    #[inline]
    fn default() -> Orientation {
        Orientation::Forward
    }
}

/// Forward is true, backward is false
impl From<Orientation> for bool {
    #[inline]
    fn from(o: Orientation) -> bool {
        match o {
            Orientation::Forward => true,
            Orientation::Backward => false,
        }
    }
}

/// Display uses the FASTG marker if the `{}` format argument is used,
/// mapping `Forward` to "", `Backward` to "'". If the alternate
/// format flag is used, i.e. `{:#}`, `Forward` will be mapped to "+",
/// `Backward` to "-".
///
/// # Examples
///
/// ```
/// use fastg_chain::graph::Orientation as O;
///
/// assert_eq!(&format!("{}", O::Forward), "");
/// assert_eq!(&format!("{}", O::Backward), "'");
/// assert_eq!(&format!("{:#}", O::Forward), "+");
/// assert_eq!(&format!("{:#}", O::Backward), "-");
/// ```
impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            self.write_plus_minus(f)
        } else {
            self.write_fastg_marker(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastg_marker() {
        assert_eq!(
            Orientation::from_fastg_marker(""),
            Some(Orientation::Forward)
        );
        assert_eq!(
            Orientation::from_fastg_marker("'"),
            Some(Orientation::Backward)
        );
        assert_eq!(Orientation::from_fastg_marker("-"), None);
    }

    #[test]
    fn subject_span_direction() {
        assert_eq!(
            Orientation::from_subject_span(10, 20),
            Orientation::Forward
        );
        assert_eq!(
            Orientation::from_subject_span(20, 10),
            Orientation::Backward
        );
        // a single-base span can't be forward
        assert_eq!(
            Orientation::from_subject_span(10, 10),
            Orientation::Backward
        );
        assert!(Orientation::Forward.flip().is_reverse());
    }
}
