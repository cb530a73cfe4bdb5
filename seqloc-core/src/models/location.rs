use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Placement length used for gaps of unknown size.
pub const UNKNOWN_GAP_LENGTH: u64 = 100;

/// Symbol used when rendering gap content.
pub const GAP_FILL_SYMBOL: u8 = b'n';

/// Where a location's coordinates live: on the record being processed, or
/// on another archived accession.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    Local,
    Remote {
        accession: String,
        version: Option<u32>,
    },
}

impl Origin {
    pub fn remote(accession: impl Into<String>, version: Option<u32>) -> Self {
        Origin::Remote {
            accession: accession.into(),
            version,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Origin::Remote { .. })
    }
}

/// Maps partiality flags across one `complement(...)` scope crossing.
///
/// A `<` or `>` marker attaches textually to the un-complemented coordinate
/// string; once the scope's content is reverse-complemented, the sequence
/// end that marker describes swaps sides. Crossing the scope an even number
/// of times leaves the flags untouched.
pub fn flip_partials(
    five_prime_partial: bool,
    three_prime_partial: bool,
    complement: bool,
) -> (bool, bool) {
    if complement {
        (three_prime_partial, five_prime_partial)
    } else {
        (five_prime_partial, three_prime_partial)
    }
}

/// A single position. Begin and end coincide; length is 1 when the position
/// is present and 0 otherwise.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub origin: Origin,
    pub position: Option<u64>,
    pub complement: bool,
    pub five_prime_partial: bool,
    pub three_prime_partial: bool,
}

/// An inclusive span of positions; length = end - begin + 1.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub origin: Origin,
    pub begin: Option<u64>,
    pub end: Option<u64>,
    pub complement: bool,
    pub five_prime_partial: bool,
    pub three_prime_partial: bool,
}

/// A zero-width junction marker between two adjacent bases. Never
/// contributes content; length is always 0.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Between {
    pub origin: Origin,
    pub begin: Option<u64>,
    pub end: Option<u64>,
    pub complement: bool,
    pub five_prime_partial: bool,
    pub three_prime_partial: bool,
}

/// An assembly gap. Not real bases: it renders as a run of the gap fill
/// symbol and carries no origin, strand or partiality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gap {
    pub raw_length: i64,
    pub unknown: bool,
}

impl Gap {
    /// Effective placement length: unknown gaps occupy the fixed default,
    /// known gaps their declared length clamped at zero.
    pub fn length(&self) -> u64 {
        if self.unknown {
            UNKNOWN_GAP_LENGTH
        } else {
            self.raw_length.max(0) as u64
        }
    }

    /// The rendered gap content: `length()` repetitions of the fill symbol.
    pub fn fill(&self) -> Vec<u8> {
        vec![GAP_FILL_SYMBOL; self.length() as usize]
    }
}

// Identity of a primitive is its origin, coordinates and strand; the
// partiality flags are metadata layered on top and never participate in
// equality, ordering or hashing.

impl PartialEq for Base {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.position == other.position
            && self.complement == other.complement
    }
}

impl Eq for Base {}

impl Hash for Base {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.position.hash(state);
        self.complement.hash(state);
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.begin == other.begin
            && self.end == other.end
            && self.complement == other.complement
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.begin.hash(state);
        self.end.hash(state);
        self.complement.hash(state);
    }
}

impl PartialEq for Between {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.begin == other.begin
            && self.end == other.end
            && self.complement == other.complement
    }
}

impl Eq for Between {}

impl Hash for Between {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.begin.hash(state);
        self.end.hash(state);
        self.complement.hash(state);
    }
}

/// A primitive feature location.
///
/// Each coordinate-bearing shape exists in a local form (coordinates on the
/// record being processed) and a remote form (coordinates on another
/// accession), discriminated by its [`Origin`] tag. Dispatch is exhaustive:
/// adding a shape forces every consumer to handle it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Base(Base),
    Range(Range),
    Between(Between),
    Gap(Gap),
}

impl Location {
    pub fn base(position: u64) -> Self {
        Location::Base(Base {
            origin: Origin::Local,
            position: Some(position),
            complement: false,
            five_prime_partial: false,
            three_prime_partial: false,
        })
    }

    pub fn range(begin: u64, end: u64) -> Self {
        Location::Range(Range {
            origin: Origin::Local,
            begin: Some(begin),
            end: Some(end),
            complement: false,
            five_prime_partial: false,
            three_prime_partial: false,
        })
    }

    pub fn between(begin: u64, end: u64) -> Self {
        Location::Between(Between {
            origin: Origin::Local,
            begin: Some(begin),
            end: Some(end),
            complement: false,
            five_prime_partial: false,
            three_prime_partial: false,
        })
    }

    pub fn remote_base(accession: impl Into<String>, version: Option<u32>, position: u64) -> Self {
        let mut location = Location::base(position);
        location.set_origin(Origin::remote(accession, version));
        location
    }

    pub fn remote_range(
        accession: impl Into<String>,
        version: Option<u32>,
        begin: u64,
        end: u64,
    ) -> Self {
        let mut location = Location::range(begin, end);
        location.set_origin(Origin::remote(accession, version));
        location
    }

    pub fn gap(length: i64) -> Self {
        Location::Gap(Gap {
            raw_length: length,
            unknown: false,
        })
    }

    pub fn unknown_gap(length: i64) -> Self {
        Location::Gap(Gap {
            raw_length: length,
            unknown: true,
        })
    }

    /// First coordinate of the location, when present. Gaps have none.
    pub fn begin(&self) -> Option<u64> {
        match self {
            Location::Base(base) => base.position,
            Location::Range(range) => range.begin,
            Location::Between(between) => between.begin,
            Location::Gap(_) => None,
        }
    }

    /// Last coordinate of the location, when present. Gaps have none.
    pub fn end(&self) -> Option<u64> {
        match self {
            Location::Base(base) => base.position,
            Location::Range(range) => range.end,
            Location::Between(between) => between.end,
            Location::Gap(_) => None,
        }
    }

    /// Number of bases the location denotes. Between markers are zero-width
    /// and gaps contribute their effective placement length.
    pub fn length(&self) -> u64 {
        match self {
            Location::Base(base) => base.position.map_or(0, |_| 1),
            Location::Range(range) => match (range.begin, range.end) {
                (Some(begin), Some(end)) if end >= begin => end - begin + 1,
                _ => 0,
            },
            Location::Between(_) => 0,
            Location::Gap(gap) => gap.length(),
        }
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Location::Base(base) => Some(&base.origin),
            Location::Range(range) => Some(&range.origin),
            Location::Between(between) => Some(&between.origin),
            Location::Gap(_) => None,
        }
    }

    pub fn set_origin(&mut self, origin: Origin) {
        match self {
            Location::Base(base) => base.origin = origin,
            Location::Range(range) => range.origin = origin,
            Location::Between(between) => between.origin = origin,
            Location::Gap(_) => {}
        }
    }

    pub fn is_remote(&self) -> bool {
        self.origin().is_some_and(Origin::is_remote)
    }

    pub fn is_complement(&self) -> bool {
        match self {
            Location::Base(base) => base.complement,
            Location::Range(range) => range.complement,
            Location::Between(between) => between.complement,
            Location::Gap(_) => false,
        }
    }

    pub fn set_complement(&mut self, complement: bool) {
        match self {
            Location::Base(base) => base.complement = complement,
            Location::Range(range) => range.complement = complement,
            Location::Between(between) => between.complement = complement,
            Location::Gap(_) => {}
        }
    }

    pub fn five_prime_partial(&self) -> bool {
        match self {
            Location::Base(base) => base.five_prime_partial,
            Location::Range(range) => range.five_prime_partial,
            Location::Between(between) => between.five_prime_partial,
            Location::Gap(_) => false,
        }
    }

    pub fn three_prime_partial(&self) -> bool {
        match self {
            Location::Base(base) => base.three_prime_partial,
            Location::Range(range) => range.three_prime_partial,
            Location::Between(between) => between.three_prime_partial,
            Location::Gap(_) => false,
        }
    }

    pub fn set_five_prime_partial(&mut self, partial: bool) {
        match self {
            Location::Base(base) => base.five_prime_partial = partial,
            Location::Range(range) => range.five_prime_partial = partial,
            Location::Between(between) => between.five_prime_partial = partial,
            Location::Gap(_) => {}
        }
    }

    pub fn set_three_prime_partial(&mut self, partial: bool) {
        match self {
            Location::Base(base) => base.three_prime_partial = partial,
            Location::Range(range) => range.three_prime_partial = partial,
            Location::Between(between) => between.three_prime_partial = partial,
            Location::Gap(_) => {}
        }
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin()
            .cmp(&other.begin())
            .then(self.end().cmp(&other.end()))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
