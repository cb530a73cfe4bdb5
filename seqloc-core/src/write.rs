//! Canonical text form of locations: the exact inverse of [`crate::parse`].
//!
//! Writing applies the partiality flip rule in reverse: a primitive's
//! semantic partial ends are mapped back to the textual side of its
//! un-complemented coordinate string, so `write(parse(s)) == s` for every
//! accepted `s`.

use std::fmt::{self, Display, Formatter};

use crate::models::compound::{CompoundLocation, Operator};
use crate::models::location::{Location, Origin, flip_partials};

fn write_position(f: &mut Formatter<'_>, position: Option<u64>) -> fmt::Result {
    match position {
        Some(value) => write!(f, "{value}"),
        None => Ok(()),
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Location::Gap(gap) = self {
            // the declared digits are kept, not the effective length, so
            // gap text re-emits exactly as parsed
            return if gap.unknown {
                write!(f, "gap(unk{})", gap.raw_length.max(0))
            } else {
                write!(f, "gap({})", gap.raw_length.max(0))
            };
        }

        if self.is_complement() {
            f.write_str("complement(")?;
        }
        if let Some(Origin::Remote { accession, version }) = self.origin() {
            match version {
                Some(version) => write!(f, "{accession}.{version}:")?,
                None => write!(f, "{accession}:")?,
            }
        }
        let (left, right) = flip_partials(
            self.five_prime_partial(),
            self.three_prime_partial(),
            self.is_complement(),
        );
        match self {
            Location::Base(base) => {
                if left {
                    f.write_str("<")?;
                }
                if right {
                    f.write_str(">")?;
                }
                write_position(f, base.position)?;
            }
            Location::Range(range) => {
                if left {
                    f.write_str("<")?;
                }
                write_position(f, range.begin)?;
                f.write_str("..")?;
                if right {
                    f.write_str(">")?;
                }
                write_position(f, range.end)?;
            }
            Location::Between(between) => {
                write_position(f, between.begin)?;
                f.write_str("^")?;
                write_position(f, between.end)?;
            }
            Location::Gap(_) => unreachable!("gaps are written above"),
        }
        if self.is_complement() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Display for CompoundLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if self.is_complement() {
            f.write_str("complement(")?;
        }
        let grouped = self.group().is_some() || self.len() > 1;
        if grouped {
            let operator = match self.group().unwrap_or(Operator::Join) {
                Operator::Join => "join",
                Operator::Order => "order",
            };
            write!(f, "{operator}(")?;
            for (index, member) in self.members().iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{member}")?;
            }
            f.write_str(")")?;
        } else {
            write!(f, "{}", self.members()[0])?;
        }
        if self.is_complement() {
            f.write_str(")")?;
        }
        Ok(())
    }
}
