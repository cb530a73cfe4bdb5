//! Segment resolution: turning a location plus a [`Sequence`] into the
//! bytes it denotes.
//!
//! Resolution is reconstruction, not validation: out-of-range or missing
//! coordinates yield no content rather than an error, and an absent remote
//! archive is a first-class partial result, so a location set that is only
//! partly resolvable never aborts whole-entry processing. The one fatal
//! condition is a buffer byte with no defined complement.

use crate::complement::reverse_complement;
use crate::errors::ResolveResult;
use crate::models::compound::CompoundLocation;
use crate::models::location::{Location, Origin};
use crate::models::sequence::Sequence;

/// Capability for fetching spans archived under another accession.
///
/// The core never constructs an implementation; callers inject one when
/// remote resolution is available. `fetch` returns the requested span
/// already reverse-complemented when `complement` is set, or `None` when
/// the span cannot be served. Retry and timeout policy belong to the
/// implementation, not the resolver.
pub trait SequenceRetrievalService {
    fn fetch(
        &self,
        accession: &str,
        version: Option<u32>,
        begin: u64,
        end: u64,
        complement: bool,
    ) -> Option<Vec<u8>>;
}

/// Resolves locations against local sequence content and, when injected,
/// a remote archive.
pub struct SegmentResolver<'a> {
    remote: Option<&'a dyn SequenceRetrievalService>,
}

impl<'a> SegmentResolver<'a> {
    /// A resolver without remote access: remote members resolve to no
    /// content, local members resolve normally.
    pub fn new() -> Self {
        SegmentResolver { remote: None }
    }

    pub fn with_remote(remote: &'a dyn SequenceRetrievalService) -> Self {
        SegmentResolver {
            remote: Some(remote),
        }
    }

    /// Resolves one primitive location to its byte content.
    pub fn resolve(&self, location: &Location, sequence: &Sequence) -> ResolveResult<Vec<u8>> {
        match location {
            Location::Gap(gap) => Ok(gap.fill()),
            Location::Between(_) => Ok(Vec::new()),
            Location::Base(_) | Location::Range(_) => {
                let (Some(begin), Some(end)) = (location.begin(), location.end()) else {
                    return Ok(Vec::new());
                };
                match location.origin() {
                    Some(Origin::Remote { accession, version }) => Ok(self
                        .remote
                        .and_then(|archive| {
                            archive.fetch(accession, *version, begin, end, location.is_complement())
                        })
                        .unwrap_or_default()),
                    _ => self.resolve_local(sequence, begin, end, location.is_complement()),
                }
            }
        }
    }

    /// Resolves a compound: members concatenate in order, empty results
    /// drop out, and a compound-level complement reverse-complements the
    /// concatenation once, at this scope.
    pub fn resolve_compound(
        &self,
        compound: &CompoundLocation,
        sequence: &Sequence,
    ) -> ResolveResult<Vec<u8>> {
        let mut content = Vec::new();
        for member in compound.members() {
            content.extend(self.resolve(member, sequence)?);
        }
        if compound.is_complement() {
            reverse_complement(&content)
        } else {
            Ok(content)
        }
    }

    /// Assembles a contig-backed (CON-class) sequence by resolving each
    /// contig location in placement order. Best-effort: unresolvable
    /// members contribute nothing.
    pub fn assemble_contigs(&self, sequence: &Sequence) -> ResolveResult<Vec<u8>> {
        let mut content = Vec::new();
        for contig in sequence.contigs().unwrap_or_default() {
            content.extend(self.resolve(contig, sequence)?);
        }
        Ok(content)
    }

    fn resolve_local(
        &self,
        sequence: &Sequence,
        begin: u64,
        end: u64,
        complement: bool,
    ) -> ResolveResult<Vec<u8>> {
        let Some(buffer) = sequence.bytes() else {
            return Ok(Vec::new());
        };
        if begin < 1 || end < begin || end > buffer.len() as u64 {
            return Ok(Vec::new());
        }
        let slice = &buffer[(begin - 1) as usize..end as usize];
        if complement {
            reverse_complement(slice)
        } else {
            Ok(slice.to_vec())
        }
    }
}

impl Default for SegmentResolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}
