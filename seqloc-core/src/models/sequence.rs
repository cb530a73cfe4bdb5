use std::cell::{Cell, RefCell};

use crate::models::agp::AgpRow;
use crate::models::location::Location;

/// Sequence topology as declared by the record header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}

/// The one content strategy a sequence record carries: literal bases,
/// contig locations (CON-class records), or AGP component placements
/// (AGP-class records).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum SequenceContent {
    Bytes(Vec<u8>),
    Contigs(Vec<Location>),
    Agp(Vec<AgpRow>),
}

/// A sequence record under validation.
///
/// The derived length (and, for AGP-backed records, the canonical
/// placement order) is computed lazily and cached behind an explicit
/// computed flag; every structural mutation, bulk replace and incremental
/// add alike, drops the caches. The `Cell`/`RefCell` caches make the type
/// `!Sync`: a `Sequence` is owned by exactly one processing thread for its
/// lifetime.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    pub accession: Option<String>,
    pub version: Option<u32>,
    pub topology: Topology,
    content: SequenceContent,
    #[cfg_attr(feature = "serde", serde(skip))]
    cached_length: Cell<Option<u64>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cached_order: RefCell<Option<Vec<usize>>>,
}

impl Sequence {
    fn new(content: SequenceContent) -> Self {
        Sequence {
            accession: None,
            version: None,
            topology: Topology::default(),
            content,
            cached_length: Cell::new(None),
            cached_order: RefCell::new(None),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(SequenceContent::Bytes(bytes))
    }

    pub fn from_contigs(contigs: Vec<Location>) -> Self {
        Self::new(SequenceContent::Contigs(contigs))
    }

    pub fn from_agp_rows(rows: Vec<AgpRow>) -> Self {
        Self::new(SequenceContent::Agp(rows))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            SequenceContent::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn contigs(&self) -> Option<&[Location]> {
        match &self.content {
            SequenceContent::Contigs(contigs) => Some(contigs),
            _ => None,
        }
    }

    pub fn agp_rows(&self) -> Option<&[AgpRow]> {
        match &self.content {
            SequenceContent::Agp(rows) => Some(rows),
            _ => None,
        }
    }

    /// Replaces the content with a literal base buffer.
    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.content = SequenceContent::Bytes(bytes);
        self.invalidate();
    }

    /// Replaces the contig list wholesale.
    pub fn set_contigs(&mut self, contigs: Vec<Location>) {
        self.content = SequenceContent::Contigs(contigs);
        self.invalidate();
    }

    /// Replaces the AGP row list wholesale.
    pub fn set_agp_rows(&mut self, rows: Vec<AgpRow>) {
        self.content = SequenceContent::Agp(rows);
        self.invalidate();
    }

    /// Appends one contig location. Switches a non-contig record to the
    /// contig strategy.
    pub fn add_contig(&mut self, contig: Location) {
        match &mut self.content {
            SequenceContent::Contigs(contigs) => contigs.push(contig),
            _ => self.content = SequenceContent::Contigs(vec![contig]),
        }
        self.invalidate();
    }

    /// Appends one AGP row. Switches a non-AGP record to the AGP strategy.
    pub fn add_agp_row(&mut self, row: AgpRow) {
        match &mut self.content {
            SequenceContent::Agp(rows) => rows.push(row),
            _ => self.content = SequenceContent::Agp(vec![row]),
        }
        self.invalidate();
    }

    /// The sequence length under the current content strategy:
    /// buffer size, sum of contig lengths, or sum of valid AGP placement
    /// lengths. Cached until the next structural mutation.
    pub fn length(&self) -> u64 {
        if let Some(length) = self.cached_length.get() {
            return length;
        }
        let length = match &self.content {
            SequenceContent::Bytes(bytes) => bytes.len() as u64,
            SequenceContent::Contigs(contigs) => {
                contigs.iter().map(Location::length).sum()
            }
            SequenceContent::Agp(rows) => {
                rows.iter().map(AgpRow::placement_length).sum()
            }
        };
        self.cached_length.set(Some(length));
        length
    }

    /// AGP rows in canonical placement order: ascending part number,
    /// stable for ties and for rows missing a part number (which sort
    /// last, keeping insertion order). Empty for non-AGP records.
    pub fn agp_rows_sorted(&self) -> Vec<&AgpRow> {
        let SequenceContent::Agp(rows) = &self.content else {
            return Vec::new();
        };
        let mut cache = self.cached_order.borrow_mut();
        let order = cache.get_or_insert_with(|| {
            let mut indices: Vec<usize> = (0..rows.len()).collect();
            indices.sort_by_key(|&i| rows[i].part_number.unwrap_or(u64::MAX));
            indices
        });
        order.iter().map(|&i| &rows[i]).collect()
    }

    fn invalidate(&mut self) {
        self.cached_length.set(None);
        *self.cached_order.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn component_row(part_number: u64, begin: u64, end: u64) -> AgpRow {
        AgpRow {
            object: Some("scf1".to_string()),
            object_begin: Some(1),
            object_end: Some(end),
            part_number: Some(part_number),
            component_type: Some("W".to_string()),
            component_id: Some("AC000001.1".to_string()),
            component_begin: Some(begin),
            component_end: Some(end),
            orientation: Some("+".to_string()),
            ..AgpRow::default()
        }
    }

    #[test]
    fn byte_backed_length_is_buffer_size() {
        let sequence = Sequence::from_bytes(b"acgtacgtacgt".to_vec());
        assert_eq!(sequence.length(), 12);
    }

    #[test]
    fn contig_backed_length_sums_members() {
        let sequence = Sequence::from_contigs(vec![
            Location::remote_range("AC000001", Some(1), 1, 8),
            Location::gap(10),
            Location::remote_range("AC000002", Some(1), 1, 8),
        ]);
        assert_eq!(sequence.length(), 26);
    }

    #[test]
    fn agp_length_skips_invalid_rows() {
        let mut middle = component_row(2, 1, 999);
        middle.component_begin = None;
        let sequence = Sequence::from_agp_rows(vec![
            component_row(1, 1, 100),
            middle,
            component_row(3, 1, 50),
        ]);
        assert_eq!(sequence.length(), 150);
    }

    #[test]
    fn incremental_add_invalidates_the_length_cache() {
        let mut sequence = Sequence::from_agp_rows(vec![component_row(1, 1, 100)]);
        assert_eq!(sequence.length(), 100);
        sequence.add_agp_row(component_row(2, 1, 50));
        assert_eq!(sequence.length(), 150);
    }

    #[test]
    fn bulk_replace_invalidates_the_length_cache() {
        let mut sequence = Sequence::from_bytes(b"acgt".to_vec());
        assert_eq!(sequence.length(), 4);
        sequence.set_bytes(b"acgtacgt".to_vec());
        assert_eq!(sequence.length(), 8);
    }

    #[test]
    fn zero_length_is_a_computed_value_not_a_sentinel() {
        let mut sequence = Sequence::from_agp_rows(vec![]);
        assert_eq!(sequence.length(), 0);
        sequence.add_agp_row(component_row(1, 1, 25));
        assert_eq!(sequence.length(), 25);
    }

    #[test]
    fn sorted_view_is_stable_by_part_number() {
        let sequence = Sequence::from_agp_rows(vec![
            component_row(2, 1, 20),
            component_row(1, 1, 10),
            component_row(2, 1, 30),
        ]);
        let spans: Vec<u64> = sequence
            .agp_rows_sorted()
            .iter()
            .map(|row| row.placement_length())
            .collect();
        assert_eq!(spans, vec![10, 20, 30]);
    }
}
