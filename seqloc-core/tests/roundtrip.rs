//! End-to-end properties of the location grammar and segment resolution.

use pretty_assertions::assert_eq;
use rstest::rstest;
use seqloc_core::{
    CompoundLocation, Location, SegmentResolver, Sequence, SequenceRetrievalService,
    parse_compound_location, reverse_complement,
};

#[rstest]
#[case("467")]
#[case("340..565")]
#[case("<340..565")]
#[case("340..>565")]
#[case("4^5")]
#[case("J00194.1:340..565")]
#[case("J00194:340..565")]
#[case("join(<467,468)")]
#[case("complement(<467..>468)")]
#[case("complement(467)")]
#[case("join(complement(<2),4)")]
#[case("complement(join(<2,>4))")]
#[case("order(1..2,4..5)")]
#[case("join(467)")]
#[case("gap(435)")]
#[case("gap(unk100)")]
#[case("gap(unk50)")]
#[case("join(AC000001.1:1..400,gap(100),complement(AC000002.7:1..250))")]
fn accepted_text_round_trips_byte_for_byte(#[case] text: &str) {
    let compound = parse_compound_location(text).unwrap();
    assert_eq!(compound.to_string(), text);
}

#[rstest]
#[case("467")]
#[case("<340..>565")]
#[case("join(complement(<2),4)")]
#[case("complement(join(<2,>4))")]
#[case("gap(unk100)")]
fn written_text_parses_back_to_the_same_structure(#[case] text: &str) {
    let compound = parse_compound_location(text).unwrap();
    let reparsed = parse_compound_location(&compound.to_string()).unwrap();
    assert_eq!(reparsed, compound);
}

#[test]
fn factory_built_compounds_survive_the_round_trip() {
    let mut partial = Location::range(340, 565);
    partial.set_five_prime_partial(true);
    let compound = CompoundLocation::join(vec![
        partial,
        Location::gap(100),
        Location::remote_range("J00194", Some(1), 1, 50),
    ]);
    let reparsed = parse_compound_location(&compound.to_string()).unwrap();
    assert_eq!(reparsed, compound);
}

#[test]
fn compound_length_sums_ranges_and_gaps() {
    let compound = parse_compound_location("join(1..8,gap(10),1..8)").unwrap();
    assert_eq!(compound.length(), 26);
}

/// Archive stub: serves a single accession from memory, complementing on
/// request as the service contract requires.
struct SingleRecordArchive {
    accession: &'static str,
    bytes: &'static [u8],
}

impl SequenceRetrievalService for SingleRecordArchive {
    fn fetch(
        &self,
        accession: &str,
        _version: Option<u32>,
        begin: u64,
        end: u64,
        complement: bool,
    ) -> Option<Vec<u8>> {
        if accession != self.accession || begin < 1 || end < begin || end > self.bytes.len() as u64
        {
            return None;
        }
        let slice = &self.bytes[(begin - 1) as usize..end as usize];
        if complement {
            Some(reverse_complement(slice).unwrap())
        } else {
            Some(slice.to_vec())
        }
    }
}

#[test]
fn parsed_location_resolves_against_local_and_remote_content() {
    let archive = SingleRecordArchive {
        accession: "J00194",
        bytes: b"ttttcccc",
    };
    let resolver = SegmentResolver::with_remote(&archive);
    let sequence = Sequence::from_bytes(b"acgtacgt".to_vec());

    let compound = parse_compound_location("join(1..4,J00194.1:5..8,gap(2))").unwrap();
    assert_eq!(
        resolver.resolve_compound(&compound, &sequence).unwrap(),
        b"acgtccccnn"
    );
}

#[test]
fn member_complement_applies_before_concatenation() {
    let resolver = SegmentResolver::new();
    let sequence = Sequence::from_bytes(b"aacctt".to_vec());
    // complement(1..2) -> revcomp("aa") = "tt", then "cc" appended
    let compound = parse_compound_location("join(complement(1..2),3..4)").unwrap();
    assert_eq!(
        resolver.resolve_compound(&compound, &sequence).unwrap(),
        b"ttcc"
    );
}

#[test]
fn unresolvable_members_leave_a_partial_result() {
    let resolver = SegmentResolver::new();
    let sequence = Sequence::from_bytes(b"acgtacgtacgt".to_vec());
    // out-of-range and remote members drop out; the rest still resolves
    let compound = parse_compound_location("join(5..100,J00194.1:1..4,1..4)").unwrap();
    assert_eq!(
        resolver.resolve_compound(&compound, &sequence).unwrap(),
        b"acgt"
    );
}
