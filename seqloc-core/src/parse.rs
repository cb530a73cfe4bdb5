//! Parser for the feature location grammar.
//!
//! ```text
//! expr            := complement_expr | join_expr | order_expr | primitive
//! complement_expr := "complement(" expr ")"
//! join_expr       := "join(" expr ("," expr)* ")"
//! order_expr      := "order(" expr ("," expr)* ")"
//! primitive       := gap | [accession ["." version] ":"] coord
//! gap             := "gap(" ["unk"] digits ")"
//! coord           := position | position ".." position | position "^" position
//! position        := ["<" | ">"] digits
//! ```
//!
//! Parsing runs in two steps: a recursive-descent scan into a small tree
//! mirroring the text, then a lowering pass that flattens nested groups
//! and applies the partiality flip rule ([`flip_partials`]) wherever a
//! marker crosses a `complement(...)` scope. Partial markers on a
//! primitive are recorded relative to the primitive's own coordinate
//! string; the compound's flags are derived across the group's direction.
//!
//! A bare `<N` (no `..`) parses as a partial `Base`, not a `Range`;
//! archived flat files rely on this round-tripping unchanged.

use crate::errors::{LocationError, ParseResult};
use crate::models::compound::{CompoundLocation, Operator};
use crate::models::location::{Base, Between, Location, Origin, Range, flip_partials};

/// Parses a location expression into a [`CompoundLocation`].
///
/// Unresolvable remote accessions are not a parse-time error; they stay
/// unresolved until segment resolution.
pub fn parse_compound_location(text: &str) -> ParseResult<CompoundLocation> {
    let mut parser = Parser::new(text);
    let node = parser.expr()?;
    parser.finish()?;
    lower(node, text)
}

/// One node of the textual parse tree, before lowering.
enum Node {
    /// `complement(...)`; the offset points at the keyword for errors.
    Complement(usize, Box<Node>),
    Group(Operator, Vec<Node>),
    Primitive(Location),
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error_at(&self, offset: usize) -> LocationError {
        LocationError::syntax(self.text, offset)
    }

    fn error(&self) -> LocationError {
        self.error_at(self.pos)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> ParseResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn finish(&self) -> ParseResult<()> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn expr(&mut self) -> ParseResult<Node> {
        let start = self.pos;
        if self.eat("complement(") {
            let inner = self.expr()?;
            self.expect(")")?;
            Ok(Node::Complement(start, Box::new(inner)))
        } else if self.eat("join(") {
            self.group(Operator::Join)
        } else if self.eat("order(") {
            self.group(Operator::Order)
        } else {
            self.primitive()
        }
    }

    fn group(&mut self, operator: Operator) -> ParseResult<Node> {
        let mut children = vec![self.expr()?];
        while self.eat(",") {
            children.push(self.expr()?);
        }
        self.expect(")")?;
        Ok(Node::Group(operator, children))
    }

    fn primitive(&mut self) -> ParseResult<Node> {
        if self.eat("gap(") {
            return self.gap();
        }
        let origin = self.remote_prefix()?;
        self.coord(origin)
    }

    fn gap(&mut self) -> ParseResult<Node> {
        let unknown = self.eat("unk");
        let length = self.digits()? as i64;
        self.expect(")")?;
        let gap = if unknown {
            Location::unknown_gap(length)
        } else {
            Location::gap(length)
        };
        Ok(Node::Primitive(gap))
    }

    /// `accession ["." version] ":"`, present iff the next byte is a
    /// letter. Coordinates always start with a digit or a partial marker.
    fn remote_prefix(&mut self) -> ParseResult<Origin> {
        if !self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Ok(Origin::Local);
        }
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        let accession = self.text[start..self.pos].to_string();
        let version = if self.eat(".") {
            let number = self.digits()?;
            Some(u32::try_from(number).map_err(|_| self.error_at(start))?)
        } else {
            None
        };
        self.expect(":")?;
        Ok(Origin::Remote { accession, version })
    }

    fn coord(&mut self, origin: Origin) -> ParseResult<Node> {
        let (left_marker, left_offset, first) = self.position()?;
        if self.eat("..") {
            let (right_marker, right_offset, second) = self.position()?;
            if left_marker == Some(b'>') {
                return Err(self.error_at(left_offset));
            }
            if right_marker == Some(b'<') {
                return Err(self.error_at(right_offset));
            }
            return Ok(Node::Primitive(Location::Range(Range {
                origin,
                begin: Some(first),
                end: Some(second),
                complement: false,
                five_prime_partial: left_marker == Some(b'<'),
                three_prime_partial: right_marker == Some(b'>'),
            })));
        }
        if self.eat("^") {
            let (right_marker, right_offset, second) = self.position()?;
            if left_marker.is_some() {
                return Err(self.error_at(left_offset));
            }
            if right_marker.is_some() {
                return Err(self.error_at(right_offset));
            }
            return Ok(Node::Primitive(Location::Between(Between {
                origin,
                begin: Some(first),
                end: Some(second),
                complement: false,
                five_prime_partial: false,
                three_prime_partial: false,
            })));
        }
        Ok(Node::Primitive(Location::Base(Base {
            origin,
            position: Some(first),
            complement: false,
            five_prime_partial: left_marker == Some(b'<'),
            three_prime_partial: left_marker == Some(b'>'),
        })))
    }

    fn position(&mut self) -> ParseResult<(Option<u8>, usize, u64)> {
        let marker_offset = self.pos;
        let marker = match self.peek() {
            Some(b'<') => {
                self.pos += 1;
                Some(b'<')
            }
            Some(b'>') => {
                self.pos += 1;
                Some(b'>')
            }
            _ => None,
        };
        let value = self.digits()?;
        Ok((marker, marker_offset, value))
    }

    fn digits(&mut self) -> ParseResult<u64> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error());
        }
        self.text[start..self.pos]
            .parse::<u64>()
            .map_err(|_| self.error_at(start))
    }
}

/// Lowers the parse tree into the final compound: one optional top-level
/// complement scope, one optional group wrapper, flattened members.
fn lower(node: Node, text: &str) -> ParseResult<CompoundLocation> {
    let (complement, inner) = match node {
        Node::Complement(_, inner) => (true, *inner),
        other => (false, other),
    };
    match inner {
        Node::Group(operator, children) => {
            let mut members = Vec::new();
            for child in children {
                flatten_into(child, &mut members, text)?;
            }
            Ok(CompoundLocation::build(Some(operator), complement, members))
        }
        Node::Primitive(member) => Ok(CompoundLocation::build(None, complement, vec![member])),
        // complement(complement(...)) never occurs in flat files; the
        // grammar's complement scopes are one level per primitive/group.
        Node::Complement(offset, _) => Err(LocationError::syntax(text, offset)),
    }
}

fn flatten_into(node: Node, members: &mut Vec<Location>, text: &str) -> ParseResult<()> {
    match node {
        Node::Primitive(member) => {
            members.push(member);
            Ok(())
        }
        Node::Group(_, children) => {
            for child in children {
                flatten_into(child, members, text)?;
            }
            Ok(())
        }
        Node::Complement(offset, inner) => match *inner {
            // Gaps are strandless; a group nested under a member-level
            // complement is outside the grammar.
            Node::Primitive(Location::Gap(_)) => Err(LocationError::syntax(text, offset)),
            Node::Primitive(mut member) => {
                let (five, three) = flip_partials(
                    member.five_prime_partial(),
                    member.three_prime_partial(),
                    true,
                );
                member.set_complement(true);
                member.set_five_prime_partial(five);
                member.set_three_prime_partial(three);
                members.push(member);
                Ok(())
            }
            _ => Err(LocationError::syntax(text, offset)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn offset_of(err: LocationError) -> usize {
        let LocationError::Syntax { offset, .. } = err;
        offset
    }

    #[test]
    fn parses_single_base() {
        let compound = parse_compound_location("467").unwrap();
        assert_eq!(compound.len(), 1);
        assert_eq!(compound.group(), None);
        assert_eq!(compound.members()[0], Location::base(467));
        assert_eq!(compound.length(), 1);
    }

    #[test]
    fn parses_range() {
        let compound = parse_compound_location("340..565").unwrap();
        assert_eq!(compound.members()[0], Location::range(340, 565));
    }

    #[test]
    fn parses_between() {
        let compound = parse_compound_location("4^5").unwrap();
        assert_eq!(compound.members()[0], Location::between(4, 5));
        assert_eq!(compound.length(), 0);
    }

    #[test]
    fn bare_partial_position_is_a_base_not_a_range() {
        let compound = parse_compound_location("<50").unwrap();
        let member = &compound.members()[0];
        assert!(matches!(member, Location::Base(_)));
        assert!(member.five_prime_partial());
        assert!(compound.five_prime_partial());
    }

    #[test]
    fn parses_partial_range_markers() {
        let compound = parse_compound_location("<340..>565").unwrap();
        let member = &compound.members()[0];
        assert!(member.five_prime_partial());
        assert!(member.three_prime_partial());
        assert!(compound.five_prime_partial());
        assert!(compound.three_prime_partial());
    }

    #[rstest]
    #[case("J00194.1:340..565", Some(1))]
    #[case("J00194:340..565", None)]
    fn parses_remote_range(#[case] text: &str, #[case] version: Option<u32>) {
        let compound = parse_compound_location(text).unwrap();
        assert_eq!(
            compound.members()[0],
            Location::remote_range("J00194", version, 340, 565)
        );
        assert!(compound.has_remote_location());
    }

    #[test]
    fn parses_join_members_in_text_order() {
        let compound = parse_compound_location("join(<467,468)").unwrap();
        assert_eq!(compound.group(), Some(Operator::Join));
        assert_eq!(compound.len(), 2);
        assert!(compound.members()[0].five_prime_partial());
        assert!(compound.five_prime_partial());
        assert!(!compound.three_prime_partial());
    }

    #[test]
    fn parses_order_group() {
        let compound = parse_compound_location("order(1..2,4..5)").unwrap();
        assert_eq!(compound.group(), Some(Operator::Order));
        assert_eq!(compound.len(), 2);
    }

    #[test]
    fn flattens_nested_groups() {
        let compound = parse_compound_location("join(join(1..2,3..4),5..6)").unwrap();
        assert_eq!(compound.len(), 3);
        assert_eq!(compound.group(), Some(Operator::Join));
    }

    #[test]
    fn complement_of_five_prime_partial_base() {
        let compound = parse_compound_location("complement(<467)").unwrap();
        assert!(compound.is_complement());
        assert!(compound.three_prime_partial());
        assert!(!compound.five_prime_partial());
        let member = &compound.members()[0];
        assert!(member.five_prime_partial());
        assert!(!member.three_prime_partial());
        assert!(!member.is_complement());
    }

    #[test]
    fn complement_of_three_prime_partial_base() {
        let compound = parse_compound_location("complement(>467)").unwrap();
        assert!(compound.five_prime_partial());
        assert!(!compound.three_prime_partial());
        let member = &compound.members()[0];
        assert!(member.three_prime_partial());
        assert!(!member.five_prime_partial());
    }

    #[test]
    fn member_level_complement_flips_member_flags() {
        let compound = parse_compound_location("join(complement(<2),4)").unwrap();
        let member = &compound.members()[0];
        assert!(member.is_complement());
        assert!(member.three_prime_partial());
        assert!(!member.five_prime_partial());
        // the marker sits mid-feature once the member is complemented
        assert!(!compound.five_prime_partial());
        assert!(!compound.three_prime_partial());
    }

    #[test]
    fn complement_around_whole_join() {
        let compound = parse_compound_location("complement(join(<2,>4))").unwrap();
        assert!(compound.is_complement());
        assert_eq!(compound.len(), 2);
        assert!(!compound.members()[0].is_complement());
        assert!(compound.five_prime_partial());
        assert!(compound.three_prime_partial());
    }

    #[rstest]
    #[case("gap(435)", 435, false)]
    #[case("gap(unk100)", 100, true)]
    fn parses_gaps(#[case] text: &str, #[case] length: u64, #[case] unknown: bool) {
        let compound = parse_compound_location(text).unwrap();
        match &compound.members()[0] {
            Location::Gap(gap) => {
                assert_eq!(gap.unknown, unknown);
                assert_eq!(gap.length(), length);
            }
            other => panic!("expected gap, got {other:?}"),
        }
    }

    #[test]
    fn contig_style_join_with_gaps() {
        let compound =
            parse_compound_location("join(AC000001.1:1..400,gap(100),AC000002.7:1..250)").unwrap();
        assert_eq!(compound.len(), 3);
        assert_eq!(compound.length(), 750);
        assert!(compound.has_remote_location());
    }

    #[rstest]
    #[case("", 0)]
    #[case("join(1..2", 9)]
    #[case("join()", 5)]
    #[case("1..", 3)]
    #[case("..5", 0)]
    #[case("4^^5", 2)]
    #[case("467x", 3)]
    #[case("J00194.1;340", 8)]
    #[case("complement(complement(5))", 11)]
    #[case("join(complement(join(1..2,3..4)),9)", 5)]
    #[case("join(complement(gap(10)),9)", 5)]
    fn rejects_malformed_expressions(#[case] text: &str, #[case] offset: usize) {
        let err = parse_compound_location(text).unwrap_err();
        assert_eq!(offset_of(err), offset, "input: {text:?}");
    }

    #[test]
    fn rejects_marker_on_the_wrong_side() {
        assert!(parse_compound_location(">340..565").is_err());
        assert!(parse_compound_location("340..<565").is_err());
        assert!(parse_compound_location("<4^5").is_err());
    }

    #[test]
    fn syntax_error_carries_the_offending_fragment() {
        let err = parse_compound_location("join(1..2,oops|)").unwrap_err();
        let LocationError::Syntax { fragment, offset } = err;
        assert_eq!(offset, 14);
        assert_eq!(fragment, "|)");
    }
}
