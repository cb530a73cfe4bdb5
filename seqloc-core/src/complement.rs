//! Reverse-complement lookup for nucleotide and IUPAC ambiguity codes.

use crate::errors::{ResolveError, ResolveResult};

/// Maps each sequence symbol to its complement. Zero marks a symbol with no
/// defined complement; complementing such a symbol is an error, never a
/// silent pass-through. Case is preserved.
const COMPLEMENT_TABLE: [u8; 256] = {
    let mut arr = [0u8; 256];
    arr[b'a' as usize] = b't';
    arr[b'c' as usize] = b'g';
    arr[b'g' as usize] = b'c';
    arr[b't' as usize] = b'a';
    arr[b'u' as usize] = b'a';
    // ambiguity codes: purine<->pyrimidine and strand-symmetric sets
    arr[b'r' as usize] = b'y';
    arr[b'y' as usize] = b'r';
    arr[b'm' as usize] = b'k';
    arr[b'k' as usize] = b'm';
    arr[b'b' as usize] = b'v';
    arr[b'v' as usize] = b'b';
    arr[b'd' as usize] = b'h';
    arr[b'h' as usize] = b'd';
    arr[b's' as usize] = b's';
    arr[b'w' as usize] = b'w';
    arr[b'n' as usize] = b'n';
    arr[b'A' as usize] = b'T';
    arr[b'C' as usize] = b'G';
    arr[b'G' as usize] = b'C';
    arr[b'T' as usize] = b'A';
    arr[b'U' as usize] = b'A';
    arr[b'R' as usize] = b'Y';
    arr[b'Y' as usize] = b'R';
    arr[b'M' as usize] = b'K';
    arr[b'K' as usize] = b'M';
    arr[b'B' as usize] = b'V';
    arr[b'V' as usize] = b'B';
    arr[b'D' as usize] = b'H';
    arr[b'H' as usize] = b'D';
    arr[b'S' as usize] = b'S';
    arr[b'W' as usize] = b'W';
    arr[b'N' as usize] = b'N';
    arr
};

/// Complement a single sequence symbol.
///
/// # Arguments
///
/// - symbol: the byte to complement
/// - position: zero-based offset of the byte within the span being
///   complemented, used in the error on unmapped symbols
pub fn complement_symbol(symbol: u8, position: usize) -> ResolveResult<u8> {
    match COMPLEMENT_TABLE[symbol as usize] {
        0 => Err(ResolveError::UnmappableSymbol { symbol, position }),
        complemented => Ok(complemented),
    }
}

/// Reverse-complement a span of sequence bytes.
pub fn reverse_complement(sequence: &[u8]) -> ResolveResult<Vec<u8>> {
    let mut out = Vec::with_capacity(sequence.len());
    for (position, &symbol) in sequence.iter().enumerate().rev() {
        out.push(complement_symbol(symbol, position)?);
    }
    Ok(out)
}
