//! Pre-auth encoding
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#authentication-padding>
//!
//! This is a low level detail used to build PASETO version implementations.

pub use crate::encodings::WriteBytes;

/// Stream the pre-auth encoding of `pieces` into `out`.
///
/// The output is `LE64(pieces.len())`, then `LE64(piece.len()) || piece` for each piece.
pub fn pre_auth_encode(pieces: &[&[u8]], mut out: impl WriteBytes) {
    let len = pieces.len() as u64;
    out.write(&len.to_le_bytes());
    for piece in pieces {
        let len = piece.len() as u64;
        out.write(&len.to_le_bytes());
        out.write(piece);
    }
}

/// Collect the pre-auth encoding of `pieces` into a new buffer.
pub fn pae(pieces: &[&[u8]]) -> Vec<u8> {
    let cap = 8 + pieces.iter().map(|p| 8 + p.len()).sum::<usize>();
    let mut v = Vec::with_capacity(cap);
    pre_auth_encode(pieces, &mut v);
    v
}
