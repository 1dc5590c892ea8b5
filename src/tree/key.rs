// Copyright 2022 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of the radix-key codec.
//!
//! A radix tree cannot store a key that is a prefix of another key, so
//! domain names must be transformed before they can serve as keys. The
//! transform exploits the fact that name comparisons are
//! case-insensitive ([RFC 1035 § 2.3.3]) to avoid multi-octet encoding
//! schemes:
//!
//! * The order of labels is reversed, so that all names under a common
//!   zone cut share a common key prefix.
//! * Uppercase US-ASCII letters are folded to lowercase.
//! * `0x01` is added to octets with values less than `0x41`, vacating
//!   `0x00` for use as the label separator and key terminator while
//!   preserving canonical name order ([RFC 4034 § 6.1]).
//! * `0x19` is subtracted from octets with values of `0x5B` and above,
//!   compacting the code space so that inner nodes need less room.
//! * The key is terminated by `0x00`, so that no key is ever a prefix
//!   of another.
//!
//! Examples (`0` is the zero octet; letters are ASCII):
//!
//! * root: name `0`, key `0`
//! * `fOo.`: name `3fOo0`, key `MVV00`
//! * `bAr.foo.`: name `3bAr3foo0`, key `MVV0IHY00`
//! * `a.bar.fOo.`: name `1a3bar3fOo0`, key `MVV0IHY0H00`
//!
//! After transformation, the octets of a typical hostname fall into a
//! 38-value alphabet: the separator, the images of the 26 letters and
//! 10 digits, and the image of `-`. [`node38_xlat`] and
//! [`node38_unxlat`] give that alphabet a dense index, which the node
//! family uses for its hostname-only layout.
//!
//! [RFC 1035 § 2.3.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.3
//! [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1

use std::fmt;

use arrayvec::ArrayVec;

use crate::name::Name;

/// The maximum length of a key in octets. Keys are exactly as long as
/// the wire representation they were derived from, and domain names
/// are limited to 255 octets.
pub const MAX_KEY_LEN: usize = 255;

/// The sentinel returned by [`node38_xlat`] and [`node38_unxlat`] for
/// values outside the hostname alphabet.
pub(crate) const NO_INDEX: u8 = 0xFF;

/// Translates one octet of a label into its key image.
pub(crate) fn xlat(octet: u8) -> u8 {
    if octet < 0x41 {
        octet + 0x01
    } else if octet < 0x5B {
        octet + 0x07
    } else {
        octet - 0x19
    }
}

/// Translates a key octet to its dense hostname-alphabet index
/// (`0..38`), or [`NO_INDEX`] if the octet is outside the alphabet.
pub(crate) fn node38_xlat(octet: u8) -> u8 {
    match octet {
        0x00 => 0x00,
        0x2E => 0x01,                 // "-"
        0x31..=0x3A => octet - 0x2F,  // "0".."9"
        0x48..=0x61 => octet - 0x3C,  // "a".."z"
        _ => NO_INDEX,
    }
}

/// Translates a dense hostname-alphabet index back to its key octet,
/// or [`NO_INDEX`] if the index is out of range.
pub(crate) fn node38_unxlat(index: u8) -> u8 {
    match index {
        0x00 => 0x00,
        0x01 => 0x2E,                 // "-"
        0x02..=0x0B => index + 0x2F,  // "0".."9"
        0x0C..=0x25 => index + 0x3C,  // "a".."z"
        _ => NO_INDEX,
    }
}

////////////////////////////////////////////////////////////////////////
// KEYS                                                               //
////////////////////////////////////////////////////////////////////////

/// A radix key derived from a domain name.
///
/// A `Key` is a byte string of length 1 to 255 whose unsigned
/// lexicographic order equals the canonical order of the names it was
/// derived from. The root name is encoded as the single octet `0x00`;
/// every other key consists of transformed labels written in reverse
/// (so the TLD comes first), each followed by a `0x00` separator, with
/// one final `0x00` terminator.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
pub struct Key {
    octets: ArrayVec<u8, MAX_KEY_LEN>,
}

#[allow(clippy::len_without_is_empty)] // A key is never empty.
impl Key {
    /// Builds the key for a domain name given in uncompressed wire
    /// format.
    ///
    /// This fails if a label's length octet has either of its top two
    /// bits set (lengths above 63, and the length octets reserved for
    /// wire-format compression pointers), if the total length exceeds
    /// 255 octets, or if the buffer ends before the terminating null
    /// label.
    pub fn from_wire(wire: &[u8]) -> Result<Self, Error> {
        let mut offsets: ArrayVec<u8, 127> = ArrayVec::new();
        let mut pos = 0;
        loop {
            let len = *wire.get(pos).ok_or(Error::UnexpectedEom)?;
            if len & 0xC0 != 0 {
                return if len & 0xC0 == 0xC0 {
                    Err(Error::CompressedName)
                } else {
                    Err(Error::LabelTooLong)
                };
            } else if len == 0 {
                break;
            }
            // The push will not fail: a name of at most 255 octets has
            // at most 127 non-null labels.
            offsets.push(pos as u8);
            pos += 1 + len as usize;
            if pos + 1 > MAX_KEY_LEN {
                return Err(Error::NameTooLong);
            }
        }

        let mut octets = ArrayVec::new();
        for &offset in offsets.iter().rev() {
            let offset = offset as usize;
            let len = wire[offset] as usize;
            for &octet in &wire[offset + 1..offset + 1 + len] {
                octets.push(xlat(octet));
            }
            octets.push(0x00);
        }
        octets.push(0x00);

        Ok(Self { octets })
    }

    /// Builds the key for a [`Name`].
    pub fn from_name(name: &Name) -> Self {
        // NOTE: the unwrap() is okay: a Name upholds every invariant
        // that from_wire checks.
        Self::from_wire(name.wire_repr()).unwrap()
    }

    /// Returns the length of the key in octets.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns the octets of the key.
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, octet) in self.octets.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", octet)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error type used to report problems building a [`Key`] from wire
/// data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A label's length octet marked the start of a compression
    /// pointer, which cannot appear in an uncompressed name.
    CompressedName,

    /// A label was longer than 63 octets.
    LabelTooLong,

    /// The name is too long (longer than 255 octets on the wire).
    NameTooLong,

    /// The buffer ended before the terminating null label.
    UnexpectedEom,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::CompressedName => f.write_str("name contains a compression pointer"),
            Self::LabelTooLong => f.write_str("label is longer than 63 bytes on the wire"),
            Self::NameTooLong => f.write_str("name is longer than 255 bytes on the wire"),
            Self::UnexpectedEom => f.write_str("unexpected end of buffer"),
        }
    }
}

impl std::error::Error for Error {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
