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

//! Implementation of data structures related to domain names.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use arrayvec::ArrayVec;

mod error;
mod label;
pub use error::Error;
pub use label::Label;

/// The maximum number of labels in a domain name.
const MAX_N_LABELS: usize = 128;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A structure to represent a domain name.
///
/// A `Name` owns the validated, uncompressed on-the-wire representation
/// of a domain name as defined in [RFC 1035 § 3.1]: a sequence of
/// length-prefixed labels, terminated by the null label, with no label
/// longer than 63 octets and no more than 255 octets in total. The
/// representation is held in a fixed-capacity buffer, so a `Name` never
/// allocates and short names stay cache-friendly.
///
/// `Name`s can be constructed in several ways:
///
/// * through the [`FromStr`] implementation, which accepts the
///   presentation form (e.g. `example.com.`) with the escape sequences
///   of [RFC 1035 § 5.1]; and
/// * from uncompressed on-the-wire names through
///   [`Name::try_from_uncompressed`] and
///   [`Name::try_from_uncompressed_all`].
///
/// [RFC 1035 § 3.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.1
/// [RFC 1035 § 5.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-5.1
#[derive(Clone)]
pub struct Name {
    n_labels: u8,
    wire: ArrayVec<u8, MAX_WIRE_LEN>,
}

#[allow(clippy::len_without_is_empty)] // A domain name is never empty!
impl Name {
    /// Returns whether the `Name` is the DNS root `.`.
    pub fn is_root(&self) -> bool {
        self.n_labels == 1
    }

    /// Returns an iterator over labels in this `Name`.
    pub fn labels(&self) -> Labels {
        Labels::new(self)
    }

    /// Returns the number of labels in this `Name`.
    pub fn len(&self) -> usize {
        self.n_labels as usize
    }

    /// Returns a `Name` representing the DNS root, `.`.
    pub fn root() -> Name {
        let mut wire = ArrayVec::new();
        wire.push(0);
        Name { n_labels: 1, wire }
    }

    /// Tries to parse an uncompressed name present at the start of the
    /// provided buffer. The name need not occupy the entire buffer;
    /// extra data is ignored. If the name is valid, a new `Name` is
    /// returned along with the length of the name in octets.
    pub fn try_from_uncompressed(octets: &[u8]) -> Result<(Self, usize), Error> {
        let mut pos = 0;
        let mut n_labels: u8 = 0;
        loop {
            let &len = octets.get(pos).ok_or(Error::UnexpectedEom)?;
            if len > (MAX_LABEL_LEN as u8) {
                return Err(Error::LabelTooLong);
            }
            n_labels += 1;
            pos += 1 + len as usize;
            if pos > MAX_WIRE_LEN {
                return Err(Error::NameTooLong);
            }
            if len == 0 {
                break;
            }
        }

        let mut wire = ArrayVec::new();
        // The extension will not fail: pos was capped at MAX_WIRE_LEN
        // in every iteration above.
        wire.try_extend_from_slice(&octets[..pos]).unwrap();
        Ok((Self { n_labels, wire }, pos))
    }

    /// Like [`Name::try_from_uncompressed`], but in addition fails if
    /// there is extra data in the buffer after the name (and does not
    /// return the length of the name on success, since it is equal to
    /// the length of the buffer).
    pub fn try_from_uncompressed_all(octets: &[u8]) -> Result<Self, Error> {
        let (name, wire_len) = Self::try_from_uncompressed(octets)?;
        if wire_len < octets.len() {
            Err(Error::ExtraData)
        } else {
            Ok(name)
        }
    }

    /// Returns the (uncompressed) on-the-wire representation of the
    /// `Name`.
    pub fn wire_repr(&self) -> &[u8] {
        &self.wire
    }
}

/// A `Name` displays in presentation form: each label (escaped as
/// described for [`Label`]) followed by a period, so every name is
/// printed fully qualified. The root prints as a bare period.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.labels() {
            if !label.is_null() {
                write!(f, "{}.", label)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.labels().zip(other.labels()).all(|(a, b)| a == b)
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The [`Ord`] implementation for `Name` employs DNSSEC's canonical
/// ordering of domain names. Per [RFC 4034 § 6.1], `Name`s are ordered
/// as strings of labels read from right to left.
///
/// [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels()
            .rev()
            .zip(other.labels().rev())
            .find_map(|(a, b)| Some(a.cmp(b)).filter(|ordering| ordering.is_ne()))
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

////////////////////////////////////////////////////////////////////////
// ITERATION OVER A NAME'S LABELS                                     //
////////////////////////////////////////////////////////////////////////

/// An iterator over the [`Label`]s in a [`Name`].
///
/// To use this iterator, construct one from a [`Name`] using
/// [`Name::labels`].
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    name: &'a Name,
    offsets: ArrayVec<u8, MAX_N_LABELS>,
    front: usize,
    back: usize,
}

impl<'a> Labels<'a> {
    fn new(name: &'a Name) -> Labels<'a> {
        let wire = name.wire_repr();
        let mut offsets = ArrayVec::new();
        let mut offset = 0;
        loop {
            // The push will not fail: a valid wire representation
            // contains at most MAX_N_LABELS labels.
            offsets.push(offset as u8);
            let label_len = wire[offset] as usize;
            if label_len == 0 {
                break;
            }
            offset += label_len + 1;
        }
        Labels {
            name,
            offsets,
            front: 0,
            back: name.len(),
        }
    }

    fn label_at(&self, n: usize) -> &'a Label {
        let wire = self.name.wire_repr();
        let offset = self.offsets[n] as usize;
        let len = wire[offset] as usize;
        let start = offset + 1;
        Label::from_unchecked(&wire[start..start + len])
    }
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let this_one = self.front;
            self.front += 1;
            Some(self.label_at(this_one))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Labels<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back > self.front {
            self.back -= 1;
            Some(self.label_at(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Labels<'_> {}

impl FusedIterator for Labels<'_> {}

////////////////////////////////////////////////////////////////////////
// PARSING OF NAMES FROM RUST STRINGS                                 //
////////////////////////////////////////////////////////////////////////

/// A facility to incrementally build a [`Name`] while checking its
/// validity, used by the [`FromStr`] implementation. A new builder
/// starts with a single null label; finishing at that point produces
/// the name of the DNS root.
struct NameBuilder {
    wire: ArrayVec<u8, MAX_WIRE_LEN>,
    n_labels: u8,
    label_start: usize,
    label_len: u8,
}

impl NameBuilder {
    fn new() -> Self {
        let mut wire = ArrayVec::new();
        wire.push(0);
        Self {
            wire,
            n_labels: 1,
            label_start: 0,
            label_len: 0,
        }
    }

    /// Determines whether the name currently stored in the builder is a
    /// fully qualified domain name—that is, whether it ends with the
    /// null label.
    fn is_fully_qualified(&self) -> bool {
        self.label_len == 0
    }

    /// Tries to add the given octet to the current label. This will
    /// fail if doing so would make the label or name too long. In the
    /// error case, the builder's state remains unchanged.
    fn try_push(&mut self, octet: u8) -> Result<(), Error> {
        if self.label_len >= (MAX_LABEL_LEN as u8) {
            Err(Error::LabelTooLong)
        } else if self.wire.try_push(octet).is_ok() {
            self.label_len += 1;
            Ok(())
        } else {
            Err(Error::NameTooLong)
        }
    }

    /// Finishes the current label and starts a new one. If the current
    /// label is null, this fails, since only the last label in a domain
    /// name may be null. Likewise, if this makes the domain name too
    /// long, this fails. In the error case, the builder's state remains
    /// unchanged.
    fn next_label(&mut self) -> Result<(), Error> {
        if self.is_fully_qualified() {
            Err(Error::NullNonTerminal)
        } else if self.wire.is_full() {
            Err(Error::NameTooLong)
        } else {
            self.wire[self.label_start] = self.label_len;
            self.label_start = self.wire.len();
            self.label_len = 0;
            // The push will not fail because we checked that the wire
            // buffer is not full.
            self.wire.push(0);
            self.n_labels += 1;
            Ok(())
        }
    }

    /// Finishes the construction of the domain name. Since the last
    /// label of a domain name must be null, this fails if that is not
    /// the case.
    fn finish(self) -> Result<Name, Error> {
        if !self.is_fully_qualified() {
            Err(Error::NonNullTerminal)
        } else {
            Ok(Name {
                n_labels: self.n_labels,
                wire: self.wire,
            })
        }
    }
}

/// Allows for conversion of a Rust [`str`] into a [`Name`]. The passed
/// string must be strictly ASCII. Escape sequences as defined by
/// [RFC 4343 § 2.1] are supported; numeric escapes are exactly three
/// *decimal* digits.
///
/// [RFC 4343 § 2.1]: https://datatracker.ietf.org/doc/html/rfc4343#section-2.1
impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::StrEmpty);
        } else if s == "." {
            return Ok(Name::root());
        }

        let mut remaining_octets: &[u8] = s.as_ref();
        let mut builder = NameBuilder::new();

        // NOTE: to check that the string is ASCII, it suffices to check
        // that each octet is ASCII as we go. This is because all
        // multi-byte characters start with an octet that is not ASCII.
        while let Some(&octet) = remaining_octets.first() {
            if octet == b'\\' {
                let (value, consumed) = parse_escape(&remaining_octets[1..])?;
                builder.try_push(value)?;
                remaining_octets = &remaining_octets[consumed + 1..];
            } else if octet == b'.' {
                builder.next_label()?;
                remaining_octets = &remaining_octets[1..];
            } else if !octet.is_ascii() {
                return Err(Error::StrNotAscii);
            } else {
                builder.try_push(octet)?;
                remaining_octets = &remaining_octets[1..];
            }
        }
        builder.finish()
    }
}

/// Parses an escape sequence. We expect `remaining_octets` to start
/// with the octet immediately *after* the backslash that introduces the
/// escape sequence. Numeric escapes use decimal digits only, per
/// RFC 1035 § 5.1; `\a` through `\f` are ordinary quoted characters,
/// not hexadecimal digits.
fn parse_escape(remaining_octets: &[u8]) -> Result<(u8, usize), Error> {
    if remaining_octets.is_empty() {
        Err(Error::InvalidEscape)
    } else if remaining_octets[0].is_ascii_digit() {
        if remaining_octets.len() < 3
            || !remaining_octets[1].is_ascii_digit()
            || !remaining_octets[2].is_ascii_digit()
        {
            Err(Error::InvalidEscape)
        } else {
            let hundreds = (remaining_octets[0] - b'0') as usize;
            let tens = (remaining_octets[1] - b'0') as usize;
            let ones = (remaining_octets[2] - b'0') as usize;
            let value = 100 * hundreds + 10 * tens + ones;
            if value > 255 {
                Err(Error::InvalidEscape)
            } else {
                Ok((value as u8, 3))
            }
        }
    } else {
        Ok((remaining_octets[0], 1))
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
