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

//! Implementation of the [`Label`] type.

use std::cmp::Ordering;
use std::fmt;

use super::{Error, MAX_LABEL_LEN};

/// One label of a domain name.
///
/// A `Label` wraps a `[u8]` of at most 63 octets. Following
/// [RFC 1035 § 2.3.3], labels compare without regard to ASCII case,
/// while the stored octets keep whatever case they were written with.
/// `&Label` is constructed with [`TryFrom`], which checks the length:
///
/// ```
/// use domaintree::name::Label;
///
/// let label = <&Label>::try_from(&b"com"[..]).unwrap();
/// assert_eq!(label.octets(), b"com");
/// ```
///
/// [RFC 1035 § 2.3.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.3
#[repr(transparent)]
pub struct Label {
    octets: [u8],
}

#[allow(clippy::len_without_is_empty)] // Following DNS terminology, we have is_null().
impl Label {
    /// Wraps a `&[u8]` as a `Label` without checking its length. For
    /// use within the parent module on slices already known to be
    /// valid (for instance, label ranges of a validated name).
    pub(super) fn from_unchecked(octets: &[u8]) -> &Self {
        // Label is a transparent wrapper over [u8], so the cast only
        // changes the slice's type.
        unsafe { &*(octets as *const [u8] as *const Label) }
    }

    /// Returns whether this `Label` is the null (zero-length) label.
    pub fn is_null(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns the number of octets in this `Label`.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns the null (zero-length) `Label`.
    pub fn null() -> &'static Self {
        Self::from_unchecked(&[])
    }

    /// Returns the octets of this `Label`.
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }
}

impl<'a> TryFrom<&'a [u8]> for &'a Label {
    type Error = Error;

    fn try_from(octets: &'a [u8]) -> Result<Self, Self::Error> {
        match octets.len() {
            0..=MAX_LABEL_LEN => Ok(Label::from_unchecked(octets)),
            _ => Err(Error::LabelTooLong),
        }
    }
}

/// Labels display in presentation form, escaped per RFC 1035 § 5.1 and
/// RFC 4343 § 2.1: a period or backslash is quoted with a backslash,
/// any other graphic ASCII octet appears as itself, and everything
/// else is written as a backslash followed by the octet's three-digit
/// decimal value.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &octet in &self.octets {
            match octet {
                b'.' | b'\\' => write!(f, "\\{}", octet as char)?,
                _ if octet.is_ascii_graphic() => write!(f, "{}", octet as char)?,
                _ => write!(f, "\\{:03}", octet)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

/// The [`Ord`] implementation for `Label` is the canonical label order
/// of [RFC 4034 § 6.1]: octets are compared as unsigned values with
/// uppercase ASCII letters counted as their lowercase forms, and a
/// label that runs out of octets first sorts first.
///
/// [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.len().min(other.len());
        for index in 0..common {
            let a = self.octets[index].to_ascii_lowercase();
            let b = other.octets[index].to_ascii_lowercase();
            if a != b {
                return a.cmp(&b);
            }
        }
        self.len().cmp(&other.len())
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Label equality is equivalence under the canonical order, so it is
/// ASCII-case-insensitive like [`Ord`].
impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn label(octets: &[u8]) -> &Label {
        <&Label>::try_from(octets).unwrap()
    }

    #[test]
    fn try_from_slice_accepts_ok_lengths() {
        let octets = &[0; MAX_LABEL_LEN];
        for i in 0..=MAX_LABEL_LEN {
            <&Label>::try_from(&octets[0..i]).unwrap();
        }
    }

    #[test]
    fn try_from_slice_rejects_bad_lengths() {
        assert_eq!(
            <&Label>::try_from(&[0; MAX_LABEL_LEN + 1][..]),
            Err(Error::LabelTooLong)
        );
        assert_eq!(<&Label>::try_from(&[0; 97][..]), Err(Error::LabelTooLong));
    }

    #[test]
    fn null_is_null() {
        assert!(Label::null().is_null());
    }

    #[test]
    fn eq_is_case_insensitive() {
        assert_eq!(label(b"EXAMPLE"), label(b"example"));
        assert_eq!(label(b"eXaMpLe"), label(b"ExAmPlE"));
        assert_ne!(label(b"example"), label(b"examples"));
    }

    #[test]
    fn ord_works() {
        let labels = [
            (0, label(b"exam")),
            (1, label(b"example")),
            (1, label(b"eXaMpLe")),
            (2, label(b"examples")),
            (3, label(b"label")),
        ];

        for (i, li) in labels.iter() {
            for (j, lj) in labels.iter() {
                assert_eq!(i.cmp(j), li.cmp(lj));
            }
        }
    }

    #[test]
    fn ord_is_unsigned_past_ascii() {
        // 0x80 and above must sort after the ASCII range.
        assert!(label(b"z") < label(b"\x80"));
        assert!(label(b"\x80") < label(b"\xFF"));
    }

    #[test]
    fn display_escaping_works() {
        assert_eq!(label(b"\x00\\.a").to_string(), "\\000\\\\\\.a");
        assert_eq!(label(b"plain-label").to_string(), "plain-label");
    }
}
