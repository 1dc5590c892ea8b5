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

//! An in-memory, ordered, associative index keyed by DNS domain names.
//!
//! The index is an adaptive radix tree (ART) whose node layouts are
//! specialized for domain-name data. Domain names are transformed into
//! radix keys that preserve the canonical name order of
//! [RFC 4034 § 6.1], so the tree stores names in sorted order and keeps
//! all names under a common zone cut in a single subtree.
//!
//! The crate is organized into two modules:
//!
//! * [`name`] implements domain names themselves: parsing from
//!   presentation form (with [RFC 1035 § 5.1] escapes), validation of
//!   uncompressed on-the-wire names, and canonical ordering.
//! * [`tree`] implements the index: the key codec, the adaptive node
//!   family, and the path-recording [`find_path`](tree::Tree::find_path)
//!   and [`make_path`](tree::Tree::make_path) operations.
//!
//! [RFC 1035 § 5.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-5.1
//! [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1

pub mod name;
pub mod tree;
