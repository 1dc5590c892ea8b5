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

//! Implementation of the path cursor.

use arrayvec::ArrayVec;

use super::key::MAX_KEY_LEN;

/// The maximum number of levels a path can record: the tree's root
/// slot, plus one level for every octet of the longest possible key.
pub const MAX_HEIGHT: usize = 1 + MAX_KEY_LEN;

/// One level of a [`Path`]: the identity of one child slot traversed
/// on the way from the root to a target.
///
/// A slot is identified by the branch octet that selects it within its
/// parent node, together with the key offset of that octet. The first
/// level of a path always denotes the tree's root slot, for which
/// neither field is meaningful. Since nodes hold no back-pointers, a
/// recorded level is re-resolved against the tree when the slot itself
/// is needed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Level {
    depth: u8,
    branch: u8,
}

impl Level {
    /// Returns the key offset of the branch octet that selected this
    /// slot.
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Returns the branch octet that selected this slot.
    pub fn branch(&self) -> u8 {
        self.branch
    }
}

/// A cursor recording the slots traversed from the tree's root to a
/// target position.
///
/// An empty path is the conventional "start from the root" state; the
/// traversal operations populate the first level themselves. A path
/// returned from one operation may be passed back in to *resume* from
/// the recorded position, allowing batches of related keys to share
/// traversal work. A path must not be reused across mutations that may
/// have replaced any slot it records; re-run the operation with a
/// cleared path instead.
#[derive(Clone, Debug, Default)]
pub struct Path {
    levels: ArrayVec<Level, MAX_HEIGHT>,
}

impl Path {
    /// Creates a new, empty `Path`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the path, returning it to the "start from the root"
    /// state.
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Returns the number of levels currently recorded.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Returns whether no levels are recorded.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the recorded levels, from the root slot down.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Returns the deepest recorded level.
    pub fn top(&self) -> Option<&Level> {
        self.levels.last()
    }

    pub(crate) fn push(&mut self, depth: usize, branch: u8) {
        // The push will not fail: depths strictly increase along a
        // path and are bounded by the key length.
        self.levels.push(Level {
            depth: depth as u8,
            branch,
        });
    }

    pub(crate) fn pop(&mut self) {
        self.levels.pop();
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
