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

//! Implementation of the adaptive radix tree over domain-name keys.
//!
//! The tree maps radix keys (see the [`key`] module) to caller-owned
//! values. Its two traversal operations both record the slots they
//! pass through on a [`Path`] cursor:
//!
//! * [`Tree::find_path`] locates an existing key; and
//! * [`Tree::make_path`] locates a key, materializing the leaf (and
//!   any inner structure the divergence calls for) if it is absent.
//!
//! The terminal leaf is then read through [`Tree::leaf`] or updated
//! through [`Tree::leaf_mut`]. Because keys preserve canonical name
//! order and paths are reified explicitly, sorted-order overlays such
//! as range scans can be layered on top of these two operations
//! without further support from the tree.
//!
//! Mutation works by whole-node replacement: when a node outgrows its
//! layout or a compressed prefix must be split, a replacement is built
//! aside and written to the owning slot in a single store, and nodes
//! never point back at their parents. An external read-copy-update
//! scheme can therefore let readers run concurrently with one writer,
//! provided superseded nodes are reclaimed only after readers have
//! quiesced; the tree itself implements no such scheme.

use std::fmt;
use std::mem;

use arrayvec::ArrayVec;

pub mod key;
mod node;
mod path;
mod simd;

pub use key::Key;
pub use node::Leaf;
pub use path::{Level, Path, MAX_HEIGHT};

use node::{Node, MAX_PREFIX};

////////////////////////////////////////////////////////////////////////
// TREES                                                              //
////////////////////////////////////////////////////////////////////////

/// An in-memory ordered index over domain-name keys.
///
/// A `Tree` owns one root slot, initially holding an empty four-way
/// node, and through it every node and leaf in the structure. Values
/// of type `V` are carried on leaves (see [`Leaf`]) and belong to the
/// caller.
#[derive(Debug)]
pub struct Tree<V> {
    root: Node<V>,
}

impl<V> Tree<V> {
    /// Creates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: Node::new4() }
    }

    /// Walks the tree looking for `key`, recording the traversed slots
    /// on `path`.
    ///
    /// On success, the deepest level of `path` identifies the leaf
    /// holding `key`; pass `path` to [`Tree::leaf`] to read it. On
    /// [`Error::NotFound`], `path` records the deepest matching
    /// position: if the search ended at a leaf with a different key,
    /// that leaf's level has been popped, while if it ended at a node
    /// with no child for the next octet, the node's level is left on
    /// top.
    ///
    /// If `path` is not empty, it must have been recorded against the
    /// current state of this tree, and the walk resumes from its
    /// deepest level instead of the root.
    pub fn find_path(&self, path: &mut Path, key: &Key) -> Result<(), Error> {
        let octets = key.octets();
        let mut depth;
        if path.is_empty() {
            path.push(0, 0);
            depth = 0;
        } else {
            depth = resume_offset(path);
        }
        let mut node = match self.slot(path) {
            Some(node) => node,
            None => panic!("path does not match the tree"),
        };

        while depth < octets.len() {
            if let Some(leaf) = node.as_leaf() {
                return if leaf.key() == key {
                    Ok(())
                } else {
                    // Keys cannot be prefixes of one another, so an
                    // unequal leaf cannot be a partial match. Discard
                    // its level.
                    path.pop();
                    Err(Error::NotFound)
                };
            }
            let prefix = node.prefix();
            if !prefix.is_empty() {
                if !octets[depth..].starts_with(prefix) {
                    path.pop();
                    return Err(Error::NotFound);
                }
                depth += prefix.len();
            }
            if depth == octets.len() {
                break;
            }
            let branch = octets[depth];
            match node.find_child(branch) {
                Some(child) => {
                    path.push(depth, branch);
                    node = child;
                    depth += 1;
                }
                None => return Err(Error::NotFound),
            }
        }
        Ok(())
    }

    /// Walks the tree to the position of `key`, materializing the leaf
    /// if it is absent, and records the traversed slots on `path`.
    ///
    /// On return, the deepest level of `path` identifies the leaf for
    /// `key`; pass `path` to [`Tree::leaf_mut`] to inspect or set its
    /// value. If the key was already present, the tree is left
    /// untouched — in particular, the existing leaf's value is kept —
    /// and the caller can distinguish the two cases by looking at the
    /// value.
    ///
    /// If `path` is not empty, it must have been recorded against the
    /// current state of this tree, and the walk resumes from its
    /// deepest level instead of the root.
    pub fn make_path(&mut self, path: &mut Path, key: &Key) {
        let octets = key.octets();
        let mut depth;
        if path.is_empty() {
            path.push(0, 0);
            depth = 0;
        } else {
            depth = resume_offset(path);
        }
        let mut node = match self.slot_mut(path) {
            Some(node) => node,
            None => panic!("path does not match the tree"),
        };

        while depth < octets.len() {
            if let Some(leaf) = node.as_leaf() {
                if leaf.key() == key {
                    return;
                }
                // NOTE: the unwrap() is okay: the path always carries
                // at least the root level here.
                let entry_depth = path.top().unwrap().depth();
                split_leaf(node, path, key, entry_depth);
                return;
            }
            if !node.prefix().is_empty() {
                let matched = common_prefix_len(&octets[depth..], node.prefix());
                if matched < node.prefix().len() {
                    split_prefix(node, matched);
                }
                depth += matched;
            }
            if depth == octets.len() {
                break;
            }
            let branch = octets[depth];
            if node.has_child(branch) {
                path.push(depth, branch);
                // NOTE: the unwrap() is okay: has_child just confirmed
                // that the child is present.
                node = node.find_child_mut(branch).unwrap();
                depth += 1;
            } else {
                node.add_child(branch, Node::new_leaf(key));
                path.push(depth, branch);
                return;
            }
        }
    }

    /// Returns the leaf at the deepest level of `path`, or `None` if
    /// the path is empty or does not end at a leaf.
    pub fn leaf(&self, path: &Path) -> Option<&Leaf<V>> {
        if path.is_empty() {
            return None;
        }
        self.slot(path).and_then(Node::as_leaf)
    }

    /// The mutable variant of [`Tree::leaf`], through which a leaf's
    /// value is set or replaced.
    pub fn leaf_mut(&mut self, path: &Path) -> Option<&mut Leaf<V>> {
        if path.is_empty() {
            return None;
        }
        self.slot_mut(path).and_then(Node::as_leaf_mut)
    }

    /// Re-resolves the slot recorded at the deepest level of `path` by
    /// replaying the recorded branch octets from the root.
    fn slot(&self, path: &Path) -> Option<&Node<V>> {
        let mut node = &self.root;
        for level in &path.levels()[1..] {
            node = node.find_child(level.branch())?;
        }
        Some(node)
    }

    /// The mutable variant of [`Tree::slot`].
    fn slot_mut(&mut self, path: &Path) -> Option<&mut Node<V>> {
        let mut node = &mut self.root;
        for level in &path.levels()[1..] {
            node = node.find_child_mut(level.branch())?;
        }
        Some(node)
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the key offset at which to resume a traversal recorded on
/// `path`: the octet after the deepest recorded branch, or offset 0
/// when only the root level is recorded. This is exactly the state a
/// fresh traversal is in after recording that level.
fn resume_offset(path: &Path) -> usize {
    // NOTE: the unwrap() is okay: our callers only resume non-empty
    // paths.
    let top = path.top().unwrap();
    if path.height() == 1 {
        0
    } else {
        top.depth() + 1
    }
}

/// Returns the length of the longest common prefix of `a` and `b`.
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Replaces the leaf in `slot` with the structure needed to hold both
/// that leaf and a new leaf for `key`.
///
/// The two keys agree up to some offset past `entry_depth` (the offset
/// of the branch octet that selected `slot`). The run between those
/// offsets becomes a chain of four-way nodes, each consuming one
/// branch octet plus up to [`MAX_PREFIX`] octets of compressed prefix;
/// the old leaf and the new one hang off the deepest node at their
/// first diverging octets. The chain is built detached and spliced
/// into `slot` as the final step, so no intermediate state is ever
/// reachable from the tree.
fn split_leaf<V>(slot: &mut Node<V>, path: &mut Path, key: &Key, entry_depth: usize) {
    let old = match mem::take(slot) {
        Node::Leaf(leaf) => leaf,
        _ => unreachable!("split_leaf needs a leaf slot"),
    };
    let octets = key.octets();
    let diverge = common_prefix_len(octets, old.key().octets());
    debug_assert!(diverge > entry_depth);
    debug_assert!(diverge < octets.len());
    debug_assert!(diverge < old.key().len());
    let old_branch = old.key().octets()[diverge];

    // Partition [entry_depth, diverge) into chain segments of one
    // branch octet plus up to MAX_PREFIX prefix octets. A key is at
    // most 255 octets, so there are at most ceil(254 / 9) = 29
    // segments.
    let mut segments: ArrayVec<(usize, usize), 32> = ArrayVec::new();
    let mut offset = entry_depth;
    while offset < diverge {
        let mut len = diverge - offset;
        if len > MAX_PREFIX {
            len = MAX_PREFIX;
        } else {
            len -= 1;
        }
        segments.push((offset, len));
        offset += 1 + len;
    }
    debug_assert_eq!(offset, diverge);

    // Build the chain detached, deepest node first.
    // NOTE: the unwrap() is okay: the keys diverge past entry_depth,
    // so there is at least one segment.
    let (deepest_offset, deepest_len) = *segments.last().unwrap();
    let mut chain = Node::new4();
    chain
        .header_mut()
        .set_prefix(&octets[deepest_offset + 1..deepest_offset + 1 + deepest_len]);
    chain.add_child(old_branch, Node::Leaf(old));
    chain.add_child(octets[diverge], Node::new_leaf(key));
    for &(seg_offset, seg_len) in segments[..segments.len() - 1].iter().rev() {
        let mut upper = Node::new4();
        upper
            .header_mut()
            .set_prefix(&octets[seg_offset + 1..seg_offset + 1 + seg_len]);
        upper.add_child(octets[seg_offset + 1 + seg_len], chain);
        chain = upper;
    }
    *slot = chain;

    // The chain's first node took the place of the old leaf, so the
    // path's top level already refers to it; record the rest of the
    // chain and the new leaf.
    for &(seg_offset, _) in &segments[1..] {
        path.push(seg_offset, octets[seg_offset]);
    }
    path.push(diverge, octets[diverge]);
}

/// Splits the compressed prefix of the inner node in `slot` after its
/// first `matched` octets. A new four-way node carrying the shared
/// octets takes the node's place in the slot, with the node re-linked
/// below it at the first unshared octet and its prefix truncated to
/// the remainder.
fn split_prefix<V>(slot: &mut Node<V>, matched: usize) {
    let mut old = mem::take(slot);
    let (shared, branch) = {
        let header = old.header_mut();
        let mut shared = [0u8; MAX_PREFIX];
        shared[..matched].copy_from_slice(&header.prefix[..matched]);
        let branch = header.prefix[matched];
        let rest = header.prefix_len as usize - 1 - matched;
        header.prefix.copy_within(matched + 1..matched + 1 + rest, 0);
        header.prefix_len = rest as u8;
        (shared, branch)
    };
    let mut parent = Node::new4();
    parent.header_mut().set_prefix(&shared[..matched]);
    parent.add_child(branch, old);
    *slot = parent;
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error type used to report failed lookups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key is not present in the tree.
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::NotFound => f.write_str("key not found"),
        }
    }
}

impl std::error::Error for Error {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::node::Node;
    use super::{Error, Key, Path, Tree};
    use crate::name::Name;

    fn key(text: &str) -> Key {
        Key::from_name(&text.parse::<Name>().unwrap())
    }

    fn insert(tree: &mut Tree<&str>, text: &str) -> Path {
        let mut path = Path::new();
        tree.make_path(&mut path, &key(text));
        path
    }

    fn find(tree: &Tree<&str>, text: &str) -> (Result<(), Error>, Path) {
        let mut path = Path::new();
        let result = tree.find_path(&mut path, &key(text));
        (result, path)
    }

    /// Walks the whole tree, checking structural invariants and
    /// returning every stored key in traversal order.
    fn collect_checked(tree: &Tree<&str>) -> Vec<Key> {
        let mut leaves = Vec::new();
        walk(&tree.root, 0, &mut leaves);
        // Traversal order is ascending key order, and keys are unique.
        for pair in leaves.windows(2) {
            assert!(pair[0] < pair[1], "{:?} not below {:?}", pair[0], pair[1]);
        }
        leaves
    }

    fn walk(node: &Node<&str>, start: usize, leaves: &mut Vec<Key>) {
        if let Some(leaf) = node.as_leaf() {
            leaves.push(leaf.key().clone());
            return;
        }
        let prefix = node.prefix().to_vec();
        let next = start + prefix.len();
        let mut width = 0;
        for branch in 0..=0xE6u8 {
            if let Some(child) = node.find_child(branch) {
                width += 1;
                let mut sub = Vec::new();
                walk(child, next + 1, &mut sub);
                assert!(!sub.is_empty());
                for key in &sub {
                    // Prefix coherence: every key below this node
                    // carries the node's prefix and then the branch
                    // octet.
                    assert_eq!(&key.octets()[start..next], &prefix[..]);
                    assert_eq!(key.octets()[next], branch);
                }
                leaves.append(&mut sub);
            }
        }
        assert_eq!(width, node.header().width as usize);
    }

    #[test]
    fn insert_then_find_single_name() {
        let mut tree = Tree::new();
        let path = insert(&mut tree, "foo.");
        assert_eq!(path.height(), 2);
        assert_eq!(tree.leaf(&path).unwrap().key(), &key("foo."));

        let (result, path) = find(&tree, "foo.");
        assert_eq!(result, Ok(()));
        assert_eq!(path.height(), 2);
        assert_eq!(tree.leaf(&path).unwrap().key(), &key("foo."));
    }

    #[test]
    fn leaf_split_creates_prefixed_node() {
        let mut tree = Tree::new();
        insert(&mut tree, "foo.");
        insert(&mut tree, "bar.foo.");

        // The leaf for foo. is replaced by a four-way node compressing
        // the three octets between the shared branch octet and the
        // divergence, with the two leaves at the diverging octets: the
        // old key's terminator and the image of "b".
        let node = tree.root.find_child(0x4D).unwrap();
        assert!(matches!(node, Node::Node4(_)));
        assert_eq!(node.prefix(), &[0x56, 0x56, 0x00]);
        assert_eq!(node.header().width, 2);
        assert!(node.has_child(0x00));
        assert!(node.has_child(0x49));

        assert_eq!(find(&tree, "foo.").0, Ok(()));
        assert_eq!(find(&tree, "bar.foo.").0, Ok(()));
        collect_checked(&tree);
    }

    #[test]
    fn sibling_splits_share_structure() {
        let mut tree = Tree::new();
        for text in ["foo.", "bar.foo.", "a.bar.foo.", "ab.bar.foo.", "b.bar.foo."] {
            insert(&mut tree, text);
        }

        let heights: Vec<usize> = ["foo.", "bar.foo.", "a.bar.foo.", "ab.bar.foo.", "b.bar.foo."]
            .into_iter()
            .map(|text| {
                let (result, path) = find(&tree, text);
                assert_eq!(result, Ok(()), "{} not found", text);
                path.height()
            })
            .collect();
        assert_eq!(heights, vec![3, 4, 5, 5, 4]);
        assert_eq!(collect_checked(&tree).len(), 5);
    }

    #[test]
    fn sibling_fanout_adapts_the_node_layout() {
        let mut tree = Tree::new();
        let names: Vec<String> = (b'a'..=b'q').map(|c| format!("{}.example.", c as char)).collect();
        for name in &names {
            insert(&mut tree, name);
        }

        // All 17 siblings branch on hostname octets at the same node.
        let node = tree
            .root
            .find_child(key("example.").octets()[0])
            .unwrap();
        if super::simd::have_avx2() {
            assert!(matches!(node, Node::Node32(_)));
        } else {
            assert!(matches!(node, Node::Node38(_)));
        }
        assert_eq!(node.header().width, 17);

        for name in &names {
            assert_eq!(find(&tree, name).0, Ok(()), "{} not found", name);
        }
        collect_checked(&tree);
    }

    #[test]
    fn duplicate_insertion_is_case_insensitive_and_idempotent() {
        let mut tree = Tree::new();
        let path = insert(&mut tree, "foo.");
        tree.leaf_mut(&path).unwrap().value = Some("original");

        // Inserting FOO. reaches the same leaf and leaves its value
        // untouched.
        let path = insert(&mut tree, "FOO.");
        let leaf = tree.leaf(&path).unwrap();
        assert_eq!(leaf.key(), &key("foo."));
        assert_eq!(leaf.value, Some("original"));
        assert_eq!(collect_checked(&tree).len(), 1);
    }

    #[test]
    fn mixed_fanout_reaches_node256() {
        let mut tree = Tree::new();
        // 49 single-octet labels whose key images mix hostname and
        // non-hostname octets. Once a non-hostname branch has been
        // seen, growth must go through Node48, never Node38.
        let names: Vec<String> = (0..49u8).map(|i| format!("\\{:03}.", i)).collect();
        for (i, name) in names.iter().enumerate() {
            insert(&mut tree, name);
            if i == 48 {
                assert!(matches!(tree.root, Node::Node256(_)));
            } else {
                assert!(!matches!(tree.root, Node::Node38(_)));
            }
        }
        assert_eq!(tree.root.header().width, 49);
        for name in &names {
            assert_eq!(find(&tree, name).0, Ok(()), "{} not found", name);
        }
        collect_checked(&tree);
    }

    #[test]
    fn long_common_runs_chain_multiple_nodes() {
        let mut tree = Tree::new();
        // The two keys share a 20-octet run, which no single node can
        // compress: the chain takes three nodes (8 + 8 + 1 prefix
        // octets around three branch octets).
        let first = format!("{}b.", "a".repeat(20));
        let second = format!("{}c.", "a".repeat(20));
        insert(&mut tree, &first);
        let path = insert(&mut tree, &second);
        assert_eq!(path.height(), 5);

        let (result, path) = find(&tree, &first);
        assert_eq!(result, Ok(()));
        assert_eq!(path.height(), 5);
        assert_eq!(find(&tree, &second).0, Ok(()));
        collect_checked(&tree);
    }

    #[test]
    fn root_name_works() {
        let mut tree = Tree::new();
        assert_eq!(key(".").octets(), &[0x00]);
        let path = insert(&mut tree, ".");
        assert_eq!(path.height(), 2);
        assert_eq!(find(&tree, ".").0, Ok(()));
    }

    #[test]
    fn maximum_length_name_works() {
        let long = format!(
            "{}.{}.{}.{}.",
            "x".repeat(63),
            "x".repeat(63),
            "x".repeat(63),
            "x".repeat(61),
        );
        assert_eq!(key(&long).len(), 255);
        let mut tree = Tree::new();
        insert(&mut tree, &long);
        assert_eq!(find(&tree, &long).0, Ok(()));
    }

    #[test]
    fn not_found_at_absent_child_keeps_the_cursor() {
        let mut tree = Tree::new();
        insert(&mut tree, "foo.");

        // The root has no branch for bar.'s first octet, so the cursor
        // stays at the root level.
        let (result, path) = find(&tree, "bar.");
        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(path.height(), 1);
    }

    #[test]
    fn not_found_at_mismatching_leaf_pops_the_cursor() {
        let mut tree = Tree::new();
        insert(&mut tree, "foo.");
        insert(&mut tree, "bar.foo.");

        // baz.foo. walks into the leaf for bar.foo. and mismatches, so
        // the leaf's level is discarded and the cursor ends at its
        // parent.
        let (result, path) = find(&tree, "baz.foo.");
        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(path.height(), 2);
    }

    #[test]
    fn make_path_resumes_a_failed_find() {
        let mut tree = Tree::new();
        insert(&mut tree, "foo.");
        insert(&mut tree, "bar.foo.");

        // A failed lookup leaves the cursor at the deepest matching
        // node; make_path picks up from there and splits the
        // mismatching leaf.
        let baz = key("baz.foo.");
        let mut path = Path::new();
        assert_eq!(tree.find_path(&mut path, &baz), Err(Error::NotFound));
        tree.make_path(&mut path, &baz);
        assert_eq!(tree.leaf(&path).unwrap().key(), &baz);

        for text in ["foo.", "bar.foo.", "baz.foo."] {
            assert_eq!(find(&tree, text).0, Ok(()), "{} not found", text);
        }
        collect_checked(&tree);
    }

    #[test]
    fn find_path_resumes_at_a_found_leaf() {
        let mut tree = Tree::new();
        insert(&mut tree, "foo.");

        let mut path = Path::new();
        let foo = key("foo.");
        assert_eq!(tree.find_path(&mut path, &foo), Ok(()));
        let height = path.height();
        // Resuming with the same cursor lands on the same leaf.
        assert_eq!(tree.find_path(&mut path, &foo), Ok(()));
        assert_eq!(path.height(), height);
        assert_eq!(tree.leaf(&path).unwrap().key(), &foo);
    }

    #[test]
    fn reinsertion_changes_nothing() {
        let texts = [
            "example.",
            "a.example.",
            "yljkjljk.a.example.",
            "Z.a.example.",
            "zABC.a.EXAMPLE.",
            "z.example.",
            "\\001.z.example.",
            "*.z.example.",
            "\\200.z.example.",
        ];
        let mut tree = Tree::new();
        for text in texts {
            let path = insert(&mut tree, text);
            tree.leaf_mut(&path).unwrap().value = Some(text);
        }
        let before = collect_checked(&tree);

        for text in texts {
            let path = insert(&mut tree, text);
            assert_eq!(tree.leaf(&path).unwrap().value, Some(text));
        }
        assert_eq!(collect_checked(&tree), before);
    }

    #[test]
    fn lookup_agrees_with_insertion() {
        let texts = [
            ".",
            "com.",
            "example.com.",
            "www.example.com.",
            "mail.example.com.",
            "org.",
            "example.org.",
            "\\042.example.org.",
            "xn--nxasmq6b.example.org.",
            "a-b-c.test.",
            "0123456789.test.",
        ];
        let mut tree = Tree::new();
        for text in texts {
            let mut inserted = Path::new();
            tree.make_path(&mut inserted, &key(text));
            let (result, found) = find(&tree, text);
            assert_eq!(result, Ok(()), "{} not found after insertion", text);
            assert_eq!(found.top(), inserted.top(), "terminal level differs for {}", text);
        }
        assert_eq!(collect_checked(&tree).len(), texts.len());
    }

    #[test]
    fn stored_keys_come_back_in_canonical_order() {
        // The canonically ordered name list from RFC 4034 § 6.1,
        // inserted out of order.
        let ordered = [
            "example.",
            "a.example.",
            "yljkjljk.a.example.",
            "Z.a.example.",
            "zABC.a.EXAMPLE.",
            "z.example.",
            "\\001.z.example.",
            "*.z.example.",
            "\\200.z.example.",
        ];
        let mut tree = Tree::new();
        for text in [3, 8, 0, 5, 2, 7, 1, 6, 4].map(|i| ordered[i]) {
            insert(&mut tree, text);
        }
        let keys = collect_checked(&tree);
        let expected: Vec<Key> = ordered.iter().map(|text| key(text)).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn values_survive_lookup_round_trips() {
        let mut tree = Tree::new();
        for (text, value) in [("foo.", "one"), ("bar.foo.", "two"), ("baz.", "three")] {
            let path = insert(&mut tree, text);
            let leaf = tree.leaf_mut(&path).unwrap();
            assert_eq!(leaf.value, None);
            leaf.value = Some(value);
        }
        for (text, value) in [("foo.", "one"), ("bar.foo.", "two"), ("baz.", "three")] {
            let (result, path) = find(&tree, text);
            assert_eq!(result, Ok(()));
            assert_eq!(tree.leaf(&path).unwrap().value, Some(value));
        }
    }
}
