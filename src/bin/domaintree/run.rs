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

//! Implements the demonstration itself: a put pass over every entry,
//! followed by a get pass.

use std::fmt::Write;
use std::process;

use anyhow::{bail, Result};
use env_logger::Env;
use log::{error, info, warn};

use domaintree::name::Name;
use domaintree::tree::{Key, Path, Tree};

use crate::args::Args;

/// The value stored for entries given without `=VALUE`.
const DEFAULT_VALUE: &str = "foobar";

/// Runs the demonstration.
pub fn run(args: Args) {
    env_logger::init_from_env(Env::new().default_filter_or("warn"));

    if let Err(e) = try_running(args) {
        let mut message = String::from("Failed to run:");
        for (i, cause) in e.chain().enumerate() {
            write!(message, "\n[{}] {}", i + 1, cause).unwrap();
        }
        message.push_str("\nExiting with failure.");
        error!("{}", message);
        process::exit(1);
    }
}

fn try_running(args: Args) -> Result<()> {
    // Parse the entries up front. Entries whose names do not parse are
    // skipped, not fatal, so that the remaining entries still
    // demonstrate the index.
    let mut entries = Vec::new();
    for raw in &args.entries {
        let (name_text, value) = match raw.split_once('=') {
            Some((name_text, value)) => (name_text, value),
            None => (raw.as_str(), DEFAULT_VALUE),
        };
        match name_text.parse::<Name>() {
            Ok(name) => entries.push((name_text, Key::from_name(&name), value)),
            Err(e) => warn!("Skipping {}: {}.", name_text, e),
        }
    }
    if entries.is_empty() {
        bail!("no valid names were provided");
    }

    let mut tree = Tree::new();
    info!("Inserting {} name(s).", entries.len());
    for (name_text, key, value) in &entries {
        put(&mut tree, name_text, key, value);
    }
    info!("Looking {} name(s) back up.", entries.len());
    for (name_text, key, _) in &entries {
        get(&tree, name_text, key);
    }
    Ok(())
}

fn put(tree: &mut Tree<String>, name: &str, key: &Key, value: &str) {
    let mut path = Path::new();
    tree.make_path(&mut path, key);
    let height = path.height();
    // NOTE: the unwrap() is okay: make_path always leaves the cursor
    // on the leaf for the key.
    let leaf = tree.leaf_mut(&path).unwrap();
    match leaf.value {
        Some(ref existing) => {
            println!("{} existed (height: {}, value: {})", name, height, existing)
        }
        None => {
            leaf.value = Some(value.to_string());
            println!("{} created (height: {}, value: {})", name, height, value);
        }
    }
}

fn get(tree: &Tree<String>, name: &str, key: &Key) {
    let mut path = Path::new();
    match tree.find_path(&mut path, key) {
        Ok(()) => {
            // NOTE: the unwrap()s are okay: a successful find_path
            // leaves the cursor on the leaf, and the put pass gave
            // every leaf a value.
            let leaf = tree.leaf(&path).unwrap();
            let value = leaf.value.as_deref().unwrap();
            println!(
                "{} found (height: {}, value: {})",
                name,
                path.height(),
                value,
            );
        }
        Err(_) => println!("{} not found", name),
    }
}
