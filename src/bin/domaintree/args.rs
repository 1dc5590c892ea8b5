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

//! Implements command-line argument parsing.

use clap::Parser;

/// Parses the command line arguments.
pub fn parse() -> Args {
    Args::parse()
}

/// The domaintree index demonstrator
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Args {
    /// Entries to insert and then look up: domain names in
    /// presentation form, each with an optional value
    #[clap(required = true, value_name = "NAME[=VALUE]")]
    pub entries: Vec<String>,
}
