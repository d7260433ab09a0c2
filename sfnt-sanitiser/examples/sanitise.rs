// Copyright 2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! A very simple driver program which sanitises the file given as its
//! argument and writes the sanitised version to stdout:
//!
//! `sanitise <font> > <out>`

use std::io::{Cursor, Write};

use clap::Parser;
use sfnt_sanitiser::{process, OutputStream};

/// Sanitise an untrusted TrueType font, writing the result to stdout.
#[derive(Debug, Parser)]
struct Args {
    /// Input font file
    font: String,
}

/// Main function for the sanitise example.
fn main() -> Result<(), anyhow::Error> {
    // Initialize the logger, can be controlled with RUST_LOG=debug,info,
    // trace, etc.
    tracing_subscriber::fmt::init();
    // Parse the command line arguments
    let args = Args::parse();

    // Read the font file
    let input = std::fs::read(&args.font)?;

    // Sanitise into memory; stdout is not seekable, and the sink needs to
    // seek backwards to fill the directory in.
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    if let Err(error) = process(&mut sink, &input) {
        anyhow::bail!("failed to sanitise {}: {error}", args.font);
    }

    // And emit the sanitised font.
    std::io::stdout().write_all(&sink.into_inner().into_inner())?;

    Ok(())
}
