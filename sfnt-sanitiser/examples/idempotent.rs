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

//! Round-trip harness: sanitises a font, sanitises the result again, and
//! checks the two outputs are identical byte for byte. On a mismatch both
//! outputs are dumped for inspection.

use std::io::Cursor;

use clap::Parser;
use sfnt_sanitiser::{process, OutputStream};

/// Check that sanitisation of the given font is idempotent.
#[derive(Debug, Parser)]
struct Args {
    /// Input font file
    font: String,
}

fn sanitise(input: &[u8]) -> Result<Vec<u8>, anyhow::Error> {
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    process(&mut sink, input)?;
    Ok(sink.into_inner().into_inner())
}

/// Main function for the idempotent example.
fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let input = std::fs::read(&args.font)?;

    let first = sanitise(&input)
        .map_err(|error| error.context("failed to sanitise the input"))?;
    let second = sanitise(&first)
        .map_err(|error| error.context("failed to sanitise our own output"))?;

    if first != second {
        eprintln!("outputs differ; dumping to out1.ttf and out2.ttf");
        std::fs::write("out1.ttf", &first)?;
        std::fs::write("out2.ttf", &second)?;
        anyhow::bail!("sanitisation of {} is not idempotent", args.font);
    }

    println!("{}: idempotent ({} bytes)", args.font, first.len());
    Ok(())
}
