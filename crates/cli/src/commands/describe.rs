// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use describe_env::Environment;
use openrpc_describe::{
    DocumentationMap, GeneratorConfig, OpenRpcDocument, RegistrySnapshot, assemble,
};

use crate::commands::command::{
    CommandDefinition, compact_arg, docs_arg, get, get_required, output_arg, registry_arg,
};

pub struct DescribeCommandDefinition {}

impl CommandDefinition for DescribeCommandDefinition {
    fn command(&self) -> Command {
        Command::new("openrpc-describe")
            .about("Generate an OpenRPC document for a method registry")
            .arg(registry_arg())
            .arg(docs_arg())
            .arg(output_arg())
            .arg(compact_arg())
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let registry: PathBuf = get_required(matches, "registry")?;
        let docs: Option<PathBuf> = get(matches, "docs");
        let output: Option<PathBuf> = get(matches, "output");
        let compact = matches.get_flag("compact");

        let config = GeneratorConfig::from_env(env)?;

        let snapshot = load_snapshot(&registry)?;
        let docs = match docs {
            Some(path) => load_docs(&path)?,
            None => DocumentationMap::new(),
        };

        tracing::debug!(
            "Describing {} methods from {}",
            snapshot.method_count(),
            registry.display()
        );

        let document = assemble(&snapshot, &docs, &config)?;

        match output {
            Some(path) => {
                let mut file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                write_document(&mut file, &document, compact)?;
                eprintln!("OpenRPC document written to {}", path.display());
            }
            None => write_document(&mut io::stdout().lock(), &document, compact)?,
        }

        Ok(())
    }
}

fn load_snapshot(path: &Path) -> Result<RegistrySnapshot> {
    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid registry snapshot in {}", path.display()))
}

fn load_docs(path: &Path) -> Result<DocumentationMap> {
    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    DocumentationMap::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid documentation in {}", path.display()))
}

fn write_document(
    writer: &mut impl Write,
    document: &OpenRpcDocument,
    compact: bool,
) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *writer, document)?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, document)?;
    }
    writeln!(writer)?;
    Ok(())
}
