// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod format;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dynstruct::schema::SchemaDocument;
use dynstruct::DynamicStruct;
use format::DataFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dynstruct-convert")]
#[command(about = "Dynamic struct schemas: validate, describe, convert JSON <-> YAML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a schema and report every field diagnostic
    Validate {
        /// Schema file (YAML or JSON)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,
    },

    /// Print the field layout of a schema
    Describe {
        /// Schema file (YAML or JSON)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Emit the normalized schema as YAML instead of a table
        #[arg(long)]
        yaml: bool,
    },

    /// Decode a data file against a schema and re-encode it
    Convert {
        /// Schema file (YAML or JSON)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Input data file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Input format (auto-detect from extension if not specified)
        #[arg(long, value_enum)]
        from: Option<DataFormat>,

        /// Output format (defaults to the input format)
        #[arg(long, value_enum)]
        to: Option<DataFormat>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { schema } => {
            cmd_validate(&schema)?;
        }
        Commands::Describe { schema, yaml } => {
            cmd_describe(&schema, yaml)?;
        }
        Commands::Convert {
            schema,
            input,
            from,
            to,
            output,
            pretty,
        } => {
            cmd_convert(&schema, &input, from, to, output, pretty)?;
        }
    }

    Ok(())
}

fn load_struct(schema: &Path) -> anyhow::Result<DynamicStruct> {
    let doc = SchemaDocument::from_file(schema)?;
    let builder = doc.into_builder()?;
    builder.build().map_err(|err| {
        for (idx, diag) in err.errors().iter().enumerate() {
            eprintln!("  {}. [ERROR] {}", idx + 1, diag);
        }
        anyhow::anyhow!(
            "Schema {} rejected with {} error(s)",
            schema.display(),
            err.errors().len()
        )
    })
}

fn cmd_validate(schema: &Path) -> anyhow::Result<()> {
    let ds = load_struct(schema)?;
    println!(
        "[OK] Schema validation passed: {} ({} fields)",
        schema.display(),
        ds.len()
    );
    Ok(())
}

fn cmd_describe(schema: &Path, yaml: bool) -> anyhow::Result<()> {
    let ds = load_struct(schema)?;

    if yaml {
        print!("{}", SchemaDocument::from_descriptor(&ds).to_yaml()?);
        return Ok(());
    }

    let name_width = ds.fields().iter().map(|f| f.name().len()).max().unwrap_or(0);
    let kind_width = ds
        .fields()
        .iter()
        .map(|f| f.kind().to_string().len())
        .max()
        .unwrap_or(0);

    println!("{} ({} fields)", schema.display(), ds.len());
    for (idx, field) in ds.fields().iter().enumerate() {
        let line = format!(
            "  {:>2}. {:<name_width$}  {:<kind_width$}  {}",
            idx + 1,
            field.name(),
            field.kind().to_string(),
            field.tag()
        );
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn cmd_convert(
    schema: &Path,
    input: &Path,
    from: Option<DataFormat>,
    to: Option<DataFormat>,
    output: Option<PathBuf>,
    pretty: bool,
) -> anyhow::Result<()> {
    let ds = load_struct(schema)?;

    let from = match from {
        Some(fmt) => fmt,
        None => DataFormat::detect(input).with_context(|| {
            format!(
                "Cannot detect format of {}. Use --from to specify it.",
                input.display()
            )
        })?,
    };
    let to = to.unwrap_or(from);
    log::debug!("converting {} from {:?} to {:?}", input.display(), from, to);

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let instance = from
        .decode(&ds, &content)
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    let mut encoded = to.encode(&instance, pretty)?;
    if !encoded.ends_with('\n') {
        encoded.push('\n');
    }

    if let Some(out_path) = output {
        std::fs::write(&out_path, &encoded)?;
        println!("[OK] Written to: {}", out_path.display());
    } else {
        print!("{encoded}");
    }

    Ok(())
}
