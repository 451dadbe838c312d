//! jsonld-writer: command-line converter from Turtle / N-Triples to compacted JSON-LD

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use jsonld_writer::{
    JsonLdWriter, PrefixTable, RdfFormat, RdfParser, RdfStore, WriterOptions, STANDARD_PREFIXES,
};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonld-writer", version, about = "Convert RDF graphs to compacted JSON-LD")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Turtle or N-Triples file to JSON-LD on stdout
    Convert(ConvertArgs),
    /// List the known RDF formats
    Formats,
    /// List the standard prefixes
    Prefixes,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input file, or `-` for stdin
    input: PathBuf,

    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<RdfFormat>,

    /// Base IRI for relative IRIs in Turtle input
    #[arg(long)]
    base: Option<String>,

    /// Extra prefix, repeatable
    #[arg(long = "prefix", value_name = "NAME=IRI", value_parser = parse_prefix)]
    prefixes: Vec<(String, String)>,

    /// Also abbreviate with the standard vocabulary prefixes
    #[arg(long)]
    standard_prefixes: bool,

    /// Keep blank node labels from the input
    #[arg(long)]
    keep_bnodes: bool,

    /// Always emit property values as arrays
    #[arg(long)]
    no_compact_arrays: bool,

    /// Emit canonical booleans and integers as JSON values
    #[arg(long)]
    native_types: bool,

    /// YAML writer options; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Single-line output
    #[arg(long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(&args),
        Commands::Formats => run_formats(),
        Commands::Prefixes => run_prefixes(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let (input, format) = read_input(args)?;
    let mut options = build_options(args)?;

    let (triples, declared) = RdfParser::parse_with_prefixes(&input, format, args.base.as_deref())
        .with_context(|| format!("parsing {}", args.input.display()))?;
    adopt_declared_prefixes(&mut options, declared);

    let store: RdfStore = triples.into_iter().collect();
    debug!("Loaded {} triples", store.len());

    let writer = JsonLdWriter::new(options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writer.write_to(&store, &mut out, !args.compact)?;
    writeln!(out)?;
    Ok(())
}

fn read_input(args: &ConvertArgs) -> anyhow::Result<(String, RdfFormat)> {
    if args.input.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok((input, args.format.unwrap_or(RdfFormat::Turtle)));
    }

    let format = match args.format.or_else(|| RdfFormat::from_path(&args.input)) {
        Some(format) => format,
        None => bail!(
            "cannot tell the format of {}; pass --format",
            args.input.display()
        ),
    };
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    Ok((input, format))
}

fn build_options(args: &ConvertArgs) -> anyhow::Result<WriterOptions> {
    let mut options = match &args.config {
        Some(path) => WriterOptions::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WriterOptions::default(),
    };

    for (name, iri) in &args.prefixes {
        options.prefixes.insert(name.clone(), iri.clone());
    }
    if args.standard_prefixes {
        options.standard_prefixes = true;
    }
    if args.keep_bnodes {
        options.rename_bnodes = false;
    }
    if args.no_compact_arrays {
        options.compact_arrays = false;
    }
    if args.native_types {
        options.use_native_types = true;
    }
    Ok(options)
}

/// Prefixes declared by the input document, unless already configured
fn adopt_declared_prefixes(options: &mut WriterOptions, declared: Vec<(String, String)>) {
    for (name, iri) in declared {
        if options.prefixes.contains_key(&name) {
            continue;
        }
        if let Err(e) = PrefixTable::new().insert(name.as_str(), iri.as_str()) {
            warn!("Ignoring declared prefix {}: {}", name, e);
            continue;
        }
        options.prefixes.insert(name, iri);
    }
}

fn run_formats() -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Format", "Extensions", "Media types", "Read", "Write"]);

    for format in RdfFormat::ALL {
        table.add_row(vec![
            format.name().to_string(),
            format.extensions().join(", "),
            format.media_types().join(", "),
            yes_no(format.is_readable()).to_string(),
            yes_no(true).to_string(),
        ]);
    }

    println!("{}", table);
    Ok(())
}

fn run_prefixes() -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Prefix", "Namespace"]);

    for (prefix, iri) in STANDARD_PREFIXES {
        table.add_row(vec![*prefix, *iri]);
    }

    println!("{}", table);
    println!("{} prefix(es)", STANDARD_PREFIXES.len());
    Ok(())
}

fn parse_format(s: &str) -> Result<RdfFormat, String> {
    RdfFormat::from_name(s).ok_or_else(|| format!("unknown format `{}`", s))
}

fn parse_prefix(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, iri)) if !iri.is_empty() => Ok((name.to_string(), iri.to_string())),
        _ => Err(format!("expected NAME=IRI, got `{}`", s)),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
