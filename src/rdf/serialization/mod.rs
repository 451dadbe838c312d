//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL), read and write
//! - N-Triples (NT), read and write
//! - JSON-LD, write only (compacted, see [`jsonld`])

pub mod jsonld;
mod turtle;

use super::{RdfStore, Triple};
use jsonld::{JsonLdError, JsonLdWriter, WriterOptions};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    /// Every known format
    pub const ALL: [RdfFormat; 3] = [RdfFormat::Turtle, RdfFormat::NTriples, RdfFormat::JsonLd];

    /// Canonical short name
    pub fn name(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
            RdfFormat::JsonLd => "jsonld",
        }
    }

    /// File extensions, preferred one first
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            RdfFormat::Turtle => &["ttl"],
            RdfFormat::NTriples => &["nt"],
            RdfFormat::JsonLd => &["jsonld"],
        }
    }

    /// Media types, preferred one first
    pub fn media_types(&self) -> &'static [&'static str] {
        match self {
            RdfFormat::Turtle => &["text/turtle"],
            RdfFormat::NTriples => &["application/n-triples"],
            RdfFormat::JsonLd => &["application/ld+json", "application/x-ld+json"],
        }
    }

    /// Whether [`RdfParser`] can read this format
    pub fn is_readable(&self) -> bool {
        !matches!(self, RdfFormat::JsonLd)
    }

    /// Look a format up by name (`turtle`, `ttl`, `n-triples`, `json-ld`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Some(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Some(RdfFormat::NTriples),
            "jsonld" | "json-ld" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }

    /// Look a format up by file extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&extension.as_str()))
    }

    /// Look a format up by the extension of `path`
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Look a format up by media type; parameters such as `charset` are ignored
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.media_types().contains(&essence.as_str()))
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base IRI is not an absolute IRI
    #[error("Invalid base IRI {0}")]
    InvalidBase(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(RdfFormat),

    /// File extension names no known format
    #[error("Cannot tell the format of {0}")]
    UnknownFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// JSON-LD writer error
    #[error(transparent)]
    JsonLd(#[from] JsonLdError),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    ///
    /// `base` resolves relative IRIs in Turtle; N-Triples only has absolute IRIs.
    pub fn parse(input: &str, format: RdfFormat, base: Option<&str>) -> ParseResult<Vec<Triple>> {
        let triples = match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input, base)?,
            RdfFormat::NTriples => TurtleParserWrapper::parse_ntriples(input)?,
            RdfFormat::JsonLd => return Err(ParseError::UnsupportedFormat(format)),
        };
        debug!("Parsed {} triples as {}", triples.len(), format);
        Ok(triples)
    }

    /// Like [`parse`](Self::parse), also returning the document's prefix
    /// declarations (only Turtle has any)
    pub fn parse_with_prefixes(
        input: &str,
        format: RdfFormat,
        base: Option<&str>,
    ) -> ParseResult<(Vec<Triple>, Vec<(String, String)>)> {
        match format {
            RdfFormat::Turtle => {
                let (triples, prefixes) = TurtleParserWrapper::parse_with_prefixes(input, base)?;
                debug!(
                    "Parsed {} triples and {} prefixes as {}",
                    triples.len(),
                    prefixes.len(),
                    format
                );
                Ok((triples, prefixes))
            }
            _ => Ok((Self::parse(input, format, base)?, Vec::new())),
        }
    }

    /// Parse RDF data from a file, guessing the format from its extension
    pub fn parse_file(path: &Path, base: Option<&str>) -> ParseResult<Vec<Triple>> {
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| ParseError::UnknownFormat(path.display().to_string()))?;
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input, format, base)
    }

    /// Parse RDF data straight into a store
    pub fn parse_into(
        store: &mut RdfStore,
        input: &str,
        format: RdfFormat,
        base: Option<&str>,
    ) -> ParseResult<usize> {
        let before = store.len();
        store.extend(Self::parse(input, format, base)?);
        Ok(store.len() - before)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    ///
    /// JSON-LD uses the default [`WriterOptions`]; build a [`JsonLdWriter`]
    /// directly for anything else.
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(triples),
            RdfFormat::NTriples => TurtleSerializerWrapper::serialize_ntriples(triples),
            // group by subject once instead of rescanning the slice per subject
            RdfFormat::JsonLd => Self::json_ld(&triples.iter().cloned().collect::<RdfStore>()),
        }
    }

    /// Serialize RDF store to a string
    pub fn serialize_store(store: &RdfStore, format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::JsonLd => Self::json_ld(store),
            _ => {
                let triples: Vec<Triple> = store.iter().cloned().collect();
                Self::serialize(&triples, format)
            }
        }
    }

    /// Serialize triples to a file
    pub fn serialize_file(triples: &[Triple], path: &Path, format: RdfFormat) -> SerializeResult<()> {
        let output = Self::serialize(triples, format)?;
        std::fs::write(path, output)?;
        Ok(())
    }

    fn json_ld(store: &RdfStore) -> SerializeResult<String> {
        let writer = JsonLdWriter::new(WriterOptions::default())?;
        Ok(writer.to_string_pretty(store)?)
    }
}
