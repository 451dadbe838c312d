//! Turtle and N-Triples implementation

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Turtle / N-Triples parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse Turtle string to Triples, resolving relative IRIs against `base`
    pub fn parse(input: &str, base: Option<&str>) -> ParseResult<Vec<Triple>> {
        Self::parse_with_prefixes(input, base).map(|(triples, _)| triples)
    }

    /// Parse Turtle string to Triples plus its `@prefix` declarations, sorted by name
    pub fn parse_with_prefixes(
        input: &str,
        base: Option<&str>,
    ) -> ParseResult<(Vec<Triple>, Vec<(String, String)>)> {
        let base = match base {
            Some(iri) => Some(
                Iri::parse(iri.to_owned())
                    .map_err(|e| ParseError::InvalidBase(format!("{}: {}", iri, e)))?,
            ),
            None => None,
        };
        let reader = BufReader::new(Cursor::new(input));
        let mut parser = TurtleParser::new(reader, base);
        let triples = collect(&mut parser)?;

        let mut prefixes: Vec<(String, String)> = parser
            .prefixes()
            .iter()
            .map(|(name, iri)| (name.clone(), iri.clone()))
            .collect();
        prefixes.sort();
        Ok((triples, prefixes))
    }

    /// Parse N-Triples string to Triples
    pub fn parse_ntriples(input: &str) -> ParseResult<Vec<Triple>> {
        let reader = BufReader::new(Cursor::new(input));
        collect(&mut NTriplesParser::new(reader))
    }
}

fn collect<P>(parser: &mut P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();
    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        let subject = convert_subject(t.subject).map_err(invalid_data)?;
        let predicate = convert_predicate(t.predicate).map_err(invalid_data)?;
        let object = convert_object(t.object).map_err(invalid_data)?;

        triples.push(Triple::new(subject, predicate, object));
        Ok(())
    });

    match res {
        Ok(()) => Ok(triples),
        Err(e) => Err(ParseError::Parse(e.to_string())),
    }
}

fn invalid_data(e: ParseError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
}

/// Turtle / N-Triples serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = TurtleFormatter::new(Vec::new());
        for triple in triples {
            formatter.format(&to_rio(triple)).map_err(format_error)?;
        }
        let output = formatter.finish().map_err(format_error)?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize Triples to N-Triples string, one statement per line
    pub fn serialize_ntriples(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = NTriplesFormatter::new(Vec::new());
        for triple in triples {
            formatter.format(&to_rio(triple)).map_err(format_error)?;
        }
        let output = formatter.finish().map_err(format_error)?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

fn format_error(e: std::io::Error) -> SerializeError {
    SerializeError::Serialize(e.to_string())
}

fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(match l.language() {
            Some(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            None if l.datatype_iri() == XSD_STRING => model::Literal::Simple { value: l.value() },
            None => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode {
                    iri: l.datatype_iri(),
                },
            },
        }),
    };

    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

fn convert_subject(s: model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: model::Term) -> Result<RdfObject, ParseError> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            ))
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
