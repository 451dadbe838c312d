use jsonld_writer::rdf::{
    JsonLdWriter, PrefixTable, PropertyIndex, RdfFormat, RdfParser, RdfStore, Triple,
    WriterOptions,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::io::Write;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

fn load(format: RdfFormat, input: &str) -> RdfStore {
    RdfParser::parse(input, format, None)
        .unwrap()
        .into_iter()
        .collect()
}

fn turtle(input: &str) -> RdfStore {
    load(RdfFormat::Turtle, input)
}

fn writer(options: WriterOptions) -> JsonLdWriter {
    JsonLdWriter::new(options).unwrap()
}

// Minimal JSON-LD expansion, enough to read back what the writer produces.

fn context_table(doc: &Value) -> PrefixTable {
    let mut table = PrefixTable::new();
    if let Some(Value::Object(context)) = doc.get("@context") {
        for (name, iri) in context {
            table.insert(name.as_str(), iri.as_str().unwrap()).unwrap();
        }
    }
    table
}

fn expand_iri(table: &PrefixTable, term: &str) -> String {
    table.expand(term).unwrap_or_else(|_| term.to_string())
}

fn node_term(table: &PrefixTable, id: &str) -> String {
    if id.starts_with("_:") {
        id.to_string()
    } else {
        format!("<{}>", expand_iri(table, id))
    }
}

fn value_term(table: &PrefixTable, value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Bool(b) => format!("\"{}\"^^<{}boolean>", b, XSD),
        Value::Number(n) => format!("\"{}\"^^<{}integer>", n, XSD),
        Value::Object(o) => {
            if let Some(id) = o.get("@id") {
                return node_term(table, id.as_str().unwrap());
            }
            let lexical = o["@value"].as_str().unwrap();
            match o.get("@language") {
                Some(language) => format!("\"{}\"@{}", lexical, language.as_str().unwrap()),
                None => format!(
                    "\"{}\"^^<{}>",
                    lexical,
                    expand_iri(table, o["@type"].as_str().unwrap())
                ),
            }
        }
        other => panic!("unexpected property value {}", other),
    }
}

fn nodes(doc: &Value) -> Vec<&Map<String, Value>> {
    match doc.get("@graph") {
        Some(Value::Array(nodes)) => nodes.iter().map(|n| n.as_object().unwrap()).collect(),
        _ => vec![doc.as_object().unwrap()],
    }
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    }
}

/// Statements of `doc`, in N-Triples form
fn expand_document(doc: &Value) -> BTreeSet<String> {
    let table = context_table(doc);
    let mut triples = BTreeSet::new();
    for node in nodes(doc) {
        let subject = node_term(&table, node["@id"].as_str().unwrap());
        for (key, value) in node {
            match key.as_str() {
                "@id" | "@context" => {}
                "@type" => {
                    for ty in as_list(value) {
                        let object = node_term(&table, ty.as_str().unwrap());
                        triples.insert(format!("{} <{}> {} .", subject, RDF_TYPE, object));
                    }
                }
                predicate => {
                    let predicate = expand_iri(&table, predicate);
                    for v in as_list(value) {
                        let object = value_term(&table, v);
                        triples.insert(format!("{} <{}> {} .", subject, predicate, object));
                    }
                }
            }
        }
    }
    triples
}

fn statements(store: &RdfStore) -> BTreeSet<String> {
    store.iter().map(Triple::to_string).collect()
}

fn assert_context_complete(doc: &Value) {
    let table = context_table(doc);
    let check = |term: &str| {
        if !term.starts_with("_:") && !term.contains("://") {
            assert!(table.expand(term).is_ok(), "{} does not expand", term);
        }
    };

    for node in nodes(doc) {
        for (key, value) in node {
            match key.as_str() {
                "@context" => {}
                "@id" => check(value.as_str().unwrap()),
                "@type" => as_list(value).iter().for_each(|t| check(t.as_str().unwrap())),
                predicate => {
                    check(predicate);
                    for v in as_list(value) {
                        if let Some(id) = v.get("@id").and_then(Value::as_str) {
                            check(id);
                        }
                        if let Some(ty) = v.get("@type").and_then(Value::as_str) {
                            check(ty);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_full_uris_without_prefixes() {
    let store = turtle("<http://a/b> <http://a/c> <http://a/d> .");
    let json = writer(WriterOptions::default()).to_string(&store).unwrap();

    assert_eq!(json, r#"{"@id":"http://a/b","http://a/c":[{"@id":"http://a/d"}]}"#);
}

#[test]
fn test_standard_prefix() {
    let store = turtle(
        "<http://xmlns.com/foaf/0.1/b> <http://xmlns.com/foaf/0.1/c> <http://xmlns.com/foaf/0.1/d> .",
    );
    let json = writer(WriterOptions::new().with_standard_prefixes(true))
        .to_string(&store)
        .unwrap();

    assert_eq!(
        json,
        r#"{"@context":{"foaf":"http://xmlns.com/foaf/0.1/"},"@id":"foaf:b","foaf:c":{"@id":"foaf:d"}}"#
    );
}

#[test]
fn test_namespace_itself_is_not_abbreviated() {
    let store = turtle(
        "<http://xmlns.com/foaf/0.1/> <http://xmlns.com/foaf/0.1/c> <http://xmlns.com/foaf/0.1/> .",
    );
    let doc = writer(WriterOptions::new().with_standard_prefixes(true)).serialize(&store);

    assert_eq!(
        doc,
        json!({
            "@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
            "@id": "http://xmlns.com/foaf/0.1/",
            "foaf:c": {"@id": "http://xmlns.com/foaf/0.1/"}
        })
    );
}

#[test]
fn test_prefixes_declared_in_input() {
    let input = r#"
        @prefix senet: <http://senet.org/gm#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        senet:RhythmParadise senet:gameName "Rhythm Paradise"@en ;
            senet:playerCount "1"^^xsd:nonNegativeInteger .
    "#;
    let (triples, declared) = RdfParser::parse_with_prefixes(input, RdfFormat::Turtle, None).unwrap();
    let mut options = WriterOptions::new();
    for (name, iri) in declared {
        options = options.with_prefix(name, iri);
    }
    let store: RdfStore = triples.into_iter().collect();

    let json = writer(options).to_string(&store).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"@context":{"senet":"http://senet.org/gm#","xsd":"http://www.w3.org/2001/XMLSchema#"},"#,
            r#""@id":"senet:RhythmParadise","#,
            r#""senet:gameName":{"@value":"Rhythm Paradise","@language":"en"},"#,
            r#""senet:playerCount":{"@value":"1","@type":"xsd:nonNegativeInteger"}}"#
        )
    );
}

#[test]
fn test_empty_prefix() {
    let store = turtle(r#"<http://example.org/a> <http://xmlns.com/foaf/0.1/name> "A" ."#);
    let options = WriterOptions::new()
        .with_prefix("", "http://example.org/")
        .with_standard_prefixes(true);
    let doc = writer(options).serialize(&store);

    assert_eq!(
        doc,
        json!({
            "@context": {"": "http://example.org/", "foaf": "http://xmlns.com/foaf/0.1/"},
            "@id": ":a",
            "foaf:name": "A"
        })
    );
    // the empty prefix comes first
    assert_eq!(doc["@context"].as_object().unwrap().keys().next().unwrap(), "");
}

#[test]
fn test_registered_empty_prefix_always_in_context() {
    let store = turtle(r#"<http://a/b> <http://a/c> "x" ."#);
    let doc = writer(WriterOptions::new().with_prefix("", "http://example.org/")).serialize(&store);

    assert_eq!(doc["@context"], json!({"": "http://example.org/"}));
    assert_eq!(doc["http://a/c"], json!("x"));
}

#[test]
fn test_unused_prefixes_left_out() {
    let store = turtle(r#"<http://xmlns.com/foaf/0.1/me> <http://xmlns.com/foaf/0.1/name> "Me" ."#);
    let doc = writer(WriterOptions::new().with_standard_prefixes(true)).serialize(&store);

    let context = doc["@context"].as_object().unwrap();
    assert_eq!(context.len(), 1);
    assert!(context.contains_key("foaf"));
}

#[test]
fn test_several_subjects_use_graph() {
    let store = turtle(
        r#"
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
        <http://example.org/alice> a foaf:Person ; foaf:name "Alice" .
        <http://example.org/bob> a foaf:Person, foaf:Agent ;
            foaf:knows <http://example.org/alice> .
        "#,
    );
    let doc = writer(WriterOptions::new().with_standard_prefixes(true)).serialize(&store);

    assert_eq!(
        doc,
        json!({
            "@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
            "@graph": [
                {
                    "@id": "http://example.org/alice",
                    "@type": "foaf:Person",
                    "foaf:name": "Alice"
                },
                {
                    "@id": "http://example.org/bob",
                    "@type": ["foaf:Person", "foaf:Agent"],
                    "foaf:knows": {"@id": "http://example.org/alice"}
                }
            ]
        })
    );
}

#[test]
fn test_illegal_local_part_falls_back_to_full_uri() {
    let store = turtle(
        r#"
        <http://dbpedia.org/resource/%28I_Can%27t_Make_It%29_Another_Day>
            <http://dbpedia.org/ontology/artist> <http://dbpedia.org/resource/Foo,_Bar> .
        "#,
    );
    let options = WriterOptions::new()
        .with_prefix("db", "http://dbpedia.org/resource/")
        .with_prefix("dbo", "http://dbpedia.org/ontology/");
    let doc = writer(options).serialize(&store);

    assert_eq!(doc["@id"], "db:%28I_Can%27t_Make_It%29_Another_Day");
    assert_eq!(
        doc["dbo:artist"],
        json!({"@id": "http://dbpedia.org/resource/Foo,_Bar"})
    );
    assert_context_complete(&doc);
}

#[test]
fn test_full_iri_with_prefix_scheme_round_trips() {
    let store = load(
        RdfFormat::NTriples,
        r#"
<http://example.org/s> <http://example.org/p> "one" .
<http://example.org/s> <ex:p> "two" .
<http://example.org/s> <http://example.org/link> <ex:thing> .
<http://example.org/s> <http://xmlns.com/foaf/0.1/name> "S" .
"#,
    );
    let options = WriterOptions::new()
        .with_standard_prefixes(true)
        .with_prefix("ex", "http://example.org/");
    let doc = writer(options).serialize(&store);

    // ex: would turn <ex:p> into <http://example.org/p>, so it is not used
    assert_eq!(doc["@context"], json!({"foaf": "http://xmlns.com/foaf/0.1/"}));
    assert_eq!(doc["@id"], "http://example.org/s");
    assert_eq!(doc["ex:p"], json!("two"));
    assert_eq!(doc["http://example.org/p"], json!("one"));
    assert_eq!(doc["http://example.org/link"], json!({"@id": "ex:thing"}));
    assert_eq!(expand_document(&doc), statements(&store));
}

#[test]
fn test_owl_restriction_keeps_blank_labels() {
    let input = concat!(
        "<http://wikia.example/Class> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .\n",
        "<http://wikia.example/Class> <http://www.w3.org/2000/01/rdf-schema#subClassOf> _:genid1 .\n",
        "_:genid1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Restriction> .\n",
        "_:genid1 <http://www.w3.org/2002/07/owl#onProperty> <http://wikia.example/prop> .\n",
    );
    let store = load(RdfFormat::NTriples, input);
    let options = WriterOptions::new()
        .with_standard_prefixes(true)
        .with_rename_bnodes(false);
    let doc = writer(options).serialize(&store);

    assert_eq!(
        doc,
        json!({
            "@context": {
                "owl": "http://www.w3.org/2002/07/owl#",
                "rdfs": "http://www.w3.org/2000/01/rdf-schema#"
            },
            "@graph": [
                {
                    "@id": "http://wikia.example/Class",
                    "@type": "owl:Class",
                    "rdfs:subClassOf": {"@id": "_:genid1"}
                },
                {
                    "@id": "_:genid1",
                    "@type": "owl:Restriction",
                    "owl:onProperty": {"@id": "http://wikia.example/prop"}
                }
            ]
        })
    );
    assert_eq!(expand_document(&doc), statements(&store));
}

#[test]
fn test_blank_nodes_renamed_by_default() {
    let input = concat!(
        "_:zzz <http://example.org/next> _:aaa .\n",
        "_:aaa <http://example.org/next> _:zzz .\n",
    );
    let store = load(RdfFormat::NTriples, input);
    let doc = writer(WriterOptions::default()).serialize(&store);

    assert_eq!(
        doc,
        json!({
            "@graph": [
                {"@id": "_:b0", "http://example.org/next": [{"@id": "_:b1"}]},
                {"@id": "_:b1", "http://example.org/next": [{"@id": "_:b0"}]}
            ]
        })
    );
}

#[test]
fn test_empty_graph() {
    let store = RdfStore::new();
    assert_eq!(
        writer(WriterOptions::default()).to_string(&store).unwrap(),
        r#"{"@graph":[]}"#
    );

    let doc = writer(WriterOptions::new().with_prefix("", "http://example.org/")).serialize(&store);
    assert_eq!(doc, json!({"@context": {"": "http://example.org/"}, "@graph": []}));
}

#[test]
fn test_native_types() {
    let store = turtle(
        r#"
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        <http://example.org/s> <http://example.org/flag> "true"^^xsd:boolean ;
            <http://example.org/count> "42"^^xsd:integer ;
            <http://example.org/padded> "042"^^xsd:integer .
        "#,
    );
    let options = WriterOptions::new()
        .with_standard_prefixes(true)
        .with_native_types(true);
    let doc = writer(options).serialize(&store);

    // the non-canonical integer pulls xsd into the context, so arrays compact
    assert_eq!(doc["@context"], json!({"xsd": XSD}));
    assert_eq!(doc["http://example.org/flag"], json!(true));
    assert_eq!(doc["http://example.org/count"], json!(42));
    assert_eq!(
        doc["http://example.org/padded"],
        json!({"@value": "042", "@type": "xsd:integer"})
    );
}

#[test]
fn test_round_trip_and_context_completeness() {
    let store = turtle(
        r#"
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
        @prefix dc: <http://purl.org/dc/terms/> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:doc a foaf:Document ;
            dc:title "Notes"@en, "Notizen"@de ;
            dc:created "2024-01-01"^^xsd:date ;
            foaf:maker ex:alice, _:anon .
        ex:alice a foaf:Person ;
            foaf:name "Alice" ;
            foaf:age "42"^^xsd:integer .
        _:anon foaf:name "Someone" ;
            foaf:homepage <http://elsewhere.example/~someone> .
        "#,
    );
    let options = WriterOptions::new()
        .with_standard_prefixes(true)
        .with_prefix("ex", "http://example.org/")
        .with_rename_bnodes(false);
    let doc = writer(options).serialize(&store);

    assert_context_complete(&doc);
    assert_eq!(expand_document(&doc), statements(&store));
}

#[test]
fn test_round_trip_with_renamed_blank_nodes() {
    let store = turtle(
        r#"
        <http://example.org/a> <http://example.org/p> [ <http://example.org/q> "x" ] .
        "#,
    );
    let doc = writer(WriterOptions::default()).serialize(&store);
    let expanded = expand_document(&doc);

    assert_eq!(expanded.len(), store.len());
    assert!(expanded.contains(r#"<http://example.org/a> <http://example.org/p> _:b0 ."#));
    assert!(expanded.contains(r#"_:b0 <http://example.org/q> "x" ."#));
}

#[test]
fn test_output_is_deterministic() {
    let input = r#"
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
        <http://example.org/b> foaf:knows _:x, <http://example.org/a> ; foaf:name "B" .
        _:x foaf:name "X" .
        <http://example.org/a> a foaf:Person .
    "#;
    let options = WriterOptions::new().with_standard_prefixes(true);
    let writer = writer(options);

    let first = writer.to_string_pretty(&turtle(input)).unwrap();
    let second = writer.to_string_pretty(&turtle(input)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_slices_and_stores_agree() {
    let input = r#"
        <http://example.org/s> <http://example.org/p> "1", "2" .
        <http://example.org/t> <http://example.org/p> <http://example.org/s> .
    "#;
    let triples = RdfParser::parse(input, RdfFormat::Turtle, None).unwrap();
    let store: RdfStore = triples.iter().cloned().collect();
    let writer = writer(WriterOptions::default());

    assert_eq!(writer.serialize(triples.as_slice()), writer.serialize(&store));
}

#[test]
fn test_no_compact_arrays() {
    let store = turtle(r#"<http://xmlns.com/foaf/0.1/me> <http://xmlns.com/foaf/0.1/name> "Me" ."#);
    let options = WriterOptions::new()
        .with_standard_prefixes(true)
        .with_compact_arrays(false);
    let doc = writer(options).serialize(&store);

    assert_eq!(doc["foaf:name"], json!(["Me"]));
}

#[test]
fn test_cached_index_across_calls() {
    let mut store = turtle(r#"<http://example.org/s> <http://example.org/p> "1" ."#);
    let writer = writer(WriterOptions::default());
    let mut index = PropertyIndex::new();

    let before = writer.serialize_cached(&store, &mut index);
    store.extend(turtle(r#"<http://example.org/s> <http://example.org/p> "2" ."#).iter().cloned());

    assert_eq!(writer.serialize_cached(&store, &mut index), before);
    index.clear();
    assert_eq!(
        writer.serialize_cached(&store, &mut index)["http://example.org/p"],
        json!(["1", "2"])
    );
}

#[test]
fn test_options_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "prefixes:").unwrap();
    writeln!(file, "  ex: http://example.org/").unwrap();
    writeln!(file, "compact_arrays: false").unwrap();

    let options = WriterOptions::from_yaml_file(file.path()).unwrap();
    let store = turtle(r#"<http://example.org/s> <http://example.org/p> "v" ."#);
    let doc = writer(options).serialize(&store);

    assert_eq!(
        doc,
        json!({"@context": {"ex": "http://example.org/"}, "@id": "ex:s", "ex:p": ["v"]})
    );
}

#[test]
fn test_write_to_file() {
    let store = turtle("<http://a/b> <http://a/c> <http://a/d> .");
    let writer = writer(WriterOptions::default());
    let mut file = tempfile::NamedTempFile::new().unwrap();

    writer.write_to(&store, file.as_file_mut(), false).unwrap();
    let written = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(written, writer.to_string(&store).unwrap());
}

#[test]
fn test_format_discovery() {
    assert_eq!(RdfFormat::from_path("out.jsonld"), Some(RdfFormat::JsonLd));
    assert_eq!(
        RdfFormat::from_media_type("application/ld+json"),
        Some(RdfFormat::JsonLd)
    );
    assert_eq!(RdfFormat::from_name("jsonld"), Some(RdfFormat::JsonLd));
}
