//! SQL Syntax Tests
//!
//! Feeds rendered batch scripts through `sqlparser` to check that quoting
//! holds up: embedded quotes are doubled, every statement parses, and
//! string literals come back out of the tokenizer unchanged.

use sqlparser::dialect::{GenericDialect, SQLiteDialect};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::io::Cursor;
use wells_import::sample::example_csv;
use wells_import::sql::{render_insert, COLUMNS};
use wells_import::{ImportConfig, ImportPipeline, InputFormat, MemorySink, Meridian, RecordSource, WellRecord};

fn record_named(name: &str) -> WellRecord {
    WellRecord {
        api_number: "35-051-24153".to_string(),
        well_name: Some(name.to_string()),
        well_number: None,
        county: Some(String::new()),
        operator: Some("O'Brien & Sons' Oil".to_string()),
        well_type: None,
        well_status: None,
        section: 7,
        township: "9N".to_string(),
        range: "5W".to_string(),
        meridian: Meridian::CM,
        latitude: Some(35.5),
        longitude: Some(-97.25),
        spud_date: None,
        completion_date: None,
    }
}

fn string_literals(sql: &str) -> Vec<String> {
    let dialect = GenericDialect {};
    Tokenizer::new(&dialect, sql)
        .tokenize()
        .expect("rendered SQL should tokenize")
        .into_iter()
        .filter_map(|t| match t {
            Token::SingleQuotedString(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[test]
fn embedded_quotes_are_doubled_and_tokenize_back() {
    let name = "Smith's \"Lucky\" 1-12, North";
    let sql = render_insert("wells", &record_named(name));

    assert!(sql.contains("'Smith''s \"Lucky\" 1-12, North'"));

    let literals = string_literals(&sql);
    assert!(literals.contains(&name.to_string()));
    assert!(literals.contains(&"O'Brien & Sons' Oil".to_string()));
    assert!(literals.contains(&String::new()));
}

#[test]
fn insert_parses_as_single_statement() {
    let sql = render_insert("wells", &record_named("''''"));
    let statements = Parser::parse_sql(&SQLiteDialect {}, &sql).expect("INSERT should parse");
    assert_eq!(statements.len(), 1);
    assert!(statements[0].to_string().starts_with("INSERT INTO wells"));
}

#[test]
fn column_and_value_counts_match() {
    let sql = render_insert("wells", &record_named("x"));
    let dialect = GenericDialect {};
    let tokens = Tokenizer::new(&dialect, &sql).tokenize().unwrap();

    // Top-level commas inside the two parenthesized lists
    let mut depth = 0;
    let mut list_commas = Vec::new();
    let mut commas = 0;
    for token in tokens {
        match token {
            Token::LParen => {
                depth += 1;
                commas = 0;
            }
            Token::RParen => {
                depth -= 1;
                list_commas.push(commas);
            }
            Token::Comma if depth == 1 => commas += 1,
            _ => {}
        }
    }
    assert_eq!(list_commas, vec![COLUMNS.len() - 1, COLUMNS.len() - 1]);
}

#[test]
fn whole_batch_script_parses() {
    let source = RecordSource::from_reader(InputFormat::Csv, Cursor::new(example_csv().unwrap())).unwrap();
    let mut sink = MemorySink::new();
    let summary = ImportPipeline::new(ImportConfig::default())
        .run(source, &mut sink)
        .unwrap();

    let (_, script) = &sink.batches()[0];
    let statements = Parser::parse_sql(&GenericDialect {}, script).expect("batch should parse");

    // BEGIN + one INSERT per accepted record + COMMIT
    assert_eq!(statements.len(), summary.accepted + 2);
    assert!(statements.last().unwrap().to_string().starts_with("COMMIT"));
    assert!(statements[1..=summary.accepted]
        .iter()
        .all(|s| s.to_string().starts_with("INSERT INTO wells")));
}
