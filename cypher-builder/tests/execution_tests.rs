//! Integration tests for statement execution
//!
//! Uses `RecordingConnection` as the execution collaborator to check which
//! execution path a statement takes, what text reaches the connection, and
//! how single-value fetches behave.

use cypher_builder::connection::recording::ExecutionMode;
use cypher_builder::{
    presets, props, Connection, ConnectionProvider, ConnectionSettings, Error, Execution,
    Projection, QueryBuilder, RecordingConnection, Result, Row, Value,
};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup() -> (Arc<RecordingConnection>, QueryBuilder) {
    init_logging();
    let connection = Arc::new(RecordingConnection::new());
    let builder = QueryBuilder::new(connection.clone());
    (connection, builder)
}

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_return_streams_rows() {
    let (connection, mut query) = setup();
    connection.push_rows(vec![
        row(&[("n.name", Value::from("Ann"))]),
        row(&[("n.name", Value::from("Bob"))]),
    ]);

    query
        .match_()
        .node("Person", Some("n"), props! {})
        .unwrap()
        .where_("n.age", ">", 30)
        .unwrap()
        .return_([("n.name", "")]);

    let rows: Vec<Row> = query
        .execute()
        .unwrap()
        .into_rows()
        .expect("RETURN statements fetch rows")
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["n.name"], Value::from("Bob"));

    let statement = connection.last_statement().unwrap();
    assert_eq!(statement.mode, ExecutionMode::Fetch);
    assert_eq!(
        statement.query.trim(),
        "MATCH (n:Person) WHERE n.age > 30 RETURN n.name"
    );
}

#[test]
fn test_statement_without_return_is_fire_and_forget() {
    let (connection, mut query) = setup();
    query
        .create()
        .node("X", Some("a"), props! {})
        .unwrap()
        .to("REL", true, None, props! {})
        .unwrap()
        .node("Y", Some("b"), props! {})
        .unwrap();

    let outcome = query.execute().unwrap();
    assert!(matches!(outcome, Execution::Completed));
    assert!(!outcome.is_rows());

    let statement = connection.last_statement().unwrap();
    assert_eq!(statement.mode, ExecutionMode::Execute);
    assert_eq!(statement.query.trim(), "CREATE (a:X)-[:REL]->(b:Y)");
}

#[test]
fn test_result_mode_is_sticky() {
    let (connection, mut query) = setup();
    query.match_().node("", Some("n"), props! {}).unwrap();
    assert!(!query.fetches_results());

    query.with(Projection::all());
    assert!(!query.fetches_results());

    query.return_([("n", "")]);
    assert!(query.fetches_results());

    query.order_by("n.name").limit(3).add_custom_cypher(" ");
    assert!(query.fetches_results());

    assert!(query.execute().unwrap().is_rows());
    assert_eq!(connection.last_statement().unwrap().mode, ExecutionMode::Fetch);
}

#[test]
fn test_custom_cypher_return_fetches() {
    let (connection, mut query) = setup();
    query.add_custom_cypher("MATCH (n) RETURN n LIMIT 1");
    assert!(query.fetches_results());

    query.execute().unwrap();
    assert_eq!(connection.last_statement().unwrap().mode, ExecutionMode::Fetch);
}

#[test]
fn test_get_single_returns_first_row_value() {
    let (connection, mut query) = setup();
    connection.push_rows(vec![
        row(&[("count", Value::from(7))]),
        row(&[("count", Value::from(8))]),
    ]);

    query
        .match_()
        .node("", Some("n"), props! {})
        .unwrap()
        .return_([("count(n)", "count")]);

    let value = query.get_single("count").unwrap();
    assert_eq!(value, Some(Value::Integer(7)));
    // only the first row is pulled
    assert_eq!(connection.rows_pulled(), 1);
}

#[test]
fn test_get_single_with_zero_rows_is_absent() {
    let (connection, mut query) = setup();
    connection.push_rows(Vec::new());

    // no RETURN: get_single still streams
    query.match_().node("Nothing", Some("n"), props! {}).unwrap();

    assert_eq!(query.get_single("n").unwrap(), None);
    assert_eq!(connection.last_statement().unwrap().mode, ExecutionMode::Fetch);
}

#[test]
fn test_get_single_missing_field_is_absent() {
    let (connection, query) = setup();
    connection.push_rows(vec![row(&[("a", Value::from(1))])]);
    assert_eq!(query.get_single("b").unwrap(), None);
}

#[test]
fn test_collaborator_errors_propagate_unchanged() {
    let (connection, mut query) = setup();
    query.create().node("X", None, props! {}).unwrap();

    connection.push_failure("constraint violated");
    let err = query.execute().unwrap_err();
    assert!(matches!(err, Error::Execution(ref m) if m == "constraint violated"));

    connection.push_failure("connection reset");
    let err = query.get_single("x").unwrap_err();
    assert!(matches!(err, Error::Execution(ref m) if m == "connection reset"));
}

#[test]
fn test_execute_is_repeatable() {
    let (connection, mut query) = setup();
    query.create().node("X", Some("x"), props! {}).unwrap();

    query.execute().unwrap();
    query.execute().unwrap();

    let statements = connection.statements();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0], statements[1]);
}

#[test]
fn test_presets_share_the_connection() {
    init_logging();
    let connection = Arc::new(RecordingConnection::new());
    let mut query = presets::merge(connection.clone());
    query
        .node("City", Some("c"), props! { "name" => "Split" })
        .unwrap();

    query.execute().unwrap();
    assert_eq!(
        connection.last_statement().unwrap().query.trim(),
        "MERGE (c:City {name: 'Split'})"
    );
}

struct FixedProvider {
    connection: Arc<RecordingConnection>,
}

impl ConnectionProvider for FixedProvider {
    fn connect(&self, settings: &ConnectionSettings) -> Result<Arc<dyn Connection>> {
        if settings.port == 0 {
            return Err(Error::Connection(format!("cannot reach {}", settings.address())));
        }
        Ok(self.connection.clone())
    }
}

#[test]
fn test_builder_from_provider() {
    init_logging();
    let connection = Arc::new(RecordingConnection::new());
    let provider = FixedProvider {
        connection: connection.clone(),
    };

    let mut query = QueryBuilder::with_settings(&provider, &ConnectionSettings::default()).unwrap();
    query.create().node("X", None, props! {}).unwrap();
    query.execute().unwrap();
    assert_eq!(connection.statements().len(), 1);

    let unreachable = ConnectionSettings {
        port: 0,
        ..ConnectionSettings::default()
    };
    let err = QueryBuilder::with_settings(&provider, &unreachable).unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
}
