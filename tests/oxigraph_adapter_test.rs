use rdf_entity::{
    Conditions, Connection, ConnectionError, Dialect, EntityError, EntityType, Finder,
    OxigraphConnection,
};
use std::collections::BTreeSet;
use std::sync::Arc;

const JOBS: &str = r#"
    @prefix : <http://x/> .
    @prefix other: <http://other/> .

    :j1 a :Job ; :uuid "u1" ; :status "active" ; :name "build" ; :owner "alice" .
    :j2 a :Job ; :uuid "u2" ; :status "pending" ; :name "test" .
    :j3 a :Job ; :uuid "u3" ; :status "failed" ; :name "deploy" ; other:flag "x" .
    :t1 a :Task ; :uuid "t1" ; :status "active" .
"#;

/// Helper function to create a finder over the sample job data
fn job_finder() -> Finder<OxigraphConnection> {
    let connection = OxigraphConnection::from_turtle(JOBS).unwrap();
    let job = EntityType::new("Job").unwrap().with_namespace("http://x").unwrap();
    Finder::new(connection, Arc::new(job))
}

fn ids(entities: &[rdf_entity::Entity]) -> BTreeSet<String> {
    entities.iter().map(|e| e.id().to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_all_returns_one_entity_per_subject() {
    let finder = job_finder();
    let jobs = finder.all(&Conditions::new()).unwrap();

    assert_eq!(jobs.len(), 3, "Task instances must not be returned");
    assert_eq!(ids(&jobs), set(&["http://x/j1", "http://x/j2", "http://x/j3"]));

    let j1 = jobs.iter().find(|e| e.id() == "http://x/j1").unwrap();
    assert_eq!(j1.get("status").unwrap(), "active");
    assert_eq!(j1.get("owner").unwrap(), "alice");
    assert_eq!(
        j1.attributes().get("http://www.w3.org/1999/02/22-rdf-syntax-ns#type").map(String::as_str),
        Some("http://x/Job")
    );

    let j2 = jobs.iter().find(|e| e.id() == "http://x/j2").unwrap();
    assert_eq!(j2.try_get("owner"), None);
    assert!(matches!(j2.get("owner"), Err(EntityError::UnknownAttribute { .. })));
}

#[test]
fn test_all_with_multi_value_condition() {
    let finder = job_finder();
    let jobs = finder.all(&Conditions::new().with("status", ["active", "pending"])).unwrap();
    assert_eq!(ids(&jobs), set(&["http://x/j1", "http://x/j2"]));
}

#[test]
fn test_all_ignores_blank_conditions() {
    let finder = job_finder();
    let jobs = finder.all(&Conditions::new().with("status", "  ").with("owner", "")).unwrap();
    assert_eq!(jobs.len(), 3);
}

#[test]
fn test_select_projects_requested_attributes() {
    let finder = job_finder();

    let rows = finder.select(&["name"], &Conditions::new().with("status", "active")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "build");

    let rows = finder.select(&["name", "owner"], &Conditions::new()).unwrap();
    assert_eq!(rows.len(), 3);
    let test_row = rows.iter().find(|r| r["name"] == "test").unwrap();
    assert!(!test_row.contains_key("owner"), "unbound OPTIONAL must be absent from the row");
}

#[test]
fn test_count() {
    let finder = job_finder();
    assert_eq!(finder.count(&Conditions::new()).unwrap(), 3);
    assert_eq!(finder.count(&Conditions::new().with("status", "failed")).unwrap(), 1);
    assert_eq!(finder.count(&Conditions::new().with("status", "archived")).unwrap(), 0);
}

#[test]
fn test_count_for_type_without_instances() {
    let connection = OxigraphConnection::from_turtle(JOBS).unwrap();
    let ghost = EntityType::new("Ghost").unwrap().with_namespace("http://x/").unwrap();
    let finder = Finder::new(connection, Arc::new(ghost));
    assert_eq!(finder.count(&Conditions::new()).unwrap(), 0);
    assert!(finder.all(&Conditions::new()).unwrap().is_empty());
}

#[test]
fn test_columns_are_namespace_local() {
    let finder = job_finder();
    let columns: BTreeSet<String> = finder.columns().unwrap().iter().cloned().collect();
    assert_eq!(columns, set(&["name", "owner", "status", "uuid"]));
}

#[test]
fn test_columns_cached_after_first_discovery() {
    let finder = job_finder();
    let first = finder.columns().unwrap().to_vec();

    // New data is not picked up once the columns are cached
    finder.connection().load_turtle("@prefix : <http://x/> . :j9 a :Job ; :priority \"high\" .").unwrap();
    assert_eq!(finder.columns().unwrap(), &first[..]);
    assert!(!first.iter().any(|c| c == "priority"));
}

#[test]
fn test_quoted_value_is_escaped() {
    let connection = OxigraphConnection::from_turtle(
        r#"
        @prefix : <http://x/> .
        :j1 a :Job ; :uuid "1" ; :name "say \"hi\"" .
        :j2 a :Job ; :uuid "2" ; :name "plain" .
        "#,
    )
    .unwrap();
    let job = EntityType::new("Job").unwrap().with_namespace("http://x/").unwrap();
    let finder = Finder::new(connection, Arc::new(job));

    let jobs = finder.all(&Conditions::new().with("name", "say \"hi\"")).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].get("name").unwrap(), "say \"hi\"");

    let injected = finder.count(&Conditions::new().with("name", "x\")) } #")).unwrap();
    assert_eq!(injected, 0);
}

#[test]
fn test_connection_errors_propagate() {
    // Oxigraph does not implement the ARQ LET extension
    let finder = job_finder().with_dialect(Dialect::Arq);
    let err = finder.all(&Conditions::new()).unwrap_err();
    assert!(matches!(err, EntityError::ConnectionError(ConnectionError::Query(_))));
}

#[test]
fn test_fetch_subjects_groups_rows() {
    let connection = OxigraphConnection::from_turtle(JOBS).unwrap();
    let groups = connection
        .fetch_subjects(
            "SELECT ?_subject ?_predicate ?_object WHERE { \
             ?_subject <http://x/uuid> ?u . ?_subject ?_predicate ?_object }",
        )
        .unwrap();
    assert_eq!(groups.len(), 4);
    let t1 = groups.iter().find(|g| g.id == "http://x/t1").unwrap();
    assert_eq!(t1.attributes.get("http://x/status").map(String::as_str), Some("active"));
}
