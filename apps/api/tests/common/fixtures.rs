//! Test fixtures for API integration tests
//!
//! Helpers that create rows through the GraphQL API and return their ids.

#![allow(dead_code)]

use super::helpers::TestApi;

/// Create a name-only entity, e.g. `create_named(&api, "Campus", "campus_input", "North")`
pub async fn create_named(api: &TestApi, entity: &str, input_arg: &str, name: &str) -> String {
    let query = format!(
        r#"mutation {{ Create{entity}({input_arg}: {{ name: "{name}" }}) {{ _id }} }}"#
    );
    let data = api.data(&query).await;
    data[format!("Create{entity}")]["_id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Soft-delete a name-only entity
pub async fn delete_named(api: &TestApi, entity: &str, id: &str) {
    let query = format!(r#"mutation {{ Delete{entity}(_id: "{id}") {{ _id status }} }}"#);
    let data = api.data(&query).await;
    assert_eq!(data[format!("Delete{entity}")]["status"], "deleted");
}

/// Create a program with the given extra input fields, e.g. `campus_id: "..."`
pub async fn create_program(api: &TestApi, name: &str, references: &str) -> String {
    let query = format!(
        r#"mutation {{ CreateProgram(program_input: {{ name: "{name}" {references} }}) {{ _id }} }}"#
    );
    let data = api.data(&query).await;
    data["CreateProgram"]["_id"].as_str().unwrap().to_string()
}
