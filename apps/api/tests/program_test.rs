//! Integration tests for the program resolvers
//!
//! Covers reference checks, publication and relation fields resolved
//! through the request loaders.

mod common;

use common::*;

#[test_log::test(tokio::test)]
async fn test_program_with_deleted_campus_is_rejected() {
    let api = TestApi::new();
    let campus = create_named(&api, "Campus", "campus_input", "Old Campus").await;
    delete_named(&api, "Campus", &campus).await;

    let failure = api
        .error(&format!(
            r#"mutation {{ CreateProgram(program_input: {{ name: "Physics", campus_id: "{campus}" }}) {{ _id }} }}"#
        ))
        .await;
    assert_eq!(failure.code, "REFERENCE_NOT_FOUND");
    assert_eq!(failure.field.as_deref(), Some("campus_id"));
    assert_eq!(failure.id.as_deref(), Some(campus.as_str()));
    assert!(failure.message.contains(&campus));
}

#[test_log::test(tokio::test)]
async fn test_program_reference_to_unknown_row_is_rejected() {
    let api = TestApi::new();
    let program = create_program(&api, "Biology", "").await;
    let level = create_named(&api, "Level", "level_input", "Bachelor").await;

    // A level id does not name a school
    let failure = api
        .error(&format!(
            r#"mutation {{ UpdateProgram(_id: "{program}", program_input: {{ level_id: "{level}", school_id: "{level}" }}) {{ _id }} }}"#
        ))
        .await;
    assert_eq!(failure.code, "REFERENCE_NOT_FOUND");
    assert_eq!(failure.field.as_deref(), Some("school_id"));
}

#[test_log::test(tokio::test)]
async fn test_publish_and_unpublish() {
    let api = TestApi::new();
    let id = create_program(&api, "Chemistry", "").await;

    let data = api
        .data(&format!(r#"{{ GetOneProgram(_id: "{id}") {{ publish_status }} }}"#))
        .await;
    assert_eq!(data["GetOneProgram"]["publish_status"], "not_published");

    let data = api
        .data(&format!(
            r#"mutation {{ PublishProgram(_id: "{id}") {{ publish_status }} }}"#
        ))
        .await;
    assert_eq!(data["PublishProgram"]["publish_status"], "published");

    let data = api
        .data(&format!(
            r#"mutation {{ UnpublishProgram(_id: "{id}") {{ publish_status }} }}"#
        ))
        .await;
    assert_eq!(data["UnpublishProgram"]["publish_status"], "not_published");
}

#[test_log::test(tokio::test)]
async fn test_deleted_program_cannot_be_published() {
    let api = TestApi::new();
    let id = create_program(&api, "History", "").await;
    api.data(&format!(r#"mutation {{ DeleteProgram(_id: "{id}") {{ _id }} }}"#))
        .await;

    let failure = api
        .error(&format!(r#"mutation {{ PublishProgram(_id: "{id}") {{ _id }} }}"#))
        .await;
    assert_eq!(failure.code, "NOT_FOUND");
}

#[test_log::test(tokio::test)]
async fn test_relations_resolve_through_loaders() {
    let api = TestApi::new();
    let campus = create_named(&api, "Campus", "campus_input", "North").await;
    let level = create_named(&api, "Level", "level_input", "Master").await;
    let season = create_named(&api, "ScholarSeason", "scholar_season_input", "2024-2025").await;

    create_program(
        &api,
        "Robotics",
        &format!(r#", campus_id: "{campus}", level_id: "{level}", scholar_season_id: "{season}""#),
    )
    .await;
    create_program(&api, "Optics", &format!(r#", campus_id: "{campus}""#)).await;

    let data = api
        .data(
            r#"{ GetAllPrograms(sort: { name: -1 }) {
                name campus_id
                campus { name } level { name } scholar_season { name } school { name }
            } }"#,
        )
        .await;
    let programs = data["GetAllPrograms"].as_array().unwrap();
    assert_eq!(programs.len(), 2);

    assert_eq!(programs[0]["name"], "Robotics");
    assert_eq!(programs[0]["campus_id"], campus.as_str());
    assert_eq!(programs[0]["campus"]["name"], "North");
    assert_eq!(programs[0]["level"]["name"], "Master");
    assert_eq!(programs[0]["scholar_season"]["name"], "2024-2025");
    assert!(programs[0]["school"].is_null());

    assert_eq!(programs[1]["name"], "Optics");
    assert_eq!(programs[1]["campus"]["name"], "North");
    assert!(programs[1]["level"].is_null());
}

#[test_log::test(tokio::test)]
async fn test_relation_to_later_deleted_row_still_resolves() {
    let api = TestApi::new();
    let campus = create_named(&api, "Campus", "campus_input", "Harbor").await;
    let id = create_program(&api, "Oceanography", &format!(r#", campus_id: "{campus}""#)).await;
    delete_named(&api, "Campus", &campus).await;

    let data = api
        .data(&format!(
            r#"{{ GetOneProgram(_id: "{id}") {{ campus {{ name status }} }} }}"#
        ))
        .await;
    assert_eq!(data["GetOneProgram"]["campus"]["name"], "Harbor");
    assert_eq!(data["GetOneProgram"]["campus"]["status"], "deleted");
}

#[test_log::test(tokio::test)]
async fn test_program_sort_by_publish_status() {
    let api = TestApi::new();
    let published = create_program(&api, "Astronomy", "").await;
    create_program(&api, "Botany", "").await;
    api.data(&format!(
        r#"mutation {{ PublishProgram(_id: "{published}") {{ _id }} }}"#
    ))
    .await;

    let data = api
        .data(r#"{ GetAllPrograms(sort: { publishStatus: -1 }) { name publish_status } }"#)
        .await;
    assert_eq!(data["GetAllPrograms"][0]["publish_status"], "published");
    assert_eq!(data["GetAllPrograms"][1]["publish_status"], "not_published");
}

#[test_log::test(tokio::test)]
async fn test_duplicate_program_name_is_rejected() {
    let api = TestApi::new();
    create_program(&api, "Philosophy", "").await;

    let failure = api
        .error(r#"mutation { CreateProgram(program_input: { name: " PHILOSOPHY " }) { _id } }"#)
        .await;
    assert_eq!(failure.code, "DUPLICATE_NAME");
}
