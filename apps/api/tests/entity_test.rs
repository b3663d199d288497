//! Integration tests for the name-only entity resolvers
//!
//! Runs real GraphQL requests against a schema over the in-memory store.

mod common;

use common::*;

#[tokio::test]
async fn test_create_and_get_one() {
    let api = TestApi::new();
    let id = create_named(&api, "Level", "level_input", "  Master  ").await;

    let data = api
        .data(&format!(
            r#"{{ GetOneLevel(_id: "{id}") {{ _id name status createdAt updatedAt count_document }} }}"#
        ))
        .await;
    let level = &data["GetOneLevel"];
    assert_eq!(level["_id"], id.as_str());
    assert_eq!(level["name"], "Master");
    assert_eq!(level["status"], "active");
    assert_eq!(level["createdAt"], level["updatedAt"]);
    assert!(level["count_document"].is_null());
}

#[tokio::test]
async fn test_duplicate_speciality_name_is_rejected() {
    let api = TestApi::new();
    create_named(&api, "Speciality", "speciality_input", "Engineering").await;

    let failure = api
        .error(r#"mutation { CreateSpeciality(speciality_input: { name: "engineering" }) { _id } }"#)
        .await;
    assert_eq!(failure.code, "DUPLICATE_NAME");
    assert!(failure.message.contains("engineering"));
}

#[tokio::test]
async fn test_rename_onto_existing_school_is_rejected() {
    let api = TestApi::new();
    create_named(&api, "School", "school_input", "Riverside").await;
    let other = create_named(&api, "School", "school_input", "Hillcrest").await;

    let failure = api
        .error(&format!(
            r#"mutation {{ UpdateSchool(_id: "{other}", school_input: {{ name: "RIVERSIDE" }}) {{ _id }} }}"#
        ))
        .await;
    assert_eq!(failure.code, "DUPLICATE_NAME");
}

#[tokio::test]
async fn test_sector_names_may_repeat() {
    let api = TestApi::new();
    let first = create_named(&api, "Sector", "sector_input", "Energy").await;
    let second = create_named(&api, "Sector", "sector_input", "Energy").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_create_without_name_fails() {
    let api = TestApi::new();
    let failure = api
        .error(r#"mutation { CreateCampus(campus_input: {}) { _id } }"#)
        .await;
    assert_eq!(failure.code, "MISSING_FIELD");
}

#[tokio::test]
async fn test_deleted_sector_is_not_found() {
    let api = TestApi::new();
    let id = create_named(&api, "Sector", "sector_input", "Finance").await;
    create_named(&api, "Sector", "sector_input", "Health").await;
    delete_named(&api, "Sector", &id).await;

    let failure = api
        .error(&format!(r#"{{ GetOneSector(_id: "{id}") {{ _id }} }}"#))
        .await;
    assert_eq!(failure.code, "NOT_FOUND");

    let data = api.data("{ GetAllSectors { name } }").await;
    assert_eq!(data["GetAllSectors"], serde_json::json!([{ "name": "Health" }]));

    let failure = api
        .error(&format!(
            r#"mutation {{ UpdateSector(_id: "{id}", sector_input: {{ name: "Banking" }}) {{ _id }} }}"#
        ))
        .await;
    assert_eq!(failure.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_get_all_levels_empty_is_not_found() {
    let api = TestApi::new();
    let failure = api.error("{ GetAllLevels { _id } }").await;
    assert_eq!(failure.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_pagination_reports_total_count() {
    let api = TestApi::new();
    for name in ["Charlie", "Alpha", "Bravo"] {
        create_named(&api, "Campus", "campus_input", name).await;
    }

    let data = api
        .data(
            r#"{ GetAllCampuses(sort: { name: 1 }, pagination: { page: 1, limit: 2 }) { name count_document } }"#,
        )
        .await;
    assert_eq!(
        data["GetAllCampuses"],
        serde_json::json!([{ "name": "Charlie", "count_document": 3 }])
    );

    let failure = api
        .error(r#"{ GetAllCampuses(pagination: { page: 5, limit: 2 }) { name } }"#)
        .await;
    assert_eq!(failure.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_default_order_is_newest_first() {
    let api = TestApi::new();
    for name in ["First", "Second", "Third"] {
        create_named(&api, "ScholarSeason", "scholar_season_input", name).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let data = api.data("{ GetAllScholarSeasons { name } }").await;
    let names: Vec<_> = data["GetAllScholarSeasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_name_filter_is_case_insensitive() {
    let api = TestApi::new();
    for name in ["Software Engineering", "Civil ENGINEERING", "Law"] {
        create_named(&api, "Speciality", "speciality_input", name).await;
    }

    let data = api
        .data(r#"{ GetAllSpecialities(filter: { name: "engineering" }, sort: { name: 1 }) { name } }"#)
        .await;
    assert_eq!(
        data["GetAllSpecialities"],
        serde_json::json!([{ "name": "Civil ENGINEERING" }, { "name": "Software Engineering" }])
    );
}

#[tokio::test]
async fn test_date_filter_covers_today() {
    let api = TestApi::new();
    create_named(&api, "School", "school_input", "Northside").await;
    let today = chrono::Utc::now().format("%Y-%m-%d");

    let data = api
        .data(&format!(
            r#"{{ GetAllSchools(filter: {{ createdAt: {{ from: "{today}", to: "{today}" }} }}) {{ name }} }}"#
        ))
        .await;
    assert_eq!(data["GetAllSchools"][0]["name"], "Northside");
}

#[tokio::test]
async fn test_invalid_arguments_have_codes() {
    let api = TestApi::new();
    create_named(&api, "Level", "level_input", "Bachelor").await;

    let failure = api.error("{ GetAllLevels(sort: { name: 2 }) { _id } }").await;
    assert_eq!(failure.code, "INVALID_SORT");

    let failure = api
        .error("{ GetAllLevels(pagination: { page: 0, limit: 0 }) { _id } }")
        .await;
    assert_eq!(failure.code, "INVALID_PAGINATION");

    let failure = api
        .error(r#"{ GetAllLevels(filter: { createdAt: { from: "2024-02-01", to: "2024-01-01" } }) { _id } }"#)
        .await;
    assert_eq!(failure.code, "INVALID_FILTER");

    let failure = api
        .error(r#"{ GetAllLevels(filter: { name: "   " }) { _id } }"#)
        .await;
    assert_eq!(failure.code, "INVALID_FILTER");

    let failure = api.error(r#"{ GetOneLevel(_id: "not-an-id") { _id } }"#).await;
    assert_eq!(failure.code, "INVALID_ID");
}
