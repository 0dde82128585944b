//! Integration tests for taxonomy, plant and map routes

mod common;

use actix_web::{http::StatusCode, test};
use bg_api::create_app;
use bg_core::domain::value_objects::AuthResponse;
use bg_core::repositories::PlantRepository;
use bg_shared::Environment;
use serde_json::{json, Value};

use common::{context, cors, credentials};

#[actix_web::test]
async fn test_catalog_requires_token_when_enforced() {
    let ctx = context(true);
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::get().uri("/api/families").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/families")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(credentials("curator@garden.org", "pw1"))
        .to_request();
    let session: AuthResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/families")
        .insert_header(("Authorization", format!("Bearer {}", session.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_taxonomy_create_list_and_get() {
    let ctx = context(false);
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    for (path, name) in [
        ("/api/families", "Rosaceae"),
        ("/api/genera", "Rosa"),
        ("/api/sectors", "Dendrology"),
    ] {
        let req = test::TestRequest::post()
            .uri(path)
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!({ "id": 1, "name": name }));

        let req = test::TestRequest::get().uri(&format!("{}/1", path)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], name);

        let req = test::TestRequest::get().uri(&format!("{}/42", path)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    let req = test::TestRequest::post()
        .uri("/api/sectors")
        .set_json(json!({ "name": "Flora" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/sectors").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dendrology", "Flora"]);
}

#[actix_web::test]
async fn test_taxonomy_name_validation() {
    let ctx = context(false);
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    for name in [String::new(), "x".repeat(101)] {
        let req = test::TestRequest::post()
            .uri("/api/genera")
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

/// Sectors 1 and 2, one family and one genus
async fn seed_taxonomy(ctx: &common::TestContext) {
    use bg_core::repositories::TaxonomyRepository;

    ctx.taxonomy.create_sector("Dendrology").await.unwrap();
    ctx.taxonomy.create_sector("Biometry").await.unwrap();
    ctx.taxonomy.create_family("Rosaceae").await.unwrap();
    ctx.taxonomy.create_genus("Rosa").await.unwrap();
}

#[actix_web::test]
async fn test_add_plant_parses_comma_coordinates() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/plants")
        .set_json(json!({
            "sector_id": 1,
            "family_id": 1,
            "genus_id": 1,
            "species": "Rosa canina",
            "latitude": "55,75",
            "longitude": "37.61",
            "biometric_id": 7,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["latitude"], 55.75);
    assert_eq!(body["data"]["longitude"], 37.61);
    // Only the biometric sector keeps a biometric id
    assert_eq!(body["data"]["biometric_id"], Value::Null);

    let req = test::TestRequest::get().uri("/api/plants?sector_id=1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["species"], "Rosa canina");
    assert_eq!(body["data"][0]["family_name"], "Rosaceae");
    assert_eq!(body["data"][0]["genus_name"], "Rosa");
}

#[actix_web::test]
async fn test_add_plant_reports_all_errors() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/plants")
        .set_json(json!({
            "sector_id": 2,
            "family_id": 99,
            "latitude": "abc",
            "longitude": "200",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    let details = body["details"].as_array().unwrap();
    // latitude, longitude, biometric id and the unknown family
    assert_eq!(details.len(), 4);
    assert!(ctx.plants.list_with_coordinates().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_list_plants_checks_sector() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::get().uri("/api/plants?sector_id=0").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/plants?sector_id=99").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/plants?sector_id=abc").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

async fn add_plant(ctx: &common::TestContext, species: &str) -> i64 {
    use bg_core::domain::entities::plant::PlantDetails;

    ctx.plants
        .create(PlantDetails {
            sector_id: 1,
            species: Some(species.to_string()),
            latitude: Some(55.0),
            longitude: Some(37.0),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

#[actix_web::test]
async fn test_batch_update_is_all_or_nothing() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let first = add_plant(&ctx, "Rosa canina").await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-update")
        .set_json(json!([
            { "plant_id": first, "species": "Rosa rugosa" },
            { "plant_id": 999, "species": "Ghost" },
        ]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let unchanged = ctx.plants.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(unchanged.details.species.as_deref(), Some("Rosa canina"));

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-update")
        .set_json(json!([{ "plant_id": first, "species": "Rosa rugosa", "note": null }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["updated"], 1);

    let updated = ctx.plants.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(updated.details.species.as_deref(), Some("Rosa rugosa"));
    assert_eq!(updated.details.latitude, Some(55.0));

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-update")
        .set_json(json!([]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_batch_update_rejects_unknown_references() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let first = add_plant(&ctx, "Rosa canina").await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-update")
        .set_json(json!([
            { "plant_id": first, "family_id": 999, "genus_id": 999, "sector_id": 999 },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"].as_array().map(Vec::len), Some(3));

    let unchanged = ctx.plants.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(unchanged.details.sector_id, 1);
    assert!(unchanged.details.family_id.is_none());
}

#[actix_web::test]
async fn test_delete_and_batch_delete() {
    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let first = add_plant(&ctx, "Rosa canina").await;
    let second = add_plant(&ctx, "Rosa rugosa").await;
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::delete().uri("/api/plants/0").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/plants/{}", first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Plant deleted successfully.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/plants/{}", first))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-delete")
        .set_json(json!({ "plant_ids": [] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-delete")
        .set_json(json!({ "plant_ids": [first, 999] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/plants/batch-delete")
        .set_json(json!({ "plant_ids": [second, 999] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["removed"], 1);
}

#[actix_web::test]
async fn test_map_markers_skip_unplaced_plants() {
    use bg_core::domain::entities::plant::PlantDetails;

    let ctx = context(false);
    seed_taxonomy(&ctx).await;
    let placed = add_plant(&ctx, "Rosa canina").await;
    ctx.plants
        .create(PlantDetails {
            sector_id: 1,
            species: Some("Unplaced".to_string()),
            latitude: Some(55.0),
            ..Default::default()
        })
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), Environment::Development)).await;

    let req = test::TestRequest::get().uri("/api/map/plants").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let markers = body["data"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["plant_id"], placed);
    assert_eq!(markers[0]["species"], "Rosa canina");
}
