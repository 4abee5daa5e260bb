mod common;

use axum::http::{StatusCode, header::LOCATION};
use common::*;

#[tokio::test]
async fn root_redirects_to_movie_list() {
    let app = build_test_app().await;

    let response = get(&app, "/").await;

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[LOCATION], "/ui/movies");
}

#[tokio::test]
async fn list_page_renders_filter_and_loading_state() {
    let app = build_test_app().await;

    let response = get(&app, "/ui/movies?pg_rating_id=3").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Loading your movie collection..."));
    assert!(html.contains("/ui/movies/list?pg_rating_id=3"));
    assert!(html.contains("PG-13 - Parents Strongly Cautioned"));
    assert!(html.contains("All Movies"));
}

#[tokio::test]
async fn list_page_keeps_a_filter_that_is_not_a_rating_id() {
    let app = build_seeded_app().await;

    let html = body_text(get(&app, "/ui/movies?pg_rating_id=abc").await).await;
    assert!(html.contains("/ui/movies/list?pg_rating_id=abc"));
    assert!(!html.contains(r#"<option value="" selected>"#));

    let html = body_text(get(&app, "/ui/movies/list?pg_rating_id=abc").await).await;
    assert!(html.contains("No movies found"));
    assert!(!html.contains("Inception"));
}

#[tokio::test]
async fn list_page_selects_all_movies_without_a_filter() {
    let app = build_test_app().await;

    let html = body_text(get(&app, "/ui/movies").await).await;
    assert!(html.contains(r#"<option value="" selected>"#));
    assert!(html.contains("@get('/ui/movies/list')"));
}

#[tokio::test]
async fn list_fragment_shows_cards_or_empty_state() {
    let app = build_seeded_app().await;

    let response = get(&app, "/ui/movies/list").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["datastar-selector"], "#content");
    let html = body_text(response).await;
    assert!(html.contains("Inception"));
    assert!(html.contains("Forrest Gump"));

    let html = body_text(get(&app, "/ui/movies/list?pg_rating_id=1").await).await;
    assert!(html.contains("No movies found"));
    assert!(html.contains("Try adjusting your filter"));
}

#[tokio::test]
async fn empty_catalog_invites_first_movie() {
    let app = build_test_app().await;

    let html = body_text(get(&app, "/ui/movies/list").await).await;

    assert!(html.contains("Start building your collection"));
}

#[tokio::test]
async fn create_form_prechecks_before_saving() {
    let app = build_test_app().await;

    let response = form_request(&app, "/ui/movies/create", "title=&description=&rating=").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Title is required"));
    assert!(html.contains("Description is required"));
    assert!(html.contains("PG Rating is required"));

    let movies = body_json(get(&app, "/movies").await).await;
    assert!(movies.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_form_saves_and_redirects() {
    let app = build_test_app().await;

    let response =
        form_request(&app, "/ui/movies/create", "title=Dune&description=Desert+planet&rating=3")
            .await;

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[LOCATION], "/ui/movies");

    let movies = body_json(get(&app, "/movies").await).await;
    assert_eq!(movies[0]["title"], "Dune");
    assert_eq!(movies[0]["pg_rating"]["code"], "PG-13");
}

#[tokio::test]
async fn server_errors_show_under_form_fields() {
    let app = build_test_app().await;
    create_movie(&app, "Dune", 3).await;

    let response =
        form_request(&app, "/ui/movies/create", "title=Dune&description=Again&rating=99").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("A movie with this title already exists."));
    assert!(html.contains("The selected PG rating is invalid."));
}

#[tokio::test]
async fn edit_form_is_prefilled_and_updates() {
    let app = build_test_app().await;
    let created = create_movie(&app, "Heat", 4).await;
    let id = created["id"].as_i64().unwrap();

    let html = body_text(get(&app, &format!("/ui/movies/{id}/edit")).await).await;
    assert!(html.contains("Edit Movie"));
    assert!(html.contains("value=\"Heat\""));
    assert!(html.contains("Update Movie"));

    let response = form_request(
        &app,
        &format!("/ui/movies/{id}/edit"),
        "title=Heat&description=LA+crime&rating=4",
    )
    .await;
    assert!(response.status().is_redirection());

    let movie = body_json(get(&app, &format!("/movies/{id}")).await).await;
    assert_eq!(movie["description"], "LA crime");
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let app = build_test_app().await;
    let created = create_movie(&app, "Tenet", 3).await;
    let id = created["id"].as_i64().unwrap();

    let html = body_text(get(&app, &format!("/ui/movies/{id}/delete")).await).await;
    assert!(html.contains("Are you sure you want to delete"));
    assert!(html.contains("Tenet"));
    assert!(html.contains("This action cannot be undone."));
    assert_eq!(get(&app, &format!("/movies/{id}")).await.status(), StatusCode::OK);

    let response = form_request(&app, &format!("/ui/movies/{id}/delete"), "").await;
    assert!(response.status().is_redirection());
    assert_eq!(get(&app, &format!("/movies/{id}")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_movie_renders_not_found_state() {
    let app = build_test_app().await;

    for uri in ["/ui/movies/999/edit", "/ui/movies/999/delete", "/ui/movies/abc/edit"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_text(response).await.contains("Movie not found"));
    }
}
