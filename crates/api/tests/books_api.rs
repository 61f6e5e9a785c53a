//! End-to-end tests for the book routes, driving the router directly without
//! a socket. Every test gets a fresh in-memory database with the migrated
//! schema and seeded categories (1 = Romance, 2 = Ficção Científica, …).

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use biblioteca_api::{AppState, BookResponse};
use biblioteca_catalog::{Database, Repository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn service() -> (Database, Router) {
    let db = Database::connect_in_memory().await.unwrap();
    let state = AppState::new(Repository::from(&db));
    (db, biblioteca_api::router(state))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_book(app: &Router, title: &str, author: &str, category_id: i64) -> BookResponse {
    let body = json!({ "title": title, "author": author, "categoryId": category_id });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_returns_201_with_location_and_category() {
    let (_db, app) = service().await;
    let body = json!({ "title": "Dune", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.oneshot(json_request("POST", "/api/books", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
    let created: BookResponse = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(location, format!("/api/books/{}", created.id));
    assert!(created.id > 0);
    assert_eq!(created.title, "Dune");
    assert_eq!(created.author, "Frank Herbert");
    assert_eq!(created.category_id, 1);
    assert_eq!(created.category.name, "Romance");
}

#[tokio::test]
async fn create_rejects_short_title_and_writes_nothing() {
    let (_db, app) = service().await;
    let body = json!({ "title": "Hi", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Título deve ter no mínimo 3 caracteres." })
    );

    let list = app.oneshot(bare_request("GET", "/api/books")).await.unwrap();
    assert_eq!(read_json(list).await, json!([]));
}

#[tokio::test]
async fn create_rejects_short_author_and_writes_nothing() {
    let (_db, app) = service().await;
    let body = json!({ "title": "Dune", "author": "Fh", "categoryId": 1 });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Autor deve ter no mínimo 3 caracteres." })
    );

    let list = app.oneshot(bare_request("GET", "/api/books")).await.unwrap();
    assert_eq!(read_json(list).await, json!([]));
}

#[tokio::test]
async fn create_rejects_unknown_category_and_writes_nothing() {
    let (_db, app) = service().await;
    let body = json!({ "title": "Dune", "author": "Frank Herbert", "categoryId": 999 });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Categoria inválida. O ID da categoria fornecido não existe." })
    );

    let list = app.oneshot(bare_request("GET", "/api/books")).await.unwrap();
    assert_eq!(read_json(list).await, json!([]));
}

#[tokio::test]
async fn create_assigns_the_id_even_if_one_is_supplied() {
    let (_db, app) = service().await;
    let body = json!({ "id": 42, "title": "Dune", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: BookResponse = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_ne!(created.id, 42, "the store assigns ids, not the client");

    let missing = app.oneshot(bare_request("GET", "/api/books/42")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Dune", "Frank Herbert", 2).await;

    let response =
        app.oneshot(bare_request("GET", &format!("/api/books/{}", created.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: BookResponse = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(fetched, created);
    assert_eq!(fetched.category.name, "Ficção Científica");
}

#[tokio::test]
async fn list_returns_every_book_with_its_category() {
    let (_db, app) = service().await;
    let first = create_book(&app, "Dune", "Frank Herbert", 2).await;
    let second = create_book(&app, "Iracema", "José de Alencar", 1).await;

    let response = app.oneshot(bare_request("GET", "/api/books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(books, vec![first, second]);
}

#[tokio::test]
async fn get_missing_book_is_404_with_the_id_in_the_message() {
    let (_db, app) = service().await;
    let response = app.oneshot(bare_request("GET", "/api/books/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Livro com ID 999 não encontrado." })
    );
}

#[tokio::test]
async fn update_overwrites_and_returns_the_book() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Duna", "Frank Herbert", 2).await;

    // Same author and category; only the title changes.
    let body = json!({
        "id": created.id,
        "title": "Dune",
        "author": "Frank Herbert",
        "categoryId": 2,
    });
    let uri = format!("/api/books/{}", created.id);
    let response = app.clone().oneshot(json_request("PUT", &uri, &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: BookResponse = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(updated.title, "Dune");

    let fetched = app.oneshot(bare_request("GET", &uri)).await.unwrap();
    let fetched: BookResponse = {
        let bytes = fetched.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(fetched.title, "Dune");
    assert_eq!(fetched.author, "Frank Herbert");
    assert_eq!(fetched.category_id, 2);
}

#[tokio::test]
async fn update_can_move_a_book_to_another_category() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Fundação", "Isaac Asimov", 1).await;

    let body = json!({
        "id": created.id,
        "title": "Fundação",
        "author": "Isaac Asimov",
        "categoryId": 2,
    });
    let uri = format!("/api/books/{}", created.id);
    let response = app.clone().oneshot(json_request("PUT", &uri, &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: BookResponse = {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(updated.category_id, 2);
    assert_eq!(updated.category.name, "Ficção Científica");
}

#[tokio::test]
async fn update_rejects_id_mismatch_regardless_of_body_validity() {
    let (_db, app) = service().await;

    // Valid fields, mismatched id
    let valid = json!({ "id": 6, "title": "Dune", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.clone().oneshot(json_request("PUT", "/api/books/5", &valid)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "O ID do livro não corresponde ao ID da URL." })
    );

    // Invalid fields as well: the mismatch is still what gets reported
    let invalid = json!({ "id": 6, "title": "Hi", "author": "Fh", "categoryId": 999 });
    let response = app.oneshot(json_request("PUT", "/api/books/5", &invalid)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "O ID do livro não corresponde ao ID da URL." })
    );
}

#[tokio::test]
async fn update_requires_the_body_to_carry_the_id() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Dune", "Frank Herbert", 1).await;

    let body = json!({ "title": "Dune", "author": "Frank Herbert", "categoryId": 1 });
    let uri = format!("/api/books/{}", created.id);
    let response = app.oneshot(json_request("PUT", &uri, &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_book_is_404() {
    let (_db, app) = service().await;
    let body = json!({ "id": 999, "title": "Dune", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.oneshot(json_request("PUT", "/api/books/999", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Livro com ID 999 não encontrado para atualização." })
    );
}

#[tokio::test]
async fn update_validates_before_touching_the_record() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Dune", "Frank Herbert", 1).await;
    let uri = format!("/api/books/{}", created.id);

    let short_title = json!({
        "id": created.id,
        "title": "Hi",
        "author": "Frank Herbert",
        "categoryId": 1,
    });
    let response = app.clone().oneshot(json_request("PUT", &uri, &short_title)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Título deve ter no mínimo 3 caracteres." })
    );

    let short_author = json!({
        "id": created.id,
        "title": "Dune",
        "author": "Fh",
        "categoryId": 1,
    });
    let response = app.clone().oneshot(json_request("PUT", &uri, &short_author)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Autor deve ter no mínimo 3 caracteres." })
    );

    let unknown_category = json!({
        "id": created.id,
        "title": "Dune",
        "author": "Frank Herbert",
        "categoryId": 999,
    });
    let response = app.clone().oneshot(json_request("PUT", &uri, &unknown_category)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Categoria inválida. O ID da categoria fornecido não existe." })
    );

    // None of the rejections touched the record
    let fetched = app.oneshot(bare_request("GET", &uri)).await.unwrap();
    let fetched: BookResponse = {
        let bytes = fetched.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    };
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let (_db, app) = service().await;
    let created = create_book(&app, "Dune", "Frank Herbert", 1).await;
    let uri = format!("/api/books/{}", created.id);

    let response = app.clone().oneshot(bare_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app.clone().oneshot(bare_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports the removal-specific message
    let response = app.oneshot(bare_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let message = read_json(response).await;
    assert_eq!(
        message,
        json!({ "message": format!("Livro com ID {} não encontrado para remoção.", created.id) })
    );
}

#[tokio::test]
async fn validation_counts_characters_not_bytes() {
    let (_db, app) = service().await;

    // Two characters, four bytes: still too short
    let body = json!({ "title": "éé", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.clone().oneshot(json_request("POST", "/api/books", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "title": "ééé", "author": "Frank Herbert", "categoryId": 1 });
    let response = app.oneshot(json_request("POST", "/api/books", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
