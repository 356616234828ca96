//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Unique suffix so tests can be re-run against the same database
fn unique() -> String {
    format!("{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

/// Register a user with the given role and return (token, user_id)
async fn register_and_login(client: &Client, role: &str) -> (String, i64) {
    let email = format!("test-{}-{}@example.com", role.to_lowercase(), unique());

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": format!("Test {}", role),
            "email": email,
            "password": "password123",
            "password_confirmation": "password123",
            "role": role
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse register response");
    let user_id = body["user"]["id"].as_i64().expect("No user id in response");

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token in response").to_string();

    (token, user_id)
}

/// Create an author and return its id
async fn create_author(client: &Client, token: &str) -> i64 {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(token)
        .json(&json!({ "name": format!("Author {}", unique()) }))
        .send()
        .await
        .expect("Failed to send create author request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse author response");
    body["author"]["id"].as_i64().expect("No author id")
}

/// Create a book under the given author and return its id
async fn create_book(client: &Client, token: &str, author_id: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": format!("Book {}", unique()),
            "isbn": format!("978-{}", unique()),
            "author_id": author_id,
            "status": "Available"
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["book"]["id"].as_i64().expect("No book id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email_fails() {
    let client = Client::new();
    let email = format!("dup-{}@example.com", unique());
    let payload = json!({
        "name": "Dup User",
        "email": email,
        "password": "password123",
        "password_confirmation": "password123",
        "role": "Member"
    });

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_register_mismatched_confirmation_fails() {
    let client = Client::new();

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": "Mismatch User",
            "email": format!("mismatch-{}@example.com", unique()),
            "password": "password123",
            "password_confirmation": "different456",
            "role": "Member"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password_is_unauthorized() {
    let client = Client::new();
    let email = format!("wrongpw-{}@example.com", unique());

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": "Wrong PW",
            "email": email,
            "password": "password123",
            "password_confirmation": "password123",
            "role": "Member"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": "password456" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_author_round_trip() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, "Librarian").await;
    let name = format!("Round Trip {}", unique());

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": name, "bio": "Wrote books" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["author"]["id"].as_i64().unwrap();

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["bio"], "Wrote books");
}

#[tokio::test]
#[ignore]
async fn test_delete_author_with_books_fails() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, "Librarian").await;
    let author_id = create_author(&client, &token).await;
    create_book(&client, &token, author_id).await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_delete_author_without_books_succeeds() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, "Librarian").await;
    let author_id = create_author(&client, &token).await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_create_book_duplicate_isbn_fails() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, "Librarian").await;
    let author_id = create_author(&client, &token).await;
    let isbn = format!("978-{}", unique());

    let payload = json!({
        "title": "First Copy",
        "isbn": isbn,
        "author_id": author_id,
        "status": "Available"
    });

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["isbn"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_book_unknown_author_fails() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, "Librarian").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Orphan Book",
            "isbn": format!("978-{}", unique()),
            "author_id": 999999999,
            "status": "Available"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let (staff_token, _) = register_and_login(&client, "Librarian").await;
    let (member_token, _) = register_and_login(&client, "Member").await;
    let author_id = create_author(&client, &staff_token).await;
    let book_id = create_book(&client, &staff_token, author_id).await;

    // Borrow flips the status and creates a record due 14 days out
    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let record = &body["borrow_record"];
    assert!(record["id"].is_number());
    assert!(record["returned_at"].is_null());

    let borrowed_at: chrono::DateTime<chrono::Utc> =
        record["borrowed_at"].as_str().unwrap().parse().unwrap();
    let due_at: chrono::DateTime<chrono::Utc> =
        record["due_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(due_at - borrowed_at, chrono::Duration::days(14));

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Borrowed");

    // A second borrow of the same book fails
    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Return stamps the record and flips the status back
    let response = client
        .post(format!("{}/books/{}/return", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["borrow_record"]["returned_at"].is_string());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Available");

    // Returning again fails: no active record remains
    let response = client
        .post(format!("{}/books/{}/return", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_delete_borrowed_book_fails() {
    let client = Client::new();
    let (staff_token, _) = register_and_login(&client, "Librarian").await;
    let (member_token, _) = register_and_login(&client, "Member").await;
    let author_id = create_author(&client, &staff_token).await;
    let book_id = create_book(&client, &staff_token, author_id).await;

    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&staff_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // After returning, deletion goes through
    let response = client
        .post(format!("{}/books/{}/return", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&staff_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_member_cannot_manage_catalog() {
    let client = Client::new();
    let (member_token, _) = register_and_login(&client, "Member").await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&member_token)
        .json(&json!({ "name": "Forbidden Author" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/borrow-records", BASE_URL))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_profile_access_control() {
    let client = Client::new();
    let (member_token, member_id) = register_and_login(&client, "Member").await;
    let (other_token, _) = register_and_login(&client, "Member").await;
    let (admin_token, _) = register_and_login(&client, "Admin").await;

    // Members see their own profile
    let response = client
        .get(format!("{}/users/{}", BASE_URL, member_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["password"].is_null());

    // Another member is rejected
    let response = client
        .get(format!("{}/users/{}", BASE_URL, member_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Admins see any profile
    let response = client
        .get(format!("{}/users/{}", BASE_URL, member_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_user_list_is_admin_only() {
    let client = Client::new();
    let (member_token, _) = register_and_login(&client, "Member").await;
    let (admin_token, _) = register_and_login(&client, "Admin").await;

    let response = client
        .get(format!("{}/users", BASE_URL))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/users", BASE_URL))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert_eq!(body["per_page"], 10);
}

#[tokio::test]
#[ignore]
async fn test_borrow_records_reporting() {
    let client = Client::new();
    let (staff_token, _) = register_and_login(&client, "Librarian").await;
    let (member_token, _) = register_and_login(&client, "Member").await;
    let author_id = create_author(&client, &staff_token).await;
    let book_id = create_book(&client, &staff_token, author_id).await;

    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let record_id = body["borrow_record"]["id"].as_i64().unwrap();

    let response = client
        .get(format!("{}/borrow-records/{}", BASE_URL, record_id))
        .bearer_auth(&staff_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book_id"].as_i64().unwrap(), book_id);
    assert!(body["book_title"].is_string());
    assert!(body["user_name"].is_string());
}
