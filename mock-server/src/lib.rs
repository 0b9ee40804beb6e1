//! Fixture HTTP server for exercising the request pipeline over real sockets.
//!
//! Every route returns a canned shape of response (success, error status,
//! empty body, malformed body) so client tests can drive each
//! failure class end to end.

use std::collections::BTreeMap;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub id: Option<u64>,
}

/// Id assigned to every user created through `POST /users`.
pub const CREATED_ID: u64 = 100;

pub fn app() -> Router {
    Router::new()
        .route("/users", get(get_user).post(create_user))
        .route("/missing", get(missing))
        .route("/empty", get(empty))
        .route("/malformed", get(malformed))
        .route("/headers", get(echo_headers))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_user(Query(query): Query<UserQuery>) -> Result<Json<User>, StatusCode> {
    let id = query.id.ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(User {
        id,
        name: format!("user-{id}"),
    }))
}

async fn create_user(Json(input): Json<NewUser>) -> (StatusCode, Json<User>) {
    let user = User {
        id: CREATED_ID,
        name: input.name,
    };
    (StatusCode::CREATED, Json(user))
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn malformed() -> &'static str {
    "not json"
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    let mut echoed: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        echoed
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(echoed)
}
