use std::{collections::BTreeMap, io, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "bookID", default)]
    pub book_id: i64,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: i32,
}

pub type Db = Arc<RwLock<BTreeMap<i64, Book>>>;

pub fn app() -> Router {
    app_with_books(Vec::new())
}

/// Router whose store starts out holding `books`, keyed by their `bookID`.
pub fn app_with_books(books: Vec<Book>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        books.into_iter().map(|book| (book.book_id, book)).collect(),
    ));
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(db)
}

/// Router that answers every book route with 500.
pub fn failing_app() -> Router {
    fixed_app(500, Vec::new())
}

/// Router that answers every book route with `status` and the raw `body`
/// bytes, whatever they are.
pub fn fixed_app(status: u16, body: impl Into<Vec<u8>>) -> Router {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Vec<u8> = body.into();
    let handler = move || {
        let body = body.clone();
        async move { (status, body) }
    };
    Router::new()
        .route("/api/books", any(handler.clone()))
        .route("/api/books/{id}", any(handler))
}

pub async fn run(listener: TcpListener) -> Result<(), io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), io::Error> {
    axum::serve(listener, router).await
}

/// Serve `router` on an ephemeral localhost port from a background task.
pub async fn spawn(router: Router) -> Result<SocketAddr, io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = serve(listener, router).await {
            tracing::error!(error = %err, "mock server stopped");
        }
    });
    Ok(addr)
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let books = db.read().await;
    Json(books.values().cloned().collect())
}

async fn create_book(State(db): State<Db>, Json(input): Json<Book>) -> (StatusCode, Json<Book>) {
    let mut books = db.write().await;
    let book_id = books.keys().next_back().map_or(1, |id| id + 1);
    let book = Book { book_id, ..input };
    books.insert(book_id, book.clone());
    tracing::info!(book_id, title = %book.title, "created book");
    (StatusCode::CREATED, Json(book))
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, StatusCode> {
    let books = db.read().await;
    books.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the path identity wins over any `bookID` in the body.
async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Book>,
) -> StatusCode {
    let mut books = db.write().await;
    match books.get_mut(&id) {
        Some(book) => {
            *book = Book { book_id: id, ..input };
            tracing::info!(book_id = id, "updated book");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut books = db.write().await;
    match books.remove(&id) {
        Some(_) => {
            tracing::info!(book_id = id, "deleted book");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
