//! Stateless HTTP request builder and response parser for the book API.
//!
//! # Design
//! `CatalogClient` holds only the base URL and the static credential sent
//! with single-book lookups. Each operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The exchange itself happens elsewhere, which keeps this
//! module deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, BookId};

const BOOKS_PATH: &str = "/api/books";
const JSON: &str = "application/json";

/// Synchronous, stateless client for the book API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    auth_token: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, auth_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.to_string(),
        }
    }

    fn books_url(&self) -> String {
        format!("{}{BOOKS_PATH}", self.base_url)
    }

    fn book_url(&self, id: BookId) -> String {
        format!("{}{BOOKS_PATH}/{id}", self.base_url)
    }

    pub fn build_list_books(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.books_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Single-book lookup; the only request that carries the credential.
    pub fn build_get_book(&self, id: BookId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.book_url(id),
            headers: vec![
                ("Accept".to_string(), JSON.to_string()),
                ("Authorization".to_string(), self.auth_token.clone()),
            ],
            body: None,
        }
    }

    pub fn build_get_legacy_book(&self, id: BookId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.book_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_book(&self, book: &Book) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.books_url(),
            headers: json_content_type(),
            body: Some(to_json(book)?),
        })
    }

    pub fn build_update_book(&self, book: &Book) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.book_url(book.book_id),
            headers: json_content_type(),
            body: Some(to_json(book)?),
        })
    }

    pub fn build_delete_book(&self, id: BookId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.book_url(id),
            headers: json_content_type(),
            body: None,
        }
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response, &[200])?;
        from_json(&response.body)
    }

    /// Shared by the credentialed and the legacy single-book lookups.
    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response, &[200])?;
        from_json(&response.body)
    }

    pub fn parse_add_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response, &[200, 201])?;
        from_json(&response.body)
    }

    /// Any 2xx completes the update; the body is ignored.
    pub fn parse_update_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

fn json_content_type() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), JSON.to_string())]
}

fn to_json(book: &Book) -> Result<String, ApiError> {
    serde_json::to_string(book).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn http_error(response: &HttpResponse) -> ApiError {
    ApiError::HttpError {
        status: response.status,
        status_text: response.status_text(),
        body: response.body.clone(),
    }
}

fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        Err(http_error(response))
    }
}

fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(http_error(response))
    }
}
