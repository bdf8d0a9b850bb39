//! Full CRUD lifecycle against the live mock server.
//!
//! Starts the mock server on an ephemeral port, then drives every
//! `CatalogAccess` operation over real HTTP through `UreqTransport`.

use std::net::SocketAddr;

use catalog_core::{
    Book, CatalogAccess, CatalogClient, Dataset, LegacyBookView, NoopObserver, UreqTransport,
};

fn seed() -> Vec<mock_server::Book> {
    vec![mock_server::Book {
        book_id: 1,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        publication_year: 1965,
    }]
}

fn connect(addr: SocketAddr) -> CatalogAccess<UreqTransport, NoopObserver> {
    let client = CatalogClient::new(&format!("http://{addr}"), "my-token");
    CatalogAccess::new(client, UreqTransport::new(), Dataset::builtin()).with_observer(NoopObserver)
}

#[tokio::test(flavor = "multi_thread")]
async fn crud_lifecycle() {
    let addr = mock_server::spawn(mock_server::app_with_books(seed()))
        .await
        .unwrap();
    let access = connect(addr);

    // list: the seeded book only
    let books = access.get_all_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");

    // get with credential headers
    let dune = access.get_book_by_id(1).await.unwrap();
    assert_eq!(dune.author, "Frank Herbert");

    // legacy projection
    let view = access.get_old_book_by_id(1).await.unwrap();
    assert_eq!(
        view,
        LegacyBookView {
            book_title: "Dune".to_string(),
            year: 1965,
        }
    );

    // create
    let new_book = Book {
        book_id: 0,
        title: "Emma".to_string(),
        author: "Jane Austen".to_string(),
        publication_year: 1815,
    };
    let created = access.add_book(&new_book).await.unwrap();
    assert_eq!(created.book_id, 2);
    assert_eq!(created.title, "Emma");

    // update: full replacement
    let revised = Book {
        title: "Emma (revised)".to_string(),
        ..created.clone()
    };
    access.update_book(&revised).await.unwrap();
    assert_eq!(access.get_book_by_id(2).await.unwrap(), revised);

    // delete
    access.delete_book(2).await.unwrap();
    let err = access.get_book_by_id(2).await.unwrap_err();
    assert!(err.is_not_found());

    // delete again: raw 404, not normalized
    let err = access.delete_book(2).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    // list: back to the seed
    let books = access.get_all_books().await.unwrap();
    assert_eq!(books.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_failure_is_normalized() {
    let addr = mock_server::spawn(mock_server::failing_app()).await.unwrap();
    let access = connect(addr);

    let err = access.get_all_books().await.unwrap_err();
    assert_eq!(err.error_number, 100);
    assert_eq!(err.message, "Internal Server Error");
    assert_eq!(err.friendly_message, "An error occured retrieving data.");
}

#[tokio::test(flavor = "multi_thread")]
async fn other_failures_stay_raw() {
    let addr = mock_server::spawn(mock_server::failing_app()).await.unwrap();
    let access = connect(addr);

    let err = access.get_book_by_id(1).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    let err = access.delete_book(1).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop so the port is very likely closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let access = connect(addr);

    let err = access.get_book_by_id(1).await.unwrap_err();
    assert!(matches!(err, catalog_core::ApiError::TransportError(_)));

    let err = access.get_all_books().await.unwrap_err();
    assert_eq!(err.error_number, 100);
    assert!(err.message.starts_with("transport failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_error_body_keeps_the_status() {
    let addr = mock_server::spawn(mock_server::fixed_app(500, vec![0xff, 0xfe, 0x00]))
        .await
        .unwrap();
    let access = connect(addr);

    let err = access.get_all_books().await.unwrap_err();
    assert_eq!(err.message, "Internal Server Error");

    let err = access.get_book_by_id(1).await.unwrap_err();
    assert!(matches!(err, catalog_core::ApiError::HttpError { status: 500, .. }));
}
