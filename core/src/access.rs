//! The catalog's single entry point for callers.
//!
//! # Design
//! `CatalogAccess` owns everything the catalog needs for its lifetime: the
//! request builder, a [`Transport`], the reader roster, the most-popular-book
//! cell and a [`BookObserver`]. Roster lookups are synchronous; every
//! backend operation is an `async fn`, so no work starts until the returned
//! future is polled and dropping it abandons delivery.
//!
//! Only `get_all_books` normalizes failures into an [`OperationalError`];
//! the other backend operations hand back the raw [`ApiError`].

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::dataset::Dataset;
use crate::error::{ApiError, OperationalError};
use crate::http::{HttpRequest, HttpResponse};
use crate::observer::{BookObserver, TracingObserver};
use crate::transport::Transport;
use crate::types::{Book, BookId, LegacyBookView, Reader, ReaderId};

pub struct CatalogAccess<T, O = TracingObserver> {
    client: CatalogClient,
    transport: T,
    observer: O,
    readers: Vec<Reader>,
    most_popular: Option<Book>,
}

impl<T: Transport> CatalogAccess<T> {
    /// The most popular book starts out as the first book in `dataset`.
    pub fn new(client: CatalogClient, transport: T, dataset: Dataset) -> Self {
        let Dataset { readers, books } = dataset;
        Self {
            client,
            transport,
            observer: TracingObserver,
            readers,
            most_popular: books.into_iter().next(),
        }
    }
}

impl<T: Transport, O: BookObserver> CatalogAccess<T, O> {
    pub fn with_observer<P: BookObserver>(self, observer: P) -> CatalogAccess<T, P> {
        CatalogAccess {
            client: self.client,
            transport: self.transport,
            observer,
            readers: self.readers,
            most_popular: self.most_popular,
        }
    }

    pub fn most_popular_book(&self) -> Option<&Book> {
        self.most_popular.as_ref()
    }

    pub fn set_most_popular_book(&mut self, book: Book) {
        self.most_popular = Some(book);
    }

    pub fn get_all_readers(&self) -> &[Reader] {
        &self.readers
    }

    pub fn get_reader_by_id(&self, id: ReaderId) -> Option<&Reader> {
        self.readers.iter().find(|reader| reader.reader_id == id)
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>, OperationalError> {
        let result = match self.exchange(self.client.build_list_books()).await {
            Ok(response) => self.client.parse_list_books(response),
            Err(err) => Err(err),
        };
        result.map_err(|err| {
            warn!(error = %err, "listing books failed");
            OperationalError::from(err)
        })
    }

    pub async fn get_book_by_id(&self, id: BookId) -> Result<Book, ApiError> {
        let response = self.exchange(self.client.build_get_book(id)).await?;
        self.client.parse_get_book(response)
    }

    /// Fetch a book and reduce it to its legacy projection. The observer sees
    /// the view before the caller does.
    pub async fn get_old_book_by_id(&self, id: BookId) -> Result<LegacyBookView, ApiError> {
        let response = self.exchange(self.client.build_get_legacy_book(id)).await?;
        let view = LegacyBookView::from(&self.client.parse_get_book(response)?);
        self.observer.legacy_book_viewed(&view);
        Ok(view)
    }

    pub async fn add_book(&self, book: &Book) -> Result<Book, ApiError> {
        let request = self.client.build_add_book(book)?;
        let response = self.exchange(request).await?;
        self.client.parse_add_book(response)
    }

    pub async fn update_book(&self, book: &Book) -> Result<(), ApiError> {
        let request = self.client.build_update_book(book)?;
        let response = self.exchange(request).await?;
        self.client.parse_update_book(response)
    }

    pub async fn delete_book(&self, book_id: BookId) -> Result<(), ApiError> {
        let response = self.exchange(self.client.build_delete_book(book_id)).await?;
        self.client.parse_delete_book(response)
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
