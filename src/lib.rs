//! Static file serving middleware for [actix-web](https://actix.rs).
//!
//! [`Serve`] wraps an application and answers any `GET`/`HEAD` request
//! whose path resolves to a file below its [`ServeFileSystem`]. Everything
//! else falls through to the wrapped routes. Byte serving, content types,
//! ranges, and directory listings are delegated to `actix-files`.
//!
//! ```no_run
//! use actix_static::{LocalFile, serve_cached};
//! use actix_web::{App, HttpServer, HttpResponse, web};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| {
//!         App::new()
//!             .wrap(serve_cached("/", LocalFile::new("./public", false), 3600))
//!             .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("test") }))
//!     })
//!     .bind(("0.0.0.0", 8080))?
//!     .run()
//!     .await
//! }
//! ```

mod config;
mod error;
mod etag;
mod factory;
mod fs;
mod path;
mod service;

pub use config::StaticConfig;
pub use error::{OpenError, UriSegmentError};
pub use etag::generate_etag;
pub use factory::{Serve, serve, serve_cached, serve_root};
pub use fs::{DEFAULT_INDEX, LocalFile, ServeFileSystem};
pub use path::{PathBufWrap, strip_prefix};
pub use service::ServeMiddleware;
