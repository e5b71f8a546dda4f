//! Actix-Web Middleware Factory for Static File Serving

use std::{path::PathBuf, rc::Rc, sync::Arc};

use actix_service::ServiceFactory;
use actix_web::{
    Error,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{CacheControl, CacheDirective, TryIntoHeaderValue},
};
use futures_core::future::LocalBoxFuture;

use super::fs::{LocalFile, ServeFileSystem};
use super::service::{ServeMiddleware, ServeMiddlewareInner};

/// Middleware serving files from a [`ServeFileSystem`] ahead of the
/// wrapped application.
///
/// Requests that do not resolve to a file (or servable directory) are
/// passed through untouched to the inner service.
///
/// ```no_run
/// use actix_static::{LocalFile, Serve};
/// use actix_web::{App, HttpResponse, web};
///
/// let app = App::new()
///     .wrap(Serve::new("/static", LocalFile::new("./public", true)).max_age(Some(3600)))
///     .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") }));
/// ```
pub struct Serve<F> {
    prefix: String,
    fs: Arc<F>,
    max_age: Option<u32>,
}

impl<F> Clone for Serve<F> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            fs: Arc::clone(&self.fs),
            max_age: self.max_age,
        }
    }
}

impl<F: ServeFileSystem> Serve<F> {
    pub fn new(prefix: &str, fs: F) -> Self {
        Self {
            prefix: prefix.to_owned(),
            fs: Arc::new(fs),
            max_age: None,
        }
    }
    /// Enable `ETag` and `Cache-Control` headers with the given max-age in
    /// seconds. `None` disables caching headers entirely.
    pub fn max_age(mut self, max_age: Option<u32>) -> Self {
        self.max_age = max_age;
        self
    }
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    #[inline]
    pub fn filesystem(&self) -> &F {
        &self.fs
    }
}

/// Serve files from `fs` below `prefix` without caching headers.
#[inline]
pub fn serve<F: ServeFileSystem>(prefix: &str, fs: F) -> Serve<F> {
    Serve::new(prefix, fs)
}

/// Serve files from `fs` below `prefix`, advertising `max_age` seconds of
/// public cacheability along with a content `ETag`.
#[inline]
pub fn serve_cached<F: ServeFileSystem>(prefix: &str, fs: F, max_age: u32) -> Serve<F> {
    Serve::new(prefix, fs).max_age(Some(max_age))
}

/// Serve a local directory below `prefix` with directory listing disabled.
#[inline]
pub fn serve_root<P: Into<PathBuf>>(prefix: &str, root: P) -> Serve<LocalFile> {
    Serve::new(prefix, LocalFile::new(root, false))
}

impl<S, F> Transform<S, ServiceRequest> for Serve<F>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
    S::Future: 'static,
    F: ServeFileSystem,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ServeMiddleware<S, F>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let files = self.fs.file_service().new_service(());
        let prefix = self.prefix.trim_end_matches('/').to_owned();
        let fs = Arc::clone(&self.fs);
        let max_age = self.max_age;
        let cache_control = max_age.and_then(|age| {
            CacheControl(vec![CacheDirective::Public, CacheDirective::MaxAge(age)])
                .try_into_value()
                .ok()
        });
        Box::pin(async move {
            let files = files.await?;
            Ok(ServeMiddleware(Rc::new(ServeMiddlewareInner {
                service,
                files,
                fs,
                prefix,
                max_age,
                cache_control,
            })))
        })
    }
}
