//! Actix Service Implementation for Static File Serving

use std::{ops::Deref, rc::Rc, sync::Arc};

use actix_files::FilesService;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, forward_ready},
    http::{
        Method,
        header::{self, HeaderValue},
    },
    web,
};
use futures_core::future::LocalBoxFuture;

use super::error::OpenError;
use super::etag::generate_etag;
use super::fs::ServeFileSystem;
use super::path::strip_prefix;

pub struct ServeMiddleware<S, F>(pub(crate) Rc<ServeMiddlewareInner<S, F>>);

impl<S, F> Deref for ServeMiddleware<S, F> {
    type Target = ServeMiddlewareInner<S, F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct ServeMiddlewareInner<S, F> {
    pub(crate) service: S,
    pub(crate) files: FilesService,
    pub(crate) fs: Arc<F>,
    pub(crate) prefix: String,
    pub(crate) max_age: Option<u32>,
    pub(crate) cache_control: Option<HeaderValue>,
}

impl<S, F: ServeFileSystem> ServeMiddlewareInner<S, F> {
    /// Hash the resolved file on the blocking pool.
    ///
    /// Any failure is logged and yields no etag so the request is still
    /// served, only without conditional request support.
    async fn fingerprint(&self, path: &str) -> Option<String> {
        let fs = Arc::clone(&self.fs);
        let owned = path.to_owned();
        let result = web::block(move || match fs.open(&owned) {
            Ok(file) => generate_etag(file).map(Some).map_err(OpenError::from),
            Err(OpenError::NotFound) => Ok(None),
            Err(err) => Err(err),
        })
        .await;
        match result {
            Ok(Ok(Some(etag))) => Some(etag),
            Ok(Ok(None)) => {
                log::debug!("no file to fingerprint at {path:?}");
                None
            }
            Ok(Err(err)) => {
                log::warn!("failed to generate etag for {path:?}: {err}");
                None
            }
            Err(err) => {
                log::warn!("failed to generate etag for {path:?}: {err}");
                None
            }
        }
    }
}

#[inline]
fn if_none_match(req: &ServiceRequest, etag: &str) -> bool {
    req.headers()
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value.as_bytes() == etag.as_bytes())
}

impl<S, F> Service<ServiceRequest> for ServeMiddleware<S, F>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
    S::Future: 'static,
    F: ServeFileSystem,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let this = Rc::clone(&self.0);

        // pass anything we will not serve along to the wrapped service
        let path = req.match_info().unprocessed().to_owned();
        let serve = matches!(*req.method(), Method::GET | Method::HEAD)
            && this.fs.exists(&this.prefix, &path);
        if !serve {
            return Box::pin(this.service.call(req));
        }

        Box::pin(async move {
            let rel = strip_prefix(&this.prefix, &path).unwrap_or_default();
            let mut etag = None;
            if this.max_age.is_some() {
                etag = this.fingerprint(rel).await;
                if let Some(etag) = etag.as_deref().filter(|etag| if_none_match(&req, etag)) {
                    log::debug!("cache hit for: {path}");
                    let res = HttpResponse::NotModified()
                        .insert_header((header::ETAG, etag))
                        .finish();
                    return Ok(req.into_response(res));
                }
            }

            // hand the file service only the path below the mount prefix
            let skip = path.len() - rel.len();
            req.match_info_mut().skip(skip as u16);

            let mut res = this.files.call(req).await?;
            if res.status().is_success() {
                let headers = res.headers_mut();
                if let Some(value) = etag.and_then(|e| HeaderValue::try_from(e).ok()) {
                    headers.insert(header::ETAG, value);
                }
                if let Some(value) = this.cache_control.clone() {
                    headers.insert(header::CACHE_CONTROL, value);
                }
            }
            Ok(res)
        })
    }
}
