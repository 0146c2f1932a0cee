use std::sync::Arc;

use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use anyhow::anyhow;

use crate::{
    config::ServiceConfig,
    error::{self, ServiceError},
    repository::RepositoryObject,
};

pub use self::state::ServiceState;

pub mod state;

/// Per-request view of the service state, extracted in handlers.
#[derive(Clone)]
pub struct Context(pub Arc<ServiceState>);

impl FromRequest for Context {
    type Error = ServiceError;

    type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<Data<Arc<ServiceState>>>() {
            Some(state) => Ok(Context(state.get_ref().clone())),
            None => {
                log::error!("No state provided for {}", req.path());
                Err(anyhow!("No state provided").into())
            }
        };
        futures_util::future::ready(result)
    }
}

impl Context {
    pub fn config(&self) -> &ServiceConfig {
        &self.0.config
    }

    pub fn get_repository<T: 'static>(&self) -> Option<RepositoryObject<T>> {
        self.0.repositories.get::<RepositoryObject<T>>().cloned()
    }

    pub fn try_get_repository<T: 'static>(&self) -> error::Result<RepositoryObject<T>> {
        self.get_repository::<T>().ok_or_else(|| {
            anyhow!(
                "Repository for type {} not found",
                std::any::type_name::<T>()
            )
            .into()
        })
    }
}
