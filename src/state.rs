//! Shared per-module state handed to the CRUD handlers.

use std::marker::PhantomData;

use crate::service::CrudService;

/// Everything a CRUD module's handlers need: the service and the converter
/// between its entity, DTO and metadata shapes.
pub struct CrudState<E, D, M, R, C> {
    pub service: CrudService<E, R>,
    pub converter: C,
    _dto: PhantomData<fn() -> (D, M)>,
}

impl<E, D, M, R, C> CrudState<E, D, M, R, C> {
    pub fn new(service: CrudService<E, R>, converter: C) -> Self {
        Self {
            service,
            converter,
            _dto: PhantomData,
        }
    }
}
