//! Процессор значений: превращает входное дерево [`Value`] в проводное
//! [`WireValue`].
//!
//! Классификация узла идёт в фиксированном порядке: обещание →
//! зарегистрированная ошибка → зарегистрированный тип → дата →
//! коллекция → скаляр. Два режима:
//! - *eager* ([`Serializer::eager`]): дождаться каждого вычисления;
//! - *streaming* ([`Serializer::streaming`]): заменить вычисления
//!   плейсхолдерами и вернуть их список для кадров разрешения.

pub mod eager;
pub mod streaming;

pub use streaming::{PendingComputation, PendingIds};

use std::sync::Arc;

use crate::{
    codec::ErrorPayload,
    config::Settings,
    registry::{DynError, SerializerRegistry},
};

pub struct Serializer {
    registry: Arc<SerializerRegistry>,
    /// Включать ли стеки в сериализованные ошибки (dev-режим).
    include_stack: bool,
}

impl Serializer {
    pub fn new(registry: Arc<SerializerRegistry>) -> Self {
        Self {
            registry,
            include_stack: false,
        }
    }

    pub fn with_settings(registry: Arc<SerializerRegistry>, settings: &Settings) -> Self {
        Self {
            registry,
            include_stack: settings.dev_mode,
        }
    }

    pub fn registry(&self) -> &Arc<SerializerRegistry> {
        &self.registry
    }

    /// Сериализует ошибку приложения с учётом dev-режима.
    pub fn error_payload(&self, error: &DynError) -> ErrorPayload {
        self.registry.serialize_error(error, self.include_stack)
    }
}
