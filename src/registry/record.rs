//! Записи регистрации сериализаторов.
//!
//! Каждая запись — имя плюс функции узнавания, сериализации и
//! восстановления. Узнавание работает первым совпадением в порядке
//! регистрации; пересечение распознавателей не валидируется.

use std::any::Any;

use crate::{
    client::Hydrated,
    codec::ErrorPayload,
    error::{DecodeError, EncodeError},
    value::{AnyValue, BoxError, Value},
};

/// Динамически типизированная ошибка приложения.
pub type DynError = dyn std::error::Error + Send + Sync;

/// Сериализатор пользовательского типа значений.
pub struct TypeSerializer {
    pub name: String,
    pub recognize: Box<dyn Fn(&AnyValue) -> bool + Send + Sync>,
    /// Возвращает простое дерево данных; оно рекурсивно дообрабатывается.
    pub serialize: Box<dyn Fn(&AnyValue) -> Result<Value, EncodeError> + Send + Sync>,
    pub deserialize: Box<dyn Fn(Hydrated) -> Result<Box<AnyValue>, DecodeError> + Send + Sync>,
}

impl TypeSerializer {
    /// Типизированная регистрация: распознаватель — downcast до `T`.
    pub fn of<T, S, D>(name: impl Into<String>, serialize: S, deserialize: D) -> Self
    where
        T: Any + Send + Sync,
        S: Fn(&T) -> Value + Send + Sync + 'static,
        D: Fn(Hydrated) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        let name = name.into();
        let ser_name = name.clone();
        Self {
            name,
            recognize: Box::new(|value| value.downcast_ref::<T>().is_some()),
            serialize: Box::new(move |value| {
                let concrete = value
                    .downcast_ref::<T>()
                    .ok_or_else(|| EncodeError::TypeMismatch(ser_name.clone()))?;
                Ok(serialize(concrete))
            }),
            deserialize: Box::new(move |hydrated| {
                Ok(Box::new(deserialize(hydrated)?) as Box<AnyValue>)
            }),
        }
    }
}

/// Сериализатор типа ошибок.
///
/// Ограничен error-подобными значениями: распознаёт и сериализует
/// `dyn Error`, восстанавливает конкретную ошибку по payload'у.
pub struct ErrorSerializer {
    pub name: String,
    pub recognize: Box<dyn Fn(&DynError) -> bool + Send + Sync>,
    /// Второй аргумент — включать ли стек (dev-режим).
    pub serialize: Box<dyn Fn(&DynError, bool) -> ErrorPayload + Send + Sync>,
    pub deserialize: Box<dyn Fn(&ErrorPayload) -> BoxError + Send + Sync>,
}

impl ErrorSerializer {
    /// Типизированная регистрация: распознаватель — downcast до `E`.
    pub fn of<E, S, D>(name: impl Into<String>, serialize: S, deserialize: D) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        S: Fn(&E, bool) -> ErrorPayload + Send + Sync + 'static,
        D: Fn(&ErrorPayload) -> E + Send + Sync + 'static,
    {
        let name = name.into();
        let fallback_name = name.clone();
        Self {
            name,
            recognize: Box::new(|error| error.downcast_ref::<E>().is_some()),
            serialize: Box::new(move |error, include_stack| match error.downcast_ref::<E>() {
                Some(concrete) => serialize(concrete, include_stack),
                None => ErrorPayload::new(fallback_name.clone(), error.to_string()),
            }),
            deserialize: Box::new(move |payload| Box::new(deserialize(payload)) as BoxError),
        }
    }
}

/// Сериализатор значения контекста, пересекающего границу процесса.
///
/// В отличие от типов и ошибок, ищется по имени, а не распознавателем.
pub struct ContextSerializer {
    pub name: String,
    pub serialize: Box<dyn Fn(&AnyValue) -> Result<Value, EncodeError> + Send + Sync>,
    pub deserialize: Box<dyn Fn(Hydrated) -> Result<Box<AnyValue>, DecodeError> + Send + Sync>,
}

impl ContextSerializer {
    pub fn of<T, S, D>(name: impl Into<String>, serialize: S, deserialize: D) -> Self
    where
        T: Any + Send + Sync,
        S: Fn(&T) -> Value + Send + Sync + 'static,
        D: Fn(Hydrated) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        let name = name.into();
        let ser_name = name.clone();
        Self {
            name,
            serialize: Box::new(move |value| {
                let concrete = value
                    .downcast_ref::<T>()
                    .ok_or_else(|| EncodeError::TypeMismatch(ser_name.clone()))?;
                Ok(serialize(concrete))
            }),
            deserialize: Box::new(move |hydrated| {
                Ok(Box::new(deserialize(hydrated)?) as Box<AnyValue>)
            }),
        }
    }
}
