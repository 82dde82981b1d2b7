//! Восстановленное дерево значений на принимающей стороне.

use std::{any::Any, fmt};

use chrono::{DateTime, Utc};

use crate::value::{AnyValue, BoxError};

use super::promise::Promise;

/// Значение после регидратации.
///
/// Асинхронные листья — живые [`Promise`]; пользовательские типы —
/// восстановленные экземпляры, доступные через downcast.
pub enum Hydrated {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<Hydrated>),
    Map(Vec<(String, Hydrated)>),
    /// Живое обещание: уже завершённое или ждущее кадра разрешения.
    Promise(Promise),
    /// Ошибка приложения, перенесённая как данные.
    Error(BoxError),
    /// Восстановленный экземпляр зарегистрированного типа.
    Custom { name: String, value: Box<AnyValue> },
    /// Сохранённый нераспознанный тег приватного диапазона.
    Extension(u8, Box<Hydrated>),
}

impl Hydrated {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Hydrated::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Hydrated::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Значение ключа словаря (первое вхождение).
    pub fn get(&self, key: &str) -> Option<&Hydrated> {
        match self {
            Hydrated::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Забирает значение ключа из словаря, `Null` на его месте.
    pub fn take(&mut self, key: &str) -> Option<Hydrated> {
        match self {
            Hydrated::Map(pairs) => pairs
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| std::mem::replace(v, Hydrated::Null)),
            _ => None,
        }
    }

    /// Downcast восстановленного пользовательского типа.
    pub fn downcast_custom<T: Any>(&self) -> Option<&T> {
        match self {
            Hydrated::Custom { value, .. } => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Hydrated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hydrated::Null => write!(f, "Null"),
            Hydrated::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Hydrated::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Hydrated::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Hydrated::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Hydrated::Bytes(v) => write!(f, "Bytes({} bytes)", v.len()),
            Hydrated::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Hydrated::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Hydrated::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Hydrated::Promise(p) => f.debug_tuple("Promise").field(p).finish(),
            Hydrated::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Hydrated::Custom { name, .. } => write!(f, "Custom({name})"),
            Hydrated::Extension(tag, v) => f.debug_tuple("Extension").field(tag).field(v).finish(),
        }
    }
}
