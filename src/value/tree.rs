//! Входное дерево значений, которое сервер отдаёт в сериализацию.
//!
//! В отличие от проводного представления ([`crate::codec::WireValue`]),
//! узлы этого дерева могут быть "живыми": незавершённые вычисления
//! (`Promise`), ошибки приложения (`Error`) и экземпляры
//! зарегистрированных пользовательских типов (`Custom`).

use std::{any::Any, fmt, future::Future, pin::Pin};

use chrono::{DateTime, Utc};

/// Ошибка приложения, переносимая как данные.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Незавершённое вычисление: будущее значение или ошибка.
pub type ValueFuture = Pin<Box<dyn Future<Output = Result<Value, BoxError>> + Send>>;

/// Динамически типизированное значение пользовательского типа.
pub type AnyValue = dyn Any + Send + Sync;

/// Произвольное значение, вычисленное на сервере.
///
/// Порядок ключей в `Map` и элементов в `Array` сохраняется при
/// сериализации без изменений.
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
    /// Ошибка приложения; сериализуется по имени через реестр.
    Error(BoxError),
    /// Незавершённое вычисление.
    Promise(ValueFuture),
    /// Экземпляр зарегистрированного пользовательского типа.
    Custom(Box<AnyValue>),
}

impl Value {
    /// Оборачивает будущее вычисление в узел `Promise`.
    pub fn promise<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Value::Promise(Box::pin(future))
    }

    /// Оборачивает уже готовое значение в немедленно завершающийся `Promise`.
    pub fn resolved(value: Value) -> Self {
        Value::promise(async move { Ok(value) })
    }

    /// Оборачивает ошибку в немедленно отклоняющийся `Promise`.
    pub fn rejected<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let error = error.into();
        Value::promise(async move { Err(error) })
    }

    pub fn custom<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Value::Custom(Box::new(value))
    }

    pub fn error<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Value::Error(error.into())
    }

    pub fn map<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Bytes(v) => write!(f, "Bytes({} bytes)", v.len()),
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Value::Promise(_) => write!(f, "Promise(..)"),
            Value::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
