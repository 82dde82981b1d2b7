//! Согласование содержимого с коллабораторами транспорта.
//!
//! Подсистема не трогает HTTP сама: роутер выставляет и читает эти
//! дискриминаторы, а редирект разбирается до любого бинарного
//! декодирования. Заголовок маршрута для этого ядра непрозрачен.

use serde::{Deserialize, Serialize};

/// Ответ — одно закодированное значение (eager-путь).
pub const CONTENT_TYPE_VALUE: &str = "application/x-aquifer-value";
/// Ответ — последовательность чанков.
pub const CONTENT_TYPE_STREAM: &str = "application/x-aquifer-stream";
/// Ответ — инструкция редиректа (JSON).
pub const CONTENT_TYPE_REDIRECT: &str = "application/x-aquifer-redirect";
/// Заголовок запроса с логическим маршрутом для data-only ответа.
pub const ROUTE_HEADER: &str = "x-aquifer-route";

/// Вид ответа по его content-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Value,
    Stream,
    Redirect,
}

impl ResponseKind {
    /// Классифицирует content-type; параметры после `;` игнорируются.
    pub fn from_content_type(header: &str) -> Option<Self> {
        let mime = header.split(';').next().unwrap_or("").trim();
        match mime {
            CONTENT_TYPE_VALUE => Some(ResponseKind::Value),
            CONTENT_TYPE_STREAM => Some(ResponseKind::Stream),
            CONTENT_TYPE_REDIRECT => Some(ResponseKind::Redirect),
            _ => None,
        }
    }
}

/// Инструкция редиректа.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
