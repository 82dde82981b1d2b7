// Copyright 2025 Aquifer

//! Типы проводного представления формата AQF.
//!
//! `WireValue` — дерево, полученное из входного [`crate::Value`] после
//! прохода сериализатора: все "живые" узлы заменены тегированными
//! значениями, и дерево обратимо кодируется в байты.

use chrono::{DateTime, Utc};

use crate::error::DecodeError;

/// Тегированное проводное значение.
///
/// Пять семантических видов (`Resolved`, `Rejected`, `Pending`, `Custom`,
/// `Error`) соответствуют тегам приватного диапазона; `Extension`
/// сохраняет нераспознанный тег этого диапазона вместе с его
/// содержимым, чтобы переживать рассинхронизацию версий.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<WireValue>),
    Map(Vec<(String, WireValue)>),
    /// Завершённое обещание: содержимое — разрешённое значение.
    Resolved(Box<WireValue>),
    /// Отклонённое обещание: содержимое — сериализованная ошибка.
    Rejected(ErrorPayload),
    /// Незавершённое вычисление, ожидающее кадра разрешения.
    Pending(String),
    /// Значение зарегистрированного пользовательского типа.
    Custom { name: String, data: Box<WireValue> },
    /// Ошибка приложения как данные.
    Error(ErrorPayload),
    /// Нераспознанный тег приватного диапазона.
    Extension(u8, Box<WireValue>),
}

impl WireValue {
    pub fn map<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, WireValue)>,
    {
        WireValue::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Сериализованная ошибка приложения.
///
/// `name` — дискриминатор типа для реестра на принимающей стороне.
/// `stack` заполняется только в dev-режиме. `detail` — произвольные
/// дополнительные данные конкретного сериализатора (например, HTTP-статус).
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub detail: Option<Box<WireValue>>,
}

impl ErrorPayload {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            detail: None,
        }
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_detail(mut self, detail: WireValue) -> Self {
        self.detail = Some(Box::new(detail));
        self
    }

    /// Представление ошибки как проводного словаря.
    pub fn to_wire(&self) -> WireValue {
        let mut pairs = vec![
            ("name".to_string(), WireValue::Str(self.name.clone())),
            ("message".to_string(), WireValue::Str(self.message.clone())),
        ];
        if let Some(stack) = &self.stack {
            pairs.push(("stack".to_string(), WireValue::Str(stack.clone())));
        }
        if let Some(detail) = &self.detail {
            pairs.push(("detail".to_string(), (**detail).clone()));
        }
        WireValue::Map(pairs)
    }

    /// Разбор ошибки из проводного словаря.
    ///
    /// `name` и `message` обязательны, остальные поля игнорируются,
    /// если не распознаны.
    pub fn from_wire(value: WireValue) -> Result<Self, DecodeError> {
        let WireValue::Map(pairs) = value else {
            return Err(DecodeError::Malformed("error payload is not a map".into()));
        };

        let mut name = None;
        let mut message = None;
        let mut stack = None;
        let mut detail = None;
        for (key, val) in pairs {
            match (key.as_str(), val) {
                ("name", WireValue::Str(s)) => name = Some(s),
                ("message", WireValue::Str(s)) => message = Some(s),
                ("stack", WireValue::Str(s)) => stack = Some(s),
                ("detail", v) => detail = Some(Box::new(v)),
                _ => {}
            }
        }

        let name =
            name.ok_or_else(|| DecodeError::Malformed("error payload without name".into()))?;
        let message =
            message.ok_or_else(|| DecodeError::Malformed("error payload without message".into()))?;
        Ok(Self {
            name,
            message,
            stack,
            detail,
        })
    }
}
