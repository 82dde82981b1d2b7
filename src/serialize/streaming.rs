//! Streaming-режим: структура уходит сразу, вычисления — потом.
//!
//! Один синхронный проход сверху вниз заменяет каждое обещание
//! плейсхолдером и собирает список `{id, future}`. Идентификаторы —
//! монотонный счётчик потока: он заведомо свободен от коллизий, в
//! отличие от выведения id из структурного пути.

use crate::{
    codec::WireValue,
    error::EncodeError,
    value::{Value, ValueFuture},
};

use super::Serializer;

/// Незавершённое вычисление, собранное при проходе.
pub struct PendingComputation {
    pub id: String,
    pub future: ValueFuture,
}

/// Генератор плейсхолдерных id, живущий столько же, сколько поток.
///
/// Кадры разрешения, порождённые вложенными обещаниями, продолжают ту
/// же нумерацию, поэтому id уникальны в пределах всего потока.
pub struct PendingIds(u64);

impl PendingIds {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next_id(&mut self) -> String {
        let id = self.0.to_string();
        self.0 += 1;
        id
    }
}

impl Default for PendingIds {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    /// Обрабатывает дерево, не дожидаясь ни одного обещания.
    ///
    /// Каждое встреченное обещание получает новый id и попадает в
    /// `pending`; результат можно кодировать немедленно.
    pub fn streaming(
        &self,
        value: Value,
        ids: &mut PendingIds,
        pending: &mut Vec<PendingComputation>,
    ) -> Result<WireValue, EncodeError> {
        match value {
            Value::Promise(future) => {
                let id = ids.next_id();
                pending.push(PendingComputation {
                    id: id.clone(),
                    future,
                });
                Ok(WireValue::Pending(id))
            }
            Value::Error(error) => Ok(WireValue::Error(self.error_payload(error.as_ref()))),
            Value::Custom(instance) => {
                let record = self
                    .registry()
                    .find_type(instance.as_ref())
                    .ok_or(EncodeError::UnregisteredType)?;
                let name = record.name.clone();
                let payload = (record.serialize)(instance.as_ref())?;
                let data = self.streaming(payload, ids, pending)?;
                Ok(WireValue::Custom {
                    name,
                    data: Box::new(data),
                })
            }
            Value::Date(date) => Ok(WireValue::Date(date)),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.streaming(item, ids, pending)?);
                }
                Ok(WireValue::Array(out))
            }
            Value::Map(pairs) => {
                let mut out = Vec::with_capacity(pairs.len());
                for (key, val) in pairs {
                    out.push((key, self.streaming(val, ids, pending)?));
                }
                Ok(WireValue::Map(out))
            }
            Value::Null => Ok(WireValue::Null),
            Value::Bool(b) => Ok(WireValue::Bool(b)),
            Value::Int(i) => Ok(WireValue::Int(i)),
            Value::Float(f) => Ok(WireValue::Float(f)),
            Value::Str(s) => Ok(WireValue::Str(s)),
            Value::Bytes(b) => Ok(WireValue::Bytes(b)),
        }
    }
}
