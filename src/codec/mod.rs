// Copyright 2025 Aquifer

//! Бинарный формат AQF: обратимое кодирование тегированного дерева
//! значений.
//!
//! Формат нативно переносит примитивы, словари, массивы и даты, и
//! пропускает сквозь себя пять семантических тегов гидратации
//! (resolved/rejected/pending/custom/error). Незнакомые теги
//! приватного диапазона сохраняются для совместимости версий.

pub mod base64;
pub mod decode;
pub mod encode;
pub mod tags;
pub mod types;

pub use base64::{from_base64, to_base64};
pub use decode::{decode, read_value, MAX_DEPTH};
pub use encode::{encode, write_value, MAX_BLOB_LEN, MAX_COLLECTION_LEN};
pub use types::{ErrorPayload, WireValue};
