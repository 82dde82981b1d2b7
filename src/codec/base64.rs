//! Текстовое представление закодированных байтов.
//!
//! Используется одношаговым путём: бинарный вывод кодера встраивается
//! в текстовый начальный payload страницы как base64.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::DecodeError;

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(text)?)
}
