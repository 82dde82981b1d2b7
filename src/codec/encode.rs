//! Кодирование [`WireValue`] в бинарный формат AQF.
//!
//! Каждое значение — однобайтовый тег, затем длина и данные.
//! Содержимое любого тега приватного диапазона — ровно одно
//! рекурсивно закодированное значение, поэтому декодер может
//! сохранить незнакомый тег, не зная его семантики.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{
    tags::{
        TAG_ARRAY, TAG_BOOL, TAG_BYTES, TAG_CUSTOM, TAG_DATE, TAG_ERROR, TAG_FLOAT, TAG_INT,
        TAG_MAP, TAG_NULL, TAG_PENDING, TAG_REJECTED, TAG_RESOLVED, TAG_STR,
    },
    types::WireValue,
};
use crate::error::EncodeError;

/// Максимальная длина строки или байтового блока.
pub const MAX_BLOB_LEN: usize = 64 * 1024 * 1024;
/// Максимальное количество элементов коллекции.
pub const MAX_COLLECTION_LEN: usize = 16 * 1024 * 1024;

/// Кодирует значение в свежий буфер.
pub fn encode(value: &WireValue) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(64);
    write_value(&mut buf, value)?;
    Ok(buf)
}

/// Запись значения в поток.
pub fn write_value<W: Write>(w: &mut W, value: &WireValue) -> Result<(), EncodeError> {
    match value {
        WireValue::Null => {
            w.write_u8(TAG_NULL)?;
            Ok(())
        }
        WireValue::Bool(b) => {
            w.write_u8(TAG_BOOL)?;
            w.write_u8(u8::from(*b))?;
            Ok(())
        }
        WireValue::Int(i) => {
            w.write_u8(TAG_INT)?;
            w.write_i64::<BigEndian>(*i)?;
            Ok(())
        }
        WireValue::Float(f) => {
            w.write_u8(TAG_FLOAT)?;
            w.write_f64::<BigEndian>(*f)?;
            Ok(())
        }
        WireValue::Str(s) => {
            w.write_u8(TAG_STR)?;
            write_blob(w, s.as_bytes())
        }
        WireValue::Bytes(b) => {
            w.write_u8(TAG_BYTES)?;
            write_blob(w, b)
        }
        WireValue::Date(d) => {
            w.write_u8(TAG_DATE)?;
            w.write_i64::<BigEndian>(d.timestamp_millis())?;
            Ok(())
        }
        WireValue::Array(items) => {
            w.write_u8(TAG_ARRAY)?;
            write_len(w, items.len())?;
            for item in items {
                write_value(w, item)?;
            }
            Ok(())
        }
        WireValue::Map(pairs) => {
            w.write_u8(TAG_MAP)?;
            write_len(w, pairs.len())?;
            for (key, val) in pairs {
                write_blob(w, key.as_bytes())?;
                write_value(w, val)?;
            }
            Ok(())
        }
        WireValue::Resolved(inner) => {
            w.write_u8(TAG_RESOLVED)?;
            write_value(w, inner)
        }
        WireValue::Rejected(payload) => {
            w.write_u8(TAG_REJECTED)?;
            write_value(w, &payload.to_wire())
        }
        WireValue::Pending(id) => {
            w.write_u8(TAG_PENDING)?;
            write_value(w, &WireValue::Str(id.clone()))
        }
        WireValue::Custom { name, data } => {
            w.write_u8(TAG_CUSTOM)?;
            let pair = WireValue::Array(vec![WireValue::Str(name.clone()), (**data).clone()]);
            write_value(w, &pair)
        }
        WireValue::Error(payload) => {
            w.write_u8(TAG_ERROR)?;
            write_value(w, &payload.to_wire())
        }
        WireValue::Extension(tag, inner) => {
            w.write_u8(*tag)?;
            write_value(w, inner)
        }
    }
}

fn write_blob<W: Write>(w: &mut W, bytes: &[u8]) -> Result<(), EncodeError> {
    if bytes.len() > MAX_BLOB_LEN {
        return Err(EncodeError::TooLarge {
            len: bytes.len(),
            max: MAX_BLOB_LEN,
        });
    }
    w.write_u32::<BigEndian>(bytes.len() as u32)?;
    w.write_all(bytes)?;
    Ok(())
}

fn write_len<W: Write>(w: &mut W, len: usize) -> Result<(), EncodeError> {
    if len > MAX_COLLECTION_LEN {
        return Err(EncodeError::TooLarge {
            len,
            max: MAX_COLLECTION_LEN,
        });
    }
    w.write_u32::<BigEndian>(len as u32)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use byteorder::ReadBytesExt;

    use super::*;
    use crate::codec::types::ErrorPayload;

    /// Тест проверяет, что строка кодируется как тег, длина и байты UTF-8.
    #[test]
    fn test_write_str() {
        let buf = encode(&WireValue::Str("hello".into())).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_STR);
        let len = cursor.read_u32::<BigEndian>().unwrap() as usize;
        let mut data = vec![0; len];
        cursor.read_exact(&mut data).unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), "hello");
    }

    /// Тест проверяет кодирование целого числа в BE.
    #[test]
    fn test_write_int() {
        let buf = encode(&WireValue::Int(-42)).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_INT);
        assert_eq!(cursor.read_i64::<BigEndian>().unwrap(), -42);
    }

    /// Тест проверяет, что Null — одиночный тег без содержимого.
    #[test]
    fn test_write_null() {
        let buf = encode(&WireValue::Null).unwrap();
        assert_eq!(buf, vec![TAG_NULL]);
    }

    /// Тест проверяет, что дата кодируется миллисекундами от эпохи.
    #[test]
    fn test_write_date() {
        use chrono::TimeZone;

        let date = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let buf = encode(&WireValue::Date(date)).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_DATE);
        assert_eq!(
            cursor.read_i64::<BigEndian>().unwrap(),
            1_700_000_000_123i64
        );
    }

    /// Тест проверяет, что словарь сохраняет порядок ключей на проводе.
    #[test]
    fn test_write_map_preserves_order() {
        let value = WireValue::map([
            ("z", WireValue::Int(1)),
            ("a", WireValue::Int(2)),
        ]);
        let buf = encode(&value).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_MAP);
        assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 2);

        // первый ключ обязан остаться "z"
        let klen = cursor.read_u32::<BigEndian>().unwrap() as usize;
        let mut key = vec![0; klen];
        cursor.read_exact(&mut key).unwrap();
        assert_eq!(key, b"z");
    }

    /// Тест проверяет, что плейсхолдер кодируется как тег + строка id.
    #[test]
    fn test_write_pending() {
        let buf = encode(&WireValue::Pending("3".into())).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_PENDING);
        assert_eq!(cursor.read_u8().unwrap(), TAG_STR);
        assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 1);
        assert_eq!(cursor.read_u8().unwrap(), b'3');
    }

    /// Тест проверяет, что ошибка кодируется словарём payload'а.
    #[test]
    fn test_write_error_tag() {
        let buf = encode(&WireValue::Error(ErrorPayload::new("Error", "boom"))).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_u8().unwrap(), TAG_ERROR);
        assert_eq!(cursor.read_u8().unwrap(), super::TAG_MAP);
    }

    /// Тест проверяет отказ кодировать слишком длинный блок.
    #[test]
    fn test_write_blob_too_large() {
        let mut sink = Vec::new();
        let huge = vec![0u8; MAX_BLOB_LEN + 1];
        let err = write_blob(&mut sink, &huge).unwrap_err();
        assert!(matches!(err, EncodeError::TooLarge { .. }));
    }
}
