//! Декодирование бинарного формата AQF обратно в [`WireValue`].
//!
//! Декодер зеркален кодеру и обязан:
//! - проверять лимиты глубины и длины до аллокаций;
//! - сохранять незнакомые теги приватного диапазона как `Extension`;
//! - требовать полного потребления буфера (хвостовые байты — ошибка).

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use chrono::TimeZone;

use super::{
    encode::{MAX_BLOB_LEN, MAX_COLLECTION_LEN},
    tags::{
        EXT_BASE, EXT_MAX, TAG_ARRAY, TAG_BOOL, TAG_BYTES, TAG_CUSTOM, TAG_DATE, TAG_ERROR,
        TAG_FLOAT, TAG_INT, TAG_MAP, TAG_NULL, TAG_PENDING, TAG_REJECTED, TAG_RESOLVED, TAG_STR,
    },
    types::{ErrorPayload, WireValue},
};
use crate::error::DecodeError;

/// Максимальная глубина вложенности значений.
pub const MAX_DEPTH: usize = 64;

/// Декодирует ровно одно значение из буфера.
///
/// Байты после значения считаются ошибкой формата.
pub fn decode(bytes: &[u8]) -> Result<WireValue, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    let value = read_value(&mut cursor, 0)?;
    let remaining = bytes.len() as u64 - cursor.position();
    if remaining > 0 {
        return Err(DecodeError::TrailingBytes(remaining as usize));
    }
    Ok(value)
}

/// Чтение одного значения из потока.
pub fn read_value<R: Read>(r: &mut R, depth: usize) -> Result<WireValue, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthExceeded(MAX_DEPTH));
    }

    let tag = r.read_u8()?;
    match tag {
        TAG_NULL => Ok(WireValue::Null),
        TAG_BOOL => Ok(WireValue::Bool(r.read_u8()? != 0)),
        TAG_INT => Ok(WireValue::Int(r.read_i64::<BigEndian>()?)),
        TAG_FLOAT => Ok(WireValue::Float(r.read_f64::<BigEndian>()?)),
        TAG_STR => Ok(WireValue::Str(read_string(r)?)),
        TAG_BYTES => Ok(WireValue::Bytes(read_blob(r)?)),
        TAG_DATE => {
            let millis = r.read_i64::<BigEndian>()?;
            let date = chrono::Utc
                .timestamp_millis_opt(millis)
                .single()
                .ok_or(DecodeError::InvalidDate(millis))?;
            Ok(WireValue::Date(date))
        }
        TAG_ARRAY => {
            let len = read_len(r)?;
            let mut items = Vec::with_capacity(len.min(1024));
            for _ in 0..len {
                items.push(read_value(r, depth + 1)?);
            }
            Ok(WireValue::Array(items))
        }
        TAG_MAP => {
            let len = read_len(r)?;
            let mut pairs = Vec::with_capacity(len.min(1024));
            for _ in 0..len {
                let key = read_string(r)?;
                let val = read_value(r, depth + 1)?;
                pairs.push((key, val));
            }
            Ok(WireValue::Map(pairs))
        }
        TAG_RESOLVED => Ok(WireValue::Resolved(Box::new(read_value(r, depth + 1)?))),
        TAG_REJECTED => {
            let payload = ErrorPayload::from_wire(read_value(r, depth + 1)?)?;
            Ok(WireValue::Rejected(payload))
        }
        TAG_PENDING => match read_value(r, depth + 1)? {
            WireValue::Str(id) => Ok(WireValue::Pending(id)),
            other => Err(DecodeError::Malformed(format!(
                "pending placeholder id is not a string: {other:?}"
            ))),
        },
        TAG_CUSTOM => match read_value(r, depth + 1)? {
            WireValue::Array(mut pair) if pair.len() == 2 => {
                let data = pair.pop().unwrap_or(WireValue::Null);
                match pair.pop() {
                    Some(WireValue::Str(name)) => Ok(WireValue::Custom {
                        name,
                        data: Box::new(data),
                    }),
                    _ => Err(DecodeError::Malformed(
                        "custom type name is not a string".into(),
                    )),
                }
            }
            _ => Err(DecodeError::Malformed(
                "custom type payload is not a [name, data] pair".into(),
            )),
        },
        TAG_ERROR => {
            let payload = ErrorPayload::from_wire(read_value(r, depth + 1)?)?;
            Ok(WireValue::Error(payload))
        }
        tag if (EXT_BASE..=EXT_MAX).contains(&tag) => {
            // незнакомое расширение: содержимое — одно значение, сохраняем как есть
            Ok(WireValue::Extension(
                tag,
                Box::new(read_value(r, depth + 1)?),
            ))
        }
        other => Err(DecodeError::UnknownTag(other)),
    }
}

fn read_len<R: Read>(r: &mut R) -> Result<usize, DecodeError> {
    let len = r.read_u32::<BigEndian>()? as usize;
    if len > MAX_COLLECTION_LEN {
        return Err(DecodeError::CollectionTooLarge {
            len,
            max: MAX_COLLECTION_LEN,
        });
    }
    Ok(len)
}

fn read_blob<R: Read>(r: &mut R) -> Result<Vec<u8>, DecodeError> {
    let len = r.read_u32::<BigEndian>()? as usize;
    if len > MAX_BLOB_LEN {
        return Err(DecodeError::BlobTooLarge {
            len,
            max: MAX_BLOB_LEN,
        });
    }
    let mut buf = vec![0; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_string<R: Read>(r: &mut R) -> Result<String, DecodeError> {
    Ok(String::from_utf8(read_blob(r)?)?)
}
