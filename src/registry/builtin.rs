//! Базовый набор сериализаторов ошибок.
//!
//! Заполняется при инициализации реестра и восстанавливается `reset()`:
//! ошибка ввода-вывода, HTTP-ошибка приложения и общий запасной
//! сериализатор для любых прочих ошибок.

use std::backtrace::Backtrace;

use crate::{
    codec::{ErrorPayload, WireValue},
    value::{HttpError, RemoteError},
};

use super::record::ErrorSerializer;

pub(crate) fn maybe_stack(include: bool) -> Option<String> {
    include.then(|| Backtrace::force_capture().to_string())
}

pub(crate) fn builtin_error_serializers() -> Vec<ErrorSerializer> {
    vec![io_error_serializer(), http_error_serializer()]
}

/// Ошибки `std::io::Error`; вид (`ErrorKind`) уходит в detail.
fn io_error_serializer() -> ErrorSerializer {
    ErrorSerializer::of::<std::io::Error, _, _>(
        "IoError",
        |error, include_stack| {
            ErrorPayload::new("IoError", error.to_string())
                .with_stack(maybe_stack(include_stack))
                .with_detail(WireValue::Str(format!("{:?}", error.kind())))
        },
        |payload| std::io::Error::new(std::io::ErrorKind::Other, payload.message.clone()),
    )
}

/// HTTP-ошибка приложения; статус уходит в detail.
fn http_error_serializer() -> ErrorSerializer {
    ErrorSerializer::of::<HttpError, _, _>(
        "HttpError",
        |error, include_stack| {
            ErrorPayload::new("HttpError", error.message.clone())
                .with_stack(maybe_stack(include_stack))
                .with_detail(WireValue::Int(i64::from(error.status)))
        },
        |payload| {
            let status = match payload.detail.as_deref() {
                Some(WireValue::Int(code)) => u16::try_from(*code).unwrap_or(500),
                _ => 500,
            };
            HttpError::new(status, payload.message.clone())
        },
    )
}

/// Общий запасной сериализатор: узнаёт любую ошибку, хранится вне
/// таблицы и применяется последним.
pub(crate) fn generic_error_serializer() -> ErrorSerializer {
    ErrorSerializer {
        name: "Error".into(),
        recognize: Box::new(|_| true),
        serialize: Box::new(|error, include_stack| {
            ErrorPayload::new("Error", error.to_string()).with_stack(maybe_stack(include_stack))
        }),
        deserialize: Box::new(|payload| {
            Box::new(RemoteError::new(payload.name.clone(), payload.message.clone()))
        }),
    }
}
