//! Ошибки, пересекающие границу процесса как данные.
//!
//! Это не ошибки протокола: отклонённое вычисление или брошенная
//! приложением ошибка сериализуется и восстанавливается на принимающей
//! стороне в том же виде.

use thiserror::Error;

/// HTTP-ошибка приложения (статус + сообщение).
///
/// Сериализатор для неё входит в базовый набор реестра.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Восстановленная ошибка, тип которой не зарегистрирован у получателя.
///
/// Сохраняет исходные имя и сообщение вместо того, чтобы ронять декодирование.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct RemoteError {
    pub name: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Отказ транспорта до завершения вычисления.
///
/// Этой ошибкой отклоняются все незавершённые обещания, если поток
/// закрылся или оборвался раньше, чем пришли их кадры разрешения.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transport failed before value resolved: {reason}")]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
