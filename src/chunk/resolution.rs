// Copyright 2025 Aquifer

//! Кадр разрешения: исход одного незавершённого вычисления.
//!
//! Каждый кадр после начального несёт ровно один id и его исход.
//! На проводе кадр — обычный словарь AQF, что оставляет формату
//! пространство для новых полей без смены тегов.

use crate::{
    codec::{ErrorPayload, WireValue},
    error::DecodeError,
};

/// Исход вычисления: значение или сериализованная ошибка.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Resolved(WireValue),
    Rejected(ErrorPayload),
}

/// Сообщение разрешения одного плейсхолдера.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionChunk {
    pub id: String,
    pub outcome: ResolutionOutcome,
}

impl ResolutionChunk {
    pub fn resolved(id: impl Into<String>, value: WireValue) -> Self {
        Self {
            id: id.into(),
            outcome: ResolutionOutcome::Resolved(value),
        }
    }

    pub fn rejected(id: impl Into<String>, error: ErrorPayload) -> Self {
        Self {
            id: id.into(),
            outcome: ResolutionOutcome::Rejected(error),
        }
    }

    pub fn to_wire(&self) -> WireValue {
        let mut pairs = vec![("id".to_string(), WireValue::Str(self.id.clone()))];
        match &self.outcome {
            ResolutionOutcome::Resolved(value) => {
                pairs.push(("status".to_string(), WireValue::Str("resolved".into())));
                pairs.push(("value".to_string(), value.clone()));
            }
            ResolutionOutcome::Rejected(error) => {
                pairs.push(("status".to_string(), WireValue::Str("rejected".into())));
                pairs.push(("error".to_string(), error.to_wire()));
            }
        }
        WireValue::Map(pairs)
    }

    pub fn from_wire(value: WireValue) -> Result<Self, DecodeError> {
        let WireValue::Map(pairs) = value else {
            return Err(DecodeError::Malformed(
                "resolution chunk is not a map".into(),
            ));
        };

        let mut id = None;
        let mut status = None;
        let mut val = None;
        let mut error = None;
        for (key, v) in pairs {
            match (key.as_str(), v) {
                ("id", WireValue::Str(s)) => id = Some(s),
                ("status", WireValue::Str(s)) => status = Some(s),
                ("value", v) => val = Some(v),
                ("error", v) => error = Some(v),
                _ => {}
            }
        }

        let id = id.ok_or_else(|| DecodeError::Malformed("resolution without id".into()))?;
        let status =
            status.ok_or_else(|| DecodeError::Malformed("resolution without status".into()))?;
        match status.as_str() {
            "resolved" => {
                let value = val
                    .ok_or_else(|| DecodeError::Malformed("resolved chunk without value".into()))?;
                Ok(Self::resolved(id, value))
            }
            "rejected" => {
                let error = error
                    .ok_or_else(|| DecodeError::Malformed("rejected chunk without error".into()))?;
                Ok(Self::rejected(id, ErrorPayload::from_wire(error)?))
            }
            other => Err(DecodeError::Malformed(format!(
                "unknown resolution status {other:?}"
            ))),
        }
    }
}
