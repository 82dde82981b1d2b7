//! Конверт гидратации — единственный долговечный артефакт подсистемы.
//!
//! Создаётся один раз на ответ сервера (eager-путь), встраивается в
//! начальный payload страницы как JSON, потребляется один раз при
//! старте клиента и выбрасывается. `version` — жёсткий шлюз
//! совместимости: несовпадение — фатальная ошибка декодирования, а не
//! предупреждение.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    client::{hydrate_value, Hydrated},
    codec::{encode, from_base64, to_base64},
    error::{DecodeError, EncodeError},
    registry::SerializerRegistry,
    serialize::Serializer,
    value::Value,
};

/// Текущая версия формата конверта.
pub const ENVELOPE_VERSION: u32 = 1;

/// Конверт: версия, закодированное дерево и ограниченное окружение.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationEnvelope {
    pub version: u32,
    /// base64 бинарного кодирования полностью завершённого дерева.
    pub data: String,
    /// Переменные окружения, разрешённые к передаче клиенту.
    #[serde(rename = "publicEnv", default)]
    pub public_env: BTreeMap<String, String>,
}

impl HydrationEnvelope {
    /// Запечатывает дерево: дожидается всех вычислений и кодирует.
    pub async fn seal(
        serializer: &Serializer,
        value: Value,
        public_env: BTreeMap<String, String>,
    ) -> Result<Self, EncodeError> {
        let wire = serializer.eager(value).await?;
        Ok(Self {
            version: ENVELOPE_VERSION,
            data: to_base64(&encode(&wire)?),
            public_env,
        })
    }

    /// Вскрывает конверт: версия проверяется до любого декодирования.
    pub fn open(&self, registry: &SerializerRegistry) -> Result<Hydrated, DecodeError> {
        if self.version != ENVELOPE_VERSION {
            return Err(DecodeError::VersionMismatch {
                expected: ENVELOPE_VERSION,
                found: self.version,
            });
        }
        let bytes = from_base64(&self.data)?;
        hydrate_value(registry, &bytes)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
