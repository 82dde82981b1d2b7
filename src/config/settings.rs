use serde::{Deserialize, Serialize};

use config::{Config, ConfigError, Environment};

/// Настройки подсистемы сериализации.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Включать стеки в сериализованные ошибки. В продакшене выключено:
    /// стек — утечка информации, а не диагностика клиента.
    pub dev_mode: bool,
    /// Максимальная длина кадра чанк-протокола в байтах.
    pub max_frame_len: usize,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Значения по умолчанию
            .set_default("dev_mode", false)?
            .set_default("max_frame_len", 256 * 1024 * 1024i64)?
            // Переопределения из окружения с префиксом AQUIFER_
            .add_source(Environment::with_prefix("AQUIFER"))
            .build()?;

        cfg.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dev_mode: false,
            max_frame_len: 256 * 1024 * 1024,
        }
    }
}
