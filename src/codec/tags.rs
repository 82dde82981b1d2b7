//! Определение тегов бинарного формата AQF.
//!
//! Каждый узел помечается однобайтовым тегом. Семантические теги
//! (promise/custom/error) занимают приватный диапазон `0xE0..=0xFE`,
//! который не пересекается со стандартными тегами данных.
//! Используется в модулях `decode` и `encode`.

/// Null
pub const TAG_NULL: u8 = 0x01;
/// Логическое значение (bool)
pub const TAG_BOOL: u8 = 0x02;
/// Целое число (i64)
pub const TAG_INT: u8 = 0x03;
/// Число с плавающей точкой (f64)
pub const TAG_FLOAT: u8 = 0x04;
/// Строка UTF-8
pub const TAG_STR: u8 = 0x05;
/// Сырые байты
pub const TAG_BYTES: u8 = 0x06;
/// Дата (миллисекунды от эпохи, i64)
pub const TAG_DATE: u8 = 0x07;
/// Массив произвольных значений
pub const TAG_ARRAY: u8 = 0x08;
/// Словарь с сохранением порядка ключей
pub const TAG_MAP: u8 = 0x09;

/// Начало приватного диапазона расширений.
pub const EXT_BASE: u8 = 0xE0;
/// Конец приватного диапазона расширений (включительно).
pub const EXT_MAX: u8 = 0xFE;

/// Завершённое обещание; содержимое — разрешённое значение.
pub const TAG_RESOLVED: u8 = 0xE0;
/// Отклонённое обещание; содержимое — сериализованная ошибка.
pub const TAG_REJECTED: u8 = 0xE1;
/// Плейсхолдер незавершённого вычисления; содержимое — строковый id.
pub const TAG_PENDING: u8 = 0xE2;
/// Пользовательский тип; содержимое — пара [имя, данные].
pub const TAG_CUSTOM: u8 = 0xE3;
/// Ошибка как данные; содержимое — сериализованная ошибка.
pub const TAG_ERROR: u8 = 0xE4;
