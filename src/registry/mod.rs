//! Реестры сериализаторов пользовательских типов, ошибок и контекста.
//!
//! Реестр — явный объект, передаваемый кодеру и декодеру через
//! конструктор; процессных глобалов нет, поэтому независимые
//! конфигурации могут сосуществовать в одном процессе.
//!
//! Имена уникальны в пределах каждой таблицы: повторная регистрация —
//! ошибка конфигурации, таблица при этом не изменяется. Поиск идёт в
//! порядке регистрации, побеждает первый совпавший распознаватель
//! (пересечения распознавателей не валидируются).

mod builtin;
mod record;

pub use record::{ContextSerializer, DynError, ErrorSerializer, TypeSerializer};

use crate::{
    codec::ErrorPayload,
    error::RegistryError,
    value::{AnyValue, BoxError},
};

pub struct SerializerRegistry {
    types: Vec<TypeSerializer>,
    errors: Vec<ErrorSerializer>,
    contexts: Vec<ContextSerializer>,
    /// Запасной сериализатор, применяемый когда ни один распознаватель
    /// ошибок не совпал; не входит в таблицу и переживает `reset()`.
    generic: ErrorSerializer,
}

impl SerializerRegistry {
    /// Пустой реестр (без базовых сериализаторов ошибок).
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            errors: Vec::new(),
            contexts: Vec::new(),
            generic: builtin::generic_error_serializer(),
        }
    }

    /// Реестр с базовым набором: IoError, HttpError и общий запасной.
    pub fn with_builtins() -> Self {
        Self {
            errors: builtin::builtin_error_serializers(),
            ..Self::new()
        }
    }

    /// Сброс к базовому набору. Только для тестовой изоляции.
    pub fn reset(&mut self) {
        *self = Self::with_builtins();
    }

    pub fn register_type(&mut self, record: TypeSerializer) -> Result<(), RegistryError> {
        if self.types.iter().any(|t| t.name == record.name) {
            return Err(RegistryError::DuplicateName(record.name));
        }
        self.types.push(record);
        Ok(())
    }

    pub fn register_error(&mut self, record: ErrorSerializer) -> Result<(), RegistryError> {
        if record.name == self.generic.name || self.errors.iter().any(|e| e.name == record.name) {
            return Err(RegistryError::DuplicateName(record.name));
        }
        self.errors.push(record);
        Ok(())
    }

    pub fn register_context(&mut self, record: ContextSerializer) -> Result<(), RegistryError> {
        if self.contexts.iter().any(|c| c.name == record.name) {
            return Err(RegistryError::DuplicateName(record.name));
        }
        self.contexts.push(record);
        Ok(())
    }

    /// Первый сериализатор типов, чей распознаватель совпал.
    pub fn find_type(&self, value: &AnyValue) -> Option<&TypeSerializer> {
        self.types.iter().find(|t| (t.recognize)(value))
    }

    /// Первый сериализатор ошибок, чей распознаватель совпал.
    pub fn find_error(&self, error: &DynError) -> Option<&ErrorSerializer> {
        self.errors.iter().find(|e| (e.recognize)(error))
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeSerializer> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn error_by_name(&self, name: &str) -> Option<&ErrorSerializer> {
        self.errors
            .iter()
            .find(|e| e.name == name)
            .or((name == self.generic.name).then_some(&self.generic))
    }

    pub fn context_by_name(&self, name: &str) -> Option<&ContextSerializer> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Сериализует ошибку первым совпавшим сериализатором, либо запасным.
    pub fn serialize_error(&self, error: &DynError, include_stack: bool) -> ErrorPayload {
        let record = self.find_error(error).unwrap_or(&self.generic);
        (record.serialize)(error, include_stack)
    }

    /// Восстанавливает ошибку по имени из payload'а.
    ///
    /// Незнакомое имя не роняет декодирование: ошибка восстанавливается
    /// как [`crate::value::RemoteError`] с исходными именем и сообщением.
    pub fn rebuild_error(&self, payload: &ErrorPayload) -> BoxError {
        let record = self.error_by_name(&payload.name).unwrap_or(&self.generic);
        (record.deserialize)(payload)
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::Hydrated,
        codec::WireValue,
        value::{HttpError, RemoteError, Value},
    };

    fn point_serializer() -> TypeSerializer {
        TypeSerializer::of::<(i64, i64), _, _>(
            "Point",
            |p| Value::map([("x", Value::Int(p.0)), ("y", Value::Int(p.1))]),
            |_| Ok((0, 0)),
        )
    }

    /// Тест проверяет, что повторная регистрация имени падает и не
    /// меняет поведение первой регистрации.
    #[test]
    fn test_duplicate_type_name_rejected() {
        let mut registry = SerializerRegistry::with_builtins();
        registry.register_type(point_serializer()).unwrap();

        let dup = TypeSerializer::of::<(i64, i64), _, _>(
            "Point",
            |_| Value::Null,
            |_| Ok((9, 9)),
        );
        let err = registry.register_type(dup).unwrap_err();
        assert!(err.to_string().contains("Point"));

        // первая регистрация всё ещё сериализует по-старому
        let value: Box<crate::value::AnyValue> = Box::new((10i64, 20i64));
        let record = registry.find_type(value.as_ref()).unwrap();
        let serialized = (record.serialize)(value.as_ref()).unwrap();
        assert!(matches!(serialized, Value::Map(pairs) if pairs.len() == 2));
    }

    /// Тест проверяет, что имя запасного сериализатора ошибок тоже занято.
    #[test]
    fn test_generic_error_name_reserved() {
        let mut registry = SerializerRegistry::with_builtins();
        let record = ErrorSerializer::of::<HttpError, _, _>(
            "Error",
            |e, _| crate::codec::ErrorPayload::new("Error", e.message.clone()),
            |p| HttpError::new(500, p.message.clone()),
        );
        assert!(registry.register_error(record).is_err());
    }

    /// Тест проверяет порядок поиска: первый совпавший распознаватель
    /// побеждает.
    #[test]
    fn test_first_match_wins() {
        let mut registry = SerializerRegistry::new();
        registry
            .register_error(ErrorSerializer::of::<HttpError, _, _>(
                "First",
                |e, _| crate::codec::ErrorPayload::new("First", e.message.clone()),
                |p| HttpError::new(500, p.message.clone()),
            ))
            .unwrap();
        registry
            .register_error(ErrorSerializer::of::<HttpError, _, _>(
                "Second",
                |e, _| crate::codec::ErrorPayload::new("Second", e.message.clone()),
                |p| HttpError::new(500, p.message.clone()),
            ))
            .unwrap();

        let error = HttpError::new(404, "missing");
        let payload = registry.serialize_error(&error, false);
        assert_eq!(payload.name, "First");
    }

    /// Тест проверяет, что `reset` убирает пользовательские регистрации
    /// и возвращает базовые.
    #[test]
    fn test_reset_restores_baseline() {
        let mut registry = SerializerRegistry::with_builtins();
        registry.register_type(point_serializer()).unwrap();
        assert!(registry.type_by_name("Point").is_some());

        registry.reset();
        assert!(registry.type_by_name("Point").is_none());
        assert!(registry.error_by_name("HttpError").is_some());
        assert!(registry.error_by_name("IoError").is_some());
        // повторная регистрация после сброса проходит
        registry.register_type(point_serializer()).unwrap();
    }

    /// Тест проверяет round-trip HttpError через реестр.
    #[test]
    fn test_http_error_roundtrip() {
        let registry = SerializerRegistry::with_builtins();
        let payload = registry.serialize_error(&HttpError::new(404, "not found"), false);
        assert_eq!(payload.name, "HttpError");
        assert_eq!(payload.detail.as_deref(), Some(&WireValue::Int(404)));

        let rebuilt = registry.rebuild_error(&payload);
        let http = rebuilt.downcast_ref::<HttpError>().unwrap();
        assert_eq!(http.status, 404);
        assert_eq!(http.message, "not found");
    }

    /// Тест проверяет, что незнакомое имя ошибки восстанавливается как
    /// `RemoteError`, а не ошибкой декодирования.
    #[test]
    fn test_unknown_error_name_falls_back() {
        let registry = SerializerRegistry::with_builtins();
        let payload = crate::codec::ErrorPayload::new("FancyError", "kaboom");
        let rebuilt = registry.rebuild_error(&payload);
        let remote = rebuilt.downcast_ref::<RemoteError>().unwrap();
        assert_eq!(remote.name, "FancyError");
        assert_eq!(remote.message, "kaboom");
    }

    /// Тест проверяет, что стек включается только по запросу.
    #[test]
    fn test_stack_only_in_dev_mode() {
        let registry = SerializerRegistry::with_builtins();
        let error = HttpError::new(500, "boom");
        assert!(registry.serialize_error(&error, false).stack.is_none());
        assert!(registry.serialize_error(&error, true).stack.is_some());
    }

    /// Тест проверяет сериализацию контекстного значения по имени.
    #[test]
    fn test_context_roundtrip_by_name() {
        let mut registry = SerializerRegistry::with_builtins();
        registry
            .register_context(ContextSerializer::of::<String, _, _>(
                "locale",
                |s| Value::Str(s.clone()),
                |hydrated| match hydrated {
                    Hydrated::Str(s) => Ok(s),
                    other => Err(crate::error::DecodeError::Malformed(format!(
                        "locale is not a string: {other:?}"
                    ))),
                },
            ))
            .unwrap();

        let record = registry.context_by_name("locale").unwrap();
        let value: Box<crate::value::AnyValue> = Box::new("ru-RU".to_string());
        let serialized = (record.serialize)(value.as_ref()).unwrap();
        assert!(matches!(serialized, Value::Str(s) if s == "ru-RU"));

        let restored = (record.deserialize)(Hydrated::Str("ru-RU".into())).unwrap();
        assert_eq!(restored.downcast_ref::<String>().unwrap(), "ru-RU");
    }
}
