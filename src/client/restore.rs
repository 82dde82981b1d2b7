//! Восстановление проводного дерева в [`Hydrated`].
//!
//! Каждый плейсхолдер превращается в живое обещание, а его резолвер
//! регистрируется в таблице id → отправитель; таблицу ведёт только
//! фоновый читатель потока, поэтому блокировки не нужны.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::{
    codec::WireValue,
    error::DecodeError,
    registry::SerializerRegistry,
};

use super::{
    hydrated::Hydrated,
    promise::{Promise, Settled},
};

/// Таблица резолверов незавершённых обещаний текущего потока.
pub(crate) type ResolverTable = HashMap<String, oneshot::Sender<Settled>>;

/// Восстанавливает дерево, заполняя таблицу резолверов.
pub(crate) fn restore(
    registry: &SerializerRegistry,
    wire: WireValue,
    resolvers: &mut ResolverTable,
) -> Result<Hydrated, DecodeError> {
    match wire {
        WireValue::Null => Ok(Hydrated::Null),
        WireValue::Bool(b) => Ok(Hydrated::Bool(b)),
        WireValue::Int(i) => Ok(Hydrated::Int(i)),
        WireValue::Float(f) => Ok(Hydrated::Float(f)),
        WireValue::Str(s) => Ok(Hydrated::Str(s)),
        WireValue::Bytes(b) => Ok(Hydrated::Bytes(b)),
        WireValue::Date(d) => Ok(Hydrated::Date(d)),
        WireValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(restore(registry, item, resolvers)?);
            }
            Ok(Hydrated::Array(out))
        }
        WireValue::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (key, val) in pairs {
                out.push((key, restore(registry, val, resolvers)?));
            }
            Ok(Hydrated::Map(out))
        }
        WireValue::Resolved(inner) => {
            let settled = restore(registry, *inner, resolvers)?;
            Ok(Hydrated::Promise(Promise::ready(Ok(settled))))
        }
        WireValue::Rejected(payload) => Ok(Hydrated::Promise(Promise::ready(Err(
            registry.rebuild_error(&payload),
        )))),
        WireValue::Pending(id) => {
            if resolvers.contains_key(&id) {
                return Err(DecodeError::DuplicatePlaceholder(id));
            }
            let (tx, rx) = oneshot::channel();
            resolvers.insert(id, tx);
            Ok(Hydrated::Promise(Promise::waiting(rx)))
        }
        WireValue::Error(payload) => Ok(Hydrated::Error(registry.rebuild_error(&payload))),
        WireValue::Custom { name, data } => {
            let record = registry
                .type_by_name(&name)
                .ok_or_else(|| DecodeError::UnregisteredType(name.clone()))?;
            let payload = restore(registry, *data, resolvers)?;
            let value = (record.deserialize)(payload)?;
            Ok(Hydrated::Custom { name, value })
        }
        WireValue::Extension(tag, inner) => Ok(Hydrated::Extension(
            tag,
            Box::new(restore(registry, *inner, resolvers)?),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::ErrorPayload,
        value::{HttpError, RemoteError},
    };

    fn registry() -> SerializerRegistry {
        SerializerRegistry::with_builtins()
    }

    /// Тест проверяет, что Resolved восстанавливается готовым обещанием
    /// с исходным значением.
    #[tokio::test]
    async fn test_restore_resolved() {
        let wire = WireValue::Resolved(Box::new(WireValue::map([(
            "name",
            WireValue::Str("Alice".into()),
        )])));
        let mut resolvers = ResolverTable::new();
        let tree = restore(&registry(), wire, &mut resolvers).unwrap();
        assert!(resolvers.is_empty());

        let Hydrated::Promise(p) = tree else {
            panic!("Expected promise");
        };
        let settled = p.wait().await.unwrap();
        assert_eq!(settled.get("name").and_then(Hydrated::as_str), Some("Alice"));
    }

    /// Тест проверяет, что Rejected восстанавливается обещанием,
    /// отклоняющимся ошибкой с исходным сообщением.
    #[tokio::test]
    async fn test_restore_rejected() {
        let wire = WireValue::Rejected(
            ErrorPayload::new("HttpError", "Failed to load").with_detail(WireValue::Int(500)),
        );
        let mut resolvers = ResolverTable::new();
        let tree = restore(&registry(), wire, &mut resolvers).unwrap();

        let Hydrated::Promise(p) = tree else {
            panic!("Expected promise");
        };
        let err = p.wait().await.unwrap_err();
        let http = err.downcast_ref::<HttpError>().unwrap();
        assert_eq!(http.message, "Failed to load");
        assert_eq!(http.status, 500);
    }

    /// Тест проверяет регистрацию резолвера для плейсхолдера.
    #[test]
    fn test_restore_pending_registers_resolver() {
        let mut resolvers = ResolverTable::new();
        let tree = restore(&registry(), WireValue::Pending("4".into()), &mut resolvers).unwrap();
        assert!(matches!(tree, Hydrated::Promise(p) if !p.is_ready()));
        assert!(resolvers.contains_key("4"));
    }

    /// Тест проверяет, что повторный id в одном дереве — ошибка формата.
    #[test]
    fn test_restore_duplicate_placeholder() {
        let wire = WireValue::Array(vec![
            WireValue::Pending("1".into()),
            WireValue::Pending("1".into()),
        ]);
        let mut resolvers = ResolverTable::new();
        let err = restore(&registry(), wire, &mut resolvers).unwrap_err();
        assert!(matches!(err, DecodeError::DuplicatePlaceholder(id) if id == "1"));
    }

    /// Тест проверяет, что ошибка с незнакомым именем восстанавливается
    /// как RemoteError внутри дерева.
    #[test]
    fn test_restore_unknown_error_name() {
        let wire = WireValue::Error(ErrorPayload::new("WeirdError", "odd"));
        let mut resolvers = ResolverTable::new();
        let tree = restore(&registry(), wire, &mut resolvers).unwrap();
        let Hydrated::Error(err) = tree else {
            panic!("Expected error node");
        };
        assert_eq!(err.downcast_ref::<RemoteError>().unwrap().name, "WeirdError");
    }

    /// Тест проверяет, что незарегистрированный пользовательский тип —
    /// ошибка декодирования с именем типа.
    #[test]
    fn test_restore_unregistered_custom() {
        let wire = WireValue::Custom {
            name: "Ghost".into(),
            data: Box::new(WireValue::Null),
        };
        let mut resolvers = ResolverTable::new();
        let err = restore(&registry(), wire, &mut resolvers).unwrap_err();
        assert!(matches!(err, DecodeError::UnregisteredType(name) if name == "Ghost"));
    }
}
