//! Eager-режим: все вычисления завершаются до кодирования.
//!
//! Единственный await вызывающей стороны накрывает всё дерево, так что
//! общая задержка ограничена самым медленным вычислением.

use std::{future::Future, pin::Pin};

use crate::{codec::WireValue, error::EncodeError, value::Value};

use super::Serializer;

impl Serializer {
    /// Обрабатывает дерево, дожидаясь каждого обещания.
    ///
    /// Завершившееся значение оборачивается в `Resolved`, ошибка — в
    /// `Rejected`; протокольной ошибкой отклонение не является.
    pub async fn eager(&self, value: Value) -> Result<WireValue, EncodeError> {
        self.eager_boxed(value).await
    }

    // Рекурсия в async требует явного боксинга.
    fn eager_boxed<'a>(
        &'a self,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<WireValue, EncodeError>> + Send + 'a>> {
        Box::pin(async move {
            match value {
                Value::Promise(future) => match future.await {
                    Ok(settled) => Ok(WireValue::Resolved(Box::new(
                        self.eager_boxed(settled).await?,
                    ))),
                    Err(error) => Ok(WireValue::Rejected(self.error_payload(error.as_ref()))),
                },
                Value::Error(error) => Ok(WireValue::Error(self.error_payload(error.as_ref()))),
                Value::Custom(instance) => {
                    let record = self
                        .registry()
                        .find_type(instance.as_ref())
                        .ok_or(EncodeError::UnregisteredType)?;
                    let name = record.name.clone();
                    let payload = (record.serialize)(instance.as_ref())?;
                    let data = self.eager_boxed(payload).await?;
                    Ok(WireValue::Custom {
                        name,
                        data: Box::new(data),
                    })
                }
                Value::Date(date) => Ok(WireValue::Date(date)),
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.eager_boxed(item).await?);
                    }
                    Ok(WireValue::Array(out))
                }
                Value::Map(pairs) => {
                    let mut out = Vec::with_capacity(pairs.len());
                    for (key, val) in pairs {
                        out.push((key, self.eager_boxed(val).await?));
                    }
                    Ok(WireValue::Map(out))
                }
                Value::Null => Ok(WireValue::Null),
                Value::Bool(b) => Ok(WireValue::Bool(b)),
                Value::Int(i) => Ok(WireValue::Int(i)),
                Value::Float(f) => Ok(WireValue::Float(f)),
                Value::Str(s) => Ok(WireValue::Str(s)),
                Value::Bytes(b) => Ok(WireValue::Bytes(b)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        codec::WireValue,
        registry::SerializerRegistry,
        value::{HttpError, Value},
    };

    use super::super::Serializer;

    fn serializer() -> Serializer {
        Serializer::new(Arc::new(SerializerRegistry::with_builtins()))
    }

    /// Тест проверяет, что разрешённое обещание оборачивается в Resolved
    /// с рекурсивно обработанным значением.
    #[tokio::test]
    async fn test_eager_resolved_promise() {
        let value = Value::map([(
            "user",
            Value::resolved(Value::map([("name", Value::from("Alice"))])),
        )]);

        let wire = serializer().eager(value).await.unwrap();
        let WireValue::Map(pairs) = wire else {
            panic!("Expected map");
        };
        match &pairs[0].1 {
            WireValue::Resolved(inner) => {
                assert_eq!(
                    **inner,
                    WireValue::map([("name", WireValue::Str("Alice".into()))])
                );
            }
            other => panic!("Expected Resolved, got {other:?}"),
        }
    }

    /// Тест проверяет, что отклонённое обещание сериализуется как
    /// Rejected и не роняет обработку соседей.
    #[tokio::test]
    async fn test_eager_rejected_promise_keeps_siblings() {
        let value = Value::map([
            ("bad", Value::rejected(HttpError::new(500, "Failed to load"))),
            ("good", Value::Int(7)),
        ]);

        let wire = serializer().eager(value).await.unwrap();
        let WireValue::Map(pairs) = wire else {
            panic!("Expected map");
        };
        match &pairs[0].1 {
            WireValue::Rejected(payload) => {
                assert_eq!(payload.name, "HttpError");
                assert_eq!(payload.message, "Failed to load");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
        assert_eq!(pairs[1].1, WireValue::Int(7));
    }

    /// Тест проверяет вложенные обещания: внешнее Resolved содержит
    /// внутреннее Resolved.
    #[tokio::test]
    async fn test_eager_nested_promises() {
        let value = Value::resolved(Value::resolved(Value::from("deep")));
        let wire = serializer().eager(value).await.unwrap();
        match wire {
            WireValue::Resolved(outer) => match *outer {
                WireValue::Resolved(inner) => assert_eq!(*inner, WireValue::Str("deep".into())),
                other => panic!("Expected inner Resolved, got {other:?}"),
            },
            other => panic!("Expected outer Resolved, got {other:?}"),
        }
    }

    /// Тест проверяет, что стек попадает в сериализованную ошибку
    /// только в dev-режиме.
    #[tokio::test]
    async fn test_stack_follows_dev_mode() {
        let registry = Arc::new(SerializerRegistry::with_builtins());
        let dev = Serializer::with_settings(
            registry.clone(),
            &crate::config::Settings {
                dev_mode: true,
                ..Default::default()
            },
        );
        let prod = Serializer::with_settings(registry, &crate::config::Settings::default());

        let dev_wire = dev
            .eager(Value::error(HttpError::new(500, "boom")))
            .await
            .unwrap();
        let WireValue::Error(payload) = dev_wire else {
            panic!("Expected error node");
        };
        assert!(payload.stack.is_some());

        let prod_wire = prod
            .eager(Value::error(HttpError::new(500, "boom")))
            .await
            .unwrap();
        let WireValue::Error(payload) = prod_wire else {
            panic!("Expected error node");
        };
        assert!(payload.stack.is_none());
    }

    /// Тест проверяет, что незарегистрированный пользовательский тип —
    /// явная ошибка кодирования, а не тихий скаляр.
    #[tokio::test]
    async fn test_eager_unregistered_custom_type() {
        struct Mystery;
        let err = serializer()
            .eager(Value::custom(Mystery))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::EncodeError::UnregisteredType));
    }
}
