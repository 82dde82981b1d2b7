//! Живое обещание на принимающей стороне.

use tokio::sync::oneshot;

use crate::value::{BoxError, TransportFailure};

use super::hydrated::Hydrated;

/// Исход обещания: восстановленное значение или восстановленная ошибка.
pub type Settled = Result<Hydrated, BoxError>;

/// Обещание, возвращаемое регидратацией.
///
/// Для `Resolved`/`Rejected` на проводе обещание создаётся уже
/// завершённым; для плейсхолдера — ждёт, пока фоновый читатель не
/// передаст исход через свой резолвер. Обещание завершается ровно один
/// раз и не остаётся висеть: закрытие транспорта отклоняет его
/// [`TransportFailure`].
#[derive(Debug)]
pub struct Promise {
    state: PromiseState,
}

#[derive(Debug)]
enum PromiseState {
    Ready(Box<Settled>),
    Waiting(oneshot::Receiver<Settled>),
}

impl Promise {
    pub(crate) fn ready(settled: Settled) -> Self {
        Self {
            state: PromiseState::Ready(Box::new(settled)),
        }
    }

    pub(crate) fn waiting(rx: oneshot::Receiver<Settled>) -> Self {
        Self {
            state: PromiseState::Waiting(rx),
        }
    }

    /// Завершено ли обещание без ожидания.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PromiseState::Ready(_))
    }

    /// Ждёт исход обещания.
    pub async fn wait(self) -> Settled {
        match self.state {
            PromiseState::Ready(settled) => *settled,
            PromiseState::Waiting(rx) => match rx.await {
                Ok(settled) => settled,
                // резолвер исчез, не прислав исход
                Err(_) => Err(Box::new(TransportFailure::new(
                    "resolver dropped before settlement",
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет, что готовое обещание отдаёт значение сразу.
    #[tokio::test]
    async fn test_ready_promise() {
        let p = Promise::ready(Ok(Hydrated::Int(5)));
        assert!(p.is_ready());
        assert_eq!(p.wait().await.unwrap().as_int(), Some(5));
    }

    /// Тест проверяет, что ждущее обещание завершается отправкой
    /// в резолвер.
    #[tokio::test]
    async fn test_waiting_promise_settles() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let p = Promise::waiting(rx);
        assert!(!p.is_ready());

        tx.send(Ok(Hydrated::Str("done".into()))).unwrap();
        assert_eq!(p.wait().await.unwrap().as_str(), Some("done"));
    }

    /// Тест проверяет, что потерянный резолвер превращается в отказ
    /// транспорта, а не в вечное ожидание.
    #[tokio::test]
    async fn test_dropped_resolver_rejects() {
        let (tx, rx) = tokio::sync::oneshot::channel::<Settled>();
        drop(tx);

        let err = Promise::waiting(rx).wait().await.unwrap_err();
        assert!(err.downcast_ref::<TransportFailure>().is_some());
    }
}
