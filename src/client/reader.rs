//! Фоновый читатель кадров разрешения.
//!
//! Кадры читаются строго последовательно: следующий не берётся, пока
//! предыдущий не декодирован и не доставлен — память ограничена одним
//! кадром в полёте. Любой исход потока завершает все оставшиеся
//! обещания: чистый конец раньше времени, обрыв транспорта и
//! испорченный кадр отклоняют их [`TransportFailure`], чтобы ни одно
//! не зависло навсегда.

use std::sync::Arc;

use tokio::io::AsyncRead;
use tracing::{debug, warn};

use crate::{
    chunk::{FrameReader, ResolutionChunk, ResolutionOutcome},
    codec::decode,
    registry::SerializerRegistry,
    value::TransportFailure,
};

use super::restore::{restore, ResolverTable};

pub(crate) async fn drive<R>(
    registry: Arc<SerializerRegistry>,
    mut frames: FrameReader<R>,
    mut resolvers: ResolverTable,
) where
    R: AsyncRead + Unpin,
{
    while !resolvers.is_empty() {
        let frame = match frames.next_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                warn!(
                    outstanding = resolvers.len(),
                    "stream ended with unresolved placeholders"
                );
                abort_all(
                    &mut resolvers,
                    "stream ended before all pending values resolved",
                );
                return;
            }
            Err(error) => {
                warn!(%error, outstanding = resolvers.len(), "transport error mid-stream");
                abort_all(&mut resolvers, &format!("transport error: {error}"));
                return;
            }
        };

        let chunk = match decode(&frame).and_then(ResolutionChunk::from_wire) {
            Ok(chunk) => chunk,
            Err(error) => {
                // формат сломан: дальше по потоку доверять нечему
                warn!(%error, "malformed resolution frame, aborting stream");
                abort_all(&mut resolvers, &format!("malformed resolution frame: {error}"));
                return;
            }
        };

        let Some(resolver) = resolvers.remove(&chunk.id) else {
            warn!(id = %chunk.id, "resolution for unknown placeholder id, skipping");
            continue;
        };

        let settled = match chunk.outcome {
            ResolutionOutcome::Resolved(wire) => {
                // разрешённое значение может объявить новые плейсхолдеры
                match restore(&registry, wire, &mut resolvers) {
                    Ok(value) => Ok(value),
                    Err(error) => {
                        warn!(%error, id = %chunk.id, "failed to restore resolution value");
                        let reason = format!("malformed resolution value: {error}");
                        let _ = resolver
                            .send(Err(Box::new(TransportFailure::new(reason.clone()))));
                        abort_all(&mut resolvers, &reason);
                        return;
                    }
                }
            }
            ResolutionOutcome::Rejected(payload) => Err(registry.rebuild_error(&payload)),
        };

        debug!(id = %chunk.id, outstanding = resolvers.len(), "placeholder settled");
        // получателя могли уже бросить; это не ошибка потока
        let _ = resolver.send(settled);
    }
    debug!("all placeholders settled, background reader done");
}

fn abort_all(resolvers: &mut ResolverTable, reason: &str) {
    for (_, resolver) in resolvers.drain() {
        let _ = resolver.send(Err(Box::new(TransportFailure::new(reason))));
    }
}
