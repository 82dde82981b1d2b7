// Copyright 2025 Aquifer

//! Производящая сторона чанк-протокола.
//!
//! Начальный кадр уходит сразу после streaming-прохода; собранные
//! вычисления гонятся наперегонки, и кадры разрешения пишутся в
//! порядке фактического завершения, а не объявления. Вложенные
//! обещания, обнаруженные в разрешённых значениях, встают в ту же
//! гонку, поэтому поток заканчивается только когда незакрытых id
//! не осталось.

use tokio::{io::AsyncWrite, task::JoinSet};
use tracing::{debug, instrument};

use crate::{
    codec::encode,
    error::StreamError,
    serialize::{PendingComputation, PendingIds, Serializer},
    value::{BoxError, Value},
};

use super::{
    frame::write_frame,
    resolution::{ResolutionChunk, ResolutionOutcome},
};

pub struct ChunkWriter {
    serializer: Serializer,
}

impl ChunkWriter {
    pub fn new(serializer: Serializer) -> Self {
        Self { serializer }
    }

    /// Сериализует дерево в поток кадров.
    ///
    /// Возвращается после того, как каждый объявленный плейсхолдер
    /// получил ровно один кадр разрешения. Для дерева без обещаний
    /// поток состоит из одного начального кадра.
    #[instrument(skip_all)]
    pub async fn stream<W>(&self, value: Value, w: &mut W) -> Result<(), StreamError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut ids = PendingIds::new();
        let mut pending = Vec::new();
        let initial = self.serializer.streaming(value, &mut ids, &mut pending)?;
        write_frame(w, &encode(&initial)?).await?;

        if pending.is_empty() {
            debug!("no pending computations, stream complete after initial chunk");
            return Ok(());
        }

        let mut race: JoinSet<(String, Result<Value, BoxError>)> = JoinSet::new();
        spawn_pending(&mut race, &mut pending);

        let mut settled = 0usize;
        while let Some(joined) = race.join_next().await {
            let (id, outcome) = joined.map_err(|e| StreamError::Background(e.to_string()))?;
            let chunk = match outcome {
                Ok(value) => {
                    // разрешённое значение может содержать новые обещания
                    let wire = self.serializer.streaming(value, &mut ids, &mut pending)?;
                    spawn_pending(&mut race, &mut pending);
                    ResolutionChunk::resolved(id, wire)
                }
                Err(error) => {
                    ResolutionChunk::rejected(id, self.serializer.error_payload(error.as_ref()))
                }
            };
            write_frame(w, &encode(&chunk.to_wire())?).await?;
            settled += 1;
            debug!(
                id = %chunk.id,
                rejected = matches!(chunk.outcome, ResolutionOutcome::Rejected(_)),
                settled,
                "resolution chunk written"
            );
        }
        Ok(())
    }
}

fn spawn_pending(
    race: &mut JoinSet<(String, Result<Value, BoxError>)>,
    pending: &mut Vec<PendingComputation>,
) {
    for PendingComputation { id, future } in pending.drain(..) {
        race.spawn(async move { (id, future.await) });
    }
}
