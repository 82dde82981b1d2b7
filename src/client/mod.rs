// Copyright 2025 Aquifer

//! Регидратация: восстановление дерева значений из потока чанков или
//! одношагового payload'а.
//!
//! [`rehydrate`] возвращает дерево сразу после первого кадра; обещания
//! в нём завершаются независимо, по мере прихода кадров разрешения.

pub mod hydrated;
pub mod promise;
mod reader;
mod restore;

pub use hydrated::Hydrated;
pub use promise::{Promise, Settled};

use std::sync::Arc;

use tokio::io::AsyncRead;
use tracing::debug;

use crate::{
    chunk::FrameReader,
    codec::decode,
    error::{DecodeError, RehydrateError, TransportError},
    registry::SerializerRegistry,
};

use restore::{restore, ResolverTable};

/// Восстанавливает дерево из потока чанков.
///
/// Возвращается, как только декодирован первый кадр, не дожидаясь ни
/// одного кадра разрешения. Если плейсхолдеров нет, фоновая задача не
/// запускается и дерево уже полностью завершено; иначе одна задача на
/// поток читает кадры и завершает обещания.
pub async fn rehydrate<R>(
    registry: Arc<SerializerRegistry>,
    reader: R,
) -> Result<Hydrated, RehydrateError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    rehydrate_frames(registry, FrameReader::new(reader)).await
}

/// То же, но с лимитом кадра из настроек.
pub async fn rehydrate_with_settings<R>(
    registry: Arc<SerializerRegistry>,
    reader: R,
    settings: &crate::config::Settings,
) -> Result<Hydrated, RehydrateError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    rehydrate_frames(
        registry,
        FrameReader::with_max_frame_len(reader, settings.max_frame_len),
    )
    .await
}

async fn rehydrate_frames<R>(
    registry: Arc<SerializerRegistry>,
    mut frames: FrameReader<R>,
) -> Result<Hydrated, RehydrateError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let first = frames
        .next_frame()
        .await?
        .ok_or(RehydrateError::Transport(TransportError::EmptyStream))?;
    let wire = decode(&first).map_err(RehydrateError::Decode)?;

    let mut resolvers = ResolverTable::new();
    let tree = restore(&registry, wire, &mut resolvers).map_err(RehydrateError::Decode)?;

    if resolvers.is_empty() {
        debug!("initial chunk has no placeholders, stream fully settled");
    } else {
        debug!(pending = resolvers.len(), "spawning background frame reader");
        tokio::spawn(reader::drive(registry, frames, resolvers));
    }
    Ok(tree)
}

/// Восстанавливает дерево из одношагового payload'а (eager-путь).
///
/// Плейсхолдеров здесь быть не может: их наличие — ошибка формата,
/// а не повод ждать кадров, которых не будет.
pub fn hydrate_value(
    registry: &SerializerRegistry,
    bytes: &[u8],
) -> Result<Hydrated, DecodeError> {
    let wire = decode(bytes)?;
    let mut resolvers = ResolverTable::new();
    let tree = restore(registry, wire, &mut resolvers)?;
    if !resolvers.is_empty() {
        return Err(DecodeError::UnexpectedPlaceholder);
    }
    Ok(tree)
}
