// Copyright 2025 Aquifer

//! Кадрирование потока чанков.
//!
//! Поток — конкатенация кадров `[4 байта BE длины][payload AQF]`.
//! Читатель буферизует вход до полного кадра и отличает чистый конец
//! потока (ноль байт на границе кадра) от обрыва посреди кадра.

use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::error::TransportError;

/// Максимальная длина кадра по умолчанию (256 МиБ).
pub const DEFAULT_MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// Записывает один кадр и сбрасывает буфер.
///
/// Flush на каждом кадре: потребитель должен видеть кадр разрешения
/// сразу после завершения вычисления, а не после закрытия потока.
pub async fn write_frame<W>(w: &mut W, payload: &[u8]) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > u32::MAX as usize {
        return Err(TransportError::FrameTooLarge {
            len: payload.len(),
            max: u32::MAX as usize,
        });
    }
    w.write_u32(payload.len() as u32).await?;
    w.write_all(payload).await?;
    w.flush().await?;
    trace!(len = payload.len(), "frame written");
    Ok(())
}

/// Инкрементальный читатель кадров.
///
/// Терпит кадры, разорванные между чтениями нижележащего потока:
/// докапливает байты в буфере и отдаёт кадр только целиком.
pub struct FrameReader<R> {
    inner: R,
    buf: BytesMut,
    max_frame_len: usize,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_max_frame_len(inner, DEFAULT_MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(inner: R, max_frame_len: usize) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(4 * 1024),
            max_frame_len,
        }
    }

    /// Следующий кадр, `None` — чистый конец потока.
    ///
    /// Конец потока посреди кадра (объявленная длина не добрана) — это
    /// [`TransportError::Truncated`], отличимый от чистого конца.
    pub async fn next_frame(&mut self) -> Result<Option<Bytes>, TransportError> {
        loop {
            if let Some(frame) = self.take_buffered_frame()? {
                trace!(len = frame.len(), "frame decoded");
                return Ok(Some(frame));
            }

            let read = self.inner.read_buf(&mut self.buf).await?;
            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(TransportError::Truncated {
                    buffered: self.buf.len(),
                });
            }
        }
    }

    fn take_buffered_frame(&mut self) -> Result<Option<Bytes>, TransportError> {
        if self.buf.len() < 4 {
            return Ok(None);
        }
        let len = u32::from_be_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]) as usize;
        if len > self.max_frame_len {
            return Err(TransportError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }
        if self.buf.len() < 4 + len {
            // ограничение памяти: держим не больше одного кадра
            self.buf.reserve(4 + len - self.buf.len());
            return Ok(None);
        }
        self.buf.advance(4);
        Ok(Some(self.buf.split_to(len).freeze()))
    }
}
