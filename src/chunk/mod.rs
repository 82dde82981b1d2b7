// Copyright 2025 Aquifer

//! Чанк-протокол AQS: доставка дерева и независимых разрешений.
//!
//! Первый кадр потока — обработанное начальное дерево с
//! плейсхолдерами; кадры 2..N — сообщения разрешения, по одному на
//! id, в порядке фактического завершения вычислений.

pub mod frame;
pub mod resolution;
pub mod writer;

pub use frame::{write_frame, FrameReader, DEFAULT_MAX_FRAME_LEN};
pub use resolution::{ResolutionChunk, ResolutionOutcome};
pub use writer::ChunkWriter;
