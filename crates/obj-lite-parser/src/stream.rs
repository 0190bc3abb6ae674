// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chunked input: UTF-8 decoding and line splitting across chunk boundaries
//!
//! Chunks are consumed strictly in arrival order. Awaiting the next chunk
//! is the only suspension point; every line is handled synchronously.

use crate::builder::ObjBuilder;
use futures_core::Stream;
use futures_util::io::{AsyncRead, AsyncReadExt};
use futures_util::{pin_mut, StreamExt};
use memchr::memchr;
use obj_lite_model::{LoadOptions, ObjData, ParseError, Result};
use std::io;

/// Read buffer size for [`load_obj_reader`]
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Splits text chunks into `\n`-terminated lines
///
/// The segment after the last newline of a chunk is held back until the next
/// chunk (or [`LineSplitter::finish`]) completes it.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: String,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text held back waiting for its newline
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Append a chunk and emit every line it completes
    pub fn push<F>(&mut self, chunk: &str, mut on_line: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        let mut search = self.pending.len();
        self.pending.push_str(chunk);

        let mut start = 0;
        while let Some(offset) = memchr(b'\n', &self.pending.as_bytes()[search..]) {
            let end = search + offset;
            on_line(&self.pending[start..end])?;
            start = end + 1;
            search = start;
        }
        self.pending.drain(..start);
        Ok(())
    }

    /// Emit whatever is left after the final chunk
    pub fn finish<F>(&mut self, mut on_line: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        if self.pending.is_empty() {
            return Ok(());
        }
        let line = std::mem::take(&mut self.pending);
        on_line(&line)
    }
}

/// Decodes UTF-8 byte chunks, carrying a multi-byte character split across
/// two chunks over to the next call
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    partial: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no incomplete sequence is pending
    pub fn is_empty(&self) -> bool {
        self.partial.is_empty()
    }

    /// Decode as much of `bytes` (after any carried-over prefix) as forms
    /// complete characters
    pub fn decode(&mut self, bytes: &[u8]) -> Result<String> {
        if self.partial.is_empty() {
            return match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_string()),
                Err(err) => self.split_incomplete(bytes, err),
            };
        }

        let mut joined = std::mem::take(&mut self.partial);
        joined.extend_from_slice(bytes);
        match String::from_utf8(joined) {
            Ok(text) => Ok(text),
            Err(err) => {
                let utf8_error = err.utf8_error();
                let joined = err.into_bytes();
                self.split_incomplete(&joined, utf8_error)
            }
        }
    }

    fn split_incomplete(&mut self, bytes: &[u8], err: std::str::Utf8Error) -> Result<String> {
        // error_len() is None only for a sequence cut short by the chunk end
        if err.error_len().is_some() {
            return Err(ParseError::encoding(err.to_string()));
        }
        let valid = err.valid_up_to();
        let text = std::str::from_utf8(&bytes[..valid])
            .map_err(|e| ParseError::encoding(e.to_string()))?
            .to_string();
        self.partial = bytes[valid..].to_vec();
        Ok(text)
    }

    /// Fail if the input ended inside a multi-byte character
    pub fn finish(&self) -> Result<()> {
        if self.partial.is_empty() {
            Ok(())
        } else {
            Err(ParseError::encoding(format!(
                "input ends with {} bytes of an incomplete UTF-8 sequence",
                self.partial.len()
            )))
        }
    }
}

/// Push-style ingestion of one OBJ file
///
/// Feed chunks in order, then call [`ObjIngestion::finish`].
pub struct ObjIngestion {
    decoder: Utf8ChunkDecoder,
    splitter: LineSplitter,
    builder: ObjBuilder,
}

impl ObjIngestion {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            decoder: Utf8ChunkDecoder::new(),
            splitter: LineSplitter::new(),
            builder: ObjBuilder::new(options),
        }
    }

    /// Feed a chunk of raw bytes
    pub fn feed(&mut self, bytes: &[u8]) -> Result<()> {
        let text = self.decoder.decode(bytes)?;
        let builder = &mut self.builder;
        self.splitter.push(&text, |line| builder.push_line(line))
    }

    /// Feed a chunk of already-decoded text
    pub fn feed_str(&mut self, text: &str) -> Result<()> {
        if !self.decoder.is_empty() {
            return Err(ParseError::encoding(
                "text chunk follows an incomplete UTF-8 sequence",
            ));
        }
        let builder = &mut self.builder;
        self.splitter.push(text, |line| builder.push_line(line))
    }

    /// Flush the last line and finalize the model
    pub fn finish(mut self) -> Result<ObjData> {
        self.decoder.finish()?;
        let builder = &mut self.builder;
        self.splitter.finish(|line| builder.push_line(line))?;
        self.builder.finish()
    }
}

/// Ingest an OBJ file from a stream of byte (or text) chunks
///
/// # Example
///
/// ```rust,ignore
/// use futures_util::stream;
/// use obj_lite_parser::{load_obj, LoadOptions};
///
/// let chunks = stream::iter(vec![Ok::<_, std::io::Error>("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")]);
/// let data = load_obj(chunks, &LoadOptions::default()).await?;
/// assert_eq!(data.primitives().count(), 1);
/// ```
pub async fn load_obj<S, B>(stream: S, options: &LoadOptions) -> Result<ObjData>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    pin_mut!(stream);
    let mut ingestion = ObjIngestion::new(options.clone());
    while let Some(chunk) = stream.next().await {
        ingestion.feed(chunk?.as_ref())?;
    }
    ingestion.finish()
}

/// Ingest an OBJ file from an async reader
pub async fn load_obj_reader<R>(reader: R, options: &LoadOptions) -> Result<ObjData>
where
    R: AsyncRead,
{
    pin_mut!(reader);
    let mut ingestion = ObjIngestion::new(options.clone());
    let mut buffer = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        ingestion.feed(&buffer[..read])?;
    }
    ingestion.finish()
}
