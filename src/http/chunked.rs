//! Chunked response streaming.
//!
//! The transport registers one or more sinks on the response while setting it
//! up; every chunk a handler writes is handed to all of them in registration
//! order. A sink registered later only sees the chunks written after it.

use crate::error::{Error, Result};

/// A piece of a streamed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Text(String),
    Bytes(Vec<u8>),
}

impl Chunk {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Text(s) => s.as_bytes(),
            Chunk::Bytes(b) => b.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for Chunk {
    fn from(s: &str) -> Self {
        Chunk::Text(s.to_string())
    }
}

impl From<String> for Chunk {
    fn from(s: String) -> Self {
        Chunk::Text(s)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(b: Vec<u8>) -> Self {
        Chunk::Bytes(b)
    }
}

impl From<&[u8]> for Chunk {
    fn from(b: &[u8]) -> Self {
        Chunk::Bytes(b.to_vec())
    }
}

pub type ChunkSink = Box<dyn FnMut(&Chunk) + Send>;

#[derive(Default)]
pub struct ChunkStream {
    chunked: bool,
    sinks: Vec<ChunkSink>,
}

impl ChunkStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set once the first chunk was written, never cleared.
    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    pub fn has_sinks(&self) -> bool {
        !self.sinks.is_empty()
    }

    pub fn on_write_chunk<F>(&mut self, sink: F)
    where
        F: FnMut(&Chunk) + Send + 'static,
    {
        self.sinks.push(Box::new(sink));
    }

    pub fn write_chunk(&mut self, chunk: impl Into<Chunk>) -> Result<()> {
        self.chunked = true;
        if self.sinks.is_empty() {
            return Err(Error::UnsupportedOperation(
                "transport does not support chunked responses",
            ));
        }
        let chunk = chunk.into();
        for sink in self.sinks.iter_mut() {
            sink(&chunk);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<Chunk>>>, impl FnMut(&Chunk) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        (seen, move |c: &Chunk| sink_seen.lock().unwrap().push(c.clone()))
    }

    #[test]
    fn no_sink_is_unsupported() {
        let mut stream = ChunkStream::new();
        let err = stream.write_chunk("hello").unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        assert!(stream.is_chunked());
    }

    #[test]
    fn every_sink_gets_the_chunk() {
        let mut stream = ChunkStream::new();
        let (a, sink_a) = recorder();
        let (b, sink_b) = recorder();
        stream.on_write_chunk(sink_a);
        stream.on_write_chunk(sink_b);

        stream.write_chunk(vec![1u8, 2, 3]).unwrap();
        assert_eq!(*a.lock().unwrap(), vec![Chunk::Bytes(vec![1, 2, 3])]);
        assert_eq!(*b.lock().unwrap(), vec![Chunk::Bytes(vec![1, 2, 3])]);
    }

    #[test]
    fn late_sink_misses_earlier_chunks() {
        let mut stream = ChunkStream::new();
        let (early, sink) = recorder();
        stream.on_write_chunk(sink);
        stream.write_chunk("one").unwrap();

        let (late, sink) = recorder();
        stream.on_write_chunk(sink);
        stream.write_chunk("two").unwrap();

        assert_eq!(early.lock().unwrap().len(), 2);
        assert_eq!(*late.lock().unwrap(), vec![Chunk::from("two")]);
    }
}
