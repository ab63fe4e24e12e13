/// Ordered, append-only store of encoded fragments for one session.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Vec<u8>>,
    total_bytes: usize,
}

impl ChunkBuffer {
    /// Appends a fragment. Empty fragments carry nothing and are skipped.
    pub fn push(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.total_bytes += chunk.len();
        self.chunks.push(chunk);
    }

    /// Number of buffered fragments.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Sum of all fragment lengths.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Concatenates every fragment in order and leaves the buffer empty.
    pub fn drain_concat(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_bytes);
        for chunk in self.chunks.drain(..) {
            out.extend_from_slice(&chunk);
        }
        self.total_bytes = 0;
        out
    }

    /// Drops every fragment.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.total_bytes = 0;
    }
}
