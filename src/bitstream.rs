//! Fixed-capacity bit streams.
//!
//! Bit `i` of a stream lives in byte `i / 8` at bit position `i % 8`, least
//! significant bit first. Both the position key and the match key use this
//! layout, so the board packer and the match packer share these types.

/// Writes bits into a fixed number of bytes.
#[derive(Debug, Clone)]
pub struct BitWriter<const BYTES: usize> {
    bytes: [u8; BYTES],
    pos: usize,
}

impl<const BYTES: usize> Default for BitWriter<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BYTES: usize> BitWriter<BYTES> {
    /// Capacity in bits.
    pub const CAPACITY: usize = BYTES * 8;

    pub fn new() -> Self {
        Self {
            bytes: [0; BYTES],
            pos: 0,
        }
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Append one bit. Returns `false` without writing when the stream is full.
    pub fn push(&mut self, bit: bool) -> bool {
        if self.pos >= Self::CAPACITY {
            return false;
        }
        if bit {
            self.bytes[self.pos / 8] |= 1 << (self.pos % 8);
        }
        self.pos += 1;
        true
    }

    /// Append `value` as a `width`-bit field, least significant bit first.
    ///
    /// Returns `false` if the field does not fit in the stream or `value`
    /// needs more than `width` bits; nothing is written then.
    pub fn push_bits(&mut self, value: u32, width: u32) -> bool {
        if width > u32::BITS || value.checked_shr(width).unwrap_or(0) != 0 {
            return false;
        }
        if self.pos + width as usize > Self::CAPACITY {
            return false;
        }
        for k in 0..width {
            self.push((value >> k) & 1 == 1);
        }
        true
    }

    /// Append `count` in unary: `count` one-bits and a terminating zero-bit.
    pub fn push_unary(&mut self, count: u32) -> bool {
        if self.pos + count as usize + 1 > Self::CAPACITY {
            return false;
        }
        for _ in 0..count {
            self.push(true);
        }
        self.push(false)
    }

    pub fn into_bytes(self) -> [u8; BYTES] {
        self.bytes
    }
}

/// Reads bits back in the order [`BitWriter`] wrote them.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    pub fn read(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.pos / 8)?;
        let bit = (byte >> (self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read one unary run. `None` if the stream ends before the terminating zero.
    pub fn read_unary(&mut self) -> Option<u32> {
        let mut count = 0;
        while self.read()? {
            count += 1;
        }
        Some(count)
    }

    /// Read a `width`-bit field written by [`BitWriter::push_bits`].
    pub fn read_bits(&mut self, width: u32) -> Option<u32> {
        let mut value = 0;
        for k in 0..width {
            if self.read()? {
                value |= 1 << k;
            }
        }
        Some(value)
    }
}
