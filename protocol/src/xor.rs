//! Field obfuscation for the login request
//!
//! Username and password are XORed with a repeating three byte key before
//! they leave the process. The key index is the absolute byte position in
//! the field, so the transform is its own inverse and the server reverses it
//! by applying it once more.

/// Repeating key of the transform
pub const XOR3_KEYS: [u8; 3] = [0xFC, 0xCF, 0xAB];

/// Three byte XOR transform
///
/// The seed is the first field position that gets transformed; bytes before
/// it are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xor3 {
    start_offset: usize,
}

impl Xor3 {
    pub fn new(start_offset: usize) -> Self {
        Self { start_offset }
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn reset(&mut self, start_offset: usize) {
        self.start_offset = start_offset;
    }

    /// Transforms `data` in place
    pub fn encrypt(&self, data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate().skip(self.start_offset) {
            *byte ^= XOR3_KEYS[i % XOR3_KEYS.len()];
        }
    }

    /// Reverses [`Xor3::encrypt`]
    pub fn decrypt(&self, data: &mut [u8]) {
        self.encrypt(data);
    }
}

impl Default for Xor3 {
    fn default() -> Self {
        Self::new(0)
    }
}
