//! UBX checksum (8-bit Fletcher algorithm)
//!
//! Computed over every byte from the class field through the end of the
//! payload. Sync characters and the checksum itself are excluded.

/// Running checksum accumulator
///
/// Used where the covered bytes arrive one at a time (the receive path).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    ck_a: u8,
    ck_b: u8,
}

impl Checksum {
    /// Create an accumulator with both sums at zero
    pub const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Fold one byte into the checksum
    pub const fn update(self, byte: u8) -> Self {
        let ck_a = self.ck_a.wrapping_add(byte);
        Self {
            ck_a,
            ck_b: self.ck_b.wrapping_add(ck_a),
        }
    }

    /// Current `(ck_a, ck_b)` pair
    pub const fn value(&self) -> (u8, u8) {
        (self.ck_a, self.ck_b)
    }
}

/// Calculate UBX checksum (8-bit Fletcher algorithm)
pub const fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut sum = Checksum::new();
    let mut i = 0;
    while i < data.len() {
        sum = sum.update(data[i]);
        i += 1;
    }
    sum.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ubx_checksum() {
        // Class=0x06, ID=0x01, Len=0x0003, Payload=0xF0,0x00,0x01
        let data = [0x06, 0x01, 0x03, 0x00, 0xF0, 0x00, 0x01];
        // ck_b: 06 0D 17 21 1B 15 10
        assert_eq!(ubx_checksum(&data), (0xFB, 0x10));
    }

    #[test]
    fn test_ubx_checksum_empty() {
        assert_eq!(ubx_checksum(&[]), (0, 0));
    }

    #[test]
    fn test_incremental_matches_slice() {
        let data = [0x01, 0x07, 0x00, 0x00];
        let sum = data.iter().fold(Checksum::new(), |sum, &b| sum.update(b));
        assert_eq!(sum.value(), ubx_checksum(&data));
        assert_eq!(sum.value(), (0x08, 0x19));
    }

    #[test]
    fn test_checksum_wraps() {
        let data = [0xFF, 0xFF, 0xFF];
        // ck_a: 0xFF, 0xFE, 0xFD; ck_b: 0xFF, 0xFD, 0xFA
        assert_eq!(ubx_checksum(&data), (0xFD, 0xFA));
    }
}
