//! # Additive Checksum
//!
//! 8-bit additive checksum for control frame validation.
//!
//! **Algorithm**: sum of all bytes, truncated to the low 8 bits
//! **Initial Value**: 0x00
//!
//! The additive definition is order-insensitive: any permutation of the same
//! bytes produces the same checksum. That makes it a weak integrity check,
//! kept for wire compatibility with the deployed receivers.

/// Calculate the 8-bit additive checksum of a byte span
///
/// Sums every byte with wraparound and returns the low 8 bits. The same
/// function is used when building frames and when validating received ones.
///
/// # Arguments
///
/// * `data` - Byte slice to sum (payload plus status byte for control frames)
///
/// # Returns
///
/// * `u8` - Checksum value
///
/// # Examples
///
/// ```
/// use wing_link::frame::checksum::checksum8;
///
/// assert_eq!(checksum8(&[0x01, 0x02, 0x03]), 0x06);
/// assert_eq!(checksum8(&[0xFF, 0x01]), 0x00); // wraps around
/// ```
#[must_use]
pub fn checksum8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}
