use base64::{engine::general_purpose, Engine};
use std::fmt::Write;

/// Base64 encode data use the STANDARD engine (alphabet along with "+" and "/")
pub(crate) fn base64_encode_standard(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Encode data as a lowercase hex string
pub(crate) fn bytes_to_hex(data: &[u8]) -> String {
    let mut hex = String::with_capacity(data.len() * 2);
    for value in data {
        let _ = write!(hex, "{value:02x}");
    }
    hex
}
