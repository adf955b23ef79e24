pub mod bit_stream;
pub mod character;
pub mod error;
pub mod file;
pub mod header;
pub mod records;
pub mod shape;
pub mod types;

#[cfg(test)]
pub mod test_utils;
