//! Datatype-class tables for required-variable type checks.
//!
//! Datatypes appear in definition files in their wire form, e.g. `"<uint8>"`.
//! Each class below names the set of wire datatypes acceptable for one
//! family of required variables.

/// Floating-point types of any width.
pub const FLOATS: &[&str] = &["<float16>", "<float32>", "<float64>", "<float128>"];

/// Signed integer types of any width.
pub const INTS: &[&str] = &["<int8>", "<int16>", "<int32>", "<int64>"];

/// 8-bit unsigned types.
pub const UINT8: &[&str] = &["<uint8>", "<ubyte>"];

/// 8-bit signed types.
pub const INT8: &[&str] = &["<int8>", "<byte>"];

/// Unsigned integer types of any width.
pub const UINTS: &[&str] = &["<uint8>", "<ubyte>", "<uint16>", "<uint32>", "<uint64>"];

/// 64-bit unsigned only.
pub const UINT64: &[&str] = &["<uint64>"];
