pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid base64 byte 0x{0:02x} in vlq mappings")]
    InvalidBase64(u8),
    #[error("a vlq value ends with its continuation bit set")]
    TruncatedVlq,
    #[error("mapping segment {0:?} is malformed")]
    MalformedSegment(String),
    #[error("unsupported map buffer format")]
    UnsupportedFormat,
    #[error("map buffer is truncated")]
    TruncatedBuffer,
    #[error("map buffer is malformed")]
    MalformedBuffer,
    #[error("{0} has not been implemented yet")]
    Unimplemented(&'static str),
}
