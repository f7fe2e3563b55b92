use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Serialization Error: {0}")]
    Serialization(#[from] Box<bincode::ErrorKind>),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: \"{0}\"")]
    UnsupportedFormat(String),
    #[error("Invalid magic bytes: {0:02X?}")]
    InvalidMagic([u8; 4]),
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),
    #[error("Text data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Invalid text header: \"{0}\"")]
    InvalidHeader(String),
    #[error("Unexpected end of data while reading {0}")]
    UnexpectedEnd(&'static str),
    #[error("Invalid number \"{token}\" while reading {field}")]
    InvalidNumber { field: &'static str, token: String },
    #[error("Index count {0} is not a multiple of three")]
    IncompleteTriangle(usize),
    #[error("Index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Mesh exceeds the format limit of {} elements", u32::MAX)]
    TooLarge,
}
