use std::io;
use failure::Fail;

#[derive(Fail, Debug)]
pub enum GsmError {
    #[fail(display = "Character {:?} cannot be represented in the GSM 7-bit alphabet", _0)]
    InvalidCharacter(char),
    #[fail(display = "Unknown error handling policy: {}", _0)]
    UnsupportedPolicy(String),
    #[fail(display = "Cannot unpack input: {}", _0)]
    UnsupportedInput(&'static str),
    #[fail(display = "Value out of range: {}", _0)]
    OutOfRange(&'static str),
    #[fail(display = "Invalid user data header: {}", _0)]
    InvalidHeader(&'static str),
    #[fail(display = "Message too long for a single length octet ({} units)", _0)]
    MessageTooLong(usize),
    #[fail(display = "Invalid timezone label: {:?}", _0)]
    InvalidTimezone(String),
    #[fail(display = "Invalid timestamp: {}", _0)]
    InvalidTimestamp(&'static str),
    #[fail(display = "An I/O error occurred: {}", _0)]
    IoError(#[cause] io::Error),
}
impl From<io::Error> for GsmError {
    fn from(e: io::Error) -> GsmError {
        GsmError::IoError(e)
    }
}
pub type GsmResult<T> = Result<T, GsmError>;
