//! Utilities for dealing with the (annoying) GSM 7-bit alphabet (GSM 03.38).
//!
//! "The annoying GSM 7-bit encoding" is otherwise known as [GSM
//! 03.38](https://en.wikipedia.org/wiki/GSM_03.38), and that Wikipedia article is pretty
//! informative.
//!
//! Everything in this module works on **unpacked** septets: one byte per 7-bit code, with
//! extension characters taking two (the escape code, then the extension code). To get something
//! you can put in a PDU, pack the output with the functions in the `pack` module.
use std::io::{Read, Write};
use std::str::FromStr;
use crate::errors::*;

mod lookup_tables;
pub mod codec;
pub mod udh;

pub use self::lookup_tables::{
    ESCAPE, QUESTION_MARK, FALLBACK_CHAR,
    GSM_BASIC_CHARSET, GSM_EXTENDED_CHARSET, GSM_REPLACE_CHARSET
};
use self::lookup_tables::*;

/// What to do with characters that aren't in the basic or extension tables when encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, is_enum_variant)]
pub enum ErrorPolicy {
    /// Fail with `GsmError::InvalidCharacter`.
    Strict,
    /// Emit a look-alike character if there is one, or a question mark otherwise.
    Replace,
    /// Drop the character.
    Ignore
}
impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Strict
    }
}
impl FromStr for ErrorPolicy {
    type Err = GsmError;
    fn from_str(s: &str) -> GsmResult<Self> {
        match s {
            "strict" => Ok(ErrorPolicy::Strict),
            "replace" => Ok(ErrorPolicy::Replace),
            "ignore" => Ok(ErrorPolicy::Ignore),
            x => Err(GsmError::UnsupportedPolicy(x.into()))
        }
    }
}

/// Encodes one character into `dest`, applying `policy` if it isn't representable.
pub fn gsm_encode_char(c: char, policy: ErrorPolicy, dest: &mut Vec<u8>) -> GsmResult<()> {
    if let Some(&code) = ENCODING_MAP.get(&c) {
        dest.push(code);
        return Ok(());
    }
    if let Some(&code) = EXT_ENCODING_MAP.get(&c) {
        dest.push(ESCAPE);
        dest.push(code);
        return Ok(());
    }
    match policy {
        ErrorPolicy::Strict => Err(GsmError::InvalidCharacter(c)),
        ErrorPolicy::Replace => {
            dest.push(REPLACE_ENCODING_MAP.get(&c).cloned().unwrap_or(QUESTION_MARK));
            Ok(())
        },
        ErrorPolicy::Ignore => Ok(())
    }
}
/// Encodes a string into unpacked GSM 7-bit codes, returning the codes and how many of them
/// there are (escape codes included).
///
/// Decoding the output gives back `input` exactly if every character was in the basic or
/// extension tables; the `Replace` and `Ignore` policies make no such promise.
pub fn gsm_encode(input: &str, policy: ErrorPolicy) -> GsmResult<(Vec<u8>, usize)> {
    let mut ret = Vec::with_capacity(input.len());
    for c in input.chars() {
        gsm_encode_char(c, policy, &mut ret)?;
    }
    let len = ret.len();
    Ok((ret, len))
}
/// Like `gsm_encode`, but takes the policy by name (`strict`, `replace` or `ignore`).
pub fn gsm_encode_with(input: &str, errors: &str) -> GsmResult<(Vec<u8>, usize)> {
    gsm_encode(input, errors.parse()?)
}
fn decode_basic(b: u8) -> char {
    match GSM_BASIC_CHARSET.get(b as usize) {
        Some(&ch) => ch,
        None => {
            warn!("byte {:#04x} is outside the 7-bit alphabet", b);
            FALLBACK_CHAR
        }
    }
}
/// Decodes a buffer of unpacked GSM 7-bit codes into a string, returning it along with its
/// length in characters.
///
/// An escape code that isn't followed by a known extension code decodes to `FALLBACK_CHAR`, and
/// only the escape is consumed; the byte after it is decoded on its own.
pub fn gsm_decode(input: &[u8]) -> (String, usize) {
    let mut ret = String::with_capacity(input.len());
    let mut count = 0;
    let mut i = 0;
    while let Some(&b) = input.get(i) {
        if b == ESCAPE {
            if let Some(&ch) = input.get(i + 1).and_then(|n| EXT_DECODING_MAP.get(n)) {
                ret.push(ch);
                count += 1;
                i += 2;
                continue;
            }
            warn!("unknown escape sequence at offset {}", i);
            ret.push(FALLBACK_CHAR);
        }
        else {
            ret.push(decode_basic(b));
        }
        count += 1;
        i += 1;
    }
    (ret, count)
}
/// Checks whether every character of `text` is in the basic or extension tables.
///
/// The empty string is not considered valid.
pub fn is_valid_gsm(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| {
        ENCODING_MAP.contains_key(&c) || EXT_ENCODING_MAP.contains_key(&c)
    })
}

/// Stateful encoder for text that arrives in pieces.
#[derive(Debug, Clone, Default)]
pub struct IncrementalEncoder {
    policy: ErrorPolicy
}
impl IncrementalEncoder {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }
    /// Encodes one piece of text. Characters never span pieces, so `_final` has no effect; it's
    /// accepted for symmetry with `IncrementalDecoder`.
    pub fn encode(&mut self, input: &str, _final: bool) -> GsmResult<Vec<u8>> {
        gsm_encode(input, self.policy).map(|(buf, _)| buf)
    }
}

/// Stateful decoder for codes that arrive in pieces.
///
/// An escape code at the very end of a non-final piece is held back until the next piece, so an
/// escape pair split across two pieces decodes the same way as it would in one go.
#[derive(Debug, Clone, Default)]
pub struct IncrementalDecoder {
    pending_escape: bool
}
impl IncrementalDecoder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn decode(&mut self, input: &[u8], final_: bool) -> String {
        let mut buf = Vec::with_capacity(input.len() + 1);
        if self.pending_escape {
            buf.push(ESCAPE);
        }
        buf.extend_from_slice(input);
        self.pending_escape = !final_ && buf.last() == Some(&ESCAPE);
        if self.pending_escape {
            buf.pop();
        }
        gsm_decode(&buf).0
    }
    /// Forget any held-back escape code.
    pub fn reset(&mut self) {
        self.pending_escape = false;
    }
}

/// Writes text to an underlying writer as unpacked GSM 7-bit codes.
pub struct GsmStreamWriter<W> {
    inner: W,
    encoder: IncrementalEncoder
}
impl<W: Write> GsmStreamWriter<W> {
    pub fn new(inner: W, policy: ErrorPolicy) -> Self {
        Self { inner, encoder: IncrementalEncoder::new(policy) }
    }
    /// Encode and write `text`, returning the number of bytes written.
    pub fn write(&mut self, text: &str) -> GsmResult<usize> {
        let buf = self.encoder.encode(text, false)?;
        self.inner.write_all(&buf)?;
        Ok(buf.len())
    }
    pub fn flush(&mut self) -> GsmResult<()> {
        self.inner.flush()?;
        Ok(())
    }
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads unpacked GSM 7-bit codes from an underlying reader and decodes them.
pub struct GsmStreamReader<R> {
    inner: R,
    decoder: IncrementalDecoder,
    eof: bool
}
impl<R: Read> GsmStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, decoder: IncrementalDecoder::new(), eof: false }
    }
    /// Read up to `size` bytes and decode them. Returns `None` once the reader is exhausted.
    pub fn read_chunk(&mut self, size: usize) -> GsmResult<Option<String>> {
        if self.eof {
            return Ok(None);
        }
        let mut buf = vec![0; size.max(1)];
        let n = self.inner.read(&mut buf)?;
        if n == 0 {
            self.eof = true;
            let rest = self.decoder.decode(&[], true);
            return Ok(if rest.is_empty() { None } else { Some(rest) });
        }
        Ok(Some(self.decoder.decode(&buf[..n], false)))
    }
    /// Read and decode everything left in the underlying reader.
    pub fn read_to_string(&mut self) -> GsmResult<String> {
        let mut buf = vec![];
        self.inner.read_to_end(&mut buf)?;
        self.eof = true;
        Ok(self.decoder.decode(&buf, true))
    }
    pub fn into_inner(self) -> R {
        self.inner
    }
}
