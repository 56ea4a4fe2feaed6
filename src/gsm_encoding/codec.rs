//! The GSM 03.38 alphabet as a named text codec.
//!
//! `TextCodec` bundles the roles a generic text codec offers (one-shot encode and decode,
//! incremental encode and decode, and stream adapters) so callers that pick a codec by name
//! (say, from a config value) can get at all of them through `lookup_codec`.
use std::io::{Read, Write};
use crate::errors::*;
use super::{
    gsm_encode_with, gsm_decode,
    IncrementalEncoder, IncrementalDecoder,
    GsmStreamReader, GsmStreamWriter
};

/// Names the GSM 03.38 codec answers to.
pub const CODEC_NAMES: [&str; 2] = ["gsm0338", "gsm7"];

pub trait TextCodec {
    /// Canonical name of the codec.
    fn name(&self) -> &'static str;
    /// Encode `input` in one go, with the error policy given by name.
    fn encode(&self, input: &str, errors: &str) -> GsmResult<(Vec<u8>, usize)>;
    /// Decode `input` in one go.
    fn decode(&self, input: &[u8]) -> (String, usize);
    fn incremental_encoder(&self, errors: &str) -> GsmResult<IncrementalEncoder>;
    fn incremental_decoder(&self) -> IncrementalDecoder;
    fn stream_writer<W: Write>(&self, inner: W, errors: &str) -> GsmResult<GsmStreamWriter<W>>
        where Self: Sized;
    fn stream_reader<R: Read>(&self, inner: R) -> GsmStreamReader<R>
        where Self: Sized;
}

/// The GSM 03.38 default alphabet, with its extension table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Gsm0338;

impl TextCodec for Gsm0338 {
    fn name(&self) -> &'static str {
        CODEC_NAMES[0]
    }
    fn encode(&self, input: &str, errors: &str) -> GsmResult<(Vec<u8>, usize)> {
        gsm_encode_with(input, errors)
    }
    fn decode(&self, input: &[u8]) -> (String, usize) {
        gsm_decode(input)
    }
    fn incremental_encoder(&self, errors: &str) -> GsmResult<IncrementalEncoder> {
        Ok(IncrementalEncoder::new(errors.parse()?))
    }
    fn incremental_decoder(&self) -> IncrementalDecoder {
        IncrementalDecoder::new()
    }
    fn stream_writer<W: Write>(&self, inner: W, errors: &str) -> GsmResult<GsmStreamWriter<W>> {
        Ok(GsmStreamWriter::new(inner, errors.parse()?))
    }
    fn stream_reader<R: Read>(&self, inner: R) -> GsmStreamReader<R> {
        GsmStreamReader::new(inner)
    }
}

/// Find a codec by name. Matching ignores ASCII case.
pub fn lookup_codec(name: &str) -> Option<Gsm0338> {
    if CODEC_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name)) {
        Some(Gsm0338)
    }
    else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn lookup() {
        assert_eq!(lookup_codec("gsm0338"), Some(Gsm0338));
        assert_eq!(lookup_codec("GSM7"), Some(Gsm0338));
        assert_eq!(lookup_codec("utf-8"), None);
        assert_eq!(Gsm0338.name(), "gsm0338");
    }
    #[test]
    fn roles_share_tables() {
        let codec = lookup_codec("gsm7").unwrap();
        let (oneshot, _) = codec.encode("a~b", "strict").unwrap();
        let mut enc = codec.incremental_encoder("strict").unwrap();
        let mut pieces = enc.encode("a~", false).unwrap();
        pieces.extend(enc.encode("b", true).unwrap());
        assert_eq!(oneshot, pieces);

        let mut dec = codec.incremental_decoder();
        let mut text = dec.decode(&oneshot[..2], false);
        text.push_str(&dec.decode(&oneshot[2..], true));
        assert_eq!(text, codec.decode(&oneshot).0);
        assert_eq!(text, "a~b");
    }
    #[test]
    fn bad_policy_is_rejected_by_every_role() {
        assert!(Gsm0338.encode("a", "xmlcharrefreplace").is_err());
        assert!(Gsm0338.incremental_encoder("nope").is_err());
        assert!(Gsm0338.stream_writer(Vec::<u8>::new(), "nope").is_err());
    }
    #[test]
    fn stream_roundtrip() {
        let mut w = Gsm0338.stream_writer(Vec::<u8>::new(), "replace").unwrap();
        w.write("Ωμ").unwrap();
        let buf = w.into_inner();
        assert_eq!(buf, vec![0x15, crate::gsm_encoding::QUESTION_MARK]);
        let mut r = Gsm0338.stream_reader(&buf[..]);
        assert_eq!(r.read_to_string().unwrap(), "Ω?");
    }
}
