//! Packing and unpacking of message user data.
//!
//! GSM 7-bit text goes over the air as a continuous stream of septets, so eight characters fit
//! into seven octets. `pack_8bits_to_7bits` turns unpacked septets (as produced by
//! `gsm_encoding::gsm_encode`) into that stream, prefixed by a length octet and hex-encoded the
//! way it appears inside a PDU; `unpack_msg` goes the other way.
//!
//! The length octet counts *septets* for 7-bit data, and octets for 8-bit and UCS-2 data.
use std::fmt;
use encoding::{Encoding, EncoderTrap};
use encoding::all::UTF_16BE;
use crate::errors::*;

/// Maximum number of septets in a single message segment.
pub const MAX_SEPTETS: usize = 160;

pub struct HexData<'a>(pub &'a [u8]);
impl<'a> fmt::Display for HexData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
       for b in self.0.iter() {
           write!(f, "{:02X}", b)?;
       }
       Ok(())
    }
}
impl<'a> fmt::LowerHex for HexData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
       for b in self.0.iter() {
           write!(f, "{:02x}", b)?;
       }
       Ok(())
    }
}
impl<'a> HexData<'a> {
    pub fn decode(data: &str) -> GsmResult<Vec<u8>> {
        if data.len() % 2 != 0 {
            return Err(GsmError::UnsupportedInput("hex string has an odd number of digits"));
        }
        pair_hex_digits(data.as_bytes())
    }
}
fn hex_digit(d: u8) -> GsmResult<u8> {
    (d as char).to_digit(16)
        .map(|x| x as u8)
        .ok_or(GsmError::UnsupportedInput("not a hex string"))
}
/// Group ASCII hex digits into octets. A trailing unpaired digit is dropped.
fn pair_hex_digits(digits: &[u8]) -> GsmResult<Vec<u8>> {
    let mut ret = Vec::with_capacity(digits.len() / 2);
    let mut high = None;
    for &d in digits {
        let nybble = hex_digit(d)?;
        match high.take() {
            Some(h) => ret.push((h << 4) | nybble),
            None => high = Some(nybble)
        }
    }
    Ok(ret)
}
fn with_length_prefix(len: usize, body: &[u8]) -> GsmResult<String> {
    if len > u8::max_value() as usize {
        return Err(GsmError::MessageTooLong(len));
    }
    let mut ret = Vec::with_capacity(body.len() + 1);
    ret.push(len as u8);
    ret.extend_from_slice(body);
    Ok(format!("{:x}", HexData(&ret)))
}

/// Number of septets taken up by a User Data Header of `header_len` octets (UDHL octet
/// included), counting the fill bits that bring the text onto a septet boundary.
pub fn header_septets(header_len: usize) -> usize {
    (header_len * 8 + 6) / 7
}
/// Packs septets into octets, with no length prefix.
///
/// The input is treated as if it had an extra null septet on the end; output octet `n` takes the
/// top bits of one septet and the bottom bits of the next.
pub fn pack_septets(septets: &[u8]) -> Vec<u8> {
    let at = |i: usize| septets.get(i).map(|s| s & 0b0111_1111).unwrap_or(0);
    let len = ((septets.len() + 1) * 7) / 8;
    let mut ret = Vec::with_capacity(len);
    let mut c = 0;
    let mut shift = 0;
    for n in 0..len {
        if shift == 6 {
            c += 1;
        }
        shift = n % 7;
        let low = at(c) >> shift;
        let high = at(c + 1) << (7 - shift);
        ret.push(low | high);
        c += 1;
    }
    ret
}
/// Packs unpacked septets into a hex string, prefixed with the septet count.
///
/// If `udh` is given (the full header, UDHL octet included) it's written verbatim at the start
/// of the packed data, and the text starts on the first septet boundary after it. The count then
/// includes the septets the header takes up.
pub fn pack_8bits_to_7bits(septets: &[u8], udh: Option<&[u8]>) -> GsmResult<String> {
    let ret = match udh {
        None => {
            let packed = pack_septets(septets);
            with_length_prefix(septets.len(), &packed)
        },
        Some(udh) => {
            let mut buf = vec![0; header_septets(udh.len())];
            buf.extend_from_slice(septets);
            let mut packed = pack_septets(&buf);
            packed[..udh.len()].copy_from_slice(udh);
            with_length_prefix(buf.len(), &packed)
        }
    };
    trace!("packed {} septets (udh: {:?})", septets.len(), udh.map(|u| u.len()));
    ret
}
/// Formats 8-bit data, prefixed with its length in octets (header included).
pub fn pack_8bits_to_8bit(data: &[u8], udh: Option<&[u8]>) -> GsmResult<String> {
    let mut body = udh.map(|u| u.to_vec()).unwrap_or_default();
    body.extend_from_slice(data);
    with_length_prefix(body.len(), &body)
}
/// Formats text as UCS-2 (UTF-16BE), prefixed with its length in octets (header included).
pub fn pack_8bits_to_ucs2(text: &str, udh: Option<&[u8]>) -> GsmResult<String> {
    let mut body = udh.map(|u| u.to_vec()).unwrap_or_default();
    let ucs2 = UTF_16BE.encode(text, EncoderTrap::Strict)
        .map_err(|_| GsmError::UnsupportedInput("text not representable in UCS-2"))?;
    body.extend(ucs2);
    with_length_prefix(body.len(), &body)
}

/// Packed user data to unpack, in one of the forms it tends to turn up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedInput<'a> {
    /// Hex digits, either case.
    Hex(&'a str),
    /// Hex digits as raw ASCII bytes.
    HexBytes(&'a [u8]),
    /// The packed octets themselves.
    Octets(&'a [u8])
}
impl<'a> From<&'a str> for PackedInput<'a> {
    fn from(s: &'a str) -> Self {
        PackedInput::Hex(s)
    }
}
impl<'a> From<&'a [u8]> for PackedInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        PackedInput::Octets(b)
    }
}
/// Unpacks octets into septets, stopping after `MAX_SEPTETS`.
///
/// Seven octets hold eight septets; a trailing group of seven therefore yields one septet more
/// than was packed if the packer had nothing to put in it. Use `unpack_message` when the length
/// prefix is available.
pub fn unpack_octets<I: IntoIterator<Item = u8>>(octets: I) -> Vec<u8> {
    let mut ret = Vec::new();
    let mut count = 0;
    let mut carry = 0;
    for octet in octets {
        if ret.len() >= MAX_SEPTETS {
            warn!("unpacked data exceeds {} septets; discarding the rest", MAX_SEPTETS);
            break;
        }
        let mask = 0b0111_1111 >> count;
        ret.push(((octet & mask) << count) + carry);
        carry = octet >> (7 - count);
        if count == 6 {
            if ret.len() < MAX_SEPTETS {
                ret.push(carry);
            }
            carry = 0;
        }
        count = (count + 1) % 7;
    }
    ret
}
/// Unpacks packed user data (without its length prefix) into septets.
pub fn unpack_msg<'a, P: Into<PackedInput<'a>>>(pdu: P) -> GsmResult<Vec<u8>> {
    let ret = match pdu.into() {
        PackedInput::Hex(s) => unpack_octets(pair_hex_digits(s.as_bytes())?),
        PackedInput::HexBytes(b) => unpack_octets(pair_hex_digits(b)?),
        PackedInput::Octets(o) => unpack_octets(o.iter().cloned())
    };
    trace!("unpacked {} septets", ret.len());
    Ok(ret)
}
/// Unpacks the output of `pack_8bits_to_7bits` (length prefix included) back into septets,
/// using the prefix to drop trailing fill.
pub fn unpack_message(hex: &str) -> GsmResult<Vec<u8>> {
    let octets = HexData::decode(hex)?;
    let (&len, body) = octets.split_first()
        .ok_or(GsmError::UnsupportedInput("missing length octet"))?;
    let mut ret = unpack_octets(body.iter().cloned());
    ret.truncate(len as usize);
    Ok(ret)
}
