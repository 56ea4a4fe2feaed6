//! Whole user-data fields: choosing an alphabet, packing text behind an optional header, and
//! taking a received field apart again.
use std::convert::TryFrom;
use encoding::{Encoding, DecoderTrap, EncoderTrap};
use encoding::all::{UTF_16BE, ISO_8859_1};
use num::FromPrimitive;
use crate::errors::*;
use crate::gsm_encoding::{self, ErrorPolicy};
use crate::gsm_encoding::udh::UserDataHeader;
use crate::pack::{self, HexData};

/// The alphabet bits of a data coding scheme octet.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, is_enum_variant)]
pub enum MessageEncoding {
    Gsm7Bit = 0b0000_00_00,
    EightBit = 0b0000_01_00,
    Ucs2 = 0b0000_10_00,
    Reserved = 0b0000_11_00,
}
impl MessageEncoding {
    /// Extract the alphabet from a general data coding group DCS octet.
    pub fn from_dcs(dcs: u8) -> Self {
        MessageEncoding::from_u8(dcs & 0b0000_11_00)
            .expect("MessageEncoding conversions should be exhaustive!")
    }
}
/// A decoded text message, with optional user data header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Decoded text.
    pub text: String,
    /// User data header. You'll want this to check if the message is concatenated, i.e. is part of
    /// a multi-part series.
    pub udh: Option<UserDataHeader>
}

/// Pack `text` in the given alphabet, behind `udh` if there is one.
///
/// GSM 7-bit text must be entirely representable; use `gsm_encoding::gsm_encode` with a lossy
/// policy first if that isn't guaranteed.
pub fn pack_user_data(text: &str, encoding: MessageEncoding, udh: Option<&UserDataHeader>) -> GsmResult<String> {
    let udh = match udh {
        Some(u) => Some(u.as_bytes()?),
        None => None
    };
    let udh = udh.as_ref().map(|u| &u[..]);
    match encoding {
        MessageEncoding::Gsm7Bit => {
            let (septets, _) = gsm_encoding::gsm_encode(text, ErrorPolicy::Strict)?;
            pack::pack_8bits_to_7bits(&septets, udh)
        },
        MessageEncoding::Ucs2 => pack::pack_8bits_to_ucs2(text, udh),
        MessageEncoding::EightBit => {
            let bytes = ISO_8859_1.encode(text, EncoderTrap::Strict)
                .map_err(|_| GsmError::UnsupportedInput("text not representable in ISO-8859-1"))?;
            pack::pack_8bits_to_8bit(&bytes, udh)
        },
        MessageEncoding::Reserved => Err(GsmError::UnsupportedInput("reserved alphabet"))
    }
}
/// Pack `text` as GSM 7-bit if it fits in the alphabet, or UCS-2 otherwise.
pub fn encode_user_data(text: &str, udh: Option<&UserDataHeader>) -> GsmResult<(MessageEncoding, String)> {
    let encoding = if text.is_empty() || gsm_encoding::is_valid_gsm(text) {
        MessageEncoding::Gsm7Bit
    }
    else {
        MessageEncoding::Ucs2
    };
    debug!("encoding {} chars as {:?}", text.chars().count(), encoding);
    let data = pack_user_data(text, encoding, udh)?;
    Ok((encoding, data))
}
/// Take apart a hex user-data field (length octet first), as produced by `pack_user_data`.
///
/// `udhi` says whether the field starts with a User Data Header.
pub fn decode_user_data(hex: &str, encoding: MessageEncoding, udhi: bool) -> GsmResult<DecodedMessage> {
    let octets = HexData::decode(hex)?;
    let (&len, body) = octets.split_first()
        .ok_or(GsmError::UnsupportedInput("missing length octet"))?;
    let mut start = 0;
    let mut udh = None;
    if udhi {
        let udhl = *body.get(0)
            .ok_or(GsmError::InvalidHeader("UDHI specified, but no data"))? as usize;
        start = udhl + 1;
        if body.len() < start {
            Err(GsmError::InvalidHeader("UDHL goes past end of data"))?
        }
        udh = Some(UserDataHeader::try_from(&body[1..start])?);
    }
    // 8-bit and UCS-2 lengths count octets, header included
    let end = (len as usize).min(body.len()).max(start);
    let text = match encoding {
        MessageEncoding::Gsm7Bit => {
            let mut septets = pack::unpack_octets(body.iter().cloned());
            septets.truncate(len as usize);
            let skip = pack::header_septets(start).min(septets.len());
            gsm_encoding::gsm_decode(&septets[skip..]).0
        },
        MessageEncoding::Ucs2 => {
            UTF_16BE.decode(&body[start..end], DecoderTrap::Replace)
                .map_err(|_| GsmError::UnsupportedInput("invalid UCS-2 data"))?
        },
        MessageEncoding::EightBit => {
            ISO_8859_1.decode(&body[start..end], DecoderTrap::Replace)
                .map_err(|_| GsmError::UnsupportedInput("invalid 8-bit data"))?
        },
        MessageEncoding::Reserved => Err(GsmError::UnsupportedInput("reserved alphabet"))?
    };
    Ok(DecodedMessage { text, udh })
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn dcs_alphabet() {
        assert_eq!(MessageEncoding::from_dcs(0x00), MessageEncoding::Gsm7Bit);
        assert_eq!(MessageEncoding::from_dcs(0x08), MessageEncoding::Ucs2);
        assert!(MessageEncoding::from_dcs(0x15).is_eight_bit());
        assert!(MessageEncoding::from_dcs(0x0C).is_reserved());
    }
    #[test]
    fn picks_alphabet() {
        let (enc, hex) = encode_user_data("hellohello", None).unwrap();
        assert_eq!(enc, MessageEncoding::Gsm7Bit);
        assert_eq!(hex, "0ae8329bfd4697d9ec37");
        let (enc, hex) = encode_user_data("日本", None).unwrap();
        assert_eq!(enc, MessageEncoding::Ucs2);
        assert_eq!(hex, "0465e5672c");
    }
    #[test]
    fn roundtrip_with_header() {
        let udh = UserDataHeader::concatenated(7, 2, 1);
        for &text in ["Price: 5€ [incl.]", "Grüße aus Köln", "Ελλάδα ☃"].iter() {
            let (enc, hex) = encode_user_data(text, Some(&udh)).unwrap();
            let dec = decode_user_data(&hex, enc, true).unwrap();
            assert_eq!(dec.text, text);
            assert_eq!(dec.udh.as_ref(), Some(&udh));
        }
    }
    #[test]
    fn eight_bit() {
        let hex = pack_user_data("ÿa", MessageEncoding::EightBit, None).unwrap();
        assert_eq!(hex, "02ff61");
        assert_eq!(decode_user_data(&hex, MessageEncoding::EightBit, false).unwrap().text, "ÿa");
        assert!(pack_user_data("€", MessageEncoding::EightBit, None).is_err());
    }
    #[test]
    fn length_octet_bounds_body() {
        let dec = decode_user_data("01ff61", MessageEncoding::EightBit, false).unwrap();
        assert_eq!(dec.text, "ÿ");
        let dec = decode_user_data("02006100620063", MessageEncoding::Ucs2, false).unwrap();
        assert_eq!(dec.text, "a");
        let dec = decode_user_data("08050003010201006100620063", MessageEncoding::Ucs2, true).unwrap();
        assert_eq!(dec.text, "a");
        assert_eq!(dec.udh, Some(UserDataHeader::concatenated(1, 2, 1)));
        // a length octet longer than the data only takes what's there
        let dec = decode_user_data("0a6162", MessageEncoding::EightBit, false).unwrap();
        assert_eq!(dec.text, "ab");
    }
    #[test]
    fn eight_bit_unrepresentable() {
        match pack_user_data("a€", MessageEncoding::EightBit, None) {
            Err(GsmError::UnsupportedInput(_)) => {},
            x => panic!("unexpected {:?}", x)
        }
    }
    #[test]
    fn bad_header() {
        assert!(decode_user_data("00", MessageEncoding::Gsm7Bit, true).is_err());
        assert!(decode_user_data("0405000342", MessageEncoding::Gsm7Bit, true).is_err());
    }
}
