use gsm0338::gsm_encoding::{self, ErrorPolicy, GSM_EXTENDED_CHARSET};
use gsm0338::gsm_encoding::codec::{lookup_codec, TextCodec};
use gsm0338::gsm_encoding::udh::UserDataHeader;
use gsm0338::pack::{self, HexData, PackedInput};

#[test]
fn text_to_hex_and_back() {
    let text = "Meet @ 5 {not 6} & bring 10€";
    let (septets, count) = gsm_encoding::gsm_encode(text, ErrorPolicy::Strict).unwrap();
    assert_eq!(count, text.chars().count() + 3);
    let hex = pack::pack_8bits_to_7bits(&septets, None).unwrap();
    let unpacked = pack::unpack_message(&hex).unwrap();
    assert_eq!(unpacked, septets);
    assert_eq!(gsm_encoding::gsm_decode(&unpacked).0, text);
}

#[test]
fn extension_chars_survive_packing() {
    let text: String = GSM_EXTENDED_CHARSET.iter().map(|&(_, c)| c).collect();
    let codec = lookup_codec("gsm7").unwrap();
    let (septets, _) = codec.encode(&text, "strict").unwrap();
    let hex = pack::pack_8bits_to_7bits(&septets, None).unwrap();
    let octets = HexData::decode(&hex).unwrap();
    let mut unpacked = pack::unpack_msg(PackedInput::Octets(&octets[1..])).unwrap();
    unpacked.truncate(octets[0] as usize);
    assert_eq!(codec.decode(&unpacked).0, text);
}

#[test]
fn concatenated_part() {
    let udh = UserDataHeader::concatenated(0x99, 2, 2).as_bytes().unwrap();
    let (septets, _) = gsm_encoding::gsm_encode("second half", ErrorPolicy::Strict).unwrap();
    let hex = pack::pack_8bits_to_7bits(&septets, Some(&udh)).unwrap();
    let octets = HexData::decode(&hex).unwrap();
    assert_eq!(&octets[1..7], &udh[..]);
    let unpacked = pack::unpack_message(&hex).unwrap();
    let text = &unpacked[pack::header_septets(udh.len())..];
    assert_eq!(gsm_encoding::gsm_decode(text).0, "second half");
}

#[test]
fn lossy_policies_still_pack() {
    let (septets, _) = gsm_encoding::gsm_encode("Ζeus → Ολυμπος", ErrorPolicy::Replace).unwrap();
    let hex = pack::pack_8bits_to_7bits(&septets, None).unwrap();
    let decoded = gsm_encoding::gsm_decode(&pack::unpack_message(&hex).unwrap()).0;
    assert_eq!(decoded, "Zeus ? O??????");
}
