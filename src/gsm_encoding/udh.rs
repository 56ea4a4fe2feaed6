//! User Data Headers, which sit in front of the text of concatenated or port-addressed messages.
//!
//! [This Wikipedia article](https://en.wikipedia.org/wiki/User_Data_Header) explains what this is
//! for pretty well. When the text is GSM 7-bit, the header pushes the text along by a whole
//! number of septets (see `pack::header_septets`); `pack::pack_8bits_to_7bits` takes care of
//! that if you hand it the output of `UserDataHeader::as_bytes`.
use std::convert::TryFrom;
use crate::errors::*;

/// Concatenated short message, 8-bit reference.
pub const IEI_CONCATENATED_8BIT: u8 = 0x00;
/// Application port addressing, 8-bit ports.
pub const IEI_PORT_8BIT: u8 = 0x04;
/// Application port addressing, 16-bit ports.
pub const IEI_PORT_16BIT: u8 = 0x05;
/// Concatenated short message, 16-bit reference.
pub const IEI_CONCATENATED_16BIT: u8 = 0x08;

/// Component (information element) of a User Data Header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdhComponent {
    /// Information element identifier.
    pub id: u8,
    /// Component data.
    pub data: Vec<u8>
}
/// A User Data Header itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDataHeader {
    pub components: Vec<UdhComponent>
}
/// Data about a concatenated SMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatenatedSmsData {
    /// Reference that identifies which message this is a part of - this is like an ID for the
    /// whole message.
    pub reference: u16,
    /// How many parts to the message exist (e.g. 2).
    pub parts: u8,
    /// Which part this is (e.g. 1 of 2).
    pub sequence: u8
}
/// Source and destination application ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortAddressing {
    pub destination: u16,
    pub source: u16
}
impl UserDataHeader {
    /// Header for one part of a concatenated message, using an 8-bit reference.
    pub fn concatenated(reference: u8, parts: u8, sequence: u8) -> Self {
        Self::single(IEI_CONCATENATED_8BIT, vec![reference, parts, sequence])
    }
    /// Header for one part of a concatenated message, using a 16-bit reference.
    pub fn concatenated_16bit(reference: u16, parts: u8, sequence: u8) -> Self {
        let [hi, lo] = reference.to_be_bytes();
        Self::single(IEI_CONCATENATED_16BIT, vec![hi, lo, parts, sequence])
    }
    pub fn port_addressing_8bit(destination: u8, source: u8) -> Self {
        Self::single(IEI_PORT_8BIT, vec![destination, source])
    }
    pub fn port_addressing_16bit(destination: u16, source: u16) -> Self {
        let mut data = destination.to_be_bytes().to_vec();
        data.extend_from_slice(&source.to_be_bytes());
        Self::single(IEI_PORT_16BIT, data)
    }
    fn single(id: u8, data: Vec<u8>) -> Self {
        UserDataHeader {
            components: vec![UdhComponent { id, data }]
        }
    }
    /// If there is concatenated SMS data in this header, return it.
    pub fn concatenated_sms_data(&self) -> Option<ConcatenatedSmsData> {
        for comp in self.components.iter() {
            if comp.id == IEI_CONCATENATED_8BIT && comp.data.len() == 3 {
                return Some(ConcatenatedSmsData {
                    reference: comp.data[0] as _,
                    parts: comp.data[1],
                    sequence: comp.data[2]
                });
            }
            if comp.id == IEI_CONCATENATED_16BIT && comp.data.len() == 4 {
                let reference = ((comp.data[0] as u16) << 8) | (comp.data[1] as u16);
                return Some(ConcatenatedSmsData {
                    reference,
                    parts: comp.data[2],
                    sequence: comp.data[3]
                });
            }
        }
        None
    }
    /// If this header addresses an application port, return the ports.
    pub fn port_addressing(&self) -> Option<PortAddressing> {
        for comp in self.components.iter() {
            match (comp.id, comp.data.len()) {
                (IEI_PORT_8BIT, 2) => return Some(PortAddressing {
                    destination: comp.data[0] as _,
                    source: comp.data[1] as _
                }),
                (IEI_PORT_16BIT, 4) => return Some(PortAddressing {
                    destination: ((comp.data[0] as u16) << 8) | (comp.data[1] as u16),
                    source: ((comp.data[2] as u16) << 8) | (comp.data[3] as u16)
                }),
                _ => {}
            }
        }
        None
    }
    /// Serialize this UDH to wire format, including the leading UDH Length octet.
    ///
    /// Component data and the header as a whole are limited to 255 octets each by their length
    /// octets; anything longer is `MessageTooLong`.
    pub fn as_bytes(&self) -> GsmResult<Vec<u8>> {
        let mut ret = vec![];
        for comp in self.components.iter() {
            if comp.data.len() > u8::max_value() as usize {
                return Err(GsmError::MessageTooLong(comp.data.len()));
            }
            ret.push(comp.id);
            ret.push(comp.data.len() as u8);
            ret.extend(comp.data.iter());
        }
        if ret.len() > u8::max_value() as usize {
            return Err(GsmError::MessageTooLong(ret.len()));
        }
        let len = ret.len() as u8;
        ret.insert(0, len);
        Ok(ret)
    }
}
impl<'a> TryFrom<&'a [u8]> for UserDataHeader {
    type Error = GsmError;
    /// Accepts a UDH *without* the UDH Length octet at the start.
    fn try_from(b: &[u8]) -> GsmResult<Self> {
        let mut offset = 0;
        let mut ret = vec![];
        while b.get(offset).is_some() {
            let id = b[offset];
            offset += 1;
            check_offset!(b, offset, "UDH component length");
            let len = b[offset] as usize;
            offset += 1;
            let end = offset + len;
            if len > 0 {
                let o = end - 1;
                check_offset!(b, o, "UDH component data");
            }
            let data = b[offset..end].to_owned();
            offset = end;
            ret.push(UdhComponent { id, data });
        }
        Ok(UserDataHeader {
            components: ret
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn concatenated_wire_format() {
        let udh = UserDataHeader::concatenated(0x42, 3, 1);
        assert_eq!(udh.as_bytes().unwrap(), vec![0x05, 0x00, 0x03, 0x42, 0x03, 0x01]);
        let parsed = UserDataHeader::try_from(&udh.as_bytes().unwrap()[1..]).unwrap();
        assert_eq!(parsed, udh);
        assert_eq!(parsed.concatenated_sms_data(), Some(ConcatenatedSmsData {
            reference: 0x42, parts: 3, sequence: 1
        }));
    }
    #[test]
    fn sixteen_bit_variants() {
        let udh = UserDataHeader::concatenated_16bit(0xBEEF, 2, 2);
        assert_eq!(udh.as_bytes().unwrap(), vec![0x06, 0x08, 0x04, 0xBE, 0xEF, 0x02, 0x02]);
        assert_eq!(udh.concatenated_sms_data().unwrap().reference, 0xBEEF);
        let udh = UserDataHeader::port_addressing_16bit(2948, 9200);
        assert_eq!(udh.as_bytes().unwrap(), vec![0x06, 0x05, 0x04, 0x0B, 0x84, 0x23, 0xF0]);
        assert_eq!(udh.port_addressing(), Some(PortAddressing { destination: 2948, source: 9200 }));
        assert_eq!(udh.concatenated_sms_data(), None);
    }
    #[test]
    fn multiple_components() {
        let bytes = [0x00, 0x03, 0x01, 0x02, 0x01, 0x04, 0x02, 0x10, 0x20, 0x70, 0x00];
        let udh = UserDataHeader::try_from(&bytes[..]).unwrap();
        assert_eq!(udh.components.len(), 3);
        assert_eq!(udh.port_addressing(), Some(PortAddressing { destination: 0x10, source: 0x20 }));
        assert_eq!(udh.components[2], UdhComponent { id: 0x70, data: vec![] });
        assert_eq!(&udh.as_bytes().unwrap()[1..], &bytes[..]);
    }
    #[test]
    fn oversized_header() {
        let udh = UserDataHeader {
            components: vec![UdhComponent { id: 0x70, data: vec![0; 300] }]
        };
        match udh.as_bytes() {
            Err(GsmError::MessageTooLong(300)) => {},
            x => panic!("unexpected {:?}", x)
        }
        let comp = UdhComponent { id: 0x70, data: vec![0; 100] };
        let udh = UserDataHeader { components: vec![comp.clone(), comp.clone(), comp] };
        match udh.as_bytes() {
            Err(GsmError::MessageTooLong(306)) => {},
            x => panic!("unexpected {:?}", x)
        }
    }
    #[test]
    fn truncated_header() {
        assert!(UserDataHeader::try_from(&[0x00][..]).is_err());
        assert!(UserDataHeader::try_from(&[0x00, 0x03, 0x01][..]).is_err());
    }
}
