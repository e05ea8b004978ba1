// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished names.
//!
//! Attribute values are kept as their raw DER TLV so that names compare and
//! re-encode byte for byte, whatever string type the issuer chose. Issuer to
//! subject linking in the validator relies on that exact comparison.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::SetOfVec, Decode, DecodeValue, Encode, EncodeValue, Error, ErrorKind, Header, Length,
    Reader, Sequence, Tag, ValueOrd, Writer,
};

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

const TAG_UTF8_STRING: u8 = 0x0C;
const TAG_PRINTABLE_STRING: u8 = 0x13;
const TAG_IA5_STRING: u8 = 0x16;

/// One `type=value` pair of a relative distinguished name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (OID)
    pub oid: ObjectIdentifier,
    /// Raw DER-encoded value (tag + length + content).
    raw_value: Vec<u8>,
}

impl<'a> DecodeValue<'a> for AttributeTypeAndValue {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |nested| {
            let oid = ObjectIdentifier::decode(nested)?;
            let raw_value = nested.tlv_bytes()?.to_vec();
            Ok(Self { oid, raw_value })
        })
    }
}

impl EncodeValue for AttributeTypeAndValue {
    fn value_len(&self) -> der::Result<Length> {
        self.oid.encoded_len()? + Length::try_from(self.raw_value.len())?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.oid.encode(writer)?;
        writer.write(&self.raw_value)
    }
}

impl Sequence<'_> for AttributeTypeAndValue {}

impl ValueOrd for AttributeTypeAndValue {
    fn value_cmp(&self, other: &Self) -> der::Result<core::cmp::Ordering> {
        match self.oid.cmp(&other.oid) {
            core::cmp::Ordering::Equal => Ok(self.raw_value.cmp(&other.raw_value)),
            ord => Ok(ord),
        }
    }
}

impl AttributeTypeAndValue {
    /// Create an attribute with a UTF8String value.
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let raw_value = der::asn1::Utf8StringRef::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// Create an attribute with a PrintableString value.
    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let raw_value = der::asn1::PrintableStringRef::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// The raw DER TLV of the value.
    pub fn raw_value(&self) -> &[u8] {
        &self.raw_value
    }

    fn value_header_and_content(&self) -> Option<(u8, &[u8])> {
        let (&tag, rest) = self.raw_value.split_first()?;
        let (&len_byte, rest) = rest.split_first()?;
        if len_byte & 0x80 == 0 {
            return Some((tag, rest));
        }
        let n = (len_byte & 0x7F) as usize;
        rest.get(n..).map(|content| (tag, content))
    }

    /// The value as text, when it is one of the ASCII/UTF-8 string types.
    pub fn value_as_str(&self) -> Option<&str> {
        match self.value_header_and_content()? {
            (TAG_UTF8_STRING | TAG_PRINTABLE_STRING | TAG_IA5_STRING, content) => {
                core::str::from_utf8(content).ok()
            }
            _ => None,
        }
    }

    /// Short attribute label, or `None` for types without one.
    pub fn attr_name(&self) -> Option<&'static str> {
        match self.oid {
            CN => Some("CN"),
            SERIAL_NUMBER => Some("SERIALNUMBER"),
            COUNTRY_NAME => Some("C"),
            LOCALITY_NAME => Some("L"),
            STATE_OR_PROVINCE_NAME => Some("ST"),
            ORGANIZATION_NAME => Some("O"),
            ORGANIZATIONAL_UNIT_NAME => Some("OU"),
            DOMAIN_COMPONENT => Some("DC"),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attr_name() {
            Some(name) => write!(f, "{}=", name)?,
            None => write!(f, "{}=", self.oid)?,
        }
        match self.value_as_str() {
            Some(value) => write!(f, "{}", value),
            None => {
                write!(f, "#")?;
                for b in &self.raw_value {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

/// A SET OF attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    pub attributes: SetOfVec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create an RDN with a single attribute.
    pub fn new(attr: AttributeTypeAndValue) -> Result<Self, Error> {
        let mut attributes = SetOfVec::new();
        attributes
            .insert(attr)
            .map_err(|_| Error::from(ErrorKind::Value { tag: Tag::Set }))?;
        Ok(Self { attributes })
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let attributes = SetOfVec::decode_value(reader, header)?;
        Ok(Self { attributes })
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        self.attributes.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.attributes.encode_value(writer)
    }
}

impl der::FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", attr)?;
        }
        Ok(())
    }
}

/// A distinguished name (RDNSequence), ordered from the most general RDN.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name {
    pub rdns: Vec<RelativeDistinguishedName>,
}

impl Name {
    /// Create an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `O=<organization>, CN=<common_name>` with UTF8String values.
    pub fn with_organization_and_cn(organization: &str, common_name: &str) -> Result<Self, Error> {
        Ok(Self {
            rdns: alloc::vec![
                RelativeDistinguishedName::new(AttributeTypeAndValue::new_utf8(
                    ORGANIZATION_NAME,
                    organization,
                )?)?,
                RelativeDistinguishedName::new(AttributeTypeAndValue::new_utf8(CN, common_name)?)?,
            ],
        })
    }

    /// Find the first attribute with the given OID.
    pub fn find_attr(&self, oid: ObjectIdentifier) -> Option<&AttributeTypeAndValue> {
        self.rdns
            .iter()
            .flat_map(|rdn| rdn.attributes.iter())
            .find(|attr| attr.oid == oid)
    }

    /// Get the Common Name (CN) if present.
    pub fn common_name(&self) -> Option<String> {
        self.find_attr(CN)
            .and_then(|a| a.value_as_str())
            .map(|s| s.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

impl<'a> DecodeValue<'a> for Name {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut rdns = Vec::new();
            while !reader.is_finished() {
                rdns.push(RelativeDistinguishedName::decode(reader)?);
            }
            Ok(Self { rdns })
        })
    }
}

impl EncodeValue for Name {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for rdn in &self.rdns {
            len = (len + rdn.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for rdn in &self.rdns {
            rdn.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for Name {
    const TAG: Tag = Tag::Sequence;
}

/// RFC 4514 order: most specific RDN first.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", rdn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_display_order() {
        let name = Name::with_organization_and_cn("Example Org", "Leaf").unwrap();
        assert_eq!(name.to_string(), "CN=Leaf, O=Example Org");
        assert_eq!(name.common_name().as_deref(), Some("Leaf"));
    }

    #[test]
    fn test_name_der_round_trip() {
        let name = Name::with_organization_and_cn("Example Org", "Root CA").unwrap();
        let der = name.to_der().unwrap();
        let decoded = Name::from_der(&der).unwrap();
        assert_eq!(decoded, name);
        assert_eq!(decoded.to_der().unwrap(), der);
    }

    #[test]
    fn test_printable_and_utf8_are_distinct() {
        let a = AttributeTypeAndValue::new_utf8(CN, "same").unwrap();
        let b = AttributeTypeAndValue::new_printable(CN, "same").unwrap();
        assert_eq!(a.value_as_str(), b.value_as_str());
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_value_type_displays_hex() {
        let attr = AttributeTypeAndValue {
            oid: ObjectIdentifier::new_unwrap("1.2.3.4"),
            raw_value: alloc::vec![0x04, 0x02, 0xAB, 0xCD],
        };
        assert_eq!(attr.to_string(), "1.2.3.4=#0402abcd");
    }

    #[test]
    fn test_empty_name() {
        let name = Name::new();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "");
        assert_eq!(name.to_der().unwrap(), alloc::vec![0x30, 0x00]);
    }
}
