// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 certificate structure.
//!
//! A [`Certificate`] keeps the exact DER it was parsed from next to the
//! decoded fields. Re-encoding returns those bytes unchanged, and signature
//! verification runs over the TBS bytes as they appeared on the wire.
//!
//! ```no_run
//! # fn show(bytes: &[u8]) -> cert_chain::Result<()> {
//! let leaf = cert_chain::Certificate::from_der(bytes)?;
//! assert_eq!(leaf.to_der(), bytes);
//! println!("{} issued by {}", leaf.subject(), leaf.issuer());
//! # Ok(())
//! # }
//! ```

pub mod name;

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{BitString, OctetString, UintRef},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, SliceReader, Tag,
    TagMode, TagNumber, Writer,
};
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::certificate::name::Name;
use crate::error::{EncodingError, Error, ParseError, Result};
use crate::time::Validity;

/// SubjectPublicKeyInfo with opaque algorithm parameters.
pub type SpkiInfo = SubjectPublicKeyInfo<der::Any, BitString>;

const PEM_LABEL: &str = "CERTIFICATE";

/// Certificate format version as carried in the `[0]` field (v1 = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    V1 = 0,
    V2 = 1,
    #[default]
    V3 = 2,
}

impl TryFrom<u8> for Version {
    type Error = der::Error;

    fn try_from(raw: u8) -> der::Result<Self> {
        [Version::V1, Version::V2, Version::V3]
            .into_iter()
            .find(|v| *v as u8 == raw)
            .ok_or_else(|| der::ErrorKind::Value { tag: Tag::Integer }.into())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", *self as u8 + 1)
    }
}

/// `Extension ::= SEQUENCE { extnID, critical BOOLEAN DEFAULT FALSE, extnValue }`
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,
    #[asn1(default = "not_critical")]
    pub critical: bool,
    pub extn_value: OctetString,
}

fn not_critical() -> bool {
    false
}

impl Extension {
    pub fn new(extn_id: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Result<Self> {
        let extn_value = OctetString::new(value).map_err(Error::encoding)?;
        Ok(Self {
            extn_id,
            critical,
            extn_value,
        })
    }

    /// Content octets of `extnValue`.
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// The `[3]` extensions list, in certificate order.
///
/// Derefs to a slice, so `len`, `iter` and indexing come from `[Extension]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    pub fn from_vec(extensions: Vec<Extension>) -> Self {
        Self(extensions)
    }

    /// First extension with the given identifier.
    pub fn find(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.0.iter().find(|ext| ext.extn_id == *oid)
    }
}

impl core::ops::Deref for Extensions {
    type Target = [Extension];

    fn deref(&self) -> &[Extension] {
        &self.0
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader
            .read_nested(header.length, |nested| {
                core::iter::from_fn(|| (!nested.is_finished()).then(|| Extension::decode(nested)))
                    .collect::<der::Result<Vec<_>>>()
            })
            .map(Self)
    }
}

impl EncodeValue for Extensions {
    fn value_len(&self) -> der::Result<Length> {
        self.0
            .iter()
            .try_fold(Length::ZERO, |total, ext| total + ext.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.0.iter().try_for_each(|ext| ext.encode(writer))
    }
}

impl der::FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

/// The signed portion of a certificate.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertificate {
    pub version: Version,
    serial_number: Vec<u8>,
    pub signature: AlgorithmIdentifier<der::Any>,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SpkiInfo,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    pub extensions: Option<Extensions>,
}

impl TbsCertificate {
    /// Create a v3 TBSCertificate without unique identifiers or extensions.
    pub fn new(
        serial_number: Vec<u8>,
        signature: AlgorithmIdentifier<der::Any>,
        issuer: Name,
        validity: Validity,
        subject: Name,
        subject_public_key_info: SpkiInfo,
    ) -> Self {
        Self {
            version: Version::V3,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        }
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Serial number magnitude, big-endian, without a sign byte.
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    fn serial_number_ref(&self) -> der::Result<UintRef<'_>> {
        UintRef::new(&self.serial_number)
    }

    /// The explicit `[0]` version, omitted for v1.
    fn version_field(&self) -> Option<u8> {
        (self.version != Version::V1).then_some(self.version as u8)
    }
}

impl<'a> DecodeValue<'a> for TbsCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = reader
                .context_specific::<u8>(TagNumber::N0, TagMode::Explicit)?
                .map_or(Ok(Version::V1), Version::try_from)?;

            let serial_number = UintRef::decode(reader)?.as_bytes().to_vec();
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = Name::decode(reader)?;
            let validity = Validity::decode(reader)?;
            let subject = Name::decode(reader)?;
            let subject_public_key_info = SpkiInfo::decode(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions =
                reader.context_specific::<Extensions>(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl TbsCertificate {
    /// Write every field in order. Shared by the length and encoding passes
    /// so the two cannot disagree.
    fn write_fields(&self, writer: &mut impl Writer) -> der::Result<()> {
        if let Some(value) = self.version_field() {
            der::asn1::ContextSpecific {
                tag_number: TagNumber::N0,
                tag_mode: TagMode::Explicit,
                value,
            }
            .encode(writer)?;
        }

        self.serial_number_ref()?.encode(writer)?;
        self.signature.encode(writer)?;
        self.issuer.encode(writer)?;
        self.validity.encode(writer)?;
        self.subject.encode(writer)?;
        self.subject_public_key_info.encode(writer)?;

        let unique_ids = [
            (TagNumber::N1, self.issuer_unique_id.as_ref()),
            (TagNumber::N2, self.subject_unique_id.as_ref()),
        ];
        for (tag_number, value) in unique_ids {
            if let Some(value) = value {
                der::asn1::ContextSpecificRef {
                    tag_number,
                    tag_mode: TagMode::Implicit,
                    value,
                }
                .encode(writer)?;
            }
        }

        if let Some(value) = self.extensions.as_ref() {
            der::asn1::ContextSpecificRef {
                tag_number: TagNumber::N3,
                tag_mode: TagMode::Explicit,
                value,
            }
            .encode(writer)?;
        }

        Ok(())
    }
}

/// Writer that only totals the bytes it is given.
struct LengthCounter(Length);

impl Writer for LengthCounter {
    fn write(&mut self, slice: &[u8]) -> der::Result<()> {
        self.0 = (self.0 + Length::try_from(slice.len())?)?;
        Ok(())
    }
}

impl EncodeValue for TbsCertificate {
    fn value_len(&self) -> der::Result<Length> {
        let mut counter = LengthCounter(Length::ZERO);
        self.write_fields(&mut counter)?;
        Ok(counter.0)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.write_fields(writer)
    }
}

impl der::FixedTag for TbsCertificate {
    const TAG: Tag = Tag::Sequence;
}

/// X.509 Certificate.
///
/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub tbs_certificate: TbsCertificate,
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,
    pub signature_value: BitString,
    der: Vec<u8>,
    tbs_range: Range<usize>,
}

impl Certificate {
    /// Assemble a certificate from a signed TBS and its signature.
    pub fn new(
        tbs_certificate: TbsCertificate,
        signature_algorithm: AlgorithmIdentifier<der::Any>,
        signature_value: BitString,
    ) -> Result<Self> {
        check_signature_bits(&signature_value)?;
        let tbs_der = tbs_certificate.to_der().map_err(Error::encoding)?;
        let body_len = (Length::try_from(tbs_der.len()).map_err(Error::encoding)?
            + signature_algorithm.encoded_len().map_err(Error::encoding)?
            + signature_value.encoded_len().map_err(Error::encoding)?)
        .map_err(Error::encoding)?;

        let mut der = Vec::new();
        Header::new(Tag::Sequence, body_len)
            .and_then(|h| h.encode_to_vec(&mut der))
            .map_err(Error::encoding)?;
        let tbs_start = der.len();
        der.extend_from_slice(&tbs_der);
        let tbs_range = tbs_start..der.len();
        signature_algorithm
            .encode_to_vec(&mut der)
            .map_err(Error::encoding)?;
        signature_value
            .encode_to_vec(&mut der)
            .map_err(Error::encoding)?;

        Ok(Self {
            tbs_certificate,
            signature_algorithm,
            signature_value,
            der,
            tbs_range,
        })
    }

    /// Parse exactly one DER certificate. Trailing bytes are an error.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let header = Header::decode(&mut reader)?;
        header.tag.assert_eq(Tag::Sequence)?;
        let tbs_start = usize::try_from(header.encoded_len()?)?;

        let (tbs_len, tbs_certificate, signature_algorithm, signature_value) =
            reader.read_nested(header.length, |reader| {
                let tbs_der = reader.tlv_bytes()?;
                let tbs_certificate = TbsCertificate::from_der(tbs_der)?;
                let signature_algorithm = AlgorithmIdentifier::decode(reader)?;
                let signature_value = BitString::decode(reader)?;
                Ok((
                    tbs_der.len(),
                    tbs_certificate,
                    signature_algorithm,
                    signature_value,
                ))
            })?;
        reader.finish(())?;
        check_signature_bits(&signature_value)?;

        Ok(Self {
            tbs_certificate,
            signature_algorithm,
            signature_value,
            der: bytes.to_vec(),
            tbs_range: tbs_start..tbs_start + tbs_len,
        })
    }

    /// Parse a single `CERTIFICATE` PEM block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PEM_LABEL {
            return Err(Error::Encoding(EncodingError::WrongPemLabel(
                label.to_string(),
            )));
        }
        Self::from_der(&der_bytes)
    }

    /// The DER encoding, byte-identical to what was parsed.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    pub fn to_pem(&self) -> Result<String> {
        pem_rfc7468::encode_string(PEM_LABEL, pem_rfc7468::LineEnding::LF, &self.der)
            .map_err(Error::from)
    }

    /// The DER bytes of the TBSCertificate, as signed by the issuer.
    pub fn tbs_der(&self) -> Result<&[u8]> {
        self.der.get(self.tbs_range.clone()).ok_or_else(|| {
            Error::Internal("TBSCertificate range outside certificate encoding".to_string())
        })
    }

    /// Signature octets, without the BIT STRING unused-bits byte.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_value.raw_bytes()
    }

    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    pub fn serial_number(&self) -> &[u8] {
        self.tbs_certificate.serial_number()
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    pub fn subject_public_key_info(&self) -> &SpkiInfo {
        &self.tbs_certificate.subject_public_key_info
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }

    /// Subject and issuer names are byte-identical.
    pub fn is_self_issued(&self) -> bool {
        self.subject() == self.issuer()
    }

    /// Serial number as colon-separated hex.
    pub fn serial_hex(&self) -> String {
        self.serial_number()
            .iter()
            .map(|b| alloc::format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Signature values are whole octets; any declared unused bits are an error.
fn check_signature_bits(signature: &BitString) -> Result<()> {
    match signature.unused_bits() {
        0 => Ok(()),
        bits => Err(Error::Parse(ParseError::SignatureUnusedBits(bits))),
    }
}

/// One line: version, serial, names and validity window.
impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validity = self.validity();
        write!(
            f,
            "{} certificate {} for \"{}\" from \"{}\", valid {} to {}",
            self.version(),
            self.serial_hex(),
            self.subject(),
            self.issuer(),
            validity.not_before,
            validity.not_after
        )?;
        match self.extensions() {
            Some(extensions) => write!(f, ", {} extension(s)", extensions.len()),
            None => Ok(()),
        }
    }
}

#[cfg(all(test, feature = "ring-backend"))]
mod tests {
    use super::*;
    use crate::test_utils;

    fn leaf() -> Certificate {
        test_utils::valid_chain().into_certificates().remove(0)
    }

    #[test]
    fn test_version_field() {
        assert_eq!(Version::try_from(0u8), Ok(Version::V1));
        assert_eq!(Version::try_from(2u8), Ok(Version::V3));
        assert!(Version::try_from(7u8).is_err());
        assert_eq!(Version::V2.to_string(), "v2");
        assert_eq!(Version::default().to_string(), "v3");
    }

    #[test]
    fn test_extension_value_is_octet_content() {
        let basic_constraints = ObjectIdentifier::new_unwrap("2.5.29.19");
        let ext = Extension::new(basic_constraints, false, alloc::vec![0x30, 0x00]).unwrap();
        assert_eq!(ext.value(), &[0x30, 0x00]);

        // critical FALSE is DEFAULT and must not be encoded
        let der = ext.to_der().unwrap();
        assert_eq!(der, [0x30, 0x09, 0x06, 0x03, 0x55, 0x1d, 0x13, 0x04, 0x02, 0x30, 0x00]);
        assert_eq!(Extension::from_der(&der).unwrap(), ext);
    }

    #[test]
    fn test_extensions_lookup() {
        let leaf = leaf();
        let extensions = leaf.extensions().unwrap();
        assert_eq!(extensions.len(), 2);
        assert!(extensions.find(&crate::x509::oids::KEY_USAGE).is_some());
        assert!(extensions
            .find(&ObjectIdentifier::new_unwrap("2.5.29.17"))
            .is_none());
    }

    #[test]
    fn test_reparse_is_byte_exact() {
        let leaf = leaf();
        let parsed = Certificate::from_der(leaf.to_der());
        assert!(parsed.is_ok(), "Failed to parse leaf: {:?}", parsed.err());
        let parsed = parsed.unwrap();

        assert_eq!(parsed, leaf);
        assert_eq!(parsed.to_der(), leaf.to_der());
        assert_eq!(parsed.version(), Version::V3);
        assert_eq!(parsed.serial_number(), &[3]);
    }

    #[test]
    fn test_tbs_slice_is_what_was_signed() {
        for cert in test_utils::valid_chain().iter() {
            let encoded = cert.tbs_certificate.to_der().unwrap();
            assert_eq!(cert.tbs_der().unwrap(), &encoded[..]);
        }
    }

    #[test]
    fn test_framing_errors() {
        let leaf = leaf();
        let der = leaf.to_der();

        let mut padded = der.to_vec();
        padded.push(0x00);
        assert!(Certificate::from_der(&padded).is_err());
        assert!(Certificate::from_der(&der[..der.len() - 1]).is_err());
        assert!(Certificate::from_der(&[]).is_err());
    }

    #[test]
    fn test_signature_unused_bits_rejected() {
        let leaf = leaf();
        let signature = &leaf.signature_value;
        let padded = BitString::new(3, signature.raw_bytes()).unwrap();

        let mut der = leaf.to_der().to_vec();
        let pos = der.len() - signature.raw_bytes().len() - 1;
        assert_eq!(der[pos], 0x00);
        der[pos] = 0x03;

        assert_eq!(
            Certificate::from_der(&der),
            Err(Error::Parse(ParseError::SignatureUnusedBits(3)))
        );
        assert_eq!(
            Certificate::new(
                leaf.tbs_certificate.clone(),
                leaf.signature_algorithm.clone(),
                padded
            ),
            Err(Error::Parse(ParseError::SignatureUnusedBits(3)))
        );
    }

    #[test]
    fn test_pem() {
        let chain = test_utils::valid_chain();
        let root = chain.root().unwrap();
        let pem = root.to_pem().unwrap();
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert_eq!(&Certificate::from_pem(&pem).unwrap(), root);

        let key = pem_rfc7468::encode_string(
            "PRIVATE KEY",
            pem_rfc7468::LineEnding::LF,
            &[0x30, 0x00],
        )
        .unwrap();
        assert!(matches!(
            Certificate::from_pem(&key),
            Err(Error::Encoding(EncodingError::WrongPemLabel(label))) if label == "PRIVATE KEY"
        ));
    }

    #[test]
    fn test_display_is_one_line() {
        let text = leaf().to_string();
        assert!(!text.contains('\n'));
        assert!(text.starts_with("v3 certificate 03 for \"CN=Leaf, O=Example Org\""));
        assert!(text.contains("from \"CN=Intermediate CA, O=Example Org\""));
        assert!(text.ends_with(", 2 extension(s)"));
    }
}
