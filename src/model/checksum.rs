//! Checksums and the per-(entity, revision) algorithm policy.

use crate::error::{ParseError, Result};
use crate::model::SpecRevision;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed checksum algorithm vocabulary across all revisions.
///
/// Which subset is legal depends on the owning entity kind and the spec
/// revision; see [`allowed_algorithms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Md2,
    Md4,
    Md5,
    Md6,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Adler32,
}

impl ChecksumAlgorithm {
    /// Parse the suffix after `checksumAlgorithm_`, case-folded.
    /// `-` and `_` are interchangeable in the multi-part names.
    pub fn from_uri_token(token: &str) -> Result<Self> {
        let folded = token.to_ascii_lowercase().replace('-', "_");
        let algorithm = match folded.as_str() {
            "sha1" => Self::Sha1,
            "sha224" => Self::Sha224,
            "sha256" => Self::Sha256,
            "sha384" => Self::Sha384,
            "sha512" => Self::Sha512,
            "sha3_256" => Self::Sha3_256,
            "sha3_384" => Self::Sha3_384,
            "sha3_512" => Self::Sha3_512,
            "md2" => Self::Md2,
            "md4" => Self::Md4,
            "md5" => Self::Md5,
            "md6" => Self::Md6,
            "blake2b_256" => Self::Blake2b256,
            "blake2b_384" => Self::Blake2b384,
            "blake2b_512" => Self::Blake2b512,
            "blake3" => Self::Blake3,
            "adler32" => Self::Adler32,
            _ => return Err(ParseError::invalid_value("checksum algorithm", token)),
        };
        Ok(algorithm)
    }

    /// The tag-value spelling (`SHA1`, `SHA3-256`, `BLAKE2b-384`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Adler32 => "ADLER32",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed digest attached to a package, file, or external document ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    #[serde(rename = "checksumValue")]
    pub value: String,
}

impl Checksum {
    #[must_use]
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }
}

/// The entity kinds that carry checksums; each has its own legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumContext {
    Package,
    File,
    ExternalDocumentRef,
}

impl ChecksumContext {
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::File => "File",
            Self::ExternalDocumentRef => "ExternalDocumentRef",
        }
    }
}

const V2_1_PACKAGE: &[ChecksumAlgorithm] = &[
    ChecksumAlgorithm::Sha1,
    ChecksumAlgorithm::Sha256,
    ChecksumAlgorithm::Md5,
];
// 2.1 mandates SHA1 for files; the wider package set arrived for files in 2.2.
const V2_1_FILE: &[ChecksumAlgorithm] = &[ChecksumAlgorithm::Sha1];
const V2_1_EXTDOC: &[ChecksumAlgorithm] = &[ChecksumAlgorithm::Sha1];

const V2_2_SET: &[ChecksumAlgorithm] = &[
    ChecksumAlgorithm::Sha1,
    ChecksumAlgorithm::Sha224,
    ChecksumAlgorithm::Sha256,
    ChecksumAlgorithm::Sha384,
    ChecksumAlgorithm::Sha512,
    ChecksumAlgorithm::Md2,
    ChecksumAlgorithm::Md4,
    ChecksumAlgorithm::Md5,
    ChecksumAlgorithm::Md6,
];

const V2_3_SET: &[ChecksumAlgorithm] = &[
    ChecksumAlgorithm::Sha1,
    ChecksumAlgorithm::Sha224,
    ChecksumAlgorithm::Sha256,
    ChecksumAlgorithm::Sha384,
    ChecksumAlgorithm::Sha512,
    ChecksumAlgorithm::Sha3_256,
    ChecksumAlgorithm::Sha3_384,
    ChecksumAlgorithm::Sha3_512,
    ChecksumAlgorithm::Md2,
    ChecksumAlgorithm::Md4,
    ChecksumAlgorithm::Md5,
    ChecksumAlgorithm::Md6,
    ChecksumAlgorithm::Blake2b256,
    ChecksumAlgorithm::Blake2b384,
    ChecksumAlgorithm::Blake2b512,
    ChecksumAlgorithm::Blake3,
    ChecksumAlgorithm::Adler32,
];

/// The legal algorithm set for one entity kind under one revision.
#[must_use]
pub fn allowed_algorithms(
    context: ChecksumContext,
    revision: SpecRevision,
) -> &'static [ChecksumAlgorithm] {
    match (revision, context) {
        (SpecRevision::V2_1, ChecksumContext::Package) => V2_1_PACKAGE,
        (SpecRevision::V2_1, ChecksumContext::File) => V2_1_FILE,
        (SpecRevision::V2_1, ChecksumContext::ExternalDocumentRef) => V2_1_EXTDOC,
        (SpecRevision::V2_2, ChecksumContext::ExternalDocumentRef) => V2_1_EXTDOC,
        (SpecRevision::V2_2, _) => V2_2_SET,
        (SpecRevision::V2_3, _) => V2_3_SET,
    }
}

/// Validate an algorithm against the policy for its context and revision.
pub fn check_algorithm(
    algorithm: ChecksumAlgorithm,
    context: ChecksumContext,
    revision: SpecRevision,
) -> Result<()> {
    if allowed_algorithms(context, revision).contains(&algorithm) {
        Ok(())
    } else {
        Err(ParseError::invalid_value(
            "checksum algorithm",
            format!(
                "{algorithm} is not legal for a {} in revision {revision}",
                context.describe()
            ),
        ))
    }
}
