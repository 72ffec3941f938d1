//! # Certification Types
//!
//! The closed set of certifications a `CertificationType` constraint may
//! name. A right operand outside this set is never satisfiable.

use serde::{Deserialize, Serialize};

/// A known certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CertificationType {
    /// Quality management.
    #[serde(rename = "ISO9001")]
    Iso9001,
    /// Environmental management.
    #[serde(rename = "ISO14001")]
    Iso14001,
    /// Information security management.
    #[serde(rename = "ISO27001")]
    Iso27001,
    /// Occupational health and safety.
    #[serde(rename = "ISO45001")]
    Iso45001,
    /// Energy management.
    #[serde(rename = "ISO50001")]
    Iso50001,
    /// Automotive quality management.
    #[serde(rename = "IATF16949")]
    Iatf16949,
    /// Automotive information security assessment exchange.
    #[serde(rename = "TISAX")]
    Tisax,
}

impl CertificationType {
    /// Every known certification.
    pub const ALL: [CertificationType; 7] = [
        CertificationType::Iso9001,
        CertificationType::Iso14001,
        CertificationType::Iso27001,
        CertificationType::Iso45001,
        CertificationType::Iso50001,
        CertificationType::Iatf16949,
        CertificationType::Tisax,
    ];

    /// Canonical name as used in policy right operands.
    pub fn name(&self) -> &'static str {
        match self {
            CertificationType::Iso9001 => "ISO9001",
            CertificationType::Iso14001 => "ISO14001",
            CertificationType::Iso27001 => "ISO27001",
            CertificationType::Iso45001 => "ISO45001",
            CertificationType::Iso50001 => "ISO50001",
            CertificationType::Iatf16949 => "IATF16949",
            CertificationType::Tisax => "TISAX",
        }
    }

    /// Look up a certification by exact canonical name.
    pub fn from_name(name: &str) -> Option<CertificationType> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for CertificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for c in CertificationType::ALL {
            assert_eq!(CertificationType::from_name(c.name()), Some(c));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(CertificationType::from_name("iso9001"), None);
        assert_eq!(CertificationType::from_name("NotARealCertificate"), None);
    }
}
