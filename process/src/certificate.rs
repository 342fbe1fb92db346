use anyhow::Context;
use std::fmt;
use x509_parser::{pem::parse_x509_pem, prelude::*};

/// The parts of an X.509 certificate worth reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    pub not_before: String,
    pub not_after: String,
}

impl CertificateInfo {
    fn from_x509(cert: &X509Certificate<'_>) -> Self {
        let validity = cert.validity();
        Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: validity.not_before.to_string(),
            not_after: validity.not_after.to_string(),
        }
    }
}

impl fmt::Display for CertificateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f, "Issuer: {}", self.issuer)?;
        writeln!(f, "Serial: {}", self.serial)?;
        write!(f, "Valid: {} - {}", self.not_before, self.not_after)
    }
}

/// Parse a DER certificate, or a PEM-armoured one.
pub fn parse_certificate(data: &[u8]) -> anyhow::Result<CertificateInfo> {
    if data.starts_with(b"-----BEGIN") {
        let (_, pem) = parse_x509_pem(data).context("invalid PEM block")?;
        let cert = pem.parse_x509().context("failed to parse certificate")?;
        return Ok(CertificateInfo::from_x509(&cert));
    }

    let (rest, cert) = X509Certificate::from_der(data).context("failed to parse certificate")?;
    if !rest.is_empty() {
        warn!(trailing = rest.len(), "ignoring bytes after certificate");
    }

    Ok(CertificateInfo::from_x509(&cert))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DER: &[u8] = include_bytes!("../tests/fixtures/cert.der");
    const PEM: &[u8] = include_bytes!("../tests/fixtures/cert.pem");

    #[test]
    fn der_certificate_fields() {
        let info = parse_certificate(DER).unwrap();

        assert!(info.subject.contains("CN=certembed.example"));
        assert!(info.subject.contains("O=Example Org"));
        assert_eq!(info.issuer, info.subject);
        assert_eq!(info.serial, "2a");
        assert!(info.not_before.contains("2026"));
        assert!(info.not_after.contains("2036"));
    }

    #[test]
    fn pem_matches_der() {
        assert!(PEM.starts_with(b"-----BEGIN CERTIFICATE-----"));
        assert_eq!(parse_certificate(PEM).unwrap(), parse_certificate(DER).unwrap());
    }

    #[test]
    fn trailing_bytes_after_der_ignored() {
        let mut padded = DER.to_vec();
        padded.extend_from_slice(&[0; 7]);
        assert_eq!(parse_certificate(&padded).unwrap(), parse_certificate(DER).unwrap());
    }

    #[test]
    fn truncated_der_rejected() {
        assert!(parse_certificate(&DER[..DER.len() - 1]).is_err());
    }

    #[test]
    fn display_lists_fields() {
        let text = parse_certificate(DER).unwrap().to_string();
        assert!(text.starts_with("Subject: "));
        assert!(text.contains("\nSerial: 2a\n"));
    }

    #[test]
    fn random_bytes_rejected() {
        assert!(parse_certificate(b"CERT").is_err());
        assert!(parse_certificate(&[0x30, 0x82, 0x01]).is_err());
    }

    #[test]
    fn broken_pem_rejected() {
        let pem = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        assert!(parse_certificate(pem).is_err());
    }
}
