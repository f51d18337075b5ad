use std::io::{Read, Write};

use age::secrecy::SecretString;

use crate::core::errors::{Result, VpnportError};

const ARMOR_HEADER: &[u8] = b"-----BEGIN AGE ENCRYPTED FILE-----";
const BINARY_HEADER: &[u8] = b"age-encryption.org/v1";

/// Why an encrypted profile could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    /// The passphrase does not unlock the file.
    WrongPassphrase,
    /// The container itself is damaged or not passphrase-encrypted.
    Corrupt(String),
}

/// Passphrase-encrypted profile container using age (scrypt recipient).
///
/// Output is ASCII-armored so sealed profiles stay text-friendly.
pub struct AgeEnvelope;

impl AgeEnvelope {
    /// True when `bytes` look like an age file, armored or binary.
    pub fn is_sealed(bytes: &[u8]) -> bool {
        let start = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());
        let body = &bytes[start..];
        body.starts_with(ARMOR_HEADER) || body.starts_with(BINARY_HEADER)
    }

    /// Encrypt `plaintext` with `passphrase`.
    pub fn seal(plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>> {
        if passphrase.is_empty() {
            return Err(VpnportError::EncryptionFailed {
                reason: "Passphrase must not be empty".into(),
            });
        }

        let encryptor =
            age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_owned()));

        let mut output = Vec::new();
        let armored =
            age::armor::ArmoredWriter::wrap_output(&mut output, age::armor::Format::AsciiArmor)
                .map_err(|e| VpnportError::EncryptionFailed {
                    reason: format!("Armor writer failed: {e}"),
                })?;

        let mut writer =
            encryptor
                .wrap_output(armored)
                .map_err(|e| VpnportError::EncryptionFailed {
                    reason: format!("Encryption stream failed: {e}"),
                })?;

        writer
            .write_all(plaintext)
            .map_err(|e| VpnportError::EncryptionFailed {
                reason: format!("Write failed: {e}"),
            })?;

        let armored_writer = writer
            .finish()
            .map_err(|e| VpnportError::EncryptionFailed {
                reason: format!("Encryption finish failed: {e}"),
            })?;

        armored_writer
            .finish()
            .map_err(|e| VpnportError::EncryptionFailed {
                reason: format!("Armor finish failed: {e}"),
            })?;

        Ok(output)
    }

    /// Decrypt a sealed profile.
    pub fn open(ciphertext: &[u8], passphrase: &str) -> std::result::Result<Vec<u8>, OpenError> {
        let armored_reader = age::armor::ArmoredReader::new(ciphertext);
        let decryptor = age::Decryptor::new(armored_reader)
            .map_err(|e| OpenError::Corrupt(format!("invalid encrypted file: {e}")))?;

        let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_owned()));

        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn age::Identity))
            .map_err(|e| match e {
                age::DecryptError::DecryptionFailed | age::DecryptError::KeyDecryptionFailed => {
                    OpenError::WrongPassphrase
                }
                age::DecryptError::NoMatchingKeys => {
                    OpenError::Corrupt("not passphrase-encrypted".into())
                }
                other => OpenError::Corrupt(other.to_string()),
            })?;

        let mut plaintext = Vec::new();
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| OpenError::Corrupt(format!("read decrypted data failed: {e}")))?;

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_and_open() {
        let sealed = AgeEnvelope::seal(b"remote vpn.example.com 1194", "hunter2").unwrap();

        assert!(String::from_utf8_lossy(&sealed).contains("BEGIN AGE ENCRYPTED FILE"));
        assert!(AgeEnvelope::is_sealed(&sealed));
        assert_eq!(
            AgeEnvelope::open(&sealed, "hunter2").unwrap(),
            b"remote vpn.example.com 1194"
        );
    }

    #[test]
    fn wrong_passphrase_is_distinguished() {
        let sealed = AgeEnvelope::seal(b"client", "hunter2").unwrap();
        assert_eq!(
            AgeEnvelope::open(&sealed, "letmein"),
            Err(OpenError::WrongPassphrase)
        );
    }

    #[test]
    fn key_encrypted_file_is_not_a_wrong_passphrase() {
        let identity = age::x25519::Identity::generate();
        let recipient = identity.to_public();
        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .unwrap();

        let mut output = Vec::new();
        let armored =
            age::armor::ArmoredWriter::wrap_output(&mut output, age::armor::Format::AsciiArmor)
                .unwrap();
        let mut writer = encryptor.wrap_output(armored).unwrap();
        writer.write_all(b"client").unwrap();
        writer.finish().unwrap().finish().unwrap();

        assert!(AgeEnvelope::is_sealed(&output));
        assert_eq!(
            AgeEnvelope::open(&output, "anything"),
            Err(OpenError::Corrupt("not passphrase-encrypted".into()))
        );
    }

    #[test]
    fn garbage_is_corrupt() {
        let result = AgeEnvelope::open(b"-----BEGIN AGE ENCRYPTED FILE-----\nnope\n", "x");
        assert!(matches!(result, Err(OpenError::Corrupt(_))));
    }

    #[test]
    fn plain_profile_is_not_sealed() {
        assert!(!AgeEnvelope::is_sealed(b"client\nremote example.com\n"));
        assert!(AgeEnvelope::is_sealed(b"\n  age-encryption.org/v1\n"));
    }

    #[test]
    fn empty_passphrase_rejected() {
        assert!(AgeEnvelope::seal(b"client", "").is_err());
    }
}
