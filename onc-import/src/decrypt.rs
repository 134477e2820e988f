//! Encrypted configuration envelopes.
//!
//! An `EncryptedConfiguration` wraps a whole ONC document. The key is
//! stretched from the passphrase with PBKDF2-HMAC-SHA1, the ciphertext is
//! authenticated with HMAC-SHA1 under that same key, and the payload is
//! AES-256-CBC with PKCS#7 padding. All binary fields are standard base64.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use onc_value::{Object, ObjectExt, ParseError, Value};
use rand::RngCore;
use sha1::Sha1;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::names::{encrypted, toplevel};

type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type HmacSha1 = Hmac<Sha1>;

/// Upper bound on PBKDF2 rounds accepted from a document.
pub const MAX_ITERATIONS: u32 = 500_000;

const KEY_SIZE: usize = 32;
const SALT_SIZE: usize = 8;
const IV_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("unsupported encryption scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid iteration count {0}, expected 1 to 500000")]
    InvalidIterationCount(String),
    #[error("field '{0}' is not valid base64")]
    DecodeFailure(&'static str),
    #[error("HMAC verification failed (wrong passphrase or corrupted data)")]
    IntegrityFailure,
    #[error("failed to decrypt ciphertext")]
    DecryptFailure,
    #[error("decrypted payload is not a valid configuration: {0}")]
    PlaintextMalformed(#[source] ParseError),
}

/// Whether `object` is an encrypted envelope.
pub fn is_encrypted(object: &Object) -> bool {
    object.get_str(toplevel::TYPE) == Some(toplevel::ENCRYPTED_CONFIGURATION)
}

/// Decrypt an `EncryptedConfiguration` envelope into the document it wraps.
pub fn decrypt(passphrase: &str, envelope: &Object) -> Result<Object, DecryptError> {
    let fields = EnvelopeFields::read(envelope)?;
    let iterations = iteration_count(fields.iterations)?;

    let salt = decode(encrypted::SALT, fields.salt)?;
    let key = derive_key(passphrase, &salt, iterations);

    let iv = decode(encrypted::IV, fields.iv)?;
    let ciphertext = decode(encrypted::CIPHERTEXT, fields.ciphertext)?;
    let expected_hmac = decode(encrypted::HMAC, fields.hmac)?;

    let mut mac = <HmacSha1 as Mac>::new_from_slice(key.as_slice())
        .map_err(|_| DecryptError::IntegrityFailure)?;
    mac.update(&ciphertext);
    mac.verify_slice(&expected_hmac)
        .map_err(|_| DecryptError::IntegrityFailure)?;

    let plaintext = Zeroizing::new(
        Aes256CbcDec::new_from_slices(key.as_slice(), &iv)
            .map_err(|_| DecryptError::DecryptFailure)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| DecryptError::DecryptFailure)?,
    );

    onc_value::parse_bytes(&plaintext)
        .map_err(DecryptError::PlaintextMalformed)
}

/// Wrap `document` in an encrypted envelope with a fresh salt and IV.
pub fn encrypt(
    passphrase: &str,
    document: &Object,
    iterations: u32,
) -> Result<Object, DecryptError> {
    if iterations == 0 || iterations > MAX_ITERATIONS {
        return Err(DecryptError::InvalidIterationCount(iterations.to_string()));
    }

    let mut salt = [0u8; SALT_SIZE];
    let mut iv = [0u8; IV_SIZE];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let key = derive_key(passphrase, &salt, iterations);
    let plaintext = Zeroizing::new(
        serde_json::to_vec(document)
            .map_err(|_| DecryptError::DecryptFailure)?,
    );
    let ciphertext = Aes256CbcEnc::new_from_slices(key.as_slice(), &iv)
        .map_err(|_| DecryptError::DecryptFailure)?
        .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);

    let mut mac = <HmacSha1 as Mac>::new_from_slice(key.as_slice())
        .map_err(|_| DecryptError::IntegrityFailure)?;
    mac.update(&ciphertext);
    let hmac = mac.finalize().into_bytes();

    let mut envelope = Object::new();
    envelope.insert(
        toplevel::TYPE.into(),
        toplevel::ENCRYPTED_CONFIGURATION.into(),
    );
    envelope.insert(encrypted::CIPHER.into(), encrypted::AES256.into());
    envelope.insert(encrypted::HMAC_METHOD.into(), encrypted::SHA1.into());
    envelope.insert(encrypted::STRETCH.into(), encrypted::PBKDF2.into());
    envelope.insert(encrypted::ITERATIONS.into(), iterations.into());
    envelope.insert(encrypted::SALT.into(), BASE64.encode(salt).into());
    envelope.insert(encrypted::IV.into(), BASE64.encode(iv).into());
    envelope.insert(
        encrypted::CIPHERTEXT.into(),
        BASE64.encode(&ciphertext).into(),
    );
    envelope.insert(encrypted::HMAC.into(), BASE64.encode(hmac).into());
    Ok(envelope)
}

struct EnvelopeFields<'a> {
    iterations: &'a Value,
    salt: &'a str,
    iv: &'a str,
    ciphertext: &'a str,
    hmac: &'a str,
}

impl<'a> EnvelopeFields<'a> {
    fn read(envelope: &'a Object) -> Result<Self, DecryptError> {
        expect_literal(envelope, toplevel::TYPE, toplevel::ENCRYPTED_CONFIGURATION)?;
        expect_literal(envelope, encrypted::CIPHER, encrypted::AES256)?;
        expect_literal(envelope, encrypted::HMAC_METHOD, encrypted::SHA1)?;
        expect_literal(envelope, encrypted::STRETCH, encrypted::PBKDF2)?;

        let iterations = envelope
            .get(encrypted::ITERATIONS)
            .filter(|v| v.is_i64() || v.is_u64())
            .ok_or_else(|| {
                DecryptError::UnsupportedScheme(format!(
                    "'{}' must be an integer",
                    encrypted::ITERATIONS
                ))
            })?;

        Ok(Self {
            iterations,
            salt: required_str(envelope, encrypted::SALT)?,
            iv: required_str(envelope, encrypted::IV)?,
            ciphertext: required_str(envelope, encrypted::CIPHERTEXT)?,
            hmac: required_str(envelope, encrypted::HMAC)?,
        })
    }
}

fn expect_literal(envelope: &Object, field: &str, expected: &str) -> Result<(), DecryptError> {
    match envelope.get_str(field) {
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(DecryptError::UnsupportedScheme(format!(
            "'{field}' is '{value}', only '{expected}' is supported"
        ))),
        None => Err(DecryptError::UnsupportedScheme(format!(
            "'{field}' is missing"
        ))),
    }
}

fn required_str<'a>(envelope: &'a Object, field: &str) -> Result<&'a str, DecryptError> {
    envelope
        .get_str(field)
        .ok_or_else(|| DecryptError::UnsupportedScheme(format!("'{field}' must be a string")))
}

fn iteration_count(value: &Value) -> Result<u32, DecryptError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| (1..=MAX_ITERATIONS).contains(n))
        .ok_or_else(|| DecryptError::InvalidIterationCount(value.to_string()))
}

fn decode(field: &'static str, text: &str) -> Result<Vec<u8>, DecryptError> {
    BASE64
        .decode(text.trim())
        .map_err(|_| DecryptError::DecodeFailure(field))
}

fn derive_key(passphrase: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), salt, iterations, key.as_mut_slice());
    key
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use onc_value::{json, parse_file, Object, Value};
    use pretty_assertions::assert_eq;

    use super::{decrypt, encrypt, is_encrypted, DecryptError, MAX_ITERATIONS};

    fn object(value: Value) -> Object {
        value.as_object().cloned().expect("object literal")
    }

    fn fixture(name: &str) -> Object {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../fixtures")
            .join(name);
        parse_file(&path).expect("fixture")
    }

    fn sample_document() -> Object {
        object(json!({
            "Type": "UnencryptedConfiguration",
            "NetworkConfigurations": [
                {"GUID": "n1", "Type": "WiFi", "WiFi": {"SSID": "caf\u{e9}", "Security": "None"}}
            ],
            "Certificates": []
        }))
    }

    fn flip_first_byte(envelope: &mut Object, field: &str) {
        let mut bytes = BASE64
            .decode(envelope[field].as_str().expect("string"))
            .expect("base64");
        bytes[0] ^= 0x01;
        envelope.insert(field.to_string(), BASE64.encode(bytes).into());
    }

    #[test]
    fn decrypts_known_envelope() {
        let envelope = fixture("encrypted.onc");
        assert!(is_encrypted(&envelope));

        let plain = decrypt("test0000", &envelope).expect("decrypt");
        assert_eq!(plain["Type"], json!("UnencryptedConfiguration"));
        assert_eq!(plain["NetworkConfigurations"][0]["GUID"], json!("enc-wifi"));
        assert_eq!(
            plain["NetworkConfigurations"][0]["WiFi"]["Passphrase"],
            json!("swordfish")
        );
    }

    #[test]
    fn encrypt_then_decrypt_reproduces_document() {
        let document = sample_document();
        for (passphrase, iterations) in [("", 1), ("correct horse", 1000)] {
            let envelope = encrypt(passphrase, &document, iterations).expect("encrypt");
            assert_eq!(envelope["Iterations"], json!(iterations));
            assert_eq!(decrypt(passphrase, &envelope).expect("decrypt"), document);
        }
    }

    #[test]
    fn maximum_iteration_count_is_accepted() {
        let document = sample_document();
        let envelope = encrypt("pw", &document, MAX_ITERATIONS).expect("encrypt");
        assert_eq!(decrypt("pw", &envelope).expect("decrypt"), document);
    }

    #[test]
    fn wrong_passphrase_fails_integrity() {
        let envelope = fixture("encrypted.onc");
        let err = decrypt("test0001", &envelope)
            .expect_err("wrong passphrase");
        assert!(matches!(err, DecryptError::IntegrityFailure));
    }

    #[test]
    fn tampered_fields_fail_integrity() {
        for field in ["HMAC", "Ciphertext"] {
            let mut envelope = fixture("encrypted.onc");
            flip_first_byte(&mut envelope, field);
            let err = decrypt("test0000", &envelope).expect_err("tampered");
            assert!(matches!(err, DecryptError::IntegrityFailure), "{field}: {err}");
        }
    }

    #[test]
    fn iteration_bounds_are_enforced() {
        for bad in [json!(0), json!(500_001), json!(-5)] {
            let mut envelope = fixture("encrypted.onc");
            envelope.insert("Iterations".into(), bad.clone());
            let err = decrypt("test0000", &envelope).expect_err("bad iterations");
            assert!(
                matches!(err, DecryptError::InvalidIterationCount(_)),
                "{bad}: {err}"
            );
        }
        assert!(matches!(
            encrypt("pw", &sample_document(), 0),
            Err(DecryptError::InvalidIterationCount(_))
        ));
    }

    #[test]
    fn unsupported_schemes_are_rejected() {
        let mut envelope = fixture("encrypted.onc");
        envelope.insert("Cipher".into(), json!("AES128"));
        assert!(matches!(
            decrypt("test0000", &envelope),
            Err(DecryptError::UnsupportedScheme(_))
        ));

        let mut envelope = fixture("encrypted.onc");
        envelope.insert("Iterations".into(), json!("20000"));
        assert!(matches!(
            decrypt("test0000", &envelope),
            Err(DecryptError::UnsupportedScheme(_))
        ));

        let mut envelope = fixture("encrypted.onc");
        envelope.remove("Salt");
        assert!(matches!(
            decrypt("test0000", &envelope),
            Err(DecryptError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn invalid_base64_is_a_decode_failure() {
        let mut envelope = fixture("encrypted.onc");
        envelope.insert("IV".into(), json!("not base64!"));
        assert!(matches!(
            decrypt("test0000", &envelope),
            Err(DecryptError::DecodeFailure("IV"))
        ));
    }
}
