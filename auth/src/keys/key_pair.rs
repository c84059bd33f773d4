use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs1::LineEnding;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use super::errors::KeyError;

/// RSA key pair used to sign tokens.
///
/// Holds the private key together with the prepared signing key and the
/// public half. Key material is exchanged with storage as PKCS#1 DER.
#[derive(Clone)]
pub struct KeyPair {
    private_key: RsaPrivateKey,
    encoding_key: EncodingKey,
    public_key: PublicKey,
}

/// Public half of a [`KeyPair`], used to verify token signatures.
#[derive(Clone)]
pub struct PublicKey {
    der: Vec<u8>,
    decoding_key: DecodingKey,
}

impl KeyPair {
    /// Modulus size of generated keys.
    pub const BITS: usize = 2048;

    /// Generate a fresh key pair from the OS random source.
    ///
    /// This is CPU heavy (hundreds of milliseconds); async callers should
    /// run it on a blocking thread.
    ///
    /// # Errors
    /// * `GenerationFailed` - RNG or prime generation failed
    /// * `EncodingFailed` - Generated key could not be serialized
    pub fn generate() -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::new(&mut OsRng, Self::BITS)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;

        Self::from_private_key(private_key)
    }

    /// Rebuild a key pair from PKCS#1 DER private key bytes.
    ///
    /// # Errors
    /// * `DecodingFailed` - Bytes are not a valid RSA private key, or the
    ///   key is weaker than [`KeyPair::BITS`]
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| KeyError::DecodingFailed(e.to_string()))?;

        private_key
            .validate()
            .map_err(|e| KeyError::DecodingFailed(e.to_string()))?;

        let bits = private_key.size() * 8;
        if bits < Self::BITS {
            return Err(KeyError::DecodingFailed(format!(
                "key size {} bits is below the required {} bits",
                bits,
                Self::BITS
            )));
        }

        Self::from_private_key(private_key)
    }

    fn from_private_key(private_key: RsaPrivateKey) -> Result<Self, KeyError> {
        let private_der = private_key
            .to_pkcs1_der()
            .map_err(|e| KeyError::EncodingFailed(e.to_string()))?;
        let encoding_key = EncodingKey::from_rsa_der(private_der.as_bytes());

        let public_der = private_key
            .to_public_key()
            .to_pkcs1_der()
            .map_err(|e| KeyError::EncodingFailed(e.to_string()))?
            .as_bytes()
            .to_vec();

        Ok(Self {
            private_key,
            encoding_key,
            public_key: PublicKey::from_pkcs1_der(public_der),
        })
    }

    /// Serialize the private key as PKCS#1 DER for storage.
    pub fn to_pkcs1_der(&self) -> Result<Vec<u8>, KeyError> {
        self.private_key
            .to_pkcs1_der()
            .map(|document| document.as_bytes().to_vec())
            .map_err(|e| KeyError::EncodingFailed(e.to_string()))
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("bits", &(self.private_key.size() * 8))
            .finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Wrap PKCS#1 DER public key bytes.
    ///
    /// The bytes are not parsed here; a malformed key surfaces as a failed
    /// verification.
    pub fn from_pkcs1_der(der: Vec<u8>) -> Self {
        let decoding_key = DecodingKey::from_rsa_der(&der);
        Self { der, decoding_key }
    }

    /// PKCS#1 DER (`RSAPublicKey`) encoding of the key.
    pub fn to_pkcs1_der(&self) -> &[u8] {
        &self.der
    }

    /// PEM (`RSA PUBLIC KEY`) encoding of the key.
    pub fn to_pkcs1_pem(&self) -> Result<String, KeyError> {
        use rsa::pkcs1::DecodeRsaPublicKey;

        rsa::RsaPublicKey::from_pkcs1_der(&self.der)
            .map_err(|e| KeyError::DecodingFailed(e.to_string()))?
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| KeyError::EncodingFailed(e.to_string()))
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("der_len", &self.der.len())
            .finish_non_exhaustive()
    }
}
