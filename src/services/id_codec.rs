/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID の変換 (encode/decode)
 * - blogs の serial id ("blogId") は外に出さず、sqids で符号化した文字列を `id` として返す
 *
 * thiserror を使わない理由:
 * - このモジュール内で完結するエラー型なので
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug)]
pub enum IdCodecError {
    InvalidMinLength { value: usize },
    Sqids(SqidsError),
    NegativeId { value: i64 },
    DecodeInvalidFormat,
    DecodeOutOfRange,
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMinLength { value } => {
                write!(f, "SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")
            }
            Self::Sqids(e) => write!(f, "sqids error: {e}"),
            Self::NegativeId { value } => write!(f, "id must be non-negative, got {value}"),
            Self::DecodeInvalidFormat => f.write_str("invalid public id format"),
            Self::DecodeOutOfRange => f.write_str("decoded id is out of range"),
        }
    }
}

impl Error for IdCodecError {}

impl From<SqidsError> for IdCodecError {
    fn from(e: SqidsError) -> Self {
        Self::Sqids(e)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    /// Only canonical encodings are accepted: sqids can decode several strings
    /// to the same number, so the id is re-encoded and compared.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };
        let id = i64::try_from(*n).map_err(|_| IdCodecError::DecodeOutOfRange)?;

        if self.encode(id)? != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn codec() -> IdCodec {
        IdCodec::new(10, ALPHABET).unwrap()
    }

    #[test]
    fn encoded_ids_decode_back() {
        let codec = codec();
        for id in [0_i64, 1, 42, 1_000_000] {
            let public = codec.encode(id).unwrap();
            assert!(public.len() >= 10);
            assert_eq!(codec.decode(&public).unwrap(), id);
        }
    }

    #[test]
    fn negative_id_cannot_be_encoded() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = codec();
        assert!(codec.decode("").is_err());
        assert!(codec.decode("!!!").is_err());
    }

    #[test]
    fn min_length_above_u8_is_rejected() {
        assert!(matches!(
            IdCodec::new(300, ALPHABET),
            Err(IdCodecError::InvalidMinLength { value: 300 })
        ));
    }
}
