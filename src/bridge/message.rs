use super::hash::message_hash;
use crate::digest::{Digest, Digestible};
use core::fmt;
use ethereum_types::U256;
use serde::{
    de::{Deserializer, SeqAccess, Visitor},
    ser::{SerializeTupleStruct, Serializer},
    Deserialize, Serialize,
};
use std::str::FromStr;

pub const ADDRESS_LEN: usize = 32;

/// A 32-byte account on either chain.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    #[inline]
    pub fn as_bytes(&self) -> &'_ [u8] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0; ADDRESS_LEN])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start_matches("0x");
        let data = hex::decode(s)?;
        anyhow::ensure!(
            data.len() == ADDRESS_LEN,
            "invalid address length: {}",
            data.len()
        );
        let mut out = Self::default();
        out.0.copy_from_slice(&data[..ADDRESS_LEN]);
        Ok(out)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(&self.0))
        } else {
            let mut state = serializer.serialize_tuple_struct("Address", 1)?;
            state.serialize_field(&self.0)?;
            state.end()
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as DeError;

        struct HexVisitor;

        impl<'de> Visitor<'de> for HexVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("struct Address")
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Address, E> {
                value.parse().map_err(E::custom)
            }
        }

        struct BytesVisitor;

        impl<'de> Visitor<'de> for BytesVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("struct Address")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Address, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let inner = seq
                    .next_element()?
                    .ok_or_else(|| DeError::invalid_length(0, &self))?;
                Ok(Address(inner))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(HexVisitor)
        } else {
            deserializer.deserialize_tuple_struct("Address", 1, BytesVisitor)
        }
    }
}

/// An outgoing message emitted by the secondary chain.
///
/// The nonce is the sole replay-protection key: once a message with a given
/// nonce has been relayed, no message with the same nonce is accepted again.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Address,
    pub recipient: Address,
    pub amount: U256,
    pub nonce: U256,
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(
        sender: Address,
        recipient: Address,
        amount: U256,
        nonce: U256,
        data: Vec<u8>,
    ) -> Self {
        Self {
            sender,
            recipient,
            amount,
            nonce,
            data,
        }
    }

    /// The message id doubles as the Merkle leaf digest of the message.
    pub fn id(&self) -> Digest {
        self.to_digest()
    }
}

impl Digestible for Message {
    fn to_digest(&self) -> Digest {
        message_hash(
            &self.sender,
            &self.recipient,
            &self.nonce,
            &self.amount,
            &self.data,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{blake2, DIGEST_LEN};

    fn addr(b: u8) -> Address {
        Address([b; ADDRESS_LEN])
    }

    fn sample_message() -> Message {
        Message::new(
            addr(0x11),
            addr(0x22),
            U256::from(1_000u64),
            U256::from(7u64),
            vec![0xde, 0xad, 0xbe, 0xef],
        )
    }

    #[test]
    fn test_message_id_packed_order() {
        let msg = sample_message();
        let expect = {
            let mut buf = Vec::new();
            buf.extend_from_slice(&[0x11; 32]);
            buf.extend_from_slice(&[0x22; 32]);
            let mut word = [0u8; DIGEST_LEN];
            word[31] = 7;
            buf.extend_from_slice(&word); // nonce before amount
            let mut word = [0u8; DIGEST_LEN];
            word[30] = 0x03;
            word[31] = 0xe8;
            buf.extend_from_slice(&word);
            buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
            Digest::from(blake2().hash(&buf))
        };
        assert_eq!(msg.id(), expect);
    }

    #[test]
    fn test_message_id_field_sensitivity() {
        let msg = sample_message();
        let mut other = msg.clone();
        other.nonce = U256::from(8u64);
        assert_ne!(msg.id(), other.id());

        let mut other = msg.clone();
        other.amount = U256::from(1_001u64);
        assert_ne!(msg.id(), other.id());

        let mut other = msg.clone();
        other.data.push(0x00);
        assert_ne!(msg.id(), other.id());
    }

    #[test]
    fn test_address_parse() {
        let a: Address = format!("0x{}", hex::encode([0xabu8; 32])).parse().unwrap();
        assert_eq!(a, addr(0xab));
        assert!("0xabcd".parse::<Address>().is_err());
    }

    #[test]
    fn test_message_serde_roundtrip() {
        let msg = sample_message();
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(serde_json::from_str::<Message>(&json).unwrap(), msg);
        let bin = bincode::serialize(&msg).unwrap();
        assert_eq!(bincode::deserialize::<Message>(&bin[..]).unwrap(), msg);
    }
}
