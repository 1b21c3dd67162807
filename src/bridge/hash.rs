use crate::{
    bridge::message::Address,
    digest::{blake2, Digest},
};
use ethereum_types::U256;

/// Message id over the packed fields, integers as 32-byte big-endian words.
#[inline]
pub(crate) fn message_hash(
    sender: &Address,
    recipient: &Address,
    nonce: &U256,
    amount: &U256,
    data: &[u8],
) -> Digest {
    let mut word = [0u8; 32];
    let mut state = blake2().to_state();
    state.update(sender.as_bytes());
    state.update(recipient.as_bytes());
    nonce.to_big_endian(&mut word);
    state.update(&word);
    amount.to_big_endian(&mut word);
    state.update(&word);
    state.update(data);
    Digest::from(state.finalize())
}
