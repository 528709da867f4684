//! Wire messages exchanged between signing devices, generated from
//! `proto/keysign_message.proto`.

#![allow(clippy::all)]

include!(concat!(env!("OUT_DIR"), "/vultisig.keysign.v1.rs"));
