//! In-memory demonstration of blockchain mechanics: a genesis block, an
//! append-only chain of weighted blocks, SHA-256 content hashes for tamper
//! evidence, and a longest-chain fork choice.
//!
//! The [`chain::Chain`] is a plain owned value — no globals, no persistence,
//! no networking. Everything lives in one process and dies with it.

pub mod block;
pub mod chain;
pub mod error;
