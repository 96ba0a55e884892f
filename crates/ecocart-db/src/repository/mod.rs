//! # Repository Module
//!
//! Storage repositories for EcoCart.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI session (CartState)                                               │
//! │       │  save after every mutation, load once at startup               │
//! │       ▼                                                                 │
//! │  CartRepository          ← knows the cart blob format                  │
//! │       │  get / put / delete under one key                              │
//! │       ▼                                                                 │
//! │  KvRepository            ← knows nothing about carts                   │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  kv_store table                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvRepository`](kv::KvRepository) - Named text blobs
//! - [`CartRepository`](cart::CartRepository) - The persisted cart

pub mod cart;
pub mod kv;
