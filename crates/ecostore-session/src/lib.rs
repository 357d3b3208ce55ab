//! # ecostore-session: Session State for the EcoStore Client
//!
//! This crate owns all mutable client-side state for one shopping session
//! and exposes it through an injectable [`SessionStore`].
//!
//! ## Module Organization
//! ```text
//! ecostore_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── SessionStore: the single state owner
//! ├── wallet.rs       ◄─── EcoCoin wallet & redemption ledger
//! ├── checkout.rs     ◄─── Checkout state machine & order gateway seam
//! ├── snapshot.rs     ◄─── Load/save boundary (cache semantics)
//! └── error.rs        ◄─── Business-rule rejection types
//! ```
//!
//! ## Why an Injected Store?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Instead of ambient global state, handlers receive a SessionStore:     │
//! │                                                                         │
//! │  • Every operation is testable in isolation with a fresh store         │
//! │  • The checkout flow is testable with a fake OrderGateway              │
//! │  • One lock over the whole session makes read-then-write               │
//! │    sequences atomic without any further discipline at call sites       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod wallet;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{
    CheckoutQuote, CheckoutSession, CheckoutStage, GatewayError, OrderGateway, OrderRequest,
    OrderRequestItem, SHIPPING_COST,
};
pub use error::{SessionError, SessionResult};
pub use snapshot::SessionSnapshot;
pub use store::{CartView, PurchaseOutcome, SessionStore};
pub use wallet::{Redemption, Wallet};
