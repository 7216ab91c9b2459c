// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (bearer token required). The resource
// handlers in `data` serve both `/api/*` and the guarded `/api/private/*`.
pub mod data;
pub mod protected;
pub mod public;
