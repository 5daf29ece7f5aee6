//! Small helpers shared across layers.
//!
//! - [`client_ip`] - client address and origin from request headers
//! - [`email_address`] - email address normalization
//! - [`html`] - clean-up of model-generated HTML
//! - [`text`] - character-safe truncation

pub mod client_ip;
pub mod email_address;
pub mod html;
pub mod text;
