// Mykilio Infrastructure - Credential Adapter
// Implements: CredentialIssuer

mod jwt_issuer;

pub use jwt_issuer::{Claims, HmacJwtIssuer};
