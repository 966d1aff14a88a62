pub mod normalize;
pub mod origin;
pub mod party;
pub mod payment;
pub mod quantity;
pub mod transport;

pub use normalize::{normalize, sanitize_numeric};
pub use origin::parse_origin;
pub use party::{parse_party, parse_supplier};
pub use payment::parse_payment;
pub use quantity::parse_quantity;
pub use transport::parse_transport_mode;
