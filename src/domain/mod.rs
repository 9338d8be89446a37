pub mod account;
pub mod business_partner;
pub mod ports;
pub mod reference;
pub mod transaction;
