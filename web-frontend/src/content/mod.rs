//! Marketing copy compiled into the binary.

pub mod company;
pub mod services;

pub use company::{CompanyProfile, COMPANY};
pub use services::{find_service, ServiceOffering, SERVICES};
