pub mod diagnostic;
pub mod dosage;
pub mod hypothesis;
pub mod rdt;
pub mod result;
pub mod session;
