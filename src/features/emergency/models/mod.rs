mod contact;

pub use contact::{EmergencyContact, Vote};
