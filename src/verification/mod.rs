pub mod dtos;
pub mod handlers;
pub mod service;

pub use service::{
    EchoedText, VerificationError, VerificationInput, VerificationOutcome, VerificationRequest,
    Verifier,
};
