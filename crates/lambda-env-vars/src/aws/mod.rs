//! AWS collaborators: KMS for decryption and S3 for JSON documents.
//!
//! Lookups talk to both services only through the [`Decrypter`] and
//! [`ObjectStore`] traits so the orchestration logic can be exercised with
//! mocks. The production implementations wrap the official SDK clients.

pub mod clients;
pub mod kms;
pub mod s3;

pub use clients::AwsClients;
pub use kms::{Decrypter, KmsDecrypter};
pub use s3::{ObjectStore, S3ObjectStore};

#[cfg(test)]
pub use kms::MockDecrypter;
#[cfg(test)]
pub use s3::MockObjectStore;
