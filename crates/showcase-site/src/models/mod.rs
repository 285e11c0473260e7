//! Content models for the site.
//!
//! Every record is static, read-only data compiled into the binary; the
//! table itself lives in [`crate::content`].
//!
//! # Profile
//!
//! - [`Project`] - delivered client project with a demo video
//! - [`Certification`] - certificate with badge image
//! - [`WorkExperience`] / [`Study`] - dated career entries
//! - [`BlogPost`] - post stub
//!
//! # People
//!
//! - [`Client`] - client logo
//! - [`Review`] - testimonial
//! - [`SocialLink`] - outbound profile link

mod people;
mod profile;

pub use people::{Client, Review, SocialLink};
pub use profile::{BlogPost, Certification, Project, Study, WorkExperience};
