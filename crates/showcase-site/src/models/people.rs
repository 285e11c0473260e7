//! Clients, testimonials and social links.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Client {
    pub name: &'static str,

    /// Logo path under the public assets
    pub logo: &'static str,

    pub link: &'static str,
}

/// A testimonial from a client.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Review {
    /// Reviewer
    pub name: &'static str,

    /// Reviewer's role at `company`
    pub role: &'static str,

    pub company: &'static str,
    pub content: &'static str,

    /// Company site
    pub backlink: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub link: &'static str,
}
