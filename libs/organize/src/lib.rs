//! OneID business directory client for the OnePlatform SDK.
//!
//! Every endpoint is a GET scoped by company tax id and wrapped in an [`Envelope`]. Listing
//! endpoints are decoded with [`decode_lenient`], so one malformed record is logged and
//! skipped rather than failing the whole call.
pub mod client;
pub mod credentials;
pub mod decode;
pub mod envelope;
pub mod models;

pub use client::{DEFAULT_ENDPOINT, OrgClient};
pub use credentials::{OrgCredentials, OrgSignIn};
pub use decode::{LenientList, Skipped, decode_lenient};
pub use envelope::Envelope;
pub use models::{Department, DepartmentMembers, HeadDepartment, Role, RoleAssignment, TeamMember};
