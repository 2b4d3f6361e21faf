pub mod academy_client;
pub mod api_client;
pub mod auth_client;
pub mod blog_client;
pub mod flash;
pub mod initial_data;
pub mod invoice_client;
pub mod outreach_client;
pub mod seo;
pub mod view_tracker;

pub use api_client::{ApiClient, CallContext, Download};
