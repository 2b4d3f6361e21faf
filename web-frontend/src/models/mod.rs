pub mod academy;
pub mod admin;
pub mod blog;
pub mod event;
pub mod invoice;
pub mod partnership;

pub use academy::{
    AcademyAnalytics, Course, CourseInput, CoursePayload, Enrollment, EnrollmentStatus,
};
pub use admin::{AdminClaims, AdminUser};
pub use blog::{BlogListing, BlogPost, BlogQuery, Comment, NewComment};
pub use event::Event;
pub use invoice::{EditorAction, InvoiceFormInput, InvoiceRecord, InvoiceSummary, SavedInvoice};
pub use partnership::{PartnershipRequest, PartnershipType};
