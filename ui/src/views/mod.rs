mod compatibility;
mod home;
mod result;

pub use compatibility::CompatibilityPage;
pub use home::{compatibility_request, year_options, BirthInput, Home};
pub use result::ResultPage;
