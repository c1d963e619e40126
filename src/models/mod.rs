pub mod enums;
pub mod lab_result;
pub mod medical_record;
pub mod medication;
pub mod note;
pub mod patient;
pub mod session;
pub mod user;

pub use enums::*;
pub use lab_result::*;
pub use medical_record::*;
pub use medication::*;
pub use note::*;
pub use patient::*;
pub use session::*;
pub use user::*;
