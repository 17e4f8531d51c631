pub mod errors;
pub mod generate;
pub mod models;
pub mod sets;
pub mod store;
pub mod users;

pub use errors::*;
pub use generate::*;
pub use models::*;
pub use sets::*;
pub use store::*;
pub use users::*;
