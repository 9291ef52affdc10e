mod delete;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use select::{Select, SelectWithColumns, SelectWithTable};
pub use update::Update;
