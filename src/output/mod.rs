mod layout;
mod report;
mod summary;

pub use layout::{folder_name, FolderNames, OutputLayout};
pub use report::{curated_file_name, write_location};
pub use summary::write_summary;
