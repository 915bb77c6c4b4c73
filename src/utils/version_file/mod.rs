// version file rendering and persistence

pub mod codec;
pub mod types;
pub mod writer;

pub use codec::{extract_version, render_declaration, render_new_file, update_content};
pub use types::VersionFileType;
pub use writer::{PlannedUpdate, VersionFile};
