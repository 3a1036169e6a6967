pub use entity_api::user::{find_by_id, update};
