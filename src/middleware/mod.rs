mod pagination;
mod request_id;

pub use pagination::paginate;
pub use request_id::{request_id_layer, X_REQUEST_ID};
