mod post;

pub use post::{ManagementPost, PostType};
