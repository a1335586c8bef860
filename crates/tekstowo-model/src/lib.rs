pub mod error;
pub mod letter;
pub mod page_limit;
pub mod song;

pub use error::*;
pub use letter::*;
pub use page_limit::*;
pub use song::*;
