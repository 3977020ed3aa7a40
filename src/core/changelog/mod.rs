mod io;
mod sections;

pub use io::*;
pub use sections::*;
