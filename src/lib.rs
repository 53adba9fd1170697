pub mod cli;
pub mod ctx;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod model;
pub mod pairing;
pub mod pipeline;
pub mod preprocess;
pub mod schema;
pub mod table;
