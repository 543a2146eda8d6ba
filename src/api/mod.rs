// Start of file: /src/api/mod.rs

/*
    * HTTP API. Each feature lives in its own folder with routes and handlers.
*/

pub mod insight;

// End of file: /src/api/mod.rs
