//! Single-flight loading of record sets into indexed stores

mod store_loader;

pub use store_loader::StoreLoader;
