pub mod fakestore;

pub use fakestore::FakeStoreCatalog;
